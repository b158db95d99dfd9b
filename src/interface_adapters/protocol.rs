// Wire protocol DTOs and conversions for the relay socket and the save API.

use crate::domain::catalog::STARTING_INVENTORY;
use crate::domain::ports::LeaderboardEntry;
use crate::domain::progression::{DEFAULT_NAME_TAG, SaveData};
use crate::domain::state::{Attitude, PoseSnapshot, RemotePlayer};
use crate::use_cases::RosterUpdate;
use glam::Vec3;
use serde::{Deserialize, Serialize};

/// Messages a game client sends to the relay.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum ClientMessage {
    #[serde(rename = "UPDATE_POS")]
    UpdatePos { payload: PlayerPoseDto },
    // Anything else is tolerated and ignored.
    #[serde(other)]
    Unknown,
}

/// Messages the relay sends to game clients.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum ServerMessage {
    #[serde(rename = "PLAYERS_UPDATE")]
    PlayersUpdate { players: Vec<PlayerPoseDto> },
    #[serde(other)]
    Unknown,
}

/// One aircraft on the wire. Rotation is `[pitch, yaw, roll]`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlayerPoseDto {
    pub id: String,
    pub position: [f32; 3],
    pub rotation: [f32; 3],
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub skin: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name_tag: Option<String>,
}

impl PlayerPoseDto {
    pub fn is_finite(&self) -> bool {
        self.position
            .iter()
            .chain(self.rotation.iter())
            .all(|v| v.is_finite())
    }
}

fn attitude_to_wire(rotation: &Attitude) -> [f32; 3] {
    [rotation.pitch, rotation.yaw, rotation.roll]
}

fn attitude_from_wire([pitch, yaw, roll]: [f32; 3]) -> Attitude {
    Attitude { pitch, roll, yaw }
}

impl From<&PoseSnapshot> for PlayerPoseDto {
    fn from(pose: &PoseSnapshot) -> Self {
        Self {
            id: pose.id.clone(),
            position: pose.position.to_array(),
            rotation: attitude_to_wire(&pose.rotation),
            skin: Some(pose.skin.clone()),
            name_tag: Some(pose.name_tag.clone()),
        }
    }
}

impl From<&RemotePlayer> for PlayerPoseDto {
    fn from(player: &RemotePlayer) -> Self {
        Self {
            id: player.id.clone(),
            position: player.position.to_array(),
            rotation: attitude_to_wire(&player.rotation),
            skin: player.skin.clone(),
            name_tag: player.name_tag.clone(),
        }
    }
}

impl From<PlayerPoseDto> for RemotePlayer {
    fn from(dto: PlayerPoseDto) -> Self {
        Self {
            id: dto.id,
            position: Vec3::from_array(dto.position),
            rotation: attitude_from_wire(dto.rotation),
            skin: dto.skin,
            name_tag: dto.name_tag,
        }
    }
}

impl From<&RosterUpdate> for ServerMessage {
    fn from(update: &RosterUpdate) -> Self {
        ServerMessage::PlayersUpdate {
            players: update.players.iter().map(PlayerPoseDto::from).collect(),
        }
    }
}

fn default_inventory() -> Vec<String> {
    STARTING_INVENTORY.iter().map(|id| id.to_string()).collect()
}

fn default_name_tag() -> String {
    DEFAULT_NAME_TAG.to_string()
}

/// Body of `POST /api/save` and `GET /api/load`; also the local save file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SavePayload {
    #[serde(default)]
    pub money: u64,
    #[serde(default = "default_inventory")]
    pub inventory: Vec<String>,
    #[serde(default)]
    pub trophies: Vec<String>,
    #[serde(default)]
    pub missions_completed: u32,
    #[serde(default = "default_name_tag")]
    pub player_name_tag: String,
}

impl From<&SaveData> for SavePayload {
    fn from(data: &SaveData) -> Self {
        Self {
            money: data.money,
            inventory: data.inventory.clone(),
            trophies: data.trophies.clone(),
            missions_completed: data.missions_completed,
            player_name_tag: data.player_name_tag.clone(),
        }
    }
}

impl From<SavePayload> for SaveData {
    fn from(payload: SavePayload) -> Self {
        Self {
            money: payload.money,
            inventory: payload.inventory,
            trophies: payload.trophies,
            missions_completed: payload.missions_completed,
            player_name_tag: payload.player_name_tag,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct LeaderboardEntryDto {
    pub username: String,
    #[serde(default)]
    pub score: u64,
}

impl From<LeaderboardEntryDto> for LeaderboardEntry {
    fn from(dto: LeaderboardEntryDto) -> Self {
        Self {
            username: dto.username,
            score: dto.score,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn update_pos_matches_relay_wire_format() {
        let pose = PoseSnapshot {
            id: "abc".to_string(),
            position: Vec3::new(1.0, 2.0, 3.0),
            rotation: Attitude {
                pitch: 0.1,
                roll: 0.3,
                yaw: 0.2,
            },
            skin: "skin_gold".to_string(),
            name_tag: "Pilot".to_string(),
        };
        let msg = ClientMessage::UpdatePos {
            payload: PlayerPoseDto::from(&pose),
        };

        let value = serde_json::to_value(&msg).unwrap();
        assert_eq!(
            value,
            json!({
                "type": "UPDATE_POS",
                "payload": {
                    "id": "abc",
                    "position": [1.0, 2.0, 3.0],
                    "rotation": [0.1f32, 0.2f32, 0.3f32],
                    "skin": "skin_gold",
                    "nameTag": "Pilot"
                }
            })
        );
    }

    #[test]
    fn players_update_tolerates_missing_optional_fields() {
        let text = r#"{"type":"PLAYERS_UPDATE","players":[
            {"id":"x","position":[0,5,-10],"rotation":[0.5,1.0,-0.25]}
        ]}"#;
        let ServerMessage::PlayersUpdate { players } = serde_json::from_str(text).unwrap() else {
            panic!("expected players update");
        };

        let player = RemotePlayer::from(players[0].clone());
        assert_eq!(player.position, Vec3::new(0.0, 5.0, -10.0));
        assert_eq!(player.rotation.pitch, 0.5);
        assert_eq!(player.rotation.yaw, 1.0);
        assert_eq!(player.rotation.roll, -0.25);
        assert_eq!(player.skin, None);
    }

    #[test]
    fn unknown_message_types_are_not_errors() {
        let server: ServerMessage = serde_json::from_str(r#"{"type":"CHAT","text":"hi"}"#).unwrap();
        assert!(matches!(server, ServerMessage::Unknown));

        let client: ClientMessage = serde_json::from_str(r#"{"type":"PING"}"#).unwrap();
        assert!(matches!(client, ClientMessage::Unknown));
    }

    #[test]
    fn save_payload_defaults_missing_fields() {
        let payload: SavePayload = serde_json::from_str(r#"{"money": 250}"#).unwrap();
        assert_eq!(payload.money, 250);
        assert_eq!(payload.inventory.len(), 4);
        assert_eq!(payload.missions_completed, 0);
        assert_eq!(payload.player_name_tag, "Pilot");
        assert!(payload.trophies.is_empty());
    }

    #[test]
    fn save_payload_uses_camel_case_keys() {
        let value = serde_json::to_value(SavePayload::from(&SaveData::default())).unwrap();
        assert!(value.get("missionsCompleted").is_some());
        assert!(value.get("playerNameTag").is_some());
    }

    #[test]
    fn non_finite_pose_is_detected() {
        let mut dto = PlayerPoseDto {
            id: "x".to_string(),
            position: [0.0; 3],
            rotation: [0.0; 3],
            skin: None,
            name_tag: None,
        };
        assert!(dto.is_finite());
        dto.rotation[2] = f32::INFINITY;
        assert!(!dto.is_finite());
    }
}

// Domain-level aircraft state and the pose snapshots derived from it.

use glam::Vec3;

/// Euler attitude in radians. Pitch positive is nose up, positive yaw turns
/// the nose towards -X.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Attitude {
    pub pitch: f32,
    pub roll: f32,
    pub yaw: f32,
}

impl Attitude {
    /// Unit vector the nose points along: heading first, then pitch.
    pub fn forward(&self) -> Vec3 {
        let (sin_yaw, cos_yaw) = self.yaw.sin_cos();
        let (sin_pitch, cos_pitch) = self.pitch.sin_cos();
        Vec3::new(-sin_yaw * cos_pitch, sin_pitch, -cos_yaw * cos_pitch)
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AircraftState {
    pub position: Vec3,
    // Recomputed every tick from heading and speed.
    pub velocity: Vec3,
    pub rotation: Attitude,
    // Smoothed throttle-driven speed, never negative.
    pub speed: f32,
    pub grounded: bool,
}

impl AircraftState {
    /// Parked on the runway at the world origin.
    pub fn parked(ground_level: f32) -> Self {
        Self {
            position: Vec3::new(0.0, ground_level, 0.0),
            velocity: Vec3::ZERO,
            rotation: Attitude::default(),
            speed: 0.0,
            grounded: true,
        }
    }

    /// Altitude above the runway as shown on the HUD (feet-ish).
    pub fn display_altitude(&self, ground_level: f32) -> i32 {
        ((self.position.y - ground_level) * 10.0).round() as i32
    }

    /// Speed as shown on the HUD (km/h-ish).
    pub fn display_speed(&self) -> i32 {
        (self.speed * 400.0).round() as i32
    }
}

/// Minimal transmissible snapshot of the local aircraft.
#[derive(Debug, Clone, PartialEq)]
pub struct PoseSnapshot {
    pub id: String,
    pub position: Vec3,
    pub rotation: Attitude,
    pub skin: String,
    pub name_tag: String,
}

/// Another player's aircraft as last reported by the relay.
#[derive(Debug, Clone, PartialEq)]
pub struct RemotePlayer {
    pub id: String,
    pub position: Vec3,
    pub rotation: Attitude,
    pub skin: Option<String>,
    pub name_tag: Option<String>,
}

impl RemotePlayer {
    /// Label for the name tag; falls back to a short id-based name.
    pub fn display_name(&self) -> String {
        match &self.name_tag {
            Some(tag) if !tag.is_empty() => tag.clone(),
            _ => format!("Pilot {}", self.id.chars().take(4).collect::<String>()),
        }
    }
}

impl From<&PoseSnapshot> for RemotePlayer {
    fn from(pose: &PoseSnapshot) -> Self {
        Self {
            id: pose.id.clone(),
            position: pose.position,
            rotation: pose.rotation,
            skin: Some(pose.skin.clone()),
            name_tag: Some(pose.name_tag.clone()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn level_forward_points_down_negative_z() {
        let forward = Attitude::default().forward();
        assert_relative_eq!(forward.x, 0.0);
        assert_relative_eq!(forward.y, 0.0);
        assert_relative_eq!(forward.z, -1.0);
    }

    #[test]
    fn nose_up_pitch_climbs_regardless_of_heading() {
        let attitude = Attitude {
            pitch: 0.3,
            roll: 0.0,
            yaw: std::f32::consts::FRAC_PI_2,
        };
        let forward = attitude.forward();
        assert_relative_eq!(forward.y, 0.3f32.sin(), epsilon = 1e-6);
        assert_relative_eq!(forward.length(), 1.0, epsilon = 1e-6);
    }

    #[test]
    fn climbing_keeps_the_ground_track_on_the_heading() {
        let attitude = Attitude {
            pitch: 0.4,
            roll: 0.0,
            yaw: 0.5,
        };
        let forward = attitude.forward();
        assert_relative_eq!(forward.x, -0.5f32.sin() * 0.4f32.cos(), epsilon = 1e-6);
        assert_relative_eq!(forward.y, 0.4f32.sin(), epsilon = 1e-6);
        assert_relative_eq!(forward.z, -0.5f32.cos() * 0.4f32.cos(), epsilon = 1e-6);
        // Horizontal direction depends on yaw alone.
        assert_relative_eq!((-forward.x).atan2(-forward.z), 0.5, epsilon = 1e-6);
    }

    #[test]
    fn display_values_match_hud_scaling() {
        let mut state = AircraftState::parked(2.0);
        state.position.y = 82.04;
        state.speed = 2.5;
        assert_eq!(state.display_altitude(2.0), 800);
        assert_eq!(state.display_speed(), 1000);
    }

    #[test]
    fn remote_player_without_tag_uses_short_id() {
        let player = RemotePlayer {
            id: "abcdef123".to_string(),
            position: Vec3::ZERO,
            rotation: Attitude::default(),
            skin: None,
            name_tag: None,
        };
        assert_eq!(player.display_name(), "Pilot abcd");
    }
}

// Game session: the single owner of one player's simulation and progress.
//
// Everything here is synchronous and free of I/O. The frame loop calls
// `frame` on a fixed interval, forwards the returned pose to the relay and
// drains save requests into the persistence task.

use super::sync::is_sync_frame;
use super::types::{FrameReport, GameState, MissionDebrief};
use crate::domain::avionics::{ANNOUNCEMENT_TTL_SECS, Announcement, PlaneSystems, SystemToggle, ToggleOutcome};
use crate::domain::controls::{ControlInput, ControlVector, Gesture};
use crate::domain::errors::SessionError;
use crate::domain::mission::{self, MISSION_DISTANCES_KM, Mission, MissionProgress};
use crate::domain::progression::{ProgressionState, PurchaseOutcome, SaveData};
use crate::domain::state::{AircraftState, PoseSnapshot};
use crate::domain::systems::flight::{self, FlightConfig};
use crate::domain::tuning::flight::FlightTuning;
use crate::domain::tuning::mission::MissionTuning;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use tracing::{debug, info};

pub const DOOR_WARNING: &str = "CLOSE THE DOOR BEFORE TAKEOFF!";
pub const INVALID_CODE_MESSAGE: &str = "INVALID OR EXPIRED CODE";

/// Joystick travel used by the session's gesture normalizer.
pub const STICK_RADIUS: f32 = 1.0;

#[derive(Debug, Clone, Copy)]
pub struct SessionPolicy {
    /// Hard touchdowns end the mission as CRASHED.
    pub crash_on_hard_landing: bool,
    /// Chance per blocked tick that the door warning is shown.
    pub door_warning_chance: f64,
}

impl Default for SessionPolicy {
    fn default() -> Self {
        Self {
            crash_on_hard_landing: false,
            door_warning_chance: 0.05,
        }
    }
}

pub struct GameSession {
    player_id: String,
    state: GameState,
    aircraft: AircraftState,
    input: ControlInput,
    systems: PlaneSystems,
    progression: ProgressionState,
    mission: Option<Mission>,
    progress: Option<MissionProgress>,
    flight_tuning: FlightTuning,
    mission_tuning: MissionTuning,
    policy: SessionPolicy,
    rng: ChaCha8Rng,
    // Session clock in seconds, advanced by `frame`.
    now: f64,
    // Short-lived HUD message for redeem results.
    notice: Option<Announcement>,
    save_requested: bool,
}

impl GameSession {
    pub fn new(player_id: impl Into<String>, seed: u64) -> Self {
        let flight_tuning = FlightTuning::default();
        Self {
            player_id: player_id.into(),
            state: GameState::Splash,
            aircraft: AircraftState::parked(flight_tuning.ground_level),
            input: ControlInput::new(STICK_RADIUS),
            systems: PlaneSystems::default(),
            progression: ProgressionState::default(),
            mission: None,
            progress: None,
            flight_tuning,
            mission_tuning: MissionTuning::default(),
            policy: SessionPolicy::default(),
            rng: ChaCha8Rng::seed_from_u64(seed),
            now: 0.0,
            notice: None,
            save_requested: false,
        }
    }

    pub fn with_policy(mut self, policy: SessionPolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn player_id(&self) -> &str {
        &self.player_id
    }

    pub fn state(&self) -> GameState {
        self.state
    }

    pub fn aircraft(&self) -> &AircraftState {
        &self.aircraft
    }

    pub fn controls(&self) -> ControlVector {
        self.input.controls()
    }

    pub fn systems(&self) -> &PlaneSystems {
        &self.systems
    }

    pub fn progression(&self) -> &ProgressionState {
        &self.progression
    }

    pub fn mission(&self) -> Option<&Mission> {
        self.mission.as_ref()
    }

    pub fn progress(&self) -> Option<MissionProgress> {
        self.progress
    }

    pub fn now(&self) -> f64 {
        self.now
    }

    pub fn display_altitude(&self) -> i32 {
        self.aircraft.display_altitude(self.flight_tuning.ground_level)
    }

    fn invalid(&self, action: &'static str) -> SessionError {
        SessionError::InvalidTransition {
            from: self.state,
            action,
        }
    }

    pub fn finish_boot(&mut self) -> Result<(), SessionError> {
        if self.state != GameState::Splash {
            return Err(self.invalid("finish_boot"));
        }
        self.state = GameState::Menu;
        Ok(())
    }

    /// Accepts a contract from the mission board and puts the aircraft back
    /// on the departure runway.
    pub fn start_mission(&mut self, distance_km: u32) -> Result<&Mission, SessionError> {
        if self.state != GameState::Menu {
            return Err(self.invalid("start_mission"));
        }
        if !MISSION_DISTANCES_KM.contains(&distance_km) {
            return Err(SessionError::UnknownRoute(distance_km));
        }

        let mission = Mission::generate(distance_km, &mut self.rng, &self.mission_tuning);
        info!(
            mission_id = %mission.id,
            distance_km,
            destination = %mission.destination_name,
            "mission started"
        );

        self.aircraft = AircraftState::parked(self.flight_tuning.ground_level);
        self.input.reset();
        self.progress = None;
        self.state = GameState::Playing;
        Ok(self.mission.insert(mission))
    }

    /// Reward waiting to be collected on the success screen.
    pub fn claimable_reward(&self) -> Option<u64> {
        match self.state {
            GameState::Success => self.mission.as_ref().map(|m| m.reward),
            _ => None,
        }
    }

    /// Leaves the SUCCESS or CRASHED screen. A successful delivery pays out
    /// and queues a save.
    pub fn continue_to_menu(&mut self) -> Result<Option<MissionDebrief>, SessionError> {
        let debrief = match self.state {
            GameState::Success => {
                let reward = self.mission.as_ref().map_or(0, |m| m.reward);
                let unlocked = self.progression.complete_mission(reward);
                info!(reward, money = self.progression.money, "reward claimed");
                self.save_requested = true;
                Some(MissionDebrief { reward, unlocked })
            }
            GameState::Crashed => None,
            _ => return Err(self.invalid("continue")),
        };

        self.mission = None;
        self.progress = None;
        self.state = GameState::Menu;
        Ok(debrief)
    }

    pub fn abort_mission(&mut self) -> Result<(), SessionError> {
        if self.state != GameState::Playing {
            return Err(self.invalid("abort"));
        }
        info!("mission aborted");
        self.mission = None;
        self.progress = None;
        self.state = GameState::Menu;
        Ok(())
    }

    pub fn apply_gesture(&mut self, gesture: Gesture) {
        self.input.apply(gesture);
    }

    pub fn toggle_system(&mut self, toggle: SystemToggle) -> ToggleOutcome {
        let altitude = self.display_altitude();
        let outcome = self.systems.toggle(toggle, altitude);
        debug!(system = %toggle, ?outcome, "system toggled");
        outcome
    }

    pub fn announce(&mut self, text: impl Into<String>) {
        self.systems.announce(text, self.now);
    }

    pub fn announcement(&self) -> Option<&str> {
        self.systems.announcement(self.now)
    }

    pub fn notice(&self) -> Option<&str> {
        self.notice
            .as_ref()
            .filter(|n| self.now < n.expires_at)
            .map(|n| n.text.as_str())
    }

    fn set_notice(&mut self, text: impl Into<String>) {
        self.notice = Some(Announcement {
            text: text.into(),
            expires_at: self.now + ANNOUNCEMENT_TTL_SECS,
        });
    }

    pub fn buy(&mut self, item_id: &str) -> PurchaseOutcome {
        let outcome = self.progression.purchase(item_id);
        if outcome == PurchaseOutcome::Bought {
            info!(item_id, money = self.progression.money, "item bought");
            self.save_requested = true;
        }
        outcome
    }

    /// Tries a redeem code; the result is shown as a transient notice.
    pub fn redeem(&mut self, code: &str) -> bool {
        match self.progression.redeem_code(code) {
            Some(tag) => {
                self.set_notice(format!("SPECIAL TAG: {}", tag.to_uppercase()));
                self.save_requested = true;
                true
            }
            None => {
                self.set_notice(INVALID_CODE_MESSAGE);
                false
            }
        }
    }

    pub fn set_name_tag(&mut self, tag: impl Into<String>) {
        self.progression.name_tag = tag.into();
    }

    /// Installs loaded progress; `None` keeps a fresh profile.
    pub fn apply_loaded(&mut self, save: Option<SaveData>) {
        self.progression.apply_save(save.unwrap_or_default());
    }

    pub fn request_save(&mut self) {
        self.save_requested = true;
    }

    /// Snapshot to persist, if anything asked for a save since the last call.
    pub fn take_save_request(&mut self) -> Option<SaveData> {
        std::mem::take(&mut self.save_requested).then(|| self.progression.to_save())
    }

    pub fn pose(&self) -> PoseSnapshot {
        PoseSnapshot {
            id: self.player_id.clone(),
            position: self.aircraft.position,
            rotation: self.aircraft.rotation,
            skin: self.progression.equipped_skin.clone(),
            name_tag: self.progression.name_tag.clone(),
        }
    }

    /// Advances the session to `elapsed` seconds. Physics only runs while
    /// PLAYING.
    pub fn frame(&mut self, delta: f32, elapsed: f64) -> FrameReport {
        self.now = elapsed;
        self.systems.clear_expired(elapsed);
        if self.notice.as_ref().is_some_and(|n| elapsed >= n.expires_at) {
            self.notice = None;
        }

        let mut report = FrameReport::default();
        if self.state != GameState::Playing {
            return report;
        }
        let Some(mission) = self.mission.as_ref() else {
            return report;
        };

        let cfg = FlightConfig::new(self.flight_tuning, self.progression.has_turbo());
        let step = flight::step(&self.aircraft, &self.input.controls(), &self.systems, delta, &cfg);
        self.aircraft = step.state;
        report.events = step.events;

        let progress = mission::evaluate(mission, &self.aircraft, &self.mission_tuning);
        self.progress = Some(progress);
        report.progress = Some(progress);

        if step.events.door_blocked && self.rng.gen_bool(self.policy.door_warning_chance) {
            self.systems.announce(DOOR_WARNING, elapsed);
        }

        if step.events.touched_down {
            debug!(hard = step.events.hard_landing, "touchdown");
        }

        report.unlocked = self
            .progression
            .evaluate_trophies(Some(self.display_altitude()));
        if !report.unlocked.is_empty() {
            info!(trophies = ?report.unlocked, "trophies unlocked");
            self.save_requested = true;
        }

        if step.events.hard_landing && self.policy.crash_on_hard_landing {
            info!("hard landing, aircraft crashed");
            self.state = GameState::Crashed;
            report.transition = Some(GameState::Crashed);
        } else if progress.landed {
            info!(distance = progress.distance, "delivery complete");
            self.state = GameState::Success;
            report.transition = Some(GameState::Success);
        }

        if is_sync_frame(elapsed) {
            report.pose = Some(self.pose());
        }

        report
    }
}

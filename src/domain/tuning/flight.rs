/// Gameplay tuning for the player aircraft.
///
/// All rates are per simulation tick unless noted otherwise; velocities are
/// world units per tick, not per second. Keep this separate from runtime
/// configuration (frame interval, channel sizes, etc.).

#[derive(Debug, Clone, Copy)]
pub struct FlightTuning {
    /// Top speed with full throttle and the stock engine.
    pub base_max_air_speed: f32,

    /// Top speed once the turbo upgrade is owned.
    pub turbo_max_air_speed: f32,

    /// How fast the smoothed speed chases the throttle target, per second.
    pub throttle_response: f32,

    /// Speed above which the aircraft may rotate off the ground.
    pub takeoff_speed: f32,

    /// Nose-up stick deflection required to rotate.
    pub takeoff_pitch_input: f32,

    /// Upward velocity added on the tick the wheels leave the ground.
    pub takeoff_impulse: f32,

    /// Below this speed the aircraft cannot taxi-steer and the door guard
    /// considers it stopped.
    pub taxi_speed: f32,

    /// Yaw rate from the roll stick while taxiing, radians per second.
    pub taxi_turn_rate: f32,

    /// Maximum commanded attitude for full stick deflection, radians.
    pub max_attitude: f32,

    /// Pitch interpolation rate, per second.
    pub pitch_response: f32,

    /// Roll interpolation rate, per second.
    pub roll_response: f32,

    /// Heading change per radian of bank, per second.
    pub bank_turn_rate: f32,

    /// Downward velocity applied every airborne tick.
    pub gravity: f32,

    /// Lift per unit of speed before attitude projection.
    pub lift_coefficient: f32,

    /// Below this speed the nose drops regardless of stick input.
    pub stall_speed: f32,

    /// Nose-down drift while stalled, radians per second.
    pub stall_pitch_rate: f32,

    /// Altitude of the runway surface.
    pub ground_level: f32,

    // Touchdown attitude/speed limits used to flag hard landings.
    pub hard_landing_pitch: f32,
    pub hard_landing_roll: f32,
    pub hard_landing_speed: f32,
}

impl Default for FlightTuning {
    fn default() -> Self {
        Self {
            base_max_air_speed: 2.5,
            turbo_max_air_speed: 3.5,
            throttle_response: 0.5,
            takeoff_speed: 0.8,
            takeoff_pitch_input: 0.2,
            takeoff_impulse: 0.1,
            taxi_speed: 0.1,
            taxi_turn_rate: 0.5,
            max_attitude: 0.8,
            pitch_response: 2.0,
            roll_response: 3.0,
            bank_turn_rate: 0.8,
            gravity: 0.01,
            lift_coefficient: 0.015,
            stall_speed: 0.3,
            stall_pitch_rate: 0.5,
            ground_level: 2.0,
            hard_landing_pitch: 0.3,
            hard_landing_roll: 0.3,
            hard_landing_speed: 1.5,
        }
    }
}

impl FlightTuning {
    /// Top speed for the current loadout.
    pub fn max_air_speed(&self, has_turbo: bool) -> f32 {
        if has_turbo {
            self.turbo_max_air_speed
        } else {
            self.base_max_air_speed
        }
    }
}

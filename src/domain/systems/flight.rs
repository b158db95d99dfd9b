use crate::domain::avionics::PlaneSystems;
use crate::domain::controls::ControlVector;
use crate::domain::state::AircraftState;
use crate::domain::tuning::flight::FlightTuning;

#[derive(Debug, Clone, Copy)]
pub struct FlightConfig {
    pub max_air_speed: f32,
    pub tuning: FlightTuning,
}

impl FlightConfig {
    pub fn new(tuning: FlightTuning, has_turbo: bool) -> Self {
        Self {
            max_air_speed: tuning.max_air_speed(has_turbo),
            tuning,
        }
    }
}

/// Things that happened during one tick, for the session to react to.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TickEvents {
    /// The open door forced the aircraft to a stop.
    pub door_blocked: bool,
    pub took_off: bool,
    pub touched_down: bool,
    /// Touchdown exceeded the attitude/speed limits.
    pub hard_landing: bool,
}

#[derive(Debug, Clone, Copy)]
pub struct FlightStep {
    pub state: AircraftState,
    pub events: TickEvents,
}

fn lerp(start: f32, end: f32, t: f32) -> f32 {
    start * (1.0 - t) + end * t
}

// Interpolation factor for a per-second rate; saturates on long frames.
fn blend(rate: f32, dt: f32) -> f32 {
    (rate * dt.max(0.0)).clamp(0.0, 1.0)
}

/// Advances the aircraft by one frame. Velocities are distance per tick, so
/// `dt` only scales smoothing and turn rates.
pub fn step(
    prev: &AircraftState,
    controls: &ControlVector,
    systems: &PlaneSystems,
    dt: f32,
    cfg: &FlightConfig,
) -> FlightStep {
    let t = &cfg.tuning;
    let mut s = *prev;
    let mut events = TickEvents::default();

    // throttle lag
    let target_speed = controls.throttle * cfg.max_air_speed;
    s.speed = lerp(s.speed, target_speed, blend(t.throttle_response, dt)).max(0.0);

    if systems.door_open && s.speed > t.taxi_speed {
        s.speed = 0.0;
        events.door_blocked = true;
    }

    // Stick forward (positive pitch input) lowers the nose.
    let target_pitch = -controls.pitch * t.max_attitude;
    let target_roll = -controls.roll * t.max_attitude;

    let started_grounded = prev.grounded;
    let mut vertical_impulse = 0.0;

    if s.grounded {
        s.rotation.pitch = 0.0;
        s.rotation.roll = 0.0;

        if s.speed > t.taxi_speed {
            s.rotation.yaw += -controls.roll * dt * t.taxi_turn_rate;
        }

        if s.speed > t.takeoff_speed && -controls.pitch > t.takeoff_pitch_input {
            s.grounded = false;
            events.took_off = true;
            vertical_impulse = t.takeoff_impulse;
        }
    } else {
        s.rotation.pitch = lerp(s.rotation.pitch, target_pitch, blend(t.pitch_response, dt));
        s.rotation.roll = lerp(s.rotation.roll, target_roll, blend(t.roll_response, dt));

        // Banked turn: heading follows the bank angle.
        s.rotation.yaw += s.rotation.roll * dt * t.bank_turn_rate;
    }

    s.velocity = s.rotation.forward() * s.speed;

    if !s.grounded {
        let lift = s.speed * t.lift_coefficient;
        s.velocity.y -= t.gravity;
        s.velocity.y += lift * s.rotation.roll.cos() * s.rotation.pitch.cos();
        s.velocity.y += vertical_impulse;

        // Stall overrides the stick for this tick.
        if s.speed < t.stall_speed {
            s.rotation.pitch -= dt.max(0.0) * t.stall_pitch_rate;
        }
    }

    s.position += s.velocity;

    if s.position.y <= t.ground_level {
        s.position.y = t.ground_level;

        if events.took_off {
            // Never undo a takeoff in the same tick; contact resolves next frame.
            s.velocity.y = 0.0;
        } else {
            if !started_grounded {
                events.touched_down = true;
                events.hard_landing = s.rotation.pitch < -t.hard_landing_pitch
                    || s.rotation.roll.abs() > t.hard_landing_roll
                    || s.speed > t.hard_landing_speed;
            }
            s.grounded = true;
            s.velocity.y = 0.0;
            s.rotation.pitch = 0.0;
            s.rotation.roll = 0.0;
        }
    }

    FlightStep { state: s, events }
}

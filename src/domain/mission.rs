// Delivery missions: generation, runway geometry and landing evaluation.

use crate::domain::state::AircraftState;
use crate::domain::tuning::mission::MissionTuning;
use glam::Vec2;
use rand::Rng;

/// Route lengths offered on the mission board, in kilometres.
pub const MISSION_DISTANCES_KM: [u32; 6] = [1, 2, 5, 7, 17, 35];

pub const CITIES: [&str; 10] = [
    "São Paulo",
    "Rio de Janeiro",
    "Salvador",
    "Brasília",
    "Fortaleza",
    "Belo Horizonte",
    "Manaus",
    "Curitiba",
    "Recife",
    "Porto Alegre",
];

#[derive(Debug, Clone, PartialEq)]
pub struct Mission {
    pub id: String,
    pub distance_km: u32,
    pub reward: u64,
    pub destination_name: String,
    /// Lateral displacement of the destination so routes are not straight lines.
    pub target_offset_x: f32,
}

impl Mission {
    /// Builds a contract for `distance_km` with a random destination and offset.
    pub fn generate<R: Rng>(distance_km: u32, rng: &mut R, tuning: &MissionTuning) -> Self {
        let city = CITIES[rng.gen_range(0..CITIES.len())];
        let max_offset = distance_km as f32 * tuning.max_offset_per_km;
        let offset = (rng.r#gen::<f32>() - 0.5) * 2.0 * max_offset;
        let id = uuid::Builder::from_random_bytes(rng.r#gen()).into_uuid();

        Self {
            id: id.to_string(),
            distance_km,
            reward: u64::from(distance_km) * tuning.reward_per_km,
            destination_name: city.to_string(),
            target_offset_x: offset,
        }
    }

    /// Runway touchdown point as (x, z). The runway sits at the island edge
    /// facing the departure field, not at the island centre.
    pub fn runway(&self, tuning: &MissionTuning) -> Vec2 {
        let island_z = -(self.distance_km as f32) * tuning.units_per_km;
        Vec2::new(self.target_offset_x, island_z + tuning.runway_offset_z)
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MissionProgress {
    /// Planar distance to the runway in world units.
    pub distance: f32,
    /// Distance as shown on the HUD.
    pub display_distance: i32,
    /// Landed and stopped close enough to the runway.
    pub landed: bool,
}

/// Measures the aircraft against the active mission. Altitude is ignored.
pub fn evaluate(mission: &Mission, aircraft: &AircraftState, tuning: &MissionTuning) -> MissionProgress {
    let runway = mission.runway(tuning);
    let here = Vec2::new(aircraft.position.x, aircraft.position.z);
    let distance = here.distance(runway);

    MissionProgress {
        distance,
        display_distance: (distance / tuning.display_scale).round() as i32,
        landed: distance < tuning.success_radius
            && aircraft.grounded
            && aircraft.speed < tuning.success_speed,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use glam::Vec3;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn mission(distance_km: u32, target_offset_x: f32) -> Mission {
        Mission {
            id: "m-1".to_string(),
            distance_km,
            reward: u64::from(distance_km) * 100,
            destination_name: "Recife".to_string(),
            target_offset_x,
        }
    }

    fn aircraft_at(x: f32, z: f32, grounded: bool, speed: f32) -> AircraftState {
        let mut state = AircraftState::parked(2.0);
        state.position = Vec3::new(x, if grounded { 2.0 } else { 150.0 }, z);
        state.grounded = grounded;
        state.speed = speed;
        state
    }

    #[test]
    fn runway_is_offset_from_island_centre() {
        let runway = mission(5, 120.0).runway(&MissionTuning::default());
        assert_relative_eq!(runway.x, 120.0);
        assert_relative_eq!(runway.y, -4200.0);
    }

    #[test]
    fn distance_ignores_altitude_and_is_scaled_for_display() {
        let tuning = MissionTuning::default();
        let progress = evaluate(&mission(5, 0.0), &aircraft_at(300.0, -3800.0, false, 2.0), &tuning);
        assert_relative_eq!(progress.distance, 500.0, epsilon = 1e-3);
        assert_eq!(progress.display_distance, 50);
        assert!(!progress.landed);
    }

    #[test]
    fn landing_requires_ground_contact_low_speed_and_proximity() {
        let tuning = MissionTuning::default();
        let m = mission(5, 0.0);

        assert!(evaluate(&m, &aircraft_at(0.0, -4100.0, true, 0.05), &tuning).landed);
        // Airborne overhead.
        assert!(!evaluate(&m, &aircraft_at(0.0, -4100.0, false, 0.05), &tuning).landed);
        // Still rolling.
        assert!(!evaluate(&m, &aircraft_at(0.0, -4100.0, true, 0.1), &tuning).landed);
        // Stopped short of the runway.
        assert!(!evaluate(&m, &aircraft_at(0.0, -3900.0, true, 0.0), &tuning).landed);
    }

    #[test]
    fn generated_missions_pay_per_km_and_stay_within_offset_bounds() {
        let tuning = MissionTuning::default();
        let mut rng = ChaCha8Rng::seed_from_u64(7);
        for km in MISSION_DISTANCES_KM {
            let m = Mission::generate(km, &mut rng, &tuning);
            assert_eq!(m.reward, u64::from(km) * 100);
            assert!(m.target_offset_x.abs() <= km as f32 * 400.0);
            assert!(CITIES.contains(&m.destination_name.as_str()));
        }
    }

    #[test]
    fn generation_is_reproducible_for_a_seed() {
        let tuning = MissionTuning::default();
        let a = Mission::generate(7, &mut ChaCha8Rng::seed_from_u64(42), &tuning);
        let b = Mission::generate(7, &mut ChaCha8Rng::seed_from_u64(42), &tuning);
        assert_eq!(a, b);
    }
}

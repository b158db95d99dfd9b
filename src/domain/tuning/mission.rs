/// Gameplay tuning for delivery missions.

#[derive(Debug, Clone, Copy)]
pub struct MissionTuning {
    /// World units per mission kilometre along the approach axis.
    pub units_per_km: f32,

    /// Runway distance from the island centre, towards the departure side.
    pub runway_offset_z: f32,

    /// Landing must end within this planar radius of the runway.
    pub success_radius: f32,

    /// Landing must end below this speed.
    pub success_speed: f32,

    /// Raw distance is divided by this before it reaches the HUD.
    pub display_scale: f32,

    /// Maximum lateral target offset per kilometre.
    pub max_offset_per_km: f32,

    /// Currency paid per mission kilometre.
    pub reward_per_km: u64,
}

impl Default for MissionTuning {
    fn default() -> Self {
        Self {
            units_per_km: 1000.0,
            runway_offset_z: 800.0,
            success_radius: 300.0,
            success_speed: 0.1,
            display_scale: 10.0,
            max_offset_per_km: 400.0,
            reward_per_km: 100,
        }
    }
}

// Cabin and airframe systems: independent toggles plus a transient
// passenger announcement.

use std::fmt;
use std::str::FromStr;

/// Below this HUD altitude the gear cannot be retracted.
pub const GEAR_RETRACT_MIN_ALTITUDE: i32 = 20;

/// How long an announcement stays visible, in session seconds.
pub const ANNOUNCEMENT_TTL_SECS: f64 = 3.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SystemToggle {
    NavLights,
    StrobeLights,
    LandingGear,
    DoorOpen,
    CargoRamp,
    SeatbeltSign,
    NoSmokingSign,
    CabinAc,
    Wifi,
    MealService,
    CoffeeMaker,
    ToiletsFlushed,
    DeIce,
    PitotHeat,
    Apu,
    FuelDump,
    EmergencySlide,
    DistressBeacon,
    AutoPilot,
}

impl SystemToggle {
    pub const ALL: [SystemToggle; 19] = [
        SystemToggle::NavLights,
        SystemToggle::StrobeLights,
        SystemToggle::LandingGear,
        SystemToggle::DoorOpen,
        SystemToggle::CargoRamp,
        SystemToggle::SeatbeltSign,
        SystemToggle::NoSmokingSign,
        SystemToggle::CabinAc,
        SystemToggle::Wifi,
        SystemToggle::MealService,
        SystemToggle::CoffeeMaker,
        SystemToggle::ToiletsFlushed,
        SystemToggle::DeIce,
        SystemToggle::PitotHeat,
        SystemToggle::Apu,
        SystemToggle::FuelDump,
        SystemToggle::EmergencySlide,
        SystemToggle::DistressBeacon,
        SystemToggle::AutoPilot,
    ];

    /// Name used by the console and by saved layouts.
    pub fn key(self) -> &'static str {
        match self {
            SystemToggle::NavLights => "navLights",
            SystemToggle::StrobeLights => "strobeLights",
            SystemToggle::LandingGear => "landingGear",
            SystemToggle::DoorOpen => "doorOpen",
            SystemToggle::CargoRamp => "cargoRamp",
            SystemToggle::SeatbeltSign => "seatbeltSign",
            SystemToggle::NoSmokingSign => "noSmokingSign",
            SystemToggle::CabinAc => "cabinAC",
            SystemToggle::Wifi => "wifi",
            SystemToggle::MealService => "mealService",
            SystemToggle::CoffeeMaker => "coffeeMaker",
            SystemToggle::ToiletsFlushed => "toiletsFlushed",
            SystemToggle::DeIce => "deIce",
            SystemToggle::PitotHeat => "pitotHeat",
            SystemToggle::Apu => "apu",
            SystemToggle::FuelDump => "fuelDump",
            SystemToggle::EmergencySlide => "emergencySlide",
            SystemToggle::DistressBeacon => "distressBeacon",
            SystemToggle::AutoPilot => "autoPilot",
        }
    }
}

impl fmt::Display for SystemToggle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownSystem(pub String);

impl FromStr for SystemToggle {
    type Err = UnknownSystem;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        SystemToggle::ALL
            .into_iter()
            .find(|toggle| toggle.key().eq_ignore_ascii_case(s))
            .ok_or_else(|| UnknownSystem(s.to_string()))
    }
}

/// Result of a toggle request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToggleOutcome {
    /// The system now has this value.
    Switched(bool),
    /// A guard refused the change; nothing was modified.
    Rejected,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Announcement {
    pub text: String,
    pub expires_at: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct PlaneSystems {
    pub nav_lights: bool,
    pub strobe_lights: bool,
    pub landing_gear: bool,
    pub door_open: bool,
    pub cargo_ramp: bool,
    pub seatbelt_sign: bool,
    pub no_smoking_sign: bool,
    pub cabin_ac: bool,
    pub wifi: bool,
    pub meal_service: bool,
    pub coffee_maker: bool,
    pub toilets_flushed: bool,
    pub de_ice: bool,
    pub pitot_heat: bool,
    pub apu: bool,
    pub fuel_dump: bool,
    pub emergency_slide: bool,
    pub distress_beacon: bool,
    pub auto_pilot: bool,
    announcement: Option<Announcement>,
}

impl Default for PlaneSystems {
    fn default() -> Self {
        Self {
            nav_lights: true,
            strobe_lights: false,
            landing_gear: true,
            door_open: false,
            cargo_ramp: false,
            seatbelt_sign: true,
            no_smoking_sign: true,
            cabin_ac: true,
            wifi: false,
            meal_service: false,
            coffee_maker: false,
            toilets_flushed: false,
            de_ice: false,
            pitot_heat: false,
            apu: false,
            fuel_dump: false,
            emergency_slide: false,
            distress_beacon: false,
            auto_pilot: false,
            announcement: None,
        }
    }
}

impl PlaneSystems {
    pub fn get(&self, toggle: SystemToggle) -> bool {
        match toggle {
            SystemToggle::NavLights => self.nav_lights,
            SystemToggle::StrobeLights => self.strobe_lights,
            SystemToggle::LandingGear => self.landing_gear,
            SystemToggle::DoorOpen => self.door_open,
            SystemToggle::CargoRamp => self.cargo_ramp,
            SystemToggle::SeatbeltSign => self.seatbelt_sign,
            SystemToggle::NoSmokingSign => self.no_smoking_sign,
            SystemToggle::CabinAc => self.cabin_ac,
            SystemToggle::Wifi => self.wifi,
            SystemToggle::MealService => self.meal_service,
            SystemToggle::CoffeeMaker => self.coffee_maker,
            SystemToggle::ToiletsFlushed => self.toilets_flushed,
            SystemToggle::DeIce => self.de_ice,
            SystemToggle::PitotHeat => self.pitot_heat,
            SystemToggle::Apu => self.apu,
            SystemToggle::FuelDump => self.fuel_dump,
            SystemToggle::EmergencySlide => self.emergency_slide,
            SystemToggle::DistressBeacon => self.distress_beacon,
            SystemToggle::AutoPilot => self.auto_pilot,
        }
    }

    fn slot(&mut self, toggle: SystemToggle) -> &mut bool {
        match toggle {
            SystemToggle::NavLights => &mut self.nav_lights,
            SystemToggle::StrobeLights => &mut self.strobe_lights,
            SystemToggle::LandingGear => &mut self.landing_gear,
            SystemToggle::DoorOpen => &mut self.door_open,
            SystemToggle::CargoRamp => &mut self.cargo_ramp,
            SystemToggle::SeatbeltSign => &mut self.seatbelt_sign,
            SystemToggle::NoSmokingSign => &mut self.no_smoking_sign,
            SystemToggle::CabinAc => &mut self.cabin_ac,
            SystemToggle::Wifi => &mut self.wifi,
            SystemToggle::MealService => &mut self.meal_service,
            SystemToggle::CoffeeMaker => &mut self.coffee_maker,
            SystemToggle::ToiletsFlushed => &mut self.toilets_flushed,
            SystemToggle::DeIce => &mut self.de_ice,
            SystemToggle::PitotHeat => &mut self.pitot_heat,
            SystemToggle::Apu => &mut self.apu,
            SystemToggle::FuelDump => &mut self.fuel_dump,
            SystemToggle::EmergencySlide => &mut self.emergency_slide,
            SystemToggle::DistressBeacon => &mut self.distress_beacon,
            SystemToggle::AutoPilot => &mut self.auto_pilot,
        }
    }

    /// Flips one system. `altitude` is the HUD altitude used by the gear guard.
    pub fn toggle(&mut self, toggle: SystemToggle, altitude: i32) -> ToggleOutcome {
        // Gear stays down while on or near the ground.
        if toggle == SystemToggle::LandingGear
            && self.landing_gear
            && altitude < GEAR_RETRACT_MIN_ALTITUDE
        {
            return ToggleOutcome::Rejected;
        }

        let slot = self.slot(toggle);
        *slot = !*slot;
        ToggleOutcome::Switched(*slot)
    }

    /// Shows a message, replacing any current one.
    pub fn announce(&mut self, text: impl Into<String>, now: f64) {
        self.announcement = Some(Announcement {
            text: text.into(),
            expires_at: now + ANNOUNCEMENT_TTL_SECS,
        });
    }

    /// The message visible at `now`, if any.
    pub fn announcement(&self, now: f64) -> Option<&str> {
        self.announcement
            .as_ref()
            .filter(|a| now < a.expires_at)
            .map(|a| a.text.as_str())
    }

    /// Drops an expired message. Returns true when something was cleared.
    pub fn clear_expired(&mut self, now: f64) -> bool {
        if self
            .announcement
            .as_ref()
            .is_some_and(|a| now >= a.expires_at)
        {
            self.announcement = None;
            return true;
        }
        false
    }
}

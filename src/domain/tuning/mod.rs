pub mod flight;
pub mod mission;

pub mod controls;
pub mod profile;

pub use controls::{FlapSetting, FlightControls};
pub use profile::{AircraftProfile, AircraftType, ThrustLapse};

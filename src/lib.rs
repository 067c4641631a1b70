//! Real-time 6-DoF flight dynamics: aerodynamic forces and moments
//! integrated into a rigid-body state each tick, with an explicit
//! airborne / on-ground / crashed flight-phase machine.

pub mod aircraft;
pub mod environment;
pub mod physics;
pub mod utils;

pub use aircraft::{AircraftProfile, AircraftType, FlapSetting, FlightControls, ThrustLapse};
pub use environment::Environment;
pub use physics::{AirData, EulerAngles, FlightDynamics, FlightPhase, FlightState};
pub use utils::errors::ConfigError;

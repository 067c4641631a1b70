pub const GRAVITY: f64 = 9.81; // m/s^2

// Atmosphere model
pub const AIR_DENSITY_SEA_LEVEL: f64 = 1.225; // kg/m^3
pub const ATMOSPHERE_SCALE_HEIGHT: f64 = 8500.0; // m
pub const ISA_SEA_LEVEL_TEMP: f64 = 288.15; // K
pub const ISA_LAPSE_RATE: f64 = 0.0065; // K/m
pub const TROPOPAUSE_ALTITUDE: f64 = 11_000.0; // m
pub const TROPOPAUSE_TEMP: f64 = 216.65; // K
pub const AIR_GAS_CONSTANT: f64 = 287.0; // J/(kg·K)
pub const HEAT_CAPACITY_RATIO: f64 = 1.4;

// Integration
pub const MAX_TIMESTEP: f64 = 0.05; // s, caller dt is clamped to this

// Display conversions
pub const MPS_TO_KMH: f64 = 3.6;

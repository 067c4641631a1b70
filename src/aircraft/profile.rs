use log::warn;
use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::utils::constants::AIR_DENSITY_SEA_LEVEL;
use crate::utils::errors::ConfigError;

/// How available thrust decays with altitude.
///
/// The lapse model is profile data, not a property of the force
/// computation: every preset carries the curve that matches its
/// powerplant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ThrustLapse {
    /// Thrust falls off linearly with altitude and saturates at a
    /// residual floor (turbojet-style ram recovery).
    Linear,
    /// Thrust follows the ambient-to-sea-level density ratio, floored
    /// near zero (normally-aspirated piston and high-bypass behavior).
    Density,
}

const LINEAR_LAPSE_CEILING: f64 = 20_000.0; // m
const LINEAR_LAPSE_FLOOR: f64 = 0.3;
const DENSITY_LAPSE_FLOOR: f64 = 0.1;

impl ThrustLapse {
    /// Fraction of rated thrust available at the given altitude.
    pub fn factor(self, altitude: f64, density: f64) -> f64 {
        match self {
            ThrustLapse::Linear => (1.0 - altitude / LINEAR_LAPSE_CEILING).max(LINEAR_LAPSE_FLOOR),
            ThrustLapse::Density => (density / AIR_DENSITY_SEA_LEVEL).max(DENSITY_LAPSE_FLOOR),
        }
    }
}

/// Immutable performance data for one aircraft. Selected once at engine
/// construction (or on explicit aircraft change) and read-only
/// thereafter; the force model varies only through these coefficients.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AircraftProfile {
    /// Display name
    pub name: String,

    /// Mass [kg]
    pub mass: f64,
    /// Wing reference area [m^2]
    pub wing_area: f64,
    /// Wing span [m]
    pub wing_span: f64,
    /// Wing aspect ratio
    pub aspect_ratio: f64,

    /// Maximum rated thrust [N]
    pub max_thrust: f64,
    /// Stall speed [m/s]
    pub stall_speed: f64,
    /// Cruise speed [m/s]
    pub cruise_speed: f64,
    /// Never-exceed speed [m/s]
    pub never_exceed_speed: f64,
    /// Service ceiling [m]
    pub service_ceiling: f64,

    /// Maximum lift coefficient
    pub cl_max: f64,
    /// Lift coefficient at zero angle of attack
    pub cl_0: f64,
    /// Lift-curve slope [per rad]
    pub cl_alpha: f64,
    /// Zero-lift (parasitic) drag coefficient
    pub cd_0: f64,
    /// Induced-drag coefficient
    pub cd_induced: f64,

    /// Maximum commanded pitch rate [rad/s]
    pub pitch_rate: f64,
    /// Maximum commanded roll rate [rad/s]
    pub roll_rate: f64,
    /// Maximum commanded yaw rate [rad/s]
    pub yaw_rate: f64,

    /// Pitch-rate damping coefficient
    pub pitch_damping: f64,
    /// Roll-rate damping coefficient
    pub roll_damping: f64,
    /// Yaw-rate damping coefficient
    pub yaw_damping: f64,

    /// Longitudinal static stability (restores zero angle of attack)
    pub pitch_stability: f64,
    /// Lateral static stability (restores wings level)
    pub roll_stability: f64,
    /// Directional static stability (restores zero sideslip)
    pub yaw_stability: f64,

    /// Additional lift coefficient per 10 degrees of flap
    pub flap_cl_bonus: f64,
    /// Additional drag coefficient per 10 degrees of flap
    pub flap_cd_penalty: f64,
    /// Drag increment with landing gear extended
    pub gear_drag: f64,
    /// Drag increment with the airbrake deployed
    pub brake_drag: f64,

    /// Structural load-factor limit [g]
    pub max_g_force: f64,
    /// Engine spool-up rate [1/s]
    pub engine_response: f64,
    /// Thrust altitude-lapse model
    pub thrust_lapse: ThrustLapse,
}

/// Available aircraft, one variant per built-in preset.
#[derive(Debug, Clone, Serialize, Deserialize, Hash, PartialEq, Eq)]
pub enum AircraftType {
    Cessna172,
    F16Falcon,
    Boeing737,
    Custom(String),
}

impl AircraftProfile {
    /// Light piston single (Cessna 172 class). The default preset.
    pub fn cessna_172() -> Self {
        Self {
            name: "Cessna 172".to_string(),
            mass: 1100.0,
            wing_area: 16.2,
            wing_span: 11.0,
            aspect_ratio: 7.5,
            max_thrust: 3500.0,
            stall_speed: 28.0,
            cruise_speed: 63.0,
            never_exceed_speed: 80.0,
            service_ceiling: 4100.0,
            cl_max: 1.6,
            cl_0: 0.3,
            cl_alpha: 5.5,
            cd_0: 0.032,
            cd_induced: 0.055,
            pitch_rate: 1.2,
            roll_rate: 1.8,
            yaw_rate: 0.6,
            pitch_damping: 3.0,
            roll_damping: 4.0,
            yaw_damping: 2.5,
            pitch_stability: 0.5,
            roll_stability: 0.3,
            yaw_stability: 0.4,
            flap_cl_bonus: 0.4,
            flap_cd_penalty: 0.015,
            gear_drag: 0.02,
            brake_drag: 0.06,
            max_g_force: 3.8,
            engine_response: 2.0,
            thrust_lapse: ThrustLapse::Density,
        }
    }

    /// Supersonic fighter (F-16 class).
    pub fn f16_falcon() -> Self {
        Self {
            name: "F-16 Falcon".to_string(),
            mass: 9200.0,
            wing_area: 27.87,
            wing_span: 9.96,
            aspect_ratio: 3.56,
            max_thrust: 76_000.0,
            stall_speed: 55.0,
            cruise_speed: 590.0,
            never_exceed_speed: 650.0,
            service_ceiling: 15_000.0,
            cl_max: 1.2,
            cl_0: 0.15,
            cl_alpha: 4.0,
            cd_0: 0.022,
            cd_induced: 0.12,
            pitch_rate: 3.5,
            roll_rate: 5.0,
            yaw_rate: 1.5,
            pitch_damping: 2.5,
            roll_damping: 3.0,
            yaw_damping: 2.0,
            pitch_stability: 0.3,
            roll_stability: 0.15,
            yaw_stability: 0.3,
            flap_cl_bonus: 0.2,
            flap_cd_penalty: 0.01,
            gear_drag: 0.01,
            brake_drag: 0.08,
            max_g_force: 9.0,
            engine_response: 4.0,
            thrust_lapse: ThrustLapse::Linear,
        }
    }

    /// Wide-body airliner (737 class).
    pub fn boeing_737() -> Self {
        Self {
            name: "Boeing 737".to_string(),
            mass: 45_000.0,
            wing_area: 125.0,
            wing_span: 35.8,
            aspect_ratio: 9.45,
            max_thrust: 220_000.0,
            stall_speed: 60.0,
            cruise_speed: 243.0,
            never_exceed_speed: 280.0,
            service_ceiling: 12_500.0,
            cl_max: 2.2,
            cl_0: 0.35,
            cl_alpha: 5.8,
            cd_0: 0.025,
            cd_induced: 0.04,
            pitch_rate: 0.6,
            roll_rate: 0.5,
            yaw_rate: 0.3,
            pitch_damping: 4.0,
            roll_damping: 5.0,
            yaw_damping: 3.5,
            pitch_stability: 0.8,
            roll_stability: 0.6,
            yaw_stability: 0.7,
            flap_cl_bonus: 0.5,
            flap_cd_penalty: 0.02,
            gear_drag: 0.015,
            brake_drag: 0.05,
            max_g_force: 2.5,
            engine_response: 1.0,
            thrust_lapse: ThrustLapse::Density,
        }
    }

    pub fn for_type(ac_type: &AircraftType) -> Self {
        match ac_type {
            AircraftType::Cessna172 => Self::cessna_172(),
            AircraftType::F16Falcon => Self::f16_falcon(),
            AircraftType::Boeing737 => Self::boeing_737(),
            AircraftType::Custom(name) => Self::named(name),
        }
    }

    /// Look up a preset by catalog name. Unrecognized names fall back
    /// to the default preset; the fallback is silent apart from a
    /// logged warning.
    pub fn named(name: &str) -> Self {
        match name.to_ascii_lowercase().as_str() {
            "cessna" | "cessna 172" => Self::cessna_172(),
            "fighter" | "f-16" | "f16" | "f-16 falcon" => Self::f16_falcon(),
            "airliner" | "737" | "boeing 737" => Self::boeing_737(),
            other => {
                warn!("Unknown aircraft '{}', using default preset", other);
                Self::default()
            }
        }
    }

    /// Load a profile from a YAML file.
    pub fn from_yaml_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        Self::from_yaml_str(&std::fs::read_to_string(path)?)
    }

    /// Load a profile from a JSON file.
    pub fn from_json_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        Self::from_json_str(&std::fs::read_to_string(path)?)
    }

    pub fn from_yaml_str(contents: &str) -> Result<Self, ConfigError> {
        let profile: Self = serde_yaml::from_str(contents)?;
        profile.validate()?;
        Ok(profile)
    }

    pub fn from_json_str(contents: &str) -> Result<Self, ConfigError> {
        let profile: Self = serde_json::from_str(contents)?;
        profile.validate()?;
        Ok(profile)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.mass <= 0.0 {
            return Err(ConfigError::Validation("mass must be positive".into()));
        }
        if self.wing_area <= 0.0 || self.aspect_ratio <= 0.0 {
            return Err(ConfigError::Validation(
                "wing area and aspect ratio must be positive".into(),
            ));
        }
        if self.stall_speed <= 0.0 || self.stall_speed >= self.never_exceed_speed {
            return Err(ConfigError::Validation(
                "stall speed must be positive and below the never-exceed speed".into(),
            ));
        }
        if self.engine_response <= 0.0 {
            return Err(ConfigError::Validation(
                "engine response rate must be positive".into(),
            ));
        }
        Ok(())
    }
}

impl Default for AircraftProfile {
    fn default() -> Self {
        Self::cessna_172()
    }
}

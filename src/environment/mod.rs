pub mod atmosphere;

pub use atmosphere::{air_density, speed_of_sound};

use nalgebra::Vector3;
use serde::{Deserialize, Serialize};

/// External atmospheric conditions consumed by the engine each tick.
/// Both fields are plain inputs: the engine never mutates them.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Environment {
    /// Wind velocity in the world frame [m/s]
    pub wind: Vector3<f64>,

    /// Turbulence intensity; zero disables the random gust model
    pub turbulence_intensity: f64,
}

impl Default for Environment {
    fn default() -> Self {
        Self {
            wind: Vector3::zeros(),
            turbulence_intensity: 0.0,
        }
    }
}

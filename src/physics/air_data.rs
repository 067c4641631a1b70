use nalgebra::{UnitQuaternion, Vector3};
use serde::{Deserialize, Serialize};

use crate::environment::atmosphere;

/// Below this airspeed the flow direction is numerically meaningless:
/// angle computations return zero and the force model falls back to
/// body axes instead of normalizing near-zero vectors.
pub const MIN_AERO_AIRSPEED: f64 = 1.0;

/// Air quantities derived from the rigid-body state once per tick and
/// exposed read-only for the force model and instrument display.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct AirData {
    /// Airspeed relative to the moving air mass [m/s]
    pub true_airspeed: f64,
    /// Horizontal speed over the ground [m/s]
    pub ground_speed: f64,
    /// Climb rate, positive up [m/s]
    pub vertical_speed: f64,
    /// Angle of attack [rad]
    pub alpha: f64,
    /// Sideslip angle [rad]
    pub beta: f64,
    /// Mach number
    pub mach: f64,
    /// Air density at the current altitude [kg/m^3]
    pub density: f64,
    /// Dynamic pressure [Pa]
    pub dynamic_pressure: f64,
    /// Velocity relative to the air mass, world frame [m/s]
    pub relative_velocity: Vector3<f64>,
}

impl Default for AirData {
    fn default() -> Self {
        Self {
            true_airspeed: 0.0,
            ground_speed: 0.0,
            vertical_speed: 0.0,
            alpha: 0.0,
            beta: 0.0,
            mach: 0.0,
            density: 1.225,
            dynamic_pressure: 0.0,
            relative_velocity: Vector3::zeros(),
        }
    }
}

impl AirData {
    pub fn calculate(
        velocity: &Vector3<f64>,
        attitude: &UnitQuaternion<f64>,
        wind: &Vector3<f64>,
        altitude: f64,
    ) -> Self {
        let relative_velocity = velocity - wind;
        let true_airspeed = relative_velocity.norm();
        let ground_speed = (velocity.x * velocity.x + velocity.z * velocity.z).sqrt();
        let vertical_speed = velocity.y;

        let (alpha, beta) = if true_airspeed > MIN_AERO_AIRSPEED {
            // Flow angles come from the body-frame relative velocity;
            // the body looks down negative Z
            let local = attitude.inverse() * relative_velocity;
            ((-local.y).atan2(-local.z), local.x.atan2(-local.z))
        } else {
            (0.0, 0.0)
        };

        let density = atmosphere::air_density(altitude);
        let mach = true_airspeed / atmosphere::speed_of_sound(altitude);
        let dynamic_pressure = 0.5 * density * true_airspeed * true_airspeed;

        Self {
            true_airspeed,
            ground_speed,
            vertical_speed,
            alpha,
            beta,
            mach,
            density,
            dynamic_pressure,
            relative_velocity,
        }
    }
}

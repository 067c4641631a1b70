use nalgebra::{UnitQuaternion, Vector3};
use serde::{Deserialize, Serialize};

use super::ground::FlightPhase;
use crate::aircraft::AircraftProfile;

/// Spawn pose: level attitude above the field, moving forward at a
/// nominal speed.
pub const SPAWN_POSITION: [f64; 3] = [0.0, 500.0, 0.0];
pub const SPAWN_VELOCITY: [f64; 3] = [0.0, 0.0, -50.0];

/// Yaw-pitch-roll Euler angles for the Y-up world frame ('YXZ' order:
/// yaw about world Y, then pitch about X, then roll about Z). Derived
/// from the attitude quaternion each tick for display and
/// ground-alignment logic.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct EulerAngles {
    /// Yaw [rad]
    pub yaw: f64,
    /// Pitch [rad], positive nose-up
    pub pitch: f64,
    /// Roll [rad]
    pub roll: f64,
}

impl EulerAngles {
    pub fn from_quaternion(attitude: &UnitQuaternion<f64>) -> Self {
        let rot = attitude.to_rotation_matrix();
        let m = rot.matrix();

        let pitch = (-m[(1, 2)].clamp(-1.0, 1.0)).asin();
        let (yaw, roll) = if m[(1, 2)].abs() < 0.999_999_9 {
            (m[(0, 2)].atan2(m[(2, 2)]), m[(1, 0)].atan2(m[(1, 1)]))
        } else {
            // Gimbal lock: pitch is vertical, roll folds into yaw
            ((-m[(2, 0)]).atan2(m[(0, 0)]), 0.0)
        };

        Self { yaw, pitch, roll }
    }

    pub fn to_quaternion(self) -> UnitQuaternion<f64> {
        UnitQuaternion::from_axis_angle(&Vector3::y_axis(), self.yaw)
            * UnitQuaternion::from_axis_angle(&Vector3::x_axis(), self.pitch)
            * UnitQuaternion::from_axis_angle(&Vector3::z_axis(), self.roll)
    }
}

/// The engine-owned rigid-body state, fully rewritten by each
/// `update` call. World frame is Y-up; the spawn heading points along
/// negative Z.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FlightState {
    /// Position in world space [m]
    pub position: Vector3<f64>,

    /// Linear velocity in world space [m/s]
    pub velocity: Vector3<f64>,

    /// Linear acceleration from the last tick [m/s^2]
    pub acceleration: Vector3<f64>,

    /// Attitude quaternion (rotation from body to world frame)
    pub attitude: UnitQuaternion<f64>,

    /// Euler cache re-derived from `attitude` each tick
    pub euler: EulerAngles,

    /// Body-frame angular rates [rad/s]: x = pitch, y = yaw, z = roll
    pub angular_velocity: Vector3<f64>,

    /// Smoothed engine thrust [N]; lags the commanded throttle
    pub thrust: f64,

    /// Load factor along the body up axis [g]
    pub g_force: f64,

    /// Flight status: airborne, rolling on the ground, or crashed
    pub phase: FlightPhase,

    /// Angle of attack is past the stall threshold
    pub is_stalling: bool,

    /// Airspeed exceeds the never-exceed speed
    pub is_overspeed: bool,
}

impl FlightState {
    /// State at the spawn pose for the given profile: thrust matches
    /// the default throttle so the engine starts in trim, all rates
    /// zero, all flags clear.
    pub fn spawn(profile: &AircraftProfile, throttle: f64) -> Self {
        Self {
            position: Vector3::from(SPAWN_POSITION),
            velocity: Vector3::from(SPAWN_VELOCITY),
            acceleration: Vector3::zeros(),
            attitude: UnitQuaternion::identity(),
            euler: EulerAngles::default(),
            angular_velocity: Vector3::zeros(),
            thrust: throttle * profile.max_thrust,
            g_force: 1.0,
            phase: FlightPhase::Airborne,
            is_stalling: false,
            is_overspeed: false,
        }
    }

    /// Altitude above the (flat) ground plane [m]
    pub fn altitude(&self) -> f64 {
        self.position.y
    }
}

use nalgebra::{Unit, UnitQuaternion, Vector3};

use super::state::EulerAngles;
use crate::aircraft::{AircraftProfile, FlightControls};

/// No control authority at or below this airspeed
pub const CONTROL_MIN_AIRSPEED: f64 = 10.0;
/// Full authority is reached at this fraction of stall speed above the minimum
const CONTROL_AUTHORITY_SPAN: f64 = 0.8;
/// Weathervane multiplier on the directional stability term
const WEATHERVANE_GAIN: f64 = 2.0;
/// Weight on the wings-leveling dihedral term
const DIHEDRAL_GAIN: f64 = 0.3;

/// Control-surface authority as a function of airspeed: zero at low
/// speed, unity from just below stall speed up. Squared so authority
/// builds gently out of the low-speed regime; shared by all three axes.
pub fn control_effectiveness(airspeed: f64, stall_speed: f64) -> f64 {
    let linear = ((airspeed - CONTROL_MIN_AIRSPEED) / (CONTROL_AUTHORITY_SPAN * stall_speed))
        .clamp(0.0, 1.0);
    linear * linear
}

/// Per-axis torque from stick input, rate damping, and static
/// stability. Components follow the body-rate convention:
/// x = pitch, y = yaw, z = roll.
pub fn control_torque(
    profile: &AircraftProfile,
    controls: &FlightControls,
    angular_velocity: &Vector3<f64>,
    euler: &EulerAngles,
    alpha: f64,
    beta: f64,
    effectiveness: f64,
) -> Vector3<f64> {
    // Pitch: stick + damping + weathercock toward zero angle of attack
    let pitch = controls.pitch * profile.pitch_rate * effectiveness
        - angular_velocity.x * profile.pitch_damping
        - alpha * profile.pitch_stability * effectiveness;

    // Yaw: rudder + damping + weathervane toward zero sideslip
    let yaw = controls.yaw * profile.yaw_rate * effectiveness
        - angular_velocity.y * profile.yaw_damping
        - beta * profile.yaw_stability * effectiveness * WEATHERVANE_GAIN;

    // Roll: aileron + damping + dihedral effect toward wings level
    let roll = controls.roll * profile.roll_rate * effectiveness
        - angular_velocity.z * profile.roll_damping
        - euler.roll.sin() * profile.roll_stability * DIHEDRAL_GAIN;

    Vector3::new(pitch, yaw, roll)
}

/// Advance the attitude by composing three incremental axis-angle
/// rotations: pitch about the body right axis, yaw about world up,
/// roll about the body forward axis, in that order, using the current
/// body rates. The result is renormalized to keep the quaternion unit
/// length under accumulated floating-point error.
pub fn integrate_attitude(
    attitude: &UnitQuaternion<f64>,
    right: &Vector3<f64>,
    forward: &Vector3<f64>,
    angular_velocity: &Vector3<f64>,
    dt: f64,
) -> UnitQuaternion<f64> {
    let pitch_rot =
        UnitQuaternion::from_axis_angle(&Unit::new_normalize(*right), angular_velocity.x * dt);
    let yaw_rot = UnitQuaternion::from_axis_angle(&Vector3::y_axis(), angular_velocity.y * dt);
    let roll_rot =
        UnitQuaternion::from_axis_angle(&Unit::new_normalize(*forward), angular_velocity.z * dt);

    let updated = roll_rot * yaw_rot * pitch_rot * attitude;
    UnitQuaternion::from_quaternion(updated.into_inner().normalize())
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_effectiveness_zero_at_low_airspeed() {
        assert_relative_eq!(control_effectiveness(0.0, 28.0), 0.0);
        assert_relative_eq!(control_effectiveness(10.0, 28.0), 0.0);
    }

    #[test]
    fn test_effectiveness_saturates_at_one() {
        assert_relative_eq!(control_effectiveness(50.0, 28.0), 1.0);
        assert_relative_eq!(control_effectiveness(500.0, 28.0), 1.0);
    }

    #[test]
    fn test_effectiveness_is_squared() {
        // Halfway up the authority ramp: 10 + 0.5 * 0.8 * 28
        let halfway = control_effectiveness(21.2, 28.0);
        assert_relative_eq!(halfway, 0.25, epsilon = 1e-9);
    }

    #[test]
    fn test_damping_opposes_rates() {
        let profile = AircraftProfile::cessna_172();
        let controls = FlightControls {
            pitch: 0.0,
            roll: 0.0,
            yaw: 0.0,
            ..FlightControls::default()
        };
        let rates = Vector3::new(0.5, -0.2, 0.3);

        let torque = control_torque(
            &profile,
            &controls,
            &rates,
            &EulerAngles::default(),
            0.0,
            0.0,
            1.0,
        );

        assert!(torque.x < 0.0);
        assert!(torque.y > 0.0);
        assert!(torque.z < 0.0);
    }

    #[test]
    fn test_stability_restores_zero_alpha() {
        let profile = AircraftProfile::cessna_172();
        let controls = FlightControls {
            pitch: 0.0,
            ..FlightControls::default()
        };

        let torque = control_torque(
            &profile,
            &controls,
            &Vector3::zeros(),
            &EulerAngles::default(),
            0.1,
            0.0,
            1.0,
        );

        assert!(torque.x < 0.0, "Positive alpha should pitch the nose down");
    }

    #[test]
    fn test_attitude_integration_stays_unit() {
        let mut attitude = UnitQuaternion::identity();
        let rates = Vector3::new(0.4, -0.3, 0.8);

        for _ in 0..1000 {
            let right = attitude * Vector3::new(1.0, 0.0, 0.0);
            let forward = attitude * Vector3::new(0.0, 0.0, -1.0);
            attitude = integrate_attitude(&attitude, &right, &forward, &rates, 0.016);
            assert_relative_eq!(attitude.as_ref().norm(), 1.0, epsilon = 1e-9);
        }
    }

    #[test]
    fn test_pure_pitch_rotation() {
        let attitude = UnitQuaternion::identity();
        let right = Vector3::new(1.0, 0.0, 0.0);
        let forward = Vector3::new(0.0, 0.0, -1.0);

        let rates = Vector3::new(1.0, 0.0, 0.0);
        let updated = integrate_attitude(&attitude, &right, &forward, &rates, 0.1);

        let euler = EulerAngles::from_quaternion(&updated);
        assert_relative_eq!(euler.pitch, 0.1, epsilon = 1e-9);
        assert_relative_eq!(euler.yaw, 0.0, epsilon = 1e-9);
        assert_relative_eq!(euler.roll, 0.0, epsilon = 1e-9);
    }
}

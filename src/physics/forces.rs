use nalgebra::Vector3;

use super::air_data::MIN_AERO_AIRSPEED;

/// Sideslip produces a restoring side force only above this airspeed
pub const SIDE_FORCE_MIN_AIRSPEED: f64 = 5.0;
/// Side-force slope per radian of sideslip, scaled by qS
pub const SIDE_FORCE_SLOPE: f64 = 0.5;

/// Direction lift acts along: the component of the body up axis
/// perpendicular to the relative-velocity direction. Degenerates to
/// the body up axis at near-zero airspeed, or when the flow is aligned
/// with the span and the cross product vanishes.
pub fn lift_direction(
    relative_velocity: &Vector3<f64>,
    right: &Vector3<f64>,
    up: &Vector3<f64>,
    airspeed: f64,
) -> Vector3<f64> {
    if airspeed > MIN_AERO_AIRSPEED {
        let flow = relative_velocity / airspeed;
        let perp = flow.cross(right);
        let norm = perp.norm();
        if norm > 1e-9 {
            let mut lift = perp / norm;
            // Keep lift on the canopy side
            if lift.dot(up) < 0.0 {
                lift = -lift;
            }
            return lift;
        }
    }
    *up
}

/// Drag opposes the relative velocity; below the aero threshold there
/// is no meaningful flow direction and drag vanishes.
pub fn drag_direction(relative_velocity: &Vector3<f64>, airspeed: f64) -> Vector3<f64> {
    if airspeed > MIN_AERO_AIRSPEED {
        -relative_velocity / airspeed
    } else {
        Vector3::zeros()
    }
}

/// First-order spool lag: the smoothed thrust chases the commanded
/// value at the profile's engine-response rate. With the timestep
/// clamp the gain stays below one, so the lag never overshoots.
pub fn smooth_thrust(current: f64, target: f64, response_rate: f64, dt: f64) -> f64 {
    current + (target - current) * dt * response_rate
}

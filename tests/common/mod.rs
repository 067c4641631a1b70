use aerodyne::{EulerAngles, FlightDynamics, FlightPhase, FlightState};
use nalgebra::{UnitQuaternion, Vector3};

/// Step the simulation at a fixed frame interval.
pub fn run_steps(sim: &mut FlightDynamics, steps: usize, dt: f64) {
    for _ in 0..steps {
        sim.update(dt);
    }
}

/// A wings-level airborne state at the given position and velocity,
/// with no residual thrust or rates.
pub fn level_state(position: Vector3<f64>, velocity: Vector3<f64>) -> FlightState {
    FlightState {
        position,
        velocity,
        acceleration: Vector3::zeros(),
        attitude: UnitQuaternion::identity(),
        euler: EulerAngles::default(),
        angular_velocity: Vector3::zeros(),
        thrust: 0.0,
        g_force: 1.0,
        phase: FlightPhase::Airborne,
        is_stalling: false,
        is_overspeed: false,
    }
}

/// A banked variant of [`level_state`].
pub fn banked_state(position: Vector3<f64>, velocity: Vector3<f64>, roll: f64) -> FlightState {
    let euler = EulerAngles {
        yaw: 0.0,
        pitch: 0.0,
        roll,
    };
    FlightState {
        attitude: euler.to_quaternion(),
        euler,
        ..level_state(position, velocity)
    }
}

/// Assert every component of the spatial state is finite.
#[track_caller]
pub fn assert_state_finite(sim: &FlightDynamics) {
    let state = sim.state();
    assert!(
        state.position.iter().all(|v| v.is_finite()),
        "Position is not finite: {:?}",
        state.position
    );
    assert!(
        state.velocity.iter().all(|v| v.is_finite()),
        "Velocity is not finite: {:?}",
        state.velocity
    );
    assert!(
        state.angular_velocity.iter().all(|v| v.is_finite()),
        "Angular velocity is not finite: {:?}",
        state.angular_velocity
    );
    assert!(
        state.attitude.as_ref().coords.iter().all(|v| v.is_finite()),
        "Attitude is not finite: {:?}",
        state.attitude
    );
}

/// Assert the attitude quaternion is unit length to within 1e-6.
#[track_caller]
pub fn assert_attitude_unit(sim: &FlightDynamics) {
    let norm = sim.attitude().as_ref().norm();
    assert!(
        (norm - 1.0).abs() < 1e-6,
        "Attitude quaternion is not unit length: {}",
        norm
    );
}

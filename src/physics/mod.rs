pub mod aero;
pub mod air_data;
pub mod forces;
pub mod ground;
pub mod rotation;
pub mod state;

pub use aero::AeroCoefficients;
pub use air_data::AirData;
pub use ground::{FlightPhase, GroundContact};
pub use state::{EulerAngles, FlightState};

use log::{debug, info};
use nalgebra::Vector3;
use rand::Rng;
use rand_chacha::ChaCha8Rng;

use crate::aircraft::{AircraftProfile, AircraftType, FlapSetting, FlightControls};
use crate::environment::Environment;
use crate::utils::constants::{GRAVITY, MAX_TIMESTEP, MPS_TO_KMH};
use crate::utils::math::{rad_to_deg, wrap_heading_deg};
use crate::utils::rng::RngManager;

/// Turbulence perturbs the acceleration only above this airspeed
const TURBULENCE_MIN_AIRSPEED: f64 = 10.0;
/// Stall buffet shakes the airframe only above this airspeed
const BUFFET_MIN_AIRSPEED: f64 = 10.0;
/// Bank angle past which a turn pulls the nose around [rad]
const TURN_COORDINATION_MIN_BANK: f64 = 0.05;
/// Gain on the coordinated-turn yaw coupling
const TURN_COORDINATION_GAIN: f64 = 0.3;
/// Random pitch torque amplitude while buffeting
const PITCH_BUFFET: f64 = 2.0;
/// Random roll torque amplitude while buffeting
const ROLL_BUFFET: f64 = 3.0;
/// The soft ceiling sits at this multiple of the service ceiling
const CEILING_MARGIN: f64 = 1.2;

const DEFAULT_SEED: u64 = 42;

/// The flight dynamics engine. Owns all physical state for one
/// aircraft; collaborators write control inputs and environment
/// between ticks and read derived state through the getters.
///
/// Single-threaded by design: one `update(dt)` per frame, no internal
/// tasks, getters return copies.
pub struct FlightDynamics {
    profile: AircraftProfile,
    controls: FlightControls,
    environment: Environment,
    state: FlightState,
    air_data: AirData,
    rng: ChaCha8Rng,
}

impl FlightDynamics {
    pub fn new(aircraft: AircraftType) -> Self {
        Self::with_seed(aircraft, DEFAULT_SEED)
    }

    /// Build an engine whose turbulence and buffet stream is derived
    /// from the given seed, for reproducible runs.
    pub fn with_seed(aircraft: AircraftType, seed: u64) -> Self {
        Self::with_profile(
            AircraftProfile::for_type(&aircraft),
            RngManager::new(seed).stream("flight_dynamics"),
        )
    }

    pub fn with_profile(profile: AircraftProfile, rng: ChaCha8Rng) -> Self {
        let controls = FlightControls::default();
        let state = FlightState::spawn(&profile, controls.throttle);
        Self {
            profile,
            controls,
            environment: Environment::default(),
            state,
            air_data: AirData::default(),
            rng,
        }
    }

    /// Advance the simulation by one tick. `dt` is clamped to
    /// [`MAX_TIMESTEP`] so stalls in the caller's frame loop cannot
    /// destabilize the integrator. Does nothing once crashed.
    pub fn update(&mut self, dt: f64) {
        if self.state.phase.is_crashed() {
            return;
        }
        let dt = dt.min(MAX_TIMESTEP);

        // Body axes at the start of the tick
        let forward = self.state.attitude * Vector3::new(0.0, 0.0, -1.0);
        let right = self.state.attitude * Vector3::new(1.0, 0.0, 0.0);
        let up = self.state.attitude * Vector3::new(0.0, 1.0, 0.0);

        self.air_data = AirData::calculate(
            &self.state.velocity,
            &self.state.attitude,
            &self.environment.wind,
            self.state.position.y,
        );
        let air = self.air_data;

        self.state.is_overspeed = air.true_airspeed > self.profile.never_exceed_speed;

        let coefficients =
            AeroCoefficients::calculate(&self.profile, &self.controls, air.alpha, air.mach);
        self.state.is_stalling = coefficients.stalling;

        let q_s = air.dynamic_pressure * self.profile.wing_area;
        let lift_dir =
            forces::lift_direction(&air.relative_velocity, &right, &up, air.true_airspeed);
        let drag_dir = forces::drag_direction(&air.relative_velocity, air.true_airspeed);

        // Engine spool lag, then the altitude lapse on what the
        // powerplant can actually deliver
        let commanded = self.controls.throttle * self.profile.max_thrust;
        self.state.thrust =
            forces::smooth_thrust(self.state.thrust, commanded, self.profile.engine_response, dt);
        let effective_thrust = self.state.thrust
            * self
                .profile
                .thrust_lapse
                .factor(self.state.position.y, air.density);

        let mut force = lift_dir * (q_s * coefficients.lift)
            + drag_dir * (q_s * coefficients.drag)
            + forward * effective_thrust;
        force.y -= self.profile.mass * GRAVITY;

        // Sideslip pushes the airframe back toward the flow
        if air.true_airspeed > forces::SIDE_FORCE_MIN_AIRSPEED {
            force += right * (-q_s * forces::SIDE_FORCE_SLOPE * air.beta);
        }

        let mut acceleration = force / self.profile.mass;

        if self.environment.turbulence_intensity > 0.0
            && air.true_airspeed > TURBULENCE_MIN_AIRSPEED
        {
            let gust = self.environment.turbulence_intensity * 2.0;
            acceleration.x += (self.rng.gen::<f64>() - 0.5) * gust;
            acceleration.y += (self.rng.gen::<f64>() - 0.5) * gust;
            acceleration.z += (self.rng.gen::<f64>() - 0.5) * gust;
        }
        self.state.acceleration = acceleration;

        // Load factor along body up, gravity removed
        let mut inertial = acceleration;
        inertial.y += GRAVITY;
        self.state.g_force = inertial.dot(&up) / GRAVITY;

        // Semi-implicit Euler
        self.state.velocity += acceleration * dt;
        self.state.position += self.state.velocity * dt;

        // Moments
        let effectiveness =
            rotation::control_effectiveness(air.true_airspeed, self.profile.stall_speed);
        let mut torque = rotation::control_torque(
            &self.profile,
            &self.controls,
            &self.state.angular_velocity,
            &self.state.euler,
            air.alpha,
            air.beta,
            effectiveness,
        );

        // Banked flight pulls the nose through the turn
        if self.state.euler.roll.abs() > TURN_COORDINATION_MIN_BANK
            && air.true_airspeed > 0.5 * self.profile.stall_speed
        {
            torque.y += self.state.euler.roll.sin() * TURN_COORDINATION_GAIN * effectiveness;
        }

        // Buffet shakes the airframe through the stall
        if self.state.is_stalling && air.true_airspeed > BUFFET_MIN_AIRSPEED {
            torque.x += (self.rng.gen::<f64>() - 0.5) * PITCH_BUFFET;
            torque.z += (self.rng.gen::<f64>() - 0.5) * ROLL_BUFFET;
        }

        self.state.angular_velocity += torque * dt;
        self.state.attitude = rotation::integrate_attitude(
            &self.state.attitude,
            &right,
            &forward,
            &self.state.angular_velocity,
            dt,
        );
        self.state.euler = EulerAngles::from_quaternion(&self.state.attitude);

        if self.ground_interaction(dt, air.true_airspeed, air.vertical_speed) {
            // Crashed this tick; nothing further happens
            return;
        }

        // Soft ceiling: climbs above it simply stop climbing
        if self.state.position.y > self.profile.service_ceiling * CEILING_MARGIN {
            self.state.velocity.y = self.state.velocity.y.min(0.0);
        }
    }

    /// Ground-plane contact for this tick. Returns true when the
    /// contact was destructive and the tick must end immediately.
    fn ground_interaction(&mut self, dt: f64, airspeed: f64, vertical_speed: f64) -> bool {
        let mut phase = FlightPhase::Airborne;

        if self.state.position.y <= ground::GROUND_PROXIMITY_ALTITUDE {
            let descent_rate = -vertical_speed;
            let roll_deg = rad_to_deg(self.state.euler.roll);
            let pitch_deg = rad_to_deg(self.state.euler.pitch);

            let contact = ground::classify_contact(
                self.state.position.y,
                descent_rate,
                roll_deg,
                pitch_deg,
            );
            phase = self.state.phase.transition(contact);

            if phase.is_crashed() {
                info!(
                    "Impact: sink rate {:.1} m/s, roll {:.0} deg, pitch {:.0} deg",
                    descent_rate, roll_deg, pitch_deg
                );
                self.state.velocity = Vector3::zeros();
                self.state.angular_velocity = Vector3::zeros();
                self.state.phase = phase;
                return true;
            }

            if phase.is_on_ground() {
                self.state.position.y = ground::TOUCHDOWN_ALTITUDE;
                self.state.velocity.y = self.state.velocity.y.max(0.0);

                // Wheel friction slows the roll-out
                if self.controls.gear_down {
                    let friction = if self.controls.airbrake {
                        ground::BRAKING_FRICTION
                    } else {
                        ground::ROLLING_FRICTION
                    };
                    self.state.velocity.x *= 1.0 - friction * dt;
                    self.state.velocity.z *= 1.0 - friction * dt;
                }

                // Taxi re-leveling: roll always, pitch only below taxi
                // speed; the attitude follows the relaxed Euler cache
                self.state.euler.roll -=
                    self.state.euler.roll * ground::GROUND_ROLL_RELAX_RATE * dt;
                if airspeed < 0.5 * self.profile.stall_speed {
                    self.state.euler.pitch -=
                        self.state.euler.pitch * ground::GROUND_PITCH_RELAX_RATE * dt;
                }
                self.state.attitude = self.state.euler.to_quaternion();
            }
        }

        self.state.phase = phase;
        false
    }

    /// Restore the spawn pose, clearing all rates and flags and
    /// resetting the thrust lag and controls. The only way out of the
    /// crashed phase.
    pub fn reset(&mut self) {
        debug!("Reset to spawn pose");
        self.controls = FlightControls::default();
        self.state = FlightState::spawn(&self.profile, self.controls.throttle);
        self.air_data = AirData::default();
    }

    /// Restore an arbitrary state, for trim and regression scenarios.
    pub fn reset_to(&mut self, state: FlightState) {
        self.state = state;
        self.air_data = AirData::default();
    }

    /// Swap the active aircraft by catalog name. Unknown names fall
    /// back to the default preset.
    pub fn set_aircraft(&mut self, name: &str) {
        self.set_profile(AircraftProfile::named(name));
    }

    pub fn set_aircraft_type(&mut self, aircraft: AircraftType) {
        self.set_profile(AircraftProfile::for_type(&aircraft));
    }

    /// Swap the active profile; the thrust lag restarts at the level
    /// the current throttle commands on the new powerplant.
    pub fn set_profile(&mut self, profile: AircraftProfile) {
        debug!("Switching aircraft to {}", profile.name);
        self.state.thrust = self.controls.throttle * profile.max_thrust;
        self.profile = profile;
    }

    // --- control and environment inputs ---

    pub fn set_controls(&mut self, controls: FlightControls) {
        self.controls = FlightControls {
            throttle: controls.throttle.clamp(0.0, 1.0),
            ..controls
        };
    }

    pub fn set_throttle(&mut self, throttle: f64) {
        self.controls.throttle = throttle.clamp(0.0, 1.0);
    }

    pub fn set_pitch_input(&mut self, pitch: f64) {
        self.controls.pitch = pitch;
    }

    pub fn set_roll_input(&mut self, roll: f64) {
        self.controls.roll = roll;
    }

    pub fn set_yaw_input(&mut self, yaw: f64) {
        self.controls.yaw = yaw;
    }

    pub fn set_flaps(&mut self, flaps: FlapSetting) {
        self.controls.flaps = flaps;
    }

    pub fn set_gear(&mut self, down: bool) {
        self.controls.gear_down = down;
    }

    pub fn set_airbrake(&mut self, engaged: bool) {
        self.controls.airbrake = engaged;
    }

    pub fn set_wind(&mut self, wind: Vector3<f64>) {
        self.environment.wind = wind;
    }

    pub fn set_turbulence(&mut self, intensity: f64) {
        self.environment.turbulence_intensity = intensity;
    }

    // --- state access (copy-out) ---

    pub fn state(&self) -> &FlightState {
        &self.state
    }

    pub fn air_data(&self) -> &AirData {
        &self.air_data
    }

    pub fn profile(&self) -> &AircraftProfile {
        &self.profile
    }

    pub fn controls(&self) -> &FlightControls {
        &self.controls
    }

    pub fn environment(&self) -> &Environment {
        &self.environment
    }

    pub fn position(&self) -> Vector3<f64> {
        self.state.position
    }

    pub fn velocity(&self) -> Vector3<f64> {
        self.state.velocity
    }

    pub fn attitude(&self) -> nalgebra::UnitQuaternion<f64> {
        self.state.attitude
    }

    pub fn angular_velocity(&self) -> Vector3<f64> {
        self.state.angular_velocity
    }

    pub fn phase(&self) -> FlightPhase {
        self.state.phase
    }

    pub fn is_crashed(&self) -> bool {
        self.state.phase.is_crashed()
    }

    pub fn on_ground(&self) -> bool {
        self.state.phase.is_on_ground()
    }

    pub fn is_stalling(&self) -> bool {
        self.state.is_stalling
    }

    pub fn is_overspeed(&self) -> bool {
        self.state.is_overspeed
    }

    // --- derived display values ---

    pub fn airspeed(&self) -> f64 {
        self.air_data.true_airspeed
    }

    pub fn ground_speed(&self) -> f64 {
        self.air_data.ground_speed
    }

    pub fn vertical_speed(&self) -> f64 {
        self.air_data.vertical_speed
    }

    pub fn mach(&self) -> f64 {
        self.air_data.mach
    }

    pub fn g_force(&self) -> f64 {
        self.state.g_force
    }

    pub fn speed_kmh(&self) -> f64 {
        self.air_data.true_airspeed * MPS_TO_KMH
    }

    /// Heading in degrees, wrapped to [0, 360)
    pub fn heading_deg(&self) -> f64 {
        wrap_heading_deg(rad_to_deg(self.state.euler.yaw))
    }

    pub fn pitch_deg(&self) -> f64 {
        rad_to_deg(self.state.euler.pitch)
    }

    pub fn roll_deg(&self) -> f64 {
        rad_to_deg(self.state.euler.roll)
    }

    pub fn aoa_deg(&self) -> f64 {
        rad_to_deg(self.air_data.alpha)
    }
}

impl Default for FlightDynamics {
    fn default() -> Self {
        Self::new(AircraftType::Cessna172)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_update_advances_state() {
        let mut sim = FlightDynamics::default();
        let start = sim.position();

        sim.update(0.016);

        assert!(sim.position().z < start.z, "Should move along the spawn heading");
        assert!(sim.airspeed() > 0.0);
    }

    #[test]
    fn test_oversized_dt_is_clamped() {
        let mut sim = FlightDynamics::default();
        let start = sim.position();

        sim.update(10.0);

        // One clamped step moves at most ~ speed * MAX_TIMESTEP
        assert!((sim.position() - start).norm() < 5.0);
    }

    #[test]
    fn test_throttle_is_clamped_on_write() {
        let mut sim = FlightDynamics::default();

        sim.set_throttle(1.7);
        assert_relative_eq!(sim.controls().throttle, 1.0);

        sim.set_throttle(-0.3);
        assert_relative_eq!(sim.controls().throttle, 0.0);
    }

    #[test]
    fn test_aircraft_swap_resets_thrust_lag() {
        let mut sim = FlightDynamics::default();
        sim.set_throttle(0.6);
        sim.set_aircraft("fighter");

        let expected = 0.6 * sim.profile().max_thrust;
        assert_relative_eq!(sim.state().thrust, expected);
        assert_eq!(sim.profile().name, "F-16 Falcon");
    }

    #[test]
    fn test_unknown_aircraft_falls_back() {
        let mut sim = FlightDynamics::default();
        sim.set_aircraft("ornithopter");
        assert_eq!(sim.profile().name, "Cessna 172");
    }
}

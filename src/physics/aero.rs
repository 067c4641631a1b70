use serde::{Deserialize, Serialize};
use std::f64::consts::PI;

use crate::aircraft::{AircraftProfile, FlightControls};
use crate::utils::math::rad_to_deg;

/// Stall threshold [deg]
pub const STALL_ANGLE_DEG: f64 = 15.0;
/// Oswald span-efficiency factor in the induced-drag term
pub const OSWALD_EFFICIENCY: f64 = 0.8;
/// Mach number where wave drag begins
pub const WAVE_DRAG_ONSET_MACH: f64 = 0.75;
const WAVE_DRAG_SCALE: f64 = 0.1;
/// Lift decay per 10 degrees of excess angle past the stall threshold
const STALL_DECAY: f64 = 0.8;
/// Residual lift fraction deep in the stall
const STALL_FLOOR: f64 = 0.1;

/// Lift and drag coefficients for one tick, plus the stall flag raised
/// while the angle of attack is past the threshold.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct AeroCoefficients {
    pub lift: f64,
    pub drag: f64,
    pub stalling: bool,
}

impl AeroCoefficients {
    pub fn calculate(
        profile: &AircraftProfile,
        controls: &FlightControls,
        alpha: f64,
        mach: f64,
    ) -> Self {
        let flap_bonus = controls.flaps.notches() * profile.flap_cl_bonus;
        let (lift, stalling) = lift_coefficient(profile, alpha, flap_bonus);
        let drag = drag_coefficient(profile, controls, lift, mach);
        Self {
            lift,
            drag,
            stalling,
        }
    }
}

/// Lift coefficient as a function of angle of attack and flap bonus.
///
/// Linear below the stall threshold, clamped to the profile's lift
/// limits. Past the threshold the coefficient collapses linearly with
/// excess angle down to a residual floor, keeping the sign of the
/// angle of attack. The slope is deliberately discontinuous at the
/// threshold; the value itself is not.
pub fn lift_coefficient(profile: &AircraftProfile, alpha: f64, flap_bonus: f64) -> (f64, bool) {
    let alpha_deg = rad_to_deg(alpha);

    if alpha_deg.abs() < STALL_ANGLE_DEG {
        let cl = profile.cl_0 + profile.cl_alpha * alpha + flap_bonus;
        (cl.clamp(-profile.cl_max, profile.cl_max + flap_bonus), false)
    } else {
        let excess = (alpha_deg.abs() - STALL_ANGLE_DEG) / 10.0;
        let stall_factor = (1.0 - excess * STALL_DECAY).max(STALL_FLOOR);
        let sign = if alpha_deg > 0.0 { 1.0 } else { -1.0 };
        (sign * (profile.cl_max + flap_bonus) * stall_factor, true)
    }
}

/// Drag coefficient from the drag polar plus configuration and
/// compressibility increments.
pub fn drag_coefficient(
    profile: &AircraftProfile,
    controls: &FlightControls,
    cl: f64,
    mach: f64,
) -> f64 {
    let flap_drag = controls.flaps.notches() * profile.flap_cd_penalty;
    let gear_drag = if controls.gear_down { profile.gear_drag } else { 0.0 };
    let brake_drag = if controls.airbrake { profile.brake_drag } else { 0.0 };

    let induced = (cl * cl) / (PI * OSWALD_EFFICIENCY * profile.aspect_ratio);

    let wave_drag = if mach > WAVE_DRAG_ONSET_MACH {
        WAVE_DRAG_SCALE * (mach - WAVE_DRAG_ONSET_MACH).powi(2)
    } else {
        0.0
    };

    profile.cd_0 + induced + flap_drag + gear_drag + brake_drag + wave_drag
}

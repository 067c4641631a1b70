use serde::{Deserialize, Serialize};

/// Contact is evaluated below this altitude [m]
pub const GROUND_PROXIMITY_ALTITUDE: f64 = 2.0;
/// Touchdown height of the gear above the ground plane [m]
pub const TOUCHDOWN_ALTITUDE: f64 = 0.5;

/// Descent rate beyond which a touchdown is destructive [m/s]
pub const CRASH_SINK_RATE: f64 = 5.0;
/// Bank angle beyond which a touchdown is destructive [deg]
pub const CRASH_BANK_DEG: f64 = 30.0;
/// Nose-down pitch beyond which a touchdown is destructive [deg]
pub const CRASH_PITCH_DEG: f64 = -20.0;

/// Rolling-friction coefficient with the gear down
pub const ROLLING_FRICTION: f64 = 0.02;
/// Friction coefficient with the airbrake engaged on the roll-out
pub const BRAKING_FRICTION: f64 = 0.5;

/// Exponential rate at which roll relaxes toward level on the ground
pub const GROUND_ROLL_RELAX_RATE: f64 = 2.0;
/// Exponential rate at which pitch relaxes toward level at taxi speed
pub const GROUND_PITCH_RELAX_RATE: f64 = 1.0;

/// Outcome of a ground-contact check for one tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GroundContact {
    /// Above touchdown height; no contact
    None,
    /// Gentle, near-level contact: the aircraft is rolling
    Touchdown,
    /// Contact outside the survivable envelope
    Impact,
}

/// Classify a ground contact from the current altitude, descent rate,
/// and attitude. Angles are in degrees to match the envelope limits.
pub fn classify_contact(
    altitude: f64,
    descent_rate: f64,
    roll_deg: f64,
    pitch_deg: f64,
) -> GroundContact {
    if altitude > TOUCHDOWN_ALTITUDE {
        GroundContact::None
    } else if descent_rate > CRASH_SINK_RATE
        || roll_deg.abs() > CRASH_BANK_DEG
        || pitch_deg < CRASH_PITCH_DEG
    {
        GroundContact::Impact
    } else {
        GroundContact::Touchdown
    }
}

/// Flight status. `Crashed` is terminal: no contact outcome leaves it,
/// only an explicit engine reset does.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FlightPhase {
    Airborne,
    OnGround,
    Crashed,
}

impl FlightPhase {
    /// Phase after observing a contact outcome this tick.
    pub fn transition(self, contact: GroundContact) -> FlightPhase {
        match (self, contact) {
            (FlightPhase::Crashed, _) => FlightPhase::Crashed,
            (_, GroundContact::Impact) => FlightPhase::Crashed,
            (_, GroundContact::Touchdown) => FlightPhase::OnGround,
            (_, GroundContact::None) => FlightPhase::Airborne,
        }
    }

    pub fn is_crashed(self) -> bool {
        self == FlightPhase::Crashed
    }

    pub fn is_on_ground(self) -> bool {
        self == FlightPhase::OnGround
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_contact_above_touchdown_height() {
        assert_eq!(classify_contact(1.8, 20.0, 90.0, -80.0), GroundContact::None);
    }

    #[test]
    fn test_gentle_level_contact_is_touchdown() {
        assert_eq!(classify_contact(0.4, 1.0, 0.0, 0.0), GroundContact::Touchdown);
        // Right at the envelope limits still survives
        assert_eq!(
            classify_contact(0.4, 5.0, 30.0, -20.0),
            GroundContact::Touchdown
        );
    }

    #[test]
    fn test_contact_outside_envelope_is_impact() {
        assert_eq!(classify_contact(0.4, 10.0, 0.0, 0.0), GroundContact::Impact);
        assert_eq!(classify_contact(0.4, 0.0, 35.0, 0.0), GroundContact::Impact);
        assert_eq!(classify_contact(0.4, 0.0, -35.0, 0.0), GroundContact::Impact);
        assert_eq!(classify_contact(0.4, 0.0, 0.0, -25.0), GroundContact::Impact);
    }

    #[test]
    fn test_transitions() {
        use FlightPhase::*;
        use GroundContact::*;

        assert_eq!(Airborne.transition(Touchdown), OnGround);
        assert_eq!(OnGround.transition(None), Airborne);
        assert_eq!(Airborne.transition(Impact), Crashed);
        assert_eq!(OnGround.transition(Impact), Crashed);
    }

    #[test]
    fn test_crashed_is_terminal() {
        use FlightPhase::*;
        use GroundContact::*;

        for contact in [None, Touchdown, Impact] {
            assert_eq!(Crashed.transition(contact), Crashed);
        }
    }
}

use serde::{Deserialize, Serialize};

/// Flap deflection in 10-degree notches.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FlapSetting {
    Up,
    Ten,
    Twenty,
    Thirty,
}

impl FlapSetting {
    pub fn angle_deg(self) -> f64 {
        match self {
            FlapSetting::Up => 0.0,
            FlapSetting::Ten => 10.0,
            FlapSetting::Twenty => 20.0,
            FlapSetting::Thirty => 30.0,
        }
    }

    /// Deflection expressed in notches (10-degree steps); scales the
    /// per-notch flap lift bonus and drag penalty.
    pub fn notches(self) -> f64 {
        self.angle_deg() / 10.0
    }

    /// One notch further out; full deflection stays put.
    pub fn extend(self) -> Self {
        match self {
            FlapSetting::Up => FlapSetting::Ten,
            FlapSetting::Ten => FlapSetting::Twenty,
            FlapSetting::Twenty | FlapSetting::Thirty => FlapSetting::Thirty,
        }
    }

    /// One notch back in; clean stays put.
    pub fn retract(self) -> Self {
        match self {
            FlapSetting::Thirty => FlapSetting::Twenty,
            FlapSetting::Twenty => FlapSetting::Ten,
            FlapSetting::Ten | FlapSetting::Up => FlapSetting::Up,
        }
    }
}

/// Pilot inputs, written by an input-handling collaborator before each
/// tick and read by the engine. The engine clamps the throttle on
/// write; stick deflections are accepted as-is and callers are
/// expected to keep them in [-1, 1].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FlightControls {
    /// Throttle [0, 1]
    pub throttle: f64,
    /// Pitch stick deflection [-1, 1], positive pitches up
    pub pitch: f64,
    /// Roll stick deflection [-1, 1]
    pub roll: f64,
    /// Rudder deflection [-1, 1]
    pub yaw: f64,
    /// Flap notch
    pub flaps: FlapSetting,
    /// Landing gear extended
    pub gear_down: bool,
    /// Airbrake deployed
    pub airbrake: bool,
}

impl Default for FlightControls {
    /// The spawn trim: modest power, gear down, clean wing.
    fn default() -> Self {
        Self {
            throttle: 0.3,
            pitch: 0.0,
            roll: 0.0,
            yaw: 0.0,
            flaps: FlapSetting::Up,
            gear_down: true,
            airbrake: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_flap_stepping() {
        let mut flaps = FlapSetting::Up;
        let mut angles = vec![flaps.angle_deg()];
        for _ in 0..4 {
            flaps = flaps.extend();
            angles.push(flaps.angle_deg());
        }
        // Saturates at full deflection
        assert_eq!(angles, vec![0.0, 10.0, 20.0, 30.0, 30.0]);

        assert_eq!(FlapSetting::Twenty.retract(), FlapSetting::Ten);
        assert_eq!(FlapSetting::Up.retract(), FlapSetting::Up);
    }

    #[test]
    fn test_flap_notches() {
        assert_eq!(FlapSetting::Up.notches(), 0.0);
        assert_eq!(FlapSetting::Thirty.notches(), 3.0);
    }
}

use crate::utils::constants::{
    AIR_DENSITY_SEA_LEVEL, AIR_GAS_CONSTANT, ATMOSPHERE_SCALE_HEIGHT, HEAT_CAPACITY_RATIO,
    ISA_LAPSE_RATE, ISA_SEA_LEVEL_TEMP, TROPOPAUSE_ALTITUDE, TROPOPAUSE_TEMP,
};

/// Air density at a given altitude, from the exponential barometric
/// model. Altitude is floored at sea level.
pub fn air_density(altitude: f64) -> f64 {
    let h = altitude.max(0.0);
    AIR_DENSITY_SEA_LEVEL * (-h / ATMOSPHERE_SCALE_HEIGHT).exp()
}

/// Speed of sound at a given altitude, from a linear troposphere
/// lapse-rate model. Temperature is capped at the tropopause value, so
/// the speed of sound is constant above 11 km.
pub fn speed_of_sound(altitude: f64) -> f64 {
    let temp = ISA_SEA_LEVEL_TEMP - ISA_LAPSE_RATE * altitude.min(TROPOPAUSE_ALTITUDE);
    (HEAT_CAPACITY_RATIO * AIR_GAS_CONSTANT * temp.max(TROPOPAUSE_TEMP)).sqrt()
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_sea_level_density() {
        assert_relative_eq!(air_density(0.0), 1.225, epsilon = 1e-9);
        // Negative altitude is floored, not extrapolated
        assert_relative_eq!(air_density(-100.0), 1.225, epsilon = 1e-9);
    }

    #[test]
    fn test_density_decreases_with_altitude() {
        let altitudes = [0.0, 1000.0, 5000.0, 10_000.0];
        for pair in altitudes.windows(2) {
            assert!(
                air_density(pair[0]) > air_density(pair[1]),
                "Density should decrease with altitude"
            );
        }
        // One scale height up, density drops by 1/e
        assert_relative_eq!(
            air_density(ATMOSPHERE_SCALE_HEIGHT),
            1.225 * (-1.0f64).exp(),
            epsilon = 1e-9
        );
    }

    #[test]
    fn test_speed_of_sound_sea_level() {
        // a = sqrt(1.4 * 287 * 288.15) ~ 340 m/s
        assert_relative_eq!(speed_of_sound(0.0), 340.26, epsilon = 0.05);
    }

    #[test]
    fn test_speed_of_sound_capped_above_tropopause() {
        let at_tropopause = speed_of_sound(TROPOPAUSE_ALTITUDE);
        assert_relative_eq!(speed_of_sound(15_000.0), at_tropopause, epsilon = 1e-9);
        assert_relative_eq!(speed_of_sound(25_000.0), at_tropopause, epsilon = 1e-9);
        assert!(at_tropopause < speed_of_sound(0.0));
    }
}

//! Physical constants and unit conversions used by the cycle calculation.
//!
//! The calculation is carried out in technical units: pressure in kgf/cm²,
//! work in kgf·m, heat in kcal and power in metric horsepower. Configuration
//! files and reports use kPa, °C, J and kW, so conversions live here too.

/// Offset between the Celsius and Kelvin scales used by the method tables
pub const CELSIUS_OFFSET: f64 = 273.0;

/// Universal gas constant [kgf·m/(kmol·K)]
pub const UNIVERSAL_GAS_CONSTANT: f64 = 848.0;

/// [cm²/m²]
pub const CM2_PER_M2: f64 = 1.0e4;

/// Mechanical equivalent of heat [kgf·m/kcal]
pub const HEAT_EQUIVALENT: f64 = 427.0;

/// Heat equivalent of one horsepower-hour [kcal/(hp·h)]
pub const KCAL_PER_HP_HOUR: f64 = 632.0;

/// Metric horsepower per kilowatt
pub const HP_PER_KW: f64 = 1.36;

/// Mass fraction of oxygen in air
pub const AIR_O2_MASS_FRAC: f64 = 0.232;

/// Mole fraction of oxygen in air
pub const AIR_O2_MOLE_FRAC: f64 = 0.21;

/// Vibe constant: 99.9% of the fuel is burned at the end of the combustion duration
pub const VIBE_A: f64 = 6.908;

const KPA_TO_KGFCM2: f64 = 0.010197162;
const KGFM_TO_J: f64 = 9.80665;

pub fn kpa_to_kgfcm2(kpa: f64) -> f64 {
    kpa * KPA_TO_KGFCM2
}

pub fn kgfcm2_to_kpa(kgfcm2: f64) -> f64 {
    kgfcm2 / KPA_TO_KGFCM2
}

pub fn kgfm_to_j(kgfm: f64) -> f64 {
    kgfm * KGFM_TO_J
}

pub fn celsius_to_kelvin(temp: f64) -> f64 {
    temp + CELSIUS_OFFSET
}

pub fn kelvin_to_celsius(temp: f64) -> f64 {
    temp - CELSIUS_OFFSET
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pressure_conversion_is_reversible() {
        let kpa = 193.0;
        assert!((kgfcm2_to_kpa(kpa_to_kgfcm2(kpa)) - kpa).abs() < 1e-9);
        // one technical atmosphere
        assert!((kgfcm2_to_kpa(1.0) - 98.0665).abs() < 1e-3);
    }

    #[test]
    fn heat_term_constant() {
        assert_eq!(2.0 * HEAT_EQUIVALENT / CM2_PER_M2, 0.0854);
    }
}

//! State of the charge at the start of compression (point "a").

use crate::constants::*;
use crate::engine::parameters::EngineParameters;

/// Compressor outlet and intercooler outlet temperatures of a boosted engine
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoostState {
    pub compressor_temperature: f64,  // Tk [K]
    pub intercooler_temperature: f64, // Tks [K]
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct IntakeState {
    pub boost: Option<BoostState>,
    pub pressure: f64,         // pa [kgf/cm²]
    pub residual_fraction: f64, // gamma, residual gas moles per mole of fresh charge
    pub temperature: f64,      // Ta [K]
    pub air_mass: f64,         // L0s, stoichiometric air [kg/kg fuel]
    pub air_moles: f64,        // L0, stoichiometric air [kmol/kg fuel]
    pub volume: f64,           // va [m³/kg]
}

impl IntakeState {
    pub fn solve(params: &EngineParameters) -> IntakeState {
        let eps = params.compression_ratio;
        let t0 = celsius_to_kelvin(params.ambient_temperature);

        // charge state ahead of the intake valve
        let (boost, supply_pressure, supply_temperature) = if params.boost {
            let n = params.compressor_index;
            let tk = (params.boost_pressure / params.ambient_pressure).powf((n - 1.0) / n) * t0;
            let tks = tk - params.intercooler_effectiveness * (tk - t0);
            let state = BoostState {
                compressor_temperature: tk,
                intercooler_temperature: tks,
            };
            (Some(state), params.boost_pressure, tks)
        } else {
            (None, params.ambient_pressure, t0)
        };

        let pressure = ((eps - 1.0)
            * params.volumetric_efficiency
            * kpa_to_kgfcm2(supply_pressure)
            * (supply_temperature + params.charge_heating)
            / supply_temperature
            + kpa_to_kgfcm2(params.residual_pressure))
            / eps;
        let residual_fraction = (1.0 / (eps - 1.0) / params.volumetric_efficiency)
            * (params.residual_pressure / supply_pressure)
            * (supply_temperature / params.residual_temperature);
        let temperature = (supply_temperature + params.charge_heating + residual_fraction * params.residual_temperature)
            / (1.0 + residual_fraction);

        let air_mass = (8.0 / 3.0 * params.carbon + 8.0 * params.hydrogen - params.oxygen) / AIR_O2_MASS_FRAC;
        let air_moles = (params.carbon / 12.0 + params.hydrogen / 4.0 - params.oxygen / 32.0) / AIR_O2_MOLE_FRAC;
        let volume = (UNIVERSAL_GAS_CONSTANT / CM2_PER_M2 / params.air_molar_mass) * (temperature / pressure);

        IntakeState {
            boost,
            pressure,
            residual_fraction,
            temperature,
            air_mass,
            air_moles,
            volume,
        }
    }
}

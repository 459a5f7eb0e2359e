//! Indicated and effective parameters of the cycle.

use super::intake::IntakeState;
use super::point::{CombustionPoint, CyclePoint};
use crate::constants::{CM2_PER_M2, HEAT_EQUIVALENT, KCAL_PER_HP_HOUR};
use crate::engine::parameters::EngineParameters;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct IndicatedParameters {
    pub compression_work: f64, // L_ay, BDC to ignition [kgf·m/kg]
    pub combustion_work: f64,  // L_yz [kgf·m/kg]
    pub expansion_work: f64,   // L_zb, end of combustion to BDC [kgf·m/kg]
    pub work: f64,             // li [kgf·m/kg]
    pub pressure: f64,         // pi [kgf/cm²]
    pub efficiency: f64,       // etai
    pub fuel_consumption: f64, // gi [g/(hp·h)]
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EffectiveParameters {
    pub mean_piston_speed: f64,        // cm [m/s]
    pub mechanical_loss_pressure: f64, // pm [kgf/cm²]
    pub pressure: f64,                 // pe [kgf/cm²]
    pub mechanical_efficiency: f64,    // etam
    pub efficiency: f64,               // etae
    pub fuel_consumption: f64,         // ge [g/(hp·h)]
    pub power: f64,                    // Ne [hp]
}

/// Trapezoidal integral of p·dpsi over the combustion phase
pub fn combustion_integral(fire: &[CombustionPoint]) -> f64 {
    fire.windows(2)
        .map(|w| (w[0].pressure + w[1].pressure) / 2.0 * (w[1].psi - w[0].psi))
        .sum()
}

impl IndicatedParameters {
    /// `compression_end` is the last compression point, `cycle_end` the last point of the cycle (BDC)
    pub fn calculate(
        params: &EngineParameters,
        intake: &IntakeState,
        combustion_heat: f64,
        compression_end: &CyclePoint,
        fire: &[CombustionPoint],
        cycle_end: &CyclePoint,
    ) -> IndicatedParameters {
        let eps = params.compression_ratio;
        let va = intake.volume;
        let scale = CM2_PER_M2 * va / eps;

        let compression_work = scale / (params.compression_index - 1.0)
            * (intake.pressure * eps - compression_end.pressure * compression_end.psi);
        let (p_z, psi_z) = match fire.last() {
            Some(z) => (z.pressure, z.psi),
            None => (compression_end.pressure, compression_end.psi),
        };
        let expansion_work = scale / (params.expansion_index - 1.0) * (p_z * psi_z - cycle_end.pressure * eps);
        let combustion_work = scale * combustion_integral(fire);

        let work = compression_work + combustion_work + expansion_work;
        let pressure = eps / CM2_PER_M2 / (eps - 1.0) * work / va;
        let efficiency = params.combustion_efficiency * work / HEAT_EQUIVALENT / combustion_heat;
        let fuel_consumption = 1000.0 * KCAL_PER_HP_HOUR / params.lower_heating_value / efficiency;

        IndicatedParameters {
            compression_work,
            combustion_work,
            expansion_work,
            work,
            pressure,
            efficiency,
            fuel_consumption,
        }
    }
}

/// Mean mechanical loss pressure [kgf/cm²] from the number of cylinders and
/// the mean piston speed [m/s]
pub fn mechanical_loss_pressure(cylinders: u32, mean_piston_speed: f64) -> f64 {
    let (a, b) = match cylinders {
        0..=6 => (0.9, 0.12),
        7..=8 => (0.7, 0.12),
        _ => (0.3, 0.12),
    };
    a + b * mean_piston_speed
}

impl EffectiveParameters {
    pub fn calculate(params: &EngineParameters, indicated: &IndicatedParameters) -> EffectiveParameters {
        // stroke = 2r, converted from mm
        let mean_piston_speed = params.crank_radius * 1e-3 * 2.0 * params.speed / 30.0;
        let mechanical_loss_pressure = mechanical_loss_pressure(params.cylinders, mean_piston_speed);
        let pressure = indicated.pressure - mechanical_loss_pressure;
        let mechanical_efficiency = pressure / indicated.pressure;
        let efficiency = indicated.efficiency * mechanical_efficiency;
        let fuel_consumption = 1000.0 * KCAL_PER_HP_HOUR / params.lower_heating_value / efficiency;
        // four-stroke: pe·Vh·n / (225·tau)
        let power = pressure * params.displacement * params.speed / 225.0 / 4.0;

        EffectiveParameters {
            mean_piston_speed,
            mechanical_loss_pressure,
            pressure,
            mechanical_efficiency,
            efficiency,
            fuel_consumption,
            power,
        }
    }
}

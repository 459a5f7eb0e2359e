//! Combustion phase: Vibe heat release coupled with the energy balance of the charge.
//!
//! Each point is obtained from the previous one only, through the `FireState`
//! accumulator, so the phase is integrated strictly in increasing angle order.

use super::intake::IntakeState;
use super::kinematics::Crank;
use super::point::{CombustionPoint, CyclePoint};
use crate::constants::{CM2_PER_M2, HEAT_EQUIVALENT, VIBE_A};
use crate::engine::parameters::EngineParameters;

/// Vibe law of the burned fuel fraction
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VibeFunction {
    a: f64,
    m: f64,
    duration: f64, // [CA deg]
}

impl VibeFunction {
    pub fn new(m: f64, duration: f64) -> VibeFunction {
        VibeFunction {
            a: VIBE_A,
            m,
            duration,
        }
    }

    /// `d_angle` is measured from ignition [CA deg]. Nothing burns before ignition.
    pub fn burned_fraction(&self, d_angle: f64) -> f64 {
        let tmp = d_angle.max(0.0) / self.duration;
        1.0 - (-self.a * tmp.powf(self.m + 1.0)).exp()
    }

    /// Burn rate related to the relative angle `d_angle / duration`
    pub fn burn_rate(&self, d_angle: f64) -> f64 {
        let tmp = d_angle.max(0.0) / self.duration;
        self.a * (self.m + 1.0) * tmp.powf(self.m) * (-self.a * tmp.powf(self.m + 1.0)).exp()
    }
}

/// Empirical adiabatic index of the burning charge
pub fn adiabatic_index(temperature: f64, burned_fraction: f64, excess_air_ratio: f64) -> f64 {
    1.259 + 76.7 / temperature - (0.005 + 0.0372 / excess_air_ratio) * burned_fraction
}

fn ks_of(k: f64) -> f64 {
    (k + 1.0) / (k - 1.0)
}

/// Heat released by the charge per kg of working fluid [kcal/kg]
pub fn combustion_heat(params: &EngineParameters, intake: &IntakeState) -> f64 {
    params.combustion_efficiency * params.lower_heating_value
        / (1.0 + intake.residual_fraction)
        / params.excess_air_ratio
        / intake.air_mass
}

/// Molar change factor at the end of combustion, residual gases included
pub fn max_molar_change(params: &EngineParameters, intake: &IntakeState) -> f64 {
    let beta0 = 1.0 + (params.hydrogen / 4.0 + params.oxygen / 32.0) / params.excess_air_ratio / intake.air_moles;
    (beta0 + intake.residual_fraction) / (1.0 + intake.residual_fraction)
}

/// Quantities of the previous point needed to advance one step
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FireState {
    pub burned_fraction: f64,
    pub beta: f64,
    pub psi: f64,
    pub k: f64,
    pub pressure: f64,
    pub temperature: f64,
}

impl From<&CombustionPoint> for FireState {
    fn from(p: &CombustionPoint) -> FireState {
        FireState {
            burned_fraction: p.burned_fraction,
            beta: p.beta,
            psi: p.psi,
            k: p.k,
            pressure: p.pressure,
            temperature: p.temperature,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FireModel {
    vibe: VibeFunction,
    ignition_angle: f64, // [CA deg]
    excess_air_ratio: f64,
    beta_max: f64,
    /// Pressure rise per unit of burned fraction and psi
    heat_term: f64,
    /// T/(p·psi) at the end of compression
    temperature_factor: f64,
}

impl FireModel {
    /// `start` is the last point of the compression stroke
    pub fn new(params: &EngineParameters, intake: &IntakeState, start: &CyclePoint) -> FireModel {
        let qz = combustion_heat(params, intake);
        FireModel {
            vibe: VibeFunction::new(params.vibe_exponent, params.combustion_duration),
            ignition_angle: -params.ignition_advance,
            excess_air_ratio: params.excess_air_ratio,
            beta_max: max_molar_change(params, intake),
            heat_term: 2.0 * HEAT_EQUIVALENT / CM2_PER_M2 * params.compression_ratio / intake.volume * qz,
            temperature_factor: start.temperature / start.pressure / start.psi,
        }
    }

    pub fn beta_max(&self) -> f64 {
        self.beta_max
    }

    fn fuel_state(&self, angle: f64) -> (f64, f64, f64) {
        let d_angle = angle - self.ignition_angle;
        let x = self.vibe.burned_fraction(d_angle);
        let w0 = self.vibe.burn_rate(d_angle);
        let beta = 1.0 + (self.beta_max - 1.0) * x;
        (x, w0, beta)
    }

    /// First point of the phase: the end of compression with the combustion quantities attached
    pub fn boundary(&self, crank: &Crank, start: &CyclePoint) -> CombustionPoint {
        let (x, w0, beta) = self.fuel_state(start.angle);
        let k = adiabatic_index(start.temperature, x, self.excess_air_ratio);
        CombustionPoint {
            point: CyclePoint::new(start.angle, crank.at(start.angle), start.pressure, start.temperature),
            burned_fraction: x,
            burn_rate: w0,
            beta,
            k,
            ks: ks_of(k),
        }
    }

    /// Point at `angle` from the state of the previous point
    pub fn advance(&self, crank: &Crank, prev: &FireState, angle: f64) -> CombustionPoint {
        let (x, w0, beta) = self.fuel_state(angle);
        let kin = crank.at(angle);

        let k = adiabatic_index(prev.temperature, (prev.burned_fraction + x) / 2.0, self.excess_air_ratio);
        let ks = ks_of((prev.k + k) / 2.0);

        let pressure = (self.heat_term * (x - prev.burned_fraction) + prev.pressure * (ks * prev.psi - kin.psi))
            / (ks * kin.psi - prev.psi);
        let temperature = self.temperature_factor * pressure * kin.psi / ((prev.beta + beta) / 2.0);

        CombustionPoint {
            point: CyclePoint::new(angle, kin, pressure, temperature),
            burned_fraction: x,
            burn_rate: w0,
            beta,
            k,
            ks,
        }
    }

    /// Integrates `steps` steps of `step` CA deg starting at `start`.
    /// Returns `steps + 1` points, the first one being the boundary point.
    pub fn sweep(&self, crank: &Crank, start: &CyclePoint, step: f64, steps: usize) -> Vec<CombustionPoint> {
        let first = self.boundary(crank, start);
        let rest = (1..=steps).scan(FireState::from(&first), |state, i| {
            let point = self.advance(crank, state, start.angle + i as f64 * step);
            *state = FireState::from(&point);
            Some(point)
        });
        std::iter::once(first).chain(rest).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cycle::polytropic::{angle_grid, Polytrope};

    fn default_fire() -> (Crank, CyclePoint, FireModel) {
        let params = EngineParameters::default();
        let intake = IntakeState::solve(&params);
        let crank = Crank::new(params.lambda(), params.compression_ratio, intake.volume);
        let comp = Polytrope {
            pressure: intake.pressure,
            temperature: intake.temperature,
            volume: intake.volume,
            index: params.compression_index,
        };
        let start = *comp.sweep(&crank, angle_grid(-180.0, -14.0, 1.0)).last().unwrap();
        let model = FireModel::new(&params, &intake, &start);
        (crank, start, model)
    }

    #[test]
    fn vibe_law_limits() {
        let vibe = VibeFunction::new(0.6, 60.0);
        assert_eq!(vibe.burned_fraction(0.0), 0.0);
        assert_eq!(vibe.burned_fraction(-5.0), 0.0);
        assert!((vibe.burned_fraction(60.0) - (1.0 - (-6.908f64).exp())).abs() < 1e-15);
        assert_eq!(vibe.burn_rate(0.0), 0.0);
        assert!(vibe.burn_rate(10.0) > 0.0);
    }

    #[test]
    fn vibe_fraction_is_non_decreasing() {
        let vibe = VibeFunction::new(0.6, 60.0);
        let xs: Vec<f64> = (0..=120).map(|i| vibe.burned_fraction(i as f64)).collect();
        assert!(xs.windows(2).all(|w| w[1] >= w[0]));
        assert!(*xs.last().unwrap() > 0.999);
    }

    #[test]
    fn default_heat_scalars() {
        let params = EngineParameters::default();
        let intake = IntakeState::solve(&params);
        let qz = combustion_heat(&params, &intake);
        assert!((qz - 0.87 * 10140.0 / (1.0 + intake.residual_fraction) / 1.4 / intake.air_mass).abs() < 1e-12);
        let beta = max_molar_change(&params, &intake);
        assert!(beta > 1.0 && beta < 1.1);
    }

    #[test]
    fn sweep_length_and_boundary_continuity() {
        let (crank, start, model) = default_fire();
        let fire = model.sweep(&crank, &start, 1.0, 60);
        assert_eq!(fire.len(), 61);
        assert_eq!(fire[0].angle, -14.0);
        assert_eq!(fire[60].angle, 46.0);
        assert_eq!(fire[0].pressure, start.pressure);
        assert_eq!(fire[0].temperature, start.temperature);
        assert_eq!(fire[0].burned_fraction, 0.0);
    }

    #[test]
    fn fire_burns_almost_all_fuel() {
        let (crank, start, model) = default_fire();
        let fire = model.sweep(&crank, &start, 1.0, 60);
        assert!(fire.windows(2).all(|w| w[1].burned_fraction >= w[0].burned_fraction));
        assert!(fire[60].burned_fraction > 0.998);
        assert!((fire[60].beta - model.beta_max()).abs() < 1e-3);
    }

    #[test]
    fn peak_pressure_after_ignition() {
        let (crank, start, model) = default_fire();
        let fire = model.sweep(&crank, &start, 1.0, 60);
        let (i_max, peak) = fire
            .iter()
            .enumerate()
            .fold((0, &fire[0]), |acc, (i, p)| if p.pressure > acc.1.pressure { (i, p) } else { acc });
        assert!(i_max > 0);
        assert!(peak.pressure > start.pressure);
        assert!(peak.temperature > 2000.0);
    }

    #[test]
    fn advance_uses_only_the_previous_state() {
        let (crank, start, model) = default_fire();
        let fire = model.sweep(&crank, &start, 1.0, 60);
        let state = FireState::from(&fire[29]);
        let again = model.advance(&crank, &state, fire[30].angle);
        assert_eq!(again, fire[30]);
    }

    #[test]
    fn no_heat_means_polytropic_like_pressure() {
        let (crank, start, model) = default_fire();
        let first = model.boundary(&crank, &start);
        let state = FireState {
            burned_fraction: 0.0,
            ..FireState::from(&first)
        };
        // before ignition nothing burns, the step is a pure expansion/compression
        let frozen = FireModel {
            ignition_angle: 1000.0,
            ..model
        };
        let next = frozen.advance(&crank, &state, start.angle + 1.0);
        assert_eq!(next.burned_fraction, 0.0);
        assert!(next.pressure > start.pressure);
    }
}

use super::combustion::{combustion_heat, FireModel};
use super::intake::IntakeState;
use super::kinematics::Crank;
use super::performance::{EffectiveParameters, IndicatedParameters};
use super::point::{CombustionPoint, CyclePoint};
use super::polytropic::{angle_grid, Polytrope};
use crate::engine::parameters::EngineParameters;

/// Angle of the intake BDC, start of the compression stroke [CA deg]
pub const BDC_INTAKE: f64 = -180.0;
/// Angle of the expansion BDC, end of the calculated cycle [CA deg]
pub const BDC_EXPANSION: f64 = 180.0;

/// Results of one thermal calculation.
///
/// `combustion` always holds at least one point, the end of compression, whatever
/// the step. Accessors of the combustion phase rely on it and panic on an empty
/// sequence.
#[derive(Debug, Clone, PartialEq)]
pub struct CycleResult {
    pub intake: IntakeState,
    pub compression: Vec<CyclePoint>,
    pub combustion: Vec<CombustionPoint>,
    pub expansion: Vec<CyclePoint>,
    pub combustion_heat: f64, // qz [kcal/kg]
    pub beta_max: f64,
    pub indicated: IndicatedParameters,
    pub effective: EffectiveParameters,
}

impl CycleResult {
    /// Pressure at the end of compression, equal to the first combustion pressure [kgf/cm²].
    /// Panics if `combustion` is empty.
    pub fn compression_end_pressure(&self) -> f64 {
        self.combustion[0].pressure
    }

    /// Combustion point with the highest pressure. Panics if `combustion` is empty.
    pub fn peak_pressure(&self) -> &CombustionPoint {
        self.combustion
            .iter()
            .fold(&self.combustion[0], |max, p| if p.pressure > max.pressure { p } else { max })
    }

    /// Every point of the cycle in angle order. The last compression point is skipped,
    /// it is the first combustion point.
    pub fn cycle_points(&self) -> impl Iterator<Item = &CyclePoint> + '_ {
        let n_comp = self.compression.len().saturating_sub(1);
        self.compression[..n_comp]
            .iter()
            .chain(self.combustion.iter().map(|c| &c.point))
            .chain(self.expansion.iter())
    }
}

/// Four-stroke diesel cycle calculated with the Vibe combustion model
pub struct CycleSimulator {
    params: EngineParameters,
}

impl CycleSimulator {
    pub fn new(params: &EngineParameters) -> CycleSimulator {
        CycleSimulator {
            params: params.clone(),
        }
    }

    /// Number of steps of the combustion phase
    fn fire_steps(&self) -> usize {
        let step = self.params.angle_step;
        let duration = self.params.combustion_duration;
        if step > 0.0 && duration > 0.0 {
            (duration / step + 1e-9).floor() as usize
        } else {
            0
        }
    }

    pub fn run(&self) -> CycleResult {
        let p = &self.params;
        let step = p.angle_step;

        // intake
        let intake = IntakeState::solve(p);
        let crank = Crank::new(p.lambda(), p.compression_ratio, intake.volume);
        log::debug!(
            "intake: pa = {:.4} [kgf/cm²], Ta = {:.1} [K], gamma = {:.4}, va = {:.4} [m³/kg]",
            intake.pressure,
            intake.temperature,
            intake.residual_fraction,
            intake.volume
        );

        // compression
        let compression_law = Polytrope {
            pressure: intake.pressure,
            temperature: intake.temperature,
            volume: intake.volume,
            index: p.compression_index,
        };
        let compression = compression_law.sweep(&crank, angle_grid(BDC_INTAKE, -p.ignition_advance, step));
        let compression_end = match compression.last() {
            Some(point) => *point,
            None => CyclePoint::new(BDC_INTAKE, crank.at(BDC_INTAKE), intake.pressure, intake.temperature),
        };
        log::debug!("compression: {} points, ends at {}", compression.len(), compression_end);

        // combustion
        let fire_model = FireModel::new(p, &intake, &compression_end);
        let combustion = fire_model.sweep(&crank, &compression_end, step, self.fire_steps());
        let fire_end = combustion[combustion.len() - 1].point;
        log::debug!("combustion: {} points, ends at {}", combustion.len(), fire_end);

        // expansion
        let expansion_law = Polytrope {
            pressure: fire_end.pressure,
            temperature: fire_end.temperature,
            volume: fire_end.volume,
            index: p.expansion_index,
        };
        let expansion = expansion_law.sweep(&crank, angle_grid(fire_end.angle + step, BDC_EXPANSION, step));
        let cycle_end = expansion.last().copied().unwrap_or(fire_end);
        log::debug!("expansion: {} points, ends at {}", expansion.len(), cycle_end);

        // performance
        let qz = combustion_heat(p, &intake);
        let indicated = IndicatedParameters::calculate(p, &intake, qz, &compression_end, &combustion, &cycle_end);
        let effective = EffectiveParameters::calculate(p, &indicated);
        log::info!(
            "pi = {:.3} [kgf/cm²], pe = {:.3} [kgf/cm²], etae = {:.3}, Ne = {:.1} [hp]",
            indicated.pressure,
            effective.pressure,
            effective.efficiency,
            effective.power
        );

        CycleResult {
            intake,
            compression,
            combustion,
            expansion,
            combustion_heat: qz,
            beta_max: fire_model.beta_max(),
            indicated,
            effective,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn close(a: f64, b: f64, tol: f64) -> bool {
        (a - b).abs() <= tol
    }

    fn default_run() -> CycleResult {
        CycleSimulator::new(&EngineParameters::default()).run()
    }

    #[test]
    fn runs_are_identical() {
        let sim = CycleSimulator::new(&EngineParameters::default());
        assert_eq!(sim.run(), sim.run());
    }

    #[test]
    fn default_phase_boundaries() {
        let result = default_run();
        assert_eq!(result.compression.len(), 167);
        assert_eq!(result.compression[0].angle, -180.0);
        assert_eq!(result.compression.last().unwrap().angle, -14.0);
        assert_eq!(result.combustion.len(), 61);
        assert_eq!(result.combustion[0].angle, -14.0);
        assert_eq!(result.combustion[60].angle, 46.0);
        assert_eq!(result.expansion.len(), 134);
        assert_eq!(result.expansion[0].angle, 47.0);
        assert_eq!(result.expansion.last().unwrap().angle, 180.0);
    }

    #[test]
    fn compression_starts_at_the_intake_state() {
        let result = default_run();
        let first = result.compression[0];
        assert!(close(first.volume, result.intake.volume, 1e-12));
        assert!(close(first.pressure, result.intake.pressure, 1e-12));
        assert!(close(first.temperature, result.intake.temperature, 1e-9));
    }

    #[test]
    fn compression_is_monotonic() {
        let result = default_run();
        for w in result.compression.windows(2) {
            assert!(w[1].pressure > w[0].pressure);
            assert!(w[1].temperature > w[0].temperature);
        }
    }

    #[test]
    fn phases_join_without_jumps() {
        let result = default_run();
        let comp_end = result.compression.last().unwrap();
        assert_eq!(result.compression_end_pressure(), comp_end.pressure);
        assert_eq!(result.combustion[0].temperature, comp_end.temperature);
        let fire_end = result.combustion.last().unwrap();
        let exp_start = result.expansion[0];
        // one step of expansion after the end of combustion
        assert!(exp_start.pressure < fire_end.pressure);
        assert!(exp_start.pressure > 0.9 * fire_end.pressure);
    }

    #[test]
    fn peak_pressure() {
        let result = default_run();
        let peak = result.peak_pressure();
        assert!(peak.angle > -14.0);
        assert!(close(peak.angle, 6.0, 1e-12));
        assert!(close(peak.pressure, 202.827, 1e-2));
        assert!(result.expansion.last().unwrap().pressure < peak.pressure);
    }

    #[test]
    fn default_performance() {
        let result = default_run();
        let ind = result.indicated;
        let eff = result.effective;
        assert!(ind.compression_work < 0.0);
        assert!(close(ind.work, 102962.78, 1.0));
        assert!(close(ind.pressure, 20.0571, 1e-3));
        assert!(close(ind.efficiency, 0.48619, 1e-4));
        assert!(close(ind.fuel_consumption, 128.19, 1e-1));
        assert!(close(eff.mechanical_loss_pressure, 2.088, 1e-9));
        assert!(close(eff.pressure, 17.9691, 1e-3));
        assert!(close(eff.efficiency, 0.43558, 1e-4));
        assert!(close(eff.fuel_consumption, 143.09, 1e-1));
        assert!(close(eff.power, 224.015, 1e-1));
    }

    #[test]
    fn fractional_step_keeps_the_boundaries() {
        let params = EngineParameters {
            angle_step: 0.5,
            ..EngineParameters::default()
        };
        let result = CycleSimulator::new(&params).run();
        assert_eq!(result.combustion.len(), 121);
        assert_eq!(result.compression.last().unwrap().angle, -14.0);
        assert_eq!(result.expansion.last().unwrap().angle, 180.0);
        assert!(close(result.effective.pressure, 17.8894, 1e-3));
    }

    #[test]
    fn naturally_aspirated_engine_is_weaker() {
        let params = EngineParameters {
            boost: false,
            ..EngineParameters::default()
        };
        let na = CycleSimulator::new(&params).run();
        let boosted = default_run();
        assert!(na.peak_pressure().pressure < boosted.peak_pressure().pressure);
        assert!(na.effective.power < boosted.effective.power);
        assert!(close(na.effective.pressure, 9.0889, 1e-3));
    }

    #[test]
    fn cycle_points_cover_the_whole_cycle_once() {
        let result = default_run();
        let angles: Vec<f64> = result.cycle_points().map(|p| p.angle).collect();
        assert_eq!(angles.len(), 166 + 61 + 134);
        assert_eq!(angles[0], -180.0);
        assert_eq!(*angles.last().unwrap(), 180.0);
        assert!(angles.windows(2).all(|w| w[1] > w[0]));
    }

    #[test]
    fn combustion_is_never_empty() {
        let cases = [(0.0, 14.0), (0.7, 14.0), (7.0, 14.0), (400.0, 14.0), (1.0, 14.5), (1.0, -5.0)];
        for (step, advance) in cases.iter() {
            let params = EngineParameters {
                angle_step: *step,
                ignition_advance: *advance,
                ..EngineParameters::default()
            };
            let result = CycleSimulator::new(&params).run();
            assert!(!result.combustion.is_empty());
            let p_comp = result.compression_end_pressure();
            assert!(p_comp.is_finite());
            assert!(result.peak_pressure().pressure >= p_comp);
        }
    }

    #[test]
    fn zero_step_does_not_hang() {
        let params = EngineParameters {
            angle_step: 0.0,
            ..EngineParameters::default()
        };
        let result = CycleSimulator::new(&params).run();
        assert!(result.compression.is_empty());
        assert_eq!(result.combustion.len(), 1);
        assert!(result.expansion.is_empty());
    }
}

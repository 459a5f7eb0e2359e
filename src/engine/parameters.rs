/// Input data of the thermal calculation. Units are the ones used by the
/// configuration file: `mm`, `l`, `rpm`, `kPa`, `°C`, `K` and `CA deg`.
#[derive(Debug, Clone, PartialEq)]
pub struct EngineParameters {
    // engine design
    pub boost: bool,
    pub speed: f64,             // [rpm]
    pub cylinders: u32,         // [-]
    pub displacement: f64,      // [l] - whole engine
    pub compression_ratio: f64, // [-]
    pub crank_radius: f64,      // [mm]
    pub conrod: f64,            // [mm]

    // environment
    pub ambient_pressure: f64,    // [kPa]
    pub ambient_temperature: f64, // [°C]
    pub air_molar_mass: f64,      // [kg/kmol]

    // process
    pub boost_pressure: f64,            // [kPa]
    pub intercooler_effectiveness: f64, // [-]
    pub compressor_index: f64,          // [-]
    pub excess_air_ratio: f64,          // [-]
    pub volumetric_efficiency: f64,     // [-]
    pub residual_pressure: f64,         // [kPa]
    pub residual_temperature: f64,      // [K]
    pub charge_heating: f64,            // [K] - fresh charge heating by the walls

    // fuel (mass fractions)
    pub carbon: f64,
    pub hydrogen: f64,
    pub oxygen: f64,
    pub lower_heating_value: f64, // [kcal/kg]

    // adjustment
    pub ignition_advance: f64, // [CA deg] before TDC

    // cycle
    pub compression_index: f64, // n1
    pub expansion_index: f64,   // n2s

    // model
    pub combustion_duration: f64,   // [CA deg] - phi_z
    pub combustion_efficiency: f64, // ksi
    pub vibe_exponent: f64,         // m
    pub angle_step: f64,            // [CA deg]
}

impl Default for EngineParameters {
    /// A turbocharged 4-cylinder 5.1 l truck diesel
    fn default() -> EngineParameters {
        EngineParameters {
            boost: true,
            speed: 2200.0,
            cylinders: 4,
            displacement: 5.1,
            compression_ratio: 17.5,
            crank_radius: 67.5,
            conrod: 209.5,
            ambient_pressure: 101.0,
            ambient_temperature: 25.0,
            air_molar_mass: 28.95,
            boost_pressure: 193.0,
            intercooler_effectiveness: 0.88,
            compressor_index: 2.8,
            excess_air_ratio: 1.4,
            volumetric_efficiency: 0.9,
            residual_pressure: 120.0,
            residual_temperature: 680.0,
            charge_heating: 10.0,
            carbon: 0.86,
            hydrogen: 0.13,
            oxygen: 0.01,
            lower_heating_value: 10140.0,
            ignition_advance: 14.0,
            compression_index: 1.38,
            expansion_index: 1.45,
            combustion_duration: 60.0,
            combustion_efficiency: 0.87,
            vibe_exponent: 0.6,
            angle_step: 1.0,
        }
    }
}

impl EngineParameters {
    /// Crank radius to connecting rod length ratio
    pub fn lambda(&self) -> f64 {
        self.crank_radius / self.conrod
    }

    /// Lists the values that make the calculation degenerate. Nothing is rejected:
    /// the caller decides what to do with the list.
    pub fn warnings(&self) -> Vec<String> {
        let mut msgs = Vec::new();
        let positive = [
            ("n", self.speed),
            ("vh", self.displacement),
            ("r", self.crank_radius),
            ("l", self.conrod),
            ("p0", self.ambient_pressure),
            ("muv", self.air_molar_mass),
            ("alpha", self.excess_air_ratio),
            ("etav", self.volumetric_efficiency),
            ("pr", self.residual_pressure),
            ("tr", self.residual_temperature),
            ("hu", self.lower_heating_value),
            ("phiz", self.combustion_duration),
            ("ksi", self.combustion_efficiency),
            ("da", self.angle_step),
        ];
        for (key, value) in positive.iter() {
            if !(*value > 0.0) {
                msgs.push(format!("`{}` must be greater than zero, found {}", key, value));
            }
        }
        if self.cylinders == 0 {
            msgs.push("`i` must be at least one cylinder".to_string());
        }
        if self.boost && !(self.boost_pressure > 0.0) {
            msgs.push(format!("`pk` must be greater than zero on a boosted engine, found {}", self.boost_pressure));
        }
        if !(self.compression_ratio > 1.0) {
            msgs.push(format!("`eps` must be greater than one, found {}", self.compression_ratio));
        }
        if self.crank_radius >= self.conrod {
            msgs.push(format!(
                "crank radius `r` ({}) must be shorter than the connecting rod `l` ({})",
                self.crank_radius, self.conrod
            ));
        }
        for (key, index) in [("n1", self.compression_index), ("n2s", self.expansion_index)].iter() {
            if !(*index > 1.0) {
                msgs.push(format!("polytropic index `{}` must be greater than one, found {}", key, index));
            }
        }
        if !(-180.0..=180.0).contains(&self.ignition_advance) {
            msgs.push(format!("`teta` must lie within [-180, 180], found {}", self.ignition_advance));
        }
        if self.angle_step > 0.0 {
            if !is_multiple_of(self.combustion_duration, self.angle_step) {
                msgs.push(format!(
                    "step `da` ({}) does not evenly divide the combustion duration `phiz` ({})",
                    self.angle_step, self.combustion_duration
                ));
            }
            if !is_multiple_of(180.0 - self.ignition_advance, self.angle_step) {
                msgs.push(format!(
                    "ignition at {} CA deg is not on the {} CA deg grid: the first fire point starts before ignition",
                    -self.ignition_advance, self.angle_step
                ));
            }
        }
        let fuel = self.carbon + self.hydrogen + self.oxygen;
        if (fuel - 1.0).abs() > 0.02 {
            msgs.push(format!("fuel mass fractions C+H+O sum to {:.3}", fuel));
        }
        msgs
    }
}

fn is_multiple_of(value: f64, step: f64) -> bool {
    let ratio = value / step;
    (ratio - ratio.round()).abs() < 1e-9
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_set_has_no_warnings() {
        let params = EngineParameters::default();
        assert!(params.warnings().is_empty(), "{:?}", params.warnings());
    }

    #[test]
    fn step_not_dividing_duration_is_reported() {
        let params = EngineParameters {
            angle_step: 7.0,
            ..EngineParameters::default()
        };
        let warnings = params.warnings();
        assert!(warnings.iter().any(|w| w.contains("phiz")));
        assert!(warnings.iter().any(|w| w.contains("grid")));
    }

    #[test]
    fn zeroed_values_are_reported() {
        let params = EngineParameters {
            compression_ratio: 1.0,
            conrod: 0.0,
            ..EngineParameters::default()
        };
        let warnings = params.warnings();
        assert!(warnings.iter().any(|w| w.contains("`eps`")));
        assert!(warnings.iter().any(|w| w.contains("`l`")));
    }

    #[test]
    fn lambda() {
        let params = EngineParameters::default();
        assert!((params.lambda() - 67.5 / 209.5).abs() < 1e-15);
    }
}

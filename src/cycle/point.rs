use super::kinematics::Kinematics;
use crate::constants::{kelvin_to_celsius, kgfcm2_to_kpa};
use crate::core::traits::SaveData;
use ndarray::*;

/// In-cylinder state at one crank angle
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CyclePoint {
    pub angle: f64,       // [CA deg]
    pub sigma: f64,       // [-]
    pub psi: f64,         // [-]
    pub volume: f64,      // [m³/kg]
    pub pressure: f64,    // [kgf/cm²]
    pub temperature: f64, // [K]
}

impl CyclePoint {
    pub fn new(angle: f64, kin: Kinematics, pressure: f64, temperature: f64) -> CyclePoint {
        CyclePoint {
            angle,
            sigma: kin.sigma,
            psi: kin.psi,
            volume: kin.volume,
            pressure,
            temperature,
        }
    }
}

/// State of the cylinder during combustion with the Vibe law quantities
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CombustionPoint {
    pub point: CyclePoint,
    pub burned_fraction: f64, // x
    pub burn_rate: f64,       // w0
    pub beta: f64,            // molar change factor
    pub k: f64,               // local adiabatic index
    pub ks: f64,              // (k+1)/(k-1) of the averaged index
}

impl std::ops::Deref for CombustionPoint {
    type Target = CyclePoint;
    fn deref(&self) -> &CyclePoint {
        &self.point
    }
}

impl SaveData for CyclePoint {
    fn get_headers(&self) -> String {
        "phi [deg]\tsigma\tpsialpha\tv [m3/kg]\tp [kPa]\tt [degC]".to_string()
    }
    fn num_storable_variables(&self) -> usize {
        6
    }
    fn get_storable_data(&self) -> Array1<f64> {
        array![
            self.angle,
            self.sigma,
            self.psi,
            self.volume,
            kgfcm2_to_kpa(self.pressure),
            kelvin_to_celsius(self.temperature)
        ]
    }
}

impl SaveData for CombustionPoint {
    fn get_headers(&self) -> String {
        "phi [deg]\tsigma\tpsialpha\tv [m3/kg]\tp [kPa]\tt [degC]\tx\tw0\tbeta\tK\tKs".to_string()
    }
    fn num_storable_variables(&self) -> usize {
        11
    }
    fn get_storable_data(&self) -> Array1<f64> {
        // cycle columns first, so every phase shares the leading columns
        let mut row = self.point.get_storable_data().to_vec();
        row.extend_from_slice(&[self.burned_fraction, self.burn_rate, self.beta, self.k, self.ks]);
        Array1::from(row)
    }
}

impl std::fmt::Display for CyclePoint {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{:.1} [CA deg]: p = {:.1} [kPa], t = {:.1} [degC], v = {:.4} [m³/kg]",
            self.angle,
            kgfcm2_to_kpa(self.pressure),
            kelvin_to_celsius(self.temperature),
            self.volume
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cycle::kinematics::slider_crank;

    #[test]
    fn storable_data_matches_headers() {
        let p = CyclePoint::new(-90.0, slider_crank(-90.0, 0.32, 17.5, 0.54), 2.5, 400.0);
        assert_eq!(p.get_headers().split('\t').count(), p.num_storable_variables());
        assert_eq!(p.get_storable_data().len(), p.num_storable_variables());
        let row = p.get_storable_data();
        assert!((row[5] - 127.0).abs() < 1e-12);

        let c = CombustionPoint {
            point: p,
            burned_fraction: 0.5,
            burn_rate: 1.2,
            beta: 1.02,
            k: 1.3,
            ks: 7.6,
        };
        assert_eq!(c.get_headers().split('\t').count(), c.num_storable_variables());
        assert_eq!(c.get_storable_data().len(), c.num_storable_variables());
        assert_eq!(c.angle, -90.0);
    }
}

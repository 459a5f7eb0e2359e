//! Slider-crank relations between crank angle and cylinder volume.
//!
//! Angles are in CA degrees, 0 at the firing TDC and -180 at the intake BDC.

/// Geometric state of the cylinder at one crank angle
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Kinematics {
    /// Piston displacement from TDC related to the crank radius
    pub sigma: f64,
    /// Instant volume related to the clearance volume
    pub psi: f64,
    /// Specific volume [m³/kg]
    pub volume: f64,
}

/// Evaluates the slider-crank mechanism at `angle` [CA deg].
/// `lambda` is crank radius over conrod length, `eps` the compression ratio and
/// `va` the specific volume at BDC.
pub fn slider_crank(angle: f64, lambda: f64, eps: f64, va: f64) -> Kinematics {
    let angle = angle.to_radians();
    let sin = angle.sin();
    let sigma = (1.0 + 1.0 / lambda) - (angle.cos() + 1.0 / lambda * (1.0 - lambda * lambda * sin * sin).sqrt());
    let psi = 1.0 + (eps - 1.0) / 2.0 * sigma;
    Kinematics {
        sigma,
        psi,
        volume: va / eps * psi,
    }
}

/// Run constants of the mechanism
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Crank {
    lambda: f64,
    compression_ratio: f64,
    intake_volume: f64,
}

impl Crank {
    pub fn new(lambda: f64, compression_ratio: f64, intake_volume: f64) -> Crank {
        Crank {
            lambda,
            compression_ratio,
            intake_volume,
        }
    }

    pub fn at(&self, angle: f64) -> Kinematics {
        slider_crank(angle, self.lambda, self.compression_ratio, self.intake_volume)
    }
}

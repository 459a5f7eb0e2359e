//! Compression and expansion strokes, both following `p·v^n = const`.

use super::kinematics::Crank;
use super::point::CyclePoint;

/// Tolerance on the last angle of a grid, absorbs the round-off of `start + j*step`
const GRID_TOL: f64 = 1e-9;

/// Angles `start, start + step, ...` up to and including `end`.
/// Each angle is computed from its index so no round-off accumulates along the grid.
pub fn angle_grid(start: f64, end: f64, step: f64) -> impl Iterator<Item = f64> {
    let count = if step > 0.0 && end >= start - GRID_TOL * step {
        ((end - start) / step + GRID_TOL).floor() as usize + 1
    } else {
        0
    };
    (0..count).map(move |j| start + j as f64 * step)
}

/// Reference state of a polytropic process
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Polytrope {
    pub pressure: f64,
    pub temperature: f64,
    pub volume: f64,
    pub index: f64,
}

impl Polytrope {
    pub fn state_at(&self, volume: f64) -> (f64, f64) {
        let ratio = self.volume / volume;
        (
            self.pressure * ratio.powf(self.index),
            self.temperature * ratio.powf(self.index - 1.0),
        )
    }

    /// Sweeps the process over `angles`
    pub fn sweep<I>(&self, crank: &Crank, angles: I) -> Vec<CyclePoint>
    where
        I: IntoIterator<Item = f64>,
    {
        angles
            .into_iter()
            .map(|angle| {
                let kin = crank.at(angle);
                let (p, t) = self.state_at(kin.volume);
                CyclePoint::new(angle, kin, p, t)
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn grid_includes_the_end() {
        let angles: Vec<f64> = angle_grid(-180.0, -14.0, 1.0).collect();
        assert_eq!(angles.len(), 167);
        assert_eq!(angles[0], -180.0);
        assert_eq!(*angles.last().unwrap(), -14.0);
    }

    #[test]
    fn fractional_step_reaches_the_end() {
        let angles: Vec<f64> = angle_grid(46.5, 180.0, 0.1).collect();
        assert_eq!(angles.len(), 1336);
        assert!((angles.last().unwrap() - 180.0).abs() < 1e-9);
    }

    #[test]
    fn grid_stops_before_an_unreachable_end() {
        let angles: Vec<f64> = angle_grid(-180.0, -14.5, 1.0).collect();
        assert_eq!(*angles.last().unwrap(), -15.0);
        assert_eq!(angle_grid(10.0, 5.0, 1.0).count(), 0);
        assert_eq!(angle_grid(0.0, 5.0, 0.0).count(), 0);
    }

    #[test]
    fn compression_sweep_starts_at_bdc_and_heats_up() {
        let crank = Crank::new(67.5 / 209.5, 17.5, 0.544459);
        let comp = Polytrope {
            pressure: 1.79273,
            temperature: 333.221,
            volume: 0.544459,
            index: 1.38,
        };
        let points = comp.sweep(&crank, angle_grid(-180.0, -14.0, 1.0));
        assert!((points[0].volume - 0.544459).abs() < 1e-12);
        assert!((points[0].pressure - 1.79273).abs() < 1e-12);
        for w in points.windows(2) {
            assert!(w[1].volume < w[0].volume);
            assert!(w[1].pressure > w[0].pressure);
            assert!(w[1].temperature > w[0].temperature);
        }
    }
}

//! Pressure diagram of the cycle as a gnuplot script.

use crate::constants::kgfcm2_to_kpa;
use crate::cycle::CycleResult;
use crate::error::SimError;
use gnuplot::{AxesCommon, Caption, Figure};
use std::path::Path;

/// Builds the p(phi) figure of the whole cycle, rendered to the PNG `image`
pub fn pressure_figure(result: &CycleResult, image: &Path) -> Figure {
    let (angle, pressure): (Vec<f64>, Vec<f64>) = result
        .cycle_points()
        .map(|p| (p.angle, kgfcm2_to_kpa(p.pressure)))
        .unzip();

    let mut fg = Figure::new();
    fg.set_terminal("pngcairo size 1024,768", &image.to_string_lossy());
    fg.axes2d()
        .set_title("Cylinder pressure", &[])
        .set_x_label("Crank angle [CA deg]", &[])
        .set_y_label("Pressure [kPa]", &[])
        .lines(angle, pressure, &[Caption("p")]);
    fg
}

/// Writes the gnuplot script to `script`. The plot data is inlined as binary records,
/// so the script has to be fed on the standard input: `gnuplot < script` produces `image`.
pub fn write_pressure_script(result: &CycleResult, script: &Path, image: &Path) -> Result<(), SimError> {
    let fg = pressure_figure(result, image);
    // an unwritable location is reported as `SimError::Write`
    std::fs::File::create(script).map_err(|e| SimError::write(script, e))?;
    fg.echo_to_file(&*script.to_string_lossy());
    log::info!("pressure diagram script written to `{}`", script.display());
    Ok(())
}

//! Report files and terminal summary of a calculated cycle.
//!
//! A run produces a fixed width text report, a CSV file with one row per cycle
//! point and a copy of the configuration it was calculated from. Every file
//! name carries the local date and time of the run.

pub mod plot;
pub mod table;

use crate::cycle::CycleResult;
use crate::error::SimError;
use ansi_term::Style;
use std::path::{Path, PathBuf};

/// Local date and time used in the report file names
pub fn timestamp() -> String {
    chrono::Local::now().format("%Y-%m-%d_%H-%M").to_string()
}

/// Paths of the files written for one run
#[derive(Debug, Clone, PartialEq)]
pub struct ReportFiles {
    pub text: PathBuf,
    pub csv: PathBuf,
    pub source_copy: PathBuf,
    pub plot_script: PathBuf,
    pub plot_image: PathBuf,
}

impl ReportFiles {
    /// File names `<prefix>_results_<stamp>.txt` and so on, inside `dir`.
    /// The source copy keeps the extension of `source`.
    pub fn new(dir: &Path, prefix: &str, stamp: &str, source: &Path) -> ReportFiles {
        let results = format!("{}_results_{}", prefix, stamp);
        let ext = source.extension().and_then(|e| e.to_str()).unwrap_or("txt");
        ReportFiles {
            text: dir.join(format!("{}.txt", results)),
            csv: dir.join(format!("{}.csv", results)),
            source_copy: dir.join(format!("{}_source-data_{}.{}", prefix, stamp, ext)),
            plot_script: dir.join(format!("{}_pressure_{}.plt", prefix, stamp)),
            plot_image: dir.join(format!("{}_pressure_{}.png", prefix, stamp)),
        }
    }
}

fn write_file(path: &Path, contents: &str) -> Result<(), SimError> {
    std::fs::write(path, contents).map_err(|e| SimError::write(path, e))
}

/// Copies the configuration next to the report. The calculation is already done,
/// so a failure only skips the copy.
pub fn copy_source(source: &Path, copy: &Path) -> bool {
    match std::fs::copy(source, copy) {
        Ok(_) => {
            log::info!("source data copied to `{}`", copy.display());
            true
        }
        Err(e) => {
            log::warn!(
                "unable to copy `{}` to `{}`: {}. Copying source data skipped",
                source.display(),
                copy.display(),
                e
            );
            false
        }
    }
}

/// Writes the text and CSV reports, the source copy and optionally the pressure diagram script
pub fn write_reports(
    result: &CycleResult,
    source: &Path,
    files: &ReportFiles,
    plot: bool,
) -> Result<(), SimError> {
    copy_source(source, &files.source_copy);

    write_file(&files.text, &table::text_report(result)?)?;
    log::info!("report file `{}` created", files.text.display());
    write_file(&files.csv, &table::csv_report(result)?)?;
    log::info!("report file `{}` created", files.csv.display());

    if plot {
        plot::write_pressure_script(result, &files.plot_script, &files.plot_image)?;
    }
    Ok(())
}

/// Cylinder pressures and effective parameters
pub fn summary(result: &CycleResult) -> String {
    let mut out = String::new();
    let sections = [
        ("Cylinder pressure", table::pressure_lines(result)),
        ("EFFECTIVE parameters", table::effective_lines(result)),
    ];
    for (title, lines) in sections.iter() {
        out.push_str(&format!("{}\n\n", Style::new().bold().paint(*title)));
        for line in lines.iter() {
            out.push_str(line);
            out.push('\n');
        }
        out.push('\n');
    }
    out
}

pub fn print_summary(result: &CycleResult) {
    print!("{}", summary(result));
}

//! Text and CSV rendering of a `CycleResult`.

use crate::constants::{kelvin_to_celsius, kgfcm2_to_kpa, kgfm_to_j, HP_PER_KW};
use crate::core::traits::{storable_table, SaveData};
use crate::cycle::CycleResult;
use crate::error::SimError;
use ndarray::*;

const COLUMN_WIDTH: usize = 10;
/// The last column is one character narrower
const LAST_COLUMN_WIDTH: usize = 9;

fn column_width(col: usize, ncols: usize) -> usize {
    if col + 1 == ncols {
        LAST_COLUMN_WIDTH
    } else {
        COLUMN_WIDTH
    }
}

/// Digits after the decimal point of the compression and expansion columns
const CYCLE_PRECISION: [usize; 6] = [1, 4, 4, 4, 1, 1];
/// Fire table order: phi, x, w0, beta, sigma, psi, v, K, Ks, p, t
const FIRE_COLUMNS: [usize; 11] = [0, 6, 7, 8, 1, 2, 3, 9, 10, 4, 5];
const FIRE_PRECISION: [usize; 11] = [1, 4, 4, 3, 4, 4, 4, 3, 3, 1, 1];

/// Fixed width table of the phase `title`. `columns` picks and orders the stored columns.
fn phase_table<T: SaveData>(
    title: &str,
    data: &[T],
    columns: &[usize],
    precision: &[usize],
) -> Result<String, SimError> {
    let mut out = format!("Results of {} phase calculation\n\n", title);
    let table = match storable_table(data)? {
        Some(t) => t.select(Axis(1), columns),
        None => {
            out.push_str("no points\n\n");
            return Ok(out);
        }
    };

    let headers: Vec<String> = data[0].get_headers().split('\t').map(|h| h.replace(' ', "")).collect();
    let ncols = columns.len();
    for (i, &c) in columns.iter().enumerate() {
        out.push_str(&format!("{:>w$}", headers[c], w = column_width(i, ncols)));
    }
    out.push('\n');
    out.push_str(&"-".repeat(COLUMN_WIDTH * ncols - 1));
    out.push('\n');

    for row in table.outer_iter() {
        for (i, (value, &digits)) in row.iter().zip(precision.iter()).enumerate() {
            out.push_str(&format!("{:>w$.p$}", value, w = column_width(i, ncols), p = digits));
        }
        out.push('\n');
    }
    out.push('\n');
    Ok(out)
}

/// Intake results, one `name = value unit` line each
pub fn intake_lines(result: &CycleResult) -> Vec<String> {
    let intake = &result.intake;
    let mut lines = Vec::new();
    match intake.boost {
        Some(b) => {
            lines.push(format!("Tk    = {:.1} degC", kelvin_to_celsius(b.compressor_temperature)));
            lines.push(format!("Tks   = {:.1} degC", kelvin_to_celsius(b.intercooler_temperature)));
        }
        None => lines.push("Tk    = - (naturally aspirated)".to_string()),
    }
    lines.push(format!("Pa    = {:.1} kPa", kgfcm2_to_kpa(intake.pressure)));
    lines.push(format!("gamma = {:.4}", intake.residual_fraction));
    lines.push(format!("Ta    = {:.1} degC", kelvin_to_celsius(intake.temperature)));
    lines.push(format!("L0s   = {:.3} kg/kg", intake.air_mass));
    lines.push(format!("L0    = {:.3} kgmol/kg", intake.air_moles));
    lines.push(format!("va    = {:.3} m3/kg", intake.volume));
    lines
}

pub fn pressure_lines(result: &CycleResult) -> Vec<String> {
    vec![
        format!("P_comp_max = {:.1} kPa", kgfcm2_to_kpa(result.compression_end_pressure())),
        format!("P_fire_max = {:.1} kPa", kgfcm2_to_kpa(result.peak_pressure().pressure)),
    ]
}

pub fn indicated_lines(result: &CycleResult) -> Vec<String> {
    let ind = &result.indicated;
    vec![
        format!("li   = {:.1} J", kgfm_to_j(ind.work)),
        format!("pi   = {:.1} kPa", kgfcm2_to_kpa(ind.pressure)),
        format!("etai = {:.3}", ind.efficiency),
        format!("gi   = {:.1} g/kWh", ind.fuel_consumption * HP_PER_KW),
    ]
}

pub fn effective_lines(result: &CycleResult) -> Vec<String> {
    let eff = &result.effective;
    vec![
        format!("pe   = {:.1} kPa", kgfcm2_to_kpa(eff.pressure)),
        format!("etae = {:.3}", eff.efficiency),
        format!("Ne   = {:.1} kW", eff.power / HP_PER_KW),
        format!("ge   = {:.1} g/kWh", eff.fuel_consumption * HP_PER_KW),
    ]
}

fn section(out: &mut String, title: &str, lines: &[String]) {
    out.push_str(title);
    out.push_str("\n\n");
    for line in lines.iter() {
        out.push_str(line);
        out.push('\n');
    }
    out.push('\n');
}

/// Complete text report
pub fn text_report(result: &CycleResult) -> Result<String, SimError> {
    let mut out = format!("{}\nv{}\n\n", crate::PRG_NAME, crate::PRG_VERSION);
    section(&mut out, "Results of INLET phase calculation", &intake_lines(result));

    // the last compression point opens the fire table
    let n_comp = result.compression.len().saturating_sub(1);
    let cycle_columns: Vec<usize> = (0..CYCLE_PRECISION.len()).collect();
    out.push_str(&phase_table(
        "COMPRESSION",
        &result.compression[..n_comp],
        &cycle_columns,
        &CYCLE_PRECISION,
    )?);
    out.push_str(&phase_table("FIRE", &result.combustion, &FIRE_COLUMNS, &FIRE_PRECISION)?);
    out.push_str(&phase_table(
        "EXPANSION",
        &result.expansion,
        &cycle_columns,
        &CYCLE_PRECISION,
    )?);

    section(&mut out, "Cylinder pressure", &pressure_lines(result));
    section(&mut out, "INDICATED parameters", &indicated_lines(result));
    section(&mut out, "EFFECTIVE parameters", &effective_lines(result));
    Ok(out)
}

fn csv_rows<T: SaveData>(out: &mut String, phase: &str, data: &[T], width: usize) -> Result<(), SimError> {
    let table = match storable_table(data)? {
        Some(t) => t,
        None => return Ok(()),
    };
    for row in table.outer_iter() {
        let mut fields: Vec<String> = row.iter().map(|v| v.to_string()).collect();
        fields.resize(width, String::new());
        out.push_str(phase);
        out.push(',');
        out.push_str(&fields.join(","));
        out.push('\n');
    }
    Ok(())
}

/// One row per cycle point. Compression and expansion rows leave the combustion columns empty.
pub fn csv_report(result: &CycleResult) -> Result<String, SimError> {
    let headers = match result.combustion.first() {
        Some(c) => c.get_headers(),
        None => return Ok(String::new()),
    };
    let width = headers.split('\t').count();
    let mut out = format!("phase,{}\n", headers.replace('\t', ","));

    let n_comp = result.compression.len().saturating_sub(1);
    csv_rows(&mut out, "compression", &result.compression[..n_comp], width)?;
    csv_rows(&mut out, "fire", &result.combustion, width)?;
    csv_rows(&mut out, "expansion", &result.expansion, width)?;
    Ok(out)
}

//! Reader of the line oriented `key=value` configuration file and its blank template.
//!
//! Lines starting with `//` are comments. Missing or unparseable values fall back to
//! zero, as older configuration files expect.

use super::parameters::EngineParameters;
use crate::error::SimError;
use std::path::Path;

pub const PARAM_DELIMITER: &str = "=";
pub const COMMENT: &str = "//";

const KEYS: [&str; 29] = [
    "boost", "n", "i", "vh", "eps", "r", "l", "p0", "t0", "muv", "pk", "iceff", "nk", "alpha", "etav",
    "pr", "tr", "dt", "C", "H", "O", "hu", "teta", "n1", "n2s", "phiz", "ksi", "m", "da",
];

/// Parameter set with every value at zero, the starting point of the parser
fn zeroed() -> EngineParameters {
    EngineParameters {
        boost: false,
        speed: 0.0,
        cylinders: 0,
        displacement: 0.0,
        compression_ratio: 0.0,
        crank_radius: 0.0,
        conrod: 0.0,
        ambient_pressure: 0.0,
        ambient_temperature: 0.0,
        air_molar_mass: 0.0,
        boost_pressure: 0.0,
        intercooler_effectiveness: 0.0,
        compressor_index: 0.0,
        excess_air_ratio: 0.0,
        volumetric_efficiency: 0.0,
        residual_pressure: 0.0,
        residual_temperature: 0.0,
        charge_heating: 0.0,
        carbon: 0.0,
        hydrogen: 0.0,
        oxygen: 0.0,
        lower_heating_value: 0.0,
        ignition_advance: 0.0,
        compression_index: 0.0,
        expansion_index: 0.0,
        combustion_duration: 0.0,
        combustion_efficiency: 0.0,
        vibe_exponent: 0.0,
        angle_step: 0.0,
    }
}

fn parse_number(key: &str, value: &str) -> f64 {
    match value.parse() {
        Ok(v) => v,
        Err(err) => {
            log::warn!("unable to parse `{}={}` ({}), using 0", key, value, err);
            0.0
        }
    }
}

fn parse_bool(value: &str) -> bool {
    matches!(value, "1" | "true")
}

/// Parses the contents of a configuration file
pub fn parse_conf(text: &str) -> EngineParameters {
    let mut params = zeroed();
    let mut found: Vec<&str> = Vec::new();

    for line in text.lines() {
        let line = line.trim();
        if line.is_empty() || line.starts_with(COMMENT) {
            continue;
        }
        let elem: Vec<&str> = line
            .split(PARAM_DELIMITER)
            .map(|s| s.trim())
            .filter(|s| !s.is_empty())
            .collect();
        if elem.len() != 2 {
            continue;
        }
        let (key, value) = (elem[0], elem[1]);

        match key {
            "boost" => params.boost = parse_bool(value),
            "n" => params.speed = parse_number(key, value),
            "i" => params.cylinders = parse_number(key, value).max(0.0) as u32,
            "vh" => params.displacement = parse_number(key, value),
            "eps" => params.compression_ratio = parse_number(key, value),
            "r" => params.crank_radius = parse_number(key, value),
            "l" => params.conrod = parse_number(key, value),
            "p0" => params.ambient_pressure = parse_number(key, value),
            "t0" => params.ambient_temperature = parse_number(key, value),
            "muv" => params.air_molar_mass = parse_number(key, value),
            "pk" => params.boost_pressure = parse_number(key, value),
            "iceff" => params.intercooler_effectiveness = parse_number(key, value),
            "nk" => params.compressor_index = parse_number(key, value),
            "alpha" => params.excess_air_ratio = parse_number(key, value),
            "etav" => params.volumetric_efficiency = parse_number(key, value),
            "pr" => params.residual_pressure = parse_number(key, value),
            "tr" => params.residual_temperature = parse_number(key, value),
            "dt" => params.charge_heating = parse_number(key, value),
            "C" => params.carbon = parse_number(key, value),
            "H" => params.hydrogen = parse_number(key, value),
            "O" => params.oxygen = parse_number(key, value),
            "hu" => params.lower_heating_value = parse_number(key, value),
            "teta" => params.ignition_advance = parse_number(key, value),
            "n1" => params.compression_index = parse_number(key, value),
            "n2s" => params.expansion_index = parse_number(key, value),
            "phiz" => params.combustion_duration = parse_number(key, value),
            "ksi" => params.combustion_efficiency = parse_number(key, value),
            "m" => params.vibe_exponent = parse_number(key, value),
            "da" => params.angle_step = parse_number(key, value),
            _ => {
                log::warn!("unknown parameter `{}` ignored", key);
                continue;
            }
        }
        found.push(key);
    }

    for key in KEYS.iter().filter(|k| !found.contains(*k)) {
        log::warn!("parameter `{}` is missing, using 0", key);
    }
    params
}

pub fn read_conf_file(file_name: &Path) -> Result<EngineParameters, SimError> {
    let text = std::fs::read_to_string(file_name).map_err(|err| SimError::read(file_name, err))?;
    Ok(parse_conf(&text))
}

/// Documented configuration file holding the default parameter set
pub fn blank_template() -> String {
    let p = EngineParameters::default();
    let mut out = String::new();
    out.push_str(&format!(
        "//\n\
         // This is {} configuration file.\n\
         // Parameter-Value delimiter is symbol \"{}\".\n\
         // Text after \"{}\" is comment.\n\
         //\n\n",
        crate::PRG_NAME,
        PARAM_DELIMITER,
        COMMENT
    ));

    let sections: Vec<(&str, Vec<(&str, &str, String)>)> = vec![
        (
            "engine design",
            vec![
                ("boost", "turbocharging (0 - no, 1 - yes)", (p.boost as u8).to_string()),
                ("n", "crankshaft speed, rpm", p.speed.to_string()),
                ("i", "number of cylinders", p.cylinders.to_string()),
                ("vh", "engine displacement, l", p.displacement.to_string()),
                ("eps", "compression ratio", p.compression_ratio.to_string()),
                ("r", "crank radius, mm", p.crank_radius.to_string()),
                ("l", "connecting rod length, mm", p.conrod.to_string()),
            ],
        ),
        (
            "environment",
            vec![
                ("p0", "barometric pressure, kPa", p.ambient_pressure.to_string()),
                ("t0", "ambient temperature, degC", p.ambient_temperature.to_string()),
                ("muv", "apparent molar mass of air", p.air_molar_mass.to_string()),
            ],
        ),
        (
            "process",
            vec![
                ("pk", "boost pressure, kPa", p.boost_pressure.to_string()),
                ("iceff", "intercooler effectiveness", p.intercooler_effectiveness.to_string()),
                ("nk", "compressor polytropic index", p.compressor_index.to_string()),
                ("alpha", "excess air ratio", p.excess_air_ratio.to_string()),
                ("etav", "volumetric efficiency", p.volumetric_efficiency.to_string()),
                ("pr", "residual gas pressure, kPa", p.residual_pressure.to_string()),
                ("tr", "residual gas temperature, K", p.residual_temperature.to_string()),
                ("dt", "fresh charge heating by the walls, K", p.charge_heating.to_string()),
            ],
        ),
        (
            "fuel",
            vec![
                ("C", "carbon content of the fuel (by mass)", p.carbon.to_string()),
                ("H", "hydrogen content of the fuel (by mass)", p.hydrogen.to_string()),
                ("O", "oxygen content of the fuel (by mass)", p.oxygen.to_string()),
                (
                    "hu",
                    "lower heating value of the fuel, kcal/kg",
                    p.lower_heating_value.to_string(),
                ),
            ],
        ),
        (
            "adjustment",
            vec![
                ("teta", "ignition advance angle, CA deg", p.ignition_advance.to_string()),
            ],
        ),
        (
            "cycle",
            vec![
                ("n1", "compression polytropic index (1.32-1.38)", p.compression_index.to_string()),
                ("n2s", "expansion polytropic index (1.35-1.45)", p.expansion_index.to_string()),
            ],
        ),
        (
            "model",
            vec![
                ("phiz", "combustion duration, CA deg", p.combustion_duration.to_string()),
                ("ksi", "combustion efficiency coefficient", p.combustion_efficiency.to_string()),
                ("m", "combustion shape exponent", p.vibe_exponent.to_string()),
                ("da", "calculation step, CA deg", p.angle_step.to_string()),
            ],
        ),
    ];

    for (title, entries) in sections.iter() {
        out.push_str(&format!("/////// {} parameters\n\n", title));
        for (key, doc, value) in entries.iter() {
            out.push_str(&format!("// {}\n{}{}{}\n\n", doc, key, PARAM_DELIMITER, value));
        }
    }
    out
}

pub fn write_blank(file_name: &Path) -> Result<(), SimError> {
    std::fs::write(file_name, blank_template()).map_err(|err| SimError::write(file_name, err))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_template_holds_the_default_set() {
        assert_eq!(parse_conf(&blank_template()), EngineParameters::default());
    }

    #[test]
    fn blank_template_documents_every_key() {
        let blank = blank_template();
        for key in KEYS.iter() {
            assert!(blank.contains(&format!("\n{}=", key)), "missing `{}`", key);
        }
    }

    #[test]
    fn comments_and_malformed_lines_are_skipped() {
        let text = "// n=1000\n\nn=2200\neps\nvh==\nr=67.5=1\ni = 6\n";
        let params = parse_conf(text);
        assert_eq!(params.speed, 2200.0);
        assert_eq!(params.cylinders, 6);
        assert_eq!(params.displacement, 0.0);
        assert_eq!(params.crank_radius, 0.0);
    }

    #[test]
    fn unparseable_values_default_to_zero() {
        let params = parse_conf("eps=seventeen\nboost=yes\nda=0.5\n");
        assert_eq!(params.compression_ratio, 0.0);
        assert!(!params.boost);
        assert_eq!(params.angle_step, 0.5);
    }

    #[test]
    fn boost_flag() {
        assert!(parse_conf("boost=1").boost);
        assert!(parse_conf("boost=true").boost);
        assert!(!parse_conf("boost=0").boost);
    }

    #[test]
    fn blank_file_is_readable() {
        let path = std::env::temp_dir().join("vibe72_conf_reader_blank.conf");
        write_blank(&path).unwrap();
        assert_eq!(read_conf_file(&path).unwrap(), EngineParameters::default());
        std::fs::remove_file(&path).ok();
    }

    #[test]
    fn missing_file_is_a_read_error() {
        let err = read_conf_file(Path::new("/nonexistent/vibe72.conf")).unwrap_err();
        assert!(matches!(err, SimError::Read { .. }));
    }
}

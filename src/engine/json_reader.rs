use super::parameters::EngineParameters;
use crate::error::SimError;
use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct JsonEngine {
    pub engine: JsonDesign,
    pub ambient: JsonAmbient,
    pub process: JsonProcess,
    pub fuel: JsonFuel,
    pub adjustment: JsonAdjustment,
    pub cycle: JsonCycle,
    pub model: JsonModel,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct JsonDesign {
    pub boost: bool,
    pub speed: f64,             // [rpm]
    pub cylinders: u32,
    pub displacement: f64,      // [l]
    pub compression_ratio: f64, // [-]
    pub crank_radius: f64,      // [mm]
    pub conrod: f64,            // [mm]
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct JsonAmbient {
    pub pressure: f64,    // [kPa]
    pub temperature: f64, // [°C]
    pub air_molar_mass: f64,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct JsonProcess {
    pub boost_pressure: f64, // [kPa]
    pub intercooler_effectiveness: f64,
    pub compressor_index: f64,
    pub excess_air_ratio: f64,
    pub volumetric_efficiency: f64,
    pub residual_pressure: f64,    // [kPa]
    pub residual_temperature: f64, // [K]
    pub charge_heating: f64,       // [K]
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct JsonFuel {
    pub carbon: f64,
    pub hydrogen: f64,
    pub oxygen: f64,
    pub lhv: f64, // [kcal/kg]
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct JsonAdjustment {
    pub ignition_advance: f64, // [CA deg]
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct JsonCycle {
    pub compression_index: f64,
    pub expansion_index: f64,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct JsonModel {
    pub comb_duration: f64, // [CA deg]
    pub comb_efficiency: f64,
    pub m: f64,
    pub angle_step: f64, // [CA deg]
}

impl From<JsonEngine> for EngineParameters {
    fn from(json: JsonEngine) -> EngineParameters {
        EngineParameters {
            boost: json.engine.boost,
            speed: json.engine.speed,
            cylinders: json.engine.cylinders,
            displacement: json.engine.displacement,
            compression_ratio: json.engine.compression_ratio,
            crank_radius: json.engine.crank_radius,
            conrod: json.engine.conrod,
            ambient_pressure: json.ambient.pressure,
            ambient_temperature: json.ambient.temperature,
            air_molar_mass: json.ambient.air_molar_mass,
            boost_pressure: json.process.boost_pressure,
            intercooler_effectiveness: json.process.intercooler_effectiveness,
            compressor_index: json.process.compressor_index,
            excess_air_ratio: json.process.excess_air_ratio,
            volumetric_efficiency: json.process.volumetric_efficiency,
            residual_pressure: json.process.residual_pressure,
            residual_temperature: json.process.residual_temperature,
            charge_heating: json.process.charge_heating,
            carbon: json.fuel.carbon,
            hydrogen: json.fuel.hydrogen,
            oxygen: json.fuel.oxygen,
            lower_heating_value: json.fuel.lhv,
            ignition_advance: json.adjustment.ignition_advance,
            compression_index: json.cycle.compression_index,
            expansion_index: json.cycle.expansion_index,
            combustion_duration: json.model.comb_duration,
            combustion_efficiency: json.model.comb_efficiency,
            vibe_exponent: json.model.m,
            angle_step: json.model.angle_step,
        }
    }
}

impl From<&EngineParameters> for JsonEngine {
    fn from(p: &EngineParameters) -> JsonEngine {
        JsonEngine {
            engine: JsonDesign {
                boost: p.boost,
                speed: p.speed,
                cylinders: p.cylinders,
                displacement: p.displacement,
                compression_ratio: p.compression_ratio,
                crank_radius: p.crank_radius,
                conrod: p.conrod,
            },
            ambient: JsonAmbient {
                pressure: p.ambient_pressure,
                temperature: p.ambient_temperature,
                air_molar_mass: p.air_molar_mass,
            },
            process: JsonProcess {
                boost_pressure: p.boost_pressure,
                intercooler_effectiveness: p.intercooler_effectiveness,
                compressor_index: p.compressor_index,
                excess_air_ratio: p.excess_air_ratio,
                volumetric_efficiency: p.volumetric_efficiency,
                residual_pressure: p.residual_pressure,
                residual_temperature: p.residual_temperature,
                charge_heating: p.charge_heating,
            },
            fuel: JsonFuel {
                carbon: p.carbon,
                hydrogen: p.hydrogen,
                oxygen: p.oxygen,
                lhv: p.lower_heating_value,
            },
            adjustment: JsonAdjustment {
                ignition_advance: p.ignition_advance,
            },
            cycle: JsonCycle {
                compression_index: p.compression_index,
                expansion_index: p.expansion_index,
            },
            model: JsonModel {
                comb_duration: p.combustion_duration,
                comb_efficiency: p.combustion_efficiency,
                m: p.vibe_exponent,
                angle_step: p.angle_step,
            },
        }
    }
}

pub fn parse_json(json: &str) -> serde_json::Result<EngineParameters> {
    let data: JsonEngine = serde_json::from_str(json)?;
    Ok(data.into())
}

pub fn read_json_file(file_name: &Path) -> Result<EngineParameters, SimError> {
    let json_file = std::fs::read_to_string(file_name).map_err(|err| SimError::read(file_name, err))?;
    parse_json(&json_file).map_err(|source| SimError::Json {
        path: file_name.to_path_buf(),
        source,
    })
}

/// Writes the default parameter set as a `.json` configuration
pub fn write_json_blank(file_name: &Path) -> Result<(), SimError> {
    let json = JsonEngine::from(&EngineParameters::default());
    let text = serde_json::to_string_pretty(&json).map_err(|source| SimError::Json {
        path: file_name.to_path_buf(),
        source,
    })?;
    std::fs::write(file_name, text).map_err(|err| SimError::write(file_name, err))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_set_survives_json() {
        let params = EngineParameters::default();
        let text = serde_json::to_string(&JsonEngine::from(&params)).unwrap();
        assert_eq!(parse_json(&text).unwrap(), params);
    }

    #[test]
    fn missing_section_is_an_error() {
        let err = parse_json(r#"{"engine": {"boost": true}}"#);
        assert!(err.is_err());
    }

    #[test]
    fn blank_file_is_readable() {
        let path = std::env::temp_dir().join("vibe72_json_reader_blank.json");
        write_json_blank(&path).unwrap();
        let params = read_json_file(&path).unwrap();
        assert_eq!(params, EngineParameters::default());
        std::fs::remove_file(&path).ok();
    }
}

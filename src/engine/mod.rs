//! Engine input data and the configuration files it is read from
pub mod conf_reader;
pub mod json_reader;
pub mod parameters;

use crate::error::SimError;
use parameters::EngineParameters;
use std::path::Path;

fn is_json(file_name: &Path) -> bool {
    file_name
        .extension()
        .map_or(false, |ext| ext.eq_ignore_ascii_case("json"))
}

/// Reads a configuration file: `.json` files use the JSON layout, anything else
/// the `key=value` format.
pub fn load(file_name: &Path) -> Result<EngineParameters, SimError> {
    log::info!("reading configuration `{}`", file_name.display());
    if is_json(file_name) {
        json_reader::read_json_file(file_name)
    } else {
        conf_reader::read_conf_file(file_name)
    }
}

/// Writes a blank configuration with the default parameter set, in the format `load` expects for `file_name`
pub fn write_blank(file_name: &Path) -> Result<(), SimError> {
    if is_json(file_name) {
        json_reader::write_json_blank(file_name)
    } else {
        conf_reader::write_blank(file_name)
    }
}

//! # vibe_cycle_simulator
//!
//! The `vibe_cycle_simulator` crate performs the thermal calculation of a four-stroke
//! diesel engine working cycle, with the heat release during combustion given by the
//! Vibe law.
//!
//! The cycle is calculated from the intake BDC to the expansion BDC on a fixed crank
//! angle grid and results in the in-cylinder state at every angle plus the indicated
//! and effective parameters of the engine.
//!
//! ```
//! use vibe_cycle_simulator::{CycleSimulator, EngineParameters};
//!
//! let params = EngineParameters::default();
//! let result = CycleSimulator::new(&params).run();
//! assert!(result.peak_pressure().pressure > result.compression_end_pressure());
//! assert!(result.effective.power > 0.0);
//! ```
//!
//! Parameters are usually read from a `key=value` configuration file or a JSON file,
//! see [`engine::load`], and the results written with the [`report`] module.

pub mod constants;
mod core;
pub mod cycle;
pub mod engine;
pub mod error;
pub mod report;

/// Program name, also the prefix of the report files
pub const PRG_NAME: &str = "vibe72";
pub const PRG_VERSION: &str = env!("CARGO_PKG_VERSION");
pub const PRG_DESCRIPTION: &str = "Diesel engine working cycle calculation with the Vibe combustion model";

// Re-exporting
pub use crate::core::traits::SaveData;
pub use crate::cycle::{CombustionPoint, CyclePoint, CycleResult, CycleSimulator};
pub use crate::engine::parameters::EngineParameters;
pub use crate::error::SimError;

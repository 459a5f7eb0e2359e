//! Errors raised by the configuration and report layers.
//!
//! The cycle calculation itself never fails; a non-physical parameter set
//! produces degenerate numbers instead of an error.

use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SimError {
    #[error("unable to read `{}`: {source}", .path.display())]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("unable to write `{}`: {source}", .path.display())]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("unable to parse `{}`: {source}", .path.display())]
    Json {
        path: PathBuf,
        source: serde_json::Error,
    },

    /// The configuration file did not exist; a blank was written in its place.
    #[error("configuration file `{}` not found, a blank was created. Edit it and restart the calculation", .0.display())]
    BlankCreated(PathBuf),

    #[error("report table has an inconsistent shape: {0}")]
    Shape(#[from] ndarray::ShapeError),
}

impl SimError {
    pub fn read(path: impl Into<PathBuf>, source: std::io::Error) -> SimError {
        SimError::Read {
            path: path.into(),
            source,
        }
    }

    pub fn write(path: impl Into<PathBuf>, source: std::io::Error) -> SimError {
        SimError::Write {
            path: path.into(),
            source,
        }
    }
}

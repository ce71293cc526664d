//! Error types for the roomsdf pipeline.

use std::path::PathBuf;

use roomsdf_core::CoreError;
use roomsdf_io::RoomSdfIoError;
use thiserror::Error;

use crate::generator::Resolution;

/// Errors that can occur while preparing chunks for a room.
#[derive(Error, Debug)]
pub enum PipelineError {
    /// A mesh directory could not be listed.
    #[error("failed to scan {path}: {source}")]
    Discovery {
        /// Directory being listed.
        path: PathBuf,
        /// Underlying error.
        source: std::io::Error,
    },

    /// The field generator could not be started.
    #[error("failed to run field generator {program}: {source}")]
    GeneratorSpawn {
        /// Program that was invoked.
        program: PathBuf,
        /// Underlying error.
        source: std::io::Error,
    },

    /// The field generator ran but reported failure, and the run was set to abort.
    #[error("field generator failed for room {room} at {resolution} resolution ({})", describe_exit(.exit_code))]
    GeneratorFailed {
        /// Room identifier.
        room: String,
        /// Which field was being generated.
        resolution: Resolution,
        /// Exit code, if the process exited normally.
        exit_code: Option<i32>,
    },

    /// Reading or writing an array or mesh file failed.
    #[error("{path}: {source}")]
    Array {
        /// File involved.
        path: PathBuf,
        /// Underlying error.
        source: RoomSdfIoError,
    },

    /// Filesystem operation outside array I/O failed.
    #[error("I/O error on {path}: {source}")]
    Io {
        /// Path involved.
        path: PathBuf,
        /// Underlying error.
        source: std::io::Error,
    },

    /// Grid padding, slicing or configuration failed.
    #[error("grid error: {0}")]
    Grid(#[from] CoreError),
}

impl PipelineError {
    pub(crate) fn array(path: impl Into<PathBuf>) -> impl FnOnce(RoomSdfIoError) -> Self {
        let path = path.into();
        move |source| PipelineError::Array { path, source }
    }

    pub(crate) fn io(path: impl Into<PathBuf>) -> impl FnOnce(std::io::Error) -> Self {
        let path = path.into();
        move |source| PipelineError::Io { path, source }
    }
}

fn describe_exit(exit_code: &Option<i32>) -> String {
    match exit_code {
        Some(code) => format!("exit code {}", code),
        None => "terminated by signal".to_string(),
    }
}

/// Result type for pipeline operations.
pub type Result<T> = std::result::Result<T, PipelineError>;

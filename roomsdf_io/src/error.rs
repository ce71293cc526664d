//! Error types for roomsdf_io operations.

use thiserror::Error;

/// Errors that can occur while reading or writing arrays and meshes.
#[derive(Error, Debug)]
pub enum RoomSdfIoError {
    /// Underlying filesystem or stream error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The file is not a well-formed `.npy` array.
    #[error("invalid .npy format: {message}")]
    InvalidFormat {
        /// Description of the format error.
        message: String,
    },

    /// The array's element type is not one we can decode.
    #[error("unsupported dtype '{descr}'")]
    UnsupportedDtype {
        /// The `descr` string from the header.
        descr: String,
    },

    /// The array is not three-dimensional.
    #[error("expected a 3D array, got shape {shape:?}")]
    NotThreeDimensional {
        /// Shape found in the header.
        shape: Vec<usize>,
    },

    /// Grid construction failed.
    #[error("grid error: {0}")]
    Grid(#[from] roomsdf_core::CoreError),
}

impl RoomSdfIoError {
    pub(crate) fn format(message: impl Into<String>) -> Self {
        RoomSdfIoError::InvalidFormat {
            message: message.into(),
        }
    }
}

/// Result type alias for roomsdf_io operations.
pub type Result<T> = std::result::Result<T, RoomSdfIoError>;

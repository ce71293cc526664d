//! Error types for roomsdf_core operations.
//!
//! A plain enum with a hand-written `Display`, kept free of external dependencies.

use core::fmt;

/// Errors that can occur during grid and layout operations.
#[derive(Debug, Clone, PartialEq)]
pub enum CoreError {
    /// The number of values does not match the product of the shape.
    LengthMismatch {
        /// Number of values implied by the shape.
        expected: usize,
        /// Number of values provided.
        got: usize,
    },
    /// A grid does not fit inside the requested target shape.
    ShapeMismatch {
        /// Shape of the source grid.
        source: [usize; 3],
        /// Shape it was supposed to fit into.
        target: [usize; 3],
    },
    /// A sub-block request reaches past the end of the grid.
    SliceOutOfBounds {
        /// Origin of the requested block.
        origin: [usize; 3],
        /// Extent of the requested block.
        extent: [usize; 3],
        /// Shape of the grid being sliced.
        shape: [usize; 3],
    },
    /// The resolution configuration is unusable.
    InvalidResolution {
        /// Description of the problem.
        message: &'static str,
    },
}

impl fmt::Display for CoreError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CoreError::LengthMismatch { expected, got } => {
                write!(f, "value count mismatch: expected {}, got {}", expected, got)
            }
            CoreError::ShapeMismatch { source, target } => {
                write!(
                    f,
                    "grid of shape {:?} does not fit into shape {:?}",
                    source, target
                )
            }
            CoreError::SliceOutOfBounds {
                origin,
                extent,
                shape,
            } => {
                write!(
                    f,
                    "block at {:?} with extent {:?} exceeds grid shape {:?}",
                    origin, extent, shape
                )
            }
            CoreError::InvalidResolution { message } => {
                write!(f, "invalid resolution config: {}", message)
            }
        }
    }
}

impl std::error::Error for CoreError {}

/// Result type alias for roomsdf_core operations.
pub type Result<T> = core::result::Result<T, CoreError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = CoreError::LengthMismatch {
            expected: 8,
            got: 7,
        };
        assert_eq!(format!("{}", err), "value count mismatch: expected 8, got 7");

        let err = CoreError::ShapeMismatch {
            source: [5, 5, 5],
            target: [4, 4, 4],
        };
        assert_eq!(
            format!("{}", err),
            "grid of shape [5, 5, 5] does not fit into shape [4, 4, 4]"
        );

        let err = CoreError::InvalidResolution {
            message: "lowres_dim must be positive",
        };
        assert_eq!(
            format!("{}", err),
            "invalid resolution config: lowres_dim must be positive"
        );
    }

    #[test]
    fn test_error_equality() {
        let a = CoreError::LengthMismatch {
            expected: 1,
            got: 2,
        };
        let b = CoreError::LengthMismatch {
            expected: 1,
            got: 2,
        };
        assert_eq!(a, b);
        assert_ne!(
            a,
            CoreError::InvalidResolution {
                message: "extent must be positive"
            }
        );
    }
}

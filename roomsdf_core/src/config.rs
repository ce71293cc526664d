//! Resolution configuration shared by field generation and chunking.

use crate::error::{CoreError, Result};

/// Fixed resolution parameters (immutable after construction).
///
/// The high-resolution grid dimension doubles as the chunk dimension: every
/// chunk spans `highres_dim` voxels along x and z in the high-res grid and
/// `highres_dim / ratio` voxels in the low-res grid.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ResolutionConfig {
    /// Voxels per axis of the high-resolution grid (and chunk size).
    pub highres_dim: usize,
    /// Voxels per axis of the low-resolution grid.
    pub lowres_dim: usize,
    /// Physical extent covered by one unpadded grid.
    pub extent: f64,
}

impl ResolutionConfig {
    /// Create a new resolution configuration.
    ///
    /// # Arguments
    /// * `highres_dim` - Voxels per axis at high resolution (typically 64)
    /// * `lowres_dim` - Voxels per axis at low resolution (typically 16)
    /// * `extent` - Physical span of the unpadded grid
    #[inline]
    pub const fn new(highres_dim: usize, lowres_dim: usize, extent: f64) -> Self {
        Self {
            highres_dim,
            lowres_dim,
            extent,
        }
    }

    /// Integer ratio between high-res and low-res dimensions.
    ///
    /// # Errors
    /// Returns `InvalidResolution` if the ratio is not an exact positive integer.
    pub fn ratio(&self) -> Result<usize> {
        if self.lowres_dim == 0 {
            return Err(CoreError::InvalidResolution {
                message: "lowres_dim must be positive",
            });
        }
        if self.highres_dim < self.lowres_dim || self.highres_dim % self.lowres_dim != 0 {
            return Err(CoreError::InvalidResolution {
                message: "highres_dim must be a positive multiple of lowres_dim",
            });
        }
        Ok(self.highres_dim / self.lowres_dim)
    }

    /// Voxels of padding around the high-res field: `ceil(highres_dim / lowres_dim)`.
    #[inline]
    pub fn padding_highres(&self) -> usize {
        self.highres_dim.div_ceil(self.lowres_dim.max(1))
    }

    /// Voxels of padding around the low-res field.
    #[inline]
    pub const fn padding_lowres(&self) -> usize {
        1
    }

    /// Voxel pitch of the high-res field.
    #[inline]
    pub fn voxel_size_highres(&self) -> f64 {
        self.extent / (self.highres_dim as f64 - 2.0 * self.padding_highres() as f64)
    }

    /// Voxel pitch of the low-res field.
    #[inline]
    pub fn voxel_size_lowres(&self) -> f64 {
        self.extent / (self.lowres_dim as f64 - 2.0 * self.padding_lowres() as f64)
    }

    /// Horizontal chunk extent in high-res voxels.
    #[inline]
    pub const fn highres_chunk_dim(&self) -> usize {
        self.highres_dim
    }

    /// Horizontal chunk extent in low-res voxels.
    pub fn lowres_chunk_dim(&self) -> Result<usize> {
        Ok(self.highres_dim / self.ratio()?)
    }

    /// Validate the configuration.
    pub fn validate(&self) -> Result<()> {
        if self.highres_dim == 0 {
            return Err(CoreError::InvalidResolution {
                message: "highres_dim must be positive",
            });
        }
        self.ratio()?;
        if self.extent.is_nan() || self.extent <= 0.0 {
            return Err(CoreError::InvalidResolution {
                message: "extent must be positive",
            });
        }
        if self.highres_dim <= 2 * self.padding_highres() {
            return Err(CoreError::InvalidResolution {
                message: "highres_dim leaves no voxels inside its padding",
            });
        }
        if self.lowres_dim <= 2 * self.padding_lowres() {
            return Err(CoreError::InvalidResolution {
                message: "lowres_dim leaves no voxels inside its padding",
            });
        }
        Ok(())
    }
}

impl Default for ResolutionConfig {
    fn default() -> Self {
        Self {
            highres_dim: 64,
            lowres_dim: 16,
            extent: 2.6,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_constants() {
        let config = ResolutionConfig::default();
        assert_eq!(config.ratio().unwrap(), 4);
        assert_eq!(config.padding_highres(), 4);
        assert_eq!(config.padding_lowres(), 1);
        assert!((config.voxel_size_highres() - 2.6 / 56.0).abs() < 1e-12);
        assert!((config.voxel_size_lowres() - 2.6 / 14.0).abs() < 1e-12);
        assert_eq!(config.lowres_chunk_dim().unwrap(), 16);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_padding_rounds_up() {
        let config = ResolutionConfig::new(30, 8, 2.6);
        assert_eq!(config.padding_highres(), 4);
    }

    #[test]
    fn test_non_integer_ratio_rejected() {
        let config = ResolutionConfig::new(60, 16, 2.6);
        assert!(matches!(
            config.ratio(),
            Err(CoreError::InvalidResolution { .. })
        ));
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validation() {
        let valid = ResolutionConfig::default();

        let zero_low = ResolutionConfig {
            lowres_dim: 0,
            ..valid
        };
        assert!(zero_low.validate().is_err());

        let bad_extent = ResolutionConfig {
            extent: 0.0,
            ..valid
        };
        assert!(bad_extent.validate().is_err());

        let too_small = ResolutionConfig::new(4, 2, 1.0);
        assert!(too_small.validate().is_err());
    }
}

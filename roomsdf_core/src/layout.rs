//! Padding and chunk layout for paired low/high resolution grids.
//!
//! The high-res grid is padded so each axis is a multiple of the chunk
//! dimension; the low-res grid is padded to the same physical volume by
//! dividing by the resolution ratio. Chunks tile the padded grids along the
//! two horizontal axes (0 and 2); the vertical axis is never split.
//!
//! ```text
//!   z ──►
//! x ┌────────┬────────┐
//! │ │ (0, 0) │ (0, 1) │   each tile: chunk_dim × full height × chunk_dim
//! ▼ ├────────┼────────┤
//!   │ (1, 0) │ (1, 1) │
//!   └────────┴────────┘
//! ```

use crate::config::ResolutionConfig;
use crate::error::Result;
use crate::grid::Shape3;

/// Round each axis up to the next multiple of `chunk_dim`.
///
/// A zero-length axis stays zero. `chunk_dim` must be positive.
#[inline]
pub fn padded_shape(shape: Shape3, chunk_dim: usize) -> Shape3 {
    shape.map(|d| d.div_ceil(chunk_dim) * chunk_dim)
}

/// Low-res shape covering the same volume as a padded high-res shape.
#[inline]
pub fn lowres_shape(padded_highres: Shape3, ratio: usize) -> Shape3 {
    padded_highres.map(|d| d / ratio)
}

/// File stem of a chunk: `{source}__{stride:02}__{x:03}_{y:03}_{z:03}`.
///
/// `origin` is the chunk's high-res origin; its vertical component is always 0
/// for tiles produced by [`ChunkLayout`].
pub fn chunk_name(source: &str, stride: usize, origin: [usize; 3]) -> String {
    format!(
        "{}__{:02}__{:03}_{:03}_{:03}",
        source, stride, origin[0], origin[1], origin[2]
    )
}

/// One horizontal tile of the padded grids, with matching blocks at both resolutions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChunkTile {
    /// Tile position along axes 0 and 2.
    pub tile: (usize, usize),
    /// First high-res voxel of the tile.
    pub highres_origin: [usize; 3],
    /// High-res block size.
    pub highres_extent: Shape3,
    /// First low-res voxel of the tile.
    pub lowres_origin: [usize; 3],
    /// Low-res block size.
    pub lowres_extent: Shape3,
}

/// Padded shapes and chunk strides for a high-res grid and its low-res partner.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChunkLayout {
    /// Padded high-res shape; every axis is a multiple of `highres_stride`.
    pub highres_shape: Shape3,
    /// Padded low-res shape (`highres_shape / ratio`).
    pub lowres_shape: Shape3,
    /// Horizontal chunk extent in high-res voxels.
    pub highres_stride: usize,
    /// Horizontal chunk extent in low-res voxels.
    pub lowres_stride: usize,
    /// `highres_stride / lowres_stride`.
    pub ratio: usize,
}

impl ChunkLayout {
    /// Compute the layout for a high-res grid of the given (unpadded) shape.
    ///
    /// # Errors
    /// Returns `InvalidResolution` if the configuration is invalid.
    pub fn new(highres_shape: Shape3, config: &ResolutionConfig) -> Result<Self> {
        config.validate()?;
        let ratio = config.ratio()?;
        let highres_stride = config.highres_chunk_dim();
        let padded = padded_shape(highres_shape, highres_stride);

        Ok(Self {
            highres_shape: padded,
            lowres_shape: lowres_shape(padded, ratio),
            highres_stride,
            lowres_stride: highres_stride / ratio,
            ratio,
        })
    }

    /// Number of tiles along axes 0 and 2.
    #[inline]
    pub fn tile_counts(&self) -> (usize, usize) {
        (
            self.highres_shape[0] / self.highres_stride,
            self.highres_shape[2] / self.highres_stride,
        )
    }

    /// Total number of tiles.
    #[inline]
    pub fn tile_count(&self) -> usize {
        let (nx, nz) = self.tile_counts();
        nx * nz
    }

    /// Tiles in x-major order.
    pub fn tiles(&self) -> impl Iterator<Item = ChunkTile> + '_ {
        let (nx, nz) = self.tile_counts();
        (0..nx).flat_map(move |i| (0..nz).map(move |k| self.tile(i, k)))
    }

    /// Tile at position (i, k). Does not check that the position is inside the grid.
    pub fn tile(&self, i: usize, k: usize) -> ChunkTile {
        let hs = self.highres_stride;
        let ls = self.lowres_stride;
        ChunkTile {
            tile: (i, k),
            highres_origin: [i * hs, 0, k * hs],
            highres_extent: [hs, self.highres_shape[1], hs],
            lowres_origin: [i * ls, 0, k * ls],
            lowres_extent: [ls, self.lowres_shape[1], ls],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_padded_shape_next_multiple() {
        assert_eq!(padded_shape([70, 40, 70], 64), [128, 64, 128]);
        assert_eq!(padded_shape([64, 64, 64], 64), [64, 64, 64]);
        assert_eq!(padded_shape([0, 1, 65], 64), [0, 64, 128]);
    }

    #[test]
    fn test_lowres_shape() {
        assert_eq!(lowres_shape([128, 64, 128], 4), [32, 16, 32]);
    }

    #[test]
    fn test_layout_70_40_70() {
        let layout = ChunkLayout::new([70, 40, 70], &ResolutionConfig::default()).unwrap();
        assert_eq!(layout.highres_shape, [128, 64, 128]);
        assert_eq!(layout.lowres_shape, [32, 16, 32]);
        assert_eq!(layout.tile_counts(), (2, 2));
        assert_eq!(layout.tile_count(), 4);

        let tiles: Vec<_> = layout.tiles().collect();
        assert_eq!(tiles.len(), 4);
        assert_eq!(tiles[1].tile, (0, 1));
        assert_eq!(tiles[1].highres_origin, [0, 0, 64]);
        assert_eq!(tiles[1].lowres_origin, [0, 0, 16]);
        assert_eq!(tiles[3].highres_extent, [64, 64, 64]);
        assert_eq!(tiles[3].lowres_extent, [16, 16, 16]);
    }

    #[test]
    fn test_tall_grid_keeps_full_height() {
        let layout = ChunkLayout::new([64, 130, 64], &ResolutionConfig::default()).unwrap();
        assert_eq!(layout.highres_shape, [64, 192, 64]);
        assert_eq!(layout.tile_count(), 1);
        let tile = layout.tile(0, 0);
        assert_eq!(tile.highres_extent, [64, 192, 64]);
        assert_eq!(tile.lowres_extent, [16, 48, 16]);
    }

    #[test]
    fn test_empty_grid_has_no_tiles() {
        let layout = ChunkLayout::new([0, 0, 0], &ResolutionConfig::default()).unwrap();
        assert_eq!(layout.tile_count(), 0);
        assert_eq!(layout.tiles().count(), 0);
    }

    #[test]
    fn test_chunk_name() {
        assert_eq!(
            chunk_name("scene0__room1", 64, [128, 0, 64]),
            "scene0__room1__64__128_000_064"
        );
        assert_eq!(chunk_name("r", 8, [0, 0, 0]), "r__08__000_000_000");
    }
}

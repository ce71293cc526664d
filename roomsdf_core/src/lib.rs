//! # roomsdf_core
//!
//! Pure grid math for preparing chunked distance-field training data.
//!
//! This crate holds everything that does not touch the filesystem or spawn
//! processes: the dense grid container, the fixed resolution constants, the
//! padding and chunk layout that keeps low- and high-resolution chunks aligned,
//! index-field color decoding and preview mesh extraction.
//!
//! ## Modules
//!
//! - [`grid`]: `DenseGrid<T>`, a row-major 3D array with padding and slicing
//! - [`config`]: `ResolutionConfig` (grid dims, ratio, voxel sizes, padding)
//! - [`layout`]: padded shapes, `ChunkLayout` tiling and chunk naming
//! - [`color`]: packed label to RGB decoding
//! - [`mesh`]: isosurface and voxel-box preview meshes
//! - [`error`]: error types
//!
//! ## Usage
//!
//! ```ignore
//! use roomsdf_core::prelude::*;
//!
//! let config = ResolutionConfig::default();
//! let field = DenseGrid::filled([70, 40, 70], 1.0f32);
//!
//! let layout = ChunkLayout::new(field.shape(), &config)?;
//! let padded = field.padded(layout.highres_shape, field.max_value().unwrap_or(0.0))?;
//!
//! for tile in layout.tiles() {
//!     let block = padded.slice(tile.highres_origin, tile.highres_extent)?;
//!     let name = chunk_name("scene__room", layout.highres_stride, tile.highres_origin);
//! }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod color;
pub mod config;
pub mod error;
pub mod grid;
pub mod layout;
pub mod mesh;

/// Prelude module for convenient imports.
pub mod prelude {
    pub use crate::color::{decode_index_color, decode_index_field, encode_index_color};
    pub use crate::config::ResolutionConfig;
    pub use crate::error::CoreError;
    pub use crate::grid::{shape_len, DenseGrid, Shape3};
    pub use crate::layout::{chunk_name, lowres_shape, padded_shape, ChunkLayout, ChunkTile};
    pub use crate::mesh::{extract_isosurface, voxel_boxes, TriangleMesh};
}

pub use color::{decode_index_color, decode_index_field, encode_index_color};
pub use config::ResolutionConfig;
pub use error::{CoreError, Result};
pub use grid::{shape_len, DenseGrid, Shape3};
pub use layout::{chunk_name, lowres_shape, padded_shape, ChunkLayout, ChunkTile};
pub use mesh::{extract_isosurface, voxel_boxes, TriangleMesh};

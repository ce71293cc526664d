//! roomsdf_io - array and mesh I/O for chunked distance fields.
//!
//! This crate is the storage layer of the roomsdf workspace: it reads the
//! `.npy` arrays produced by the external field generator, writes chunk
//! arrays in the same format, and exports preview meshes as OBJ.
//!
//! # Core Types
//!
//! - [`NpyHeader`] / [`Dtype`]: `.npy` preamble and element type
//! - [`NpyElement`]: element types a grid can be loaded as or saved from
//! - [`ObjExportConfig`] / [`MeshStats`]: OBJ export options and results
//!
//! # Example
//!
//! ```ignore
//! use roomsdf_core::DenseGrid;
//! use roomsdf_io::{load_from_file, save_to_file};
//!
//! let field: DenseGrid<f32> = load_from_file("df_lowres/scene0__room1.npy")?;
//! let labels: DenseGrid<i32> = load_from_file("df_highres/scene0__room1_if.npy")?;
//! save_to_file(&field.abs(), "chunk.npy")?;
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod convert;
pub mod error;
pub mod format;

pub use roomsdf_core::{DenseGrid, Shape3, TriangleMesh};

pub use error::{Result, RoomSdfIoError};

pub use format::{
    load_from_file, read_array, save_to_file, write_array, ByteOrder, Dtype, NpyElement,
    NpyHeader, Scalar, ScalarKind, HEADER_ALIGN, NPY_MAGIC,
};

pub use convert::{export_obj, export_obj_to_file, MeshStats, ObjExportConfig};

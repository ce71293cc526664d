//! NumPy `.npy` format support.
//!
//! Distance fields, index fields and chunks all travel through this format,
//! the same one the external field generator writes.
//!
//! # Example
//!
//! ```ignore
//! use roomsdf_io::{load_from_file, save_to_file};
//! use roomsdf_core::DenseGrid;
//!
//! let field: DenseGrid<f32> = load_from_file("df_highres/scene0__room1.npy")?;
//! save_to_file(&field.abs(), "unsigned.npy")?;
//! ```

pub mod header;
pub mod npy;

pub use header::{ByteOrder, Dtype, NpyHeader, ScalarKind, HEADER_ALIGN, NPY_MAGIC};
pub use npy::{load_from_file, read_array, save_to_file, write_array, NpyElement, Scalar};

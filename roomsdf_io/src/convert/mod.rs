//! Format conversion utilities.
//!
//! This module provides export of preview meshes to Wavefront OBJ.

pub mod obj;

pub use obj::{export_obj, export_obj_to_file, MeshStats, ObjExportConfig};

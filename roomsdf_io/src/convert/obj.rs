//! OBJ export for preview meshes.
//!
//! Writes `v x y z` lines (with `r g b` appended when the mesh is colored)
//! followed by 1-based `f a b c` lines.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use roomsdf_core::TriangleMesh;

use crate::error::Result;

/// Configuration for OBJ export.
#[derive(Debug, Clone)]
pub struct ObjExportConfig {
    /// Factor applied to every vertex position (default: 1.0, voxel units).
    pub scale: f32,
    /// Write per-vertex colors when the mesh has them (default: true).
    pub write_colors: bool,
}

impl Default for ObjExportConfig {
    fn default() -> Self {
        Self {
            scale: 1.0,
            write_colors: true,
        }
    }
}

/// Mesh statistics returned by export functions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MeshStats {
    /// Number of vertices written.
    pub vertex_count: usize,
    /// Number of triangles written.
    pub triangle_count: usize,
}

/// Export a mesh as OBJ.
///
/// # Example
///
/// ```ignore
/// use roomsdf_io::{export_obj, ObjExportConfig};
///
/// let mesh = roomsdf_core::voxel_boxes(&field, 0.1);
/// let mut file = std::fs::File::create("preview.obj")?;
/// export_obj(&mesh, &mut file, &ObjExportConfig::default())?;
/// ```
pub fn export_obj<W: Write>(
    mesh: &TriangleMesh,
    writer: &mut W,
    config: &ObjExportConfig,
) -> Result<MeshStats> {
    writeln!(writer, "# roomsdf OBJ export")?;
    writeln!(writer, "# {} vertices", mesh.vertex_count())?;
    writeln!(writer, "# {} faces", mesh.triangle_count())?;

    let colored = config.write_colors && mesh.has_colors();
    let s = config.scale;
    for (i, p) in mesh.positions.iter().enumerate() {
        if colored {
            let c = mesh.colors[i];
            writeln!(
                writer,
                "v {} {} {} {} {} {}",
                p[0] * s,
                p[1] * s,
                p[2] * s,
                c[0],
                c[1],
                c[2]
            )?;
        } else {
            writeln!(writer, "v {} {} {}", p[0] * s, p[1] * s, p[2] * s)?;
        }
    }

    for t in &mesh.triangles {
        // OBJ uses 1-based indexing
        writeln!(writer, "f {} {} {}", t[0] + 1, t[1] + 1, t[2] + 1)?;
    }

    Ok(MeshStats {
        vertex_count: mesh.vertex_count(),
        triangle_count: mesh.triangle_count(),
    })
}

/// Export a mesh to an OBJ file.
pub fn export_obj_to_file<P: AsRef<Path>>(
    mesh: &TriangleMesh,
    path: P,
    config: &ObjExportConfig,
) -> Result<MeshStats> {
    let mut writer = BufWriter::new(File::create(path)?);
    let stats = export_obj(mesh, &mut writer, config)?;
    writer.flush()?;
    Ok(stats)
}

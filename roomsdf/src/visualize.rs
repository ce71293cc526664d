//! Preview meshes for human inspection of fields and chunks.
//!
//! Previews are written next to their arrays as `<prefix>_vis.obj` and are
//! never read back by the pipeline.

use std::path::Path;

use log::{debug, warn};
use roomsdf_core::{extract_isosurface, voxel_boxes, DenseGrid, ResolutionConfig, TriangleMesh};
use roomsdf_io::{export_obj_to_file, load_from_file, MeshStats, ObjExportConfig};

use crate::error::{PipelineError, Result};
use crate::generator::{with_suffix, FieldArtifacts};

/// Isosurface of a high-res field at three quarters of a voxel, colored by `labels`.
pub fn highres_preview(
    field: &DenseGrid<f32>,
    labels: Option<&DenseGrid<i32>>,
    config: &ResolutionConfig,
) -> TriangleMesh {
    let iso = (config.voxel_size_highres() * 0.75) as f32;
    extract_isosurface(&field.abs(), iso, labels)
}

/// Unit boxes for every low-res voxel within half a voxel of a surface.
pub fn lowres_preview(field: &DenseGrid<f32>, config: &ResolutionConfig) -> TriangleMesh {
    let threshold = (config.voxel_size_lowres() * 0.5) as f32;
    voxel_boxes(&field.abs(), threshold)
}

/// Write `mesh` to `<prefix>_vis.obj`. Empty meshes are skipped and yield `None`.
pub fn write_preview(mesh: &TriangleMesh, prefix: &Path) -> Result<Option<MeshStats>> {
    let path = with_suffix(prefix, "_vis.obj");
    if mesh.is_empty() {
        warn!("no surface for {}, skipping preview", path.display());
        return Ok(None);
    }
    let stats = export_obj_to_file(mesh, &path, &ObjExportConfig::default())
        .map_err(PipelineError::array(&path))?;
    debug!(
        "wrote {} ({} triangles)",
        path.display(),
        stats.triangle_count
    );
    Ok(Some(stats))
}

/// Preview the high-res field (and its index field) stored under `prefix`.
pub fn visualize_highres(prefix: &Path, config: &ResolutionConfig) -> Result<Option<MeshStats>> {
    let artifacts = FieldArtifacts::for_prefix(prefix);
    let field: DenseGrid<f32> =
        load_from_file(&artifacts.distance).map_err(PipelineError::array(&artifacts.distance))?;
    let labels: DenseGrid<i32> =
        load_from_file(&artifacts.index).map_err(PipelineError::array(&artifacts.index))?;
    write_preview(&highres_preview(&field, Some(&labels), config), prefix)
}

/// Preview the low-res field stored under `prefix`.
pub fn visualize_lowres(prefix: &Path, config: &ResolutionConfig) -> Result<Option<MeshStats>> {
    let path = with_suffix(prefix, ".npy");
    let field: DenseGrid<f32> = load_from_file(&path).map_err(PipelineError::array(&path))?;
    write_preview(&lowres_preview(&field, config), prefix)
}

//! Preview mesh extraction from distance fields.
//!
//! Two flavours, both in voxel index units (vertex `[x, y, z]` lies at array
//! index `[x, y, z]`):
//!
//! - [`extract_isosurface`]: surface nets over `field - iso_value`, optionally
//!   colored from an index field.
//! - [`voxel_boxes`]: one unit cube per voxel at or below a threshold.

use fast_surface_nets::ndshape::RuntimeShape;
use fast_surface_nets::{surface_nets, SurfaceNetsBuffer};

use crate::color::decode_index_color;
use crate::grid::DenseGrid;

/// Indexed triangle mesh with optional per-vertex colors.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TriangleMesh {
    /// Vertex positions.
    pub positions: Vec<[f32; 3]>,
    /// Per-vertex RGB in `[0, 1]`; empty when the mesh is uncolored.
    pub colors: Vec<[f32; 3]>,
    /// Zero-based vertex indices, counter-clockwise seen from outside.
    pub triangles: Vec<[u32; 3]>,
}

impl TriangleMesh {
    /// Number of vertices.
    #[inline]
    pub fn vertex_count(&self) -> usize {
        self.positions.len()
    }

    /// Number of triangles.
    #[inline]
    pub fn triangle_count(&self) -> usize {
        self.triangles.len()
    }

    /// True when the mesh has no triangles.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.triangles.is_empty()
    }

    /// True when every vertex carries a color.
    #[inline]
    pub fn has_colors(&self) -> bool {
        !self.colors.is_empty() && self.colors.len() == self.positions.len()
    }
}

/// Extract the level set `field == iso_value` as a triangle mesh.
///
/// The field is extended by one voxel on every side, replicating its edge
/// values, so surfaces that run into the grid boundary are kept and end on it.
/// Vertices are clamped to the grid bounds.
///
/// When `labels` is given, each vertex takes the decoded color of the label at
/// the voxel its surface-nets cell starts from.
pub fn extract_isosurface(
    field: &DenseGrid<f32>,
    iso_value: f32,
    labels: Option<&DenseGrid<i32>>,
) -> TriangleMesh {
    if field.is_empty() {
        return TriangleMesh::default();
    }
    let [sx, sy, sz] = field.shape();
    let [px, py, pz] = [sx + 2, sy + 2, sz + 2];

    // Padded index to the nearest source index.
    let inner = |i: usize, len: usize| i.saturating_sub(1).min(len - 1);

    // ndshape linearizes with its first axis fastest, so the row-major grid is
    // handed over with its axes reversed.
    let shape = RuntimeShape::<u32, 3>::new([pz as u32, py as u32, px as u32]);
    let values = field.as_slice();
    let mut sdf = Vec::with_capacity(px * py * pz);
    for x in 0..px {
        for y in 0..py {
            for z in 0..pz {
                let source = field.offset([inner(x, sx), inner(y, sy), inner(z, sz)]);
                sdf.push(values[source] - iso_value);
            }
        }
    }

    let mut buffer = SurfaceNetsBuffer::default();
    surface_nets(
        &sdf,
        &shape,
        [0; 3],
        [pz as u32 - 1, py as u32 - 1, px as u32 - 1],
        &mut buffer,
    );

    let bound = |v: f32, len: usize| (v - 1.0).clamp(0.0, (len - 1) as f32);
    let positions = buffer
        .positions
        .iter()
        .map(|p| [bound(p[2], sx), bound(p[1], sy), bound(p[0], sz)])
        .collect();

    let colors = match labels {
        Some(labels) => buffer
            .surface_points
            .iter()
            .map(|p| {
                labels
                    .get([
                        inner(p[2] as usize, sx),
                        inner(p[1] as usize, sy),
                        inner(p[0] as usize, sz),
                    ])
                    .map(|label| decode_index_color(label as i64))
                    .unwrap_or([0.0; 3])
            })
            .collect(),
        None => Vec::new(),
    };

    // Reversing the axes mirrors the mesh, so flip the winding back.
    let triangles = buffer
        .indices
        .chunks_exact(3)
        .map(|t| [t[0], t[2], t[1]])
        .collect();

    TriangleMesh {
        positions,
        colors,
        triangles,
    }
}

const BOX_TRIANGLES: [[u32; 3]; 12] = [
    [0, 4, 6],
    [0, 6, 2],
    [1, 3, 7],
    [1, 7, 5],
    [0, 1, 5],
    [0, 5, 4],
    [2, 6, 7],
    [2, 7, 3],
    [0, 2, 3],
    [0, 3, 1],
    [4, 5, 7],
    [4, 7, 6],
];

/// One unit cube centered on every voxel whose value is `<= threshold`.
pub fn voxel_boxes(field: &DenseGrid<f32>, threshold: f32) -> TriangleMesh {
    let mut mesh = TriangleMesh::default();
    let [sx, sy, sz] = field.shape();

    for x in 0..sx {
        for y in 0..sy {
            for z in 0..sz {
                match field.get([x, y, z]) {
                    Some(v) if v <= threshold => {}
                    _ => continue,
                }

                let base = mesh.positions.len() as u32;
                let center = [x as f32, y as f32, z as f32];
                for corner in 0..8u32 {
                    mesh.positions.push([
                        center[0] + (corner & 1) as f32 - 0.5,
                        center[1] + ((corner >> 1) & 1) as f32 - 0.5,
                        center[2] + ((corner >> 2) & 1) as f32 - 0.5,
                    ]);
                }
                for tri in BOX_TRIANGLES {
                    mesh.triangles
                        .push([base + tri[0], base + tri[1], base + tri[2]]);
                }
            }
        }
    }

    mesh
}

#[cfg(test)]
mod tests {
    use super::*;

    fn shell_field(n: usize, radius: f32) -> DenseGrid<f32> {
        let c = (n as f32 - 1.0) * 0.5;
        DenseGrid::from_fn([n, n, n], |[x, y, z]| {
            let dx = x as f32 - c;
            let dy = y as f32 - c;
            let dz = z as f32 - c;
            ((dx * dx + dy * dy + dz * dz).sqrt() - radius).abs()
        })
    }

    #[test]
    fn test_isosurface_of_shell() {
        let field = shell_field(16, 5.0);
        let mesh = extract_isosurface(&field, 0.75, None);

        assert!(!mesh.is_empty(), "shell should produce triangles");
        assert!(!mesh.has_colors());
        for tri in &mesh.triangles {
            for &i in tri {
                assert!((i as usize) < mesh.vertex_count());
            }
        }
        for p in &mesh.positions {
            for axis in 0..3 {
                assert!(p[axis] >= 0.0 && p[axis] <= 15.0, "vertex {:?} outside grid", p);
            }
        }
    }

    #[test]
    fn test_isosurface_colors_follow_labels() {
        let field = shell_field(12, 3.0);
        let labels = DenseGrid::filled([12, 12, 12], 255i32);
        let mesh = extract_isosurface(&field, 0.75, Some(&labels));

        assert!(mesh.has_colors());
        assert!(mesh.colors.iter().all(|&c| c == [1.0, 0.0, 0.0]));
    }

    #[test]
    fn test_isosurface_of_flat_field_is_empty() {
        let field = DenseGrid::filled([8, 8, 8], 1.0f32);
        assert!(extract_isosurface(&field, 0.5, None).is_empty());

        let thin = DenseGrid::filled([1, 8, 8], 0.0f32);
        assert!(extract_isosurface(&thin, 0.5, None).is_empty());

        let empty = DenseGrid::filled([0, 8, 8], 0.0f32);
        assert!(extract_isosurface(&empty, 0.5, None).is_empty());
    }

    #[test]
    fn test_isosurface_at_grid_corner() {
        // only the origin voxel is inside
        let field = DenseGrid::from_fn([6, 6, 6], |[x, y, z]| (x + y + z) as f32 - 0.5);
        let labels = DenseGrid::filled([6, 6, 6], 255 << 8);
        let mesh = extract_isosurface(&field, 0.0, Some(&labels));

        assert!(!mesh.is_empty());
        assert!(mesh.colors.iter().all(|&c| c == [0.0, 1.0, 0.0]));
        for p in &mesh.positions {
            assert!(p.iter().all(|&v| (0.0..=1.0).contains(&v)), "vertex {:?}", p);
        }
    }

    #[test]
    fn test_isosurface_reaches_grid_boundary() {
        let field = DenseGrid::from_fn([4, 6, 5], |[_, y, _]| y as f32 - 2.5);
        let mesh = extract_isosurface(&field, 0.0, None);

        assert!(mesh.triangle_count() > 0);
        let (min, max) = mesh.positions.iter().fold(
            ([f32::MAX; 3], [f32::MIN; 3]),
            |(lo, hi), p| {
                (
                    [lo[0].min(p[0]), lo[1].min(p[1]), lo[2].min(p[2])],
                    [hi[0].max(p[0]), hi[1].max(p[1]), hi[2].max(p[2])],
                )
            },
        );
        assert_eq!([min[0], min[2]], [0.0, 0.0]);
        assert_eq!([max[0], max[2]], [3.0, 4.0]);
        assert!((min[1] - 2.5).abs() < 1e-5 && (max[1] - 2.5).abs() < 1e-5);
    }

    #[test]
    fn test_voxel_boxes() {
        let mut field = DenseGrid::filled([3, 3, 3], 1.0f32);
        field.set([1, 2, 0], 0.1);
        field.set([2, 2, 2], 0.2);

        let mesh = voxel_boxes(&field, 0.15);
        assert_eq!(mesh.vertex_count(), 8);
        assert_eq!(mesh.triangle_count(), 12);

        let min = mesh.positions.iter().fold([f32::MAX; 3], |m, p| {
            [m[0].min(p[0]), m[1].min(p[1]), m[2].min(p[2])]
        });
        assert_eq!(min, [0.5, 1.5, -0.5]);

        assert!(voxel_boxes(&field, 0.0).is_empty());
        assert_eq!(voxel_boxes(&field, 0.5).triangle_count(), 24);
    }

    #[test]
    fn test_box_faces_point_outward() {
        let field = DenseGrid::filled([1, 1, 1], 0.0f32);
        let mesh = voxel_boxes(&field, 0.0);

        for tri in &mesh.triangles {
            let [a, b, c] = tri.map(|i| mesh.positions[i as usize]);
            let e1 = [b[0] - a[0], b[1] - a[1], b[2] - a[2]];
            let e2 = [c[0] - a[0], c[1] - a[1], c[2] - a[2]];
            let n = [
                e1[1] * e2[2] - e1[2] * e2[1],
                e1[2] * e2[0] - e1[0] * e2[2],
                e1[0] * e2[1] - e1[1] * e2[0],
            ];
            let centroid = [
                (a[0] + b[0] + c[0]) / 3.0,
                (a[1] + b[1] + c[1]) / 3.0,
                (a[2] + b[2] + c[2]) / 3.0,
            ];
            let dot = n[0] * centroid[0] + n[1] * centroid[1] + n[2] * centroid[2];
            assert!(dot > 0.0, "triangle {:?} faces inward", tri);
        }
    }
}

//! Box geometry (rectangular cuboid).

use super::MeshBuffer;
use crate::math::{Vector2, Vector3};
use serde::{Deserialize, Serialize};

/// A box (rectangular cuboid) centered on the origin.
///
/// Each face is an independent grid with its own vertices, so normals and
/// UVs stay sharp at the edges. Faces are emitted in the order +X, -X, +Y,
/// -Y, +Z, -Z and each gets its own material group (0 to 5).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BoxGeometry {
    /// Width (X axis).
    pub width: f32,
    /// Height (Y axis).
    pub height: f32,
    /// Depth (Z axis).
    pub depth: f32,
    /// Width segments.
    pub width_segments: u32,
    /// Height segments.
    pub height_segments: u32,
    /// Depth segments.
    pub depth_segments: u32,
}

impl Default for BoxGeometry {
    fn default() -> Self {
        Self::new(1.0, 1.0, 1.0)
    }
}

/// One face of the box: which position components the grid's u/v axes map
/// to, their directions, and the face extents.
struct Face {
    u: usize,
    v: usize,
    w: usize,
    u_dir: f32,
    v_dir: f32,
    width: f32,
    height: f32,
    depth: f32,
    grid_x: u32,
    grid_y: u32,
}

impl BoxGeometry {
    /// Create a new box geometry with one segment per side.
    pub fn new(width: f32, height: f32, depth: f32) -> Self {
        Self {
            width,
            height,
            depth,
            width_segments: 1,
            height_segments: 1,
            depth_segments: 1,
        }
    }

    /// Set the segment counts, clamped to at least one.
    pub fn with_segments(mut self, width_segments: u32, height_segments: u32, depth_segments: u32) -> Self {
        self.width_segments = width_segments;
        self.height_segments = height_segments;
        self.depth_segments = depth_segments;
        self
    }

    fn segments(&self) -> (u32, u32, u32) {
        (
            self.width_segments.max(1),
            self.height_segments.max(1),
            self.depth_segments.max(1),
        )
    }

    /// Number of vertices [`build`](Self::build) produces.
    pub fn vertex_count(&self) -> usize {
        let (w, h, d) = self.segments();
        let (w, h, d) = (w as usize + 1, h as usize + 1, d as usize + 1);
        2 * (d * h + w * d + w * h)
    }

    /// Number of indices [`build`](Self::build) produces.
    pub fn index_count(&self) -> usize {
        let (w, h, d) = self.segments();
        let (w, h, d) = (w as usize, h as usize, d as usize);
        12 * (d * h + w * d + w * h)
    }

    /// Build the mesh.
    pub fn build(&self) -> MeshBuffer {
        let (ws, hs, ds) = self.segments();
        let (w, h, d) = (self.width, self.height, self.depth);
        let face = |u, v, w_axis, u_dir, v_dir, width, height, depth, grid_x, grid_y| Face {
            u,
            v,
            w: w_axis,
            u_dir,
            v_dir,
            width,
            height,
            depth,
            grid_x,
            grid_y,
        };

        let faces = [
            face(2, 1, 0, -1.0, -1.0, d, h, w, ds, hs),  // px
            face(2, 1, 0, 1.0, -1.0, d, h, -w, ds, hs),  // nx
            face(0, 2, 1, 1.0, 1.0, w, d, h, ws, ds),    // py
            face(0, 2, 1, 1.0, -1.0, w, d, -h, ws, ds),  // ny
            face(0, 1, 2, 1.0, -1.0, w, h, d, ws, hs),   // pz
            face(0, 1, 2, -1.0, -1.0, w, h, -d, ws, hs), // nz
        ];

        let mut mesh = MeshBuffer::with_capacity(self.vertex_count(), self.index_count());
        for (material_index, f) in faces.iter().enumerate() {
            Self::build_plane(&mut mesh, f, material_index);
        }

        debug_assert_eq!(mesh.vertex_count(), self.vertex_count());
        debug_assert_eq!(mesh.index_count(), self.index_count());
        log::debug!(
            "BoxGeometry: {} vertices, {} indices",
            mesh.vertex_count(),
            mesh.index_count()
        );
        mesh
    }

    fn build_plane(mesh: &mut MeshBuffer, face: &Face, material_index: usize) {
        let segment_width = face.width / face.grid_x as f32;
        let segment_height = face.height / face.grid_y as f32;
        let half_width = face.width / 2.0;
        let half_height = face.height / 2.0;
        let half_depth = face.depth / 2.0;

        let mut normal = Vector3::ZERO;
        normal[face.w] = if face.depth > 0.0 { 1.0 } else { -1.0 };

        let vertex_offset = mesh.vertex_count() as u32;
        let group_start = mesh.index_count();

        for iy in 0..=face.grid_y {
            let y = iy as f32 * segment_height - half_height;

            for ix in 0..=face.grid_x {
                let x = ix as f32 * segment_width - half_width;

                let mut position = Vector3::ZERO;
                position[face.u] = x * face.u_dir;
                position[face.v] = y * face.v_dir;
                position[face.w] = half_depth;

                let uv = Vector2::new(
                    ix as f32 / face.grid_x as f32,
                    1.0 - iy as f32 / face.grid_y as f32,
                );

                mesh.push_vertex(position, normal, uv);
            }
        }

        let row = face.grid_x + 1;
        for iy in 0..face.grid_y {
            for ix in 0..face.grid_x {
                let a = vertex_offset + ix + row * iy;
                let b = vertex_offset + ix + row * (iy + 1);
                let c = vertex_offset + (ix + 1) + row * (iy + 1);
                let d = vertex_offset + (ix + 1) + row * iy;

                mesh.push_triangle(a, b, d);
                mesh.push_triangle(b, c, d);
            }
        }

        mesh.add_group(group_start, mesh.index_count() - group_start, material_index);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unit_box_counts() {
        let mesh = BoxGeometry::new(2.0, 2.0, 2.0).build();
        assert_eq!(mesh.vertex_count(), 24);
        assert_eq!(mesh.index_count(), 36);
        assert_eq!(mesh.groups.len(), 6);
        for (i, group) in mesh.groups.iter().enumerate() {
            assert_eq!(group.count, 6);
            assert_eq!(group.material_index, i);
        }
        assert!(mesh.validate().is_ok());
    }

    #[test]
    fn test_faces_point_outward() {
        let mesh = BoxGeometry::new(2.0, 4.0, 6.0).build();
        for i in 0..mesh.vertex_count() {
            let p = mesh.position(i);
            let n = mesh.normal(i);
            // The normal axis is the one where the vertex sits on the face.
            let along = p.dot(&n);
            assert!(along > 0.0, "vertex {i}: {p:?} {n:?}");
        }
        let bbox = mesh.compute_bounding_box();
        assert_eq!(bbox.max, Vector3::new(1.0, 2.0, 3.0));
    }

    #[test]
    fn test_winding_matches_normals() {
        let mesh = BoxGeometry::new(1.0, 1.0, 1.0).with_segments(2, 3, 1).build();
        for t in 0..mesh.triangle_count() {
            let tri = mesh.triangle(t);
            let a = mesh.indices[t * 3] as usize;
            assert!(tri.normal().dot(&mesh.normal(a)) > 0.99);
        }
    }

    #[test]
    fn test_segment_counts() {
        let geometry = BoxGeometry::new(1.0, 1.0, 1.0).with_segments(2, 3, 4);
        let mesh = geometry.build();
        assert_eq!(mesh.vertex_count(), 2 * (5 * 4 + 3 * 5 + 3 * 4));
        assert_eq!(mesh.index_count(), 12 * (4 * 3 + 2 * 4 + 2 * 3));
        assert!(mesh.validate().is_ok());
    }

    #[test]
    fn test_zero_segments_clamped() {
        let mesh = BoxGeometry::new(1.0, 1.0, 1.0).with_segments(0, 0, 0).build();
        assert_eq!(mesh.vertex_count(), 24);
    }
}

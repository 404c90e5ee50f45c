//! Feature-edge extraction.

use super::{LineBuffer, MeshBuffer};
use crate::math::{Triangle, Vector3};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Positions closer than this are merged before edges are keyed.
const MERGE_PRECISION: f32 = 1e-4;

/// Extracts the edges of a mesh that are worth drawing: boundary edges and
/// edges whose two faces meet at an angle of at least `threshold_angle`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EdgesGeometry {
    /// Crease angle in degrees.
    pub threshold_angle: f32,
}

impl Default for EdgesGeometry {
    fn default() -> Self {
        Self::new(1.0)
    }
}

struct EdgeRecord {
    start: u32,
    end: u32,
    face1: usize,
    face2: Option<usize>,
}

impl EdgesGeometry {
    /// Create an extractor with the given crease angle in degrees.
    pub fn new(threshold_angle: f32) -> Self {
        Self { threshold_angle }
    }

    /// Extract edges from `mesh`.
    ///
    /// Vertices sharing a position are welded first and faces that collapse
    /// onto fewer than three vertices are dropped. An edge shared by more than
    /// two faces is judged by its first and last face.
    pub fn build(&self, mesh: &MeshBuffer) -> LineBuffer {
        let (positions, remap) = weld(mesh);

        let mut normals = Vec::with_capacity(mesh.triangle_count());
        let mut edges: Vec<EdgeRecord> = Vec::new();
        let mut lookup: HashMap<(u32, u32), usize> = HashMap::new();

        for [a, b, c] in mesh.triangles() {
            let face = [remap[a as usize], remap[b as usize], remap[c as usize]];
            if face[0] == face[1] || face[1] == face[2] || face[2] == face[0] {
                continue;
            }

            let face_index = normals.len();
            let triangle = Triangle::new(
                positions[face[0] as usize],
                positions[face[1] as usize],
                positions[face[2] as usize],
            );
            normals.push(triangle.normal());

            for k in 0..3 {
                let (i, j) = (face[k], face[(k + 1) % 3]);
                let key = (i.min(j), i.max(j));
                match lookup.get(&key) {
                    Some(&slot) => edges[slot].face2 = Some(face_index),
                    None => {
                        lookup.insert(key, edges.len());
                        edges.push(EdgeRecord {
                            start: key.0,
                            end: key.1,
                            face1: face_index,
                            face2: None,
                        });
                    }
                }
            }
        }

        let threshold_dot = self.threshold_angle.to_radians().cos();
        let mut lines = LineBuffer::with_capacity(edges.len());
        for edge in &edges {
            let keep = match edge.face2 {
                None => true,
                Some(face2) => normals[edge.face1].dot(&normals[face2]) <= threshold_dot,
            };
            if keep {
                lines.push_segment(&positions[edge.start as usize], &positions[edge.end as usize]);
            }
        }

        log::debug!(
            "EdgesGeometry: {} of {} edges kept",
            lines.segment_count(),
            edges.len()
        );
        lines
    }
}

/// Unique positions and a map from each mesh vertex to its welded index.
fn weld(mesh: &MeshBuffer) -> (Vec<Vector3>, Vec<u32>) {
    let scale = 1.0 / MERGE_PRECISION;
    let mut unique: Vec<Vector3> = Vec::new();
    let mut seen: HashMap<[i64; 3], u32> = HashMap::new();

    let remap = (0..mesh.vertex_count())
        .map(|i| {
            let p = mesh.position(i);
            let key = [
                (p.x * scale).round() as i64,
                (p.y * scale).round() as i64,
                (p.z * scale).round() as i64,
            ];
            *seen.entry(key).or_insert_with(|| {
                unique.push(p);
                (unique.len() - 1) as u32
            })
        })
        .collect();

    (unique, remap)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::BoxGeometry;
    use crate::math::Vector2;

    fn vertex_list() -> Vec<Vector3> {
        vec![
            Vector3::new(0.0, 0.0, 0.0),
            Vector3::new(1.0, 0.0, 0.0),
            Vector3::new(1.0, 1.0, 0.0),
            Vector3::new(0.0, 1.0, 0.0),
            Vector3::new(1.0, 1.0, 1.0),
        ]
    }

    fn mesh_from(vertices: &[Vector3], indices: &[u32]) -> MeshBuffer {
        let mut mesh = MeshBuffer::new();
        for v in vertices {
            mesh.push_vertex(*v, Vector3::UNIT_Z, Vector2::ZERO);
        }
        for face in indices.chunks_exact(3) {
            mesh.push_triangle(face[0], face[1], face[2]);
        }
        mesh
    }

    fn count(indices: &[u32]) -> usize {
        let mesh = mesh_from(&vertex_list(), indices);
        EdgesGeometry::default().build(&mesh).segment_count()
    }

    #[test]
    fn test_degenerate_faces_dropped() {
        assert_eq!(count(&[1, 1, 1]), 0);
        assert_eq!(count(&[0, 0, 1]), 0);
    }

    #[test]
    fn test_single_triangle() {
        assert_eq!(count(&[0, 1, 2]), 3);
    }

    #[test]
    fn test_two_triangles() {
        assert_eq!(count(&[0, 1, 2, 0, 2, 3]), 4);
        // Opposite normals make a crease.
        assert_eq!(count(&[0, 1, 2, 0, 3, 2]), 5);
        assert_eq!(count(&[0, 1, 2, 0, 4, 2]), 5);
    }

    #[test]
    fn test_shared_edge_uses_last_face() {
        assert_eq!(count(&[0, 1, 2, 0, 2, 3, 0, 4, 2]), 7);
        assert_eq!(count(&[0, 1, 2, 0, 4, 2, 0, 2, 3]), 6);
    }

    #[test]
    fn test_tetrahedron() {
        assert_eq!(count(&[0, 1, 2, 0, 1, 4, 0, 4, 2, 1, 2, 4]), 6);
    }

    #[test]
    fn test_two_isolated_triangles() {
        let vertices = [
            Vector3::new(0.0, 0.0, 0.0),
            Vector3::new(1.0, 0.0, 0.0),
            Vector3::new(1.0, 1.0, 0.0),
            Vector3::new(0.0, 0.0, 1.0),
            Vector3::new(1.0, 0.0, 1.0),
            Vector3::new(1.0, 1.0, 1.0),
        ];
        let mesh = mesh_from(&vertices, &[0, 1, 2, 3, 4, 5]);
        assert_eq!(EdgesGeometry::default().build(&mesh).segment_count(), 6);
    }

    #[test]
    fn test_cube_outline() {
        let mesh = BoxGeometry::new(2.0, 2.0, 2.0).build();
        let lines = EdgesGeometry::default().build(&mesh);
        assert_eq!(lines.segment_count(), 12);
        for (a, b) in lines.segments() {
            assert!((a.distance_to(&b) - 2.0).abs() < 1e-5);
        }
    }

    #[test]
    fn test_duplicate_positions_are_welded() {
        // Same two triangles with every corner duplicated.
        let v = vertex_list();
        let vertices = [v[0], v[1], v[2], v[0], v[2], v[3]];
        let mesh = mesh_from(&vertices, &[0, 1, 2, 3, 4, 5]);
        assert_eq!(EdgesGeometry::default().build(&mesh).segment_count(), 4);
    }

    #[test]
    fn test_large_threshold_hides_creases() {
        let mesh = mesh_from(&vertex_list(), &[0, 1, 2, 0, 4, 2]);
        let lines = EdgesGeometry::new(90.0).build(&mesh);
        assert_eq!(lines.segment_count(), 4);
    }
}

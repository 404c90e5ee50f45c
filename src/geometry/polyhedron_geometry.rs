//! Polyhedra projected onto a sphere, with optional subdivision.

use super::MeshBuffer;
use crate::math::{Triangle, Vector2, Vector3};
use serde::{Deserialize, Serialize};
use std::f32::consts::PI;

/// Built-in vertex/index sets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PlatonicSolid {
    /// 4 triangular faces.
    Tetrahedron,
    /// 8 triangular faces.
    Octahedron,
    /// 20 triangular faces.
    Icosahedron,
    /// 12 pentagonal faces, 36 triangles.
    Dodecahedron,
}

impl PlatonicSolid {
    /// Vertex positions (flat xyz) and triangle indices.
    pub fn vertex_set(self) -> (Vec<f32>, Vec<u32>) {
        let t = (1.0 + 5.0_f32.sqrt()) / 2.0;
        let r = 1.0 / t;
        match self {
            PlatonicSolid::Tetrahedron => (
                vec![1.0, 1.0, 1.0, -1.0, -1.0, 1.0, -1.0, 1.0, -1.0, 1.0, -1.0, -1.0],
                vec![2, 1, 0, 0, 3, 2, 1, 3, 0, 2, 3, 1],
            ),
            PlatonicSolid::Octahedron => (
                vec![
                    1.0, 0.0, 0.0, -1.0, 0.0, 0.0, 0.0, 1.0, 0.0,
                    0.0, -1.0, 0.0, 0.0, 0.0, 1.0, 0.0, 0.0, -1.0,
                ],
                vec![
                    0, 2, 4, 0, 4, 3, 0, 3, 5, 0, 5, 2,
                    1, 2, 5, 1, 5, 3, 1, 3, 4, 1, 4, 2,
                ],
            ),
            PlatonicSolid::Icosahedron => (
                vec![
                    -1.0, t, 0.0, 1.0, t, 0.0, -1.0, -t, 0.0, 1.0, -t, 0.0,
                    0.0, -1.0, t, 0.0, 1.0, t, 0.0, -1.0, -t, 0.0, 1.0, -t,
                    t, 0.0, -1.0, t, 0.0, 1.0, -t, 0.0, -1.0, -t, 0.0, 1.0,
                ],
                vec![
                    0, 11, 5, 0, 5, 1, 0, 1, 7, 0, 7, 10, 0, 10, 11,
                    1, 5, 9, 5, 11, 4, 11, 10, 2, 10, 7, 6, 7, 1, 8,
                    3, 9, 4, 3, 4, 2, 3, 2, 6, 3, 6, 8, 3, 8, 9,
                    4, 9, 5, 2, 4, 11, 6, 2, 10, 8, 6, 7, 9, 8, 1,
                ],
            ),
            PlatonicSolid::Dodecahedron => (
                vec![
                    -1.0, -1.0, -1.0, -1.0, -1.0, 1.0, -1.0, 1.0, -1.0, -1.0, 1.0, 1.0,
                    1.0, -1.0, -1.0, 1.0, -1.0, 1.0, 1.0, 1.0, -1.0, 1.0, 1.0, 1.0,
                    0.0, -r, -t, 0.0, -r, t, 0.0, r, -t, 0.0, r, t,
                    -r, -t, 0.0, -r, t, 0.0, r, -t, 0.0, r, t, 0.0,
                    -t, 0.0, -r, t, 0.0, -r, -t, 0.0, r, t, 0.0, r,
                ],
                vec![
                    3, 11, 7, 3, 7, 15, 3, 15, 13,
                    7, 19, 17, 7, 17, 6, 7, 6, 15,
                    17, 4, 8, 17, 8, 10, 17, 10, 6,
                    8, 0, 16, 8, 16, 2, 8, 2, 10,
                    0, 12, 1, 0, 1, 18, 0, 18, 16,
                    6, 10, 2, 6, 2, 13, 6, 13, 15,
                    2, 16, 18, 2, 18, 3, 2, 3, 13,
                    18, 1, 9, 18, 9, 11, 18, 11, 3,
                    4, 14, 12, 4, 12, 0, 4, 0, 8,
                    11, 9, 5, 11, 5, 19, 11, 19, 7,
                    19, 5, 14, 19, 14, 4, 19, 4, 17,
                    1, 12, 14, 1, 14, 5, 1, 5, 9,
                ],
            ),
        }
    }
}

/// A triangle-faced polyhedron whose vertices are pushed onto a sphere of
/// `radius`. Each input face is split into `4^detail` triangles first.
///
/// Every output triangle owns its three vertices, so UVs can be corrected per
/// face across the texture seam. Each input face becomes one material group.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PolyhedronGeometry {
    /// Input vertex positions, flat xyz.
    pub vertices: Vec<f32>,
    /// Input triangle indices into `vertices`.
    pub indices: Vec<u32>,
    /// Sphere radius.
    pub radius: f32,
    /// Subdivision level.
    pub detail: u32,
}

impl Default for PolyhedronGeometry {
    fn default() -> Self {
        Self::platonic(PlatonicSolid::Icosahedron, 1.0, 0)
    }
}

impl PolyhedronGeometry {
    /// Polyhedron from a custom vertex/index set.
    pub fn new(vertices: Vec<f32>, indices: Vec<u32>, radius: f32, detail: u32) -> Self {
        Self {
            vertices,
            indices,
            radius,
            detail,
        }
    }

    /// One of the built-in solids.
    pub fn platonic(solid: PlatonicSolid, radius: f32, detail: u32) -> Self {
        let (vertices, indices) = solid.vertex_set();
        Self::new(vertices, indices, radius, detail)
    }

    /// Tetrahedron.
    pub fn tetrahedron(radius: f32, detail: u32) -> Self {
        Self::platonic(PlatonicSolid::Tetrahedron, radius, detail)
    }

    /// Octahedron.
    pub fn octahedron(radius: f32, detail: u32) -> Self {
        Self::platonic(PlatonicSolid::Octahedron, radius, detail)
    }

    /// Icosahedron.
    pub fn icosahedron(radius: f32, detail: u32) -> Self {
        Self::platonic(PlatonicSolid::Icosahedron, radius, detail)
    }

    /// Dodecahedron.
    pub fn dodecahedron(radius: f32, detail: u32) -> Self {
        Self::platonic(PlatonicSolid::Dodecahedron, radius, detail)
    }

    /// Input faces whose indices all refer to existing vertices.
    fn faces(&self) -> Vec<[Vector3; 3]> {
        let vertex_count = self.vertices.len() / 3;
        let vertex = |i: u32| Vector3::from_slice(&self.vertices, i as usize * 3);

        self.indices
            .chunks_exact(3)
            .filter_map(|face| {
                if face.iter().any(|&i| i as usize >= vertex_count) {
                    log::warn!("PolyhedronGeometry: skipping face {:?}, only {} vertices", face, vertex_count);
                    return None;
                }
                Some([vertex(face[0]), vertex(face[1]), vertex(face[2])])
            })
            .collect()
    }

    fn triangles_per_face(&self) -> usize {
        4usize.pow(self.detail)
    }

    /// Number of vertices [`build`](Self::build) produces.
    pub fn vertex_count(&self) -> usize {
        self.faces().len() * self.triangles_per_face() * 3
    }

    /// Number of indices [`build`](Self::build) produces.
    pub fn index_count(&self) -> usize {
        self.vertex_count()
    }

    /// Build the mesh.
    pub fn build(&self) -> MeshBuffer {
        let faces = self.faces();
        let count = faces.len() * self.triangles_per_face() * 3;
        let mut mesh = MeshBuffer::with_capacity(count, count);

        for (material_index, face) in faces.iter().enumerate() {
            let group_start = mesh.index_count();
            for triangle in subdivide(face, self.detail) {
                self.push_triangle(&mut mesh, &triangle);
            }
            mesh.add_group(group_start, mesh.index_count() - group_start, material_index);
        }

        debug_assert_eq!(mesh.vertex_count(), count);
        log::debug!(
            "PolyhedronGeometry: {} vertices, {} indices",
            mesh.vertex_count(),
            mesh.index_count()
        );
        mesh
    }

    /// Emit one subdivided triangle, given as unit-sphere points.
    fn push_triangle(&self, mesh: &mut MeshBuffer, corners: &[Vector3; 3]) {
        let centroid = (corners[0] + corners[1] + corners[2]) / 3.0;
        let centroid_azimuth = azimuth(&centroid);

        let mut uvs = corners.map(|p| correct_uv(sphere_uv(&p), &p, centroid_azimuth));

        // The face straddles the u = 0/1 wrap.
        let max_u = uvs.iter().map(|uv| uv.x).fold(f32::MIN, f32::max);
        let min_u = uvs.iter().map(|uv| uv.x).fold(f32::MAX, f32::min);
        if max_u > 0.9 && min_u < 0.1 {
            for uv in uvs.iter_mut().filter(|uv| uv.x < 0.2) {
                uv.x += 1.0;
            }
        }

        let positions = corners.map(|p| p * self.radius);
        // Without subdivision the solid keeps its flat facets.
        let flat = Triangle::new(corners[0], corners[1], corners[2]).normal();

        let base = mesh.vertex_count() as u32;
        for k in 0..3 {
            let normal = if self.detail == 0 { flat } else { corners[k] };
            mesh.push_vertex(positions[k], normal, uvs[k]);
        }
        mesh.push_triangle(base, base + 1, base + 2);
    }
}

/// Split a face into `4^detail` triangles on the unit sphere.
fn subdivide(face: &[Vector3; 3], detail: u32) -> Vec<[Vector3; 3]> {
    let cols = 1usize << detail;
    let [a, b, c] = face.map(|p| p.normalized());

    // v[i][j]: row i runs from the a-c edge to the b-c edge.
    let mut v: Vec<Vec<Vector3>> = Vec::with_capacity(cols + 1);
    for i in 0..=cols {
        let alpha = i as f32 / cols as f32;
        let aj = a.lerp(&c, alpha).normalized();
        let bj = b.lerp(&c, alpha).normalized();
        let rows = cols - i;

        let row = if rows == 0 {
            vec![aj]
        } else {
            (0..=rows)
                .map(|j| aj.lerp(&bj, j as f32 / rows as f32).normalized())
                .collect()
        };
        v.push(row);
    }

    let mut triangles = Vec::with_capacity(cols * cols);
    for i in 0..cols {
        for j in 0..2 * (cols - i) - 1 {
            let k = j / 2;
            if j % 2 == 0 {
                triangles.push([v[i][k + 1], v[i + 1][k], v[i][k]]);
            } else {
                triangles.push([v[i][k + 1], v[i + 1][k + 1], v[i + 1][k]]);
            }
        }
    }
    triangles
}

/// Angle around the Y axis, counter-clockwise seen from above.
fn azimuth(p: &Vector3) -> f32 {
    p.z.atan2(-p.x)
}

/// Angle above the XZ plane.
fn inclination(p: &Vector3) -> f32 {
    (-p.y).atan2((p.x * p.x + p.z * p.z).sqrt())
}

fn sphere_uv(p: &Vector3) -> Vector2 {
    Vector2::new(azimuth(p) / 2.0 / PI + 0.5, inclination(p) / PI + 0.5)
}

/// Pull `u` back across the seam for faces on the negative-azimuth side, and
/// give pole vertices the azimuth of their face.
fn correct_uv(uv: Vector2, p: &Vector3, face_azimuth: f32) -> Vector2 {
    let mut uv = uv;
    if face_azimuth < 0.0 && uv.x == 1.0 {
        uv.x -= 1.0;
    }
    if p.x == 0.0 && p.z == 0.0 {
        uv.x = face_azimuth / 2.0 / PI + 0.5;
    }
    uv
}

#[cfg(test)]
mod tests {
    use super::*;

    const SOLIDS: [(PlatonicSolid, usize); 4] = [
        (PlatonicSolid::Tetrahedron, 4),
        (PlatonicSolid::Octahedron, 8),
        (PlatonicSolid::Icosahedron, 20),
        (PlatonicSolid::Dodecahedron, 36),
    ];

    #[test]
    fn test_counts_per_detail() {
        for (solid, faces) in SOLIDS {
            for detail in 0..3 {
                let geometry = PolyhedronGeometry::platonic(solid, 1.0, detail);
                let mesh = geometry.build();
                let triangles = faces * 4usize.pow(detail);
                assert_eq!(mesh.triangle_count(), triangles, "{solid:?} detail {detail}");
                assert_eq!(mesh.vertex_count(), triangles * 3);
                assert_eq!(mesh.vertex_count(), geometry.vertex_count());
                assert_eq!(mesh.groups.len(), faces);
                assert!(mesh.validate().is_ok());
            }
        }
    }

    #[test]
    fn test_vertices_on_sphere() {
        let mesh = PolyhedronGeometry::icosahedron(2.5, 2).build();
        for i in 0..mesh.vertex_count() {
            assert!((mesh.position(i).length() - 2.5).abs() < 1e-4);
            assert!((mesh.normal(i).length() - 1.0).abs() < 1e-4);
        }
    }

    #[test]
    fn test_faces_point_outward() {
        for (solid, _) in SOLIDS {
            for detail in 0..2 {
                let mesh = PolyhedronGeometry::platonic(solid, 1.0, detail).build();
                for t in 0..mesh.triangle_count() {
                    let tri = mesh.triangle(t);
                    assert!(tri.normal().dot(&tri.centroid()) > 0.0, "{solid:?} {t}");
                }
            }
        }
    }

    #[test]
    fn test_flat_normals_without_detail() {
        let mesh = PolyhedronGeometry::octahedron(1.0, 0).build();
        for t in 0..mesh.triangle_count() {
            let face = mesh.triangle(t).normal();
            for k in 0..3 {
                assert!(mesh.normal(t * 3 + k).approx_eq(&face, 1e-5));
            }
        }
    }

    #[test]
    fn test_uvs_do_not_wrap_across_face() {
        let mesh = PolyhedronGeometry::icosahedron(1.0, 2).build();
        for t in 0..mesh.triangle_count() {
            let us: Vec<f32> = (0..3).map(|k| mesh.uv(t * 3 + k).x).collect();
            let max = us.iter().cloned().fold(f32::MIN, f32::max);
            let min = us.iter().cloned().fold(f32::MAX, f32::min);
            assert!(!(max > 0.9 && min < 0.1), "triangle {t}: {us:?}");
        }
    }

    #[test]
    fn test_seam_patch_shifts_low_u() {
        // Two corners just past the seam, one just before it.
        let corners = [
            Vector3::new(0.99, 0.0, -0.05).normalized(),
            Vector3::new(0.99, 0.1, 0.05).normalized(),
            Vector3::new(0.99, -0.1, 0.05).normalized(),
        ];
        let mut mesh = MeshBuffer::new();
        PolyhedronGeometry::icosahedron(1.0, 1).push_triangle(&mut mesh, &corners);
        for k in 0..3 {
            assert!(mesh.uv(k).x > 0.9, "{:?}", mesh.uv(k));
        }
    }

    #[test]
    fn test_skips_out_of_range_faces() {
        let geometry = PolyhedronGeometry::new(
            vec![1.0, 0.0, 0.0, 0.0, 1.0, 0.0, 0.0, 0.0, 1.0],
            vec![0, 1, 2, 0, 1, 9],
            1.0,
            0,
        );
        let mesh = geometry.build();
        assert_eq!(mesh.triangle_count(), 1);
        assert!(mesh.validate().is_ok());
    }
}

//! Cross-module properties of the math types and generators.

use meshkern::prelude::*;

/// Deterministic spread of vectors covering every octant and a range of
/// magnitudes.
fn sample_vectors() -> Vec<Vector3> {
    let mut out = Vec::new();
    let values = [-7.5, -1.0, -0.25, 0.5, 2.0, 13.0];
    for (i, &x) in values.iter().enumerate() {
        for (j, &y) in values.iter().enumerate() {
            let z = values[(i + 2 * j) % values.len()];
            out.push(Vector3::new(x, y, z));
        }
    }
    out
}

fn sample_rotations() -> Vec<Quaternion> {
    sample_vectors()
        .iter()
        .enumerate()
        .map(|(i, axis)| Quaternion::from_axis_angle(&axis.normalized(), i as f32 * 0.37 - 3.0))
        .collect()
}

fn same_rotation(a: &Quaternion, b: &Quaternion, epsilon: f32) -> bool {
    a.approx_eq(b, epsilon) || a.approx_eq(&(-*b), epsilon)
}

#[test]
fn compose_then_decompose_round_trips() {
    let scales = [
        Vector3::ONE,
        Vector3::new(2.0, 0.5, 3.0),
        Vector3::new(0.1, 4.0, 1.5),
    ];
    for (p, q) in sample_vectors().iter().zip(sample_rotations()) {
        for s in &scales {
            let m = Matrix4::compose(p, &q, s);
            let (p2, q2, s2) = m.decompose();
            assert!(p2.approx_eq(p, 1e-4), "position {p:?} -> {p2:?}");
            assert!(s2.approx_eq(s, 1e-4), "scale {s:?} -> {s2:?}");
            assert!(same_rotation(&q2, &q, 1e-4), "rotation {q:?} -> {q2:?}");
        }
    }
}

#[test]
fn decompose_reflective_scale_up_to_sign() {
    let q = Quaternion::from_axis_angle(&Vector3::UNIT_Y, 0.8);
    let s = Vector3::new(-2.0, 1.0, 1.0);
    let m = Matrix4::compose(&Vector3::ZERO, &q, &s);
    let (_, q2, s2) = m.decompose();
    // Recomposing gives back the same matrix even if the sign moved axes.
    let back = Matrix4::compose(&Vector3::ZERO, &q2, &s2);
    assert!(back.approx_eq(&m, 1e-5));
    assert!((s2.x.abs() - 2.0).abs() < 1e-5);
}

#[test]
fn normalize_is_idempotent() {
    for v in sample_vectors() {
        let once = v.normalized();
        let twice = once.normalized();
        assert!(once.approx_eq(&twice, 1e-6), "{v:?}");
        assert!((once.length() - 1.0).abs() < 1e-6);
    }
}

#[test]
fn cross_is_anticommutative() {
    let vectors = sample_vectors();
    for a in &vectors {
        for b in vectors.iter().step_by(5) {
            let ab = a.cross(b);
            let ba = b.cross(a);
            assert!(ab.approx_eq(&(-ba), 1e-4), "{a:?} x {b:?}");
        }
    }
}

#[test]
fn slerp_identities() {
    let rotations = sample_rotations();
    for pair in rotations.windows(2) {
        let (a, b) = (pair[0], pair[1]);
        assert_eq!(a.slerp(&b, 0.0), a);
        assert_eq!(a.slerp(&b, 1.0), b);
        for t in [0.1, 0.5, 0.9] {
            assert!(a.slerp(&a, t).approx_eq(&a, 1e-5));
        }
    }
}

#[test]
fn box_layout() {
    let mesh = BoxGeometry::new(2.0, 2.0, 2.0).with_segments(1, 1, 1).build();
    assert_eq!(mesh.vertex_count(), 24);
    assert_eq!(mesh.index_count(), 36);
    assert_eq!(mesh.triangle_count(), 12);
    assert_eq!(mesh.groups.len(), 6);
    for (i, group) in mesh.groups.iter().enumerate() {
        assert_eq!(group.start, i * 6);
        assert_eq!(group.count, 6);
        assert_eq!(group.material_index, i);
    }
    assert!(mesh.validate().is_ok());
}

#[test]
fn sphere_layout() {
    let mesh = SphereGeometry::new(3.0, 8, 6).build();
    assert_eq!(mesh.vertex_count(), 63);
    for [a, b, c] in mesh.triangles() {
        assert!(a != b && b != c && a != c, "degenerate triangle {a} {b} {c}");
    }
    for i in 0..mesh.vertex_count() {
        assert!((mesh.normal(i).length() - 1.0).abs() < 1e-4, "normal {i}");
    }
    assert!(mesh.validate().is_ok());
}

#[test]
fn torus_knot_frames_orthonormal() {
    for (p, q) in [(2, 3), (3, 7), (5, 2)] {
        let frames = TorusKnotGeometry::new(1.0, 0.3, 100, 8, p, q).frames();
        for i in 0..frames.len() {
            let (t, n, b) = frames.frame(i).unwrap();
            assert!(t.dot(&n).abs() < 1e-3);
            assert!(t.dot(&b).abs() < 1e-3);
            assert!(n.dot(&b).abs() < 1e-3);
        }
    }
}

#[test]
fn cube_edges_skip_face_diagonals() {
    let mesh = BoxGeometry::new(1.0, 1.0, 1.0).build();
    let lines = EdgesGeometry::new(1.0).build(&mesh);
    assert_eq!(lines.segment_count(), 12);
    for (a, b) in lines.segments() {
        let d = b - a;
        let axes = [d.x, d.y, d.z].iter().filter(|c| c.abs() > 1e-6).count();
        assert_eq!(axes, 1, "diagonal {a:?} -> {b:?}");
    }
}

#[test]
fn every_generator_produces_valid_buffers() {
    let path = CatmullRomCurve3::new(vec![
        Vector3::new(0.0, 0.0, 0.0),
        Vector3::new(1.0, 2.0, 0.0),
        Vector3::new(3.0, 1.0, 1.0),
        Vector3::new(4.0, 0.0, 0.0),
    ]);
    let profile = vec![Vector2::new(0.2, -1.0), Vector2::new(1.0, 0.0), Vector2::new(0.4, 1.0)];

    let meshes = [
        BoxGeometry::new(1.0, 2.0, 3.0).with_segments(2, 3, 4).build(),
        SphereGeometry::new(1.0, 12, 8).build(),
        CylinderGeometry::new(0.5, 1.0, 2.0, 10, 3).build(),
        CylinderGeometry::cone(1.0, 2.0, 8, 2).build(),
        TorusGeometry::new(1.0, 0.3, 8, 16).build(),
        TorusKnotGeometry::default().build(),
        LatheGeometry::new(profile, 10).build(),
        PolyhedronGeometry::dodecahedron(1.0, 1).build(),
        TubeGeometry::new(20, 0.2, 6, false).build(&path),
        RingGeometry::new(0.5, 1.0, 12, 3).build(),
        CircleGeometry::new(1.0, 12).build(),
    ];

    for (i, mesh) in meshes.iter().enumerate() {
        assert!(mesh.validate().is_ok(), "mesh {i}: {:?}", mesh.validate());
        assert!(!mesh.is_empty(), "mesh {i}");
        assert!(mesh.positions.iter().all(|x| x.is_finite()), "mesh {i}");
        assert!(mesh.normals.iter().all(|x| x.is_finite()), "mesh {i}");

        let indices = IndexBuffer::from_mesh(mesh);
        assert_eq!(indices.len(), mesh.index_count());
        assert_eq!(indices.element_size(), 2);
    }
}

#[test]
fn transformed_mesh_keeps_unit_normals() {
    let mut mesh = SphereGeometry::new(1.0, 16, 12).build();
    let m = Matrix4::compose(
        &Vector3::new(1.0, 2.0, 3.0),
        &Quaternion::from_axis_angle(&Vector3::UNIT_Z, 0.5),
        &Vector3::new(2.0, 1.0, 0.5),
    );
    mesh.apply_matrix4(&m);
    for i in 0..mesh.vertex_count() {
        assert!((mesh.normal(i).length() - 1.0).abs() < 1e-4);
    }
    let bounds = mesh.compute_bounding_sphere();
    assert!(bounds.center.approx_eq(&Vector3::new(1.0, 2.0, 3.0), 1e-3));
}

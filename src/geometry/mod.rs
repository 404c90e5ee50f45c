//! Mesh buffers and procedural geometry generators.
//!
//! Every generator is a plain parameter struct whose `build` method returns a
//! fresh [`MeshBuffer`]. Curve-driven generators take the curve as an argument
//! to `build`, and [`EdgesGeometry`] turns a mesh into a [`LineBuffer`].

mod box_geometry;
mod cylinder_geometry;
mod edges_geometry;
mod lathe_geometry;
mod mesh_buffer;
mod polyhedron_geometry;
mod ring_geometry;
mod sphere_geometry;
mod torus_geometry;
mod torus_knot_geometry;
mod tube_geometry;
mod vertex;

pub use box_geometry::BoxGeometry;
pub use cylinder_geometry::CylinderGeometry;
pub use edges_geometry::EdgesGeometry;
pub use lathe_geometry::LatheGeometry;
pub use mesh_buffer::{GeometryGroup, LineBuffer, MeshBuffer};
pub use polyhedron_geometry::{PlatonicSolid, PolyhedronGeometry};
pub use ring_geometry::{CircleGeometry, RingGeometry};
pub use sphere_geometry::SphereGeometry;
pub use torus_geometry::TorusGeometry;
pub use torus_knot_geometry::TorusKnotGeometry;
pub use tube_geometry::{Taper, TubeGeometry};
pub use vertex::{IndexBuffer, PositionVertex, Vertex};

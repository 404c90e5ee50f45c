//! # meshkern - Geometry kernel for WebGL-style renderers
//!
//! meshkern provides the linear algebra and procedural mesh generation that a
//! scene-graph renderer sits on top of. It produces flat vertex and index
//! arrays ready for upload; it does not render anything itself.
//!
//! ## Features
//!
//! - **Math**: vectors, 3x3/4x4 matrices, quaternions, Euler angles, bounding volumes
//! - **Curves**: arc-length parameterized curves, Catmull-Rom splines, Frenet frames
//! - **Geometry**: box, sphere, cylinder, torus, torus knot, lathe, polyhedra,
//!   tube, ring and circle generators, plus feature-edge extraction
//! - **Config**: named mesh descriptors loaded from TOML and the environment
//!
//! ## Example
//!
//! ```
//! use meshkern::prelude::*;
//!
//! let mesh = SphereGeometry::new(1.0, 16, 12).build();
//! assert!(mesh.validate().is_ok());
//!
//! let vertices = mesh.to_vertices();
//! let bytes: &[u8] = bytemuck::cast_slice(&vertices);
//! assert_eq!(bytes.len(), mesh.vertex_count() * Vertex::STRIDE);
//! ```

#![warn(missing_docs)]

pub mod config;
pub mod curves;
pub mod error;
pub mod geometry;
pub mod math;

pub use error::{KernelError, Result};

// Re-export commonly used types
pub mod prelude {
    //! Convenient re-exports of commonly used types.

    pub use crate::config::{GeometryDescriptor, MeshConfig, NamedMesh, Placement};
    pub use crate::curves::*;
    pub use crate::error::{KernelError, Result};
    pub use crate::geometry::*;
    pub use crate::math::*;
}

/// Crate version string.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

//! Mesh configuration
//!
//! A configuration is a list of named geometry descriptors that can be built
//! into meshes. It is loaded from multiple sources with the following priority
//! (lowest to highest):
//! 1. `config/default.toml`
//! 2. `config/user.toml`
//! 3. Environment variables (`MESHKERN_KEY`, nested keys split on `__`)
//!
//! ```toml
//! [[meshes]]
//! name = "crate"
//! geometry = { type = "box", width = 2.0, height = 2.0, depth = 2.0 }
//!
//! [[meshes]]
//! name = "planet"
//! geometry = { type = "platonic", solid = "icosahedron", radius = 3.0, detail = 2 }
//! placement = { position = { x = 0.0, y = 5.0, z = 0.0 } }
//! ```

use crate::curves::CatmullRomCurve3;
use crate::error::Result;
use crate::geometry::{
    BoxGeometry, CircleGeometry, CylinderGeometry, EdgesGeometry, LatheGeometry, LineBuffer,
    MeshBuffer, PlatonicSolid, PolyhedronGeometry, RingGeometry, SphereGeometry, TorusGeometry,
    TorusKnotGeometry, TubeGeometry,
};
use crate::math::{Euler, Matrix4, Quaternion, Vector3};
use figment::{
    providers::{Env, Format, Toml},
    Figment,
};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Environment variable prefix.
pub const ENV_PREFIX: &str = "MESHKERN_";

/// Top-level mesh configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MeshConfig {
    /// Check every built mesh with [`MeshBuffer::validate`].
    #[serde(default = "default_validate")]
    pub validate: bool,
    /// Meshes to build, in order.
    #[serde(default)]
    pub meshes: Vec<NamedMesh>,
}

fn default_validate() -> bool {
    true
}

impl Default for MeshConfig {
    fn default() -> Self {
        Self {
            validate: default_validate(),
            meshes: Vec::new(),
        }
    }
}

impl MeshConfig {
    /// Load configuration from the `config` directory.
    pub fn load() -> Result<Self> {
        Self::load_from("config")
    }

    /// Load configuration from a specific config directory.
    ///
    /// Missing files are skipped; environment variables override everything.
    pub fn load_from<P: AsRef<Path>>(config_dir: P) -> Result<Self> {
        let config_dir = config_dir.as_ref();
        let default_path = config_dir.join("default.toml");
        let user_path = config_dir.join("user.toml");

        let mut figment = Figment::new();

        if default_path.exists() {
            figment = figment.merge(Toml::file(&default_path));
        }

        if user_path.exists() {
            figment = figment.merge(Toml::file(&user_path));
        }

        // MESHKERN_VALIDATE=false -> validate = false
        figment = figment.merge(Env::prefixed(ENV_PREFIX).split("__"));

        let config: Self = figment.extract()?;
        log::debug!(
            "Loaded {} mesh descriptors from {}",
            config.meshes.len(),
            config_dir.display()
        );
        Ok(config)
    }

    /// Parse configuration from a TOML string, without files or environment.
    pub fn from_toml_str(toml: &str) -> Result<Self> {
        Ok(Figment::from(Toml::string(toml)).extract()?)
    }

    /// Look up a mesh by name.
    pub fn get(&self, name: &str) -> Option<&NamedMesh> {
        self.meshes.iter().find(|mesh| mesh.name == name)
    }

    /// Build every mesh, in order.
    pub fn build_all(&self) -> Result<Vec<(String, MeshBuffer)>> {
        self.meshes
            .iter()
            .map(|entry| {
                let mesh = entry.build();
                if self.validate {
                    mesh.validate()?;
                }
                Ok((entry.name.clone(), mesh))
            })
            .collect()
    }
}

/// A named geometry with an optional placement and outline.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NamedMesh {
    /// Lookup name.
    pub name: String,
    /// What to generate.
    pub geometry: GeometryDescriptor,
    /// Transform baked into the vertices.
    #[serde(default)]
    pub placement: Placement,
    /// Extract feature edges as well.
    #[serde(default)]
    pub edges: Option<EdgesGeometry>,
}

impl NamedMesh {
    /// Build the mesh and apply its placement.
    pub fn build(&self) -> MeshBuffer {
        let mut mesh = self.geometry.build();
        if !self.placement.is_identity() {
            mesh.apply_matrix4(&self.placement.matrix());
        }
        mesh
    }

    /// Build the mesh and extract its edges, when edges are configured.
    pub fn build_edges(&self) -> Option<LineBuffer> {
        self.edges.as_ref().map(|edges| edges.build(&self.build()))
    }
}

/// Position, rotation and scale applied to a generated mesh.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Placement {
    /// Translation.
    pub position: Vector3,
    /// Rotation in radians.
    pub rotation: Euler,
    /// Per-axis scale.
    pub scale: Vector3,
}

impl Default for Placement {
    fn default() -> Self {
        Self {
            position: Vector3::ZERO,
            rotation: Euler::ZERO,
            scale: Vector3::ONE,
        }
    }
}

impl Placement {
    /// Whether the placement leaves vertices unchanged.
    pub fn is_identity(&self) -> bool {
        self.position == Vector3::ZERO
            && self.scale == Vector3::ONE
            && self.rotation.x == 0.0
            && self.rotation.y == 0.0
            && self.rotation.z == 0.0
    }

    /// Composed transform matrix.
    pub fn matrix(&self) -> Matrix4 {
        Matrix4::compose(&self.position, &Quaternion::from_euler(&self.rotation), &self.scale)
    }
}

/// Serializable description of a generator, tagged by `type`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum GeometryDescriptor {
    /// [`BoxGeometry`].
    Box(BoxGeometry),
    /// [`SphereGeometry`].
    Sphere(SphereGeometry),
    /// [`CylinderGeometry`].
    Cylinder(CylinderGeometry),
    /// [`TorusGeometry`].
    Torus(TorusGeometry),
    /// [`TorusKnotGeometry`].
    TorusKnot(TorusKnotGeometry),
    /// [`LatheGeometry`].
    Lathe(LatheGeometry),
    /// [`PolyhedronGeometry`] with caller-supplied vertices.
    Polyhedron(PolyhedronGeometry),
    /// One of the built-in polyhedra.
    Platonic {
        /// Which solid.
        solid: PlatonicSolid,
        /// Sphere radius.
        #[serde(default = "default_radius")]
        radius: f32,
        /// Subdivision level.
        #[serde(default)]
        detail: u32,
    },
    /// [`TubeGeometry`] swept along a Catmull-Rom path.
    Tube {
        /// Control points and curve settings.
        path: CatmullRomCurve3,
        /// Tube parameters.
        #[serde(default)]
        tube: TubeGeometry,
    },
    /// [`RingGeometry`].
    Ring(RingGeometry),
    /// [`CircleGeometry`].
    Circle(CircleGeometry),
}

fn default_radius() -> f32 {
    1.0
}

impl GeometryDescriptor {
    /// Generate the mesh.
    pub fn build(&self) -> MeshBuffer {
        match self {
            GeometryDescriptor::Box(g) => g.build(),
            GeometryDescriptor::Sphere(g) => g.build(),
            GeometryDescriptor::Cylinder(g) => g.build(),
            GeometryDescriptor::Torus(g) => g.build(),
            GeometryDescriptor::TorusKnot(g) => g.build(),
            GeometryDescriptor::Lathe(g) => g.build(),
            GeometryDescriptor::Polyhedron(g) => g.build(),
            GeometryDescriptor::Platonic {
                solid,
                radius,
                detail,
            } => PolyhedronGeometry::platonic(*solid, *radius, *detail).build(),
            GeometryDescriptor::Tube { path, tube } => tube.build(path),
            GeometryDescriptor::Ring(g) => g.build(),
            GeometryDescriptor::Circle(g) => g.build(),
        }
    }
}

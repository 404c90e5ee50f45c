//! Integration tests for configuration loading
//!
//! Tests that verify config loading from files and environment variables.

use meshkern::config::{GeometryDescriptor, MeshConfig};
use meshkern::geometry::SphereGeometry;
use serial_test::serial;
use std::fs;
use std::path::PathBuf;

/// Fresh config directory under the system temp dir.
fn scratch_dir(name: &str) -> PathBuf {
    let dir = std::env::temp_dir().join(format!("meshkern-{}-{}", name, std::process::id()));
    let _ = fs::remove_dir_all(&dir);
    fs::create_dir_all(&dir).unwrap();
    dir
}

#[test]
#[serial]
fn test_default_config_builds() {
    std::env::remove_var("MESHKERN_VALIDATE");

    let config = MeshConfig::load().unwrap();
    assert!(config.validate);
    assert!(config.get("crate").is_some());

    let built = config.build_all().unwrap();
    assert_eq!(built.len(), config.meshes.len());

    let outline = config.get("crate").unwrap().build_edges().unwrap();
    assert_eq!(outline.segment_count(), 12);
}

#[test]
#[serial]
fn test_user_overrides_default() {
    std::env::remove_var("MESHKERN_VALIDATE");
    let dir = scratch_dir("user");

    fs::write(
        dir.join("default.toml"),
        r#"
        [[meshes]]
        name = "ball"
        geometry = { type = "sphere", radius = 1.0 }
        "#,
    )
    .unwrap();
    fs::write(
        dir.join("user.toml"),
        r#"
        validate = false

        [[meshes]]
        name = "ball"
        geometry = { type = "sphere", radius = 2.0, width_segments = 16, height_segments = 8 }
        "#,
    )
    .unwrap();

    let config = MeshConfig::load_from(&dir).unwrap();
    assert!(!config.validate);
    assert_eq!(config.meshes.len(), 1);
    assert_eq!(
        config.meshes[0].geometry,
        GeometryDescriptor::Sphere(SphereGeometry::new(2.0, 16, 8))
    );

    fs::remove_dir_all(&dir).unwrap();
}

#[test]
#[serial]
fn test_env_override() {
    let dir = scratch_dir("env");
    fs::write(dir.join("default.toml"), "validate = true\n").unwrap();

    std::env::set_var("MESHKERN_VALIDATE", "false");
    let config = MeshConfig::load_from(&dir).unwrap();
    std::env::remove_var("MESHKERN_VALIDATE");

    assert!(!config.validate);
    assert!(config.meshes.is_empty());

    fs::remove_dir_all(&dir).unwrap();
}

#[test]
#[serial]
fn test_missing_directory_gives_defaults() {
    std::env::remove_var("MESHKERN_VALIDATE");
    let dir = std::env::temp_dir().join("meshkern-does-not-exist");

    let config = MeshConfig::load_from(&dir).unwrap();
    assert_eq!(config, MeshConfig::default());
}

#[test]
#[serial]
fn test_malformed_file_is_a_config_error() {
    std::env::remove_var("MESHKERN_VALIDATE");
    let dir = scratch_dir("bad");
    fs::write(
        dir.join("default.toml"),
        r#"
        [[meshes]]
        name = "x"
        geometry = { type = "sphere", radius = "big" }
        "#,
    )
    .unwrap();

    let result = MeshConfig::load_from(&dir);
    assert!(matches!(result, Err(meshkern::KernelError::Config(_))));

    fs::remove_dir_all(&dir).unwrap();
}

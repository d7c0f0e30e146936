//! Scene and settings loading and saving
//!
//! Uses RON (Rusty Object Notation) for human-readable scene files.

use std::fs;
use std::path::Path;
use crate::rasterizer::RenderSettings;
use super::SceneState;

/// Error type for scene loading
#[derive(Debug)]
pub enum SceneError {
    IoError(std::io::Error),
    ParseError(ron::error::SpannedError),
    SerializeError(ron::Error),
    /// A face points past the end of its mesh's vertex list
    InvalidFace {
        mesh: String,
        face: usize,
        index: usize,
        vertex_count: usize,
    },
    /// An animation targets a mesh that does not exist
    InvalidAnimation { animation: usize, mesh: usize },
}

impl From<std::io::Error> for SceneError {
    fn from(e: std::io::Error) -> Self {
        SceneError::IoError(e)
    }
}

impl From<ron::error::SpannedError> for SceneError {
    fn from(e: ron::error::SpannedError) -> Self {
        SceneError::ParseError(e)
    }
}

impl From<ron::Error> for SceneError {
    fn from(e: ron::Error) -> Self {
        SceneError::SerializeError(e)
    }
}

impl std::fmt::Display for SceneError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SceneError::IoError(e) => write!(f, "IO error: {}", e),
            SceneError::ParseError(e) => write!(f, "Parse error: {}", e),
            SceneError::SerializeError(e) => write!(f, "Serialize error: {}", e),
            SceneError::InvalidFace { mesh, face, index, vertex_count } => write!(
                f,
                "Mesh '{}' face {} uses vertex {} but only has {} vertices",
                mesh, face, index, vertex_count
            ),
            SceneError::InvalidAnimation { animation, mesh } => write!(
                f,
                "Animation {} targets mesh {} which does not exist",
                animation, mesh
            ),
        }
    }
}

impl std::error::Error for SceneError {}

/// Check the invariants the renderer relies on without checking itself
pub fn validate_scene(scene: &SceneState) -> Result<(), SceneError> {
    for mesh in &scene.meshes {
        for (face_idx, face) in mesh.faces.iter().enumerate() {
            if let Some(&index) = face.indices().iter().find(|&&i| i >= mesh.vertices.len()) {
                return Err(SceneError::InvalidFace {
                    mesh: mesh.name.clone(),
                    face: face_idx,
                    index,
                    vertex_count: mesh.vertices.len(),
                });
            }
        }
    }

    for (animation, anim) in scene.animations.iter().enumerate() {
        if anim.mesh >= scene.meshes.len() {
            return Err(SceneError::InvalidAnimation { animation, mesh: anim.mesh });
        }
    }

    Ok(())
}

/// Load a scene from a RON file
pub fn load_scene<P: AsRef<Path>>(path: P) -> Result<SceneState, SceneError> {
    let contents = fs::read_to_string(path)?;
    load_scene_from_str(&contents)
}

/// Load a scene from a RON string (for embedded scenes or testing)
pub fn load_scene_from_str(s: &str) -> Result<SceneState, SceneError> {
    let scene: SceneState = ron::from_str(s)?;
    validate_scene(&scene)?;
    Ok(scene)
}

/// Save a scene to a RON file
pub fn save_scene<P: AsRef<Path>>(scene: &SceneState, path: P) -> Result<(), SceneError> {
    let config = ron::ser::PrettyConfig::new()
        .depth_limit(4)
        .indentor("  ".to_string());

    let contents = ron::ser::to_string_pretty(scene, config)?;
    fs::write(path, contents)?;
    Ok(())
}

/// Load render settings from a RON file. Missing fields take their defaults.
pub fn load_settings<P: AsRef<Path>>(path: P) -> Result<RenderSettings, SceneError> {
    let contents = fs::read_to_string(path)?;
    Ok(ron::from_str(&contents)?)
}

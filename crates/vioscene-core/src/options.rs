//! Configuration options for scene composition.

use std::path::{Path, PathBuf};

use glam::Vec3;
use serde::{Deserialize, Serialize};

use crate::error::Result;

/// What the composer draws from the upstream mesh.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum VisualizationType {
    /// Mesh, trajectory, planes and landmarks.
    #[default]
    Mesh3d,
    /// Like `Mesh3d` but mesh input is ignored; landmarks are drawn as a cloud only.
    PointCloud,
    /// Only the trajectory is drawn.
    None,
}

/// Configuration options for the scene composer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Options {
    /// What to draw.
    pub visualization_type: VisualizationType,

    /// Maximum number of poses kept in the trajectory.
    pub trajectory_capacity: usize,

    /// Draw frustums only for this many most recent poses (`None` = all).
    pub n_last_frustums: Option<usize>,

    /// Distance from camera center to frustum near plane.
    pub frustum_depth: f32,

    /// Color mesh faces by triangle cluster.
    pub color_mesh_by_clusters: bool,

    /// Draw a text label next to each plane.
    pub visualize_plane_labels: bool,

    /// Side length of plane widgets.
    pub plane_size: f32,

    /// Draw the convex hull outline of each triangle cluster.
    pub visualize_convex_hulls: bool,

    /// Draw the world coordinate frame.
    pub show_world_frame: bool,

    /// Axis length of the world coordinate frame.
    pub world_frame_scale: f32,

    /// Color of landmarks that have no specific kind color.
    pub cloud_color: Vec3,

    /// Write each frame's mesh to `mesh_{timestamp}.ply`.
    pub log_mesh: bool,

    /// Accumulate meshes across frames into `accumulated_mesh.ply`.
    /// Independent of `log_mesh`; both files are written when both are set.
    pub log_accumulated_mesh: bool,

    /// Directory for mesh logs.
    pub mesh_log_dir: PathBuf,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            visualization_type: VisualizationType::Mesh3d,
            trajectory_capacity: 50,
            n_last_frustums: Some(10),
            frustum_depth: 0.2,
            color_mesh_by_clusters: true,
            visualize_plane_labels: true,
            plane_size: 0.5,
            visualize_convex_hulls: false,
            show_world_frame: true,
            world_frame_scale: 1.0,
            cloud_color: Vec3::ONE,
            log_mesh: false,
            log_accumulated_mesh: false,
            mesh_log_dir: PathBuf::from("output_logs"),
        }
    }
}

impl Options {
    /// Parses options from a JSON string. Missing fields take their defaults.
    pub fn from_json_str(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Reads options from a JSON file.
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path)?;
        let options = Self::from_json_str(&contents)?;
        log::debug!("loaded scene options from {}", path.display());
        Ok(options)
    }

    /// Serializes options to pretty JSON.
    pub fn to_json_string(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Whether mesh input should be drawn.
    pub fn draws_mesh(&self) -> bool {
        self.visualization_type == VisualizationType::Mesh3d
    }

    /// Whether planes and landmarks should be drawn.
    pub fn draws_scene_points(&self) -> bool {
        self.visualization_type != VisualizationType::None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_json_uses_defaults() {
        let options = Options::from_json_str(r#"{ "trajectory_capacity": 5, "visualization_type": "PointCloud" }"#)
            .unwrap();
        assert_eq!(options.trajectory_capacity, 5);
        assert_eq!(options.visualization_type, VisualizationType::PointCloud);
        assert_eq!(options.plane_size, Options::default().plane_size);
        assert!(!options.draws_mesh());
        assert!(options.draws_scene_points());
    }

    #[test]
    fn test_json_roundtrip() {
        let mut options = Options::default();
        options.n_last_frustums = None;
        options.cloud_color = Vec3::new(0.1, 0.2, 0.3);
        let json = options.to_json_string().unwrap();
        assert_eq!(Options::from_json_str(&json).unwrap(), options);
    }

    #[test]
    fn test_bad_json_is_an_error() {
        assert!(matches!(
            Options::from_json_str("{ not json"),
            Err(crate::SceneError::Json(_))
        ));
    }

    #[test]
    fn test_missing_file_is_io_error() {
        assert!(matches!(
            Options::from_json_file("/nonexistent/vioscene/options.json"),
            Err(crate::SceneError::Io(_))
        ));
    }
}

//! Per-frame input from the upstream estimation pipeline.

use std::sync::Arc;

use glam::Mat4;
use image::RgbImage;
use vioscene_core::{LandmarkId, Timestamp};
use vioscene_structures::{Landmark, Mesh, Plane, TriangleCluster};

/// A plane detected in the current frame with the landmarks associated to it.
#[derive(Debug, Clone, PartialEq)]
pub struct ObservedPlane {
    pub plane: Plane,
    pub landmark_ids: Vec<LandmarkId>,
}

impl ObservedPlane {
    pub fn new(plane: Plane, landmark_ids: Vec<LandmarkId>) -> Self {
        Self { plane, landmark_ids }
    }
}

/// Everything the composer needs for one frame.
///
/// Inputs must describe one synchronized frame; the composer does not merge
/// partial inputs.
#[derive(Debug, Clone, Default)]
pub struct FrameInput {
    pub timestamp: Timestamp,
    /// Camera-to-world pose of this frame.
    pub pose: Option<Mat4>,
    pub mesh: Option<Mesh>,
    /// Triangle clusters indexing into `mesh`'s faces.
    pub clusters: Vec<TriangleCluster>,
    pub landmarks: Vec<Landmark>,
    /// Planes seen this frame. A plane id listed more than once keeps only
    /// its last observation.
    pub planes: Vec<ObservedPlane>,
    /// Image shown in the newest frustum.
    pub frustum_image: Option<Arc<RgbImage>>,
}

impl FrameInput {
    pub fn new(timestamp: Timestamp) -> Self {
        Self {
            timestamp,
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_pose(mut self, pose: Mat4) -> Self {
        self.pose = Some(pose);
        self
    }

    #[must_use]
    pub fn with_mesh(mut self, mesh: Mesh, clusters: Vec<TriangleCluster>) -> Self {
        self.mesh = Some(mesh);
        self.clusters = clusters;
        self
    }

    #[must_use]
    pub fn with_landmarks(mut self, landmarks: Vec<Landmark>) -> Self {
        self.landmarks = landmarks;
        self
    }

    #[must_use]
    pub fn with_planes(mut self, planes: Vec<ObservedPlane>) -> Self {
        self.planes = planes;
        self
    }

    #[must_use]
    pub fn with_frustum_image(mut self, image: Arc<RgbImage>) -> Self {
        self.frustum_image = Some(image);
        self
    }
}

//! Named scene objects.
//!
//! A [`Widget`] is the unit the rendering backend draws: a point cloud, mesh,
//! line, plane, camera frustum or text label, identified by a string id that
//! is unique within the [`SceneRegistry`](crate::SceneRegistry).

use std::sync::Arc;

use glam::{Mat4, Vec2, Vec3};
use image::RgbImage;

use crate::camera::CameraIntrinsics;

/// The kind of a widget, derived from its payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum WidgetKind {
    PointCloud,
    Mesh,
    Line,
    Plane,
    Frustum,
    Text,
    /// World axes.
    CoordinateFrame,
}

/// Geometry and color buffers of a widget.
#[derive(Debug, Clone, PartialEq)]
pub enum WidgetPayload {
    /// Points with one color per point.
    PointCloud { points: Vec<Vec3>, colors: Vec<Vec3> },
    /// Polygon mesh with one color per vertex.
    Mesh {
        vertices: Vec<Vec3>,
        faces: Vec<Vec<u32>>,
        colors: Vec<Vec3>,
        tcoords: Option<Vec<Vec2>>,
    },
    /// Single segment.
    Line { from: Vec3, to: Vec3, color: Vec3 },
    /// Connected segments through `points`, closed back to the first point if `closed`.
    Polyline {
        points: Vec<Vec3>,
        color: Vec3,
        closed: bool,
    },
    /// Square patch of side `size` centered at `center`.
    Plane {
        center: Vec3,
        normal: Vec3,
        size: f32,
        color: Vec3,
    },
    /// Camera frustum wireframe in the camera frame, optionally textured on
    /// its near plane.
    Frustum {
        intrinsics: CameraIntrinsics,
        nodes: Vec<Vec3>,
        edges: Vec<[u32; 2]>,
        image: Option<Arc<RgbImage>>,
        color: Vec3,
    },
    /// Billboard text anchored at `position`.
    Text {
        text: String,
        position: Vec3,
        scale: f32,
        color: Vec3,
    },
    /// Axes of length `scale`.
    CoordinateFrame { scale: f32 },
}

impl WidgetPayload {
    /// Returns the kind of widget this payload describes.
    #[must_use]
    pub fn kind(&self) -> WidgetKind {
        match self {
            Self::PointCloud { .. } => WidgetKind::PointCloud,
            Self::Mesh { .. } => WidgetKind::Mesh,
            Self::Line { .. } | Self::Polyline { .. } => WidgetKind::Line,
            Self::Plane { .. } => WidgetKind::Plane,
            Self::Frustum { .. } => WidgetKind::Frustum,
            Self::Text { .. } => WidgetKind::Text,
            Self::CoordinateFrame { .. } => WidgetKind::CoordinateFrame,
        }
    }
}

/// A named renderable scene object.
#[derive(Debug, Clone, PartialEq)]
pub struct Widget {
    id: String,
    transform: Option<Mat4>,
    payload: WidgetPayload,
    visible: bool,
}

impl Widget {
    /// Creates a visible widget without an explicit transform.
    pub fn new(id: impl Into<String>, payload: WidgetPayload) -> Self {
        Self {
            id: id.into(),
            transform: None,
            payload,
            visible: true,
        }
    }

    /// Sets an explicit transform.
    #[must_use]
    pub fn with_transform(mut self, transform: Mat4) -> Self {
        self.transform = Some(transform);
        self
    }

    /// Sets the visibility.
    #[must_use]
    pub fn with_visible(mut self, visible: bool) -> Self {
        self.visible = visible;
        self
    }

    /// Returns the unique id of this widget.
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Returns the kind of this widget.
    pub fn kind(&self) -> WidgetKind {
        self.payload.kind()
    }

    /// Returns the explicit transform, if any.
    ///
    /// `None` means the widget does not override the pose it already has in
    /// the scene.
    pub fn transform(&self) -> Option<Mat4> {
        self.transform
    }

    /// Returns the transform to draw with, identity if none was set.
    pub fn model_matrix(&self) -> Mat4 {
        self.transform.unwrap_or(Mat4::IDENTITY)
    }

    pub fn set_transform(&mut self, transform: Option<Mat4>) {
        self.transform = transform;
    }

    pub fn payload(&self) -> &WidgetPayload {
        &self.payload
    }

    pub fn payload_mut(&mut self) -> &mut WidgetPayload {
        &mut self.payload
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }

    pub fn set_visible(&mut self, visible: bool) {
        self.visible = visible;
    }

    /// Returns the vertex buffer as raw bytes for point clouds, meshes and
    /// polylines.
    pub fn vertex_bytes(&self) -> Option<&[u8]> {
        match &self.payload {
            WidgetPayload::PointCloud { points, .. } | WidgetPayload::Polyline { points, .. } => {
                Some(bytemuck::cast_slice(points))
            }
            WidgetPayload::Mesh { vertices, .. } => Some(bytemuck::cast_slice(vertices)),
            _ => None,
        }
    }

    /// Returns the per-element color buffer as raw bytes for point clouds and
    /// meshes.
    pub fn color_bytes(&self) -> Option<&[u8]> {
        match &self.payload {
            WidgetPayload::PointCloud { colors, .. } | WidgetPayload::Mesh { colors, .. } => {
                Some(bytemuck::cast_slice(colors))
            }
            _ => None,
        }
    }
}

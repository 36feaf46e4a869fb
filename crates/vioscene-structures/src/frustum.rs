//! Camera frustum wireframes.

use std::sync::Arc;

use glam::Vec3;
use image::RgbImage;
use vioscene_core::{CameraIntrinsics, PoseSample, Widget, WidgetPayload};

/// Generates the frustum wireframe in the camera frame.
///
/// Nodes: 0 = camera center, 1-4 = near-plane corners (upper-left,
/// upper-right, lower-right, lower-left), 5-7 = orientation triangle above
/// the image's top edge.
pub fn frustum_wireframe(intrinsics: &CameraIntrinsics, depth: f32) -> (Vec<Vec3>, Vec<[u32; 2]>) {
    let [upper_left, upper_right, lower_right, lower_left] = intrinsics.image_corners(depth);

    let frame_center = (upper_left + upper_right + lower_right + lower_left) * 0.25;
    let frame_up = (upper_left + upper_right) * 0.5 - frame_center;
    let frame_right = (upper_right + lower_right) * 0.5 - frame_center;

    let tri_left = frame_center + frame_up * 1.2 - frame_right * 0.7;
    let tri_right = frame_center + frame_up * 1.2 + frame_right * 0.7;
    let tri_top = frame_center + frame_up * 2.0;

    let nodes = vec![
        Vec3::ZERO,
        upper_left,
        upper_right,
        lower_right,
        lower_left,
        tri_left,
        tri_right,
        tri_top,
    ];

    let edges = vec![
        // From center to corners
        [0, 1],
        [0, 2],
        [0, 3],
        [0, 4],
        // Near plane
        [1, 2],
        [2, 3],
        [3, 4],
        [4, 1],
        // Orientation triangle
        [5, 6],
        [6, 7],
        [7, 5],
    ];

    (nodes, edges)
}

/// Builds a frustum widget placed at the sample's pose.
///
/// Without an image the frustum is a bare wireframe.
pub fn frustum_widget(
    id: impl Into<String>,
    sample: &PoseSample,
    intrinsics: &CameraIntrinsics,
    depth: f32,
    image: Option<Arc<RgbImage>>,
    color: Vec3,
) -> Widget {
    let (nodes, edges) = frustum_wireframe(intrinsics, depth);
    Widget::new(
        id,
        WidgetPayload::Frustum {
            intrinsics: *intrinsics,
            nodes,
            edges,
            image,
            color,
        },
    )
    .with_transform(sample.pose())
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Mat4;

    #[test]
    fn test_wireframe_shape() {
        let k = CameraIntrinsics::new(100.0, 100.0, 50.0, 50.0, 100, 100);
        let (nodes, edges) = frustum_wireframe(&k, 1.0);
        assert_eq!(nodes.len(), 8);
        assert_eq!(edges.len(), 11);
        assert!(edges.iter().flatten().all(|&i| (i as usize) < nodes.len()));
        // Near-plane corners sit at the requested depth
        for corner in &nodes[1..5] {
            assert!((corner.z - 1.0).abs() < 1e-6);
        }
        // Orientation triangle points to the image top (-Y)
        assert!(nodes[7].y < nodes[1].y);
    }

    #[test]
    fn test_frustum_widget_uses_pose() {
        let pose = Mat4::from_translation(Vec3::new(0.0, 0.0, 3.0));
        let sample = PoseSample::new(0, pose);
        let widget = frustum_widget("cam", &sample, &CameraIntrinsics::default(), 0.2, None, Vec3::ONE);
        assert_eq!(widget.transform(), Some(pose));
        match widget.payload() {
            WidgetPayload::Frustum { image, .. } => assert!(image.is_none()),
            other => panic!("unexpected payload {other:?}"),
        }
    }
}

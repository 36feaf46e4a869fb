//! Bounded camera trajectory history.

use std::collections::VecDeque;
use std::sync::Arc;

use glam::Vec3;
use image::RgbImage;
use vioscene_core::{color, CameraIntrinsics, PoseSample, Widget, WidgetPayload};

use crate::frustum::frustum_widget;

/// Id of the trajectory polyline widget.
pub const TRAJECTORY_ID: &str = "trajectory";

/// Id of the frustum widget in the given slot.
///
/// Slots are counted from the oldest rendered pose, so a sliding window keeps
/// updating the same widgets instead of creating new ones.
pub fn frustum_id(slot: usize) -> String {
    format!("trajectory_frustum_{slot}")
}

/// Append-only history of camera poses with a fixed capacity.
///
/// When full, adding a pose evicts the oldest one.
#[derive(Debug, Clone)]
pub struct TrajectoryTracker {
    poses: VecDeque<PoseSample>,
    capacity: usize,
    frustum_depth: f32,
    line_color: Vec3,
    frustum_color: Vec3,
    current_frustum_color: Vec3,
}

impl TrajectoryTracker {
    /// Creates an empty tracker. A capacity of zero is treated as one.
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            poses: VecDeque::with_capacity(capacity),
            capacity,
            frustum_depth: 0.2,
            line_color: color::BLUE,
            frustum_color: color::YELLOW,
            current_frustum_color: color::RED,
        }
    }

    /// Sets the distance from camera center to frustum near plane.
    #[must_use]
    pub fn with_frustum_depth(mut self, depth: f32) -> Self {
        self.frustum_depth = depth;
        self
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn len(&self) -> usize {
        self.poses.len()
    }

    pub fn is_empty(&self) -> bool {
        self.poses.is_empty()
    }

    /// Stored poses, oldest first.
    pub fn poses(&self) -> impl ExactSizeIterator<Item = &PoseSample> {
        self.poses.iter()
    }

    pub fn latest(&self) -> Option<&PoseSample> {
        self.poses.back()
    }

    /// Appends a pose, evicting the oldest one when over capacity.
    pub fn add_pose(&mut self, sample: PoseSample) {
        if self.poses.len() == self.capacity {
            self.poses.pop_front();
        }
        self.poses.push_back(sample);
    }

    pub fn clear(&mut self) {
        self.poses.clear();
    }

    /// Builds the trajectory widgets.
    ///
    /// Emits a polyline through every stored pose (only with two or more
    /// poses) and one frustum per pose, or per the `n_last_frustums` most
    /// recent ones. The most recent frustum is textured with `image` if given.
    pub fn render_full(
        &self,
        intrinsics: &CameraIntrinsics,
        image: Option<Arc<RgbImage>>,
        n_last_frustums: Option<usize>,
    ) -> Vec<Widget> {
        let mut widgets = Vec::new();
        if self.poses.is_empty() {
            return widgets;
        }

        if self.poses.len() >= 2 {
            widgets.push(Widget::new(
                TRAJECTORY_ID,
                WidgetPayload::Polyline {
                    points: self.poses.iter().map(PoseSample::position).collect(),
                    color: self.line_color,
                    closed: false,
                },
            ));
        }

        let n = n_last_frustums.map_or(self.poses.len(), |n| n.min(self.poses.len()));
        let first = self.poses.len() - n;
        let mut image = image;
        for (slot, sample) in self.poses.iter().skip(first).enumerate() {
            let is_latest = slot + 1 == n;
            let (texture, color) = if is_latest {
                (image.take(), self.current_frustum_color)
            } else {
                (None, self.frustum_color)
            };
            widgets.push(frustum_widget(
                frustum_id(slot),
                sample,
                intrinsics,
                self.frustum_depth,
                texture,
                color,
            ));
        }

        widgets
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Mat4;
    use proptest::prelude::*;
    use vioscene_core::WidgetKind;

    #[allow(clippy::cast_precision_loss)]
    fn sample(i: i64) -> PoseSample {
        PoseSample::new(i, Mat4::from_translation(Vec3::new(i as f32, 0.0, 0.0)))
    }

    #[test]
    fn test_single_pose_has_no_polyline() {
        let mut tracker = TrajectoryTracker::new(10);
        tracker.add_pose(sample(0));
        let widgets = tracker.render_full(&CameraIntrinsics::default(), None, None);
        assert_eq!(widgets.len(), 1);
        assert_eq!(widgets[0].kind(), WidgetKind::Frustum);
        assert_eq!(widgets[0].id(), frustum_id(0));
    }

    #[test]
    fn test_empty_renders_nothing() {
        let tracker = TrajectoryTracker::new(10);
        assert!(tracker.render_full(&CameraIntrinsics::default(), None, None).is_empty());
    }

    #[test]
    fn test_polyline_and_last_frustums() {
        let mut tracker = TrajectoryTracker::new(10);
        for i in 0..5 {
            tracker.add_pose(sample(i));
        }
        let image = Arc::new(RgbImage::new(4, 4));
        let widgets = tracker.render_full(&CameraIntrinsics::default(), Some(image), Some(2));
        assert_eq!(widgets.len(), 3);
        assert_eq!(widgets[0].id(), TRAJECTORY_ID);
        match widgets[0].payload() {
            WidgetPayload::Polyline { points, .. } => assert_eq!(points.len(), 5),
            other => panic!("unexpected payload {other:?}"),
        }

        // Slot 0 is pose 3, slot 1 is the latest pose and carries the image
        assert_eq!(widgets[1].transform(), Some(sample(3).pose()));
        assert_eq!(widgets[2].transform(), Some(sample(4).pose()));
        match (widgets[1].payload(), widgets[2].payload()) {
            (WidgetPayload::Frustum { image: older, .. }, WidgetPayload::Frustum { image: latest, .. }) => {
                assert!(older.is_none());
                assert!(latest.is_some());
            }
            other => panic!("unexpected payloads {other:?}"),
        }
    }

    #[test]
    fn test_zero_capacity_is_clamped() {
        let mut tracker = TrajectoryTracker::new(0);
        tracker.add_pose(sample(0));
        tracker.add_pose(sample(1));
        assert_eq!(tracker.capacity(), 1);
        assert_eq!(tracker.latest().map(PoseSample::timestamp), Some(1));
    }

    proptest! {
        #[test]
        fn prop_keeps_last_capacity_poses(capacity in 1usize..16, count in 0i64..64) {
            let mut tracker = TrajectoryTracker::new(capacity);
            for i in 0..count {
                tracker.add_pose(sample(i));
            }
            let kept: Vec<i64> = tracker.poses().map(PoseSample::timestamp).collect();
            #[allow(clippy::cast_possible_wrap)]
            let start = (count - capacity as i64).max(0);
            let expected: Vec<i64> = (start..count).collect();
            prop_assert_eq!(kept, expected);
            prop_assert!(tracker.len() <= capacity);
        }
    }
}

//! Point cloud of tracked landmarks.

use std::collections::{BTreeMap, HashSet};

use glam::Vec3;
use vioscene_core::{color, LandmarkId, Widget, WidgetPayload};

/// Id of the landmark point cloud widget.
pub const LANDMARKS_ID: &str = "landmarks";

/// How the backend estimates a landmark; selects its color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum LandmarkKind {
    /// Structureless landmark, drawn in the configured cloud color.
    #[default]
    Smart,
    Projection,
    /// Landmark constrained to a plane.
    Plane,
}

impl LandmarkKind {
    fn color(self, cloud_color: Vec3) -> Vec3 {
        match self {
            Self::Smart => cloud_color,
            Self::Projection => color::GREEN,
            Self::Plane => color::BLUE,
        }
    }
}

/// A uniquely identified 3D point tracked across frames.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Landmark {
    pub id: LandmarkId,
    pub position: Vec3,
    pub kind: LandmarkKind,
}

impl Landmark {
    pub fn new(id: LandmarkId, position: Vec3) -> Self {
        Self {
            id,
            position,
            kind: LandmarkKind::default(),
        }
    }

    #[must_use]
    pub fn with_kind(mut self, kind: LandmarkKind) -> Self {
        self.kind = kind;
        self
    }
}

/// Builds the landmark cloud from landmarks not in `exclude`.
///
/// Duplicate ids keep the last occurrence; points are ordered by id. Returns
/// `None` when no landmark remains.
pub fn landmark_cloud(landmarks: &[Landmark], exclude: &HashSet<LandmarkId>, cloud_color: Vec3) -> Option<Widget> {
    let unique: BTreeMap<LandmarkId, &Landmark> = landmarks
        .iter()
        .filter(|lmk| !exclude.contains(&lmk.id))
        .map(|lmk| (lmk.id, lmk))
        .collect();
    if unique.is_empty() {
        return None;
    }

    let (points, colors) = unique
        .values()
        .map(|lmk| (lmk.position, lmk.kind.color(cloud_color)))
        .unzip();
    Some(Widget::new(LANDMARKS_ID, WidgetPayload::PointCloud { points, colors }))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_excludes_and_dedups() {
        let landmarks = [
            Landmark::new(3, Vec3::X),
            Landmark::new(1, Vec3::Y).with_kind(LandmarkKind::Projection),
            Landmark::new(2, Vec3::Z),
            Landmark::new(3, Vec3::ONE).with_kind(LandmarkKind::Plane),
        ];
        let exclude: HashSet<LandmarkId> = [2].into_iter().collect();
        let widget = landmark_cloud(&landmarks, &exclude, color::WHITE).unwrap();
        match widget.payload() {
            WidgetPayload::PointCloud { points, colors } => {
                assert_eq!(points, &vec![Vec3::Y, Vec3::ONE]);
                assert_eq!(colors, &vec![color::GREEN, color::BLUE]);
            }
            other => panic!("unexpected payload {other:?}"),
        }
    }

    #[test]
    fn test_all_excluded() {
        let landmarks = [Landmark::new(1, Vec3::X)];
        let exclude: HashSet<LandmarkId> = [1].into_iter().collect();
        assert!(landmark_cloud(&landmarks, &exclude, color::WHITE).is_none());
        assert!(landmark_cloud(&[], &HashSet::new(), color::WHITE).is_none());
    }
}

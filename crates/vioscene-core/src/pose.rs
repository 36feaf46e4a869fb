//! Timestamped camera poses.

use glam::{Mat4, Quat, Vec3};

/// Timestamp in nanoseconds.
pub type Timestamp = i64;

/// A camera pose (camera-to-world) stamped with the time it was estimated.
///
/// Samples are immutable once stored in a trajectory.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PoseSample {
    timestamp: Timestamp,
    pose: Mat4,
}

impl PoseSample {
    /// Creates a new pose sample.
    pub fn new(timestamp: Timestamp, pose: Mat4) -> Self {
        Self { timestamp, pose }
    }

    /// Creates a pose sample from a rotation and a translation.
    pub fn from_rotation_translation(timestamp: Timestamp, rotation: Quat, translation: Vec3) -> Self {
        Self::new(timestamp, Mat4::from_rotation_translation(rotation, translation))
    }

    /// Returns the timestamp of this sample.
    pub fn timestamp(&self) -> Timestamp {
        self.timestamp
    }

    /// Returns the camera-to-world transform.
    pub fn pose(&self) -> Mat4 {
        self.pose
    }

    /// Returns the camera position in world coordinates.
    pub fn position(&self) -> Vec3 {
        self.pose.w_axis.truncate()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_position() {
        let sample = PoseSample::from_rotation_translation(7, Quat::IDENTITY, Vec3::new(1.0, 2.0, 3.0));
        assert_eq!(sample.timestamp(), 7);
        assert_eq!(sample.position(), Vec3::new(1.0, 2.0, 3.0));
    }
}

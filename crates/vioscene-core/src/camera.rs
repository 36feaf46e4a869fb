//! Pinhole camera intrinsics.
//!
//! Camera frames follow the computer-vision convention: `+Z` looks forward,
//! `+X` points right and `+Y` points down in the image.

use glam::{Vec2, Vec3};
use serde::{Deserialize, Serialize};

/// Pinhole camera intrinsics (no distortion).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CameraIntrinsics {
    /// Focal length along x, in pixels.
    pub fx: f32,
    /// Focal length along y, in pixels.
    pub fy: f32,
    /// Principal point x, in pixels.
    pub cx: f32,
    /// Principal point y, in pixels.
    pub cy: f32,
    /// Image width in pixels.
    pub width: u32,
    /// Image height in pixels.
    pub height: u32,
}

impl CameraIntrinsics {
    /// Creates new camera intrinsics.
    pub fn new(fx: f32, fy: f32, cx: f32, cy: f32, width: u32, height: u32) -> Self {
        Self {
            fx,
            fy,
            cx,
            cy,
            width,
            height,
        }
    }

    /// Intrinsics of a 752x480 global-shutter stereo camera, a common VIO rig.
    pub fn default_intrinsics() -> Self {
        Self::new(458.0, 458.0, 360.0, 240.0, 752, 480)
    }

    /// Gets the vertical field of view in degrees.
    #[allow(clippy::cast_precision_loss)]
    pub fn fov_vertical_degrees(&self) -> f32 {
        let half = (self.height as f32 * 0.5) / self.fy;
        (2.0 * half.atan()).to_degrees()
    }

    /// Gets the aspect ratio (width / height).
    #[allow(clippy::cast_precision_loss)]
    pub fn aspect_ratio(&self) -> f32 {
        if self.height == 0 {
            return 1.0;
        }
        self.width as f32 / self.height as f32
    }

    /// Back-projects a pixel to the camera frame at the given depth.
    pub fn unproject(&self, pixel: Vec2, depth: f32) -> Vec3 {
        Vec3::new(
            (pixel.x - self.cx) / self.fx * depth,
            (pixel.y - self.cy) / self.fy * depth,
            depth,
        )
    }

    /// Returns the four image corners back-projected at `depth`, ordered
    /// upper-left, upper-right, lower-right, lower-left.
    #[allow(clippy::cast_precision_loss)]
    pub fn image_corners(&self, depth: f32) -> [Vec3; 4] {
        let w = self.width as f32;
        let h = self.height as f32;
        [
            self.unproject(Vec2::new(0.0, 0.0), depth),
            self.unproject(Vec2::new(w, 0.0), depth),
            self.unproject(Vec2::new(w, h), depth),
            self.unproject(Vec2::new(0.0, h), depth),
        ]
    }
}

impl Default for CameraIntrinsics {
    fn default() -> Self {
        Self::default_intrinsics()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unproject_principal_point() {
        let k = CameraIntrinsics::default();
        let p = k.unproject(Vec2::new(k.cx, k.cy), 2.0);
        assert!((p - Vec3::new(0.0, 0.0, 2.0)).length() < 1e-6);
    }

    #[test]
    fn test_image_corners_are_symmetric() {
        let k = CameraIntrinsics::new(100.0, 100.0, 50.0, 25.0, 100, 50);
        let [ul, ur, lr, ll] = k.image_corners(1.0);
        assert!((ul - Vec3::new(-0.5, -0.25, 1.0)).length() < 1e-6);
        assert!((ur - Vec3::new(0.5, -0.25, 1.0)).length() < 1e-6);
        assert!((lr - Vec3::new(0.5, 0.25, 1.0)).length() < 1e-6);
        assert!((ll - Vec3::new(-0.5, 0.25, 1.0)).length() < 1e-6);
    }

    #[test]
    fn test_fov_and_aspect() {
        let k = CameraIntrinsics::new(50.0, 50.0, 50.0, 50.0, 100, 100);
        assert!((k.fov_vertical_degrees() - 90.0).abs() < 1e-4);
        assert_eq!(k.aspect_ratio(), 1.0);
    }
}

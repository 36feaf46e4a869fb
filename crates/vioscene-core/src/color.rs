//! Colors used by scene widgets.
//!
//! Colors are linear RGB triples in `[0, 1]`, stored as [`Vec3`].

use glam::Vec3;

/// Neutral color for geometry that belongs to no cluster.
pub const NEUTRAL_GRAY: Vec3 = Vec3::new(0.5, 0.5, 0.5);
pub const WHITE: Vec3 = Vec3::ONE;
pub const BLACK: Vec3 = Vec3::ZERO;
pub const RED: Vec3 = Vec3::new(1.0, 0.0, 0.0);
pub const GREEN: Vec3 = Vec3::new(0.0, 1.0, 0.0);
pub const BLUE: Vec3 = Vec3::new(0.0, 0.0, 1.0);
pub const YELLOW: Vec3 = Vec3::new(1.0, 1.0, 0.0);

/// Cyclic palette for cluster ids. Never contains [`NEUTRAL_GRAY`].
pub const CLUSTER_PALETTE: [Vec3; 8] = [
    RED,
    GREEN,
    BLUE,
    YELLOW,
    Vec3::new(1.0, 0.0, 1.0),
    Vec3::new(0.0, 1.0, 1.0),
    Vec3::new(1.0, 0.5, 0.0),
    Vec3::new(0.5, 0.0, 1.0),
];

/// Returns the deterministic color of a cluster id.
#[must_use]
pub fn cluster_color(cluster_id: usize) -> Vec3 {
    CLUSTER_PALETTE[cluster_id % CLUSTER_PALETTE.len()]
}

/// Converts a `[0, 1]` color to 8-bit RGB, clamping out-of-range channels.
#[must_use]
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
pub fn to_rgb8(color: Vec3) -> [u8; 3] {
    let c = (color.clamp(Vec3::ZERO, Vec3::ONE) * 255.0).round();
    [c.x as u8, c.y as u8, c.z as u8]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cluster_color_cycles() {
        assert_eq!(cluster_color(0), RED);
        assert_eq!(cluster_color(1), GREEN);
        assert_eq!(cluster_color(CLUSTER_PALETTE.len()), RED);
        assert_eq!(cluster_color(CLUSTER_PALETTE.len() + 2), BLUE);
    }

    #[test]
    fn test_palette_excludes_neutral() {
        assert!(!CLUSTER_PALETTE.contains(&NEUTRAL_GRAY));
    }

    #[test]
    fn test_to_rgb8() {
        assert_eq!(to_rgb8(WHITE), [255, 255, 255]);
        assert_eq!(to_rgb8(NEUTRAL_GRAY), [128, 128, 128]);
        assert_eq!(to_rgb8(Vec3::new(2.0, -1.0, 0.0)), [255, 0, 0]);
    }
}

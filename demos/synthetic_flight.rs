#![allow(
    clippy::cast_precision_loss,
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss
)]
//! Drives the scene composer with a synthetic VIO run.
//!
//! A camera circles over a floor and a wall. Every frame it sees a small
//! triangulated patch of the floor, a handful of landmarks, and, while the
//! wall is in view, the wall plane with its constrained landmarks.
//!
//! Run with `RUST_LOG=debug cargo run --example synthetic_flight` to see
//! what the backend receives.

use std::f32::consts::TAU;
use std::sync::Arc;

use image::{Rgb, RgbImage};
use vioscene::*;

const FRAMES: i64 = 40;

fn camera_pose(t: f32) -> Mat4 {
    let angle = t * TAU;
    let position = Vec3::new(3.0 * angle.cos(), 3.0 * angle.sin(), 1.5);
    Mat4::look_at_rh(position, Vec3::ZERO, Vec3::Z).inverse()
}

/// A 2x2 grid of floor triangles around `center`, split in two clusters.
fn floor_patch(center: Vec3, first_lmk: LandmarkId) -> (Mesh, Vec<TriangleCluster>) {
    let mut vertices = Vec::new();
    for j in 0..3 {
        for i in 0..3 {
            vertices.push(center + Vec3::new(i as f32 * 0.5 - 0.5, j as f32 * 0.5 - 0.5, 0.0));
        }
    }
    let mut triangles = Vec::new();
    for j in 0..2u32 {
        for i in 0..2u32 {
            let a = j * 3 + i;
            triangles.push([a, a + 1, a + 4]);
            triangles.push([a, a + 4, a + 3]);
        }
    }
    let ids = (first_lmk..first_lmk + vertices.len() as u64).collect();
    let mesh = Mesh::from_triangles(vertices, &triangles).with_landmark_ids(ids);
    let clusters = vec![
        TriangleCluster::new(0, (0..4).collect(), Vec3::Z),
        TriangleCluster::new(1, (4..8).collect(), Vec3::Z),
    ];
    (mesh, clusters)
}

fn checkerboard(width: u32, height: u32) -> RgbImage {
    RgbImage::from_fn(width, height, |x, y| {
        if (x / 16 + y / 16) % 2 == 0 {
            Rgb([220, 220, 220])
        } else {
            Rgb([40, 40, 40])
        }
    })
}

fn main() {
    init_logging();

    let options = Options {
        trajectory_capacity: 20,
        n_last_frustums: Some(5),
        visualize_convex_hulls: true,
        ..Options::default()
    };
    let mut composer = SceneComposer::new(options, CameraIntrinsics::default());
    let mut backend = LogBackend::new();
    let image = Arc::new(checkerboard(64, 48));

    let wall = Plane::new(1, Vec3::X, 2.0, 2);

    for frame in 0..FRAMES {
        let t = frame as f32 / FRAMES as f32;
        let pose = camera_pose(t);
        let center = pose.w_axis.truncate() * Vec3::new(0.5, 0.5, 0.0);

        let first_lmk = 1000 * frame as u64;
        let (mesh, clusters) = floor_patch(center, first_lmk);

        let mut landmarks: Vec<Landmark> = mesh
            .vertices()
            .iter()
            .zip(first_lmk..)
            .map(|(&position, id)| Landmark::new(id, position))
            .collect();
        let wall_lmks: Vec<LandmarkId> = (0..4).map(|k| 10 + (frame as u64 + k) % 6).collect();
        for &id in &wall_lmks {
            let y = id as f32 * 0.2 - 2.5;
            landmarks.push(Landmark::new(id, Vec3::new(2.1, y, 0.8)).with_kind(LandmarkKind::Plane));
        }

        let mut input = FrameInput::new(frame * 50_000_000)
            .with_pose(pose)
            .with_mesh(mesh, clusters)
            .with_landmarks(landmarks)
            .with_frustum_image(Arc::clone(&image));
        if t < 0.5 {
            input = input.with_planes(vec![ObservedPlane::new(wall, wall_lmks)]);
        }

        let update = composer.render(input, &mut backend);
        log::info!(
            "frame {frame}: {} widgets, removed {:?}",
            update.widgets.len(),
            update.removed
        );
    }

    println!(
        "{} frames, {} upserts, {} removals, {} widgets live",
        backend.frames(),
        backend.upserts(),
        backend.removals(),
        composer.registry().len()
    );
}

//! vioscene: incremental 3D scene state for visual-inertial odometry.
//!
//! Every frame, the upstream pipeline hands over a camera pose, an optional
//! triangulated mesh with triangle clusters, tracked landmarks and detected
//! planes. The [`SceneComposer`] turns that into a set of named widgets,
//! updating existing ones in place and retiring the ones that no longer
//! apply, and passes the result to a [`RenderBackend`].
//!
//! # Quick Start
//!
//! ```no_run
//! use vioscene::*;
//!
//! init_logging();
//!
//! let mut composer = SceneComposer::new(Options::default(), CameraIntrinsics::default());
//! let mut backend = LogBackend::new();
//!
//! let ground = Plane::new(0, Vec3::Z, 0.0, 1);
//! let input = FrameInput::new(0)
//!     .with_pose(Mat4::IDENTITY)
//!     .with_landmarks(vec![Landmark::new(7, Vec3::new(0.0, 0.0, 0.1))])
//!     .with_planes(vec![ObservedPlane::new(ground, vec![7])]);
//!
//! let update = composer.render(input, &mut backend);
//! assert!(update.contains(&plane_widget_id(0)));
//! ```
//!
//! # Crates
//!
//! - `vioscene-core`: widgets, registry, options, errors
//! - `vioscene-structures`: trajectory, plane constraints, mesh coloring
//! - `vioscene` (this crate): per-frame composition and PLY export

#![allow(clippy::missing_errors_doc)]
#![allow(clippy::must_use_candidate)]

mod composer;
mod export;
mod frame;
mod log_backend;

pub use composer::{cluster_hull_id, SceneComposer, WORLD_FRAME_ID};
pub use export::{write_mesh_ply, write_mesh_ply_file, MeshLogger, ACCUMULATED_MESH_FILE};
pub use frame::{FrameInput, ObservedPlane};
pub use log_backend::LogBackend;

// Re-export core types
pub use vioscene_core::{
    color, CameraIntrinsics, LandmarkId, Options, PlaneId, PoseSample, RenderBackend, Result,
    SceneError, SceneRegistry, SceneUpdate, Timestamp, Upserted, VisualizationType, Widget,
    WidgetKind, WidgetPayload, Mat4, Quat, Vec2, Vec3,
};

// Re-export structures
pub use vioscene_structures::{
    closest_point_on_plane, colorize_mesh, constraint_line_id, face_colors, frustum_id,
    plane_label_id, plane_widget_id, validate_clusters, Landmark, LandmarkKind, Mesh, Plane,
    PlaneConstraintIndex, TrajectoryTracker, TriangleCluster, LANDMARKS_ID, MESH_ID, TRAJECTORY_ID,
};

/// Initializes `env_logger` from `RUST_LOG`. Safe to call more than once.
pub fn init_logging() {
    let _ = env_logger::try_init();
}

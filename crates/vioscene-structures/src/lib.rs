//! Scene structures for vioscene.
//!
//! - [`TrajectoryTracker`]: bounded pose history rendered as a polyline and
//!   camera frustums
//! - [`PlaneConstraintIndex`]: plane widgets and their landmark constraint lines
//! - [`Mesh`] and the cluster colorizer ([`colorize_mesh`])
//! - Landmark point clouds

#![allow(clippy::missing_panics_doc)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::module_name_repetitions)]

pub mod frustum;
pub mod landmarks;
pub mod mesh;
pub mod plane_constraints;
pub mod trajectory;

pub use frustum::{frustum_widget, frustum_wireframe};
pub use landmarks::{landmark_cloud, Landmark, LandmarkKind, LANDMARKS_ID};
pub use mesh::{
    cluster_convex_hull, colorize_mesh, face_colors, validate_clusters, Mesh, TriangleCluster, MESH_ID,
};
pub use plane_constraints::{
    closest_point_on_plane, constraint_line_id, plane_label_id, plane_widget_id, Plane,
    PlaneConstraintIndex, DEGENERATE_NORMAL_EPS,
};
pub use trajectory::{frustum_id, TrajectoryTracker, TRAJECTORY_ID};

//! Core abstractions for vioscene.
//!
//! This crate provides the fundamental types used throughout vioscene:
//! - [`Widget`] named scene objects and their payloads
//! - [`SceneRegistry`], the id-keyed source of truth for the displayed scene
//! - [`RenderBackend`] and [`SceneUpdate`], the hand-off to whatever draws
//! - Configuration [`Options`] and the [`SceneError`] type

// Documentation lints - internal functions don't need exhaustive panic/error docs
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::missing_errors_doc)]
// Options structs legitimately have many boolean flags
#![allow(clippy::struct_excessive_bools)]
// Builder patterns return Self which doesn't need must_use
#![allow(clippy::must_use_candidate)]

pub mod backend;
pub mod camera;
pub mod color;
pub mod error;
pub mod options;
pub mod pose;
pub mod registry;
pub mod widget;

pub use backend::{RenderBackend, SceneUpdate};
pub use camera::CameraIntrinsics;
pub use error::{Result, SceneError};
pub use options::{Options, VisualizationType};
pub use pose::{PoseSample, Timestamp};
pub use registry::{SceneRegistry, Upserted};
pub use widget::{Widget, WidgetKind, WidgetPayload};

/// Identifier of a tracked 3D landmark.
pub type LandmarkId = u64;

/// Identifier of a detected plane, assigned monotonically upstream.
pub type PlaneId = u64;

// Re-export glam types for convenience
pub use glam::{Mat4, Quat, Vec2, Vec3};

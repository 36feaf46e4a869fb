//! Error types for vioscene.

use thiserror::Error;

/// The main error type for vioscene operations.
///
/// Normal frame composition never fails: degenerate geometry is reported as
/// "nothing to draw" instead. These variants cover caller contract checks,
/// configuration loading and mesh export.
#[derive(Error, Debug)]
pub enum SceneError {
    /// A triangle cluster references a face that is not in the mesh.
    #[error("cluster {cluster_id} references face {face} but the mesh has {num_faces} faces")]
    FaceIndexOutOfRange {
        cluster_id: usize,
        face: usize,
        num_faces: usize,
    },

    /// A face references a vertex that is not in the mesh.
    #[error("face {face} references vertex {vertex} but the mesh has {num_vertices} vertices")]
    VertexIndexOutOfRange {
        face: usize,
        vertex: u32,
        num_vertices: usize,
    },

    /// Data size mismatch.
    #[error("data size mismatch: expected {expected}, got {actual}")]
    SizeMismatch { expected: usize, actual: usize },

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// A specialized Result type for vioscene operations.
pub type Result<T> = std::result::Result<T, SceneError>;

//! Surface mesh input and per-cluster coloring.
//!
//! The mesh is rebuilt from upstream triangulation every frame; nothing here
//! diffs vertices between frames.

mod colorize;
mod convex_hull;

pub use colorize::{colorize_mesh, face_colors};
pub use convex_hull::{cluster_convex_hull, convex_hull_2d};

use glam::{Vec2, Vec3};
use vioscene_core::{LandmarkId, Result, SceneError, Widget, WidgetPayload};

/// Id of the mesh widget.
pub const MESH_ID: &str = "mesh";

/// A polygon mesh as produced by upstream triangulation.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Mesh {
    vertices: Vec<Vec3>,
    faces: Vec<Vec<u32>>,
    colors: Option<Vec<Vec3>>,
    tcoords: Option<Vec<Vec2>>,
    landmark_ids: Option<Vec<LandmarkId>>,
}

impl Mesh {
    /// Creates a mesh from vertices and polygon faces.
    pub fn new(vertices: Vec<Vec3>, faces: Vec<Vec<u32>>) -> Self {
        Self {
            vertices,
            faces,
            ..Self::default()
        }
    }

    /// Creates a mesh from triangles.
    pub fn from_triangles(vertices: Vec<Vec3>, triangles: &[[u32; 3]]) -> Self {
        Self::new(vertices, triangles.iter().map(|t| t.to_vec()).collect())
    }

    /// Attaches per-vertex colors.
    #[must_use]
    pub fn with_colors(mut self, colors: Vec<Vec3>) -> Self {
        self.colors = Some(colors);
        self
    }

    /// Attaches per-vertex texture coordinates.
    #[must_use]
    pub fn with_tcoords(mut self, tcoords: Vec<Vec2>) -> Self {
        self.tcoords = Some(tcoords);
        self
    }

    /// Attaches the landmark id each vertex was triangulated from.
    #[must_use]
    pub fn with_landmark_ids(mut self, ids: Vec<LandmarkId>) -> Self {
        self.landmark_ids = Some(ids);
        self
    }

    pub fn vertices(&self) -> &[Vec3] {
        &self.vertices
    }

    pub fn faces(&self) -> &[Vec<u32>] {
        &self.faces
    }

    pub fn colors(&self) -> Option<&[Vec3]> {
        self.colors.as_deref()
    }

    pub fn tcoords(&self) -> Option<&[Vec2]> {
        self.tcoords.as_deref()
    }

    pub fn landmark_ids(&self) -> Option<&[LandmarkId]> {
        self.landmark_ids.as_deref()
    }

    pub fn num_vertices(&self) -> usize {
        self.vertices.len()
    }

    pub fn num_faces(&self) -> usize {
        self.faces.len()
    }

    /// A mesh without faces has nothing to draw.
    pub fn is_empty(&self) -> bool {
        self.faces.is_empty()
    }

    /// Checks that every face index refers to an existing vertex and that
    /// per-vertex buffers match the vertex count.
    pub fn validate(&self) -> Result<()> {
        let num_vertices = self.vertices.len();
        for (face, indices) in self.faces.iter().enumerate() {
            if let Some(&vertex) = indices.iter().find(|&&v| v as usize >= num_vertices) {
                return Err(SceneError::VertexIndexOutOfRange {
                    face,
                    vertex,
                    num_vertices,
                });
            }
        }
        for len in [
            self.colors.as_ref().map(Vec::len),
            self.tcoords.as_ref().map(Vec::len),
            self.landmark_ids.as_ref().map(Vec::len),
        ]
        .into_iter()
        .flatten()
        {
            if len != num_vertices {
                return Err(SceneError::SizeMismatch {
                    expected: num_vertices,
                    actual: len,
                });
            }
        }
        Ok(())
    }

    /// Builds the mesh widget with the given per-vertex colors.
    pub fn to_widget(&self, colors: Vec<Vec3>) -> Widget {
        Widget::new(
            MESH_ID,
            WidgetPayload::Mesh {
                vertices: self.vertices.clone(),
                faces: self.faces.clone(),
                colors,
                tcoords: self.tcoords.clone(),
            },
        )
    }
}

/// A set of mesh faces sharing a cluster id, e.g. the triangles of one
/// detected planar surface.
#[derive(Debug, Clone, PartialEq)]
pub struct TriangleCluster {
    pub cluster_id: usize,
    /// Indices into the mesh's face array.
    pub triangle_ids: Vec<usize>,
    /// Normal of the surface the cluster lies on.
    pub normal: Vec3,
}

impl TriangleCluster {
    pub fn new(cluster_id: usize, triangle_ids: Vec<usize>, normal: Vec3) -> Self {
        Self {
            cluster_id,
            triangle_ids,
            normal,
        }
    }
}

/// Checks that every cluster only references faces present in the mesh.
///
/// The colorizer indexes faces directly; callers run this first.
pub fn validate_clusters(mesh: &Mesh, clusters: &[TriangleCluster]) -> Result<()> {
    let num_faces = mesh.num_faces();
    for cluster in clusters {
        if let Some(&face) = cluster.triangle_ids.iter().find(|&&f| f >= num_faces) {
            return Err(SceneError::FaceIndexOutOfRange {
                cluster_id: cluster.cluster_id,
                face,
                num_faces,
            });
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn quad() -> Mesh {
        Mesh::from_triangles(
            vec![Vec3::ZERO, Vec3::X, Vec3::new(1.0, 1.0, 0.0), Vec3::Y],
            &[[0, 1, 2], [0, 2, 3]],
        )
    }

    #[test]
    fn test_validate_ok() {
        assert!(quad().validate().is_ok());
        assert!(validate_clusters(&quad(), &[TriangleCluster::new(0, vec![0, 1], Vec3::Z)]).is_ok());
    }

    #[test]
    fn test_validate_vertex_out_of_range() {
        let mesh = Mesh::from_triangles(vec![Vec3::ZERO, Vec3::X, Vec3::Y], &[[0, 1, 3]]);
        assert!(matches!(
            mesh.validate(),
            Err(SceneError::VertexIndexOutOfRange { face: 0, vertex: 3, .. })
        ));
    }

    #[test]
    fn test_validate_buffer_sizes() {
        let mesh = quad().with_colors(vec![Vec3::ONE; 3]);
        assert!(matches!(
            mesh.validate(),
            Err(SceneError::SizeMismatch { expected: 4, actual: 3 })
        ));
    }

    #[test]
    fn test_validate_clusters_out_of_range() {
        let clusters = [TriangleCluster::new(4, vec![0, 2], Vec3::Z)];
        assert!(matches!(
            validate_clusters(&quad(), &clusters),
            Err(SceneError::FaceIndexOutOfRange {
                cluster_id: 4,
                face: 2,
                num_faces: 2
            })
        ));
    }

    #[test]
    fn test_to_widget() {
        let mesh = quad().with_tcoords(vec![Vec2::ZERO; 4]);
        let widget = mesh.to_widget(vec![Vec3::ONE; 4]);
        assert_eq!(widget.id(), MESH_ID);
        match widget.payload() {
            WidgetPayload::Mesh { faces, tcoords, .. } => {
                assert_eq!(faces.len(), 2);
                assert!(tcoords.is_some());
            }
            other => panic!("unexpected payload {other:?}"),
        }
    }
}

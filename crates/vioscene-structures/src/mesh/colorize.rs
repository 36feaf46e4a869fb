//! Cluster-based mesh coloring.

use glam::Vec3;
use vioscene_core::color::{cluster_color, NEUTRAL_GRAY};

use super::{Mesh, TriangleCluster};

/// Computes one color per face.
///
/// Faces start neutral gray; each cluster, in list order, paints its faces
/// with its palette color, so when a face is in several clusters the last one
/// wins.
pub fn face_colors(mesh: &Mesh, clusters: &[TriangleCluster]) -> Vec<Vec3> {
    let mut colors = vec![NEUTRAL_GRAY; mesh.num_faces()];
    for cluster in clusters {
        let color = cluster_color(cluster.cluster_id);
        for &face in &cluster.triangle_ids {
            colors[face] = color;
        }
    }
    colors
}

/// Writes one color per vertex into `out`.
///
/// A vertex takes the color of the last face, in face order, that uses it.
/// Vertices shared by faces of different clusters therefore show only one of
/// them; vertices used by no face stay neutral gray.
///
/// Returns `false` and leaves `out` untouched when the mesh has no faces.
/// Cluster face indices must be in range (see
/// [`validate_clusters`](super::validate_clusters)).
pub fn colorize_mesh(mesh: &Mesh, clusters: &[TriangleCluster], out: &mut Vec<Vec3>) -> bool {
    if mesh.is_empty() {
        return false;
    }

    let per_face = face_colors(mesh, clusters);
    out.clear();
    out.resize(mesh.num_vertices(), NEUTRAL_GRAY);
    for (face, color) in mesh.faces().iter().zip(per_face) {
        for &vertex in face {
            out[vertex as usize] = color;
        }
    }
    true
}

#[cfg(test)]
mod tests {
    use super::*;

    fn strip() -> Mesh {
        // Three triangles in a row; face 1 shares vertices with both others
        Mesh::from_triangles(
            vec![
                Vec3::ZERO,
                Vec3::X,
                Vec3::Y,
                Vec3::new(1.0, 1.0, 0.0),
                Vec3::new(2.0, 0.0, 0.0),
                Vec3::new(2.0, 1.0, 0.0),
                Vec3::new(5.0, 5.0, 5.0),
            ],
            &[[0, 1, 2], [1, 3, 2], [1, 4, 5]],
        )
    }

    #[test]
    fn test_last_cluster_wins() {
        let mesh = strip();
        let clusters = [
            TriangleCluster::new(0, vec![0], Vec3::Z),
            TriangleCluster::new(1, vec![0, 1], Vec3::Z),
        ];
        let colors = face_colors(&mesh, &clusters);
        assert_eq!(colors[0], cluster_color(1));
        assert_eq!(colors[1], cluster_color(1));
        assert_eq!(colors[2], NEUTRAL_GRAY);
    }

    #[test]
    fn test_vertex_takes_last_face_color() {
        let mesh = strip();
        let clusters = [
            TriangleCluster::new(0, vec![0], Vec3::Z),
            TriangleCluster::new(2, vec![1], Vec3::Z),
        ];
        let mut out = Vec::new();
        assert!(colorize_mesh(&mesh, &clusters, &mut out));
        assert_eq!(out.len(), mesh.num_vertices());

        assert_eq!(out[0], cluster_color(0));
        // Vertex 2 is in faces 0 and 1; face 1 comes last
        assert_eq!(out[2], cluster_color(2));
        assert_eq!(out[3], cluster_color(2));
        // Vertex 1 is also in unclustered face 2, which comes last
        assert_eq!(out[1], NEUTRAL_GRAY);
        assert_eq!(out[4], NEUTRAL_GRAY);
        // Unreferenced vertex
        assert_eq!(out[6], NEUTRAL_GRAY);
    }

    #[test]
    fn test_no_clusters_is_uniform() {
        let mesh = strip();
        let mut out = vec![Vec3::ONE; 2];
        assert!(colorize_mesh(&mesh, &[], &mut out));
        assert!(out.iter().all(|&c| c == NEUTRAL_GRAY));
        assert_eq!(out.len(), 7);
    }

    #[test]
    fn test_empty_mesh_leaves_output_untouched() {
        let mesh = Mesh::new(vec![Vec3::ZERO, Vec3::X], Vec::new());
        let mut out = vec![Vec3::ONE; 3];
        assert!(!colorize_mesh(&mesh, &[TriangleCluster::new(0, vec![], Vec3::Z)], &mut out));
        assert_eq!(out, vec![Vec3::ONE; 3]);
    }
}

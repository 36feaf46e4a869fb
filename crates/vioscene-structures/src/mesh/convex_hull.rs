//! Outline of a triangle cluster, projected along the cluster normal.

use std::collections::BTreeSet;

use glam::{Vec2, Vec3};

use super::{Mesh, TriangleCluster};

/// 2D convex hull (Andrew's monotone chain), counter-clockwise, without
/// collinear points.
pub fn convex_hull_2d(points: &[Vec2]) -> Vec<Vec2> {
    let mut sorted = points.to_vec();
    sorted.sort_by(|a, b| a.x.total_cmp(&b.x).then(a.y.total_cmp(&b.y)));
    sorted.dedup();
    if sorted.len() < 3 {
        return sorted;
    }

    let cross = |o: Vec2, a: Vec2, b: Vec2| (a - o).perp_dot(b - o);
    let mut hull: Vec<Vec2> = Vec::with_capacity(sorted.len() * 2);

    // Lower hull
    for &p in &sorted {
        while hull.len() >= 2 && cross(hull[hull.len() - 2], hull[hull.len() - 1], p) <= 0.0 {
            hull.pop();
        }
        hull.push(p);
    }
    // Upper hull
    let lower_len = hull.len() + 1;
    for &p in sorted.iter().rev().skip(1) {
        while hull.len() >= lower_len && cross(hull[hull.len() - 2], hull[hull.len() - 1], p) <= 0.0 {
            hull.pop();
        }
        hull.push(p);
    }
    hull.pop();
    hull
}

/// Convex hull of a cluster's vertices in the plane orthogonal to the
/// cluster normal, lifted back to 3D at the vertices' mean height.
///
/// Returns `None` for a degenerate normal or when the projected vertices
/// span no area.
pub fn cluster_convex_hull(cluster: &TriangleCluster, mesh: &Mesh) -> Option<Vec<Vec3>> {
    let normal = cluster.normal.try_normalize()?;
    let u = normal.any_orthonormal_vector();
    let v = normal.cross(u);

    let vertex_ids: BTreeSet<u32> = cluster
        .triangle_ids
        .iter()
        .filter_map(|&face| mesh.faces().get(face))
        .flatten()
        .copied()
        .collect();
    if vertex_ids.len() < 3 {
        return None;
    }

    let points: Vec<Vec3> = vertex_ids
        .iter()
        .filter_map(|&i| mesh.vertices().get(i as usize).copied())
        .collect();
    #[allow(clippy::cast_precision_loss)]
    let height = points.iter().map(|p| p.dot(normal)).sum::<f32>() / points.len() as f32;
    let projected: Vec<Vec2> = points.iter().map(|p| Vec2::new(p.dot(u), p.dot(v))).collect();

    let hull = convex_hull_2d(&projected);
    if hull.len() < 3 {
        return None;
    }
    Some(
        hull.into_iter()
            .map(|p| u * p.x + v * p.y + normal * height)
            .collect(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hull_drops_interior_points() {
        let points = [
            Vec2::new(0.0, 0.0),
            Vec2::new(2.0, 0.0),
            Vec2::new(2.0, 2.0),
            Vec2::new(0.0, 2.0),
            Vec2::new(1.0, 1.0),
            Vec2::new(1.0, 0.0),
        ];
        let hull = convex_hull_2d(&points);
        assert_eq!(hull.len(), 4);
        assert!(!hull.contains(&Vec2::new(1.0, 1.0)));
        assert!(!hull.contains(&Vec2::new(1.0, 0.0)));
    }

    #[test]
    fn test_cluster_hull_lies_on_plane() {
        let mesh = Mesh::from_triangles(
            vec![
                Vec3::new(0.0, 0.0, 1.0),
                Vec3::new(1.0, 0.0, 1.0),
                Vec3::new(1.0, 1.0, 1.0),
                Vec3::new(0.0, 1.0, 1.0),
            ],
            &[[0, 1, 2], [0, 2, 3]],
        );
        let cluster = TriangleCluster::new(0, vec![0, 1], Vec3::Z);
        let hull = cluster_convex_hull(&cluster, &mesh).unwrap();
        assert_eq!(hull.len(), 4);
        for p in &hull {
            assert!((p.z - 1.0).abs() < 1e-5);
            assert!(mesh.vertices().iter().any(|v| (*v - *p).length() < 1e-5));
        }
    }

    #[test]
    fn test_degenerate_cluster() {
        let mesh = Mesh::from_triangles(vec![Vec3::ZERO, Vec3::X, Vec3::Y], &[[0, 1, 2]]);
        assert!(cluster_convex_hull(&TriangleCluster::new(0, vec![0], Vec3::ZERO), &mesh).is_none());
        // Seen edge-on, the triangle collapses to a segment
        assert!(cluster_convex_hull(&TriangleCluster::new(0, vec![0], Vec3::Y), &mesh).is_none());
        assert!(cluster_convex_hull(&TriangleCluster::new(0, vec![], Vec3::Z), &mesh).is_none());
    }
}

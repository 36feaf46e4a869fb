//! Planes and the landmark-to-plane constraint lines drawn for them.
//!
//! Each observed plane owns a plane widget, an optional text label and one
//! line per associated landmark, connecting the landmark to its closest point
//! on the plane. The index remembers which line belongs to which
//! `(plane, landmark)` pair so a re-observed pair moves its existing line
//! instead of drawing a second one, and so everything a plane owns can be
//! removed with it.

use std::collections::{BTreeMap, HashSet};

use glam::Vec3;
use vioscene_core::{color, LandmarkId, PlaneId, SceneRegistry, Widget, WidgetPayload};

/// Normals shorter than this are considered degenerate.
pub const DEGENERATE_NORMAL_EPS: f32 = 1e-6;

const LABEL_SCALE: f32 = 0.1;

/// A detected plane: `normal · x = distance`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Plane {
    pub id: PlaneId,
    pub normal: Vec3,
    pub distance: f32,
    /// Cluster the plane was fitted to; selects its color.
    pub cluster_id: usize,
}

impl Plane {
    pub fn new(id: PlaneId, normal: Vec3, distance: f32, cluster_id: usize) -> Self {
        Self {
            id,
            normal,
            distance,
            cluster_id,
        }
    }

    /// Unit normal, or `None` if the normal is degenerate.
    pub fn unit_normal(&self) -> Option<Vec3> {
        unit_normal(self.normal)
    }

    /// Closest point of the plane to the origin, or `None` if the normal is
    /// degenerate or the distance is not finite.
    pub fn center(&self) -> Option<Vec3> {
        closest_point_on_plane(self.normal, self.distance, Vec3::ZERO)
    }
}

fn unit_normal(normal: Vec3) -> Option<Vec3> {
    let length = normal.length();
    if !length.is_finite() || length < DEGENERATE_NORMAL_EPS {
        return None;
    }
    Some(normal / length)
}

/// Projects `point` onto the plane `normal · x = distance`.
///
/// The normal need not be unit length. Returns `None` when it is degenerate
/// or `distance` is not finite.
pub fn closest_point_on_plane(normal: Vec3, distance: f32, point: Vec3) -> Option<Vec3> {
    if !distance.is_finite() {
        return None;
    }
    let length = normal.length();
    let n = unit_normal(normal)?;
    let signed_distance = n.dot(point) - distance / length;
    Some(point - n * signed_distance)
}

pub fn plane_widget_id(plane_id: PlaneId) -> String {
    format!("plane_{plane_id}")
}

pub fn plane_label_id(plane_id: PlaneId) -> String {
    format!("plane_{plane_id}_label")
}

pub fn constraint_line_id(plane_id: PlaneId, lmk_id: LandmarkId) -> String {
    format!("plane_{plane_id}_lmk_{lmk_id}")
}

#[derive(Debug, Clone)]
struct PlaneEntry {
    lines: BTreeMap<LandmarkId, String>,
    has_label: bool,
    color: Vec3,
}

/// Tracks the widgets owned by every live plane.
#[derive(Debug, Clone, Default)]
pub struct PlaneConstraintIndex {
    planes: BTreeMap<PlaneId, PlaneEntry>,
}

impl PlaneConstraintIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates or refreshes the plane widget and, if `with_label`, its text
    /// label. A label that is no longer wanted is removed.
    ///
    /// Returns the ids of removed widgets, or `None` without touching the
    /// scene when the plane is degenerate (normal too short or distance not
    /// finite).
    pub fn upsert_plane(
        &mut self,
        registry: &mut SceneRegistry,
        plane: &Plane,
        with_label: bool,
        size: f32,
    ) -> Option<Vec<String>> {
        let (Some(normal), Some(center)) = (plane.unit_normal(), plane.center()) else {
            log::debug!("skipping degenerate plane {}", plane.id);
            return None;
        };
        let plane_color = color::cluster_color(plane.cluster_id);

        registry.upsert(Widget::new(
            plane_widget_id(plane.id),
            WidgetPayload::Plane {
                center,
                normal,
                size,
                color: plane_color,
            },
        ));

        let entry = self.planes.entry(plane.id).or_insert_with(|| {
            log::debug!("tracking new plane {}", plane.id);
            PlaneEntry {
                lines: BTreeMap::new(),
                has_label: false,
                color: plane_color,
            }
        });
        entry.color = plane_color;

        let mut removed = Vec::new();
        if with_label {
            registry.upsert(Widget::new(
                plane_label_id(plane.id),
                WidgetPayload::Text {
                    text: format!("Plane {}", plane.id),
                    position: center,
                    scale: LABEL_SCALE,
                    color: plane_color,
                },
            ));
        } else if entry.has_label {
            let label = plane_label_id(plane.id);
            if registry.remove(&label).is_some() {
                removed.push(label);
            }
        }
        entry.has_label = with_label;

        Some(removed)
    }

    /// Creates or moves the line from landmark `lmk_id` at `point` to its
    /// closest point on the plane.
    ///
    /// Returns the line's widget id, or `None` if the plane is not tracked or
    /// degenerate.
    pub fn add_constraint(
        &mut self,
        registry: &mut SceneRegistry,
        plane_id: PlaneId,
        lmk_id: LandmarkId,
        normal: Vec3,
        distance: f32,
        point: Vec3,
    ) -> Option<String> {
        let Some(entry) = self.planes.get_mut(&plane_id) else {
            log::debug!("constraint for untracked plane {plane_id} ignored");
            return None;
        };
        let Some(foot) = closest_point_on_plane(normal, distance, point) else {
            log::debug!("constraint {plane_id}/{lmk_id} skipped: degenerate plane");
            return None;
        };

        let id = entry
            .lines
            .entry(lmk_id)
            .or_insert_with(|| constraint_line_id(plane_id, lmk_id))
            .clone();
        registry.upsert(Widget::new(
            id.clone(),
            WidgetPayload::Line {
                from: point,
                to: foot,
                color: entry.color,
            },
        ));
        Some(id)
    }

    /// Removes every constraint line of `plane_id` whose landmark is not in
    /// `live_lmk_ids`. Returns the ids of removed widgets.
    pub fn prune_stale(
        &mut self,
        registry: &mut SceneRegistry,
        plane_id: PlaneId,
        live_lmk_ids: &HashSet<LandmarkId>,
    ) -> Vec<String> {
        let Some(entry) = self.planes.get_mut(&plane_id) else {
            return Vec::new();
        };

        let mut removed = Vec::new();
        entry.lines.retain(|lmk_id, line_id| {
            if live_lmk_ids.contains(lmk_id) {
                return true;
            }
            if registry.remove(line_id).is_some() {
                removed.push(line_id.clone());
            }
            false
        });
        if !removed.is_empty() {
            log::debug!("pruned {} stale constraints of plane {plane_id}", removed.len());
        }
        removed
    }

    /// Removes the plane widget, its label and all its constraint lines, and
    /// forgets the plane. Returns the ids of removed widgets.
    pub fn remove_plane(&mut self, registry: &mut SceneRegistry, plane_id: PlaneId) -> Vec<String> {
        let mut removed = Vec::new();
        if let Some(entry) = self.planes.remove(&plane_id) {
            for line_id in entry.lines.into_values() {
                if registry.remove(&line_id).is_some() {
                    removed.push(line_id);
                }
            }
        }
        for id in [plane_widget_id(plane_id), plane_label_id(plane_id)] {
            if registry.remove(&id).is_some() {
                removed.push(id);
            }
        }
        log::debug!("removed plane {plane_id} ({} widgets)", removed.len());
        removed
    }

    pub fn contains_plane(&self, plane_id: PlaneId) -> bool {
        self.planes.contains_key(&plane_id)
    }

    /// Ids of all tracked planes, ascending.
    pub fn plane_ids(&self) -> impl Iterator<Item = PlaneId> + '_ {
        self.planes.keys().copied()
    }

    pub fn num_planes(&self) -> usize {
        self.planes.len()
    }

    /// Widget id of the line for `(plane_id, lmk_id)`, if one exists.
    pub fn constraint_id(&self, plane_id: PlaneId, lmk_id: LandmarkId) -> Option<&str> {
        self.planes
            .get(&plane_id)
            .and_then(|entry| entry.lines.get(&lmk_id))
            .map(String::as_str)
    }

    pub fn num_constraints(&self, plane_id: PlaneId) -> usize {
        self.planes.get(&plane_id).map_or(0, |entry| entry.lines.len())
    }
}

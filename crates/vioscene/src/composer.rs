//! Per-frame scene composition.
//!
//! [`SceneComposer`] is the one place that decides, for every frame, which
//! widgets are created, which are updated in place and which are removed.
//! Everything it carries between frames (trajectory, plane constraints, the
//! registry itself) is owned here.

use std::collections::{HashMap, HashSet};

use glam::Vec3;
use vioscene_core::{
    CameraIntrinsics, LandmarkId, Options, PlaneId, PoseSample, RenderBackend, SceneRegistry,
    SceneUpdate, Timestamp, Widget, WidgetPayload,
};
use vioscene_structures::{
    cluster_convex_hull, colorize_mesh, landmark_cloud, validate_clusters, Landmark, Mesh,
    PlaneConstraintIndex, TrajectoryTracker, TriangleCluster, LANDMARKS_ID, MESH_ID,
};

use crate::export::MeshLogger;
use crate::frame::{FrameInput, ObservedPlane};

/// Id of the world coordinate frame widget.
pub const WORLD_FRAME_ID: &str = "world_frame";

/// Id of the convex hull outline of a triangle cluster.
pub fn cluster_hull_id(cluster_id: usize) -> String {
    format!("cluster_hull_{cluster_id}")
}

/// Removes `ids` from the registry, recording those that were present.
fn remove_widgets<'a>(
    registry: &mut SceneRegistry,
    ids: impl IntoIterator<Item = &'a str>,
    removed: &mut Vec<String>,
) {
    for id in ids {
        if registry.remove(id).is_some() {
            removed.push(id.to_string());
        }
    }
}

/// Builds the scene frame by frame from upstream VIO output.
pub struct SceneComposer {
    options: Options,
    intrinsics: CameraIntrinsics,
    registry: SceneRegistry,
    trajectory: TrajectoryTracker,
    constraints: PlaneConstraintIndex,
    trajectory_ids: Vec<String>,
    hull_ids: Vec<String>,
    mesh_logger: Option<MeshLogger>,
    frame_count: u64,
}

impl SceneComposer {
    /// Creates a composer for a camera with the given intrinsics.
    pub fn new(options: Options, intrinsics: CameraIntrinsics) -> Self {
        let trajectory =
            TrajectoryTracker::new(options.trajectory_capacity).with_frustum_depth(options.frustum_depth);
        let mesh_logger = (options.log_mesh || options.log_accumulated_mesh)
            .then(|| MeshLogger::new(options.mesh_log_dir.clone()));
        Self {
            options,
            intrinsics,
            registry: SceneRegistry::new(),
            trajectory,
            constraints: PlaneConstraintIndex::new(),
            trajectory_ids: Vec::new(),
            hull_ids: Vec::new(),
            mesh_logger,
            frame_count: 0,
        }
    }

    pub fn options(&self) -> &Options {
        &self.options
    }

    pub fn registry(&self) -> &SceneRegistry {
        &self.registry
    }

    pub fn trajectory(&self) -> &TrajectoryTracker {
        &self.trajectory
    }

    pub fn constraints(&self) -> &PlaneConstraintIndex {
        &self.constraints
    }

    /// Number of frames composed so far.
    pub fn frame_count(&self) -> u64 {
        self.frame_count
    }

    /// Composes one frame and hands the result to `backend`.
    pub fn render(&mut self, input: FrameInput, backend: &mut dyn RenderBackend) -> SceneUpdate {
        let update = self.spin_once(input);
        backend.present(&update);
        update
    }

    /// Composes one frame.
    ///
    /// Returns every widget now in the scene together with the ids removed
    /// while composing this frame.
    pub fn spin_once(&mut self, input: FrameInput) -> SceneUpdate {
        let FrameInput {
            timestamp,
            pose,
            mesh,
            clusters,
            landmarks,
            planes,
            frustum_image,
        } = input;
        let mut removed = Vec::new();

        if self.frame_count == 0 && self.options.show_world_frame {
            self.registry.upsert(Widget::new(
                WORLD_FRAME_ID,
                WidgetPayload::CoordinateFrame {
                    scale: self.options.world_frame_scale,
                },
            ));
        }
        self.frame_count += 1;

        if let Some(pose) = pose {
            self.trajectory.add_pose(PoseSample::new(timestamp, pose));
            let widgets =
                self.trajectory
                    .render_full(&self.intrinsics, frustum_image, self.options.n_last_frustums);
            self.replace_group(widgets, GroupKind::Trajectory, &mut removed);
        }

        let mesh_landmarks = self.update_mesh(mesh.as_ref(), &clusters, timestamp, &mut removed);
        self.update_planes(&planes, &landmarks, &mut removed);
        self.update_landmarks(&landmarks, &mesh_landmarks, &mut removed);

        log::debug!(
            "frame {} ({timestamp}): {} widgets, {} removed",
            self.frame_count,
            self.registry.len(),
            removed.len()
        );
        SceneUpdate {
            widgets: self.registry.iter().cloned().collect(),
            removed,
        }
    }

    /// Upserts a group of widgets and removes the group's widgets from the
    /// previous frame that are not in it anymore.
    fn replace_group(&mut self, widgets: Vec<Widget>, group: GroupKind, removed: &mut Vec<String>) {
        let ids: Vec<String> = widgets.iter().map(|w| w.id().to_string()).collect();
        for widget in widgets {
            self.registry.upsert(widget);
        }
        let current = match group {
            GroupKind::Trajectory => &mut self.trajectory_ids,
            GroupKind::ClusterHulls => &mut self.hull_ids,
        };
        let previous = std::mem::replace(current, ids);
        let stale: Vec<&str> = previous
            .iter()
            .map(String::as_str)
            .filter(|id| !current.iter().any(|c| c.as_str() == *id))
            .collect();
        remove_widgets(&mut self.registry, stale, removed);
    }

    /// Draws the mesh if there is one to draw, otherwise clears the previous
    /// one. Returns the landmark ids that are part of the drawn mesh.
    fn update_mesh(
        &mut self,
        mesh: Option<&Mesh>,
        clusters: &[TriangleCluster],
        timestamp: Timestamp,
        removed: &mut Vec<String>,
    ) -> HashSet<LandmarkId> {
        let drawn = match mesh {
            Some(mesh) if self.options.draws_mesh() && self.draw_mesh(mesh, clusters, timestamp, removed) => {
                Some(mesh)
            }
            _ => None,
        };

        match drawn {
            Some(mesh) => mesh
                .landmark_ids()
                .map(|ids| ids.iter().copied().collect())
                .unwrap_or_default(),
            None => {
                remove_widgets(&mut self.registry, [MESH_ID], removed);
                self.replace_group(Vec::new(), GroupKind::ClusterHulls, removed);
                HashSet::new()
            }
        }
    }

    /// Returns `false` when there is nothing to draw.
    fn draw_mesh(
        &mut self,
        mesh: &Mesh,
        clusters: &[TriangleCluster],
        timestamp: Timestamp,
        removed: &mut Vec<String>,
    ) -> bool {
        if let Err(err) = mesh.validate().and_then(|()| validate_clusters(mesh, clusters)) {
            log::warn!("dropping mesh of frame {timestamp}: {err}");
            return false;
        }

        let mut colors: Vec<Vec3> = Vec::new();
        let has_faces = match mesh.colors() {
            Some(upstream) if !self.options.color_mesh_by_clusters => {
                colors.extend_from_slice(upstream);
                !mesh.is_empty()
            }
            _ => {
                let coloring: &[TriangleCluster] = if self.options.color_mesh_by_clusters {
                    clusters
                } else {
                    &[]
                };
                colorize_mesh(mesh, coloring, &mut colors)
            }
        };
        if !has_faces {
            log::debug!("mesh of frame {timestamp} has no faces, nothing to draw");
            return false;
        }

        if let Some(logger) = self.mesh_logger.as_mut() {
            let modes = [
                (self.options.log_mesh, false),
                (self.options.log_accumulated_mesh, true),
            ];
            for (enabled, accumulate) in modes {
                if !enabled {
                    continue;
                }
                if let Err(err) = logger.log_mesh(mesh.vertices(), &colors, mesh.faces(), timestamp, accumulate) {
                    log::warn!("failed to log mesh of frame {timestamp}: {err}");
                }
            }
        }

        self.registry.upsert(mesh.to_widget(colors));

        let hulls = if self.options.visualize_convex_hulls {
            clusters
                .iter()
                .filter_map(|cluster| {
                    let points = cluster_convex_hull(cluster, mesh)?;
                    Some(Widget::new(
                        cluster_hull_id(cluster.cluster_id),
                        WidgetPayload::Polyline {
                            points,
                            color: vioscene_core::color::cluster_color(cluster.cluster_id),
                            closed: true,
                        },
                    ))
                })
                .collect()
        } else {
            Vec::new()
        };
        self.replace_group(hulls, GroupKind::ClusterHulls, removed);
        true
    }

    /// Refreshes observed planes and their constraints; removes planes that
    /// are no longer observed.
    fn update_planes(&mut self, planes: &[ObservedPlane], landmarks: &[Landmark], removed: &mut Vec<String>) {
        let mut observed: HashSet<PlaneId> = HashSet::new();

        if self.options.draws_scene_points() {
            let positions: HashMap<LandmarkId, Vec3> =
                landmarks.iter().map(|lmk| (lmk.id, lmk.position)).collect();

            // A plane observed twice in one frame keeps its last observation
            let last: HashMap<PlaneId, usize> =
                planes.iter().enumerate().map(|(i, obs)| (obs.plane.id, i)).collect();

            for (i, ObservedPlane { plane, landmark_ids }) in planes.iter().enumerate() {
                if last.get(&plane.id) != Some(&i) {
                    log::debug!("plane {} observed more than once, keeping the last", plane.id);
                    continue;
                }
                let Some(label_removed) = self.constraints.upsert_plane(
                    &mut self.registry,
                    plane,
                    self.options.visualize_plane_labels,
                    self.options.plane_size,
                ) else {
                    continue;
                };
                removed.extend(label_removed);
                observed.insert(plane.id);

                let mut live: HashSet<LandmarkId> = HashSet::new();
                for &lmk_id in landmark_ids {
                    let Some(&point) = positions.get(&lmk_id) else {
                        continue;
                    };
                    if self
                        .constraints
                        .add_constraint(&mut self.registry, plane.id, lmk_id, plane.normal, plane.distance, point)
                        .is_some()
                    {
                        live.insert(lmk_id);
                    }
                }
                removed.extend(self.constraints.prune_stale(&mut self.registry, plane.id, &live));
            }
        }

        let stale: Vec<PlaneId> = self
            .constraints
            .plane_ids()
            .filter(|id| !observed.contains(id))
            .collect();
        for plane_id in stale {
            removed.extend(self.constraints.remove_plane(&mut self.registry, plane_id));
        }
    }

    /// Draws landmarks that are not vertices of the drawn mesh.
    fn update_landmarks(
        &mut self,
        landmarks: &[Landmark],
        mesh_landmarks: &HashSet<LandmarkId>,
        removed: &mut Vec<String>,
    ) {
        let cloud = if self.options.draws_scene_points() {
            landmark_cloud(landmarks, mesh_landmarks, self.options.cloud_color)
        } else {
            None
        };
        match cloud {
            Some(widget) => {
                self.registry.upsert(widget);
            }
            None => remove_widgets(&mut self.registry, [LANDMARKS_ID], removed),
        }
    }
}

#[derive(Debug, Clone, Copy)]
enum GroupKind {
    Trajectory,
    ClusterHulls,
}

//! PLY export of mesh state.
//!
//! Exporting is a logging side channel; it never affects the live scene.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use glam::Vec3;
use ply_rs::ply::{Addable, DefaultElement, ElementDef, Ply, Property, PropertyDef, PropertyType, ScalarType};
use ply_rs::writer::Writer;
use vioscene_core::color::to_rgb8;
use vioscene_core::{Result, SceneError, Timestamp};

/// File name of the accumulated mesh.
pub const ACCUMULATED_MESH_FILE: &str = "accumulated_mesh.ply";

fn scalar(name: &str, scalar_type: ScalarType) -> PropertyDef {
    PropertyDef::new(name.to_string(), PropertyType::Scalar(scalar_type))
}

/// Writes a mesh as ASCII PLY.
///
/// `colors` is either empty (no color properties) or one color per vertex.
/// The timestamp, if given, is stored as a header comment. Returns the number
/// of bytes written.
pub fn write_mesh_ply<W: Write>(
    writer: &mut W,
    vertices: &[Vec3],
    colors: &[Vec3],
    faces: &[Vec<u32>],
    timestamp: Option<Timestamp>,
) -> Result<usize> {
    let with_colors = !colors.is_empty();
    if with_colors && colors.len() != vertices.len() {
        return Err(SceneError::SizeMismatch {
            expected: vertices.len(),
            actual: colors.len(),
        });
    }

    let mut ply = Ply::<DefaultElement>::new();
    if let Some(timestamp) = timestamp {
        ply.header.comments.push(format!("timestamp {timestamp}"));
    }

    let mut vertex_def = ElementDef::new("vertex".to_string());
    vertex_def.count = vertices.len();
    for axis in ["x", "y", "z"] {
        vertex_def.properties.add(scalar(axis, ScalarType::Float));
    }
    if with_colors {
        for channel in ["red", "green", "blue"] {
            vertex_def.properties.add(scalar(channel, ScalarType::UChar));
        }
    }
    ply.header.elements.add(vertex_def);

    let mut face_def = ElementDef::new("face".to_string());
    face_def.count = faces.len();
    face_def.properties.add(PropertyDef::new(
        "vertex_indices".to_string(),
        PropertyType::List(ScalarType::UChar, ScalarType::Int),
    ));
    ply.header.elements.add(face_def);

    let mut vertex_elements = Vec::with_capacity(vertices.len());
    for (i, vertex) in vertices.iter().enumerate() {
        let mut element = DefaultElement::new();
        element.insert("x".to_string(), Property::Float(vertex.x));
        element.insert("y".to_string(), Property::Float(vertex.y));
        element.insert("z".to_string(), Property::Float(vertex.z));
        if with_colors {
            let [r, g, b] = to_rgb8(colors[i]);
            element.insert("red".to_string(), Property::UChar(r));
            element.insert("green".to_string(), Property::UChar(g));
            element.insert("blue".to_string(), Property::UChar(b));
        }
        vertex_elements.push(element);
    }
    ply.payload.insert("vertex".to_string(), vertex_elements);

    let mut face_elements = Vec::with_capacity(faces.len());
    for (face, indices) in faces.iter().enumerate() {
        let mut list = Vec::with_capacity(indices.len());
        for &vertex in indices {
            let index = i32::try_from(vertex)
                .ok()
                .filter(|_| (vertex as usize) < vertices.len())
                .ok_or(SceneError::VertexIndexOutOfRange {
                    face,
                    vertex,
                    num_vertices: vertices.len(),
                })?;
            list.push(index);
        }
        let mut element = DefaultElement::new();
        element.insert("vertex_indices".to_string(), Property::ListInt(list));
        face_elements.push(element);
    }
    ply.payload.insert("face".to_string(), face_elements);

    let ply_writer = Writer::new();
    let written = ply_writer.write_ply(writer, &mut ply)?;
    Ok(written)
}

/// Writes a mesh to a PLY file, creating parent directories.
pub fn write_mesh_ply_file(
    path: impl AsRef<Path>,
    vertices: &[Vec3],
    colors: &[Vec3],
    faces: &[Vec<u32>],
    timestamp: Option<Timestamp>,
) -> Result<()> {
    let path = path.as_ref();
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let mut writer = BufWriter::new(File::create(path)?);
    write_mesh_ply(&mut writer, vertices, colors, faces, timestamp)?;
    writer.flush()?;
    Ok(())
}

/// Logs meshes to PLY files, either one file per frame or a single mesh
/// accumulated across frames.
#[derive(Debug, Clone)]
pub struct MeshLogger {
    output_dir: PathBuf,
    vertices: Vec<Vec3>,
    colors: Vec<Vec3>,
    faces: Vec<Vec<u32>>,
}

impl MeshLogger {
    /// Creates a logger writing into `output_dir` (created on first write).
    pub fn new(output_dir: impl Into<PathBuf>) -> Self {
        Self {
            output_dir: output_dir.into(),
            vertices: Vec::new(),
            colors: Vec::new(),
            faces: Vec::new(),
        }
    }

    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    /// Number of vertices accumulated so far.
    pub fn accumulated_vertices(&self) -> usize {
        self.vertices.len()
    }

    /// Writes `mesh_{timestamp}.ply`, or with `accumulate` appends the mesh
    /// to the accumulated one and rewrites [`ACCUMULATED_MESH_FILE`].
    /// Returns the written path.
    pub fn log_mesh(
        &mut self,
        vertices: &[Vec3],
        colors: &[Vec3],
        faces: &[Vec<u32>],
        timestamp: Timestamp,
        accumulate: bool,
    ) -> Result<PathBuf> {
        if !accumulate {
            let path = self.output_dir.join(format!("mesh_{timestamp}.ply"));
            write_mesh_ply_file(&path, vertices, colors, faces, Some(timestamp))?;
            log::debug!("logged mesh to {}", path.display());
            return Ok(path);
        }

        if colors.len() != vertices.len() {
            return Err(SceneError::SizeMismatch {
                expected: vertices.len(),
                actual: colors.len(),
            });
        }
        let offset = u32::try_from(self.vertices.len()).map_err(|_| SceneError::SizeMismatch {
            expected: u32::MAX as usize,
            actual: self.vertices.len(),
        })?;
        self.vertices.extend_from_slice(vertices);
        self.colors.extend_from_slice(colors);
        self.faces
            .extend(faces.iter().map(|face| face.iter().map(|&v| v + offset).collect()));

        let path = self.output_dir.join(ACCUMULATED_MESH_FILE);
        write_mesh_ply_file(&path, &self.vertices, &self.colors, &self.faces, Some(timestamp))?;
        log::debug!(
            "logged accumulated mesh ({} vertices) to {}",
            self.vertices.len(),
            path.display()
        );
        Ok(path)
    }
}

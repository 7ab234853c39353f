//! Mesh data structures for voxel rendering.
//!
//! A [`Mesh`] collects the faces of one chunk as flat triangle-list vertices, bounded
//! by the capacity of the chunk's slot in the shared geometry buffer.

use super::face::Face;
use crate::engine_state::rendering::vertex::BlockVertex;

/// Vertices emitted per face (two triangles).
pub const VERTICES_PER_FACE: usize = 6;

/// How a mesh build ended.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum MeshOutcome {
    /// Every visible face was emitted.
    Complete {
        /// Vertices in the mesh
        vertex_count: usize,
    },
    /// The slot filled up; `dropped_faces` visible faces were left out.
    Truncated {
        /// Vertices that fit
        vertex_count: usize,
        /// Visible faces left out
        dropped_faces: usize,
    },
}

impl MeshOutcome {
    /// Vertices the mesh ended up with.
    pub fn vertex_count(&self) -> usize {
        match *self {
            MeshOutcome::Complete { vertex_count } => vertex_count,
            MeshOutcome::Truncated { vertex_count, .. } => vertex_count,
        }
    }

    /// `true` if faces were dropped.
    pub fn is_truncated(&self) -> bool {
        matches!(self, MeshOutcome::Truncated { .. })
    }
}

/// The geometry of one chunk.
#[derive(Debug)]
pub struct Mesh {
    /// Triangle-list vertices, six per face
    vertices: Vec<BlockVertex>,
    /// Capacity of the chunk's buffer slot
    max_vertices: usize,
    /// Faces that did not fit
    dropped_faces: usize,
}

impl Mesh {
    /// Creates an empty mesh that holds at most `max_vertices` vertices.
    pub fn new(max_vertices: usize) -> Self {
        Mesh {
            vertices: Vec::new(),
            max_vertices,
            dropped_faces: 0,
        }
    }

    /// Appends a face, or counts it as dropped if it would overflow the slot.
    ///
    /// Truncation happens at whole faces, so the mesh never holds half a quad.
    ///
    /// # Returns
    /// `true` if the face was stored.
    pub fn push_face(&mut self, face: &Face) -> bool {
        if self.vertices.len() + VERTICES_PER_FACE > self.max_vertices {
            self.dropped_faces += 1;
            return false;
        }
        self.vertices.extend_from_slice(&face.vertices());
        true
    }

    /// Vertices stored so far.
    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    /// Faces stored so far.
    pub fn face_count(&self) -> usize {
        self.vertices.len() / VERTICES_PER_FACE
    }

    /// The stored vertices.
    pub fn vertices(&self) -> &[BlockVertex] {
        &self.vertices
    }

    /// Whether every pushed face fit.
    pub fn outcome(&self) -> MeshOutcome {
        if self.dropped_faces == 0 {
            MeshOutcome::Complete {
                vertex_count: self.vertices.len(),
            }
        } else {
            MeshOutcome::Truncated {
                vertex_count: self.vertices.len(),
                dropped_faces: self.dropped_faces,
            }
        }
    }

    /// Consumes the mesh, keeping its vertices.
    pub fn into_vertices(self) -> Vec<BlockVertex> {
        self.vertices
    }
}

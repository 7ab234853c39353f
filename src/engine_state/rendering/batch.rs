//! The consumer side of chunk geometry.

use log::trace;

use super::vertex::BlockVertex;

/// Accepts finished chunk geometry. Submission order across chunks carries no meaning.
pub trait RenderBatch {
    /// Receives one chunk's vertices.
    fn add_vertices(&mut self, vertices: &[BlockVertex]);
}

/// An in-memory batch that concatenates every submitted chunk.
#[derive(Debug, Default)]
pub struct ChunkBatch {
    vertices: Vec<BlockVertex>,
    chunk_count: usize,
}

impl ChunkBatch {
    /// Creates an empty batch.
    pub fn new() -> Self {
        Self::default()
    }

    /// Every vertex submitted since the last clear.
    pub fn vertices(&self) -> &[BlockVertex] {
        &self.vertices
    }

    /// Number of vertices in the batch.
    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    /// Number of `add_vertices` calls since the last clear.
    pub fn chunk_count(&self) -> usize {
        self.chunk_count
    }

    /// The batch contents as raw bytes, ready for a buffer upload.
    pub fn as_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.vertices)
    }

    /// Empties the batch for the next frame.
    pub fn clear(&mut self) {
        self.vertices.clear();
        self.chunk_count = 0;
    }
}

impl RenderBatch for ChunkBatch {
    fn add_vertices(&mut self, vertices: &[BlockVertex]) {
        trace!("Batching {} vertices", vertices.len());
        self.vertices.extend_from_slice(vertices);
        self.chunk_count += 1;
    }
}

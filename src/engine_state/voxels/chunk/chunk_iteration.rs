//! # Chunk Iteration Module
//!
//! This module provides an iterator over the visible blocks of a chunk: every block
//! that is neither air nor NULL, in the grid's linear (y, x, z) order.

use cgmath::Point3;

use crate::engine_state::voxels::block::Block;

use super::{Chunk, ChunkState};

/// An iterator over all non-air, non-null blocks in a chunk.
///
/// The iterator walks the dense grid once and yields each block with its local
/// position. An ungenerated chunk yields nothing.
pub struct ChunkBlockIterator<'a> {
    /// Blocks of the chunk being iterated over
    blocks: &'a [Block],
    /// Index of the next block to inspect
    current_index: usize,
}

impl<'a> ChunkBlockIterator<'a> {
    /// Creates a new `ChunkBlockIterator` for the given chunk.
    ///
    /// # Arguments
    /// * `chunk_ref` - A reference to the chunk to iterate over
    pub fn new(chunk_ref: &'a Chunk) -> Self {
        let blocks: &[Block] = if chunk_ref.state() == ChunkState::Uninitialized {
            &[]
        } else {
            chunk_ref.blocks()
        };
        ChunkBlockIterator {
            blocks,
            current_index: 0,
        }
    }

    /// Gets the next visible block in the chunk along with its position.
    ///
    /// # Returns
    /// - `Some((position, block))` if another non-air block is found
    /// - `None` if there are no more blocks to iterate over
    pub fn get_next_block(&mut self) -> Option<(Point3<i32>, Block)> {
        while let Some(block) = self.blocks.get(self.current_index) {
            let index = self.current_index;
            self.current_index += 1;
            if !block.is_air() && !block.is_null() {
                return Some((Chunk::index_to_local(index), *block));
            }
        }
        None
    }
}

impl Iterator for ChunkBlockIterator<'_> {
    type Item = (Point3<i32>, Block);

    fn next(&mut self) -> Option<Self::Item> {
        self.get_next_block()
    }
}

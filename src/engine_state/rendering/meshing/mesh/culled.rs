//! Face-culling mesh generation.
//!
//! Every visible block contributes one quad per side whose neighbor cell is see-through.
//! Neighbor cells one step outside the chunk are read through a [`LocalBlockSource`],
//! so faces on the chunk boundary are culled against the adjacent chunk.

use cgmath::Point3;
use log::debug;
use web_time::Instant;

use crate::engine_state::voxels::{
    block::{block_side::BlockSide, Block, BlockRegistry},
    chunk::{chunk_iteration::ChunkBlockIterator, Chunk, LocalBlockSource},
};

use super::{face::Face, mesh::Mesh};

/// Whether a face backed by `neighbor` can be seen.
///
/// NULL is treated as a wall: nothing is drawn against the edge of the loaded world.
pub fn is_face_visible(neighbor: Block) -> bool {
    !neighbor.is_null() && neighbor.is_transparent()
}

/// Builds the culled mesh of `chunk`.
///
/// # Arguments
/// * `chunk` - The chunk to mesh
/// * `blocks` - Block lookups in the chunk's local space, including its neighbors
/// * `registry` - Source of per-material texture layers
/// * `max_vertices` - Capacity of the chunk's buffer slot
///
/// # Returns
/// The mesh, empty for fringe chunks.
pub fn generate_culled_mesh(
    chunk: &Chunk,
    blocks: &dyn LocalBlockSource,
    registry: &dyn BlockRegistry,
    max_vertices: usize,
) -> Mesh {
    let mut mesh = Mesh::new(max_vertices);
    if chunk.is_fringe() {
        return mesh;
    }

    let start = Instant::now();
    let (origin_x, origin_z) = chunk.world_origin();

    for (local, block) in ChunkBlockIterator::new(chunk) {
        let format = registry.lookup_or_fallback(block.block_id);
        let world_pos = Point3::new(origin_x + local.x, local.y, origin_z + local.z);

        for side in BlockSide::all() {
            if !is_face_visible(blocks.get_local_block(local + side.offset())) {
                continue;
            }
            let face = Face::new(world_pos, format.texture(side.texture_face()), side);
            mesh.push_face(&face);
        }
    }

    debug!(
        "Meshed chunk ({}, {}): {} faces in {:?}",
        chunk.coord().x,
        chunk.coord().y,
        mesh.face_count(),
        start.elapsed()
    );

    mesh
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_transparent_non_null_neighbors_expose_faces() {
        let mut water = Block::AIR;
        water.block_id = 9;
        water.set_transparency(false);
        water.set_blendability(true);

        assert!(is_face_visible(Block::AIR));
        assert!(!is_face_visible(Block::NULL));
        assert!(!is_face_visible(water));
    }
}

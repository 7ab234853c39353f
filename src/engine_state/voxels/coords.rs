//! World ↔ chunk coordinate transforms.
//!
//! Chunk coordinates are grid positions: chunk `(cx, cz)` covers world columns
//! `[cx * 16, cx * 16 + 16) × [cz * 16, cz * 16 + 16)`. The second component of a
//! [`ChunkCoord`] is the world Z axis.

use cgmath::{Point2, Point3};

use super::chunk::{CHUNK_LENGTH, CHUNK_WIDTH};

/// Position of a chunk on the chunk grid.
pub type ChunkCoord = Point2<i32>;

/// The chunk owning world position `world_pos`.
pub fn to_chunk_coords(world_pos: Point3<f32>) -> ChunkCoord {
    ChunkCoord::new(
        (world_pos.x / CHUNK_LENGTH as f32).floor() as i32,
        (world_pos.z / CHUNK_WIDTH as f32).floor() as i32,
    )
}

/// World X/Z of the chunk's `(0, 0)` column.
pub fn chunk_origin(coord: ChunkCoord) -> (i32, i32) {
    (coord.x * CHUNK_LENGTH, coord.y * CHUNK_WIDTH)
}

/// Local block coordinates of `world_pos` relative to chunk `coord`.
///
/// The result is only inside `[0, 16)` horizontally when `coord` owns the position;
/// otherwise it is the offset the neighbor-aware addressing will follow.
pub fn to_local_coords(coord: ChunkCoord, world_pos: Point3<f32>) -> Point3<i32> {
    let (origin_x, origin_z) = chunk_origin(coord);
    Point3::new(
        (world_pos.x - origin_x as f32).floor() as i32,
        world_pos.y.floor() as i32,
        (world_pos.z - origin_z as f32).floor() as i32,
    )
}

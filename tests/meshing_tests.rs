/// Tests for face-culling mesh generation over generated terrain.
use cgmath::{Point3, Vector3};
use voxel_world::engine_state::{
    config::WorldConfig,
    rendering::{
        batch::ChunkBatch,
        meshing::{MeshOutcome, VERTICES_PER_FACE},
        vertex::BlockVertex,
    },
    voxels::{
        block::{block_type::BlockType, Block},
        chunk::ChunkState,
        chunk_manager::ChunkManager,
        coords::ChunkCoord,
        generation::GenerationContext,
    },
    EngineState,
};

fn world(seed: u32, load_radius: i32, max_vertices_per_chunk: usize) -> ChunkManager {
    let ctx = GenerationContext::new(WorldConfig {
        seed: Some(seed),
        load_radius,
        max_vertices_per_chunk,
        ..WorldConfig::default()
    });
    let mut manager = ChunkManager::new(max_vertices_per_chunk);
    manager.load_region(&ctx);
    manager
}

/// The cells on either side of a face: the block that emitted it and the cell it
/// faces.
fn face_cells(quad: &[BlockVertex]) -> (Point3<i32>, Point3<i32>) {
    let corners = [quad[0], quad[1], quad[2], quad[5]];
    let mut center = Vector3::new(0.0f32, 0.0, 0.0);
    for corner in corners {
        center += Vector3::new(
            corner.position[0] as f32,
            corner.position[1] as f32,
            corner.position[2] as f32,
        ) / 4.0;
    }
    let normal = Vector3::new(quad[0].normal[0], quad[0].normal[1], quad[0].normal[2]);
    let cell = |v: Vector3<f32>| Point3::new(v.x.floor() as i32, v.y.floor() as i32, v.z.floor() as i32);
    (cell(center - normal * 0.5), cell(center + normal * 0.5))
}

fn block_at(manager: &ChunkManager, cell: Point3<i32>) -> Block {
    manager.get_block(Point3::new(
        cell.x as f32 + 0.5,
        cell.y as f32 + 0.5,
        cell.z as f32 + 0.5,
    ))
}

#[test]
fn test_faces_only_border_transparent_cells() {
    let mut manager = world(42, 2, 98_304);
    manager.update_all_chunks();

    let chunk = manager.get_chunk(ChunkCoord::new(0, 0)).unwrap();
    assert!(chunk.vertex_count() > 0);
    assert_eq!(chunk.vertex_count() % VERTICES_PER_FACE, 0);

    for quad in chunk.vertices().chunks(VERTICES_PER_FACE) {
        let (source, facing) = face_cells(quad);
        let source_block = block_at(&manager, source);
        let facing_block = block_at(&manager, facing);
        assert!(!source_block.is_air() && !source_block.is_null(), "{:?}", source);
        assert!(facing_block.is_transparent() && !facing_block.is_null(), "{:?}", facing);
    }
}

#[test]
fn test_removed_block_no_longer_emits_faces() {
    let mut manager = world(42, 2, 98_304);
    manager.update_all_chunks();

    let target = {
        let chunk = manager.get_chunk(ChunkCoord::new(0, 0)).unwrap();
        face_cells(&chunk.vertices()[..VERTICES_PER_FACE]).0
    };
    let world_pos = Point3::new(target.x as f32, target.y as f32, target.z as f32);
    manager.remove_block(world_pos).unwrap();
    assert_eq!(
        manager.get_chunk(ChunkCoord::new(0, 0)).unwrap().state(),
        ChunkState::Dirty
    );
    manager.update_all_chunks();

    for chunk in manager.chunks() {
        for quad in chunk.vertices().chunks(VERTICES_PER_FACE) {
            assert_ne!(face_cells(quad).0, target);
        }
    }
}

#[test]
fn test_a_lone_block_in_the_sky_has_six_faces() {
    let mut manager = world(9, 2, 98_304);
    manager.update_all_chunks();
    let before = manager.get_chunk(ChunkCoord::new(0, 0)).unwrap().vertex_count();

    manager
        .set_block(Point3::new(8.0, 250.0, 8.0), BlockType::STONE.id())
        .unwrap();
    manager.update_all_chunks();

    let after = manager.get_chunk(ChunkCoord::new(0, 0)).unwrap().vertex_count();
    assert_eq!(after - before, 6 * VERTICES_PER_FACE);
}

#[test]
fn test_top_face_against_the_ceiling_is_culled() {
    let mut manager = world(9, 2, 98_304);
    manager.update_all_chunks();
    let before = manager.get_chunk(ChunkCoord::new(0, 0)).unwrap().vertex_count();

    // Nothing exists above y = 255, so the top face borders NULL.
    manager
        .set_block(Point3::new(8.0, 255.0, 8.0), BlockType::STONE.id())
        .unwrap();
    manager.update_all_chunks();

    let after = manager.get_chunk(ChunkCoord::new(0, 0)).unwrap().vertex_count();
    assert_eq!(after - before, 5 * VERTICES_PER_FACE);
}

#[test]
fn test_overflowing_mesh_is_truncated_at_a_face_boundary() {
    let mut manager = world(42, 1, 100);
    let outcome = manager.generate_render_data(ChunkCoord::new(0, 0)).unwrap();
    match outcome {
        MeshOutcome::Truncated {
            vertex_count,
            dropped_faces,
        } => {
            assert_eq!(vertex_count, 96);
            assert!(dropped_faces > 0);
        }
        MeshOutcome::Complete { .. } => panic!("a terrain chunk cannot fit in 100 vertices"),
    }
    assert_eq!(
        manager.get_chunk(ChunkCoord::new(0, 0)).unwrap().vertex_count(),
        96
    );
}

#[test]
fn test_batch_receives_every_interior_mesh() {
    let mut engine = EngineState::new(WorldConfig {
        seed: Some(1),
        load_radius: 2,
        ..WorldConfig::default()
    });
    engine.load_world();
    let stats = engine.tick();
    assert_eq!(stats.submitted_chunks, 9);

    let expected: usize = engine
        .manager()
        .chunks()
        .filter(|chunk| !chunk.is_fringe())
        .map(|chunk| chunk.vertex_count())
        .sum();
    assert_eq!(stats.batched_vertices, expected);

    let mut batch = ChunkBatch::new();
    engine.manager().load_all_chunks(&mut batch);
    assert_eq!(batch.vertex_count(), expected);
}

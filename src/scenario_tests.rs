//! End-to-end checks through `Simulation`, the way a front end drives it.

use voxelcraft_blocks::BlockType;
use voxelcraft_world::{BlockPos, BlockSource, ChunkCoord, WorldGenMode};

use crate::app::Simulation;
use crate::config::{PickerKind, SimConfig};
use crate::event::{Action, InputFrame};
use crate::gamestate::BlockEditor;
use crate::interact::EditResult;
use crate::player::{MAX_PITCH, PLAYER_HEIGHT};

fn flat_sim() -> Simulation {
    let mut cfg = SimConfig::default();
    cfg.world.mode = WorldGenMode::Flat;
    Simulation::new(cfg)
}

/// Lets the player drop from spawn onto the grass.
fn settle(sim: &mut Simulation) {
    let idle = InputFrame::new();
    for _ in 0..60 {
        sim.step(&idle, 1.0 / 60.0);
    }
    assert!(sim.state.player.body.on_ground);
}

#[test]
fn flat_spawn_height() {
    let sim = flat_sim();
    let world = &sim.state.field.world;
    assert_eq!(world.size, 64);
    assert_eq!(world.height_at(0, 0), 4);
    let spawn = sim.state.player.position();
    assert!((spawn.y - (4.0 + 2.0 + PLAYER_HEIGHT / 2.0)).abs() < 1e-5);
    assert_eq!((spawn.x, spawn.z), (0.5, 0.5));
}

#[test]
fn set_then_clear_rebuilds_owner_twice() {
    let mut sim = flat_sim();
    let key = ChunkCoord::new(0, 0);
    assert_eq!(key.to_string(), "0,0");
    let before = sim.state.chunks.build_count(key);
    let pos = BlockPos::new(5, 10, 5);

    assert!(sim.state.editor().set_block(pos, BlockType::Stone));
    assert_eq!(sim.state.field.block_at(5, 10, 5), BlockType::Stone);
    assert!(sim.state.editor().set_block(pos, BlockType::Air));
    assert_eq!(sim.state.field.block_at(5, 10, 5), BlockType::Air);

    assert_eq!(sim.state.chunks.build_count(key), before + 2);
    assert!(sim.state.chunks.is_live(key));
}

#[test]
fn air_override_beats_terrain() {
    let mut sim = flat_sim();
    assert!(sim.state.editor().set_block(BlockPos::new(3, 2, -3), BlockType::Air));
    assert_eq!(sim.state.field.block_at(3, 2, -3), BlockType::Air);
    assert_eq!(sim.state.field.world.generated_block(3, 2, -3), BlockType::Dirt);
}

#[test]
fn place_into_own_body_is_refused() {
    let mut sim = flat_sim();
    settle(&mut sim);
    sim.state.player.pitch = -MAX_PITCH;
    let edits = sim.state.field.edits.len();
    let report = sim.step(&InputFrame::new().with(Action::Place), 0.0);
    assert_eq!(report.place, Some(EditResult::Occupied));
    assert_eq!(sim.state.field.edits.len(), edits);
}

#[test]
fn dig_through_the_tick() {
    for picker in [PickerKind::Mesh, PickerKind::Voxel] {
        let mut sim = flat_sim();
        sim.config.interaction.picker = picker;
        sim.state.npcs.clear();
        settle(&mut sim);
        sim.state.player.pitch = -MAX_PITCH;

        let r = sim.step(&InputFrame::new().with(Action::Remove), 0.0);
        assert_eq!(r.remove, Some(EditResult::Applied(BlockPos::new(0, 4, 0))));
        assert_eq!(sim.state.field.block_at(0, 4, 0), BlockType::Air);

        // open sky above
        sim.state.player.pitch = MAX_PITCH;
        let r = sim.step(&InputFrame::new().with(Action::Remove), 0.0);
        assert_eq!(r.remove, Some(EditResult::NoTarget));
    }
}

#[test]
fn reset_drops_edits_and_rebuilds() {
    let mut sim = flat_sim();
    assert!(sim.state.editor().set_block(BlockPos::new(1, 8, 1), BlockType::Glass));
    sim.reset(32, WorldGenMode::Terrain);
    assert!(sim.state.field.edits.is_empty());
    assert!(sim.state.npcs.is_empty());
    assert_eq!(sim.state.field.world.size, 32);
    assert_eq!(sim.state.field.world.height, 32);
    assert_eq!(sim.state.chunks.len(), 4);
    assert_eq!(sim.state.tick, 0);
}

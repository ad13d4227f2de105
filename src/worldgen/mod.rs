//! Reset-time decoration layered on the procedural terrain.

use voxelcraft_blocks::BlockType;
use voxelcraft_edit::{RebuildPolicy, WorldField};
use voxelcraft_geom::Vec3;
use voxelcraft_world::{BlockPos, World};

use crate::player::PLAYER_HEIGHT;

/// Trees keep at least this far (horizontally) from spawn.
pub const TREE_SPAWN_CLEARANCE: f32 = 6.0;

/// Two blocks above the column at the origin, centred in the cell.
pub fn find_spawn(world: &World) -> Vec3 {
    let h = world.height_at(0, 0);
    Vec3::new(0.5, h as f32 + 2.0 + PLAYER_HEIGHT / 2.0, 0.5)
}

/// Scatters `size² / 150` tree attempts through the deferred edit path.
/// The caller flushes the dirty set once afterwards. Returns trees planted.
pub fn generate_trees(field: &mut WorldField, spawn: Vec3, rng: &mut fastrand::Rng) -> usize {
    let world = field.world.clone();
    let attempts = (world.size * world.size) / 150;
    let span = (world.size - 1) as f32;
    let mut planted = 0;
    for _ in 0..attempts {
        let x = (world.min as f32 + rng.f32() * span).floor() as i32;
        let z = (world.min as f32 + rng.f32() * span).floor() as i32;
        let at = Vec3::new(x as f32 + 0.5, spawn.y, z as f32 + 0.5);
        if at.distance_sq(spawn) < TREE_SPAWN_CLEARANCE * TREE_SPAWN_CLEARANCE {
            continue;
        }
        plant_tree(field, &world, x, z, rng.i32(3..=5));
        planted += 1;
    }
    log::debug!("planted {}/{} trees", planted, attempts);
    planted
}

fn plant_tree(field: &mut WorldField, world: &World, x: i32, z: i32, trunk: i32) {
    let h = world.height_at(x, z);
    for y in h + 1..=h + trunk {
        field.set_block(BlockPos::new(x, y, z), BlockType::Wood, RebuildPolicy::Deferred);
    }
    let base = h + trunk;
    for lx in -2..=2i32 {
        for ly in 0..=2i32 {
            for lz in -2..=2i32 {
                if lx.abs() + lz.abs() + ly > 4 {
                    continue;
                }
                let (bx, by, bz) = (x + lx, base + ly, z + lz);
                if !world.contains_column(bx, bz) || by >= world.height {
                    continue;
                }
                field.set_block(BlockPos::new(bx, by, bz), BlockType::Leaf, RebuildPolicy::Deferred);
            }
        }
    }
}

use voxelcraft_blocks::BlockType;
use voxelcraft_world::{BlockPos, BlockSource};

use crate::config::PickerKind;
use crate::gamestate::{BlockEditor, WorldState};
use crate::raycast::{MeshRaycaster, RayCaster, RayHit, VoxelRaycaster};

/// Rays start this far in front of the eye.
pub const PICK_NEAR: f32 = 0.1;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EditResult {
    NoTarget,
    OutOfBounds,
    /// Placement would overlap the player.
    Occupied,
    AlreadyAir,
    Applied(BlockPos),
}

impl EditResult {
    pub fn applied(self) -> Option<BlockPos> {
        match self {
            EditResult::Applied(p) => Some(p),
            _ => None,
        }
    }
}

impl WorldState {
    /// First surface along the player's view within `reach`.
    pub fn pick(&self, picker: PickerKind, reach: f32) -> Option<RayHit> {
        let origin = self.player.eye_position();
        let dir = self.player.view_dir();
        match picker {
            PickerKind::Mesh => MeshRaycaster::new(&self.chunks).cast(origin, dir, PICK_NEAR, reach),
            PickerKind::Voxel => VoxelRaycaster::new(&self.field).cast(origin, dir, PICK_NEAR, reach),
        }
    }

    pub fn place_block(&mut self, picker: PickerKind, reach: f32) -> EditResult {
        match self.pick(picker, reach) {
            Some(hit) => self.place_at(hit.place_target()),
            None => EditResult::NoTarget,
        }
    }

    pub fn remove_block(&mut self, picker: PickerKind, reach: f32) -> EditResult {
        match self.pick(picker, reach) {
            Some(hit) => self.remove_at(hit.remove_target()),
            None => EditResult::NoTarget,
        }
    }

    /// Writes the selected block at `target` unless it is outside the world or
    /// would bury the player.
    pub fn place_at(&mut self, target: BlockPos) -> EditResult {
        if !self.field.world.contains(target.x, target.y, target.z) {
            return EditResult::OutOfBounds;
        }
        if self.player.intersects_cell(target) {
            log::debug!("place at {:?} rejected: player in the way", target);
            return EditResult::Occupied;
        }
        let ty = self.selected;
        if self.editor().set_block(target, ty) {
            log::info!("placed {} at {:?}", ty, target);
            EditResult::Applied(target)
        } else {
            EditResult::OutOfBounds
        }
    }

    pub fn remove_at(&mut self, target: BlockPos) -> EditResult {
        if !self.field.world.contains(target.x, target.y, target.z) {
            return EditResult::OutOfBounds;
        }
        if self.field.is_air(target.x, target.y, target.z) {
            return EditResult::AlreadyAir;
        }
        if self.editor().set_block(target, BlockType::Air) {
            log::info!("removed block at {:?}", target);
            EditResult::Applied(target)
        } else {
            EditResult::OutOfBounds
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::player::{MAX_PITCH, PLAYER_HEIGHT};
    use voxelcraft_geom::Vec3;
    use voxelcraft_physics::CONTACT_EPSILON;
    use voxelcraft_runtime::ChunkStreamer;
    use voxelcraft_world::{ChunkCoord, World, WorldGenMode};

    /// Player standing on flat grass at the origin, looking almost straight down.
    fn standing_state() -> WorldState {
        let mut s = WorldState::new(World::new(64, WorldGenMode::Flat), ChunkStreamer::new(1), 9);
        s.player
            .respawn(Vec3::new(0.5, 5.0 + PLAYER_HEIGHT / 2.0 + CONTACT_EPSILON, 0.5));
        s.player.body.on_ground = true;
        s.player.pitch = -MAX_PITCH;
        s.chunks.update_view(&s.field, 0.5, 0.5, true);
        s
    }

    #[test]
    fn placing_into_own_cell_is_rejected() {
        for picker in [PickerKind::Mesh, PickerKind::Voxel] {
            let mut s = standing_state();
            assert_eq!(s.place_block(picker, 8.0), EditResult::Occupied);
            assert!(s.field.edits.is_empty());
        }
    }

    #[test]
    fn removing_the_floor_rebuilds_its_chunk() {
        for picker in [PickerKind::Mesh, PickerKind::Voxel] {
            let mut s = standing_state();
            let before = s.chunks.build_count(ChunkCoord::new(0, 0));
            assert_eq!(s.remove_block(picker, 8.0), EditResult::Applied(BlockPos::new(0, 4, 0)));
            assert_eq!(s.field.block_at(0, 4, 0), BlockType::Air);
            assert_eq!(s.chunks.build_count(ChunkCoord::new(0, 0)), before + 1);
        }
    }

    #[test]
    fn removing_air_is_rejected() {
        let mut s = standing_state();
        assert_eq!(s.remove_at(BlockPos::new(0, 10, 0)), EditResult::AlreadyAir);
        assert!(s.field.edits.is_empty());
    }

    #[test]
    fn edits_outside_the_world_are_rejected() {
        let mut s = standing_state();
        assert_eq!(s.place_at(BlockPos::new(40, 5, 0)), EditResult::OutOfBounds);
        assert_eq!(s.remove_at(BlockPos::new(0, -2, 0)), EditResult::OutOfBounds);
    }

    #[test]
    fn looking_at_the_sky_has_no_target() {
        let mut s = standing_state();
        s.player.pitch = MAX_PITCH;
        assert_eq!(s.place_block(PickerKind::Mesh, 8.0), EditResult::NoTarget);
        assert_eq!(s.remove_block(PickerKind::Voxel, 8.0), EditResult::NoTarget);
    }

    #[test]
    fn placed_block_uses_selection() {
        let mut s = standing_state();
        s.selected = BlockType::Glow;
        assert_eq!(s.place_at(BlockPos::new(3, 5, 3)), EditResult::Applied(BlockPos::new(3, 5, 3)));
        assert_eq!(s.field.block_at(3, 5, 3), BlockType::Glow);
    }
}

use voxelcraft_blocks::BlockType;
use voxelcraft_edit::{EditOutcome, RebuildPolicy, WorldField};
use voxelcraft_runtime::ChunkStreamer;
use voxelcraft_world::{BlockPos, BlockSource, World};

use crate::npc::Npc;
use crate::player::Player;

/// A block field that can also be written, with mesh invalidation handled.
pub trait BlockEditor: BlockSource {
    /// Returns false when the edit was rejected.
    fn set_block(&mut self, pos: BlockPos, ty: BlockType) -> bool;
}

/// Everything a running world owns. Rebuilt wholesale on reset.
pub struct WorldState {
    pub tick: u64,
    pub field: WorldField,
    pub chunks: ChunkStreamer,
    pub player: Player,
    pub npcs: Vec<Npc>,
    pub selected: BlockType,
    pub rng: fastrand::Rng,
}

impl WorldState {
    pub fn new(world: World, chunks: ChunkStreamer, seed: u64) -> Self {
        Self {
            tick: 0,
            field: WorldField::new(world),
            chunks,
            player: Player::new(voxelcraft_geom::Vec3::ZERO),
            npcs: Vec::new(),
            selected: BlockType::PLACEABLE[0],
            rng: fastrand::Rng::with_seed(seed),
        }
    }

    /// Immediate-rebuild editor over the field and live meshes.
    pub fn editor(&mut self) -> WorldEditor<'_> {
        WorldEditor::new(&mut self.field, &mut self.chunks)
    }
}

/// Routes every edit through the override map and rebuilds affected meshes at once.
/// Player interaction and NPC mining both go through here.
pub struct WorldEditor<'a> {
    field: &'a mut WorldField,
    chunks: &'a mut ChunkStreamer,
}

impl<'a> WorldEditor<'a> {
    pub fn new(field: &'a mut WorldField, chunks: &'a mut ChunkStreamer) -> Self {
        Self { field, chunks }
    }
}

impl BlockSource for WorldEditor<'_> {
    #[inline]
    fn world(&self) -> &World {
        &self.field.world
    }

    #[inline]
    fn block_at(&self, x: i32, y: i32, z: i32) -> BlockType {
        self.field.block_at(x, y, z)
    }
}

impl BlockEditor for WorldEditor<'_> {
    fn set_block(&mut self, pos: BlockPos, ty: BlockType) -> bool {
        match self.field.set_block(pos, ty, RebuildPolicy::Immediate) {
            EditOutcome::Rejected => false,
            EditOutcome::Applied { affected } => {
                let live = self.chunks.rebuild_all(&*self.field, &affected);
                log::debug!(
                    "edit {:?} -> {} rebuilt {}/{} chunks",
                    pos,
                    ty,
                    live,
                    affected.len()
                );
                true
            }
        }
    }
}

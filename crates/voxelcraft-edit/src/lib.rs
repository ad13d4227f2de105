//! Sparse block overrides layered over procedural terrain, with dirty-chunk tracking.
#![forbid(unsafe_code)]

use std::collections::{BTreeSet, HashMap};

use voxelcraft_blocks::BlockType;
use voxelcraft_world::{BlockPos, BlockSource, CHUNK_SIZE, ChunkCoord, World};

#[derive(Default, Debug, Clone, Copy, PartialEq, Eq)]
pub struct EditStoreStats {
    pub chunk_entries: usize,
    pub block_edits: usize,
    pub dirty_chunks: usize,
}

/// Chunk-bucketed override map plus the set of chunks awaiting a mesh rebuild.
///
/// Every cell ever set is kept, explicit `Air` included, so an override always
/// shadows the procedural rule. Entries are never pruned.
#[derive(Default, Debug, Clone)]
pub struct EditStore {
    // Map per-chunk: key=(cx,cz) -> map of world cell -> block
    inner: HashMap<ChunkCoord, HashMap<BlockPos, BlockType>>,
    dirty: BTreeSet<ChunkCoord>,
}

impl EditStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn stats(&self) -> EditStoreStats {
        EditStoreStats {
            chunk_entries: self.inner.len(),
            block_edits: self.len(),
            dirty_chunks: self.dirty.len(),
        }
    }

    pub fn len(&self) -> usize {
        self.inner.values().map(|m| m.len()).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.values().all(|m| m.is_empty())
    }

    #[inline]
    pub fn get(&self, pos: BlockPos) -> Option<BlockType> {
        self.inner
            .get(&pos.chunk())
            .and_then(|m| m.get(&pos).copied())
    }

    #[inline]
    pub fn set(&mut self, pos: BlockPos, ty: BlockType) {
        self.inner.entry(pos.chunk()).or_default().insert(pos, ty);
    }

    /// Drops every override and pending dirty mark.
    pub fn clear(&mut self) {
        self.inner.clear();
        self.dirty.clear();
    }

    /// Chunks whose meshes can change when `pos` changes: the owner, plus the
    /// axial neighbour across each chunk face the cell touches. No diagonals.
    pub fn affected_chunks(pos: BlockPos) -> Vec<ChunkCoord> {
        let owner = pos.chunk();
        let (lx, lz) = pos.local_xz();
        let mut affected = vec![owner];
        if lx == 0 {
            affected.push(owner.offset(-1, 0));
        }
        if lx == CHUNK_SIZE - 1 {
            affected.push(owner.offset(1, 0));
        }
        if lz == 0 {
            affected.push(owner.offset(0, -1));
        }
        if lz == CHUNK_SIZE - 1 {
            affected.push(owner.offset(0, 1));
        }
        affected
    }

    /// Marks every chunk affected by an edit at `pos` as dirty.
    pub fn mark_dirty_around(&mut self, pos: BlockPos) {
        self.dirty.extend(Self::affected_chunks(pos));
    }

    #[inline]
    pub fn is_dirty(&self, c: ChunkCoord) -> bool {
        self.dirty.contains(&c)
    }

    pub fn dirty_len(&self) -> usize {
        self.dirty.len()
    }

    /// Drains the dirty set in ascending chunk order. Each chunk appears once.
    pub fn take_dirty(&mut self) -> Vec<ChunkCoord> {
        std::mem::take(&mut self.dirty).into_iter().collect()
    }
}

/// When the meshes touched by an edit are rebuilt.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RebuildPolicy {
    /// Caller rebuilds the returned chunks right away.
    Immediate,
    /// Chunks go into the dirty set and are rebuilt on the next flush.
    Deferred,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum EditOutcome {
    /// Out of bounds; nothing was written.
    Rejected,
    /// Written. `affected` lists the chunks to rebuild (already marked dirty
    /// under [`RebuildPolicy::Deferred`]).
    Applied { affected: Vec<ChunkCoord> },
}

impl EditOutcome {
    #[inline]
    pub fn is_applied(&self) -> bool {
        matches!(self, EditOutcome::Applied { .. })
    }
}

/// The block field everything samples: overrides first, then the procedural rule.
#[derive(Clone, Debug)]
pub struct WorldField {
    pub world: World,
    pub edits: EditStore,
}

impl WorldField {
    pub fn new(world: World) -> Self {
        Self {
            world,
            edits: EditStore::new(),
        }
    }

    /// Replaces the world and clears all overrides.
    pub fn reset(&mut self, world: World) {
        self.world = world;
        self.edits.clear();
    }

    /// Writes an override. `Air` is a valid value and shadows generated terrain.
    ///
    /// Rejected unless `(x, z)` is inside the world and `-1 <= y < height`.
    pub fn set_block(&mut self, pos: BlockPos, ty: BlockType, policy: RebuildPolicy) -> EditOutcome {
        if !self.world.contains(pos.x, pos.y, pos.z) {
            log::debug!("rejected edit at {:?}: out of bounds", pos);
            return EditOutcome::Rejected;
        }
        self.edits.set(pos, ty);
        let affected = EditStore::affected_chunks(pos);
        if policy == RebuildPolicy::Deferred {
            self.edits.mark_dirty_around(pos);
        }
        log::trace!("set {:?} -> {} ({} chunks)", pos, ty, affected.len());
        EditOutcome::Applied { affected }
    }
}

impl BlockSource for WorldField {
    #[inline]
    fn world(&self) -> &World {
        &self.world
    }

    #[inline]
    fn block_at(&self, x: i32, y: i32, z: i32) -> BlockType {
        let pos = BlockPos::new(x, y, z);
        if let Some(ty) = self.edits.get(pos) {
            return ty;
        }
        self.world.generated_block(x, y, z)
    }
}

use proptest::prelude::*;
use voxelcraft_blocks::BlockType;
use voxelcraft_edit::{EditStore, RebuildPolicy, WorldField};
use voxelcraft_world::{BlockPos, BlockSource, ChunkCoord, World, WorldGenMode};

proptest! {
    // affected set is the owner plus axial neighbours exactly at local 0 / 15
    #[test]
    fn affected_matches_local_edges(x in -500i32..500, y in -1i32..40, z in -500i32..500) {
        let pos = BlockPos::new(x, y, z);
        let owner = ChunkCoord::containing(x, z);
        let (lx, lz) = pos.local_xz();
        let affected = EditStore::affected_chunks(pos);
        prop_assert_eq!(affected[0], owner);
        let expected = 1
            + usize::from(lx == 0 || lx == 15)
            + usize::from(lz == 0 || lz == 15);
        prop_assert_eq!(affected.len(), expected);
        for c in &affected[1..] {
            prop_assert_eq!(c.chebyshev(owner), 1);
            prop_assert!(c.cx == owner.cx || c.cz == owner.cz);
        }
    }

    // the last write to a cell wins, whatever the terrain says
    #[test]
    fn last_override_wins(
        x in -32i32..32,
        y in -1i32..48,
        z in -32i32..32,
        a in 0u8..13,
        b in 0u8..13,
    ) {
        let mut f = WorldField::new(World::new(64, WorldGenMode::Terrain));
        let (a, b) = (BlockType::from_id(a).unwrap(), BlockType::from_id(b).unwrap());
        let pos = BlockPos::new(x, y, z);
        prop_assert!(f.set_block(pos, a, RebuildPolicy::Immediate).is_applied());
        prop_assert!(f.set_block(pos, b, RebuildPolicy::Immediate).is_applied());
        prop_assert_eq!(f.block_at(x, y, z), b);
        prop_assert_eq!(f.edits.len(), 1);
    }
}

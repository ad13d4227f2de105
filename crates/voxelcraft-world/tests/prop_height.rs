use proptest::prelude::*;
use voxelcraft_blocks::BlockType;
use voxelcraft_world::{BlockSource, ChunkCoord, World, WorldGenMode};

fn world() -> World {
    World::new(128, WorldGenMode::Terrain)
}

proptest! {
    // height rule is pure
    #[test]
    fn height_is_deterministic(x in -64i32..64, z in -64i32..64) {
        let w = world();
        prop_assert_eq!(w.height_at(x, z), w.height_at(x, z));
        prop_assert_eq!(w.height_at(x, z), World::new(128, WorldGenMode::Terrain).height_at(x, z));
    }

    // surface grass, air above, bedrock dirt below
    #[test]
    fn column_layers_follow_height(x in -64i32..64, z in -64i32..64) {
        let w = world();
        let h = w.height_at(x, z);
        prop_assert_eq!(w.block_at(x, h, z), BlockType::Grass);
        prop_assert_eq!(w.block_at(x, h + 1, z), BlockType::Air);
        prop_assert_eq!(w.block_at(x, -1, z), BlockType::Dirt);
        if h > 0 {
            prop_assert_eq!(w.block_at(x, h - 1, z), BlockType::Dirt);
        }
    }

    // out-of-bounds columns are air at every height
    #[test]
    fn outside_is_air(x in 64i32..500, y in -4i32..90, z in -64i32..64) {
        let w = world();
        prop_assert_eq!(w.block_at(x, y, z), BlockType::Air);
        prop_assert_eq!(w.block_at(-x - 1, y, z), BlockType::Air);
    }

    // chunk keys floor consistently for negative coordinates
    #[test]
    fn chunk_origin_contains_column(x in -1000i32..1000, z in -1000i32..1000) {
        let c = ChunkCoord::containing(x, z);
        let (ox, oz) = c.origin();
        prop_assert!(ox <= x && x < ox + 16);
        prop_assert!(oz <= z && z < oz + 16);
    }
}

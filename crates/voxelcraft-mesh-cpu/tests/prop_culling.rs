use std::collections::HashMap;

use proptest::prelude::*;
use voxelcraft_blocks::BlockType;
use voxelcraft_mesh_cpu::{Face, build_chunk_mesh};
use voxelcraft_world::{BlockSource, ChunkCoord, World, WorldGenMode};

/// Sparse cell set over an otherwise empty world.
struct Sparse {
    world: World,
    cells: HashMap<(i32, i32, i32), BlockType>,
}

impl BlockSource for Sparse {
    fn world(&self) -> &World {
        &self.world
    }
    fn block_at(&self, x: i32, y: i32, z: i32) -> BlockType {
        self.cells.get(&(x, y, z)).copied().unwrap_or(BlockType::Air)
    }
}

fn sparse_cells() -> impl Strategy<Value = HashMap<(i32, i32, i32), BlockType>> {
    // cluster around the +X seam of chunk (0,0) so neighbours interact
    prop::collection::hash_map(
        (12i32..20, 0i32..4, 0i32..4),
        (1u8..13).prop_map(|id| BlockType::from_id(id).unwrap()),
        0..40,
    )
}

proptest! {
    // a face exists iff its cell is solid and the neighbour across it is air
    #[test]
    fn faces_match_air_boundaries(cells in sparse_cells()) {
        let src = Sparse { world: World::new(64, WorldGenMode::Flat), cells };
        let coord = ChunkCoord::new(0, 0);
        let mut expected = 0usize;
        for (&(x, y, z), _) in src.cells.iter() {
            if ChunkCoord::containing(x, z) != coord {
                continue;
            }
            for f in Face::ALL {
                let (dx, dy, dz) = f.delta();
                if src.is_air(x + dx, y + dy, z + dz) {
                    expected += 1;
                }
            }
        }
        let got = build_chunk_mesh(&src, coord).map(|m| m.face_count()).unwrap_or(0);
        prop_assert_eq!(got, expected);

        if let Some(mesh) = build_chunk_mesh(&src, coord) {
            for (_, part) in mesh.parts() {
                for (tri, n) in part.triangles() {
                    let c = (tri[0] + tri[1] + tri[2]) * (1.0 / 3.0);
                    let (ix, iy, iz) = (c - n * 0.5).floor_i32();
                    let (ox, oy, oz) = (c + n * 0.5).floor_i32();
                    prop_assert!(src.is_solid(ix, iy, iz));
                    prop_assert!(src.is_air(ox, oy, oz));
                }
            }
        }
    }

    // translucent buffer only carries glass and frost
    #[test]
    fn translucent_split(cells in sparse_cells()) {
        let src = Sparse { world: World::new(64, WorldGenMode::Flat), cells };
        if let Some(mesh) = build_chunk_mesh(&src, ChunkCoord::new(0, 0)) {
            if let Some(t) = mesh.translucent.as_ref() {
                for (tri, n) in t.triangles() {
                    let c = (tri[0] + tri[1] + tri[2]) * (1.0 / 3.0);
                    let (x, y, z) = (c - n * 0.5).floor_i32();
                    prop_assert!(src.block_at(x, y, z).is_translucent());
                }
            }
        }
    }
}

#[test]
fn enclosed_cell_contributes_no_faces() {
    let mut cells = HashMap::new();
    for x in 4..7 {
        for y in 4..7 {
            for z in 4..7 {
                cells.insert((x, y, z), BlockType::Stone);
            }
        }
    }
    let src = Sparse { world: World::new(64, WorldGenMode::Flat), cells };
    let mesh = build_chunk_mesh(&src, ChunkCoord::new(0, 0)).unwrap();
    // 3x3x3 cube: only the 6 outer 3x3 faces remain
    assert_eq!(mesh.face_count(), 54);
}

#[test]
fn flat_world_chunk_counts_top_and_edge_faces() {
    let field = World::new(64, WorldGenMode::Flat);
    // interior chunk: only the grass tops are exposed; y < -1 still samples as dirt
    let mesh = build_chunk_mesh(&field, ChunkCoord::new(0, 0)).unwrap();
    assert_eq!(mesh.face_count(), 16 * 16);
    // corner chunk (-2,-2) touches the world edge on -X and -Z: 6 layers (-1..=4) exposed
    let corner = build_chunk_mesh(&field, ChunkCoord::new(-2, -2)).unwrap();
    assert_eq!(corner.face_count(), 16 * 16 + 2 * 16 * 6);
}

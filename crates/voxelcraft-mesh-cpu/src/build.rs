use voxelcraft_blocks::block_color;
use voxelcraft_geom::{Aabb, Vec3};
use voxelcraft_world::{BlockSource, CHUNK_SIZE, ChunkCoord};

use crate::chunk::ChunkMeshCPU;
use crate::face::Face;
use crate::mesh_build::MeshBuild;

/// Builds the face-culled mesh of one chunk column.
///
/// Every non-air cell in `16 x 16 x (-1..height)` emits each face whose neighbour
/// is air. Neighbours are sampled from `src` directly, so faces on chunk seams
/// need no special case. Glass and Frost go to the translucent buffer.
///
/// Returns `None` for chunks outside the world or chunks with no visible face.
pub fn build_chunk_mesh<S: BlockSource + ?Sized>(src: &S, coord: ChunkCoord) -> Option<ChunkMeshCPU> {
    let world = src.world();
    if !world.chunk_in_bounds(coord) {
        return None;
    }
    let (base_x, base_z) = coord.origin();
    let mut opaque = MeshBuild::default();
    let mut translucent = MeshBuild::default();

    for lx in 0..CHUNK_SIZE {
        let x = base_x + lx;
        for lz in 0..CHUNK_SIZE {
            let z = base_z + lz;
            let shade = world.shade_at(x, z);
            for y in -1..world.height {
                let ty = src.block_at(x, y, z);
                if ty.is_air() {
                    continue;
                }
                let color = block_color(ty, shade);
                let out = if ty.is_translucent() {
                    &mut translucent
                } else {
                    &mut opaque
                };
                for face in Face::ALL {
                    let (dx, dy, dz) = face.delta();
                    if !src.is_air(x + dx, y + dy, z + dz) {
                        continue;
                    }
                    out.add_face(x, y, z, face, color);
                }
            }
        }
    }

    let opaque = (!opaque.is_empty()).then_some(opaque);
    let translucent = (!translucent.is_empty()).then_some(translucent);
    if opaque.is_none() && translucent.is_none() {
        log::trace!("chunk {} produced no faces", coord);
        return None;
    }

    let mut bbox: Option<Aabb> = None;
    for m in opaque.iter().chain(translucent.iter()) {
        for i in 0..m.vertex_count() {
            let v = m.vertex(i);
            match bbox.as_mut() {
                Some(b) => b.include(v),
                None => bbox = Some(Aabb::new(v, v)),
            }
        }
    }
    let bbox = bbox.unwrap_or_else(|| Aabb::new(Vec3::ZERO, Vec3::ZERO));

    let mesh = ChunkMeshCPU {
        coord,
        bbox,
        opaque,
        translucent,
    };
    log::trace!("chunk {} meshed: {} faces", coord, mesh.face_count());
    Some(mesh)
}

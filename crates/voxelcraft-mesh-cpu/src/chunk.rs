use voxelcraft_geom::Aabb;
use voxelcraft_world::ChunkCoord;

use crate::mesh_build::MeshBuild;

/// Render pass a buffer belongs to. Translucent faces are never sorted.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum MeshPass {
    Opaque,
    Translucent,
}

pub struct ChunkMeshCPU {
    pub coord: ChunkCoord,
    pub bbox: Aabb,
    pub opaque: Option<MeshBuild>,
    pub translucent: Option<MeshBuild>,
}

impl ChunkMeshCPU {
    pub fn part(&self, pass: MeshPass) -> Option<&MeshBuild> {
        match pass {
            MeshPass::Opaque => self.opaque.as_ref(),
            MeshPass::Translucent => self.translucent.as_ref(),
        }
    }

    pub fn parts(&self) -> impl Iterator<Item = (MeshPass, &MeshBuild)> {
        self.opaque
            .iter()
            .map(|m| (MeshPass::Opaque, m))
            .chain(self.translucent.iter().map(|m| (MeshPass::Translucent, m)))
    }

    pub fn face_count(&self) -> usize {
        self.parts().map(|(_, m)| m.face_count()).sum()
    }

    /// Frees both buffers and returns the bytes released. A released mesh has no parts.
    pub fn release(&mut self) -> usize {
        let bytes = self.parts().map(|(_, m)| m.byte_len()).sum();
        self.opaque = None;
        self.translucent = None;
        bytes
    }

    #[inline]
    pub fn is_released(&self) -> bool {
        self.opaque.is_none() && self.translucent.is_none()
    }
}

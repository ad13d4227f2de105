//! CPU meshing crate: face-culled chunk meshes split into opaque and translucent passes.
#![forbid(unsafe_code)]

mod build;
mod chunk;
mod face;
mod mesh_build;

pub use build::build_chunk_mesh;
pub use chunk::{ChunkMeshCPU, MeshPass};
pub use face::Face;
pub use mesh_build::MeshBuild;

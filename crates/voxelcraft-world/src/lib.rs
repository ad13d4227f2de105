//! World sizing, the procedural height rule, and block sampling.
#![forbid(unsafe_code)]

mod coords;
pub mod noise;
mod source;
mod world;
pub mod worldgen;

pub use coords::{BlockPos, CHUNK_SIZE, ChunkCoord};
pub use noise::pseudo_noise;
pub use source::BlockSource;
pub use world::{DEFAULT_WORLD_SIZE, World, WorldGenMode};
pub use worldgen::TerrainParams;

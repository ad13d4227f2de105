use serde::{Deserialize, Serialize};

/// Horizontal edge length of a chunk column, in blocks.
pub const CHUNK_SIZE: i32 = 16;

/// Integer world cell. Used as the override-map key in place of string keys.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct BlockPos {
    pub x: i32,
    pub y: i32,
    pub z: i32,
}

impl BlockPos {
    #[inline]
    pub const fn new(x: i32, y: i32, z: i32) -> Self {
        Self { x, y, z }
    }

    #[inline]
    pub fn chunk(self) -> ChunkCoord {
        ChunkCoord::containing(self.x, self.z)
    }

    /// Position inside the owning chunk, both components in `0..CHUNK_SIZE`.
    #[inline]
    pub fn local_xz(self) -> (i32, i32) {
        (
            self.x.rem_euclid(CHUNK_SIZE),
            self.z.rem_euclid(CHUNK_SIZE),
        )
    }

    #[inline]
    pub fn offset(self, dx: i32, dy: i32, dz: i32) -> Self {
        Self::new(self.x + dx, self.y + dy, self.z + dz)
    }
}

impl From<(i32, i32, i32)> for BlockPos {
    fn from(value: (i32, i32, i32)) -> Self {
        Self::new(value.0, value.1, value.2)
    }
}

/// Column chunk key `(floor(x/16), floor(z/16))`.
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
pub struct ChunkCoord {
    pub cx: i32,
    pub cz: i32,
}

impl ChunkCoord {
    #[inline]
    pub const fn new(cx: i32, cz: i32) -> Self {
        Self { cx, cz }
    }

    /// Chunk owning world column `(x, z)`.
    #[inline]
    pub fn containing(x: i32, z: i32) -> Self {
        Self::new(x.div_euclid(CHUNK_SIZE), z.div_euclid(CHUNK_SIZE))
    }

    /// Chunk owning a continuous position.
    #[inline]
    pub fn from_world(x: f32, z: f32) -> Self {
        Self::containing(x.floor() as i32, z.floor() as i32)
    }

    #[inline]
    pub fn offset(self, dx: i32, dz: i32) -> Self {
        Self::new(self.cx + dx, self.cz + dz)
    }

    /// World `(x, z)` of the chunk's minimum corner.
    #[inline]
    pub fn origin(self) -> (i32, i32) {
        (self.cx * CHUNK_SIZE, self.cz * CHUNK_SIZE)
    }

    /// Chebyshev (square) distance in chunks.
    #[inline]
    pub fn chebyshev(self, other: ChunkCoord) -> i32 {
        (self.cx - other.cx).abs().max((self.cz - other.cz).abs())
    }
}

impl From<(i32, i32)> for ChunkCoord {
    fn from(value: (i32, i32)) -> Self {
        Self::new(value.0, value.1)
    }
}

impl From<ChunkCoord> for (i32, i32) {
    fn from(value: ChunkCoord) -> Self {
        (value.cx, value.cz)
    }
}

impl std::fmt::Display for ChunkCoord {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{},{}", self.cx, self.cz)
    }
}

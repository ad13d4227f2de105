use serde::{Deserialize, Serialize};
use voxelcraft_blocks::{BlockType, shade_from_noise};

use crate::coords::{CHUNK_SIZE, ChunkCoord};
use crate::noise::pseudo_noise;
use crate::worldgen::TerrainParams;

pub const DEFAULT_WORLD_SIZE: i32 = 64;

#[derive(Clone, Copy, PartialEq, Eq, Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WorldGenMode {
    #[default]
    Terrain,
    Flat,
}

impl WorldGenMode {
    pub fn describe(self) -> &'static str {
        match self {
            WorldGenMode::Terrain => "rolling terrain",
            WorldGenMode::Flat => "flat plain with trees",
        }
    }
}

/// Bounds and procedural rule of a square world.
///
/// Columns span `[min, max)` on both X and Z; valid cells span `-1..height` on Y.
/// Everything here is pure: the same `(x, z)` always yields the same height.
#[derive(Clone, Debug)]
pub struct World {
    pub size: i32,
    pub min: i32,
    pub max: i32,
    pub height: i32,
    pub mode: WorldGenMode,
    pub params: TerrainParams,
}

impl World {
    pub fn new(size: i32, mode: WorldGenMode) -> Self {
        Self::with_params(size, mode, TerrainParams::default())
    }

    pub fn with_params(size: i32, mode: WorldGenMode, params: TerrainParams) -> Self {
        let size = size.max(1);
        let min = -(size / 2);
        Self {
            size,
            min,
            max: min + size,
            height: (size as f32 * 0.75).floor().clamp(32.0, 80.0) as i32,
            mode,
            params: params.normalized(),
        }
    }

    #[inline]
    pub fn is_flat(&self) -> bool {
        self.mode == WorldGenMode::Flat
    }

    #[inline]
    pub fn contains_column(&self, x: i32, z: i32) -> bool {
        x >= self.min && x < self.max && z >= self.min && z < self.max
    }

    /// `-1 <= y < height`; the extra layer at `-1` is the bedrock row.
    #[inline]
    pub fn valid_y(&self, y: i32) -> bool {
        y >= -1 && y < self.height
    }

    #[inline]
    pub fn contains(&self, x: i32, y: i32, z: i32) -> bool {
        self.contains_column(x, z) && self.valid_y(y)
    }

    /// Surface height of column `(x, z)`.
    pub fn height_at(&self, x: i32, z: i32) -> i32 {
        let p = &self.params;
        if self.is_flat() {
            return p.flat_height;
        }
        let (fx, fz) = (x as f64, z as f64);
        let diag = ((fx + fz) * p.diag_freq).sin() * p.diag_amp;
        let axes = (fx * p.x_freq).cos() * p.x_amp + (fz * p.z_freq).sin() * p.z_amp;
        let n = (pseudo_noise(fx * p.noise_scale, fz * p.noise_scale) - 0.5) * p.noise_amp;
        let h = (p.base + diag + axes + n).floor() as i32;
        h.clamp(p.min_height, p.max_height)
    }

    /// Procedural block at a cell, ignoring any edits.
    pub fn generated_block(&self, x: i32, y: i32, z: i32) -> BlockType {
        if !self.contains_column(x, z) {
            return BlockType::Air;
        }
        if y < 0 {
            return BlockType::Dirt;
        }
        let h = self.height_at(x, z);
        match y.cmp(&h) {
            std::cmp::Ordering::Greater => BlockType::Air,
            std::cmp::Ordering::Equal => BlockType::Grass,
            std::cmp::Ordering::Less => BlockType::Dirt,
        }
    }

    /// Multiplicative color jitter for faces in column `(x, z)`.
    #[inline]
    pub fn shade_at(&self, x: i32, z: i32) -> f32 {
        let s = self.params.shade_scale;
        shade_from_noise(pseudo_noise(x as f64 * s, z as f64 * s))
    }

    /// Whether any column of chunk `c` lies inside the world.
    pub fn chunk_in_bounds(&self, c: ChunkCoord) -> bool {
        let (x0, z0) = c.origin();
        x0 + CHUNK_SIZE > self.min && x0 < self.max && z0 + CHUNK_SIZE > self.min && z0 < self.max
    }

    /// Inclusive chunk index range covering the world on either horizontal axis.
    pub fn chunk_range(&self) -> (i32, i32) {
        (
            self.min.div_euclid(CHUNK_SIZE),
            (self.max - 1).div_euclid(CHUNK_SIZE),
        )
    }
}

impl Default for World {
    fn default() -> Self {
        Self::new(DEFAULT_WORLD_SIZE, WorldGenMode::default())
    }
}

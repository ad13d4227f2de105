use serde::Deserialize;
use std::error::Error;
use std::fs;
use std::path::Path;

use voxelcraft_world::{DEFAULT_WORLD_SIZE, TerrainParams, WorldGenMode};

pub const MIN_WORLD_SIZE: i32 = 16;
pub const MAX_WORLD_SIZE: i32 = 1024;
pub const DEFAULT_VIEW_DISTANCE: i32 = 3;
pub const MAX_VIEW_DISTANCE: i32 = 32;
pub const DEFAULT_REACH: f32 = 8.0;
pub const MAX_REACH: f32 = 64.0;

/// World side length as written by the user: a number or a string like `"128"`.
#[derive(Clone, Debug, Deserialize, PartialEq)]
#[serde(untagged)]
pub enum SizeSetting {
    Int(i64),
    Text(String),
}

impl Default for SizeSetting {
    fn default() -> Self {
        SizeSetting::Int(DEFAULT_WORLD_SIZE as i64)
    }
}

impl SizeSetting {
    /// Accepted sizes are `16..=1024`; anything else falls back to 64.
    pub fn resolve(&self) -> i32 {
        let parsed = match self {
            SizeSetting::Int(n) => Some(*n),
            SizeSetting::Text(s) => s.trim().parse::<i64>().ok(),
        };
        match parsed {
            Some(n) if (MIN_WORLD_SIZE as i64..=MAX_WORLD_SIZE as i64).contains(&n) => n as i32,
            _ => {
                log::warn!(
                    "invalid world size {:?}; using {}",
                    self,
                    DEFAULT_WORLD_SIZE
                );
                DEFAULT_WORLD_SIZE
            }
        }
    }
}

#[derive(Clone, Copy, Debug, Default, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum PickerKind {
    /// Ray against built chunk triangles.
    #[default]
    Mesh,
    /// Voxel walk against the block field.
    Voxel,
}

#[derive(Clone, Debug, Default, Deserialize)]
pub struct WorldSection {
    #[serde(default)]
    pub size: SizeSetting,
    #[serde(default)]
    pub mode: WorldGenMode,
}

#[derive(Clone, Debug, Deserialize)]
pub struct StreamingSection {
    #[serde(default = "default_view_distance")]
    pub view_distance_chunks: i32,
    /// Dedicated mesh workers; the global rayon pool when unset.
    #[serde(default)]
    pub workers: Option<usize>,
}

fn default_view_distance() -> i32 {
    DEFAULT_VIEW_DISTANCE
}

impl StreamingSection {
    /// Accepted radii are `0..=32` chunks; anything else falls back to 3.
    pub fn view_distance(&self) -> i32 {
        let r = self.view_distance_chunks;
        if (0..=MAX_VIEW_DISTANCE).contains(&r) {
            return r;
        }
        log::warn!("invalid view distance {}; using {}", r, DEFAULT_VIEW_DISTANCE);
        DEFAULT_VIEW_DISTANCE
    }
}

impl Default for StreamingSection {
    fn default() -> Self {
        Self {
            view_distance_chunks: default_view_distance(),
            workers: None,
        }
    }
}

#[derive(Clone, Debug, Deserialize)]
pub struct InteractionSection {
    #[serde(default)]
    pub picker: PickerKind,
    #[serde(default = "default_reach")]
    pub reach: f32,
}

fn default_reach() -> f32 {
    DEFAULT_REACH
}

impl InteractionSection {
    /// Finite reach in `(0, 64]`; anything else falls back to 8.
    pub fn reach(&self) -> f32 {
        let r = self.reach;
        if r.is_finite() && r > 0.0 && r <= MAX_REACH {
            return r;
        }
        log::warn!("invalid reach {}; using {}", r, DEFAULT_REACH);
        DEFAULT_REACH
    }
}

impl Default for InteractionSection {
    fn default() -> Self {
        Self {
            picker: PickerKind::default(),
            reach: default_reach(),
        }
    }
}

fn default_seed() -> u64 {
    0x5EED
}

#[derive(Clone, Debug, Deserialize)]
pub struct SimConfig {
    #[serde(default)]
    pub world: WorldSection,
    #[serde(default)]
    pub streaming: StreamingSection,
    #[serde(default)]
    pub interaction: InteractionSection,
    #[serde(default = "default_seed")]
    pub seed: u64,
    #[serde(default)]
    pub terrain: TerrainParams,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            world: WorldSection::default(),
            streaming: StreamingSection::default(),
            interaction: InteractionSection::default(),
            seed: default_seed(),
            terrain: TerrainParams::default(),
        }
    }
}

impl SimConfig {
    #[inline]
    pub fn world_size(&self) -> i32 {
        self.world.size.resolve()
    }
}

pub fn load_config_from_path(path: &Path) -> Result<SimConfig, Box<dyn Error>> {
    let s = fs::read_to_string(path)?;
    let cfg: SimConfig = toml::from_str(&s)?;
    Ok(cfg)
}

/// Loads `path`, or logs why it could not and returns the defaults.
pub fn load_config_or_default(path: &Path) -> SimConfig {
    match load_config_from_path(path) {
        Ok(cfg) => {
            log::info!("loaded config {}", path.display());
            cfg
        }
        Err(e) => {
            log::warn!("config {} unusable ({}); using defaults", path.display(), e);
            SimConfig::default()
        }
    }
}

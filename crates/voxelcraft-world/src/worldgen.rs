use serde::Deserialize;
use std::error::Error;
use std::fs;
use std::path::Path;

/// Coefficients of the terrain height rule.
///
/// `h = base + sin((x+z)*diag_freq)*diag_amp + cos(x*x_freq)*x_amp
///      + sin(z*z_freq)*z_amp + (noise(x*noise_scale, z*noise_scale) - 0.5)*noise_amp`,
/// floored and clamped to `[min_height, max_height]`.
#[derive(Clone, Debug, Deserialize, PartialEq)]
pub struct TerrainParams {
    #[serde(default = "default_base")]
    pub base: f64,
    #[serde(default = "default_diag_freq")]
    pub diag_freq: f64,
    #[serde(default = "default_diag_amp")]
    pub diag_amp: f64,
    #[serde(default = "default_x_freq")]
    pub x_freq: f64,
    #[serde(default = "default_axis_amp")]
    pub x_amp: f64,
    #[serde(default = "default_z_freq")]
    pub z_freq: f64,
    #[serde(default = "default_axis_amp")]
    pub z_amp: f64,
    #[serde(default = "default_noise_scale")]
    pub noise_scale: f64,
    #[serde(default = "default_noise_amp")]
    pub noise_amp: f64,
    #[serde(default = "default_min_height")]
    pub min_height: i32,
    #[serde(default = "default_max_height")]
    pub max_height: i32,
    #[serde(default = "default_flat_height")]
    pub flat_height: i32,
    #[serde(default = "default_shade_scale")]
    pub shade_scale: f64,
}

fn default_base() -> f64 {
    6.0
}
fn default_diag_freq() -> f64 {
    0.08
}
fn default_diag_amp() -> f64 {
    2.5
}
fn default_x_freq() -> f64 {
    0.12
}
fn default_z_freq() -> f64 {
    0.1
}
fn default_axis_amp() -> f64 {
    2.0
}
fn default_noise_scale() -> f64 {
    0.4
}
fn default_noise_amp() -> f64 {
    6.0
}
fn default_min_height() -> i32 {
    1
}
fn default_max_height() -> i32 {
    22
}
fn default_flat_height() -> i32 {
    4
}
fn default_shade_scale() -> f64 {
    0.35
}

impl Default for TerrainParams {
    fn default() -> Self {
        Self {
            base: default_base(),
            diag_freq: default_diag_freq(),
            diag_amp: default_diag_amp(),
            x_freq: default_x_freq(),
            x_amp: default_axis_amp(),
            z_freq: default_z_freq(),
            z_amp: default_axis_amp(),
            noise_scale: default_noise_scale(),
            noise_amp: default_noise_amp(),
            min_height: default_min_height(),
            max_height: default_max_height(),
            flat_height: default_flat_height(),
            shade_scale: default_shade_scale(),
        }
    }
}

impl TerrainParams {
    /// Swaps inverted clamp bounds so `height_at` never panics in `clamp`.
    pub fn normalized(mut self) -> Self {
        if self.min_height > self.max_height {
            std::mem::swap(&mut self.min_height, &mut self.max_height);
        }
        self
    }
}

pub fn load_params_from_path(path: &Path) -> Result<TerrainParams, Box<dyn Error>> {
    let s = fs::read_to_string(path)?;
    let params: TerrainParams = toml::from_str(&s)?;
    Ok(params.normalized())
}

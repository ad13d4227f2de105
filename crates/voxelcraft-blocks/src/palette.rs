//! Flat per-type vertex colors with a cheap positional shade jitter.

use crate::types::BlockType;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Rgb {
    pub r: f32,
    pub g: f32,
    pub b: f32,
}

impl Rgb {
    #[inline]
    pub const fn new(r: f32, g: f32, b: f32) -> Self {
        Self { r, g, b }
    }

    #[inline]
    pub fn scaled(self, k: f32) -> Self {
        Self::new(self.r * k, self.g * k, self.b * k)
    }
}

/// Unshaded base color per type.
pub const fn base_color(ty: BlockType) -> Rgb {
    match ty {
        BlockType::Grass => Rgb::new(0.56, 0.86, 0.34),
        BlockType::Dirt => Rgb::new(0.58, 0.42, 0.26),
        BlockType::Stone => Rgb::new(0.55, 0.58, 0.6),
        BlockType::Sand => Rgb::new(0.92, 0.86, 0.6),
        BlockType::Snow => Rgb::new(0.9, 0.95, 1.0),
        BlockType::Wood => Rgb::new(0.45, 0.28, 0.12),
        BlockType::Leaf => Rgb::new(0.36, 0.72, 0.28),
        BlockType::Water => Rgb::new(0.25, 0.55, 0.95),
        BlockType::Brick => Rgb::new(0.72, 0.32, 0.28),
        BlockType::Glow => Rgb::new(0.95, 0.9, 0.4),
        BlockType::Glass | BlockType::Frost => Rgb::new(0.7, 0.9, 1.0),
        BlockType::Air => Rgb::new(0.6, 0.6, 0.6),
    }
}

/// Maps a `[0,1)` noise sample to a multiplicative shade in `[0.84, 0.96)`.
#[inline]
pub fn shade_from_noise(noise: f64) -> f32 {
    (0.9 + (noise - 0.5) * 0.12) as f32
}

/// Final vertex color for a face of `ty` given its column shade.
/// Translucent types ignore the jitter so panes read as uniform.
pub fn block_color(ty: BlockType, shade: f32) -> Rgb {
    let k = match ty {
        BlockType::Glow => shade * 1.05,
        BlockType::Glass => 1.05,
        BlockType::Frost => 0.9,
        _ => shade,
    };
    base_color(ty).scaled(k)
}

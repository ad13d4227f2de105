//! Block types and the flat per-type color palette.
#![forbid(unsafe_code)]

pub mod palette;
pub mod types;

pub use palette::{Rgb, block_color, shade_from_noise};
pub use types::BlockType;

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Closed set of block kinds. `Air` is the empty sentinel everywhere in the engine.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Default, Debug, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
#[repr(u8)]
pub enum BlockType {
    #[default]
    Air = 0,
    Grass = 1,
    Dirt = 2,
    Stone = 3,
    Sand = 4,
    Snow = 5,
    Wood = 6,
    Leaf = 7,
    Water = 8,
    Brick = 9,
    Glow = 10,
    Glass = 11,
    Frost = 12,
}

impl BlockType {
    pub const ALL: [BlockType; 13] = [
        BlockType::Air,
        BlockType::Grass,
        BlockType::Dirt,
        BlockType::Stone,
        BlockType::Sand,
        BlockType::Snow,
        BlockType::Wood,
        BlockType::Leaf,
        BlockType::Water,
        BlockType::Brick,
        BlockType::Glow,
        BlockType::Glass,
        BlockType::Frost,
    ];

    /// Types offered for placement, in palette order.
    pub const PLACEABLE: [BlockType; 12] = [
        BlockType::Grass,
        BlockType::Dirt,
        BlockType::Stone,
        BlockType::Sand,
        BlockType::Snow,
        BlockType::Wood,
        BlockType::Leaf,
        BlockType::Water,
        BlockType::Brick,
        BlockType::Glow,
        BlockType::Glass,
        BlockType::Frost,
    ];

    #[inline]
    pub const fn id(self) -> u8 {
        self as u8
    }

    #[inline]
    pub fn from_id(id: u8) -> Option<BlockType> {
        Self::ALL.get(id as usize).copied()
    }

    #[inline]
    pub const fn is_air(self) -> bool {
        matches!(self, BlockType::Air)
    }

    /// Anything but air blocks movement and hides neighbouring faces.
    #[inline]
    pub const fn is_solid(self) -> bool {
        !self.is_air()
    }

    /// Glass and Frost render in the blended pass.
    #[inline]
    pub const fn is_translucent(self) -> bool {
        matches!(self, BlockType::Glass | BlockType::Frost)
    }

    pub const fn name(self) -> &'static str {
        match self {
            BlockType::Air => "air",
            BlockType::Grass => "grass",
            BlockType::Dirt => "dirt",
            BlockType::Stone => "stone",
            BlockType::Sand => "sand",
            BlockType::Snow => "snow",
            BlockType::Wood => "wood",
            BlockType::Leaf => "leaf",
            BlockType::Water => "water",
            BlockType::Brick => "brick",
            BlockType::Glow => "glow",
            BlockType::Glass => "glass",
            BlockType::Frost => "frost",
        }
    }

    /// Human-readable label shown next to the selected block.
    pub const fn label(self) -> &'static str {
        match self {
            BlockType::Air => "Air",
            BlockType::Grass => "Grass",
            BlockType::Dirt => "Dirt",
            BlockType::Stone => "Stone",
            BlockType::Sand => "Sand",
            BlockType::Snow => "Snow",
            BlockType::Wood => "Wood",
            BlockType::Leaf => "Leaf",
            BlockType::Water => "Water",
            BlockType::Brick => "Brick",
            BlockType::Glow => "Glow",
            BlockType::Glass => "Glass",
            BlockType::Frost => "Frost (translucent)",
        }
    }
}

impl fmt::Display for BlockType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownBlockName(pub String);

impl fmt::Display for UnknownBlockName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown block type '{}'", self.0)
    }
}

impl std::error::Error for UnknownBlockName {}

impl FromStr for BlockType {
    type Err = UnknownBlockName;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lower = s.trim().to_ascii_lowercase();
        BlockType::ALL
            .iter()
            .copied()
            .find(|b| b.name() == lower)
            .ok_or_else(|| UnknownBlockName(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_glass_and_frost_are_translucent() {
        let translucent: Vec<_> = BlockType::ALL
            .iter()
            .copied()
            .filter(|b| b.is_translucent())
            .collect();
        assert_eq!(translucent, vec![BlockType::Glass, BlockType::Frost]);
    }

    #[test]
    fn placeable_excludes_air_only() {
        assert!(!BlockType::PLACEABLE.contains(&BlockType::Air));
        assert_eq!(BlockType::PLACEABLE.len(), BlockType::ALL.len() - 1);
    }

    #[test]
    fn parse_names() {
        assert_eq!("Stone".parse::<BlockType>(), Ok(BlockType::Stone));
        assert_eq!(" frost ".parse::<BlockType>(), Ok(BlockType::Frost));
        assert!("obsidian".parse::<BlockType>().is_err());
    }
}

//! Tilemap formats, tilemap cells and their binary codecs
//!
//! Every format fixes four things: which flips count as the same tile, how many
//! tile ids it can address, how many palettes and colors its attributes can
//! select, and how cells are framed on the wire.

use clap::ValueEnum;
use std::fmt;

/// Binary encoders and decoders for each format
pub mod codec;
/// Tilemap cells and the tilemap container
pub mod tessera;

pub use tessera::{TileTessera, Tilemap};

/// Palette capacity of a format
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PaletteLimits {
    /// Number of palettes the attribute bits can select
    pub max_palettes: usize,
    /// Number of colors in each palette
    pub max_colors: usize,
}

impl PaletteLimits {
    /// Whether the format has no palette concept
    pub const fn is_none(self) -> bool {
        self.max_palettes == 0 || self.max_colors == 0
    }
}

/// Supported tilemap file layouts
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, ValueEnum)]
pub enum TilemapFormat {
    /// One id byte per cell
    #[default]
    Plain,
    /// Id byte plus attribute byte per cell (SGB border layout)
    TileAttr,
    /// Nybble-packed runs terminated by `$00` (RBY town map)
    RleNybbles,
    /// Id bytes terminated by `$FF` (GSC town map)
    FfEnd,
    /// Id byte with flip flags in the top bits (PC town map)
    XyFlip,
    /// `[id, count]` runs terminated by `$FF` (Pokégear card)
    RleFfEnd,
}

impl TilemapFormat {
    /// Every format, in menu order
    pub const ALL: [Self; 6] = [
        Self::Plain,
        Self::TileAttr,
        Self::RleNybbles,
        Self::FfEnd,
        Self::XyFlip,
        Self::RleFfEnd,
    ];

    /// Human-readable format name
    pub const fn name(self) -> &'static str {
        match self {
            Self::Plain => "Plain tiles",
            Self::TileAttr => "Tiles + attributes",
            Self::RleNybbles => "RBY Town Map",
            Self::FfEnd => "GSC Town Map",
            Self::XyFlip => "PC Town Map",
            Self::RleFfEnd => "Pokégear card",
        }
    }

    /// Number of addressable tile ids; valid ids are `0..tileset_size()`
    pub const fn tileset_size(self) -> usize {
        match self {
            Self::Plain => 256,
            Self::TileAttr => 1024,
            Self::RleNybbles => 16,
            // $FF is the terminator
            Self::FfEnd | Self::RleFfEnd => 255,
            Self::XyFlip => 64,
        }
    }

    /// Whether x/y flipped tiles may share a tileset entry
    pub const fn supports_flips(self) -> bool {
        matches!(self, Self::TileAttr | Self::XyFlip)
    }

    /// Palette count and per-palette color count
    pub const fn palette_limits(self) -> PaletteLimits {
        match self {
            Self::TileAttr => PaletteLimits {
                max_palettes: 4,
                max_colors: 16,
            },
            _ => PaletteLimits {
                max_palettes: 0,
                max_colors: 0,
            },
        }
    }

    /// Attribute value of the first palette
    ///
    /// SGB borders may only use palettes 4 to 7.
    pub const fn palette_base(self) -> u8 {
        match self {
            Self::TileAttr => 4,
            _ => 0,
        }
    }

    /// Whether cells carry an attribute byte that can go to a separate attrmap
    pub const fn has_attributes(self) -> bool {
        matches!(self, Self::TileAttr)
    }

    /// Sentinel byte that ends the stream, if the format is terminated
    pub const fn terminator(self) -> Option<u8> {
        match self {
            Self::RleNybbles => Some(0x00),
            Self::FfEnd | Self::RleFfEnd => Some(0xFF),
            _ => None,
        }
    }

    /// Longest run a single run-length entry can hold
    pub const fn max_run(self) -> Option<usize> {
        match self {
            Self::RleNybbles => Some(0x0F),
            Self::RleFfEnd => Some(0xFF),
            _ => None,
        }
    }
}

impl fmt::Display for TilemapFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

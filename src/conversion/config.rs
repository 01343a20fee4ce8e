//! Per-run conversion parameters

use crate::format::TilemapFormat;
use crate::io::configuration::DEFAULT_SPACE_COLOR;
use crate::io::error::{Result, invalid_parameter};
use crate::tiles::tile::Color;

/// A uniform tile written as a fixed id instead of joining the tileset
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SpaceTile {
    /// Id written for space tiles
    pub id: u16,
    /// Color that fills a space tile
    pub color: Color,
}

impl SpaceTile {
    /// A space tile of the default color
    pub const fn new(id: u16) -> Self {
        Self {
            id,
            color: DEFAULT_SPACE_COLOR,
        }
    }
}

/// Everything a conversion needs to know, passed explicitly into each call
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ConversionConfig {
    /// Output tilemap format
    pub format: TilemapFormat,
    /// Id of the first tileset entry
    pub start_id: u16,
    /// Space tile handling, if enabled
    pub space: Option<SpaceTile>,
    /// Pack tile colors into the format's palettes
    pub generate_palette: bool,
}

impl ConversionConfig {
    /// A configuration with no start offset, space tile or palette generation
    pub const fn new(format: TilemapFormat) -> Self {
        Self {
            format,
            start_id: 0,
            space: None,
            generate_palette: false,
        }
    }

    /// Number of unique tiles that fit between `start_id` and the end of the
    /// format's index space
    ///
    /// Ids run contiguously from `start_id`, so a space id inside that range
    /// ends it early: the space id is never handed to a tileset entry.
    pub fn tileset_capacity(&self) -> usize {
        let start = usize::from(self.start_id);
        let end = self.format.tileset_size();
        self.reserved_space_id()
            .unwrap_or(end)
            .saturating_sub(start)
    }

    /// The space id, if it falls where tileset entries would be numbered
    pub fn reserved_space_id(&self) -> Option<usize> {
        let start = usize::from(self.start_id);
        let end = self.format.tileset_size();
        self.space
            .map(|space| usize::from(space.id))
            .filter(|id| (start..end).contains(id))
    }

    /// Check the parameters against the format
    ///
    /// # Errors
    ///
    /// Returns `InvalidParameter` if the start id or space id is outside the
    /// format's index space, or palette generation is requested for a format
    /// without palettes.
    pub fn validate(&self) -> Result<()> {
        let size = self.format.tileset_size();
        if usize::from(self.start_id) >= size {
            return Err(invalid_parameter(
                "start_id",
                &self.start_id,
                &format!("{} only has ids below {size}", self.format),
            ));
        }
        if let Some(space) = self.space
            && usize::from(space.id) >= size
        {
            return Err(invalid_parameter(
                "space_id",
                &space.id,
                &format!("{} only has ids below {size}", self.format),
            ));
        }
        if self.generate_palette && self.format.palette_limits().is_none() {
            return Err(invalid_parameter(
                "palette",
                &self.format,
                &"format has no palettes",
            ));
        }
        Ok(())
    }
}

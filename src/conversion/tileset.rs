//! Tileset deduplication and tilemap construction
//!
//! Tiles are matched by linear scan rather than hashing because a match may
//! need a flip. The scan runs in insertion order so the first admitted
//! equivalent tile always wins, which keeps output reproducible.

use crate::conversion::config::ConversionConfig;
use crate::format::TileTessera;
use crate::io::error::{ConversionError, Result};
use crate::tiles::equivalence::are_identical;
use crate::tiles::tile::{Flip, TileGrid};
use log::debug;

/// Result of deduplicating a tile grid
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct BuiltTileset {
    /// One cell per source tile, in source order, without positions
    pub cells: Vec<TileTessera>,
    /// Source tile index of each tileset entry, in id order
    pub tileset: Vec<usize>,
}

/// Deduplicate `grid` into a tileset and the cells that reference it
///
/// Space tiles (when configured) get the space id and never enter the tileset.
/// Every other tile reuses the first equivalent tileset entry or is appended.
///
/// # Errors
///
/// Returns `TooManyTiles` as soon as a new entry would need an id outside the
/// format's index space or equal to the space id. No partial result is
/// returned.
pub fn build_tilemap(grid: &TileGrid, config: &ConversionConfig) -> Result<BuiltTileset> {
    let capacity = config.tileset_capacity();
    let mut built = BuiltTileset {
        cells: Vec::with_capacity(grid.len()),
        tileset: Vec::new(),
    };

    for (index, tile) in grid.tiles().iter().enumerate() {
        if let Some(space) = config.space
            && tile.is_uniform(space.color)
        {
            built.cells.push(TileTessera::new(space.id));
            continue;
        }

        let found = built.tileset.iter().enumerate().find_map(|(slot, &entry)| {
            grid.get(entry)
                .and_then(|reference| are_identical(tile, reference, config.format))
                .map(|flip| (slot, flip))
        });

        let (slot, flip) = if let Some(found) = found {
            found
        } else {
            let slot = built.tileset.len();
            if slot >= capacity {
                debug!("Tile {index} would be unique tile {} of {capacity}", slot + 1);
                if let Some(reserved) = config.reserved_space_id() {
                    debug!("Ids stop before the space id {reserved:#X}");
                }
                return Err(ConversionError::TooManyTiles { capacity });
            }
            built.tileset.push(index);
            (slot, Flip::NONE)
        };

        let id = usize::from(config.start_id) + slot;
        let id = u16::try_from(id).map_err(|err| ConversionError::Computation {
            operation: "tile id",
            reason: err.to_string(),
        })?;
        built.cells.push(TileTessera::new(id).with_flip(flip));
    }

    debug!(
        "Built {} cells over {} unique tiles",
        built.cells.len(),
        built.tileset.len()
    );
    Ok(built)
}

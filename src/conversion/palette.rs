//! Palette partitioning by best-fit bin packing of tile color sets
//!
//! Each tile must be drawable from a single palette, so every tile's color set
//! has to end up inside one bucket. Sets are packed smallest first; a set joins
//! the last existing bucket that can absorb it, otherwise it opens a new one.
//! Adapted from the SuperFamiconv palette optimizer.

use crate::format::PaletteLimits;
use crate::io::error::{ConversionError, Result};
use crate::tiles::tile::{ColorSet, TileGrid};
use log::debug;

/// Pack the colors of every tile into at most `limits.max_palettes` palettes
///
/// Palettes are returned largest first.
///
/// # Errors
///
/// - `TileExceedsColorLimit` for the first tile with more than
///   `limits.max_colors` colors
/// - `TooManyPalettes` if the packing needs more palettes than allowed
pub fn partition_palettes(grid: &TileGrid, limits: PaletteLimits) -> Result<Vec<ColorSet>> {
    let max_colors = limits.max_colors;

    let mut tile_sets = Vec::with_capacity(grid.len());
    for (index, tile) in grid.tiles().iter().enumerate() {
        let set = tile.color_set();
        if set.len() > max_colors {
            let (x, y) = grid.position(index);
            return Err(ConversionError::TileExceedsColorLimit { x, y, max_colors });
        }
        tile_sets.push(set);
    }

    let unique = unique_color_sets(tile_sets);
    let mut maximal = remove_subsets(&unique);
    maximal.sort_by_key(ColorSet::len);

    let mut buckets = merge_color_sets(&maximal, max_colors);
    debug!(
        "Packed {} unique color sets ({} maximal) into {} palettes",
        unique.len(),
        maximal.len(),
        buckets.len()
    );
    if buckets.len() > limits.max_palettes {
        return Err(ConversionError::TooManyPalettes {
            needed: buckets.len(),
            max_palettes: limits.max_palettes,
        });
    }

    buckets.sort_by(|a, b| b.len().cmp(&a.len()));
    Ok(buckets)
}

/// Drop repeated color sets, keeping first occurrences in order
pub fn unique_color_sets(sets: Vec<ColorSet>) -> Vec<ColorSet> {
    let mut unique: Vec<ColorSet> = Vec::with_capacity(sets.len());
    for set in sets {
        if !unique.contains(&set) {
            unique.push(set);
        }
    }
    unique
}

/// Drop every set that is a proper subset of another set in `sets`
///
/// `sets` must already be free of duplicates.
pub fn remove_subsets(sets: &[ColorSet]) -> Vec<ColorSet> {
    sets.iter()
        .filter(|set| {
            !sets
                .iter()
                .any(|other| other != *set && set.is_subset(other))
        })
        .cloned()
        .collect()
}

/// Greedily merge `sets` into buckets of at most `max_colors` colors
///
/// Each set goes into the *last* bucket whose union with it still fits. A set
/// that fits nowhere opens a new bucket.
pub fn merge_color_sets(sets: &[ColorSet], max_colors: usize) -> Vec<ColorSet> {
    let mut buckets: Vec<ColorSet> = Vec::new();
    for set in sets {
        let fitting = buckets
            .iter()
            .rposition(|bucket| bucket.len() + set.difference(bucket).count() <= max_colors);
        match fitting.and_then(|index| buckets.get_mut(index)) {
            Some(bucket) => bucket.extend(set.iter().copied()),
            None => buckets.push(set.clone()),
        }
    }
    buckets
}

/// Index of the first palette containing all of each tile's colors
///
/// # Errors
///
/// Returns a `Computation` error if some tile fits no palette, which cannot
/// happen for palettes produced by `partition_palettes` on the same grid.
pub fn assign_palettes(grid: &TileGrid, palettes: &[ColorSet]) -> Result<Vec<usize>> {
    grid.tiles()
        .iter()
        .enumerate()
        .map(|(index, tile)| {
            let set = tile.color_set();
            palettes
                .iter()
                .position(|palette| set.is_subset(palette))
                .ok_or_else(|| ConversionError::Computation {
                    operation: "palette assignment",
                    reason: format!("tile {index} fits no palette"),
                })
        })
        .collect()
}

//! Tile identity under the flips a format allows

use crate::format::TilemapFormat;
use crate::tiles::tile::{Flip, Tile};

/// Transforms `format` lets two tiles share a tileset entry under
///
/// Always starts with the identity; flip-capable formats add x, y, then both.
pub fn candidate_flips(format: TilemapFormat) -> &'static [Flip] {
    if format.supports_flips() {
        &Flip::ORDER
    } else {
        &[Flip::NONE]
    }
}

/// Find how `tile` can be drawn using `reference`
///
/// Returns the first flip, in identity / x / y / both order, for which drawing
/// `reference` with that flip reproduces `tile`. The order decides which flags
/// a symmetric tile is recorded with.
pub fn are_identical(tile: &Tile, reference: &Tile, format: TilemapFormat) -> Option<Flip> {
    candidate_flips(format)
        .iter()
        .copied()
        .find(|&flip| tile.matches_flipped(reference, flip))
}

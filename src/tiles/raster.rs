//! Lay tiles out as images
//!
//! Pure layout: pixels are copied unchanged from the source tiles, with no
//! palette or compression applied.

use crate::format::Tilemap;
use crate::io::configuration::{BACKGROUND_COLOR, TILE_SIZE, TILES_PER_ROW};
use crate::tiles::tile::{Flip, Tile, TileGrid};
use image::{Rgb, RgbImage};

/// Pixel dimensions `(width, height)` of a tileset image holding `count` tiles
pub const fn tileset_dimensions(count: usize) -> (usize, usize) {
    let columns = if count < TILES_PER_ROW {
        count
    } else {
        TILES_PER_ROW
    };
    let rows = count.div_ceil(TILES_PER_ROW);
    (columns * TILE_SIZE, rows * TILE_SIZE)
}

/// Render the tileset entries of `grid` in index order, `TILES_PER_ROW` per row
///
/// Indices that do not refer to a tile in `grid` leave their cell blank.
pub fn render_tileset(grid: &TileGrid, tileset: &[usize]) -> RgbImage {
    let (width, height) = tileset_dimensions(tileset.len());
    let mut img = RgbImage::from_pixel(width as u32, height as u32, Rgb(BACKGROUND_COLOR));

    for (slot, &index) in tileset.iter().enumerate() {
        if let Some(tile) = grid.get(index) {
            let x = slot % TILES_PER_ROW;
            let y = slot / TILES_PER_ROW;
            blit(&mut img, tile, x, y, Flip::NONE);
        }
    }

    img
}

/// Render a tilemap using `tiles` as its tileset
///
/// Cell ids are offset by `start_id`; ids with no matching tile are drawn as
/// background.
pub fn render_tilemap(tilemap: &Tilemap, tiles: &[Tile], start_id: u16) -> RgbImage {
    render_tilemap_banks(tilemap, &[(start_id, tiles)])
}

/// Render a tilemap whose ids span several tilesets
///
/// Each bank is `(first id, tiles)`. Where banks overlap, the later bank
/// supplies the tile.
pub fn render_tilemap_banks(tilemap: &Tilemap, banks: &[(u16, &[Tile])]) -> RgbImage {
    let width = tilemap.width() * TILE_SIZE;
    let height = tilemap.height() * TILE_SIZE;
    let mut img = RgbImage::from_pixel(width as u32, height as u32, Rgb(BACKGROUND_COLOR));

    for cell in tilemap.cells() {
        let tile = banks.iter().rev().find_map(|&(start_id, tiles)| {
            cell.id
                .checked_sub(start_id)
                .and_then(|index| tiles.get(usize::from(index)))
        });
        if let Some(tile) = tile {
            blit(&mut img, tile, cell.col, cell.row, cell.flip());
        }
    }

    img
}

fn blit(img: &mut RgbImage, tile: &Tile, tile_x: usize, tile_y: usize, flip: Flip) {
    let drawn = tile.flipped(flip);
    for ty in 0..TILE_SIZE {
        for tx in 0..TILE_SIZE {
            let px = (tile_x * TILE_SIZE + tx) as u32;
            let py = (tile_y * TILE_SIZE + ty) as u32;
            if let (Some(color), Some(pixel)) = (drawn.pixel(tx, ty), img.get_pixel_mut_checked(px, py))
            {
                *pixel = Rgb(color);
            }
        }
    }
}

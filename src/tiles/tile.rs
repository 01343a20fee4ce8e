//! Fixed-size tiles and their extraction from pixel grids
//!
//! An image is cut into 8x8 tiles in raster order. Tiles are immutable; flipped
//! variants are computed on demand rather than stored.

use crate::io::configuration::{TILE_PIXELS, TILE_SIZE};
use crate::io::error::{ConversionError, Result, invalid_parameter};
use ndarray::Array2;
use std::collections::BTreeSet;

/// An RGB pixel color
pub type Color = [u8; 3];

/// The unique colors of one tile, ordered for deterministic palette packing
pub type ColorSet = BTreeSet<Color>;

/// A combination of horizontal and vertical mirroring
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Flip {
    /// Mirror left to right
    pub x: bool,
    /// Mirror top to bottom
    pub y: bool,
}

impl Flip {
    /// The identity transform
    pub const NONE: Self = Self { x: false, y: false };
    /// Horizontal mirror only
    pub const X: Self = Self { x: true, y: false };
    /// Vertical mirror only
    pub const Y: Self = Self { x: false, y: true };
    /// Both mirrors (a 180° rotation)
    pub const XY: Self = Self { x: true, y: true };

    /// Transforms in the order tile matching tries them
    pub const ORDER: [Self; 4] = [Self::NONE, Self::X, Self::Y, Self::XY];

    /// Create a flip from its two flags
    pub const fn new(x: bool, y: bool) -> Self {
        Self { x, y }
    }

    /// Whether this is the identity transform
    pub const fn is_none(self) -> bool {
        !self.x && !self.y
    }
}

/// A square block of `TILE_SIZE` x `TILE_SIZE` pixels stored row-major
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Tile {
    pixels: [Color; TILE_PIXELS],
}

impl Tile {
    /// Create a tile from row-major pixels
    pub const fn new(pixels: [Color; TILE_PIXELS]) -> Self {
        Self { pixels }
    }

    /// Create a tile where every pixel has the same color
    pub const fn filled(color: Color) -> Self {
        Self {
            pixels: [color; TILE_PIXELS],
        }
    }

    /// Create a tile from a function of the pixel's `(x, y)` position
    pub fn from_fn(mut f: impl FnMut(usize, usize) -> Color) -> Self {
        Self {
            pixels: std::array::from_fn(|i| f(i % TILE_SIZE, i / TILE_SIZE)),
        }
    }

    /// Row-major pixel colors
    pub const fn pixels(&self) -> &[Color; TILE_PIXELS] {
        &self.pixels
    }

    /// Color at `(x, y)`, or `None` outside the tile
    pub fn pixel(&self, x: usize, y: usize) -> Option<Color> {
        if x >= TILE_SIZE || y >= TILE_SIZE {
            return None;
        }
        self.pixels.get(y * TILE_SIZE + x).copied()
    }

    /// The tile as it appears when drawn with `flip`
    #[must_use]
    pub fn flipped(&self, flip: Flip) -> Self {
        if flip.is_none() {
            return self.clone();
        }
        Self::from_fn(|x, y| {
            let sx = if flip.x { TILE_SIZE - 1 - x } else { x };
            let sy = if flip.y { TILE_SIZE - 1 - y } else { y };
            self.pixel(sx, sy).unwrap_or_default()
        })
    }

    /// Whether drawing `other` with `flip` reproduces this tile
    pub fn matches_flipped(&self, other: &Self, flip: Flip) -> bool {
        if flip.is_none() {
            return self.pixels == other.pixels;
        }
        (0..TILE_SIZE).all(|y| {
            (0..TILE_SIZE).all(|x| {
                let sx = if flip.x { TILE_SIZE - 1 - x } else { x };
                let sy = if flip.y { TILE_SIZE - 1 - y } else { y };
                self.pixel(x, y) == other.pixel(sx, sy)
            })
        })
    }

    /// Whether every pixel is `color`
    pub fn is_uniform(&self, color: Color) -> bool {
        self.pixels.iter().all(|&pixel| pixel == color)
    }

    /// The set of unique colors in the tile
    pub fn color_set(&self) -> ColorSet {
        self.pixels.iter().copied().collect()
    }
}

/// The tiles of an image in raster order
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TileGrid {
    tiles: Vec<Tile>,
    columns: usize,
}

impl TileGrid {
    /// Cut a `(height, width)` pixel grid into tiles
    ///
    /// # Errors
    ///
    /// Returns `ImageDimensionMismatch` if the image is empty or either
    /// dimension is not a multiple of `TILE_SIZE`.
    pub fn from_pixels(pixels: &Array2<Color>) -> Result<Self> {
        let (height, width) = pixels.dim();
        if width == 0 || height == 0 || width % TILE_SIZE != 0 || height % TILE_SIZE != 0 {
            return Err(ConversionError::ImageDimensionMismatch { width, height });
        }

        let columns = width / TILE_SIZE;
        let rows = height / TILE_SIZE;
        let mut tiles = Vec::with_capacity(columns * rows);
        for tile_row in 0..rows {
            for tile_col in 0..columns {
                tiles.push(Tile::from_fn(|x, y| {
                    pixels
                        .get((tile_row * TILE_SIZE + y, tile_col * TILE_SIZE + x))
                        .copied()
                        .unwrap_or_default()
                }));
            }
        }

        Ok(Self { tiles, columns })
    }

    /// Arrange already extracted tiles into rows of `columns`
    ///
    /// # Errors
    ///
    /// Returns an error if `columns` is zero or the tiles do not fill whole rows.
    pub fn from_tiles(tiles: Vec<Tile>, columns: usize) -> Result<Self> {
        if columns == 0 {
            return Err(invalid_parameter("columns", &columns, &"must be positive"));
        }
        if tiles.len() % columns != 0 {
            return Err(ConversionError::SizeMismatch {
                expected: tiles.len().div_ceil(columns) * columns,
                actual: tiles.len(),
            });
        }
        Ok(Self { tiles, columns })
    }

    /// All tiles in raster order
    pub fn tiles(&self) -> &[Tile] {
        &self.tiles
    }

    /// Tile at a raster index
    pub fn get(&self, index: usize) -> Option<&Tile> {
        self.tiles.get(index)
    }

    /// Width of the grid in tiles
    pub const fn columns(&self) -> usize {
        self.columns
    }

    /// Height of the grid in tiles
    pub const fn rows(&self) -> usize {
        if self.columns == 0 {
            0
        } else {
            self.tiles.len() / self.columns
        }
    }

    /// Number of tiles
    pub const fn len(&self) -> usize {
        self.tiles.len()
    }

    /// Whether the grid has no tiles
    pub const fn is_empty(&self) -> bool {
        self.tiles.is_empty()
    }

    /// `(x, y)` tile coordinates of a raster index
    pub const fn position(&self, index: usize) -> (usize, usize) {
        if self.columns == 0 {
            (0, 0)
        } else {
            (index % self.columns, index / self.columns)
        }
    }
}

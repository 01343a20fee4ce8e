//! Tilemap cells and the owning tilemap container

use crate::format::{TilemapFormat, codec};
use crate::io::error::{ConversionError, Result, invalid_parameter};
use crate::tiles::tile::Flip;

/// One tilemap cell: a tileset reference plus flip and palette attributes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct TileTessera {
    /// Row in the tilemap, assigned by the container
    pub row: usize,
    /// Column in the tilemap, assigned by the container
    pub col: usize,
    /// Tile id, including any start id offset
    pub id: u16,
    /// Draw the tile mirrored left to right
    pub x_flip: bool,
    /// Draw the tile mirrored top to bottom
    pub y_flip: bool,
    /// SGB palette index, `None` when the cell has no color attribute
    pub color: Option<u8>,
}

impl TileTessera {
    /// An unflipped, uncolored cell
    pub const fn new(id: u16) -> Self {
        Self {
            row: 0,
            col: 0,
            id,
            x_flip: false,
            y_flip: false,
            color: None,
        }
    }

    /// The same cell with `flip` applied
    #[must_use]
    pub const fn with_flip(mut self, flip: Flip) -> Self {
        self.x_flip = flip.x;
        self.y_flip = flip.y;
        self
    }

    /// The same cell with a palette attribute
    #[must_use]
    pub const fn with_color(mut self, color: Option<u8>) -> Self {
        self.color = color;
        self
    }

    /// Flip flags as a single value
    pub const fn flip(&self) -> Flip {
        Flip::new(self.x_flip, self.y_flip)
    }
}

/// An owned grid of cells in raster order
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tilemap {
    cells: Vec<TileTessera>,
    width: usize,
}

impl Tilemap {
    /// Lay `cells` out in rows of `width`, assigning each cell its position
    ///
    /// # Errors
    ///
    /// Returns an error if `width` is zero or the cells do not fill whole rows.
    pub fn new(mut cells: Vec<TileTessera>, width: usize) -> Result<Self> {
        if width == 0 {
            return Err(invalid_parameter("width", &width, &"must be positive"));
        }
        if cells.len() % width != 0 {
            return Err(ConversionError::SizeMismatch {
                expected: cells.len().div_ceil(width) * width,
                actual: cells.len(),
            });
        }
        for (index, cell) in cells.iter_mut().enumerate() {
            cell.row = index / width;
            cell.col = index % width;
        }
        Ok(Self { cells, width })
    }

    /// Cells in raster order
    pub fn cells(&self) -> &[TileTessera] {
        &self.cells
    }

    /// Release the cells
    pub fn into_cells(self) -> Vec<TileTessera> {
        self.cells
    }

    /// Width in cells
    pub const fn width(&self) -> usize {
        self.width
    }

    /// Height in cells
    pub const fn height(&self) -> usize {
        self.cells.len() / self.width
    }

    /// Cell at `(row, col)`
    pub fn get(&self, row: usize, col: usize) -> Option<&TileTessera> {
        if col >= self.width {
            return None;
        }
        self.cells.get(row * self.width + col)
    }

    /// Encode the tilemap in `format`
    ///
    /// # Errors
    ///
    /// Returns `Unencodable` if any cell does not fit the format.
    pub fn encode(&self, format: TilemapFormat) -> Result<Vec<u8>> {
        codec::encode(&self.cells, format)
    }

    /// Decode `bytes` and lay the cells out in rows of `width`
    ///
    /// # Errors
    ///
    /// Returns the decoder's error, or `SizeMismatch` if the decoded cells do
    /// not fill whole rows.
    pub fn decode(bytes: &[u8], format: TilemapFormat, width: usize) -> Result<Self> {
        Self::new(codec::decode(bytes, format)?, width)
    }
}

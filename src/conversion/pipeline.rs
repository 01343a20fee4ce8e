//! Image to tilemap conversion, run to completion before anything is written

use crate::conversion::config::ConversionConfig;
use crate::conversion::palette::{assign_palettes, partition_palettes};
use crate::conversion::tileset::build_tilemap;
use crate::format::{TilemapFormat, Tilemap};
use crate::io::error::{ConversionError, Result};
use crate::io::image::{encode_image, load_pixels};
use crate::io::tilemap::{encode_tilemap, write_files};
use crate::tiles::raster::render_tileset;
use crate::tiles::tile::{Color, ColorSet, TileGrid};
use image::RgbImage;
use log::{debug, info};
use ndarray::Array2;
use std::path::{Path, PathBuf};

/// Where a conversion's outputs go
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputPaths {
    /// Tilemap file
    pub tilemap: PathBuf,
    /// Separate attribute map; when set, the tilemap file holds ids only
    pub attrmap: Option<PathBuf>,
    /// Tileset image (PNG or BMP by extension)
    pub tileset: PathBuf,
}

/// A finished in-memory conversion
#[derive(Debug, Clone)]
pub struct Conversion {
    /// Format the tilemap is written in
    pub format: TilemapFormat,
    /// Cells laid out on the source image's tile grid
    pub tilemap: Tilemap,
    /// Source tile index of each tileset entry
    pub tileset: Vec<usize>,
    /// Generated palettes, largest first; empty unless requested
    pub palettes: Vec<ColorSet>,
    /// Rendered tileset
    pub tileset_image: RgbImage,
}

/// Convert a `(height, width)` pixel grid
///
/// # Errors
///
/// Returns the first failure of parameter validation, tile extraction, palette
/// partitioning or tileset building. An image made only of space tiles fails
/// with `EmptyTileset`.
pub fn convert(pixels: &Array2<Color>, config: &ConversionConfig) -> Result<Conversion> {
    config.validate()?;
    let grid = TileGrid::from_pixels(pixels)?;
    debug!(
        "Extracted {}x{} tiles for {}",
        grid.columns(),
        grid.rows(),
        config.format
    );
    convert_grid(&grid, config)
}

/// Convert the image at `path`
///
/// # Errors
///
/// Returns `ImageLoad` if the image cannot be read, otherwise as `convert`.
pub fn convert_image_file(path: &Path, config: &ConversionConfig) -> Result<Conversion> {
    let pixels = load_pixels(path)?;
    convert(&pixels, config)
}

/// Convert an already extracted tile grid
///
/// # Errors
///
/// As `convert`, minus tile extraction.
pub fn convert_grid(grid: &TileGrid, config: &ConversionConfig) -> Result<Conversion> {
    config.validate()?;

    let palettes = if config.generate_palette {
        partition_palettes(grid, config.format.palette_limits())?
    } else {
        Vec::new()
    };

    let built = build_tilemap(grid, config)?;
    if built.tileset.is_empty() {
        return Err(ConversionError::EmptyTileset);
    }

    let mut cells = built.cells;
    if !palettes.is_empty() {
        let assignment = assign_palettes(grid, &palettes)?;
        let base = config.format.palette_base();
        for ((cell, tile), palette) in cells.iter_mut().zip(grid.tiles()).zip(assignment) {
            let is_space = config
                .space
                .is_some_and(|space| tile.is_uniform(space.color));
            if !is_space {
                cell.color = u8::try_from(palette).ok().map(|index| base + index);
            }
        }
    }

    let tilemap = Tilemap::new(cells, grid.columns())?;
    let tileset_image = render_tileset(grid, &built.tileset);

    Ok(Conversion {
        format: config.format,
        tilemap,
        tileset: built.tileset,
        palettes,
        tileset_image,
    })
}

impl Conversion {
    /// Encode and write the tilemap, optional attribute map and tileset image
    ///
    /// Every output is encoded in memory before the first file is created. If
    /// a write fails, the outputs already written are removed.
    ///
    /// # Errors
    ///
    /// Returns `Unencodable` or `InvalidParameter` if the tilemap cannot be
    /// encoded, `ImageExport` if the tileset path names no supported image
    /// format, or `WriteFailure` naming the file that could not be written.
    pub fn write(&self, paths: &OutputPaths) -> Result<()> {
        let mut files = encode_tilemap(
            &paths.tilemap,
            paths.attrmap.as_deref(),
            &self.tilemap,
            self.format,
        )?;
        files.push((
            paths.tileset.clone(),
            encode_image(&paths.tileset, &self.tileset_image)?,
        ));
        write_files(&files)?;
        info!(
            "Wrote {} and {} ({} unique tiles)",
            paths.tilemap.display(),
            paths.tileset.display(),
            self.tileset.len()
        );
        Ok(())
    }
}

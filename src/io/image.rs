//! Image file loading and saving
//!
//! Images are decoded to RGB; alpha is discarded. The output format follows
//! the file extension.

use crate::io::error::{ConversionError, Result};
use crate::io::tilemap::write_bytes;
use crate::tiles::tile::{Color, TileGrid};
use image::{ImageError, ImageFormat, RgbImage};
use ndarray::Array2;
use std::io::Cursor;
use std::path::Path;

/// Load an image as a `(height, width)` grid of RGB colors
///
/// # Errors
///
/// Returns `ImageLoad` if the file cannot be opened or decoded.
pub fn load_pixels(path: &Path) -> Result<Array2<Color>> {
    let img = image::open(path).map_err(|e| ConversionError::ImageLoad {
        path: path.to_path_buf(),
        source: e,
    })?;
    Ok(pixels_from_image(&img.to_rgb8()))
}

/// Convert a decoded image into a `(height, width)` color grid
pub fn pixels_from_image(img: &RgbImage) -> Array2<Color> {
    let (width, height) = (img.width() as usize, img.height() as usize);
    Array2::from_shape_fn((height, width), |(row, col)| {
        img.get_pixel_checked(col as u32, row as u32)
            .map(|pixel| pixel.0)
            .unwrap_or_default()
    })
}

/// Load a tileset image and cut it into tiles
///
/// # Errors
///
/// Returns `ImageLoad` for unreadable files, or `ImageDimensionMismatch` if
/// the image is not a whole number of tiles.
pub fn load_tiles(path: &Path) -> Result<TileGrid> {
    TileGrid::from_pixels(&load_pixels(path)?)
}

/// Encode an image in memory in the format named by `path`'s extension
///
/// # Errors
///
/// Returns `ImageExport` if the extension is unknown or its encoder is not
/// available.
pub fn encode_image(path: &Path, img: &RgbImage) -> Result<Vec<u8>> {
    let export_error = |source: ImageError| ConversionError::ImageExport {
        path: path.to_path_buf(),
        source,
    };
    let format = ImageFormat::from_path(path).map_err(export_error)?;

    let mut cursor = Cursor::new(Vec::new());
    img.write_to(&mut cursor, format).map_err(export_error)?;
    Ok(cursor.into_inner())
}

/// Save an image, creating the parent directory if needed
///
/// # Errors
///
/// Returns `ImageExport` if the image cannot be encoded, or `WriteFailure` if
/// the directory or file cannot be written.
pub fn save_image(path: &Path, img: &RgbImage) -> Result<()> {
    let bytes = encode_image(path, img)?;
    write_bytes(path, &bytes)
}

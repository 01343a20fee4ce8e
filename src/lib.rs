//! Image to tileset and tilemap conversion for retro tile hardware
//!
//! An image is cut into 8x8 tiles, duplicate tiles (optionally including
//! flipped copies) are merged into a tileset, tile colors can be packed into
//! palettes, and the resulting tilemap is encoded in one of several binary
//! formats. Tilemaps can also be decoded and rendered back into images.

#![forbid(unsafe_code)]

/// Tileset building, palette packing and the conversion pipeline
pub mod conversion;
/// Tilemap formats and binary codecs
pub mod format;
/// Input/output operations and error handling
pub mod io;
/// Tiles, flip equivalence and rasterization
pub mod tiles;

pub use io::error::{ConversionError, Result};

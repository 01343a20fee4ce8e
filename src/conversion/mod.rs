//! Conversion of tile grids into tilesets, palettes and tilemaps

/// Per-run conversion parameters
pub mod config;
/// Best-fit palette packing of tile colors
pub mod palette;
/// End-to-end image conversion
pub mod pipeline;
/// Tileset deduplication
pub mod tileset;

pub use config::{ConversionConfig, SpaceTile};
pub use pipeline::{Conversion, OutputPaths, convert, convert_grid, convert_image_file};

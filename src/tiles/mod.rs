//! Tiles, tile matching and tile layout
//!
//! This module contains the tile-level building blocks:
//! - Tile extraction from pixel grids
//! - Equivalence under horizontal and vertical flips
//! - Rendering tilesets and tilemaps back into images

/// Flip-aware tile comparison
pub mod equivalence;
/// Tileset and tilemap image layout
pub mod raster;
/// Tile data structures and extraction
pub mod tile;

pub use tile::{Color, ColorSet, Flip, Tile, TileGrid};

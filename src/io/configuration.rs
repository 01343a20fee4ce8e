//! Tile geometry constants and command-line defaults

/// Edge length of a tile in pixels
pub const TILE_SIZE: usize = 8;

/// Number of pixels in one tile
pub const TILE_PIXELS: usize = TILE_SIZE * TILE_SIZE;

/// Width of the tileset image in tiles
pub const TILES_PER_ROW: usize = 16;

/// Fill color for the unused part of rendered images
pub const BACKGROUND_COLOR: [u8; 3] = [0xFF, 0xFF, 0xFF];

// Pokémon games reserve $7F as the blank text tile
/// Default id written for space tiles
pub const DEFAULT_SPACE_ID: u16 = 0x7F;

/// Default color a tile must be filled with to count as a space tile
pub const DEFAULT_SPACE_COLOR: [u8; 3] = [0xFF, 0xFF, 0xFF];

/// Default id of the first tileset entry
pub const DEFAULT_START_ID: u16 = 0;

/// Extension of written tilemap files
pub const TILEMAP_EXTENSION: &str = "tilemap";

/// Extension of written attribute map files
pub const ATTRMAP_EXTENSION: &str = "attrmap";

/// Suffix added to tileset image filenames
pub const TILESET_SUFFIX: &str = "_tileset";

/// Suffix added to rendered tilemap filenames
pub const RENDER_SUFFIX: &str = "_render";

/// Image extensions accepted as conversion input
pub const INPUT_EXTENSIONS: [&str; 2] = ["png", "bmp"];

/// Width of progress bars in characters
pub const PROGRESS_BAR_WIDTH: u16 = 40;

/// Exit code when a file cannot be read or written
pub const ENVIRONMENT_ERROR_EXIT_CODE: u8 = 1;

/// Exit code when the input or parameters are rejected, matching clap's
/// usage errors
pub const INPUT_ERROR_EXIT_CODE: u8 = 2;

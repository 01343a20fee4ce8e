//! Error types for tile conversion, tilemap codecs and file operations

use crate::io::configuration::{ENVIRONMENT_ERROR_EXIT_CODE, INPUT_ERROR_EXIT_CODE};
use std::fmt;
use std::path::PathBuf;

/// Main error type for all conversion and codec operations
#[derive(Debug)]
pub enum ConversionError {
    /// Image size is not a whole number of tiles
    ImageDimensionMismatch {
        /// Image width in pixels
        width: usize,
        /// Image height in pixels
        height: usize,
    },

    /// A single tile uses more colors than one palette can hold
    TileExceedsColorLimit {
        /// Tile column in the source image
        x: usize,
        /// Tile row in the source image
        y: usize,
        /// Per-palette color limit of the format
        max_colors: usize,
    },

    /// The tiles' color sets could not be packed into the available palettes
    TooManyPalettes {
        /// Number of palettes the packing produced
        needed: usize,
        /// Palette limit of the format
        max_palettes: usize,
    },

    /// More unique tiles than the format's index space leaves room for
    TooManyTiles {
        /// Number of tileset slots available after the start id
        capacity: usize,
    },

    /// Every tile was a space tile, so there is no tileset to output
    EmptyTileset,

    /// Failed to read a tilemap or attribute map file
    ReadFailure {
        /// Path of the file
        path: PathBuf,
        /// Underlying I/O error
        source: std::io::Error,
    },

    /// Failed to write an output file
    WriteFailure {
        /// Path of the file
        path: PathBuf,
        /// Underlying I/O error
        source: std::io::Error,
    },

    /// Failed to load a source or tileset image
    ImageLoad {
        /// Path to the image file
        path: PathBuf,
        /// Underlying image loading error
        source: image::ImageError,
    },

    /// Failed to save a rendered image
    ImageExport {
        /// Path where export was attempted
        path: PathBuf,
        /// Underlying image export error
        source: image::ImageError,
    },

    /// A byte in a tilemap stream is not valid for the format
    InvalidByte {
        /// Offset of the byte in the stream
        offset: usize,
        /// The offending byte
        byte: u8,
    },

    /// The tilemap stream ended before a cell or terminator was complete
    Truncated {
        /// Stream length at which more data was expected
        offset: usize,
    },

    /// Two parallel streams or a cell grid disagree in size
    SizeMismatch {
        /// Expected element count
        expected: usize,
        /// Actual element count
        actual: usize,
    },

    /// A cell cannot be represented in the format's bit budget
    Unencodable {
        /// Position of the cell in the tilemap
        index: usize,
        /// What does not fit
        reason: String,
    },

    /// Conversion parameter validation failed
    InvalidParameter {
        /// Name of the invalid parameter
        parameter: &'static str,
        /// Provided value that failed validation
        value: String,
        /// Explanation of why the value is invalid
        reason: String,
    },

    /// An internal computation produced an inconsistent result
    Computation {
        /// Name of the computation that failed
        operation: &'static str,
        /// Description of the failure
        reason: String,
    },
}

impl fmt::Display for ConversionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ImageDimensionMismatch { width, height } => {
                write!(
                    f,
                    "Image dimensions {width}x{height} do not fit the 8x8 tile grid"
                )
            }
            Self::TileExceedsColorLimit { x, y, max_colors } => {
                write!(f, "The tile at ({x}, {y}) has more than {max_colors} colors")
            }
            Self::TooManyPalettes {
                needed,
                max_palettes,
            } => {
                write!(
                    f,
                    "The tiles need more than {max_palettes} palettes ({needed} required)"
                )
            }
            Self::TooManyTiles { capacity } => {
                write!(f, "Too many unique tiles (at most {capacity} fit)")
            }
            Self::EmptyTileset => write!(f, "Image contains only space tiles"),
            Self::ReadFailure { path, source } => {
                write!(f, "Could not read '{}': {source}", path.display())
            }
            Self::WriteFailure { path, source } => {
                write!(f, "Could not write to '{}': {source}", path.display())
            }
            Self::ImageLoad { path, source } => {
                write!(f, "Failed to load image '{}': {source}", path.display())
            }
            Self::ImageExport { path, source } => {
                write!(
                    f,
                    "Failed to export image to '{}': {source}",
                    path.display()
                )
            }
            Self::InvalidByte { offset, byte } => {
                write!(f, "Invalid byte ${byte:02X} at offset {offset}")
            }
            Self::Truncated { offset } => {
                write!(f, "Tilemap data ends unexpectedly at offset {offset}")
            }
            Self::SizeMismatch { expected, actual } => {
                write!(f, "Size mismatch: expected {expected}, found {actual}")
            }
            Self::Unencodable { index, reason } => {
                write!(f, "Cannot encode tile {index}: {reason}")
            }
            Self::InvalidParameter {
                parameter,
                value,
                reason,
            } => {
                write!(f, "Invalid parameter '{parameter}' = '{value}': {reason}")
            }
            Self::Computation { operation, reason } => {
                write!(f, "Computation error in {operation}: {reason}")
            }
        }
    }
}

impl std::error::Error for ConversionError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::ImageLoad { source, .. } | Self::ImageExport { source, .. } => Some(source),
            Self::ReadFailure { source, .. } | Self::WriteFailure { source, .. } => Some(source),
            _ => None,
        }
    }
}

/// Convenience type alias for conversion results
pub type Result<T> = std::result::Result<T, ConversionError>;

impl From<image::ImageError> for ConversionError {
    fn from(err: image::ImageError) -> Self {
        Self::ImageLoad {
            path: PathBuf::from("<unknown>"),
            source: err,
        }
    }
}

impl From<std::io::Error> for ConversionError {
    fn from(err: std::io::Error) -> Self {
        Self::ReadFailure {
            path: PathBuf::from("<unknown>"),
            source: err,
        }
    }
}

/// Create an invalid parameter error
pub fn invalid_parameter(
    parameter: &'static str,
    value: &impl ToString,
    reason: &impl ToString,
) -> ConversionError {
    ConversionError::InvalidParameter {
        parameter,
        value: value.to_string(),
        reason: reason.to_string(),
    }
}

/// Create an unencodable cell error
pub fn unencodable(index: usize, reason: &impl ToString) -> ConversionError {
    ConversionError::Unencodable {
        index,
        reason: reason.to_string(),
    }
}

impl ConversionError {
    /// Whether the user can fix the failure by changing the input or the parameters
    ///
    /// Environment failures (files that cannot be opened or written) return false.
    pub const fn is_input_error(&self) -> bool {
        !matches!(
            self,
            Self::ReadFailure { .. }
                | Self::WriteFailure { .. }
                | Self::ImageLoad { .. }
                | Self::ImageExport { .. }
        )
    }

    /// Process exit code reporting this failure
    pub const fn exit_code(&self) -> u8 {
        if self.is_input_error() {
            INPUT_ERROR_EXIT_CODE
        } else {
            ENVIRONMENT_ERROR_EXIT_CODE
        }
    }
}

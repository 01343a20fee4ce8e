//! File formats, command-line handling and error types

/// Command-line interface and batch processing
pub mod cli;
/// Shared constants
pub mod configuration;
/// Error types
pub mod error;
/// Image loading and saving
pub mod image;
/// Batch progress display
pub mod progress;
/// Tilemap and attribute map files
pub mod tilemap;

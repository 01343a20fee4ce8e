//! Command-line interface for converting images and rendering tilemaps

use crate::conversion::{ConversionConfig, OutputPaths, SpaceTile, convert_image_file};
use crate::format::TilemapFormat;
use crate::io::configuration::{
    ATTRMAP_EXTENSION, DEFAULT_SPACE_ID, DEFAULT_START_ID, INPUT_EXTENSIONS, RENDER_SUFFIX,
    TILEMAP_EXTENSION, TILESET_SUFFIX,
};
use crate::io::error::{ConversionError, Result, invalid_parameter};
use crate::io::image::{load_tiles, save_image};
use crate::io::progress::ProgressManager;
use crate::io::tilemap::read_tilemap;
use crate::tiles::raster::render_tilemap_banks;
use crate::tiles::tile::{Color, Tile, TileGrid};
use clap::{Args, Parser, Subcommand};
use log::{debug, info, warn};
use std::path::{Path, PathBuf};

#[derive(Parser, Debug)]
#[command(name = "tileforge")]
#[command(
    author,
    version,
    about = "Convert images to deduplicated tilesets and retro tilemap formats"
)]
/// Command-line arguments
pub struct Cli {
    /// Operation to run
    #[command(subcommand)]
    pub command: Command,
}

/// Available operations
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Convert PNG/BMP images into a tilemap and a tileset image
    Convert(ConvertArgs),
    /// Render a tilemap file using a tileset image
    Render(RenderArgs),
}

/// Arguments for `convert`
// Conversion has several independent on/off options
#[allow(clippy::struct_excessive_bools)]
#[derive(Args, Debug)]
pub struct ConvertArgs {
    /// Input PNG/BMP file or directory to convert
    #[arg(value_name = "TARGET")]
    pub target: PathBuf,

    /// Output tilemap format
    #[arg(short, long, value_enum, default_value_t = TilemapFormat::Plain)]
    pub format: TilemapFormat,

    /// Id of the first tileset entry (decimal, 0x.. or $..)
    #[arg(long, value_parser = parse_id, default_value_t = DEFAULT_START_ID)]
    pub start_id: u16,

    /// Write uniform space-colored tiles as the space id
    #[arg(short, long)]
    pub space: bool,

    /// Id written for space tiles
    #[arg(long, value_parser = parse_id, default_value_t = DEFAULT_SPACE_ID)]
    pub space_id: u16,

    /// Fill color of space tiles as RRGGBB
    #[arg(long, value_parser = parse_color, default_value = "FFFFFF")]
    pub space_color: Color,

    /// Pack tile colors into the format's palettes
    #[arg(short, long)]
    pub palette: bool,

    /// Write attributes to a separate attribute map
    #[arg(short, long)]
    pub attrmap: bool,

    /// Write the tileset as BMP instead of PNG
    #[arg(long)]
    pub bmp: bool,

    /// Directory for outputs (defaults to each input's directory)
    #[arg(short, long)]
    pub output_dir: Option<PathBuf>,

    /// Suppress progress output
    #[arg(short, long)]
    pub quiet: bool,

    /// Convert files even if the tilemap output exists
    #[arg(short, long)]
    pub no_skip: bool,
}

/// Arguments for `render`
#[derive(Args, Debug)]
pub struct RenderArgs {
    /// Tilemap file to render
    #[arg(value_name = "TILEMAP")]
    pub tilemap: PathBuf,

    /// Tileset image the tilemap refers to, as PATH or PATH@ID; repeat to
    /// combine tilesets, each starting where the previous one ends unless an
    /// id is given
    #[arg(short, long, required = true, value_parser = parse_tileset)]
    pub tileset: Vec<TilesetArg>,

    /// Tilemap width in tiles
    #[arg(short, long)]
    pub width: usize,

    /// Tilemap format
    #[arg(short, long, value_enum, default_value_t = TilemapFormat::Plain)]
    pub format: TilemapFormat,

    /// Separate attribute map belonging to the tilemap
    #[arg(short, long)]
    pub attrmap: Option<PathBuf>,

    /// Id of the first tileset's first entry (decimal, 0x.. or $..)
    #[arg(long, value_parser = parse_id, default_value_t = DEFAULT_START_ID)]
    pub start_id: u16,

    /// Output image (defaults to <TILEMAP>_render.png)
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

/// A tileset image given to `render`, with an optional first id
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TilesetArg {
    /// Tileset image
    pub path: PathBuf,
    /// Id of its first tile, if given as `PATH@ID`
    pub start_id: Option<u16>,
}

impl Cli {
    /// Run the selected command
    ///
    /// # Errors
    ///
    /// Returns the first conversion, decoding or file error.
    pub fn run(self) -> Result<()> {
        match self.command {
            Command::Convert(args) => FileProcessor::new(args).process(),
            Command::Render(args) => args.render(),
        }
    }
}

impl ConvertArgs {
    /// Conversion parameters selected on the command line
    pub fn config(&self) -> ConversionConfig {
        ConversionConfig {
            format: self.format,
            start_id: self.start_id,
            space: self.space.then_some(SpaceTile {
                id: self.space_id,
                color: self.space_color,
            }),
            generate_palette: self.palette,
        }
    }

    /// Check if existing output files should be skipped
    pub const fn skip_existing(&self) -> bool {
        !self.no_skip
    }

    /// Check if progress should be displayed
    pub const fn should_show_progress(&self) -> bool {
        !self.quiet
    }

    /// Output files for `input`
    pub fn output_paths(&self, input: &Path) -> OutputPaths {
        let stem = input.file_stem().unwrap_or_default().to_string_lossy();
        let dir = self
            .output_dir
            .clone()
            .or_else(|| input.parent().map(Path::to_path_buf))
            .unwrap_or_default();
        let tileset_extension = if self.bmp { "bmp" } else { "png" };

        OutputPaths {
            tilemap: dir.join(format!("{stem}.{TILEMAP_EXTENSION}")),
            attrmap: self
                .attrmap
                .then(|| dir.join(format!("{stem}.{ATTRMAP_EXTENSION}"))),
            tileset: dir.join(format!("{stem}{TILESET_SUFFIX}.{tileset_extension}")),
        }
    }
}

impl RenderArgs {
    /// Decode the tilemap and save it drawn with the tileset
    ///
    /// # Errors
    ///
    /// Returns read, decode, image load or export errors.
    pub fn render(&self) -> Result<()> {
        let tilemap = read_tilemap(
            &self.tilemap,
            self.attrmap.as_deref(),
            self.format,
            self.width,
        )?;
        let tilesets = self.load_tilesets()?;
        let banks: Vec<(u16, &[Tile])> = tilesets
            .iter()
            .map(|(start_id, grid)| (*start_id, grid.tiles()))
            .collect();
        let img = render_tilemap_banks(&tilemap, &banks);

        let output = self
            .output
            .clone()
            .unwrap_or_else(|| Self::default_output_path(&self.tilemap));
        save_image(&output, &img)?;
        info!(
            "Rendered {} ({}x{} tiles) to {}",
            self.tilemap.display(),
            tilemap.width(),
            tilemap.height(),
            output.display()
        );
        Ok(())
    }

    /// Load every tileset with the id of its first tile
    ///
    /// # Errors
    ///
    /// Returns the first image load error.
    pub fn load_tilesets(&self) -> Result<Vec<(u16, TileGrid)>> {
        let mut next_id = self.start_id;
        let mut loaded = Vec::with_capacity(self.tileset.len());
        for tileset in &self.tileset {
            let start_id = tileset.start_id.unwrap_or(next_id);
            let grid = load_tiles(&tileset.path)?;
            debug!(
                "Tileset {} holds ids {start_id:#X} onwards ({} tiles)",
                tileset.path.display(),
                grid.len()
            );
            next_id = u16::try_from(usize::from(start_id) + grid.len()).unwrap_or(u16::MAX);
            loaded.push((start_id, grid));
        }
        Ok(loaded)
    }

    fn default_output_path(tilemap: &Path) -> PathBuf {
        let stem = tilemap.file_stem().unwrap_or_default().to_string_lossy();
        let name = format!("{stem}{RENDER_SUFFIX}.png");
        tilemap
            .parent()
            .map_or_else(|| PathBuf::from(&name), |parent| parent.join(&name))
    }
}

/// Orchestrates conversion of one image or a directory of images
pub struct FileProcessor {
    args: ConvertArgs,
    progress_manager: ProgressManager,
}

impl FileProcessor {
    /// Create a new file processor with the given arguments
    pub const fn new(args: ConvertArgs) -> Self {
        Self {
            args,
            progress_manager: ProgressManager::new(),
        }
    }

    /// Convert every selected file, stopping at the first failure
    ///
    /// # Errors
    ///
    /// Returns an error if the target is invalid or any conversion fails.
    pub fn process(&mut self) -> Result<()> {
        self.args.config().validate()?;
        let files = self.collect_files()?;

        if files.is_empty() {
            return Ok(());
        }

        if self.args.should_show_progress() {
            self.progress_manager.initialize(files.len());
        }

        for file in &files {
            self.process_file(file)?;
        }

        self.progress_manager.finish();
        Ok(())
    }

    /// Input files selected by the target, sorted by name
    ///
    /// # Errors
    ///
    /// Returns an error if the target is neither an image nor a readable
    /// directory.
    pub fn collect_files(&self) -> Result<Vec<PathBuf>> {
        let target = &self.args.target;
        if target.is_file() {
            if !is_input_image(target) {
                return Err(invalid_parameter(
                    "target",
                    &target.display(),
                    &"must be a PNG or BMP image",
                ));
            }
            Ok(self
                .should_process_file(target)
                .then(|| target.clone())
                .into_iter()
                .collect())
        } else if target.is_dir() {
            let entries = std::fs::read_dir(target).map_err(|e| ConversionError::ReadFailure {
                path: target.clone(),
                source: e,
            })?;
            let mut files = Vec::new();
            for entry in entries {
                let path = entry
                    .map_err(|e| ConversionError::ReadFailure {
                        path: target.clone(),
                        source: e,
                    })?
                    .path();
                if is_input_image(&path) && !is_generated(&path) && self.should_process_file(&path)
                {
                    files.push(path);
                }
            }
            files.sort();
            Ok(files)
        } else {
            Err(invalid_parameter(
                "target",
                &target.display(),
                &"must be an image file or directory",
            ))
        }
    }

    fn should_process_file(&self, input_path: &Path) -> bool {
        if !self.args.skip_existing() {
            return true;
        }

        let output_path = self.args.output_paths(input_path).tilemap;
        if output_path.exists() {
            warn!("Skipping: {} (output exists)", input_path.display());
            false
        } else {
            true
        }
    }

    fn process_file(&mut self, input_path: &Path) -> Result<()> {
        self.progress_manager.start_file(input_path);

        let conversion = convert_image_file(input_path, &self.args.config())?;
        let paths = self.args.output_paths(input_path);
        conversion.write(&paths)?;

        info!(
            "Converted {} to {} and {}",
            input_path.display(),
            paths.tilemap.display(),
            paths.tileset.display()
        );
        self.progress_manager.complete_file();
        Ok(())
    }
}

fn has_extension(path: &Path, extensions: &[&str]) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| extensions.iter().any(|e| ext.eq_ignore_ascii_case(e)))
}

fn is_input_image(path: &Path) -> bool {
    path.is_file() && has_extension(path, &INPUT_EXTENSIONS)
}

fn is_generated(path: &Path) -> bool {
    path.file_stem()
        .and_then(|stem| stem.to_str())
        .is_some_and(|stem| stem.ends_with(TILESET_SUFFIX) || stem.ends_with(RENDER_SUFFIX))
}

/// Parse a tile id written as decimal, `0x..` or `$..` hexadecimal
///
/// # Errors
///
/// Returns a message if the text is not a number that fits in 16 bits.
pub fn parse_id(text: &str) -> std::result::Result<u16, String> {
    let text = text.trim();
    let parsed = if let Some(hex) = text.strip_prefix('$') {
        u16::from_str_radix(hex, 16)
    } else if let Some(hex) = text
        .strip_prefix("0x")
        .or_else(|| text.strip_prefix("0X"))
    {
        u16::from_str_radix(hex, 16)
    } else {
        text.parse()
    };
    parsed.map_err(|e| format!("'{text}' is not a tile id: {e}"))
}

/// Parse a tileset argument written as `PATH` or `PATH@ID`
///
/// A suffix after the last `@` that is not a tile id stays part of the path.
///
/// # Errors
///
/// Returns a message if the path is empty.
pub fn parse_tileset(text: &str) -> std::result::Result<TilesetArg, String> {
    let (path, start_id) = text
        .rsplit_once('@')
        .filter(|(path, _)| !path.is_empty())
        .and_then(|(path, id)| parse_id(id).ok().map(|start_id| (path, Some(start_id))))
        .unwrap_or((text, None));
    if path.is_empty() {
        return Err("tileset path is empty".to_owned());
    }
    Ok(TilesetArg {
        path: PathBuf::from(path),
        start_id,
    })
}

/// Parse an `RRGGBB` color, with or without a leading `#`
///
/// # Errors
///
/// Returns a message unless the text is exactly six hex digits.
pub fn parse_color(text: &str) -> std::result::Result<Color, String> {
    let hex = text.trim().trim_start_matches('#');
    if hex.len() != 6 || !hex.chars().all(|c| c.is_ascii_hexdigit()) {
        return Err(format!("'{text}' is not an RRGGBB color"));
    }
    let value = u32::from_str_radix(hex, 16).map_err(|e| e.to_string())?;
    let [_, r, g, b] = value.to_be_bytes();
    Ok([r, g, b])
}

//! Tests for end-to-end conversion of pixel grids

#[cfg(test)]
mod tests {
    use ndarray::Array2;
    use tempfile::TempDir;
    use tileforge::ConversionError;
    use tileforge::conversion::{ConversionConfig, OutputPaths, SpaceTile, convert};
    use tileforge::format::TilemapFormat;
    use tileforge::io::configuration::DEFAULT_SPACE_COLOR;
    use tileforge::tiles::tile::Color;

    const RED: Color = [255, 0, 0];
    const GREEN: Color = [0, 255, 0];
    const BLUE: Color = [0, 0, 255];

    /// Fill the tile at `(tile_x, tile_y)` with `paint(x, y)`
    fn paint_tile(
        pixels: &mut Array2<Color>,
        tile_x: usize,
        tile_y: usize,
        paint: impl Fn(usize, usize) -> Color,
    ) {
        for y in 0..8 {
            for x in 0..8 {
                pixels[[tile_y * 8 + y, tile_x * 8 + x]] = paint(x, y);
            }
        }
    }

    fn cell_ids(conversion: &tileforge::conversion::Conversion) -> Vec<u16> {
        conversion.tilemap.cells().iter().map(|cell| cell.id).collect()
    }

    // Tests a 2x2 tile image with one repeated tile
    // Verified by disabling duplicate detection
    #[test]
    fn test_two_unique_tiles() {
        let mut pixels = Array2::from_elem((16, 16), RED);
        paint_tile(&mut pixels, 1, 0, |_, _| BLUE);

        let conversion = convert(&pixels, &ConversionConfig::new(TilemapFormat::Plain)).unwrap();

        assert_eq!(conversion.tileset, vec![0, 1]);
        assert_eq!(cell_ids(&conversion), vec![0, 1, 0, 0]);
        assert_eq!(conversion.tilemap.width(), 2);
        assert_eq!(conversion.tilemap.height(), 2);
        assert_eq!(
            (conversion.tileset_image.width(), conversion.tileset_image.height()),
            (16, 8)
        );
        assert!(conversion.palettes.is_empty());
    }

    // Tests that an image of only space tiles has nothing to write
    // Verified by removing the empty tileset check
    #[test]
    fn test_only_space_tiles() {
        let pixels = Array2::from_elem((8, 16), DEFAULT_SPACE_COLOR);
        let mut config = ConversionConfig::new(TilemapFormat::Plain);
        config.space = Some(SpaceTile::new(0x7F));

        assert!(matches!(
            convert(&pixels, &config),
            Err(ConversionError::EmptyTileset)
        ));
    }

    // Tests that generated palettes land in the cell color attributes
    // Verified by leaving cell colors unset after partitioning
    #[test]
    fn test_palette_colors_assigned() {
        let mut pixels = Array2::from_elem((8, 24), DEFAULT_SPACE_COLOR);
        paint_tile(&mut pixels, 0, 0, |x, _| if x < 4 { RED } else { GREEN });
        paint_tile(&mut pixels, 1, 0, |_, _| BLUE);

        let mut config = ConversionConfig::new(TilemapFormat::TileAttr);
        config.space = Some(SpaceTile::new(0x7F));
        config.generate_palette = true;

        let conversion = convert(&pixels, &config).unwrap();

        assert_eq!(conversion.palettes.len(), 1);
        let colors: Vec<Option<u8>> = conversion
            .tilemap
            .cells()
            .iter()
            .map(|cell| cell.color)
            .collect();
        assert_eq!(colors, vec![Some(4), Some(4), None]);
        assert_eq!(cell_ids(&conversion), vec![0, 1, 0x7F]);
        assert!(conversion.tilemap.encode(TilemapFormat::TileAttr).is_ok());
    }

    // Tests that invalid input is rejected before any work
    // Verified by skipping validation in convert
    #[test]
    fn test_rejected_input() {
        let pixels = Array2::from_elem((8, 12), RED);
        assert!(matches!(
            convert(&pixels, &ConversionConfig::new(TilemapFormat::Plain)),
            Err(ConversionError::ImageDimensionMismatch { .. })
        ));

        let mut config = ConversionConfig::new(TilemapFormat::FfEnd);
        config.generate_palette = true;
        assert!(matches!(
            convert(&Array2::from_elem((8, 8), RED), &config),
            Err(ConversionError::InvalidParameter { .. })
        ));
    }

    // Tests that converting the same image twice is identical
    // Verified by iterating tiles in a hash-based order
    #[test]
    fn test_conversion_is_deterministic() {
        let mut pixels = Array2::from_elem((16, 16), RED);
        paint_tile(&mut pixels, 0, 1, |x, y| [x as u8, y as u8, 0]);
        paint_tile(&mut pixels, 1, 1, |x, y| [7 - x as u8, y as u8, 0]);
        let config = ConversionConfig::new(TilemapFormat::XyFlip);

        let first = convert(&pixels, &config).unwrap();
        let second = convert(&pixels, &config).unwrap();

        assert_eq!(first.tilemap, second.tilemap);
        assert_eq!(first.tileset, second.tileset);
        assert_eq!(first.tileset_image, second.tileset_image);
        assert_eq!(first.tileset, vec![0, 2]);
        assert!(first.tilemap.cells()[3].x_flip);
    }

    // Tests writing the tilemap, attribute map and tileset image
    // Verified by writing the attribute bytes into the tilemap file
    #[test]
    fn test_write_outputs() {
        let mut pixels = Array2::from_elem((8, 16), RED);
        paint_tile(&mut pixels, 1, 0, |_, _| BLUE);
        let conversion =
            convert(&pixels, &ConversionConfig::new(TilemapFormat::TileAttr)).unwrap();

        let dir = TempDir::new().unwrap();
        let paths = OutputPaths {
            tilemap: dir.path().join("map.tilemap"),
            attrmap: Some(dir.path().join("map.attrmap")),
            tileset: dir.path().join("out").join("map_tileset.png"),
        };
        conversion.write(&paths).unwrap();

        assert_eq!(std::fs::read(&paths.tilemap).unwrap(), vec![0, 1]);
        assert_eq!(
            std::fs::read(paths.attrmap.as_ref().unwrap()).unwrap(),
            vec![0, 0]
        );
        let tileset = image::open(&paths.tileset).unwrap().to_rgb8();
        assert_eq!(tileset.get_pixel(8, 0).0, BLUE);
    }

    // Tests that nothing is written when the tilemap cannot be encoded
    // Verified by saving the tileset image before encoding
    #[test]
    fn test_unencodable_writes_nothing() {
        let pixels = Array2::from_elem((8, 8), RED);
        let conversion = convert(&pixels, &ConversionConfig::new(TilemapFormat::Plain)).unwrap();

        let dir = TempDir::new().unwrap();
        let paths = OutputPaths {
            tilemap: dir.path().join("map.tilemap"),
            attrmap: Some(dir.path().join("map.attrmap")),
            tileset: dir.path().join("map_tileset.png"),
        };

        assert!(matches!(
            conversion.write(&paths),
            Err(ConversionError::InvalidParameter { .. })
        ));
        assert!(!paths.tilemap.exists());
        assert!(!paths.tileset.exists());
    }

    // Tests that a tileset path with no usable encoder leaves no tilemap behind
    // Verified by writing the tilemap before encoding the tileset image
    #[test]
    fn test_unsupported_tileset_writes_nothing() {
        let mut pixels = Array2::from_elem((8, 16), RED);
        paint_tile(&mut pixels, 1, 0, |_, _| GREEN);
        let conversion =
            convert(&pixels, &ConversionConfig::new(TilemapFormat::TileAttr)).unwrap();

        let dir = TempDir::new().unwrap();
        let paths = OutputPaths {
            tilemap: dir.path().join("map.tilemap"),
            attrmap: Some(dir.path().join("map.attrmap")),
            tileset: dir.path().join("map_tileset.gif"),
        };

        assert!(matches!(
            conversion.write(&paths),
            Err(ConversionError::ImageExport { .. })
        ));
        assert!(!paths.tilemap.exists());
        assert!(!paths.attrmap.as_ref().unwrap().exists());
        assert!(!paths.tileset.exists());
    }

    // Tests that a failed tileset write removes the tilemap already written
    // Verified by returning before the cleanup loop in write_files
    #[test]
    fn test_failed_tileset_write_removes_tilemap() {
        let pixels = Array2::from_elem((8, 8), BLUE);
        let conversion = convert(&pixels, &ConversionConfig::new(TilemapFormat::Plain)).unwrap();

        let dir = TempDir::new().unwrap();
        let occupied = dir.path().join("taken.png");
        std::fs::create_dir(&occupied).unwrap();
        let paths = OutputPaths {
            tilemap: dir.path().join("map.tilemap"),
            attrmap: None,
            tileset: occupied,
        };

        assert!(matches!(
            conversion.write(&paths),
            Err(ConversionError::WriteFailure { .. })
        ));
        assert!(!paths.tilemap.exists());
    }
}

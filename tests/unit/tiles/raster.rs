//! Tests for tileset and tilemap image layout

#[cfg(test)]
mod tests {
    use ndarray::Array2;
    use tileforge::format::{TileTessera, Tilemap};
    use tileforge::io::configuration::BACKGROUND_COLOR;
    use tileforge::tiles::raster::{
        render_tilemap, render_tilemap_banks, render_tileset, tileset_dimensions,
    };
    use tileforge::tiles::tile::{Color, Flip, Tile, TileGrid};

    const RED: Color = [255, 0, 0];
    const BLUE: Color = [0, 0, 255];
    const BLACK: Color = [0, 0, 0];

    fn gradient() -> Tile {
        Tile::from_fn(|x, y| [x as u8 * 10, y as u8 * 10, 0])
    }

    fn red_blue_grid() -> TileGrid {
        TileGrid::from_tiles(vec![Tile::filled(RED), Tile::filled(BLUE)], 2).unwrap()
    }

    // Tests tileset image size for partial and full rows
    // Verified by always using 16 columns
    #[test]
    fn test_tileset_dimensions() {
        assert_eq!(tileset_dimensions(0), (0, 0));
        assert_eq!(tileset_dimensions(3), (24, 8));
        assert_eq!(tileset_dimensions(16), (128, 8));
        assert_eq!(tileset_dimensions(17), (128, 16));
    }

    // Tests that entries are drawn in tileset order, not source order
    // Verified by drawing tiles by source index
    #[test]
    fn test_render_tileset_order() {
        let img = render_tileset(&red_blue_grid(), &[1, 0]);

        assert_eq!((img.width(), img.height()), (16, 8));
        assert_eq!(img.get_pixel(0, 0).0, BLUE);
        assert_eq!(img.get_pixel(15, 7).0, RED);
    }

    // Tests wrapping to a second row and blank padding after the last entry
    // Verified by changing the row width
    #[test]
    fn test_render_tileset_wraps() {
        let grid = TileGrid::from_pixels(&Array2::from_elem((8, 8), BLACK)).unwrap();
        let img = render_tileset(&grid, &[0; 17]);

        assert_eq!((img.width(), img.height()), (128, 16));
        assert_eq!(img.get_pixel(120, 0).0, BLACK);
        assert_eq!(img.get_pixel(0, 8).0, BLACK);
        assert_eq!(img.get_pixel(8, 8).0, BACKGROUND_COLOR);
    }

    // Tests flipped drawing, start id offset and missing ids
    // Verified by ignoring cell flips during rendering
    #[test]
    fn test_render_tilemap() {
        let tile = gradient();
        let cells = vec![
            TileTessera::new(5).with_flip(Flip::X),
            TileTessera::new(5),
            TileTessera::new(3),
            TileTessera::new(6),
        ];
        let tilemap = Tilemap::new(cells, 2).unwrap();

        let img = render_tilemap(&tilemap, &[tile.clone()], 5);

        assert_eq!((img.width(), img.height()), (16, 16));
        assert_eq!(Some(img.get_pixel(0, 0).0), tile.pixel(7, 0));
        assert_eq!(Some(img.get_pixel(8, 0).0), tile.pixel(0, 0));
        assert_eq!(Some(img.get_pixel(15, 7).0), tile.pixel(7, 7));
        assert_eq!(img.get_pixel(0, 8).0, BACKGROUND_COLOR);
        assert_eq!(img.get_pixel(8, 8).0, BACKGROUND_COLOR);
    }

    // Tests that ids resolve across banks and later banks win on overlap
    // Verified by searching the banks front to back
    #[test]
    fn test_render_tilemap_banks() {
        let cells = vec![TileTessera::new(0), TileTessera::new(1), TileTessera::new(9)];
        let tilemap = Tilemap::new(cells, 3).unwrap();
        let low = [Tile::filled(RED), Tile::filled(BLUE)];
        let high = [Tile::filled([0, 255, 0])];

        let img = render_tilemap_banks(&tilemap, &[(0, &low[..]), (1, &high[..])]);

        assert_eq!(img.get_pixel(0, 0).0, RED);
        assert_eq!(img.get_pixel(8, 0).0, [0, 255, 0]);
        assert_eq!(img.get_pixel(16, 0).0, BACKGROUND_COLOR);
    }
}

//! Tests for flip-aware tile identity

#[cfg(test)]
mod tests {
    use tileforge::format::TilemapFormat;
    use tileforge::tiles::equivalence::{are_identical, candidate_flips};
    use tileforge::tiles::tile::{Flip, Tile};

    fn gradient() -> Tile {
        Tile::from_fn(|x, y| [x as u8 * 10, y as u8 * 10, 0])
    }

    // Tests which formats allow flipped matches
    // Verified by enabling flips for every format
    #[test]
    fn test_candidate_flips() {
        assert_eq!(candidate_flips(TilemapFormat::Plain), &[Flip::NONE]);
        assert_eq!(candidate_flips(TilemapFormat::RleFfEnd), &[Flip::NONE]);
        assert_eq!(candidate_flips(TilemapFormat::TileAttr), &Flip::ORDER);
        assert_eq!(candidate_flips(TilemapFormat::XyFlip), &Flip::ORDER);
    }

    // Tests that identical tiles match in every format
    // Verified by skipping the identity transform
    #[test]
    fn test_identical_tiles_always_match() {
        let tile = gradient();
        for format in TilemapFormat::ALL {
            assert_eq!(are_identical(&tile, &tile, format), Some(Flip::NONE));
        }
    }

    // Tests that a mirrored copy matches only where flips are stored
    // Verified by returning the flip for flipless formats
    #[test]
    fn test_flipped_match_requires_flip_support() {
        let reference = gradient();

        let x = reference.flipped(Flip::X);
        let y = reference.flipped(Flip::Y);
        let xy = reference.flipped(Flip::XY);

        assert_eq!(are_identical(&x, &reference, TilemapFormat::XyFlip), Some(Flip::X));
        assert_eq!(are_identical(&y, &reference, TilemapFormat::XyFlip), Some(Flip::Y));
        assert_eq!(are_identical(&xy, &reference, TilemapFormat::TileAttr), Some(Flip::XY));
        assert_eq!(are_identical(&x, &reference, TilemapFormat::Plain), None);
        assert_eq!(are_identical(&xy, &reference, TilemapFormat::FfEnd), None);
    }

    // Tests that the first matching flip in order is reported
    // Verified by searching the flip order from the end
    #[test]
    fn test_first_match_wins() {
        // Left-right symmetric, so both Y and XY reproduce the flipped copy
        let reference = Tile::from_fn(|x, y| [x.min(7 - x) as u8, y as u8, 0]);
        let upside_down = reference.flipped(Flip::Y);

        assert!(upside_down.matches_flipped(&reference, Flip::XY));
        assert_eq!(
            are_identical(&upside_down, &reference, TilemapFormat::XyFlip),
            Some(Flip::Y)
        );

        let uniform = Tile::filled([1, 2, 3]);
        assert_eq!(
            are_identical(&uniform, &uniform, TilemapFormat::TileAttr),
            Some(Flip::NONE)
        );
    }

    // Tests that different tiles never match
    // Verified by making matches_flipped always succeed
    #[test]
    fn test_different_tiles_do_not_match() {
        let a = Tile::filled([0, 0, 0]);
        let b = Tile::filled([255, 255, 255]);
        for format in TilemapFormat::ALL {
            assert_eq!(are_identical(&a, &b, format), None);
        }
    }
}

//! Binary tilemap encoders and decoders
//!
//! Encoding validates every cell against the format before producing any
//! bytes, so a failed encode never yields a partial stream. Decoding checks
//! every id against the format's index space, whatever the framing.

use crate::format::{TileTessera, TilemapFormat};
use crate::io::error::{ConversionError, Result, invalid_parameter, unencodable};
use crate::tiles::tile::Flip;
use log::debug;

const ATTR_ID_HIGH_MASK: u8 = 0b0000_0011;
const ATTR_PALETTE_SHIFT: u8 = 2;
const ATTR_PALETTE_MASK: u8 = 0b111;
const ATTR_PRIORITY_BIT: u8 = 1 << 5;
const ATTR_X_FLIP_BIT: u8 = 1 << 6;
const ATTR_Y_FLIP_BIT: u8 = 1 << 7;

const XY_FLIP_ID_MASK: u8 = 0b0011_1111;
const XY_FLIP_X_BIT: u8 = 1 << 6;
const XY_FLIP_Y_BIT: u8 = 1 << 7;

/// Encode cells into the format's byte stream, including any terminator
///
/// # Errors
///
/// Returns `Unencodable` for the first cell whose id, flips or color do not
/// fit the format.
pub fn encode(cells: &[TileTessera], format: TilemapFormat) -> Result<Vec<u8>> {
    validate_cells(cells, format)?;

    let mut bytes: Vec<u8> = match format {
        TilemapFormat::Plain | TilemapFormat::FfEnd => {
            cells.iter().map(|cell| low_byte(cell.id)).collect()
        }
        TilemapFormat::TileAttr => cells
            .iter()
            .flat_map(|cell| [low_byte(cell.id), attribute_byte(cell)])
            .collect(),
        TilemapFormat::XyFlip => cells.iter().map(xy_flip_byte).collect(),
        TilemapFormat::RleNybbles => run_lengths(cells, format)
            .into_iter()
            .map(|(id, count)| (id << 4) | count)
            .collect(),
        TilemapFormat::RleFfEnd => run_lengths(cells, format)
            .into_iter()
            .flat_map(|(id, count)| [id, count])
            .collect(),
    };

    if let Some(terminator) = format.terminator() {
        bytes.push(terminator);
    }
    Ok(bytes)
}

/// Encode ids and attributes as two parallel streams
///
/// # Errors
///
/// Returns `InvalidParameter` if the format has no attribute byte, or
/// `Unencodable` for a cell that does not fit.
pub fn encode_split(cells: &[TileTessera], format: TilemapFormat) -> Result<(Vec<u8>, Vec<u8>)> {
    if !format.has_attributes() {
        return Err(invalid_parameter(
            "attrmap",
            &format,
            &"format has no attribute byte",
        ));
    }
    validate_cells(cells, format)?;

    let ids = cells.iter().map(|cell| low_byte(cell.id)).collect();
    let attrs = cells.iter().map(attribute_byte).collect();
    Ok((ids, attrs))
}

/// Decode a byte stream into cells
///
/// Cells come back without positions; see `Tilemap::new`.
///
/// # Errors
///
/// - `Truncated` if a cell or the terminator is incomplete
/// - `InvalidByte` for a zero run length, bad attribute bits, or an id
///   outside the format's index space
pub fn decode(bytes: &[u8], format: TilemapFormat) -> Result<Vec<TileTessera>> {
    match format {
        TilemapFormat::Plain => bytes
            .iter()
            .enumerate()
            .map(|(offset, &byte)| {
                checked_id(u16::from(byte), offset, byte, format).map(TileTessera::new)
            })
            .collect(),
        TilemapFormat::TileAttr => {
            if bytes.len() % 2 != 0 {
                return Err(ConversionError::Truncated {
                    offset: bytes.len(),
                });
            }
            bytes
                .chunks_exact(2)
                .enumerate()
                .map(|(index, pair)| match *pair {
                    [low, attr] => attribute_cell(low, attr, index * 2, format),
                    _ => Err(ConversionError::Truncated { offset: index * 2 }),
                })
                .collect()
        }
        TilemapFormat::XyFlip => bytes
            .iter()
            .enumerate()
            .map(|(offset, &byte)| {
                let id = checked_id(u16::from(byte & XY_FLIP_ID_MASK), offset, byte, format)?;
                let flip = Flip::new(byte & XY_FLIP_X_BIT != 0, byte & XY_FLIP_Y_BIT != 0);
                Ok(TileTessera::new(id).with_flip(flip))
            })
            .collect(),
        TilemapFormat::FfEnd => {
            let body = until_terminator(bytes, format)?;
            body.iter()
                .enumerate()
                .map(|(offset, &byte)| {
                    checked_id(u16::from(byte), offset, byte, format).map(TileTessera::new)
                })
                .collect()
        }
        TilemapFormat::RleNybbles => {
            let body = until_terminator(bytes, format)?;
            let mut cells = Vec::new();
            for (offset, &byte) in body.iter().enumerate() {
                let count = usize::from(byte & 0x0F);
                if count == 0 {
                    return Err(ConversionError::InvalidByte { offset, byte });
                }
                let id = checked_id(u16::from(byte >> 4), offset, byte, format)?;
                cells.extend(std::iter::repeat_n(TileTessera::new(id), count));
            }
            Ok(cells)
        }
        TilemapFormat::RleFfEnd => decode_rle_ff_end(bytes, format),
    }
}

/// Decode parallel id and attribute streams
///
/// # Errors
///
/// Returns `InvalidParameter` if the format has no attribute byte,
/// `SizeMismatch` if the streams differ in length, or `InvalidByte` for bad
/// attribute bits.
pub fn decode_split(ids: &[u8], attrs: &[u8], format: TilemapFormat) -> Result<Vec<TileTessera>> {
    if !format.has_attributes() {
        return Err(invalid_parameter(
            "attrmap",
            &format,
            &"format has no attribute byte",
        ));
    }
    if ids.len() != attrs.len() {
        return Err(ConversionError::SizeMismatch {
            expected: ids.len(),
            actual: attrs.len(),
        });
    }
    ids.iter()
        .zip(attrs)
        .enumerate()
        .map(|(offset, (&low, &attr))| attribute_cell(low, attr, offset, format))
        .collect()
}

fn validate_cells(cells: &[TileTessera], format: TilemapFormat) -> Result<()> {
    cells
        .iter()
        .enumerate()
        .try_for_each(|(index, cell)| validate_cell(index, cell, format))
}

fn validate_cell(index: usize, cell: &TileTessera, format: TilemapFormat) -> Result<()> {
    let size = format.tileset_size();
    if usize::from(cell.id) >= size {
        return Err(unencodable(
            index,
            &format!("id ${:02X} is outside the {size}-tile index space", cell.id),
        ));
    }
    if !format.supports_flips() && (cell.x_flip || cell.y_flip) {
        return Err(unencodable(index, &format!("{format} cannot store flips")));
    }
    if let Some(color) = cell.color {
        let limits = format.palette_limits();
        if limits.is_none() {
            return Err(unencodable(index, &format!("{format} cannot store colors")));
        }
        let base = usize::from(format.palette_base());
        let color_index = usize::from(color);
        if color_index < base || color_index >= base + limits.max_palettes {
            return Err(unencodable(
                index,
                &format!(
                    "color {color} is outside palettes {base}..={}",
                    base + limits.max_palettes - 1
                ),
            ));
        }
    }
    Ok(())
}

fn checked_id(id: u16, offset: usize, byte: u8, format: TilemapFormat) -> Result<u16> {
    if usize::from(id) < format.tileset_size() {
        Ok(id)
    } else {
        Err(ConversionError::InvalidByte { offset, byte })
    }
}

const fn low_byte(id: u16) -> u8 {
    (id & 0xFF) as u8
}

// Palette indices are stored as-is; validation keeps them in the 3-bit field.
const fn attribute_byte(cell: &TileTessera) -> u8 {
    let mut attr = ((cell.id >> 8) as u8) & ATTR_ID_HIGH_MASK;
    if let Some(color) = cell.color {
        attr |= (color & ATTR_PALETTE_MASK) << ATTR_PALETTE_SHIFT;
    }
    if cell.x_flip {
        attr |= ATTR_X_FLIP_BIT;
    }
    if cell.y_flip {
        attr |= ATTR_Y_FLIP_BIT;
    }
    attr
}

fn attribute_cell(low: u8, attr: u8, offset: usize, format: TilemapFormat) -> Result<TileTessera> {
    let attr_offset = offset + 1;
    // Priority has no cell field; it is dropped and re-encoded as zero.
    if attr & ATTR_PRIORITY_BIT != 0 {
        debug!("Ignoring priority bit in attribute byte {attr:#04X} at offset {attr_offset}");
    }

    let palette = (attr >> ATTR_PALETTE_SHIFT) & ATTR_PALETTE_MASK;
    let color = if palette == 0 {
        None
    } else {
        let base = format.palette_base();
        let limit = usize::from(base) + format.palette_limits().max_palettes;
        if palette < base || usize::from(palette) >= limit {
            return Err(ConversionError::InvalidByte {
                offset: attr_offset,
                byte: attr,
            });
        }
        Some(palette)
    };

    let id = u16::from(low) | (u16::from(attr & ATTR_ID_HIGH_MASK) << 8);
    let id = checked_id(id, attr_offset, attr, format)?;
    let flip = Flip::new(attr & ATTR_X_FLIP_BIT != 0, attr & ATTR_Y_FLIP_BIT != 0);
    Ok(TileTessera::new(id).with_flip(flip).with_color(color))
}

const fn xy_flip_byte(cell: &TileTessera) -> u8 {
    let mut byte = low_byte(cell.id) & XY_FLIP_ID_MASK;
    if cell.x_flip {
        byte |= XY_FLIP_X_BIT;
    }
    if cell.y_flip {
        byte |= XY_FLIP_Y_BIT;
    }
    byte
}

/// Split cells into `(id, count)` runs no longer than the format allows
fn run_lengths(cells: &[TileTessera], format: TilemapFormat) -> Vec<(u8, u8)> {
    let max_run = format.max_run().unwrap_or(1);
    let mut runs: Vec<(u8, u8)> = Vec::new();
    for cell in cells {
        let id = low_byte(cell.id);
        match runs.last_mut() {
            Some((run_id, count)) if *run_id == id && usize::from(*count) < max_run => {
                *count += 1;
            }
            _ => runs.push((id, 1)),
        }
    }
    runs
}

/// The bytes before the format's terminator
fn until_terminator(bytes: &[u8], format: TilemapFormat) -> Result<&[u8]> {
    let terminator = format.terminator().unwrap_or(0xFF);
    let end = bytes
        .iter()
        .position(|&byte| byte == terminator)
        .ok_or(ConversionError::Truncated {
            offset: bytes.len(),
        })?;
    log_trailing(bytes.len(), end + 1);
    Ok(bytes.get(..end).unwrap_or_default())
}

// A count byte may legitimately be $FF, so the terminator can only be found
// by walking the runs.
fn decode_rle_ff_end(bytes: &[u8], format: TilemapFormat) -> Result<Vec<TileTessera>> {
    let terminator = format.terminator().unwrap_or(0xFF);
    let mut cells = Vec::new();
    let mut offset = 0;
    loop {
        let Some(&id_byte) = bytes.get(offset) else {
            return Err(ConversionError::Truncated { offset });
        };
        if id_byte == terminator {
            log_trailing(bytes.len(), offset + 1);
            return Ok(cells);
        }
        let id = checked_id(u16::from(id_byte), offset, id_byte, format)?;
        let Some(&count) = bytes.get(offset + 1) else {
            return Err(ConversionError::Truncated { offset: offset + 1 });
        };
        if count == 0 {
            return Err(ConversionError::InvalidByte {
                offset: offset + 1,
                byte: count,
            });
        }
        cells.extend(std::iter::repeat_n(
            TileTessera::new(id),
            usize::from(count),
        ));
        offset += 2;
    }
}

fn log_trailing(len: usize, consumed: usize) {
    if len > consumed {
        debug!(
            "Ignoring {} byte(s) after the tilemap terminator",
            len - consumed
        );
    }
}

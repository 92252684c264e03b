//! Shape table - occupancy of every piece in every rotation
//!
//! Each shape is described in a 4x4 frame whose origin is the bottom-left
//! corner. Rows are written top to bottom in the table below so the source
//! reads like the piece looks; `mask` flips them so local `y = 0` is the
//! bottom row. Every shape rests on the bottom row of its frame in every
//! rotation, so a piece anchored at `y` has its lowest cells on row `y`.
//!
//! Rotation index `r + 1` is the clockwise neighbour of `r`.

use crate::types::{PieceError, NUM_COLORS, NUM_ROTATIONS, PIECE_FRAME};

/// Occupancy bits for one rotation, bit `y * 4 + x`
pub type ShapeMask = u16;

/// Build a mask from four rows given top (y = 3) to bottom (y = 0)
const fn mask(rows: [&[u8; 4]; 4]) -> ShapeMask {
    let mut bits: ShapeMask = 0;
    let mut row = 0;
    while row < 4 {
        let y = 3 - row;
        let mut x = 0;
        while x < 4 {
            if rows[row][x] == b'#' {
                bits |= 1 << (y * 4 + x);
            }
            x += 1;
        }
        row += 1;
    }
    bits
}

const EMPTY: [ShapeMask; 4] = [0; 4];

/// `SHAPES[shape][rotation]`, shape 0 is "no shape"
static SHAPES: [[ShapeMask; 4]; 8] = [
    EMPTY,
    // I
    [
        mask([b"....", b"....", b"....", b"####"]),
        mask([b".#..", b".#..", b".#..", b".#.."]),
        mask([b"....", b"....", b"....", b"####"]),
        mask([b"..#.", b"..#.", b"..#.", b"..#."]),
    ],
    // T
    [
        mask([b"....", b"....", b".#..", b"###."]),
        mask([b"....", b"#...", b"##..", b"#..."]),
        mask([b"....", b"....", b"###.", b".#.."]),
        mask([b"....", b".#..", b"##..", b".#.."]),
    ],
    // O
    [
        mask([b"....", b"....", b"##..", b"##.."]),
        mask([b"....", b"....", b"##..", b"##.."]),
        mask([b"....", b"....", b"##..", b"##.."]),
        mask([b"....", b"....", b"##..", b"##.."]),
    ],
    // L
    [
        mask([b"....", b"....", b"..#.", b"###."]),
        mask([b"....", b"#...", b"#...", b"##.."]),
        mask([b"....", b"....", b"###.", b"#..."]),
        mask([b"....", b"##..", b".#..", b".#.."]),
    ],
    // J
    [
        mask([b"....", b"....", b"#...", b"###."]),
        mask([b"....", b"##..", b"#...", b"#..."]),
        mask([b"....", b"....", b"###.", b"..#."]),
        mask([b"....", b".#..", b".#..", b"##.."]),
    ],
    // Z
    [
        mask([b"....", b"....", b"##..", b".##."]),
        mask([b"....", b".#..", b"##..", b"#..."]),
        mask([b"....", b"....", b"##..", b".##."]),
        mask([b"....", b".#..", b"##..", b"#..."]),
    ],
    // S
    [
        mask([b"....", b"....", b".##.", b"##.."]),
        mask([b"....", b"#...", b"##..", b".#.."]),
        mask([b"....", b"....", b".##.", b"##.."]),
        mask([b"....", b"#...", b"##..", b".#.."]),
    ],
];

fn check_range(what: &'static str, value: i8, limit: u8) -> Result<(), PieceError> {
    if value < 0 || value >= limit as i8 {
        return Err(PieceError::OutOfRange {
            what,
            value: value as i32,
        });
    }
    Ok(())
}

/// Is local cell `(x, y)` of `shape` occupied in `rotation`?
///
/// Shape ids outside `1..=7` (including 0, "no shape") are never occupied.
/// Out-of-frame coordinates and rotations are a caller bug and are reported,
/// never clamped.
pub fn occupied(shape: u8, rotation: i8, x: i8, y: i8) -> Result<bool, PieceError> {
    check_range("rotation", rotation, NUM_ROTATIONS)?;
    check_range("x", x, PIECE_FRAME)?;
    check_range("y", y, PIECE_FRAME)?;
    Ok(mask_bit(shape, rotation as u8, x as u8, y as u8))
}

/// Unchecked lookup for callers iterating the valid domain
#[inline(always)]
pub(crate) fn mask_bit(shape: u8, rotation: u8, x: u8, y: u8) -> bool {
    shape_mask(shape, rotation) & (1 << (y * 4 + x)) != 0
}

/// Whole mask for a shape and rotation; zero for unknown shapes
pub fn shape_mask(shape: u8, rotation: u8) -> ShapeMask {
    if shape == 0 || shape > NUM_COLORS {
        return 0;
    }
    SHAPES[shape as usize][(rotation % NUM_ROTATIONS) as usize]
}

/// Local `(x, y)` offsets of every occupied cell, bottom row first
pub fn cells(shape: u8, rotation: u8) -> impl Iterator<Item = (i8, i8)> {
    let bits = shape_mask(shape, rotation);
    (0..16i8).filter_map(move |i| {
        if bits & (1 << i) != 0 {
            Some((i % 4, i / 4))
        } else {
            None
        }
    })
}

/// Check the table once: four cells per rotation and a resting bottom row
pub fn validate_shape_table() -> Result<(), String> {
    for shape in 1..=NUM_COLORS {
        for rotation in 0..NUM_ROTATIONS {
            let bits = shape_mask(shape, rotation);
            if bits.count_ones() != 4 {
                return Err(format!(
                    "shape {} rotation {} has {} cells",
                    shape,
                    rotation,
                    bits.count_ones()
                ));
            }
            if bits & 0x000f == 0 {
                return Err(format!(
                    "shape {} rotation {} does not rest on row 0",
                    shape, rotation
                ));
            }
        }
    }
    if SHAPES[0].iter().any(|&m| m != 0) {
        return Err("shape 0 must be empty".to_string());
    }
    Ok(())
}

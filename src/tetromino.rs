//! Tetromino catalog
//!
//! Every kind owns a fixed table of rotation bitmaps. Rotating a piece means
//! stepping to the next entry of its table, never computing a matrix rotation.

use ratatui::style::Color;

/// A square rotation bitmap, row-major, `1` marks an occupied cell
pub type Bitmap = &'static [&'static [u8]];

/// The 7 tetromino kinds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TetrominoType {
    I,
    O,
    T,
    S,
    Z,
    J,
    L,
}

const I_ROTATIONS: &[Bitmap] = &[
    &[&[0, 0, 0, 0], &[1, 1, 1, 1], &[0, 0, 0, 0], &[0, 0, 0, 0]],
    &[&[0, 0, 1, 0], &[0, 0, 1, 0], &[0, 0, 1, 0], &[0, 0, 1, 0]],
    &[&[0, 0, 0, 0], &[0, 0, 0, 0], &[1, 1, 1, 1], &[0, 0, 0, 0]],
    &[&[0, 1, 0, 0], &[0, 1, 0, 0], &[0, 1, 0, 0], &[0, 1, 0, 0]],
];

const O_ROTATIONS: &[Bitmap] = &[&[&[1, 1], &[1, 1]]];

const T_ROTATIONS: &[Bitmap] = &[
    &[&[0, 0, 0], &[1, 1, 1], &[0, 1, 0]],
    &[&[0, 1, 0], &[1, 1, 0], &[0, 1, 0]],
    &[&[0, 1, 0], &[1, 1, 1], &[0, 0, 0]],
    &[&[0, 1, 0], &[0, 1, 1], &[0, 1, 0]],
];

// .SS   .S.   ...   S..
// SS.   .SS   .SS   SS.
// ...   ..S   SS.   .S.
const S_ROTATIONS: &[Bitmap] = &[
    &[&[0, 1, 1], &[1, 1, 0], &[0, 0, 0]],
    &[&[0, 1, 0], &[0, 1, 1], &[0, 0, 1]],
    &[&[0, 0, 0], &[0, 1, 1], &[1, 1, 0]],
    &[&[1, 0, 0], &[1, 1, 0], &[0, 1, 0]],
];

// ZZ.   ..Z   ...   .Z.
// .ZZ   .ZZ   ZZ.   ZZ.
// ...   .Z.   .ZZ   Z..
const Z_ROTATIONS: &[Bitmap] = &[
    &[&[1, 1, 0], &[0, 1, 1], &[0, 0, 0]],
    &[&[0, 0, 1], &[0, 1, 1], &[0, 1, 0]],
    &[&[0, 0, 0], &[1, 1, 0], &[0, 1, 1]],
    &[&[0, 1, 0], &[1, 1, 0], &[1, 0, 0]],
];

const J_ROTATIONS: &[Bitmap] = &[
    &[&[1, 0, 0], &[1, 1, 1], &[0, 0, 0]],
    &[&[0, 1, 1], &[0, 1, 0], &[0, 1, 0]],
    &[&[0, 0, 0], &[1, 1, 1], &[0, 0, 1]],
    &[&[0, 1, 0], &[0, 1, 0], &[1, 1, 0]],
];

const L_ROTATIONS: &[Bitmap] = &[
    &[&[0, 0, 1], &[1, 1, 1], &[0, 0, 0]],
    &[&[0, 1, 0], &[0, 1, 0], &[0, 1, 1]],
    &[&[0, 0, 0], &[1, 1, 1], &[1, 0, 0]],
    &[&[1, 1, 0], &[0, 1, 0], &[0, 1, 0]],
];

impl TetrominoType {
    /// Get the color for this tetromino
    pub fn color(&self) -> Color {
        match self {
            TetrominoType::I => Color::Cyan,
            TetrominoType::O => Color::Blue,
            TetrominoType::T => Color::Yellow,
            TetrominoType::S => Color::Green,
            TetrominoType::Z => Color::Red,
            TetrominoType::J => Color::Rgb(255, 165, 0), // Orange
            TetrominoType::L => Color::Magenta,
        }
    }

    /// All kinds, in catalog order
    pub fn all() -> [TetrominoType; 7] {
        [
            TetrominoType::I,
            TetrominoType::O,
            TetrominoType::T,
            TetrominoType::S,
            TetrominoType::Z,
            TetrominoType::J,
            TetrominoType::L,
        ]
    }

    /// The rotation cycle for this kind
    pub fn rotations(&self) -> &'static [Bitmap] {
        match self {
            TetrominoType::I => I_ROTATIONS,
            TetrominoType::O => O_ROTATIONS,
            TetrominoType::T => T_ROTATIONS,
            TetrominoType::S => S_ROTATIONS,
            TetrominoType::Z => Z_ROTATIONS,
            TetrominoType::J => J_ROTATIONS,
            TetrominoType::L => L_ROTATIONS,
        }
    }

    /// Bitmap for a rotation index, wrapping around the cycle
    pub fn bitmap(&self, rotation: usize) -> Bitmap {
        let rotations = self.rotations();
        rotations[rotation % rotations.len()]
    }
}

/// Iterate the occupied `(row, col)` offsets of a bitmap
pub fn occupied(bitmap: Bitmap) -> impl Iterator<Item = (i32, i32)> {
    bitmap.iter().enumerate().flat_map(|(r, row)| {
        row.iter()
            .enumerate()
            .filter(|&(_, &cell)| cell != 0)
            .map(move |(c, _)| (r as i32, c as i32))
    })
}

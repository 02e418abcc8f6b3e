//! Active falling piece logic

use crate::board::{Board, COLS, ROWS};
use crate::randomizer::Randomizer;
use crate::tetromino::{occupied, Bitmap, TetrominoType};

/// Spawn anchor: column 3, two rows above the visible board
pub const SPAWN_X: i32 = 3;
pub const SPAWN_Y: i32 = -2;

/// An active falling piece
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Piece {
    /// The type of tetromino
    pub piece_type: TetrominoType,
    /// Index into the kind's rotation table
    pub rotation: usize,
    /// Board column of the bitmap's left edge
    pub x: i32,
    /// Board row of the bitmap's top edge, negative while above the board
    pub y: i32,
}

impl Piece {
    /// Create a new piece at spawn position
    pub fn new(piece_type: TetrominoType) -> Self {
        Self {
            piece_type,
            rotation: 0,
            x: SPAWN_X,
            y: SPAWN_Y,
        }
    }

    /// Spawn a piece of a uniformly random kind
    pub fn random(randomizer: &mut Randomizer) -> Self {
        Self::new(randomizer.next())
    }

    /// The bitmap for the current rotation
    pub fn active(&self) -> Bitmap {
        self.piece_type.bitmap(self.rotation)
    }

    /// Absolute (row, col) positions of the occupied blocks
    pub fn cells(&self) -> Vec<(i32, i32)> {
        occupied(self.active())
            .map(|(r, c)| (self.y + r, self.x + c))
            .collect()
    }

    /// Would `bitmap`, shifted by (dx, dy) from the current anchor, hit a wall,
    /// the floor or a locked block?
    pub fn collides(&self, board: &Board, dx: i32, dy: i32, bitmap: Bitmap) -> bool {
        occupied(bitmap).any(|(r, c)| {
            let x = self.x + c + dx;
            let y = self.y + r + dy;

            if x < 0 || x >= COLS as i32 || y >= ROWS as i32 {
                return true;
            }
            // Blocks above the board never collide
            y >= 0 && !board.is_vacant(x, y)
        })
    }

    /// Try to move left, returns true if successful
    pub fn move_left(&mut self, board: &Board) -> bool {
        if self.collides(board, -1, 0, self.active()) {
            return false;
        }
        self.x -= 1;
        true
    }

    /// Try to move right, returns true if successful
    pub fn move_right(&mut self, board: &Board) -> bool {
        if self.collides(board, 1, 0, self.active()) {
            return false;
        }
        self.x += 1;
        true
    }

    /// Try to fall one row, returns false when the piece is resting on
    /// something and has to lock instead
    pub fn move_down(&mut self, board: &Board) -> bool {
        if self.collides(board, 0, 1, self.active()) {
            return false;
        }
        self.y += 1;
        true
    }

    /// Rotate clockwise to the next table entry.
    ///
    /// If the rotated bitmap does not fit, a single one-column kick is tried,
    /// towards the centre of the board. Nothing changes when that fails too.
    pub fn rotate(&mut self, board: &Board) -> bool {
        let len = self.piece_type.rotations().len();
        let next_rotation = (self.rotation + 1) % len;
        let next = self.piece_type.bitmap(next_rotation);

        let kick = if !self.collides(board, 0, 0, next) {
            0
        } else if self.x > COLS as i32 / 2 {
            -1
        } else {
            1
        };

        if kick != 0 && self.collides(board, kick, 0, next) {
            return false;
        }

        self.x += kick;
        self.rotation = next_rotation;
        true
    }

    /// Row the anchor would rest on after a straight drop
    pub fn ghost_row(&self, board: &Board) -> i32 {
        let bitmap = self.active();
        let mut offset = 0;
        while !self.collides(board, 0, offset + 1, bitmap) {
            offset += 1;
        }
        self.y + offset
    }

    /// Absolute (row, col) positions of the ghost projection
    pub fn ghost_cells(&self, board: &Board) -> Vec<(i32, i32)> {
        let ghost_row = self.ghost_row(board);
        occupied(self.active())
            .map(|(r, c)| (ghost_row + r, self.x + c))
            .collect()
    }
}

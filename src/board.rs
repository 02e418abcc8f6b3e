//! Game board representation, locking and row collapse

use ratatui::style::Color;

/// Board dimensions
pub const COLS: usize = 10;
pub const ROWS: usize = 20;

/// A cell on the board - either empty or filled with a color
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Cell {
    #[default]
    Empty,
    Filled(Color),
}

impl Cell {
    pub fn is_empty(&self) -> bool {
        matches!(self, Cell::Empty)
    }

    pub fn is_filled(&self) -> bool {
        matches!(self, Cell::Filled(_))
    }
}

/// Result of committing a piece to the board
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Placement {
    /// Every block landed inside the visible grid
    Placed,
    /// At least one block was still above row 0
    ToppedOut,
}

/// The game board
#[derive(Debug, Clone)]
pub struct Board {
    /// Grid stored as [row][col], row 0 is the top row
    cells: [[Cell; COLS]; ROWS],
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}

impl Board {
    /// Create a new empty board
    pub fn new() -> Self {
        Self {
            cells: [[Cell::Empty; COLS]; ROWS],
        }
    }

    /// Get the cell at a position (row, col)
    /// Returns None if out of bounds
    pub fn get(&self, row: i32, col: i32) -> Option<Cell> {
        if row < 0 || col < 0 {
            return None;
        }
        let (row, col) = (row as usize, col as usize);
        if row >= ROWS || col >= COLS {
            return None;
        }
        Some(self.cells[row][col])
    }

    /// Set a cell at a position
    /// Returns false if out of bounds
    pub fn set(&mut self, row: i32, col: i32, cell: Cell) -> bool {
        if row < 0 || col < 0 {
            return false;
        }
        let (row, col) = (row as usize, col as usize);
        if row >= ROWS || col >= COLS {
            return false;
        }
        self.cells[row][col] = cell;
        true
    }

    /// Whether a piece block may occupy (col, row).
    ///
    /// Rows above the board are always vacant; anything else outside the grid
    /// never is.
    pub fn is_vacant(&self, col: i32, row: i32) -> bool {
        if row < 0 {
            return col >= 0 && (col as usize) < COLS;
        }
        self.get(row, col).is_some_and(|cell| cell.is_empty())
    }

    /// Paint the given (row, col) blocks with `color`.
    ///
    /// Blocks above the top row are dropped and reported as a top-out; every
    /// block that is on the grid is still painted.
    pub fn lock(&mut self, positions: &[(i32, i32)], color: Color) -> Placement {
        let mut placement = Placement::Placed;
        for &(row, col) in positions {
            if row < 0 {
                placement = Placement::ToppedOut;
                continue;
            }
            self.set(row, col, Cell::Filled(color));
        }
        placement
    }

    /// Remove full rows and return how many were cleared.
    ///
    /// Single pass from the top: when row `r` is full, rows `[0, r)` move down
    /// one and row 0 is emptied. The scan then continues at `r + 1`, so the row
    /// that was shifted into `r` is not re-examined in the same pass.
    pub fn collapse_full_rows(&mut self) -> usize {
        let mut cleared = 0;

        for row in 0..ROWS {
            if !self.is_row_full(row) {
                continue;
            }
            self.cells.copy_within(0..row, 1);
            self.cells[0] = [Cell::Empty; COLS];
            cleared += 1;
        }

        cleared
    }

    /// Check if a row is completely filled
    pub fn is_row_full(&self, row: usize) -> bool {
        self.cells[row].iter().all(|cell| cell.is_filled())
    }

    /// Empty every cell
    pub fn reset(&mut self) {
        self.cells = [[Cell::Empty; COLS]; ROWS];
    }

    /// Check if the board is completely empty
    pub fn is_empty(&self) -> bool {
        self.cells
            .iter()
            .all(|row| row.iter().all(|cell| cell.is_empty()))
    }

    /// Rows from top to bottom, for full repaints
    pub fn rows(&self) -> impl Iterator<Item = (usize, &[Cell; COLS])> {
        self.cells.iter().enumerate()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fill_row(board: &mut Board, row: i32, color: Color) {
        for col in 0..COLS as i32 {
            board.set(row, col, Cell::Filled(color));
        }
    }

    #[test]
    fn test_new_board_is_empty() {
        let board = Board::new();
        assert!(board.is_empty());
    }

    #[test]
    fn test_set_and_get() {
        let mut board = Board::new();
        assert!(board.set(5, 5, Cell::Filled(Color::Red)));
        assert_eq!(board.get(5, 5), Some(Cell::Filled(Color::Red)));
    }

    #[test]
    fn test_out_of_bounds() {
        let mut board = Board::new();
        assert_eq!(board.get(-1, 0), None);
        assert_eq!(board.get(0, -1), None);
        assert_eq!(board.get(ROWS as i32, 0), None);
        assert_eq!(board.get(0, COLS as i32), None);
        assert!(!board.set(ROWS as i32, 0, Cell::Filled(Color::Red)));
    }

    #[test]
    fn test_vacancy() {
        let mut board = Board::new();
        board.set(19, 4, Cell::Filled(Color::Red));

        assert!(board.is_vacant(0, 0));
        assert!(!board.is_vacant(4, 19));
        // Above the top is open, below the floor and beside the walls is not
        assert!(board.is_vacant(4, -3));
        assert!(!board.is_vacant(4, ROWS as i32));
        assert!(!board.is_vacant(-1, 5));
        assert!(!board.is_vacant(COLS as i32, 5));
    }

    #[test]
    fn test_lock_places_blocks() {
        let mut board = Board::new();
        let placement = board.lock(&[(19, 0), (19, 1), (18, 0), (18, 1)], Color::Blue);
        assert_eq!(placement, Placement::Placed);
        assert_eq!(board.get(18, 1), Some(Cell::Filled(Color::Blue)));
    }

    #[test]
    fn test_lock_above_top_tops_out() {
        let mut board = Board::new();
        let placement = board.lock(&[(-1, 4), (0, 3), (0, 4), (0, 5)], Color::Yellow);
        assert_eq!(placement, Placement::ToppedOut);
        // Visible blocks are still painted
        assert_eq!(board.get(0, 4), Some(Cell::Filled(Color::Yellow)));
    }

    #[test]
    fn test_clear_bottom_row() {
        let mut board = Board::new();
        fill_row(&mut board, 19, Color::Cyan);
        board.set(18, 0, Cell::Filled(Color::Red));
        board.set(0, 9, Cell::Filled(Color::Green));

        let before: Vec<[Cell; COLS]> = board.rows().map(|(_, row)| *row).collect();
        let cleared = board.collapse_full_rows();
        assert_eq!(cleared, 1);

        // Row 0 is vacant, rows 1..=19 hold the old rows 0..=18
        assert!(board.rows().next().is_some_and(|(_, row)| row.iter().all(Cell::is_empty)));
        for (row, cells) in board.rows().skip(1) {
            assert_eq!(*cells, before[row - 1]);
        }
        assert_eq!(board.get(19, 0), Some(Cell::Filled(Color::Red)));
        assert_eq!(board.get(1, 9), Some(Cell::Filled(Color::Green)));
    }

    #[test]
    fn test_clear_two_separate_rows() {
        let mut board = Board::new();
        fill_row(&mut board, 19, Color::Cyan);
        fill_row(&mut board, 17, Color::Cyan);
        board.set(18, 3, Cell::Filled(Color::Red));
        board.set(16, 7, Cell::Filled(Color::Green));

        assert_eq!(board.collapse_full_rows(), 2);
        assert_eq!(board.get(19, 3), Some(Cell::Filled(Color::Red)));
        assert_eq!(board.get(18, 7), Some(Cell::Filled(Color::Green)));
        assert!((0..ROWS).all(|row| !board.is_row_full(row)));
    }

    #[test]
    fn test_clear_adjacent_rows() {
        let mut board = Board::new();
        fill_row(&mut board, 18, Color::Cyan);
        fill_row(&mut board, 19, Color::Cyan);
        board.set(17, 2, Cell::Filled(Color::Red));

        assert_eq!(board.collapse_full_rows(), 2);
        assert_eq!(board.get(19, 2), Some(Cell::Filled(Color::Red)));
        assert_eq!(board.rows().filter(|(_, row)| row.iter().any(Cell::is_filled)).count(), 1);
    }

    #[test]
    fn test_reset() {
        let mut board = Board::new();
        fill_row(&mut board, 10, Color::Red);
        board.reset();
        assert!(board.is_empty());
    }
}

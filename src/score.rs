//! Score tracking

/// Points awarded for every cleared row
pub const POINTS_PER_ROW: u64 = 100;

/// Running score for one game
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Score {
    /// Current score
    pub points: u64,
    /// Total rows cleared
    pub lines: u32,
    /// Pieces locked onto the board
    pub pieces: u32,
}

impl Score {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a locked piece and the rows it cleared, returns points gained
    pub fn add_lock(&mut self, rows_cleared: usize) -> u64 {
        let gained = POINTS_PER_ROW * rows_cleared as u64;
        self.points += gained;
        self.lines += rows_cleared as u32;
        self.pieces += 1;
        gained
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_clear() {
        let mut score = Score::new();
        assert_eq!(score.add_lock(0), 0);
        assert_eq!(score.points, 0);
        assert_eq!(score.pieces, 1);
    }

    #[test]
    fn test_flat_points_per_row() {
        let mut score = Score::new();
        score.add_lock(1);
        score.add_lock(4);
        assert_eq!(score.points, 500);
        assert_eq!(score.lines, 5);
        assert_eq!(score.pieces, 2);
    }
}

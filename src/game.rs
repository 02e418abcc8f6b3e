//! Core game session: state machine, gravity and the lock path

use crate::board::{Board, Placement};
use crate::difficulty::Difficulty;
use crate::piece::Piece;
use crate::randomizer::Randomizer;
use crate::score::Score;
use std::time::Duration;
use tracing::{debug, info};

/// Session state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameState {
    NotStarted,
    Running,
    Paused,
    GameOver,
}

/// Player commands, independent of any input device
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Left,
    Right,
    RotateCw,
    SoftDrop,
    TogglePause,
    Reset,
}

/// What a command or tick did, for the UI to react to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// Not applicable in the current state
    Ignored,
    /// Applicable, but the move was illegal; nothing changed
    Rejected,
    Moved,
    Rotated,
    /// The piece fell one row
    Fell,
    /// The piece locked and a new one spawned
    Locked { lines: usize },
    /// The piece locked while still partly above the board
    GameOver { lines: usize },
    Paused,
    Resumed,
    Started,
}

/// The main game struct
#[derive(Debug, Clone)]
pub struct Game {
    /// Locked cells
    pub board: Board,
    /// Current falling piece, `None` before the first start and after game over
    pub current_piece: Option<Piece>,
    /// Score tracking
    pub score: Score,
    /// Current session state
    pub state: GameState,
    difficulty: Difficulty,
    /// Time accumulated towards the next gravity step
    since_drop: Duration,
    randomizer: Randomizer,
}

impl Default for Game {
    fn default() -> Self {
        Self::new()
    }
}

impl Game {
    /// Create a game waiting for a difficulty
    pub fn new() -> Self {
        Self::with_seed(rand::random())
    }

    /// Create a game whose piece sequence is reproducible
    pub fn with_seed(seed: u64) -> Self {
        Self {
            board: Board::new(),
            current_piece: None,
            score: Score::new(),
            state: GameState::NotStarted,
            difficulty: Difficulty::default(),
            since_drop: Duration::ZERO,
            randomizer: Randomizer::with_seed(seed),
        }
    }

    pub fn difficulty(&self) -> Difficulty {
        self.difficulty
    }

    pub fn drop_interval(&self) -> Duration {
        self.difficulty.drop_interval()
    }

    pub fn is_paused(&self) -> bool {
        self.state == GameState::Paused
    }

    pub fn is_game_over(&self) -> bool {
        self.state == GameState::GameOver
    }

    /// Anchor row of the drop projection, if a piece is falling
    pub fn ghost_row(&self) -> Option<i32> {
        self.current_piece
            .as_ref()
            .map(|piece| piece.ghost_row(&self.board))
    }

    /// Block positions of the drop projection
    pub fn ghost_cells(&self) -> Vec<(i32, i32)> {
        self.current_piece
            .as_ref()
            .map(|piece| piece.ghost_cells(&self.board))
            .unwrap_or_default()
    }

    /// Pick the gravity preset and begin a fresh game
    pub fn start(&mut self, difficulty: Difficulty) -> Outcome {
        self.difficulty = difficulty;
        info!(
            "Starting game on {} ({}ms per row)",
            difficulty.name(),
            difficulty.drop_interval().as_millis()
        );
        self.restart()
    }

    /// Advance the gravity clock by `elapsed`
    pub fn tick(&mut self, elapsed: Duration) -> Outcome {
        if self.state != GameState::Running {
            return Outcome::Ignored;
        }

        self.since_drop = self.since_drop.saturating_add(elapsed);
        if self.since_drop <= self.drop_interval() {
            return Outcome::Ignored;
        }

        self.since_drop = Duration::ZERO;
        self.move_down()
    }

    /// Apply a player command
    pub fn command(&mut self, command: Command) -> Outcome {
        match command {
            Command::Reset => {
                info!("Reset requested from {:?}", self.state);
                self.restart()
            }
            Command::TogglePause => match self.state {
                GameState::Running => {
                    self.state = GameState::Paused;
                    Outcome::Paused
                }
                GameState::Paused => {
                    self.state = GameState::Running;
                    Outcome::Resumed
                }
                GameState::NotStarted | GameState::GameOver => Outcome::Ignored,
            },
            _ if self.state != GameState::Running => Outcome::Ignored,
            Command::Left => self.shift(Piece::move_left, Outcome::Moved),
            Command::Right => self.shift(Piece::move_right, Outcome::Moved),
            Command::RotateCw => self.shift(Piece::rotate, Outcome::Rotated),
            Command::SoftDrop => self.move_down(),
        }
    }

    /// Horizontal and rotational input also restart the gravity clock
    fn shift(&mut self, apply: fn(&mut Piece, &Board) -> bool, success: Outcome) -> Outcome {
        let Some(piece) = &mut self.current_piece else {
            return Outcome::Ignored;
        };
        self.since_drop = Duration::ZERO;
        if apply(piece, &self.board) {
            success
        } else {
            Outcome::Rejected
        }
    }

    /// One gravity step: fall if possible, otherwise lock
    fn move_down(&mut self) -> Outcome {
        let Some(piece) = &mut self.current_piece else {
            return Outcome::Ignored;
        };
        if piece.move_down(&self.board) {
            Outcome::Fell
        } else {
            self.lock_piece()
        }
    }

    /// Commit the current piece, clear rows and spawn the next one
    fn lock_piece(&mut self) -> Outcome {
        let Some(piece) = self.current_piece.take() else {
            return Outcome::Ignored;
        };

        let placement = self.board.lock(&piece.cells(), piece.piece_type.color());
        let lines = self.board.collapse_full_rows();
        let gained = self.score.add_lock(lines);
        debug!(
            "Locked {:?} at ({}, {}), cleared {} rows (+{})",
            piece.piece_type, piece.x, piece.y, lines, gained
        );

        if placement == Placement::ToppedOut {
            self.state = GameState::GameOver;
            info!(
                "Game over: score {}, {} lines, {} pieces",
                self.score.points, self.score.lines, self.score.pieces
            );
            return Outcome::GameOver { lines };
        }

        let next = Piece::random(&mut self.randomizer);
        debug!("Spawned {:?}", next.piece_type);
        self.current_piece = Some(next);
        Outcome::Locked { lines }
    }

    /// Fresh board, score and piece with the configured difficulty
    fn restart(&mut self) -> Outcome {
        self.board.reset();
        self.score = Score::new();
        self.current_piece = Some(Piece::random(&mut self.randomizer));
        self.since_drop = Duration::ZERO;
        self.state = GameState::Running;
        Outcome::Started
    }
}

//! BLOCKFALL - a falling-block puzzle game
//!
//! The engine ([`game::Game`]) is driven purely by [`game::Command`]s and
//! elapsed-time ticks; the terminal front-end in the binary only renders its
//! state and feeds it input.

pub mod board;
pub mod difficulty;
pub mod game;
pub mod input;
pub mod menu;
pub mod piece;
pub mod randomizer;
pub mod score;
pub mod settings;
pub mod tetromino;
pub mod ui;

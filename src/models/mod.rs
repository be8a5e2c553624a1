// src/models/mod.rs
pub mod game;

pub use game::{GameResponse, GameState, GameStatus, GuessQuery};

// src/api/mod.rs
pub mod assets;
pub mod game;
pub mod health;

use crate::config::Config;
use crate::services::{GuessEvaluator, TokenCodec, WordPicker};

/// Shared, read-only state handed to every handler.
#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    pub codec: TokenCodec,
    pub evaluator: GuessEvaluator,
    pub words: WordPicker,
}

impl AppState {
    pub fn from_config(config: Config) -> anyhow::Result<Self> {
        Ok(Self {
            codec: config.token_codec()?,
            evaluator: config.guess_evaluator(),
            words: config.word_picker(),
            config,
        })
    }
}

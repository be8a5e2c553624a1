use rand::{seq::IndexedRandom, Rng};
use std::sync::Arc;

use crate::error::{AppError, Result};

/// In-memory word pool that new games draw from.
#[derive(Debug, Clone)]
pub struct WordPicker {
    words: Arc<[String]>,
}

impl WordPicker {
    pub fn new(words: Vec<String>) -> Self {
        Self {
            words: words.into(),
        }
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    /// Picks a word uniformly at random from the pool.
    pub fn pick(&self) -> Result<&str> {
        self.pick_with(&mut rand::rng())
    }

    pub fn pick_with<R: Rng + ?Sized>(&self, rng: &mut R) -> Result<&str> {
        self.words
            .choose(rng)
            .map(String::as_str)
            .ok_or_else(|| AppError::Internal("word pool is empty".to_string()))
    }
}

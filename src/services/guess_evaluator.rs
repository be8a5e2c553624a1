use std::collections::BTreeSet;

use crate::{
    constants::{DEFAULT_MAX_INCORRECT_GUESSES, MASK_CHAR},
    models::{GameState, GameStatus},
};

/// Case-insensitive comparison key for a single character. Kept as a string
/// because some characters uppercase to several (`ß` -> `SS`).
fn normalize(c: char) -> String {
    c.to_uppercase().collect()
}

fn normalized_set(s: &str) -> BTreeSet<String> {
    s.chars().map(normalize).collect()
}

/// Strike/reveal rules for one game. Every method is a pure function of the
/// word and the guesses so far.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GuessEvaluator {
    max_incorrect_guesses: usize,
    mask_char: char,
}

impl Default for GuessEvaluator {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_INCORRECT_GUESSES)
    }
}

impl GuessEvaluator {
    pub fn new(max_incorrect_guesses: usize) -> Self {
        Self {
            max_incorrect_guesses,
            mask_char: MASK_CHAR,
        }
    }

    pub fn max_incorrect_guesses(&self) -> usize {
        self.max_incorrect_guesses
    }

    /// The word with every unguessed character replaced by the mask.
    pub fn render(&self, word: &str, guesses: &str) -> String {
        let guessed = normalized_set(guesses);
        word.chars()
            .map(|c| {
                if guessed.contains(&normalize(c)) {
                    c
                } else {
                    self.mask_char
                }
            })
            .collect()
    }

    /// Distinct guessed characters (uppercased) that do not occur in the word.
    pub fn incorrect_letters(&self, word: &str, guesses: &str) -> BTreeSet<String> {
        let in_word = normalized_set(word);
        normalized_set(guesses)
            .into_iter()
            .filter(|c| !in_word.contains(c))
            .collect()
    }

    pub fn has_won(&self, word: &str, guesses: &str) -> bool {
        if word.is_empty() {
            return false;
        }
        normalized_set(word).is_subset(&normalized_set(guesses))
    }

    pub fn has_lost(&self, word: &str, guesses: &str) -> bool {
        if word.is_empty() {
            return false;
        }
        self.incorrect_letters(word, guesses).len() >= self.max_incorrect_guesses
    }

    /// Loss takes precedence over a win when both hold.
    pub fn status(&self, state: &GameState) -> GameStatus {
        if self.has_lost(&state.word, &state.guesses) {
            GameStatus::Lost
        } else if self.has_won(&state.word, &state.guesses) {
            GameStatus::Won
        } else {
            GameStatus::Playing
        }
    }
}

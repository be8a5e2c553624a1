use serde::{Deserialize, Serialize};

// ==================== GAME STATE ====================

/// Everything a game needs: the secret word and every character guessed so far.
///
/// This lives only inside the client-held token; the server never stores it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameState {
    pub word: String,
    pub guesses: String,
}

impl GameState {
    pub fn new(word: impl Into<String>) -> Self {
        Self {
            word: word.into(),
            guesses: String::new(),
        }
    }

    /// Returns the state with `letter` appended to the guesses.
    pub fn with_guess(mut self, letter: char) -> Self {
        self.guesses.push(letter);
        self
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GameStatus {
    Playing,
    Won,
    Lost,
}

impl GameStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Playing => "playing",
            Self::Won => "won",
            Self::Lost => "lost",
        }
    }

    pub fn is_terminal(self) -> bool {
        matches!(self, Self::Won | Self::Lost)
    }
}

// ==================== API ====================

#[derive(Debug, Deserialize)]
pub struct GuessQuery {
    pub token: Option<String>,
    pub letter: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct GameResponse {
    pub display_string: String,
    pub token: String,
    pub status: GameStatus,
    pub incorrect_guesses: usize,
    pub max_incorrect_guesses: usize,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn with_guess_appends_in_order() {
        let state = GameState::new("print").with_guess('p').with_guess('x').with_guess('p');
        assert_eq!(state.word, "print");
        assert_eq!(state.guesses, "pxp");
    }

    #[test]
    fn status_serializes_lowercase() {
        assert_eq!(serde_json::to_string(&GameStatus::Playing).unwrap(), "\"playing\"");
        assert_eq!(serde_json::to_string(&GameStatus::Lost).unwrap(), "\"lost\"");
        assert_eq!(GameStatus::Won.as_str(), "won");
    }

    #[test]
    fn only_won_and_lost_are_terminal() {
        assert!(!GameStatus::Playing.is_terminal());
        assert!(GameStatus::Won.is_terminal());
        assert!(GameStatus::Lost.is_terminal());
    }

    #[test]
    fn game_response_uses_camel_case_fields() {
        let response = GameResponse {
            display_string: "p____".to_string(),
            token: "abc".to_string(),
            status: GameStatus::Playing,
            incorrect_guesses: 0,
            max_incorrect_guesses: 6,
        };
        let value = serde_json::to_value(&response).unwrap();
        assert_eq!(value["displayString"], "p____");
        assert_eq!(value["status"], "playing");
        assert_eq!(value["maxIncorrectGuesses"], 6);
    }
}

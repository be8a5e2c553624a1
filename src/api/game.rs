use axum::{
    extract::{Query, State},
    response::Html,
    Json,
};

use super::AppState;
use crate::{
    constants::{LOST_TEXT, PLAYING_TEXT, WON_TEXT},
    error::{AppError, Result},
    models::{GameResponse, GameState, GuessQuery},
    utils::escape_html,
};

const INDEX_TEMPLATE: &str = include_str!("../../static/index.html");

fn build_response(state: &AppState, game: &GameState) -> Result<GameResponse> {
    let evaluator = &state.evaluator;

    Ok(GameResponse {
        display_string: evaluator.render(&game.word, &game.guesses),
        token: state.codec.encode_state(game)?,
        status: evaluator.status(game),
        incorrect_guesses: evaluator.incorrect_letters(&game.word, &game.guesses).len(),
        max_incorrect_guesses: evaluator.max_incorrect_guesses(),
    })
}

fn start_game(state: &AppState) -> Result<GameState> {
    let word = state.words.pick()?;
    tracing::debug!(word, "new game");
    Ok(GameState::new(word))
}

/// Parses the `letter` query parameter: exactly one character from the alphabet.
fn parse_letter(raw: Option<&str>, state: &AppState) -> Result<char> {
    let raw = raw
        .filter(|s| !s.is_empty())
        .ok_or_else(|| AppError::BadRequest("Missing letter".to_string()))?;

    let mut chars = raw.chars();
    let letter = match (chars.next(), chars.next()) {
        (Some(c), None) => c,
        _ => {
            return Err(AppError::BadRequest(
                "letter must be a single character".to_string(),
            ))
        }
    };

    if !state.config.is_valid_char(letter) {
        return Err(AppError::InvalidCharacterGuessed(letter));
    }

    Ok(letter)
}

fn character_buttons(valid_chars: &str) -> String {
    valid_chars
        .chars()
        .map(|c| {
            let c = escape_html(&c.to_string());
            format!(
                r#"      <button id="_{c}" class="character" type="button" data-character="{c}">{c}</button>"#
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}

fn render_index(state: &AppState, response: &GameResponse) -> String {
    INDEX_TEMPLATE
        .replace("{{secret_token}}", &escape_html(&response.token))
        .replace("{{hangman_string}}", &escape_html(&response.display_string))
        .replace(
            "{{max_incorrect_guesses}}",
            &response.max_incorrect_guesses.to_string(),
        )
        .replace("{{character_buttons}}", &character_buttons(&state.config.valid_chars))
        .replace("{{won_text}}", WON_TEXT)
        .replace("{{lost_text}}", LOST_TEXT)
        .replace("{{playing_text}}", PLAYING_TEXT)
}

/// GET /
pub async fn index(State(state): State<AppState>) -> Result<Html<String>> {
    let game = start_game(&state)?;
    let response = build_response(&state, &game)?;
    Ok(Html(render_index(&state, &response)))
}

/// GET /new_word
pub async fn new_word(State(state): State<AppState>) -> Result<Json<GameResponse>> {
    let game = start_game(&state)?;
    Ok(Json(build_response(&state, &game)?))
}

/// GET /guess?token=...&letter=...
///
/// A game that is already won or lost ignores the letter and echoes its state.
pub async fn guess(
    State(state): State<AppState>,
    Query(query): Query<GuessQuery>,
) -> Result<Json<GameResponse>> {
    let token = query
        .token
        .as_deref()
        .filter(|t| !t.trim().is_empty())
        .ok_or_else(|| AppError::BadRequest("Missing token".to_string()))?;
    let letter = parse_letter(query.letter.as_deref(), &state)?;

    let game = state.codec.decode(token)?;
    let current = state.evaluator.status(&game);

    let game = if current.is_terminal() {
        tracing::debug!(status = current.as_str(), %letter, "guess after game over ignored");
        game
    } else {
        game.with_guess(letter)
    };

    let response = build_response(&state, &game)?;
    tracing::debug!(
        status = response.status.as_str(),
        incorrect = response.incorrect_guesses,
        "guess processed"
    );

    Ok(Json(response))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{config::Config, models::GameStatus};

    fn state_with_word(word: &str) -> AppState {
        let config = Config {
            words_pool: vec![word.to_string()],
            ..Config::default()
        };
        AppState::from_config(config).expect("state")
    }

    async fn send(state: &AppState, token: &str, letter: &str) -> Result<GameResponse> {
        let query = GuessQuery {
            token: Some(token.to_string()),
            letter: Some(letter.to_string()),
        };
        guess(State(state.clone()), Query(query)).await.map(|Json(r)| r)
    }

    #[tokio::test]
    async fn new_word_starts_masked_and_playing() {
        let state = state_with_word("print");
        let Json(response) = new_word(State(state.clone())).await.expect("new game");
        assert_eq!(response.display_string, "_____");
        assert_eq!(response.status, GameStatus::Playing);
        assert_eq!(response.incorrect_guesses, 0);

        let game = state.codec.decode(&response.token).expect("token decodes");
        assert_eq!(game, GameState::new("print"));
    }

    #[tokio::test]
    async fn winning_game_reveals_the_word() {
        let state = state_with_word("print");
        let Json(start) = new_word(State(state.clone())).await.unwrap();

        let mut token = start.token;
        let first = send(&state, &token, "p").await.unwrap();
        assert_eq!(first.display_string, "p____");
        assert_eq!(first.status, GameStatus::Playing);
        token = first.token;

        let mut last = None;
        for letter in ["t", "R", "i", "n"] {
            let r = send(&state, &token, letter).await.unwrap();
            token = r.token.clone();
            last = Some(r);
        }
        let last = last.unwrap();
        assert_eq!(last.display_string, "print");
        assert_eq!(last.status, GameStatus::Won);
        assert_eq!(state.codec.decode(&token).unwrap().guesses, "ptRin");
    }

    #[tokio::test]
    async fn six_wrong_letters_lose_the_game() {
        let state = state_with_word("print");
        let mut token = state.codec.encode("print", "pr").unwrap();
        let mut status = GameStatus::Playing;
        for letter in ["q", "x", "z", "w", "y", "v"] {
            assert_eq!(status, GameStatus::Playing);
            let r = send(&state, &token, letter).await.unwrap();
            token = r.token;
            status = r.status;
        }
        assert_eq!(status, GameStatus::Lost);
    }

    #[tokio::test]
    async fn lost_is_reported_before_won() {
        let state = state_with_word("ab");
        // Contrived state: every letter found and six misses recorded.
        let token = state.codec.encode("ab", "abcdefgh").unwrap();
        let r = send(&state, &token, "z").await.unwrap();
        assert_eq!(r.status, GameStatus::Lost);
        assert_eq!(r.display_string, "ab");
        assert_eq!(r.token, token);
    }

    #[tokio::test]
    async fn guesses_after_game_over_are_ignored() {
        let state = state_with_word("order");
        let won = state.codec.encode("order", "orde").unwrap();
        let r = send(&state, &won, "z").await.unwrap();
        assert_eq!(r.status, GameStatus::Won);
        assert_eq!(r.token, won);

        let lost = state.codec.encode("order", "qwyuip").unwrap();
        let r = send(&state, &lost, "o").await.unwrap();
        assert_eq!(r.status, GameStatus::Lost);
        assert_eq!(r.display_string, "_____");
        assert_eq!(r.token, lost);
    }

    #[tokio::test]
    async fn repeated_guess_does_not_change_outcome() {
        let state = state_with_word("layer");
        let token = state.codec.encode("layer", "q").unwrap();
        let r = send(&state, &token, "q").await.unwrap();
        assert_eq!(r.incorrect_guesses, 1);
        assert_eq!(r.status, GameStatus::Playing);
    }

    #[tokio::test]
    async fn malformed_token_is_a_client_error() {
        let state = state_with_word("print");
        let err = send(&state, "definitely-not-a-token", "p").await.unwrap_err();
        assert!(matches!(err, AppError::MalformedToken(_)));
    }

    #[tokio::test]
    async fn edited_token_does_not_swap_the_word() {
        use base64::{engine::general_purpose::URL_SAFE_NO_PAD, Engine};

        let state = state_with_word("print");
        let token = state.codec.encode("print", "").unwrap();
        let mut raw = URL_SAFE_NO_PAD.decode(&token).unwrap();
        raw[0] ^= b'c' ^ b'd';
        let edited = URL_SAFE_NO_PAD.encode(raw);

        let err = send(&state, &edited, "t").await.unwrap_err();
        assert!(matches!(err, AppError::MalformedToken(_)));
    }

    #[tokio::test]
    async fn invalid_letters_are_rejected() {
        let state = state_with_word("print");
        let token = state.codec.encode("print", "").unwrap();

        let err = send(&state, &token, "!").await.unwrap_err();
        assert!(matches!(err, AppError::InvalidCharacterGuessed('!')));

        let err = send(&state, &token, "ab").await.unwrap_err();
        assert!(matches!(err, AppError::BadRequest(_)));

        let err = send(&state, &token, "").await.unwrap_err();
        assert!(matches!(err, AppError::BadRequest(_)));
    }

    #[tokio::test]
    async fn missing_token_is_rejected() {
        let state = state_with_word("print");
        let query = GuessQuery {
            token: None,
            letter: Some("p".to_string()),
        };
        let err = guess(State(state), Query(query)).await.unwrap_err();
        assert!(matches!(err, AppError::BadRequest(_)));
    }

    #[tokio::test]
    async fn index_page_embeds_a_fresh_token_and_alphabet() {
        let state = state_with_word("marvin");
        let Html(page) = index(State(state.clone())).await.expect("page renders");

        assert!(page.contains(">______</pre>"));
        assert!(page.contains(r#"id="_a""#));
        assert!(page.contains(r#"id="_9""#));
        assert!(page.contains(PLAYING_TEXT));
        assert!(page.contains(r#"id="gallows""#));
        assert!(!page.contains("{{"));
        assert!(!page.contains("marvin"));

        let token = page
            .split(r#"data-token=""#)
            .nth(1)
            .and_then(|rest| rest.split('"').next())
            .expect("token attribute");
        assert_eq!(state.codec.decode(token).unwrap(), GameState::new("marvin"));
    }
}

use std::env;

use crate::constants::{
    DEFAULT_MAX_INCORRECT_GUESSES, DEFAULT_TOKEN_PAD_CHAR, DEFAULT_VALID_CHARS,
    DEFAULT_WORDS_POOL, DEV_TOKEN_KEY_HEX, TOKEN_DELIMITER,
};
use crate::services::{GuessEvaluator, TokenCodec, WordPicker};

#[derive(Debug, Clone)]
pub struct Config {
    // Server
    pub host: String,
    pub port: u16,
    pub environment: String,

    // Game
    pub words_pool: Vec<String>,
    pub valid_chars: String,
    pub max_incorrect_guesses: usize,

    // Token
    pub token_key_hex: String,
    pub token_pad_char: String,
    pub token_obfuscation: bool,

    // CORS
    pub cors_allowed_origins: String,
}

// Internal helper that checks conditions for `parse_flag`.
fn parse_flag(value: &str) -> bool {
    let normalized = value.trim().to_ascii_lowercase();
    normalized == "1" || normalized == "true" || normalized == "yes" || normalized == "on"
}

fn parse_words(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|w| !w.is_empty())
        .map(str::to_string)
        .collect()
}

impl Default for Config {
    fn default() -> Self {
        Config {
            host: "0.0.0.0".to_string(),
            port: 5000,
            environment: "development".to_string(),
            words_pool: DEFAULT_WORDS_POOL.iter().map(|w| w.to_string()).collect(),
            valid_chars: DEFAULT_VALID_CHARS.to_string(),
            max_incorrect_guesses: DEFAULT_MAX_INCORRECT_GUESSES,
            token_key_hex: DEV_TOKEN_KEY_HEX.to_string(),
            token_pad_char: DEFAULT_TOKEN_PAD_CHAR.to_string(),
            token_obfuscation: true,
            cors_allowed_origins: "*".to_string(),
        }
    }
}

impl Config {
    pub fn from_env() -> anyhow::Result<Self> {
        dotenv::dotenv().ok();
        let defaults = Config::default();

        Ok(Config {
            host: env::var("HOST").unwrap_or(defaults.host),
            port: env::var("PORT")
                .unwrap_or_else(|_| defaults.port.to_string())
                .parse()?,
            environment: env::var("ENVIRONMENT").unwrap_or(defaults.environment),

            words_pool: env::var("WORDS_POOL")
                .map(|raw| parse_words(&raw))
                .unwrap_or(defaults.words_pool),
            valid_chars: env::var("VALID_CHARS").unwrap_or(defaults.valid_chars),
            max_incorrect_guesses: env::var("MAX_INCORRECT_GUESSES")
                .unwrap_or_else(|_| defaults.max_incorrect_guesses.to_string())
                .parse()?,

            token_key_hex: env::var("TOKEN_KEY").unwrap_or(defaults.token_key_hex),
            token_pad_char: env::var("TOKEN_PAD_CHAR").unwrap_or(defaults.token_pad_char),
            token_obfuscation: env::var("TOKEN_OBFUSCATION")
                .map(|v| parse_flag(&v))
                .unwrap_or(defaults.token_obfuscation),

            cors_allowed_origins: env::var("CORS_ALLOWED_ORIGINS")
                .unwrap_or(defaults.cors_allowed_origins),
        })
    }

    pub fn validate(&self) -> anyhow::Result<()> {
        if self.words_pool.is_empty() {
            anyhow::bail!("WORDS_POOL is empty");
        }
        if let Some(word) = self.words_pool.iter().find(|w| w.contains(TOKEN_DELIMITER)) {
            anyhow::bail!("WORDS_POOL entry {:?} contains '{}'", word, TOKEN_DELIMITER);
        }
        if self.valid_chars.is_empty() {
            anyhow::bail!("VALID_CHARS is empty");
        }
        if self.max_incorrect_guesses == 0 {
            anyhow::bail!("MAX_INCORRECT_GUESSES must be > 0");
        }
        // Fails fast on a bad pad character or key.
        self.token_codec()?;

        for word in &self.words_pool {
            if !word.chars().all(|c| self.is_valid_char(c)) {
                tracing::warn!("Word {:?} contains characters outside VALID_CHARS", word);
            }
        }

        if self.token_obfuscation && self.token_key_hex == DEV_TOKEN_KEY_HEX {
            tracing::warn!("Using the development TOKEN_KEY");
        }
        if !self.token_obfuscation {
            tracing::warn!("TOKEN_OBFUSCATION disabled; words are readable from tokens");
        }

        if self.cors_allowed_origins.trim().is_empty() {
            tracing::warn!("CORS_ALLOWED_ORIGINS is empty; requests may be blocked");
        }

        Ok(())
    }

    /// Case-insensitive membership in the playable alphabet.
    pub fn is_valid_char(&self, c: char) -> bool {
        let lower: String = c.to_lowercase().collect();
        let upper: String = c.to_uppercase().collect();
        self.valid_chars.contains(c)
            || self.valid_chars.contains(lower.as_str())
            || self.valid_chars.contains(upper.as_str())
    }

    pub fn pad_char(&self) -> anyhow::Result<char> {
        let mut chars = self.token_pad_char.chars();
        match (chars.next(), chars.next()) {
            (Some(c), None) => Ok(c),
            _ => anyhow::bail!(
                "TOKEN_PAD_CHAR must be a single character, got {:?}",
                self.token_pad_char
            ),
        }
    }

    pub fn token_key(&self) -> anyhow::Result<Vec<u8>> {
        let key = hex::decode(self.token_key_hex.trim())?;
        if key.is_empty() {
            anyhow::bail!("TOKEN_KEY is empty");
        }
        Ok(key)
    }

    pub fn token_codec(&self) -> anyhow::Result<TokenCodec> {
        let pad_char = self.pad_char()?;
        let codec = if self.token_obfuscation {
            TokenCodec::new(&self.token_key()?, pad_char)?
        } else {
            TokenCodec::plain(pad_char)?
        };
        Ok(codec)
    }

    pub fn guess_evaluator(&self) -> GuessEvaluator {
        GuessEvaluator::new(self.max_incorrect_guesses)
    }

    pub fn word_picker(&self) -> WordPicker {
        WordPicker::new(self.words_pool.clone())
    }
}

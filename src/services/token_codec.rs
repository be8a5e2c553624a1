use base64::{
    engine::general_purpose::{STANDARD, STANDARD_NO_PAD, URL_SAFE_NO_PAD},
    Engine,
};
use std::{fmt, sync::Arc};

use crate::{
    constants::{TOKEN_BLOCK_SIZE, TOKEN_CHECK_LEN, TOKEN_DELIMITER},
    crypto::{block, hash},
    error::{AppError, Result},
    models::GameState,
};

/// Encodes a game into the opaque token the browser carries between requests.
///
/// Layout: a 4-byte check value and `word;guesses`, base64, block padded,
/// XORed with a keyed keystream (unless built with [`TokenCodec::plain`]),
/// then URL-safe base64 without padding. The result never needs
/// percent-encoding.
///
/// This is obfuscation only. Tokens are deterministic, the check value only
/// catches edits, and anyone holding the key can read them.
#[derive(Clone)]
pub struct TokenCodec {
    key: Option<Arc<[u8]>>,
    pad_byte: u8,
}

impl fmt::Debug for TokenCodec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TokenCodec")
            .field("key", &self.key.as_deref().map(hash::fingerprint))
            .field("pad_char", &char::from(self.pad_byte))
            .finish()
    }
}

impl TokenCodec {
    /// Codec that obfuscates tokens with `key`.
    pub fn new(key: &[u8], pad_char: char) -> Result<Self> {
        Ok(Self {
            key: Some(Arc::from(key)),
            pad_byte: validate_pad_char(pad_char)?,
        })
    }

    /// Non-cryptographic codec: tokens are plain nested base64.
    pub fn plain(pad_char: char) -> Result<Self> {
        Ok(Self {
            key: None,
            pad_byte: validate_pad_char(pad_char)?,
        })
    }

    pub fn is_obfuscated(&self) -> bool {
        self.key.is_some()
    }

    /// Leading bytes of a digest over the plaintext, keyed when the codec is.
    /// Catches edited tokens; it is not a MAC worth trusting.
    fn check_value(&self, plain: &[u8]) -> [u8; TOKEN_CHECK_LEN] {
        let digest = match &self.key {
            Some(key) => hash::keyed_keccak256(key, plain),
            None => hash::keccak256(plain),
        };
        let mut check = [0u8; TOKEN_CHECK_LEN];
        check.copy_from_slice(&digest[..TOKEN_CHECK_LEN]);
        check
    }

    pub fn encode(&self, word: &str, guesses: &str) -> Result<String> {
        if word.contains(TOKEN_DELIMITER) {
            return Err(AppError::Internal(format!(
                "word must not contain the token delimiter {:?}",
                TOKEN_DELIMITER
            )));
        }

        let plain = format!("{}{}{}", word, TOKEN_DELIMITER, guesses);
        let mut payload = Vec::with_capacity(TOKEN_CHECK_LEN + plain.len());
        payload.extend_from_slice(&self.check_value(plain.as_bytes()));
        payload.extend_from_slice(plain.as_bytes());
        let inner = STANDARD.encode(payload);
        let mut padded = block::pad(inner.as_bytes(), TOKEN_BLOCK_SIZE, self.pad_byte)?;

        if let Some(key) = &self.key {
            block::apply_keystream(key, &mut padded, TOKEN_BLOCK_SIZE)?;
        }

        Ok(URL_SAFE_NO_PAD.encode(padded))
    }

    pub fn encode_state(&self, state: &GameState) -> Result<String> {
        self.encode(&state.word, &state.guesses)
    }

    /// Inverse of [`TokenCodec::encode`]. Fails closed: a token that does not
    /// decode cleanly never yields a partial word.
    pub fn decode(&self, token: &str) -> Result<GameState> {
        let mut raw = URL_SAFE_NO_PAD
            .decode(token.trim())
            .map_err(|_| malformed("invalid token encoding"))?;

        if raw.is_empty() || raw.len() % TOKEN_BLOCK_SIZE != 0 {
            return Err(malformed("unexpected token length"));
        }

        if let Some(key) = &self.key {
            block::apply_keystream(key, &mut raw, TOKEN_BLOCK_SIZE)?;
        }

        let inner = block::strip_padding(&raw, self.pad_byte);
        let inner = block::strip_padding(inner, b'=');
        let payload = STANDARD_NO_PAD
            .decode(inner)
            .map_err(|_| malformed("invalid payload encoding"))?;

        if payload.len() < TOKEN_CHECK_LEN {
            return Err(malformed("payload too short"));
        }
        let (check, plain) = payload.split_at(TOKEN_CHECK_LEN);
        if check != self.check_value(plain).as_slice() {
            return Err(malformed("check value mismatch"));
        }

        let plain = std::str::from_utf8(plain).map_err(|_| malformed("payload is not valid UTF-8"))?;

        let (word, guesses) = plain
            .split_once(TOKEN_DELIMITER)
            .ok_or_else(|| malformed("missing delimiter"))?;

        Ok(GameState {
            word: word.to_string(),
            guesses: guesses.to_string(),
        })
    }
}

fn malformed(reason: &str) -> AppError {
    AppError::MalformedToken(reason.to_string())
}

// The pad byte is stripped before the inner base64 is decoded, so it must
// never collide with a base64 data character.
fn validate_pad_char(pad_char: char) -> Result<u8> {
    let is_base64_data = pad_char.is_ascii_alphanumeric() || pad_char == '+' || pad_char == '/';
    if !pad_char.is_ascii_graphic() || is_base64_data {
        return Err(AppError::InvalidPadCharacter(pad_char));
    }
    Ok(pad_char as u8)
}

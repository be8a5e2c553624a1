/// Application constants

// Game rules
pub const DEFAULT_MAX_INCORRECT_GUESSES: usize = 6;
pub const MASK_CHAR: char = '_';
pub const DEFAULT_VALID_CHARS: &str = "abcdefghijklmnopqrstuvwxyz0123456789";
pub const DEFAULT_WORDS_POOL: [&str; 6] = ["3dhubs", "marvin", "print", "filament", "order", "layer"];

// Title texts shown by the front end
pub const WON_TEXT: &str = "You won!";
pub const LOST_TEXT: &str = "You lost!";
pub const PLAYING_TEXT: &str = "Guess the word";

// Token layout
pub const TOKEN_DELIMITER: char = ';';
pub const TOKEN_BLOCK_SIZE: usize = 16;
pub const TOKEN_CHECK_LEN: usize = 4;
pub const DEFAULT_TOKEN_PAD_CHAR: char = '=';
// Hex, 16 bytes. Only meant for local development.
pub const DEV_TOKEN_KEY_HEX: &str = "03f215e760eb649e5b37763134142e43";

// API version
pub const API_VERSION: &str = "v1";

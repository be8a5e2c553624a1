// All service modules
pub mod guess_evaluator;
pub mod token_codec;
pub mod word_picker;

// Re-export for convenience
pub use guess_evaluator::GuessEvaluator;
pub use token_codec::TokenCodec;
pub use word_picker::WordPicker;

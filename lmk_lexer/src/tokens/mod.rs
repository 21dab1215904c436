//! Token records produced by the LMK lexer
//!
//! A token is a typed, positioned span of preprocessed source text. Tokens
//! are created only by the lexer state's `mark_end` and are immutable once
//! created; the ordered token list is the sole artifact handed to any
//! downstream consumer.

pub mod token;

pub use token::{validate_sequence, Token};

// Re-export span types from utils
pub use crate::utils::{Position, Span};

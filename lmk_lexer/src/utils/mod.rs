//! Shared utility types for the LMK lexer

pub mod span;

pub use span::{Position, Span};

//! Configuration module for the LMK lexer
//!
//! Compile-time limit constants plus runtime-tunable scan preferences.

pub mod constants;
pub mod runtime;

pub use runtime::ScanPreferences;

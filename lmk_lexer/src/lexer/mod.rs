//! The speculative lexer core
//!
//! Everything that turns a preprocessed line buffer into tokens:
//!
//! - **[`Cursor`]** - one-directional (row, col) movement with per-row
//!   final-column history
//! - **[`LexemeBuffer`]** - append-only pending text since the last token
//!   boundary
//! - **[`SpeculativeMatcher`]** - the shrinking candidate set for the token
//!   being recognized
//! - **[`LexerState`]** - the single-owner engine: buffer + cursor + trash
//!   + token list, with deep-copy snapshot/restore for backtracking
//! - **[`scan_lines`]** - the outer scan driver
//!
//! The hot path never logs and never touches I/O; the catalog and source
//! are fully loaded before scanning begins.

pub mod buffer;
pub mod cursor;
pub mod guess;
pub mod scanner;
pub mod state;

pub use buffer::LexemeBuffer;
pub use cursor::Cursor;
pub use guess::{Matcher, SpeculativeMatcher};
pub use scanner::{scan_lines, ScanMetrics};
pub use state::{HistoryLimits, LexError, LexerState};

//! Source preprocessing
//!
//! Before scanning, raw source is normalized into a sequence of logical
//! lines ending in an explicit end marker. An all-blank or fully-filtered
//! input is a preprocessing failure, not an empty token list.

pub mod line_buffer;
pub mod processor;

pub use line_buffer::{LineBuffer, Lookahead, SourceLine};
pub use processor::{preprocess, preprocess_lines, PreprocessError, PreprocessOptions};

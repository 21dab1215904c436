//! Raw source normalization
//!
//! Turns raw text into the clean line buffer the scanner consumes: offsets
//! and cutoffs applied, comments stripped, gated regions resolved, blank
//! lines dropped, and a statement terminator guaranteed on every line.

use super::line_buffer::LineBuffer;
use crate::config::constants::compile_time::preprocess::{
    DEFAULT_COMMENT_PATTERN, DEFAULT_TERMINATOR, MAX_LINE_COUNT, MAX_SOURCE_SIZE,
};
use crate::log_debug;
use regex::Regex;

/// Preprocessing failures. All fatal: nothing is scanned afterwards.
#[derive(Debug, Clone, thiserror::Error)]
pub enum PreprocessError {
    #[error("no source left after preprocessing")]
    EmptySource,

    #[error("raw source too large: {size} bytes (max {max})")]
    SourceTooLarge { size: usize, max: usize },

    #[error("too many lines after preprocessing: {count} (max {max})")]
    TooManyLines { count: usize, max: usize },
}

impl PreprocessError {
    pub fn error_code(&self) -> crate::logging::Code {
        use crate::logging::codes::preprocess;

        match self {
            PreprocessError::EmptySource => preprocess::EMPTY_SOURCE,
            PreprocessError::SourceTooLarge { .. } => preprocess::SOURCE_TOO_LARGE,
            PreprocessError::TooManyLines { .. } => preprocess::TOO_MANY_LINES,
        }
    }
}

/// Line-level options applied before scanning.
#[derive(Debug, Clone)]
pub struct PreprocessOptions {
    /// First raw line to consider (0-indexed, inclusive)
    pub line_offset: usize,
    /// Early cutoff: number of raw lines kept after the offset
    pub line_cutoff: Option<usize>,
    /// Suppress all lines until this pattern first matches; the matching
    /// line itself is consumed
    pub start: Option<Regex>,
    /// End preprocessing when this pattern matches
    pub stop: Option<Regex>,
    /// Drop lines matching this pattern
    pub ignore: Option<Regex>,
    /// Replace a line with its first captured group; non-matching lines
    /// are discarded
    pub extract: Option<Regex>,
    /// Comment pattern with two groups: kept prefix, dropped remainder.
    /// Lines reduced to nothing are removed entirely.
    pub comment: Option<Regex>,
    /// Statement terminator appended to lines lacking one
    pub terminator: char,
}

impl Default for PreprocessOptions {
    fn default() -> Self {
        Self {
            line_offset: 0,
            line_cutoff: None,
            start: None,
            stop: None,
            ignore: None,
            extract: None,
            comment: Some(
                Regex::new(DEFAULT_COMMENT_PATTERN).expect("default comment pattern compiles"),
            ),
            terminator: DEFAULT_TERMINATOR,
        }
    }
}

impl PreprocessOptions {
    /// Options with no comment stripping
    pub fn without_comments() -> Self {
        Self {
            comment: None,
            ..Self::default()
        }
    }
}

/// Preprocess a raw source string into a line buffer.
pub fn preprocess(source: &str, options: &PreprocessOptions) -> Result<LineBuffer, PreprocessError> {
    if source.len() > MAX_SOURCE_SIZE {
        return Err(PreprocessError::SourceTooLarge {
            size: source.len(),
            max: MAX_SOURCE_SIZE,
        });
    }

    let lines: Vec<&str> = source.split('\n').collect();
    preprocess_lines(&lines, options)
}

/// Preprocess an already-split sequence of raw lines.
pub fn preprocess_lines(
    lines: &[&str],
    options: &PreprocessOptions,
) -> Result<LineBuffer, PreprocessError> {
    let mut result: Vec<String> = Vec::new();

    let skipped = lines.iter().skip(options.line_offset);
    let window: Vec<&&str> = match options.line_cutoff {
        Some(cutoff) => skipped.take(cutoff).collect(),
        None => skipped.collect(),
    };

    let mut started = options.start.is_none();

    for &line in window {
        if !started {
            if options
                .start
                .as_ref()
                .map(|p| p.is_match(line))
                .unwrap_or(false)
            {
                started = true;
            }
            continue;
        }

        if let Some(ignore) = &options.ignore {
            if ignore.is_match(line) {
                continue;
            }
        }

        if let Some(stop) = &options.stop {
            if stop.is_match(line) {
                break;
            }
        }

        if line.trim().is_empty() {
            continue;
        }

        let mut line = line.to_string();

        if let Some(extract) = &options.extract {
            match extract.captures(&line) {
                Some(caps) => {
                    line = caps
                        .get(1)
                        .or_else(|| caps.get(0))
                        .map(|m| m.as_str().to_string())
                        .unwrap_or_default();
                }
                None => continue,
            }
        }

        if let Some(comment) = &options.comment {
            if let Some(caps) = comment.captures(&line) {
                line = caps.get(1).map(|m| m.as_str().to_string()).unwrap_or_default();
                if line.trim().is_empty() {
                    continue;
                }
            }
        }

        let mut line = line.trim_end().to_string();
        if !line.ends_with(options.terminator) {
            line.push(options.terminator);
        }
        result.push(line);
    }

    if result.is_empty() {
        return Err(PreprocessError::EmptySource);
    }
    if result.len() > MAX_LINE_COUNT {
        return Err(PreprocessError::TooManyLines {
            count: result.len(),
            max: MAX_LINE_COUNT,
        });
    }

    log_debug!("Preprocessing complete",
        "raw_lines" => lines.len(),
        "kept_lines" => result.len()
    );

    Ok(LineBuffer::new(result))
}

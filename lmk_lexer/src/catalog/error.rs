//! Catalog construction and query errors

/// Errors raised while building a token type registry from catalog records.
/// All of these are fatal: a registry is never constructed partially.
#[derive(Debug, Clone, thiserror::Error)]
pub enum ConfigError {
    #[error("catalog record in category '{category}' is missing required field '{field}'")]
    MissingField {
        category: String,
        field: &'static str,
    },

    #[error("invalid id '{value}' for token type '{name}': not a non-negative integer")]
    InvalidId { name: String, value: String },

    #[error("invalid pattern '{pattern}' for token type '{name}': {reason}")]
    InvalidPattern {
        name: String,
        pattern: String,
        reason: String,
    },

    #[error("duplicate token type name '{name}'")]
    DuplicateName { name: String },

    #[error("duplicate token type id {id} (types '{first}' and '{second}')")]
    DuplicateId {
        id: u32,
        first: String,
        second: String,
    },

    #[error("catalog defines too many types: {count} (max {max})")]
    TooManyTypes { count: usize, max: usize },

    #[error("token type '{name}' defines too many symbols: {count} (max {max})")]
    TooManySymbols {
        name: String,
        count: usize,
        max: usize,
    },

    #[error("failed to read catalog file '{path}': {reason}")]
    FileRead { path: String, reason: String },

    #[error("failed to parse catalog: {reason}")]
    Parse { reason: String },
}

impl ConfigError {
    pub fn error_code(&self) -> crate::logging::Code {
        use crate::logging::codes::catalog;

        match self {
            ConfigError::MissingField { .. } => catalog::MISSING_FIELD,
            ConfigError::InvalidId { .. } => catalog::INVALID_ID,
            ConfigError::InvalidPattern { .. } => catalog::INVALID_PATTERN,
            ConfigError::DuplicateName { .. } | ConfigError::DuplicateId { .. } => {
                catalog::DUPLICATE_TYPE
            }
            ConfigError::TooManyTypes { .. } | ConfigError::TooManySymbols { .. } => {
                catalog::LIMIT_EXCEEDED
            }
            ConfigError::FileRead { .. } => catalog::FILE_UNREADABLE,
            ConfigError::Parse { .. } => catalog::PARSE_FAILED,
        }
    }
}

/// More than one token type matched the same text while the registry search
/// was configured with the error policy. Both candidates are named so the
/// caller can report the ambiguity.
#[derive(Debug, Clone, thiserror::Error)]
#[error("ambiguous match for '{text}': both '{first}' and '{second}' apply")]
pub struct ConflictError {
    pub text: String,
    pub first: String,
    pub second: String,
}

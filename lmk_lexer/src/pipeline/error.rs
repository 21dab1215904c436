use crate::catalog::{ConfigError, ConflictError};
use crate::lexer::LexError;
use crate::preprocess::PreprocessError;

/// Pipeline processing errors
#[derive(Debug, thiserror::Error)]
pub enum PipelineError {
    #[error("catalog construction failed: {0}")]
    Catalog(#[from] ConfigError),

    #[error("preprocessing failed: {0}")]
    Preprocess(#[from] PreprocessError),

    #[error("lexical scan failed: {0}")]
    Lexical(#[from] LexError),

    #[error("ambiguous token type: {0}")]
    Conflict(#[from] ConflictError),

    #[error("failed to read source '{path}': {source}")]
    SourceRead {
        path: String,
        source: std::io::Error,
    },

    #[error("output file '{path}' already exists (pass force to overwrite)")]
    OutputExists { path: String },

    #[error("failed to write output '{path}': {source}")]
    OutputWrite {
        path: String,
        source: std::io::Error,
    },

    #[error("failed to serialize token dump: {0}")]
    Serialize(#[from] serde_json::Error),
}

impl PipelineError {
    pub fn error_code(&self) -> crate::logging::Code {
        use crate::logging::codes;

        match self {
            PipelineError::Catalog(e) => e.error_code(),
            PipelineError::Preprocess(e) => e.error_code(),
            PipelineError::Lexical(e) => e.error_code(),
            PipelineError::Conflict(_) => codes::catalog::AMBIGUOUS_MATCH,
            PipelineError::SourceRead { .. } => codes::preprocess::IO_ERROR,
            PipelineError::OutputExists { .. } | PipelineError::OutputWrite { .. } => {
                codes::preprocess::IO_ERROR
            }
            PipelineError::Serialize(_) => codes::system::INTERNAL_ERROR,
        }
    }
}

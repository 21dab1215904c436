//! Token dump serialization
//!
//! Writes the produced token stream (plus trash and scan metadata) to a
//! JSON file for downstream consumers.

use super::error::PipelineError;
use super::result::ScanResult;
use crate::log_success;
use crate::logging::codes;
use crate::tokens::Token;
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::path::Path;

/// The serializable shape of a completed scan.
#[derive(Debug, Clone, Serialize)]
pub struct TokenDump {
    pub source: String,
    pub generated_at: DateTime<Utc>,
    pub line_count: usize,
    pub token_count: usize,
    pub tokens: Vec<Token>,
    pub trash: Vec<String>,
}

impl TokenDump {
    /// Build a dump from a scan result
    pub fn from_result(source: &str, result: &ScanResult) -> Self {
        Self {
            source: source.to_string(),
            generated_at: result.finished_at,
            line_count: result.line_count,
            token_count: result.tokens.len(),
            tokens: result.tokens.clone(),
            trash: result.trash.clone(),
        }
    }

    /// Serialize to a JSON string
    pub fn to_json(&self, pretty: bool) -> Result<String, PipelineError> {
        let json = if pretty {
            serde_json::to_string_pretty(self)?
        } else {
            serde_json::to_string(self)?
        };
        Ok(json)
    }
}

/// Write a token dump to `path`. Refuses to overwrite an existing file
/// unless `force` is set.
pub fn write_token_dump(
    path: &Path,
    source: &str,
    result: &ScanResult,
    pretty: bool,
    force: bool,
) -> Result<(), PipelineError> {
    if path.exists() && !force {
        return Err(PipelineError::OutputExists {
            path: path.display().to_string(),
        });
    }

    let dump = TokenDump::from_result(source, result);
    let json = dump.to_json(pretty)?;

    std::fs::write(path, json).map_err(|e| PipelineError::OutputWrite {
        path: path.display().to_string(),
        source: e,
    })?;

    log_success!(codes::success::DUMP_WRITTEN, "Token dump written",
        "path" => path.display(),
        "tokens" => dump.token_count
    );

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lexer::ScanMetrics;
    use assert_matches::assert_matches;
    use crate::utils::Span;
    use std::time::Duration;

    fn sample_result() -> ScanResult {
        ScanResult {
            tokens: vec![Token::new(
                "NUM",
                "12".to_string(),
                Span::new((0, 0).into(), (0, 1).into()),
                0,
            )],
            trash: vec![" ;".to_string()],
            metrics: ScanMetrics::default(),
            line_count: 1,
            duration: Duration::from_millis(1),
            finished_at: Utc::now(),
        }
    }

    #[test]
    fn test_dump_serializes_tokens() {
        let dump = TokenDump::from_result("test.lmk", &sample_result());
        let json = dump.to_json(false).unwrap();

        assert!(json.contains("\"type_name\":\"NUM\""));
        assert!(json.contains("\"payload\":\"12\""));
        assert!(json.contains("\"token_count\":1"));
    }

    #[test]
    fn test_write_refuses_existing_file_without_force() {
        let file = tempfile::NamedTempFile::new().unwrap();
        let result = sample_result();

        let refused = write_token_dump(file.path(), "test.lmk", &result, false, false);
        assert_matches!(refused, Err(PipelineError::OutputExists { .. }));

        write_token_dump(file.path(), "test.lmk", &result, true, true).unwrap();
        let written = std::fs::read_to_string(file.path()).unwrap();
        assert!(written.contains("NUM"));
    }
}

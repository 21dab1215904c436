//! The scan pipeline
//!
//! Strings the stages together: preprocess -> registry -> scan -> result.
//! This is the unit thin wrappers (such as the CLI) call into; the core
//! components below it never log or touch I/O themselves.

mod error;
pub mod output;
mod result;

pub use error::PipelineError;
pub use output::{write_token_dump, TokenDump};
pub use result::ScanResult;

use crate::catalog::{self, TokenTypeRegistry};
use crate::config::runtime::ScanPreferences;
use crate::lexer::{scan_lines, LexerState};
use crate::logging;
use crate::preprocess::{preprocess, PreprocessOptions};
use crate::tokens::validate_sequence;
use crate::{log_error, log_info, log_warning};
use chrono::Utc;
use std::path::Path;
use std::time::Instant;

/// Scan a raw source string against a prebuilt registry.
pub fn scan_source(
    source: &str,
    registry: &TokenTypeRegistry,
    options: &PreprocessOptions,
    prefs: &ScanPreferences,
) -> Result<ScanResult, PipelineError> {
    let started = Instant::now();

    let lines = preprocess(source, options)?;
    let line_count = lines.content_len();

    let mut state = LexerState::new(lines, options.terminator);
    let metrics = scan_lines(&mut state, registry, prefs)?;
    let (tokens, trash) = state.into_parts();

    if let Err(violation) = validate_sequence(&tokens) {
        log_warning!("Token stream validation failed", "violation" => violation);
    }

    let result = ScanResult {
        tokens,
        trash,
        metrics,
        line_count,
        duration: started.elapsed(),
        finished_at: Utc::now(),
    };

    if prefs.log_token_statistics {
        result.log_success("<string>");
    }

    Ok(result)
}

/// Scan a source file with a catalog file, using default options.
pub fn scan_file(source_path: &Path, catalog_path: &Path) -> Result<ScanResult, PipelineError> {
    scan_file_with(
        source_path,
        catalog_path,
        &PreprocessOptions::default(),
        &ScanPreferences::default(),
    )
}

/// Scan a source file with explicit options and preferences.
pub fn scan_file_with(
    source_path: &Path,
    catalog_path: &Path,
    options: &PreprocessOptions,
    prefs: &ScanPreferences,
) -> Result<ScanResult, PipelineError> {
    let source_name = source_path.display().to_string();

    logging::with_file_context(&source_name, || {
        log_info!("Starting scan pipeline", "catalog" => catalog_path.display());

        let outcome = (|| {
            let registry = catalog::load_registry(catalog_path)?;

            let source =
                std::fs::read_to_string(source_path).map_err(|e| PipelineError::SourceRead {
                    path: source_name.clone(),
                    source: e,
                })?;

            scan_source(&source, &registry, options, prefs)
        })();

        match outcome {
            Ok(result) => {
                result.log_success(&source_name);
                Ok(result)
            }
            Err(e) => {
                log_error!(e.error_code(), "Scan pipeline failed", "error" => e);
                Err(e)
            }
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{Catalog, CatalogRecord};
    use assert_matches::assert_matches;
    use std::io::Write;

    fn registry() -> TokenTypeRegistry {
        let mut catalog = Catalog::new();
        catalog.insert(
            "number".to_string(),
            vec![CatalogRecord::new("NUM", 1).with_regexes(&["^[0-9]+$"])],
        );
        catalog.insert(
            "text".to_string(),
            vec![CatalogRecord::new("WORD", 2).with_regexes(&["^[a-z]+$"])],
        );
        TokenTypeRegistry::from_catalog(&catalog).unwrap()
    }

    #[test]
    fn test_scan_source_end_to_end() {
        let result = scan_source(
            "12 ab",
            &registry(),
            &PreprocessOptions::default(),
            &ScanPreferences::default(),
        )
        .unwrap();

        assert_eq!(result.tokens.len(), 2);
        assert_eq!(result.tokens[0].type_name, "NUM");
        assert_eq!(result.tokens[1].type_name, "WORD");
        assert_eq!(result.line_count, 1);
        assert!(result.trash_chars() > 0);
    }

    #[test]
    fn test_scan_source_empty_input_fails_before_scanning() {
        let outcome = scan_source(
            "\n\n",
            &registry(),
            &PreprocessOptions::default(),
            &ScanPreferences::default(),
        );
        assert_matches!(outcome, Err(PipelineError::Preprocess(_)));
    }

    #[test]
    fn test_scan_source_comments_become_trashless_lines() {
        let result = scan_source(
            "12 ~> the answer\nab",
            &registry(),
            &PreprocessOptions::default(),
            &ScanPreferences::default(),
        )
        .unwrap();

        // comment text never reaches the scanner, so it is neither payload
        // nor trash
        let all_payloads: String = result.tokens.iter().map(|t| t.payload.as_str()).collect();
        assert!(!all_payloads.contains("answer"));
        assert!(!result.trash.concat().contains("answer"));
    }

    #[test]
    fn test_scan_file_with_catalog_file() {
        let catalog_toml = r#"
[[number]]
name = "NUM"
id = 1
regexes = ["^[0-9]+$"]

[[text]]
name = "WORD"
id = 2
regexes = ["^[a-z]+$"]
"#;
        let mut catalog_file = tempfile::NamedTempFile::new().unwrap();
        catalog_file.write_all(catalog_toml.as_bytes()).unwrap();

        let mut source_file = tempfile::NamedTempFile::new().unwrap();
        source_file.write_all(b"12 ab\n34").unwrap();

        let result = scan_file(source_file.path(), catalog_file.path()).unwrap();
        assert_eq!(result.tokens.len(), 3);
        assert_eq!(result.line_count, 2);
    }

    #[test]
    fn test_scan_file_missing_source() {
        let catalog_file = tempfile::NamedTempFile::new().unwrap();
        // an empty catalog parses to zero categories
        let outcome = scan_file(Path::new("/nonexistent/input.lmk"), catalog_file.path());
        assert_matches!(outcome, Err(PipelineError::SourceRead { .. }));
    }
}

//! Consolidated log codes and classification system
//!
//! Single source of truth for all error and success codes used by the scan
//! pipeline, together with their behavioral metadata.

use std::collections::HashMap;
use std::sync::OnceLock;

// ============================================================================
// CODE WRAPPER TYPE
// ============================================================================

/// Universal code wrapper for both error and success codes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Code(&'static str);

impl Code {
    pub const fn new(code: &'static str) -> Self {
        Self(code)
    }

    pub fn as_str(&self) -> &'static str {
        self.0
    }
}

impl std::fmt::Display for Code {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

// ============================================================================
// ERROR CLASSIFICATION TYPES
// ============================================================================

/// Error severity levels
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Severity {
    Critical = 0,
    High = 1,
    Medium = 2,
    Low = 3,
}

impl Severity {
    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::Critical => "Critical",
            Severity::High => "High",
            Severity::Medium => "Medium",
            Severity::Low => "Low",
        }
    }
}

/// Complete metadata for an error code
#[derive(Debug, Clone)]
pub struct ErrorMetadata {
    pub code: &'static str,
    pub category: &'static str,
    pub severity: Severity,
    pub recoverable: bool,
    pub description: &'static str,
}

// ============================================================================
// ERROR CODE CONSTANTS
// ============================================================================

/// System error codes
pub mod system {
    use super::Code;

    pub const INTERNAL_ERROR: Code = Code::new("ERR001");
    pub const INITIALIZATION_FAILURE: Code = Code::new("ERR002");
}

/// Preprocessing error codes
pub mod preprocess {
    use super::Code;

    pub const EMPTY_SOURCE: Code = Code::new("E005");
    pub const SOURCE_TOO_LARGE: Code = Code::new("E006");
    pub const TOO_MANY_LINES: Code = Code::new("E007");
    pub const IO_ERROR: Code = Code::new("E008");
}

/// Catalog error codes
pub mod catalog {
    use super::Code;

    pub const MISSING_FIELD: Code = Code::new("E020");
    pub const INVALID_ID: Code = Code::new("E021");
    pub const INVALID_PATTERN: Code = Code::new("E022");
    pub const DUPLICATE_TYPE: Code = Code::new("E023");
    pub const AMBIGUOUS_MATCH: Code = Code::new("E024");
    pub const LIMIT_EXCEEDED: Code = Code::new("E025");
    pub const FILE_UNREADABLE: Code = Code::new("E026");
    pub const PARSE_FAILED: Code = Code::new("E027");
}

/// Lexical error codes
pub mod lexical {
    use super::Code;

    pub const END_OF_INPUT: Code = Code::new("E040");
    pub const UNRECOGNIZED_TEXT: Code = Code::new("E041");
    pub const BACKTRACK_RANGE: Code = Code::new("E042");
    pub const TOKEN_LIMIT: Code = Code::new("E043");
    pub const PAYLOAD_LIMIT: Code = Code::new("E044");
}

/// Success codes
pub mod success {
    use super::Code;

    pub const CATALOG_LOADED: Code = Code::new("I001");
    pub const PREPROCESS_COMPLETE: Code = Code::new("I002");
    pub const SCAN_COMPLETE: Code = Code::new("I003");
    pub const DUMP_WRITTEN: Code = Code::new("I004");
}

// ============================================================================
// METADATA REGISTRY
// ============================================================================

fn metadata_table() -> &'static HashMap<&'static str, ErrorMetadata> {
    static TABLE: OnceLock<HashMap<&'static str, ErrorMetadata>> = OnceLock::new();
    TABLE.get_or_init(|| {
        let entries = [
            ErrorMetadata {
                code: "ERR001",
                category: "System",
                severity: Severity::Critical,
                recoverable: false,
                description: "Internal invariant violated",
            },
            ErrorMetadata {
                code: "ERR002",
                category: "System",
                severity: Severity::Critical,
                recoverable: false,
                description: "Subsystem initialization failed",
            },
            ErrorMetadata {
                code: "E005",
                category: "Preprocess",
                severity: Severity::High,
                recoverable: false,
                description: "No source left after preprocessing",
            },
            ErrorMetadata {
                code: "E006",
                category: "Preprocess",
                severity: Severity::High,
                recoverable: false,
                description: "Raw source exceeds the size limit",
            },
            ErrorMetadata {
                code: "E007",
                category: "Preprocess",
                severity: Severity::High,
                recoverable: false,
                description: "Preprocessed line count exceeds the limit",
            },
            ErrorMetadata {
                code: "E008",
                category: "Preprocess",
                severity: Severity::High,
                recoverable: true,
                description: "Source file could not be read",
            },
            ErrorMetadata {
                code: "E020",
                category: "Catalog",
                severity: Severity::High,
                recoverable: false,
                description: "Catalog record is missing a required field",
            },
            ErrorMetadata {
                code: "E021",
                category: "Catalog",
                severity: Severity::High,
                recoverable: false,
                description: "Catalog record id is not numeric",
            },
            ErrorMetadata {
                code: "E022",
                category: "Catalog",
                severity: Severity::High,
                recoverable: false,
                description: "Catalog regex failed to compile",
            },
            ErrorMetadata {
                code: "E023",
                category: "Catalog",
                severity: Severity::High,
                recoverable: false,
                description: "Duplicate token type name or id",
            },
            ErrorMetadata {
                code: "E024",
                category: "Catalog",
                severity: Severity::Medium,
                recoverable: true,
                description: "More than one token type matched under the error policy",
            },
            ErrorMetadata {
                code: "E025",
                category: "Catalog",
                severity: Severity::High,
                recoverable: false,
                description: "Catalog exceeds a size limit",
            },
            ErrorMetadata {
                code: "E026",
                category: "Catalog",
                severity: Severity::High,
                recoverable: true,
                description: "Catalog file could not be read",
            },
            ErrorMetadata {
                code: "E027",
                category: "Catalog",
                severity: Severity::High,
                recoverable: false,
                description: "Catalog file is not valid TOML",
            },
            ErrorMetadata {
                code: "E040",
                category: "Lexical",
                severity: Severity::High,
                recoverable: true,
                description: "Advance attempted past the end marker",
            },
            ErrorMetadata {
                code: "E041",
                category: "Lexical",
                severity: Severity::Medium,
                recoverable: false,
                description: "No catalog type matches the accumulated text",
            },
            ErrorMetadata {
                code: "E042",
                category: "Lexical",
                severity: Severity::Critical,
                recoverable: false,
                description: "Restore requested beyond available history",
            },
            ErrorMetadata {
                code: "E043",
                category: "Lexical",
                severity: Severity::High,
                recoverable: false,
                description: "Token count exceeds the scan limit",
            },
            ErrorMetadata {
                code: "E044",
                category: "Lexical",
                severity: Severity::High,
                recoverable: false,
                description: "Token payload exceeds the length limit",
            },
        ];
        entries.into_iter().map(|m| (m.code, m)).collect()
    })
}

/// Get the category for a code, or "Unknown"
pub fn get_category(code: &str) -> &'static str {
    metadata_table()
        .get(code)
        .map(|m| m.category)
        .unwrap_or("Unknown")
}

/// Get the severity for a code (unknown codes are Low)
pub fn get_severity(code: &str) -> Severity {
    metadata_table()
        .get(code)
        .map(|m| m.severity)
        .unwrap_or(Severity::Low)
}

/// Get the description for a code, or "Unknown error"
pub fn get_description(code: &str) -> &'static str {
    metadata_table()
        .get(code)
        .map(|m| m.description)
        .unwrap_or("Unknown error")
}

/// Check whether an error with this code is recoverable
pub fn is_recoverable(code: &str) -> bool {
    metadata_table()
        .get(code)
        .map(|m| m.recoverable)
        .unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_code_metadata() {
        assert_eq!(get_category("E041"), "Lexical");
        assert_eq!(get_severity("E042"), Severity::Critical);
        assert!(is_recoverable("E040"));
        assert!(!is_recoverable("E042"));
    }

    #[test]
    fn test_unknown_code_fallbacks() {
        assert_eq!(get_category("E999"), "Unknown");
        assert_eq!(get_description("E999"), "Unknown error");
        assert_eq!(get_severity("E999"), Severity::Low);
    }

    #[test]
    fn test_code_display() {
        assert_eq!(lexical::UNRECOGNIZED_TEXT.to_string(), "E041");
        assert_eq!(success::SCAN_COMPLETE.as_str(), "I003");
    }
}

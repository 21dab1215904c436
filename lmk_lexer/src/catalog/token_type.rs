//! Validated token type matchers
//!
//! A [`TokenType`] answers three independent queries: literal membership
//! (`lookup`), regex match (`matches`) and the combination of both (`eval`),
//! plus a structured subtype decomposition for payloads that carry internal
//! structure.

use super::error::ConfigError;
use super::record::{CatalogRecord, SubtypeRecord};
use crate::config::constants::compile_time::catalog::MAX_SYMBOLS_PER_TYPE;
use regex::{Regex, RegexBuilder};

/// A compiled subtype sub-matcher
#[derive(Debug, Clone)]
pub struct Subtype {
    patterns: Vec<Regex>,
    idents: Vec<String>,
    kinds: Vec<String>,
}

/// One captured piece of a subtype decomposition: the sub-identifier and
/// sub-kind declared for the capture position, plus the captured text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubtypeMatch {
    pub ident: String,
    pub kind: String,
    pub text: String,
}

/// A named, declaratively-configured token matcher with a stable numeric id.
#[derive(Debug, Clone)]
pub struct TokenType {
    id: u32,
    name: String,
    category: String,
    symbols: Vec<String>,
    patterns: Vec<Regex>,
    subtypes: Vec<Subtype>,
    help: Option<String>,
}

fn compile_pattern(name: &str, pattern: &str) -> Result<Regex, ConfigError> {
    RegexBuilder::new(pattern)
        .case_insensitive(true)
        .build()
        .map_err(|e| ConfigError::InvalidPattern {
            name: name.to_string(),
            pattern: pattern.to_string(),
            reason: e.to_string(),
        })
}

impl TokenType {
    /// Validate a catalog record into a token type.
    ///
    /// `name` and `id` are required; the name is uppercased so registry
    /// lookups are case-insensitive by construction.
    pub fn from_record(category: &str, record: &CatalogRecord) -> Result<Self, ConfigError> {
        let missing = |field| ConfigError::MissingField {
            category: category.to_string(),
            field,
        };

        let name = record
            .name
            .as_ref()
            .ok_or_else(|| missing("name"))?
            .to_uppercase();
        let id = record.id.as_ref().ok_or_else(|| missing("id"))?.resolve(&name)?;

        let symbols = record.all_symbols();
        if symbols.len() > MAX_SYMBOLS_PER_TYPE {
            return Err(ConfigError::TooManySymbols {
                name,
                count: symbols.len(),
                max: MAX_SYMBOLS_PER_TYPE,
            });
        }

        let patterns = record
            .all_regexes()
            .iter()
            .map(|p| compile_pattern(&name, p))
            .collect::<Result<Vec<_>, _>>()?;

        let subtypes = record
            .subtypes
            .iter()
            .map(|s| Subtype::from_record(&name, s))
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self {
            id,
            name,
            category: category.to_string(),
            symbols,
            patterns,
            subtypes,
            help: record.help.clone(),
        })
    }

    pub fn id(&self) -> u32 {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn category(&self) -> &str {
        &self.category
    }

    pub fn help(&self) -> Option<&str> {
        self.help.as_deref()
    }

    /// Literal symbols in declaration order
    pub fn symbols(&self) -> &[String] {
        &self.symbols
    }

    /// Regex patterns in declaration order
    pub fn patterns(&self) -> &[Regex] {
        &self.patterns
    }

    /// True if any configured regex matches `text`, directly or through a
    /// subtype sub-pattern. Patterns are compiled case-insensitive.
    pub fn matches(&self, text: &str) -> bool {
        self.patterns.iter().any(|p| p.is_match(text))
            || self
                .subtypes
                .iter()
                .any(|s| s.patterns.iter().any(|p| p.is_match(text)))
    }

    /// True if `text` is among the literal symbols (case-insensitive),
    /// optionally restricted to a subset of symbol positions.
    pub fn lookup(&self, text: &str, symbol_indices: Option<&[usize]>) -> bool {
        match symbol_indices {
            Some(indices) => indices
                .iter()
                .filter_map(|&i| self.symbols.get(i))
                .any(|s| s.eq_ignore_ascii_case(text)),
            None => self.symbols.iter().any(|s| s.eq_ignore_ascii_case(text)),
        }
    }

    /// Combined query: `lookup || matches`
    pub fn eval(&self, text: &str) -> bool {
        self.lookup(text, None) || self.matches(text)
    }

    /// Structured subtype decomposition.
    ///
    /// Subtype patterns are tried in declaration order; the first pattern
    /// with capture groups that matches wins (first-match, not
    /// longest-match). One record is returned per capture group; positions
    /// without a declared ident/kind yield empty strings. Empty when no
    /// subtype pattern matches.
    pub fn match_subtype(&self, text: &str) -> Vec<SubtypeMatch> {
        for subtype in &self.subtypes {
            for pattern in &subtype.patterns {
                if pattern.captures_len() < 2 {
                    continue;
                }
                if let Some(caps) = pattern.captures(text) {
                    return (1..caps.len())
                        .map(|group| SubtypeMatch {
                            ident: subtype.idents.get(group - 1).cloned().unwrap_or_default(),
                            kind: subtype.kinds.get(group - 1).cloned().unwrap_or_default(),
                            text: caps
                                .get(group)
                                .map(|m| m.as_str().to_string())
                                .unwrap_or_default(),
                        })
                        .collect();
                }
            }
        }
        Vec::new()
    }
}

impl Subtype {
    fn from_record(type_name: &str, record: &SubtypeRecord) -> Result<Self, ConfigError> {
        let patterns = record
            .patterns
            .iter()
            .map(|p| compile_pattern(type_name, p))
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self {
            patterns,
            idents: record.idents.clone(),
            kinds: record.kinds.clone(),
        })
    }
}

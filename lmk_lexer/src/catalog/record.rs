//! Declarative catalog records
//!
//! A catalog is the external, declarative description of every token type
//! the lexer can emit, grouped under category keys. Records arrive from a
//! TOML document (or are built directly in code) and are validated into
//! [`super::TokenType`] values during registry construction.

use super::error::ConfigError;
use serde::Deserialize;
use std::collections::BTreeMap;

/// A full catalog: category key -> ordered records.
///
/// `BTreeMap` keeps category iteration deterministic, which fixes the
/// registry order that linear searches depend on.
pub type Catalog = BTreeMap<String, Vec<CatalogRecord>>;

/// One declarative token type entry.
///
/// `name` and `id` are required; absence is a [`ConfigError`] at registry
/// construction time rather than a deserialization failure, so incomplete
/// records are reported with catalog-level context.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CatalogRecord {
    pub name: Option<String>,
    pub id: Option<IdValue>,
    pub symbol: Option<String>,
    #[serde(default)]
    pub symbols: Vec<String>,
    pub regex: Option<String>,
    #[serde(default)]
    pub regexes: Vec<String>,
    #[serde(default)]
    pub subtypes: Vec<SubtypeRecord>,
    pub help: Option<String>,
}

impl CatalogRecord {
    /// Create a minimal record with the two required fields
    pub fn new(name: &str, id: u32) -> Self {
        Self {
            name: Some(name.to_string()),
            id: Some(IdValue::Number(id as i64)),
            ..Self::default()
        }
    }

    /// Add literal symbols
    pub fn with_symbols(mut self, symbols: &[&str]) -> Self {
        self.symbols
            .extend(symbols.iter().map(|s| s.to_string()));
        self
    }

    /// Add regex patterns
    pub fn with_regexes(mut self, regexes: &[&str]) -> Self {
        self.regexes
            .extend(regexes.iter().map(|s| s.to_string()));
        self
    }

    /// Add a subtype matcher
    pub fn with_subtype(mut self, subtype: SubtypeRecord) -> Self {
        self.subtypes.push(subtype);
        self
    }

    /// All literal symbols, singular entry first
    pub fn all_symbols(&self) -> Vec<String> {
        let mut out = Vec::with_capacity(self.symbols.len() + 1);
        if let Some(symbol) = &self.symbol {
            out.push(symbol.clone());
        }
        out.extend(self.symbols.iter().cloned());
        out
    }

    /// All regex patterns, singular entry first
    pub fn all_regexes(&self) -> Vec<String> {
        let mut out = Vec::with_capacity(self.regexes.len() + 1);
        if let Some(regex) = &self.regex {
            out.push(regex.clone());
        }
        out.extend(self.regexes.iter().cloned());
        out
    }
}

/// A declarative subtype sub-matcher: patterns with capture groups, paired
/// positionally with sub-identifiers and sub-kinds.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SubtypeRecord {
    #[serde(default)]
    pub patterns: Vec<String>,
    #[serde(default)]
    pub idents: Vec<String>,
    #[serde(default)]
    pub kinds: Vec<String>,
}

/// A record id: catalogs may write ids as integers or numeric strings.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum IdValue {
    Number(i64),
    Text(String),
}

impl IdValue {
    /// Resolve to a stable numeric id
    pub fn resolve(&self, name: &str) -> Result<u32, ConfigError> {
        let invalid = |value: String| ConfigError::InvalidId {
            name: name.to_string(),
            value,
        };

        match self {
            IdValue::Number(n) => u32::try_from(*n).map_err(|_| invalid(n.to_string())),
            IdValue::Text(s) => s.trim().parse::<u32>().map_err(|_| invalid(s.clone())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;

    #[test]
    fn test_id_value_resolution() {
        assert_eq!(IdValue::Number(7).resolve("NUM").unwrap(), 7);
        assert_eq!(IdValue::Text("12".to_string()).resolve("NUM").unwrap(), 12);
        assert_matches!(
            IdValue::Number(-1).resolve("NUM"),
            Err(ConfigError::InvalidId { .. })
        );
        assert_matches!(
            IdValue::Text("twelve".to_string()).resolve("NUM"),
            Err(ConfigError::InvalidId { .. })
        );
    }

    #[test]
    fn test_singular_and_plural_fields_combine() {
        let record = CatalogRecord {
            symbol: Some("<".to_string()),
            regex: Some("^a$".to_string()),
            ..CatalogRecord::new("ANGLE", 1)
        }
        .with_symbols(&["<~"])
        .with_regexes(&["^b$"]);

        assert_eq!(record.all_symbols(), vec!["<", "<~"]);
        assert_eq!(record.all_regexes(), vec!["^a$", "^b$"]);
    }
}

//! The token type registry
//!
//! Built once from a catalog and immutable afterwards. Registry order is
//! deterministic (category key order, then record order) so the linear
//! `search` resolves ambiguity identically on every run.

use super::error::{ConfigError, ConflictError};
use super::record::Catalog;
use super::token_type::TokenType;
use crate::config::constants::compile_time::catalog::MAX_TYPE_COUNT;
use std::collections::HashMap;

/// Which predicate a registry search applies.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchMode {
    /// `lookup || matches`
    Eval,
    /// Regex match only
    Match,
    /// Literal symbol membership only
    Lookup,
}

/// Behavior when more than one token type matches the same text.
///
/// This policy table decides whether ambiguous lexical grammars are resolved
/// eagerly or treated as an error.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MultiMatchPolicy {
    /// Return the first match immediately
    First,
    /// Keep overwriting; return the last match
    Last,
    /// Raise a [`ConflictError`] naming both candidates
    Error,
    /// Return the configured default
    UseDefault,
    /// Accumulate all matching names as an alternation string
    MergeAlternatives,
}

/// A successful registry search.
#[derive(Debug, Clone)]
pub enum SearchHit<'a> {
    /// Exactly one type was selected
    Type(&'a TokenType),
    /// Merged alternatives, e.g. `"NUM|WORD"`
    Alternatives(String),
}

impl SearchHit<'_> {
    /// The selected type name, or the merged alternation string
    pub fn name(&self) -> &str {
        match self {
            SearchHit::Type(ty) => ty.name(),
            SearchHit::Alternatives(names) => names,
        }
    }
}

/// Holds all token types built from one catalog; read-only during lexing.
#[derive(Debug, Clone)]
pub struct TokenTypeRegistry {
    types: Vec<TokenType>,
    by_name: HashMap<String, usize>,
}

impl TokenTypeRegistry {
    /// Build a registry from a catalog of declarative records.
    ///
    /// Fails with a [`ConfigError`] on the first incomplete record,
    /// uncompilable pattern, or duplicate name/id.
    pub fn from_catalog(catalog: &Catalog) -> Result<Self, ConfigError> {
        let mut types = Vec::new();
        let mut by_name = HashMap::new();
        let mut by_id: HashMap<u32, String> = HashMap::new();

        for (category, records) in catalog {
            for record in records {
                let ty = TokenType::from_record(category, record)?;

                if let Some(first) = by_id.get(&ty.id()) {
                    return Err(ConfigError::DuplicateId {
                        id: ty.id(),
                        first: first.clone(),
                        second: ty.name().to_string(),
                    });
                }
                if by_name.contains_key(ty.name()) {
                    return Err(ConfigError::DuplicateName {
                        name: ty.name().to_string(),
                    });
                }

                by_id.insert(ty.id(), ty.name().to_string());
                by_name.insert(ty.name().to_string(), types.len());
                types.push(ty);
            }
        }

        if types.len() > MAX_TYPE_COUNT {
            return Err(ConfigError::TooManyTypes {
                count: types.len(),
                max: MAX_TYPE_COUNT,
            });
        }

        Ok(Self { types, by_name })
    }

    /// Look up a type by name (case-insensitive)
    pub fn get(&self, name: &str) -> Option<&TokenType> {
        self.by_name
            .get(&name.to_uppercase())
            .map(|&i| &self.types[i])
    }

    /// All types in registry order
    pub fn types(&self) -> &[TokenType] {
        &self.types
    }

    /// Types belonging to one category, in registry order
    pub fn category<'a>(&'a self, category: &'a str) -> impl Iterator<Item = &'a TokenType> {
        self.types.iter().filter(move |t| t.category() == category)
    }

    pub fn len(&self) -> usize {
        self.types.len()
    }

    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
    }

    fn applies(ty: &TokenType, text: &str, mode: MatchMode) -> bool {
        match mode {
            MatchMode::Eval => ty.eval(text),
            MatchMode::Match => ty.matches(text),
            MatchMode::Lookup => ty.lookup(text, None),
        }
    }

    /// Linear scan of all types (optionally restricted to a category) for
    /// one that matches `text` under `mode`.
    ///
    /// With zero matches, every policy falls back to `default` (`None` when
    /// absent). With more than one match the policy decides: `First` returns
    /// immediately, `Last` keeps overwriting, `Error` raises a
    /// [`ConflictError`] naming the first two candidates, `UseDefault`
    /// returns `default`, and `MergeAlternatives` joins all matching names
    /// with `|`.
    pub fn search<'a>(
        &'a self,
        text: &str,
        mode: MatchMode,
        on_multiple: MultiMatchPolicy,
        category: Option<&str>,
        default: Option<&'a TokenType>,
    ) -> Result<Option<SearchHit<'a>>, ConflictError> {
        let mut hits: Vec<&TokenType> = Vec::new();

        for ty in &self.types {
            if let Some(cat) = category {
                if ty.category() != cat {
                    continue;
                }
            }
            if !Self::applies(ty, text, mode) {
                continue;
            }
            if on_multiple == MultiMatchPolicy::First {
                return Ok(Some(SearchHit::Type(ty)));
            }
            hits.push(ty);
        }

        match hits.len() {
            0 => Ok(default.map(SearchHit::Type)),
            1 => Ok(Some(SearchHit::Type(hits[0]))),
            _ => match on_multiple {
                MultiMatchPolicy::First => unreachable!("first-match returns inside the loop"),
                MultiMatchPolicy::Last => Ok(Some(SearchHit::Type(hits[hits.len() - 1]))),
                MultiMatchPolicy::Error => Err(ConflictError {
                    text: text.to_string(),
                    first: hits[0].name().to_string(),
                    second: hits[1].name().to_string(),
                }),
                MultiMatchPolicy::UseDefault => Ok(default.map(SearchHit::Type)),
                MultiMatchPolicy::MergeAlternatives => {
                    let names: Vec<&str> = hits.iter().map(|t| t.name()).collect();
                    Ok(Some(SearchHit::Alternatives(names.join("|"))))
                }
            },
        }
    }
}

//! Speculative candidate narrowing
//!
//! While a token is being recognized, the [`SpeculativeMatcher`] holds the
//! set of token types still compatible with the text accumulated so far.
//! Feeding a character re-evaluates every retained rule against the whole
//! candidate string (regex matches are not incrementally composable), drops
//! the rules that no longer apply, and shrinks the remaining name set. The
//! set never grows between resets, so common ambiguous prefixes resolve
//! without full backtracking.

use crate::catalog::TokenTypeRegistry;
use regex::Regex;

/// A single narrowing test.
#[derive(Debug, Clone)]
pub enum Matcher {
    /// Case-insensitive literal: survives while the candidate is a prefix
    /// of (or equal to) the literal
    Literal(String),
    /// Compiled regex, re-evaluated against the whole candidate each step
    Pattern(Regex),
    /// Arbitrary predicate over the candidate
    Predicate(fn(&str) -> bool),
    /// Predicate receiving the candidate and a caller-supplied context
    /// value, for context-sensitive rules
    ContextPredicate(fn(&str, &str) -> bool),
}

impl Matcher {
    fn accepts(&self, candidate: &str, context: &str) -> bool {
        match self {
            Matcher::Literal(literal) => {
                candidate.len() <= literal.len()
                    && literal
                        .chars()
                        .zip(candidate.chars())
                        .all(|(l, c)| l.eq_ignore_ascii_case(&c))
            }
            Matcher::Pattern(pattern) => pattern.is_match(candidate),
            Matcher::Predicate(test) => test(candidate),
            Matcher::ContextPredicate(test) => test(candidate, context),
        }
    }
}

#[derive(Debug, Clone)]
struct GuessRule {
    matcher: Matcher,
    names: Vec<String>,
    alive: bool,
}

/// The shrinking candidate set for the token currently being recognized.
#[derive(Debug, Clone)]
pub struct SpeculativeMatcher {
    rules: Vec<GuessRule>,
    candidate: String,
    context: String,
    remaining: Vec<String>,
}

impl SpeculativeMatcher {
    /// Build from an ordered list of (matcher, associated names) rules.
    /// The initial remaining set is the union of all associated names.
    pub fn new(rules: Vec<(Matcher, Vec<String>)>) -> Self {
        let rules: Vec<GuessRule> = rules
            .into_iter()
            .map(|(matcher, names)| GuessRule {
                matcher,
                names,
                alive: true,
            })
            .collect();

        let mut matcher = Self {
            rules,
            candidate: String::new(),
            context: String::new(),
            remaining: Vec::new(),
        };
        matcher.recompute_remaining();
        matcher
    }

    /// Build rules from every type in the registry, optionally restricted
    /// to one category: each literal symbol and each pattern becomes one
    /// rule associated with the owning type's name.
    pub fn from_registry(registry: &TokenTypeRegistry, category: Option<&str>) -> Self {
        let mut rules = Vec::new();

        for ty in registry.types() {
            if let Some(cat) = category {
                if ty.category() != cat {
                    continue;
                }
            }
            let name = ty.name().to_string();
            for symbol in ty.symbols() {
                rules.push((Matcher::Literal(symbol.clone()), vec![name.clone()]));
            }
            for pattern in ty.patterns() {
                rules.push((Matcher::Pattern(pattern.clone()), vec![name.clone()]));
            }
        }

        Self::new(rules)
    }

    fn recompute_remaining(&mut self) {
        self.remaining.clear();
        for rule in self.rules.iter().filter(|r| r.alive) {
            for name in &rule.names {
                if !self.remaining.iter().any(|n| n == name) {
                    self.remaining.push(name.clone());
                }
            }
        }
    }

    /// Supply the context value passed to 2-argument predicates
    pub fn set_context(&mut self, context: String) {
        self.context = context;
    }

    /// Append one character to the candidate, drop every rule whose matcher
    /// no longer accepts it, and return the size of the remaining set.
    pub fn feed(&mut self, ch: char) -> usize {
        self.candidate.push(ch);

        let candidate = &self.candidate;
        let context = &self.context;
        for rule in self.rules.iter_mut().filter(|r| r.alive) {
            if !rule.matcher.accepts(candidate, context) {
                rule.alive = false;
            }
        }

        self.recompute_remaining();
        self.remaining.len()
    }

    /// The accumulated candidate text
    pub fn candidate(&self) -> &str {
        &self.candidate
    }

    /// Names still compatible with the candidate
    pub fn remaining(&self) -> &[String] {
        &self.remaining
    }

    /// The single surviving name, if exactly one remains
    pub fn resolved(&self) -> Option<&str> {
        match self.remaining.as_slice() {
            [name] => Some(name.as_str()),
            _ => None,
        }
    }

    /// True when no candidate survives; the driver must backtrack
    pub fn exhausted(&self) -> bool {
        self.remaining.is_empty()
    }

    /// Clear the candidate and revive every rule for the next token.
    /// The context value is kept until overwritten.
    pub fn reset(&mut self) {
        self.candidate.clear();
        for rule in &mut self.rules {
            rule.alive = true;
        }
        self.recompute_remaining();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{Catalog, CatalogRecord, TokenTypeRegistry};
    use regex::RegexBuilder;

    fn pattern(p: &str) -> Matcher {
        Matcher::Pattern(
            RegexBuilder::new(p)
                .case_insensitive(true)
                .build()
                .unwrap(),
        )
    }

    fn num_word_matcher() -> SpeculativeMatcher {
        SpeculativeMatcher::new(vec![
            (pattern("^[0-9]+$"), vec!["NUM".to_string()]),
            (pattern("^[a-z]+$"), vec!["WORD".to_string()]),
        ])
    }

    #[test]
    fn test_initial_remaining_is_union_of_names() {
        let matcher = num_word_matcher();
        assert_eq!(matcher.remaining(), ["NUM", "WORD"]);
        assert!(!matcher.exhausted());
        assert!(matcher.resolved().is_none());
    }

    #[test]
    fn test_feed_narrows_to_one() {
        let mut matcher = num_word_matcher();

        assert_eq!(matcher.feed('4'), 1);
        assert_eq!(matcher.resolved(), Some("NUM"));
        assert_eq!(matcher.feed('2'), 1);
        assert_eq!(matcher.candidate(), "42");
    }

    #[test]
    fn test_narrowing_is_monotonic() {
        let mut matcher = num_word_matcher();
        let mut previous = matcher.remaining().len();

        for ch in "a1b2".chars() {
            let count = matcher.feed(ch);
            assert!(count <= previous, "remaining set grew on feed");
            previous = count;
        }
        assert!(matcher.exhausted());
    }

    #[test]
    fn test_dropped_rules_stay_dropped() {
        let mut matcher = num_word_matcher();
        matcher.feed('a');
        assert_eq!(matcher.remaining(), ["WORD"]);

        // '1' kills WORD too; NUM must not come back even though "a1" ends
        // in a digit
        matcher.feed('1');
        assert!(matcher.exhausted());
    }

    #[test]
    fn test_shared_literal_prefix_diverges() {
        let mut matcher = SpeculativeMatcher::new(vec![
            (Matcher::Literal("<".to_string()), vec!["LANGLE".to_string()]),
            (
                Matcher::Literal("<~".to_string()),
                vec!["COMMENT_OPEN".to_string()],
            ),
        ]);

        // both candidates survive the shared first character
        assert_eq!(matcher.feed('<'), 2);
        assert!(matcher.resolved().is_none());

        // the second character forces divergence to exactly one
        assert_eq!(matcher.feed('~'), 1);
        assert_eq!(matcher.resolved(), Some("COMMENT_OPEN"));
    }

    #[test]
    fn test_literal_matching_is_case_insensitive() {
        let mut matcher = SpeculativeMatcher::new(vec![(
            Matcher::Literal("AND".to_string()),
            vec!["AND_OP".to_string()],
        )]);

        matcher.feed('a');
        matcher.feed('n');
        assert_eq!(matcher.remaining().len(), 1);
    }

    #[test]
    fn test_predicate_rule() {
        let mut matcher = SpeculativeMatcher::new(vec![(
            Matcher::Predicate(|text| text.len() <= 2),
            vec!["SHORT".to_string()],
        )]);

        matcher.feed('x');
        matcher.feed('y');
        assert_eq!(matcher.resolved(), Some("SHORT"));
        matcher.feed('z');
        assert!(matcher.exhausted());
    }

    #[test]
    fn test_context_predicate_sees_context() {
        let mut matcher = SpeculativeMatcher::new(vec![(
            Matcher::ContextPredicate(|_text, context| context == "LANGLE"),
            vec!["AFTER_ANGLE".to_string()],
        )]);

        matcher.set_context("WORD".to_string());
        assert_eq!(matcher.feed('x'), 0);

        matcher.reset();
        matcher.set_context("LANGLE".to_string());
        assert_eq!(matcher.feed('x'), 1);
    }

    #[test]
    fn test_reset_revives_rules() {
        let mut matcher = num_word_matcher();
        matcher.feed('a');
        matcher.feed('1');
        assert!(matcher.exhausted());

        matcher.reset();
        assert_eq!(matcher.remaining().len(), 2);
        assert_eq!(matcher.candidate(), "");
    }

    #[test]
    fn test_from_registry_builds_symbol_and_pattern_rules() {
        let mut catalog = Catalog::new();
        catalog.insert(
            "number".to_string(),
            vec![CatalogRecord::new("NUM", 1).with_regexes(&["^[0-9]+$"])],
        );
        catalog.insert(
            "delimiter".to_string(),
            vec![CatalogRecord::new("LANGLE", 2).with_symbols(&["<"])],
        );
        let registry = TokenTypeRegistry::from_catalog(&catalog).unwrap();

        let mut matcher = SpeculativeMatcher::from_registry(&registry, None);
        assert_eq!(matcher.remaining().len(), 2);

        matcher.feed('<');
        assert_eq!(matcher.resolved(), Some("LANGLE"));

        matcher.reset();
        matcher.feed('7');
        assert_eq!(matcher.resolved(), Some("NUM"));
    }
}

//! The scan driver
//!
//! The outer loop over the preprocessed line buffer. Boundary whitespace
//! and statement terminators are consumed into trash; everything else is
//! accumulated speculatively: a snapshot is taken at every position where
//! the pending payload fully evaluates against the registry, and when the
//! candidate set is exhausted the driver restores to the newest checkpoint
//! and emits the token resolved there.

use super::guess::SpeculativeMatcher;
use super::state::{LexError, LexerState};
use crate::catalog::{MatchMode, TokenType, TokenTypeRegistry};
use crate::config::constants::compile_time::lexical::{MAX_PAYLOAD_LENGTH, MAX_TOKEN_COUNT};
use crate::config::runtime::ScanPreferences;
use crate::preprocess::Lookahead;
use crate::tokens::Token;
use std::collections::HashMap;

/// Counters collected over one scan.
#[derive(Debug, Default, Clone)]
pub struct ScanMetrics {
    pub total_tokens: usize,
    pub trash_chars: usize,
    pub snapshots_taken: usize,
    pub backtracks: usize,
    pub max_payload_length: usize,
    pub type_usage: HashMap<String, usize>,
}

impl ScanMetrics {
    pub(crate) fn record_token(&mut self, token: &Token, prefs: &ScanPreferences) {
        self.total_tokens += 1;
        self.max_payload_length = self.max_payload_length.max(token.len());

        if prefs.track_type_usage {
            *self.type_usage.entry(token.type_name.clone()).or_insert(0) += 1;
        }
    }
}

fn is_boundary(ch: char, terminator: char) -> bool {
    ch == ' ' || ch == '\t' || ch == '\n' || ch == terminator
}

/// Resolve a fully-accumulated payload against the registry under the
/// configured multiple-match policy.
fn resolve_payload(
    registry: &TokenTypeRegistry,
    text: &str,
    prefs: &ScanPreferences,
    default: Option<&TokenType>,
) -> Result<Option<String>, LexError> {
    let hit = registry.search(
        text,
        MatchMode::Eval,
        prefs.resolution_policy,
        None,
        default,
    )?;
    Ok(hit.map(|h| h.name().to_string()))
}

/// Scan the whole line buffer held by `state`, emitting tokens until the
/// end marker is reached.
pub fn scan_lines(
    state: &mut LexerState,
    registry: &TokenTypeRegistry,
    prefs: &ScanPreferences,
) -> Result<ScanMetrics, LexError> {
    let mut metrics = ScanMetrics::default();
    let default_ty = prefs
        .default_type
        .as_deref()
        .and_then(|name| registry.get(name));

    let mut guess = SpeculativeMatcher::from_registry(registry, None);

    loop {
        let ch = match state.lookahead() {
            Lookahead::End => break,
            Lookahead::Char(ch) => ch,
        };

        // boundary characters between tokens go to trash
        if is_boundary(ch, state.terminator()) {
            state.advance(true)?;
            continue;
        }

        if state.tokens().len() >= MAX_TOKEN_COUNT {
            return Err(LexError::TooManyTokens {
                count: state.tokens().len(),
                max: MAX_TOKEN_COUNT,
            });
        }

        scan_token(state, registry, prefs, default_ty, &mut guess, &mut metrics)?;
    }

    metrics.trash_chars = state.trash().iter().map(|slot| slot.chars().count()).sum();

    Ok(metrics)
}

/// Recognize exactly one token starting at the cursor.
fn scan_token(
    state: &mut LexerState,
    registry: &TokenTypeRegistry,
    prefs: &ScanPreferences,
    default_ty: Option<&TokenType>,
    guess: &mut SpeculativeMatcher,
    metrics: &mut ScanMetrics,
) -> Result<(), LexError> {
    guess.reset();
    guess.set_context(
        state
            .tokens()
            .last()
            .map(|t| t.type_name.clone())
            .unwrap_or_default(),
    );

    // (resolved type name, payload length) at the newest snapshot
    let mut checkpoint: Option<(String, usize)> = None;

    loop {
        let ch = match state.lookahead() {
            Lookahead::End => break,
            Lookahead::Char(ch) => ch,
        };
        if is_boundary(ch, state.terminator()) {
            break;
        }

        state.advance(false)?;

        if state.buffer().payload().len() > MAX_PAYLOAD_LENGTH {
            return Err(LexError::PayloadTooLong {
                row: state.position().row,
                length: state.buffer().payload().len(),
                max: MAX_PAYLOAD_LENGTH,
            });
        }

        let remaining = guess.feed(ch);

        // full-payload resolution runs even when the candidate set is dead:
        // subtype-only patterns and the configured default are not guess
        // rules, yet they can absorb the payload
        if let Some(name) = resolve_payload(registry, state.buffer().payload(), prefs, default_ty)?
        {
            checkpoint = Some((name, state.buffer().payload().len()));
            state.snapshot();
            metrics.snapshots_taken += 1;
        } else if remaining == 0 {
            // dead end: the payload overshot every candidate
            if checkpoint.is_some() {
                state.restore(1, true)?;
                metrics.backtracks += 1;
            }
            break;
        }
    }

    match checkpoint {
        Some((type_name, payload_len)) => {
            // a boundary may have been reached past the newest checkpoint
            // while candidates were still alive but nothing fully matched
            if state.buffer().payload().len() > payload_len {
                state.restore(1, true)?;
                metrics.backtracks += 1;
            }
            let token = state.mark_end(&type_name);
            metrics.record_token(&token, prefs);
            Ok(())
        }
        None => {
            let start = state.buffer().start();
            Err(LexError::Unrecognized {
                text: state.buffer().payload().to_string(),
                row: start.row,
                col: start.col,
            })
        }
    }
}

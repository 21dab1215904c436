//! Scan pipeline result

use crate::lexer::ScanMetrics;
use crate::log_success;
use crate::logging::codes;
use crate::tokens::Token;
use chrono::{DateTime, Utc};
use std::time::Duration;

/// Everything one scan produced: the ordered token stream, the discarded
/// trash, metrics, and timing.
#[derive(Debug, Clone)]
pub struct ScanResult {
    pub tokens: Vec<Token>,
    pub trash: Vec<String>,
    pub metrics: ScanMetrics,
    pub line_count: usize,
    pub duration: Duration,
    pub finished_at: DateTime<Utc>,
}

impl ScanResult {
    /// Total characters discarded to trash
    pub fn trash_chars(&self) -> usize {
        self.metrics.trash_chars
    }

    /// One-line human summary
    pub fn summary(&self) -> String {
        format!(
            "{} tokens from {} lines in {:.2}ms ({} chars trashed, {} backtracks)",
            self.tokens.len(),
            self.line_count,
            self.duration.as_secs_f64() * 1000.0,
            self.metrics.trash_chars,
            self.metrics.backtracks
        )
    }

    /// Log scan completion with metrics
    pub fn log_success(&self, source: &str) {
        log_success!(codes::success::SCAN_COMPLETE, "Scan completed",
            "source" => source,
            "tokens" => self.tokens.len(),
            "lines" => self.line_count,
            "trash_chars" => self.metrics.trash_chars,
            "snapshots" => self.metrics.snapshots_taken,
            "backtracks" => self.metrics.backtracks,
            "duration_ms" => format!("{:.2}", self.duration.as_secs_f64() * 1000.0)
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_summary_mentions_counts() {
        let result = ScanResult {
            tokens: Vec::new(),
            trash: vec!["; ".to_string()],
            metrics: ScanMetrics {
                trash_chars: 2,
                ..ScanMetrics::default()
            },
            line_count: 1,
            duration: Duration::from_millis(5),
            finished_at: Utc::now(),
        };

        let summary = result.summary();
        assert!(summary.contains("0 tokens"));
        assert!(summary.contains("1 lines"));
        assert!(summary.contains("2 chars trashed"));
    }
}

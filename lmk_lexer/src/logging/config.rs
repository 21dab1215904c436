//! Environment-driven logging configuration

use super::events::LogLevel;

/// Environment variable selecting the minimum log level
pub const LOG_LEVEL_VAR: &str = "LMK_LOG_LEVEL";

/// Environment variable selecting structured (JSON line) output
pub const LOG_FORMAT_VAR: &str = "LMK_LOG_FORMAT";

/// Minimum log level from the environment; defaults to Info
pub fn get_min_log_level() -> LogLevel {
    match std::env::var(LOG_LEVEL_VAR).as_deref() {
        Ok("error") | Ok("ERROR") => LogLevel::Error,
        Ok("warn") | Ok("WARN") | Ok("warning") => LogLevel::Warning,
        Ok("debug") | Ok("DEBUG") => LogLevel::Debug,
        _ => LogLevel::Info,
    }
}

/// Whether structured JSON-line logging was requested
pub fn use_structured_logging() -> bool {
    matches!(
        std::env::var(LOG_FORMAT_VAR).as_deref(),
        Ok("json") | Ok("JSON") | Ok("structured")
    )
}

/// One-line summary of the effective logging configuration
pub fn get_config_summary() -> String {
    format!(
        "Logging: min_level={}, structured={}",
        get_min_log_level().as_str(),
        use_structured_logging()
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_summary_mentions_level() {
        let summary = get_config_summary();
        assert!(summary.contains("min_level="));
    }
}

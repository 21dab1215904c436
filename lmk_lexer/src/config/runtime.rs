//! Runtime-configurable preferences
//!
//! Unlike the compile-time limits in [`super::constants`], these can be
//! adjusted per scan without rebuilding.

use crate::catalog::MultiMatchPolicy;

/// Preferences controlling how the scan driver resolves and reports tokens.
#[derive(Debug, Clone)]
pub struct ScanPreferences {
    /// Policy applied when more than one token type matches a payload
    pub resolution_policy: MultiMatchPolicy,

    /// Name of the token type used as the search fallback. Resolved against
    /// the registry once per scan; an unknown name behaves like `None`.
    pub default_type: Option<String>,

    /// Track per-type emission counts in the scan metrics
    pub track_type_usage: bool,

    /// Log per-token statistics after a successful scan
    pub log_token_statistics: bool,
}

impl Default for ScanPreferences {
    fn default() -> Self {
        Self {
            resolution_policy: MultiMatchPolicy::First,
            default_type: None,
            track_type_usage: true,
            log_token_statistics: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_preferences() {
        let prefs = ScanPreferences::default();
        assert_eq!(prefs.resolution_policy, MultiMatchPolicy::First);
        assert!(prefs.default_type.is_none());
        assert!(prefs.track_type_usage);
    }
}

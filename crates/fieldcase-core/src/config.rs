//! Sync engine configuration

use chrono::Duration;
use serde::{Deserialize, Serialize};

/// Default conflict window in milliseconds.
///
/// Near-simultaneous edits within this window are resolved in favour of the
/// field side instead of being reported as conflicts. The boundary is
/// inclusive on the no-conflict side.
pub const DEFAULT_CONFLICT_WINDOW_MS: i64 = 2_000;

/// Tunable parameters for a sync pass.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SyncConfig {
    /// Conflict window in milliseconds (see [`DEFAULT_CONFLICT_WINDOW_MS`])
    pub conflict_window_ms: i64,
}

impl Default for SyncConfig {
    fn default() -> Self {
        Self {
            conflict_window_ms: DEFAULT_CONFLICT_WINDOW_MS,
        }
    }
}

impl SyncConfig {
    /// The conflict window as a `chrono::Duration`.
    #[must_use]
    pub fn conflict_window(&self) -> Duration {
        Duration::milliseconds(self.conflict_window_ms)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_window_is_two_seconds() {
        let config = SyncConfig::default();
        assert_eq!(config.conflict_window(), Duration::seconds(2));
    }
}

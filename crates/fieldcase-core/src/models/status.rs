//! Sync status state machine
//!
//! Each field record carries a lifecycle tag driving which records
//! participate in the next sync pass:
//!
//! ```text
//! new ──(pass completes)──> synced ──(local edit)──> modified
//!                              ^                        │
//!                              └──(pass completes)──────┘
//! ```

use std::fmt;

use serde::{Deserialize, Serialize};

/// Per-field-record sync lifecycle tag
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SyncStatus {
    /// Created locally, never pushed
    New,
    /// Edited locally since the last completed pass
    Modified,
    /// Equal to the paired central record as of the last completed pass
    Synced,
}

impl SyncStatus {
    /// Transition taken when the record's attributes are mutated locally.
    ///
    /// `new` and `modified` records stay pending; only `synced` records
    /// move to `modified`.
    #[must_use]
    pub const fn on_local_edit(self) -> Self {
        match self {
            Self::Synced => Self::Modified,
            other => other,
        }
    }

    /// Transition taken when a pass completes for this record
    /// (pushed, pulled, or conflict resolved).
    #[must_use]
    pub const fn on_pass_complete(self) -> Self {
        Self::Synced
    }

    /// Whether the record has local changes to push.
    #[must_use]
    pub const fn is_pending(self) -> bool {
        matches!(self, Self::New | Self::Modified)
    }
}

impl fmt::Display for SyncStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::New => write!(f, "new"),
            Self::Modified => write!(f, "modified"),
            Self::Synced => write!(f, "synced"),
        }
    }
}

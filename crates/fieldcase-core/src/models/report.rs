//! Sync pass summary

use std::fmt;

use serde::{Deserialize, Serialize};

/// Counts produced by one completed sync pass.
///
/// `created`/`updated` are field-to-central writes, `pulled` covers
/// central-to-field copies and creations. `malformed` and
/// `policy_failures` count records that were skipped without aborting
/// the pass.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SyncReport {
    /// Central records created from new field records
    pub created: usize,
    /// Central records overwritten with newer field attributes
    pub updated: usize,
    /// Field records created or refreshed from the central side
    pub pulled: usize,
    /// Linked pairs resolved through the conflict policy
    pub conflicts: usize,
    /// Records skipped because required fields were missing
    pub malformed: usize,
    /// Records skipped because the conflict policy failed
    pub policy_failures: usize,
}

impl SyncReport {
    /// Whether the pass changed no records (the idempotence check).
    ///
    /// Skip counters are ignored: a pass that only skipped malformed
    /// records mutated nothing.
    #[must_use]
    pub const fn is_noop(&self) -> bool {
        self.created == 0 && self.updated == 0 && self.pulled == 0 && self.conflicts == 0
    }
}

impl fmt::Display for SyncReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "created {}, updated {}, pulled {}, conflicts {}, malformed {}, policy failures {}",
            self.created,
            self.updated,
            self.pulled,
            self.conflicts,
            self.malformed,
            self.policy_failures
        )
    }
}

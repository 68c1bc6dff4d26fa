//! Conflict detection for linked record pairs

use chrono::Duration;

use crate::config::SyncConfig;
use crate::error::Result;
use crate::models::{CentralRecord, FieldRecord, SyncStatus};

/// How a linked pair should be reconciled.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Classification {
    /// Neither side changed since the last completed pass
    Unchanged,
    /// Only the field side changed (or the edits are within the conflict
    /// window); push field attributes to central
    FieldNewer,
    /// The field side is clean but central drifted; pull central
    /// attributes into the field record
    CentralNewer,
    /// Both sides changed and central is newer by more than the conflict
    /// window; the caller's policy must decide
    Conflict,
}

/// Classifies linked pairs by comparing last-modified timestamps against
/// the field record's last synced snapshot.
#[derive(Debug, Clone)]
pub struct ConflictDetector {
    window: Duration,
}

impl ConflictDetector {
    /// Create a detector with the configured conflict window
    #[must_use]
    pub fn new(config: &SyncConfig) -> Self {
        Self {
            window: config.conflict_window(),
        }
    }

    /// Classify one linked pair.
    ///
    /// Returns `Error::MalformedRecord` when either side is missing its
    /// `last_modified`; callers skip and count such records.
    pub fn detect(&self, field: &FieldRecord, central: &CentralRecord) -> Result<Classification> {
        let field_modified = field.checked_last_modified()?;
        let central_modified = central.checked_last_modified()?;

        if field.sync_status == SyncStatus::Synced {
            // nothing to push; central may still have drifted
            return Ok(match field.synced_central_at {
                Some(snapshot) if central_modified > snapshot => Classification::CentralNewer,
                // synced without a snapshot should not occur; leave alone
                _ => Classification::Unchanged,
            });
        }

        if let Some(snapshot) = field.synced_central_at {
            if central_modified <= snapshot {
                // only the field side changed since the last pass
                return Ok(Classification::FieldNewer);
            }
        }

        // both sides changed since the last synced snapshot; a genuine
        // conflict needs central ahead by more than the window, ties and
        // near-ties favour the field side
        let delta = central_modified - field_modified;
        if delta > self.window {
            Ok(Classification::Conflict)
        } else {
            Ok(Classification::FieldNewer)
        }
    }
}

#[cfg(test)]
mod tests {
    use chrono::{DateTime, Utc};
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::models::Attributes;

    fn at(rfc3339: &str) -> DateTime<Utc> {
        rfc3339.parse().unwrap()
    }

    fn pair(
        status: SyncStatus,
        field_modified: &str,
        central_modified: &str,
        snapshot: Option<&str>,
    ) -> (FieldRecord, CentralRecord) {
        let mut field = FieldRecord::new(Attributes::new());
        field.sync_status = status;
        field.link_id = Some("c1".into());
        field.last_modified = Some(at(field_modified));
        field.synced_central_at = snapshot.map(at);

        let mut central = CentralRecord::new(Attributes::new());
        central.id = Some("c1".into());
        central.last_modified = Some(at(central_modified));
        (field, central)
    }

    fn detector() -> ConflictDetector {
        ConflictDetector::new(&SyncConfig::default())
    }

    #[test]
    fn test_synced_pair_with_no_drift_is_unchanged() {
        let (field, central) = pair(
            SyncStatus::Synced,
            "2024-01-01T10:00:00Z",
            "2024-01-01T10:00:00Z",
            Some("2024-01-01T10:00:00Z"),
        );
        assert_eq!(
            detector().detect(&field, &central).unwrap(),
            Classification::Unchanged
        );
    }

    #[test]
    fn test_synced_pair_with_central_drift_pulls() {
        let (field, central) = pair(
            SyncStatus::Synced,
            "2024-01-01T10:00:00Z",
            "2024-01-01T11:00:00Z",
            Some("2024-01-01T10:00:00Z"),
        );
        assert_eq!(
            detector().detect(&field, &central).unwrap(),
            Classification::CentralNewer
        );
    }

    #[test]
    fn test_modified_with_untouched_central_pushes() {
        let (field, central) = pair(
            SyncStatus::Modified,
            "2024-01-01T12:00:00Z",
            "2024-01-01T10:00:00Z",
            Some("2024-01-01T10:00:00Z"),
        );
        assert_eq!(
            detector().detect(&field, &central).unwrap(),
            Classification::FieldNewer
        );
    }

    #[test]
    fn test_both_changed_outside_window_is_conflict() {
        // 5s gap, central newer; outside the 2000ms window
        let (field, central) = pair(
            SyncStatus::Modified,
            "2024-01-01T10:00:00Z",
            "2024-01-01T10:00:05Z",
            None,
        );
        assert_eq!(
            detector().detect(&field, &central).unwrap(),
            Classification::Conflict
        );
    }

    #[test]
    fn test_window_boundary_is_inclusive_on_no_conflict_side() {
        // exactly 2000ms apart, central newer: field still wins
        let (field, central) = pair(
            SyncStatus::Modified,
            "2024-01-01T10:00:00.000Z",
            "2024-01-01T10:00:02.000Z",
            Some("2024-01-01T09:00:00Z"),
        );
        assert_eq!(
            detector().detect(&field, &central).unwrap(),
            Classification::FieldNewer
        );

        // one millisecond past the window it becomes a conflict
        let (field, central) = pair(
            SyncStatus::Modified,
            "2024-01-01T10:00:00.000Z",
            "2024-01-01T10:00:02.001Z",
            Some("2024-01-01T09:00:00Z"),
        );
        assert_eq!(
            detector().detect(&field, &central).unwrap(),
            Classification::Conflict
        );
    }

    #[test]
    fn test_field_ahead_of_central_is_never_a_conflict() {
        let (field, central) = pair(
            SyncStatus::Modified,
            "2024-01-01T12:00:00Z",
            "2024-01-01T10:00:05Z",
            Some("2024-01-01T10:00:00Z"),
        );
        assert_eq!(
            detector().detect(&field, &central).unwrap(),
            Classification::FieldNewer
        );
    }

    #[test]
    fn test_missing_timestamp_is_malformed() {
        let (mut field, central) = pair(
            SyncStatus::Modified,
            "2024-01-01T10:00:00Z",
            "2024-01-01T10:00:00Z",
            None,
        );
        field.last_modified = None;
        assert!(matches!(
            detector().detect(&field, &central),
            Err(crate::Error::MalformedRecord { .. })
        ));
    }
}

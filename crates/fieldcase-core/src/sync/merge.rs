//! Merge resolution for detected conflicts

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::error::Result;
use crate::models::{CentralRecord, FieldRecord};

/// Which side survives a detected conflict.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decision {
    /// Central attributes are overwritten with the field version
    KeepField,
    /// Field attributes are overwritten with the central version
    KeepCentral,
}

/// Supplies a [`Decision`] when the detector reports a conflict.
///
/// Implementations may be interactive (a UI confirmation) or automatic;
/// the engine awaits the decision before continuing the pass. A failure
/// aborts that record only, never the whole pass.
#[async_trait]
pub trait ConflictPolicy: Send + Sync {
    /// Decide which side of the conflicting pair wins
    async fn decide(&self, field: &FieldRecord, central: &CentralRecord) -> Result<Decision>;
}

#[async_trait]
impl<P: ConflictPolicy + ?Sized> ConflictPolicy for Box<P> {
    async fn decide(&self, field: &FieldRecord, central: &CentralRecord) -> Result<Decision> {
        (**self).decide(field, central).await
    }
}

/// Non-interactive policy: the field version always wins.
#[derive(Debug, Clone, Copy, Default)]
pub struct PreferField;

#[async_trait]
impl ConflictPolicy for PreferField {
    async fn decide(&self, _field: &FieldRecord, _central: &CentralRecord) -> Result<Decision> {
        Ok(Decision::KeepField)
    }
}

/// Non-interactive policy: the central version always wins.
#[derive(Debug, Clone, Copy, Default)]
pub struct PreferCentral;

#[async_trait]
impl ConflictPolicy for PreferCentral {
    async fn decide(&self, _field: &FieldRecord, _central: &CentralRecord) -> Result<Decision> {
        Ok(Decision::KeepCentral)
    }
}

/// Apply a policy decision to a conflicting pair.
///
/// Either way the field record ends `synced` and its snapshot timestamp
/// matches the central record, so the next pass is a no-op.
#[must_use]
pub fn resolve_conflict(
    mut field: FieldRecord,
    mut central: CentralRecord,
    decision: Decision,
    now: DateTime<Utc>,
) -> (FieldRecord, CentralRecord) {
    match decision {
        Decision::KeepField => {
            central.attributes = field.attributes.clone();
            central.link_id = Some(field.id.clone());
            central.last_modified = Some(now);
        }
        Decision::KeepCentral => {
            field.attributes = central.attributes.clone();
            field.last_modified = central.last_modified;
        }
    }
    field.link_id = central.id.clone();
    field.sync_status = field.sync_status.on_pass_complete();
    field.synced_central_at = central.last_modified;
    (field, central)
}

//! Sync pass orchestration

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use chrono::Utc;
use tokio::sync::Mutex;

use crate::config::SyncConfig;
use crate::error::{Error, Result};
use crate::models::{CentralRecord, FieldRecord, SyncReport, SyncStatus};
use crate::repo::RecordRepository;
use crate::sync::detect::{Classification, ConflictDetector};
use crate::sync::link::resolve_links;
use crate::sync::merge::{resolve_conflict, ConflictPolicy};

/// Cooperative cancellation flag checked between per-record steps.
///
/// Cancelling aborts the pass before the field snapshot flush, so no
/// field mutation is persisted for a cancelled pass.
#[derive(Debug, Clone, Default)]
pub struct CancelToken(Arc<AtomicBool>);

impl CancelToken {
    /// Create a token in the not-cancelled state
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Request cancellation of the pass holding this token
    pub fn cancel(&self) {
        self.0.store(true, Ordering::Relaxed);
    }

    /// Whether cancellation was requested
    #[must_use]
    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::Relaxed)
    }

    fn ensure_active(&self) -> Result<()> {
        if self.is_cancelled() {
            return Err(Error::Cancelled);
        }
        Ok(())
    }
}

/// Top-level coordinator for one repository pair.
///
/// Repositories and the conflict policy are injected at construction;
/// the engine holds no ambient state. Exactly one pass may be in flight
/// per engine - a concurrent call fails fast with
/// [`Error::SyncInProgress`].
pub struct SyncEngine<F, C, P> {
    field_repo: F,
    central_repo: C,
    policy: P,
    detector: ConflictDetector,
    run_lock: Mutex<()>,
}

impl<F, C, P> SyncEngine<F, C, P>
where
    F: RecordRepository<FieldRecord>,
    C: RecordRepository<CentralRecord>,
    P: ConflictPolicy,
{
    /// Create an engine over the given repositories and policy
    pub fn new(field_repo: F, central_repo: C, policy: P, config: SyncConfig) -> Self {
        Self {
            field_repo,
            central_repo,
            policy,
            detector: ConflictDetector::new(&config),
            run_lock: Mutex::new(()),
        }
    }

    /// Run one complete synchronization pass.
    ///
    /// Idempotent: a second call with no intervening mutation reports all
    /// zeros. Safe to re-run after an aborted pass (at-least-once,
    /// per-record central writes).
    pub async fn sync(&self) -> Result<SyncReport> {
        self.sync_with_cancel(&CancelToken::new()).await
    }

    /// Run one pass, aborting between per-record steps once `cancel` fires.
    pub async fn sync_with_cancel(&self, cancel: &CancelToken) -> Result<SyncReport> {
        let Ok(_guard) = self.run_lock.try_lock() else {
            return Err(Error::SyncInProgress);
        };

        let field_records = self.field_repo.list_all().await?;
        let central_records = self.central_repo.list_all().await?;
        tracing::info!(
            field = field_records.len(),
            central = central_records.len(),
            "starting sync pass"
        );

        let links = resolve_links(field_records, central_records);
        let mut report = SyncReport::default();
        // field mutations are staged and flushed only after every
        // per-record decision has been taken
        let mut staged: Vec<FieldRecord> = Vec::new();

        // phase one: field -> central over linked pairs
        for (field, central) in links.linked {
            cancel.ensure_active()?;
            self.reconcile_pair(field, central, &mut staged, &mut report)
                .await?;
        }

        // phase one, continued: first push for new unlinked field records
        for field in links.unlinked_field {
            cancel.ensure_active()?;
            self.push_new_record(field, &mut staged, &mut report).await?;
        }

        // phase two: central -> field for unclaimed central records
        for central in links.unlinked_central {
            cancel.ensure_active()?;
            match FieldRecord::from_central(&central) {
                Ok(projected) => {
                    staged.push(projected);
                    report.pulled += 1;
                }
                Err(Error::MalformedRecord { id, reason }) => {
                    tracing::warn!(%id, %reason, "skipping malformed central record");
                    report.malformed += 1;
                }
                Err(error) => return Err(error),
            }
        }

        // final phase: persist the staged field snapshot
        cancel.ensure_active()?;
        for record in &staged {
            self.field_repo.put(record).await?;
        }

        tracing::info!(%report, "sync pass complete");
        Ok(report)
    }

    async fn reconcile_pair(
        &self,
        mut field: FieldRecord,
        mut central: CentralRecord,
        staged: &mut Vec<FieldRecord>,
        report: &mut SyncReport,
    ) -> Result<()> {
        let classification = match self.detector.detect(&field, &central) {
            Ok(classification) => classification,
            Err(Error::MalformedRecord { id, reason }) => {
                tracing::warn!(%id, %reason, "skipping malformed record");
                report.malformed += 1;
                return Ok(());
            }
            Err(error) => return Err(error),
        };
        tracing::debug!(id = %field.id, ?classification, "classified linked pair");

        match classification {
            Classification::Unchanged => {}
            Classification::FieldNewer => {
                central.attributes = field.attributes.clone();
                central.link_id = Some(field.id.clone());
                central.last_modified = Some(Utc::now());
                self.central_repo.put(&central).await?;

                // a reciprocal match may reach here without a link yet
                field.link_id = central.id.clone();
                field.sync_status = field.sync_status.on_pass_complete();
                field.synced_central_at = central.last_modified;
                staged.push(field);
                report.updated += 1;
            }
            Classification::CentralNewer => {
                field.link_id = central.id.clone();
                field.attributes = central.attributes.clone();
                field.last_modified = central.last_modified;
                field.synced_central_at = central.last_modified;
                staged.push(field);
                report.pulled += 1;
            }
            Classification::Conflict => {
                let decision = match self.policy.decide(&field, &central).await {
                    Ok(decision) => decision,
                    Err(error) => {
                        tracing::warn!(id = %field.id, %error, "conflict policy failed; record skipped");
                        report.policy_failures += 1;
                        return Ok(());
                    }
                };
                let (resolved_field, resolved_central) =
                    resolve_conflict(field, central, decision, Utc::now());
                self.central_repo.put(&resolved_central).await?;
                staged.push(resolved_field);
                report.conflicts += 1;
            }
        }
        Ok(())
    }

    async fn push_new_record(
        &self,
        mut field: FieldRecord,
        staged: &mut Vec<FieldRecord>,
        report: &mut SyncReport,
    ) -> Result<()> {
        if field.sync_status != SyncStatus::New {
            // a pending record whose link vanished; never guess a pairing
            if field.sync_status.is_pending() {
                tracing::warn!(id = %field.id, "unlinked record is not new; leaving untouched");
            }
            return Ok(());
        }

        if let Err(Error::MalformedRecord { id, reason }) = field.checked_last_modified() {
            tracing::warn!(%id, %reason, "skipping malformed field record");
            report.malformed += 1;
            return Ok(());
        }

        let created = self
            .central_repo
            .add(CentralRecord::from_field(&field))
            .await?;
        field.link_id = created.id.clone();
        field.sync_status = field.sync_status.on_pass_complete();
        field.synced_central_at = created.last_modified;
        staged.push(field);
        report.created += 1;
        Ok(())
    }
}

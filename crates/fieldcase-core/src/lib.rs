//! fieldcase-core - Core library for Fieldcase
//!
//! This crate contains the shared models, record repositories, and the
//! bidirectional synchronization engine used by all Fieldcase interfaces.
//! The engine reconciles a locally-cached "field" collection (edited while
//! disconnected) with the canonical "central" collection without a central
//! transaction log.

pub mod config;
pub mod error;
pub mod models;
pub mod repo;
pub mod sync;

pub use config::SyncConfig;
pub use error::{Error, Result};
pub use models::{
    Attributes, CentralRecord, CentralRecordId, FieldRecord, FieldRecordId, SyncReport, SyncStatus,
};
pub use sync::{CancelToken, ConflictPolicy, Decision, SyncEngine};

//! Domain models for Fieldcase

mod record;
mod report;
mod status;

pub use record::{Attributes, CentralRecord, CentralRecordId, FieldRecord, FieldRecordId};
pub use report::SyncReport;
pub use status::SyncStatus;

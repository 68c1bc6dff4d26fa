//! Bidirectional synchronization engine
//!
//! Reconciles the field and central collections in one deterministic,
//! idempotent pass: link resolution, conflict detection, merge
//! resolution, then the reverse pull for unclaimed central records.

mod detect;
mod engine;
mod link;
mod merge;

pub use detect::{Classification, ConflictDetector};
pub use engine::{CancelToken, SyncEngine};
pub use link::{resolve_links, LinkSet};
pub use merge::{resolve_conflict, ConflictPolicy, Decision, PreferCentral, PreferField};

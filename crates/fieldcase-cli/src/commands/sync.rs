use std::path::Path;

use fieldcase_core::sync::{PreferCentral, PreferField};
use fieldcase_core::{ConflictPolicy, SyncConfig, SyncEngine};

use crate::cli::PreferSide;
use crate::commands::common::{open_central_repo, open_field_repo};
use crate::error::CliError;
use crate::policy::PromptPolicy;

pub async fn run_sync(
    prefer: PreferSide,
    interactive: bool,
    as_json: bool,
    field_db: &Path,
    central_db: &Path,
) -> Result<(), CliError> {
    let policy: Box<dyn ConflictPolicy> = if interactive {
        Box::new(PromptPolicy)
    } else {
        match prefer {
            PreferSide::Field => Box::new(PreferField),
            PreferSide::Central => Box::new(PreferCentral),
        }
    };

    tracing::debug!(
        field_db = %field_db.display(),
        central_db = %central_db.display(),
        "running sync pass"
    );
    let engine = SyncEngine::new(
        open_field_repo(field_db),
        open_central_repo(central_db),
        policy,
        SyncConfig::default(),
    );
    let report = engine.sync().await?;

    if as_json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        println!("Sync complete: {report}");
    }
    Ok(())
}

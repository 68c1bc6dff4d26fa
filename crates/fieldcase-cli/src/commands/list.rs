use std::path::Path;

use chrono::{DateTime, Utc};
use fieldcase_core::repo::RecordRepository;
use fieldcase_core::{Attributes, SyncStatus};
use serde::Serialize;

use crate::commands::common::{format_record_line, open_field_repo};
use crate::error::CliError;

#[derive(Debug, Serialize)]
struct FieldRecordListItem {
    id: String,
    sync_status: SyncStatus,
    link_id: Option<String>,
    attributes: Attributes,
    last_modified: Option<DateTime<Utc>>,
}

pub async fn run_list(as_json: bool, field_db: &Path) -> Result<(), CliError> {
    let repo = open_field_repo(field_db);
    let records = repo.list_all().await?;

    if as_json {
        let items: Vec<FieldRecordListItem> = records
            .iter()
            .map(|record| FieldRecordListItem {
                id: record.id.to_string(),
                sync_status: record.sync_status,
                link_id: record.link_id.as_ref().map(ToString::to_string),
                attributes: record.attributes.clone(),
                last_modified: record.last_modified,
            })
            .collect();
        println!("{}", serde_json::to_string_pretty(&items)?);
        return Ok(());
    }

    if records.is_empty() {
        println!("No field records.");
        return Ok(());
    }
    for record in &records {
        println!("{}", format_record_line(record));
    }
    Ok(())
}

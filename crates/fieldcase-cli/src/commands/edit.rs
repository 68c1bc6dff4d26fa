use std::path::Path;

use fieldcase_core::repo::RecordRepository;

use crate::commands::common::{open_field_repo, parse_attribute_pair};
use crate::error::CliError;

pub async fn run_edit(id: &str, pairs: &[String], field_db: &Path) -> Result<(), CliError> {
    let repo = open_field_repo(field_db);
    let mut record = repo
        .get_by_id(id)
        .await?
        .ok_or_else(|| CliError::RecordNotFound(id.to_string()))?;

    for raw in pairs {
        let (key, value) = parse_attribute_pair(raw)?;
        record.set_attribute(key, value);
    }
    repo.put(&record).await?;

    println!("{} [{}]", record.id, record.sync_status);
    Ok(())
}

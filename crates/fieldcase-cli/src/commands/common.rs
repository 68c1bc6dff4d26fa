use std::path::Path;

use fieldcase_core::repo::JsonFileRepository;
use fieldcase_core::{CentralRecord, FieldRecord};
use serde_json::Value;

use crate::error::CliError;

pub fn open_field_repo(path: &Path) -> JsonFileRepository<FieldRecord> {
    JsonFileRepository::new(path)
}

pub fn open_central_repo(path: &Path) -> JsonFileRepository<CentralRecord> {
    JsonFileRepository::new(path)
}

/// Parse a `KEY=VALUE` attribute pair.
///
/// Values that parse as JSON (numbers, booleans, null) keep their type;
/// everything else is stored as a string.
pub fn parse_attribute_pair(raw: &str) -> Result<(String, Value), CliError> {
    let (key, value) = raw
        .split_once('=')
        .ok_or_else(|| CliError::InvalidAttributePair(raw.to_string()))?;
    let key = key.trim();
    if key.is_empty() {
        return Err(CliError::EmptyAttributeKey);
    }
    let value = serde_json::from_str(value).unwrap_or_else(|_| Value::from(value));
    Ok((key.to_string(), value))
}

/// One-line human-readable summary of a field record.
pub fn format_record_line(record: &FieldRecord) -> String {
    let name = record
        .attributes
        .get("name")
        .and_then(Value::as_str)
        .unwrap_or("<unnamed>");
    let link = record
        .link_id
        .as_ref()
        .map_or_else(|| "-".to_string(), ToString::to_string);
    let modified = record
        .last_modified
        .map_or_else(|| "-".to_string(), |at| at.to_rfc3339());
    format!(
        "{}  [{}]  {}  link:{}  modified:{}",
        record.id, record.sync_status, name, link, modified
    )
}

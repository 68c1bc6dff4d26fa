use std::path::Path;

use fieldcase_core::repo::RecordRepository;
use fieldcase_core::{Attributes, FieldRecord};

use crate::commands::common::{open_field_repo, parse_attribute_pair};
use crate::error::CliError;

pub async fn run_add(name: &str, pairs: &[String], field_db: &Path) -> Result<(), CliError> {
    let mut attributes = Attributes::new();
    attributes.set("name", name);
    for raw in pairs {
        let (key, value) = parse_attribute_pair(raw)?;
        attributes.set(key, value);
    }

    let repo = open_field_repo(field_db);
    let record = repo.add(FieldRecord::new(attributes)).await?;
    println!("{}", record.id);
    Ok(())
}

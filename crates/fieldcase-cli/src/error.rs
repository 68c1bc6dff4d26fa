use std::io;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum CliError {
    #[error(transparent)]
    Core(#[from] fieldcase_core::Error),
    #[error(transparent)]
    Io(#[from] io::Error),
    #[error(transparent)]
    Serialization(#[from] serde_json::Error),
    #[error("Invalid attribute pair '{0}', expected KEY=VALUE")]
    InvalidAttributePair(String),
    #[error("Attribute key cannot be empty")]
    EmptyAttributeKey,
    #[error("Field record not found: {0}")]
    RecordNotFound(String),
    #[error("Invalid log filter directive: {0}")]
    InvalidLogDirective(String),
}

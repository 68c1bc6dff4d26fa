//! Interactive conflict policy for terminal use
//!
//! Replaces the blocking confirmation dialog of a UI front-end with an
//! async prompt on stdin; the engine awaits the decision before the pass
//! continues.

use std::io::Write;

use async_trait::async_trait;
use fieldcase_core::{CentralRecord, ConflictPolicy, Decision, Error, FieldRecord};

/// Prompts on stdin for each detected conflict.
#[derive(Debug, Clone, Copy, Default)]
pub struct PromptPolicy;

#[async_trait]
impl ConflictPolicy for PromptPolicy {
    async fn decide(
        &self,
        field: &FieldRecord,
        central: &CentralRecord,
    ) -> fieldcase_core::Result<Decision> {
        println!("Conflict on record {}:", field.id);
        println!("  field   version: {}", summarize(&field.attributes));
        println!("  central version: {}", summarize(&central.attributes));

        let id = field.id.to_string();
        tokio::task::spawn_blocking(prompt_for_side)
            .await
            .map_err(|error| Error::Policy {
                id: id.clone(),
                reason: format!("prompt task failed: {error}"),
            })?
            .map_err(|reason| Error::Policy { id, reason })
    }
}

fn summarize(attributes: &fieldcase_core::Attributes) -> String {
    serde_json::to_string(attributes).unwrap_or_else(|_| "<unprintable>".to_string())
}

fn prompt_for_side() -> Result<Decision, String> {
    loop {
        print!("Keep [f]ield or [c]entral version? ");
        std::io::stdout()
            .flush()
            .map_err(|error| error.to_string())?;

        let mut line = String::new();
        let read = std::io::stdin()
            .read_line(&mut line)
            .map_err(|error| error.to_string())?;
        if read == 0 {
            return Err("stdin closed before a decision was made".to_string());
        }
        match line.trim().to_lowercase().as_str() {
            "f" | "field" => return Ok(Decision::KeepField),
            "c" | "central" => return Ok(Decision::KeepCentral),
            _ => println!("Please answer 'f' or 'c'."),
        }
    }
}

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};

#[derive(Parser)]
#[command(name = "fieldcase")]
#[command(about = "Offline case management - reconcile field records with the central database")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Path to the field (offline) collection file
    #[arg(long, global = true, value_name = "PATH", default_value = "field.json")]
    pub field_db: PathBuf,

    /// Path to the central collection file
    #[arg(long, global = true, value_name = "PATH", default_value = "central.json")]
    pub central_db: PathBuf,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Create a field record
    #[command(alias = "new")]
    Add {
        /// Case name
        name: String,
        /// Additional attributes as KEY=VALUE pairs
        #[arg(long = "set", value_name = "KEY=VALUE")]
        set: Vec<String>,
    },
    /// Edit a field record's attributes
    Edit {
        /// Field record ID
        id: String,
        /// Attributes to change as KEY=VALUE pairs
        #[arg(long = "set", value_name = "KEY=VALUE", required = true)]
        set: Vec<String>,
    },
    /// List field records with their sync status
    List {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Run one synchronization pass against the central collection
    Sync {
        /// Side that wins detected conflicts
        #[arg(long, value_enum, default_value_t = PreferSide::Field, conflicts_with = "interactive")]
        prefer: PreferSide,
        /// Ask on each conflict instead of applying --prefer
        #[arg(long)]
        interactive: bool,
        /// Output the report as JSON
        #[arg(long)]
        json: bool,
    },
}

#[derive(Clone, Copy, Debug, Eq, PartialEq, ValueEnum)]
pub enum PreferSide {
    /// Keep the field version on conflict
    Field,
    /// Keep the central version on conflict
    Central,
}

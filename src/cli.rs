use clap::{Parser, Subcommand};
use std::path::PathBuf;
use thiserror::Error;

use crate::host::{FieldFile, HostBinding, HostError};
use crate::store::TagStore;

#[derive(Parser)]
#[command(name = "multitag")]
#[command(about = "Edit a list of tags stored as one comma-separated field")]
#[command(version)]
pub struct Cli {
    /// Custom config file path
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Field file holding the tags (overrides field_path from the config)
    #[arg(short, long)]
    pub field: Option<PathBuf>,

    /// Use development mode (uses separate dev config/data)
    #[arg(long)]
    pub dev: bool,

    /// Theme for this run (a preset or one defined in the config)
    #[arg(long)]
    pub theme: Option<String>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Launch the interactive tag editor (default if no subcommand)
    Edit,
    /// Print the stored value
    Show {
        /// Print the tags as a JSON array
        #[arg(long)]
        json: bool,
    },
    /// Append tags
    Add {
        #[arg(required = true)]
        tags: Vec<String>,
    },
    /// Remove the first tag with this text
    Remove {
        tag: String,
    },
}

#[derive(Debug, Error)]
pub enum CliError {
    #[error("Field error: {0}")]
    HostError(#[from] HostError),
    #[error("Failed to encode JSON: {0}")]
    JsonError(#[from] serde_json::Error),
}

fn load_store(field: &FieldFile) -> Result<TagStore, CliError> {
    let value = field.initial_value()?;
    Ok(TagStore::parse(value.as_deref()))
}

/// Handle the show command
pub fn handle_show(json: bool, field: &FieldFile) -> Result<(), CliError> {
    let store = load_store(field)?;
    if json {
        println!("{}", serde_json::to_string(&store.texts())?);
    } else {
        println!("{}", store.serialize());
    }
    Ok(())
}

/// Handle the add command
pub fn handle_add(tags: Vec<String>, field: &mut FieldFile) -> Result<(), CliError> {
    let mut store = load_store(field)?;
    for tag in &tags {
        if store.add(tag).is_none() {
            eprintln!("Ignoring empty tag");
        }
    }

    let value = store.serialize();
    field.write_value(&value)?;
    tracing::info!(path = %field.path().display(), %value, "tags added from command line");
    println!("{}", value);
    Ok(())
}

/// Handle the remove command
pub fn handle_remove(tag: String, field: &mut FieldFile) -> Result<(), CliError> {
    let mut store = load_store(field)?;
    if store.remove_value(&tag).is_none() {
        println!("Tag not found: {}", tag);
        return Ok(());
    }

    let value = store.serialize();
    field.write_value(&value)?;
    tracing::info!(path = %field.path().display(), %value, "tag removed from command line");
    println!("{}", value);
    Ok(())
}

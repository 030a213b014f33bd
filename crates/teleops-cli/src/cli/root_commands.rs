use clap::{Args, Subcommand};

use crate::cli::subcommands::{DraftCommands, VersionCommands};

/// Top-level command tree.
#[derive(Clone, Debug, Subcommand)]
pub enum Commands {
    /// Design versions of a project.
    Versions {
        #[command(subcommand)]
        action: VersionCommands,
    },
    /// Edit the working draft of a project design.
    Draft {
        #[command(subcommand)]
        action: DraftCommands,
    },
    /// Suggest a resource type for a permission.
    Classify(ClassifyArgs),
    /// List the resource-type registry.
    #[command(name = "resource-types")]
    ResourceTypes(SearchArgs),
    /// Search the equipment catalog.
    Equipment(EquipmentArgs),
    /// Dump JSON schema for a registered type.
    Schema(SchemaArgs),
}

/// Arguments for `teleops classify`.
#[derive(Clone, Debug, Args)]
pub struct ClassifyArgs {
    /// Permission name
    #[arg(long, default_value = "")]
    pub name: String,
    /// Permission code
    #[arg(long, default_value = "")]
    pub code: String,
    /// Permission category
    #[arg(long, default_value = "")]
    pub category: String,
    /// Resource type already chosen in the form; suppresses auto-selection.
    #[arg(long)]
    pub current: Option<String>,
}

/// Arguments for commands that take an optional search term.
#[derive(Clone, Debug, Args)]
pub struct SearchArgs {
    #[arg(long, default_value = "")]
    pub search: String,
}

/// Arguments for `teleops equipment`.
#[derive(Clone, Debug, Args)]
pub struct EquipmentArgs {
    #[arg(long, default_value = "")]
    pub search: String,
    /// List distinct categories instead of entries.
    #[arg(long)]
    pub categories: bool,
}

/// Arguments for `teleops schema`.
#[derive(Clone, Debug, Args)]
pub struct SchemaArgs {
    /// One of: design-version, design-item, resource-type, equipment-entry,
    /// permission-text
    pub type_name: String,
}

use clap::{Args, Subcommand};

/// Draft editing commands.
#[derive(Clone, Debug, Subcommand)]
pub enum DraftCommands {
    /// Show the draft (or latest published version) grouped by category.
    Show,
    /// Start a new draft, blank or copied from a published version.
    New {
        /// Published version id to copy.
        #[arg(long, conflicts_with = "latest")]
        from: Option<String>,
        /// Copy the latest published version.
        #[arg(long)]
        latest: bool,
    },
    /// Add an equipment row.
    Add(AddItemArgs),
    /// Add a category header.
    #[command(name = "add-category")]
    AddCategory { name: String },
    /// Move a row. Positions are zero-based indices, or row ids with `--ids`.
    Move {
        from: String,
        to: String,
        #[arg(long)]
        ids: bool,
    },
    /// Remove a row by id.
    Remove { id: String },
    /// Save the draft to the server.
    Save,
    /// Restore the saved server draft.
    Revert,
    /// Drop local edits (requires --yes).
    Discard,
    /// Delete the saved server draft (requires --yes).
    Delete,
    /// Publish the draft as a new version.
    Publish,
    /// Show a published version grouped by category.
    Preview { version_id: String },
}

/// Arguments for `teleops draft add`.
#[derive(Clone, Debug, Args)]
pub struct AddItemArgs {
    pub name: String,
    #[arg(long)]
    pub category: Option<String>,
    #[arg(long)]
    pub model: Option<String>,
    #[arg(long)]
    pub manufacturer: Option<String>,
    #[arg(long)]
    pub attributes: Option<String>,
    #[arg(long)]
    pub remarks: Option<String>,
}

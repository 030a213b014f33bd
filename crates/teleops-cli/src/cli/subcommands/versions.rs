use clap::Subcommand;

/// Design version commands.
#[derive(Clone, Debug, Subcommand)]
pub enum VersionCommands {
    /// List all versions of the project.
    List,
}

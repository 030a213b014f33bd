use crate::cli::GlobalFlags;
use crate::cli::root_commands::Commands;
use crate::commands;
use crate::context::AppContext;

/// Dispatch a parsed command to the corresponding handler module.
pub async fn dispatch(command: Commands, ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    match command {
        Commands::Versions { action } => commands::versions::handle(&action, ctx, flags).await,
        Commands::Draft { action } => commands::draft::handle(&action, ctx, flags).await,
        Commands::ResourceTypes(args) => commands::resource_types::handle(&args, ctx, flags).await,
        Commands::Equipment(args) => commands::equipment::handle(&args, ctx, flags).await,
        Commands::Classify(_) | Commands::Schema(_) => {
            unreachable!("classify/schema are pre-dispatched in main")
        }
    }
}

use teleops_api::resource_types::filter_fallback;

use crate::cli::GlobalFlags;
use crate::cli::root_commands::SearchArgs;
use crate::context::AppContext;
use crate::output::output;

/// Handle `teleops resource-types`.
pub async fn handle(args: &SearchArgs, ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    let types = match &ctx.client {
        Some(client) => client.resource_types_or_fallback(&args.search).await,
        None => {
            tracing::warn!("api not configured, listing built-in resource types");
            filter_fallback(&args.search)
        }
    };
    output(&types, flags.format)
}

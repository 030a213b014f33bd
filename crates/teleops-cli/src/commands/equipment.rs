use crate::cli::GlobalFlags;
use crate::cli::root_commands::EquipmentArgs;
use crate::context::AppContext;
use crate::output::output;

/// Handle `teleops equipment`.
///
/// With `--project`, a failed catalog search falls back to rows of the
/// project's draft and latest published version.
pub async fn handle(args: &EquipmentArgs, ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    let client = ctx.require_client()?;

    if args.categories {
        return output(&client.equipment_categories().await?, flags.format);
    }

    let entries = if ctx.project_id.is_some() {
        let mut session = ctx.design_session().await?;
        session.suggest_equipment(&args.search).await
    } else {
        client.search_equipment(&args.search).await?
    };
    output(&entries, flags.format)
}

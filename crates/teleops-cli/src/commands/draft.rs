use anyhow::Context;
use serde::Serialize;
use teleops_design::{
    Controls, DesignError, DesignSession, DesignView, DraftSeed, NewItem, Notice, VersionBackend,
};

use crate::cli::GlobalFlags;
use crate::cli::subcommands::{AddItemArgs, DraftCommands};
use crate::context::AppContext;
use crate::output::output;

/// Session state reported after every draft command.
#[derive(Debug, Serialize)]
struct DraftResponse<T: Serialize> {
    #[serde(skip_serializing_if = "Option::is_none")]
    result: Option<T>,
    dirty: bool,
    fingerprint: String,
    server_id: Option<String>,
    controls: Controls,
    view: DesignView,
    notices: Vec<Notice>,
}

/// Handle `teleops draft`.
pub async fn handle(
    action: &DraftCommands,
    ctx: &AppContext,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    let mut session = ctx.design_session().await?;

    match action {
        DraftCommands::Show => respond::<_, ()>(&mut session, None, flags),
        DraftCommands::New { from, latest } => {
            let seed = seed_for(from.as_deref(), *latest);
            let draft = session
                .create_draft(&seed)
                .with_context(|| format!("cannot start a draft from {seed:?}: source version not found"))?;
            respond(&mut session, Some(draft), flags)
        }
        DraftCommands::Add(args) => {
            let item = session.add_item(new_item(args))?;
            respond(&mut session, Some(item), flags)
        }
        DraftCommands::AddCategory { name } => {
            let header = session.add_category(name)?;
            respond(&mut session, Some(header), flags)
        }
        DraftCommands::Move { from, to, ids } => {
            if *ids {
                session.move_by_id(from, to).await?;
            } else {
                let (from, to) = parse_indices(from, to)?;
                session.move_item(from, to).await?;
            }
            respond::<_, ()>(&mut session, None, flags)
        }
        DraftCommands::Remove { id } => {
            let removed = session.remove_item(id)?;
            respond(&mut session, Some(removed), flags)
        }
        DraftCommands::Save => {
            let saved = session.save().await?;
            respond(&mut session, Some(saved), flags)
        }
        DraftCommands::Revert => {
            session.revert()?;
            respond::<_, ()>(&mut session, None, flags)
        }
        DraftCommands::Discard => {
            session.discard(flags.yes).map_err(confirm_hint)?;
            respond::<_, ()>(&mut session, None, flags)
        }
        DraftCommands::Delete => {
            session.delete_draft(flags.yes).await.map_err(confirm_hint)?;
            respond::<_, ()>(&mut session, None, flags)
        }
        DraftCommands::Publish => {
            let published = session.publish().await?;
            respond(&mut session, Some(published), flags)
        }
        DraftCommands::Preview { version_id } => {
            output(&session.preview(version_id)?, flags.format)
        }
    }
}

fn respond<B: VersionBackend, T: Serialize>(
    session: &mut DesignSession<B>,
    result: Option<T>,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    let response = DraftResponse {
        result,
        dirty: session.is_dirty(),
        fingerprint: session.current_fingerprint().as_str().to_string(),
        server_id: session
            .current_draft()
            .and_then(|d| d.server_id.clone()),
        controls: session.controls(),
        view: session.view(),
        notices: session.take_notices(),
    };
    output(&response, flags.format)
}

fn seed_for(from: Option<&str>, latest: bool) -> DraftSeed {
    match from {
        Some(version_id) => DraftSeed::ClonePublished(version_id.to_string()),
        None if latest => DraftSeed::EditLatestPublished,
        None => DraftSeed::Blank,
    }
}

fn new_item(args: &AddItemArgs) -> NewItem {
    NewItem {
        name: args.name.clone(),
        category: args.category.clone(),
        model: args.model.clone(),
        manufacturer: args.manufacturer.clone(),
        attributes: args.attributes.clone(),
        remarks: args.remarks.clone(),
    }
}

fn parse_indices(from: &str, to: &str) -> anyhow::Result<(usize, usize)> {
    let from = from
        .parse()
        .with_context(|| format!("invalid source index '{from}' (use --ids to move by row id)"))?;
    let to = to
        .parse()
        .with_context(|| format!("invalid target index '{to}' (use --ids to move by row id)"))?;
    Ok((from, to))
}

fn confirm_hint(error: DesignError) -> anyhow::Error {
    match error {
        DesignError::ConfirmationRequired(action) => {
            anyhow::anyhow!("refusing to {action} without confirmation; pass --yes")
        }
        other => other.into(),
    }
}

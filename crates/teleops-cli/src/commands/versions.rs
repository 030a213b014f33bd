use serde::Serialize;
use teleops_core::entities::DesignVersion;
use teleops_core::enums::VersionStatus;

use crate::cli::GlobalFlags;
use crate::cli::subcommands::VersionCommands;
use crate::context::AppContext;
use crate::output::output;

/// One line of `versions list`: the version without its rows.
#[derive(Debug, Serialize)]
struct VersionSummary {
    id: String,
    version_number: u32,
    status: VersionStatus,
    items: usize,
    created_at: String,
    published_at: Option<String>,
}

impl From<&DesignVersion> for VersionSummary {
    fn from(version: &DesignVersion) -> Self {
        Self {
            id: version.id.clone(),
            version_number: version.version_number,
            status: version.status,
            items: version.items.len(),
            created_at: version.created_at.to_rfc3339(),
            published_at: version.published_at.map(|t| t.to_rfc3339()),
        }
    }
}

/// Handle `teleops versions`.
pub async fn handle(
    action: &VersionCommands,
    ctx: &AppContext,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    match action {
        VersionCommands::List => {
            let client = ctx.require_client()?;
            let project_id = ctx.require_project()?;
            let mut versions = client.list_versions(project_id).await?;
            versions.sort_by_key(|v| v.version_number);
            output(&summarize(&versions), flags.format)
        }
    }
}

fn summarize(versions: &[DesignVersion]) -> Vec<VersionSummary> {
    versions.iter().map(VersionSummary::from).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use teleops_core::entities::DesignItem;

    #[test]
    fn summary_counts_rows_and_keeps_status() {
        let version: DesignVersion = serde_json::from_value(serde_json::json!({
            "id": "dv-3",
            "project_id": "prj-1",
            "version_number": 3,
            "status": "published",
            "created_at": "2026-01-05T10:00:00Z",
            "published_at": "2026-01-06T10:00:00Z",
        }))
        .unwrap();
        let mut with_rows = version.clone();
        with_rows.items = vec![DesignItem::header("h1", "Antenna", 0)];

        let rows = summarize(&[version, with_rows]);
        assert_eq!(rows[0].items, 0);
        assert_eq!(rows[1].items, 1);
        assert_eq!(rows[0].status, VersionStatus::Published);
        assert!(rows[0].published_at.as_deref().unwrap().starts_with("2026-01-06"));
    }
}

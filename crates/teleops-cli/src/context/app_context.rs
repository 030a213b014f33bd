use anyhow::Context;
use teleops_api::ApiClient;
use teleops_config::TeleopsConfig;
use teleops_design::{DesignSession, DraftCache};

use crate::bootstrap;
use crate::cli::GlobalFlags;

/// Shared application resources initialized once at startup.
pub struct AppContext {
    pub config: TeleopsConfig,
    /// `None` when the `api` section is not configured.
    pub client: Option<ApiClient>,
    pub project_id: Option<String>,
}

impl AppContext {
    /// Build the backend client if the API section is configured.
    pub fn init(config: TeleopsConfig, flags: &GlobalFlags) -> anyhow::Result<Self> {
        let client = if config.api.is_configured() {
            Some(ApiClient::new(&config.api).context("failed to build API client")?)
        } else {
            tracing::debug!("api section not configured; backend calls unavailable");
            None
        };

        Ok(Self {
            config,
            client,
            project_id: flags.project.clone(),
        })
    }

    /// The backend client, or an error explaining how to configure one.
    pub fn require_client(&self) -> anyhow::Result<&ApiClient> {
        self.config.require_api()?;
        self.client
            .as_ref()
            .context("API client is not initialized")
    }

    /// The `--project` id, required by version and draft commands.
    pub fn require_project(&self) -> anyhow::Result<&str> {
        self.project_id
            .as_deref()
            .context("no project selected; pass --project <id>")
    }

    pub fn draft_cache(&self) -> DraftCache {
        bootstrap::draft_cache(&self.config)
    }

    /// A design session for the selected project, loaded from cache and server.
    pub async fn design_session(&self) -> anyhow::Result<DesignSession<ApiClient>> {
        let client = self.require_client()?.clone();
        let project_id = self.require_project()?.to_string();
        let mut session = DesignSession::new(client, self.draft_cache(), Some(project_id));
        session
            .load()
            .await
            .context("failed to load design versions")?;
        Ok(session)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::OutputFormat;

    fn flags(project: Option<&str>) -> GlobalFlags {
        GlobalFlags {
            format: OutputFormat::Json,
            quiet: false,
            verbose: false,
            project: project.map(Into::into),
            yes: false,
        }
    }

    #[test]
    fn unconfigured_api_has_no_client() {
        let ctx = AppContext::init(TeleopsConfig::default(), &flags(None)).unwrap();
        assert!(ctx.client.is_none());
        let err = ctx.require_client().unwrap_err();
        assert!(err.to_string().contains("api"));
        assert!(ctx.require_project().is_err());
    }

    #[test]
    fn configured_api_builds_client() {
        let mut config = TeleopsConfig::default();
        config.api.base_url = "https://ops.example.net/api".into();
        config.api.token = "tok".into();
        let ctx = AppContext::init(config, &flags(Some("prj-1"))).unwrap();
        assert!(ctx.require_client().is_ok());
        assert_eq!(ctx.require_project().unwrap(), "prj-1");
    }
}

use teleops_config::TeleopsConfig;

/// Emit warnings for likely mistyped env var keys that silently fell back to defaults.
pub fn warn_unconfigured(config: &TeleopsConfig) {
    for warning in collect_unconfigured_warnings(config, std::env::vars()) {
        tracing::warn!("{warning}");
    }
}

fn collect_unconfigured_warnings<I>(config: &TeleopsConfig, env: I) -> Vec<String>
where
    I: IntoIterator<Item = (String, String)>,
{
    let env_keys = env.into_iter().map(|(key, _)| key).collect::<Vec<_>>();

    let mut warnings = Vec::new();

    if !config.api.is_configured() && has_env_prefix(&env_keys, "TELEOPS_API") {
        warnings.push(
            "API config appears default while TELEOPS_API* env vars exist. Use double underscores (example: TELEOPS_API__BASE_URL)."
                .to_string(),
        );
    }

    if config.design.draft_cache_dir.is_empty() && has_env_prefix(&env_keys, "TELEOPS_DESIGN") {
        warnings.push(
            "Design config appears default while TELEOPS_DESIGN* env vars exist. Use double underscores (example: TELEOPS_DESIGN__DRAFT_CACHE_DIR)."
                .to_string(),
        );
    }

    warnings
}

fn has_env_prefix(keys: &[String], prefix: &str) -> bool {
    keys.iter()
        .any(|key| key.starts_with(prefix) && !key.starts_with(&format!("{prefix}__")))
}

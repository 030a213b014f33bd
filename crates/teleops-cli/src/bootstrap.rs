use std::path::Path;

use anyhow::Context;
use teleops_classify::KeywordTable;
use teleops_config::TeleopsConfig;
use teleops_design::DraftCache;

/// Load layered configuration, including a `.env` in the working directory.
pub fn load_config() -> anyhow::Result<TeleopsConfig> {
    TeleopsConfig::load_with_dotenv().context("failed to load teleops configuration")
}

/// The keyword table named by `classifier.keyword_table`, or the built-in one.
pub fn keyword_table(config: &TeleopsConfig) -> anyhow::Result<KeywordTable> {
    let path = config.classifier.keyword_table.trim();
    if path.is_empty() {
        return Ok(KeywordTable::builtin());
    }
    KeywordTable::from_path(Path::new(path))
        .with_context(|| format!("failed to load keyword table from {path}"))
}

/// Local draft cache in the configured directory.
///
/// Falls back to an in-memory session (no cache) when no directory can be
/// resolved or created.
pub fn draft_cache(config: &TeleopsConfig) -> DraftCache {
    let Some(dir) = config.design.resolved_cache_dir() else {
        tracing::warn!("no data directory available; local drafts will not be kept");
        return DraftCache::disabled();
    };
    match DraftCache::new(dir) {
        Ok(cache) => cache,
        Err(error) => {
            tracing::warn!(%error, "draft cache unavailable; local drafts will not be kept");
            DraftCache::disabled()
        }
    }
}

//! Design editor configuration.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct DesignConfig {
    /// Directory holding unsynced local drafts. Empty means the user data dir.
    #[serde(default)]
    pub draft_cache_dir: String,
}

impl DesignConfig {
    /// Resolve the draft cache directory.
    ///
    /// Falls back to `<data_dir>/teleops/drafts`, or `None` when neither is
    /// available (local drafts are then kept in memory only).
    pub fn resolved_cache_dir(&self) -> Option<PathBuf> {
        if !self.draft_cache_dir.is_empty() {
            return Some(PathBuf::from(&self.draft_cache_dir));
        }
        dirs::data_dir().map(|p| p.join("teleops").join("drafts"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn explicit_cache_dir_wins() {
        let config = DesignConfig {
            draft_cache_dir: "/tmp/teleops-drafts".into(),
        };
        assert_eq!(
            config.resolved_cache_dir(),
            Some(PathBuf::from("/tmp/teleops-drafts"))
        );
    }
}

//! Local cache of unsynced drafts, one JSON file per project.

use std::path::{Path, PathBuf};

use crate::draft::Draft;
use crate::error::DesignError;

/// Persists drafts that have not been saved to the server yet.
///
/// A disabled cache keeps nothing; every lookup misses.
#[derive(Debug, Clone)]
pub struct DraftCache {
    dir: Option<PathBuf>,
}

impl DraftCache {
    /// Cache rooted at `dir`, created if missing.
    ///
    /// # Errors
    ///
    /// Returns [`DesignError::Cache`] if the directory cannot be created.
    pub fn new(dir: PathBuf) -> Result<Self, DesignError> {
        std::fs::create_dir_all(&dir).map_err(|e| cache_error(&dir, &e))?;
        Ok(Self { dir: Some(dir) })
    }

    #[must_use]
    pub const fn disabled() -> Self {
        Self { dir: None }
    }

    #[must_use]
    pub const fn is_enabled(&self) -> bool {
        self.dir.is_some()
    }

    fn path_for(&self, project_id: &str) -> Option<PathBuf> {
        let file: String = project_id
            .chars()
            .map(|c| if c.is_ascii_alphanumeric() || c == '-' || c == '_' { c } else { '_' })
            .collect();
        self.dir.as_ref().map(|dir| dir.join(format!("{file}.json")))
    }

    /// The cached draft of `project_id`, if any.
    ///
    /// # Errors
    ///
    /// Returns [`DesignError::Cache`] if the file exists but cannot be read or
    /// parsed.
    pub fn load(&self, project_id: &str) -> Result<Option<Draft>, DesignError> {
        let Some(path) = self.path_for(project_id) else {
            return Ok(None);
        };
        if !path.exists() {
            return Ok(None);
        }
        let bytes = std::fs::read(&path).map_err(|e| cache_error(&path, &e))?;
        let draft = serde_json::from_slice(&bytes).map_err(|e| cache_error(&path, &e))?;
        Ok(Some(draft))
    }

    /// Write `draft`, replacing any previous copy atomically.
    ///
    /// # Errors
    ///
    /// Returns [`DesignError::Cache`] on serialization or I/O failure.
    pub fn store(&self, draft: &Draft) -> Result<(), DesignError> {
        let Some(path) = self.path_for(&draft.project_id) else {
            return Ok(());
        };
        let json = serde_json::to_vec_pretty(draft).map_err(|e| cache_error(&path, &e))?;
        let tmp = path.with_extension("json.tmp");
        std::fs::write(&tmp, json).map_err(|e| cache_error(&tmp, &e))?;
        std::fs::rename(&tmp, &path).map_err(|e| cache_error(&path, &e))?;
        tracing::debug!(path = %path.display(), "cached local draft");
        Ok(())
    }

    /// Drop the cached draft of `project_id`. Missing files are fine.
    ///
    /// # Errors
    ///
    /// Returns [`DesignError::Cache`] if an existing file cannot be removed.
    pub fn clear(&self, project_id: &str) -> Result<(), DesignError> {
        let Some(path) = self.path_for(project_id) else {
            return Ok(());
        };
        match std::fs::remove_file(&path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(cache_error(&path, &e)),
        }
    }
}

fn cache_error(path: &Path, error: &dyn std::fmt::Display) -> DesignError {
    DesignError::Cache {
        path: path.display().to_string(),
        reason: error.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use teleops_core::entities::DesignItem;

    #[test]
    fn store_load_clear() {
        let dir = tempfile::tempdir().unwrap();
        let cache = DraftCache::new(dir.path().join("drafts")).unwrap();

        let mut draft = Draft::blank("prj/1");
        draft.items.push(DesignItem::header("h1", "Antenna", 0));
        cache.store(&draft).unwrap();

        assert!(dir.path().join("drafts").join("prj_1.json").exists());
        assert_eq!(cache.load("prj/1").unwrap(), Some(draft));

        cache.clear("prj/1").unwrap();
        assert_eq!(cache.load("prj/1").unwrap(), None);
        cache.clear("prj/1").unwrap();
    }

    #[test]
    fn disabled_cache_misses() {
        let cache = DraftCache::disabled();
        cache.store(&Draft::blank("prj-1")).unwrap();
        assert!(!cache.is_enabled());
        assert_eq!(cache.load("prj-1").unwrap(), None);
    }

    #[test]
    fn corrupt_file_is_reported() {
        let dir = tempfile::tempdir().unwrap();
        let cache = DraftCache::new(dir.path().to_path_buf()).unwrap();
        std::fs::write(dir.path().join("prj-1.json"), "{not json").unwrap();
        assert!(matches!(cache.load("prj-1"), Err(DesignError::Cache { .. })));
    }
}

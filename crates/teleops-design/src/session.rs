//! Per-project editing session: the single owner of draft and version state.
//!
//! ```text
//!            create / add / move / remove            save
//!  (none) ───────────────────────────────▶ local ─────────▶ persisted (clean)
//!                                            ▲                 │ edit
//!                                            │ revert          ▼
//!                                            └────────── persisted (dirty)
//!                                publish: persisted ──▶ latest_published
//! ```
//!
//! Dirty state is `fingerprint(current draft) != server fingerprint`; it alone
//! drives which controls are offered. Only a succeeding backend call updates
//! the server-side view (`server_draft`, `server_fingerprint`,
//! `latest_published`).

use serde::Serialize;
use teleops_core::entities::{
    DesignItem, DesignVersion, EquipmentEntry, UNCATEGORIZED, normalize_category,
};
use teleops_core::enums::VersionStatus;
use teleops_core::errors::CoreError;

use crate::backend::VersionBackend;
use crate::cache::DraftCache;
use crate::draft::{Draft, DraftSeed, NewItem, new_item_id};
use crate::error::DesignError;
use crate::fingerprint::{Fingerprint, fingerprint};
use crate::grouping::{CategoryGroup, group_by_category, same_name};
use crate::notice::{Notice, Severity};
use crate::reorder;

/// Which actions the editor should offer right now.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[allow(clippy::struct_excessive_bools)]
pub struct Controls {
    pub save: bool,
    pub revert: bool,
    pub delete: bool,
    pub discard: bool,
    pub publish: bool,
}

/// What the editor is currently showing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "source", rename_all = "snake_case")]
pub enum ViewSource {
    Draft { dirty: bool },
    Published { version_number: u32 },
    Empty,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DesignView {
    #[serde(flatten)]
    pub source: ViewSource,
    pub groups: Vec<CategoryGroup>,
}

/// Editing session over one project's design versions.
pub struct DesignSession<B> {
    backend: B,
    cache: DraftCache,
    project_id: Option<String>,
    current_draft: Option<Draft>,
    server_draft: Option<DesignVersion>,
    latest_published: Option<DesignVersion>,
    published: Vec<DesignVersion>,
    server_fingerprint: Fingerprint,
    notices: Vec<Notice>,
}

impl<B: VersionBackend> DesignSession<B> {
    #[must_use]
    pub const fn new(backend: B, cache: DraftCache, project_id: Option<String>) -> Self {
        Self {
            backend,
            cache,
            project_id,
            current_draft: None,
            server_draft: None,
            latest_published: None,
            published: Vec::new(),
            server_fingerprint: Fingerprint::empty(),
            notices: Vec::new(),
        }
    }

    // ── Accessors ──────────────────────────────────────────────────

    #[must_use]
    pub const fn backend(&self) -> &B {
        &self.backend
    }

    #[must_use]
    pub fn project_id(&self) -> Option<&str> {
        self.project_id.as_deref()
    }

    #[must_use]
    pub const fn current_draft(&self) -> Option<&Draft> {
        self.current_draft.as_ref()
    }

    #[must_use]
    pub const fn server_draft(&self) -> Option<&DesignVersion> {
        self.server_draft.as_ref()
    }

    #[must_use]
    pub const fn latest_published(&self) -> Option<&DesignVersion> {
        self.latest_published.as_ref()
    }

    /// Published versions known from the last load, oldest first.
    #[must_use]
    pub fn published_versions(&self) -> &[DesignVersion] {
        &self.published
    }

    #[must_use]
    pub const fn server_fingerprint(&self) -> &Fingerprint {
        &self.server_fingerprint
    }

    #[must_use]
    pub fn current_fingerprint(&self) -> Fingerprint {
        self.current_draft
            .as_ref()
            .map_or_else(Fingerprint::empty, Draft::fingerprint)
    }

    /// Unsaved changes relative to the server.
    #[must_use]
    pub fn is_dirty(&self) -> bool {
        self.current_draft.is_some() && self.current_fingerprint() != self.server_fingerprint
    }

    #[must_use]
    pub fn can_revert(&self) -> bool {
        self.server_draft.is_some() && self.is_dirty()
    }

    #[must_use]
    pub fn controls(&self) -> Controls {
        let dirty = self.is_dirty();
        Controls {
            save: dirty,
            revert: self.can_revert(),
            delete: dirty && self.server_draft.is_some(),
            discard: self.current_draft.is_some(),
            publish: self
                .current_draft
                .as_ref()
                .is_some_and(|d| !d.items.is_empty()),
        }
    }

    /// Notices produced since the last call.
    pub fn take_notices(&mut self) -> Vec<Notice> {
        std::mem::take(&mut self.notices)
    }

    /// The current draft grouped by category, or the latest published version
    /// when there is no draft.
    #[must_use]
    pub fn view(&self) -> DesignView {
        if let Some(draft) = &self.current_draft {
            return DesignView {
                source: ViewSource::Draft {
                    dirty: self.is_dirty(),
                },
                groups: group_by_category(&draft.items),
            };
        }
        match &self.latest_published {
            Some(version) => DesignView {
                source: ViewSource::Published {
                    version_number: version.version_number,
                },
                groups: group_by_category(&version.items),
            },
            None => DesignView {
                source: ViewSource::Empty,
                groups: Vec::new(),
            },
        }
    }

    // ── Load ───────────────────────────────────────────────────────

    /// Load state for the session's project.
    ///
    /// A cached local draft wins over the server draft; the server is still
    /// probed so the dirty check has a baseline.
    ///
    /// # Errors
    ///
    /// Returns [`DesignError::NoProject`] without a project, or
    /// [`DesignError::Backend`] if versions cannot be fetched and there is no
    /// local draft to fall back on.
    pub async fn load(&mut self) -> Result<(), DesignError> {
        let result = self.load_inner().await;
        self.record(result)
    }

    async fn load_inner(&mut self) -> Result<(), DesignError> {
        let project_id = self.project_id.clone().ok_or(DesignError::NoProject)?;

        let local = match self.cache.load(&project_id) {
            Ok(local) => local,
            Err(e) => {
                tracing::warn!(%e, "ignoring unreadable local draft");
                self.notify(Severity::Warning, e.to_string());
                None
            }
        };
        let fetched = self.backend.list_versions(&project_id).await;

        self.server_draft = None;
        self.server_fingerprint = Fingerprint::empty();

        match local {
            Some(mut local) => {
                let mut retargeted = false;
                match fetched {
                    Ok(versions) => {
                        let server_draft = self.absorb_versions(versions);
                        let server_id = server_draft.as_ref().map(|v| v.id.clone());
                        if local.server_id != server_id {
                            tracing::info!(
                                stale = ?local.server_id,
                                current = ?server_id,
                                "local draft now targets the server's current draft"
                            );
                            local.server_id = server_id;
                            retargeted = true;
                        }
                        if let Some(server) = &server_draft {
                            self.server_fingerprint = fingerprint(&server.items);
                        }
                        self.server_draft = server_draft;
                    }
                    Err(e) => {
                        tracing::warn!(%e, %project_id, "could not probe server draft");
                        self.notify(Severity::Warning, format!("could not reach server: {e}"));
                    }
                }
                tracing::info!(%project_id, items = local.items.len(), "resumed local draft");
                self.current_draft = Some(local);
                if retargeted {
                    self.persist_local();
                }
            }
            None => {
                let server_draft = self.absorb_versions(fetched?);
                self.server_fingerprint = server_draft
                    .as_ref()
                    .map_or_else(Fingerprint::empty, |v| fingerprint(&v.items));
                self.current_draft = server_draft.as_ref().map(Draft::from_version);
                self.server_draft = server_draft;
            }
        }
        Ok(())
    }

    /// Cache published versions and return the server draft, if any.
    fn absorb_versions(&mut self, versions: Vec<DesignVersion>) -> Option<DesignVersion> {
        let (mut drafts, mut published): (Vec<_>, Vec<_>) =
            versions.into_iter().partition(DesignVersion::is_draft);

        published.sort_by_key(|v| v.version_number);
        self.latest_published = published.last().cloned();
        self.published = published;

        if drafts.len() > 1 {
            tracing::warn!(
                count = drafts.len(),
                "multiple server drafts found, using the newest"
            );
        }
        drafts.sort_by_key(|v| v.version_number);
        drafts.pop()
    }

    // ── Create ─────────────────────────────────────────────────────

    /// Start a new local draft from `seed`. Any open draft is replaced.
    ///
    /// Returns `None` when there is no project or the seed source is unknown.
    pub fn create_draft(&mut self, seed: &DraftSeed) -> Option<Draft> {
        let Some(project_id) = self.project_id.clone() else {
            tracing::debug!("cannot create draft without a project");
            return None;
        };
        let mut draft = match seed {
            DraftSeed::Blank => Draft::blank(project_id),
            DraftSeed::ClonePublished(version_id) => {
                let source = self.published.iter().find(|v| &v.id == version_id)?;
                Draft::seeded(project_id, source)
            }
            DraftSeed::EditLatestPublished => {
                Draft::seeded(project_id, self.latest_published.as_ref()?)
            }
        };
        // One draft per project: saving overwrites the existing server draft.
        draft.server_id = self.server_draft.as_ref().map(|v| v.id.clone());

        tracing::info!(?seed, items = draft.items.len(), "created draft");
        self.current_draft = Some(draft.clone());
        self.persist_local();
        Some(draft)
    }

    /// Seed a new draft from a published version.
    pub fn clone_from_published(&mut self, version_id: &str) -> Option<Draft> {
        self.create_draft(&DraftSeed::ClonePublished(version_id.to_string()))
    }

    /// A published version grouped by category, for preview before cloning.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::NotFound`] if the version is not a known
    /// published version.
    pub fn preview(&self, version_id: &str) -> Result<Vec<CategoryGroup>, DesignError> {
        let version = self
            .published
            .iter()
            .find(|v| v.id == version_id)
            .ok_or_else(|| CoreError::NotFound {
                entity_type: "design_version".to_string(),
                id: version_id.to_string(),
            })?;
        Ok(group_by_category(&version.items))
    }

    // ── Edit ───────────────────────────────────────────────────────

    /// Append a leaf row, creating the draft and its category header as needed.
    ///
    /// # Errors
    ///
    /// Returns [`DesignError::DuplicateItem`] if the category already holds a
    /// row of this name, or a validation error for a blank name.
    pub fn add_item(&mut self, item: NewItem) -> Result<DesignItem, DesignError> {
        let result = self.add_item_inner(item);
        self.record(result)
    }

    fn add_item_inner(&mut self, item: NewItem) -> Result<DesignItem, DesignError> {
        let category = match normalize_category(item.category.as_deref()) {
            UNCATEGORIZED => None,
            label => Some(label.to_string()),
        };
        let mut leaf = DesignItem::leaf(new_item_id(), item.name.trim(), category, 0);
        leaf.model = item.model;
        leaf.manufacturer = item.manufacturer;
        leaf.attributes = item.attributes;
        leaf.remarks = item.remarks;
        leaf.validate()?;

        let draft = self.ensure_draft()?;
        if draft.has_leaf(&leaf.name, leaf.category.as_deref()) {
            let category = leaf.group_name().to_string();
            return Err(DesignError::DuplicateItem {
                name: leaf.name,
                category,
            });
        }
        if let Some(category) = &leaf.category {
            if !draft.has_header(category) {
                draft
                    .items
                    .push(DesignItem::header(new_item_id(), category.clone(), 0));
            }
        }
        draft.items.push(leaf.clone());
        reorder::renumber(&mut draft.items);
        draft.touch();

        let added = draft
            .items
            .iter()
            .find(|i| i.id == leaf.id)
            .cloned()
            .unwrap_or(leaf);
        self.persist_local();
        Ok(added)
    }

    /// Append a category header, creating the draft as needed.
    ///
    /// # Errors
    ///
    /// Returns [`DesignError::DuplicateItem`] if the header exists, or a
    /// validation error for a blank name.
    pub fn add_category(&mut self, name: &str) -> Result<DesignItem, DesignError> {
        let result = self.add_category_inner(name);
        self.record(result)
    }

    fn add_category_inner(&mut self, name: &str) -> Result<DesignItem, DesignError> {
        let header = DesignItem::header(new_item_id(), name.trim(), 0);
        header.validate()?;

        let draft = self.ensure_draft()?;
        if draft.has_header(&header.name) {
            return Err(DesignError::DuplicateItem {
                category: header.name.clone(),
                name: header.name,
            });
        }
        draft.items.push(header);
        reorder::renumber(&mut draft.items);
        draft.touch();
        let added = draft.items.last().cloned().ok_or(DesignError::NoDraft)?;
        self.persist_local();
        Ok(added)
    }

    /// Remove a row. Removing a header moves its leaves to no category; they
    /// then render under the synthesized "Uncategorized" group.
    ///
    /// # Errors
    ///
    /// Returns [`DesignError::NoDraft`] or [`DesignError::ItemNotFound`].
    pub fn remove_item(&mut self, item_id: &str) -> Result<DesignItem, DesignError> {
        let result = self.remove_item_inner(item_id);
        self.record(result)
    }

    fn remove_item_inner(&mut self, item_id: &str) -> Result<DesignItem, DesignError> {
        let draft = self.current_draft.as_mut().ok_or(DesignError::NoDraft)?;
        let index = reorder::index_of(&draft.items, item_id)
            .ok_or_else(|| DesignError::ItemNotFound(item_id.to_string()))?;
        let removed = draft.items.remove(index);

        if removed.is_category && !draft.has_header(&removed.name) {
            for leaf in draft.items.iter_mut().filter(|i| !i.is_category) {
                if same_name(leaf.group_name(), &removed.name) {
                    leaf.category = None;
                }
            }
        }
        reorder::renumber(&mut draft.items);
        draft.touch();
        self.persist_local();
        Ok(removed)
    }

    /// Move the row at `from` to `to`.
    ///
    /// A clean persisted draft is reordered on the server and the result
    /// adopted; otherwise the move is local until the next save.
    ///
    /// # Errors
    ///
    /// Returns [`DesignError::NoDraft`], [`DesignError::IndexOutOfRange`], or
    /// [`DesignError::Backend`].
    pub async fn move_item(&mut self, from: usize, to: usize) -> Result<(), DesignError> {
        let result = self.move_item_inner(from, to).await;
        self.record(result)
    }

    /// Move a dragged row onto the position of the row it was dropped on.
    ///
    /// # Errors
    ///
    /// Same as [`Self::move_item`], plus [`DesignError::ItemNotFound`] for an
    /// unknown id.
    pub async fn move_by_id(&mut self, dragged_id: &str, dropped_id: &str) -> Result<(), DesignError> {
        let indices = self
            .current_draft
            .as_ref()
            .ok_or(DesignError::NoDraft)
            .and_then(|d| reorder::indices_for_drag(&d.items, dragged_id, dropped_id));
        match indices {
            Ok((from, to)) => self.move_item(from, to).await,
            Err(e) => self.record(Err(e)),
        }
    }

    async fn move_item_inner(&mut self, from: usize, to: usize) -> Result<(), DesignError> {
        let dirty = self.is_dirty();
        let draft = self.current_draft.as_mut().ok_or(DesignError::NoDraft)?;
        reorder::check_index(&draft.items, from)?;
        reorder::check_index(&draft.items, to)?;

        match draft.server_id.clone() {
            Some(version_id) if !dirty => {
                let updated = self.backend.reorder_items(&version_id, from, to).await?;
                tracing::info!(%version_id, from, to, "reordered server draft");
                self.adopt_server_draft(updated);
            }
            _ => {
                reorder::move_item(&mut draft.items, from, to)?;
                draft.touch();
                self.persist_local();
            }
        }
        Ok(())
    }

    // ── Server round-trips ─────────────────────────────────────────

    /// Push the current draft to the server.
    ///
    /// # Errors
    ///
    /// Returns [`DesignError::NoDraft`], [`DesignError::NoProject`], or
    /// [`DesignError::Backend`]; on failure local rows are unchanged.
    pub async fn save(&mut self) -> Result<DesignVersion, DesignError> {
        let result = self.save_inner().await;
        if result.is_ok() {
            self.notify(Severity::Info, "draft saved");
        }
        self.record(result)
    }

    async fn save_inner(&mut self) -> Result<DesignVersion, DesignError> {
        let draft = self.current_draft.clone().ok_or(DesignError::NoDraft)?;
        let project_id = self.project_id.clone().ok_or(DesignError::NoProject)?;

        let version_id = match &draft.server_id {
            Some(id) => id.clone(),
            None => {
                let created = self
                    .backend
                    .create_version(&project_id, draft.cloned_from.as_deref())
                    .await?;
                tracing::info!(version_id = %created.id, "created server draft");
                let id = created.id.clone();
                self.server_fingerprint = fingerprint(&created.items);
                self.server_draft = Some(created);
                if let Some(current) = self.current_draft.as_mut() {
                    current.server_id = Some(id.clone());
                }
                self.persist_local();
                id
            }
        };

        let saved = self.backend.replace_items(&version_id, &draft.items).await?;
        tracing::info!(%version_id, items = saved.items.len(), "saved draft");
        self.adopt_server_draft(saved.clone());
        Ok(saved)
    }

    /// Restore the current draft from the server draft.
    ///
    /// # Errors
    ///
    /// Returns [`DesignError::NothingToRevert`] without a server draft or when
    /// the current draft already matches it.
    pub fn revert(&mut self) -> Result<(), DesignError> {
        let result = self.revert_inner();
        self.record(result)
    }

    fn revert_inner(&mut self) -> Result<(), DesignError> {
        if !self.can_revert() {
            return Err(DesignError::NothingToRevert);
        }
        if let Some(server) = &self.server_draft {
            self.current_draft = Some(Draft::from_version(server));
            tracing::info!(version_id = %server.id, "reverted to server draft");
        }
        self.clear_local();
        Ok(())
    }

    /// Close the draft, dropping local edits.
    ///
    /// Without a server draft the draft disappears and the view falls back
    /// to the latest published version; otherwise the server draft is
    /// restored.
    ///
    /// # Errors
    ///
    /// Returns [`DesignError::ConfirmationRequired`] unless `confirmed`, or
    /// [`DesignError::NoDraft`].
    pub fn discard(&mut self, confirmed: bool) -> Result<(), DesignError> {
        let result = self.discard_inner(confirmed);
        self.record(result)
    }

    fn discard_inner(&mut self, confirmed: bool) -> Result<(), DesignError> {
        if !confirmed {
            return Err(DesignError::ConfirmationRequired("discard the draft"));
        }
        if self.current_draft.is_none() {
            return Err(DesignError::NoDraft);
        }
        self.current_draft = self.server_draft.as_ref().map(Draft::from_version);
        self.clear_local();
        tracing::info!(
            restored = self.current_draft.is_some(),
            "discarded local draft"
        );
        Ok(())
    }

    /// Delete the persisted draft on the server and clear all draft state.
    ///
    /// # Errors
    ///
    /// Returns [`DesignError::ConfirmationRequired`] unless `confirmed`,
    /// [`DesignError::NoServerDraft`], or [`DesignError::Backend`].
    pub async fn delete_draft(&mut self, confirmed: bool) -> Result<(), DesignError> {
        let result = self.delete_draft_inner(confirmed).await;
        self.record(result)
    }

    async fn delete_draft_inner(&mut self, confirmed: bool) -> Result<(), DesignError> {
        if !confirmed {
            return Err(DesignError::ConfirmationRequired("delete the draft"));
        }
        let version_id = self
            .server_draft
            .as_ref()
            .map(|v| v.id.clone())
            .ok_or(DesignError::NoServerDraft)?;

        self.backend.delete_version(&version_id).await?;
        tracing::info!(%version_id, "deleted server draft");
        self.retire_draft();
        Ok(())
    }

    /// Publish the current draft, saving it first if needed.
    ///
    /// # Errors
    ///
    /// Returns [`DesignError::EmptyDraft`] before any backend call when the
    /// draft has no rows, [`DesignError::VersionLimit`] when the server
    /// refuses a new version, or [`DesignError::Backend`].
    pub async fn publish(&mut self) -> Result<DesignVersion, DesignError> {
        let result = self.publish_inner().await;
        if let Ok(version) = &result {
            self.notify(
                Severity::Info,
                format!("published version {}", version.version_number),
            );
        }
        self.record(result)
    }

    async fn publish_inner(&mut self) -> Result<DesignVersion, DesignError> {
        let draft = self.current_draft.as_ref().ok_or(DesignError::NoDraft)?;
        if draft.items.is_empty() {
            return Err(DesignError::EmptyDraft);
        }
        if !draft.is_persisted() || self.is_dirty() {
            self.save_inner().await?;
        }
        let version_id = self
            .server_draft
            .as_ref()
            .map(|v| v.id.clone())
            .ok_or(DesignError::NoServerDraft)?;

        let published = self.backend.publish_version(&version_id).await?;
        VersionStatus::Draft.transition(published.status, &published.id)?;
        tracing::info!(
            version_id = %published.id,
            version_number = published.version_number,
            "published draft"
        );

        self.retire_draft();
        self.published.retain(|v| v.id != published.id);
        self.published.push(published.clone());
        self.published.sort_by_key(|v| v.version_number);
        self.latest_published = self.published.last().cloned();
        Ok(published)
    }

    // ── Catalog ────────────────────────────────────────────────────

    /// Equipment suggestions for `query`.
    ///
    /// Falls back to leaf rows of the current draft and the latest published
    /// version when the catalog cannot be searched.
    pub async fn suggest_equipment(&mut self, query: &str) -> Vec<EquipmentEntry> {
        match self.backend.search_equipment(query).await {
            Ok(entries) => entries,
            Err(e) => {
                tracing::warn!(%e, "equipment catalog unavailable, using local rows");
                self.local_equipment(query)
            }
        }
    }

    fn local_equipment(&self, query: &str) -> Vec<EquipmentEntry> {
        let needle = query.trim().to_lowercase();
        let rows = self
            .current_draft
            .iter()
            .flat_map(|d| d.items.iter())
            .chain(self.latest_published.iter().flat_map(|v| v.items.iter()))
            .filter(|i| !i.is_category && i.name.to_lowercase().contains(&needle));

        let mut entries: Vec<EquipmentEntry> = Vec::new();
        for row in rows {
            let duplicate = entries.iter().any(|e| {
                same_name(&e.name, &row.name)
                    && same_name(
                        normalize_category(e.category.as_deref()),
                        row.group_name(),
                    )
            });
            if !duplicate {
                entries.push(EquipmentEntry {
                    name: row.name.clone(),
                    category: row.category.clone(),
                    model: row.model.clone(),
                    manufacturer: row.manufacturer.clone(),
                });
            }
        }
        entries
    }

    // ── Internals ──────────────────────────────────────────────────

    fn ensure_draft(&mut self) -> Result<&mut Draft, DesignError> {
        if self.current_draft.is_none() && self.create_draft(&DraftSeed::Blank).is_none() {
            return Err(DesignError::NoProject);
        }
        self.current_draft.as_mut().ok_or(DesignError::NoDraft)
    }

    fn adopt_server_draft(&mut self, version: DesignVersion) {
        self.server_fingerprint = fingerprint(&version.items);
        self.current_draft = Some(Draft::from_version(&version));
        self.server_draft = Some(version);
        self.clear_local();
    }

    fn retire_draft(&mut self) {
        self.current_draft = None;
        self.server_draft = None;
        self.server_fingerprint = Fingerprint::empty();
        self.clear_local();
    }

    fn persist_local(&mut self) {
        let Some(draft) = &self.current_draft else {
            return;
        };
        if let Err(e) = self.cache.store(draft) {
            tracing::warn!(%e, "failed to cache local draft");
            self.notify(Severity::Warning, e.to_string());
        }
    }

    fn clear_local(&mut self) {
        let Some(project_id) = self.project_id.clone() else {
            return;
        };
        if let Err(e) = self.cache.clear(&project_id) {
            tracing::warn!(%e, "failed to clear local draft cache");
            self.notify(Severity::Warning, e.to_string());
        }
    }

    fn notify(&mut self, severity: Severity, message: impl Into<String>) {
        self.notices.push(Notice::new(severity, message));
    }

    /// Log and surface a failed operation; pass the result through.
    fn record<T>(&mut self, result: Result<T, DesignError>) -> Result<T, DesignError> {
        if let Err(e) = &result {
            match e.severity() {
                Severity::Error => tracing::error!(%e, "design operation failed"),
                _ => tracing::warn!(%e, "design operation rejected"),
            }
            self.notify(e.severity(), e.to_string());
        }
        result
    }
}

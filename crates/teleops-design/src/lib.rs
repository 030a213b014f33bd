//! # teleops-design
//!
//! Draft/published reconciliation for per-project design lists.
//!
//! A [`DesignSession`] owns the open draft, the persisted server draft, and
//! the latest published version of one project. Edits stay local (and in the
//! [`DraftCache`]) until saved; a content [`Fingerprint`] of the draft versus
//! the server copy decides whether there are unsaved changes and which
//! [`Controls`] apply.
//!
//! The server is reached through the [`VersionBackend`] trait, implemented
//! for [`teleops_api::ApiClient`].

pub mod backend;
pub mod cache;
pub mod draft;
pub mod error;
pub mod fingerprint;
pub mod grouping;
pub mod handle;
pub mod notice;
pub mod reorder;
pub mod session;

#[cfg(test)]
mod test_support;

pub use backend::VersionBackend;
pub use cache::DraftCache;
pub use draft::{Draft, DraftSeed, NewItem};
pub use error::DesignError;
pub use fingerprint::{Fingerprint, fingerprint};
pub use grouping::{CategoryGroup, group_by_category};
pub use handle::SessionHandle;
pub use notice::{Notice, Severity};
pub use session::{Controls, DesignSession, DesignView, ViewSource};

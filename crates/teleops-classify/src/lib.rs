//! # teleops-classify
//!
//! Suggests which resource type a permission governs from its free-text name,
//! code, and category.
//!
//! The keyword table is data ([`KeywordTable`]), injected into [`classify`].
//! [`AutoSelector`] turns the ranked suggestions into a one-shot pre-fill.
//!
//! ```
//! use teleops_classify::{AutoSelector, KeywordTable, classify};
//! use teleops_core::entities::PermissionText;
//!
//! let table = KeywordTable::builtin();
//! let text = PermissionText { name: "New Project Setup".into(), ..Default::default() };
//! let suggestions = classify(&table, &text);
//! let mut selector = AutoSelector::default();
//! let picked = selector.select(None, &suggestions).map(|s| s.resource_type.as_str());
//! assert_eq!(picked, Some("project"));
//! ```

mod auto_select;
mod classifier;
mod error;
mod table;

pub use auto_select::{AutoSelector, DEFAULT_THRESHOLD};
pub use classifier::{Suggestion, classify};
pub use error::ClassifyError;
pub use table::{KeywordMapping, KeywordTable};

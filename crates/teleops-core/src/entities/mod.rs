//! Entity structs for Teleops domain objects.
//!
//! Each entity mirrors a JSON payload of the operations backend. All structs
//! derive `Serialize`, `Deserialize`, and `JsonSchema` for JSON roundtrip and
//! schema output.

mod design;
mod permission;
mod resource;

pub use design::{DesignItem, DesignVersion, UNCATEGORIZED, normalize_category};
pub use permission::PermissionText;
pub use resource::{EquipmentEntry, ResourceType};

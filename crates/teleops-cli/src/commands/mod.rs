pub mod classify;
pub mod dispatch;
pub mod draft;
pub mod equipment;
pub mod resource_types;
pub mod schema;
pub mod versions;

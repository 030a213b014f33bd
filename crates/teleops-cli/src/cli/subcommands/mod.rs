mod draft;
mod versions;

pub use draft::{AddItemArgs, DraftCommands};
pub use versions::VersionCommands;

//! Bundled dataset split across logical submodules.

mod loader;
mod search;

pub use loader::{load, load_bundled, load_from_path, load_from_str, Corpus};
pub use search::{filter_chapters, searchable_text};

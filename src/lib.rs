//! Core library surface for the Quran Reader TUI.
//!
//! The binary only wires these pieces together: resolve the config, install
//! logging, load the bundled corpus, and hand it to the event loop.
pub mod config;
pub mod corpus;
pub mod error;
pub mod logging;
pub mod models;
pub mod ui;

/// Dataset loading and the search engine.
pub use corpus::{filter_chapters, load_bundled, searchable_text, Corpus};

/// The two domain types every layer passes around.
pub use models::{Chapter, ChapterId, Verse};

/// The interactive application entry point and state container.
pub use ui::{run_app, App};

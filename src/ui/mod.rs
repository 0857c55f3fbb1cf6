//! Ratatui front-end split across logical submodules.

mod app;
mod helpers;
mod navigation;
mod screens;
mod terminal;

pub use app::App;
pub use navigation::{Destination, DestinationKey, Navigator};
pub use terminal::run_app;

use std::path::PathBuf;

use anyhow::{anyhow, Result};
use directories::BaseDirs;
use ratatui::style::Color;

/// Folder name used beneath the user's home directory for application data.
const DATA_DIR_NAME: &str = ".quran-reader";
/// Log file written inside the application data directory.
const LOG_FILE_NAME: &str = "quran-reader.log";
/// Optional dataset file that replaces the bundled chapters when present.
const CORPUS_FILE_NAME: &str = "quran.json";
/// Page opened from the information prompt.
pub const INFO_URL: &str = "https://www.techmaktab.com/quran";

/// Palette shared by every screen.
#[derive(Debug, Clone, Copy)]
pub struct Theme {
    /// Linen page background.
    pub background: Color,
    pub primary: Color,
    pub text: Color,
    pub border: Color,
    /// Underlay of the selected list row.
    pub highlight: Color,
}

impl Default for Theme {
    fn default() -> Self {
        Self {
            background: Color::Rgb(0xfa, 0xf0, 0xe6),
            primary: Color::Rgb(255, 45, 85),
            text: Color::Rgb(28, 28, 30),
            border: Color::Rgb(199, 199, 204),
            highlight: Color::Rgb(0x22, 0x8b, 0x22),
        }
    }
}

/// Resolved runtime settings. Nothing here is user-editable; paths derive
/// from the home directory the same way on every run.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub data_dir: PathBuf,
    pub log_path: PathBuf,
    pub corpus_path: PathBuf,
    pub info_url: String,
    pub theme: Theme,
}

impl AppConfig {
    pub fn resolve() -> Result<Self> {
        let base_dirs =
            BaseDirs::new().ok_or_else(|| anyhow!("could not locate home directory"))?;
        Ok(Self::rooted_at(base_dirs.home_dir().join(DATA_DIR_NAME)))
    }

    /// Build a config whose files live under `data_dir`.
    pub fn rooted_at(data_dir: PathBuf) -> Self {
        Self {
            log_path: data_dir.join(LOG_FILE_NAME),
            corpus_path: data_dir.join(CORPUS_FILE_NAME),
            data_dir,
            info_url: INFO_URL.to_string(),
            theme: Theme::default(),
        }
    }
}

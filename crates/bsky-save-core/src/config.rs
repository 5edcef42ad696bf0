use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;
use std::time::Duration;

/// Global configuration loaded from `~/.config/bsky-save/config.toml`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SaveConfig {
    /// Image `src` prefix that marks a feed thumbnail.
    pub thumbnail_prefix: String,
    /// Path segment in a thumbnail URL, replaced by `fullsize_segment`.
    pub thumbnail_segment: String,
    pub fullsize_segment: String,
    /// Polling interval of the candidate scanner.
    pub scan_interval_ms: u64,
    /// How long the "done" marker stays on a thumbnail after a save.
    pub post_save_hold_ms: u64,
    /// Delay before a local object URL is revoked after activation.
    pub object_url_release_ms: u64,
    /// Substrings that keep the accessibility label from parsing as a date.
    pub date_garbage_parts: Vec<String>,
    pub filename_prefix: String,
    pub separator: String,
    /// Render the filename date in UTC (true) or local time (false).
    pub utc_dates: bool,
    /// Profile links must carry `data-tooltip` to qualify. Set to false for the
    /// older, looser match.
    pub require_tooltip_marker: bool,
    /// Where saved images go. None = current directory.
    pub download_dir: Option<PathBuf>,
}

impl Default for SaveConfig {
    fn default() -> Self {
        Self {
            thumbnail_prefix: "https://cdn.bsky.app/img/feed_thumbnail/".to_string(),
            thumbnail_segment: "/feed_thumbnail/".to_string(),
            fullsize_segment: "/feed_fullsize/".to_string(),
            scan_interval_ms: 1200,
            post_save_hold_ms: 500,
            object_url_release_ms: 5000,
            date_garbage_parts: vec![" at ".to_string()],
            filename_prefix: "[bsky]".to_string(),
            separator: "\u{2014}".to_string(),
            utc_dates: true,
            require_tooltip_marker: true,
            download_dir: None,
        }
    }
}

impl SaveConfig {
    pub fn scan_interval(&self) -> Duration {
        Duration::from_millis(self.scan_interval_ms)
    }

    pub fn post_save_hold(&self) -> Duration {
        Duration::from_millis(self.post_save_hold_ms)
    }

    pub fn object_url_release(&self) -> Duration {
        Duration::from_millis(self.object_url_release_ms)
    }
}

pub fn config_path() -> Result<PathBuf> {
    let xdg_dirs = xdg::BaseDirectories::with_prefix("bsky-save")?;
    Ok(xdg_dirs.place_config_file("config.toml")?)
}

/// Load configuration from disk, creating a default file if none exists.
pub fn load_or_init() -> Result<SaveConfig> {
    let path = config_path()?;
    if !path.exists() {
        let default_cfg = SaveConfig::default();
        let toml = toml::to_string_pretty(&default_cfg)?;
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&path, toml)?;
        tracing::info!("created default config at {}", path.display());
        return Ok(default_cfg);
    }

    let data = fs::read_to_string(&path)?;
    let cfg: SaveConfig = toml::from_str(&data)?;
    Ok(cfg)
}

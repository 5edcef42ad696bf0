//! `bsky-save name` – filename synthesis without a page.

use anyhow::{Context, Result};
use bsky_save_core::config::SaveConfig;
use bsky_save_core::date::normalize_label;
use bsky_save_core::naming::{asset_filename, fullsize_url, synthesize_filename, FilenameStyle, PostInfo};

pub fn run_name(cfg: &SaveConfig, href: &str, label: &str, src: &str) -> Result<()> {
    let url = fullsize_url(src, &cfg.thumbnail_segment, &cfg.fullsize_segment);
    let asset = asset_filename(&url).with_context(|| format!("no filename in {}", url))?;
    let post = PostInfo::from_href(href);
    let date = normalize_label(label, &cfg.date_garbage_parts);
    println!(
        "{}",
        synthesize_filename(&FilenameStyle::from(cfg), &post, &date, &asset)
    );
    Ok(())
}

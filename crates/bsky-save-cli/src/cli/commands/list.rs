//! `bsky-save list` – show thumbnails and their planned filenames.

use anyhow::Result;
use bsky_save_core::config::SaveConfig;
use bsky_save_core::orchestrator::{plan_download, OrchestratorSettings};
use bsky_save_core::scanner::CandidateScanner;
use std::path::Path;

use super::load_snapshot;

const SKIPPED: &str = "(skipped)";

/// One output row: index, planned filename, full-size URL, thumbnail URL.
fn rows(cfg: &SaveConfig, snapshot: &Path) -> Result<Vec<[String; 4]>> {
    let doc = load_snapshot(snapshot)?;
    let settings = OrchestratorSettings::from(cfg);
    let thumbnails = CandidateScanner::from_config(cfg).scan(&doc, |_| {});
    Ok(thumbnails
        .iter()
        .enumerate()
        .map(|(i, thumb)| {
            let src = thumb.attr("src").unwrap_or_default();
            match plan_download(thumb, &settings) {
                Some(req) => [i.to_string(), req.filename, req.url, src],
                None => [i.to_string(), SKIPPED.to_string(), "-".to_string(), src],
            }
        })
        .collect())
}

fn width(rows: &[[String; 4]], col: usize, header: &str) -> usize {
    rows.iter()
        .map(|r| r[col].chars().count())
        .chain(std::iter::once(header.len()))
        .max()
        .unwrap_or(0)
}

pub fn run_list(cfg: &SaveConfig, snapshot: &Path) -> Result<()> {
    let rows = rows(cfg, snapshot)?;
    if rows.is_empty() {
        println!("No thumbnails found.");
        return Ok(());
    }
    let w_idx = width(&rows, 0, "IDX");
    let w_name = width(&rows, 1, "FILENAME");
    let w_full = width(&rows, 2, "FULLSIZE");
    println!("{:<w_idx$}  {:<w_name$}  {:<w_full$}  SRC", "IDX", "FILENAME", "FULLSIZE");
    for [idx, name, full, src] in &rows {
        println!("{:<w_idx$}  {:<w_name$}  {:<w_full$}  {}", idx, name, full, src);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn one_row_per_thumbnail() {
        let dir = tempfile::tempdir().unwrap();
        let snapshot = dir.path().join("feed.html");
        std::fs::write(
            &snapshot,
            r#"<html><body>
            <div role="link">
              <a href="/profile/alice.bsky.social/post/3lb" dir="auto" data-tooltip="x" aria-label="x">1h</a>
              <img src="https://cdn.bsky.app/img/feed_thumbnail/plain/did/x@jpeg">
            </div>
            <div><img src="https://cdn.bsky.app/img/feed_thumbnail/plain/did/y@jpeg"></div>
            </body></html>"#,
        )
        .unwrap();
        let rows = rows(&SaveConfig::default(), &snapshot).unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0][1], "[bsky] alice.bsky.social\u{2014}3lb\u{2014}x.jpg");
        assert_eq!(rows[0][2], "https://cdn.bsky.app/img/feed_fullsize/plain/did/x@jpeg");
        assert_eq!(rows[1][1], SKIPPED);
        assert!(rows[1][3].ends_with("y@jpeg"));
    }
}

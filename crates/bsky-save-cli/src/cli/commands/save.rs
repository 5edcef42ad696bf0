//! `bsky-save save` – download one thumbnail's full-size image.

use anyhow::{Context, Result};
use bsky_save_core::config::SaveConfig;
use bsky_save_core::dom::Element;
use bsky_save_core::fetch::CurlTransport;
use bsky_save_core::orchestrator::{plan_download, Orchestrator, OrchestratorSettings};
use bsky_save_core::save::{DirectorySink, SaveTrigger};
use bsky_save_core::scanner::CandidateScanner;
use std::path::{Path, PathBuf};

use super::load_snapshot;

/// Which thumbnail to save.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Selection {
    Index(usize),
    Src(String),
}

impl Selection {
    pub(super) fn pick(&self, thumbnails: &[Element]) -> Option<Element> {
        match self {
            Selection::Index(i) => thumbnails.get(*i).cloned(),
            Selection::Src(src) => thumbnails
                .iter()
                .find(|t| t.attr("src").as_deref() == Some(src.as_str()))
                .cloned(),
        }
    }
}

/// Must run inside a `LocalSet`. Returns the saved path.
pub async fn run_save(
    cfg: &SaveConfig,
    snapshot: &Path,
    selection: Selection,
    download_dir: &Path,
) -> Result<PathBuf> {
    let doc = load_snapshot(snapshot)?;
    let settings = OrchestratorSettings::from(cfg);
    let saver = SaveTrigger::new(DirectorySink::new(download_dir), cfg.object_url_release());
    let orch = Orchestrator::new(CurlTransport::default(), saver, settings);

    let thumbnails = CandidateScanner::from_config(cfg).scan(&doc, |_| {});
    let target = selection
        .pick(&thumbnails)
        .with_context(|| format!("no thumbnail for {:?} ({} found)", selection, thumbnails.len()))?;
    let request = plan_download(&target, orch.settings())
        .context("thumbnail is not inside a post with a profile link")?;

    let url = request.url.clone();
    let path = orch
        .run(request)
        .await
        .with_context(|| format!("download {}", url))?;
    println!("{}", path.display());
    Ok(path)
}

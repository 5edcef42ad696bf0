//! CLI for bsky-save.

mod commands;

use anyhow::{bail, Result};
use bsky_save_core::config;
use bsky_save_core::manifest::ScriptManifest;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

use commands::{run_fetch, run_list, run_name, run_save, Selection};

/// Top-level CLI for bsky-save.
#[derive(Debug, Parser)]
#[command(name = "bsky-save")]
#[command(about = "bsky-save: save full-size Bluesky images with descriptive names", long_about = None)]
pub struct Cli {
    /// URL the page snapshot was taken from; must match the manifest.
    #[arg(long, global = true, default_value = "https://bsky.app/")]
    pub page_url: String,

    #[command(subcommand)]
    pub command: CliCommand,
}

#[derive(Debug, Subcommand)]
pub enum CliCommand {
    /// List thumbnails in a saved feed page and the filenames they would get.
    List {
        /// Path to an HTML snapshot of the feed page.
        snapshot: PathBuf,
    },

    /// Right-click one thumbnail of a saved feed page and save the full-size image.
    Save {
        /// Path to an HTML snapshot of the feed page.
        snapshot: PathBuf,

        /// Position of the thumbnail, as printed by `list` (default 0).
        #[arg(long, conflicts_with = "src")]
        index: Option<usize>,

        /// Exact thumbnail URL to click instead of an index.
        #[arg(long)]
        src: Option<String>,

        /// Directory to save into (default: config, then current directory).
        #[arg(long, value_name = "DIR")]
        download_dir: Option<PathBuf>,
    },

    /// Build a filename from post metadata without a page.
    Name {
        /// Profile link target, e.g. /profile/alice.bsky.social/post/3lb2.
        #[arg(long)]
        href: String,

        /// Accessibility label carrying the post date.
        #[arg(long, default_value = "")]
        label: String,

        /// Thumbnail URL of the image.
        #[arg(long)]
        src: String,
    },

    /// Fetch a URL through the binary fetcher and show status and headers.
    Fetch {
        url: String,

        /// Write the body to this file.
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,
    },
}

fn ensure_page_allowed(manifest: &ScriptManifest, page_url: &str) -> Result<()> {
    if !manifest.matches(page_url) {
        bail!(
            "page {} is outside the match patterns {:?}",
            page_url,
            manifest.match_patterns
        );
    }
    Ok(())
}

impl CliCommand {
    pub async fn run_from_args() -> Result<()> {
        let cli = Cli::parse();
        let cfg = config::load_or_init()?;
        tracing::debug!("loaded config: {:?}", cfg);
        let manifest = ScriptManifest::default();

        match cli.command {
            CliCommand::List { snapshot } => {
                ensure_page_allowed(&manifest, &cli.page_url)?;
                run_list(&cfg, &snapshot)?;
            }
            CliCommand::Save {
                snapshot,
                index,
                src,
                download_dir,
            } => {
                ensure_page_allowed(&manifest, &cli.page_url)?;
                let selection = match src {
                    Some(src) => Selection::Src(src),
                    None => Selection::Index(index.unwrap_or(0)),
                };
                let dir = match download_dir.or_else(|| cfg.download_dir.clone()) {
                    Some(dir) => dir,
                    None => std::env::current_dir()?,
                };
                run_save(&cfg, &snapshot, selection, &dir).await?;
            }
            CliCommand::Name { href, label, src } => run_name(&cfg, &href, &label, &src)?,
            CliCommand::Fetch { url, output } => run_fetch(&url, output.as_deref()).await?,
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests;

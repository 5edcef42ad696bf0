//! `bsky-save fetch` – fetch a URL and show what came back.

use anyhow::{Context, Result};
use bsky_save_core::fetch::{CurlTransport, Fetcher};
use std::path::Path;

pub async fn run_fetch(url: &str, output: Option<&Path>) -> Result<()> {
    let fetcher = Fetcher::new(CurlTransport::default());
    let resp = fetcher.get(url).await.with_context(|| format!("fetch {}", url))?;
    println!("{} {}", resp.status(), resp.status_text());
    for (name, value) in resp.headers().iter() {
        println!("{}: {}", name, value);
    }
    let body = resp.bytes().await.context("read body")?;
    match output {
        Some(path) => {
            std::fs::write(path, &body).with_context(|| format!("write {}", path.display()))?;
            println!("\n{} bytes -> {}", body.len(), path.display());
        }
        None => println!("\n{} bytes", body.len()),
    }
    Ok(())
}

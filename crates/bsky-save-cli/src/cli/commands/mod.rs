//! CLI command handlers, one per file.

mod fetch;
mod list;
mod name;
mod save;

pub use fetch::run_fetch;
pub use list::run_list;
pub use name::run_name;
pub use save::{run_save, Selection};

use anyhow::{Context, Result};
use bsky_save_core::dom::Document;
use std::path::Path;

/// Reads and parses an HTML snapshot.
fn load_snapshot(path: &Path) -> Result<Document> {
    let html = std::fs::read_to_string(path)
        .with_context(|| format!("read snapshot {}", path.display()))?;
    Ok(Document::from_html(&html))
}

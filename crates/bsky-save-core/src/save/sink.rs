//! Download sinks: what "activating a download link" does.

use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use super::{DownloadLink, ObjectUrlRegistry, SaveError};
use crate::naming::sanitize_filename;

const FALLBACK_NAME: &str = "download";

/// The host's save UX.
pub trait DownloadSink {
    /// Reads the bytes behind `link.href` and stores them under
    /// `link.download`. Returns where they went.
    fn activate(&self, link: &DownloadLink, registry: &ObjectUrlRegistry) -> Result<PathBuf, SaveError>;
}

/// Saves into a directory the way a browser does: an existing name gets a
/// ` (1)`, ` (2)`, ... suffix. Writes go to a `.part` file renamed at the end.
#[derive(Debug, Clone)]
pub struct DirectorySink {
    dir: PathBuf,
}

impl DirectorySink {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }
}

fn io_err(operation: &'static str, path: &Path) -> impl FnOnce(std::io::Error) -> SaveError {
    let path = path.display().to_string();
    move |source| SaveError::Io {
        operation,
        path,
        source,
    }
}

impl DownloadSink for DirectorySink {
    fn activate(&self, link: &DownloadLink, registry: &ObjectUrlRegistry) -> Result<PathBuf, SaveError> {
        let data = registry
            .resolve(&link.href)
            .ok_or_else(|| SaveError::UnknownObjectUrl(link.href.clone()))?;

        let mut name = sanitize_filename(&link.download);
        if name.is_empty() || name == "." || name == ".." {
            name = FALLBACK_NAME.to_string();
        }

        fs::create_dir_all(&self.dir).map_err(io_err("create dir", &self.dir))?;
        let final_path = unique_path(&self.dir, &name);
        let temp_path = self.dir.join(format!(".{}.part", name));

        let mut file = fs::File::create(&temp_path).map_err(io_err("create", &temp_path))?;
        file.write_all(&data).map_err(io_err("write", &temp_path))?;
        file.sync_all().map_err(io_err("sync", &temp_path))?;
        drop(file);
        fs::rename(&temp_path, &final_path).map_err(io_err("rename", &final_path))?;

        tracing::info!(path = %final_path.display(), bytes = data.len(), "saved");
        Ok(final_path)
    }
}

/// `dir/name`, or `dir/stem (n).ext` for the first free n.
fn unique_path(dir: &Path, name: &str) -> PathBuf {
    let candidate = dir.join(name);
    if !candidate.exists() {
        return candidate;
    }
    let (stem, ext) = match name.rfind('.') {
        Some(i) if i > 0 => (&name[..i], &name[i..]),
        _ => (name, ""),
    };
    (1u32..)
        .map(|n| dir.join(format!("{} ({}){}", stem, n, ext)))
        .find(|p| !p.exists())
        .unwrap_or(candidate)
}

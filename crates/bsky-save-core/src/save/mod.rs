//! Save trigger: hand fetched bytes to the host's download UX under a chosen
//! name.
//!
//! The bytes are registered under a session-local object URL, a download link
//! pointing at it is activated, and the URL is revoked after a fixed delay
//! (the save pathway may still be reading it when activation returns).

mod object_url;
mod sink;

pub use object_url::ObjectUrlRegistry;
pub use sink::{DirectorySink, DownloadSink};

use std::path::PathBuf;
use std::rc::Rc;
use std::sync::Arc;
use std::time::Duration;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum SaveError {
    #[error("object URL is not registered (revoked?): {0}")]
    UnknownObjectUrl(String),
    #[error("{operation} '{path}': {source}")]
    Io {
        operation: &'static str,
        path: String,
        source: std::io::Error,
    },
}

/// A synthesized `<a href=... download=...>`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DownloadLink {
    pub href: String,
    pub download: String,
}

pub struct SaveTrigger<S> {
    registry: Rc<ObjectUrlRegistry>,
    sink: S,
    release_after: Duration,
}

impl<S: DownloadSink> SaveTrigger<S> {
    pub fn new(sink: S, release_after: Duration) -> Self {
        Self {
            registry: Rc::new(ObjectUrlRegistry::new()),
            sink,
            release_after,
        }
    }

    pub fn registry(&self) -> &Rc<ObjectUrlRegistry> {
        &self.registry
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }

    /// Saves `data` as `filename`. `source_url` is appended to the link as a
    /// fragment, for the download UX to display.
    ///
    /// Must run inside a `tokio::task::LocalSet`: revocation is scheduled with
    /// `spawn_local`, whatever the activation outcome.
    pub fn trigger(
        &self,
        data: Arc<[u8]>,
        filename: &str,
        source_url: Option<&str>,
    ) -> Result<PathBuf, SaveError> {
        let object_url = self.registry.create(data);
        let href = match source_url {
            Some(url) => format!("{}#{}", object_url, url),
            None => object_url.clone(),
        };
        let link = DownloadLink {
            href,
            download: filename.to_string(),
        };
        let result = self.sink.activate(&link, &self.registry);

        let registry = Rc::clone(&self.registry);
        let delay = self.release_after;
        tokio::task::spawn_local(async move {
            tokio::time::sleep(delay).await;
            registry.revoke(&object_url);
        });
        result
    }
}

//! Download orchestrator: the per-thumbnail context-menu handler.
//!
//! A right-click on an instrumented thumbnail is turned into a
//! `DownloadRequest` synchronously (structure lookups, URL and filename
//! derivation). The fetch and save then run as a detached local task. Its
//! failures are logged and dropped; the in-progress marker is removed on
//! every exit path.

mod marker;
mod plan;

pub use marker::{MarkerClasses, ProgressMarker};
pub use plan::{plan_download, DownloadRequest, PageTargets};

use std::cell::Cell;
use std::path::PathBuf;
use std::rc::Rc;
use std::time::Duration;

use thiserror::Error;
use tokio::sync::Notify;

use crate::config::SaveConfig;
use crate::dom::{ContextMenuEvent, Element};
use crate::fetch::{fetch, FetchError, FetchRequest, HttpTransport};
use crate::naming::FilenameStyle;
use crate::save::{DownloadSink, SaveError, SaveTrigger};

#[derive(Debug, Error)]
pub enum OrchestrateError {
    #[error("fetch failed: {0}")]
    Fetch(#[from] FetchError),
    #[error("save failed: {0}")]
    Save(#[from] SaveError),
}

/// Settings derived from `SaveConfig`.
#[derive(Debug, Clone)]
pub struct OrchestratorSettings {
    pub targets: PageTargets,
    pub thumbnail_segment: String,
    pub fullsize_segment: String,
    pub date_garbage_parts: Vec<String>,
    pub style: FilenameStyle,
    pub post_save_hold: Duration,
    pub markers: MarkerClasses,
}

impl From<&SaveConfig> for OrchestratorSettings {
    fn from(cfg: &SaveConfig) -> Self {
        Self {
            targets: PageTargets::new(cfg.require_tooltip_marker),
            thumbnail_segment: cfg.thumbnail_segment.clone(),
            fullsize_segment: cfg.fullsize_segment.clone(),
            date_garbage_parts: cfg.date_garbage_parts.clone(),
            style: FilenameStyle::from(cfg),
            post_save_hold: cfg.post_save_hold(),
            markers: MarkerClasses::default(),
        }
    }
}

pub struct Orchestrator<T, S> {
    transport: T,
    saver: SaveTrigger<S>,
    settings: OrchestratorSettings,
    tracker: Rc<Tracker>,
}

#[derive(Default)]
struct Tracker {
    in_flight: Cell<usize>,
    idle: Notify,
}

/// Counts one download from spawn until its task ends, however it ends.
struct InFlight(Rc<Tracker>);

impl InFlight {
    fn enter(tracker: &Rc<Tracker>) -> Self {
        tracker.in_flight.set(tracker.in_flight.get() + 1);
        Self(Rc::clone(tracker))
    }
}

impl Drop for InFlight {
    fn drop(&mut self) {
        let left = self.0.in_flight.get().saturating_sub(1);
        self.0.in_flight.set(left);
        if left == 0 {
            self.0.idle.notify_waiters();
        }
    }
}

impl<T, S> Orchestrator<T, S>
where
    T: HttpTransport + 'static,
    S: DownloadSink + 'static,
{
    pub fn new(transport: T, saver: SaveTrigger<S>, settings: OrchestratorSettings) -> Self {
        Self {
            transport,
            saver,
            settings,
            tracker: Rc::default(),
        }
    }

    pub fn settings(&self) -> &OrchestratorSettings {
        &self.settings
    }

    pub fn saver(&self) -> &SaveTrigger<S> {
        &self.saver
    }

    /// Binds a context-menu interceptor to `el`. The listener holds `el`
    /// weakly, so instrumenting does not keep thumbnails alive.
    pub fn attach(self: &Rc<Self>, el: &Element) {
        let this = Rc::clone(self);
        let bound = el.downgrade();
        el.add_context_menu_listener(move |event: &ContextMenuEvent| {
            event.prevent_default();
            if let Some(el) = bound.upgrade() {
                this.handle(&el);
            }
        });
    }

    /// Plans a download for `el` and spawns it on the current `LocalSet`.
    /// Returns false when the surrounding structure is missing.
    pub fn handle(self: &Rc<Self>, el: &Element) -> bool {
        let Some(request) = plan_download(el, &self.settings) else {
            return false;
        };
        tracing::debug!(url = %request.url, filename = %request.filename, "download requested");
        let this = Rc::clone(self);
        let in_flight = InFlight::enter(&self.tracker);
        tokio::task::spawn_local(async move {
            let _in_flight = in_flight;
            if let Err(err) = this.execute(&request).await {
                tracing::warn!(url = %request.url, "download failed: {}", err);
            }
        });
        true
    }

    /// Runs one download to completion and returns where it was saved. Same
    /// marker and cleanup as a right-click, but the outcome is reported.
    ///
    /// Must run inside a `tokio::task::LocalSet` (the save schedules object
    /// URL release with `spawn_local`).
    pub async fn run(&self, request: DownloadRequest) -> Result<PathBuf, OrchestrateError> {
        let _in_flight = InFlight::enter(&self.tracker);
        self.execute(&request).await
    }

    async fn execute(&self, request: &DownloadRequest) -> Result<PathBuf, OrchestrateError> {
        let marker = ProgressMarker::attach(&request.thumbnail, &self.settings.markers);
        let path = self.fetch_and_save(request).await?;
        marker.done();
        tokio::time::sleep(self.settings.post_save_hold).await;
        Ok(path)
    }

    async fn fetch_and_save(&self, request: &DownloadRequest) -> Result<PathBuf, OrchestrateError> {
        let response = fetch(&self.transport, FetchRequest::get(&request.url)).await?;
        if !response.ok() {
            tracing::warn!(url = %request.url, status = response.status(), "non-2xx response saved as-is");
        }
        let bytes = response.bytes().await?;
        let path = self
            .saver
            .trigger(bytes, &request.filename, Some(&request.url))?;
        Ok(path)
    }

    pub fn in_flight(&self) -> usize {
        self.tracker.in_flight.get()
    }

    /// Resolves once no download is in flight.
    pub async fn wait_idle(&self) {
        loop {
            let notified = self.tracker.idle.notified();
            if self.tracker.in_flight.get() == 0 {
                return;
            }
            notified.await;
        }
    }
}

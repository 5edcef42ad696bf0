//! Candidate scanner: finds feed thumbnails and instruments each exactly once.
//!
//! Polls the document on a fixed interval. An element is recorded in a weak
//! identity set once instrumented and never looked at again, even if its
//! `src` changes later.

use std::future::Future;
use std::time::Duration;

use tokio::time::MissedTickBehavior;

use crate::config::SaveConfig;
use crate::dom::{AttrSelector, Document, Element, WeakElementSet};

pub struct CandidateScanner {
    selector: AttrSelector,
    seen: WeakElementSet,
}

impl CandidateScanner {
    /// Scans for `img[src^="<thumbnail_prefix>"]`.
    pub fn new(thumbnail_prefix: &str) -> Self {
        Self {
            selector: AttrSelector::tag("img").prefix("src", thumbnail_prefix),
            seen: WeakElementSet::new(),
        }
    }

    pub fn from_config(cfg: &SaveConfig) -> Self {
        Self::new(&cfg.thumbnail_prefix)
    }

    pub fn selector(&self) -> &AttrSelector {
        &self.selector
    }

    pub fn is_instrumented(&self, el: &Element) -> bool {
        self.seen.contains(el)
    }

    /// Live instrumented elements.
    pub fn instrumented_count(&self) -> usize {
        self.seen.len()
    }

    /// One pass. Calls `instrument` for each element not seen before, then
    /// records them. Returns the newly instrumented elements.
    pub fn scan<F>(&mut self, doc: &Document, mut instrument: F) -> Vec<Element>
    where
        F: FnMut(&Element),
    {
        let fresh: Vec<Element> = doc
            .query_selector_all(&self.selector)
            .into_iter()
            .filter(|el| !self.seen.contains(el))
            .collect();
        if fresh.is_empty() {
            return fresh;
        }
        tracing::debug!(count = fresh.len(), "instrumenting new thumbnails");
        for el in &fresh {
            instrument(el);
        }
        for el in &fresh {
            self.seen.insert(el);
        }
        fresh
    }

    /// Scans every `interval` until `shutdown` resolves.
    pub async fn run<F, S>(&mut self, doc: &Document, interval: Duration, mut instrument: F, shutdown: S)
    where
        F: FnMut(&Element),
        S: Future<Output = ()>,
    {
        let mut ticker = tokio::time::interval(interval);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
        tokio::pin!(shutdown);
        loop {
            tokio::select! {
                _ = &mut shutdown => break,
                _ = ticker.tick() => {
                    self.scan(doc, &mut instrument);
                }
            }
        }
    }
}

//! Session-local object URLs for in-memory blobs.

use std::cell::RefCell;
use std::collections::HashMap;
use std::sync::Arc;

use uuid::Uuid;

const SCHEME_PREFIX: &str = "blob:bsky-save/";

/// `blob:` URL -> bytes. Valid for the lifetime of the registry (one page
/// session) or until revoked.
#[derive(Debug, Default)]
pub struct ObjectUrlRegistry {
    entries: RefCell<HashMap<String, Arc<[u8]>>>,
}

impl ObjectUrlRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn create(&self, data: Arc<[u8]>) -> String {
        let url = format!("{}{}", SCHEME_PREFIX, Uuid::new_v4());
        self.entries.borrow_mut().insert(url.clone(), data);
        url
    }

    /// Looks up `url`, ignoring any `#fragment`.
    pub fn resolve(&self, url: &str) -> Option<Arc<[u8]>> {
        let key = url.split('#').next().unwrap_or(url);
        self.entries.borrow().get(key).cloned()
    }

    /// Returns false if `url` was not registered.
    pub fn revoke(&self, url: &str) -> bool {
        let removed = self.entries.borrow_mut().remove(url).is_some();
        if removed {
            tracing::debug!(url, "object URL revoked");
        }
        removed
    }

    pub fn len(&self) -> usize {
        self.entries.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.borrow().is_empty()
    }
}

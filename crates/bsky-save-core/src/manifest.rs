//! Declarative manifest: where the saver runs and what it may do.

use regex::Regex;
use serde::{Deserialize, Serialize};

/// Grant for the cross-origin request capability.
pub const GRANT_XHR: &str = "xmlhttpRequest";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScriptManifest {
    pub name: String,
    pub version: String,
    pub description: String,
    /// URL patterns with `*` wildcards, e.g. `https://bsky.app/*`.
    pub match_patterns: Vec<String>,
    pub grants: Vec<String>,
}

impl Default for ScriptManifest {
    fn default() -> Self {
        Self {
            name: "bsky-save".to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
            description: "Right-click a Bluesky image thumbnail to save the full-size image".to_string(),
            match_patterns: vec!["https://bsky.app/*".to_string()],
            grants: vec![GRANT_XHR.to_string()],
        }
    }
}

impl ScriptManifest {
    /// True if any match pattern accepts `url`.
    pub fn matches(&self, url: &str) -> bool {
        self.match_patterns.iter().any(|p| pattern_matches(p, url))
    }

    pub fn has_grant(&self, grant: &str) -> bool {
        self.grants.iter().any(|g| g == grant)
    }
}

fn pattern_matches(pattern: &str, url: &str) -> bool {
    let body = pattern
        .split('*')
        .map(regex::escape)
        .collect::<Vec<_>>()
        .join(".*");
    match Regex::new(&format!("^{}$", body)) {
        Ok(re) => re.is_match(url),
        Err(err) => {
            tracing::warn!(pattern, "bad match pattern: {}", err);
            false
        }
    }
}

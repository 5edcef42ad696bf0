//! Author handle and post id from a profile link target.

use regex::Regex;
use std::sync::OnceLock;

fn post_path_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"/profile/(?<profile>[^/]+)/post/(?<post>[^/]+)").expect("valid post path regex")
    })
}

/// Metadata of the post a thumbnail belongs to.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PostInfo {
    pub handle: String,
    pub post_id: String,
}

impl PostInfo {
    pub fn new(handle: impl Into<String>, post_id: impl Into<String>) -> Self {
        Self {
            handle: handle.into(),
            post_id: post_id.into(),
        }
    }

    /// Parses `/profile/<handle>/post/<id>`. No match gives empty fields.
    pub fn from_href(href: &str) -> Self {
        match post_path_re().captures(href) {
            Some(caps) => Self::new(&caps["profile"], &caps["post"]),
            None => Self::default(),
        }
    }
}

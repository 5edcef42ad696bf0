//! Synchronous part of a right-click: structure lookups and naming.

use crate::date::{normalize_label, NormalizedDate};
use crate::dom::{AttrSelector, Element};
use crate::naming::{asset_filename, fullsize_url, synthesize_filename, PostInfo};

use super::OrchestratorSettings;

/// Where post metadata lives relative to a thumbnail.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageTargets {
    /// Ancestor representing one post.
    pub post_container: AttrSelector,
    /// Anchor inside the post pointing at `/profile/<handle>/post/<id>`.
    pub profile_link: AttrSelector,
}

impl PageTargets {
    /// With `require_tooltip`, the profile link must also carry
    /// `data-tooltip` (current markup); without, `dir="auto"` suffices.
    pub fn new(require_tooltip: bool) -> Self {
        let mut profile_link = AttrSelector::tag("a")
            .prefix("href", "/profile/")
            .equals("dir", "auto");
        if require_tooltip {
            profile_link = profile_link.exists("data-tooltip");
        }
        Self {
            post_container: AttrSelector::any().equals("role", "link"),
            profile_link,
        }
    }
}

impl Default for PageTargets {
    fn default() -> Self {
        Self::new(true)
    }
}

/// Everything needed to fetch and save one image. Consumed once.
#[derive(Debug, Clone)]
pub struct DownloadRequest {
    pub thumbnail: Element,
    pub url: String,
    pub filename: String,
    pub post: PostInfo,
    pub date: NormalizedDate,
}

/// Derives the request for a right-clicked thumbnail, or `None` when the post
/// container, the profile link, or an asset filename is missing.
pub fn plan_download(thumbnail: &Element, settings: &OrchestratorSettings) -> Option<DownloadRequest> {
    let Some(post_el) = thumbnail.closest(&settings.targets.post_container) else {
        tracing::debug!(selector = %settings.targets.post_container, "no post container");
        return None;
    };
    let Some(link) = post_el.query_selector(&settings.targets.profile_link) else {
        tracing::debug!(selector = %settings.targets.profile_link, "no profile link");
        return None;
    };

    let src = thumbnail.attr("src")?;
    let url = fullsize_url(&src, &settings.thumbnail_segment, &settings.fullsize_segment);
    let Some(asset) = asset_filename(&url) else {
        tracing::debug!(url = %url, "no asset filename");
        return None;
    };

    let href = link.attr("href").unwrap_or_default();
    let label = link.attr("aria-label").unwrap_or_default();
    let post = PostInfo::from_href(&href);
    let date = normalize_label(&label, &settings.date_garbage_parts);
    let filename = synthesize_filename(&settings.style, &post, &date, &asset);

    Some(DownloadRequest {
        thumbnail: thumbnail.clone(),
        url,
        filename,
        post,
        date,
    })
}

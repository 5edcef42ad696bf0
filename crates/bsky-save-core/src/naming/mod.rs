//! Download filename synthesis.
//!
//! `[bsky] <handle>—<YYYY.MM.DD>—<post id>—<asset>`, with the date segment
//! (and its separator) dropped when no date was derived.

mod asset;
mod post;
mod sanitize;

pub use asset::{asset_filename, fullsize_url, transform_asset_filename};
pub use post::PostInfo;
pub use sanitize::{fit_filename, sanitize_filename, SAVE_NAME_MAX};

use crate::config::SaveConfig;
use crate::date::{format_date, NormalizedDate};

/// Prefix, separator and date rendering for synthesized names.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilenameStyle {
    pub prefix: String,
    pub separator: String,
    pub utc: bool,
}

impl Default for FilenameStyle {
    fn default() -> Self {
        Self::from(&SaveConfig::default())
    }
}

impl From<&SaveConfig> for FilenameStyle {
    fn from(cfg: &SaveConfig) -> Self {
        Self {
            prefix: cfg.filename_prefix.clone(),
            separator: cfg.separator.clone(),
            utc: cfg.utc_dates,
        }
    }
}

/// Builds the sanitized download name. `asset` may be raw or already
/// transformed; the transform is applied either way so no name ends in `jpeg`.
/// Overlong names lose the end of the handle (and date), never the post id or
/// the asset.
pub fn synthesize_filename(
    style: &FilenameStyle,
    post: &PostInfo,
    date: &NormalizedDate,
    asset: &str,
) -> String {
    let sep = style.separator.as_str();
    let date_part = match date {
        NormalizedDate::Date(d) => format!("{}{}", sep, format_date(d, "YYYY.MM.DD", style.utc)),
        NormalizedDate::Absent => String::new(),
    };
    let head = format!("{} {}{}", style.prefix, post.handle, date_part);
    let tail = format!("{}{}{}{}", sep, post.post_id, sep, transform_asset_filename(asset));
    fit_filename(&head, &tail)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    fn alice() -> PostInfo {
        PostInfo::new("alice.bsky.social", "abc123")
    }

    #[test]
    fn with_date() {
        let date = NormalizedDate::Date(Utc.with_ymd_and_hms(2024, 11, 18, 0, 0, 0).unwrap());
        let asset = transform_asset_filename("xyz@jpeg");
        assert_eq!(
            synthesize_filename(&FilenameStyle::default(), &alice(), &date, &asset),
            "[bsky] alice.bsky.social\u{2014}2024.11.18\u{2014}abc123\u{2014}xyz.jpg"
        );
    }

    #[test]
    fn absent_date_drops_segment_and_separator() {
        let asset = transform_asset_filename("xyz@jpeg");
        assert_eq!(
            synthesize_filename(&FilenameStyle::default(), &alice(), &NormalizedDate::Absent, &asset),
            "[bsky] alice.bsky.social\u{2014}abc123\u{2014}xyz.jpg"
        );
    }

    #[test]
    fn empty_post_info_still_names() {
        let out = synthesize_filename(
            &FilenameStyle::default(),
            &PostInfo::default(),
            &NormalizedDate::Absent,
            "a.png",
        );
        assert_eq!(out, "[bsky] \u{2014}\u{2014}a.png");
    }

    #[test]
    fn raw_asset_is_transformed() {
        let out = synthesize_filename(&FilenameStyle::default(), &alice(), &NormalizedDate::Absent, "q@jpeg");
        assert!(out.ends_with("q.jpg"));
    }

    #[test]
    fn longest_handle_keeps_post_id_and_extension() {
        let handle = format!("{}.bsky.social", "a".repeat(241));
        assert_eq!(handle.len(), 253);
        let date = NormalizedDate::Date(Utc.with_ymd_and_hms(2024, 11, 18, 0, 0, 0).unwrap());
        let post = PostInfo::new(&handle, "3lbabc");
        let out = synthesize_filename(&FilenameStyle::default(), &post, &date, "bafkxyz@jpeg");
        assert!(out.len() <= SAVE_NAME_MAX);
        assert!(out.starts_with("[bsky] aaaa"));
        assert!(out.ends_with("\u{2014}3lbabc\u{2014}bafkxyz.jpg"));
    }

    #[test]
    fn custom_style() {
        let style = FilenameStyle {
            prefix: "bsky".into(),
            separator: "_".into(),
            utc: true,
        };
        let date = NormalizedDate::Date(Utc.with_ymd_and_hms(2023, 1, 5, 12, 0, 0).unwrap());
        assert_eq!(
            synthesize_filename(&style, &alice(), &date, "z.png"),
            "bsky alice.bsky.social_2023.01.05_abc123_z.png"
        );
    }
}

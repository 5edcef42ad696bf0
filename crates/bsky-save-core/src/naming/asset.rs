//! Thumbnail URL -> full-size URL -> asset filename.

/// Replaces the thumbnail path segment with the full-size one.
pub fn fullsize_url(thumbnail_src: &str, thumbnail_segment: &str, fullsize_segment: &str) -> String {
    thumbnail_src.replacen(thumbnail_segment, fullsize_segment, 1)
}

/// Last path segment of `url`, or `None` when the path has no trailing segment.
pub fn asset_filename(url: &str) -> Option<String> {
    let parsed = url::Url::parse(url).ok()?;
    let segment = parsed.path().rsplit('/').next()?;
    if segment.is_empty() || segment == "." || segment == ".." {
        return None;
    }
    Some(segment.to_string())
}

/// `bafk...@jpeg` -> `bafk....jpg`.
///
/// Every `@` (the CDN's content-type separator) becomes `.`, then a trailing
/// `jpeg` becomes `jpg`.
pub fn transform_asset_filename(raw: &str) -> String {
    let name = raw.replace('@', ".");
    match name.strip_suffix("jpeg") {
        Some(stem) => format!("{}jpg", stem),
        None => name,
    }
}

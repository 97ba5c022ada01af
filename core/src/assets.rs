//! Image URL resolution for roster artwork.
//!
//! The roster backend hands out paths relative to its own origin, sometimes
//! with and sometimes without a leading slash, and occasionally absolute URLs.

/// Origin that relative roster image paths are served from.
pub const ASSET_ORIGIN: &str = "https://marvelrivalsapi.com";

fn has_http_scheme(path: &str) -> bool {
    let lower = path.get(..8).unwrap_or(path).to_ascii_lowercase();
    lower.starts_with("http://") || lower.starts_with("https://")
}

/// Resolve a possibly-relative image path against [`ASSET_ORIGIN`].
///
/// Absolute `http(s)` URLs are returned unchanged; anything else is joined to
/// the origin, inserting a `/` when the path lacks one. Idempotent.
pub fn resolve_image_url(path: &str) -> String {
    if has_http_scheme(path) {
        return path.to_string();
    }
    if path.starts_with('/') {
        format!("{ASSET_ORIGIN}{path}")
    } else {
        format!("{ASSET_ORIGIN}/{path}")
    }
}

/// Icon flavour of [`resolve_image_url`]; a missing icon stays missing.
pub fn resolve_icon_url(icon: Option<&str>) -> Option<String> {
    icon.map(resolve_image_url)
}

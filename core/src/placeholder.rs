use crate::candidates::{Candidate, CandidateSet};
use crate::mime::{MIME_AVIF, MIME_JPEG, MIME_PNG, MIME_WEBP};
use crate::request::Category;

pub const DEFAULT_ASSET_BASE: &str = "/assets/pixel";

pub const NOT_FOUND_AVIF: &str = "noimage.avif";
pub const NOT_FOUND_WEBP: &str = "noimage.webp";
pub const NOT_FOUND_JPG: &str = "noimage.jpg";
pub const NO_AVATAR_AVIF: &str = "noavatar.avif";
pub const NO_AVATAR_WEBP: &str = "noavatar.webp";
pub const NO_AVATAR_PNG: &str = "noavatar.png";

/// Resolved URLs of the six bundled fallback images.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PlaceholderAssets {
    pub not_found_avif: String,
    pub not_found_webp: String,
    pub not_found_jpg: String,
    pub no_avatar_avif: String,
    pub no_avatar_webp: String,
    pub no_avatar_png: String,
}

impl PlaceholderAssets {
    pub fn with_base(base: &str) -> Self {
        let base = base.trim_end_matches('/');
        let join = |name: &str| format!("{base}/{name}");
        Self {
            not_found_avif: join(NOT_FOUND_AVIF),
            not_found_webp: join(NOT_FOUND_WEBP),
            not_found_jpg: join(NOT_FOUND_JPG),
            no_avatar_avif: join(NO_AVATAR_AVIF),
            no_avatar_webp: join(NO_AVATAR_WEBP),
            no_avatar_png: join(NO_AVATAR_PNG),
        }
    }
}

impl Default for PlaceholderAssets {
    fn default() -> Self {
        Self::with_base(DEFAULT_ASSET_BASE)
    }
}

/// Picks the "no avatar" or "not found" set, filtered by the same format flags
/// as the failed request. Never empty.
pub fn select_placeholder(
    assets: &PlaceholderAssets,
    category: Category,
    avif: bool,
    webp: bool,
) -> CandidateSet {
    let avatar = category.is_avatar();
    let mut candidates = Vec::with_capacity(3);
    if avif {
        let url = if avatar { &assets.no_avatar_avif } else { &assets.not_found_avif };
        candidates.push(Candidate::new(url.clone(), MIME_AVIF));
    }
    if webp {
        let url = if avatar { &assets.no_avatar_webp } else { &assets.not_found_webp };
        candidates.push(Candidate::new(url.clone(), MIME_WEBP));
    }
    if avatar {
        candidates.push(Candidate::new(assets.no_avatar_png.clone(), MIME_PNG));
    } else {
        candidates.push(Candidate::new(assets.not_found_jpg.clone(), MIME_JPEG));
    }
    CandidateSet::new(candidates)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn base_trailing_slash_is_trimmed() {
        let assets = PlaceholderAssets::with_base("https://static.example/pixel/");
        assert_eq!(
            assets.no_avatar_png,
            "https://static.example/pixel/noavatar.png"
        );
    }

    #[test]
    fn generic_set_ends_with_jpeg() {
        let set = select_placeholder(&PlaceholderAssets::default(), Category::Normal, true, true);
        let types: Vec<&str> = set.iter().map(|c| c.mime_type.as_str()).collect();
        assert_eq!(types, vec!["image/avif", "image/webp", "image/jpeg"]);
        assert_eq!(
            set.fallback().map(|c| c.url.as_str()),
            Some("/assets/pixel/noimage.jpg")
        );
    }

    #[test]
    fn avatar_without_modern_formats_is_single_png() {
        let set = select_placeholder(&PlaceholderAssets::default(), Category::Avatar, false, false);
        assert_eq!(set.len(), 1);
        assert_eq!(set.as_slice()[0].mime_type, "image/png");
    }
}

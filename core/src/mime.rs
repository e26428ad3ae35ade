pub const MIME_AVIF: &str = "image/avif";
pub const MIME_WEBP: &str = "image/webp";
pub const MIME_JPEG: &str = "image/jpeg";
pub const MIME_PNG: &str = "image/png";

const MIME_TABLE: &[(&str, &str)] = &[
    ("jpg", MIME_JPEG),
    ("jpeg", MIME_JPEG),
    ("png", MIME_PNG),
    ("webp", MIME_WEBP),
    ("gif", "image/gif"),
    ("tiff", "image/tiff"),
    ("tif", "image/tiff"),
    ("avif", MIME_AVIF),
];

/// Maps a short extension token (`"jpg"`, `"avif"`) to its MIME type.
///
/// Unknown tokens yield an empty string; a `<source>` with an empty `type` is
/// still emitted for them.
pub fn resolve_mime(token: &str) -> &'static str {
    MIME_TABLE
        .iter()
        .find(|(ext, _)| *ext == token)
        .map(|(_, mime)| *mime)
        .unwrap_or("")
}

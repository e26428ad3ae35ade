use std::fmt::Write;

use crate::request::{Category, Folder, ImageRequest, DEFAULT_BACKEND_URL};

/// Query parameters for one backend image URL.
#[derive(Clone, Copy, Debug)]
pub struct SrcParams<'a> {
    pub src: &'a str,
    pub width: Option<u32>,
    pub height: Option<u32>,
    pub quality: Option<u32>,
    pub format: Option<&'a str>,
    pub user_id: Option<&'a str>,
    pub backend_url: &'a str,
    pub folder: Folder,
    pub category: Category,
}

impl<'a> SrcParams<'a> {
    pub fn new(src: &'a str) -> Self {
        Self {
            src,
            width: None,
            height: None,
            quality: None,
            format: None,
            user_id: None,
            backend_url: DEFAULT_BACKEND_URL,
            folder: Folder::Public,
            category: Category::Normal,
        }
    }

    pub fn for_request(request: &'a ImageRequest, format: &'a str) -> Self {
        Self {
            src: &request.src,
            width: request.width,
            height: request.height,
            quality: request.quality,
            format: Some(format),
            user_id: request.user_id.as_deref(),
            backend_url: &request.backend_url,
            folder: request.folder,
            category: request.category,
        }
    }
}

/// Builds `<backend>?width=..&height=..&quality=..&format=..&src=..&folder=..&type=..&userId=..`.
///
/// Optional parameters are concatenated verbatim, so a missing width leaves
/// `?&height=` and a request with none of them starts with `?&src=`. `src` is
/// not percent-encoded. Backends already parse this shape.
pub fn build_src_url(params: &SrcParams<'_>) -> String {
    let mut url = String::with_capacity(params.backend_url.len() + params.src.len() + 64);
    url.push_str(params.backend_url);
    url.push('?');
    if let Some(width) = params.width.filter(|value| *value != 0) {
        let _ = write!(url, "width={width}");
    }
    if let Some(height) = params.height.filter(|value| *value != 0) {
        let _ = write!(url, "&height={height}");
    }
    if let Some(quality) = params.quality.filter(|value| *value != 0) {
        let _ = write!(url, "&quality={quality}");
    }
    if let Some(format) = params.format.filter(|value| !value.is_empty()) {
        let _ = write!(url, "&format={format}");
    }
    let _ = write!(
        url,
        "&src={}&folder={}&type={}",
        params.src,
        params.folder.as_str(),
        params.category.as_str()
    );
    if let Some(user_id) = params.user_id.filter(|value| !value.is_empty()) {
        let _ = write!(url, "&userId={user_id}");
    }
    url
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn full_parameter_order() {
        let params = SrcParams {
            width: Some(200),
            height: Some(100),
            quality: Some(80),
            format: Some("avif"),
            user_id: Some("u-7"),
            ..SrcParams::new("cat.jpg")
        };
        assert_eq!(
            build_src_url(&params),
            "/api/v1/pixel/serve?width=200&height=100&quality=80&format=avif&src=cat.jpg&folder=public&type=normal&userId=u-7"
        );
    }

    #[test]
    fn missing_width_keeps_leading_separator() {
        let params = SrcParams {
            height: Some(50),
            ..SrcParams::new("dog.png")
        };
        assert_eq!(
            build_src_url(&params),
            "/api/v1/pixel/serve?&height=50&src=dog.png&folder=public&type=normal"
        );
    }

    #[test]
    fn zero_and_empty_values_are_skipped() {
        let params = SrcParams {
            width: Some(0),
            quality: Some(0),
            format: Some(""),
            user_id: Some(""),
            backend_url: "/img",
            folder: Folder::Private,
            category: Category::Avatar,
            ..SrcParams::new("a b.jpg")
        };
        assert_eq!(
            build_src_url(&params),
            "/img?&src=a b.jpg&folder=private&type=avatar"
        );
    }
}

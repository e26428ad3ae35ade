use pixel_core::{
    generate_candidates, resolve_mime, select_placeholder, Category, Folder, ImageRequest,
    PlaceholderAssets,
};

fn cat_request() -> ImageRequest {
    ImageRequest::new("cat.jpg")
        .with_size(Some(200), Some(100))
        .with_quality(Some(80))
}

fn format_param(url: &str) -> Option<&str> {
    url.split('&')
        .find_map(|pair| pair.strip_prefix("format="))
}

#[test]
fn avif_candidate_url_matches_backend_contract() {
    let set = generate_candidates(&cat_request());
    assert_eq!(
        set.as_slice()[0].url,
        "/api/v1/pixel/serve?width=200&height=100&quality=80&format=avif&src=cat.jpg&folder=public&type=normal"
    );
}

#[test]
fn all_formats_are_ordered_avif_webp_base() {
    let set = generate_candidates(&cat_request());
    let types: Vec<&str> = set.iter().map(|c| c.mime_type.as_str()).collect();
    assert_eq!(types, vec!["image/avif", "image/webp", "image/jpeg"]);
}

#[test]
fn disabling_a_format_removes_only_that_entry() {
    let without_avif = generate_candidates(&cat_request().with_formats(false, true));
    let types: Vec<&str> = without_avif.iter().map(|c| c.mime_type.as_str()).collect();
    assert_eq!(types, vec!["image/webp", "image/jpeg"]);

    let without_webp = generate_candidates(&cat_request().with_formats(true, false));
    let types: Vec<&str> = without_webp.iter().map(|c| c.mime_type.as_str()).collect();
    assert_eq!(types, vec!["image/avif", "image/jpeg"]);
}

#[test]
fn last_candidate_uses_base_format() {
    for format in ["jpeg", "png", "gif", "tiff", "webp"] {
        let request = cat_request().with_base_format(format);
        let set = generate_candidates(&request);
        let fallback = set.fallback().expect("fallback candidate");
        assert_eq!(fallback.mime_type, resolve_mime(format));
        assert_eq!(format_param(&fallback.url), Some(format));
    }
}

#[test]
fn generation_is_pure() {
    let request = cat_request()
        .with_user_id(Some("42".to_string()))
        .with_folder(Folder::Private)
        .with_category(Category::Avatar);
    assert_eq!(generate_candidates(&request), generate_candidates(&request));
}

#[test]
fn request_backend_url_is_used() {
    let request = ImageRequest::new("p.png").with_backend_url("https://img.example/serve");
    let set = generate_candidates(&request);
    assert!(set
        .iter()
        .all(|candidate| candidate.url.starts_with("https://img.example/serve?&format=")));
}

#[test]
fn avatar_placeholder_without_avif() {
    let set = select_placeholder(&PlaceholderAssets::default(), Category::Avatar, false, true);
    assert_eq!(set.len(), 2);
    assert_eq!(set.as_slice()[0].url, "/assets/pixel/noavatar.webp");
    assert_eq!(set.as_slice()[0].mime_type, "image/webp");
    let fallback = set.fallback().expect("fallback");
    assert_eq!(fallback.url, "/assets/pixel/noavatar.png");
    assert_eq!(fallback.mime_type, "image/png");
}

use serde::{Deserialize, Serialize};

use crate::mime::{resolve_mime, MIME_AVIF, MIME_WEBP};
use crate::request::ImageRequest;
use crate::src_url::{build_src_url, SrcParams};

#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Candidate {
    pub url: String,
    pub mime_type: String,
}

impl Candidate {
    pub fn new(url: impl Into<String>, mime_type: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            mime_type: mime_type.into(),
        }
    }
}

/// Ordered from most modern to most compatible. The last entry doubles as the
/// `<img>` fallback.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CandidateSet(Vec<Candidate>);

impl CandidateSet {
    pub fn new(candidates: Vec<Candidate>) -> Self {
        Self(candidates)
    }

    pub fn empty() -> Self {
        Self(Vec::new())
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Candidate> {
        self.0.iter()
    }

    pub fn as_slice(&self) -> &[Candidate] {
        &self.0
    }

    pub fn fallback(&self) -> Option<&Candidate> {
        self.0.last()
    }
}

impl<'a> IntoIterator for &'a CandidateSet {
    type Item = &'a Candidate;
    type IntoIter = std::slice::Iter<'a, Candidate>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

/// Derives the AVIF, WebP and base-format candidates for `request`.
///
/// Direct requests produce an empty set; the raw source is used as-is.
pub fn generate_candidates(request: &ImageRequest) -> CandidateSet {
    if request.direct {
        return CandidateSet::empty();
    }
    let mut candidates = Vec::with_capacity(3);
    if request.avif {
        candidates.push(Candidate::new(
            build_src_url(&SrcParams::for_request(request, "avif")),
            MIME_AVIF,
        ));
    }
    if request.webp {
        candidates.push(Candidate::new(
            build_src_url(&SrcParams::for_request(request, "webp")),
            MIME_WEBP,
        ));
    }
    candidates.push(Candidate::new(
        build_src_url(&SrcParams::for_request(request, &request.base_format)),
        resolve_mime(&request.base_format),
    ));
    CandidateSet::new(candidates)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn direct_request_has_no_candidates() {
        let request = ImageRequest::new("https://cdn.example/cat.jpg").with_direct(true);
        assert!(generate_candidates(&request).is_empty());
    }

    #[test]
    fn unknown_base_format_keeps_entry_with_empty_type() {
        let request = ImageRequest::new("cat.bmp")
            .with_formats(false, false)
            .with_base_format("bmp");
        let set = generate_candidates(&request);
        assert_eq!(set.len(), 1);
        let fallback = set.fallback().expect("fallback");
        assert_eq!(fallback.mime_type, "");
        assert!(fallback.url.contains("&format=bmp&"));
    }

    #[test]
    fn serializes_as_plain_list() {
        let set = CandidateSet::new(vec![Candidate::new("/a", "image/png")]);
        let json = serde_json::to_string(&set).expect("serialize");
        assert_eq!(json, r#"[{"url":"/a","mime_type":"image/png"}]"#);
    }
}

use image::ImageFormat;
use pixel_core::{Candidate, ProbeError};
use tracing::debug;
use url::Url;

/// Fetches one candidate and accepts it when the backend answers 2xx with a
/// body recognized as an image.
pub(crate) async fn probe_candidate(
    client: &reqwest::Client,
    origin: &Url,
    candidate: &Candidate,
) -> Result<(), ProbeError> {
    let url = origin
        .join(&candidate.url)
        .map_err(|err| ProbeError::Unavailable {
            reason: format!("{}: {err}", candidate.url),
        })?;
    debug!(%url, mime = %candidate.mime_type, "fetching candidate");
    let response = client
        .get(url.clone())
        .send()
        .await
        .map_err(|err| ProbeError::Unavailable {
            reason: err.to_string(),
        })?;
    let status = response.status();
    if !status.is_success() {
        debug!(%url, %status, "candidate rejected by backend");
        return Err(decode_error(candidate));
    }
    let body = response.bytes().await.map_err(|err| ProbeError::Unavailable {
        reason: err.to_string(),
    })?;
    match sniff_format(&body) {
        Some(format) => {
            debug!(%url, ?format, bytes = body.len(), "candidate decoded");
            Ok(())
        }
        None => {
            debug!(%url, bytes = body.len(), "candidate body is not an image");
            Err(decode_error(candidate))
        }
    }
}

pub(crate) fn sniff_format(body: &[u8]) -> Option<ImageFormat> {
    image::guess_format(body).ok()
}

fn decode_error(candidate: &Candidate) -> ProbeError {
    ProbeError::Decode {
        url: candidate.url.clone(),
    }
}

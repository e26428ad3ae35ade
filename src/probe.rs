use gloo::timers::future::TimeoutFuture;
use pixel_core::{probe_all, with_deadline, Candidate, CandidateSet, ProbeError};
use wasm_bindgen::closure::Closure;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::HtmlImageElement;

/// Decodes every candidate off-DOM. Resolves once all of them loaded, or with
/// the first failure.
pub(crate) async fn probe_batch(
    candidates: &CandidateSet,
    timeout_ms: Option<u32>,
) -> Result<(), ProbeError> {
    let work = probe_all(candidates, probe_candidate);
    match timeout_ms {
        Some(ms) => with_deadline(work, TimeoutFuture::new(ms), u64::from(ms)).await,
        None => work.await,
    }
}

async fn probe_candidate(candidate: &Candidate) -> Result<(), ProbeError> {
    let img = HtmlImageElement::new().map_err(|err| ProbeError::Unavailable {
        reason: js_err(err),
    })?;
    let promise = js_sys::Promise::new(&mut |resolve, reject| {
        let onload = Closure::once(move || {
            let _ = resolve.call0(&JsValue::NULL);
        });
        let onerror = Closure::once(move || {
            let _ = reject.call1(&JsValue::NULL, &JsValue::from_str("image_decode_failed"));
        });
        img.set_onload(Some(onload.as_ref().unchecked_ref()));
        img.set_onerror(Some(onerror.as_ref().unchecked_ref()));
        onload.forget();
        onerror.forget();
    });
    img.set_src(&candidate.url);
    let outcome = wasm_bindgen_futures::JsFuture::from(promise).await;
    img.set_onload(None);
    img.set_onerror(None);
    outcome.map(|_| ()).map_err(|_| ProbeError::Decode {
        url: candidate.url.clone(),
    })
}

fn js_err(error: JsValue) -> String {
    if let Some(value) = error.as_string() {
        return value;
    }
    if let Ok(json) = js_sys::JSON::stringify(&error) {
        if let Some(value) = json.as_string() {
            return value;
        }
    }
    "js error".to_string()
}

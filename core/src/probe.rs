use std::future::Future;
use std::pin::pin;

use futures_util::future::{select, try_join_all, Either};

use crate::candidates::{Candidate, CandidateSet};

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ProbeError {
    #[error("failed to decode {url}")]
    Decode { url: String },
    #[error("probe batch timed out after {after_ms}ms")]
    Timeout { after_ms: u64 },
    #[error("probe unavailable: {reason}")]
    Unavailable { reason: String },
}

/// Probes every candidate concurrently and succeeds only if all of them do.
///
/// Completion order between probes is unspecified; the first failure settles
/// the whole batch.
pub async fn probe_all<'a, F, Fut>(candidates: &'a CandidateSet, probe: F) -> Result<(), ProbeError>
where
    F: FnMut(&'a Candidate) -> Fut,
    Fut: Future<Output = Result<(), ProbeError>>,
{
    try_join_all(candidates.iter().map(probe)).await?;
    Ok(())
}

/// Races `work` against a platform timer. `deadline` completing first turns
/// into [`ProbeError::Timeout`].
pub async fn with_deadline<W, D>(work: W, deadline: D, after_ms: u64) -> Result<(), ProbeError>
where
    W: Future<Output = Result<(), ProbeError>>,
    D: Future<Output = ()>,
{
    let work = pin!(work);
    let deadline = pin!(deadline);
    match select(work, deadline).await {
        Either::Left((outcome, _)) => outcome,
        Either::Right(((), _)) => Err(ProbeError::Timeout { after_ms }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use futures_util::future::{pending, ready};

    fn set(urls: &[&str]) -> CandidateSet {
        CandidateSet::new(
            urls.iter()
                .map(|url| Candidate::new(*url, "image/png"))
                .collect(),
        )
    }

    #[tokio::test]
    async fn all_success_resolves_ok() {
        let candidates = set(&["/a", "/b", "/c"]);
        let outcome = probe_all(&candidates, |_| ready(Ok(()))).await;
        assert_eq!(outcome, Ok(()));
    }

    #[tokio::test]
    async fn single_failure_rejects_batch() {
        let candidates = set(&["/a", "/broken", "/c"]);
        let outcome = probe_all(&candidates, |candidate| {
            let result = if candidate.url == "/broken" {
                Err(ProbeError::Decode {
                    url: candidate.url.clone(),
                })
            } else {
                Ok(())
            };
            ready(result)
        })
        .await;
        assert_eq!(
            outcome,
            Err(ProbeError::Decode {
                url: "/broken".to_string()
            })
        );
    }

    #[tokio::test]
    async fn empty_batch_is_vacuously_ok() {
        let candidates = CandidateSet::empty();
        let outcome = probe_all(&candidates, |_| pending::<Result<(), ProbeError>>()).await;
        assert_eq!(outcome, Ok(()));
    }

    #[tokio::test]
    async fn hung_probe_times_out() {
        let candidates = set(&["/hang"]);
        let work = probe_all(&candidates, |_| pending::<Result<(), ProbeError>>());
        let deadline = tokio::time::sleep(std::time::Duration::from_millis(5));
        let outcome = with_deadline(work, deadline, 5).await;
        assert_eq!(outcome, Err(ProbeError::Timeout { after_ms: 5 }));
    }

    #[tokio::test]
    async fn finished_work_beats_deadline() {
        let outcome = with_deadline(ready(Ok(())), pending::<()>(), 1000).await;
        assert_eq!(outcome, Ok(()));
    }
}

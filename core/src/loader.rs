use crate::candidates::{generate_candidates, CandidateSet};
use crate::placeholder::{select_placeholder, PlaceholderAssets};
use crate::probe::ProbeError;
use crate::request::{Category, ImageRequest, RequestIdentity};

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum DisplayState {
    Loading,
    Committed(CandidateSet),
    Failed(CandidateSet),
}

impl DisplayState {
    pub fn is_loaded(&self) -> bool {
        !matches!(self, DisplayState::Loading)
    }

    pub fn candidates(&self) -> Option<&CandidateSet> {
        match self {
            DisplayState::Loading => None,
            DisplayState::Committed(set) | DisplayState::Failed(set) => Some(set),
        }
    }
}

/// How the first request seen by a loader is handled.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum MountPolicy {
    /// Commit without probing so the initial paint never shows a skeleton.
    #[default]
    CommitImmediately,
    /// Probe the first request like any later change.
    Probe,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Generation(u64);

impl Generation {
    pub fn get(self) -> u64 {
        self.0
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ProbeBatch {
    pub generation: Generation,
    pub candidates: CandidateSet,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum LoadAction {
    Unchanged,
    Committed,
    Probe(ProbeBatch),
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Resolution {
    Committed,
    Failed,
    Stale,
}

#[derive(Clone, Debug)]
struct PendingBatch {
    generation: Generation,
    candidates: CandidateSet,
    category: Category,
    avif: bool,
    webp: bool,
}

/// Owns the display state of one image instance.
///
/// Every identity change bumps the generation; only the batch tagged with the
/// current generation may commit. Resolutions carrying an older generation are
/// reported as [`Resolution::Stale`] and leave the state untouched.
#[derive(Clone, Debug)]
pub struct ProgressiveLoader {
    assets: PlaceholderAssets,
    policy: MountPolicy,
    generation: u64,
    identity: Option<RequestIdentity>,
    pending: Option<PendingBatch>,
    state: DisplayState,
    displayed: CandidateSet,
}

impl ProgressiveLoader {
    pub fn new(assets: PlaceholderAssets) -> Self {
        Self::with_policy(assets, MountPolicy::default())
    }

    pub fn with_policy(assets: PlaceholderAssets, policy: MountPolicy) -> Self {
        Self {
            assets,
            policy,
            generation: 0,
            identity: None,
            pending: None,
            state: DisplayState::Loading,
            displayed: CandidateSet::empty(),
        }
    }

    pub fn state(&self) -> &DisplayState {
        &self.state
    }

    pub fn is_loaded(&self) -> bool {
        self.state.is_loaded()
    }

    /// Last committed set. Kept while a newer batch is in flight.
    pub fn displayed(&self) -> &CandidateSet {
        &self.displayed
    }

    pub fn generation(&self) -> Generation {
        Generation(self.generation)
    }

    pub fn has_pending(&self) -> bool {
        self.pending.is_some()
    }

    pub fn update(&mut self, request: &ImageRequest) -> LoadAction {
        let identity = request.identity();
        if self.identity.as_ref() == Some(&identity) {
            return LoadAction::Unchanged;
        }
        let first = self.identity.is_none();
        self.identity = Some(identity);
        self.generation = self.generation.wrapping_add(1);
        self.pending = None;

        let candidates = generate_candidates(request);
        let probe = !(first && self.policy == MountPolicy::CommitImmediately);
        if !probe || candidates.is_empty() {
            self.commit(DisplayState::Committed(candidates));
            return LoadAction::Committed;
        }

        let generation = Generation(self.generation);
        self.pending = Some(PendingBatch {
            generation,
            candidates: candidates.clone(),
            category: request.category,
            avif: request.avif,
            webp: request.webp,
        });
        self.state = DisplayState::Loading;
        LoadAction::Probe(ProbeBatch {
            generation,
            candidates,
        })
    }

    pub fn resolve(&mut self, generation: Generation, outcome: Result<(), ProbeError>) -> Resolution {
        let current = self
            .pending
            .as_ref()
            .is_some_and(|pending| pending.generation == generation);
        if !current {
            return Resolution::Stale;
        }
        let Some(pending) = self.pending.take() else {
            return Resolution::Stale;
        };
        match outcome {
            Ok(()) => {
                self.commit(DisplayState::Committed(pending.candidates));
                Resolution::Committed
            }
            Err(_) => {
                let placeholder =
                    select_placeholder(&self.assets, pending.category, pending.avif, pending.webp);
                self.commit(DisplayState::Failed(placeholder));
                Resolution::Failed
            }
        }
    }

    /// Invalidates whatever batch is still in flight.
    pub fn unmount(&mut self) {
        self.generation = self.generation.wrapping_add(1);
        self.pending = None;
    }

    fn commit(&mut self, state: DisplayState) {
        if let Some(set) = state.candidates() {
            self.displayed = set.clone();
        }
        self.state = state;
    }
}

pub mod candidates;
pub mod loader;
pub mod mime;
pub mod placeholder;
pub mod probe;
pub mod render;
pub mod request;
pub mod src_url;

pub use candidates::{generate_candidates, Candidate, CandidateSet};
pub use loader::{
    DisplayState, Generation, LoadAction, MountPolicy, ProbeBatch, ProgressiveLoader, Resolution,
};
pub use mime::resolve_mime;
pub use placeholder::{select_placeholder, PlaceholderAssets, DEFAULT_ASSET_BASE};
pub use probe::{probe_all, with_deadline, ProbeError};
pub use render::{plan, ImagePlan, RenderPlan, SkeletonPlan, ViewOptions};
pub use request::{
    Category, Folder, ImageRequest, RequestIdentity, DEFAULT_BACKEND_URL, DEFAULT_BASE_FORMAT,
};
pub use src_url::{build_src_url, SrcParams};

//! Responsive image component for Yew.
//!
//! [`Pixel`] renders a `<picture>` offering AVIF, WebP and a base format from
//! an image backend, shows a [`Skeleton`] while a changed source is being
//! probed, and falls back to bundled "not found" / "no avatar" images when any
//! variant fails to decode. The pure parts live in [`pixel_core`].

mod component;
mod config;
mod probe;
mod skeleton;

pub use component::{Pixel, PixelProps};
pub use config::{defaults, set_defaults, PixelDefaults};
pub use skeleton::{Skeleton, SkeletonProps};

pub use pixel_core::{
    build_src_url, generate_candidates, resolve_mime, select_placeholder, Candidate, CandidateSet,
    Category, Folder, ImageRequest, PlaceholderAssets, SrcParams, DEFAULT_ASSET_BASE,
    DEFAULT_BACKEND_URL,
};

use std::cell::RefCell;

use pixel_core::{PlaceholderAssets, DEFAULT_ASSET_BASE, DEFAULT_BACKEND_URL};

/// Process-wide fallbacks for properties a `Pixel` instance leaves unset.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PixelDefaults {
    pub backend_url: String,
    pub asset_base: String,
}

impl Default for PixelDefaults {
    fn default() -> Self {
        Self {
            backend_url: build_time_value(
                option_env!("PIXEL_BACKEND_URL").or(option_env!("TRUNK_PUBLIC_PIXEL_BACKEND_URL")),
            )
            .unwrap_or_else(|| DEFAULT_BACKEND_URL.to_string()),
            asset_base: build_time_value(
                option_env!("PIXEL_ASSET_BASE").or(option_env!("TRUNK_PUBLIC_PIXEL_ASSET_BASE")),
            )
            .unwrap_or_else(|| DEFAULT_ASSET_BASE.to_string()),
        }
    }
}

impl PixelDefaults {
    pub fn placeholder_assets(&self) -> PlaceholderAssets {
        PlaceholderAssets::with_base(&self.asset_base)
    }
}

thread_local! {
    static DEFAULTS: RefCell<Option<PixelDefaults>> = RefCell::new(None);
}

/// Overrides the defaults for instances mounted afterwards.
pub fn set_defaults(defaults: PixelDefaults) {
    DEFAULTS.with(|slot| {
        *slot.borrow_mut() = Some(defaults);
    });
}

pub fn defaults() -> PixelDefaults {
    DEFAULTS
        .with(|slot| slot.borrow().clone())
        .unwrap_or_default()
}

fn build_time_value(raw: Option<&'static str>) -> Option<String> {
    let trimmed = raw?.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

use crate::candidates::{Candidate, CandidateSet};
use crate::request::Category;

pub const LOADING_LAZY: &str = "lazy";
pub const LOADING_EAGER: &str = "eager";

const HIDDEN_STYLE: &str = "width: 1px; height: 1px;";
const BACKGROUND_DECLS: &[(&str, &str)] = &[
    ("position", "absolute"),
    ("top", "0"),
    ("left", "0"),
    ("right", "0"),
    ("bottom", "0"),
    ("width", "100%"),
    ("height", "100%"),
    ("object-fit", "cover"),
    ("object-position", "center"),
    ("z-index", "-1"),
];
const SKELETON_BACKGROUND_DECLS: &[(&str, &str)] = &[
    ("position", "absolute"),
    ("top", "0"),
    ("right", "0"),
    ("bottom", "0"),
    ("left", "0"),
    ("z-index", "0"),
];

/// Presentation inputs that never influence which candidates are generated.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ViewOptions {
    pub width: Option<u32>,
    pub height: Option<u32>,
    pub style: String,
    pub background: bool,
    pub lazy: bool,
    pub loader: bool,
    pub dynamic_dimension: bool,
    pub direct: bool,
    pub category: Category,
}

impl Default for ViewOptions {
    fn default() -> Self {
        Self {
            width: None,
            height: None,
            style: String::new(),
            background: false,
            lazy: true,
            loader: true,
            dynamic_dimension: false,
            direct: false,
            category: Category::Normal,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SkeletonPlan {
    pub width: String,
    pub height: String,
    pub css: String,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ImagePlan {
    Empty,
    Direct {
        src: String,
        style: String,
        loading: &'static str,
    },
    Picture {
        sources: Vec<Candidate>,
        fallback_src: String,
        style: String,
        loading: &'static str,
    },
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RenderPlan {
    pub skeleton: Option<SkeletonPlan>,
    pub image: ImagePlan,
}

pub fn plan(options: &ViewOptions, raw_src: &str, loaded: bool, displayed: &CandidateSet) -> RenderPlan {
    let skeleton = (!loaded && options.loader).then(|| skeleton_plan(options));
    let style = if loaded {
        image_style(options)
    } else {
        HIDDEN_STYLE.to_string()
    };
    let loading = if options.lazy { LOADING_LAZY } else { LOADING_EAGER };

    let image = if options.direct {
        let src = displayed
            .fallback()
            .map(|candidate| candidate.url.clone())
            .unwrap_or_else(|| raw_src.to_string());
        ImagePlan::Direct { src, style, loading }
    } else if let Some(fallback) = displayed.fallback() {
        ImagePlan::Picture {
            sources: displayed.as_slice().to_vec(),
            fallback_src: fallback.url.clone(),
            style,
            loading,
        }
    } else {
        ImagePlan::Empty
    };

    RenderPlan { skeleton, image }
}

/// Inline style for a committed image: fixed sizing, then the caller's style,
/// then the background fill.
pub fn image_style(options: &ViewOptions) -> String {
    let mut css = String::new();
    let width = options.width.filter(|value| *value != 0);
    let height = options.height.filter(|value| *value != 0);
    if (width.is_some() || height.is_some()) && !options.dynamic_dimension {
        push_decl(&mut css, "width", &px_or(width, "auto"));
        push_decl(&mut css, "height", &px_or(height, "auto"));
    }
    push_raw(&mut css, &options.style);
    if options.background {
        for (name, value) in BACKGROUND_DECLS {
            push_decl(&mut css, name, value);
        }
    }
    css
}

fn skeleton_plan(options: &ViewOptions) -> SkeletonPlan {
    let mut css = String::new();
    if options.background {
        for (name, value) in SKELETON_BACKGROUND_DECLS {
            push_decl(&mut css, name, value);
        }
    }
    if options.category.is_avatar() {
        push_decl(&mut css, "border-radius", "50%");
    }
    SkeletonPlan {
        width: px_or(options.width.filter(|value| *value != 0), "100%"),
        height: px_or(options.height.filter(|value| *value != 0), "100%"),
        css,
    }
}

fn px_or(value: Option<u32>, fallback: &str) -> String {
    match value {
        Some(value) => format!("{value}px"),
        None => fallback.to_string(),
    }
}

fn push_decl(css: &mut String, name: &str, value: &str) {
    if !css.is_empty() {
        css.push(' ');
    }
    css.push_str(name);
    css.push_str(": ");
    css.push_str(value);
    css.push(';');
}

fn push_raw(css: &mut String, raw: &str) {
    let raw = raw.trim();
    if raw.is_empty() {
        return;
    }
    if !css.is_empty() {
        css.push(' ');
    }
    css.push_str(raw);
    if !raw.ends_with(';') {
        css.push(';');
    }
}

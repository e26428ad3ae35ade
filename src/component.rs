use pixel_core::render::{self, ImagePlan, ViewOptions};
use pixel_core::{Category, Folder, ImageRequest, LoadAction, ProgressiveLoader, Resolution};
use wasm_bindgen_futures::spawn_local;
use yew::prelude::*;

use crate::config::{self, PixelDefaults};
use crate::probe;
use crate::skeleton::Skeleton;

#[derive(Properties, PartialEq, Clone)]
pub struct PixelProps {
    pub src: AttrValue,
    #[prop_or_default]
    pub class: Classes,
    #[prop_or(AttrValue::Static("image"))]
    pub alt: AttrValue,
    #[prop_or_default]
    pub style: AttrValue,
    #[prop_or(false)]
    pub background: bool,
    #[prop_or(true)]
    pub lazy: bool,
    #[prop_or_default]
    pub width: Option<u32>,
    #[prop_or_default]
    pub height: Option<u32>,
    #[prop_or_default]
    pub quality: Option<u32>,
    #[prop_or_default]
    pub user_id: Option<AttrValue>,
    #[prop_or(true)]
    pub avif: bool,
    #[prop_or(true)]
    pub webp: bool,
    /// Base format token, also the `<img>` fallback format.
    #[prop_or(AttrValue::Static("jpeg"))]
    pub mime_type: AttrValue,
    /// Skip format negotiation and render `src` untouched.
    #[prop_or(false)]
    pub direct: bool,
    #[prop_or(true)]
    pub loader: bool,
    #[prop_or(false)]
    pub dynamic_dimension: bool,
    #[prop_or_default]
    pub backend_url: Option<AttrValue>,
    #[prop_or_default]
    pub folder: Folder,
    #[prop_or_default]
    pub category: Category,
    /// Give up on a probe batch after this many milliseconds. Unbounded when unset.
    #[prop_or_default]
    pub probe_timeout_ms: Option<u32>,
}

impl PixelProps {
    fn request(&self, defaults: &PixelDefaults) -> ImageRequest {
        let backend_url = self
            .backend_url
            .as_ref()
            .map(|url| url.to_string())
            .unwrap_or_else(|| defaults.backend_url.clone());
        ImageRequest::new(self.src.to_string())
            .with_size(self.width, self.height)
            .with_quality(self.quality)
            .with_user_id(self.user_id.as_ref().map(|id| id.to_string()))
            .with_folder(self.folder)
            .with_category(self.category)
            .with_base_format(self.mime_type.to_string())
            .with_formats(self.avif, self.webp)
            .with_direct(self.direct)
            .with_backend_url(backend_url)
    }

    fn view_options(&self) -> ViewOptions {
        ViewOptions {
            width: self.width,
            height: self.height,
            style: self.style.to_string(),
            background: self.background,
            lazy: self.lazy,
            loader: self.loader,
            dynamic_dimension: self.dynamic_dimension,
            direct: self.direct,
            category: self.category,
        }
    }
}

#[function_component(Pixel)]
pub fn pixel(props: &PixelProps) -> Html {
    let defaults = use_memo((), |_| config::defaults());
    let request = props.request(&defaults);
    // The first request commits during the first render so no skeleton flashes.
    let loader = {
        let request = request.clone();
        let defaults = defaults.clone();
        use_mut_ref(move || {
            let mut loader = ProgressiveLoader::new(defaults.placeholder_assets());
            loader.update(&request);
            loader
        })
    };
    let trigger = use_force_update();

    {
        let loader = loader.clone();
        let trigger = trigger.clone();
        let request = request.clone();
        let timeout_ms = props.probe_timeout_ms;
        use_effect_with(request.identity(), move |_| {
            let action = loader.borrow_mut().update(&request);
            match action {
                LoadAction::Unchanged => {}
                LoadAction::Committed => trigger.force_update(),
                LoadAction::Probe(batch) => {
                    gloo::console::log!(
                        "pixel: probing",
                        request.src.clone(),
                        batch.candidates.len() as u32
                    );
                    trigger.force_update();
                    spawn_local(async move {
                        let outcome = probe::probe_batch(&batch.candidates, timeout_ms).await;
                        let failure = outcome.as_ref().err().map(ToString::to_string);
                        let resolution = loader.borrow_mut().resolve(batch.generation, outcome);
                        match resolution {
                            Resolution::Committed => trigger.force_update(),
                            Resolution::Failed => {
                                gloo::console::warn!(
                                    "pixel: showing placeholder",
                                    failure.unwrap_or_default()
                                );
                                trigger.force_update();
                            }
                            Resolution::Stale => {
                                gloo::console::log!(
                                    "pixel: dropped stale probe batch",
                                    batch.generation.get() as f64
                                );
                            }
                        }
                    });
                }
            }
            || ()
        });
    }

    {
        let loader = loader.clone();
        use_effect_with((), move |_| move || loader.borrow_mut().unmount());
    }

    let (loaded, displayed) = {
        let loader = loader.borrow();
        (loader.is_loaded(), loader.displayed().clone())
    };
    let view = render::plan(&props.view_options(), &request.src, loaded, &displayed);

    let skeleton = match view.skeleton {
        Some(skeleton) => html! {
            <Skeleton
                width={skeleton.width}
                height={skeleton.height}
                custom_css={skeleton.css}
            />
        },
        None => html! {},
    };

    let image = match view.image {
        ImagePlan::Empty => html! {},
        ImagePlan::Direct { src, style, loading } => html! {
            <img
                class={props.class.clone()}
                alt={props.alt.clone()}
                src={src}
                style={style}
                loading={loading}
            />
        },
        ImagePlan::Picture {
            sources,
            fallback_src,
            style,
            loading,
        } => html! {
            <picture class={props.class.clone()} style={style.clone()}>
                { for sources.iter().enumerate().map(|(index, source)| html! {
                    <source
                        key={index}
                        srcset={source.url.clone()}
                        type={source.mime_type.clone()}
                    />
                }) }
                <img
                    class={props.class.clone()}
                    alt={props.alt.clone()}
                    src={fallback_src}
                    style={style}
                    loading={loading}
                />
            </picture>
        },
    };

    html! {
        <>
            { skeleton }
            { image }
        </>
    }
}

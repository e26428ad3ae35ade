use yew::prelude::*;

const SKELETON_CLASS: &str = "pixel-skeleton";
const SKELETON_CSS: &str = "@keyframes pixel-skeleton-shimmer {\
  0% { background-position: 200% 0; }\
  100% { background-position: -200% 0; }\
}\
.pixel-skeleton {\
  background: #ccc;\
  background: linear-gradient(90deg, #eee 25%, #ddd 50%, #eee 75%);\
  background-size: 200% 100%;\
  animation: pixel-skeleton-shimmer 1.5s infinite linear;\
  border-radius: 4px;\
}";

#[derive(Properties, PartialEq, Clone)]
pub struct SkeletonProps {
    pub width: AttrValue,
    pub height: AttrValue,
    #[prop_or_default]
    pub border_radius: Option<AttrValue>,
    #[prop_or_default]
    pub class: Classes,
    #[prop_or_default]
    pub custom_css: AttrValue,
}

/// Shimmering block shown while an image is not yet committed.
#[function_component(Skeleton)]
pub fn skeleton(props: &SkeletonProps) -> Html {
    let mut style = format!("width: {}; height: {};", props.width, props.height);
    if let Some(radius) = props.border_radius.as_ref() {
        style.push_str(&format!(" border-radius: {radius};"));
    }
    let custom = props.custom_css.trim();
    if !custom.is_empty() {
        style.push(' ');
        style.push_str(custom);
    }
    html! {
        <>
            <style>{ SKELETON_CSS }</style>
            <div
                class={classes!(SKELETON_CLASS, props.class.clone())}
                style={style}
                aria-hidden="true"
            />
        </>
    }
}

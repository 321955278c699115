use dioxus::prelude::*;
use shared_types::text::background_image_style;

/// Full-bleed container with a cover background image behind its children.
#[component]
pub fn BackgroundImage(
    src: String,
    #[props(extends = GlobalAttributes)] attributes: Vec<Attribute>,
    children: Element,
) -> Element {
    let base = vec![Attribute::new("class", "background-image", None, false)];
    let merged = dioxus_primitives::merge_attributes(vec![base, attributes]);
    let style = background_image_style(&src);

    rsx! {
        div {
            style: "{style}",
            ..merged,
            {children}
        }
    }
}

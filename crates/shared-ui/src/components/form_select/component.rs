use dioxus::prelude::*;

/// A fleet-styled native select for forms and filters.
#[component]
pub fn FormSelect(
    #[props(default)] value: String,
    #[props(default)] onchange: EventHandler<Event<FormData>>,
    #[props(default)] label: String,
    #[props(default = false)] disabled: bool,
    #[props(extends = GlobalAttributes)] attributes: Vec<Attribute>,
    children: Element,
) -> Element {
    let base = vec![Attribute::new("class", "form-select", None, false)];
    let merged = dioxus_primitives::merge_attributes(vec![base, attributes]);

    rsx! {
        document::Link { rel: "stylesheet", href: asset!("./style.css") }
        div { class: "form-select-wrapper",
            if !label.is_empty() {
                label { class: "form-select-label", "{label}" }
            }
            select {
                value: value,
                disabled: disabled,
                onchange: move |evt| onchange.call(evt),
                ..merged,
                {children}
            }
        }
    }
}

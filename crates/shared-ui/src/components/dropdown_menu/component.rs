use dioxus::prelude::*;
use dioxus_primitives::dropdown_menu as prim;

pub use dioxus_primitives::dropdown_menu::DropdownMenuItemProps;

#[component]
pub fn DropdownMenu(mut props: prim::DropdownMenuProps) -> Element {
    props
        .attributes
        .push(Attribute::new("class", "fleet-dropdown", None, false));

    rsx! {
        document::Link { rel: "stylesheet", href: asset!("./style.css") }
        prim::DropdownMenu { ..props }
    }
}

#[component]
pub fn DropdownMenuTrigger(mut props: prim::DropdownMenuTriggerProps) -> Element {
    props.attributes.push(Attribute::new(
        "class",
        "fleet-dropdown-trigger",
        None,
        false,
    ));

    rsx! {
        prim::DropdownMenuTrigger { ..props }
    }
}

#[component]
pub fn DropdownMenuContent(mut props: prim::DropdownMenuContentProps) -> Element {
    props.attributes.push(Attribute::new(
        "class",
        "fleet-dropdown-content",
        None,
        false,
    ));

    rsx! {
        prim::DropdownMenuContent { ..props }
    }
}

#[component]
pub fn DropdownMenuItem<T: Clone + PartialEq + 'static>(
    mut props: prim::DropdownMenuItemProps<T>,
) -> Element {
    props
        .attributes
        .push(Attribute::new("class", "fleet-dropdown-item", None, false));

    rsx! {
        prim::DropdownMenuItem::<T> { ..props }
    }
}

#[component]
pub fn DropdownMenuSeparator() -> Element {
    rsx! {
        div { class: "fleet-dropdown-separator" }
    }
}

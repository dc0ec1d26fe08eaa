use dioxus::prelude::*;

/// Shared state for controlling sidebar open/closed.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SidebarState {
    pub open: bool,
}

/// Provides sidebar state context to children.
#[component]
pub fn SidebarProvider(#[props(default = true)] default_open: bool, children: Element) -> Element {
    let state = use_signal(|| SidebarState { open: default_open });
    use_context_provider(|| state);

    rsx! {
        document::Link { rel: "stylesheet", href: asset!("./style.css") }
        div {
            class: "sidebar-provider",
            "data-sidebar-open": if (state)().open { "true" } else { "false" },
            {children}
        }
    }
}

fn use_sidebar() -> Signal<SidebarState> {
    use_context::<Signal<SidebarState>>()
}

/// The main sidebar container. Collapses based on context state; shows a
/// backdrop overlay on small viewports when open.
#[component]
pub fn Sidebar(
    #[props(extends = GlobalAttributes)] attributes: Vec<Attribute>,
    children: Element,
) -> Element {
    let mut state = use_sidebar();
    let is_open = (state)().open;

    let base = vec![
        Attribute::new("class", "sidebar", None, false),
        Attribute::new(
            "data-state",
            if is_open { "open" } else { "closed" },
            None,
            false,
        ),
    ];
    let merged = dioxus_primitives::merge_attributes(vec![base, attributes]);

    rsx! {
        if is_open {
            div {
                class: "sidebar-backdrop",
                onclick: move |_| state.set(SidebarState { open: false }),
            }
        }
        aside {
            ..merged,
            {children}
        }
    }
}

/// Header section inside the Sidebar.
#[component]
pub fn SidebarHeader(children: Element) -> Element {
    rsx! {
        div { class: "sidebar-header", {children} }
    }
}

/// Scrollable content area of the Sidebar.
#[component]
pub fn SidebarContent(children: Element) -> Element {
    rsx! {
        div { class: "sidebar-content", {children} }
    }
}

/// Footer section inside the Sidebar.
#[component]
pub fn SidebarFooter(children: Element) -> Element {
    rsx! {
        div { class: "sidebar-footer", {children} }
    }
}

/// A group of related sidebar items.
#[component]
pub fn SidebarGroup(children: Element) -> Element {
    rsx! {
        div { class: "sidebar-group", {children} }
    }
}

/// Label for a sidebar group.
#[component]
pub fn SidebarGroupLabel(children: Element) -> Element {
    rsx! {
        div { class: "sidebar-group-label", {children} }
    }
}

/// Content container for a sidebar group.
#[component]
pub fn SidebarGroupContent(children: Element) -> Element {
    rsx! {
        div { class: "sidebar-group-content", {children} }
    }
}

/// Menu list inside a group.
#[component]
pub fn SidebarMenu(children: Element) -> Element {
    rsx! {
        ul { class: "sidebar-menu", {children} }
    }
}

/// A single menu entry.
#[component]
pub fn SidebarMenuItem(children: Element) -> Element {
    rsx! {
        li { class: "sidebar-menu-item", {children} }
    }
}

/// A clickable menu button; highlights when `active`.
#[component]
pub fn SidebarMenuButton(#[props(default = false)] active: bool, children: Element) -> Element {
    rsx! {
        span {
            class: "sidebar-menu-button",
            "data-active": if active { "true" } else { "false" },
            {children}
        }
    }
}

/// Thin divider between sidebar sections.
#[component]
pub fn SidebarSeparator() -> Element {
    rsx! {
        div { class: "sidebar-separator" }
    }
}

/// The main content area beside the sidebar.
#[component]
pub fn SidebarInset(children: Element) -> Element {
    rsx! {
        div { class: "sidebar-inset", {children} }
    }
}

/// Toggle button for the sidebar, typically placed in the top navbar.
#[component]
pub fn SidebarTrigger(children: Element) -> Element {
    let mut state = use_sidebar();

    rsx! {
        button {
            class: "sidebar-trigger",
            onclick: move |_| {
                let open = (state)().open;
                state.set(SidebarState { open: !open });
            },
            {children}
        }
    }
}

pub mod dashboard;
pub mod login;
pub mod manifests;
pub mod not_found;
pub mod register;
pub mod trucks;

use crate::auth::use_auth;
use dioxus::prelude::*;
use dioxus_free_icons::icons::ld_icons::{LdClipboardList, LdLayoutDashboard, LdTruck};
use dioxus_free_icons::Icon;
use shared_ui::{
    DropdownMenu, DropdownMenuContent, DropdownMenuItem, DropdownMenuSeparator,
    DropdownMenuTrigger, Navbar, Sidebar, SidebarContent, SidebarFooter, SidebarGroup,
    SidebarGroupContent, SidebarGroupLabel, SidebarHeader, SidebarInset, SidebarMenu,
    SidebarMenuButton, SidebarMenuItem, SidebarProvider, SidebarSeparator, SidebarTrigger,
};

use dashboard::Dashboard;
use login::Login;
use not_found::NotFound;
use register::Register;

/// Application routes.
#[derive(Clone, Routable, Debug, PartialEq)]
pub enum Route {
    #[route("/login?:redirect")]
    Login { redirect: Option<String> },
    #[route("/register")]
    Register {},
    #[layout(AuthGuard)]
    #[layout(AppLayout)]
    #[route("/")]
    Dashboard {},
    #[route("/trucks")]
    TruckList {},
    #[route("/trucks/new")]
    TruckCreate {},
    #[route("/trucks/:id")]
    TruckDetail { id: String },
    #[route("/manifests")]
    ManifestList {},
    #[route("/manifests/new")]
    ManifestCreate {},
    #[route("/manifests/:id")]
    ManifestDetail { id: String },
    #[end_layout]
    #[end_layout]
    #[route("/:..route")]
    NotFound { route: Vec<String> },
}

/// Auth guard layout — redirects to /login if not authenticated.
///
/// Uses `use_server_future` with `?` to propagate suspension properly.
/// During SSR the component suspends until the auth check completes, then
/// Dioxus re-renders with the resolved data embedded in the HTML. During
/// hydration the embedded data is available immediately. A
/// `SuspenseBoundary` in `App` catches the suspension and shows a spinner.
#[component]
fn AuthGuard() -> Element {
    let mut auth = use_auth();

    // `?` propagates RenderError during suspension so Dioxus knows to
    // re-render this component when the server future resolves.
    let resource = use_server_future(move || async move { server::api::get_current_user().await })?;

    // Clone the result out of the resource guard to avoid lifetime issues.
    let result = resource.read().as_ref().cloned();

    match result {
        Some(Ok(Some(user))) => {
            if !auth.is_authenticated() {
                auth.set_user(user);
            }
            rsx! { Outlet::<Route> {} }
        }
        Some(Ok(None)) | Some(Err(_)) => {
            auth.clear_auth();
            navigator().push(Route::Login { redirect: None });
            rsx! {
                div { class: "auth-guard-loading",
                    p { "Redirecting to login..." }
                }
            }
        }
        None => {
            rsx! {
                div { class: "auth-guard-loading",
                    p { "Loading..." }
                }
            }
        }
    }
}

/// Main app layout with sidebar and top navbar.
#[component]
fn AppLayout() -> Element {
    let route: Route = use_route();
    let mut auth = use_auth();

    let mut theme_state = use_context_provider(|| shared_ui::theme::ThemeState {
        is_dark: Signal::new(true),
    });

    let display_name = use_memo(move || {
        auth.current_user
            .read()
            .as_ref()
            .map(|u| u.name.clone())
            .unwrap_or_else(|| "Guest".to_string())
    });
    let role_label = use_memo(move || {
        auth.current_user
            .read()
            .as_ref()
            .map(|u| u.role().as_str().to_string())
            .unwrap_or_default()
    });

    let page_title = match &route {
        Route::Dashboard {} => "Dashboard",
        Route::TruckList {} | Route::TruckCreate {} | Route::TruckDetail { .. } => "Trucks",
        Route::ManifestList {} | Route::ManifestCreate {} | Route::ManifestDetail { .. } => {
            "Manifests"
        }
        Route::Login { .. } | Route::Register {} => "Auth",
        _ => "",
    };

    rsx! {
        document::Link { rel: "stylesheet", href: asset!("./layout.css") }

        SidebarProvider { default_open: true,
            Sidebar {
                SidebarHeader {
                    div {
                        class: "sidebar-brand",
                        span {
                            class: "sidebar-brand-name",
                            "FleetDeck"
                        }
                    }
                }

                SidebarSeparator {}

                SidebarContent {
                    SidebarGroup {
                        SidebarGroupLabel { "Overview" }
                        SidebarGroupContent {
                            SidebarMenu {
                                SidebarMenuItem {
                                    Link { to: Route::Dashboard {},
                                        SidebarMenuButton { active: matches!(route, Route::Dashboard {}),
                                            Icon::<LdLayoutDashboard> { icon: LdLayoutDashboard, width: 18, height: 18 }
                                            "Dashboard"
                                        }
                                    }
                                }
                            }
                        }
                    }

                    SidebarSeparator {}

                    SidebarGroup {
                        SidebarGroupLabel { "Fleet" }
                        SidebarGroupContent {
                            SidebarMenu {
                                SidebarMenuItem {
                                    Link { to: Route::TruckList {},
                                        SidebarMenuButton { active: matches!(route, Route::TruckList {} | Route::TruckCreate {} | Route::TruckDetail { .. }),
                                            Icon::<LdTruck> { icon: LdTruck, width: 18, height: 18 }
                                            "Trucks"
                                        }
                                    }
                                }
                                SidebarMenuItem {
                                    Link { to: Route::ManifestList {},
                                        SidebarMenuButton { active: matches!(route, Route::ManifestList {} | Route::ManifestCreate {} | Route::ManifestDetail { .. }),
                                            Icon::<LdClipboardList> { icon: LdClipboardList, width: 18, height: 18 }
                                            "Manifests"
                                        }
                                    }
                                }
                            }
                        }
                    }
                }

                SidebarFooter {
                    div {
                        class: "sidebar-footer-row",
                        span { class: "sidebar-footer-label", "{role_label}" }
                        button {
                            class: "sidebar-theme-toggle",
                            onclick: move |_| {
                                let dark = !*theme_state.is_dark.read();
                                theme_state.is_dark.set(dark);
                                theme_state.apply();
                            },
                            if (theme_state.is_dark)() { "Light mode" } else { "Dark mode" }
                        }
                    }
                }
            }

            SidebarInset {
                Navbar {
                    div {
                        class: "navbar-bar",

                        SidebarTrigger {
                            span { class: "navbar-trigger-icon", "\u{2630}" }
                        }

                        span {
                            class: "navbar-title",
                            "{page_title}"
                        }

                        div { class: "navbar-spacer" }

                        DropdownMenu {
                            DropdownMenuTrigger {
                                span { class: "navbar-user",
                                    {display_name.read().split_whitespace().filter_map(|w| w.chars().next()).take(2).collect::<String>().to_uppercase()}
                                }
                            }
                            DropdownMenuContent {
                                DropdownMenuItem::<String> {
                                    value: "profile".to_string(),
                                    index: 0usize,
                                    span { class: "navbar-user-name", "{display_name}" }
                                }
                                DropdownMenuSeparator {}
                                DropdownMenuItem::<String> {
                                    value: "logout".to_string(),
                                    index: 1usize,
                                    on_select: move |_: String| {
                                        // Fail-open: local session clears and navigation
                                        // happens even when the backend call rejects.
                                        spawn(async move {
                                            let _ = server::api::logout().await;
                                        });
                                        auth.clear_auth();
                                        navigator().push(Route::Login { redirect: None });
                                    },
                                    "Sign Out"
                                }
                            }
                        }
                    }
                }

                div {
                    class: "page-content",
                    Outlet::<Route> {}
                }
            }
        }
    }
}

// Route components

#[component]
fn TruckList() -> Element {
    trucks::list::TruckListPage()
}

#[component]
fn TruckCreate() -> Element {
    trucks::create::TruckCreatePage()
}

#[component]
fn TruckDetail(id: String) -> Element {
    rsx! { trucks::detail::TruckDetailPage { id: id } }
}

#[component]
fn ManifestList() -> Element {
    manifests::list::ManifestListPage()
}

#[component]
fn ManifestCreate() -> Element {
    manifests::create::ManifestCreatePage()
}

#[component]
fn ManifestDetail(id: String) -> Element {
    rsx! { manifests::detail::ManifestDetailPage { id: id } }
}

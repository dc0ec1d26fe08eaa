pub mod driver;
pub mod fleet;

use dioxus::prelude::*;
use shared_types::{Action, DashboardData};

use crate::auth::use_auth;

/// Role-adaptive dashboard — one server round trip loads profile, trucks,
/// and manifests, then the resolved role picks the view: fleet-wide for
/// admin and dispatcher, assignment-scoped for drivers.
#[component]
pub fn Dashboard() -> Element {
    let mut auth = use_auth();

    let mut resource =
        use_server_future(move || async move { server::api::load_dashboard().await })?;

    let data: DashboardData = resource
        .read()
        .as_ref()
        .and_then(|r| r.as_ref().ok().cloned())
        .unwrap_or_default();

    // The loader's profile is the freshest session snapshot; keep the
    // client mirror in sync.
    if let Some(user) = &data.user {
        if auth.current_user.read().as_ref() != Some(user) {
            auth.set_user(user.clone());
        }
    }

    let fleet_wide = data
        .user
        .as_ref()
        .map(|u| u.role().can(Action::ViewFleet))
        .unwrap_or(false);

    rsx! {
        document::Link { rel: "stylesheet", href: asset!("./dashboard.css") }

        if fleet_wide {
            fleet::FleetDashboard {
                user: data.user.clone(),
                trucks: data.trucks.clone(),
                manifests: data.manifests.clone(),
            }
        } else {
            driver::DriverDashboard {
                user: data.user.clone(),
                trucks: data.trucks.clone(),
                manifests: data.manifests.clone(),
                on_refresh: move |_| resource.restart(),
            }
        }
    }
}

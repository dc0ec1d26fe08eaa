use dioxus::prelude::*;
use shared_types::{Action, Manifest, MANIFEST_STATUSES};
use shared_ui::{
    Badge, Button, ButtonVariant, Card, CardContent, DataTable, DataTableBody, DataTableCell,
    DataTableColumn, DataTableHeader, DataTableRow, FormSelect, PageActions, PageHeader,
    PageTitle, SearchBar, Skeleton,
};

use crate::auth::use_can;
use crate::format_helpers::format_date_human;
use crate::routes::dashboard::fleet::manifest_badge_variant;
use crate::routes::Route;

#[component]
pub fn ManifestListPage() -> Element {
    let can_manage = use_can(Action::ManageManifests);

    let mut status_filter = use_signal(String::new);

    let data = use_resource(move || async move { server::api::list_manifests().await.ok() });

    let filtered: Option<Vec<Manifest>> = data.read().as_ref().and_then(|manifests| {
        manifests.as_ref().map(|manifests| {
            let wanted = status_filter.read().clone();
            manifests
                .iter()
                .filter(|m| wanted.is_empty() || m.status == wanted)
                .cloned()
                .collect()
        })
    });

    rsx! {
        div { class: "container",
            PageHeader {
                PageTitle { "Manifests" }
                PageActions {
                    if can_manage {
                        Button {
                            variant: ButtonVariant::Primary,
                            onclick: move |_| {
                                navigator().push(Route::ManifestCreate {});
                            },
                            "New Manifest"
                        }
                    }
                }
            }

            SearchBar {
                FormSelect {
                    value: "{status_filter}",
                    onchange: move |evt: Event<FormData>| status_filter.set(evt.value()),
                    option { value: "", "All Statuses" }
                    for s in MANIFEST_STATUSES {
                        option { value: *s, "{s}" }
                    }
                }
                if !status_filter.read().is_empty() {
                    Button {
                        variant: ButtonVariant::Secondary,
                        onclick: move |_| status_filter.set(String::new()),
                        "Clear Filters"
                    }
                }
            }

            match filtered {
                Some(manifests) => rsx! {
                    ManifestTable { manifests: manifests }
                },
                None => rsx! {
                    div { class: "loading",
                        Skeleton {}
                        Skeleton {}
                        Skeleton {}
                    }
                },
            }
        }
    }
}

#[component]
fn ManifestTable(manifests: Vec<Manifest>) -> Element {
    if manifests.is_empty() {
        return rsx! {
            Card {
                CardContent {
                    p { "No manifests found." }
                }
            }
        };
    }

    rsx! {
        DataTable {
            DataTableHeader {
                DataTableColumn { "Number" }
                DataTableColumn { "Truck" }
                DataTableColumn { "Driver" }
                DataTableColumn { "Route" }
                DataTableColumn { "Departure" }
                DataTableColumn { "Status" }
            }
            DataTableBody {
                for manifest in manifests {
                    ManifestRow { manifest: manifest }
                }
            }
        }
    }
}

#[component]
fn ManifestRow(manifest: Manifest) -> Element {
    let id = manifest.id.clone();
    let route = format!(
        "{} \u{2192} {}",
        manifest.origin.address, manifest.destination.address
    );
    let departure = manifest
        .departure_time
        .as_deref()
        .map(format_date_human)
        .unwrap_or_else(|| "\u{2014}".to_string());

    rsx! {
        DataTableRow {
            onclick: move |_| {
                navigator().push(Route::ManifestDetail { id: id.clone() });
            },
            DataTableCell { "{manifest.manifest_number}" }
            DataTableCell { "{manifest.truck.label()}" }
            DataTableCell { "{manifest.driver.display_name()}" }
            DataTableCell { "{route}" }
            DataTableCell { "{departure}" }
            DataTableCell {
                Badge { variant: manifest_badge_variant(&manifest.status), "{manifest.status}" }
            }
        }
    }
}

use dioxus::prelude::*;
use shared_types::{AuthUser, Manifest, Truck};
use shared_ui::{
    Badge, BadgeVariant, Card, CardContent, CardHeader, CardTitle, DataTable, DataTableBody,
    DataTableCell, DataTableColumn, DataTableHeader, DataTableRow,
};

use crate::format_helpers::format_location;
use crate::routes::Route;

/// Fleet-wide dashboard for admin and dispatcher: every truck and every
/// manifest at a glance.
#[component]
pub fn FleetDashboard(
    user: Option<AuthUser>,
    trucks: Vec<Truck>,
    manifests: Vec<Manifest>,
) -> Element {
    let greeting = user
        .as_ref()
        .map(|u| u.name.clone())
        .unwrap_or_else(|| "there".to_string());

    rsx! {
        div { class: "dashboard",
            div { class: "dashboard-greeting",
                h2 { "Good day, {greeting}" }
                p { class: "dashboard-snapshot",
                    "{trucks.len()} trucks \u{b7} {manifests.len()} manifests in view"
                }
            }

            div { class: "dashboard-grid",
                TrucksCard { trucks: trucks }
                ManifestsCard { manifests: manifests }
            }
        }
    }
}

#[component]
fn TrucksCard(trucks: Vec<Truck>) -> Element {
    rsx! {
        Card {
            CardHeader {
                CardTitle { "Trucks" }
            }
            CardContent {
                if trucks.is_empty() {
                    p { class: "dashboard-empty", "No trucks in the fleet yet." }
                } else {
                    DataTable {
                        DataTableHeader {
                            DataTableColumn { "Number" }
                            DataTableColumn { "Driver" }
                            DataTableColumn { "Location" }
                            DataTableColumn { "Status" }
                        }
                        DataTableBody {
                            for truck in trucks {
                                TruckRow { truck: truck }
                            }
                        }
                    }
                }
            }
        }
    }
}

#[component]
fn TruckRow(truck: Truck) -> Element {
    let id = truck.id.clone();
    let driver = truck
        .assigned_driver
        .as_ref()
        .map(|d| d.display_name().to_string())
        .unwrap_or_else(|| "Unassigned".to_string());
    let location = truck
        .current_location
        .as_ref()
        .map(format_location)
        .unwrap_or_else(|| "\u{2014}".to_string());

    rsx! {
        DataTableRow {
            onclick: move |_| {
                navigator().push(Route::TruckDetail { id: id.clone() });
            },
            DataTableCell { "{truck.truck_number}" }
            DataTableCell { "{driver}" }
            DataTableCell { "{location}" }
            DataTableCell {
                Badge { variant: truck_badge_variant(&truck.status), "{truck.status}" }
            }
        }
    }
}

#[component]
fn ManifestsCard(manifests: Vec<Manifest>) -> Element {
    rsx! {
        Card {
            CardHeader {
                CardTitle { "Manifests" }
            }
            CardContent {
                if manifests.is_empty() {
                    p { class: "dashboard-empty", "No manifests yet." }
                } else {
                    DataTable {
                        DataTableHeader {
                            DataTableColumn { "Number" }
                            DataTableColumn { "Route" }
                            DataTableColumn { "Driver" }
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

    rsx! {
        DataTableRow {
            onclick: move |_| {
                navigator().push(Route::ManifestDetail { id: id.clone() });
            },
            DataTableCell { "{manifest.manifest_number}" }
            DataTableCell { "{route}" }
            DataTableCell { "{manifest.driver.display_name()}" }
            DataTableCell {
                Badge { variant: manifest_badge_variant(&manifest.status), "{manifest.status}" }
            }
        }
    }
}

pub(crate) fn truck_badge_variant(status: &str) -> BadgeVariant {
    match status {
        "available" => BadgeVariant::Primary,
        "in-transit" => BadgeVariant::Secondary,
        "maintenance" => BadgeVariant::Destructive,
        _ => BadgeVariant::Outline,
    }
}

pub(crate) fn manifest_badge_variant(status: &str) -> BadgeVariant {
    match status {
        "in-transit" => BadgeVariant::Primary,
        "pending" => BadgeVariant::Secondary,
        "cancelled" => BadgeVariant::Destructive,
        "completed" => BadgeVariant::Outline,
        _ => BadgeVariant::Secondary,
    }
}

use dioxus::prelude::*;
use shared_types::{Action, Truck, TRUCK_STATUSES};
use shared_ui::{
    Badge, Button, ButtonVariant, Card, CardContent, DataTable, DataTableBody, DataTableCell,
    DataTableColumn, DataTableHeader, DataTableRow, FormSelect, PageActions, PageHeader,
    PageTitle, SearchBar, Skeleton,
};

use crate::auth::use_can;
use crate::format_helpers::format_location;
use crate::routes::dashboard::fleet::truck_badge_variant;
use crate::routes::Route;

#[component]
pub fn TruckListPage() -> Element {
    let can_manage = use_can(Action::ManageTrucks);

    let mut status_filter = use_signal(String::new);

    let data = use_resource(move || async move { server::api::list_trucks().await.ok() });

    let filtered: Option<Vec<Truck>> = data.read().as_ref().and_then(|trucks| {
        trucks.as_ref().map(|trucks| {
            let wanted = status_filter.read().clone();
            trucks
                .iter()
                .filter(|t| wanted.is_empty() || t.status == wanted)
                .cloned()
                .collect()
        })
    });

    rsx! {
        div { class: "container",
            PageHeader {
                PageTitle { "Trucks" }
                PageActions {
                    if can_manage {
                        Button {
                            variant: ButtonVariant::Primary,
                            onclick: move |_| {
                                navigator().push(Route::TruckCreate {});
                            },
                            "New Truck"
                        }
                    }
                }
            }

            SearchBar {
                FormSelect {
                    value: "{status_filter}",
                    onchange: move |evt: Event<FormData>| status_filter.set(evt.value()),
                    option { value: "", "All Statuses" }
                    for s in TRUCK_STATUSES {
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
                Some(trucks) => rsx! {
                    TruckTable { trucks: trucks }
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
fn TruckTable(trucks: Vec<Truck>) -> Element {
    if trucks.is_empty() {
        return rsx! {
            Card {
                CardContent {
                    p { "No trucks found." }
                }
            }
        };
    }

    rsx! {
        DataTable {
            DataTableHeader {
                DataTableColumn { "Number" }
                DataTableColumn { "Plate" }
                DataTableColumn { "Vehicle" }
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

#[component]
fn TruckRow(truck: Truck) -> Element {
    let id = truck.id.clone();
    let vehicle = [
        truck.make.as_deref(),
        truck.model.as_deref(),
        truck.year.map(|y| y.to_string()).as_deref(),
    ]
    .into_iter()
    .flatten()
    .collect::<Vec<_>>()
    .join(" ");
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
            DataTableCell { "{truck.license_plate}" }
            DataTableCell { "{vehicle}" }
            DataTableCell { "{driver}" }
            DataTableCell { "{location}" }
            DataTableCell {
                Badge { variant: truck_badge_variant(&truck.status), "{truck.status}" }
            }
        }
    }
}

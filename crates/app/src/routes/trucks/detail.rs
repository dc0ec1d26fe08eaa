use dioxus::prelude::*;
use shared_types::{Action, Truck, TRUCK_STATUSES};
use shared_ui::{
    use_toast, AlertDialogAction, AlertDialogActions, AlertDialogCancel, AlertDialogContent,
    AlertDialogDescription, AlertDialogRoot, AlertDialogTitle, Badge, Button, ButtonVariant,
    Card, CardContent, CardHeader, CardTitle, Form, FormSelect, Input, PageActions, PageHeader,
    PageTitle, Skeleton, ToastOptions,
};

use crate::auth::use_can;
use crate::components::RouteMap;
use crate::format_helpers::{format_datetime_human, format_location};
use crate::routes::dashboard::fleet::truck_badge_variant;
use crate::routes::Route;

#[component]
pub fn TruckDetailPage(id: String) -> Element {
    let can_manage = use_can(Action::ManageTrucks);
    let toast = use_toast();

    let id_for_fetch = id.clone();
    let mut data = use_resource(move || {
        let id = id_for_fetch.clone();
        async move { server::api::get_truck(id).await.ok() }
    });

    // --- Form field signals ---
    let mut truck_number = use_signal(String::new);
    let mut license_plate = use_signal(String::new);
    let mut make = use_signal(String::new);
    let mut model = use_signal(String::new);
    let mut year = use_signal(String::new);
    let mut status = use_signal(String::new);
    let mut assigned_driver = use_signal(String::new);

    let mut latitude = use_signal(String::new);
    let mut longitude = use_signal(String::new);
    let mut address = use_signal(String::new);

    let mut in_flight = use_signal(|| false);
    let mut show_delete = use_signal(|| false);

    // --- Hydrate form state once per loaded truck ---
    let mut hydrated_id = use_signal(String::new);
    use_effect(move || {
        let binding = data.read();
        let Some(Some(truck)) = binding.as_ref() else {
            return;
        };
        if *hydrated_id.read() == truck.id {
            return;
        }
        hydrated_id.set(truck.id.clone());
        truck_number.set(truck.truck_number.clone());
        license_plate.set(truck.license_plate.clone());
        make.set(truck.make.clone().unwrap_or_default());
        model.set(truck.model.clone().unwrap_or_default());
        year.set(truck.year.map(|y| y.to_string()).unwrap_or_default());
        status.set(truck.status.clone());
        assigned_driver.set(
            truck
                .assigned_driver
                .as_ref()
                .map(|d| d.id().to_string())
                .unwrap_or_default(),
        );
        if let Some(location) = &truck.current_location {
            latitude.set(format!("{}", location.latitude));
            longitude.set(format!("{}", location.longitude));
            address.set(location.address.clone().unwrap_or_default());
        }
    });

    let id_for_save = id.clone();
    let handle_save = move |_: FormEvent| {
        if *in_flight.read() {
            return;
        }
        let id = id_for_save.clone();

        let number = truck_number.read().trim().to_string();
        let plate = license_plate.read().trim().to_string();
        if number.is_empty() || plate.is_empty() {
            toast.error(
                "Truck number and license plate are required.".to_string(),
                ToastOptions::new(),
            );
            return;
        }

        let body = serde_json::json!({
            "truckNumber": number,
            "licensePlate": plate,
            "make": opt_str(&make.read()),
            "model": opt_str(&model.read()),
            "year": year.read().trim().parse::<i32>().ok(),
            "status": status.read().clone(),
            "assignedDriver": opt_str(&assigned_driver.read()),
        });

        spawn(async move {
            in_flight.set(true);
            match server::api::update_truck(id, body.to_string()).await {
                Ok(_) => {
                    toast.success("Truck updated successfully".to_string(), ToastOptions::new());
                    data.restart();
                }
                Err(e) => {
                    toast.error(
                        shared_types::AppError::friendly_message(&e.to_string()),
                        ToastOptions::new(),
                    );
                }
            }
            in_flight.set(false);
        });
    };

    let id_for_location = id.clone();
    let handle_save_location = move |_: FormEvent| {
        if *in_flight.read() {
            return;
        }
        let id = id_for_location.clone();

        let (Ok(lat), Ok(lon)) = (
            latitude.read().trim().parse::<f64>(),
            longitude.read().trim().parse::<f64>(),
        ) else {
            toast.error(
                "Latitude and longitude must be numbers.".to_string(),
                ToastOptions::new(),
            );
            return;
        };
        let addr = address.read().trim().to_string();
        let addr = if addr.is_empty() { None } else { Some(addr) };

        spawn(async move {
            in_flight.set(true);
            match server::api::update_truck_location(id, lat, lon, addr).await {
                Ok(_) => {
                    toast.success("Location updated".to_string(), ToastOptions::new());
                    data.restart();
                }
                Err(e) => {
                    toast.error(
                        shared_types::AppError::friendly_message(&e.to_string()),
                        ToastOptions::new(),
                    );
                }
            }
            in_flight.set(false);
        });
    };

    let id_for_delete = id.clone();
    let handle_delete = move |_| {
        let id = id_for_delete.clone();
        spawn(async move {
            in_flight.set(true);
            match server::api::delete_truck(id).await {
                Ok(()) => {
                    toast.success("Truck deleted".to_string(), ToastOptions::new());
                    navigator().push(Route::TruckList {});
                }
                Err(e) => {
                    toast.error(
                        shared_types::AppError::friendly_message(&e.to_string()),
                        ToastOptions::new(),
                    );
                }
            }
            in_flight.set(false);
        });
    };

    let binding = data.read();
    let truck: Option<&Truck> = match binding.as_ref() {
        Some(Some(truck)) => Some(truck),
        Some(None) => None,
        None => {
            return rsx! {
                div { class: "container loading",
                    Skeleton {}
                    Skeleton {}
                }
            };
        }
    };

    let Some(truck) = truck else {
        return rsx! {
            div { class: "container",
                Card {
                    CardContent {
                        p { "Truck not found." }
                    }
                }
            }
        };
    };

    rsx! {
        div { class: "container",
            PageHeader {
                PageTitle { "{truck.truck_number}" }
                PageActions {
                    Badge { variant: truck_badge_variant(&truck.status), "{truck.status}" }
                    if can_manage {
                        Button {
                            variant: ButtonVariant::Destructive,
                            onclick: move |_| show_delete.set(true),
                            "Delete"
                        }
                    }
                }
            }

            div { class: "detail-grid",
                Card {
                    CardHeader {
                        CardTitle { "Details" }
                    }
                    CardContent {
                        Form {
                            onsubmit: handle_save,

                            div { class: "form-grid",
                                Input {
                                    label: "Truck Number *",
                                    value: truck_number.read().clone(),
                                    on_input: move |e: FormEvent| truck_number.set(e.value()),
                                    disabled: !can_manage,
                                }
                                Input {
                                    label: "License Plate *",
                                    value: license_plate.read().clone(),
                                    on_input: move |e: FormEvent| license_plate.set(e.value()),
                                    disabled: !can_manage,
                                }
                                Input {
                                    label: "Make",
                                    value: make.read().clone(),
                                    on_input: move |e: FormEvent| make.set(e.value()),
                                    disabled: !can_manage,
                                }
                                Input {
                                    label: "Model",
                                    value: model.read().clone(),
                                    on_input: move |e: FormEvent| model.set(e.value()),
                                    disabled: !can_manage,
                                }
                                Input {
                                    label: "Year",
                                    input_type: "number",
                                    value: year.read().clone(),
                                    on_input: move |e: FormEvent| year.set(e.value()),
                                    disabled: !can_manage,
                                }
                                FormSelect {
                                    label: "Status",
                                    value: status.read().clone(),
                                    onchange: move |e: Event<FormData>| status.set(e.value()),
                                    disabled: !can_manage,
                                    for s in TRUCK_STATUSES {
                                        option { value: *s, "{s}" }
                                    }
                                }
                                Input {
                                    label: "Assigned Driver (user id)",
                                    value: assigned_driver.read().clone(),
                                    on_input: move |e: FormEvent| assigned_driver.set(e.value()),
                                    disabled: !can_manage,
                                }
                            }

                            if can_manage {
                                div { class: "form-actions",
                                    button {
                                        class: "button",
                                        "data-style": "primary",
                                        r#type: "submit",
                                        disabled: *in_flight.read(),
                                        if *in_flight.read() { "Saving..." } else { "Save Changes" }
                                    }
                                }
                            }
                        }
                    }
                }

                div { class: "detail-side",
                    Card {
                        CardHeader {
                            CardTitle { "Current Location" }
                        }
                        CardContent {
                            RouteMap {
                                marker: truck.current_location.clone(),
                            }

                            if let Some(location) = &truck.current_location {
                                p { class: "detail-location-value", "{format_location(location)}" }
                                if let Some(updated) = &location.last_updated {
                                    p { class: "detail-location-updated",
                                        "Updated: {format_datetime_human(updated)}"
                                    }
                                }
                            } else {
                                p { class: "detail-location-value", "No location data available" }
                            }

                            Form {
                                onsubmit: handle_save_location,

                                div { class: "form-grid",
                                    Input {
                                        label: "Latitude",
                                        value: latitude.read().clone(),
                                        on_input: move |e: FormEvent| latitude.set(e.value()),
                                        placeholder: "40.7128",
                                    }
                                    Input {
                                        label: "Longitude",
                                        value: longitude.read().clone(),
                                        on_input: move |e: FormEvent| longitude.set(e.value()),
                                        placeholder: "-74.0060",
                                    }
                                    Input {
                                        label: "Address",
                                        value: address.read().clone(),
                                        on_input: move |e: FormEvent| address.set(e.value()),
                                        placeholder: "Optional",
                                    }
                                }

                                div { class: "form-actions",
                                    button {
                                        class: "button",
                                        "data-style": "secondary",
                                        r#type: "submit",
                                        disabled: *in_flight.read(),
                                        "Update Location"
                                    }
                                }
                            }
                        }
                    }
                }
            }
        }

        AlertDialogRoot {
            open: *show_delete.read(),
            on_open_change: move |open: bool| show_delete.set(open),
            AlertDialogContent {
                AlertDialogTitle { "Delete this truck?" }
                AlertDialogDescription {
                    "This removes the truck from the fleet. Manifests referencing it keep their history."
                }
                AlertDialogActions {
                    AlertDialogCancel { "Keep Truck" }
                    AlertDialogAction {
                        on_click: handle_delete,
                        "Delete"
                    }
                }
            }
        }
    }
}

/// Returns `Value::Null` for empty strings, otherwise the string value.
fn opt_str(s: &str) -> serde_json::Value {
    if s.trim().is_empty() {
        serde_json::Value::Null
    } else {
        serde_json::json!(s.trim())
    }
}

use dioxus::prelude::*;
use shared_types::{Action, Manifest, ManifestStatus, MANIFEST_STATUSES};
use shared_ui::{
    use_toast, AlertDialogAction, AlertDialogActions, AlertDialogCancel, AlertDialogContent,
    AlertDialogDescription, AlertDialogRoot, AlertDialogTitle, Badge, Button, ButtonVariant,
    Card, CardContent, CardHeader, CardTitle, Form, FormSelect, Input, PageActions, PageHeader,
    PageTitle, Skeleton, Textarea, ToastOptions,
};

use crate::auth::use_can;
use crate::components::RouteMap;
use crate::format_helpers::{format_datetime_human, format_location};
use crate::live::use_live_location;
use crate::routes::dashboard::fleet::manifest_badge_variant;
use crate::routes::Route;

#[component]
pub fn ManifestDetailPage(id: String) -> Element {
    let can_manage = use_can(Action::ManageManifests);
    let toast = use_toast();

    let id_for_fetch = id.clone();
    let mut data = use_resource(move || {
        let id = id_for_fetch.clone();
        async move { server::api::get_manifest(id).await.ok() }
    });

    // Live channel subscription for this manifest. Updates for other
    // manifests never reach this signal — the channel is scoped by id.
    let live = use_live_location(Some(id.clone()));

    // --- Form field signals ---
    let mut manifest_number = use_signal(String::new);
    let mut truck = use_signal(String::new);
    let mut driver = use_signal(String::new);
    let mut status = use_signal(String::new);
    let mut cargo_description = use_signal(String::new);
    let mut notes = use_signal(String::new);

    let mut latitude = use_signal(String::new);
    let mut longitude = use_signal(String::new);
    let mut address = use_signal(String::new);

    let mut in_flight = use_signal(|| false);
    let mut show_delete = use_signal(|| false);

    // --- Hydrate form state once per loaded manifest ---
    let mut hydrated_id = use_signal(String::new);
    use_effect(move || {
        let binding = data.read();
        let Some(Some(manifest)) = binding.as_ref() else {
            return;
        };
        if *hydrated_id.read() == manifest.id {
            return;
        }
        hydrated_id.set(manifest.id.clone());
        manifest_number.set(manifest.manifest_number.clone());
        truck.set(manifest.truck.id().to_string());
        driver.set(manifest.driver.id().to_string());
        status.set(manifest.status.clone());
        cargo_description.set(manifest.cargo_description.clone().unwrap_or_default());
        notes.set(manifest.notes.clone().unwrap_or_default());
        if let Some(location) = &manifest.last_reported_location {
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

        let binding = data.read();
        let Some(Some(manifest)) = binding.as_ref() else {
            return;
        };

        let body = serde_json::json!({
            "manifestNumber": manifest_number.read().trim(),
            "truck": truck.read().trim(),
            "driver": driver.read().trim(),
            "origin": manifest.origin,
            "destination": manifest.destination,
            "status": status.read().clone(),
            "cargoDescription": opt_str(&cargo_description.read()),
            "notes": opt_str(&notes.read()),
        });
        drop(binding);

        spawn(async move {
            in_flight.set(true);
            match server::api::update_manifest(id, body.to_string()).await {
                Ok(_) => {
                    toast.success(
                        "Manifest updated successfully".to_string(),
                        ToastOptions::new(),
                    );
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
            match server::api::update_manifest_location(id, lat, lon, addr).await {
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

    let id_for_transit = id.clone();
    let handle_transit = move |departing: bool| {
        let id = id_for_transit.clone();
        spawn(async move {
            in_flight.set(true);
            let result = if departing {
                server::api::record_departure(id).await
            } else {
                server::api::record_arrival(id).await
            };
            match result {
                Ok(_) => {
                    let msg = if departing {
                        "Departure recorded"
                    } else {
                        "Arrival recorded"
                    };
                    toast.success(msg.to_string(), ToastOptions::new());
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
            match server::api::delete_manifest(id).await {
                Ok(()) => {
                    toast.success("Manifest deleted".to_string(), ToastOptions::new());
                    navigator().push(Route::ManifestList {});
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
    let manifest: Option<&Manifest> = match binding.as_ref() {
        Some(Some(manifest)) => Some(manifest),
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

    let Some(manifest) = manifest else {
        return rsx! {
            div { class: "container",
                Card {
                    CardContent {
                        p { "Manifest not found." }
                    }
                }
            }
        };
    };

    // The live channel wins over the snapshot the page loaded with
    let shown_location = live()
        .map(|p| p.location)
        .or(manifest.last_reported_location.clone());
    let manifest_status = manifest.status();

    rsx! {
        div { class: "container",
            PageHeader {
                PageTitle { "{manifest.manifest_number}" }
                PageActions {
                    Badge { variant: manifest_badge_variant(&manifest.status), "{manifest.status}" }
                    if manifest_status == ManifestStatus::Pending {
                        Button {
                            variant: ButtonVariant::Primary,
                            disabled: *in_flight.read(),
                            onclick: {
                                let handle = handle_transit.clone();
                                move |_| handle(true)
                            },
                            "Record Departure"
                        }
                    }
                    if manifest_status == ManifestStatus::InTransit {
                        Button {
                            variant: ButtonVariant::Primary,
                            disabled: *in_flight.read(),
                            onclick: {
                                let handle = handle_transit.clone();
                                move |_| handle(false)
                            },
                            "Record Arrival"
                        }
                    }
                    if can_manage {
                        Button {
                            variant: ButtonVariant::Destructive,
                            onclick: move |_| show_delete.set(true),
                            "Delete"
                        }
                    }
                }
            }

            Card {
                CardHeader {
                    CardTitle { "Route" }
                }
                CardContent {
                    RouteMap {
                        origin: Some(manifest.origin.clone()),
                        destination: Some(manifest.destination.clone()),
                        marker: shown_location.clone(),
                    }

                    div { class: "detail-route",
                        div {
                            p { class: "detail-route-label", "Origin" }
                            p { class: "detail-route-address", "{manifest.origin.address}" }
                        }
                        div {
                            p { class: "detail-route-label", "Destination" }
                            p { class: "detail-route-address", "{manifest.destination.address}" }
                        }
                    }

                    if let Some(location) = &shown_location {
                        p { class: "detail-location-value",
                            "Last reported: {format_location(location)}"
                        }
                    }
                    if let Some(departed) = &manifest.departure_time {
                        p { class: "detail-location-updated",
                            "Departed: {format_datetime_human(departed)}"
                        }
                    }
                    if let Some(arrived) = &manifest.arrival_time {
                        p { class: "detail-location-updated",
                            "Arrived: {format_datetime_human(arrived)}"
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
                                    label: "Manifest Number *",
                                    value: manifest_number.read().clone(),
                                    on_input: move |e: FormEvent| manifest_number.set(e.value()),
                                    disabled: !can_manage,
                                }
                                Input {
                                    label: "Truck (id)",
                                    value: truck.read().clone(),
                                    on_input: move |e: FormEvent| truck.set(e.value()),
                                    disabled: !can_manage,
                                }
                                Input {
                                    label: "Driver (user id)",
                                    value: driver.read().clone(),
                                    on_input: move |e: FormEvent| driver.set(e.value()),
                                    disabled: !can_manage,
                                }
                                FormSelect {
                                    label: "Status",
                                    value: status.read().clone(),
                                    onchange: move |e: Event<FormData>| status.set(e.value()),
                                    disabled: !can_manage,
                                    for s in MANIFEST_STATUSES {
                                        option { value: *s, "{s}" }
                                    }
                                }
                                Input {
                                    label: "Cargo Description",
                                    value: cargo_description.read().clone(),
                                    on_input: move |e: FormEvent| cargo_description.set(e.value()),
                                    disabled: !can_manage,
                                }
                            }

                            Textarea {
                                label: "Notes",
                                value: notes.read().clone(),
                                on_input: move |e: FormEvent| notes.set(e.value()),
                                disabled: !can_manage,
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

                Card {
                    CardHeader {
                        CardTitle { "Report Location" }
                    }
                    CardContent {
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

        AlertDialogRoot {
            open: *show_delete.read(),
            on_open_change: move |open: bool| show_delete.set(open),
            AlertDialogContent {
                AlertDialogTitle { "Delete this manifest?" }
                AlertDialogDescription {
                    "This removes the manifest and its route history."
                }
                AlertDialogActions {
                    AlertDialogCancel { "Keep Manifest" }
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

use dioxus::prelude::*;
use shared_types::AddressSuggestion;
use shared_ui::{
    use_toast, Button, ButtonVariant, Card, CardContent, Form, Input, PageHeader, PageTitle,
    Separator, Textarea, ToastOptions,
};

use crate::components::AddressAutocomplete;
use crate::routes::Route;

#[component]
pub fn ManifestCreatePage() -> Element {
    let toast = use_toast();

    let mut manifest_number = use_signal(String::new);
    let mut truck = use_signal(String::new);
    let mut driver = use_signal(String::new);
    let origin_address = use_signal(String::new);
    let mut origin_coords = use_signal(|| Option::<(f64, f64)>::None);
    let destination_address = use_signal(String::new);
    let mut destination_coords = use_signal(|| Option::<(f64, f64)>::None);
    let mut cargo_description = use_signal(String::new);
    let mut notes = use_signal(String::new);
    let mut in_flight = use_signal(|| false);

    let handle_save = move |_: FormEvent| {
        if *in_flight.read() {
            return;
        }

        let number = manifest_number.read().trim().to_string();
        let truck_id = truck.read().trim().to_string();
        let driver_id = driver.read().trim().to_string();
        if number.is_empty() || truck_id.is_empty() || driver_id.is_empty() {
            toast.error(
                "Manifest number, truck, and driver are required.".to_string(),
                ToastOptions::new(),
            );
            return;
        }

        let (Some((origin_lat, origin_lon)), Some((dest_lat, dest_lon))) =
            (*origin_coords.read(), *destination_coords.read())
        else {
            toast.error(
                "Pick origin and destination from the address suggestions.".to_string(),
                ToastOptions::new(),
            );
            return;
        };

        let body = serde_json::json!({
            "manifestNumber": number,
            "truck": truck_id,
            "driver": driver_id,
            "origin": {
                "address": origin_address.read().clone(),
                "latitude": origin_lat,
                "longitude": origin_lon,
            },
            "destination": {
                "address": destination_address.read().clone(),
                "latitude": dest_lat,
                "longitude": dest_lon,
            },
            "cargoDescription": opt_str(&cargo_description.read()),
            "notes": opt_str(&notes.read()),
        });

        spawn(async move {
            in_flight.set(true);
            match server::api::create_manifest(body.to_string()).await {
                Ok(manifest) => {
                    toast.success(
                        "Manifest created successfully".to_string(),
                        ToastOptions::new(),
                    );
                    navigator().push(Route::ManifestDetail { id: manifest.id });
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

    rsx! {
        div { class: "container",
            PageHeader {
                PageTitle { "New Manifest" }
            }

            Card {
                CardContent {
                    Form {
                        onsubmit: handle_save,

                        div { class: "form-grid",
                            Input {
                                label: "Manifest Number *",
                                value: manifest_number.read().clone(),
                                on_input: move |e: FormEvent| manifest_number.set(e.value()),
                                placeholder: "e.g., MAN-1042",
                            }
                            Input {
                                label: "Truck (id) *",
                                value: truck.read().clone(),
                                on_input: move |e: FormEvent| truck.set(e.value()),
                            }
                            Input {
                                label: "Driver (user id) *",
                                value: driver.read().clone(),
                                on_input: move |e: FormEvent| driver.set(e.value()),
                            }
                        }

                        Separator {}

                        AddressAutocomplete {
                            label: "Origin *",
                            value: origin_address,
                            on_select: move |s: AddressSuggestion| {
                                origin_coords.set(Some((s.latitude, s.longitude)));
                            },
                        }
                        AddressAutocomplete {
                            label: "Destination *",
                            value: destination_address,
                            on_select: move |s: AddressSuggestion| {
                                destination_coords.set(Some((s.latitude, s.longitude)));
                            },
                        }

                        Separator {}

                        Input {
                            label: "Cargo Description",
                            value: cargo_description.read().clone(),
                            on_input: move |e: FormEvent| cargo_description.set(e.value()),
                            placeholder: "Optional",
                        }
                        Textarea {
                            label: "Notes",
                            value: notes.read().clone(),
                            on_input: move |e: FormEvent| notes.set(e.value()),
                            placeholder: "Optional notes...",
                        }

                        div { class: "form-actions",
                            Button {
                                variant: ButtonVariant::Secondary,
                                onclick: move |_| {
                                    navigator().push(Route::ManifestList {});
                                },
                                "Cancel"
                            }
                            button {
                                class: "button",
                                "data-style": "primary",
                                r#type: "submit",
                                disabled: *in_flight.read(),
                                if *in_flight.read() { "Saving..." } else { "Create Manifest" }
                            }
                        }
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

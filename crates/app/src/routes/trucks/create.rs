use dioxus::prelude::*;
use shared_types::TRUCK_STATUSES;
use shared_ui::{
    use_toast, Button, ButtonVariant, Card, CardContent, Form, FormSelect, Input, PageHeader,
    PageTitle, ToastOptions,
};

use crate::routes::Route;

#[component]
pub fn TruckCreatePage() -> Element {
    let toast = use_toast();

    let mut truck_number = use_signal(String::new);
    let mut license_plate = use_signal(String::new);
    let mut make = use_signal(String::new);
    let mut model = use_signal(String::new);
    let mut year = use_signal(String::new);
    let mut status = use_signal(|| "available".to_string());
    let mut assigned_driver = use_signal(String::new);
    let mut in_flight = use_signal(|| false);

    let handle_save = move |_: FormEvent| {
        if *in_flight.read() {
            return;
        }

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
            match server::api::create_truck(body.to_string()).await {
                Ok(truck) => {
                    toast.success("Truck created successfully".to_string(), ToastOptions::new());
                    navigator().push(Route::TruckDetail { id: truck.id });
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
                PageTitle { "New Truck" }
            }

            Card {
                CardContent {
                    Form {
                        onsubmit: handle_save,

                        div { class: "form-grid",
                            Input {
                                label: "Truck Number *",
                                value: truck_number.read().clone(),
                                on_input: move |e: FormEvent| truck_number.set(e.value()),
                                placeholder: "e.g., FL-204",
                            }
                            Input {
                                label: "License Plate *",
                                value: license_plate.read().clone(),
                                on_input: move |e: FormEvent| license_plate.set(e.value()),
                                placeholder: "e.g., 8KDX441",
                            }
                            Input {
                                label: "Make",
                                value: make.read().clone(),
                                on_input: move |e: FormEvent| make.set(e.value()),
                                placeholder: "e.g., Volvo",
                            }
                            Input {
                                label: "Model",
                                value: model.read().clone(),
                                on_input: move |e: FormEvent| model.set(e.value()),
                                placeholder: "e.g., VNL 860",
                            }
                            Input {
                                label: "Year",
                                input_type: "number",
                                value: year.read().clone(),
                                on_input: move |e: FormEvent| year.set(e.value()),
                                placeholder: "e.g., 2023",
                            }
                            FormSelect {
                                label: "Status",
                                value: status.read().clone(),
                                onchange: move |e: Event<FormData>| status.set(e.value()),
                                for s in TRUCK_STATUSES {
                                    option { value: *s, "{s}" }
                                }
                            }
                            Input {
                                label: "Assigned Driver (user id)",
                                value: assigned_driver.read().clone(),
                                on_input: move |e: FormEvent| assigned_driver.set(e.value()),
                                placeholder: "Optional",
                            }
                        }

                        div { class: "form-actions",
                            Button {
                                variant: ButtonVariant::Secondary,
                                onclick: move |_| {
                                    navigator().push(Route::TruckList {});
                                },
                                "Cancel"
                            }
                            button {
                                class: "button",
                                "data-style": "primary",
                                r#type: "submit",
                                disabled: *in_flight.read(),
                                if *in_flight.read() { "Saving..." } else { "Create Truck" }
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

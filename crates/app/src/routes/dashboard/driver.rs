use dioxus::prelude::*;
use shared_types::{AuthUser, Manifest, ManifestStatus, Truck};
use shared_ui::{
    Badge, Button, ButtonVariant, Card, CardContent, CardHeader, CardTitle, use_toast,
    ToastOptions,
};

use super::fleet::manifest_badge_variant;
use crate::components::RouteMap;
use crate::format_helpers::{format_datetime_human, format_location};
use crate::geo;
use crate::live::use_live_location;

/// Driver dashboard: the assigned truck and the single in-transit manifest,
/// with self-service location reporting and departure/arrival actions.
#[component]
pub fn DriverDashboard(
    user: Option<AuthUser>,
    trucks: Vec<Truck>,
    manifests: Vec<Manifest>,
    on_refresh: EventHandler<()>,
) -> Element {
    let toast = use_toast();
    let mut auth = crate::auth::use_auth();
    let mut busy = use_signal(|| false);

    let driver_id = user.as_ref().map(|u| u.id.clone()).unwrap_or_default();
    let my_truck = assigned_truck(&trucks, &driver_id).cloned();
    let active = active_manifest(&manifests).cloned();

    // Live updates merge into the displayed position without a reload
    let live = use_live_location(active.as_ref().map(|m| m.id.clone()));

    if my_truck.is_none() && active.is_none() {
        return rsx! {
            div { class: "driver-empty",
                h3 { "No assignments found" }
                p { "You currently don't have an active truck or manifest assigned." }
            }
        };
    }

    let truck_for_update = my_truck.clone();
    let manifest_for_update = active.clone();
    let handle_update_location = move |_| {
        let truck = truck_for_update.clone();
        let manifest = manifest_for_update.clone();
        spawn(async move {
            busy.set(true);

            let fix = match geo::current_position().await {
                Ok(fix) => fix,
                Err(msg) => {
                    toast.error(msg, ToastOptions::new());
                    busy.set(false);
                    return;
                }
            };

            // Best-effort: a failed lookup just reports bare coordinates
            let address = server::api::reverse_geocode(fix.latitude, fix.longitude)
                .await
                .ok()
                .flatten();

            let result = async {
                if let Some(truck) = &truck {
                    server::api::update_truck_location(
                        truck.id.clone(),
                        fix.latitude,
                        fix.longitude,
                        address.clone(),
                    )
                    .await?;
                }
                if let Some(manifest) = &manifest {
                    server::api::update_manifest_location(
                        manifest.id.clone(),
                        fix.latitude,
                        fix.longitude,
                        address.clone(),
                    )
                    .await?;
                }
                Ok::<_, ServerFnError>(())
            }
            .await;

            match result {
                Ok(()) => {
                    toast.success("Location updated successfully".to_string(), ToastOptions::new());
                    on_refresh.call(());
                }
                Err(e) => {
                    let msg = e.to_string();
                    if !crate::auth::redirect_on_auth_failure(&mut auth, &msg) {
                        toast.error(
                            shared_types::AppError::friendly_message(&msg),
                            ToastOptions::new(),
                        );
                    }
                }
            }
            busy.set(false);
        });
    };

    let manifest_for_transit = active.clone();
    let handle_transit = move |departing: bool| {
        let manifest = manifest_for_transit.clone();
        spawn(async move {
            let Some(manifest) = manifest else { return };
            busy.set(true);
            let result = if departing {
                server::api::record_departure(manifest.id.clone()).await
            } else {
                server::api::record_arrival(manifest.id.clone()).await
            };
            match result {
                Ok(_) => {
                    let msg = if departing {
                        "Route started. Drive safely."
                    } else {
                        "Route completed. Great job."
                    };
                    toast.success(msg.to_string(), ToastOptions::new());
                    on_refresh.call(());
                }
                Err(e) => {
                    toast.error(
                        shared_types::AppError::friendly_message(&e.to_string()),
                        ToastOptions::new(),
                    );
                }
            }
            busy.set(false);
        });
    };

    rsx! {
        div { class: "driver-dashboard",
            div { class: "driver-main",
                if let Some(manifest) = active.clone() {
                    ActiveManifestCard {
                        manifest: manifest,
                        live_location: live().map(|p| p.location),
                        busy: busy(),
                        on_depart: {
                            let handle = handle_transit.clone();
                            move |_| handle(true)
                        },
                        on_arrive: {
                            let handle = handle_transit.clone();
                            move |_| handle(false)
                        },
                    }
                } else {
                    Card {
                        CardContent {
                            p { class: "dashboard-empty", "No active manifests scheduled." }
                        }
                    }
                }
            }

            div { class: "driver-side",
                if let Some(truck) = my_truck.clone() {
                    Card {
                        CardHeader {
                            CardTitle { "Assigned Vehicle" }
                        }
                        CardContent {
                            div { class: "driver-truck",
                                h3 { "{truck.truck_number}" }
                                p { class: "driver-truck-meta",
                                    {
                                        [truck.make.as_deref(), truck.model.as_deref()]
                                            .into_iter()
                                            .flatten()
                                            .collect::<Vec<_>>()
                                            .join(" ")
                                    }
                                }
                            }

                            div { class: "driver-location",
                                p { class: "driver-location-label", "Last reported location" }
                                p { class: "driver-location-value",
                                    {
                                        truck.current_location
                                            .as_ref()
                                            .map(format_location)
                                            .unwrap_or_else(|| "No location data available".to_string())
                                    }
                                }
                                if let Some(updated) = truck.current_location.as_ref().and_then(|l| l.last_updated.clone()) {
                                    p { class: "driver-location-updated",
                                        "Updated: {format_datetime_human(&updated)}"
                                    }
                                }
                            }

                            Button {
                                variant: ButtonVariant::Primary,
                                disabled: busy(),
                                onclick: handle_update_location,
                                if busy() { "Updating..." } else { "Update My Location" }
                            }
                        }
                    }
                }
            }
        }
    }
}

#[component]
fn ActiveManifestCard(
    manifest: Manifest,
    live_location: Option<shared_types::GeoPoint>,
    busy: bool,
    on_depart: EventHandler<()>,
    on_arrive: EventHandler<()>,
) -> Element {
    // The live channel wins over the snapshot the page loaded with
    let shown_location = live_location.or(manifest.last_reported_location.clone());
    let status = manifest.status();

    rsx! {
        Card {
            CardHeader {
                div { class: "driver-manifest-header",
                    div {
                        CardTitle { "Current Manifest" }
                        p { class: "driver-manifest-number", "#{manifest.manifest_number}" }
                    }
                    Badge { variant: manifest_badge_variant(&manifest.status), "{manifest.status}" }
                }
            }
            CardContent {
                RouteMap {
                    origin: Some(manifest.origin.clone()),
                    destination: Some(manifest.destination.clone()),
                    marker: shown_location.clone(),
                }

                div { class: "driver-route",
                    div { class: "driver-route-point",
                        p { class: "driver-route-label", "Origin" }
                        p { class: "driver-route-address", "{manifest.origin.address}" }
                    }
                    div { class: "driver-route-point",
                        p { class: "driver-route-label", "Destination" }
                        p { class: "driver-route-address", "{manifest.destination.address}" }
                    }
                }

                if let Some(location) = &shown_location {
                    p { class: "driver-last-seen",
                        "Last reported: {format_location(location)}"
                    }
                }

                div { class: "driver-actions",
                    if status == ManifestStatus::Pending {
                        Button {
                            variant: ButtonVariant::Primary,
                            disabled: busy,
                            onclick: move |_| on_depart.call(()),
                            "Start Route"
                        }
                    } else if status == ManifestStatus::InTransit {
                        Button {
                            variant: ButtonVariant::Primary,
                            disabled: busy,
                            onclick: move |_| on_arrive.call(()),
                            "Complete Route"
                        }
                    }
                }
            }
        }
    }
}

/// The single manifest currently in transit, if any. The backend guarantees
/// at most one per driver.
pub fn active_manifest(manifests: &[Manifest]) -> Option<&Manifest> {
    manifests.iter().find(|m| m.is_in_transit())
}

/// The truck whose assigned driver matches the session user.
pub fn assigned_truck<'a>(trucks: &'a [Truck], driver_id: &str) -> Option<&'a Truck> {
    trucks.iter().find(|t| {
        t.assigned_driver
            .as_ref()
            .map(|d| d.id() == driver_id)
            .unwrap_or(false)
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared_types::{DriverRef, RoutePoint, TruckRef, UserSummary};

    fn manifest(id: &str, status: &str) -> Manifest {
        Manifest {
            id: id.into(),
            manifest_number: format!("MAN-{id}"),
            truck: TruckRef::Id("T1".into()),
            driver: DriverRef::Id("D1".into()),
            origin: RoutePoint {
                address: "A".into(),
                latitude: 0.0,
                longitude: 0.0,
            },
            destination: RoutePoint {
                address: "B".into(),
                latitude: 1.0,
                longitude: 1.0,
            },
            status: status.into(),
            departure_time: None,
            arrival_time: None,
            last_reported_location: None,
            cargo_description: None,
            notes: None,
        }
    }

    fn truck(id: &str, driver_id: Option<&str>) -> Truck {
        Truck {
            id: id.into(),
            truck_number: format!("FL-{id}"),
            license_plate: "TEST".into(),
            make: None,
            model: None,
            year: None,
            status: "available".into(),
            assigned_driver: driver_id.map(|d| {
                DriverRef::User(UserSummary {
                    id: d.into(),
                    name: String::new(),
                    email: String::new(),
                })
            }),
            current_location: None,
        }
    }

    #[test]
    fn the_in_transit_manifest_is_active() {
        let manifests = vec![
            manifest("1", "completed"),
            manifest("2", "in-transit"),
            manifest("3", "pending"),
        ];
        assert_eq!(active_manifest(&manifests).unwrap().id, "2");
    }

    #[test]
    fn no_in_transit_manifest_means_no_active() {
        let manifests = vec![manifest("1", "completed"), manifest("2", "pending")];
        assert!(active_manifest(&manifests).is_none());
        assert!(active_manifest(&[]).is_none());
    }

    #[test]
    fn truck_is_matched_by_assigned_driver_id() {
        let trucks = vec![truck("1", Some("D1")), truck("2", Some("D2")), truck("3", None)];
        assert_eq!(assigned_truck(&trucks, "D1").unwrap().id, "1");
        assert_eq!(assigned_truck(&trucks, "D2").unwrap().id, "2");
        assert!(assigned_truck(&trucks, "D9").is_none());
    }
}

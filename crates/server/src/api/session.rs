use dioxus::prelude::*;
use shared_types::{AuthUser, DashboardData, FeatureFlags};

#[cfg(feature = "server")]
use crate::auth::cookies;
#[cfg(feature = "server")]
use crate::backend::backend;
#[cfg(feature = "server")]
use crate::error_convert::{AppErrorExt, ValidateRequest};
#[cfg(feature = "server")]
use shared_types::{LoginRequest, Manifest, RegisterRequest, Truck, UserRole};

/// Feature flags for the client, resolved from server config.
#[server]
pub async fn get_feature_flags() -> Result<FeatureFlags, ServerFnError> {
    Ok(crate::config::feature_flags().clone())
}

/// Login with email and password. Forwards the backend's session cookie to
/// the browser on success.
#[cfg_attr(feature = "server", tracing::instrument(skip(password)))]
#[server]
pub async fn login(email: String, password: String) -> Result<AuthUser, ServerFnError> {
    let req = LoginRequest { email, password };
    req.validate_request()
        .map_err(|e| e.into_server_fn_error())?;

    let outcome = backend()
        .login(&req)
        .await
        .map_err(|e| e.into_server_fn_error())?;

    cookies::schedule_forward_cookies(outcome.set_cookies);
    Ok(outcome.user)
}

/// Register a new account. Forwards the backend's session cookie to the
/// browser on success.
#[cfg_attr(feature = "server", tracing::instrument(skip(password)))]
#[server]
pub async fn register(
    name: String,
    email: String,
    password: String,
    role: Option<String>,
) -> Result<AuthUser, ServerFnError> {
    let req = RegisterRequest {
        name,
        email,
        password,
        role,
    };
    req.validate_request()
        .map_err(|e| e.into_server_fn_error())?;

    let outcome = backend()
        .register(&req)
        .await
        .map_err(|e| e.into_server_fn_error())?;

    cookies::schedule_forward_cookies(outcome.set_cookies);
    Ok(outcome.user)
}

/// End the session. The session cookie is expired even when the backend
/// call fails — removing client-visible credentials takes priority.
#[cfg_attr(feature = "server", tracing::instrument)]
#[server]
pub async fn logout() -> Result<(), ServerFnError> {
    let cookie = cookies::session_cookie();
    if let Err(e) = backend().logout(cookie.as_deref()).await {
        tracing::warn!(error = %e, "Backend logout failed, clearing cookie anyway");
    }
    cookies::schedule_clear_cookies();
    Ok(())
}

/// Fetch the current session's user, or `None` when no valid session
/// exists.
#[cfg_attr(feature = "server", tracing::instrument)]
#[server]
pub async fn get_current_user() -> Result<Option<AuthUser>, ServerFnError> {
    let cookie = cookies::session_cookie();
    backend()
        .profile(cookie.as_deref())
        .await
        .map_err(|e| e.into_server_fn_error())
}

/// Fetch profile, trucks, and manifests in parallel for one dashboard
/// render. Any individual failure degrades that resource rather than
/// failing the page; driver sessions see only their own assignments.
#[cfg_attr(feature = "server", tracing::instrument)]
#[server]
pub async fn load_dashboard() -> Result<DashboardData, ServerFnError> {
    let cookie = cookies::session_cookie();
    let cookie = cookie.as_deref();

    let (user, trucks, manifests) = tokio::join!(
        backend().profile(cookie),
        backend().trucks(cookie),
        backend().manifests(cookie),
    );

    let user = user.unwrap_or_else(|e| {
        tracing::warn!(error = %e, "Profile fetch failed, rendering without a user");
        None
    });
    let trucks = trucks.unwrap_or_else(|e| {
        tracing::warn!(error = %e, "Truck fetch failed, rendering empty fleet");
        Vec::new()
    });
    let manifests = manifests.unwrap_or_else(|e| {
        tracing::warn!(error = %e, "Manifest fetch failed, rendering empty list");
        Vec::new()
    });

    Ok(scope_to_role(user, trucks, manifests))
}

/// Apply role-based scoping: drivers see only trucks and manifests assigned
/// to them; every other role sees the whole fleet.
#[cfg(feature = "server")]
fn scope_to_role(
    user: Option<AuthUser>,
    trucks: Vec<Truck>,
    manifests: Vec<Manifest>,
) -> DashboardData {
    let is_driver = user
        .as_ref()
        .map(|u| u.role() == UserRole::Driver)
        .unwrap_or(false);

    if !is_driver {
        return DashboardData {
            user,
            trucks,
            manifests,
        };
    }

    let driver_id = user.as_ref().map(|u| u.id.clone()).unwrap_or_default();
    DashboardData {
        user,
        trucks: filter_trucks_for_driver(trucks, &driver_id),
        manifests: filter_manifests_for_driver(manifests, &driver_id),
    }
}

/// Trucks whose assigned driver matches, whichever reference shape the
/// backend used.
#[cfg(feature = "server")]
fn filter_trucks_for_driver(trucks: Vec<Truck>, driver_id: &str) -> Vec<Truck> {
    trucks
        .into_iter()
        .filter(|t| {
            t.assigned_driver
                .as_ref()
                .map(|d| d.id() == driver_id)
                .unwrap_or(false)
        })
        .collect()
}

/// Manifests whose driver matches, whichever reference shape the backend
/// used.
#[cfg(feature = "server")]
fn filter_manifests_for_driver(manifests: Vec<Manifest>, driver_id: &str) -> Vec<Manifest> {
    manifests
        .into_iter()
        .filter(|m| m.driver.id() == driver_id)
        .collect()
}

#[cfg(all(test, feature = "server"))]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use shared_types::{DriverRef, RoutePoint, TruckRef, UserSummary};

    fn truck(id: &str, driver: Option<DriverRef>) -> Truck {
        Truck {
            id: id.into(),
            truck_number: format!("FL-{id}"),
            license_plate: "TEST".into(),
            make: None,
            model: None,
            year: None,
            status: "available".into(),
            assigned_driver: driver,
            current_location: None,
        }
    }

    fn manifest(id: &str, driver: DriverRef) -> Manifest {
        Manifest {
            id: id.into(),
            manifest_number: format!("MAN-{id}"),
            truck: TruckRef::Id("T1".into()),
            driver,
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
            status: "pending".into(),
            departure_time: None,
            arrival_time: None,
            last_reported_location: None,
            cargo_description: None,
            notes: None,
        }
    }

    fn user_ref(id: &str) -> DriverRef {
        DriverRef::User(UserSummary {
            id: id.into(),
            name: String::new(),
            email: String::new(),
        })
    }

    #[test]
    fn trucks_filtered_by_embedded_driver_object() {
        let trucks = vec![
            truck("1", Some(user_ref("D1"))),
            truck("2", Some(user_ref("D2"))),
            truck("3", None),
        ];
        let filtered = filter_trucks_for_driver(trucks, "D1");
        assert_eq!(filtered.len(), 1);
        assert_eq!(filtered[0].id, "1");
    }

    #[test]
    fn manifests_filtered_by_both_reference_shapes() {
        let manifests = vec![
            manifest("1", DriverRef::Id("D1".into())),
            manifest("2", user_ref("D1")),
            manifest("3", DriverRef::Id("D2".into())),
        ];
        let filtered = filter_manifests_for_driver(manifests, "D1");
        assert_eq!(filtered.len(), 2);
        assert_eq!(filtered[0].id, "1");
        assert_eq!(filtered[1].id, "2");
    }

    #[test]
    fn non_driver_roles_see_everything() {
        let admin = AuthUser {
            id: "A1".into(),
            email: "admin@fleet.test".into(),
            name: "Admin".into(),
            role: "admin".into(),
            truck_id: None,
        };
        let data = scope_to_role(
            Some(admin),
            vec![truck("1", Some(user_ref("D2")))],
            vec![manifest("1", DriverRef::Id("D2".into()))],
        );
        assert_eq!(data.trucks.len(), 1);
        assert_eq!(data.manifests.len(), 1);
    }

    #[test]
    fn driver_role_is_scoped() {
        let driver = AuthUser {
            id: "D1".into(),
            email: "driver@fleet.test".into(),
            name: "Driver".into(),
            role: "driver".into(),
            truck_id: None,
        };
        let data = scope_to_role(
            Some(driver),
            vec![
                truck("1", Some(user_ref("D1"))),
                truck("2", Some(user_ref("D2"))),
            ],
            vec![
                manifest("1", DriverRef::Id("D1".into())),
                manifest("2", DriverRef::Id("D2".into())),
            ],
        );
        assert_eq!(data.trucks.len(), 1);
        assert_eq!(data.trucks[0].id, "1");
        assert_eq!(data.manifests.len(), 1);
        assert_eq!(data.manifests[0].id, "1");
    }

    #[test]
    fn missing_user_keeps_fleet_unscoped() {
        let data = scope_to_role(None, vec![truck("1", None)], vec![]);
        assert_eq!(data.trucks.len(), 1);
        assert!(data.user.is_none());
    }
}

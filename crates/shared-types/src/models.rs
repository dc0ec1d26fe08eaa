use serde::{Deserialize, Serialize};

/// Dashboard user role controlling which views and controls are available.
///
/// - `Driver` — sees the assigned truck and the active manifest; can report
///   location and record departure/arrival.
/// - `Dispatcher` — fleet-wide visibility; manages trucks and manifests.
/// - `Admin` — full access (superset of all roles).
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
pub enum UserRole {
    #[default]
    Driver,
    Dispatcher,
    Admin,
}

impl UserRole {
    /// Parse the backend's `role` string. Unknown values default to Driver,
    /// the least-privileged role.
    pub fn from_str_or_default(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "admin" => UserRole::Admin,
            "dispatcher" => UserRole::Dispatcher,
            _ => UserRole::Driver,
        }
    }

    /// Lowercase string as the backend stores it.
    pub fn as_str(&self) -> &'static str {
        match self {
            UserRole::Driver => "driver",
            UserRole::Dispatcher => "dispatcher",
            UserRole::Admin => "admin",
        }
    }
}

/// Operational status of a truck.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TruckStatus {
    Available,
    InTransit,
    Maintenance,
}

impl TruckStatus {
    pub fn from_str_or_default(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "in-transit" => TruckStatus::InTransit,
            "maintenance" => TruckStatus::Maintenance,
            _ => TruckStatus::Available,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            TruckStatus::Available => "available",
            TruckStatus::InTransit => "in-transit",
            TruckStatus::Maintenance => "maintenance",
        }
    }
}

/// Lifecycle status of a manifest.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ManifestStatus {
    Pending,
    InTransit,
    Completed,
    Cancelled,
}

impl ManifestStatus {
    pub fn from_str_or_default(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "in-transit" => ManifestStatus::InTransit,
            "completed" => ManifestStatus::Completed,
            "cancelled" => ManifestStatus::Cancelled,
            _ => ManifestStatus::Pending,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ManifestStatus::Pending => "pending",
            ManifestStatus::InTransit => "in-transit",
            ManifestStatus::Completed => "completed",
            ManifestStatus::Cancelled => "cancelled",
        }
    }
}

/// Truck statuses offered by edit forms, in display order.
pub const TRUCK_STATUSES: &[&str] = &["available", "in-transit", "maintenance"];

/// Manifest statuses offered by edit forms, in display order.
pub const MANIFEST_STATUSES: &[&str] = &["pending", "in-transit", "completed", "cancelled"];

/// The authenticated user as returned by `GET /auth/profile` and the login
/// and register endpoints. Mirrored client-side for the tab's lifetime.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct AuthUser {
    pub id: String,
    pub email: String,
    pub name: String,
    /// Raw role string from the backend; resolve with [`AuthUser::role`].
    pub role: String,
    /// Id of the truck assigned to this user, when the backend embeds one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub truck_id: Option<String>,
}

impl AuthUser {
    pub fn role(&self) -> UserRole {
        UserRole::from_str_or_default(&self.role)
    }
}

/// A GPS fix, optionally reverse-geocoded.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct GeoPoint {
    pub latitude: f64,
    pub longitude: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    /// Set by the backend when it records the fix.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_updated: Option<String>,
}

/// A named route endpoint (origin or destination) with resolved coordinates.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct RoutePoint {
    pub address: String,
    pub latitude: f64,
    pub longitude: f64,
}

/// Compact user shape embedded in trucks and manifests.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct UserSummary {
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
}

/// A reference to a driver that the backend serializes either as an embedded
/// user object or as a bare id string, depending on the endpoint.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(untagged)]
pub enum DriverRef {
    User(UserSummary),
    Id(String),
}

impl DriverRef {
    pub fn id(&self) -> &str {
        match self {
            DriverRef::User(u) => &u.id,
            DriverRef::Id(id) => id,
        }
    }

    /// Display name when the object shape is available, otherwise the id.
    pub fn display_name(&self) -> &str {
        match self {
            DriverRef::User(u) if !u.name.is_empty() => &u.name,
            DriverRef::User(u) => &u.id,
            DriverRef::Id(id) => id,
        }
    }
}

/// A reference to a truck, embedded object or bare id.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(untagged)]
pub enum TruckRef {
    Truck(Box<Truck>),
    Id(String),
}

impl TruckRef {
    pub fn id(&self) -> &str {
        match self {
            TruckRef::Truck(t) => &t.id,
            TruckRef::Id(id) => id,
        }
    }

    pub fn label(&self) -> &str {
        match self {
            TruckRef::Truck(t) => &t.truck_number,
            TruckRef::Id(id) => id,
        }
    }
}

/// A truck as returned by the `/trucks` endpoints.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Truck {
    pub id: String,
    pub truck_number: String,
    pub license_plate: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub make: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub model: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub year: Option<i32>,
    #[serde(default)]
    pub status: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub assigned_driver: Option<DriverRef>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub current_location: Option<GeoPoint>,
}

impl Truck {
    pub fn status(&self) -> TruckStatus {
        TruckStatus::from_str_or_default(&self.status)
    }
}

/// A delivery manifest as returned by the `/manifests` endpoints.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Manifest {
    pub id: String,
    pub manifest_number: String,
    pub truck: TruckRef,
    pub driver: DriverRef,
    pub origin: RoutePoint,
    pub destination: RoutePoint,
    #[serde(default)]
    pub status: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub departure_time: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub arrival_time: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_reported_location: Option<GeoPoint>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cargo_description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

impl Manifest {
    pub fn status(&self) -> ManifestStatus {
        ManifestStatus::from_str_or_default(&self.status)
    }

    pub fn is_in_transit(&self) -> bool {
        self.status() == ManifestStatus::InTransit
    }
}

/// A geocoding suggestion from the address-lookup service.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AddressSuggestion {
    pub display_name: String,
    pub latitude: f64,
    pub longitude: f64,
}

/// Everything the dashboard needs for one render, fetched in a single
/// server round trip. Individual fetch failures degrade the affected
/// resource to empty/None instead of failing the page.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct DashboardData {
    pub user: Option<AuthUser>,
    pub trucks: Vec<Truck>,
    pub manifests: Vec<Manifest>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn role_parsing_defaults_to_driver() {
        assert_eq!(UserRole::from_str_or_default("admin"), UserRole::Admin);
        assert_eq!(
            UserRole::from_str_or_default("Dispatcher"),
            UserRole::Dispatcher
        );
        assert_eq!(UserRole::from_str_or_default("driver"), UserRole::Driver);
        assert_eq!(UserRole::from_str_or_default("intern"), UserRole::Driver);
        assert_eq!(UserRole::from_str_or_default(""), UserRole::Driver);
    }

    #[test]
    fn status_round_trips() {
        for s in TRUCK_STATUSES {
            assert_eq!(TruckStatus::from_str_or_default(s).as_str(), *s);
        }
        for s in MANIFEST_STATUSES {
            assert_eq!(ManifestStatus::from_str_or_default(s).as_str(), *s);
        }
    }

    #[test]
    fn driver_ref_deserializes_embedded_object() {
        let json = r#"{"id":"D1","name":"Ana Reyes","email":"ana@fleet.test"}"#;
        let r: DriverRef = serde_json::from_str(json).unwrap();
        assert_eq!(r.id(), "D1");
        assert_eq!(r.display_name(), "Ana Reyes");
    }

    #[test]
    fn driver_ref_deserializes_bare_id() {
        let r: DriverRef = serde_json::from_str(r#""D2""#).unwrap();
        assert_eq!(r.id(), "D2");
        assert_eq!(r.display_name(), "D2");
    }

    #[test]
    fn truck_deserializes_camel_case() {
        let json = r#"{
            "id": "T1",
            "truckNumber": "FL-204",
            "licensePlate": "8KDX441",
            "status": "in-transit",
            "assignedDriver": {"id": "D1", "name": "Ana", "email": "a@x.test"},
            "currentLocation": {"latitude": 40.7, "longitude": -74.0}
        }"#;
        let t: Truck = serde_json::from_str(json).unwrap();
        assert_eq!(t.truck_number, "FL-204");
        assert_eq!(t.status(), TruckStatus::InTransit);
        assert_eq!(t.assigned_driver.as_ref().unwrap().id(), "D1");
        assert_eq!(t.current_location.as_ref().unwrap().latitude, 40.7);
    }

    #[test]
    fn manifest_accepts_both_truck_ref_shapes() {
        let embedded = r#"{
            "id": "M1",
            "manifestNumber": "MAN-001",
            "truck": {"id": "T1", "truckNumber": "FL-204", "licensePlate": "8KDX441"},
            "driver": "D1",
            "origin": {"address": "Depot A", "latitude": 1.0, "longitude": 2.0},
            "destination": {"address": "Depot B", "latitude": 3.0, "longitude": 4.0},
            "status": "pending"
        }"#;
        let m: Manifest = serde_json::from_str(embedded).unwrap();
        assert_eq!(m.truck.id(), "T1");
        assert_eq!(m.truck.label(), "FL-204");
        assert_eq!(m.driver.id(), "D1");
        assert!(!m.is_in_transit());

        let bare = r#"{
            "id": "M2",
            "manifestNumber": "MAN-002",
            "truck": "T9",
            "driver": {"id": "D1", "name": "Ana", "email": "a@x.test"},
            "origin": {"address": "Depot A", "latitude": 1.0, "longitude": 2.0},
            "destination": {"address": "Depot B", "latitude": 3.0, "longitude": 4.0},
            "status": "in-transit"
        }"#;
        let m: Manifest = serde_json::from_str(bare).unwrap();
        assert_eq!(m.truck.id(), "T9");
        assert!(m.is_in_transit());
    }
}

use serde::{Deserialize, Serialize};

#[cfg(feature = "validation")]
use validator::Validate;

/// Request body for `POST /auth/login`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "validation", derive(Validate))]
pub struct LoginRequest {
    #[cfg_attr(
        feature = "validation",
        validate(email(message = "A valid email address is required"))
    )]
    pub email: String,
    #[cfg_attr(
        feature = "validation",
        validate(length(min = 1, message = "Password is required"))
    )]
    pub password: String,
}

/// Request body for `POST /auth/register`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "validation", derive(Validate))]
pub struct RegisterRequest {
    #[cfg_attr(
        feature = "validation",
        validate(length(min = 1, message = "Name is required"))
    )]
    pub name: String,
    #[cfg_attr(
        feature = "validation",
        validate(email(message = "A valid email address is required"))
    )]
    pub email: String,
    #[cfg_attr(
        feature = "validation",
        validate(length(min = 8, message = "Password must be at least 8 characters"))
    )]
    pub password: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
}

/// Request body for `POST /trucks` and `PUT /trucks/:id`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
#[cfg_attr(feature = "validation", derive(Validate))]
pub struct TruckUpsertRequest {
    #[cfg_attr(
        feature = "validation",
        validate(length(min = 1, message = "Truck number is required"))
    )]
    pub truck_number: String,
    #[cfg_attr(
        feature = "validation",
        validate(length(min = 1, message = "License plate is required"))
    )]
    pub license_plate: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub make: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub model: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[cfg_attr(
        feature = "validation",
        validate(range(min = 1950, max = 2100, message = "Year is out of range"))
    )]
    pub year: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    /// Bare driver id; the backend resolves it.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub assigned_driver: Option<String>,
}

/// Request body for `POST /manifests` and `PUT /manifests/:id`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
#[cfg_attr(feature = "validation", derive(Validate))]
pub struct ManifestUpsertRequest {
    #[cfg_attr(
        feature = "validation",
        validate(length(min = 1, message = "Manifest number is required"))
    )]
    pub manifest_number: String,
    #[cfg_attr(
        feature = "validation",
        validate(length(min = 1, message = "Truck is required"))
    )]
    pub truck: String,
    #[cfg_attr(
        feature = "validation",
        validate(length(min = 1, message = "Driver is required"))
    )]
    pub driver: String,
    pub origin: crate::RoutePoint,
    pub destination: crate::RoutePoint,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cargo_description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

/// Request body for `PUT /trucks/:id/location` and
/// `PUT /manifests/:id/location`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "validation", derive(Validate))]
pub struct LocationUpdateRequest {
    #[cfg_attr(
        feature = "validation",
        validate(range(min = -90.0, max = 90.0, message = "Latitude is out of range"))
    )]
    pub latitude: f64,
    #[cfg_attr(
        feature = "validation",
        validate(range(min = -180.0, max = 180.0, message = "Longitude is out of range"))
    )]
    pub longitude: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn truck_request_serializes_camel_case_and_skips_none() {
        let req = TruckUpsertRequest {
            truck_number: "FL-204".into(),
            license_plate: "8KDX441".into(),
            make: None,
            model: None,
            year: None,
            status: Some("available".into()),
            assigned_driver: None,
        };
        let json = serde_json::to_string(&req).unwrap();
        assert!(json.contains("\"truckNumber\""));
        assert!(json.contains("\"licensePlate\""));
        assert!(!json.contains("assignedDriver"));
        assert!(!json.contains("make"));
    }

    #[test]
    fn location_request_keeps_optional_address() {
        let req = LocationUpdateRequest {
            latitude: 40.7,
            longitude: -74.0,
            address: Some("Newark, NJ".into()),
        };
        let json = serde_json::to_string(&req).unwrap();
        assert!(json.contains("\"address\":\"Newark, NJ\""));
    }

    #[cfg(feature = "validation")]
    #[test]
    fn login_request_rejects_bad_email() {
        use validator::Validate;
        let req = LoginRequest {
            email: "not-an-email".into(),
            password: "secret".into(),
        };
        assert!(req.validate().is_err());
    }
}

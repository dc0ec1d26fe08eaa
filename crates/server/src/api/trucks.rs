use dioxus::prelude::*;
use shared_types::Truck;

#[cfg(feature = "server")]
use crate::auth::cookies;
#[cfg(feature = "server")]
use crate::backend::backend;
#[cfg(feature = "server")]
use crate::error_convert::{AppErrorExt, ValidateRequest};
#[cfg(feature = "server")]
use shared_types::{LocationUpdateRequest, TruckUpsertRequest};

#[cfg_attr(feature = "server", tracing::instrument)]
#[server]
pub async fn list_trucks() -> Result<Vec<Truck>, ServerFnError> {
    let cookie = cookies::session_cookie();
    backend()
        .trucks(cookie.as_deref())
        .await
        .map_err(|e| e.into_server_fn_error())
}

#[cfg_attr(feature = "server", tracing::instrument)]
#[server]
pub async fn get_truck(id: String) -> Result<Truck, ServerFnError> {
    let cookie = cookies::session_cookie();
    backend()
        .truck(cookie.as_deref(), &id)
        .await
        .map_err(|e| e.into_server_fn_error())
}

/// Create a truck. `body` is a JSON-encoded [`TruckUpsertRequest`].
#[cfg_attr(feature = "server", tracing::instrument(skip(body)))]
#[server]
pub async fn create_truck(body: String) -> Result<Truck, ServerFnError> {
    let req: TruckUpsertRequest = serde_json::from_str(&body)
        .map_err(|e| shared_types::AppError::bad_request(e.to_string()).into_server_fn_error())?;
    req.validate_request()
        .map_err(|e| e.into_server_fn_error())?;

    let cookie = cookies::session_cookie();
    backend()
        .create_truck(cookie.as_deref(), &req)
        .await
        .map_err(|e| e.into_server_fn_error())
}

/// Update a truck. `body` is a JSON-encoded [`TruckUpsertRequest`].
#[cfg_attr(feature = "server", tracing::instrument(skip(body)))]
#[server]
pub async fn update_truck(id: String, body: String) -> Result<Truck, ServerFnError> {
    let req: TruckUpsertRequest = serde_json::from_str(&body)
        .map_err(|e| shared_types::AppError::bad_request(e.to_string()).into_server_fn_error())?;
    req.validate_request()
        .map_err(|e| e.into_server_fn_error())?;

    let cookie = cookies::session_cookie();
    backend()
        .update_truck(cookie.as_deref(), &id, &req)
        .await
        .map_err(|e| e.into_server_fn_error())
}

#[cfg_attr(feature = "server", tracing::instrument)]
#[server]
pub async fn update_truck_location(
    id: String,
    latitude: f64,
    longitude: f64,
    address: Option<String>,
) -> Result<Truck, ServerFnError> {
    let req = LocationUpdateRequest {
        latitude,
        longitude,
        address,
    };
    req.validate_request()
        .map_err(|e| e.into_server_fn_error())?;

    let cookie = cookies::session_cookie();
    backend()
        .update_truck_location(cookie.as_deref(), &id, &req)
        .await
        .map_err(|e| e.into_server_fn_error())
}

#[cfg_attr(feature = "server", tracing::instrument)]
#[server]
pub async fn delete_truck(id: String) -> Result<(), ServerFnError> {
    let cookie = cookies::session_cookie();
    backend()
        .delete_truck(cookie.as_deref(), &id)
        .await
        .map_err(|e| e.into_server_fn_error())
}

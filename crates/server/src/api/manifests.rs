use dioxus::prelude::*;
use shared_types::Manifest;

#[cfg(feature = "server")]
use crate::auth::cookies;
#[cfg(feature = "server")]
use crate::backend::backend;
#[cfg(feature = "server")]
use crate::error_convert::{AppErrorExt, ValidateRequest};
#[cfg(feature = "server")]
use shared_types::{LocationUpdateRequest, ManifestUpsertRequest};

#[cfg_attr(feature = "server", tracing::instrument)]
#[server]
pub async fn list_manifests() -> Result<Vec<Manifest>, ServerFnError> {
    let cookie = cookies::session_cookie();
    backend()
        .manifests(cookie.as_deref())
        .await
        .map_err(|e| e.into_server_fn_error())
}

#[cfg_attr(feature = "server", tracing::instrument)]
#[server]
pub async fn get_manifest(id: String) -> Result<Manifest, ServerFnError> {
    let cookie = cookies::session_cookie();
    backend()
        .manifest(cookie.as_deref(), &id)
        .await
        .map_err(|e| e.into_server_fn_error())
}

/// Create a manifest. `body` is a JSON-encoded [`ManifestUpsertRequest`].
#[cfg_attr(feature = "server", tracing::instrument(skip(body)))]
#[server]
pub async fn create_manifest(body: String) -> Result<Manifest, ServerFnError> {
    let req: ManifestUpsertRequest = serde_json::from_str(&body)
        .map_err(|e| shared_types::AppError::bad_request(e.to_string()).into_server_fn_error())?;
    req.validate_request()
        .map_err(|e| e.into_server_fn_error())?;

    let cookie = cookies::session_cookie();
    backend()
        .create_manifest(cookie.as_deref(), &req)
        .await
        .map_err(|e| e.into_server_fn_error())
}

/// Update a manifest. `body` is a JSON-encoded [`ManifestUpsertRequest`].
#[cfg_attr(feature = "server", tracing::instrument(skip(body)))]
#[server]
pub async fn update_manifest(id: String, body: String) -> Result<Manifest, ServerFnError> {
    let req: ManifestUpsertRequest = serde_json::from_str(&body)
        .map_err(|e| shared_types::AppError::bad_request(e.to_string()).into_server_fn_error())?;
    req.validate_request()
        .map_err(|e| e.into_server_fn_error())?;

    let cookie = cookies::session_cookie();
    backend()
        .update_manifest(cookie.as_deref(), &id, &req)
        .await
        .map_err(|e| e.into_server_fn_error())
}

#[cfg_attr(feature = "server", tracing::instrument)]
#[server]
pub async fn update_manifest_location(
    id: String,
    latitude: f64,
    longitude: f64,
    address: Option<String>,
) -> Result<Manifest, ServerFnError> {
    let req = LocationUpdateRequest {
        latitude,
        longitude,
        address,
    };
    req.validate_request()
        .map_err(|e| e.into_server_fn_error())?;

    let cookie = cookies::session_cookie();
    backend()
        .update_manifest_location(cookie.as_deref(), &id, &req)
        .await
        .map_err(|e| e.into_server_fn_error())
}

/// Record departure — the backend stamps the time and moves the manifest to
/// `in-transit`.
#[cfg_attr(feature = "server", tracing::instrument)]
#[server]
pub async fn record_departure(id: String) -> Result<Manifest, ServerFnError> {
    let cookie = cookies::session_cookie();
    backend()
        .record_departure(cookie.as_deref(), &id)
        .await
        .map_err(|e| e.into_server_fn_error())
}

/// Record arrival — the backend stamps the time and moves the manifest to
/// `completed`.
#[cfg_attr(feature = "server", tracing::instrument)]
#[server]
pub async fn record_arrival(id: String) -> Result<Manifest, ServerFnError> {
    let cookie = cookies::session_cookie();
    backend()
        .record_arrival(cookie.as_deref(), &id)
        .await
        .map_err(|e| e.into_server_fn_error())
}

#[cfg_attr(feature = "server", tracing::instrument)]
#[server]
pub async fn delete_manifest(id: String) -> Result<(), ServerFnError> {
    let cookie = cookies::session_cookie();
    backend()
        .delete_manifest(cookie.as_deref(), &id)
        .await
        .map_err(|e| e.into_server_fn_error())
}

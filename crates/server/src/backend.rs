//! Typed HTTP client for the external fleet backend.
//!
//! Every call forwards the caller's session cookie and normalizes error
//! responses (`{ message, error, status }`) into [`AppError`]. No retries,
//! backoff, or request de-duplication — each call either resolves with a
//! typed payload or fails with a normalized error.

use reqwest::header::{HeaderValue, COOKIE, SET_COOKIE};
use reqwest::{Method, StatusCode};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::sync::OnceLock;

use shared_types::{
    AppError, AuthUser, LocationUpdateRequest, LoginRequest, Manifest, ManifestUpsertRequest,
    RegisterRequest, Truck, TruckUpsertRequest,
};

static CLIENT: OnceLock<BackendClient> = OnceLock::new();

/// Get the process-wide backend client, constructed from config on first use.
pub fn backend() -> &'static BackendClient {
    CLIENT.get_or_init(|| BackendClient::new(&crate::config::config().backend.base_url))
}

/// Login/register/profile responses wrap the user object.
#[derive(Debug, Deserialize)]
struct UserEnvelope {
    user: AuthUser,
}

/// Auth responses carry the session cookie out-of-band as `Set-Cookie`
/// headers that must be forwarded verbatim to the browser.
#[derive(Debug)]
pub struct AuthOutcome {
    pub user: AuthUser,
    pub set_cookies: Vec<String>,
}

pub struct BackendClient {
    http: reqwest::Client,
    base_url: String,
}

impl BackendClient {
    pub fn new(base_url: impl AsRef<str>) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: base_url.as_ref().trim_end_matches('/').to_string(),
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Issue a request and decode the JSON response.
    ///
    /// `cookie` is the inbound request's `Cookie` header, forwarded so the
    /// backend sees the browser's session. `204 No Content` decodes only
    /// into `()`-compatible targets via [`Self::send_no_content`].
    async fn send<T: DeserializeOwned>(
        &self,
        method: Method,
        path: &str,
        cookie: Option<&str>,
        body: Option<&impl Serialize>,
    ) -> Result<T, AppError> {
        let response = self.execute(method, path, cookie, body).await?;
        let status = response.status();

        if !status.is_success() {
            let text = response.text().await.unwrap_or_default();
            return Err(AppError::from_backend_response(status.as_u16(), &text));
        }

        response
            .json::<T>()
            .await
            .map_err(|e| AppError::internal(format!("Invalid response from backend: {e}")))
    }

    /// Issue a request where the success body is irrelevant (200/204).
    async fn send_no_content(
        &self,
        method: Method,
        path: &str,
        cookie: Option<&str>,
        body: Option<&impl Serialize>,
    ) -> Result<(), AppError> {
        let response = self.execute(method, path, cookie, body).await?;
        let status = response.status();

        if !status.is_success() {
            let text = response.text().await.unwrap_or_default();
            return Err(AppError::from_backend_response(status.as_u16(), &text));
        }
        Ok(())
    }

    async fn execute(
        &self,
        method: Method,
        path: &str,
        cookie: Option<&str>,
        body: Option<&impl Serialize>,
    ) -> Result<reqwest::Response, AppError> {
        let mut request = self.http.request(method, self.url(path));
        if let Some(cookie) = cookie {
            if let Ok(value) = HeaderValue::from_str(cookie) {
                request = request.header(COOKIE, value);
            }
        }
        if let Some(body) = body {
            request = request.json(body);
        }
        request
            .send()
            .await
            .map_err(|e| AppError::network(format!("Backend unreachable: {e}")))
    }

    /// Auth call that decodes the user envelope and captures `Set-Cookie`
    /// headers for forwarding.
    async fn auth_call(
        &self,
        path: &str,
        body: &impl Serialize,
    ) -> Result<AuthOutcome, AppError> {
        let response = self.execute(Method::POST, path, None, Some(body)).await?;
        let status = response.status();

        let set_cookies = response
            .headers()
            .get_all(SET_COOKIE)
            .iter()
            .filter_map(|v| v.to_str().ok())
            .map(|s| s.to_string())
            .collect();

        if !status.is_success() {
            let text = response.text().await.unwrap_or_default();
            return Err(AppError::from_backend_response(status.as_u16(), &text));
        }

        let envelope = response
            .json::<UserEnvelope>()
            .await
            .map_err(|e| AppError::internal(format!("Invalid response from backend: {e}")))?;

        Ok(AuthOutcome {
            user: envelope.user,
            set_cookies,
        })
    }

    // ── Auth ────────────────────────────────────────────────

    pub async fn login(&self, req: &LoginRequest) -> Result<AuthOutcome, AppError> {
        self.auth_call("/auth/login", req).await
    }

    pub async fn register(&self, req: &RegisterRequest) -> Result<AuthOutcome, AppError> {
        self.auth_call("/auth/register", req).await
    }

    pub async fn logout(&self, cookie: Option<&str>) -> Result<(), AppError> {
        self.send_no_content(Method::POST, "/auth/logout", cookie, None::<&()>)
            .await
    }

    /// Fetch the current session's user. `401` means "no valid session" and
    /// maps to `Ok(None)` rather than an error.
    pub async fn profile(&self, cookie: Option<&str>) -> Result<Option<AuthUser>, AppError> {
        let response = self
            .execute(Method::GET, "/auth/profile", cookie, None::<&()>)
            .await?;
        let status = response.status();

        if status == StatusCode::UNAUTHORIZED {
            return Ok(None);
        }
        if !status.is_success() {
            let text = response.text().await.unwrap_or_default();
            return Err(AppError::from_backend_response(status.as_u16(), &text));
        }

        let envelope = response
            .json::<UserEnvelope>()
            .await
            .map_err(|e| AppError::internal(format!("Invalid response from backend: {e}")))?;
        Ok(Some(envelope.user))
    }

    // ── Trucks ──────────────────────────────────────────────

    pub async fn trucks(&self, cookie: Option<&str>) -> Result<Vec<Truck>, AppError> {
        self.send(Method::GET, "/trucks", cookie, None::<&()>).await
    }

    pub async fn truck(&self, cookie: Option<&str>, id: &str) -> Result<Truck, AppError> {
        self.send(Method::GET, &format!("/trucks/{id}"), cookie, None::<&()>)
            .await
    }

    pub async fn create_truck(
        &self,
        cookie: Option<&str>,
        req: &TruckUpsertRequest,
    ) -> Result<Truck, AppError> {
        self.send(Method::POST, "/trucks", cookie, Some(req)).await
    }

    pub async fn update_truck(
        &self,
        cookie: Option<&str>,
        id: &str,
        req: &TruckUpsertRequest,
    ) -> Result<Truck, AppError> {
        self.send(Method::PUT, &format!("/trucks/{id}"), cookie, Some(req))
            .await
    }

    pub async fn update_truck_location(
        &self,
        cookie: Option<&str>,
        id: &str,
        req: &LocationUpdateRequest,
    ) -> Result<Truck, AppError> {
        self.send(
            Method::PUT,
            &format!("/trucks/{id}/location"),
            cookie,
            Some(req),
        )
        .await
    }

    pub async fn delete_truck(&self, cookie: Option<&str>, id: &str) -> Result<(), AppError> {
        self.send_no_content(Method::DELETE, &format!("/trucks/{id}"), cookie, None::<&()>)
            .await
    }

    // ── Manifests ───────────────────────────────────────────

    pub async fn manifests(&self, cookie: Option<&str>) -> Result<Vec<Manifest>, AppError> {
        self.send(Method::GET, "/manifests", cookie, None::<&()>)
            .await
    }

    pub async fn manifest(&self, cookie: Option<&str>, id: &str) -> Result<Manifest, AppError> {
        self.send(Method::GET, &format!("/manifests/{id}"), cookie, None::<&()>)
            .await
    }

    pub async fn create_manifest(
        &self,
        cookie: Option<&str>,
        req: &ManifestUpsertRequest,
    ) -> Result<Manifest, AppError> {
        self.send(Method::POST, "/manifests", cookie, Some(req))
            .await
    }

    pub async fn update_manifest(
        &self,
        cookie: Option<&str>,
        id: &str,
        req: &ManifestUpsertRequest,
    ) -> Result<Manifest, AppError> {
        self.send(Method::PUT, &format!("/manifests/{id}"), cookie, Some(req))
            .await
    }

    pub async fn update_manifest_location(
        &self,
        cookie: Option<&str>,
        id: &str,
        req: &LocationUpdateRequest,
    ) -> Result<Manifest, AppError> {
        self.send(
            Method::PUT,
            &format!("/manifests/{id}/location"),
            cookie,
            Some(req),
        )
        .await
    }

    pub async fn record_departure(
        &self,
        cookie: Option<&str>,
        id: &str,
    ) -> Result<Manifest, AppError> {
        self.send(
            Method::PUT,
            &format!("/manifests/{id}/departure"),
            cookie,
            None::<&()>,
        )
        .await
    }

    pub async fn record_arrival(
        &self,
        cookie: Option<&str>,
        id: &str,
    ) -> Result<Manifest, AppError> {
        self.send(
            Method::PUT,
            &format!("/manifests/{id}/arrival"),
            cookie,
            None::<&()>,
        )
        .await
    }

    pub async fn delete_manifest(&self, cookie: Option<&str>, id: &str) -> Result<(), AppError> {
        self.send_no_content(
            Method::DELETE,
            &format!("/manifests/{id}"),
            cookie,
            None::<&()>,
        )
        .await
    }
}

use serde::{Deserialize, Serialize};
use std::fmt;

/// Categorization of application errors.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub enum AppErrorKind {
    NotFound,
    BadRequest,
    ValidationError,
    Conflict,
    Unauthorized,
    Forbidden,
    Network,
    Upstream,
    InternalError,
}

impl fmt::Display for AppErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppErrorKind::NotFound => write!(f, "NotFound"),
            AppErrorKind::BadRequest => write!(f, "BadRequest"),
            AppErrorKind::ValidationError => write!(f, "ValidationError"),
            AppErrorKind::Conflict => write!(f, "Conflict"),
            AppErrorKind::Unauthorized => write!(f, "Unauthorized"),
            AppErrorKind::Forbidden => write!(f, "Forbidden"),
            AppErrorKind::Network => write!(f, "Network"),
            AppErrorKind::Upstream => write!(f, "Upstream"),
            AppErrorKind::InternalError => write!(f, "InternalError"),
        }
    }
}

/// Structured application error used across server and client.
///
/// `status` carries the backend's HTTP status when the error originated
/// from an upstream response; it is 0 for purely local failures.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AppError {
    pub kind: AppErrorKind,
    pub message: String,
    #[serde(default)]
    pub status: u16,
}

impl AppError {
    fn new(kind: AppErrorKind, message: impl Into<String>, status: u16) -> Self {
        Self {
            kind,
            message: message.into(),
            status,
        }
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self::new(AppErrorKind::NotFound, message, 404)
    }

    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::new(AppErrorKind::BadRequest, message, 400)
    }

    pub fn validation(message: impl Into<String>) -> Self {
        Self::new(AppErrorKind::ValidationError, message, 422)
    }

    pub fn conflict(message: impl Into<String>) -> Self {
        Self::new(AppErrorKind::Conflict, message, 409)
    }

    pub fn unauthorized(message: impl Into<String>) -> Self {
        Self::new(AppErrorKind::Unauthorized, message, 401)
    }

    pub fn forbidden(message: impl Into<String>) -> Self {
        Self::new(AppErrorKind::Forbidden, message, 403)
    }

    pub fn network(message: impl Into<String>) -> Self {
        Self::new(AppErrorKind::Network, message, 0)
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(AppErrorKind::InternalError, message, 500)
    }

    /// Normalize an upstream error response into a typed error.
    ///
    /// The backend reports failures as `{ message, error, status }`; `body`
    /// is the raw response text. When the body is not parseable the message
    /// falls back to a status-derived description.
    pub fn from_backend_response(status: u16, body: &str) -> Self {
        #[derive(Deserialize)]
        struct BackendError {
            message: String,
        }

        let message = serde_json::from_str::<BackendError>(body)
            .map(|e| e.message)
            .unwrap_or_else(|_| format!("Request failed with status {status}"));

        let kind = match status {
            400 => AppErrorKind::BadRequest,
            401 => AppErrorKind::Unauthorized,
            403 => AppErrorKind::Forbidden,
            404 => AppErrorKind::NotFound,
            409 => AppErrorKind::Conflict,
            422 => AppErrorKind::ValidationError,
            _ => AppErrorKind::Upstream,
        };

        Self::new(kind, message, status)
    }

    /// Parse an AppError from a ServerFnError message string (client-side).
    ///
    /// `ServerFnError::to_string()` wraps the payload like:
    ///   `error running server function: {"kind":"Unauthorized",...} (details: None)`
    /// This method extracts the embedded JSON and parses it.
    pub fn from_server_error(error_message: &str) -> Option<Self> {
        // Try direct parse first (in case the string is raw JSON)
        if let Ok(err) = serde_json::from_str::<Self>(error_message) {
            return Some(err);
        }
        // Extract the JSON object embedded between the first `{` and last `}`
        let start = error_message.find('{')?;
        let end = error_message.rfind('}')?;
        if end > start {
            serde_json::from_str(&error_message[start..=end]).ok()
        } else {
            None
        }
    }

    /// Extract a user-friendly error message from a `ServerFnError.to_string()`.
    ///
    /// Parses the embedded `AppError` JSON and returns its `message` field.
    /// Falls back to a generic message if parsing fails.
    pub fn friendly_message(error_string: &str) -> String {
        if let Some(app_error) = Self::from_server_error(error_string) {
            app_error.message
        } else {
            "Something went wrong. Please try again.".to_string()
        }
    }

    /// True when the error means the session is no longer valid.
    pub fn is_auth_failure(error_string: &str) -> bool {
        Self::from_server_error(error_string)
            .map(|e| matches!(e.kind, AppErrorKind::Unauthorized))
            .unwrap_or(false)
    }
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.kind, self.message)
    }
}

impl std::error::Error for AppError {}

#[cfg(feature = "validation")]
impl From<validator::ValidationErrors> for AppError {
    fn from(errors: validator::ValidationErrors) -> Self {
        let detail = errors
            .field_errors()
            .into_iter()
            .filter_map(|(field, errs)| {
                errs.first().map(|e| {
                    e.message
                        .as_ref()
                        .map(|m| m.to_string())
                        .unwrap_or_else(|| format!("Invalid value for {field}"))
                })
            })
            .collect::<Vec<_>>()
            .join("; ");
        AppError::validation(if detail.is_empty() {
            "Validation failed".to_string()
        } else {
            detail
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn backend_response_preserves_message_and_status() {
        let body = r#"{"message":"Invalid email or password","error":"Unauthorized","status":401}"#;
        let err = AppError::from_backend_response(401, body);
        assert_eq!(err.kind, AppErrorKind::Unauthorized);
        assert_eq!(err.message, "Invalid email or password");
        assert_eq!(err.status, 401);
    }

    #[test]
    fn backend_response_falls_back_on_unparseable_body() {
        let err = AppError::from_backend_response(502, "<html>bad gateway</html>");
        assert_eq!(err.kind, AppErrorKind::Upstream);
        assert_eq!(err.message, "Request failed with status 502");
        assert_eq!(err.status, 502);
    }

    #[test]
    fn backend_response_maps_common_statuses() {
        assert_eq!(
            AppError::from_backend_response(404, "{}").kind,
            AppErrorKind::NotFound
        );
        assert_eq!(
            AppError::from_backend_response(409, "{}").kind,
            AppErrorKind::Conflict
        );
        assert_eq!(
            AppError::from_backend_response(422, "{}").kind,
            AppErrorKind::ValidationError
        );
    }

    #[test]
    fn from_server_error_parses_raw_json() {
        let json = r#"{"kind":"Unauthorized","message":"Invalid token","status":401}"#;
        let err = AppError::from_server_error(json).unwrap();
        assert_eq!(err.kind, AppErrorKind::Unauthorized);
        assert_eq!(err.message, "Invalid token");
    }

    #[test]
    fn from_server_error_parses_wrapped_json() {
        let wrapped = r#"error running server function: {"kind":"NotFound","message":"Truck not found","status":404} (details: None)"#;
        let err = AppError::from_server_error(wrapped).unwrap();
        assert_eq!(err.kind, AppErrorKind::NotFound);
        assert_eq!(err.message, "Truck not found");
    }

    #[test]
    fn from_server_error_returns_none_for_garbage() {
        assert!(AppError::from_server_error("not json at all").is_none());
        assert!(AppError::from_server_error("").is_none());
    }

    #[test]
    fn friendly_message_extracts_message_field() {
        let json = r#"{"kind":"Forbidden","message":"Dispatcher role required","status":403}"#;
        assert_eq!(
            AppError::friendly_message(json),
            "Dispatcher role required"
        );
    }

    #[test]
    fn friendly_message_fallback_for_unparseable() {
        assert_eq!(
            AppError::friendly_message("garbage input"),
            "Something went wrong. Please try again."
        );
    }

    #[test]
    fn auth_failure_detection() {
        let unauthorized = r#"{"kind":"Unauthorized","message":"expired","status":401}"#;
        assert!(AppError::is_auth_failure(unauthorized));
        let not_found = r#"{"kind":"NotFound","message":"missing","status":404}"#;
        assert!(!AppError::is_auth_failure(not_found));
        assert!(!AppError::is_auth_failure("garbage"));
    }

    #[test]
    fn display_impl_formats_correctly() {
        let err = AppError::unauthorized("bad credentials");
        assert_eq!(format!("{}", err), "Unauthorized: bad credentials");
    }

    #[test]
    fn error_roundtrip_through_json() {
        let err = AppError::from_backend_response(409, r#"{"message":"duplicate"}"#);
        let json = serde_json::to_string(&err).unwrap();
        let parsed: AppError = serde_json::from_str(&json).unwrap();
        assert_eq!(err, parsed);
    }
}

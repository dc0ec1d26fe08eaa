use axum::http::{header, HeaderMap, HeaderValue};
use cookie::Cookie;
use std::sync::{Arc, Mutex};

/// Name of the backend-issued session cookie.
pub const ACCESS_TOKEN: &str = "access_token";

/// Parse a specific cookie value from the Cookie header.
pub fn extract_cookie(headers: &HeaderMap, name: &str) -> Option<String> {
    for header_value in headers.get_all(header::COOKIE) {
        if let Ok(cookie_str) = header_value.to_str() {
            for piece in cookie_str.split(';') {
                if let Ok(c) = Cookie::parse(piece.trim().to_string()) {
                    if c.name() == name {
                        return Some(c.value().to_string());
                    }
                }
            }
        }
    }
    None
}

/// Extract the session token from request cookies.
pub fn extract_access_token(headers: &HeaderMap) -> Option<String> {
    extract_cookie(headers, ACCESS_TOKEN)
}

/// Build the Cookie header value forwarded to the backend: just the session
/// cookie, not the browser's full cookie jar.
pub fn forwardable_cookie(headers: &HeaderMap) -> Option<String> {
    extract_access_token(headers).map(|token| format!("{ACCESS_TOKEN}={token}"))
}

/// Build a Set-Cookie header that expires the session cookie immediately.
pub fn build_clear_cookie() -> HeaderValue {
    let cookie = Cookie::build((ACCESS_TOKEN, ""))
        .http_only(true)
        .same_site(cookie::SameSite::Lax)
        .path("/")
        .max_age(cookie::time::Duration::ZERO)
        .build();
    HeaderValue::from_str(&cookie.to_string()).expect("clear cookie should be valid")
}

/// Pending cookie action to be picked up by the guard middleware.
/// Stored in request extensions as `Arc<Mutex<>>` so server functions can
/// populate it.
#[derive(Clone, Debug)]
pub enum PendingCookieAction {
    /// Forward backend-issued `Set-Cookie` header values verbatim.
    Forward(Vec<String>),
    /// Expire the session cookie immediately.
    Clear,
}

/// Shared slot for server functions to communicate cookie actions to the
/// middleware.
#[derive(Clone, Debug, Default)]
pub struct CookieSlot(pub Arc<Mutex<Option<PendingCookieAction>>>);

/// Read the forwardable session cookie from the current server-function
/// request context.
pub fn session_cookie() -> Option<String> {
    let ctx = dioxus::fullstack::FullstackContext::current()?;
    let parts = ctx.parts_mut();
    forwardable_cookie(&parts.headers)
}

/// Schedule backend `Set-Cookie` headers to be applied by the middleware.
/// Called from server functions — reads the CookieSlot from
/// FullstackContext extensions.
pub fn schedule_forward_cookies(set_cookies: Vec<String>) {
    if set_cookies.is_empty() {
        return;
    }
    if let Some(ctx) = dioxus::fullstack::FullstackContext::current() {
        let parts = ctx.parts_mut();
        if let Some(slot) = parts.extensions.get::<CookieSlot>() {
            *slot.0.lock().unwrap() = Some(PendingCookieAction::Forward(set_cookies));
        }
    }
}

/// Schedule the session cookie to be cleared by the middleware.
pub fn schedule_clear_cookies() {
    if let Some(ctx) = dioxus::fullstack::FullstackContext::current() {
        let parts = ctx.parts_mut();
        if let Some(slot) = parts.extensions.get::<CookieSlot>() {
            *slot.0.lock().unwrap() = Some(PendingCookieAction::Clear);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn headers_with_cookie(value: &str) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(header::COOKIE, HeaderValue::from_str(value).unwrap());
        headers
    }

    #[test]
    fn extracts_access_token_among_other_cookies() {
        let headers = headers_with_cookie("theme=dark; access_token=abc123; lang=en");
        assert_eq!(extract_access_token(&headers).as_deref(), Some("abc123"));
    }

    #[test]
    fn missing_cookie_returns_none() {
        let headers = headers_with_cookie("theme=dark");
        assert!(extract_access_token(&headers).is_none());
        assert!(extract_access_token(&HeaderMap::new()).is_none());
    }

    #[test]
    fn forwardable_cookie_contains_only_session() {
        let headers = headers_with_cookie("theme=dark; access_token=abc123");
        assert_eq!(
            forwardable_cookie(&headers).as_deref(),
            Some("access_token=abc123")
        );
    }

    #[test]
    fn clear_cookie_expires_immediately() {
        let value = build_clear_cookie();
        let s = value.to_str().unwrap();
        assert!(s.starts_with("access_token="));
        assert!(s.contains("Max-Age=0"));
        assert!(s.contains("HttpOnly"));
    }
}

use axum::extract::Request;
use axum::http::header;
use axum::middleware::Next;
use axum::response::{IntoResponse, Redirect, Response};

use super::cookies::{self, CookieSlot, PendingCookieAction};

/// Paths reachable without a session.
const PUBLIC_PATHS: &[&str] = &["/login", "/register"];

/// Route guard middleware that gates page navigation on session-cookie
/// presence and applies scheduled cookie changes to the response.
///
/// On each request:
/// 1. Server-function, asset, and framework-internal paths pass through
///    untouched (they handle auth themselves).
/// 2. Protected path without a session cookie → redirect to
///    `/login?redirect=<original path>`.
/// 3. Public path with a session cookie → redirect to the `redirect` query
///    target, or `/`.
/// 4. A `CookieSlot` extension lets server functions schedule Set-Cookie
///    headers (forwarded from the backend on login, expiring on logout),
///    applied here after the handler runs.
///
/// The cookie's signature and expiry are NOT validated — that is the
/// backend's job; the guard only checks presence.
pub async fn route_guard(mut req: Request, next: Next) -> Response {
    let path = req.uri().path().to_string();
    let query = req.uri().query().map(|q| q.to_string());
    let has_session = cookies::extract_access_token(req.headers()).is_some();

    if let GuardDecision::Redirect(target) = guard_decision(&path, query.as_deref(), has_session)
    {
        return Redirect::to(&target).into_response();
    }

    // Insert the slot so server functions can schedule cookie changes
    let cookie_slot = CookieSlot::default();
    req.extensions_mut().insert(cookie_slot.clone());

    let mut response = next.run(req).await;

    // Apply any cookie action scheduled by server functions
    if let Some(action) = cookie_slot.0.lock().unwrap().take() {
        match action {
            PendingCookieAction::Forward(set_cookies) => {
                for value in set_cookies {
                    if let Ok(header_value) = axum::http::HeaderValue::from_str(&value) {
                        response
                            .headers_mut()
                            .append(header::SET_COOKIE, header_value);
                    }
                }
            }
            PendingCookieAction::Clear => {
                response
                    .headers_mut()
                    .append(header::SET_COOKIE, cookies::build_clear_cookie());
            }
        }
    }

    response
}

/// Outcome of the guard for a navigation request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GuardDecision {
    Allow,
    Redirect(String),
}

/// Pure redirect rule, factored out of the middleware for testability.
pub fn guard_decision(path: &str, query: Option<&str>, has_session: bool) -> GuardDecision {
    if is_exempt(path) {
        return GuardDecision::Allow;
    }

    let is_public = PUBLIC_PATHS.contains(&path);

    if !is_public && !has_session {
        return GuardDecision::Redirect(format!(
            "/login?redirect={}",
            urlencoding::encode(path)
        ));
    }

    if is_public && has_session {
        let target = query
            .and_then(|q| query_param(q, "redirect"))
            .filter(|t| t.starts_with('/'))
            .unwrap_or_else(|| "/".to_string());
        return GuardDecision::Redirect(target);
    }

    GuardDecision::Allow
}

/// Server functions, assets, framework internals, and anything that looks
/// like a static file (contains a `.`) bypass the guard.
fn is_exempt(path: &str) -> bool {
    path.starts_with("/api")
        || path.starts_with("/assets")
        || path.starts_with("/_dioxus")
        || path.contains('.')
}

/// Extract a single query parameter, percent-decoded.
fn query_param(query: &str, name: &str) -> Option<String> {
    query.split('&').find_map(|pair| {
        let (k, v) = pair.split_once('=')?;
        if k == name {
            urlencoding::decode(v).ok().map(|s| s.into_owned())
        } else {
            None
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn protected_path_without_session_redirects_to_login() {
        let decision = guard_decision("/trucks", None, false);
        assert_eq!(
            decision,
            GuardDecision::Redirect("/login?redirect=%2Ftrucks".to_string())
        );
    }

    #[test]
    fn root_without_session_carries_redirect_param() {
        let decision = guard_decision("/", None, false);
        assert_eq!(
            decision,
            GuardDecision::Redirect("/login?redirect=%2F".to_string())
        );
    }

    #[test]
    fn protected_path_with_session_allows() {
        assert_eq!(guard_decision("/manifests/M1", None, true), GuardDecision::Allow);
    }

    #[test]
    fn public_path_without_session_allows() {
        assert_eq!(guard_decision("/login", None, false), GuardDecision::Allow);
        assert_eq!(guard_decision("/register", None, false), GuardDecision::Allow);
    }

    #[test]
    fn public_path_with_session_redirects_home() {
        assert_eq!(
            guard_decision("/login", None, true),
            GuardDecision::Redirect("/".to_string())
        );
    }

    #[test]
    fn public_path_with_session_honors_redirect_param() {
        let decision = guard_decision("/login", Some("redirect=%2Fmanifests%2FM1"), true);
        assert_eq!(decision, GuardDecision::Redirect("/manifests/M1".to_string()));
    }

    #[test]
    fn external_redirect_targets_are_ignored() {
        let decision = guard_decision("/login", Some("redirect=https%3A%2F%2Fevil.test"), true);
        assert_eq!(decision, GuardDecision::Redirect("/".to_string()));
    }

    #[test]
    fn asset_and_api_paths_are_exempt() {
        assert_eq!(guard_decision("/api/login", None, false), GuardDecision::Allow);
        assert_eq!(
            guard_decision("/assets/theme.css", None, false),
            GuardDecision::Allow
        );
        assert_eq!(
            guard_decision("/_dioxus/hydrate", None, false),
            GuardDecision::Allow
        );
        assert_eq!(
            guard_decision("/favicon.ico", None, false),
            GuardDecision::Allow
        );
    }
}

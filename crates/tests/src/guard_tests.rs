//! Route-guard integration tests: the redirect matrix from the navigation
//! contract, exercised through a real axum router.

use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use axum::{middleware, Router};
use pretty_assertions::assert_eq;
use tower::ServiceExt;

use server::auth::middleware::route_guard;

fn guard_app() -> Router {
    Router::new()
        .fallback(|| async { "page" })
        .layer(middleware::from_fn(route_guard))
}

async fn send(app: Router, path: &str, cookie: Option<&str>) -> (StatusCode, Option<String>) {
    let mut builder = Request::builder().uri(path);
    if let Some(cookie) = cookie {
        builder = builder.header(header::COOKIE, cookie);
    }
    let response = app
        .oneshot(builder.body(Body::empty()).unwrap())
        .await
        .unwrap();

    let location = response
        .headers()
        .get(header::LOCATION)
        .and_then(|v| v.to_str().ok())
        .map(|s| s.to_string());
    (response.status(), location)
}

const SESSION: &str = "access_token=tok-abc";

#[tokio::test]
async fn protected_path_without_cookie_redirects_to_login() {
    let (status, location) = send(guard_app(), "/trucks", None).await;
    assert_eq!(status, StatusCode::SEE_OTHER);
    assert_eq!(location.as_deref(), Some("/login?redirect=%2Ftrucks"));
}

#[tokio::test]
async fn nested_path_redirect_param_preserves_full_path() {
    let (status, location) = send(guard_app(), "/manifests/M1", None).await;
    assert_eq!(status, StatusCode::SEE_OTHER);
    assert_eq!(
        location.as_deref(),
        Some("/login?redirect=%2Fmanifests%2FM1")
    );
}

#[tokio::test]
async fn protected_path_with_cookie_passes_through() {
    let (status, location) = send(guard_app(), "/trucks", Some(SESSION)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(location, None);
}

#[tokio::test]
async fn login_without_cookie_passes_through() {
    let (status, _) = send(guard_app(), "/login", None).await;
    assert_eq!(status, StatusCode::OK);

    let (status, _) = send(guard_app(), "/register", None).await;
    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn login_with_cookie_redirects_home() {
    let (status, location) = send(guard_app(), "/login", Some(SESSION)).await;
    assert_eq!(status, StatusCode::SEE_OTHER);
    assert_eq!(location.as_deref(), Some("/"));
}

#[tokio::test]
async fn login_with_cookie_honors_redirect_param() {
    let (status, location) = send(
        guard_app(),
        "/login?redirect=%2Fmanifests%2FM1",
        Some(SESSION),
    )
    .await;
    assert_eq!(status, StatusCode::SEE_OTHER);
    assert_eq!(location.as_deref(), Some("/manifests/M1"));
}

#[tokio::test]
async fn static_assets_and_api_paths_bypass_the_guard() {
    for path in ["/favicon.ico", "/assets/theme.css", "/api/anything", "/_dioxus/hot"] {
        let (status, location) = send(guard_app(), path, None).await;
        assert_eq!(status, StatusCode::OK, "{path} should bypass the guard");
        assert_eq!(location, None);
    }
}

#[tokio::test]
async fn other_cookies_do_not_count_as_a_session() {
    let (status, location) = send(guard_app(), "/trucks", Some("theme=fleet")).await;
    assert_eq!(status, StatusCode::SEE_OTHER);
    assert_eq!(location.as_deref(), Some("/login?redirect=%2Ftrucks"));
}

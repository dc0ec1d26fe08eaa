//! Backend-client integration tests against an in-process mock of the
//! fleet REST API: cookie forwarding, envelope decoding, and error
//! normalization.

use pretty_assertions::assert_eq;
use shared_types::{AppErrorKind, LoginRequest};

use server::backend::BackendClient;

use crate::common::{spawn_mock_backend, TEST_TOKEN};

fn session_cookie() -> String {
    format!("access_token={TEST_TOKEN}")
}

#[tokio::test]
async fn login_returns_user_and_captures_set_cookie() {
    let base = spawn_mock_backend().await;
    let client = BackendClient::new(&base);

    let outcome = client
        .login(&LoginRequest {
            email: "driver@fleet.test".into(),
            password: "secret".into(),
        })
        .await
        .expect("login should succeed");

    assert_eq!(outcome.user.id, "D1");
    assert_eq!(outcome.user.role, "driver");
    assert!(
        outcome
            .set_cookies
            .iter()
            .any(|c| c.starts_with(&format!("access_token={TEST_TOKEN}"))),
        "backend Set-Cookie should be captured for forwarding"
    );
}

#[tokio::test]
async fn login_failure_normalizes_backend_error() {
    let base = spawn_mock_backend().await;
    let client = BackendClient::new(&base);

    let err = client
        .login(&LoginRequest {
            email: "driver@fleet.test".into(),
            password: "wrong".into(),
        })
        .await
        .expect_err("login should fail");

    assert_eq!(err.kind, AppErrorKind::Unauthorized);
    assert_eq!(err.message, "Invalid email or password");
    assert_eq!(err.status, 401);
}

#[tokio::test]
async fn profile_with_session_cookie_returns_user() {
    let base = spawn_mock_backend().await;
    let client = BackendClient::new(&base);

    let user = client
        .profile(Some(&session_cookie()))
        .await
        .expect("profile call should succeed")
        .expect("session should resolve to a user");

    assert_eq!(user.email, "driver@fleet.test");
}

#[tokio::test]
async fn profile_without_session_is_none_not_an_error() {
    let base = spawn_mock_backend().await;
    let client = BackendClient::new(&base);

    let user = client.profile(None).await.expect("401 maps to Ok(None)");
    assert!(user.is_none());
}

#[tokio::test]
async fn trucks_decode_mixed_reference_shapes() {
    let base = spawn_mock_backend().await;
    let client = BackendClient::new(&base);

    let trucks = client
        .trucks(Some(&session_cookie()))
        .await
        .expect("trucks fetch");
    assert_eq!(trucks.len(), 2);
    assert_eq!(trucks[0].assigned_driver.as_ref().unwrap().id(), "D1");
    assert_eq!(
        trucks[0].current_location.as_ref().unwrap().address.as_deref(),
        Some("Newark, NJ")
    );

    let manifests = client
        .manifests(Some(&session_cookie()))
        .await
        .expect("manifests fetch");
    assert_eq!(manifests[0].driver.id(), "D1");
    assert_eq!(manifests[0].truck.id(), "T1");
    assert_eq!(manifests[1].driver.id(), "D2");
    assert_eq!(manifests[1].truck.label(), "FL-205");
}

#[tokio::test]
async fn trucks_without_session_normalize_unauthorized() {
    let base = spawn_mock_backend().await;
    let client = BackendClient::new(&base);

    let err = client.trucks(None).await.expect_err("should be rejected");
    assert_eq!(err.kind, AppErrorKind::Unauthorized);
}

#[tokio::test]
async fn delete_accepts_no_content() {
    let base = spawn_mock_backend().await;
    let client = BackendClient::new(&base);

    client
        .delete_truck(Some(&session_cookie()), "T1")
        .await
        .expect("204 should map to Ok(())");

    let err = client
        .delete_truck(Some(&session_cookie()), "T9")
        .await
        .expect_err("missing truck should error");
    assert_eq!(err.kind, AppErrorKind::NotFound);
    assert_eq!(err.message, "Truck not found");
}

#[tokio::test]
async fn unreachable_backend_is_a_network_error() {
    // Nothing listens on this port
    let client = BackendClient::new("http://127.0.0.1:9");

    let err = client.trucks(None).await.expect_err("should be unreachable");
    assert_eq!(err.kind, AppErrorKind::Network);
    assert_eq!(err.status, 0);
}

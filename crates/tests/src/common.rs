use axum::extract::Path;
use axum::http::{header, HeaderMap, StatusCode};
use axum::response::IntoResponse;
use axum::routing::{delete, get, post};
use axum::{Json, Router};
use serde_json::{json, Value};

/// Session token the mock backend issues and accepts.
pub const TEST_TOKEN: &str = "tok-test-123";

/// Spawn an in-process mock of the fleet backend on an ephemeral port.
/// Returns its base URL; the server lives until the test process exits.
pub async fn spawn_mock_backend() -> String {
    let app = Router::new()
        .route("/auth/login", post(login))
        .route("/auth/logout", post(logout))
        .route("/auth/profile", get(profile))
        .route("/trucks", get(trucks))
        .route("/trucks/{id}", delete(delete_truck))
        .route("/manifests", get(manifests));

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind mock backend");
    let addr = listener.local_addr().expect("mock backend addr");

    tokio::spawn(async move {
        axum::serve(listener, app).await.expect("serve mock backend");
    });

    format!("http://{addr}")
}

fn authed(headers: &HeaderMap) -> bool {
    headers
        .get(header::COOKIE)
        .and_then(|v| v.to_str().ok())
        .map(|c| c.contains(&format!("access_token={TEST_TOKEN}")))
        .unwrap_or(false)
}

fn driver_user() -> Value {
    json!({
        "id": "D1",
        "email": "driver@fleet.test",
        "name": "Ana Reyes",
        "role": "driver"
    })
}

async fn login(Json(body): Json<Value>) -> impl IntoResponse {
    if body["password"] == "secret" {
        (
            StatusCode::OK,
            [(
                header::SET_COOKIE,
                format!("access_token={TEST_TOKEN}; Path=/; HttpOnly"),
            )],
            Json(json!({ "user": driver_user() })),
        )
            .into_response()
    } else {
        (
            StatusCode::UNAUTHORIZED,
            Json(json!({
                "message": "Invalid email or password",
                "error": "Unauthorized",
                "status": 401
            })),
        )
            .into_response()
    }
}

async fn logout() -> impl IntoResponse {
    Json(json!({ "message": "Logged out" }))
}

async fn profile(headers: HeaderMap) -> impl IntoResponse {
    if authed(&headers) {
        Json(json!({ "user": driver_user() })).into_response()
    } else {
        (
            StatusCode::UNAUTHORIZED,
            Json(json!({
                "message": "Not authenticated",
                "error": "Unauthorized",
                "status": 401
            })),
        )
            .into_response()
    }
}

async fn trucks(headers: HeaderMap) -> impl IntoResponse {
    if !authed(&headers) {
        return (
            StatusCode::UNAUTHORIZED,
            Json(json!({
                "message": "Not authenticated",
                "error": "Unauthorized",
                "status": 401
            })),
        )
            .into_response();
    }
    Json(json!([
        {
            "id": "T1",
            "truckNumber": "FL-204",
            "licensePlate": "8KDX441",
            "status": "in-transit",
            "assignedDriver": { "id": "D1", "name": "Ana Reyes", "email": "driver@fleet.test" },
            "currentLocation": { "latitude": 40.7128, "longitude": -74.006, "address": "Newark, NJ" }
        },
        {
            "id": "T2",
            "truckNumber": "FL-205",
            "licensePlate": "8KDX442",
            "status": "available",
            "assignedDriver": { "id": "D2", "name": "Sam Ortiz", "email": "sam@fleet.test" }
        }
    ]))
    .into_response()
}

async fn manifests() -> impl IntoResponse {
    // Mixed reference shapes on purpose: embedded driver on one manifest,
    // bare id on the other.
    Json(json!([
        {
            "id": "M1",
            "manifestNumber": "MAN-001",
            "truck": "T1",
            "driver": { "id": "D1", "name": "Ana Reyes", "email": "driver@fleet.test" },
            "origin": { "address": "Depot A", "latitude": 40.7, "longitude": -74.0 },
            "destination": { "address": "Depot B", "latitude": 41.2, "longitude": -73.5 },
            "status": "in-transit"
        },
        {
            "id": "M2",
            "manifestNumber": "MAN-002",
            "truck": { "id": "T2", "truckNumber": "FL-205", "licensePlate": "8KDX442" },
            "driver": "D2",
            "origin": { "address": "Depot C", "latitude": 39.9, "longitude": -75.1 },
            "destination": { "address": "Depot D", "latitude": 40.4, "longitude": -74.8 },
            "status": "pending"
        }
    ]))
}

async fn delete_truck(Path(id): Path<String>) -> impl IntoResponse {
    if id == "T1" {
        StatusCode::NO_CONTENT.into_response()
    } else {
        (
            StatusCode::NOT_FOUND,
            Json(json!({
                "message": "Truck not found",
                "error": "Not Found",
                "status": 404
            })),
        )
            .into_response()
    }
}

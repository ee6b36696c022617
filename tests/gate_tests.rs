//! Gate server routes backed by a mocked queue backend.

mod common;

use axum::body::{to_bytes, Body};
use axum::http::{header, Request, StatusCode};
use common::{mount_status, serving_token, test_config, CLIENT_ID};
use roomq_admission::api::create_router;
use roomq_admission::state::AppState;
use roomq_admission::transport::ReqwestTransport;
use tower::ServiceExt;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn app(server: &MockServer) -> axum::Router {
    create_router(AppState::new(test_config(server), ReqwestTransport::new()))
}

async fn json_body(response: axum::response::Response) -> serde_json::Value {
    let bytes = to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("Should read body");
    serde_json::from_slice(&bytes).expect("Should be JSON")
}

#[tokio::test]
async fn test_health_reports_running_queue() {
    let server = MockServer::start().await;
    mount_status(&server, "running").await;

    let response = app(&server)
        .oneshot(Request::builder().uri("/health").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = json_body(response).await;
    assert_eq!(body["status"], "healthy");
    assert_eq!(body["queue"], "running");
}

#[tokio::test]
async fn test_health_reports_stopped_queue() {
    let server = MockServer::start().await;
    mount_status(&server, "stopped").await;

    let response = app(&server)
        .oneshot(Request::builder().uri("/health").body(Body::empty()).unwrap())
        .await
        .unwrap();

    let body = json_body(response).await;
    assert_eq!(body["status"], "degraded");
    assert_eq!(body["queue"], "stopped");
}

#[tokio::test]
async fn test_extend_route_sets_renewed_cookie() {
    let server = MockServer::start().await;
    mount_status(&server, "running").await;

    Mock::given(method("POST"))
        .and(path(format!("/queue/{}", CLIENT_ID)))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(serde_json::json!({"id": "renewed-token"})),
        )
        .mount(&server)
        .await;

    let response = app(&server)
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/serving/extend?minutes=15")
                .header(
                    header::COOKIE,
                    format!("be_roomq_t_{}={}", CLIENT_ID, serving_token("abc")),
                )
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::NO_CONTENT);
    let cookie = response.headers()[header::SET_COOKIE].to_str().unwrap();
    assert!(cookie.starts_with("be_roomq_t_room-456=renewed-token;"));
}

#[tokio::test]
async fn test_serving_route_maps_not_serving() {
    let server = MockServer::start().await;
    mount_status(&server, "running").await;

    let response = app(&server)
        .oneshot(
            Request::builder()
                .uri("/serving")
                .header(
                    header::COOKIE,
                    format!("be_roomq_t_{}={}", CLIENT_ID, serving_token("abc")),
                )
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert!(response.headers().get(header::SET_COOKIE).is_none());
    let body = json_body(response).await;
    assert_eq!(body["code"], 404);
}

#[tokio::test]
async fn test_queue_stopped_is_service_unavailable() {
    let server = MockServer::start().await;
    mount_status(&server, "stopped").await;

    let response = app(&server)
        .oneshot(
            Request::builder()
                .method("DELETE")
                .uri("/serving")
                .header(
                    header::COOKIE,
                    format!("be_roomq_t_{}={}", CLIENT_ID, serving_token("abc")),
                )
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
    assert!(response.headers().get(header::SET_COOKIE).is_none());
}

#[tokio::test]
async fn test_locker_route_fetches_session_locker() {
    let server = MockServer::start().await;
    let token = serving_token("abc");

    Mock::given(method("GET"))
        .and(path(format!("/api/lockers/{}/sessions/{}", CLIENT_ID, token)))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(serde_json::json!({"seat": ["A12"]})),
        )
        .mount(&server)
        .await;

    let response = app(&server)
        .oneshot(
            Request::builder()
                .uri("/locker")
                .header(header::COOKIE, format!("be_roomq_t_{}={}", CLIENT_ID, token))
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = json_body(response).await;
    assert_eq!(body["seat"][0], "A12");
}

pub mod context;
pub mod gate;
pub mod health;

pub use context::GateContext;

use axum::Router;

use crate::state::AppState;

/// Create the gate-server router
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .merge(gate::gate_routes())
        .merge(health::health_routes())
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use crate::models::TokenClaims;
    use crate::token::TokenSigner;
    use crate::transport::ReqwestTransport;
    use axum::body::Body;
    use axum::http::{header, Request, StatusCode};
    use tower::ServiceExt;

    fn test_state() -> AppState {
        let config = Config {
            client_id: "room-456".to_string(),
            jwt_secret: "test-secret-key".to_string(),
            ticket_issuer: "https://queue.example.com/enter".to_string(),
            // Nothing listens here; only routes that skip the backend are exercised.
            status_endpoint: "http://127.0.0.1:9".to_string(),
            backend_scheme: "http".to_string(),
            api_key: None,
            locker_url: None,
            server_host: "localhost".to_string(),
            server_port: 8080,
            request_timeout_seconds: 5,
        };
        AppState::new(config, ReqwestTransport::new())
    }

    #[tokio::test]
    async fn test_protected_page_redirects_new_visitor() {
        let app = create_router(test_state());

        let response = app
            .oneshot(
                Request::builder()
                    .uri("/")
                    .header(header::HOST, "shop.example.com")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::SEE_OTHER);
        let location = response.headers()[header::LOCATION].to_str().unwrap();
        assert!(location.starts_with("https://queue.example.com/enter?noq_t="));
        let cookie = response.headers()[header::SET_COOKIE].to_str().unwrap();
        assert!(cookie.starts_with("be_roomq_t_room-456="));
        assert!(cookie.ends_with("; Path=/"));
    }

    #[tokio::test]
    async fn test_protected_page_serves_admitted_visitor() {
        let app = create_router(test_state());
        let token = TokenSigner::new("test-secret-key")
            .encode(&TokenClaims {
                room_id: Some("room-456".to_string()),
                session_id: Some("abc".to_string()),
                token_type: None,
                deadline: None,
            })
            .unwrap();

        let response = app
            .oneshot(
                Request::builder()
                    .uri("/")
                    .header(header::HOST, "shop.example.com")
                    .header(header::COOKIE, format!("be_roomq_t_room-456={}", token))
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let cookie = response.headers()[header::SET_COOKIE].to_str().unwrap();
        assert!(cookie.starts_with(&format!("be_roomq_t_room-456={};", token)));
    }

    #[tokio::test]
    async fn test_serving_without_token_is_unauthorized() {
        let app = create_router(test_state());

        let response = app
            .oneshot(
                Request::builder()
                    .uri("/serving")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn test_locker_route_disabled_without_config() {
        let app = create_router(test_state());

        let response = app
            .oneshot(
                Request::builder()
                    .uri("/locker")
                    .header(header::COOKIE, "be_roomq_t_room-456=tok")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }
}

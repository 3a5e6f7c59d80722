//! Authorization gate integration tests
//!
//! Every request here is rejected (or answered) before the database is touched.

use axum::{
    extract::FromRequestParts,
    http::{header::AUTHORIZATION, Method, Request, StatusCode},
};
use base64::{engine::general_purpose::URL_SAFE_NO_PAD, Engine};
use serde_json::{json, Value};
use todo_auth::{AuthBackend, AuthConfig, AuthError, AuthUser, UNAUTHORIZED_MESSAGE};
use todo_users::{UsersRepositories, UsersState};

use crate::common::{TestApp, TestResponse};

const SOME_ID: &str = "00000000-0000-0000-0000-000000000001";

/// Create `Parts` from an HTTP request with optional authorization header.
fn make_parts(auth_header: Option<&str>) -> axum::http::request::Parts {
    let mut builder = Request::builder();
    if let Some(value) = auth_header {
        builder = builder.header(AUTHORIZATION, value);
    }
    let (parts, _) = builder.body(()).unwrap().into_parts();
    parts
}

fn assert_unauthorized(response: &TestResponse) {
    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
    assert_eq!(
        response.body,
        json!({ "status": "unauthorized", "message": UNAUTHORIZED_MESSAGE })
    );
}

fn b64(value: &Value) -> String {
    URL_SAFE_NO_PAD.encode(serde_json::to_vec(value).unwrap())
}

mod test_gate {
    use super::*;

    #[tokio::test]
    async fn test_missing_header_is_denied() {
        let app = TestApp::without_database().unwrap();

        let response = app.request(Method::GET, "/users", None, None).await;
        assert_unauthorized(&response);
    }

    #[tokio::test]
    async fn test_bearer_prefix_alone_is_denied() {
        let app = TestApp::without_database().unwrap();

        let response = app
            .request(Method::GET, "/users", Some("Bearer "), None)
            .await;
        assert_unauthorized(&response);
    }

    #[tokio::test]
    async fn test_token_signed_with_other_secret_is_denied() {
        let app = TestApp::without_database().unwrap();
        let other = AuthBackend::new(&AuthConfig::new("some-other-secret", None)).unwrap();
        let token = other.issue_token(SOME_ID).unwrap();

        let response = app
            .request_as(&token, Method::GET, &format!("/tasks/{}", SOME_ID), None)
            .await;
        assert_unauthorized(&response);
    }

    #[tokio::test]
    async fn test_unsigned_token_is_denied() {
        let app = TestApp::without_database().unwrap();
        let token = format!(
            "{}.{}.",
            b64(&json!({ "alg": "none", "typ": "JWT" })),
            b64(&json!({ "userid": SOME_ID }))
        );

        let response = app
            .request_as(&token, Method::GET, "/users", None)
            .await;
        assert_unauthorized(&response);
    }

    #[tokio::test]
    async fn test_tampered_claims_are_denied() {
        let app = TestApp::without_database().unwrap();
        let token = app.auth.issue_token(SOME_ID).unwrap();
        let segments: Vec<&str> = token.split('.').collect();
        let tampered = format!(
            "{}.{}.{}",
            segments[0],
            b64(&json!({ "userid": "00000000-0000-0000-0000-000000000002" })),
            segments[2]
        );

        let response = app
            .request_as(&tampered, Method::DELETE, &format!("/users/{}", SOME_ID), None)
            .await;
        assert_unauthorized(&response);
    }

    #[tokio::test]
    async fn test_every_protected_route_is_gated() {
        let app = TestApp::without_database().unwrap();

        for (method, uri) in [
            (Method::GET, "/users".to_string()),
            (Method::GET, format!("/users/{}", SOME_ID)),
            (Method::DELETE, format!("/users/{}", SOME_ID)),
            (Method::POST, "/tasks".to_string()),
            (Method::GET, format!("/tasks/{}", SOME_ID)),
            (Method::PATCH, format!("/tasks/{}", SOME_ID)),
            (Method::DELETE, format!("/tasks/{}", SOME_ID)),
            (Method::GET, format!("/users/{}/tasks", SOME_ID)),
        ] {
            let response = app.request(method, &uri, None, None).await;
            assert_unauthorized(&response);
        }
    }

    #[tokio::test]
    async fn test_valid_token_with_non_user_subject_is_unauthorized() {
        let app = TestApp::without_database().unwrap();
        // Passes the gate, but the subject is not a user id
        let token = app.auth.issue_token("user-123").unwrap();

        let response = app
            .request_as(&token, Method::GET, &format!("/tasks/{}", SOME_ID), None)
            .await;
        assert_unauthorized(&response);
    }

    #[tokio::test]
    async fn test_public_routes_skip_the_gate() {
        let app = TestApp::without_database().unwrap();

        // Rejected by body parsing, not by the gate
        let response = app
            .request(Method::POST, "/users/login", None, Some(json!("not an object")))
            .await;
        assert_eq!(response.status, StatusCode::BAD_REQUEST);
        assert_eq!(response.body["message"], "invalid json payload");
    }

    #[tokio::test]
    async fn test_health_is_public() {
        let app = TestApp::without_database().unwrap();

        let response = app.request(Method::GET, "/health", None, None).await;
        assert_eq!(response.status, StatusCode::OK);
        assert_eq!(response.body, Value::String("OK".to_string()));
    }
}

mod test_extractor {
    use super::*;

    fn users_state(app: &TestApp) -> UsersState {
        UsersState {
            repos: UsersRepositories::new(app.pool.clone()),
            auth: app.auth.clone(),
        }
    }

    #[tokio::test]
    async fn test_valid_token_authenticates() {
        let app = TestApp::without_database().unwrap();
        let token = app.auth.issue_token(SOME_ID).unwrap();

        let mut parts = make_parts(Some(&format!("Bearer {}", token)));
        let AuthUser(ctx) = AuthUser::from_request_parts(&mut parts, &users_state(&app))
            .await
            .unwrap();

        assert_eq!(ctx.subject(), SOME_ID);
        assert_eq!(ctx.user_id().unwrap().to_string(), SOME_ID);
    }

    #[tokio::test]
    async fn test_missing_authorization_header() {
        let app = TestApp::without_database().unwrap();

        let mut parts = make_parts(None);
        let result = AuthUser::from_request_parts(&mut parts, &users_state(&app)).await;

        assert!(matches!(result, Err(AuthError::MissingAuthorization)));
    }

    #[tokio::test]
    async fn test_garbage_token() {
        let app = TestApp::without_database().unwrap();

        let mut parts = make_parts(Some("Bearer not.a.token"));
        let result = AuthUser::from_request_parts(&mut parts, &users_state(&app)).await;

        assert!(matches!(result, Err(AuthError::InvalidToken(_))));
    }
}

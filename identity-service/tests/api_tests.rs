mod common;

use auth::JwtHandler;
use chrono::Duration;
use chrono::Utc;
use common::TestApp;
use reqwest::header;
use reqwest::StatusCode;
use serde_json::json;

const INVALID_LOGIN: &str = "Incorrect email or username or password";
const INVALID_TOKEN: &str = "Could not validate credentials";

async fn message(response: reqwest::Response) -> String {
    let body: serde_json::Value = response.json().await.expect("Failed to parse response");
    body["data"]["message"]
        .as_str()
        .expect("Missing error message")
        .to_string()
}

#[tokio::test]
async fn test_register_success() {
    let app = TestApp::spawn().await;

    let response = app
        .register("nicola", "nicola@example.com", "pass_word!")
        .await;

    assert_eq!(response.status(), StatusCode::CREATED);

    let body: serde_json::Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["status_code"], 201);
    assert_eq!(body["data"]["username"], "nicola");
    assert_eq!(body["data"]["email"], "nicola@example.com");
    assert!(body["data"]["id"].is_string());
    assert!(body["data"]["created_at"].is_string());
    assert!(body["data"].get("password_hash").is_none());
}

#[tokio::test]
async fn test_register_duplicate_username() {
    let app = TestApp::spawn().await;

    app.register("nicola", "nicola@example.com", "pass_word!")
        .await;

    let response = app
        .register("nicola", "other@example.com", "pass_word!")
        .await;

    assert_eq!(response.status(), StatusCode::CONFLICT);
    assert_eq!(message(response).await, "Username already taken");
}

#[tokio::test]
async fn test_register_duplicate_email() {
    let app = TestApp::spawn().await;

    app.register("nicola", "nicola@example.com", "pass_word!")
        .await;

    let response = app
        .register("nicola2", "nicola@example.com", "pass_word!2")
        .await;

    assert_eq!(response.status(), StatusCode::CONFLICT);
    assert_eq!(message(response).await, "Email already registered");
}

#[tokio::test]
async fn test_concurrent_registration_single_winner() {
    let app = TestApp::spawn().await;

    let handles: Vec<_> = (0..8)
        .map(|i| {
            let client = app.api_client.clone();
            let url = format!("{}/api/auth/register", app.address);
            tokio::spawn(async move {
                client
                    .post(url)
                    .json(&json!({
                        "username": "racer",
                        "email": format!("racer{}@example.com", i),
                        "password": "pass_word!",
                        "telegram": "@racer",
                    }))
                    .send()
                    .await
                    .expect("Failed to execute request")
                    .status()
            })
        })
        .collect();

    let mut statuses = Vec::new();
    for handle in handles {
        statuses.push(handle.await.expect("Registration task panicked"));
    }

    assert_eq!(
        statuses.iter().filter(|s| **s == StatusCode::CREATED).count(),
        1
    );
    assert!(statuses
        .iter()
        .all(|s| *s == StatusCode::CREATED || *s == StatusCode::CONFLICT));
}

#[tokio::test]
async fn test_register_invalid_fields() {
    let app = TestApp::spawn().await;

    let cases = [
        json!({"username": "n", "email": "n@example.com", "password": "pw", "telegram": "@n"}),
        json!({"username": "nicola", "email": "not-an-email", "password": "pw", "telegram": "@n"}),
        json!({"username": "nicola", "email": "n@example.com", "password": "pw", "telegram": ""}),
        json!({"username": "nicola", "email": "n@example.com", "password": "p".repeat(73), "telegram": "@n"}),
    ];

    for case in cases {
        let response = app
            .post("/api/auth/register")
            .json(&case)
            .send()
            .await
            .expect("Failed to execute request");

        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY, "{}", case);
    }
}

#[tokio::test]
async fn test_register_accepts_72_byte_password() {
    let app = TestApp::spawn().await;
    let password = "p".repeat(72);

    let response = app.register("nicola", "nicola@example.com", &password).await;
    assert_eq!(response.status(), StatusCode::CREATED);

    app.access_token("nicola", &password).await;
}

#[tokio::test]
async fn test_login_by_username_and_email() {
    let app = TestApp::spawn().await;
    app.register("nicola", "nicola@example.com", "pass_word!")
        .await;

    for identifier in ["nicola", "nicola@example.com"] {
        let response = app.login(identifier, "pass_word!").await;
        assert_eq!(response.status(), StatusCode::OK);

        let body: serde_json::Value = response.json().await.expect("Failed to parse response");
        let fields = body.as_object().expect("Token response must be an object");
        assert_eq!(fields.len(), 2, "unexpected token response {}", body);
        assert_eq!(body["token_type"], "bearer");

        let token = body["access_token"].as_str().unwrap();
        let identity = app
            .jwt_handler
            .verify(token, Utc::now())
            .expect("Issued token should verify");
        assert_eq!(identity.subject(), "nicola");
    }
}

#[tokio::test]
async fn test_login_failures_are_indistinguishable() {
    let app = TestApp::spawn().await;
    app.register("nicola", "nicola@example.com", "pass_word!")
        .await;

    for (identifier, password) in [
        ("nicola", "wrong"),
        ("nicola@example.com", "wrong"),
        ("nobody", "pass_word!"),
        ("nobody@example.com", "pass_word!"),
        ("x!", "pass_word!"),
    ] {
        let response = app.login(identifier, password).await;

        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
        assert_eq!(
            response.headers().get(header::WWW_AUTHENTICATE).unwrap(),
            "Bearer"
        );
        assert_eq!(message(response).await, INVALID_LOGIN);
    }
}

#[tokio::test]
async fn test_current_user_with_valid_token() {
    let app = TestApp::spawn().await;
    app.register("nicola", "nicola@example.com", "pass_word!")
        .await;
    let token = app.access_token("nicola@example.com", "pass_word!").await;

    let response = app
        .get_authenticated("/api/users/me", &token)
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), StatusCode::OK);

    let body: serde_json::Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["data"]["username"], "nicola");
    assert_eq!(body["data"]["email"], "nicola@example.com");
}

#[tokio::test]
async fn test_current_user_without_token() {
    let app = TestApp::spawn().await;

    let response = app
        .get("/api/users/me")
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(
        response.headers().get(header::WWW_AUTHENTICATE).unwrap(),
        "Bearer"
    );
    assert_eq!(message(response).await, "Not authenticated");
}

#[tokio::test]
async fn test_current_user_rejects_bad_tokens() {
    let app = TestApp::spawn().await;
    app.register("nicola", "nicola@example.com", "pass_word!")
        .await;
    let valid = app.access_token("nicola", "pass_word!").await;

    let expired = app
        .jwt_handler
        .issue("nicola", Utc::now() - Duration::minutes(31))
        .unwrap();
    let foreign = JwtHandler::new(b"another-secret-key-nobody-configured!!")
        .issue("nicola", Utc::now())
        .unwrap();
    let unknown_subject = app.jwt_handler.issue("ghost", Utc::now()).unwrap();

    // Swap the first signature character
    let signature_start = valid.rfind('.').unwrap() + 1;
    let original = &valid[signature_start..signature_start + 1];
    let replacement = if original == "A" { "B" } else { "A" };
    let tampered = format!(
        "{}{}{}",
        &valid[..signature_start],
        replacement,
        &valid[signature_start + 1..]
    );

    for token in [
        expired,
        foreign,
        unknown_subject,
        tampered,
        "not.a.token".to_string(),
    ] {
        let response = app
            .get_authenticated("/api/users/me", &token)
            .send()
            .await
            .expect("Failed to execute request");

        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
        assert_eq!(message(response).await, INVALID_TOKEN);
    }
}

#[tokio::test]
async fn test_health() {
    let app = TestApp::spawn().await;

    let response = app
        .get("/api/health")
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), StatusCode::OK);

    let body: serde_json::Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["data"]["status"], "healthy");
    assert_eq!(body["data"]["debug"], true);
}

#[tokio::test]
async fn test_cors_allows_configured_origin() {
    let app = TestApp::spawn().await;

    let response = app
        .get("/api/health")
        .header(header::ORIGIN, "http://localhost:3000")
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(
        response
            .headers()
            .get(header::ACCESS_CONTROL_ALLOW_ORIGIN)
            .unwrap(),
        "http://localhost:3000"
    );

    let response = app
        .get("/api/health")
        .header(header::ORIGIN, "http://evil.example")
        .send()
        .await
        .expect("Failed to execute request");

    assert!(response
        .headers()
        .get(header::ACCESS_CONTROL_ALLOW_ORIGIN)
        .is_none());
}

#[tokio::test]
async fn test_cors_without_origins_denies_cross_origin() {
    let app = TestApp::spawn_with_origins(&[]).await;

    let response = app
        .get("/api/health")
        .header(header::ORIGIN, "http://localhost:3000")
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), StatusCode::OK);
    assert!(response
        .headers()
        .get(header::ACCESS_CONTROL_ALLOW_ORIGIN)
        .is_none());

    let preflight = app
        .api_client
        .request(
            reqwest::Method::OPTIONS,
            format!("{}/api/auth/login", app.address),
        )
        .header(header::ORIGIN, "http://evil.example")
        .header(header::ACCESS_CONTROL_REQUEST_METHOD, "POST")
        .send()
        .await
        .expect("Failed to execute request");

    assert!(preflight
        .headers()
        .get(header::ACCESS_CONTROL_ALLOW_ORIGIN)
        .is_none());
    assert!(preflight
        .headers()
        .get(header::ACCESS_CONTROL_ALLOW_CREDENTIALS)
        .is_none());
}

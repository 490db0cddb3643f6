mod common;

use chrono::Duration;
use chrono::Utc;
use common::TestApp;
use common::ADMIN_EMAIL;
use common::JWT_SECRET;
use jsonwebtoken::EncodingKey;
use jsonwebtoken::Header;
use reqwest::StatusCode;
use serde_json::json;

#[tokio::test]
async fn test_register_success() {
    let app = TestApp::spawn().await;

    let response = app.register("Juan", "juan@mail.com", "123456").await;

    assert_eq!(response.status(), StatusCode::CREATED);
    assert!(response.text().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_register_accepts_spanish_name_field() {
    let app = TestApp::spawn().await;

    let response = app
        .post("/auth/register")
        .json(&json!({
            "nombre": "Juan",
            "email": "juan@mail.com",
            "password": "123456"
        }))
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), StatusCode::CREATED);
}

#[tokio::test]
async fn test_register_duplicate_email() {
    let app = TestApp::spawn().await;

    app.register("Juan", "juan@mail.com", "123456").await;
    let response = app.register("Otro Juan", "JUAN@mail.com", "654321").await;

    assert_eq!(response.status(), StatusCode::CONFLICT);

    let body: serde_json::Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["status_code"], 409);
    assert!(body["data"]["message"]
        .as_str()
        .unwrap()
        .contains("already exists"));
}

#[tokio::test]
async fn test_register_invalid_fields() {
    let app = TestApp::spawn().await;

    let cases = [
        ("", "juan@mail.com", "123456"),
        ("Juan", "not-an-email", "123456"),
        ("Juan", "", "123456"),
        ("Juan", "juan@mail.com", ""),
    ];

    for (name, email, password) in cases {
        let response = app.register(name, email, password).await;
        assert_eq!(
            response.status(),
            StatusCode::BAD_REQUEST,
            "name={:?} email={:?} password={:?}",
            name,
            email,
            password
        );
    }
}

#[tokio::test]
async fn test_register_malformed_json() {
    let app = TestApp::spawn().await;

    let response = app
        .post("/auth/register")
        .header("Content-Type", "application/json")
        .body("{not json")
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_login_success() {
    let app = TestApp::spawn().await;
    app.register("Juan", "juan@mail.com", "123456").await;

    let response = app.login("juan@mail.com", "123456").await;

    assert_eq!(response.status(), StatusCode::OK);

    let body: serde_json::Value = response.json().await.expect("Failed to parse response");
    assert_eq!(body["name"], "Juan");
    assert_eq!(body["email"], "juan@mail.com");
    assert_eq!(body["roles"], "USER");
    assert_eq!(body["token"].as_str().unwrap().split('.').count(), 3);
}

#[tokio::test]
async fn test_login_is_case_insensitive_on_email() {
    let app = TestApp::spawn().await;
    app.register("Juan", "juan@mail.com", "123456").await;

    let response = app.login("Juan@Mail.com", "123456").await;

    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn test_login_admin_roles() {
    let app = TestApp::spawn().await;
    app.register("Admin", ADMIN_EMAIL, "123456").await;

    let body: serde_json::Value = app
        .login(ADMIN_EMAIL, "123456")
        .await
        .json()
        .await
        .expect("Failed to parse response");

    assert_eq!(body["roles"], "USER,ADMIN");
}

#[tokio::test]
async fn test_login_failures_are_indistinguishable() {
    let app = TestApp::spawn().await;
    app.register("Juan", "juan@mail.com", "123456").await;

    let wrong_password = app.login("juan@mail.com", "wrong").await;
    let unknown_user = app.login("nadie@mail.com", "123456").await;
    let malformed_email = app.login("not-an-email", "123456").await;

    assert_eq!(wrong_password.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(unknown_user.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(malformed_email.status(), StatusCode::UNAUTHORIZED);

    let wrong_password = wrong_password.text().await.unwrap();
    assert_eq!(wrong_password, unknown_user.text().await.unwrap());
    assert_eq!(wrong_password, malformed_email.text().await.unwrap());
}

#[tokio::test]
async fn test_protected_route_without_token() {
    let app = TestApp::spawn().await;

    let response = app
        .get("/api/customers")
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_protected_route_with_tampered_token() {
    let app = TestApp::spawn().await;
    let token = app.token_for("juan@mail.com").await;

    // Flip the first character of the signature
    let signature_start = token.rfind('.').unwrap() + 1;
    let mut tampered = token.into_bytes();
    tampered[signature_start] = if tampered[signature_start] == b'A' {
        b'B'
    } else {
        b'A'
    };
    let tampered = String::from_utf8(tampered).unwrap();

    let response = app
        .get_authenticated("/api/customers", &tampered)
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_protected_route_with_expired_token() {
    let app = TestApp::spawn().await;

    let issued = Utc::now() - Duration::hours(25);
    let claims = json!({
        "sub": uuid::Uuid::new_v4().to_string(),
        "email": "juan@mail.com",
        "roles": ["USER"],
        "iat": issued.timestamp(),
        "exp": (issued + Duration::hours(24)).timestamp(),
    });
    let token = jsonwebtoken::encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(JWT_SECRET),
    )
    .unwrap();

    let response = app
        .get_authenticated("/api/customers", &token)
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_protected_route_with_token_signed_elsewhere() {
    let app = TestApp::spawn().await;

    let now = Utc::now();
    let claims = json!({
        "sub": uuid::Uuid::new_v4().to_string(),
        "email": ADMIN_EMAIL,
        "roles": ["USER", "ADMIN"],
        "iat": now.timestamp(),
        "exp": (now + Duration::hours(24)).timestamp(),
    });
    let token = jsonwebtoken::encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(b"some-other-secret-of-at-least-32-bytes!!"),
    )
    .unwrap();

    let response = app
        .get_authenticated("/api/customers", &token)
        .send()
        .await
        .expect("Failed to execute request");

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

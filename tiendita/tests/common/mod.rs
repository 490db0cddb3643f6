#![allow(dead_code)]

use std::sync::Arc;

use auth::Authenticator;
use auth::PasswordHasher;
use chrono::Duration;
use serde_json::json;
use tiendita::domain::customer::service::CustomerService;
use tiendita::domain::user::models::EmailAddress;
use tiendita::domain::user::service::AuthService;
use tiendita::inbound::http::router::create_router;
use tiendita::outbound::repositories::InMemoryCustomerRepository;
use tiendita::outbound::repositories::InMemoryUserRepository;

pub const JWT_SECRET: &[u8] = b"test-secret-key-for-jwt-signing-at-least-32-bytes";
pub const ADMIN_EMAIL: &str = "admin@mail.com";

/// Test application that spawns a real server on in-memory stores
pub struct TestApp {
    pub address: String,
    pub api_client: reqwest::Client,
}

impl TestApp {
    /// Spawn the application in a background task and return TestApp
    pub async fn spawn() -> Self {
        // Use random port (0 = OS assigns)
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind random port");
        let port = listener.local_addr().unwrap().port();
        let address = format!("http://127.0.0.1:{}", port);

        // Minimal Argon2 work factor keeps the suite fast
        let authenticator = Arc::new(Authenticator::new(
            JWT_SECRET,
            Duration::hours(24),
            PasswordHasher::with_params(8, 1, 1).expect("Invalid Argon2 parameters"),
        ));

        let auth_service = Arc::new(
            AuthService::new(
                Arc::new(InMemoryUserRepository::new()),
                Arc::clone(&authenticator),
            )
            .with_admin_emails(vec![EmailAddress::new(ADMIN_EMAIL.to_string()).unwrap()]),
        );
        let customer_service = Arc::new(CustomerService::new(Arc::new(
            InMemoryCustomerRepository::new(),
        )));

        let router = create_router(auth_service, customer_service, authenticator);

        // Spawn server in background
        tokio::spawn(async move {
            axum::serve(listener, router).await.expect("Server error");
        });

        Self {
            address,
            api_client: reqwest::Client::new(),
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.address, path)
    }

    /// Helper to make GET request
    pub fn get(&self, path: &str) -> reqwest::RequestBuilder {
        self.api_client.get(self.url(path))
    }

    /// Helper to make POST request
    pub fn post(&self, path: &str) -> reqwest::RequestBuilder {
        self.api_client.post(self.url(path))
    }

    /// Helper to make GET request with Bearer token
    pub fn get_authenticated(&self, path: &str, token: &str) -> reqwest::RequestBuilder {
        self.get(path).bearer_auth(token)
    }

    /// Helper to make POST request with Bearer token
    pub fn post_authenticated(&self, path: &str, token: &str) -> reqwest::RequestBuilder {
        self.post(path).bearer_auth(token)
    }

    /// Helper to make PUT request with Bearer token
    pub fn put_authenticated(&self, path: &str, token: &str) -> reqwest::RequestBuilder {
        self.api_client.put(self.url(path)).bearer_auth(token)
    }

    /// Helper to make DELETE request with Bearer token
    pub fn delete_authenticated(&self, path: &str, token: &str) -> reqwest::RequestBuilder {
        self.api_client.delete(self.url(path)).bearer_auth(token)
    }

    /// Register an account and return the raw response
    pub async fn register(&self, name: &str, email: &str, password: &str) -> reqwest::Response {
        self.post("/auth/register")
            .json(&json!({
                "name": name,
                "email": email,
                "password": password
            }))
            .send()
            .await
            .expect("Failed to execute request")
    }

    /// Log in and return the raw response
    pub async fn login(&self, email: &str, password: &str) -> reqwest::Response {
        self.post("/auth/login")
            .json(&json!({
                "email": email,
                "password": password
            }))
            .send()
            .await
            .expect("Failed to execute request")
    }

    /// Register an account, log in, and return the bearer token
    pub async fn token_for(&self, email: &str) -> String {
        self.register("Juan", email, "123456").await;

        let body: serde_json::Value = self
            .login(email, "123456")
            .await
            .json()
            .await
            .expect("Failed to parse response");

        body["token"]
            .as_str()
            .expect("Login response has no token")
            .to_string()
    }
}

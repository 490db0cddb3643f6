use std::sync::Arc;
use std::time::Duration;

use auth::Authenticator;
use axum::body::Body;
use axum::http::Request;
use axum::http::Response;
use axum::middleware;
use axum::routing::get;
use axum::routing::post;
use axum::Router;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::Span;

use super::handlers::customers::create_customer::create_customer;
use super::handlers::customers::delete_customer::delete_customer;
use super::handlers::customers::get_customer::get_customer;
use super::handlers::customers::list_customers::list_customers;
use super::handlers::customers::update_customer::update_customer;
use super::handlers::login::login;
use super::handlers::register::register;
use super::middleware::authenticate as auth_middleware;
use crate::domain::customer::ports::CustomerServicePort;
use crate::domain::user::ports::AuthServicePort;

const CUSTOMER_COLLECTIONS: [&str; 2] = ["/api/customers", "/api/clientes"];

#[derive(Clone)]
pub struct AppState {
    pub auth_service: Arc<dyn AuthServicePort>,
    pub customer_service: Arc<dyn CustomerServicePort>,
    pub authenticator: Arc<Authenticator>,
}

pub fn create_router(
    auth_service: Arc<dyn AuthServicePort>,
    customer_service: Arc<dyn CustomerServicePort>,
    authenticator: Arc<Authenticator>,
) -> Router {
    let state = AppState {
        auth_service,
        customer_service,
        authenticator,
    };

    let public_routes = Router::new()
        .route("/auth/register", post(register))
        .route("/auth/login", post(login));

    // Same resource under both names; each collection answers with and
    // without a trailing slash.
    let mut protected_routes = Router::new();
    for collection in CUSTOMER_COLLECTIONS {
        protected_routes = protected_routes
            .route(collection, get(list_customers).post(create_customer))
            .route(
                &format!("{}/", collection),
                get(list_customers).post(create_customer),
            )
            .route(
                &format!("{}/:customer_id", collection),
                get(get_customer)
                    .put(update_customer)
                    .delete(delete_customer),
            );
    }
    let protected_routes = protected_routes.route_layer(middleware::from_fn_with_state(
        state.authenticator.clone(),
        auth_middleware,
    ));

    // Headers stay out of the span: they carry bearer tokens.
    let trace_layer = TraceLayer::new_for_http()
        .make_span_with(|request: &Request<Body>| {
            tracing::info_span!(
                "http_request",
                method = %request.method(),
                uri = %request.uri(),
                version = ?request.version(),
            )
        })
        .on_request(|request: &Request<Body>, _span: &Span| {
            tracing::info!(
                method = %request.method(),
                uri = %request.uri(),
                "Request started"
            );
        })
        .on_response(
            |response: &Response<Body>, latency: Duration, _span: &Span| {
                tracing::info!(
                    status = response.status().as_u16(),
                    latency_ms = latency.as_millis(),
                    "Request completed"
                );
            },
        );

    Router::new()
        .merge(public_routes)
        .merge(protected_routes)
        .layer(trace_layer)
        .layer(CorsLayer::permissive())
        .with_state(state)
}

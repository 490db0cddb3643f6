use axum::extract::Path;
use axum::extract::State;
use axum::http::StatusCode;
use axum::Extension;

use super::parse_customer_id;
use crate::domain::user::models::Role;
use crate::inbound::http::handlers::ApiError;
use crate::inbound::http::middleware::AuthenticatedUser;
use crate::inbound::http::router::AppState;

/// Only administrators may delete customers.
pub async fn delete_customer(
    State(state): State<AppState>,
    Extension(caller): Extension<AuthenticatedUser>,
    Path(customer_id): Path<String>,
) -> Result<StatusCode, ApiError> {
    if !caller.has_role(Role::Admin) {
        tracing::warn!(user_id = %caller.user_id, "Customer delete refused: ADMIN role required");
        return Err(ApiError::Forbidden("ADMIN role required".to_string()));
    }

    let customer_id = parse_customer_id(&customer_id)?;

    state
        .customer_service
        .delete_customer(&customer_id)
        .await
        .map_err(ApiError::from)
        .map(|_| StatusCode::NO_CONTENT)
}

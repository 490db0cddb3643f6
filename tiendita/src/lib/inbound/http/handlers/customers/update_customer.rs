use axum::extract::rejection::JsonRejection;
use axum::extract::Path;
use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;

use super::parse_customer_id;
use super::CustomerRequest;
use super::CustomerResponseData;
use crate::inbound::http::handlers::ApiError;
use crate::inbound::http::handlers::ApiSuccess;
use crate::inbound::http::router::AppState;

/// Full replacement of name, email and address. Any id in the body is ignored.
pub async fn update_customer(
    State(state): State<AppState>,
    Path(customer_id): Path<String>,
    payload: Result<Json<CustomerRequest>, JsonRejection>,
) -> Result<ApiSuccess<CustomerResponseData>, ApiError> {
    let customer_id = parse_customer_id(&customer_id)?;
    let Json(body) = payload?;

    state
        .customer_service
        .update_customer(&customer_id, body.try_into_command()?)
        .await
        .map_err(ApiError::from)
        .map(|ref customer| ApiSuccess::new(StatusCode::OK, customer.into()))
}

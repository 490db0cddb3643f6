use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;

use super::CustomerRequest;
use super::CustomerResponseData;
use crate::inbound::http::handlers::ApiError;
use crate::inbound::http::handlers::ApiSuccess;
use crate::inbound::http::router::AppState;

/// Creation answers 200 with the stored record, id included.
pub async fn create_customer(
    State(state): State<AppState>,
    payload: Result<Json<CustomerRequest>, JsonRejection>,
) -> Result<ApiSuccess<CustomerResponseData>, ApiError> {
    let Json(body) = payload?;

    state
        .customer_service
        .create_customer(body.try_into_command()?)
        .await
        .map_err(ApiError::from)
        .map(|ref customer| ApiSuccess::new(StatusCode::OK, customer.into()))
}

use axum::extract::Path;
use axum::extract::State;
use axum::http::StatusCode;

use super::parse_customer_id;
use super::CustomerResponseData;
use crate::inbound::http::handlers::ApiError;
use crate::inbound::http::handlers::ApiSuccess;
use crate::inbound::http::router::AppState;

pub async fn get_customer(
    State(state): State<AppState>,
    Path(customer_id): Path<String>,
) -> Result<ApiSuccess<CustomerResponseData>, ApiError> {
    let customer_id = parse_customer_id(&customer_id)?;

    state
        .customer_service
        .get_customer(&customer_id)
        .await
        .map_err(ApiError::from)
        .map(|ref customer| ApiSuccess::new(StatusCode::OK, customer.into()))
}

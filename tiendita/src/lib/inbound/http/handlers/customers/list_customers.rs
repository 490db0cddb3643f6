use axum::extract::State;
use axum::http::StatusCode;

use super::CustomerResponseData;
use crate::inbound::http::handlers::ApiError;
use crate::inbound::http::handlers::ApiSuccess;
use crate::inbound::http::router::AppState;

pub async fn list_customers(
    State(state): State<AppState>,
) -> Result<ApiSuccess<Vec<CustomerResponseData>>, ApiError> {
    state
        .customer_service
        .list_customers()
        .await
        .map_err(ApiError::from)
        .map(|customers| {
            ApiSuccess::new(
                StatusCode::OK,
                customers.iter().map(CustomerResponseData::from).collect(),
            )
        })
}

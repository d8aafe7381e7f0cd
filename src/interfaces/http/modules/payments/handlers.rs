//! Payment REST API handlers

use axum::{
    extract::{Path, Query, State},
    Extension, Json,
};

use super::dto::PaymentResponse;
use crate::domain::DomainError;
use crate::interfaces::http::common::{
    domain_error, ApiResponse, ErrorResponse, PageQuery, PaginatedResponse,
};
use crate::interfaces::http::middleware::{require_admin, AuthenticatedUser};
use crate::interfaces::http::modules::AppState;

#[utoipa::path(
    get,
    path = "/api/v1/payments",
    tag = "Payments",
    security(("bearer_auth" = [])),
    params(PageQuery),
    responses(
        (status = 200, description = "Paginated payment list", body = ApiResponse<PaginatedResponse<PaymentResponse>>),
        (status = 403, description = "Admin role required")
    )
)]
pub async fn list_payments(
    State(state): State<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
    Query(query): Query<PageQuery>,
) -> Result<Json<ApiResponse<PaginatedResponse<PaymentResponse>>>, ErrorResponse> {
    require_admin(&user).map_err(domain_error)?;

    let rate_plan = state.rental_service.rate_plan().clone();
    let page = state
        .repos
        .payments()
        .find_page(query.params())
        .await
        .map_err(domain_error)?;

    Ok(Json(ApiResponse::success(PaginatedResponse::from_result(
        page,
        |p| PaymentResponse::build(p, &rate_plan),
    ))))
}

#[utoipa::path(
    get,
    path = "/api/v1/payments/mine",
    tag = "Payments",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "The caller's payments", body = ApiResponse<Vec<PaymentResponse>>)
    )
)]
pub async fn list_my_payments(
    State(state): State<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
) -> Result<Json<ApiResponse<Vec<PaymentResponse>>>, ErrorResponse> {
    let payments = state
        .repos
        .payments()
        .find_by_renter(&user.user_id)
        .await
        .map_err(domain_error)?;

    let rate_plan = state.rental_service.rate_plan();
    let responses: Vec<PaymentResponse> = payments
        .into_iter()
        .map(|p| PaymentResponse::build(p, rate_plan))
        .collect();
    Ok(Json(ApiResponse::success(responses)))
}

#[utoipa::path(
    get,
    path = "/api/v1/payments/{id}",
    tag = "Payments",
    security(("bearer_auth" = [])),
    params(("id" = String, Path, description = "Payment ID")),
    responses(
        (status = 200, description = "Payment details", body = ApiResponse<PaymentResponse>),
        (status = 403, description = "Admin role required"),
        (status = 404, description = "Not found")
    )
)]
pub async fn get_payment(
    State(state): State<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
    Path(id): Path<String>,
) -> Result<Json<ApiResponse<PaymentResponse>>, ErrorResponse> {
    require_admin(&user).map_err(domain_error)?;

    let payment = state
        .repos
        .payments()
        .find_by_id(&id)
        .await
        .map_err(domain_error)?
        .ok_or_else(|| domain_error(DomainError::not_found("Payment", &id)))?;

    Ok(Json(ApiResponse::success(PaymentResponse::build(
        payment,
        state.rental_service.rate_plan(),
    ))))
}

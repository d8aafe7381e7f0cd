//! Pricing REST API handlers

use axum::{extract::State, Json};

use super::dto::{FeePreviewRequest, FeePreviewResponse, RatePlanResponse};
use crate::domain::Accrual;
use crate::interfaces::http::common::{ApiResponse, ErrorResponse, ValidatedJson};
use crate::interfaces::http::modules::AppState;

#[utoipa::path(
    get,
    path = "/api/v1/pricing",
    tag = "Pricing",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "The active rate plan", body = ApiResponse<RatePlanResponse>)
    )
)]
pub async fn get_rate_plan(
    State(state): State<AppState>,
) -> Json<ApiResponse<RatePlanResponse>> {
    Json(ApiResponse::success(state.rental_service.rate_plan().into()))
}

#[utoipa::path(
    post,
    path = "/api/v1/pricing/preview",
    tag = "Pricing",
    security(("bearer_auth" = [])),
    request_body = FeePreviewRequest,
    responses(
        (status = 200, description = "Fee for a hypothetical rental length", body = ApiResponse<FeePreviewResponse>),
        (status = 422, description = "Validation failed")
    )
)]
pub async fn preview_fee(
    State(state): State<AppState>,
    ValidatedJson(req): ValidatedJson<FeePreviewRequest>,
) -> Result<Json<ApiResponse<FeePreviewResponse>>, ErrorResponse> {
    let rate_plan = state.rental_service.rate_plan();
    let fee = rate_plan.fee_for_minutes(req.duration_minutes);
    let accrual = Accrual {
        elapsed_seconds: req.duration_minutes * 60,
        elapsed_minutes: req.duration_minutes,
        fee,
    };

    Ok(Json(ApiResponse::success(FeePreviewResponse {
        duration_minutes: req.duration_minutes,
        duration: accrual.format_duration(),
        fee,
        formatted_fee: rate_plan.format_amount(fee),
    })))
}

//! Ebike REST API handlers

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Extension, Json,
};
use uuid::Uuid;

use super::dto::{CreateEbikeRequest, EbikeListQuery, EbikeResponse};
use crate::domain::{DomainError, Ebike, EbikeStatus};
use crate::interfaces::http::common::{
    domain_error, ApiResponse, ErrorResponse, PaginatedResponse, ValidatedJson,
};
use crate::interfaces::http::middleware::{require_admin, AuthenticatedUser};
use crate::interfaces::http::modules::AppState;
use crate::shared::types::pagination::PaginationParams;

#[utoipa::path(
    get,
    path = "/api/v1/ebikes",
    tag = "Ebikes",
    security(("bearer_auth" = [])),
    params(EbikeListQuery),
    responses(
        (status = 200, description = "Paginated bike list", body = ApiResponse<PaginatedResponse<EbikeResponse>>),
        (status = 400, description = "Unknown status filter"),
        (status = 403, description = "Admin role required")
    )
)]
pub async fn list_ebikes(
    State(state): State<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
    Query(query): Query<EbikeListQuery>,
) -> Result<Json<ApiResponse<PaginatedResponse<EbikeResponse>>>, ErrorResponse> {
    require_admin(&user).map_err(domain_error)?;

    let params = PaginationParams::new(query.page, query.limit);
    let status = match query.status.as_deref() {
        Some(s) => Some(EbikeStatus::from_str(s).ok_or_else(|| {
            domain_error(DomainError::Validation(format!(
                "Unknown ebike status: {}",
                s
            )))
        })?),
        None => None,
    };
    let page = state
        .repos
        .ebikes()
        .find_page(params, query.station_id.as_deref(), status)
        .await
        .map_err(domain_error)?;

    Ok(Json(ApiResponse::success(PaginatedResponse::from_result(
        page,
        EbikeResponse::from,
    ))))
}

#[utoipa::path(
    get,
    path = "/api/v1/ebikes/available",
    tag = "Ebikes",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Bikes a renter can pick from", body = ApiResponse<Vec<EbikeResponse>>)
    )
)]
pub async fn list_available_ebikes(
    State(state): State<AppState>,
) -> Result<Json<ApiResponse<Vec<EbikeResponse>>>, ErrorResponse> {
    let bikes = state
        .repos
        .ebikes()
        .find_available()
        .await
        .map_err(domain_error)?;
    let responses: Vec<EbikeResponse> = bikes.into_iter().map(Into::into).collect();
    Ok(Json(ApiResponse::success(responses)))
}

#[utoipa::path(
    get,
    path = "/api/v1/ebikes/{id}",
    tag = "Ebikes",
    security(("bearer_auth" = [])),
    params(("id" = String, Path, description = "Ebike ID")),
    responses(
        (status = 200, description = "Bike details", body = ApiResponse<EbikeResponse>),
        (status = 404, description = "Not found")
    )
)]
pub async fn get_ebike(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<ApiResponse<EbikeResponse>>, ErrorResponse> {
    let bike = state
        .repos
        .ebikes()
        .find_by_id(&id)
        .await
        .map_err(domain_error)?
        .ok_or_else(|| domain_error(DomainError::not_found("Ebike", &id)))?;
    Ok(Json(ApiResponse::success(bike.into())))
}

#[utoipa::path(
    post,
    path = "/api/v1/ebikes",
    tag = "Ebikes",
    security(("bearer_auth" = [])),
    request_body = CreateEbikeRequest,
    responses(
        (status = 201, description = "Created", body = ApiResponse<EbikeResponse>),
        (status = 403, description = "Admin role required"),
        (status = 422, description = "Validation failed")
    )
)]
pub async fn create_ebike(
    State(state): State<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
    ValidatedJson(req): ValidatedJson<CreateEbikeRequest>,
) -> Result<(StatusCode, Json<ApiResponse<EbikeResponse>>), ErrorResponse> {
    require_admin(&user).map_err(domain_error)?;

    if state
        .repos
        .stations()
        .find_by_id(&req.station_id)
        .await
        .map_err(domain_error)?
        .is_none()
    {
        return Err(domain_error(DomainError::not_found(
            "Station",
            &req.station_id,
        )));
    }

    let bike = Ebike::new(Uuid::new_v4().to_string(), req.station_id, req.battery_level);
    let saved = state
        .repos
        .ebikes()
        .save(bike)
        .await
        .map_err(domain_error)?;
    Ok((StatusCode::CREATED, Json(ApiResponse::success(saved.into()))))
}

#[utoipa::path(
    delete,
    path = "/api/v1/ebikes/{id}",
    tag = "Ebikes",
    security(("bearer_auth" = [])),
    params(("id" = String, Path, description = "Ebike ID")),
    responses(
        (status = 200, description = "Deleted", body = ApiResponse<String>),
        (status = 404, description = "Not found"),
        (status = 409, description = "Bike is checked out")
    )
)]
pub async fn delete_ebike(
    State(state): State<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
    Path(id): Path<String>,
) -> Result<Json<ApiResponse<String>>, ErrorResponse> {
    require_admin(&user).map_err(domain_error)?;

    let bike = state
        .repos
        .ebikes()
        .find_by_id(&id)
        .await
        .map_err(domain_error)?
        .ok_or_else(|| domain_error(DomainError::not_found("Ebike", &id)))?;

    if bike.status == EbikeStatus::InUse {
        return Err(domain_error(DomainError::Conflict(format!(
            "Bike {} is checked out on a rental",
            bike.display_id()
        ))));
    }

    state
        .repos
        .ebikes()
        .delete(&id)
        .await
        .map_err(domain_error)?;
    Ok(Json(ApiResponse::success("Ebike deleted".to_string())))
}

#[utoipa::path(
    post,
    path = "/api/v1/ebikes/{id}/lock",
    tag = "Ebikes",
    security(("bearer_auth" = [])),
    params(("id" = String, Path, description = "Ebike ID")),
    responses(
        (status = 200, description = "Locked", body = ApiResponse<EbikeResponse>),
        (status = 400, description = "Bike cannot be locked in its current status"),
        (status = 404, description = "Not found")
    )
)]
pub async fn lock_ebike(
    State(state): State<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
    Path(id): Path<String>,
) -> Result<Json<ApiResponse<EbikeResponse>>, ErrorResponse> {
    require_admin(&user).map_err(domain_error)?;

    let mut bike = state
        .repos
        .ebikes()
        .find_by_id(&id)
        .await
        .map_err(domain_error)?
        .ok_or_else(|| domain_error(DomainError::not_found("Ebike", &id)))?;

    bike.lock().map_err(domain_error)?;
    state
        .repos
        .ebikes()
        .update(bike.clone())
        .await
        .map_err(domain_error)?;
    Ok(Json(ApiResponse::success(bike.into())))
}

#[utoipa::path(
    post,
    path = "/api/v1/ebikes/{id}/unlock",
    tag = "Ebikes",
    security(("bearer_auth" = [])),
    params(("id" = String, Path, description = "Ebike ID")),
    responses(
        (status = 200, description = "Unlocked", body = ApiResponse<EbikeResponse>),
        (status = 400, description = "Bike is not locked"),
        (status = 404, description = "Not found")
    )
)]
pub async fn unlock_ebike(
    State(state): State<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
    Path(id): Path<String>,
) -> Result<Json<ApiResponse<EbikeResponse>>, ErrorResponse> {
    require_admin(&user).map_err(domain_error)?;

    let mut bike = state
        .repos
        .ebikes()
        .find_by_id(&id)
        .await
        .map_err(domain_error)?
        .ok_or_else(|| domain_error(DomainError::not_found("Ebike", &id)))?;

    bike.unlock().map_err(domain_error)?;
    state
        .repos
        .ebikes()
        .update(bike.clone())
        .await
        .map_err(domain_error)?;
    Ok(Json(ApiResponse::success(bike.into())))
}

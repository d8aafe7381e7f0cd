//! Renter REST API handlers
//!
//! All renter administration is operator-only; the account status moves
//! only through these endpoints, never automatically.

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Extension, Json,
};
use uuid::Uuid;

use super::dto::{CreateRenterRequest, RenterResponse};
use crate::domain::{DomainError, Renter};
use crate::interfaces::http::common::{
    domain_error, ApiResponse, ErrorResponse, PageQuery, PaginatedResponse, ValidatedJson,
};
use crate::interfaces::http::middleware::{require_admin, AuthenticatedUser};
use crate::interfaces::http::modules::AppState;

#[utoipa::path(
    get,
    path = "/api/v1/renters",
    tag = "Renters",
    security(("bearer_auth" = [])),
    params(PageQuery),
    responses(
        (status = 200, description = "Paginated renter list", body = ApiResponse<PaginatedResponse<RenterResponse>>),
        (status = 403, description = "Admin role required")
    )
)]
pub async fn list_renters(
    State(state): State<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
    Query(query): Query<PageQuery>,
) -> Result<Json<ApiResponse<PaginatedResponse<RenterResponse>>>, ErrorResponse> {
    require_admin(&user).map_err(domain_error)?;

    let page = state
        .repos
        .renters()
        .find_page(query.params())
        .await
        .map_err(domain_error)?;
    Ok(Json(ApiResponse::success(PaginatedResponse::from_result(
        page,
        RenterResponse::from,
    ))))
}

#[utoipa::path(
    get,
    path = "/api/v1/renters/{id}",
    tag = "Renters",
    security(("bearer_auth" = [])),
    params(("id" = String, Path, description = "Renter ID")),
    responses(
        (status = 200, description = "Renter details", body = ApiResponse<RenterResponse>),
        (status = 404, description = "Not found")
    )
)]
pub async fn get_renter(
    State(state): State<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
    Path(id): Path<String>,
) -> Result<Json<ApiResponse<RenterResponse>>, ErrorResponse> {
    require_admin(&user).map_err(domain_error)?;

    let renter = state
        .repos
        .renters()
        .find_by_id(&id)
        .await
        .map_err(domain_error)?
        .ok_or_else(|| domain_error(DomainError::not_found("Renter", &id)))?;
    Ok(Json(ApiResponse::success(renter.into())))
}

#[utoipa::path(
    post,
    path = "/api/v1/renters",
    tag = "Renters",
    security(("bearer_auth" = [])),
    request_body = CreateRenterRequest,
    responses(
        (status = 201, description = "Created", body = ApiResponse<RenterResponse>),
        (status = 403, description = "Admin role required"),
        (status = 409, description = "Renter ID already taken"),
        (status = 422, description = "Validation failed")
    )
)]
pub async fn create_renter(
    State(state): State<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
    ValidatedJson(req): ValidatedJson<CreateRenterRequest>,
) -> Result<(StatusCode, Json<ApiResponse<RenterResponse>>), ErrorResponse> {
    require_admin(&user).map_err(domain_error)?;

    let id = req.id.unwrap_or_else(|| Uuid::new_v4().to_string());
    if state
        .repos
        .renters()
        .find_by_id(&id)
        .await
        .map_err(domain_error)?
        .is_some()
    {
        return Err(domain_error(DomainError::Conflict(format!(
            "Renter {} already exists",
            id
        ))));
    }

    let renter = Renter::new(id, req.first_name, req.last_name, req.email, req.phone);
    let saved = state
        .repos
        .renters()
        .save(renter)
        .await
        .map_err(domain_error)?;
    Ok((StatusCode::CREATED, Json(ApiResponse::success(saved.into()))))
}

#[utoipa::path(
    post,
    path = "/api/v1/renters/{id}/suspend",
    tag = "Renters",
    security(("bearer_auth" = [])),
    params(("id" = String, Path, description = "Renter ID")),
    responses(
        (status = 200, description = "Suspended", body = ApiResponse<RenterResponse>),
        (status = 400, description = "Renter is not active"),
        (status = 404, description = "Not found")
    )
)]
pub async fn suspend_renter(
    State(state): State<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
    Path(id): Path<String>,
) -> Result<Json<ApiResponse<RenterResponse>>, ErrorResponse> {
    require_admin(&user).map_err(domain_error)?;
    mutate_renter(&state, &id, |renter| renter.suspend()).await
}

#[utoipa::path(
    post,
    path = "/api/v1/renters/{id}/unsuspend",
    tag = "Renters",
    security(("bearer_auth" = [])),
    params(("id" = String, Path, description = "Renter ID")),
    responses(
        (status = 200, description = "Back to active", body = ApiResponse<RenterResponse>),
        (status = 400, description = "Renter is not suspended"),
        (status = 404, description = "Not found")
    )
)]
pub async fn unsuspend_renter(
    State(state): State<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
    Path(id): Path<String>,
) -> Result<Json<ApiResponse<RenterResponse>>, ErrorResponse> {
    require_admin(&user).map_err(domain_error)?;
    mutate_renter(&state, &id, |renter| renter.unsuspend()).await
}

#[utoipa::path(
    post,
    path = "/api/v1/renters/{id}/deactivate",
    tag = "Renters",
    security(("bearer_auth" = [])),
    params(("id" = String, Path, description = "Renter ID")),
    responses(
        (status = 200, description = "Deactivated (terminal)", body = ApiResponse<RenterResponse>),
        (status = 400, description = "Already deactivated"),
        (status = 404, description = "Not found")
    )
)]
pub async fn deactivate_renter(
    State(state): State<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
    Path(id): Path<String>,
) -> Result<Json<ApiResponse<RenterResponse>>, ErrorResponse> {
    require_admin(&user).map_err(domain_error)?;
    mutate_renter(&state, &id, |renter| renter.deactivate()).await
}

/// Load, apply an account transition, persist, respond.
async fn mutate_renter(
    state: &AppState,
    id: &str,
    apply: impl FnOnce(&mut Renter) -> crate::domain::DomainResult<()>,
) -> Result<Json<ApiResponse<RenterResponse>>, ErrorResponse> {
    let mut renter = state
        .repos
        .renters()
        .find_by_id(id)
        .await
        .map_err(domain_error)?
        .ok_or_else(|| domain_error(DomainError::not_found("Renter", id)))?;

    apply(&mut renter).map_err(domain_error)?;
    state
        .repos
        .renters()
        .update(renter.clone())
        .await
        .map_err(domain_error)?;
    Ok(Json(ApiResponse::success(renter.into())))
}

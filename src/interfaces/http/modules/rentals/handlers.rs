//! Rental REST API handlers
//!
//! Renter-facing checkout/return plus the admin oversight endpoints.
//! The lifecycle rules live in `RentalService`; handlers only resolve
//! the caller, derive the `paid` flag, and shape responses.

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Extension, Json,
};

use super::dto::{
    AccrualResponse, AccrualSnapshotResponse, RentalListQuery, RentalResponse,
    RentalStatsResponse, StartRentalRequest,
};
use crate::domain::{DomainError, Rental, RentalStatus};
use crate::interfaces::http::common::{
    domain_error, ApiResponse, ErrorResponse, PaginatedResponse, ValidatedJson,
};
use crate::interfaces::http::middleware::{require_admin, AuthenticatedUser};
use crate::interfaces::http::modules::AppState;
use crate::shared::types::pagination::PaginationParams;

/// Derive the `paid` flag and shape one rental for the wire.
async fn to_response(state: &AppState, rental: Rental) -> Result<RentalResponse, ErrorResponse> {
    let paid = state
        .repos
        .payments()
        .find_by_rental(&rental.id)
        .await
        .map_err(domain_error)?
        .is_some();
    Ok(RentalResponse::build(
        rental,
        paid,
        state.rental_service.rate_plan(),
    ))
}

async fn to_responses(
    state: &AppState,
    rentals: Vec<Rental>,
) -> Result<Vec<RentalResponse>, ErrorResponse> {
    let mut responses = Vec::with_capacity(rentals.len());
    for rental in rentals {
        responses.push(to_response(state, rental).await?);
    }
    Ok(responses)
}

#[utoipa::path(
    post,
    path = "/api/v1/rentals",
    tag = "Rentals",
    security(("bearer_auth" = [])),
    request_body = StartRentalRequest,
    responses(
        (status = 201, description = "Rental started", body = ApiResponse<RentalResponse>),
        (status = 400, description = "Bike not available or account blocked"),
        (status = 404, description = "Bike or renter not found"),
        (status = 409, description = "Renter already has an open rental, or the bike was just taken")
    )
)]
pub async fn start_rental(
    State(state): State<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
    ValidatedJson(req): ValidatedJson<StartRentalRequest>,
) -> Result<(StatusCode, Json<ApiResponse<RentalResponse>>), ErrorResponse> {
    let rental = state
        .rental_service
        .start_rental(&req.ebike_id, &user.user_id, &req.station_id)
        .await
        .map_err(domain_error)?;

    let response = to_response(&state, rental).await?;
    Ok((StatusCode::CREATED, Json(ApiResponse::success(response))))
}

#[utoipa::path(
    post,
    path = "/api/v1/rentals/{id}/end",
    tag = "Rentals",
    security(("bearer_auth" = [])),
    params(("id" = String, Path, description = "Rental ID")),
    responses(
        (status = 200, description = "Rental settled", body = ApiResponse<RentalResponse>),
        (status = 403, description = "Not the caller's rental"),
        (status = 404, description = "Not found"),
        (status = 409, description = "Rental is not active")
    )
)]
pub async fn end_rental(
    State(state): State<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
    Path(id): Path<String>,
) -> Result<Json<ApiResponse<RentalResponse>>, ErrorResponse> {
    let rental = state
        .repos
        .rentals()
        .find_by_id(&id)
        .await
        .map_err(domain_error)?
        .ok_or_else(|| domain_error(DomainError::not_found("Rental", &id)))?;

    if !user.is_admin() && rental.renter_id != user.user_id {
        return Err(domain_error(DomainError::Forbidden(
            "Rental belongs to another renter".to_string(),
        )));
    }

    let (rental, _payment) = state
        .rental_service
        .end_rental(&id)
        .await
        .map_err(domain_error)?;

    let response = to_response(&state, rental).await?;
    Ok(Json(ApiResponse::success(response)))
}

#[utoipa::path(
    post,
    path = "/api/v1/rentals/{id}/force-end",
    tag = "Rentals",
    security(("bearer_auth" = [])),
    params(("id" = String, Path, description = "Rental ID")),
    responses(
        (status = 200, description = "Rental settled by operator", body = ApiResponse<RentalResponse>),
        (status = 403, description = "Admin role required"),
        (status = 404, description = "Not found"),
        (status = 409, description = "Rental already settled")
    )
)]
pub async fn force_end_rental(
    State(state): State<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
    Path(id): Path<String>,
) -> Result<Json<ApiResponse<RentalResponse>>, ErrorResponse> {
    require_admin(&user).map_err(domain_error)?;

    let (rental, _payment) = state
        .rental_service
        .force_end_rental(&id)
        .await
        .map_err(domain_error)?;

    let response = to_response(&state, rental).await?;
    Ok(Json(ApiResponse::success(response)))
}

#[utoipa::path(
    get,
    path = "/api/v1/rentals/{id}/accrual",
    tag = "Rentals",
    security(("bearer_auth" = [])),
    params(("id" = String, Path, description = "Rental ID")),
    responses(
        (status = 200, description = "Live duration and fee", body = ApiResponse<AccrualResponse>),
        (status = 403, description = "Not the caller's rental"),
        (status = 404, description = "Not found")
    )
)]
pub async fn get_accrual(
    State(state): State<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
    Path(id): Path<String>,
) -> Result<Json<ApiResponse<AccrualResponse>>, ErrorResponse> {
    let (rental, accrual) = state
        .rental_service
        .compute_accrual(&id)
        .await
        .map_err(domain_error)?;

    if !user.is_admin() && rental.renter_id != user.user_id {
        return Err(domain_error(DomainError::Forbidden(
            "Rental belongs to another renter".to_string(),
        )));
    }

    Ok(Json(ApiResponse::success(AccrualResponse::build(
        rental.id,
        rental.status.to_string(),
        accrual,
        state.rental_service.rate_plan(),
    ))))
}

#[utoipa::path(
    get,
    path = "/api/v1/rentals",
    tag = "Rentals",
    security(("bearer_auth" = [])),
    params(RentalListQuery),
    responses(
        (status = 200, description = "Paginated rental list", body = ApiResponse<PaginatedResponse<RentalResponse>>),
        (status = 400, description = "Unknown status filter"),
        (status = 403, description = "Admin role required")
    )
)]
pub async fn list_rentals(
    State(state): State<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
    Query(query): Query<RentalListQuery>,
) -> Result<Json<ApiResponse<PaginatedResponse<RentalResponse>>>, ErrorResponse> {
    require_admin(&user).map_err(domain_error)?;

    let status = match query.status.as_deref() {
        Some(s) => Some(RentalStatus::from_str(s).ok_or_else(|| {
            domain_error(DomainError::Validation(format!(
                "Unknown rental status: {}",
                s
            )))
        })?),
        None => None,
    };

    let params = PaginationParams::new(query.page, query.limit);
    let page = state
        .repos
        .rentals()
        .find_page(params, status)
        .await
        .map_err(domain_error)?;

    let (items, total, page_no, limit, total_pages) =
        (page.items, page.total, page.page, page.limit, page.total_pages);
    let responses = to_responses(&state, items).await?;

    Ok(Json(ApiResponse::success(PaginatedResponse {
        items: responses,
        total,
        page: page_no,
        limit,
        total_pages,
    })))
}

#[utoipa::path(
    get,
    path = "/api/v1/rentals/active",
    tag = "Rentals",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Open rentals (active and overdue)", body = ApiResponse<Vec<RentalResponse>>),
        (status = 403, description = "Admin role required")
    )
)]
pub async fn list_active_rentals(
    State(state): State<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
) -> Result<Json<ApiResponse<Vec<RentalResponse>>>, ErrorResponse> {
    require_admin(&user).map_err(domain_error)?;

    let mut open = state
        .repos
        .rentals()
        .find_by_status(RentalStatus::Active)
        .await
        .map_err(domain_error)?;
    open.extend(
        state
            .repos
            .rentals()
            .find_by_status(RentalStatus::Overdue)
            .await
            .map_err(domain_error)?,
    );

    let responses = to_responses(&state, open).await?;
    Ok(Json(ApiResponse::success(responses)))
}

#[utoipa::path(
    get,
    path = "/api/v1/rentals/mine",
    tag = "Rentals",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "The caller's rental history, newest first", body = ApiResponse<Vec<RentalResponse>>)
    )
)]
pub async fn list_my_rentals(
    State(state): State<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
) -> Result<Json<ApiResponse<Vec<RentalResponse>>>, ErrorResponse> {
    let rentals = state
        .repos
        .rentals()
        .find_by_renter(&user.user_id)
        .await
        .map_err(domain_error)?;

    let responses = to_responses(&state, rentals).await?;
    Ok(Json(ApiResponse::success(responses)))
}

#[utoipa::path(
    get,
    path = "/api/v1/rentals/accruals",
    tag = "Rentals",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Last refreshed accrual for every open rental", body = ApiResponse<Vec<AccrualSnapshotResponse>>),
        (status = 403, description = "Admin role required")
    )
)]
pub async fn list_accrual_snapshots(
    State(state): State<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
) -> Result<Json<ApiResponse<Vec<AccrualSnapshotResponse>>>, ErrorResponse> {
    require_admin(&user).map_err(domain_error)?;

    let rate_plan = state.rental_service.rate_plan();
    let snapshots: Vec<AccrualSnapshotResponse> = state
        .accrual_monitor
        .snapshot_all()
        .into_iter()
        .map(|(rental_id, accrual)| AccrualSnapshotResponse::build(rental_id, accrual, rate_plan))
        .collect();

    Ok(Json(ApiResponse::success(snapshots)))
}

#[utoipa::path(
    get,
    path = "/api/v1/rentals/stats",
    tag = "Rentals",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Fleet-wide rental figures", body = ApiResponse<RentalStatsResponse>),
        (status = 403, description = "Admin role required")
    )
)]
pub async fn get_rental_stats(
    State(state): State<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
) -> Result<Json<ApiResponse<RentalStatsResponse>>, ErrorResponse> {
    require_admin(&user).map_err(domain_error)?;

    let rentals = state
        .repos
        .rentals()
        .find_all()
        .await
        .map_err(domain_error)?;

    let mut active = 0u64;
    let mut overdue = 0u64;
    let mut revenue = 0i64;
    for rental in &rentals {
        match rental.status {
            RentalStatus::Active => active += 1,
            RentalStatus::Overdue => overdue += 1,
            RentalStatus::Completed => revenue += rental.rental_fee,
        }
    }

    Ok(Json(ApiResponse::success(RentalStatsResponse {
        total_rentals: rentals.len() as u64,
        active_rentals: active,
        overdue_rentals: overdue,
        total_revenue: revenue,
        formatted_revenue: state.rental_service.rate_plan().format_amount(revenue),
    })))
}

// ── Tests ──────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    use axum::body::Body;
    use axum::http::Request;
    use axum::routing::get;
    use axum::Router;
    use chrono::{DateTime, Duration as ChronoDuration, Utc};
    use tower::Service;

    use crate::application::services::{AccrualMonitor, RentalService};
    use crate::domain::repositories::RepositoryProvider;
    use crate::domain::RentalRepository;
    use crate::infrastructure::storage::memory::InMemoryRepositoryProvider;
    use crate::shared::types::clock::ManualClock;

    fn t0() -> DateTime<Utc> {
        DateTime::parse_from_rfc3339("2024-06-01T08:00:00Z")
            .unwrap()
            .with_timezone(&Utc)
    }

    fn admin() -> AuthenticatedUser {
        AuthenticatedUser {
            user_id: "OPS001".to_string(),
            username: "ops".to_string(),
            role: "admin".to_string(),
        }
    }

    async fn body_json(resp: axum::http::Response<Body>) -> serde_json::Value {
        let bytes = axum::body::to_bytes(resp.into_body(), usize::MAX)
            .await
            .unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn accruals_route_serves_the_monitor_snapshot() {
        let repos = Arc::new(InMemoryRepositoryProvider::new());
        let clock = Arc::new(ManualClock::starting_at(t0() + ChronoDuration::minutes(90)));

        repos
            .rentals()
            .save(Rental::new("r-1", "bike-1", "u-1", "st-1", t0()))
            .await
            .unwrap();

        let monitor = Arc::new(AccrualMonitor::new(repos.clone()).with_clock(clock.clone()));
        monitor.refresh_now().await.unwrap();

        let state = AppState {
            repos: repos.clone(),
            rental_service: Arc::new(RentalService::new(repos).with_clock(clock)),
            accrual_monitor: monitor,
        };
        let mut svc = Router::new()
            .route("/rentals/accruals", get(list_accrual_snapshots))
            .layer(Extension(admin()))
            .with_state(state)
            .into_service();

        let resp = svc
            .call(
                Request::builder()
                    .method("GET")
                    .uri("/rentals/accruals")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::OK);

        let json = body_json(resp).await;
        assert_eq!(json["success"], true);
        let items = json["data"].as_array().unwrap();
        assert_eq!(items.len(), 1);
        assert_eq!(items[0]["rental_id"], "r-1");
        assert_eq!(items[0]["elapsed_minutes"], 90);
        assert_eq!(items[0]["fee"], 170);
        assert_eq!(items[0]["formatted_fee"], "₱170.00");
    }

    #[tokio::test]
    async fn accruals_route_rejects_renters() {
        let repos = Arc::new(InMemoryRepositoryProvider::new());
        let state = AppState {
            repos: repos.clone(),
            rental_service: Arc::new(RentalService::new(repos.clone())),
            accrual_monitor: Arc::new(AccrualMonitor::new(repos)),
        };
        let renter = AuthenticatedUser {
            user_id: "USR001".to_string(),
            username: "alice".to_string(),
            role: "renter".to_string(),
        };
        let mut svc = Router::new()
            .route("/rentals/accruals", get(list_accrual_snapshots))
            .layer(Extension(renter))
            .with_state(state)
            .into_service();

        let resp = svc
            .call(
                Request::builder()
                    .method("GET")
                    .uri("/rentals/accruals")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::FORBIDDEN);
    }
}

//! Station REST API handlers

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Extension, Json,
};
use uuid::Uuid;

use super::dto::{CreateStationRequest, StationResponse, UpdateStationRequest};
use crate::domain::{DomainError, Station};
use crate::interfaces::http::common::{domain_error, ApiResponse, ErrorResponse, ValidatedJson};
use crate::interfaces::http::middleware::{require_admin, AuthenticatedUser};
use crate::interfaces::http::modules::ebikes::EbikeResponse;
use crate::interfaces::http::modules::AppState;

#[utoipa::path(
    get,
    path = "/api/v1/stations",
    tag = "Stations",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Station list", body = ApiResponse<Vec<StationResponse>>)
    )
)]
pub async fn list_stations(
    State(state): State<AppState>,
) -> Result<Json<ApiResponse<Vec<StationResponse>>>, ErrorResponse> {
    let stations = state
        .repos
        .stations()
        .find_all()
        .await
        .map_err(domain_error)?;
    let responses: Vec<StationResponse> = stations.into_iter().map(Into::into).collect();
    Ok(Json(ApiResponse::success(responses)))
}

#[utoipa::path(
    get,
    path = "/api/v1/stations/{id}",
    tag = "Stations",
    security(("bearer_auth" = [])),
    params(("id" = String, Path, description = "Station ID")),
    responses(
        (status = 200, description = "Station details", body = ApiResponse<StationResponse>),
        (status = 404, description = "Not found")
    )
)]
pub async fn get_station(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<ApiResponse<StationResponse>>, ErrorResponse> {
    let station = state
        .repos
        .stations()
        .find_by_id(&id)
        .await
        .map_err(domain_error)?
        .ok_or_else(|| domain_error(DomainError::not_found("Station", &id)))?;
    Ok(Json(ApiResponse::success(station.into())))
}

#[utoipa::path(
    get,
    path = "/api/v1/stations/{id}/ebikes",
    tag = "Stations",
    security(("bearer_auth" = [])),
    params(("id" = String, Path, description = "Station ID")),
    responses(
        (status = 200, description = "Bikes docked at the station", body = ApiResponse<Vec<EbikeResponse>>),
        (status = 404, description = "Not found")
    )
)]
pub async fn list_station_ebikes(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<ApiResponse<Vec<EbikeResponse>>>, ErrorResponse> {
    if state
        .repos
        .stations()
        .find_by_id(&id)
        .await
        .map_err(domain_error)?
        .is_none()
    {
        return Err(domain_error(DomainError::not_found("Station", &id)));
    }

    let bikes = state
        .repos
        .ebikes()
        .find_by_station(&id)
        .await
        .map_err(domain_error)?;
    let responses: Vec<EbikeResponse> = bikes.into_iter().map(Into::into).collect();
    Ok(Json(ApiResponse::success(responses)))
}

#[utoipa::path(
    post,
    path = "/api/v1/stations",
    tag = "Stations",
    security(("bearer_auth" = [])),
    request_body = CreateStationRequest,
    responses(
        (status = 201, description = "Created", body = ApiResponse<StationResponse>),
        (status = 403, description = "Admin role required"),
        (status = 422, description = "Validation failed")
    )
)]
pub async fn create_station(
    State(state): State<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
    ValidatedJson(req): ValidatedJson<CreateStationRequest>,
) -> Result<(StatusCode, Json<ApiResponse<StationResponse>>), ErrorResponse> {
    require_admin(&user).map_err(domain_error)?;

    let station = Station::new(
        Uuid::new_v4().to_string(),
        req.name,
        req.latitude,
        req.longitude,
        req.parking_bays,
    );
    let saved = state
        .repos
        .stations()
        .save(station)
        .await
        .map_err(domain_error)?;
    Ok((StatusCode::CREATED, Json(ApiResponse::success(saved.into()))))
}

#[utoipa::path(
    put,
    path = "/api/v1/stations/{id}",
    tag = "Stations",
    security(("bearer_auth" = [])),
    params(("id" = String, Path, description = "Station ID")),
    request_body = UpdateStationRequest,
    responses(
        (status = 200, description = "Updated", body = ApiResponse<StationResponse>),
        (status = 404, description = "Not found")
    )
)]
pub async fn update_station(
    State(state): State<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
    Path(id): Path<String>,
    ValidatedJson(req): ValidatedJson<UpdateStationRequest>,
) -> Result<Json<ApiResponse<StationResponse>>, ErrorResponse> {
    require_admin(&user).map_err(domain_error)?;

    let mut station = state
        .repos
        .stations()
        .find_by_id(&id)
        .await
        .map_err(domain_error)?
        .ok_or_else(|| domain_error(DomainError::not_found("Station", &id)))?;

    if let Some(name) = req.name {
        station.name = name;
    }
    if let Some(latitude) = req.latitude {
        station.latitude = latitude;
    }
    if let Some(longitude) = req.longitude {
        station.longitude = longitude;
    }
    if let Some(parking_bays) = req.parking_bays {
        station.parking_bays = parking_bays;
    }
    station.updated_at = chrono::Utc::now();

    state
        .repos
        .stations()
        .update(station.clone())
        .await
        .map_err(domain_error)?;
    Ok(Json(ApiResponse::success(station.into())))
}

#[utoipa::path(
    delete,
    path = "/api/v1/stations/{id}",
    tag = "Stations",
    security(("bearer_auth" = [])),
    params(("id" = String, Path, description = "Station ID")),
    responses(
        (status = 200, description = "Deleted", body = ApiResponse<String>),
        (status = 404, description = "Not found")
    )
)]
pub async fn delete_station(
    State(state): State<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
    Path(id): Path<String>,
) -> Result<Json<ApiResponse<String>>, ErrorResponse> {
    require_admin(&user).map_err(domain_error)?;

    if state
        .repos
        .stations()
        .find_by_id(&id)
        .await
        .map_err(domain_error)?
        .is_none()
    {
        return Err(domain_error(DomainError::not_found("Station", &id)));
    }

    state
        .repos
        .stations()
        .delete(&id)
        .await
        .map_err(domain_error)?;
    Ok(Json(ApiResponse::success("Station deleted".to_string())))
}

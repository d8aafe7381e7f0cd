//! Notification setting REST API handlers

use axum::{
    extract::{Path, State},
    Extension, Json,
};

use super::dto::{NotificationSettingResponse, UpdateNotificationSettingRequest};
use crate::domain::DomainError;
use crate::interfaces::http::common::{domain_error, ApiResponse, ErrorResponse, ValidatedJson};
use crate::interfaces::http::middleware::{require_admin, AuthenticatedUser};
use crate::interfaces::http::modules::AppState;

#[utoipa::path(
    get,
    path = "/api/v1/notification-settings",
    tag = "Notifications",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "All notification toggles", body = ApiResponse<Vec<NotificationSettingResponse>>),
        (status = 403, description = "Admin role required")
    )
)]
pub async fn list_notification_settings(
    State(state): State<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
) -> Result<Json<ApiResponse<Vec<NotificationSettingResponse>>>, ErrorResponse> {
    require_admin(&user).map_err(domain_error)?;

    let settings = state
        .repos
        .notification_settings()
        .find_all()
        .await
        .map_err(domain_error)?;
    let responses: Vec<NotificationSettingResponse> =
        settings.into_iter().map(Into::into).collect();
    Ok(Json(ApiResponse::success(responses)))
}

#[utoipa::path(
    put,
    path = "/api/v1/notification-settings/{id}",
    tag = "Notifications",
    security(("bearer_auth" = [])),
    params(("id" = String, Path, description = "Setting slug, e.g. `rental-reminders`")),
    request_body = UpdateNotificationSettingRequest,
    responses(
        (status = 200, description = "Toggle updated", body = ApiResponse<NotificationSettingResponse>),
        (status = 403, description = "Admin role required"),
        (status = 404, description = "Not found")
    )
)]
pub async fn update_notification_setting(
    State(state): State<AppState>,
    Extension(user): Extension<AuthenticatedUser>,
    Path(id): Path<String>,
    ValidatedJson(req): ValidatedJson<UpdateNotificationSettingRequest>,
) -> Result<Json<ApiResponse<NotificationSettingResponse>>, ErrorResponse> {
    require_admin(&user).map_err(domain_error)?;

    let mut setting = state
        .repos
        .notification_settings()
        .find_by_id(&id)
        .await
        .map_err(domain_error)?
        .ok_or_else(|| domain_error(DomainError::not_found("NotificationSetting", &id)))?;

    setting.set_active(req.active);
    state
        .repos
        .notification_settings()
        .update(setting.clone())
        .await
        .map_err(domain_error)?;
    Ok(Json(ApiResponse::success(setting.into())))
}

//! API router with Swagger UI

use std::sync::Arc;
use std::time::Instant;

use axum::{
    middleware,
    routing::{get, post, put},
    Router,
};
use metrics_exporter_prometheus::PrometheusHandle;
use sea_orm::DatabaseConnection;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};
use utoipa_swagger_ui::SwaggerUi;

use crate::application::services::{AccrualMonitor, RentalService};
use crate::domain::RepositoryProvider;
use crate::infrastructure::crypto::jwt::JwtConfig;
use crate::interfaces::http::common::{ApiResponse, PageQuery, PaginatedResponse};
use crate::interfaces::http::middleware::{auth_middleware, AuthState};
use crate::interfaces::http::modules::{
    ebikes, health, metrics as metrics_module, notifications, payments, pricing, rentals, renters,
    stations, AppState,
};

/// Security scheme modifier for OpenAPI
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .description(Some("JWT Bearer token"))
                        .build(),
                ),
            );
        }
    }
}

/// OpenAPI documentation
#[derive(OpenApi)]
#[openapi(
    paths(
        // Health
        health::health_check,
        // Rentals
        rentals::start_rental,
        rentals::end_rental,
        rentals::force_end_rental,
        rentals::get_accrual,
        rentals::list_rentals,
        rentals::list_active_rentals,
        rentals::list_my_rentals,
        rentals::list_accrual_snapshots,
        rentals::get_rental_stats,
        // Ebikes
        ebikes::list_ebikes,
        ebikes::list_available_ebikes,
        ebikes::get_ebike,
        ebikes::create_ebike,
        ebikes::delete_ebike,
        ebikes::lock_ebike,
        ebikes::unlock_ebike,
        // Stations
        stations::list_stations,
        stations::get_station,
        stations::list_station_ebikes,
        stations::create_station,
        stations::update_station,
        stations::delete_station,
        // Renters
        renters::list_renters,
        renters::get_renter,
        renters::create_renter,
        renters::suspend_renter,
        renters::unsuspend_renter,
        renters::deactivate_renter,
        // Payments
        payments::list_payments,
        payments::list_my_payments,
        payments::get_payment,
        // Pricing
        pricing::get_rate_plan,
        pricing::preview_fee,
        // Notifications
        notifications::list_notification_settings,
        notifications::update_notification_setting,
    ),
    components(
        schemas(
            // Common
            ApiResponse<String>,
            PageQuery,
            PaginatedResponse<rentals::RentalResponse>,
            PaginatedResponse<ebikes::EbikeResponse>,
            PaginatedResponse<renters::RenterResponse>,
            PaginatedResponse<payments::PaymentResponse>,
            // Health
            health::HealthResponse,
            health::ComponentHealth,
            // Rentals
            rentals::RentalResponse,
            rentals::StartRentalRequest,
            rentals::AccrualResponse,
            rentals::AccrualSnapshotResponse,
            rentals::RentalStatsResponse,
            rentals::RentalListQuery,
            // Ebikes
            ebikes::EbikeResponse,
            ebikes::CreateEbikeRequest,
            ebikes::EbikeListQuery,
            // Stations
            stations::StationResponse,
            stations::CreateStationRequest,
            stations::UpdateStationRequest,
            // Renters
            renters::RenterResponse,
            renters::CreateRenterRequest,
            // Payments
            payments::PaymentResponse,
            // Pricing
            pricing::RatePlanResponse,
            pricing::FeePreviewRequest,
            pricing::FeePreviewResponse,
            // Notifications
            notifications::NotificationSettingResponse,
            notifications::UpdateNotificationSettingRequest,
        )
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "Health", description = "Service health check"),
        (name = "Rentals", description = "Rental lifecycle: checkout, live accrual, return, admin oversight"),
        (name = "Ebikes", description = "Fleet unit CRUD and lock control"),
        (name = "Stations", description = "Docking location CRUD"),
        (name = "Renters", description = "Renter account administration"),
        (name = "Payments", description = "Settlement records"),
        (name = "Pricing", description = "Tiered rate plan and fee previews"),
        (name = "Notifications", description = "Operator notification toggles"),
    ),
    info(
        title = "PedalPoint Fleet API",
        version = "0.1.0",
        description = "REST API for operating a shared e-bike rental fleet",
        license(name = "MIT")
    )
)]
pub struct ApiDoc;

/// Create the API router with all routes
pub fn create_api_router(
    repos: Arc<dyn RepositoryProvider>,
    rental_service: Arc<RentalService>,
    accrual_monitor: Arc<AccrualMonitor>,
    db: DatabaseConnection,
    jwt_config: JwtConfig,
    prometheus_handle: PrometheusHandle,
) -> Router {
    let auth_state = AuthState { jwt_config };
    let app_state = AppState {
        repos: repos.clone(),
        rental_service,
        accrual_monitor,
    };

    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let rental_routes = Router::new()
        .route("/", post(rentals::start_rental).get(rentals::list_rentals))
        .route("/active", get(rentals::list_active_rentals))
        .route("/mine", get(rentals::list_my_rentals))
        .route("/accruals", get(rentals::list_accrual_snapshots))
        .route("/stats", get(rentals::get_rental_stats))
        .route("/{id}/end", post(rentals::end_rental))
        .route("/{id}/force-end", post(rentals::force_end_rental))
        .route("/{id}/accrual", get(rentals::get_accrual));

    let ebike_routes = Router::new()
        .route("/", get(ebikes::list_ebikes).post(ebikes::create_ebike))
        .route("/available", get(ebikes::list_available_ebikes))
        .route(
            "/{id}",
            get(ebikes::get_ebike).delete(ebikes::delete_ebike),
        )
        .route("/{id}/lock", post(ebikes::lock_ebike))
        .route("/{id}/unlock", post(ebikes::unlock_ebike));

    let station_routes = Router::new()
        .route(
            "/",
            get(stations::list_stations).post(stations::create_station),
        )
        .route(
            "/{id}",
            get(stations::get_station)
                .put(stations::update_station)
                .delete(stations::delete_station),
        )
        .route("/{id}/ebikes", get(stations::list_station_ebikes));

    let renter_routes = Router::new()
        .route(
            "/",
            get(renters::list_renters).post(renters::create_renter),
        )
        .route("/{id}", get(renters::get_renter))
        .route("/{id}/suspend", post(renters::suspend_renter))
        .route("/{id}/unsuspend", post(renters::unsuspend_renter))
        .route("/{id}/deactivate", post(renters::deactivate_renter));

    let payment_routes = Router::new()
        .route("/", get(payments::list_payments))
        .route("/mine", get(payments::list_my_payments))
        .route("/{id}", get(payments::get_payment));

    let pricing_routes = Router::new()
        .route("/", get(pricing::get_rate_plan))
        .route("/preview", post(pricing::preview_fee));

    let notification_routes = Router::new()
        .route("/", get(notifications::list_notification_settings))
        .route("/{id}", put(notifications::update_notification_setting));

    // Every /api/v1 route sits behind the bearer-token middleware
    let api_routes = Router::new()
        .nest("/rentals", rental_routes)
        .nest("/ebikes", ebike_routes)
        .nest("/stations", station_routes)
        .nest("/renters", renter_routes)
        .nest("/payments", payment_routes)
        .nest("/pricing", pricing_routes)
        .nest("/notification-settings", notification_routes)
        .layer(middleware::from_fn_with_state(auth_state, auth_middleware))
        .with_state(app_state);

    let health_state = health::HealthState {
        db,
        repos,
        started_at: Arc::new(Instant::now()),
    };
    let metrics_state = metrics_module::MetricsState {
        handle: prometheus_handle,
    };

    let swagger_routes = SwaggerUi::new("/docs").url("/api-doc/openapi.json", ApiDoc::openapi());

    Router::new()
        .merge(swagger_routes)
        .route(
            "/health",
            get(health::health_check).with_state(health_state),
        )
        .route(
            "/metrics",
            get(metrics_module::prometheus_metrics).with_state(metrics_state),
        )
        .nest("/api/v1", api_routes)
        .layer(middleware::from_fn(
            metrics_module::http_metrics_middleware,
        ))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
}

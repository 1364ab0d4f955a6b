use crate::handlers::{
    auth::{get_profile, login, register},
    brands::{create_brand, get_all_brands, get_replacement_schedules, update_brand},
    comparison::{calculate_comparison, get_comparison_brands},
    health::health_check,
    pricing::{get_practice_brands, update_practice_pricing},
    settings::{get_practice_settings, update_practice_settings},
};
use crate::schemas::{ApiDoc, AppState};
use axum::{
    routing::{get, post, put},
    Router,
};
use std::time::Duration;
use tower::ServiceBuilder;
use tower_http::{
    compression::CompressionLayer, cors::CorsLayer, timeout::TimeoutLayer, trace::TraceLayer,
};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

/// Create application router with all routes and middleware
pub fn create_router(state: AppState) -> Router {
    Router::new()
        // Health check
        .route("/health", get(health_check))
        // Authentication
        .route("/api/v1/auth/register", post(register))
        .route("/api/v1/auth/login", post(login))
        .route("/api/v1/profile", get(get_profile))
        // Master admin catalog management
        .route("/api/v1/admin/brands", get(get_all_brands).post(create_brand))
        .route("/api/v1/admin/brands/:brand_id", put(update_brand))
        .route("/api/v1/replacement-schedules", get(get_replacement_schedules))
        // Practice pricing and settings
        .route("/api/v1/practice/brands", get(get_practice_brands))
        .route("/api/v1/practice/pricing", post(update_practice_pricing))
        .route(
            "/api/v1/practice/settings",
            get(get_practice_settings).put(update_practice_settings),
        )
        // Comparison
        .route("/api/v1/comparison/brands", get(get_comparison_brands))
        .route("/api/v1/comparison", post(calculate_comparison))
        // Swagger UI
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        // Add middleware
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(CompressionLayer::new())
                .layer(TimeoutLayer::new(Duration::from_secs(30)))
                .layer(CorsLayer::permissive()),
        )
        .with_state(state)
}

use common::{
    ApiResponse, BrandDto, BrandSummary, ComparisonRequest, ComparisonResult, CompetitorBreakdown,
    PracticeBrandDto, PracticeBreakdown, PracticePricingDto, PracticeRebatePolicy, Quarter,
    QuarterlyRebates, ReplacementScheduleDto, SavingsSummary, WearerStatus,
};
use compute::clock::Clock;
use compute::comparison::ComparisonCalculator;
use moka::future::Cache;
use sea_orm::DatabaseConnection;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use utoipa::{OpenApi, ToSchema};

use crate::auth::TokenService;
use crate::handlers::auth::{AuthResponse, LoginRequest, PracticeProfile, RegisterRequest};
use crate::handlers::brands::BrandRequest;
use crate::handlers::pricing::PricingUpdateRequest;

/// Cache key of the active brand catalog.
pub const ACTIVE_CATALOG_KEY: &str = "catalog:active";

/// Application state shared across handlers
#[derive(Clone, Debug)]
pub struct AppState {
    /// Database connection
    pub db: DatabaseConnection,
    /// Cache for the shared brand catalog
    pub cache: Cache<String, CachedData>,
    /// Issues and verifies access tokens
    pub tokens: TokenService,
    /// Configured comparison calculator
    pub calculator: Arc<ComparisonCalculator>,
    /// Source of the current quarter
    pub clock: Arc<dyn Clock>,
}

/// Cached data types
#[derive(Clone, Debug)]
pub enum CachedData {
    ActiveCatalog(Vec<BrandDto>),
}

/// Error response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ErrorResponse {
    /// Error message
    pub error: String,
    /// Error code
    pub code: String,
    /// Success status (always false for errors)
    pub success: bool,
}

/// Health check response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct HealthResponse {
    /// Service status
    pub status: String,
    /// Service version
    pub version: String,
    /// Database connection status
    pub database: String,
}

/// OpenAPI documentation
#[derive(OpenApi)]
#[openapi(
    paths(
        crate::handlers::health::health_check,
        crate::handlers::auth::register,
        crate::handlers::auth::login,
        crate::handlers::auth::get_profile,
        crate::handlers::brands::get_all_brands,
        crate::handlers::brands::create_brand,
        crate::handlers::brands::update_brand,
        crate::handlers::brands::get_replacement_schedules,
        crate::handlers::pricing::get_practice_brands,
        crate::handlers::pricing::update_practice_pricing,
        crate::handlers::settings::get_practice_settings,
        crate::handlers::settings::update_practice_settings,
        crate::handlers::comparison::get_comparison_brands,
        crate::handlers::comparison::calculate_comparison,
    ),
    components(
        schemas(
            ApiResponse<AuthResponse>,
            ApiResponse<PracticeProfile>,
            ApiResponse<BrandDto>,
            ApiResponse<Vec<BrandDto>>,
            ApiResponse<Vec<ReplacementScheduleDto>>,
            ApiResponse<Vec<PracticeBrandDto>>,
            ApiResponse<PracticePricingDto>,
            ApiResponse<QuarterlyRebates>,
            ApiResponse<ComparisonResult>,
            ErrorResponse,
            HealthResponse,
            RegisterRequest,
            LoginRequest,
            AuthResponse,
            PracticeProfile,
            BrandRequest,
            PricingUpdateRequest,
            BrandDto,
            ReplacementScheduleDto,
            PracticeBrandDto,
            PracticePricingDto,
            QuarterlyRebates,
            ComparisonRequest,
            ComparisonResult,
            BrandSummary,
            PracticeBreakdown,
            CompetitorBreakdown,
            SavingsSummary,
            WearerStatus,
            Quarter,
            PracticeRebatePolicy,
        )
    ),
    tags(
        (name = "health", description = "Health check endpoints"),
        (name = "auth", description = "Registration, login and profile"),
        (name = "admin", description = "Master admin brand catalog management"),
        (name = "catalog", description = "Shared catalog lookups"),
        (name = "practice", description = "Practice pricing and quarterly rebate settings"),
        (name = "comparison", description = "Practice versus online competitor price comparison"),
    ),
    info(
        title = "LensCompare API",
        description = "Contact-lens practice pricing - compare a practice's annual lens cost against an online competitor",
        version = "0.1.0",
        license(
            name = "MIT",
            url = "https://opensource.org/licenses/MIT"
        )
    )
)]
pub struct ApiDoc;

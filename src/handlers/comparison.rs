use crate::auth::AuthPractice;
use crate::error::ApiError;
use crate::schemas::{AppState, ErrorResponse};
use axum::{extract::State, response::Json};
use common::{ApiResponse, ComparisonRequest, ComparisonResult, PracticeBrandDto};
use compute::clock::current_quarter;
use compute::comparison::compare_for_practice;
use compute::convert::{brand_to_dto, pricing_to_dto};
use model::entities::{practice_pricing, prelude::*};
use sea_orm::{ColumnTrait, EntityTrait, QueryFilter};
use tracing::{debug, info, instrument, trace};

/// Brands this practice can compare: active brands with active pricing
#[utoipa::path(
    get,
    path = "/api/v1/comparison/brands",
    tag = "comparison",
    responses(
        (status = 200, description = "Brands retrieved successfully", body = ApiResponse<Vec<PracticeBrandDto>>),
        (status = 401, description = "Missing access token", body = ErrorResponse),
        (status = 403, description = "Invalid access token", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
#[instrument(skip(state, claims), fields(practice_id = claims.sub))]
pub async fn get_comparison_brands(
    State(state): State<AppState>,
    AuthPractice(claims): AuthPractice,
) -> Result<Json<ApiResponse<Vec<PracticeBrandDto>>>, ApiError> {
    trace!("Entering get_comparison_brands function");

    let rows = PracticePricing::find()
        .filter(practice_pricing::Column::PracticeId.eq(claims.sub))
        .filter(practice_pricing::Column::IsActive.eq(true))
        .find_also_related(LensBrand)
        .all(&state.db)
        .await?;

    let mut brands: Vec<PracticeBrandDto> = rows
        .iter()
        .filter_map(|(pricing, brand)| {
            brand
                .as_ref()
                .filter(|b| b.is_active)
                .map(|b| PracticeBrandDto {
                    brand: brand_to_dto(b),
                    pricing: Some(pricing_to_dto(pricing)),
                })
        })
        .collect();
    brands.sort_by(|a, b| a.brand.brand_name.cmp(&b.brand.brand_name));

    debug!("{} brands available for comparison", brands.len());
    Ok(Json(ApiResponse {
        data: brands,
        message: "Comparison brands retrieved successfully".to_string(),
        success: true,
    }))
}

/// Compare the practice's annual cost for a brand against the online competitor
#[utoipa::path(
    post,
    path = "/api/v1/comparison",
    tag = "comparison",
    request_body = ComparisonRequest,
    responses(
        (status = 200, description = "Comparison calculated successfully", body = ApiResponse<ComparisonResult>),
        (status = 400, description = "Missing brand ID or invalid amount", body = ErrorResponse),
        (status = 401, description = "Missing access token", body = ErrorResponse),
        (status = 403, description = "Invalid access token", body = ErrorResponse),
        (status = 404, description = "Brand not found or no pricing set", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
#[instrument(skip(state, claims, request), fields(practice_id = claims.sub, brand_id = ?request.brand_id))]
pub async fn calculate_comparison(
    State(state): State<AppState>,
    AuthPractice(claims): AuthPractice,
    Json(request): Json<ComparisonRequest>,
) -> Result<Json<ApiResponse<ComparisonResult>>, ApiError> {
    trace!("Entering calculate_comparison function");

    let quarter = current_quarter(state.clock.as_ref());
    debug!("Using quarter {}", quarter);

    let result = compare_for_practice(&state.db, &state.calculator, claims.sub, &request, quarter).await?;

    info!(
        total_savings = %result.savings.total_savings,
        "Comparison calculated for brand {}",
        result.brand.id
    );

    // Amounts are rounded to cents only for the response
    Ok(Json(ApiResponse {
        data: result.rounded(),
        message: "Comparison calculated successfully".to_string(),
        success: true,
    }))
}

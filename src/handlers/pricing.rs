use crate::auth::AuthPractice;
use crate::error::ApiError;
use crate::handlers::brands::load_active_catalog;
use crate::schemas::{AppState, ErrorResponse};
use axum::{extract::State, response::Json};
use chrono::Utc;
use common::{ApiResponse, PracticeBrandDto, PracticePricingDto, MAX_AMOUNT};
use compute::convert::pricing_to_dto;
use model::entities::{practice_pricing, prelude::*};
use rust_decimal::Decimal;
use sea_orm::{ActiveModelTrait, ColumnTrait, EntityTrait, QueryFilter, Set};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use tracing::{debug, info, instrument, trace, warn};
use utoipa::ToSchema;

/// Partial update of a practice's pricing for one brand.
///
/// Only the fields present are written; stored values of omitted fields are kept.
#[derive(Debug, Clone, Default, Deserialize, Serialize, ToSchema)]
pub struct PricingUpdateRequest {
    pub brand_id: Option<i32>,
    pub price_per_box: Option<Decimal>,
    pub manufacturer_rebate_new: Option<Decimal>,
    pub manufacturer_rebate_existing: Option<Decimal>,
    pub is_active: Option<bool>,
}

impl PricingUpdateRequest {
    fn has_changes(&self) -> bool {
        self.price_per_box.is_some()
            || self.manufacturer_rebate_new.is_some()
            || self.manufacturer_rebate_existing.is_some()
            || self.is_active.is_some()
    }

    /// Returns the brand id once the patch is known to be well formed.
    fn validate(&self) -> Result<i32, ApiError> {
        let brand_id = self
            .brand_id
            .ok_or_else(|| ApiError::Validation("Brand ID is required".to_string()))?;

        if !self.has_changes() {
            return Err(ApiError::Validation(
                "At least one field to update is required".to_string(),
            ));
        }

        let amounts = [
            ("price_per_box", self.price_per_box),
            ("manufacturer_rebate_new", self.manufacturer_rebate_new),
            ("manufacturer_rebate_existing", self.manufacturer_rebate_existing),
        ];
        for (field, value) in amounts {
            if value.is_some_and(|v| v < Decimal::ZERO) {
                return Err(ApiError::Validation(format!("{} must not be negative", field)));
            }
            if value.is_some_and(|v| v > MAX_AMOUNT) {
                return Err(ApiError::Validation(format!(
                    "{} must not exceed {}",
                    field, MAX_AMOUNT
                )));
            }
        }

        Ok(brand_id)
    }

    /// Write the present fields onto an active model.
    fn apply(&self, pricing: &mut practice_pricing::ActiveModel) {
        if let Some(price) = self.price_per_box {
            pricing.price_per_box = Set(Some(price));
        }
        if let Some(rebate) = self.manufacturer_rebate_new {
            pricing.manufacturer_rebate_new = Set(Some(rebate));
        }
        if let Some(rebate) = self.manufacturer_rebate_existing {
            pricing.manufacturer_rebate_existing = Set(Some(rebate));
        }
        if let Some(is_active) = self.is_active {
            pricing.is_active = Set(is_active);
        }
        pricing.updated_at = Set(Utc::now());
    }
}

/// Active catalog joined with this practice's pricing
#[utoipa::path(
    get,
    path = "/api/v1/practice/brands",
    tag = "practice",
    responses(
        (status = 200, description = "Brands retrieved successfully", body = ApiResponse<Vec<PracticeBrandDto>>),
        (status = 401, description = "Missing access token", body = ErrorResponse),
        (status = 403, description = "Invalid access token", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
#[instrument(skip(state, claims), fields(practice_id = claims.sub))]
pub async fn get_practice_brands(
    State(state): State<AppState>,
    AuthPractice(claims): AuthPractice,
) -> Result<Json<ApiResponse<Vec<PracticeBrandDto>>>, ApiError> {
    trace!("Entering get_practice_brands function");

    let catalog = load_active_catalog(&state).await?;
    let mut pricing_by_brand: HashMap<i32, PracticePricingDto> = PracticePricing::find()
        .filter(practice_pricing::Column::PracticeId.eq(claims.sub))
        .all(&state.db)
        .await?
        .iter()
        .map(|row| (row.brand_id, pricing_to_dto(row)))
        .collect();

    let brands: Vec<PracticeBrandDto> = catalog
        .into_iter()
        .map(|brand| {
            let pricing = pricing_by_brand.remove(&brand.id);
            PracticeBrandDto { brand, pricing }
        })
        .collect();

    debug!("Returning {} catalog brands", brands.len());
    Ok(Json(ApiResponse {
        data: brands,
        message: "Brands retrieved successfully".to_string(),
        success: true,
    }))
}

/// Update this practice's pricing for one brand
#[utoipa::path(
    post,
    path = "/api/v1/practice/pricing",
    tag = "practice",
    request_body = PricingUpdateRequest,
    responses(
        (status = 200, description = "Pricing updated successfully", body = ApiResponse<PracticePricingDto>),
        (status = 400, description = "Invalid request", body = ErrorResponse),
        (status = 401, description = "Missing access token", body = ErrorResponse),
        (status = 403, description = "Invalid access token", body = ErrorResponse),
        (status = 404, description = "Brand not found", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
#[instrument(skip(state, claims, request), fields(practice_id = claims.sub, brand_id = ?request.brand_id))]
pub async fn update_practice_pricing(
    State(state): State<AppState>,
    AuthPractice(claims): AuthPractice,
    Json(request): Json<PricingUpdateRequest>,
) -> Result<Json<ApiResponse<PracticePricingDto>>, ApiError> {
    trace!("Entering update_practice_pricing function");

    let brand_id = request.validate()?;

    if LensBrand::find_by_id(brand_id).one(&state.db).await?.is_none() {
        warn!("Brand with ID {} not found", brand_id);
        return Err(ApiError::NotFound("Brand not found".to_string()));
    }

    let existing = PracticePricing::find()
        .filter(practice_pricing::Column::PracticeId.eq(claims.sub))
        .filter(practice_pricing::Column::BrandId.eq(brand_id))
        .one(&state.db)
        .await?;

    let saved = match existing {
        Some(row) => {
            debug!("Patching existing pricing row {}", row.id);
            let mut pricing: practice_pricing::ActiveModel = row.into();
            request.apply(&mut pricing);
            pricing.update(&state.db).await?
        }
        None => {
            debug!("Creating pricing row");
            let mut pricing = practice_pricing::ActiveModel {
                practice_id: Set(claims.sub),
                brand_id: Set(brand_id),
                price_per_box: Set(None),
                manufacturer_rebate_new: Set(None),
                manufacturer_rebate_existing: Set(None),
                is_active: Set(true),
                ..Default::default()
            };
            request.apply(&mut pricing);
            pricing.insert(&state.db).await?
        }
    };

    info!("Pricing for brand {} saved", brand_id);
    Ok(Json(ApiResponse {
        data: pricing_to_dto(&saved),
        message: "Pricing updated successfully".to_string(),
        success: true,
    }))
}

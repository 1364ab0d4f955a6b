use crate::auth::RequireAdmin;
use crate::error::ApiError;
use crate::schemas::{AppState, CachedData, ErrorResponse, ACTIVE_CATALOG_KEY};
use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::Json,
};
use axum_valid::Valid;
use common::{ApiResponse, BrandDto, ReplacementScheduleDto, MAX_AMOUNT};
use compute::convert::brand_to_dto;
use compute::schedule::{schedule_table, ReplacementSchedule};
use model::entities::{lens_brand, prelude::*};
use rust_decimal::Decimal;
use sea_orm::{ActiveModelTrait, ColumnTrait, EntityTrait, QueryFilter, QueryOrder, Set};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument, trace, warn};
use utoipa::ToSchema;
use validator::Validate;

/// Request body for creating or replacing a catalog brand
#[derive(Debug, Clone, Default, Deserialize, Serialize, ToSchema, Validate)]
pub struct BrandRequest {
    /// Brand name (must be unique)
    #[serde(default)]
    #[validate(length(min = 1, message = "Brand name is required"))]
    pub brand_name: String,
    /// Boxes per year; takes precedence over `replacement_schedule`
    #[validate(range(min = 1, message = "Boxes per year must be at least 1"))]
    pub boxes_per_year: Option<i32>,
    /// `daily`, `weekly`, `biweekly` or `monthly`
    pub replacement_schedule: Option<String>,
    pub competitor_price_per_box: Option<Decimal>,
    pub competitor_annual_rebate: Option<Decimal>,
    pub competitor_semiannual_rebate: Option<Decimal>,
    pub competitor_first_time_discount_percent: Option<Decimal>,
    pub is_active: Option<bool>,
}

/// Catalog fields resolved from a [`BrandRequest`]
struct BrandFields {
    brand_name: String,
    boxes_per_year: i32,
    competitor_price_per_box: Decimal,
    competitor_annual_rebate: Decimal,
    competitor_semiannual_rebate: Decimal,
    competitor_first_time_discount_percent: Decimal,
}

impl BrandRequest {
    fn resolve(&self) -> Result<BrandFields, ApiError> {
        let brand_name = self.brand_name.trim().to_string();
        if brand_name.is_empty() {
            return Err(ApiError::Validation("Brand name is required".to_string()));
        }

        let boxes_per_year = match (self.boxes_per_year, self.replacement_schedule.as_deref()) {
            (Some(boxes), _) => boxes,
            (None, Some(schedule)) => schedule.parse::<ReplacementSchedule>()?.boxes_per_year(),
            (None, None) => {
                return Err(ApiError::Validation(
                    "Brand name and boxes per year are required".to_string(),
                ));
            }
        };
        if boxes_per_year < 1 {
            return Err(ApiError::Validation("Boxes per year must be at least 1".to_string()));
        }

        let amounts = [
            ("competitor_price_per_box", self.competitor_price_per_box),
            ("competitor_annual_rebate", self.competitor_annual_rebate),
            ("competitor_semiannual_rebate", self.competitor_semiannual_rebate),
            ("competitor_first_time_discount_percent", self.competitor_first_time_discount_percent),
        ];
        if let Some((field, _)) = amounts
            .iter()
            .find(|(_, value)| value.is_some_and(|v| v < Decimal::ZERO))
        {
            return Err(ApiError::Validation(format!("{} must not be negative", field)));
        }
        if let Some((field, _)) = amounts
            .iter()
            .find(|(_, value)| value.is_some_and(|v| v > MAX_AMOUNT))
        {
            return Err(ApiError::Validation(format!(
                "{} must not exceed {}",
                field, MAX_AMOUNT
            )));
        }

        Ok(BrandFields {
            brand_name,
            boxes_per_year,
            competitor_price_per_box: self.competitor_price_per_box.unwrap_or_default(),
            competitor_annual_rebate: self.competitor_annual_rebate.unwrap_or_default(),
            competitor_semiannual_rebate: self.competitor_semiannual_rebate.unwrap_or_default(),
            competitor_first_time_discount_percent: self
                .competitor_first_time_discount_percent
                .unwrap_or_default(),
        })
    }
}

fn duplicate_brand(db_err: sea_orm::DbErr, brand_name: &str) -> ApiError {
    ApiError::from_unique_violation(
        db_err,
        format!("Brand '{}' already exists", brand_name),
        "BRAND_ALREADY_EXISTS",
    )
}

/// Active catalog brands ordered by name, served from the cache when possible.
pub async fn load_active_catalog(state: &AppState) -> Result<Vec<BrandDto>, ApiError> {
    if let Some(CachedData::ActiveCatalog(brands)) = state.cache.get(ACTIVE_CATALOG_KEY).await {
        debug!("Returning cached active catalog");
        return Ok(brands);
    }

    let brands: Vec<BrandDto> = LensBrand::find()
        .filter(lens_brand::Column::IsActive.eq(true))
        .order_by_asc(lens_brand::Column::BrandName)
        .all(&state.db)
        .await?
        .iter()
        .map(brand_to_dto)
        .collect();

    state
        .cache
        .insert(ACTIVE_CATALOG_KEY.to_string(), CachedData::ActiveCatalog(brands.clone()))
        .await;
    debug!("Cached {} active brands", brands.len());

    Ok(brands)
}

/// Get the full brand catalog, including inactive brands
#[utoipa::path(
    get,
    path = "/api/v1/admin/brands",
    tag = "admin",
    responses(
        (status = 200, description = "Brands retrieved successfully", body = ApiResponse<Vec<BrandDto>>),
        (status = 401, description = "Missing access token", body = ErrorResponse),
        (status = 403, description = "Not the master admin", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
#[instrument(skip(state, _admin))]
pub async fn get_all_brands(
    State(state): State<AppState>,
    _admin: RequireAdmin,
) -> Result<Json<ApiResponse<Vec<BrandDto>>>, ApiError> {
    trace!("Entering get_all_brands function");

    let brands: Vec<BrandDto> = LensBrand::find()
        .order_by_asc(lens_brand::Column::BrandName)
        .all(&state.db)
        .await?
        .iter()
        .map(brand_to_dto)
        .collect();

    debug!("Retrieved {} brands", brands.len());
    Ok(Json(ApiResponse {
        data: brands,
        message: "Brands retrieved successfully".to_string(),
        success: true,
    }))
}

/// Add a brand to the catalog
#[utoipa::path(
    post,
    path = "/api/v1/admin/brands",
    tag = "admin",
    request_body = BrandRequest,
    responses(
        (status = 201, description = "Brand created successfully", body = ApiResponse<BrandDto>),
        (status = 400, description = "Invalid request or duplicate brand name", body = ErrorResponse),
        (status = 401, description = "Missing access token", body = ErrorResponse),
        (status = 403, description = "Not the master admin", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
#[instrument(skip(state, _admin, request), fields(brand_name = %request.brand_name))]
pub async fn create_brand(
    State(state): State<AppState>,
    _admin: RequireAdmin,
    Valid(Json(request)): Valid<Json<BrandRequest>>,
) -> Result<(StatusCode, Json<ApiResponse<BrandDto>>), ApiError> {
    trace!("Entering create_brand function");

    let fields = request.resolve()?;
    let new_brand = lens_brand::ActiveModel {
        brand_name: Set(fields.brand_name.clone()),
        boxes_per_year: Set(fields.boxes_per_year),
        competitor_price_per_box: Set(fields.competitor_price_per_box),
        competitor_annual_rebate: Set(fields.competitor_annual_rebate),
        competitor_semiannual_rebate: Set(fields.competitor_semiannual_rebate),
        competitor_first_time_discount_percent: Set(fields.competitor_first_time_discount_percent),
        is_active: Set(request.is_active.unwrap_or(true)),
        ..Default::default()
    };

    let brand = new_brand
        .insert(&state.db)
        .await
        .map_err(|e| duplicate_brand(e, &fields.brand_name))?;

    state.cache.invalidate(ACTIVE_CATALOG_KEY).await;
    info!("Brand created with ID: {}, name: {}", brand.id, brand.brand_name);

    Ok((
        StatusCode::CREATED,
        Json(ApiResponse {
            data: brand_to_dto(&brand),
            message: "Brand created successfully".to_string(),
            success: true,
        }),
    ))
}

/// Replace a catalog brand's fields
#[utoipa::path(
    put,
    path = "/api/v1/admin/brands/{brand_id}",
    tag = "admin",
    params(
        ("brand_id" = i32, Path, description = "Brand ID"),
    ),
    request_body = BrandRequest,
    responses(
        (status = 200, description = "Brand updated successfully", body = ApiResponse<BrandDto>),
        (status = 400, description = "Invalid request or duplicate brand name", body = ErrorResponse),
        (status = 401, description = "Missing access token", body = ErrorResponse),
        (status = 403, description = "Not the master admin", body = ErrorResponse),
        (status = 404, description = "Brand not found", body = ErrorResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse)
    )
)]
#[instrument(skip(state, _admin, request))]
pub async fn update_brand(
    Path(brand_id): Path<i32>,
    State(state): State<AppState>,
    _admin: RequireAdmin,
    Valid(Json(request)): Valid<Json<BrandRequest>>,
) -> Result<Json<ApiResponse<BrandDto>>, ApiError> {
    trace!("Entering update_brand function for brand_id: {}", brand_id);

    let fields = request.resolve()?;
    let existing = LensBrand::find_by_id(brand_id)
        .one(&state.db)
        .await?
        .ok_or_else(|| {
            warn!("Brand with ID {} not found", brand_id);
            ApiError::NotFound("Brand not found".to_string())
        })?;

    let is_active = request.is_active.unwrap_or(existing.is_active);
    let mut brand: lens_brand::ActiveModel = existing.into();
    brand.brand_name = Set(fields.brand_name.clone());
    brand.boxes_per_year = Set(fields.boxes_per_year);
    brand.competitor_price_per_box = Set(fields.competitor_price_per_box);
    brand.competitor_annual_rebate = Set(fields.competitor_annual_rebate);
    brand.competitor_semiannual_rebate = Set(fields.competitor_semiannual_rebate);
    brand.competitor_first_time_discount_percent = Set(fields.competitor_first_time_discount_percent);
    brand.is_active = Set(is_active);

    let brand = brand
        .update(&state.db)
        .await
        .map_err(|e| duplicate_brand(e, &fields.brand_name))?;

    state.cache.invalidate(ACTIVE_CATALOG_KEY).await;
    info!("Brand {} updated", brand.id);

    Ok(Json(ApiResponse {
        data: brand_to_dto(&brand),
        message: "Brand updated successfully".to_string(),
        success: true,
    }))
}

/// Replacement schedules and their boxes per year
#[utoipa::path(
    get,
    path = "/api/v1/replacement-schedules",
    tag = "catalog",
    responses(
        (status = 200, description = "Schedules retrieved successfully", body = ApiResponse<Vec<ReplacementScheduleDto>>)
    )
)]
#[instrument]
pub async fn get_replacement_schedules() -> Json<ApiResponse<Vec<ReplacementScheduleDto>>> {
    Json(ApiResponse {
        data: schedule_table(),
        message: "Replacement schedules retrieved successfully".to_string(),
        success: true,
    })
}

//! Common transport-layer types shared between the API, the compute crate
//! and any client. These structs mirror the handlers' request/response
//! payloads so consumers can deserialize API responses without duplicating shapes.

mod comparison;
mod quarter;
mod settings;

pub use comparison::{
    BrandSummary, ComparisonRequest, ComparisonResult, CompetitorBreakdown, PracticeBreakdown,
    PracticeRebatePolicy, SavingsSummary, WearerStatus,
};
pub use quarter::Quarter;
pub use settings::QuarterlyRebates;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Largest monetary amount accepted on input: 99,999,999.99, the widest
/// value a `DECIMAL(10, 2)` column holds.
pub const MAX_AMOUNT: Decimal = Decimal::from_parts(1_410_065_407, 2, 0, false, 2);

/// Generic API response wrapper used by the backend.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ApiResponse<T> {
    /// Response data
    pub data: T,
    /// Response message
    pub message: String,
    /// Success flag
    pub success: bool,
}

// ===================== Catalog =====================

/// Catalog brand as maintained by the master admin.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq)]
pub struct BrandDto {
    pub id: i32,
    pub brand_name: String,
    pub boxes_per_year: i32,
    pub competitor_price_per_box: Decimal,
    pub competitor_annual_rebate: Decimal,
    pub competitor_semiannual_rebate: Decimal,
    pub competitor_first_time_discount_percent: Decimal,
    pub is_active: bool,
}

/// One entry of the replacement-schedule lookup table.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq)]
pub struct ReplacementScheduleDto {
    pub schedule: String,
    pub label: String,
    pub boxes_per_year: i32,
}

// ===================== Practice pricing =====================

/// A practice's own pricing for one brand. Absent fields were never set.
#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema, PartialEq)]
pub struct PracticePricingDto {
    pub price_per_box: Option<Decimal>,
    pub manufacturer_rebate_new: Option<Decimal>,
    pub manufacturer_rebate_existing: Option<Decimal>,
    pub is_active: bool,
}

/// Active catalog brand joined with the requesting practice's pricing, if any.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq)]
pub struct PracticeBrandDto {
    #[serde(flatten)]
    pub brand: BrandDto,
    pub pricing: Option<PracticePricingDto>,
}

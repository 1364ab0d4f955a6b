//! Request and result shapes for the practice-versus-competitor price comparison.
//!
//! The result is produced by the compute crate and rendered by whatever
//! presentation layer consumes the API. Monetary values are carried at full
//! precision; [`ComparisonResult::rounded`] is the only place two-place
//! rounding happens.

use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::quarter::Quarter;

/// Whether the comparison is run for a new or an existing contact-lens wearer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum WearerStatus {
    New,
    Existing,
}

impl WearerStatus {
    pub fn from_new_flag(is_new_wearer: bool) -> Self {
        if is_new_wearer {
            WearerStatus::New
        } else {
            WearerStatus::Existing
        }
    }

    pub fn is_new(&self) -> bool {
        matches!(self, WearerStatus::New)
    }
}

/// How the practice's quarterly rebate takes part in the final amount.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum PracticeRebatePolicy {
    /// The quarterly rebate is reported in the result but not subtracted.
    #[default]
    ReportOnly,
    /// The quarterly rebate is subtracted after the manufacturer rebate.
    Deduct,
}

/// Request body for a price comparison.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct ComparisonRequest {
    /// Catalog brand to compare
    pub brand_id: Option<i32>,
    /// Insurance benefit applied in office (defaults to 0)
    pub insurance_benefit: Option<Decimal>,
    /// Selects the new-wearer rebate columns when true
    #[serde(default)]
    pub is_new_wearer: bool,
}

impl ComparisonRequest {
    pub fn wearer_status(&self) -> WearerStatus {
        WearerStatus::from_new_flag(self.is_new_wearer)
    }

    pub fn insurance_benefit_or_zero(&self) -> Decimal {
        self.insurance_benefit.unwrap_or(Decimal::ZERO)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct BrandSummary {
    pub id: i32,
    pub name: String,
    pub boxes_per_year: i32,
}

/// Cost breakdown when buying from the practice.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct PracticeBreakdown {
    pub price_per_box: Decimal,
    pub subtotal: Decimal,
    /// Quarterly practice rebate for the resolved wearer status
    pub practice_rebate: Decimal,
    pub manufacturer_rebate: Decimal,
    pub insurance_applied: Decimal,
    /// Amount due at the counter: subtotal less insurance, never negative
    pub in_office_today: Decimal,
    pub final_amount_after_rebates: Decimal,
}

/// Cost breakdown when buying from the online competitor.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct CompetitorBreakdown {
    pub name: String,
    pub price_per_box: Decimal,
    pub subtotal: Decimal,
    pub annual_rebate: Decimal,
    pub note: String,
    pub final_amount: Decimal,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct SavingsSummary {
    /// Competitor final amount minus practice final amount; negative when the competitor is cheaper
    pub total_savings: Decimal,
    /// Savings as a percentage of the competitor final amount, 0 when that amount is 0
    pub percentage_savings: Decimal,
}

/// Outcome of one comparison. Never persisted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct ComparisonResult {
    pub brand: BrandSummary,
    pub practice: PracticeBreakdown,
    pub competitor: CompetitorBreakdown,
    pub savings: SavingsSummary,
    pub wearer_status: WearerStatus,
    pub current_quarter: Quarter,
    pub insurance_benefit: Decimal,
    pub practice_rebate_policy: PracticeRebatePolicy,
}

fn round_money(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
}

impl ComparisonResult {
    /// Copy of the result with every amount rounded to two decimal places.
    pub fn rounded(&self) -> Self {
        let mut out = self.clone();

        let p = &mut out.practice;
        p.price_per_box = round_money(p.price_per_box);
        p.subtotal = round_money(p.subtotal);
        p.practice_rebate = round_money(p.practice_rebate);
        p.manufacturer_rebate = round_money(p.manufacturer_rebate);
        p.insurance_applied = round_money(p.insurance_applied);
        p.in_office_today = round_money(p.in_office_today);
        p.final_amount_after_rebates = round_money(p.final_amount_after_rebates);

        let c = &mut out.competitor;
        c.price_per_box = round_money(c.price_per_box);
        c.subtotal = round_money(c.subtotal);
        c.annual_rebate = round_money(c.annual_rebate);
        c.final_amount = round_money(c.final_amount);

        out.savings.total_savings = round_money(out.savings.total_savings);
        out.savings.percentage_savings = round_money(out.savings.percentage_savings);
        out.insurance_benefit = round_money(out.insurance_benefit);

        out
    }
}

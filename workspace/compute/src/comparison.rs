//! Practice-versus-competitor price comparison.
//!
//! [`ComparisonCalculator::compute`] is a pure function over the brand's
//! catalog data, the practice's pricing, the practice's quarterly rebates and
//! the request. Amounts are never rounded here.

use common::{
    BrandDto, BrandSummary, ComparisonRequest, ComparisonResult, CompetitorBreakdown,
    PracticeBreakdown, PracticePricingDto, PracticeRebatePolicy, Quarter, QuarterlyRebates,
    SavingsSummary, MAX_AMOUNT,
};
use rust_decimal::Decimal;
use tracing::{debug, instrument, trace, warn};

use crate::error::{ComputeError, Result};
use crate::lookup::PricingLookup;

pub const DEFAULT_COMPETITOR_NAME: &str = "1-800 Contacts";
pub const COMPETITOR_NOTE: &str = "Out of network - no insurance benefits apply";
pub const NOT_FOUND_MESSAGE: &str = "brand not found or no pricing set";
pub const OUT_OF_RANGE_MESSAGE: &str = "Amount out of range";

fn out_of_range() -> ComputeError {
    ComputeError::Validation(OUT_OF_RANGE_MESSAGE.to_string())
}

/// Everything the calculator needs for one practice and one brand.
#[derive(Debug, Clone, PartialEq)]
pub struct ComparisonInputs {
    pub brand: BrandDto,
    pub pricing: PracticePricingDto,
    /// `None` when the practice never saved quarterly settings
    pub settings: Option<QuarterlyRebates>,
}

/// Computes what a year of lenses costs at the practice versus online.
#[derive(Debug, Clone)]
pub struct ComparisonCalculator {
    competitor_name: String,
    policy: PracticeRebatePolicy,
}

impl Default for ComparisonCalculator {
    fn default() -> Self {
        Self::new(DEFAULT_COMPETITOR_NAME, PracticeRebatePolicy::default())
    }
}

impl ComparisonCalculator {
    pub fn new(competitor_name: impl Into<String>, policy: PracticeRebatePolicy) -> Self {
        Self {
            competitor_name: competitor_name.into(),
            policy,
        }
    }

    pub fn competitor_name(&self) -> &str {
        &self.competitor_name
    }

    pub fn policy(&self) -> PracticeRebatePolicy {
        self.policy
    }

    /// Checks the request on its own and returns the referenced brand id.
    pub fn validate_request(request: &ComparisonRequest) -> Result<i32> {
        let brand_id = request
            .brand_id
            .ok_or_else(|| ComputeError::Validation("Brand ID is required".to_string()))?;

        let insurance = request.insurance_benefit_or_zero();
        if insurance < Decimal::ZERO {
            return Err(ComputeError::Validation(
                "Insurance benefit must not be negative".to_string(),
            ));
        }
        if insurance > MAX_AMOUNT {
            return Err(ComputeError::Validation(format!(
                "Insurance benefit must not exceed {}",
                MAX_AMOUNT
            )));
        }

        Ok(brand_id)
    }

    /// Runs the comparison.
    ///
    /// # Arguments
    ///
    /// * `brand` - Catalog brand, `None` when it does not exist
    /// * `pricing` - The practice's pricing for the brand; inactive pricing counts as missing
    /// * `settings` - The practice's quarterly rebates; `None` means all zero
    /// * `request` - Wearer status and insurance benefit
    /// * `quarter` - Quarter whose practice rebate applies
    ///
    /// # Errors
    ///
    /// `Validation` when the request has no brand id or an insurance benefit
    /// outside `0..=MAX_AMOUNT`, checked before anything else. `NotFound` when
    /// the brand or its active pricing is missing. `Validation` with
    /// [`OUT_OF_RANGE_MESSAGE`] when an amount does not fit in a `Decimal`.
    #[instrument(
        skip(self, brand, pricing, settings, request, quarter),
        fields(brand_id = ?request.brand_id, is_new_wearer = request.is_new_wearer, quarter = %quarter)
    )]
    pub fn compute(
        &self,
        brand: Option<&BrandDto>,
        pricing: Option<&PracticePricingDto>,
        settings: Option<&QuarterlyRebates>,
        request: &ComparisonRequest,
        quarter: Quarter,
    ) -> Result<ComparisonResult> {
        trace!("Entering ComparisonCalculator::compute");

        Self::validate_request(request)?;

        let (brand, pricing) = match (brand, pricing.filter(|p| p.is_active)) {
            (Some(brand), Some(pricing)) => (brand, pricing),
            _ => {
                warn!("No brand or active pricing for comparison");
                return Err(ComputeError::NotFound(NOT_FOUND_MESSAGE.to_string()));
            }
        };

        let wearer_status = request.wearer_status();
        let insurance = request.insurance_benefit_or_zero();
        let boxes = Decimal::from(brand.boxes_per_year);

        let practice_rebate = settings
            .map(|s| s.rebate_for(quarter, wearer_status))
            .unwrap_or(Decimal::ZERO);
        let manufacturer_rebate = if wearer_status.is_new() {
            pricing.manufacturer_rebate_new
        } else {
            pricing.manufacturer_rebate_existing
        }
        .unwrap_or(Decimal::ZERO);

        let price_per_box = pricing.price_per_box.unwrap_or(Decimal::ZERO);
        let practice_subtotal = price_per_box.checked_mul(boxes).ok_or_else(out_of_range)?;
        let competitor_subtotal = brand
            .competitor_price_per_box
            .checked_mul(boxes)
            .ok_or_else(out_of_range)?;

        let in_office_today = practice_subtotal
            .checked_sub(insurance)
            .ok_or_else(out_of_range)?
            .max(Decimal::ZERO);
        let mut practice_final = in_office_today
            .checked_sub(manufacturer_rebate)
            .ok_or_else(out_of_range)?
            .max(Decimal::ZERO);
        if self.policy == PracticeRebatePolicy::Deduct {
            practice_final = practice_final
                .checked_sub(practice_rebate)
                .ok_or_else(out_of_range)?
                .max(Decimal::ZERO);
        }

        let competitor_final = competitor_subtotal
            .checked_sub(brand.competitor_annual_rebate)
            .ok_or_else(out_of_range)?
            .max(Decimal::ZERO);

        let total_savings = competitor_final
            .checked_sub(practice_final)
            .ok_or_else(out_of_range)?;
        let percentage_savings = if competitor_final > Decimal::ZERO {
            total_savings
                .checked_div(competitor_final)
                .and_then(|ratio| ratio.checked_mul(Decimal::ONE_HUNDRED))
                .ok_or_else(out_of_range)?
        } else {
            Decimal::ZERO
        };

        debug!(
            %practice_subtotal,
            %practice_final,
            %competitor_final,
            %total_savings,
            "Computed comparison for brand {}",
            brand.brand_name
        );

        Ok(ComparisonResult {
            brand: BrandSummary {
                id: brand.id,
                name: brand.brand_name.clone(),
                boxes_per_year: brand.boxes_per_year,
            },
            practice: PracticeBreakdown {
                price_per_box,
                subtotal: practice_subtotal,
                practice_rebate,
                manufacturer_rebate,
                insurance_applied: insurance,
                in_office_today,
                final_amount_after_rebates: practice_final,
            },
            competitor: CompetitorBreakdown {
                name: self.competitor_name.clone(),
                price_per_box: brand.competitor_price_per_box,
                subtotal: competitor_subtotal,
                annual_rebate: brand.competitor_annual_rebate,
                note: COMPETITOR_NOTE.to_string(),
                final_amount: competitor_final,
            },
            savings: SavingsSummary {
                total_savings,
                percentage_savings,
            },
            wearer_status,
            current_quarter: quarter,
            insurance_benefit: insurance,
            practice_rebate_policy: self.policy,
        })
    }
}

/// Validates the request, loads the practice's inputs and runs the calculator.
///
/// A request without a brand id is rejected before the lookup is touched.
/// Lookup failures are returned unchanged.
#[instrument(skip(lookup, calculator, request), fields(brand_id = ?request.brand_id))]
pub async fn compare_for_practice<L>(
    lookup: &L,
    calculator: &ComparisonCalculator,
    practice_id: i32,
    request: &ComparisonRequest,
    quarter: Quarter,
) -> Result<ComparisonResult>
where
    L: PricingLookup + ?Sized,
{
    trace!("Entering compare_for_practice");

    let brand_id = ComparisonCalculator::validate_request(request)?;
    let inputs = lookup.find_comparison_inputs(practice_id, brand_id).await?;

    calculator.compute(
        inputs.as_ref().map(|i| &i.brand),
        inputs.as_ref().map(|i| &i.pricing),
        inputs.as_ref().and_then(|i| i.settings.as_ref()),
        request,
        quarter,
    )
}

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::comparison::WearerStatus;
use crate::quarter::Quarter;

/// A practice's own rebates, one per wearer status and fiscal quarter.
///
/// Omitted values deserialize to zero, and a practice that never saved
/// settings behaves as if every value were zero.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(default)]
pub struct QuarterlyRebates {
    pub new_wearer_rebate_q1: Decimal,
    pub new_wearer_rebate_q2: Decimal,
    pub new_wearer_rebate_q3: Decimal,
    pub new_wearer_rebate_q4: Decimal,
    pub existing_wearer_rebate_q1: Decimal,
    pub existing_wearer_rebate_q2: Decimal,
    pub existing_wearer_rebate_q3: Decimal,
    pub existing_wearer_rebate_q4: Decimal,
}

impl QuarterlyRebates {
    /// Rebate configured for the given quarter and wearer status.
    pub fn rebate_for(&self, quarter: Quarter, wearer: WearerStatus) -> Decimal {
        match (wearer, quarter) {
            (WearerStatus::New, Quarter::Q1) => self.new_wearer_rebate_q1,
            (WearerStatus::New, Quarter::Q2) => self.new_wearer_rebate_q2,
            (WearerStatus::New, Quarter::Q3) => self.new_wearer_rebate_q3,
            (WearerStatus::New, Quarter::Q4) => self.new_wearer_rebate_q4,
            (WearerStatus::Existing, Quarter::Q1) => self.existing_wearer_rebate_q1,
            (WearerStatus::Existing, Quarter::Q2) => self.existing_wearer_rebate_q2,
            (WearerStatus::Existing, Quarter::Q3) => self.existing_wearer_rebate_q3,
            (WearerStatus::Existing, Quarter::Q4) => self.existing_wearer_rebate_q4,
        }
    }

    /// Names of the fields holding a negative amount.
    pub fn negative_fields(&self) -> Vec<&'static str> {
        [
            ("new_wearer_rebate_q1", self.new_wearer_rebate_q1),
            ("new_wearer_rebate_q2", self.new_wearer_rebate_q2),
            ("new_wearer_rebate_q3", self.new_wearer_rebate_q3),
            ("new_wearer_rebate_q4", self.new_wearer_rebate_q4),
            ("existing_wearer_rebate_q1", self.existing_wearer_rebate_q1),
            ("existing_wearer_rebate_q2", self.existing_wearer_rebate_q2),
            ("existing_wearer_rebate_q3", self.existing_wearer_rebate_q3),
            ("existing_wearer_rebate_q4", self.existing_wearer_rebate_q4),
        ]
        .into_iter()
        .filter(|(_, value)| value.is_sign_negative() && !value.is_zero())
        .map(|(name, _)| name)
        .collect()
    }
}

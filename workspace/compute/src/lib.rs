pub mod clock;
pub mod comparison;
pub mod convert;
pub mod error;
pub mod lookup;
pub mod schedule;

use common::PracticeRebatePolicy;
use comparison::{ComparisonCalculator, DEFAULT_COMPETITOR_NAME};

/// Returns a default pre-configured calculator that will be used most of the time.
///
/// It compares against the default online competitor and only reports the
/// practice's quarterly rebate, without subtracting it.
pub fn default_calculator() -> ComparisonCalculator {
    ComparisonCalculator::new(DEFAULT_COMPETITOR_NAME, PracticeRebatePolicy::ReportOnly)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_calculator() {
        let calculator = default_calculator();
        assert_eq!(calculator.competitor_name(), "1-800 Contacts");
        assert_eq!(calculator.policy(), PracticeRebatePolicy::ReportOnly);
    }
}

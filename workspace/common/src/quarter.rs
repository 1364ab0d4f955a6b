use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};
use std::fmt;
use utoipa::ToSchema;

/// Fiscal quarter used to pick a practice's quarterly rebate.
///
/// Quarters follow calendar months: January-March is `Q1`, April-June `Q2`,
/// July-September `Q3` and October-December `Q4`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum Quarter {
    Q1,
    Q2,
    Q3,
    Q4,
}

impl Quarter {
    /// All quarters in calendar order.
    pub const ALL: [Quarter; 4] = [Quarter::Q1, Quarter::Q2, Quarter::Q3, Quarter::Q4];

    /// Maps a calendar month (1-12) to its quarter.
    ///
    /// Returns `None` for months outside `1..=12`.
    pub fn from_month(month: u32) -> Option<Self> {
        match month {
            1..=3 => Some(Quarter::Q1),
            4..=6 => Some(Quarter::Q2),
            7..=9 => Some(Quarter::Q3),
            10..=12 => Some(Quarter::Q4),
            _ => None,
        }
    }

    /// Quarter containing the given calendar date.
    pub fn from_date(date: NaiveDate) -> Self {
        match Self::from_month(date.month()) {
            Some(quarter) => quarter,
            None => unreachable!("chrono months are always 1-12"),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Quarter::Q1 => "q1",
            Quarter::Q2 => "q2",
            Quarter::Q3 => "q3",
            Quarter::Q4 => "q4",
        }
    }
}

impl fmt::Display for Quarter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_month_range_boundaries() {
        let cases = [
            (1, Quarter::Q1),
            (3, Quarter::Q1),
            (4, Quarter::Q2),
            (6, Quarter::Q2),
            (7, Quarter::Q3),
            (9, Quarter::Q3),
            (10, Quarter::Q4),
            (12, Quarter::Q4),
        ];

        for (month, expected) in cases {
            assert_eq!(Quarter::from_month(month), Some(expected), "month {}", month);
        }
    }

    #[test]
    fn test_from_month_rejects_out_of_range() {
        assert_eq!(Quarter::from_month(0), None);
        assert_eq!(Quarter::from_month(13), None);
    }

    #[test]
    fn test_every_month_maps_to_a_quarter() {
        let mapped: Vec<Quarter> = (1..=12).filter_map(Quarter::from_month).collect();
        assert_eq!(mapped.len(), 12);
        for quarter in Quarter::ALL {
            assert_eq!(mapped.iter().filter(|q| **q == quarter).count(), 3);
        }
    }

    #[test]
    fn test_from_date_agrees_with_from_month() {
        for month in 1..=12 {
            let date = NaiveDate::from_ymd_opt(2024, month, 15).unwrap();
            assert_eq!(Some(Quarter::from_date(date)), Quarter::from_month(month));
        }
        let new_year = NaiveDate::from_ymd_opt(2025, 1, 1).unwrap();
        let year_end = NaiveDate::from_ymd_opt(2024, 12, 31).unwrap();
        assert_eq!(Quarter::from_date(new_year), Quarter::Q1);
        assert_eq!(Quarter::from_date(year_end), Quarter::Q4);
    }

    #[test]
    fn test_serializes_lowercase() {
        assert_eq!(serde_json::to_string(&Quarter::Q3).unwrap(), "\"q3\"");
        let parsed: Quarter = serde_json::from_str("\"q4\"").unwrap();
        assert_eq!(parsed, Quarter::Q4);
        assert_eq!(Quarter::Q2.to_string(), "q2");
    }
}

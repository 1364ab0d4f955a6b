//! Replacement schedules and how many boxes each one consumes per year.
//!
//! This is the single table consulted when a brand is created or updated with
//! a schedule instead of an explicit box count, and the one the API exposes.

use common::ReplacementScheduleDto;
use std::fmt;
use std::str::FromStr;

use crate::error::ComputeError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ReplacementSchedule {
    Daily,
    Weekly,
    Biweekly,
    Monthly,
}

impl ReplacementSchedule {
    pub const ALL: [ReplacementSchedule; 4] = [
        ReplacementSchedule::Daily,
        ReplacementSchedule::Weekly,
        ReplacementSchedule::Biweekly,
        ReplacementSchedule::Monthly,
    ];

    pub fn boxes_per_year(&self) -> i32 {
        match self {
            ReplacementSchedule::Daily => 12,
            ReplacementSchedule::Weekly => 9,
            ReplacementSchedule::Biweekly => 4,
            ReplacementSchedule::Monthly => 4,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ReplacementSchedule::Daily => "daily",
            ReplacementSchedule::Weekly => "weekly",
            ReplacementSchedule::Biweekly => "biweekly",
            ReplacementSchedule::Monthly => "monthly",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            ReplacementSchedule::Daily => "Daily",
            ReplacementSchedule::Weekly => "Weekly",
            ReplacementSchedule::Biweekly => "Bi-weekly",
            ReplacementSchedule::Monthly => "Monthly",
        }
    }
}

impl fmt::Display for ReplacementSchedule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ReplacementSchedule {
    type Err = ComputeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "daily" => Ok(ReplacementSchedule::Daily),
            "weekly" => Ok(ReplacementSchedule::Weekly),
            "biweekly" | "bi-weekly" => Ok(ReplacementSchedule::Biweekly),
            "monthly" => Ok(ReplacementSchedule::Monthly),
            other => Err(ComputeError::Validation(format!(
                "Unknown replacement schedule '{}'",
                other
            ))),
        }
    }
}

/// The whole schedule table, in display order.
pub fn schedule_table() -> Vec<ReplacementScheduleDto> {
    ReplacementSchedule::ALL
        .iter()
        .map(|schedule| ReplacementScheduleDto {
            schedule: schedule.as_str().to_string(),
            label: schedule.label().to_string(),
            boxes_per_year: schedule.boxes_per_year(),
        })
        .collect()
}

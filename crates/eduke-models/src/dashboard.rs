//! Dashboard aggregates and the date-range filter.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Headline counts shown on the dashboard cards.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DashboardStats {
    #[serde(default)]
    pub total_students: i64,
    #[serde(default)]
    pub total_classes: i64,
    #[serde(default)]
    pub total_subjects: i64,
    /// Mean assessment score as a percentage
    #[serde(default)]
    pub avg_grade: f64,
}

/// Fee collection summary for a date range.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FinancialReport {
    #[serde(default)]
    pub total_revenue: f64,
    #[serde(default)]
    pub total_expenses: f64,
    #[serde(default)]
    pub total_profit: f64,
    #[serde(default)]
    pub revenue_by_date: Vec<RevenuePoint>,
}

impl FinancialReport {
    /// Collected fees less recorded expenses.
    pub fn net_balance(&self) -> f64 {
        self.total_profit - self.total_expenses
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RevenuePoint {
    pub date: NaiveDate,
    pub revenue: f64,
}

/// Reporting window selectable on the dashboard.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum DateRange {
    #[serde(rename = "today")]
    Today,
    #[default]
    #[serde(rename = "30days")]
    Last30Days,
    #[serde(rename = "quarter")]
    Quarter,
}

impl DateRange {
    pub const ALL: [DateRange; 3] = [DateRange::Today, DateRange::Last30Days, DateRange::Quarter];

    pub const fn as_str(self) -> &'static str {
        match self {
            DateRange::Today => "today",
            DateRange::Last30Days => "30days",
            DateRange::Quarter => "quarter",
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            DateRange::Today => "Today",
            DateRange::Last30Days => "Last 30 Days",
            DateRange::Quarter => "Last 3 Months",
        }
    }

    /// Number of days the financial report covers.
    pub const fn days(self) -> u32 {
        match self {
            DateRange::Today => 1,
            DateRange::Last30Days => 30,
            DateRange::Quarter => 90,
        }
    }

    /// The collection trend chart is hidden for single-day ranges.
    pub const fn shows_trend(self) -> bool {
        !matches!(self, DateRange::Today)
    }
}

impl fmt::Display for DateRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown date range: {0:?}")]
pub struct UnknownDateRange(pub String);

impl FromStr for DateRange {
    type Err = UnknownDateRange;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        DateRange::ALL
            .into_iter()
            .find(|range| range.as_str() == s)
            .ok_or_else(|| UnknownDateRange(s.to_string()))
    }
}

//! Reports
//!
//! [`Aggregates`] computes monthly totals, category breakdowns, the rolling
//! series and budget alerts from a snapshot of the data. [`MonthReport`]
//! bundles them for a single month.

pub mod aggregates;
pub mod monthly;

pub use aggregates::{
    Aggregates, BudgetAlert, BudgetStatus, CategoryShare, CategoryUsage, MonthlyTotals,
    ALERT_THRESHOLD_PERCENT, DEFAULT_SERIES_WINDOW, MAX_SERIES_WINDOW,
};
pub use monthly::MonthReport;

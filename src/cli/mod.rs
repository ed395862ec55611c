//! CLI command handlers
//!
//! Bridges clap argument parsing with the service layer. Handlers print to
//! stdout and return errors for `main` to report.

pub mod category;
pub mod export;
pub mod report;
pub mod theme;
pub mod transaction;

use clap::ValueEnum;

pub use category::{handle_category_command, CategoryCommands};
pub use export::{handle_export_command, ExportCommands};
pub use report::{handle_report_command, ReportCommands};
pub use theme::handle_theme_command;
pub use transaction::{handle_transaction_command, TransactionCommands};

use crate::error::{FinanceError, FinanceResult};
use crate::models::{CategoryKind, Money, Month, TransactionKind};

/// Transaction type argument
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum KindArg {
    Income,
    Expense,
}

impl From<KindArg> for TransactionKind {
    fn from(arg: KindArg) -> Self {
        match arg {
            KindArg::Income => TransactionKind::Income,
            KindArg::Expense => TransactionKind::Expense,
        }
    }
}

/// Category type argument
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum CategoryKindArg {
    Income,
    Expense,
    Both,
}

impl From<CategoryKindArg> for CategoryKind {
    fn from(arg: CategoryKindArg) -> Self {
        match arg {
            CategoryKindArg::Income => CategoryKind::Income,
            CategoryKindArg::Expense => CategoryKind::Expense,
            CategoryKindArg::Both => CategoryKind::Both,
        }
    }
}

/// Parse `--month`, defaulting to the current month
pub fn resolve_month(arg: Option<&str>) -> FinanceResult<Month> {
    match arg {
        Some(s) => Month::parse(s).map_err(|e| FinanceError::Validation(e.to_string())),
        None => Ok(Month::current()),
    }
}

/// Parse a user-entered amount such as "30", "30.5" or "$30.50"
pub fn parse_amount(s: &str) -> FinanceResult<Money> {
    Money::parse(s).map_err(|e| {
        FinanceError::Validation(format!(
            "Invalid amount '{}'. Use a number like '30' or '30.50'. Error: {}",
            s, e
        ))
    })
}

/// Today's date as `YYYY-MM-DD`
pub fn today() -> String {
    chrono::Local::now().date_naive().format("%Y-%m-%d").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_month() {
        assert_eq!(
            resolve_month(Some("2025-01")).unwrap(),
            Month::new(2025, 1).unwrap()
        );
        assert!(resolve_month(Some("January")).unwrap_err().is_validation());
        assert_eq!(resolve_month(None).unwrap(), Month::current());
    }

    #[test]
    fn test_parse_amount() {
        assert_eq!(parse_amount("30.5").unwrap(), Money::from_cents(3050));
        assert!(parse_amount("abc").unwrap_err().is_validation());
    }
}

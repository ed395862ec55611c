//! Report CLI commands

use clap::Subcommand;

use crate::config::settings::Settings;
use crate::display::report::{format_alerts, format_breakdown, format_series};
use crate::error::{FinanceError, FinanceResult};
use crate::models::TransactionKind;
use crate::reports::{Aggregates, MonthReport, MAX_SERIES_WINDOW};
use crate::storage::Storage;

use super::{resolve_month, KindArg};

/// Report subcommands
#[derive(Subcommand)]
pub enum ReportCommands {
    /// Income, expenses, net and breakdowns for a month
    Summary {
        /// Month (YYYY-MM), defaults to the current month
        #[arg(short, long)]
        month: Option<String>,
    },
    /// Income and expenses over consecutive months
    Series {
        /// Last month of the series (YYYY-MM), defaults to the current month
        #[arg(short, long)]
        month: Option<String>,
        /// Number of months (defaults to the configured window)
        #[arg(short = 'n', long)]
        months: Option<usize>,
    },
    /// Totals per category
    Breakdown {
        /// Month (YYYY-MM), defaults to the current month
        #[arg(short, long)]
        month: Option<String>,
        /// Income or expense side
        #[arg(short = 't', long = "type", value_enum, default_value = "expense")]
        kind: KindArg,
    },
    /// Budgets more than 80% spent
    Alerts {
        /// Month (YYYY-MM), defaults to the current month
        #[arg(short, long)]
        month: Option<String>,
    },
}

/// Handle a report command
pub fn handle_report_command(
    storage: &Storage,
    settings: &Settings,
    cmd: ReportCommands,
) -> FinanceResult<()> {
    let transactions = storage.transactions.get_all()?;
    let categories = storage.categories.get_all()?;
    let currency = settings.currency_symbol.as_str();

    match cmd {
        ReportCommands::Summary { month } => {
            let month = resolve_month(month.as_deref())?;
            let report = MonthReport::generate(&transactions, &categories, month);
            print!("{}", report.format_terminal(currency));
        }

        ReportCommands::Series { month, months } => {
            let window = months.unwrap_or(settings.series_window);
            if window == 0 || window > MAX_SERIES_WINDOW {
                return Err(FinanceError::Validation(format!(
                    "Number of months must be between 1 and {}",
                    MAX_SERIES_WINDOW
                )));
            }

            let month = resolve_month(month.as_deref())?;
            let agg = Aggregates::new(&transactions, &categories, month);
            print!("{}", format_series(&agg.monthly_series(window), currency));
        }

        ReportCommands::Breakdown { month, kind } => {
            let month = resolve_month(month.as_deref())?;
            let agg = Aggregates::new(&transactions, &categories, month);
            let kind: TransactionKind = kind.into();

            println!("{} by category, {}", kind, month.long_label());
            print!(
                "{}",
                format_breakdown(&agg.category_breakdown(None, kind), currency)
            );
        }

        ReportCommands::Alerts { month } => {
            let month = resolve_month(month.as_deref())?;
            let agg = Aggregates::new(&transactions, &categories, month);
            print!("{}", format_alerts(&agg.budget_alerts(), currency));
        }
    }

    Ok(())
}

//! Category CLI commands

use clap::Subcommand;

use crate::config::settings::Settings;
use crate::display::category::format_category_list;
use crate::error::FinanceResult;
use crate::models::{CategoryInput, FALLBACK_COLOR};
use crate::reports::Aggregates;
use crate::services::CategoryService;
use crate::storage::Storage;

use super::{parse_amount, resolve_month, CategoryKindArg};

/// Category subcommands
#[derive(Subcommand)]
pub enum CategoryCommands {
    /// Create a category
    Add {
        /// Category name
        name: String,
        /// Hex color (#RRGGBB)
        #[arg(short, long, default_value = FALLBACK_COLOR)]
        color: String,
        /// Monthly budget (expense categories only)
        #[arg(short, long)]
        budget: Option<String>,
        /// Which transactions the category applies to
        #[arg(short = 't', long = "type", value_enum, default_value = "expense")]
        kind: CategoryKindArg,
    },
    /// List categories with spending and budget usage
    List {
        /// Month (YYYY-MM), defaults to the current month
        #[arg(short, long)]
        month: Option<String>,
    },
}

/// Handle a category command
pub fn handle_category_command(
    storage: &Storage,
    settings: &Settings,
    cmd: CategoryCommands,
) -> FinanceResult<()> {
    let service = CategoryService::new(storage);

    match cmd {
        CategoryCommands::Add {
            name,
            color,
            budget,
            kind,
        } => {
            let mut input = CategoryInput::new(name, color, kind.into());
            if let Some(budget) = budget {
                input = input.with_budget(parse_amount(&budget)?);
            }

            let category = service.add(input)?;
            println!("Created category: {} ({})", category.name, category.id);
            if let Some(budget) = category.budget {
                println!(
                    "  Monthly budget: {}",
                    budget.format_with_symbol(&settings.currency_symbol)
                );
            }
        }

        CategoryCommands::List { month } => {
            let month = resolve_month(month.as_deref())?;
            let transactions = storage.transactions.get_all()?;
            let categories = service.list()?;
            let agg = Aggregates::new(&transactions, &categories, month);

            println!("Categories ({})", month.long_label());
            print!(
                "{}",
                format_category_list(&agg.category_usage(), &settings.currency_symbol)
            );
        }
    }

    Ok(())
}

//! Transaction CLI commands

use clap::Subcommand;

use crate::config::settings::Settings;
use crate::display::transaction::{format_transaction_details, format_transaction_table};
use crate::error::{FinanceError, FinanceResult};
use crate::models::{Money, TransactionInput};
use crate::services::TransactionService;
use crate::storage::Storage;

use super::{parse_amount, resolve_month, today, KindArg};

/// Transaction subcommands
#[derive(Subcommand)]
pub enum TransactionCommands {
    /// Record a new transaction
    Add {
        /// What the money was for
        description: String,
        /// Amount (e.g., "30" or "30.50")
        amount: String,
        /// Category name
        #[arg(short, long)]
        category: String,
        /// Date (YYYY-MM-DD), defaults to today
        #[arg(short, long)]
        date: Option<String>,
        /// Income or expense
        #[arg(short = 't', long = "type", value_enum, default_value = "expense")]
        kind: KindArg,
    },
    /// List transactions for a month
    List {
        /// Month (YYYY-MM), defaults to the current month
        #[arg(short, long)]
        month: Option<String>,
        /// List every month
        #[arg(short, long, conflicts_with = "month")]
        all: bool,
    },
    /// Show transaction details
    Show {
        /// Transaction ID or ID prefix
        id: String,
    },
    /// Edit a transaction; omitted fields keep their value
    Edit {
        /// Transaction ID or ID prefix
        id: String,
        #[arg(long)]
        description: Option<String>,
        #[arg(short, long)]
        amount: Option<String>,
        #[arg(short, long)]
        category: Option<String>,
        #[arg(short, long)]
        date: Option<String>,
        #[arg(short = 't', long = "type", value_enum)]
        kind: Option<KindArg>,
    },
    /// Delete a transaction
    Delete {
        /// Transaction ID or ID prefix
        id: String,
    },
}

/// Handle a transaction command
pub fn handle_transaction_command(
    storage: &Storage,
    settings: &Settings,
    cmd: TransactionCommands,
) -> FinanceResult<()> {
    let service = TransactionService::new(storage);
    let currency = settings.currency_symbol.as_str();
    let categories = storage.categories.get_all()?;

    match cmd {
        TransactionCommands::Add {
            description,
            amount,
            category,
            date,
            kind,
        } => {
            let input = TransactionInput::new(
                description,
                parse_amount(&amount)?,
                category,
                date.unwrap_or_else(today),
                kind.into(),
            );

            let txn = service.add(input)?;
            println!("Added transaction: {}", txn.id);
            print!("{}", format_transaction_details(&txn, &categories, currency));
        }

        TransactionCommands::List { month, all } => {
            let month = if all {
                None
            } else {
                Some(resolve_month(month.as_deref())?)
            };

            let transactions = service.list(month)?;
            if let Some(month) = month {
                println!("Transactions for {}", month.long_label());
            }
            print!("{}", format_transaction_table(&transactions, &categories, currency));

            let net: Money = transactions.iter().map(|t| t.signed_amount()).sum();
            println!(
                "{} transactions, net {}",
                transactions.len(),
                net.format_with_symbol(currency)
            );
        }

        TransactionCommands::Show { id } => {
            let txn = service
                .find(&id)?
                .ok_or_else(|| FinanceError::transaction_not_found(&id))?;
            print!("{}", format_transaction_details(&txn, &categories, currency));
        }

        TransactionCommands::Edit {
            id,
            description,
            amount,
            category,
            date,
            kind,
        } => {
            let txn = service
                .find(&id)?
                .ok_or_else(|| FinanceError::transaction_not_found(&id))?;

            let mut input = txn.to_input();
            let mut changed = false;

            if let Some(description) = description {
                input.description = description;
                changed = true;
            }
            if let Some(amount) = amount {
                input.amount = parse_amount(&amount)?;
                changed = true;
            }
            if let Some(category) = category {
                input.category = category;
                changed = true;
            }
            if let Some(date) = date {
                input.date = date;
                changed = true;
            }
            if let Some(kind) = kind {
                input.kind = kind.into();
                changed = true;
            }

            if !changed {
                println!("No changes specified.");
                return Ok(());
            }

            let updated = service
                .update(&txn.id, input)?
                .ok_or_else(|| FinanceError::transaction_not_found(txn.id.as_str()))?;
            println!("Updated transaction: {}", updated.id);
            print!("{}", format_transaction_details(&updated, &categories, currency));
        }

        TransactionCommands::Delete { id } => {
            let txn = service
                .find(&id)?
                .ok_or_else(|| FinanceError::transaction_not_found(&id))?;

            service.delete(&txn.id)?;
            println!("Deleted transaction: {} ({})", txn.description, txn.id);
        }
    }

    Ok(())
}

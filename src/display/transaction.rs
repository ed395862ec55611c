//! Transaction display formatting

use tabled::settings::Style;
use tabled::{Table, Tabled};

use crate::models::{color_for, Category, Transaction};

use super::report::truncate;

/// Characters of the ID shown in tables; enough for `--id` prefixes
const SHORT_ID_LEN: usize = 8;

#[derive(Tabled)]
struct TransactionRow {
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "Date")]
    date: String,
    #[tabled(rename = "Description")]
    description: String,
    #[tabled(rename = "Category")]
    category: String,
    #[tabled(rename = "Color")]
    color: String,
    #[tabled(rename = "Amount")]
    amount: String,
}

impl TransactionRow {
    fn new(txn: &Transaction, categories: &[Category], currency_symbol: &str) -> Self {
        Self {
            id: txn.id.as_str().chars().take(SHORT_ID_LEN).collect(),
            date: txn.date.clone(),
            description: truncate(&txn.description, 30),
            category: truncate(&txn.category, 18),
            color: color_for(categories, &txn.category).to_string(),
            amount: txn.signed_amount().format_with_symbol(currency_symbol),
        }
    }
}

/// Format transactions as a table; expenses are shown negative
///
/// Category names that match no category get the fallback color.
pub fn format_transaction_table(
    transactions: &[Transaction],
    categories: &[Category],
    currency_symbol: &str,
) -> String {
    if transactions.is_empty() {
        return "No transactions found.\n".to_string();
    }

    let rows: Vec<_> = transactions
        .iter()
        .map(|txn| TransactionRow::new(txn, categories, currency_symbol))
        .collect();

    let mut table = Table::new(rows);
    table.with(Style::rounded());
    format!("{}\n", table)
}

/// Format transaction details for display
pub fn format_transaction_details(
    txn: &Transaction,
    categories: &[Category],
    currency_symbol: &str,
) -> String {
    let mut output = String::new();

    output.push_str(&format!("Transaction: {}\n", txn.id));
    output.push_str(&format!("Date:        {}\n", txn.date));
    output.push_str(&format!("Description: {}\n", txn.description));
    output.push_str(&format!(
        "Category:    {} ({})\n",
        txn.category,
        color_for(categories, &txn.category)
    ));
    output.push_str(&format!("Type:        {}\n", txn.kind));
    output.push_str(&format!(
        "Amount:      {}\n",
        txn.amount.format_with_symbol(currency_symbol)
    ));

    output
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{default_categories, Money, TransactionId, TransactionInput, FALLBACK_COLOR};

    fn lunch() -> Transaction {
        Transaction::with_id(
            TransactionId::from("0123456789abcdef"),
            TransactionInput::expense("Lunch", Money::from_cents(3000), "Food", "2025-01-15"),
        )
    }

    #[test]
    fn test_table() {
        let output = format_transaction_table(&[lunch()], &default_categories(), "$");
        assert!(output.contains("Description"));
        assert!(output.contains("#10B981"));
        assert!(output.contains("01234567"));
        assert!(!output.contains("0123456789abcdef"));
        assert!(output.contains("-$30.00"));
    }

    #[test]
    fn test_empty_table() {
        assert_eq!(format_transaction_table(&[], &[], "$"), "No transactions found.\n");
    }

    #[test]
    fn test_details() {
        let output = format_transaction_details(&lunch(), &default_categories(), "$");
        assert!(output.contains("Transaction: 0123456789abcdef"));
        assert!(output.contains("Category:    Food (#10B981)"));
        assert!(output.contains("Type:        Expense"));
        assert!(output.contains("Amount:      $30.00"));
    }

    #[test]
    fn test_orphaned_category_uses_fallback_color() {
        let txn = Transaction::new(TransactionInput::expense(
            "Plant",
            Money::from_cents(1200),
            "Garden",
            "2025-01-20",
        ));
        let categories = default_categories();

        let details = format_transaction_details(&txn, &categories, "$");
        assert!(details.contains(&format!("Category:    Garden ({})", FALLBACK_COLOR)));

        let table = format_transaction_table(&[txn], &categories, "$");
        assert!(table.contains(FALLBACK_COLOR));
    }
}

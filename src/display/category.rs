//! Category display formatting
//!
//! Categories are listed as a tree grouped by type, each with this month's
//! spending and, when budgeted, how much of the budget is used.

use crate::models::CategoryKind;
use crate::reports::{BudgetStatus, CategoryUsage};

use super::report::{format_bar, format_percentage};

fn status_label(status: BudgetStatus) -> &'static str {
    match status {
        BudgetStatus::OnTrack => "",
        BudgetStatus::Warning => " (near limit)",
        BudgetStatus::Exceeded => " (exceeded)",
    }
}

fn format_usage_line(usage: &CategoryUsage, currency_symbol: &str) -> String {
    let category = &usage.category;
    let mut line = format!(
        "{:<18} {:<8} {:>12}",
        category.name,
        category.color,
        usage.spent.format_with_symbol(currency_symbol)
    );

    match (category.effective_budget(), usage.percentage, usage.status) {
        (Some(budget), Some(pct), Some(status)) => line.push_str(&format!(
            " / {:<10} {} {}{}",
            budget.format_with_symbol(currency_symbol),
            format_bar(pct.min(100.0), 100.0, 10),
            format_percentage(pct),
            status_label(status)
        )),
        _ => {
            if usage.transaction_count > 0 {
                line.push_str(&format!("  ({} transactions)", usage.transaction_count));
            }
        }
    }

    line
}

/// Format categories grouped by type
pub fn format_category_list(usages: &[CategoryUsage], currency_symbol: &str) -> String {
    if usages.is_empty() {
        return "No categories found.\n\nRun 'finance init' to create default categories.\n"
            .to_string();
    }

    let sections = [
        (CategoryKind::Expense, "Expense"),
        (CategoryKind::Income, "Income"),
        (CategoryKind::Both, "Income & Expense"),
    ];

    let mut output = String::new();
    for (kind, title) in sections {
        let members: Vec<_> = usages.iter().filter(|u| u.category.kind == kind).collect();
        if members.is_empty() {
            continue;
        }

        if !output.is_empty() {
            output.push('\n');
        }
        output.push_str(&format!("{}\n", title));

        for (i, usage) in members.iter().enumerate() {
            let prefix = if i == members.len() - 1 { "└── " } else { "├── " };
            output.push_str(&format!(
                "  {}{}\n",
                prefix,
                format_usage_line(usage, currency_symbol)
            ));
        }
    }

    output
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{default_categories, Money, Month, Transaction, TransactionInput};
    use crate::reports::Aggregates;

    #[test]
    fn test_category_list() {
        let mut categories = default_categories();
        categories[0].budget = Some(Money::from_cents(4000));
        let transactions = vec![Transaction::new(TransactionInput::expense(
            "Lunch",
            Money::from_cents(5050),
            "Food",
            "2025-01-15",
        ))];
        let agg = Aggregates::new(&transactions, &categories, Month::new(2025, 1).unwrap());

        let output = format_category_list(&agg.category_usage(), "$");
        assert!(output.starts_with("Expense\n"));
        assert!(output.contains("\nIncome\n"));
        assert!(!output.contains("Income & Expense"));
        assert!(output.contains("$50.50 / $40.00"));
        assert!(output.contains("126% (exceeded)"));
        assert!(output.contains("└── Other Income"));
    }

    #[test]
    fn test_empty_list() {
        assert!(format_category_list(&[], "$").contains("finance init"));
    }
}

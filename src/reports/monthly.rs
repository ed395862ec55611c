//! Month report
//!
//! Everything shown for a single month: totals, the month's expenses and
//! incomes, both category breakdowns and the budget alerts.

use std::io::Write;

use serde::Serialize;

use crate::error::{FinanceError, FinanceResult};
use crate::models::{Category, Money, Month, Transaction, TransactionKind};

use super::aggregates::{Aggregates, BudgetAlert, CategoryShare, MonthlyTotals};

/// Summary of one month
#[derive(Debug, Clone, Serialize)]
pub struct MonthReport {
    pub month: Month,
    pub totals: MonthlyTotals,
    pub expenses: Vec<Transaction>,
    pub incomes: Vec<Transaction>,
    pub expense_breakdown: Vec<CategoryShare>,
    pub income_breakdown: Vec<CategoryShare>,
    pub alerts: Vec<BudgetAlert>,
}

impl MonthReport {
    /// Build the report for `month`
    pub fn generate(transactions: &[Transaction], categories: &[Category], month: Month) -> Self {
        let agg = Aggregates::new(transactions, categories, month);

        Self {
            month,
            totals: agg.totals_for(month),
            expenses: agg.current_month_expenses().into_iter().cloned().collect(),
            incomes: agg.current_month_incomes().into_iter().cloned().collect(),
            expense_breakdown: agg.category_breakdown(None, TransactionKind::Expense),
            income_breakdown: agg.category_breakdown(None, TransactionKind::Income),
            alerts: agg.budget_alerts(),
        }
    }

    pub fn total_expenses(&self) -> Money {
        self.totals.expense_total
    }

    pub fn total_income(&self) -> Money {
        self.totals.income_total
    }

    pub fn net(&self) -> Money {
        self.totals.net
    }

    /// Format the report for terminal display
    pub fn format_terminal(&self, currency_symbol: &str) -> String {
        let money = |m: Money| m.format_with_symbol(currency_symbol);
        let mut output = String::new();

        output.push_str(&format!("Monthly Summary: {}\n", self.month.long_label()));
        output.push_str(&"=".repeat(60));
        output.push('\n');
        output.push_str(&format!(
            "Income:   {:>14}  ({} transactions)\n",
            money(self.total_income()),
            self.incomes.len()
        ));
        output.push_str(&format!(
            "Expenses: {:>14}  ({} transactions)\n",
            money(self.total_expenses()),
            self.expenses.len()
        ));
        output.push_str(&format!("Net:      {:>14}\n", money(self.net())));

        if !self.expense_breakdown.is_empty() {
            output.push_str("\nExpenses by category\n");
            output.push_str(&"-".repeat(60));
            output.push('\n');
            for share in &self.expense_breakdown {
                let budget = share
                    .budget
                    .map(|b| format!("of {}", money(b)))
                    .unwrap_or_default();
                output.push_str(&format!(
                    "  {:<28} {:>14} {}\n",
                    share.name,
                    money(share.value),
                    budget
                ));
            }
        }

        if !self.income_breakdown.is_empty() {
            output.push_str("\nIncome by category\n");
            output.push_str(&"-".repeat(60));
            output.push('\n');
            for share in &self.income_breakdown {
                output.push_str(&format!(
                    "  {:<28} {:>14}\n",
                    share.name,
                    money(share.value)
                ));
            }
        }

        if !self.alerts.is_empty() {
            output.push_str("\nBudget alerts\n");
            output.push_str(&"-".repeat(60));
            output.push('\n');
            for alert in &self.alerts {
                output.push_str(&format!(
                    "  {}: {} of {} ({:.0}% of budget)\n",
                    alert.category,
                    money(alert.spent),
                    money(alert.budget),
                    alert.percentage
                ));
            }
        }

        output
    }

    /// Export the category breakdowns as CSV
    pub fn export_csv<W: Write>(&self, writer: &mut W) -> FinanceResult<()> {
        let mut csv = csv::Writer::from_writer(writer);

        csv.write_record(["Month", "Type", "Category", "Amount", "Budget"])
            .map_err(|e| FinanceError::Export(e.to_string()))?;

        let sides = [
            (TransactionKind::Expense, &self.expense_breakdown),
            (TransactionKind::Income, &self.income_breakdown),
        ];
        for (kind, shares) in sides {
            for share in shares {
                csv.write_record([
                    self.month.to_string(),
                    kind.to_string(),
                    share.name.clone(),
                    format!("{:.2}", share.value.as_decimal()),
                    share
                        .budget
                        .map(|b| format!("{:.2}", b.as_decimal()))
                        .unwrap_or_default(),
                ])
                .map_err(|e| FinanceError::Export(e.to_string()))?;
            }
        }

        csv.flush()
            .map_err(|e| FinanceError::Export(e.to_string()))?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{default_categories, TransactionInput};

    fn sample() -> (Vec<Transaction>, Vec<Category>) {
        let mut categories = default_categories();
        categories[0].budget = Some(Money::from_cents(4000));

        let transactions = vec![
            Transaction::new(TransactionInput::expense(
                "Lunch",
                Money::from_cents(3000),
                "Food",
                "2025-01-15",
            )),
            Transaction::new(TransactionInput::expense(
                "Dinner",
                Money::from_cents(2050),
                "Food",
                "2025-01-20",
            )),
            Transaction::new(TransactionInput::income(
                "Salary",
                Money::from_cents(100000),
                "Salary",
                "2025-01-05",
            )),
        ];
        (transactions, categories)
    }

    #[test]
    fn test_generate() {
        let (transactions, categories) = sample();
        let report = MonthReport::generate(&transactions, &categories, Month::new(2025, 1).unwrap());

        assert_eq!(report.total_expenses(), Money::from_cents(5050));
        assert_eq!(report.net(), Money::from_cents(94950));
        assert_eq!(report.expenses.len(), 2);
        assert_eq!(report.incomes.len(), 1);
        assert_eq!(report.alerts.len(), 1);
    }

    #[test]
    fn test_format_terminal() {
        let (transactions, categories) = sample();
        let report = MonthReport::generate(&transactions, &categories, Month::new(2025, 1).unwrap());

        let output = report.format_terminal("$");
        assert!(output.contains("Monthly Summary: January 2025"));
        assert!(output.contains("$50.50"));
        assert!(output.contains("$949.50"));
        assert!(output.contains("Food: $50.50 of $40.00 (126% of budget)"));
    }

    #[test]
    fn test_export_csv() {
        let (transactions, categories) = sample();
        let report = MonthReport::generate(&transactions, &categories, Month::new(2025, 1).unwrap());

        let mut buffer = Vec::new();
        report.export_csv(&mut buffer).unwrap();
        let csv = String::from_utf8(buffer).unwrap();

        assert!(csv.starts_with("Month,Type,Category,Amount,Budget\n"));
        assert!(csv.contains("2025-01,Expense,Food,50.50,40.00"));
        assert!(csv.contains("2025-01,Income,Salary,1000.00,"));
    }
}

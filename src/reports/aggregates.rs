//! Aggregation engine
//!
//! Pure computations over a snapshot of transactions and categories. The
//! reference month ("the current month") is always supplied by the caller.
//!
//! Transactions are matched to months by date prefix and to categories by
//! name, exactly as they are stored.

use serde::Serialize;

use crate::models::{Category, Money, Month, Transaction, TransactionKind};

/// Share of spending above which a budget raises an alert
pub const ALERT_THRESHOLD_PERCENT: f64 = 80.0;

/// Default number of months in a series
pub const DEFAULT_SERIES_WINDOW: usize = 6;

/// Longest series that will be computed, one hundred years
pub const MAX_SERIES_WINDOW: usize = 1200;

/// Income and expense totals for one month
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MonthlyTotals {
    /// Short display label, e.g. "Oct 26"
    pub label: String,
    pub month: Month,
    pub income_total: Money,
    pub expense_total: Money,
    pub net: Money,
}

/// One slice of a category breakdown
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CategoryShare {
    pub name: String,
    pub value: Money,
    pub color: String,
    /// Only reported on the expense side
    #[serde(skip_serializing_if = "Option::is_none")]
    pub budget: Option<Money>,
}

/// A budget that is more than 80% used in the reference month
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BudgetAlert {
    pub category: String,
    pub spent: Money,
    pub budget: Money,
    pub percentage: f64,
}

/// How far along a budget is
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum BudgetStatus {
    /// At or below 80%
    OnTrack,
    /// Above 80%, not above 100%
    Warning,
    /// Above 100%
    Exceeded,
}

impl BudgetStatus {
    pub fn from_percentage(percentage: f64) -> Self {
        if percentage > 100.0 {
            Self::Exceeded
        } else if percentage > ALERT_THRESHOLD_PERCENT {
            Self::Warning
        } else {
            Self::OnTrack
        }
    }
}

/// Reference-month spending for one category
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CategoryUsage {
    pub category: Category,
    pub spent: Money,
    pub transaction_count: usize,
    /// Present when the category has a usable budget
    pub percentage: Option<f64>,
    pub status: Option<BudgetStatus>,
}

/// `spent` as a percentage of `budget`
fn percentage_of(spent: Money, budget: Money) -> f64 {
    spent.cents() as f64 * 100.0 / budget.cents() as f64
}

/// A read-only view over the current data
#[derive(Debug, Clone, Copy)]
pub struct Aggregates<'a> {
    transactions: &'a [Transaction],
    categories: &'a [Category],
    reference: Month,
}

impl<'a> Aggregates<'a> {
    pub fn new(transactions: &'a [Transaction], categories: &'a [Category], reference: Month) -> Self {
        Self {
            transactions,
            categories,
            reference,
        }
    }

    /// The month treated as "current"
    pub fn reference_month(&self) -> Month {
        self.reference
    }

    /// Transactions dated in `month` (default: the reference month)
    pub fn transactions_by_month(&self, month: Option<Month>) -> Vec<&'a Transaction> {
        let month = month.unwrap_or(self.reference);
        self.transactions
            .iter()
            .filter(|t| month.matches(&t.date))
            .collect()
    }

    fn of_kind(&self, month: Month, kind: TransactionKind) -> Vec<&'a Transaction> {
        self.transactions
            .iter()
            .filter(|t| t.kind == kind && month.matches(&t.date))
            .collect()
    }

    fn sum_of_kind(&self, month: Month, kind: TransactionKind) -> Money {
        self.of_kind(month, kind).into_iter().map(|t| t.amount).sum()
    }

    pub fn current_month_expenses(&self) -> Vec<&'a Transaction> {
        self.of_kind(self.reference, TransactionKind::Expense)
    }

    pub fn current_month_incomes(&self) -> Vec<&'a Transaction> {
        self.of_kind(self.reference, TransactionKind::Income)
    }

    /// Sum of reference-month expenses
    pub fn total_expenses(&self) -> Money {
        self.sum_of_kind(self.reference, TransactionKind::Expense)
    }

    /// Sum of reference-month incomes
    pub fn total_income(&self) -> Money {
        self.sum_of_kind(self.reference, TransactionKind::Income)
    }

    /// Income minus expenses for the reference month; may be negative
    pub fn net_for_month(&self) -> Money {
        self.total_income() - self.total_expenses()
    }

    /// Totals for `month`
    pub fn totals_for(&self, month: Month) -> MonthlyTotals {
        let income_total = self.sum_of_kind(month, TransactionKind::Income);
        let expense_total = self.sum_of_kind(month, TransactionKind::Expense);
        MonthlyTotals {
            label: month.short_label(),
            month,
            income_total,
            expense_total,
            net: income_total - expense_total,
        }
    }

    /// `window` consecutive months, oldest first, ending at the reference month
    ///
    /// Windows longer than [`MAX_SERIES_WINDOW`] are clamped to it.
    pub fn monthly_series(&self, window: usize) -> Vec<MonthlyTotals> {
        let window = window.min(MAX_SERIES_WINDOW) as u32;
        (0..window)
            .rev()
            .map(|back| self.totals_for(self.reference.months_back(back)))
            .collect()
    }

    /// Per-category totals of `kind` transactions in `month`
    ///
    /// Only categories accepting `kind` are listed, in insertion order, and
    /// only those with a non-zero total. Transactions whose category name
    /// matches no such category are not represented.
    pub fn category_breakdown(&self, month: Option<Month>, kind: TransactionKind) -> Vec<CategoryShare> {
        let month = month.unwrap_or(self.reference);
        let transactions = self.of_kind(month, kind);

        self.categories
            .iter()
            .filter(|c| c.kind.accepts(kind))
            .filter_map(|category| {
                let value: Money = transactions
                    .iter()
                    .filter(|t| t.category == category.name)
                    .map(|t| t.amount)
                    .sum();

                if !value.is_positive() {
                    return None;
                }

                Some(CategoryShare {
                    name: category.name.clone(),
                    value,
                    color: category.color.clone(),
                    budget: match kind {
                        TransactionKind::Expense => category.budget,
                        TransactionKind::Income => None,
                    },
                })
            })
            .collect()
    }

    /// Reference-month spending for every category, in insertion order
    pub fn category_usage(&self) -> Vec<CategoryUsage> {
        let expenses = self.current_month_expenses();

        self.categories
            .iter()
            .map(|category| {
                let matching: Vec<_> = expenses
                    .iter()
                    .filter(|t| t.category == category.name)
                    .collect();
                let spent: Money = matching.iter().map(|t| t.amount).sum();
                let percentage = category
                    .effective_budget()
                    .map(|budget| percentage_of(spent, budget));

                CategoryUsage {
                    category: category.clone(),
                    spent,
                    transaction_count: matching.len(),
                    percentage,
                    status: percentage.map(BudgetStatus::from_percentage),
                }
            })
            .collect()
    }

    /// Budgets more than 80% spent in the reference month
    pub fn budget_alerts(&self) -> Vec<BudgetAlert> {
        let expenses = self.current_month_expenses();

        self.categories
            .iter()
            .filter_map(|category| {
                let budget = category.effective_budget()?;
                let spent: Money = expenses
                    .iter()
                    .filter(|t| t.category == category.name)
                    .map(|t| t.amount)
                    .sum();
                let percentage = percentage_of(spent, budget);

                (percentage > ALERT_THRESHOLD_PERCENT).then(|| BudgetAlert {
                    category: category.name.clone(),
                    spent,
                    budget,
                    percentage,
                })
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{default_categories, CategoryInput, CategoryKind, TransactionInput};

    fn month(y: i32, m: u32) -> Month {
        Month::new(y, m).unwrap()
    }

    fn expense(description: &str, cents: i64, category: &str, date: &str) -> Transaction {
        Transaction::new(TransactionInput::expense(
            description,
            Money::from_cents(cents),
            category,
            date,
        ))
    }

    fn income(description: &str, cents: i64, category: &str, date: &str) -> Transaction {
        Transaction::new(TransactionInput::income(
            description,
            Money::from_cents(cents),
            category,
            date,
        ))
    }

    fn categories_with_food_budget(cents: i64) -> Vec<Category> {
        let mut categories = default_categories();
        categories[0].budget = Some(Money::from_cents(cents));
        categories
    }

    fn scenario() -> Vec<Transaction> {
        vec![
            expense("Lunch", 3000, "Food", "2025-01-15"),
            expense("Dinner", 2050, "Food", "2025-01-20"),
            income("Salary", 100000, "Salary", "2025-01-05"),
            expense("Bus", 450, "Transport", "2024-12-30"),
        ]
    }

    #[test]
    fn test_food_and_salary_scenario() {
        let transactions = scenario();
        let categories = categories_with_food_budget(4000);
        let agg = Aggregates::new(&transactions, &categories, month(2025, 1));

        assert_eq!(agg.total_expenses(), Money::from_cents(5050));
        assert_eq!(agg.total_income(), Money::from_cents(100000));
        assert_eq!(agg.net_for_month(), Money::from_cents(94950));

        let breakdown = agg.category_breakdown(None, TransactionKind::Expense);
        assert_eq!(breakdown.len(), 1);
        assert_eq!(breakdown[0].name, "Food");
        assert_eq!(breakdown[0].value, Money::from_cents(5050));
        assert_eq!(breakdown[0].color, "#10B981");
        assert_eq!(breakdown[0].budget, Some(Money::from_cents(4000)));

        let alerts = agg.budget_alerts();
        assert_eq!(alerts.len(), 1);
        assert_eq!(alerts[0].category, "Food");
        assert_eq!(alerts[0].spent, Money::from_cents(5050));
        assert_eq!(alerts[0].percentage, 126.25);
    }

    #[test]
    fn test_transactions_by_month_uses_date_prefix() {
        let transactions = scenario();
        let agg = Aggregates::new(&transactions, &[], month(2025, 1));

        assert_eq!(agg.transactions_by_month(None).len(), 3);
        assert_eq!(agg.transactions_by_month(Some(month(2024, 12))).len(), 1);
        assert!(agg.transactions_by_month(Some(month(2024, 11))).is_empty());
        assert_eq!(agg.current_month_expenses().len(), 2);
        assert_eq!(agg.current_month_incomes().len(), 1);
    }

    #[test]
    fn test_net_can_be_negative() {
        let transactions = vec![
            income("Gig", 10000, "Freelance", "2025-03-01"),
            expense("Rent", 25000, "Home", "2025-03-02"),
        ];
        let agg = Aggregates::new(&transactions, &[], month(2025, 3));

        assert_eq!(agg.net_for_month(), Money::from_cents(-15000));
        assert_eq!(agg.net_for_month(), agg.total_income() - agg.total_expenses());
    }

    #[test]
    fn test_alert_threshold_is_strict() {
        let categories = categories_with_food_budget(10000);

        let at_81 = vec![expense("Groceries", 8100, "Food", "2025-01-10")];
        let agg = Aggregates::new(&at_81, &categories, month(2025, 1));
        let alerts = agg.budget_alerts();
        assert_eq!(alerts.len(), 1);
        assert_eq!(alerts[0].percentage, 81.0);

        let at_80 = vec![expense("Groceries", 8000, "Food", "2025-01-10")];
        let agg = Aggregates::new(&at_80, &categories, month(2025, 1));
        assert!(agg.budget_alerts().is_empty());
    }

    #[test]
    fn test_alerts_ignore_other_months_and_unusable_budgets() {
        let mut categories = categories_with_food_budget(1000);
        categories[1].budget = Some(Money::zero());
        categories[8].budget = Some(Money::from_cents(100));

        let transactions = vec![
            expense("Old lunch", 5000, "Food", "2024-12-10"),
            expense("Bus", 500, "Transport", "2025-01-10"),
            income("Salary", 100000, "Salary", "2025-01-05"),
        ];
        let agg = Aggregates::new(&transactions, &categories, month(2025, 1));
        assert!(agg.budget_alerts().is_empty());
    }

    #[test]
    fn test_alerts_keep_category_order() {
        let mut categories = default_categories();
        categories[0].budget = Some(Money::from_cents(1000));
        categories[3].budget = Some(Money::from_cents(1000));

        let transactions = vec![
            expense("Pharmacy", 2000, "Health", "2025-01-10"),
            expense("Lunch", 900, "Food", "2025-01-11"),
        ];
        let agg = Aggregates::new(&transactions, &categories, month(2025, 1));
        let names: Vec<_> = agg.budget_alerts().into_iter().map(|a| a.category).collect();
        assert_eq!(names, vec!["Food", "Health"]);
    }

    #[test]
    fn test_monthly_series_window() {
        let transactions = scenario();
        let agg = Aggregates::new(&transactions, &[], month(2025, 1));

        let series = agg.monthly_series(DEFAULT_SERIES_WINDOW);
        assert_eq!(series.len(), 6);
        assert_eq!(series[0].month, month(2024, 8));
        assert_eq!(series[5].month, month(2025, 1));
        assert_eq!(series[5].label, "Jan 25");

        assert_eq!(series[4].expense_total, Money::from_cents(450));
        assert_eq!(series[4].net, Money::from_cents(-450));
        assert_eq!(series[5].income_total, Money::from_cents(100000));
        for totals in &series {
            assert_eq!(totals.net, totals.income_total - totals.expense_total);
        }

        assert!(agg.monthly_series(0).is_empty());
    }

    #[test]
    fn test_monthly_series_is_clamped() {
        let transactions = scenario();
        let agg = Aggregates::new(&transactions, &[], month(2025, 1));

        let series = agg.monthly_series(usize::MAX);
        assert_eq!(series.len(), MAX_SERIES_WINDOW);
        assert_eq!(series[0].month, month(1925, 2));
        assert_eq!(series[MAX_SERIES_WINDOW - 1].month, month(2025, 1));
    }

    #[test]
    fn test_breakdown_omits_zero_and_sums_to_total() {
        let transactions = vec![
            expense("Lunch", 1500, "Food", "2025-01-10"),
            expense("Bus", 300, "Transport", "2025-01-11"),
            expense("Movie", 2000, "Leisure", "2025-01-12"),
            income("Gig", 5000, "Freelance", "2025-01-12"),
        ];
        let categories = default_categories();
        let agg = Aggregates::new(&transactions, &categories, month(2025, 1));

        let breakdown = agg.category_breakdown(None, TransactionKind::Expense);
        assert_eq!(breakdown.len(), 3);
        assert!(breakdown.iter().all(|s| s.value.is_positive()));
        let sum: Money = breakdown.iter().map(|s| s.value).sum();
        assert_eq!(sum, agg.total_expenses());

        let incomes = agg.category_breakdown(None, TransactionKind::Income);
        assert_eq!(incomes.len(), 1);
        assert_eq!(incomes[0].name, "Freelance");
        assert_eq!(incomes[0].budget, None);

        let other_month = agg.category_breakdown(Some(month(2025, 2)), TransactionKind::Expense);
        assert!(other_month.is_empty());
    }

    #[test]
    fn test_both_category_appears_on_both_sides() {
        let mut categories = default_categories();
        categories.push(Category::new(CategoryInput::new(
            "Side hustle",
            "#111111",
            CategoryKind::Both,
        )));
        let transactions = vec![
            expense("Supplies", 1000, "Side hustle", "2025-01-03"),
            income("Client", 4000, "Side hustle", "2025-01-04"),
        ];
        let agg = Aggregates::new(&transactions, &categories, month(2025, 1));

        let expense_side = agg.category_breakdown(None, TransactionKind::Expense);
        let income_side = agg.category_breakdown(None, TransactionKind::Income);
        assert_eq!(expense_side[0].value, Money::from_cents(1000));
        assert_eq!(income_side[0].value, Money::from_cents(4000));
    }

    #[test]
    fn test_orphaned_category_names_are_tolerated() {
        let transactions = vec![expense("Mystery", 1000, "Gone", "2025-01-03")];
        let categories = default_categories();
        let agg = Aggregates::new(&transactions, &categories, month(2025, 1));

        assert_eq!(agg.total_expenses(), Money::from_cents(1000));
        assert!(agg
            .category_breakdown(None, TransactionKind::Expense)
            .is_empty());
    }

    #[test]
    fn test_category_usage_status() {
        let mut categories = categories_with_food_budget(4000);
        categories[1].budget = Some(Money::from_cents(1000));
        let transactions = vec![
            expense("Lunch", 5050, "Food", "2025-01-15"),
            expense("Bus", 900, "Transport", "2025-01-15"),
            expense("Movie", 1000, "Leisure", "2025-01-15"),
        ];
        let agg = Aggregates::new(&transactions, &categories, month(2025, 1));

        let usage = agg.category_usage();
        assert_eq!(usage.len(), 14);
        assert_eq!(usage[0].status, Some(BudgetStatus::Exceeded));
        assert_eq!(usage[1].status, Some(BudgetStatus::Warning));
        assert_eq!(usage[2].status, None);
        assert_eq!(usage[2].spent, Money::from_cents(1000));
        assert_eq!(usage[2].transaction_count, 1);
        assert_eq!(BudgetStatus::from_percentage(80.0), BudgetStatus::OnTrack);
    }
}

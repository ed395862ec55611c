//! Category model
//!
//! Categories are named, colored groupings for transactions. Expense-capable
//! categories may carry a monthly budget used for budget alerts.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::ids::CategoryId;
use super::money::Money;
use super::transaction::TransactionKind;

/// Color used for transactions whose category name matches nothing
pub const FALLBACK_COLOR: &str = "#6B7280";

/// Which kinds of transaction a category accepts
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum CategoryKind {
    Income,
    #[default]
    Expense,
    Both,
}

impl CategoryKind {
    /// Check if transactions of `kind` belong under this category kind
    pub fn accepts(&self, kind: TransactionKind) -> bool {
        match self {
            Self::Both => true,
            Self::Income => kind.is_income(),
            Self::Expense => kind.is_expense(),
        }
    }

    /// Expense and Both categories can hold a budget
    pub fn is_expense_capable(&self) -> bool {
        self.accepts(TransactionKind::Expense)
    }
}

impl fmt::Display for CategoryKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Income => write!(f, "Income"),
            Self::Expense => write!(f, "Expense"),
            Self::Both => write!(f, "Both"),
        }
    }
}

/// A transaction category
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Category {
    /// Unique identifier
    pub id: CategoryId,

    /// Category name (transactions reference categories by name)
    pub name: String,

    /// Hex color, e.g. "#10B981"
    pub color: String,

    /// Monthly budget (expense-capable categories only)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub budget: Option<Money>,

    #[serde(rename = "type", default)]
    pub kind: CategoryKind,
}

impl Category {
    /// Create a new category with a fresh ID
    pub fn new(input: CategoryInput) -> Self {
        Self::with_id(CategoryId::new(), input)
    }

    /// Build a category from an input, keeping the given ID
    pub fn with_id(id: CategoryId, input: CategoryInput) -> Self {
        Self {
            id,
            name: input.name,
            color: input.color,
            budget: input.budget,
            kind: input.kind,
        }
    }

    /// The budget if it can be used for alerts
    ///
    /// Income-only categories and non-positive budgets have no usable budget.
    pub fn effective_budget(&self) -> Option<Money> {
        match self.budget {
            Some(budget) if budget.is_positive() && self.kind.is_expense_capable() => Some(budget),
            _ => None,
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name)
    }
}

/// The caller-supplied fields of a category
#[derive(Debug, Clone, PartialEq)]
pub struct CategoryInput {
    pub name: String,
    pub color: String,
    pub budget: Option<Money>,
    pub kind: CategoryKind,
}

impl CategoryInput {
    pub fn new(name: impl Into<String>, color: impl Into<String>, kind: CategoryKind) -> Self {
        Self {
            name: name.into(),
            color: color.into(),
            budget: None,
            kind,
        }
    }

    /// Set a monthly budget
    pub fn with_budget(mut self, budget: Money) -> Self {
        self.budget = Some(budget);
        self
    }

    /// Validate the input
    pub fn validate(&self) -> Result<(), CategoryValidationError> {
        if self.name.trim().is_empty() {
            return Err(CategoryValidationError::EmptyName);
        }

        if self.name.len() > 50 {
            return Err(CategoryValidationError::NameTooLong(self.name.len()));
        }

        if !is_hex_color(&self.color) {
            return Err(CategoryValidationError::InvalidColor(self.color.clone()));
        }

        if let Some(budget) = self.budget {
            if !budget.is_positive() {
                return Err(CategoryValidationError::NonPositiveBudget);
            }
            if self.kind == CategoryKind::Income {
                return Err(CategoryValidationError::BudgetOnIncome);
            }
        }

        Ok(())
    }
}

/// Check for `#RGB` or `#RRGGBB`
fn is_hex_color(s: &str) -> bool {
    match s.strip_prefix('#') {
        Some(hex) => (hex.len() == 3 || hex.len() == 6) && hex.chars().all(|c| c.is_ascii_hexdigit()),
        None => false,
    }
}

/// Validation errors for categories
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CategoryValidationError {
    EmptyName,
    NameTooLong(usize),
    InvalidColor(String),
    NonPositiveBudget,
    BudgetOnIncome,
}

impl fmt::Display for CategoryValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyName => write!(f, "Category name cannot be empty"),
            Self::NameTooLong(len) => {
                write!(f, "Category name too long ({} chars, max 50)", len)
            }
            Self::InvalidColor(color) => {
                write!(f, "Invalid color (expected #RRGGBB): {}", color)
            }
            Self::NonPositiveBudget => write!(f, "Budget must be greater than zero"),
            Self::BudgetOnIncome => write!(f, "Income categories cannot have a budget"),
        }
    }
}

impl std::error::Error for CategoryValidationError {}

/// Color of the first category named `name`, or [`FALLBACK_COLOR`]
pub fn color_for<'a>(categories: &'a [Category], name: &str) -> &'a str {
    categories
        .iter()
        .find(|c| c.name == name)
        .map(|c| c.color.as_str())
        .unwrap_or(FALLBACK_COLOR)
}

/// Built-in categories seeded when nothing is stored
///
/// Eight expense categories followed by six income categories, with fixed
/// IDs "1" through "14".
pub fn default_categories() -> Vec<Category> {
    const DEFAULTS: &[(&str, &str, CategoryKind)] = &[
        ("Food", "#10B981", CategoryKind::Expense),
        ("Transport", "#3B82F6", CategoryKind::Expense),
        ("Leisure", "#8B5CF6", CategoryKind::Expense),
        ("Health", "#EF4444", CategoryKind::Expense),
        ("Education", "#F59E0B", CategoryKind::Expense),
        ("Home", "#06B6D4", CategoryKind::Expense),
        ("Clothing", "#EC4899", CategoryKind::Expense),
        ("Other", "#6B7280", CategoryKind::Expense),
        ("Salary", "#059669", CategoryKind::Income),
        ("Freelance", "#0891B2", CategoryKind::Income),
        ("Investments", "#7C3AED", CategoryKind::Income),
        ("Sales", "#DC2626", CategoryKind::Income),
        ("Bonus", "#EA580C", CategoryKind::Income),
        ("Other Income", "#65A30D", CategoryKind::Income),
    ];

    DEFAULTS
        .iter()
        .enumerate()
        .map(|(i, (name, color, kind))| {
            Category::with_id(
                CategoryId::from_string((i + 1).to_string()),
                CategoryInput::new(*name, *color, *kind),
            )
        })
        .collect()
}

//! Transaction model
//!
//! A transaction is a single dated income or expense entry. The category is
//! referenced by name, so a transaction may point at a category that no
//! longer matches anything (it is then shown with a fallback color).

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;

use super::ids::TransactionId;
use super::money::Money;

/// Whether a transaction brings money in or takes it out
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum TransactionKind {
    Income,
    #[default]
    Expense,
}

impl TransactionKind {
    pub fn is_income(&self) -> bool {
        matches!(self, Self::Income)
    }

    pub fn is_expense(&self) -> bool {
        matches!(self, Self::Expense)
    }

    /// Sign character used when displaying amounts
    pub fn sign(&self) -> char {
        match self {
            Self::Income => '+',
            Self::Expense => '-',
        }
    }
}

impl fmt::Display for TransactionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Income => write!(f, "Income"),
            Self::Expense => write!(f, "Expense"),
        }
    }
}

/// A financial transaction
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    /// Unique identifier
    pub id: TransactionId,

    /// What the money was for
    pub description: String,

    /// Always positive; direction comes from `kind`
    pub amount: Money,

    /// Category name
    pub category: String,

    /// Transaction date (YYYY-MM-DD)
    pub date: String,

    #[serde(rename = "type")]
    pub kind: TransactionKind,
}

impl Transaction {
    /// Create a new transaction with a fresh ID
    pub fn new(input: TransactionInput) -> Self {
        Self::with_id(TransactionId::new(), input)
    }

    /// Build a transaction from an input, keeping the given ID
    pub fn with_id(id: TransactionId, input: TransactionInput) -> Self {
        Self {
            id,
            description: input.description,
            amount: input.amount,
            category: input.category,
            date: input.date,
            kind: input.kind,
        }
    }

    /// Replace every field except the ID
    pub fn replace(&mut self, input: TransactionInput) {
        self.description = input.description;
        self.amount = input.amount;
        self.category = input.category;
        self.date = input.date;
        self.kind = input.kind;
    }

    /// The fields of this transaction without its ID
    pub fn to_input(&self) -> TransactionInput {
        TransactionInput {
            description: self.description.clone(),
            amount: self.amount,
            category: self.category.clone(),
            date: self.date.clone(),
            kind: self.kind,
        }
    }

    pub fn is_income(&self) -> bool {
        self.kind.is_income()
    }

    pub fn is_expense(&self) -> bool {
        self.kind.is_expense()
    }

    /// Amount with the sign implied by the kind (expenses negative)
    pub fn signed_amount(&self) -> Money {
        match self.kind {
            TransactionKind::Income => self.amount,
            TransactionKind::Expense => -self.amount,
        }
    }
}

impl fmt::Display for Transaction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {} {}{}",
            self.date,
            self.description,
            self.kind.sign(),
            self.amount
        )
    }
}

/// The caller-supplied fields of a transaction
#[derive(Debug, Clone, PartialEq)]
pub struct TransactionInput {
    pub description: String,
    pub amount: Money,
    pub category: String,
    pub date: String,
    pub kind: TransactionKind,
}

impl TransactionInput {
    pub fn new(
        description: impl Into<String>,
        amount: Money,
        category: impl Into<String>,
        date: impl Into<String>,
        kind: TransactionKind,
    ) -> Self {
        Self {
            description: description.into(),
            amount,
            category: category.into(),
            date: date.into(),
            kind,
        }
    }

    /// Shorthand for an expense
    pub fn expense(
        description: impl Into<String>,
        amount: Money,
        category: impl Into<String>,
        date: impl Into<String>,
    ) -> Self {
        Self::new(description, amount, category, date, TransactionKind::Expense)
    }

    /// Shorthand for an income
    pub fn income(
        description: impl Into<String>,
        amount: Money,
        category: impl Into<String>,
        date: impl Into<String>,
    ) -> Self {
        Self::new(description, amount, category, date, TransactionKind::Income)
    }

    /// Validate the input
    pub fn validate(&self) -> Result<(), TransactionValidationError> {
        if self.description.trim().is_empty() {
            return Err(TransactionValidationError::EmptyDescription);
        }

        if self.category.trim().is_empty() {
            return Err(TransactionValidationError::EmptyCategory);
        }

        if !self.amount.is_positive() {
            return Err(TransactionValidationError::NonPositiveAmount(self.amount));
        }

        if NaiveDate::parse_from_str(&self.date, "%Y-%m-%d").is_err() || self.date.len() != 10 {
            return Err(TransactionValidationError::InvalidDate(self.date.clone()));
        }

        Ok(())
    }
}

/// Validation errors for transactions
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TransactionValidationError {
    EmptyDescription,
    EmptyCategory,
    NonPositiveAmount(Money),
    InvalidDate(String),
}

impl fmt::Display for TransactionValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyDescription => write!(f, "Description cannot be empty"),
            Self::EmptyCategory => write!(f, "Category cannot be empty"),
            Self::NonPositiveAmount(amount) => {
                write!(f, "Amount must be greater than zero, got {}", amount)
            }
            Self::InvalidDate(date) => {
                write!(f, "Invalid date (expected YYYY-MM-DD): {}", date)
            }
        }
    }
}

impl std::error::Error for TransactionValidationError {}

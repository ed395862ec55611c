//! Core data models for the finance tracker
//!
//! This module contains the data structures of the tracking domain:
//! transactions, categories, money amounts and month buckets.

pub mod category;
pub mod ids;
pub mod money;
pub mod month;
pub mod theme;
pub mod transaction;

pub use category::{color_for, default_categories, Category, CategoryInput, CategoryKind, FALLBACK_COLOR};
pub use ids::{CategoryId, TransactionId};
pub use money::Money;
pub use month::Month;
pub use theme::Theme;
pub use transaction::{Transaction, TransactionInput, TransactionKind};

//! Service layer
//!
//! Services validate input, apply it to the repositories and persist the
//! affected collection before returning.

pub mod category;
pub mod transaction;

pub use category::CategoryService;
pub use transaction::TransactionService;

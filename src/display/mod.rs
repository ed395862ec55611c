//! Terminal output formatting

pub mod category;
pub mod report;
pub mod transaction;

pub use category::format_category_list;
pub use report::{format_alerts, format_breakdown, format_series};
pub use transaction::{format_transaction_details, format_transaction_table};

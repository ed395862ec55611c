//! Export
//!
//! - HTML: a printable expense report for one month
//! - CSV: transactions, spreadsheet-compatible
//! - JSON / YAML: a full snapshot of stored data

pub mod csv;
pub mod html;
pub mod json;
pub mod yaml;

pub use self::csv::export_transactions_csv;
pub use html::{escape_html, report_filename, HtmlReport};
pub use json::{export_full_json, FullExport, EXPORT_SCHEMA_VERSION};
pub use yaml::export_full_yaml;

//! CSV export

use std::io::Write;

use crate::error::{FinanceError, FinanceResult};
use crate::models::Month;
use crate::services::TransactionService;
use crate::storage::Storage;

/// Export transactions to CSV, optionally limited to one month
///
/// Returns the number of rows written.
pub fn export_transactions_csv<W: Write>(
    storage: &Storage,
    writer: &mut W,
    month: Option<Month>,
) -> FinanceResult<usize> {
    let transactions = TransactionService::new(storage).list(month)?;
    let mut csv = ::csv::Writer::from_writer(writer);

    csv.write_record(["ID", "Date", "Description", "Category", "Type", "Amount"])
        .map_err(|e| FinanceError::Export(e.to_string()))?;

    for txn in &transactions {
        let kind = txn.kind.to_string();
        let amount = format!("{:.2}", txn.amount.as_decimal());
        csv.write_record([
            txn.id.as_str(),
            txn.date.as_str(),
            txn.description.as_str(),
            txn.category.as_str(),
            kind.as_str(),
            amount.as_str(),
        ])
        .map_err(|e| FinanceError::Export(e.to_string()))?;
    }

    csv.flush()
        .map_err(|e| FinanceError::Export(e.to_string()))?;

    tracing::debug!(count = transactions.len(), "exported transactions as CSV");
    Ok(transactions.len())
}

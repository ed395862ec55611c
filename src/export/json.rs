//! JSON snapshot export

use std::io::Write;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{FinanceError, FinanceResult};
use crate::models::{Category, Theme, Transaction};
use crate::storage::Storage;

/// Current export schema version
pub const EXPORT_SCHEMA_VERSION: &str = "1.0.0";

/// Everything in storage, in the same shapes it is persisted in
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FullExport {
    pub schema_version: String,
    pub exported_at: DateTime<Utc>,
    pub app_version: String,
    pub theme: Theme,
    pub categories: Vec<Category>,
    pub transactions: Vec<Transaction>,
    pub metadata: ExportMetadata,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExportMetadata {
    pub transaction_count: usize,
    pub category_count: usize,
    /// Earliest transaction date
    pub earliest_transaction: Option<String>,
    /// Latest transaction date
    pub latest_transaction: Option<String>,
}

impl FullExport {
    /// Snapshot the current storage contents
    pub fn from_storage(storage: &Storage) -> FinanceResult<Self> {
        let categories = storage.categories.get_all()?;
        let transactions = storage.transactions.get_all()?;

        // YYYY-MM-DD strings order chronologically
        let earliest_transaction = transactions.iter().map(|t| t.date.clone()).min();
        let latest_transaction = transactions.iter().map(|t| t.date.clone()).max();

        let metadata = ExportMetadata {
            transaction_count: transactions.len(),
            category_count: categories.len(),
            earliest_transaction,
            latest_transaction,
        };

        Ok(Self {
            schema_version: EXPORT_SCHEMA_VERSION.to_string(),
            exported_at: Utc::now(),
            app_version: env!("CARGO_PKG_VERSION").to_string(),
            theme: storage.theme()?,
            categories,
            transactions,
            metadata,
        })
    }
}

/// Export the full snapshot as JSON
pub fn export_full_json<W: Write>(
    storage: &Storage,
    writer: &mut W,
    pretty: bool,
) -> FinanceResult<()> {
    let export = FullExport::from_storage(storage)?;

    if pretty {
        serde_json::to_writer_pretty(writer, &export)
    } else {
        serde_json::to_writer(writer, &export)
    }
    .map_err(|e| FinanceError::Export(e.to_string()))?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Money, TransactionInput};
    use crate::services::TransactionService;

    fn create_test_storage() -> Storage {
        let storage = Storage::in_memory();
        storage.load_all().unwrap();
        let service = TransactionService::new(&storage);
        for (description, date) in [("Bus", "2025-03-02"), ("Lunch", "2025-01-15")] {
            service
                .add(TransactionInput::expense(
                    description,
                    Money::from_cents(500),
                    "Food",
                    date,
                ))
                .unwrap();
        }
        storage
    }

    #[test]
    fn test_full_export() {
        let storage = create_test_storage();
        let export = FullExport::from_storage(&storage).unwrap();

        assert_eq!(export.schema_version, EXPORT_SCHEMA_VERSION);
        assert_eq!(export.categories.len(), 14);
        assert_eq!(export.metadata.transaction_count, 2);
        assert_eq!(export.metadata.earliest_transaction.as_deref(), Some("2025-01-15"));
        assert_eq!(export.metadata.latest_transaction.as_deref(), Some("2025-03-02"));
    }

    #[test]
    fn test_json_output_keeps_wire_shape() {
        let storage = create_test_storage();
        let mut buffer = Vec::new();
        export_full_json(&storage, &mut buffer, false).unwrap();

        let value: serde_json::Value = serde_json::from_slice(&buffer).unwrap();
        assert_eq!(value["theme"], "light");
        assert_eq!(value["transactions"][0]["type"], "expense");
        assert_eq!(value["transactions"][0]["amount"], 5);
    }
}

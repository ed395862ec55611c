//! Versioned load step for persisted collections
//!
//! Loading is split into three stages: detect which shape is stored
//! ([`StoredShape`]), transform records into the canonical shape, and let the
//! caller re-persist the canonical form when anything was migrated.
//!
//! Shapes handled:
//!
//! - transactions under `finance-transactions` (canonical)
//! - expenses under `finance-expenses` (legacy, no `type` field; every entry
//!   becomes an expense)
//! - categories under `finance-categories`, where legacy entries may lack
//!   `type` (defaults to expense)
//!
//! Presence of a key, not the length of its list, decides which shape wins.
//!
//! Records that cannot be decoded are handed back untouched in
//! [`Loaded::rejected`] so the caller can set them aside under
//! [`unreadable_key`] before the collection is rewritten.

use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::error::{FinanceError, FinanceResult};
use crate::models::{default_categories, Category, Transaction};

use super::kv::{KeyValueStore, CATEGORIES_KEY, LEGACY_EXPENSES_KEY, TRANSACTIONS_KEY};

/// Which persisted representation was found
#[derive(Debug, Clone, PartialEq)]
pub enum StoredShape {
    /// Current representation, records under the canonical key
    Canonical(Vec<Value>),
    /// An older representation that must be transformed
    Legacy(Vec<Value>),
    /// Nothing stored
    Missing,
}

/// Outcome of loading one collection
#[derive(Debug, Clone, PartialEq)]
pub struct Loaded<T> {
    pub records: Vec<T>,
    /// Records were transformed and the canonical form should be written
    pub migrated: bool,
    /// Built-in defaults were used because nothing was stored
    pub seeded: bool,
    /// Raw records that could not be decoded
    pub rejected: Vec<Value>,
}

impl<T> Loaded<T> {
    fn new(records: Vec<T>) -> Self {
        Self {
            records,
            migrated: false,
            seeded: false,
            rejected: Vec::new(),
        }
    }

    /// Number of records that could not be decoded
    pub fn skipped(&self) -> usize {
        self.rejected.len()
    }

    /// Whether the canonical form must be written back
    ///
    /// Also true when records were rejected: once they are stored under
    /// their side key the collection is rewritten without them.
    pub fn needs_persist(&self) -> bool {
        self.migrated || self.seeded || !self.rejected.is_empty()
    }
}

/// Side key holding the raw records of `key` that could not be decoded
pub fn unreadable_key(key: &str) -> String {
    format!("{}-unreadable", key)
}

/// Parse the array stored under `key`
fn read_array(store: &dyn KeyValueStore, key: &str) -> FinanceResult<Option<Vec<Value>>> {
    let raw = match store.get(key)? {
        Some(raw) => raw,
        None => return Ok(None),
    };

    let value: Value = serde_json::from_str(&raw)
        .map_err(|e| FinanceError::Storage(format!("Failed to parse '{}': {}", key, e)))?;

    match value {
        Value::Array(items) => Ok(Some(items)),
        other => Err(FinanceError::Storage(format!(
            "Expected a list under '{}', found {}",
            key,
            json_kind(&other)
        ))),
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "a list",
        Value::Object(_) => "an object",
    }
}

/// Detect the stored transaction shape
pub fn detect_transactions(store: &dyn KeyValueStore) -> FinanceResult<StoredShape> {
    if let Some(items) = read_array(store, TRANSACTIONS_KEY)? {
        return Ok(StoredShape::Canonical(items));
    }
    if let Some(items) = read_array(store, LEGACY_EXPENSES_KEY)? {
        return Ok(StoredShape::Legacy(items));
    }
    Ok(StoredShape::Missing)
}

/// Detect the stored category shape
///
/// Categories live under a single key; a list is legacy when any entry
/// lacks a usable `type`.
pub fn detect_categories(store: &dyn KeyValueStore) -> FinanceResult<StoredShape> {
    match read_array(store, CATEGORIES_KEY)? {
        Some(items) if items.iter().any(|item| !has_type(item)) => Ok(StoredShape::Legacy(items)),
        Some(items) => Ok(StoredShape::Canonical(items)),
        None => Ok(StoredShape::Missing),
    }
}

fn has_type(item: &Value) -> bool {
    matches!(item.get("type"), Some(Value::String(s)) if !s.is_empty())
}

/// Set `type` to "expense", overwriting whatever is there
fn stamp_expense(mut item: Value) -> Value {
    if let Value::Object(map) = &mut item {
        map.insert("type".to_string(), Value::String("expense".to_string()));
    }
    item
}

/// Set `type` to "expense" only when missing or empty
fn default_expense(item: Value) -> Value {
    if has_type(&item) {
        item
    } else {
        stamp_expense(item)
    }
}

/// Decode records one by one, setting aside the ones that don't fit
fn decode_records<T: DeserializeOwned>(key: &str, items: Vec<Value>) -> (Vec<T>, Vec<Value>) {
    let mut records = Vec::with_capacity(items.len());
    let mut rejected = Vec::new();

    for (index, item) in items.into_iter().enumerate() {
        match serde_json::from_value::<T>(item.clone()) {
            Ok(record) => records.push(record),
            Err(e) => {
                tracing::warn!(key, index, error = %e, "setting aside unreadable record");
                rejected.push(item);
            }
        }
    }

    (records, rejected)
}

/// Load transactions, migrating the legacy expenses list if needed
pub fn load_transactions(store: &dyn KeyValueStore) -> FinanceResult<Loaded<Transaction>> {
    match detect_transactions(store)? {
        StoredShape::Canonical(items) => {
            let (records, rejected) = decode_records(TRANSACTIONS_KEY, items);
            let mut loaded = Loaded::new(records);
            loaded.rejected = rejected;
            Ok(loaded)
        }
        StoredShape::Legacy(items) => {
            let items = items.into_iter().map(stamp_expense).collect();
            let (records, rejected) = decode_records(LEGACY_EXPENSES_KEY, items);
            tracing::info!(
                count = records.len(),
                "migrated legacy expenses to transactions"
            );
            let mut loaded = Loaded::new(records);
            loaded.migrated = true;
            loaded.rejected = rejected;
            Ok(loaded)
        }
        StoredShape::Missing => Ok(Loaded::new(Vec::new())),
    }
}

/// Load categories, defaulting missing types or seeding the built-ins
pub fn load_categories(store: &dyn KeyValueStore) -> FinanceResult<Loaded<Category>> {
    match detect_categories(store)? {
        StoredShape::Canonical(items) => {
            let (records, rejected) = decode_records(CATEGORIES_KEY, items);
            let mut loaded = Loaded::new(records);
            loaded.rejected = rejected;
            Ok(loaded)
        }
        StoredShape::Legacy(items) => {
            let items = items.into_iter().map(default_expense).collect();
            let (records, rejected) = decode_records(CATEGORIES_KEY, items);
            tracing::info!(count = records.len(), "migrated untyped categories");
            let mut loaded = Loaded::new(records);
            loaded.migrated = true;
            loaded.rejected = rejected;
            Ok(loaded)
        }
        StoredShape::Missing => {
            tracing::info!("no categories stored, seeding defaults");
            let mut loaded = Loaded::new(default_categories());
            loaded.seeded = true;
            Ok(loaded)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{CategoryKind, TransactionKind};
    use crate::storage::kv::MemoryStore;

    const LEGACY_EXPENSES: &str = r##"[
        {"id":"1700000000000","description":"Lunch","amount":30,"category":"Food","date":"2025-01-15"},
        {"id":"1700000000001","description":"Bus","amount":4.5,"category":"Transport","date":"2025-01-16"}
    ]"##;

    #[test]
    fn test_missing_everything() {
        let store = MemoryStore::new();
        assert_eq!(detect_transactions(&store).unwrap(), StoredShape::Missing);

        let txns = load_transactions(&store).unwrap();
        assert!(txns.records.is_empty());
        assert!(!txns.needs_persist());

        let cats = load_categories(&store).unwrap();
        assert_eq!(cats.records.len(), 14);
        assert!(cats.seeded);
    }

    #[test]
    fn test_legacy_expenses_migrate_to_expense_type() {
        let store = MemoryStore::with_entries([(LEGACY_EXPENSES_KEY, LEGACY_EXPENSES)]);

        let loaded = load_transactions(&store).unwrap();
        assert!(loaded.migrated);
        assert_eq!(loaded.records.len(), 2);
        assert!(loaded
            .records
            .iter()
            .all(|t| t.kind == TransactionKind::Expense));

        let bus = &loaded.records[1];
        assert_eq!(bus.id.as_str(), "1700000000001");
        assert_eq!(bus.description, "Bus");
        assert_eq!(bus.amount.cents(), 450);
        assert_eq!(bus.category, "Transport");
        assert_eq!(bus.date, "2025-01-16");
    }

    #[test]
    fn test_canonical_key_wins_even_when_empty() {
        let store = MemoryStore::with_entries([
            (TRANSACTIONS_KEY, "[]"),
            (LEGACY_EXPENSES_KEY, LEGACY_EXPENSES),
        ]);

        let loaded = load_transactions(&store).unwrap();
        assert!(loaded.records.is_empty());
        assert!(!loaded.migrated);
    }

    #[test]
    fn test_untyped_categories_default_to_expense() {
        let store = MemoryStore::with_entries([(
            CATEGORIES_KEY,
            r##"[
                {"id":"1","name":"Food","color":"#10B981","budget":400},
                {"id":"2","name":"Salary","color":"#059669","type":"income"}
            ]"##,
        )]);

        assert!(matches!(
            detect_categories(&store).unwrap(),
            StoredShape::Legacy(_)
        ));

        let loaded = load_categories(&store).unwrap();
        assert!(loaded.migrated);
        assert_eq!(loaded.records[0].kind, CategoryKind::Expense);
        assert_eq!(loaded.records[0].budget.map(|b| b.cents()), Some(40000));
        assert_eq!(loaded.records[1].kind, CategoryKind::Income);
    }

    #[test]
    fn test_unreadable_records_are_skipped() {
        let store = MemoryStore::with_entries([(
            TRANSACTIONS_KEY,
            r#"[
                {"id":"1","description":"Ok","amount":10,"category":"Food","date":"2025-01-01","type":"expense"},
                {"id":"2","description":"NaN","amount":null,"category":"Food","date":"2025-01-01","type":"expense"}
            ]"#,
        )]);

        let loaded = load_transactions(&store).unwrap();
        assert_eq!(loaded.records.len(), 1);
        assert_eq!(loaded.skipped(), 1);
        assert_eq!(loaded.rejected[0]["description"], "NaN");
        assert!(loaded.needs_persist());
    }

    #[test]
    fn test_non_list_document_is_an_error() {
        let store = MemoryStore::with_entries([(TRANSACTIONS_KEY, r#"{"oops":true}"#)]);
        let err = load_transactions(&store).unwrap_err();
        assert!(matches!(err, FinanceError::Storage(_)));

        let store = MemoryStore::with_entries([(CATEGORIES_KEY, "not json")]);
        assert!(load_categories(&store).is_err());
    }
}

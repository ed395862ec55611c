//! Transaction repository
//!
//! Holds the ordered transaction list in memory and writes the whole list
//! under `finance-transactions` on save.

use std::sync::{Arc, RwLock};

use crate::error::FinanceError;
use crate::models::{Transaction, TransactionId, TransactionInput};

use super::kv::{set_json, KeyValueStore, TRANSACTIONS_KEY};

/// Repository for transaction persistence
pub struct TransactionRepository {
    store: Arc<dyn KeyValueStore>,
    data: RwLock<Vec<Transaction>>,
}

impl TransactionRepository {
    /// Create a new transaction repository
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        Self {
            store,
            data: RwLock::new(Vec::new()),
        }
    }

    /// Replace the in-memory list with loaded records
    pub fn replace_all(&self, transactions: Vec<Transaction>) -> Result<(), FinanceError> {
        let mut data = self
            .data
            .write()
            .map_err(|e| FinanceError::Storage(format!("Failed to acquire write lock: {}", e)))?;
        *data = transactions;
        Ok(())
    }

    /// Save the full list, including when it is empty
    pub fn save(&self) -> Result<(), FinanceError> {
        let data = self
            .data
            .read()
            .map_err(|e| FinanceError::Storage(format!("Failed to acquire read lock: {}", e)))?;

        tracing::debug!(count = data.len(), "persisting transactions");
        set_json(self.store.as_ref(), TRANSACTIONS_KEY, data.as_slice())
    }

    /// Get a transaction by ID
    pub fn get(&self, id: &TransactionId) -> Result<Option<Transaction>, FinanceError> {
        let data = self
            .data
            .read()
            .map_err(|e| FinanceError::Storage(format!("Failed to acquire read lock: {}", e)))?;

        Ok(data.iter().find(|t| &t.id == id).cloned())
    }

    /// Get all transactions in insertion order
    pub fn get_all(&self) -> Result<Vec<Transaction>, FinanceError> {
        let data = self
            .data
            .read()
            .map_err(|e| FinanceError::Storage(format!("Failed to acquire read lock: {}", e)))?;

        Ok(data.clone())
    }

    /// Find transactions whose ID starts with `prefix`
    pub fn find_by_prefix(&self, prefix: &str) -> Result<Vec<Transaction>, FinanceError> {
        let data = self
            .data
            .read()
            .map_err(|e| FinanceError::Storage(format!("Failed to acquire read lock: {}", e)))?;

        Ok(data
            .iter()
            .filter(|t| t.id.matches_prefix(prefix))
            .cloned()
            .collect())
    }

    /// Append a transaction
    pub fn insert(&self, txn: Transaction) -> Result<(), FinanceError> {
        let mut data = self
            .data
            .write()
            .map_err(|e| FinanceError::Storage(format!("Failed to acquire write lock: {}", e)))?;

        data.push(txn);
        Ok(())
    }

    /// Replace all fields except the ID of the matching transaction
    ///
    /// Returns the new version, or `None` if no transaction has that ID.
    pub fn update(
        &self,
        id: &TransactionId,
        input: TransactionInput,
    ) -> Result<Option<Transaction>, FinanceError> {
        let mut data = self
            .data
            .write()
            .map_err(|e| FinanceError::Storage(format!("Failed to acquire write lock: {}", e)))?;

        Ok(data.iter_mut().find(|t| &t.id == id).map(|txn| {
            txn.replace(input);
            txn.clone()
        }))
    }

    /// Remove a transaction, keeping the order of the others
    pub fn delete(&self, id: &TransactionId) -> Result<Option<Transaction>, FinanceError> {
        let mut data = self
            .data
            .write()
            .map_err(|e| FinanceError::Storage(format!("Failed to acquire write lock: {}", e)))?;

        let index = data.iter().position(|t| &t.id == id);
        Ok(index.map(|index| data.remove(index)))
    }

    /// Count transactions
    pub fn count(&self) -> Result<usize, FinanceError> {
        let data = self
            .data
            .read()
            .map_err(|e| FinanceError::Storage(format!("Failed to acquire read lock: {}", e)))?;

        Ok(data.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Money;
    use crate::storage::kv::{get_json, MemoryStore};

    fn create_test_repo() -> (Arc<MemoryStore>, TransactionRepository) {
        let store = Arc::new(MemoryStore::new());
        let repo = TransactionRepository::new(store.clone());
        (store, repo)
    }

    fn expense(description: &str, cents: i64) -> Transaction {
        Transaction::new(TransactionInput::expense(
            description,
            Money::from_cents(cents),
            "Food",
            "2025-01-15",
        ))
    }

    #[test]
    fn test_insert_and_get() {
        let (_store, repo) = create_test_repo();
        let txn = expense("Lunch", 3000);
        let id = txn.id.clone();

        repo.insert(txn).unwrap();

        let retrieved = repo.get(&id).unwrap().unwrap();
        assert_eq!(retrieved.amount.cents(), 3000);
        assert_eq!(repo.count().unwrap(), 1);
    }

    #[test]
    fn test_update_missing_is_none() {
        let (_store, repo) = create_test_repo();
        repo.insert(expense("Lunch", 3000)).unwrap();

        let result = repo
            .update(
                &TransactionId::from("nope"),
                TransactionInput::expense("X", Money::from_cents(1), "Food", "2025-01-01"),
            )
            .unwrap();
        assert!(result.is_none());
        assert_eq!(repo.get_all().unwrap()[0].description, "Lunch");
    }

    #[test]
    fn test_delete_preserves_order() {
        let (_store, repo) = create_test_repo();
        let a = expense("A", 100);
        let b = expense("B", 200);
        let c = expense("C", 300);
        let b_id = b.id.clone();

        repo.insert(a).unwrap();
        repo.insert(b).unwrap();
        repo.insert(c).unwrap();

        let removed = repo.delete(&b_id).unwrap().unwrap();
        assert_eq!(removed.description, "B");

        let names: Vec<_> = repo
            .get_all()
            .unwrap()
            .into_iter()
            .map(|t| t.description)
            .collect();
        assert_eq!(names, vec!["A", "C"]);
        assert!(repo.delete(&b_id).unwrap().is_none());
    }

    #[test]
    fn test_save_writes_empty_list() {
        let (store, repo) = create_test_repo();
        repo.save().unwrap();

        let saved: Option<Vec<Transaction>> = get_json(&*store, TRANSACTIONS_KEY).unwrap();
        assert_eq!(saved, Some(Vec::new()));
    }

    #[test]
    fn test_find_by_prefix() {
        let (_store, repo) = create_test_repo();
        let txn = Transaction::with_id(
            TransactionId::from("abc123"),
            TransactionInput::expense("Lunch", Money::from_cents(100), "Food", "2025-01-01"),
        );
        repo.insert(txn).unwrap();

        assert_eq!(repo.find_by_prefix("abc").unwrap().len(), 1);
        assert!(repo.find_by_prefix("xyz").unwrap().is_empty());
    }
}

//! Transaction service
//!
//! Every mutation persists the full transaction list before returning.

use crate::error::{FinanceError, FinanceResult};
use crate::models::{Month, Transaction, TransactionId, TransactionInput};
use crate::storage::Storage;

/// Service for transaction management
pub struct TransactionService<'a> {
    storage: &'a Storage,
}

/// Trim text fields, then validate
fn prepare(mut input: TransactionInput) -> FinanceResult<TransactionInput> {
    input.description = input.description.trim().to_string();
    input.category = input.category.trim().to_string();
    input.date = input.date.trim().to_string();

    input
        .validate()
        .map_err(|e| FinanceError::Validation(e.to_string()))?;
    Ok(input)
}

impl<'a> TransactionService<'a> {
    pub fn new(storage: &'a Storage) -> Self {
        Self { storage }
    }

    /// Record a new transaction under a fresh ID
    pub fn add(&self, input: TransactionInput) -> FinanceResult<Transaction> {
        let input = prepare(input)?;
        self.warn_on_unknown_category(&input.category)?;

        let txn = Transaction::new(input);
        self.storage.transactions.insert(txn.clone())?;
        self.storage.transactions.save()?;

        tracing::info!(id = %txn.id, kind = %txn.kind, "transaction added");
        Ok(txn)
    }

    /// Replace every field except the ID
    ///
    /// Returns `Ok(None)` when no transaction has this ID; the list is left
    /// as it was.
    pub fn update(
        &self,
        id: &TransactionId,
        input: TransactionInput,
    ) -> FinanceResult<Option<Transaction>> {
        let input = prepare(input)?;
        self.warn_on_unknown_category(&input.category)?;

        let result = self.storage.transactions.update(id, input)?;
        self.storage.transactions.save()?;

        match result {
            Some(after) => {
                tracing::info!(id = %after.id, "transaction updated");
                Ok(Some(after))
            }
            None => {
                tracing::debug!(id = %id, "update of unknown transaction ignored");
                Ok(None)
            }
        }
    }

    /// Remove a transaction; `Ok(false)` when the ID is unknown
    pub fn delete(&self, id: &TransactionId) -> FinanceResult<bool> {
        let removed = self.storage.transactions.delete(id)?;
        self.storage.transactions.save()?;

        match removed {
            Some(txn) => {
                tracing::info!(id = %txn.id, "transaction deleted");
                Ok(true)
            }
            None => {
                tracing::debug!(id = %id, "delete of unknown transaction ignored");
                Ok(false)
            }
        }
    }

    pub fn get(&self, id: &TransactionId) -> FinanceResult<Option<Transaction>> {
        self.storage.transactions.get(id)
    }

    /// Find a transaction by full ID or unambiguous ID prefix
    pub fn find(&self, identifier: &str) -> FinanceResult<Option<Transaction>> {
        let identifier = identifier.trim();
        if let Some(txn) = self.get(&TransactionId::from(identifier))? {
            return Ok(Some(txn));
        }

        let mut matches = self.storage.transactions.find_by_prefix(identifier)?;
        match matches.len() {
            0 => Ok(None),
            1 => Ok(matches.pop()),
            n => Err(FinanceError::Validation(format!(
                "'{}' matches {} transactions; use a longer ID",
                identifier, n
            ))),
        }
    }

    /// All transactions in insertion order, optionally limited to one month
    pub fn list(&self, month: Option<Month>) -> FinanceResult<Vec<Transaction>> {
        let mut transactions = self.storage.transactions.get_all()?;
        if let Some(month) = month {
            transactions.retain(|t| month.matches(&t.date));
        }
        Ok(transactions)
    }

    pub fn count(&self) -> FinanceResult<usize> {
        self.storage.transactions.count()
    }

    fn warn_on_unknown_category(&self, name: &str) -> FinanceResult<()> {
        if self.storage.categories.get_by_name(name)?.is_none() {
            tracing::warn!(category = name, "transaction refers to an unknown category");
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Money;
    use crate::storage::kv::{get_json, TRANSACTIONS_KEY};

    fn create_test_storage() -> Storage {
        let storage = Storage::in_memory();
        storage.load_all().unwrap();
        storage
    }

    fn lunch() -> TransactionInput {
        TransactionInput::expense("Lunch", Money::from_cents(3000), "Food", "2025-01-15")
    }

    #[test]
    fn test_add_assigns_unique_ids_and_persists() {
        let storage = create_test_storage();
        let service = TransactionService::new(&storage);

        let a = service.add(lunch()).unwrap();
        let b = service.add(lunch()).unwrap();
        assert_ne!(a.id, b.id);

        let saved: Vec<Transaction> = get_json(storage.store(), TRANSACTIONS_KEY)
            .unwrap()
            .unwrap();
        assert_eq!(saved, vec![a, b]);
    }

    #[test]
    fn test_add_trims_and_validates() {
        let storage = create_test_storage();
        let service = TransactionService::new(&storage);

        let txn = service
            .add(TransactionInput::expense(
                "  Coffee ",
                Money::from_cents(450),
                " Food ",
                "2025-01-15",
            ))
            .unwrap();
        assert_eq!(txn.description, "Coffee");
        assert_eq!(txn.category, "Food");

        let bad = [
            TransactionInput::expense("   ", Money::from_cents(100), "Food", "2025-01-15"),
            TransactionInput::expense("X", Money::zero(), "Food", "2025-01-15"),
            TransactionInput::expense("X", Money::from_cents(-5), "Food", "2025-01-15"),
            TransactionInput::expense("X", Money::from_cents(100), "", "2025-01-15"),
            TransactionInput::expense("X", Money::from_cents(100), "Food", "2025-02-30"),
            TransactionInput::expense("X", Money::from_cents(100), "Food", "15/01/2025"),
        ];
        for input in bad {
            let err = service.add(input).unwrap_err();
            assert!(err.is_validation());
        }
        assert_eq!(service.count().unwrap(), 1);
    }

    #[test]
    fn test_update_replaces_fields_keeps_id() {
        let storage = create_test_storage();
        let service = TransactionService::new(&storage);
        let txn = service.add(lunch()).unwrap();

        let updated = service
            .update(
                &txn.id,
                TransactionInput::income("Refund", Money::from_cents(1200), "Sales", "2025-02-01"),
            )
            .unwrap()
            .unwrap();

        assert_eq!(updated.id, txn.id);
        assert!(updated.is_income());
        assert_eq!(service.get(&txn.id).unwrap().unwrap().description, "Refund");
    }

    #[test]
    fn test_update_and_delete_unknown_are_noops() {
        let storage = create_test_storage();
        let service = TransactionService::new(&storage);
        service.add(lunch()).unwrap();

        let missing = TransactionId::from("does-not-exist");
        assert!(service.update(&missing, lunch()).unwrap().is_none());
        assert!(!service.delete(&missing).unwrap());
        assert_eq!(service.count().unwrap(), 1);
    }

    #[test]
    fn test_delete_preserves_order_and_persists_empty() {
        let storage = create_test_storage();
        let service = TransactionService::new(&storage);

        let a = service.add(lunch()).unwrap();
        let b = service.add(lunch()).unwrap();
        let c = service.add(lunch()).unwrap();

        assert!(service.delete(&b.id).unwrap());
        let ids: Vec<_> = service.list(None).unwrap().into_iter().map(|t| t.id).collect();
        assert_eq!(ids, vec![a.id.clone(), c.id.clone()]);

        service.delete(&a.id).unwrap();
        service.delete(&c.id).unwrap();
        let saved: Vec<Transaction> = get_json(storage.store(), TRANSACTIONS_KEY)
            .unwrap()
            .unwrap();
        assert!(saved.is_empty());
    }

    #[test]
    fn test_list_by_month() {
        let storage = create_test_storage();
        let service = TransactionService::new(&storage);
        service.add(lunch()).unwrap();
        service
            .add(TransactionInput::expense(
                "Dinner",
                Money::from_cents(2000),
                "Food",
                "2025-02-03",
            ))
            .unwrap();

        let january = service.list(Some(Month::new(2025, 1).unwrap())).unwrap();
        assert_eq!(january.len(), 1);
        assert_eq!(january[0].description, "Lunch");
    }

    #[test]
    fn test_find_by_prefix() {
        let storage = create_test_storage();
        let service = TransactionService::new(&storage);
        let txn = service.add(lunch()).unwrap();

        let prefix = &txn.id.as_str()[..8];
        assert_eq!(service.find(prefix).unwrap().unwrap().id, txn.id);
        assert_eq!(service.find(txn.id.as_str()).unwrap().unwrap().id, txn.id);
        assert!(service.find("zzzz").unwrap().is_none());
    }
}

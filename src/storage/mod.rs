//! Storage layer
//!
//! Collections are persisted as JSON documents in a [`KeyValueStore`]. The
//! [`Storage`] coordinator owns the repositories and runs the versioned load
//! step.

pub mod categories;
pub mod file_io;
pub mod init;
pub mod kv;
pub mod migration;
pub mod transactions;

use std::sync::Arc;

use serde_json::Value;

pub use categories::CategoryRepository;
pub use init::initialize_storage;
pub use kv::{FileStore, KeyValueStore, MemoryStore};
pub use migration::{unreadable_key, Loaded, StoredShape};
pub use transactions::TransactionRepository;

use crate::config::paths::FinancePaths;
use crate::error::{FinanceError, FinanceResult};
use crate::models::Theme;

use kv::{CATEGORIES_KEY, THEME_KEY, TRANSACTIONS_KEY};

/// What happened during [`Storage::load_all`]
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LoadReport {
    pub transactions: usize,
    pub categories: usize,
    /// Legacy expenses were converted and written under the canonical key
    pub migrated_transactions: bool,
    /// Untyped categories were defaulted to expense and re-written
    pub migrated_categories: bool,
    /// No categories were stored; the built-in set was written
    pub seeded_categories: bool,
    /// Records that could not be decoded, moved to their `-unreadable` key
    pub skipped: usize,
}

/// Main storage coordinator that provides access to all repositories
pub struct Storage {
    store: Arc<dyn KeyValueStore>,
    pub transactions: TransactionRepository,
    pub categories: CategoryRepository,
}

impl Storage {
    /// File-backed storage under `paths`
    pub fn new(paths: &FinancePaths) -> Result<Self, FinanceError> {
        paths.ensure_directories()?;

        let store: Arc<dyn KeyValueStore> = Arc::new(FileStore::new(paths.data_dir()));
        Ok(Self::with_store(store))
    }

    /// Storage over an arbitrary key-value backend
    pub fn with_store(store: Arc<dyn KeyValueStore>) -> Self {
        Self {
            transactions: TransactionRepository::new(store.clone()),
            categories: CategoryRepository::new(store.clone()),
            store,
        }
    }

    /// Empty in-memory storage
    pub fn in_memory() -> Self {
        Self::with_store(Arc::new(MemoryStore::new()))
    }

    /// The underlying key-value backend
    pub fn store(&self) -> &dyn KeyValueStore {
        self.store.as_ref()
    }

    /// Load both collections, migrating and seeding as needed
    ///
    /// Anything migrated or seeded is written back in canonical form before
    /// this returns; the legacy expenses key is never written. Records that
    /// cannot be decoded are first copied to their `-unreadable` side key,
    /// so rewriting a collection never loses them.
    pub fn load_all(&self) -> FinanceResult<LoadReport> {
        let transactions = migration::load_transactions(self.store())?;
        let categories = migration::load_categories(self.store())?;

        let report = LoadReport {
            transactions: transactions.records.len(),
            categories: categories.records.len(),
            migrated_transactions: transactions.migrated,
            migrated_categories: categories.migrated,
            seeded_categories: categories.seeded,
            skipped: transactions.skipped() + categories.skipped(),
        };

        self.set_aside(TRANSACTIONS_KEY, &transactions.rejected)?;
        self.set_aside(CATEGORIES_KEY, &categories.rejected)?;

        let persist_transactions = transactions.needs_persist();
        let persist_categories = categories.needs_persist();

        self.transactions.replace_all(transactions.records)?;
        self.categories.replace_all(categories.records)?;

        if persist_transactions {
            self.transactions.save()?;
        }
        if persist_categories {
            self.categories.save()?;
        }

        tracing::debug!(?report, "storage loaded");
        Ok(report)
    }

    /// Append undecodable records of `key` to its side key
    fn set_aside(&self, key: &str, rejected: &[Value]) -> FinanceResult<()> {
        if rejected.is_empty() {
            return Ok(());
        }

        let side_key = unreadable_key(key);
        let mut kept: Vec<Value> = kv::get_json(self.store(), &side_key)?.unwrap_or_default();
        for item in rejected {
            if !kept.contains(item) {
                kept.push(item.clone());
            }
        }

        tracing::warn!(
            key = %side_key,
            count = rejected.len(),
            "moved unreadable records aside"
        );
        kv::set_json(self.store(), &side_key, &kept)
    }

    /// Stored theme preference; light when unset
    pub fn theme(&self) -> FinanceResult<Theme> {
        let raw = match self.store.get(THEME_KEY)? {
            Some(raw) => raw,
            None => return Ok(Theme::default()),
        };

        // Accept both the JSON string we write and a bare word
        let value = serde_json::from_str::<String>(&raw).unwrap_or(raw);
        Ok(if value.trim() == "dark" {
            Theme::Dark
        } else {
            Theme::Light
        })
    }

    /// Persist the theme preference
    pub fn set_theme(&self, theme: Theme) -> FinanceResult<()> {
        kv::set_json(self.store(), THEME_KEY, &theme)
    }
}

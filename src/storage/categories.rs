//! Category repository
//!
//! Categories only accumulate: there is no delete. The whole list is written
//! under `finance-categories` on save.

use std::sync::{Arc, RwLock};

use crate::error::FinanceError;
use crate::models::{Category, CategoryId};

use super::kv::{set_json, KeyValueStore, CATEGORIES_KEY};

/// Repository for category persistence
pub struct CategoryRepository {
    store: Arc<dyn KeyValueStore>,
    categories: RwLock<Vec<Category>>,
}

impl CategoryRepository {
    /// Create a new category repository
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        Self {
            store,
            categories: RwLock::new(Vec::new()),
        }
    }

    /// Replace the in-memory list with loaded records
    pub fn replace_all(&self, list: Vec<Category>) -> Result<(), FinanceError> {
        let mut categories = self
            .categories
            .write()
            .map_err(|e| FinanceError::Storage(format!("Failed to acquire write lock: {}", e)))?;
        *categories = list;
        Ok(())
    }

    /// Save the full list
    pub fn save(&self) -> Result<(), FinanceError> {
        let categories = self
            .categories
            .read()
            .map_err(|e| FinanceError::Storage(format!("Failed to acquire read lock: {}", e)))?;

        tracing::debug!(count = categories.len(), "persisting categories");
        set_json(self.store.as_ref(), CATEGORIES_KEY, categories.as_slice())
    }

    /// Get a category by ID
    pub fn get(&self, id: &CategoryId) -> Result<Option<Category>, FinanceError> {
        let categories = self
            .categories
            .read()
            .map_err(|e| FinanceError::Storage(format!("Failed to acquire read lock: {}", e)))?;

        Ok(categories.iter().find(|c| &c.id == id).cloned())
    }

    /// Get the first category with this name (case-insensitive)
    ///
    /// Names are not unique; the earliest match wins, the same way
    /// transactions resolve their category for display.
    pub fn get_by_name(&self, name: &str) -> Result<Option<Category>, FinanceError> {
        let categories = self
            .categories
            .read()
            .map_err(|e| FinanceError::Storage(format!("Failed to acquire read lock: {}", e)))?;

        let name_lower = name.trim().to_lowercase();
        Ok(categories
            .iter()
            .find(|c| c.name.to_lowercase() == name_lower)
            .cloned())
    }

    /// Get all categories in insertion order
    pub fn get_all(&self) -> Result<Vec<Category>, FinanceError> {
        let categories = self
            .categories
            .read()
            .map_err(|e| FinanceError::Storage(format!("Failed to acquire read lock: {}", e)))?;

        Ok(categories.clone())
    }

    /// Append a category
    pub fn insert(&self, category: Category) -> Result<(), FinanceError> {
        let mut categories = self
            .categories
            .write()
            .map_err(|e| FinanceError::Storage(format!("Failed to acquire write lock: {}", e)))?;

        categories.push(category);
        Ok(())
    }

    /// Count categories
    pub fn count(&self) -> Result<usize, FinanceError> {
        let categories = self
            .categories
            .read()
            .map_err(|e| FinanceError::Storage(format!("Failed to acquire read lock: {}", e)))?;

        Ok(categories.len())
    }
}

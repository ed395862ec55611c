//! Category service

use crate::error::{FinanceError, FinanceResult};
use crate::models::{Category, CategoryId, CategoryInput, TransactionKind};
use crate::storage::Storage;

/// Service for category management
pub struct CategoryService<'a> {
    storage: &'a Storage,
}

impl<'a> CategoryService<'a> {
    pub fn new(storage: &'a Storage) -> Self {
        Self { storage }
    }

    /// Create a category
    ///
    /// Names are not deduplicated.
    pub fn add(&self, mut input: CategoryInput) -> FinanceResult<Category> {
        input.name = input.name.trim().to_string();
        input.color = input.color.trim().to_string();

        input
            .validate()
            .map_err(|e| FinanceError::Validation(e.to_string()))?;

        let category = Category::new(input);
        self.storage.categories.insert(category.clone())?;
        self.storage.categories.save()?;

        tracing::info!(id = %category.id, name = %category.name, "category added");

        Ok(category)
    }

    /// All categories in insertion order
    pub fn list(&self) -> FinanceResult<Vec<Category>> {
        self.storage.categories.get_all()
    }

    /// Categories a transaction of `kind` can be filed under
    pub fn list_for(&self, kind: TransactionKind) -> FinanceResult<Vec<Category>> {
        let mut categories = self.list()?;
        categories.retain(|c| c.kind.accepts(kind));
        Ok(categories)
    }

    /// Find a category by ID or name
    pub fn find(&self, identifier: &str) -> FinanceResult<Option<Category>> {
        let identifier = identifier.trim();
        if let Some(category) = self
            .storage
            .categories
            .get(&CategoryId::from(identifier))?
        {
            return Ok(Some(category));
        }
        self.storage.categories.get_by_name(identifier)
    }
}

use std::path::PathBuf;

use tracing::warn;

use crate::domain::{Amount, CategorySet, Transaction};

use super::{FileStorage, MemoryStorage, StorageBackend, StorageError};

/// Slot holding the JSON array of transactions.
pub const TRANSACTIONS_SLOT: &str = "transactions";
/// Slot holding `{"expense": [...], "income": [...]}`.
pub const CATEGORIES_SLOT: &str = "categories";
/// Slot holding the JSON-encoded monthly budget number.
pub const BUDGET_SLOT: &str = "budget";

/// Typed access to the three persisted slots. Loads are forgiving: an absent
/// or unparseable slot falls back to the documented default (empty list,
/// seeded categories, zero budget), with corruption logged for diagnostics.
/// Saves are eager and report failures to the caller.
pub struct Repository {
    backend: Box<dyn StorageBackend>,
}

impl Repository {
    pub fn new(backend: Box<dyn StorageBackend>) -> Self {
        Self { backend }
    }

    /// Open a file-backed repository rooted at `dir`.
    pub fn open(dir: impl Into<PathBuf>) -> Result<Self, StorageError> {
        Ok(Self::new(Box::new(FileStorage::open(dir)?)))
    }

    /// An in-memory repository that forgets everything on drop.
    pub fn in_memory() -> Self {
        Self::new(Box::new(MemoryStorage::new()))
    }

    pub fn load_transactions(&self) -> Vec<Transaction> {
        self.load_slot(TRANSACTIONS_SLOT).unwrap_or_default()
    }

    pub fn save_transactions(&mut self, transactions: &[Transaction]) -> Result<(), StorageError> {
        self.save_slot(TRANSACTIONS_SLOT, &transactions)
    }

    pub fn load_categories(&self) -> CategorySet {
        self.load_slot(CATEGORIES_SLOT).unwrap_or_default()
    }

    pub fn save_categories(&mut self, categories: &CategorySet) -> Result<(), StorageError> {
        self.save_slot(CATEGORIES_SLOT, categories)
    }

    pub fn load_budget(&self) -> Amount {
        self.load_slot(BUDGET_SLOT).unwrap_or(0.0)
    }

    pub fn save_budget(&mut self, budget: Amount) -> Result<(), StorageError> {
        self.save_slot(BUDGET_SLOT, &budget)
    }

    fn load_slot<T: serde::de::DeserializeOwned>(&self, slot: &str) -> Option<T> {
        let contents = match self.backend.read(slot) {
            Ok(contents) => contents?,
            Err(e) => {
                warn!(slot, error = %e, "failed to read slot, using default");
                return None;
            }
        };
        match serde_json::from_str(&contents) {
            Ok(value) => Some(value),
            Err(e) => {
                warn!(slot, error = %e, "unparseable slot contents, using default");
                None
            }
        }
    }

    fn save_slot<T: serde::Serialize>(&mut self, slot: &str, value: &T) -> Result<(), StorageError> {
        let contents = serde_json::to_string(value)?;
        self.backend.write(slot, &contents)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{CategoryKind, TransactionType};

    #[test]
    fn test_load_defaults_from_empty_repository() {
        let repo = Repository::in_memory();
        assert!(repo.load_transactions().is_empty());
        assert_eq!(repo.load_categories(), CategorySet::default());
        assert_eq!(repo.load_budget(), 0.0);
    }

    #[test]
    fn test_save_and_load_roundtrip() {
        let mut repo = Repository::in_memory();

        let transactions = vec![Transaction {
            id: 1700000000000,
            description: "Mercado".into(),
            product_name: "Mercado".into(),
            amount: -80.0,
            transaction_type: TransactionType::Expense,
            category: "Alimentação".into(),
            date: "2024-03-01".into(),
            item_description: "Compra da semana".into(),
            expense_type: None,
            payment_method: None,
        }];
        repo.save_transactions(&transactions).unwrap();
        assert_eq!(repo.load_transactions(), transactions);

        let mut categories = CategorySet::default();
        categories.add("Pets", CategoryKind::Expense).unwrap();
        repo.save_categories(&categories).unwrap();
        assert_eq!(repo.load_categories(), categories);

        repo.save_budget(1500.0).unwrap();
        assert_eq!(repo.load_budget(), 1500.0);
    }

    #[test]
    fn test_corrupt_slot_falls_back_to_default() {
        let mut backend = MemoryStorage::new();
        backend.write(TRANSACTIONS_SLOT, "{not json").unwrap();
        backend.write(BUDGET_SLOT, "\"many\"").unwrap();

        let repo = Repository::new(Box::new(backend));
        assert!(repo.load_transactions().is_empty());
        assert_eq!(repo.load_budget(), 0.0);
    }
}

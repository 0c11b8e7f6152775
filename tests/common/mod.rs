// Allow dead_code because these helpers are used across different test files
// which are compiled separately
#![allow(dead_code)]

use bolso::application::{TransactionInput, TransactionStore};
use bolso::domain::{ExpenseType, PaymentMethod, TransactionType};
use bolso::storage::Repository;

/// A store over throwaway in-memory storage.
pub fn test_store() -> TransactionStore {
    TransactionStore::new(Repository::in_memory())
}

/// A valid expense payload: variable, paid with Pix, category Alimentação.
pub fn expense_input(description: &str, amount: f64, date: &str) -> TransactionInput {
    TransactionInput {
        description: description.to_string(),
        amount,
        transaction_type: TransactionType::Expense,
        category: "Alimentação".to_string(),
        date: date.to_string(),
        item_description: format!("{description} (detalhe)"),
        expense_type: Some(ExpenseType::Variavel),
        payment_method: Some(PaymentMethod::Pix),
    }
}

/// A valid income payload, category Salário.
pub fn income_input(description: &str, amount: f64, date: &str) -> TransactionInput {
    TransactionInput {
        description: description.to_string(),
        amount,
        transaction_type: TransactionType::Income,
        category: "Salário".to_string(),
        date: date.to_string(),
        item_description: format!("{description} (detalhe)"),
        expense_type: None,
        payment_method: None,
    }
}

/// Seed a store with a small March 2024 dataset:
/// income 3000.00, expenses 120.50 + 79.50 (total 200.00).
pub fn seed_march_2024(store: &mut TransactionStore) {
    store
        .add_or_update_transaction(income_input("Salário", 3000.0, "2024-03-05"))
        .unwrap();
    store
        .add_or_update_transaction(expense_input("Mercado", 120.5, "2024-03-10"))
        .unwrap();
    store
        .add_or_update_transaction(expense_input("Restaurante", 79.5, "2024-03-12"))
        .unwrap();
}

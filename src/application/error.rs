use thiserror::Error;

use crate::domain::{Amount, CategoryError};
use crate::storage::StorageError;

/// Every failure a store operation can report. These are structured result
/// values for the presentation layer to surface, not program errors: all of
/// them are recoverable by retrying with corrected input.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Item name cannot be empty")]
    EmptyDescription,

    #[error("Transaction amount must be greater than zero")]
    InvalidAmount,

    #[error("Please select a category for the transaction")]
    MissingCategory,

    #[error("Please select the transaction date")]
    MissingDate,

    #[error("Transaction detail description cannot be empty")]
    EmptyItemDescription,

    #[error("Please select fixed or variable for the expense")]
    MissingExpenseType,

    #[error("Please select a payment method for the expense")]
    MissingPaymentMethod,

    #[error("{0}")]
    Category(#[from] CategoryError),

    #[error("Monthly budget cannot be negative: {0}")]
    NegativeBudget(Amount),

    #[error("Invalid import document: {0}")]
    ImportFormat(String),

    #[error("Could not parse import file: {0}")]
    ImportParse(String),

    #[error("Storage failure: {0}")]
    Storage(#[from] StorageError),
}

use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::io::Write;

use crate::application::TransactionStore;
use crate::domain::{Amount, CategorySet, Transaction};

/// The full-dataset document handed to the user on export, and the shape
/// expected back on import. Field names match the historical format.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExportDocument {
    pub transactions: Vec<Transaction>,
    pub categories: CategorySet,
    #[serde(rename = "monthlyBudget")]
    pub monthly_budget: Amount,
}

/// Writes store snapshots out in the supported formats.
pub struct Exporter<'a> {
    store: &'a TransactionStore,
}

impl<'a> Exporter<'a> {
    pub fn new(store: &'a TransactionStore) -> Self {
        Self { store }
    }

    /// Write the full dataset as pretty-printed JSON. Pure read; the store
    /// is not touched.
    pub fn export_json<W: Write>(&self, mut writer: W) -> Result<ExportDocument> {
        let document = self.store.export_document();
        let json = serde_json::to_string_pretty(&document)?;
        writer.write_all(json.as_bytes())?;
        writer.flush()?;
        Ok(document)
    }

    /// Write the transaction list as a flat CSV. Returns the row count.
    pub fn export_transactions_csv<W: Write>(&self, writer: W) -> Result<usize> {
        let mut csv_writer = csv::Writer::from_writer(writer);

        csv_writer.write_record([
            "id",
            "date",
            "description",
            "type",
            "category",
            "amount",
            "expense_type",
            "payment_method",
            "item_description",
        ])?;

        let mut count = 0;
        for transaction in self.store.transactions() {
            csv_writer.write_record([
                transaction.id.to_string(),
                transaction.date.clone(),
                transaction.description.clone(),
                transaction.transaction_type.to_string(),
                transaction.category.clone(),
                transaction.amount.to_string(),
                transaction
                    .expense_type
                    .map(|e| e.as_str().to_string())
                    .unwrap_or_default(),
                transaction
                    .payment_method
                    .map(|m| m.as_str().to_string())
                    .unwrap_or_default(),
                transaction.item_description.clone(),
            ])?;
            count += 1;
        }

        csv_writer.flush()?;
        Ok(count)
    }
}

use std::io::Read;

use serde::Deserialize;
use tracing::error;

use crate::application::AppError;
use crate::domain::{Amount, Transaction};

/// A parsed, structurally validated import document, ready to hand to
/// `TransactionStore::import_document`. Categories and budget are optional;
/// when present they overwrite the current values field-by-field.
#[derive(Debug, Clone, Deserialize)]
pub struct ImportDocument {
    pub transactions: Vec<Transaction>,
    #[serde(default)]
    pub categories: Option<ImportedCategories>,
    #[serde(rename = "monthlyBudget", default)]
    pub monthly_budget: Option<Amount>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ImportedCategories {
    #[serde(default)]
    pub expense: Option<Vec<String>>,
    #[serde(default)]
    pub income: Option<Vec<String>>,
}

/// The two document shapes accepted on import: the current full-dataset
/// object, and the legacy export format (a bare array of transactions).
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum ImportPayload {
    Document(ImportDocument),
    Legacy(Vec<Transaction>),
}

/// Read and validate an import file. Unreadable or unparseable content is a
/// parse error (logged with its cause). A parseable document still has to
/// pass a shallow structural check: a non-empty transaction array whose
/// first record has a description, a non-zero amount and a date. Either way
/// the caller's state is untouched.
pub fn parse_import<R: Read>(mut reader: R) -> Result<ImportDocument, AppError> {
    let mut contents = String::new();
    reader.read_to_string(&mut contents).map_err(|e| {
        error!(cause = %e, "failed to read import file");
        AppError::ImportParse(e.to_string())
    })?;

    let payload: ImportPayload = serde_json::from_str(&contents).map_err(|e| {
        error!(cause = %e, "failed to parse import file");
        AppError::ImportParse(e.to_string())
    })?;

    let document = match payload {
        ImportPayload::Document(document) => document,
        ImportPayload::Legacy(transactions) => ImportDocument {
            transactions,
            categories: None,
            monthly_budget: None,
        },
    };

    validate_document(&document)?;
    Ok(document)
}

fn validate_document(document: &ImportDocument) -> Result<(), AppError> {
    let Some(first) = document.transactions.first() else {
        return Err(AppError::ImportFormat(
            "document contains no transactions".to_string(),
        ));
    };
    if first.description.is_empty() {
        return Err(AppError::ImportFormat(
            "first transaction has no description".to_string(),
        ));
    }
    if first.amount == 0.0 {
        return Err(AppError::ImportFormat(
            "first transaction has no amount".to_string(),
        ));
    }
    if first.date.is_empty() {
        return Err(AppError::ImportFormat(
            "first transaction has no date".to_string(),
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_full_document() {
        let json = r#"{
            "transactions": [{
                "id": 1700000000000,
                "description": "Mercado",
                "productName": "Mercado",
                "amount": -80.0,
                "type": "expense",
                "category": "Alimentação",
                "date": "2024-03-01",
                "itemDescription": "Compra da semana",
                "expenseType": "variavel",
                "paymentMethod": "Pix"
            }],
            "categories": {"expense": ["Alimentação"], "income": ["Salário"]},
            "monthlyBudget": 1500.0
        }"#;
        let document = parse_import(json.as_bytes()).unwrap();
        assert_eq!(document.transactions.len(), 1);
        assert_eq!(document.monthly_budget, Some(1500.0));
        let categories = document.categories.unwrap();
        assert_eq!(categories.expense.unwrap(), vec!["Alimentação"]);
    }

    #[test]
    fn test_parse_legacy_bare_array() {
        let json = r#"[{
            "id": 1650000000000,
            "description": "Salário",
            "productName": "Salário",
            "amount": 3000.0,
            "type": "income",
            "category": "Salário",
            "date": "2022-04-05"
        }]"#;
        let document = parse_import(json.as_bytes()).unwrap();
        assert_eq!(document.transactions.len(), 1);
        assert!(document.categories.is_none());
        assert!(document.monthly_budget.is_none());
    }

    #[test]
    fn test_empty_transaction_array_is_rejected() {
        let json = r#"{"transactions": []}"#;
        assert!(matches!(
            parse_import(json.as_bytes()),
            Err(AppError::ImportFormat(_))
        ));
    }

    #[test]
    fn test_garbage_is_a_parse_error() {
        assert!(matches!(
            parse_import("{not json".as_bytes()),
            Err(AppError::ImportParse(_))
        ));
    }

    #[test]
    fn test_first_record_must_have_description() {
        let json = r#"{"transactions": [{
            "id": 1,
            "description": "",
            "productName": "",
            "amount": -5.0,
            "type": "expense",
            "category": "Outros",
            "date": "2024-03-01"
        }]}"#;
        assert!(matches!(
            parse_import(json.as_bytes()),
            Err(AppError::ImportFormat(_))
        ));
    }
}

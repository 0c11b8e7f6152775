use chrono::Utc;
use serde::{Deserialize, Serialize};

use super::Amount;

/// Transaction ids are milliseconds since the Unix epoch at creation time,
/// matching the numeric ids found in documents written by older exports.
pub type TransactionId = i64;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransactionType {
    Income,
    Expense,
}

impl TransactionType {
    pub fn as_str(&self) -> &'static str {
        match self {
            TransactionType::Income => "income",
            TransactionType::Expense => "expense",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "income" => Some(TransactionType::Income),
            "expense" => Some(TransactionType::Expense),
            _ => None,
        }
    }

    /// Apply this type's sign convention to a magnitude:
    /// expenses are stored negative, income positive.
    pub fn signed_amount(&self, magnitude: Amount) -> Amount {
        match self {
            TransactionType::Income => magnitude.abs(),
            TransactionType::Expense => -magnitude.abs(),
        }
    }
}

impl std::fmt::Display for TransactionType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Whether an expense is a recurring fixed cost or a variable one.
/// Only meaningful for expenses; income carries no expense type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExpenseType {
    Fixa,
    Variavel,
}

impl ExpenseType {
    pub fn as_str(&self) -> &'static str {
        match self {
            ExpenseType::Fixa => "fixa",
            ExpenseType::Variavel => "variavel",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "fixa" | "fixed" => Some(ExpenseType::Fixa),
            "variavel" | "variable" => Some(ExpenseType::Variavel),
            _ => None,
        }
    }

    /// Display label used in reports.
    pub fn label(&self) -> &'static str {
        match self {
            ExpenseType::Fixa => "Fixa",
            ExpenseType::Variavel => "Variável",
        }
    }
}

impl std::fmt::Display for ExpenseType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// How an expense was paid. Only meaningful for expenses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PaymentMethod {
    Dinheiro,
    Pix,
    CartaoDeCredito,
    CartaoDeDebito,
    Boleto,
    Outro,
}

impl PaymentMethod {
    pub const ALL: [PaymentMethod; 6] = [
        PaymentMethod::Dinheiro,
        PaymentMethod::Pix,
        PaymentMethod::CartaoDeCredito,
        PaymentMethod::CartaoDeDebito,
        PaymentMethod::Boleto,
        PaymentMethod::Outro,
    ];

    /// Canonical form, as stored in documents and shown in reports.
    pub fn as_str(&self) -> &'static str {
        match self {
            PaymentMethod::Dinheiro => "Dinheiro",
            PaymentMethod::Pix => "Pix",
            PaymentMethod::CartaoDeCredito => "Cartão de Crédito",
            PaymentMethod::CartaoDeDebito => "Cartão de Débito",
            PaymentMethod::Boleto => "Boleto",
            PaymentMethod::Outro => "Outro",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "dinheiro" | "cash" => Some(PaymentMethod::Dinheiro),
            "pix" => Some(PaymentMethod::Pix),
            "cartão de crédito" | "cartao de credito" | "credito" | "credit" => {
                Some(PaymentMethod::CartaoDeCredito)
            }
            "cartão de débito" | "cartao de debito" | "debito" | "debit" => {
                Some(PaymentMethod::CartaoDeDebito)
            }
            "boleto" => Some(PaymentMethod::Boleto),
            "outro" | "other" => Some(PaymentMethod::Outro),
            _ => None,
        }
    }
}

impl std::fmt::Display for PaymentMethod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// One recorded income or expense event.
///
/// Serialized field names follow the historical document format, which is
/// also the on-disk slot format: `productName` mirrors `description` (older
/// consumers read either), and the expense-only fields serialize as empty
/// strings when absent so that income records keep their historical shape.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    pub id: TransactionId,
    pub description: String,
    #[serde(rename = "productName", default)]
    pub product_name: String,
    pub amount: Amount,
    #[serde(rename = "type")]
    pub transaction_type: TransactionType,
    pub category: String,
    pub date: String,
    #[serde(rename = "itemDescription", default)]
    pub item_description: String,
    #[serde(rename = "expenseType", default, with = "expense_type_compat")]
    pub expense_type: Option<ExpenseType>,
    #[serde(rename = "paymentMethod", default, with = "payment_method_compat")]
    pub payment_method: Option<PaymentMethod>,
}

impl Transaction {
    pub fn is_expense(&self) -> bool {
        self.transaction_type == TransactionType::Expense
    }

    pub fn is_income(&self) -> bool {
        self.transaction_type == TransactionType::Income
    }
}

/// Generate a fresh id: current time in milliseconds, bumped until it does
/// not collide with any id already in the list.
pub fn unique_id(transactions: &[Transaction]) -> TransactionId {
    let mut id = Utc::now().timestamp_millis();
    while transactions.iter().any(|t| t.id == id) {
        id += 1;
    }
    id
}

/// Older records store the expense-only enums as empty strings on income
/// rows and omit them entirely on the oldest rows. Both forms map to `None`.
mod expense_type_compat {
    use serde::de::Error;
    use serde::{Deserialize, Deserializer, Serializer};

    use super::ExpenseType;

    pub fn serialize<S: Serializer>(
        value: &Option<ExpenseType>,
        serializer: S,
    ) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(value.map(|v| v.as_str()).unwrap_or(""))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<Option<ExpenseType>, D::Error> {
        match Option::<String>::deserialize(deserializer)?.as_deref() {
            None | Some("") => Ok(None),
            Some(raw) => ExpenseType::from_str(raw)
                .map(Some)
                .ok_or_else(|| D::Error::custom(format!("unknown expense type: {raw}"))),
        }
    }
}

mod payment_method_compat {
    use serde::de::Error;
    use serde::{Deserialize, Deserializer, Serializer};

    use super::PaymentMethod;

    pub fn serialize<S: Serializer>(
        value: &Option<PaymentMethod>,
        serializer: S,
    ) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(value.map(|v| v.as_str()).unwrap_or(""))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<Option<PaymentMethod>, D::Error> {
        match Option::<String>::deserialize(deserializer)?.as_deref() {
            None | Some("") => Ok(None),
            Some(raw) => PaymentMethod::from_str(raw)
                .map(Some)
                .ok_or_else(|| D::Error::custom(format!("unknown payment method: {raw}"))),
        }
    }
}

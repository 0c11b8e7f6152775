use serde::{Deserialize, Serialize};

use super::Transaction;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FilterKind {
    None,
    Day,
    Month,
    Year,
}

impl FilterKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            FilterKind::None => "none",
            FilterKind::Day => "day",
            FilterKind::Month => "month",
            FilterKind::Year => "year",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "none" => Some(FilterKind::None),
            "day" => Some(FilterKind::Day),
            "month" => Some(FilterKind::Month),
            "year" => Some(FilterKind::Year),
            _ => None,
        }
    }
}

impl std::fmt::Display for FilterKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// The active view restriction applied before every aggregate computation.
/// Day filters match the full date; month and year filters match the date's
/// string prefix (`"2024-03"`, `"2024"`). Session-local, never persisted.
#[derive(Debug, Clone, PartialEq)]
pub struct FilterSpec {
    pub kind: FilterKind,
    pub value: String,
}

impl Default for FilterSpec {
    fn default() -> Self {
        Self {
            kind: FilterKind::None,
            value: String::new(),
        }
    }
}

impl FilterSpec {
    pub fn new(kind: FilterKind, value: impl Into<String>) -> Self {
        Self {
            kind,
            value: value.into(),
        }
    }

    /// A filter with kind `none` or an empty value restricts nothing.
    pub fn is_active(&self) -> bool {
        self.kind != FilterKind::None && !self.value.is_empty()
    }

    /// Whether `transaction` is visible under this filter. Transactions
    /// without a date are excluded whenever a filter is active.
    pub fn matches(&self, transaction: &Transaction) -> bool {
        if !self.is_active() {
            return true;
        }
        if transaction.date.is_empty() {
            return false;
        }
        match self.kind {
            FilterKind::None => true,
            FilterKind::Day => transaction.date == self.value,
            FilterKind::Month | FilterKind::Year => transaction.date.starts_with(&self.value),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Transaction, TransactionType};

    fn tx_on(date: &str) -> Transaction {
        Transaction {
            id: 1,
            description: "x".into(),
            product_name: "x".into(),
            amount: -1.0,
            transaction_type: TransactionType::Expense,
            category: "Outros".into(),
            date: date.into(),
            item_description: "x".into(),
            expense_type: None,
            payment_method: None,
        }
    }

    #[test]
    fn test_inactive_filter_matches_everything() {
        let spec = FilterSpec::default();
        assert!(spec.matches(&tx_on("2024-03-01")));
        assert!(spec.matches(&tx_on("")));

        // A kind without a value is also inactive.
        let spec = FilterSpec::new(FilterKind::Month, "");
        assert!(spec.matches(&tx_on("")));
    }

    #[test]
    fn test_day_filter_is_exact() {
        let spec = FilterSpec::new(FilterKind::Day, "2024-03-01");
        assert!(spec.matches(&tx_on("2024-03-01")));
        assert!(!spec.matches(&tx_on("2024-03-02")));
    }

    #[test]
    fn test_month_and_year_filters_use_prefix() {
        let month = FilterSpec::new(FilterKind::Month, "2024-03");
        assert!(month.matches(&tx_on("2024-03-15")));
        assert!(!month.matches(&tx_on("2024-04-01")));

        let year = FilterSpec::new(FilterKind::Year, "2024");
        assert!(year.matches(&tx_on("2024-12-31")));
        assert!(!year.matches(&tx_on("2023-12-31")));
    }

    #[test]
    fn test_active_filter_excludes_dateless_transactions() {
        let spec = FilterSpec::new(FilterKind::Year, "2024");
        assert!(!spec.matches(&tx_on("")));
    }
}

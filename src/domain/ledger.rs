use chrono::Local;

use super::{Amount, Transaction};

/// Net balance: the signed sum over the given transactions.
pub fn total_balance<'a, I>(transactions: I) -> Amount
where
    I: IntoIterator<Item = &'a Transaction>,
{
    transactions.into_iter().map(|t| t.amount).sum()
}

/// Sum of income amounts (already positive by the sign invariant).
pub fn total_income<'a, I>(transactions: I) -> Amount
where
    I: IntoIterator<Item = &'a Transaction>,
{
    transactions
        .into_iter()
        .filter(|t| t.is_income())
        .map(|t| t.amount)
        .sum()
}

/// Sum of expense magnitudes, as a positive number.
pub fn total_expenses<'a, I>(transactions: I) -> Amount
where
    I: IntoIterator<Item = &'a Transaction>,
{
    transactions
        .into_iter()
        .filter(|t| t.is_expense())
        .map(|t| t.amount.abs())
        .sum()
}

/// Sum of expense magnitudes for dates starting with `month_prefix`
/// (`"YYYY-MM"`). Used for budget tracking, always over the full list.
pub fn expenses_in_month<'a, I>(transactions: I, month_prefix: &str) -> Amount
where
    I: IntoIterator<Item = &'a Transaction>,
{
    transactions
        .into_iter()
        .filter(|t| t.is_expense() && t.date.starts_with(month_prefix))
        .map(|t| t.amount.abs())
        .sum()
}

/// The current local calendar month as a `"YYYY-MM"` prefix.
pub fn current_month_prefix() -> String {
    Local::now().format("%Y-%m").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{ExpenseType, PaymentMethod, TransactionType};

    fn tx(amount: Amount, transaction_type: TransactionType, date: &str) -> Transaction {
        Transaction {
            id: 1,
            description: "x".into(),
            product_name: "x".into(),
            amount,
            transaction_type,
            category: "Outros".into(),
            date: date.into(),
            item_description: "x".into(),
            expense_type: matches!(transaction_type, TransactionType::Expense)
                .then_some(ExpenseType::Variavel),
            payment_method: matches!(transaction_type, TransactionType::Expense)
                .then_some(PaymentMethod::Pix),
        }
    }

    #[test]
    fn test_totals_on_empty_list() {
        let transactions: Vec<Transaction> = vec![];
        assert_eq!(total_balance(&transactions), 0.0);
        assert_eq!(total_income(&transactions), 0.0);
        assert_eq!(total_expenses(&transactions), 0.0);
    }

    #[test]
    fn test_balance_is_income_minus_expenses() {
        let transactions = vec![
            tx(3000.0, TransactionType::Income, "2024-03-05"),
            tx(-120.5, TransactionType::Expense, "2024-03-10"),
            tx(-79.5, TransactionType::Expense, "2024-03-12"),
        ];
        assert_eq!(total_income(&transactions), 3000.0);
        assert_eq!(total_expenses(&transactions), 200.0);
        assert_eq!(
            total_balance(&transactions),
            total_income(&transactions) - total_expenses(&transactions)
        );
    }

    #[test]
    fn test_expenses_in_month_ignores_other_months_and_income() {
        let transactions = vec![
            tx(-50.0, TransactionType::Expense, "2024-03-01"),
            tx(-30.0, TransactionType::Expense, "2024-03-28"),
            tx(-99.0, TransactionType::Expense, "2024-04-01"),
            tx(500.0, TransactionType::Income, "2024-03-15"),
        ];
        assert_eq!(expenses_in_month(&transactions, "2024-03"), 80.0);
        assert_eq!(expenses_in_month(&transactions, "2024-04"), 99.0);
        assert_eq!(expenses_in_month(&transactions, "2025-01"), 0.0);
    }

    #[test]
    fn test_current_month_prefix_shape() {
        let prefix = current_month_prefix();
        assert_eq!(prefix.len(), 7);
        assert_eq!(&prefix[4..5], "-");
    }
}

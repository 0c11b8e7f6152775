use serde::Serialize;

use crate::domain::{Amount, ExpenseType, Transaction};

/// Colors for the category and payment-method breakdowns, assigned by group
/// position and recycled when there are more groups than colors.
pub const CATEGORY_PALETTE: [&str; 7] = [
    "#41B883", "#E46651", "#00D8FF", "#DD1B16", "#2C3E50", "#F38B00", "#A9A9A9",
];

/// Colors for the income-vs-expense comparison (green/red).
pub const INCOME_EXPENSE_PALETTE: [&str; 2] = ["#2ecc71", "#e74c3c"];

/// Colors for the fixed-vs-variable breakdown.
pub const EXPENSE_TYPE_PALETTE: [&str; 2] = ["#3498db", "#9b59b6"];

/// Chart-ready aggregate: parallel label/value arrays plus the display color
/// for each group. The consumer decides how to draw it.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartData {
    pub labels: Vec<String>,
    pub values: Vec<Amount>,
    pub colors: Vec<String>,
}

impl ChartData {
    fn new(groups: Vec<(String, Amount)>, palette: &[&str]) -> Self {
        let (labels, values): (Vec<String>, Vec<Amount>) = groups.into_iter().unzip();
        let colors = (0..labels.len())
            .map(|i| palette[i % palette.len()].to_string())
            .collect();
        Self {
            labels,
            values,
            colors,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }
}

/// Sum absolute amounts per key, preserving first-encounter order.
fn sum_by_key<'a, I, F>(transactions: I, key: F) -> Vec<(String, Amount)>
where
    I: IntoIterator<Item = &'a Transaction>,
    F: Fn(&Transaction) -> Option<String>,
{
    let mut groups: Vec<(String, Amount)> = Vec::new();
    for transaction in transactions {
        let Some(label) = key(transaction) else {
            continue;
        };
        match groups.iter_mut().find(|(existing, _)| *existing == label) {
            Some((_, total)) => *total += transaction.amount.abs(),
            None => groups.push((label, transaction.amount.abs())),
        }
    }
    groups
}

/// Expenses grouped by category.
pub fn expenses_by_category<'a, I>(transactions: I) -> ChartData
where
    I: IntoIterator<Item = &'a Transaction>,
{
    let groups = sum_by_key(transactions, |t| t.is_expense().then(|| t.category.clone()));
    ChartData::new(groups, &CATEGORY_PALETTE)
}

/// All transactions (both types) grouped by category, by absolute amount.
pub fn category_distribution<'a, I>(transactions: I) -> ChartData
where
    I: IntoIterator<Item = &'a Transaction>,
{
    let groups = sum_by_key(transactions, |t| Some(t.category.clone()));
    ChartData::new(groups, &CATEGORY_PALETTE)
}

/// Expenses split into fixed and variable. The label set is fixed, and a
/// side with no spending is omitted rather than shown as zero.
pub fn expense_type_distribution<'a, I>(transactions: I) -> ChartData
where
    I: IntoIterator<Item = &'a Transaction>,
{
    let mut fixed = 0.0;
    let mut variable = 0.0;
    for transaction in transactions {
        match transaction.expense_type {
            Some(ExpenseType::Fixa) => fixed += transaction.amount.abs(),
            Some(ExpenseType::Variavel) => variable += transaction.amount.abs(),
            None => {}
        }
    }

    let mut groups = Vec::new();
    if fixed > 0.0 {
        groups.push((ExpenseType::Fixa.label().to_string(), fixed));
    }
    if variable > 0.0 {
        groups.push((ExpenseType::Variavel.label().to_string(), variable));
    }
    ChartData::new(groups, &EXPENSE_TYPE_PALETTE)
}

/// Expenses grouped by payment method.
pub fn payment_method_distribution<'a, I>(transactions: I) -> ChartData
where
    I: IntoIterator<Item = &'a Transaction>,
{
    let groups = sum_by_key(transactions, |t| {
        t.payment_method.map(|m| m.as_str().to_string())
    });
    ChartData::new(groups, &CATEGORY_PALETTE)
}

/// Income and expense totals side by side. Both labels are always present,
/// even when one side is zero.
pub fn income_vs_expense<'a, I>(transactions: I) -> ChartData
where
    I: IntoIterator<Item = &'a Transaction>,
{
    let mut income = 0.0;
    let mut expense = 0.0;
    for transaction in transactions {
        if transaction.is_income() {
            income += transaction.amount;
        } else {
            expense += transaction.amount.abs();
        }
    }
    let groups = vec![
        ("Receitas".to_string(), income),
        ("Despesas".to_string(), expense),
    ];
    ChartData::new(groups, &INCOME_EXPENSE_PALETTE)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{PaymentMethod, TransactionType};

    fn expense(amount: Amount, category: &str, expense_type: ExpenseType) -> Transaction {
        Transaction {
            id: 1,
            description: "x".into(),
            product_name: "x".into(),
            amount: -amount.abs(),
            transaction_type: TransactionType::Expense,
            category: category.into(),
            date: "2024-03-01".into(),
            item_description: "x".into(),
            expense_type: Some(expense_type),
            payment_method: Some(PaymentMethod::Pix),
        }
    }

    fn income(amount: Amount, category: &str) -> Transaction {
        Transaction {
            id: 2,
            description: "x".into(),
            product_name: "x".into(),
            amount: amount.abs(),
            transaction_type: TransactionType::Income,
            category: category.into(),
            date: "2024-03-05".into(),
            item_description: "x".into(),
            expense_type: None,
            payment_method: None,
        }
    }

    #[test]
    fn test_expenses_by_category_groups_and_sums() {
        let transactions = vec![
            expense(50.0, "Alimentação", ExpenseType::Variavel),
            expense(30.0, "Transporte", ExpenseType::Variavel),
            expense(20.0, "Alimentação", ExpenseType::Variavel),
            income(1000.0, "Salário"),
        ];
        let chart = expenses_by_category(&transactions);
        assert_eq!(chart.labels, vec!["Alimentação", "Transporte"]);
        assert_eq!(chart.values, vec![70.0, 30.0]);
        assert_eq!(chart.colors[0], CATEGORY_PALETTE[0]);
    }

    #[test]
    fn test_category_distribution_includes_both_types() {
        let transactions = vec![
            expense(50.0, "Alimentação", ExpenseType::Variavel),
            income(1000.0, "Salário"),
        ];
        let chart = category_distribution(&transactions);
        assert_eq!(chart.labels, vec!["Alimentação", "Salário"]);
        assert_eq!(chart.values, vec![50.0, 1000.0]);
    }

    #[test]
    fn test_expense_type_distribution_omits_zero_groups() {
        let transactions = vec![
            expense(100.0, "Moradia", ExpenseType::Fixa),
            expense(200.0, "Moradia", ExpenseType::Fixa),
        ];
        let chart = expense_type_distribution(&transactions);
        assert_eq!(chart.labels, vec!["Fixa"]);
        assert_eq!(chart.values, vec![300.0]);
    }

    #[test]
    fn test_income_vs_expense_always_has_both_labels() {
        let transactions = vec![income(1000.0, "Salário")];
        let chart = income_vs_expense(&transactions);
        assert_eq!(chart.labels, vec!["Receitas", "Despesas"]);
        assert_eq!(chart.values, vec![1000.0, 0.0]);
        assert_eq!(chart.colors, vec!["#2ecc71", "#e74c3c"]);
    }

    #[test]
    fn test_palette_recycles_past_seven_groups() {
        let transactions: Vec<Transaction> = (0..9)
            .map(|i| expense(10.0, &format!("Categoria {i}"), ExpenseType::Variavel))
            .collect();
        let chart = expenses_by_category(&transactions);
        assert_eq!(chart.labels.len(), 9);
        assert_eq!(chart.colors[7], CATEGORY_PALETTE[0]);
        assert_eq!(chart.colors[8], CATEGORY_PALETTE[1]);
    }
}

use crate::domain::{
    Amount, CategoryKind, CategorySet, ExpenseType, FilterKind, FilterSpec, PaymentMethod,
    Transaction, TransactionId, TransactionType, ledger, unique_id,
};
use crate::io::{ExportDocument, ImportDocument};
use crate::storage::Repository;

use super::AppError;
use super::reporting::{self, ChartData};

/// The payload collected by a transaction form: everything editable on a
/// transaction. The amount is a magnitude; the sign is derived from the type.
#[derive(Debug, Clone)]
pub struct TransactionInput {
    pub description: String,
    pub amount: Amount,
    pub transaction_type: TransactionType,
    pub category: String,
    pub date: String,
    pub item_description: String,
    pub expense_type: Option<ExpenseType>,
    pub payment_method: Option<PaymentMethod>,
}

impl TransactionInput {
    /// Validation in form order; the first failure wins.
    fn validate(&self) -> Result<(), AppError> {
        if self.description.trim().is_empty() {
            return Err(AppError::EmptyDescription);
        }
        if !(self.amount > 0.0) {
            return Err(AppError::InvalidAmount);
        }
        if self.category.is_empty() {
            return Err(AppError::MissingCategory);
        }
        if self.date.is_empty() {
            return Err(AppError::MissingDate);
        }
        if self.item_description.trim().is_empty() {
            return Err(AppError::EmptyItemDescription);
        }
        if self.transaction_type == TransactionType::Expense {
            if self.expense_type.is_none() {
                return Err(AppError::MissingExpenseType);
            }
            if self.payment_method.is_none() {
                return Err(AppError::MissingPaymentMethod);
            }
        }
        Ok(())
    }

    fn is_expense(&self) -> bool {
        self.transaction_type == TransactionType::Expense
    }

    /// Write the payload fields onto an existing record, keeping its id.
    fn apply_to(&self, existing: &mut Transaction) {
        let description = self.description.trim().to_string();
        existing.description = description.clone();
        existing.product_name = description;
        existing.amount = self.transaction_type.signed_amount(self.amount);
        existing.transaction_type = self.transaction_type;
        existing.category = self.category.clone();
        existing.date = self.date.clone();
        existing.item_description = self.item_description.trim().to_string();
        // Expense-only fields stay empty on income records.
        existing.expense_type = self.is_expense().then_some(self.expense_type).flatten();
        existing.payment_method = self.is_expense().then_some(self.payment_method).flatten();
    }

    fn into_transaction(self, id: TransactionId) -> Transaction {
        let description = self.description.trim().to_string();
        Transaction {
            id,
            description: description.clone(),
            product_name: description,
            amount: self.transaction_type.signed_amount(self.amount),
            transaction_type: self.transaction_type,
            category: self.category,
            date: self.date,
            item_description: self.item_description.trim().to_string(),
            expense_type: if self.transaction_type == TransactionType::Expense {
                self.expense_type
            } else {
                None
            },
            payment_method: if self.transaction_type == TransactionType::Expense {
                self.payment_method
            } else {
                None
            },
        }
    }
}

/// Transient mirror of an in-progress or edited transaction. Cleared after
/// every successful add/update and after deleting the record being edited.
#[derive(Debug, Clone)]
pub struct FormDraft {
    pub description: String,
    pub amount: Amount,
    pub transaction_type: TransactionType,
    pub category: String,
    pub date: String,
    pub item_description: String,
    pub expense_type: Option<ExpenseType>,
    pub payment_method: Option<PaymentMethod>,
    pub is_editing: bool,
    pub editing_id: Option<TransactionId>,
}

impl Default for FormDraft {
    fn default() -> Self {
        Self {
            description: String::new(),
            amount: 0.0,
            transaction_type: TransactionType::Income,
            category: String::new(),
            date: String::new(),
            item_description: String::new(),
            expense_type: None,
            payment_method: None,
            is_editing: false,
            editing_id: None,
        }
    }
}

impl FormDraft {
    fn clear(&mut self) {
        *self = FormDraft::default();
    }
}

/// The state-and-business-logic layer of the tracker: owns the transaction
/// list, category lists, monthly budget, filter, form draft and modal state;
/// validates input; persists after every mutation; derives every aggregate
/// the presentation layer displays.
///
/// Every mutating operation runs to completion before returning and persists
/// the slots it touched. Failures come back as `AppError` values for the
/// caller to surface; nothing here panics or prompts.
pub struct TransactionStore {
    repo: Repository,
    transactions: Vec<Transaction>,
    categories: CategorySet,
    monthly_budget: Amount,
    filter: FilterSpec,
    form: FormDraft,
    selected_details: Option<Transaction>,
    show_details_modal: bool,
    chart_render_key: u64,
}

impl TransactionStore {
    /// Create a store over the given repository, loading all three slots.
    /// Absent or unreadable slots fall back to their documented defaults.
    pub fn new(repo: Repository) -> Self {
        let transactions = repo.load_transactions();
        let categories = repo.load_categories();
        let monthly_budget = repo.load_budget();
        Self {
            repo,
            transactions,
            categories,
            monthly_budget,
            filter: FilterSpec::default(),
            form: FormDraft::default(),
            selected_details: None,
            show_details_modal: false,
            chart_render_key: 0,
        }
    }

    // ========================
    // Transaction operations
    // ========================

    /// Add a new transaction, or update the one being edited. Validates the
    /// payload first (no state change on failure), then applies the type's
    /// sign convention, clears the draft, bumps the render key and persists.
    ///
    /// In edit mode, a record whose id has meanwhile disappeared is a silent
    /// no-op for the list; the edit state is still cleared.
    pub fn add_or_update_transaction(&mut self, input: TransactionInput) -> Result<(), AppError> {
        input.validate()?;

        if self.form.is_editing {
            if let Some(id) = self.form.editing_id {
                if let Some(existing) = self.transactions.iter_mut().find(|t| t.id == id) {
                    input.apply_to(existing);
                }
            }
        } else {
            let id = unique_id(&self.transactions);
            self.transactions.push(input.into_transaction(id));
        }

        self.form.clear();
        self.chart_render_key += 1;
        self.repo.save_transactions(&self.transactions)?;
        Ok(())
    }

    /// Remove the transaction with the given id; no-op if absent. The caller
    /// is expected to have confirmed intent; this executes unconditionally.
    pub fn delete_transaction(&mut self, id: TransactionId) -> Result<(), AppError> {
        self.transactions.retain(|t| t.id != id);
        self.chart_render_key += 1;
        if self.form.editing_id == Some(id) {
            self.form.clear();
        }
        self.repo.save_transactions(&self.transactions)?;
        Ok(())
    }

    /// Copy a transaction's fields into the form draft and enter edit mode.
    /// Purely transient: nothing is persisted.
    pub fn start_edit(&mut self, transaction: &Transaction) {
        self.form = FormDraft {
            description: transaction.description.clone(),
            amount: transaction.amount.abs(),
            transaction_type: transaction.transaction_type,
            category: transaction.category.clone(),
            date: transaction.date.clone(),
            item_description: transaction.item_description.clone(),
            expense_type: transaction.expense_type,
            payment_method: transaction.payment_method,
            is_editing: true,
            editing_id: Some(transaction.id),
        };
    }

    // ========================
    // Category operations
    // ========================

    pub fn add_custom_category(&mut self, name: &str, kind: CategoryKind) -> Result<(), AppError> {
        self.categories.add(name, kind)?;
        self.repo.save_categories(&self.categories)?;
        Ok(())
    }

    pub fn remove_custom_category(
        &mut self,
        name: &str,
        kind: CategoryKind,
    ) -> Result<(), AppError> {
        self.categories.remove(name, kind)?;
        self.repo.save_categories(&self.categories)?;
        Ok(())
    }

    // ========================
    // Filter, budget, modal
    // ========================

    /// Replace the active filter wholesale. Session-local, never persisted.
    pub fn update_filter(&mut self, kind: FilterKind, value: impl Into<String>) {
        self.filter = FilterSpec::new(kind, value);
        self.chart_render_key += 1;
    }

    pub fn set_monthly_budget(&mut self, value: Amount) -> Result<(), AppError> {
        if !(value >= 0.0) {
            return Err(AppError::NegativeBudget(value));
        }
        self.monthly_budget = value;
        self.repo.save_budget(value)?;
        Ok(())
    }

    pub fn open_details_modal(&mut self, transaction: &Transaction) {
        self.selected_details = Some(transaction.clone());
        self.show_details_modal = true;
    }

    pub fn close_details_modal(&mut self) {
        self.selected_details = None;
        self.show_details_modal = false;
    }

    // ========================
    // Import / export
    // ========================

    /// Snapshot the full dataset for export. Pure read.
    pub fn export_document(&self) -> ExportDocument {
        ExportDocument {
            transactions: self.transactions.clone(),
            categories: self.categories.clone(),
            monthly_budget: self.monthly_budget,
        }
    }

    /// Replace the dataset with an already-validated import document:
    /// transactions wholesale, category lists field-by-field when present,
    /// budget when present. Persists every replaced slot. Returns the number
    /// of imported transactions.
    pub fn import_document(&mut self, document: ImportDocument) -> Result<usize, AppError> {
        let ImportDocument {
            transactions,
            categories,
            monthly_budget,
        } = document;

        let count = transactions.len();
        self.transactions = transactions;
        self.repo.save_transactions(&self.transactions)?;

        if let Some(imported) = categories {
            if let Some(expense) = imported.expense {
                self.categories.expense = expense;
            }
            if let Some(income) = imported.income {
                self.categories.income = income;
            }
            self.repo.save_categories(&self.categories)?;
        }

        if let Some(budget) = monthly_budget {
            self.monthly_budget = budget;
            self.repo.save_budget(budget)?;
        }

        self.chart_render_key += 1;
        Ok(count)
    }

    // ========================
    // State access
    // ========================

    pub fn transactions(&self) -> &[Transaction] {
        &self.transactions
    }

    pub fn categories(&self) -> &CategorySet {
        &self.categories
    }

    pub fn monthly_budget(&self) -> Amount {
        self.monthly_budget
    }

    pub fn filter(&self) -> &FilterSpec {
        &self.filter
    }

    pub fn form(&self) -> &FormDraft {
        &self.form
    }

    pub fn is_editing(&self) -> bool {
        self.form.is_editing
    }

    /// Monotonic counter bumped whenever chart-feeding state changes, so
    /// dependent views know to redraw.
    pub fn chart_render_key(&self) -> u64 {
        self.chart_render_key
    }

    pub fn selected_details(&self) -> Option<&Transaction> {
        self.selected_details.as_ref()
    }

    pub fn is_details_modal_open(&self) -> bool {
        self.show_details_modal
    }

    // ========================
    // Derived values
    // ========================

    fn filtered(&self) -> impl Iterator<Item = &Transaction> {
        self.transactions.iter().filter(|t| self.filter.matches(t))
    }

    /// The transactions visible under the active filter.
    pub fn filtered_transactions(&self) -> Vec<&Transaction> {
        self.filtered().collect()
    }

    pub fn total_balance(&self) -> Amount {
        ledger::total_balance(self.filtered())
    }

    pub fn total_income(&self) -> Amount {
        ledger::total_income(self.filtered())
    }

    pub fn total_expenses(&self) -> Amount {
        ledger::total_expenses(self.filtered())
    }

    /// This month's spending over the full list, independent of the active
    /// filter. This is what the budget is compared against.
    pub fn current_month_expenses(&self) -> Amount {
        ledger::expenses_in_month(&self.transactions, &ledger::current_month_prefix())
    }

    /// Budget left for the current month (negative when overspent).
    pub fn remaining_budget(&self) -> Amount {
        self.monthly_budget - self.current_month_expenses()
    }

    // ========================
    // Chart data
    // ========================

    pub fn expenses_by_category_chart(&self) -> ChartData {
        reporting::expenses_by_category(self.filtered())
    }

    pub fn category_distribution_chart(&self) -> ChartData {
        reporting::category_distribution(self.filtered())
    }

    pub fn expense_type_distribution_chart(&self) -> ChartData {
        reporting::expense_type_distribution(self.filtered())
    }

    pub fn payment_method_distribution_chart(&self) -> ChartData {
        reporting::payment_method_distribution(self.filtered())
    }

    pub fn income_vs_expense_chart(&self) -> ChartData {
        reporting::income_vs_expense(self.filtered())
    }
}

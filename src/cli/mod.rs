use std::fs::File;
use std::io::{self, BufReader, BufWriter, Write};

use anyhow::{Context, Result, bail};
use chrono::Local;
use clap::{Parser, Subcommand};

use crate::application::{ChartData, TransactionInput, TransactionStore};
use crate::domain::{
    CategoryKind, ExpenseType, FilterKind, PaymentMethod, Transaction, TransactionId,
    TransactionType, format_amount, parse_amount,
};
use crate::io::{Exporter, parse_import};
use crate::storage::Repository;

/// Bolso - personal income/expense tracker
#[derive(Parser)]
#[command(name = "bolso")]
#[command(about = "A local-first personal income/expense tracker for the command line")]
#[command(version)]
pub struct Cli {
    /// Data directory holding the persisted dataset
    #[arg(short, long, default_value = ".bolso")]
    pub data_dir: String,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Record a new transaction
    Add {
        /// Item/product name
        description: String,

        /// Amount (e.g., "50.00" or "50"), always positive
        amount: String,

        /// Transaction type: income, expense
        #[arg(short = 't', long = "type", default_value = "expense")]
        transaction_type: String,

        /// Category name
        #[arg(short, long)]
        category: String,

        /// Transaction date (YYYY-MM-DD, defaults to today)
        #[arg(long)]
        date: Option<String>,

        /// Detailed description of the transaction
        #[arg(long)]
        detail: String,

        /// Expense type: fixa, variavel (expenses only)
        #[arg(short, long)]
        expense_type: Option<String>,

        /// Payment method: dinheiro, pix, credito, debito, boleto, outro (expenses only)
        #[arg(short, long)]
        payment_method: Option<String>,
    },

    /// List transactions, optionally restricted to a period
    List {
        /// Only transactions on this date (YYYY-MM-DD)
        #[arg(long)]
        day: Option<String>,

        /// Only transactions in this month (YYYY-MM)
        #[arg(long)]
        month: Option<String>,

        /// Only transactions in this year (YYYY)
        #[arg(long)]
        year: Option<String>,
    },

    /// Show all details of one transaction
    Show {
        /// Transaction id
        id: TransactionId,
    },

    /// Edit an existing transaction
    Edit {
        /// Transaction id
        id: TransactionId,

        /// New item/product name
        #[arg(long)]
        description: Option<String>,

        /// New amount, always positive
        #[arg(long)]
        amount: Option<String>,

        /// New transaction type: income, expense
        #[arg(short = 't', long = "type")]
        transaction_type: Option<String>,

        /// New category name
        #[arg(long)]
        category: Option<String>,

        /// New date (YYYY-MM-DD)
        #[arg(long)]
        date: Option<String>,

        /// New detailed description
        #[arg(long)]
        detail: Option<String>,

        /// New expense type: fixa, variavel
        #[arg(long)]
        expense_type: Option<String>,

        /// New payment method
        #[arg(long)]
        payment_method: Option<String>,
    },

    /// Delete a transaction
    Delete {
        /// Transaction id
        id: TransactionId,

        /// Skip the confirmation prompt
        #[arg(short, long)]
        yes: bool,
    },

    /// Category management commands
    #[command(subcommand)]
    Category(CategoryCommands),

    /// Monthly budget commands
    #[command(subcommand)]
    Budget(BudgetCommands),

    /// Show balance, income and expense totals
    Summary {
        /// Only transactions on this date (YYYY-MM-DD)
        #[arg(long)]
        day: Option<String>,

        /// Only transactions in this month (YYYY-MM)
        #[arg(long)]
        month: Option<String>,

        /// Only transactions in this year (YYYY)
        #[arg(long)]
        year: Option<String>,
    },

    /// Aggregate breakdowns of the visible transactions
    Report {
        /// Breakdown: categories, distribution, types, methods, income-expense
        report_type: String,

        /// Only transactions on this date (YYYY-MM-DD)
        #[arg(long)]
        day: Option<String>,

        /// Only transactions in this month (YYYY-MM)
        #[arg(long)]
        month: Option<String>,

        /// Only transactions in this year (YYYY)
        #[arg(long)]
        year: Option<String>,

        /// Output format: table, json
        #[arg(long, default_value = "table")]
        format: String,
    },

    /// Export the full dataset
    Export {
        /// Output file (stdout if omitted)
        #[arg(short, long)]
        output: Option<String>,

        /// Format: json, csv (csv covers transactions only)
        #[arg(short, long, default_value = "json")]
        format: String,
    },

    /// Import a previously exported dataset, replacing the current one
    Import {
        /// Input file
        input: String,
    },
}

#[derive(Subcommand)]
pub enum CategoryCommands {
    /// Add a custom category
    Add {
        /// Category name
        name: String,

        /// Category kind: expense, income
        #[arg(short, long, default_value = "expense")]
        kind: String,
    },

    /// Remove a custom category (defaults are protected)
    Remove {
        /// Category name
        name: String,

        /// Category kind: expense, income
        #[arg(short, long, default_value = "expense")]
        kind: String,
    },

    /// List all categories
    List,
}

#[derive(Subcommand)]
pub enum BudgetCommands {
    /// Set the monthly budget ceiling
    Set {
        /// Budget amount (e.g., "1500.00"), zero or more
        amount: String,
    },

    /// Show the budget against this month's spending
    Status,
}

impl Cli {
    pub fn run(self) -> Result<()> {
        let repo = Repository::open(&self.data_dir)
            .with_context(|| format!("Cannot open data directory '{}'", self.data_dir))?;
        let mut store = TransactionStore::new(repo);

        match self.command {
            Commands::Add {
                description,
                amount,
                transaction_type,
                category,
                date,
                detail,
                expense_type,
                payment_method,
            } => {
                let input = TransactionInput {
                    description,
                    amount: parse_amount(&amount)
                        .context("Invalid amount format. Use '50.00' or '50'")?,
                    transaction_type: parse_transaction_type(&transaction_type)?,
                    category,
                    date: date.unwrap_or_else(today),
                    item_description: detail,
                    expense_type: expense_type.as_deref().map(parse_expense_type).transpose()?,
                    payment_method: payment_method
                        .as_deref()
                        .map(parse_payment_method)
                        .transpose()?,
                };
                store.add_or_update_transaction(input)?;

                if let Some(added) = store.transactions().last() {
                    println!(
                        "Recorded {}: {} {} ({})",
                        added.transaction_type,
                        added.description,
                        format_amount(added.amount),
                        added.id
                    );
                }
            }

            Commands::List { day, month, year } => {
                apply_filter(&mut store, day, month, year);
                run_list_command(&store);
            }

            Commands::Show { id } => {
                let transaction = find_transaction(&store, id)?;
                store.open_details_modal(&transaction);
                if let Some(details) = store.selected_details() {
                    print_transaction_details(details);
                }
                store.close_details_modal();
            }

            Commands::Edit {
                id,
                description,
                amount,
                transaction_type,
                category,
                date,
                detail,
                expense_type,
                payment_method,
            } => {
                let transaction = find_transaction(&store, id)?;
                store.start_edit(&transaction);

                // Start from the prefilled draft, override what was passed.
                let form = store.form().clone();
                let input = TransactionInput {
                    description: description.unwrap_or(form.description),
                    amount: amount
                        .as_deref()
                        .map(parse_amount)
                        .transpose()
                        .context("Invalid amount format. Use '50.00' or '50'")?
                        .unwrap_or(form.amount),
                    transaction_type: transaction_type
                        .as_deref()
                        .map(parse_transaction_type)
                        .transpose()?
                        .unwrap_or(form.transaction_type),
                    category: category.unwrap_or(form.category),
                    date: date.unwrap_or(form.date),
                    item_description: detail.unwrap_or(form.item_description),
                    expense_type: match expense_type {
                        Some(raw) => Some(parse_expense_type(&raw)?),
                        None => form.expense_type,
                    },
                    payment_method: match payment_method {
                        Some(raw) => Some(parse_payment_method(&raw)?),
                        None => form.payment_method,
                    },
                };
                store.add_or_update_transaction(input)?;
                println!("Updated transaction {id}");
            }

            Commands::Delete { id, yes } => {
                if !yes && !confirm_delete(id)? {
                    println!("Aborted.");
                    return Ok(());
                }
                store.delete_transaction(id)?;
                println!("Deleted transaction {id}");
            }

            Commands::Category(category_cmd) => {
                run_category_command(&mut store, category_cmd)?;
            }

            Commands::Budget(budget_cmd) => {
                run_budget_command(&mut store, budget_cmd)?;
            }

            Commands::Summary { day, month, year } => {
                apply_filter(&mut store, day, month, year);
                run_summary_command(&store);
            }

            Commands::Report {
                report_type,
                day,
                month,
                year,
                format,
            } => {
                apply_filter(&mut store, day, month, year);
                run_report_command(&store, &report_type, &format)?;
            }

            Commands::Export { output, format } => {
                run_export_command(&store, output.as_deref(), &format)?;
            }

            Commands::Import { input } => {
                let file = File::open(&input)
                    .with_context(|| format!("Cannot open import file '{input}'"))?;
                let document = parse_import(BufReader::new(file))?;
                let count = store.import_document(document)?;
                println!("Imported {count} transaction(s). The previous dataset was replaced.");
            }
        }

        Ok(())
    }
}

fn today() -> String {
    Local::now().format("%Y-%m-%d").to_string()
}

fn parse_transaction_type(raw: &str) -> Result<TransactionType> {
    TransactionType::from_str(raw)
        .with_context(|| format!("Invalid transaction type '{raw}'. Valid types: income, expense"))
}

fn parse_expense_type(raw: &str) -> Result<ExpenseType> {
    ExpenseType::from_str(raw)
        .with_context(|| format!("Invalid expense type '{raw}'. Valid types: fixa, variavel"))
}

fn parse_payment_method(raw: &str) -> Result<PaymentMethod> {
    PaymentMethod::from_str(raw).with_context(|| {
        format!(
            "Invalid payment method '{raw}'. Valid methods: dinheiro, pix, credito, debito, boleto, outro"
        )
    })
}

fn parse_category_kind(raw: &str) -> Result<CategoryKind> {
    CategoryKind::from_str(raw)
        .with_context(|| format!("Invalid category kind '{raw}'. Valid kinds: expense, income"))
}

/// Translate the `--day/--month/--year` flags into the store's filter.
/// The narrowest given period wins.
fn apply_filter(
    store: &mut TransactionStore,
    day: Option<String>,
    month: Option<String>,
    year: Option<String>,
) {
    if let Some(value) = day {
        store.update_filter(FilterKind::Day, value);
    } else if let Some(value) = month {
        store.update_filter(FilterKind::Month, value);
    } else if let Some(value) = year {
        store.update_filter(FilterKind::Year, value);
    }
}

fn find_transaction(store: &TransactionStore, id: TransactionId) -> Result<Transaction> {
    store
        .transactions()
        .iter()
        .find(|t| t.id == id)
        .cloned()
        .with_context(|| format!("No transaction with id {id}"))
}

fn confirm_delete(id: TransactionId) -> Result<bool> {
    print!("Delete transaction {id}? This cannot be undone. [y/N] ");
    io::stdout().flush()?;
    let mut answer = String::new();
    io::stdin().read_line(&mut answer)?;
    Ok(matches!(answer.trim().to_lowercase().as_str(), "y" | "yes"))
}

fn run_list_command(store: &TransactionStore) {
    let transactions = store.filtered_transactions();
    if transactions.is_empty() {
        println!("No transactions found.");
        return;
    }

    println!(
        "{:<15} {:<12} {:<8} {:<18} {:>12}  {}",
        "ID", "DATE", "TYPE", "CATEGORY", "AMOUNT", "DESCRIPTION"
    );
    println!("{}", "-".repeat(80));
    for transaction in transactions {
        println!(
            "{:<15} {:<12} {:<8} {:<18} {:>12}  {}",
            transaction.id,
            transaction.date,
            transaction.transaction_type,
            transaction.category,
            format_amount(transaction.amount),
            transaction.description
        );
    }
}

fn print_transaction_details(transaction: &Transaction) {
    println!("Transaction {}", transaction.id);
    println!("  Description:    {}", transaction.description);
    println!("  Amount:         {}", format_amount(transaction.amount));
    println!("  Type:           {}", transaction.transaction_type);
    println!("  Category:       {}", transaction.category);
    println!("  Date:           {}", transaction.date);
    println!("  Detail:         {}", transaction.item_description);
    if let Some(expense_type) = transaction.expense_type {
        println!("  Expense type:   {}", expense_type.label());
    }
    if let Some(payment_method) = transaction.payment_method {
        println!("  Payment method: {}", payment_method);
    }
}

fn run_category_command(store: &mut TransactionStore, cmd: CategoryCommands) -> Result<()> {
    match cmd {
        CategoryCommands::Add { name, kind } => {
            let kind = parse_category_kind(&kind)?;
            store.add_custom_category(&name, kind)?;
            println!("Added {kind} category: {}", name.trim());
        }

        CategoryCommands::Remove { name, kind } => {
            let kind = parse_category_kind(&kind)?;
            store.remove_custom_category(&name, kind)?;
            println!("Removed {kind} category: {}", name.trim());
        }

        CategoryCommands::List => {
            println!("Expense categories:");
            for name in store.categories().list(CategoryKind::Expense) {
                println!("  {name}");
            }
            println!("Income categories:");
            for name in store.categories().list(CategoryKind::Income) {
                println!("  {name}");
            }
        }
    }
    Ok(())
}

fn run_budget_command(store: &mut TransactionStore, cmd: BudgetCommands) -> Result<()> {
    match cmd {
        BudgetCommands::Set { amount } => {
            let value =
                parse_amount(&amount).context("Invalid amount format. Use '1500.00' or '1500'")?;
            store.set_monthly_budget(value)?;
            println!("Monthly budget set to {}", format_amount(value));
        }

        BudgetCommands::Status => {
            let spent = store.current_month_expenses();
            println!(
                "Monthly budget:       {:>12}",
                format_amount(store.monthly_budget())
            );
            println!("Spent this month:     {:>12}", format_amount(spent));
            println!(
                "Remaining:            {:>12}",
                format_amount(store.remaining_budget())
            );
        }
    }
    Ok(())
}

fn run_summary_command(store: &TransactionStore) {
    println!(
        "Total income:         {:>12}",
        format_amount(store.total_income())
    );
    println!(
        "Total expenses:       {:>12}",
        format_amount(store.total_expenses())
    );
    println!(
        "Balance:              {:>12}",
        format_amount(store.total_balance())
    );
}

fn run_report_command(store: &TransactionStore, report_type: &str, format: &str) -> Result<()> {
    let chart = match report_type {
        "categories" => store.expenses_by_category_chart(),
        "distribution" => store.category_distribution_chart(),
        "types" => store.expense_type_distribution_chart(),
        "methods" => store.payment_method_distribution_chart(),
        "income-expense" => store.income_vs_expense_chart(),
        other => bail!(
            "Unknown report '{other}'. Valid reports: categories, distribution, types, methods, income-expense"
        ),
    };

    match format {
        "table" => print_chart_table(&chart),
        "json" => println!("{}", serde_json::to_string_pretty(&chart)?),
        other => bail!("Unknown format '{other}'. Valid formats: table, json"),
    }
    Ok(())
}

fn print_chart_table(chart: &ChartData) {
    if chart.is_empty() {
        println!("Nothing to report.");
        return;
    }
    println!("{:<24} {:>12}  {}", "GROUP", "TOTAL", "COLOR");
    println!("{}", "-".repeat(48));
    for ((label, value), color) in chart
        .labels
        .iter()
        .zip(&chart.values)
        .zip(&chart.colors)
    {
        println!("{:<24} {:>12}  {}", label, format_amount(*value), color);
    }
}

fn run_export_command(store: &TransactionStore, output: Option<&str>, format: &str) -> Result<()> {
    let exporter = Exporter::new(store);

    let mut writer: Box<dyn Write> = match output {
        Some(path) => Box::new(BufWriter::new(
            File::create(path).with_context(|| format!("Cannot create output file '{path}'"))?,
        )),
        None => Box::new(io::stdout()),
    };

    match format {
        "json" => {
            let document = exporter.export_json(&mut writer)?;
            if let Some(path) = output {
                eprintln!(
                    "Exported {} transaction(s) to {path}",
                    document.transactions.len()
                );
            }
        }
        "csv" => {
            let count = exporter.export_transactions_csv(&mut writer)?;
            if let Some(path) = output {
                eprintln!("Exported {count} transaction(s) to {path}");
            }
        }
        other => bail!("Unknown format '{other}'. Valid formats: json, csv"),
    }
    Ok(())
}

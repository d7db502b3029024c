use anyhow::Result;

use crate::ledger::{
    filter_by_month, filter_plan_by_month, recent_history, summarize, LedgerSchema, PlannedDraft,
    TransactionDraft, ViewMonth,
};
use crate::models::{find_category, PlannedAmount, Transaction, TxnKind};
use crate::store::{LedgerStore, TableVersion};
use crate::ui::util::{format_amount, format_directed};

pub(crate) fn as_cli(
    args: &[String],
    store: &mut dyn LedgerStore,
    schema: LedgerSchema,
) -> Result<()> {
    match args[1].as_str() {
        "summary" | "s" => cli_summary(&args[2..], store, schema),
        "history" => cli_history(&args[2..], store),
        "add" => cli_add(&args[2..], store),
        "plan" => cli_plan(&args[2..], store),
        "--help" | "-h" | "help" => {
            print_usage();
            Ok(())
        }
        "--version" | "-V" | "version" => {
            println!("ledgerbook {}", env!("CARGO_PKG_VERSION"));
            Ok(())
        }
        other => {
            print_usage();
            anyhow::bail!("Unknown command: {other}");
        }
    }
}

fn print_usage() {
    println!("Ledgerbook — plan-versus-actual monthly budget ledger");
    println!();
    println!("Usage: ledgerbook [--dir <path>] [--legacy] [command]");
    println!();
    println!("Commands:");
    println!("  (none)                        Launch interactive TUI");
    println!("  summary [YYYY-MM]             Planned income, spend, and remaining for a month");
    println!("  history [YYYY-MM]             The month's transactions, newest first");
    println!("  add <date> <merchant> <amt>   Append a transaction (YYYY-MM-DD)");
    println!("    --type <expense|income>     Row type (default: expense)");
    println!("    --category <name>           Category (default: Uncategorized)");
    println!("  plan <label> <amount>         Append a planned income line");
    println!("    --month <YYYY-MM>           Month to plan (default: current)");
    println!("  --help, -h                    Show this help");
    println!("  --version, -V                 Show version");
    println!();
    println!("Global flags:");
    println!("  --dir <path>                  Store directory (default: platform data dir)");
    println!("  --legacy                      Use the old untyped ledger layout");
}

fn month_arg(args: &[String]) -> ViewMonth {
    args.first()
        .filter(|a| !a.starts_with('-'))
        .and_then(|a| ViewMonth::from_key(a))
        .unwrap_or_else(ViewMonth::current)
}

/// A store that can't be read behaves as an empty table so the rest of
/// the command still runs.
fn read_transactions_or_empty(store: &mut dyn LedgerStore) -> (Vec<Transaction>, TableVersion) {
    match store.read_transactions() {
        Ok(read) => read,
        Err(e) => {
            eprintln!("Warning: {e} — treating the ledger as empty");
            (Vec::new(), 0)
        }
    }
}

fn read_plan_or_empty(store: &mut dyn LedgerStore) -> (Vec<PlannedAmount>, TableVersion) {
    match store.read_plan() {
        Ok(read) => read,
        Err(e) => {
            eprintln!("Warning: {e} — treating the plan as empty");
            (Vec::new(), 0)
        }
    }
}

fn cli_summary(args: &[String], store: &mut dyn LedgerStore, schema: LedgerSchema) -> Result<()> {
    let month = month_arg(args);
    let (transactions, _) = read_transactions_or_empty(store);
    let (plan, _) = read_plan_or_empty(store);

    let month_txns = filter_by_month(&transactions, month);
    let month_plan = filter_plan_by_month(&plan, month);
    let summary = summarize(&month_txns, &month_plan, schema);

    println!("Ledgerbook — {month}");
    println!("{}", "─".repeat(40));
    println!("  Planned income:  {}", format_amount(summary.planned_income));
    println!("  Spent:           {}", format_amount(summary.spent));
    println!("  Remaining:       {}", format_amount(summary.remaining));
    println!("  Transactions:    {}", month_txns.len());

    if !month_plan.is_empty() {
        println!();
        println!("Plan:");
        for row in &month_plan {
            println!(
                "  {:<24} {:<8} {}",
                row.label,
                row.kind,
                format_amount(row.amount)
            );
        }
    }

    Ok(())
}

fn cli_history(args: &[String], store: &mut dyn LedgerStore) -> Result<()> {
    let month = month_arg(args);
    let (transactions, _) = read_transactions_or_empty(store);
    let month_txns = filter_by_month(&transactions, month);

    if month_txns.is_empty() {
        println!("No transactions for {month}");
        return Ok(());
    }

    println!(
        "{:<12} {:<9} {:<28} {:<20} Amount",
        "Date", "Type", "Merchant", "Category"
    );
    println!("{}", "─".repeat(84));
    for txn in recent_history(&month_txns, month_txns.len()) {
        println!(
            "{:<12} {:<9} {:<28} {:<20} {}",
            txn.date,
            txn.kind,
            txn.merchant,
            txn.category,
            format_directed(txn.kind, txn.amount)
        );
    }

    Ok(())
}

fn cli_add(args: &[String], store: &mut dyn LedgerStore) -> Result<()> {
    let positional: Vec<&String> = args.iter().filter(|a| !a.starts_with("--")).collect();
    if positional.len() < 3 {
        anyhow::bail!("Usage: ledgerbook add <date> <merchant> <amount> [--type T] [--category C]");
    }

    let kind = args
        .windows(2)
        .find(|w| w[0] == "--type")
        .map(|w| TxnKind::parse(&w[1]))
        .unwrap_or_default();
    let category = args
        .windows(2)
        .find(|w| w[0] == "--category")
        .map(|w| {
            // Normalize to the preset's capitalization when one matches
            find_category(&w[1])
                .map(str::to_string)
                .unwrap_or_else(|| w[1].clone())
        })
        .unwrap_or_else(|| "Uncategorized".into());

    let draft = TransactionDraft {
        date: positional[0].clone(),
        kind,
        merchant: positional[1].clone(),
        category,
        amount: positional[2].clone(),
    };
    let txn = match draft.validate() {
        Ok(t) => t,
        Err(e) => anyhow::bail!("Rejected: {e}"),
    };

    let (_, version) = store
        .read_transactions()
        .map_err(|e| anyhow::anyhow!("{e}"))?;
    store
        .append_transaction(version, &txn)
        .map_err(|e| anyhow::anyhow!("{e}"))?;

    println!(
        "Added {} {} for {} ({})",
        txn.kind,
        format_amount(txn.amount),
        txn.merchant,
        txn.date
    );
    Ok(())
}

fn cli_plan(args: &[String], store: &mut dyn LedgerStore) -> Result<()> {
    let positional: Vec<&String> = args.iter().filter(|a| !a.starts_with("--")).collect();
    if positional.len() < 2 {
        anyhow::bail!("Usage: ledgerbook plan <label> <amount> [--month YYYY-MM]");
    }

    let month = args
        .windows(2)
        .find(|w| w[0] == "--month")
        .and_then(|w| ViewMonth::from_key(&w[1]))
        .unwrap_or_else(ViewMonth::current);

    let draft = PlannedDraft {
        label: positional[0].clone(),
        amount: positional[1].clone(),
    };
    let row = match draft.validate(month) {
        Ok(r) => r,
        Err(e) => anyhow::bail!("Rejected: {e}"),
    };

    let (_, version) = store.read_plan().map_err(|e| anyhow::anyhow!("{e}"))?;
    store
        .append_planned(version, &row)
        .map_err(|e| anyhow::anyhow!("{e}"))?;

    println!(
        "Planned {} from {} in {}",
        format_amount(row.amount),
        row.label,
        row.month
    );
    Ok(())
}

use std::collections::HashMap;
use std::sync::LazyLock;

use super::app::{App, Screen};
use crate::ledger::{PlannedDraft, TransactionDraft, ViewMonth};
use crate::models::TxnKind;
use crate::store::LedgerStore;

pub(crate) struct Command {
    pub(crate) description: &'static str,
    pub(crate) run: fn(&str, &mut App, &mut dyn LedgerStore) -> anyhow::Result<()>,
}

macro_rules! register_command {
    ($name:expr, $desc:expr, $func:expr, $registry:expr) => {{
        $registry.insert(
            $name,
            Command {
                description: $desc,
                run: $func,
            },
        );
    }};
}

pub(crate) static COMMANDS: LazyLock<HashMap<&str, Command>> = LazyLock::new(|| {
    let mut r: HashMap<&str, Command> = HashMap::new();

    register_command!("q", "Quit Ledgerbook", cmd_quit, r);
    register_command!("quit", "Quit Ledgerbook", cmd_quit, r);
    register_command!("d", "Go to Dashboard", cmd_dashboard, r);
    register_command!("dashboard", "Go to Dashboard", cmd_dashboard, r);
    register_command!("t", "Go to Transactions", cmd_transactions, r);
    register_command!("transactions", "Go to Transactions", cmd_transactions, r);
    register_command!("p", "Go to Plan", cmd_plan, r);
    register_command!("plan", "Go to Plan", cmd_plan, r);
    register_command!("n", "Open the new-transaction form", cmd_new_txn, r);
    register_command!("new", "Open the new-transaction form", cmd_new_txn, r);
    register_command!("i", "Open the planned-income form", cmd_new_plan, r);
    register_command!("income", "Open the planned-income form", cmd_new_plan, r);
    register_command!("help", "Show available commands", cmd_help, r);
    register_command!("h", "Show available commands", cmd_help, r);
    register_command!("month", "Set month (e.g. :month 2026-01)", cmd_month, r);
    register_command!("m", "Set month (e.g. :m 2026-01)", cmd_month, r);
    register_command!("next-month", "Go to next month", cmd_next_month, r);
    register_command!("prev-month", "Go to previous month", cmd_prev_month, r);
    register_command!(
        "add-txn",
        "Quick add (e.g. :add-txn 2026-01-15 Coffee 4.50, +amount = income)",
        cmd_add_txn,
        r
    );
    register_command!(
        "add-plan",
        "Plan income this month (e.g. :add-plan Salary 3000)",
        cmd_add_plan,
        r
    );
    register_command!("refresh", "Re-read the ledger from the store", cmd_refresh, r);

    r
});

pub(crate) fn handle_command(
    input: &str,
    app: &mut App,
    store: &mut dyn LedgerStore,
) -> anyhow::Result<()> {
    let trimmed = input.trim();
    let mut parts = trimmed.splitn(2, ' ');
    let cmd_name = parts.next().unwrap_or("");
    let args = parts.next().unwrap_or("").trim();

    if let Some(cmd) = COMMANDS.get(cmd_name) {
        (cmd.run)(args, app, store)?;
    } else {
        let suggestion = find_closest(cmd_name);
        app.set_status(format!(
            "Unknown command: :{cmd_name}. Did you mean :{suggestion}?"
        ));
    }

    Ok(())
}

fn find_closest(input: &str) -> String {
    COMMANDS
        .keys()
        .filter(|k| k.len() > 1) // skip single-letter aliases for suggestions
        .min_by_key(|k| levenshtein(input, k))
        .unwrap_or(&"help")
        .to_string()
}

fn levenshtein(a: &str, b: &str) -> usize {
    let (a, b) = (a.as_bytes(), b.as_bytes());
    let mut prev: Vec<usize> = (0..=b.len()).collect();
    let mut curr = vec![0; b.len() + 1];

    for i in 1..=a.len() {
        curr[0] = i;
        for j in 1..=b.len() {
            let cost = if a[i - 1] == b[j - 1] { 0 } else { 1 };
            curr[j] = (prev[j] + 1).min(curr[j - 1] + 1).min(prev[j - 1] + cost);
        }
        std::mem::swap(&mut prev, &mut curr);
    }

    prev[b.len()]
}

// ── Command implementations ──────────────────────────────────

fn cmd_quit(_args: &str, app: &mut App, _store: &mut dyn LedgerStore) -> anyhow::Result<()> {
    app.running = false;
    Ok(())
}

fn cmd_dashboard(_args: &str, app: &mut App, store: &mut dyn LedgerStore) -> anyhow::Result<()> {
    app.screen = Screen::Dashboard;
    app.reload(store);
    Ok(())
}

fn cmd_transactions(_args: &str, app: &mut App, store: &mut dyn LedgerStore) -> anyhow::Result<()> {
    app.screen = Screen::Transactions;
    app.reload(store);
    Ok(())
}

fn cmd_plan(_args: &str, app: &mut App, store: &mut dyn LedgerStore) -> anyhow::Result<()> {
    app.screen = Screen::Plan;
    app.reload(store);
    Ok(())
}

fn cmd_new_txn(_args: &str, app: &mut App, _store: &mut dyn LedgerStore) -> anyhow::Result<()> {
    app.screen = Screen::NewTransaction;
    app.set_status("Up/Down move, type to edit, +/- cycle, Enter saves");
    Ok(())
}

fn cmd_new_plan(_args: &str, app: &mut App, _store: &mut dyn LedgerStore) -> anyhow::Result<()> {
    app.screen = Screen::NewPlan;
    app.set_status(format!("Planning income for {}", app.view_month));
    Ok(())
}

fn cmd_help(_args: &str, app: &mut App, _store: &mut dyn LedgerStore) -> anyhow::Result<()> {
    app.show_help = true;
    Ok(())
}

fn cmd_refresh(_args: &str, app: &mut App, store: &mut dyn LedgerStore) -> anyhow::Result<()> {
    app.reload(store);
    app.set_status("Reloaded from store");
    Ok(())
}

fn cmd_month(args: &str, app: &mut App, store: &mut dyn LedgerStore) -> anyhow::Result<()> {
    if args.is_empty() {
        app.set_status("Usage: :month YYYY-MM (or :m 2 for a month this year)");
        return Ok(());
    }

    // Accept "2026-01", "2026-1", "01", "1"
    let key = if args.len() <= 2 {
        format!("{}-{args:0>2}", app.view_month.year)
    } else {
        args.to_string()
    };

    match ViewMonth::from_key(&key) {
        Some(month) => {
            app.set_month(month);
            app.reload(store);
            app.set_status(format!("Switched to month: {month}"));
        }
        None => app.set_status("Invalid month format. Use YYYY-MM (e.g. 2026-01)"),
    }

    Ok(())
}

fn cmd_next_month(_args: &str, app: &mut App, store: &mut dyn LedgerStore) -> anyhow::Result<()> {
    app.shift_month(1);
    app.reload(store);
    Ok(())
}

fn cmd_prev_month(_args: &str, app: &mut App, store: &mut dyn LedgerStore) -> anyhow::Result<()> {
    app.shift_month(-1);
    app.reload(store);
    Ok(())
}

/// Quick add without the form: `:add-txn <date> <merchant...> <amount>`.
/// A leading `+` on the amount marks income; the category defaults to
/// Uncategorized since there's no selector on this path.
fn cmd_add_txn(args: &str, app: &mut App, store: &mut dyn LedgerStore) -> anyhow::Result<()> {
    if args.is_empty() {
        app.set_status("Usage: :add-txn <date> <merchant> <amount> (+amount = income)");
        return Ok(());
    }

    let mut parts = args.splitn(2, ' ');
    let date = parts.next().unwrap_or("");
    let rest = parts.next().unwrap_or("").trim();
    let rest_parts: Vec<&str> = rest.rsplitn(2, ' ').collect();
    if rest_parts.len() < 2 {
        app.set_status("Usage: :add-txn <date> <merchant> <amount>");
        return Ok(());
    }
    let amount_raw = rest_parts[0];
    let merchant = rest_parts[1];

    let (kind, amount) = match amount_raw.strip_prefix('+') {
        Some(stripped) => (TxnKind::Income, stripped),
        None => (TxnKind::Expense, amount_raw),
    };

    let draft = TransactionDraft {
        date: date.to_string(),
        kind,
        merchant: merchant.to_string(),
        category: "Uncategorized".to_string(),
        amount: amount.to_string(),
    };

    match draft.validate() {
        Ok(txn) => match store.append_transaction(app.txn_version, &txn) {
            Ok(()) => {
                app.reload(store);
                app.set_status(format!(
                    "Added {} {} for {}",
                    txn.kind,
                    super::util::format_amount(txn.amount),
                    txn.merchant
                ));
            }
            Err(e) => {
                app.reload(store);
                app.set_status(e.to_string());
            }
        },
        Err(e) => app.set_status(e.to_string()),
    }

    Ok(())
}

/// `:add-plan <label...> <amount>` adds a planned income line for the month
/// currently on screen.
fn cmd_add_plan(args: &str, app: &mut App, store: &mut dyn LedgerStore) -> anyhow::Result<()> {
    if args.is_empty() {
        app.set_status("Usage: :add-plan <label> <amount>");
        return Ok(());
    }

    let parts: Vec<&str> = args.rsplitn(2, ' ').collect();
    if parts.len() < 2 {
        app.set_status("Usage: :add-plan <label> <amount>");
        return Ok(());
    }

    let draft = PlannedDraft {
        label: parts[1].to_string(),
        amount: parts[0].to_string(),
    };

    match draft.validate(app.view_month) {
        Ok(row) => match store.append_planned(app.plan_version, &row) {
            Ok(()) => {
                app.reload(store);
                app.set_status(format!(
                    "Planned {} from {}",
                    super::util::format_amount(row.amount),
                    row.label
                ));
            }
            Err(e) => {
                app.reload(store);
                app.set_status(e.to_string());
            }
        },
        Err(e) => app.set_status(e.to_string()),
    }

    Ok(())
}

use rust_decimal::Decimal;

use crate::models::{PlannedAmount, Transaction, TxnKind};

use super::month::ViewMonth;
use super::schema::LedgerSchema;

/// The three numbers the dashboard lives on.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct MonthSummary {
    pub planned_income: Decimal,
    pub spent: Decimal,
    pub remaining: Decimal,
}

/// Transactions whose date falls inside `month`, in insertion order.
/// Rows with unparseable dates are excluded, not errors.
pub fn filter_by_month(transactions: &[Transaction], month: ViewMonth) -> Vec<Transaction> {
    transactions
        .iter()
        .filter(|t| month.contains(&t.date))
        .cloned()
        .collect()
}

/// Plan rows partitioned to `month`.
pub fn filter_plan_by_month(plan: &[PlannedAmount], month: ViewMonth) -> Vec<PlannedAmount> {
    let key = month.key();
    plan.iter().filter(|p| p.month == key).cloned().collect()
}

/// Sum of planned income rows; zero when the month has no plan.
pub fn planned_income(plan_rows: &[PlannedAmount]) -> Decimal {
    plan_rows
        .iter()
        .filter(|p| p.kind == TxnKind::Income)
        .map(|p| p.amount)
        .sum()
}

/// Total spent this month. Under the typed schema income rows don't count;
/// legacy files have no type column, so every row counts.
pub fn total_spent(transactions: &[Transaction], schema: LedgerSchema) -> Decimal {
    transactions
        .iter()
        .filter(|t| !schema.has_kind_column() || t.kind != TxnKind::Income)
        .map(|t| t.amount)
        .sum()
}

/// Planned income minus spend. Negative means overspend and is shown as
/// such, never clamped to zero.
pub fn remaining_to_assign(planned_income: Decimal, spent: Decimal) -> Decimal {
    planned_income - spent
}

/// The last `limit` entries by insertion order, newest first. Insertion
/// order, not the date field: a back-dated entry still surfaces where it
/// was entered, and same-date rows keep their relative entry order.
pub fn recent_history(transactions: &[Transaction], limit: usize) -> Vec<Transaction> {
    transactions.iter().rev().take(limit).cloned().collect()
}

/// One month's plan-versus-actual numbers from its filtered slices.
pub fn summarize(
    month_txns: &[Transaction],
    month_plan: &[PlannedAmount],
    schema: LedgerSchema,
) -> MonthSummary {
    let planned = planned_income(month_plan);
    let spent = total_spent(month_txns, schema);
    MonthSummary {
        planned_income: planned,
        spent,
        remaining: remaining_to_assign(planned, spent),
    }
}

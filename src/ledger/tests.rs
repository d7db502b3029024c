#![allow(clippy::unwrap_used)]

use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use crate::models::{PlannedAmount, Transaction, TxnKind};

use super::summary::{planned_income, remaining_to_assign, total_spent};
use super::validate::EntryError;
use super::*;

fn txn(date: &str, kind: TxnKind, merchant: &str, amount: Decimal) -> Transaction {
    Transaction::new(
        date.into(),
        kind,
        merchant.into(),
        "Groceries".into(),
        amount,
    )
}

fn plan_row(month: &str, kind: TxnKind, label: &str, amount: Decimal) -> PlannedAmount {
    PlannedAmount::new(month.into(), kind, label.into(), amount)
}

// ── ViewMonth ─────────────────────────────────────────────────

#[test]
fn test_shift_forward_and_back() {
    let m = ViewMonth {
        year: 2026,
        month: 6,
    };
    assert_eq!(m.shift(1).key(), "2026-07");
    assert_eq!(m.shift(-1).key(), "2026-05");
}

#[test]
fn test_shift_rolls_over_year_boundary() {
    let dec_2025 = ViewMonth {
        year: 2025,
        month: 12,
    };
    assert_eq!(dec_2025.shift(1).key(), "2026-01");

    let jan_2026 = ViewMonth {
        year: 2026,
        month: 1,
    };
    assert_eq!(jan_2026.shift(-1).key(), "2025-12");
}

#[test]
fn test_shift_round_trips() {
    let dec_2025 = ViewMonth {
        year: 2025,
        month: 12,
    };
    assert_eq!(dec_2025.shift(1).shift(-1), dec_2025);
    assert_eq!(dec_2025.shift(-25).shift(25), dec_2025);
    assert_eq!(dec_2025.shift(120).shift(-120), dec_2025);
}

#[test]
fn test_shift_far_months_are_valid() {
    let m = ViewMonth {
        year: 2026,
        month: 2,
    };
    // No bounds checking: a decade away is fine
    assert_eq!(m.shift(120).key(), "2036-02");
    assert_eq!(m.shift(-120).key(), "2016-02");
}

#[test]
fn test_from_key() {
    let m = ViewMonth::from_key("2026-02").unwrap();
    assert_eq!(m.year, 2026);
    assert_eq!(m.month, 2);
    assert!(ViewMonth::from_key("2026-13").is_none());
    assert!(ViewMonth::from_key("garbage").is_none());
}

#[test]
fn test_contains() {
    let feb = ViewMonth {
        year: 2026,
        month: 2,
    };
    assert!(feb.contains("2026-02-01"));
    assert!(feb.contains("2026-02-28"));
    assert!(!feb.contains("2026-01-31"));
    assert!(!feb.contains("2025-02-10"));
    assert!(!feb.contains("2026-02-29")); // not a leap year
    assert!(!feb.contains("not-a-date"));
}

// ── Month filters ─────────────────────────────────────────────

#[test]
fn test_filter_by_month_exact() {
    let feb = ViewMonth {
        year: 2026,
        month: 2,
    };
    let txns = vec![
        txn("2026-01-15", TxnKind::Expense, "January", dec!(10)),
        txn("2026-02-01", TxnKind::Expense, "February", dec!(20)),
        txn("2026-02-29", TxnKind::Expense, "Invalid", dec!(30)),
    ];
    let filtered = filter_by_month(&txns, feb);
    assert_eq!(filtered.len(), 1);
    assert_eq!(filtered[0].merchant, "February");
}

#[test]
fn test_filter_by_month_idempotent() {
    let feb = ViewMonth {
        year: 2026,
        month: 2,
    };
    let txns = vec![
        txn("2026-02-03", TxnKind::Expense, "A", dec!(1)),
        txn("2026-03-03", TxnKind::Expense, "B", dec!(2)),
    ];
    let once = filter_by_month(&txns, feb);
    let twice = filter_by_month(&once, feb);
    assert_eq!(once, twice);
}

#[test]
fn test_filter_plan_by_month() {
    let feb = ViewMonth {
        year: 2026,
        month: 2,
    };
    let plan = vec![
        plan_row("2026-02", TxnKind::Income, "Salary", dec!(3000)),
        plan_row("2026-03", TxnKind::Income, "Salary", dec!(3000)),
        plan_row("2026-02", TxnKind::Income, "Side gig", dec!(400)),
    ];
    let rows = filter_plan_by_month(&plan, feb);
    assert_eq!(rows.len(), 2);
    assert!(rows.iter().all(|r| r.month == "2026-02"));
}

// ── Totals ────────────────────────────────────────────────────

#[test]
fn test_planned_income_sums_income_rows_only() {
    let rows = vec![
        plan_row("2026-02", TxnKind::Income, "Salary", dec!(3000)),
        plan_row("2026-02", TxnKind::Income, "Side gig", dec!(400)),
        plan_row("2026-02", TxnKind::Expense, "Groceries budget", dec!(500)),
    ];
    assert_eq!(planned_income(&rows), dec!(3400));
}

#[test]
fn test_planned_income_empty_is_zero() {
    assert_eq!(planned_income(&[]), Decimal::ZERO);
}

#[test]
fn test_total_spent_typed_skips_income() {
    let txns = vec![
        txn("2026-02-01", TxnKind::Expense, "Groceries", dec!(80)),
        txn("2026-02-02", TxnKind::Income, "Paycheck", dec!(3000)),
        txn("2026-02-03", TxnKind::Expense, "Coffee", dec!(4.50)),
    ];
    assert_eq!(total_spent(&txns, LedgerSchema::Typed), dec!(84.50));
}

#[test]
fn test_total_spent_legacy_sums_everything() {
    let txns = vec![
        txn("2026-02-01", TxnKind::Expense, "Groceries", dec!(80)),
        txn("2026-02-02", TxnKind::Income, "Paycheck", dec!(3000)),
    ];
    assert_eq!(total_spent(&txns, LedgerSchema::Legacy), dec!(3080));
}

#[test]
fn test_total_spent_empty_is_zero() {
    assert_eq!(total_spent(&[], LedgerSchema::Typed), Decimal::ZERO);
    assert_eq!(total_spent(&[], LedgerSchema::Legacy), Decimal::ZERO);
}

#[test]
fn test_remaining_may_go_negative() {
    assert_eq!(remaining_to_assign(dec!(1000), dec!(1200)), dec!(-200));
    assert_eq!(remaining_to_assign(dec!(1000), dec!(250)), dec!(750));
}

#[test]
fn test_summarize() {
    let feb = ViewMonth {
        year: 2026,
        month: 2,
    };
    let txns = filter_by_month(
        &[
            txn("2026-02-01", TxnKind::Expense, "Rent", dec!(1200)),
            txn("2026-02-05", TxnKind::Income, "Paycheck", dec!(1000)),
        ],
        feb,
    );
    let plan = filter_plan_by_month(
        &[plan_row("2026-02", TxnKind::Income, "Salary", dec!(1000))],
        feb,
    );
    let summary = summarize(&txns, &plan, LedgerSchema::Typed);
    assert_eq!(summary.planned_income, dec!(1000));
    assert_eq!(summary.spent, dec!(1200));
    assert_eq!(summary.remaining, dec!(-200));
}

// ── Recent history ────────────────────────────────────────────

#[test]
fn test_recent_history_limit_and_order() {
    // 15 rows appended in order; dates deliberately shuffled so the test
    // proves insertion order wins over the date field.
    let txns: Vec<Transaction> = (0..15)
        .map(|i| {
            let day = 28 - i; // descending dates while insertion ascends
            txn(
                &format!("2026-02-{day:02}"),
                TxnKind::Expense,
                &format!("m{i}"),
                dec!(1),
            )
        })
        .collect();

    let recent = recent_history(&txns, 10);
    assert_eq!(recent.len(), 10);
    // Newest-by-insertion first: m14, m13, ... m5
    assert_eq!(recent[0].merchant, "m14");
    assert_eq!(recent[9].merchant, "m5");
}

#[test]
fn test_recent_history_fewer_rows_than_limit() {
    let txns = vec![
        txn("2026-02-01", TxnKind::Expense, "first", dec!(1)),
        txn("2026-02-01", TxnKind::Expense, "second", dec!(1)),
    ];
    let recent = recent_history(&txns, 10);
    assert_eq!(recent.len(), 2);
    // Same date: insertion order preserved through the reversal
    assert_eq!(recent[0].merchant, "second");
    assert_eq!(recent[1].merchant, "first");
}

// ── Entry validation ──────────────────────────────────────────

fn valid_draft() -> TransactionDraft {
    TransactionDraft {
        date: "2026-02-10".into(),
        kind: TxnKind::Expense,
        merchant: "Corner Store".into(),
        category: "Groceries".into(),
        amount: "12.50".into(),
    }
}

#[test]
fn test_draft_validates() {
    let txn = valid_draft().validate().unwrap();
    assert_eq!(txn.merchant, "Corner Store");
    assert_eq!(txn.amount, dec!(12.50));
}

#[test]
fn test_draft_rejects_empty_merchant() {
    let mut draft = valid_draft();
    draft.merchant = "   ".into();
    assert_eq!(draft.validate(), Err(EntryError::MissingMerchant));
}

#[test]
fn test_draft_rejects_zero_amount() {
    let mut draft = valid_draft();
    draft.amount = "0".into();
    assert_eq!(draft.validate(), Err(EntryError::AmountNotPositive));
}

#[test]
fn test_draft_rejects_negative_amount() {
    let mut draft = valid_draft();
    draft.amount = "-5".into();
    assert_eq!(draft.validate(), Err(EntryError::AmountNotPositive));
}

#[test]
fn test_draft_rejects_unparseable_amount() {
    let mut draft = valid_draft();
    draft.amount = "lots".into();
    assert_eq!(draft.validate(), Err(EntryError::BadAmount("lots".into())));
}

#[test]
fn test_draft_cleans_currency_formatting() {
    let mut draft = valid_draft();
    draft.amount = "$1,250.75".into();
    assert_eq!(draft.validate().unwrap().amount, dec!(1250.75));
}

#[test]
fn test_draft_rejects_placeholder_category() {
    let mut draft = valid_draft();
    draft.category = String::new();
    assert_eq!(draft.validate(), Err(EntryError::MissingCategory));
}

#[test]
fn test_draft_rejects_bad_date() {
    let mut draft = valid_draft();
    draft.date = "02/10/2026".into();
    assert_eq!(
        draft.validate(),
        Err(EntryError::BadDate("02/10/2026".into()))
    );
}

#[test]
fn test_planned_draft_validates_into_view_month() {
    let feb = ViewMonth {
        year: 2026,
        month: 2,
    };
    let row = PlannedDraft {
        label: "Salary".into(),
        amount: "3000".into(),
    }
    .validate(feb)
    .unwrap();
    assert_eq!(row.month, "2026-02");
    assert_eq!(row.kind, TxnKind::Income);
    assert_eq!(row.amount, dec!(3000));
}

#[test]
fn test_planned_draft_rejects_empty_label() {
    let feb = ViewMonth {
        year: 2026,
        month: 2,
    };
    let draft = PlannedDraft {
        label: String::new(),
        amount: "100".into(),
    };
    assert_eq!(draft.validate(feb), Err(EntryError::MissingLabel));
}

#![allow(clippy::unwrap_used)]

use rust_decimal_macros::dec;
use tempfile::TempDir;

use crate::ledger::{LedgerSchema, TransactionDraft};
use crate::models::{PlannedAmount, Transaction, TxnKind};

use super::*;

fn txn(date: &str, kind: TxnKind, merchant: &str) -> Transaction {
    Transaction::new(
        date.into(),
        kind,
        merchant.into(),
        "Groceries".into(),
        dec!(9.99),
    )
}

fn open_store(dir: &TempDir, schema: LedgerSchema) -> CsvStore {
    CsvStore::open(dir.path(), schema).unwrap()
}

// ── CsvStore ──────────────────────────────────────────────────

#[test]
fn test_missing_files_read_as_empty_tables() {
    let dir = TempDir::new().unwrap();
    let store = open_store(&dir, LedgerSchema::Typed);

    let (txns, version) = store.read_transactions().unwrap();
    assert!(txns.is_empty());
    assert_eq!(version, 0);

    let (plan, version) = store.read_plan().unwrap();
    assert!(plan.is_empty());
    assert_eq!(version, 0);
}

#[test]
fn test_append_then_read_back() {
    let dir = TempDir::new().unwrap();
    let mut store = open_store(&dir, LedgerSchema::Typed);

    let first = txn("2026-02-01", TxnKind::Expense, "Corner Store");
    store.append_transaction(0, &first).unwrap();

    let second = txn("2026-02-03", TxnKind::Income, "Paycheck");
    store.append_transaction(1, &second).unwrap();

    let (rows, version) = store.read_transactions().unwrap();
    assert_eq!(rows.len(), 2);
    assert_eq!(version, 2);
    // Appended row lands last, earlier rows untouched
    assert_eq!(rows[0], first);
    assert_eq!(rows[1], second);
}

#[test]
fn test_append_increases_length_by_exactly_one() {
    let dir = TempDir::new().unwrap();
    let mut store = open_store(&dir, LedgerSchema::Typed);

    let (before, version) = store.read_transactions().unwrap();
    let entry = txn("2026-02-10", TxnKind::Expense, "Bakery");
    store.append_transaction(version, &entry).unwrap();

    let (after, _) = store.read_transactions().unwrap();
    assert_eq!(after.len(), before.len() + 1);
    assert_eq!(after.last().unwrap(), &entry);
}

#[test]
fn test_stale_base_append_is_rejected_and_loses_nothing() {
    let dir = TempDir::new().unwrap();
    let mut store = open_store(&dir, LedgerSchema::Typed);

    store
        .append_transaction(0, &txn("2026-02-01", TxnKind::Expense, "A"))
        .unwrap();

    // A write based on the pre-append snapshot must not clobber row A
    let err = store
        .append_transaction(0, &txn("2026-02-02", TxnKind::Expense, "B"))
        .unwrap_err();
    assert!(matches!(err, StoreError::StaleBase));

    let (rows, version) = store.read_transactions().unwrap();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].merchant, "A");
    assert_eq!(version, 1);
}

#[test]
fn test_plan_append_and_read_back() {
    let dir = TempDir::new().unwrap();
    let mut store = open_store(&dir, LedgerSchema::Typed);

    let row = PlannedAmount::new("2026-02".into(), TxnKind::Income, "Salary".into(), dec!(3000));
    store.append_planned(0, &row).unwrap();

    let (plan, version) = store.read_plan().unwrap();
    assert_eq!(version, 1);
    assert_eq!(plan[0], row);

    // Plan and transactions are separate partitions
    let (txns, _) = store.read_transactions().unwrap();
    assert!(txns.is_empty());
}

#[test]
fn test_plan_stale_base_rejected() {
    let dir = TempDir::new().unwrap();
    let mut store = open_store(&dir, LedgerSchema::Typed);

    let row = PlannedAmount::new("2026-02".into(), TxnKind::Income, "Salary".into(), dec!(3000));
    store.append_planned(0, &row).unwrap();
    let err = store.append_planned(0, &row).unwrap_err();
    assert!(matches!(err, StoreError::StaleBase));
}

#[test]
fn test_legacy_file_loads_with_expense_fill() {
    let dir = TempDir::new().unwrap();
    std::fs::write(
        dir.path().join("transactions.csv"),
        "Date,Merchant,Category,Amount\n\
         2026-02-01,Corner Store,Groceries,42.50\n\
         2026-02-02,Paycheck,Income,3000\n",
    )
    .unwrap();

    let store = open_store(&dir, LedgerSchema::Legacy);
    let (rows, version) = store.read_transactions().unwrap();
    assert_eq!(version, 2);
    // No Type column: every row default-fills to Expense
    assert!(rows.iter().all(|t| t.kind == TxnKind::Expense));
    assert_eq!(rows[0].merchant, "Corner Store");
    assert_eq!(rows[0].amount, dec!(42.50));
}

#[test]
fn test_typed_file_with_blank_type_cell_defaults_to_expense() {
    let dir = TempDir::new().unwrap();
    std::fs::write(
        dir.path().join("transactions.csv"),
        "Date,Type,Merchant,Category,Amount\n\
         2026-02-01,,Corner Store,Groceries,10\n\
         2026-02-02,Income,Paycheck,Income,3000\n",
    )
    .unwrap();

    let store = open_store(&dir, LedgerSchema::Typed);
    let (rows, _) = store.read_transactions().unwrap();
    assert_eq!(rows[0].kind, TxnKind::Expense);
    assert_eq!(rows[1].kind, TxnKind::Income);
}

#[test]
fn test_legacy_file_loads_under_typed_config() {
    // A user upgrading in place: old 4-column file, new schema setting.
    let dir = TempDir::new().unwrap();
    std::fs::write(
        dir.path().join("transactions.csv"),
        "Date,Merchant,Category,Amount\n2026-02-01,Cafe,Coffee Shops,4.50\n",
    )
    .unwrap();

    let store = open_store(&dir, LedgerSchema::Typed);
    let (rows, _) = store.read_transactions().unwrap();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].kind, TxnKind::Expense);
    assert_eq!(rows[0].merchant, "Cafe");
}

#[test]
fn test_legacy_schema_writes_four_columns() {
    let dir = TempDir::new().unwrap();
    let mut store = open_store(&dir, LedgerSchema::Legacy);
    store
        .append_transaction(0, &txn("2026-02-01", TxnKind::Expense, "Cafe"))
        .unwrap();

    let contents = std::fs::read_to_string(dir.path().join("transactions.csv")).unwrap();
    let header = contents.lines().next().unwrap();
    assert_eq!(header, "Date,Merchant,Category,Amount");
}

#[test]
fn test_typed_schema_writes_five_columns() {
    let dir = TempDir::new().unwrap();
    let mut store = open_store(&dir, LedgerSchema::Typed);
    store
        .append_transaction(0, &txn("2026-02-01", TxnKind::Income, "Paycheck"))
        .unwrap();

    let contents = std::fs::read_to_string(dir.path().join("transactions.csv")).unwrap();
    let mut lines = contents.lines();
    assert_eq!(lines.next().unwrap(), "Date,Type,Merchant,Category,Amount");
    assert!(lines.next().unwrap().contains("Income"));
}

#[test]
fn test_unparseable_stored_amount_reads_as_zero() {
    let dir = TempDir::new().unwrap();
    std::fs::write(
        dir.path().join("transactions.csv"),
        "Date,Type,Merchant,Category,Amount\n2026-02-01,Expense,Cafe,Coffee Shops,oops\n",
    )
    .unwrap();

    let store = open_store(&dir, LedgerSchema::Typed);
    let (rows, _) = store.read_transactions().unwrap();
    assert_eq!(rows[0].amount, rust_decimal::Decimal::ZERO);
}

#[test]
fn test_hand_edited_amount_formatting_accepted() {
    let dir = TempDir::new().unwrap();
    std::fs::write(
        dir.path().join("transactions.csv"),
        "Date,Type,Merchant,Category,Amount\n2026-02-01,Expense,Rent,Housing,\"$1,200.00\"\n",
    )
    .unwrap();

    let store = open_store(&dir, LedgerSchema::Typed);
    let (rows, _) = store.read_transactions().unwrap();
    assert_eq!(rows[0].amount, dec!(1200.00));
}

#[test]
fn test_rejected_drafts_never_reach_the_store() {
    // The submit path validates first; a rejected draft performs no write.
    let mut store = MemoryStore::new();
    let drafts = [
        TransactionDraft {
            date: "2026-02-10".into(),
            kind: TxnKind::Expense,
            merchant: "Cafe".into(),
            category: "Coffee Shops".into(),
            amount: "0".into(),
        },
        TransactionDraft {
            date: "2026-02-10".into(),
            kind: TxnKind::Expense,
            merchant: "".into(),
            category: "Coffee Shops".into(),
            amount: "4.50".into(),
        },
    ];

    for draft in drafts {
        if let Ok(txn) = draft.validate() {
            store.append_transaction(0, &txn).unwrap();
        }
    }
    assert!(store.transactions.is_empty());
}

// ── MemoryStore failure paths ─────────────────────────────────

#[test]
fn test_memory_store_roundtrip() {
    let mut store = MemoryStore::new();
    let entry = txn("2026-02-01", TxnKind::Expense, "Cafe");
    store.append_transaction(0, &entry).unwrap();
    let (rows, version) = store.read_transactions().unwrap();
    assert_eq!(rows, vec![entry]);
    assert_eq!(version, 1);
}

#[test]
fn test_memory_store_unavailable_reads() {
    let store = MemoryStore {
        fail_reads: true,
        ..MemoryStore::new()
    };
    let err = store.read_transactions().unwrap_err();
    assert!(matches!(err, StoreError::Unavailable(_)));
}

#[test]
fn test_memory_store_denied_writes_change_nothing() {
    let mut store = MemoryStore {
        deny_writes: true,
        ..MemoryStore::new()
    };
    let err = store
        .append_transaction(0, &txn("2026-02-01", TxnKind::Expense, "Cafe"))
        .unwrap_err();
    assert!(matches!(err, StoreError::Unauthorized(_)));
    assert!(store.transactions.is_empty());
}

#[test]
fn test_memory_store_stale_base() {
    let mut store = MemoryStore::new();
    store
        .append_transaction(0, &txn("2026-02-01", TxnKind::Expense, "A"))
        .unwrap();
    let err = store
        .append_transaction(0, &txn("2026-02-02", TxnKind::Expense, "B"))
        .unwrap_err();
    assert!(matches!(err, StoreError::StaleBase));
    assert_eq!(store.transactions.len(), 1);
}

#![allow(clippy::unwrap_used)]

use rust_decimal_macros::dec;

use super::util::*;
use crate::models::TxnKind;

// ── format_amount ─────────────────────────────────────────────

#[test]
fn test_format_amount_basic() {
    assert_eq!(format_amount(dec!(1234.56)), "$1,234.56");
}

#[test]
fn test_format_amount_zero() {
    assert_eq!(format_amount(dec!(0)), "$0.00");
}

#[test]
fn test_format_amount_negative() {
    assert_eq!(format_amount(dec!(-200)), "-$200.00");
}

#[test]
fn test_format_amount_millions() {
    assert_eq!(format_amount(dec!(1234567.89)), "$1,234,567.89");
}

#[test]
fn test_format_amount_rounds_to_cents() {
    assert_eq!(format_amount(dec!(4.5)), "$4.50");
}

// ── format_directed ───────────────────────────────────────────

#[test]
fn test_format_directed_income_gets_plus() {
    assert_eq!(format_directed(TxnKind::Income, dec!(3000)), "+$3,000.00");
}

#[test]
fn test_format_directed_expense_gets_minus() {
    assert_eq!(format_directed(TxnKind::Expense, dec!(4.50)), "-$4.50");
}

// ── truncate ──────────────────────────────────────────────────

#[test]
fn test_truncate_short_string() {
    assert_eq!(truncate("hello", 10), "hello");
}

#[test]
fn test_truncate_exact_length() {
    assert_eq!(truncate("hello", 5), "hello");
}

#[test]
fn test_truncate_long_string() {
    assert_eq!(truncate("hello world", 5), "hell…");
}

#[test]
fn test_truncate_zero_max() {
    assert_eq!(truncate("hello", 0), "");
}

#[test]
fn test_truncate_unicode() {
    assert_eq!(truncate("日本語テスト", 4), "日本語…");
}

// ── scroll helpers ────────────────────────────────────────────

#[test]
fn test_scroll_down_moves_cursor_and_window() {
    let (mut index, mut scroll) = (0, 0);
    for _ in 0..6 {
        scroll_down(&mut index, &mut scroll, 10, 5);
    }
    assert_eq!(index, 6);
    assert_eq!(scroll, 2);
}

#[test]
fn test_scroll_down_stops_at_end() {
    let (mut index, mut scroll) = (9, 5);
    scroll_down(&mut index, &mut scroll, 10, 5);
    assert_eq!(index, 9);
}

#[test]
fn test_scroll_up_pulls_window() {
    let (mut index, mut scroll) = (3, 3);
    scroll_up(&mut index, &mut scroll);
    assert_eq!(index, 2);
    assert_eq!(scroll, 2);
}

#[test]
fn test_scroll_to_top_and_bottom() {
    let (mut index, mut scroll) = (7, 4);
    scroll_to_top(&mut index, &mut scroll);
    assert_eq!((index, scroll), (0, 0));

    scroll_to_bottom(&mut index, &mut scroll, 10, 5);
    assert_eq!(index, 9);
    assert_eq!(scroll, 5);
}

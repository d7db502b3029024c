use chrono::NaiveDate;
use rust_decimal::Decimal;
use std::str::FromStr;
use thiserror::Error;

use crate::models::{PlannedAmount, Transaction, TxnKind};

use super::month::ViewMonth;

/// Why a submitted entry was refused. Rejections never reach the store;
/// the draft stays on screen so the user can fix and resubmit.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum EntryError {
    #[error("Merchant is required")]
    MissingMerchant,
    #[error("Label is required")]
    MissingLabel,
    #[error("Pick a category first")]
    MissingCategory,
    #[error("Invalid date '{0}' — use YYYY-MM-DD")]
    BadDate(String),
    #[error("Invalid amount '{0}'")]
    BadAmount(String),
    #[error("Amount must be greater than zero")]
    AmountNotPositive,
}

/// Raw transaction-form state. Everything is a string until `validate`.
#[derive(Debug, Clone, Default)]
pub struct TransactionDraft {
    pub date: String,
    pub kind: TxnKind,
    pub merchant: String,
    pub category: String,
    pub amount: String,
}

impl TransactionDraft {
    pub fn validate(&self) -> Result<Transaction, EntryError> {
        let date = self.date.trim();
        if NaiveDate::parse_from_str(date, "%Y-%m-%d").is_err() {
            return Err(EntryError::BadDate(date.to_string()));
        }
        let merchant = self.merchant.trim();
        if merchant.is_empty() {
            return Err(EntryError::MissingMerchant);
        }
        let category = self.category.trim();
        if category.is_empty() {
            return Err(EntryError::MissingCategory);
        }
        let amount = parse_amount(&self.amount)?;
        Ok(Transaction::new(
            date.to_string(),
            self.kind,
            merchant.to_string(),
            category.to_string(),
            amount,
        ))
    }
}

/// Raw plan-form state. The month isn't a field; the form always writes
/// into the month being viewed.
#[derive(Debug, Clone, Default)]
pub struct PlannedDraft {
    pub label: String,
    pub amount: String,
}

impl PlannedDraft {
    pub fn validate(&self, month: ViewMonth) -> Result<PlannedAmount, EntryError> {
        let label = self.label.trim();
        if label.is_empty() {
            return Err(EntryError::MissingLabel);
        }
        let amount = parse_amount(&self.amount)?;
        Ok(PlannedAmount::new(
            month.key(),
            TxnKind::Income,
            label.to_string(),
            amount,
        ))
    }
}

/// Parse a user-typed amount, tolerating "$" and thousands commas, and
/// require it strictly positive.
fn parse_amount(raw: &str) -> Result<Decimal, EntryError> {
    let cleaned = raw.replace(['$', ','], "");
    let cleaned = cleaned.trim();
    if cleaned.is_empty() {
        return Err(EntryError::BadAmount(raw.trim().to_string()));
    }
    let amount =
        Decimal::from_str(cleaned).map_err(|_| EntryError::BadAmount(raw.trim().to_string()))?;
    if amount <= Decimal::ZERO {
        return Err(EntryError::AmountNotPositive);
    }
    Ok(amount)
}

use rust_decimal::Decimal;

use super::TxnKind;

/// One row of the monthly plan. Only income rows exist in practice today,
/// but the schema admits planned expense categories too.
#[derive(Debug, Clone, PartialEq)]
pub struct PlannedAmount {
    /// Format: "YYYY-MM", the partition key joining plan rows to a month.
    pub month: String,
    pub kind: TxnKind,
    /// Income source or budget-item name.
    pub label: String,
    pub amount: Decimal,
}

impl PlannedAmount {
    pub fn new(month: String, kind: TxnKind, label: String, amount: Decimal) -> Self {
        Self {
            month,
            kind,
            label,
            amount,
        }
    }
}

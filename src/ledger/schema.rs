/// Which generation of the transactions table is active.
///
/// Early ledger files had no Type column: every row was an expense and the
/// monthly spend summed the whole table. Current files carry an explicit
/// Expense/Income type. The missing-column case is handled once, in the
/// store's reader (blank or absent Type becomes Expense); this enum only
/// decides the write layout and the spend rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LedgerSchema {
    /// Date,Merchant,Category,Amount. Spend sums every row.
    Legacy,
    /// Date,Type,Merchant,Category,Amount. Spend sums non-income rows.
    #[default]
    Typed,
}

impl LedgerSchema {
    pub fn has_kind_column(&self) -> bool {
        matches!(self, Self::Typed)
    }
}

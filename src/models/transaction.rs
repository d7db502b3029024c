use rust_decimal::Decimal;

/// Whether a ledger row is money going out or coming in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TxnKind {
    #[default]
    Expense,
    Income,
}

impl TxnKind {
    /// Case-insensitive parse; anything that isn't "income" (including an
    /// empty string from an old file) is an expense.
    pub fn parse(s: &str) -> Self {
        if s.trim().eq_ignore_ascii_case("income") {
            Self::Income
        } else {
            Self::Expense
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Expense => "Expense",
            Self::Income => "Income",
        }
    }
}

impl std::fmt::Display for TxnKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Transaction {
    /// Format: "YYYY-MM-DD", kept as entered.
    pub date: String,
    pub kind: TxnKind,
    pub merchant: String,
    pub category: String,
    /// Always non-negative; direction lives in `kind`.
    pub amount: Decimal,
}

impl Transaction {
    pub fn new(
        date: String,
        kind: TxnKind,
        merchant: String,
        category: String,
        amount: Decimal,
    ) -> Self {
        Self {
            date,
            kind,
            merchant,
            category,
            amount,
        }
    }

    pub fn is_income(&self) -> bool {
        self.kind == TxnKind::Income
    }
}

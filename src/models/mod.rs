mod category;
mod planned;
mod transaction;

pub use category::{find_category, DEFAULT_CATEGORIES};
pub use planned::PlannedAmount;
pub use transaction::{Transaction, TxnKind};

mod month;
mod schema;
mod summary;
mod validate;

pub(crate) use month::ViewMonth;
pub(crate) use schema::LedgerSchema;
pub(crate) use summary::{
    filter_by_month, filter_plan_by_month, recent_history, summarize, MonthSummary,
};
pub(crate) use validate::{PlannedDraft, TransactionDraft};

#[cfg(test)]
mod tests;

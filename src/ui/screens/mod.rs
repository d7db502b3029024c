pub(crate) mod dashboard;
pub(crate) mod entry;
pub(crate) mod plan;
pub(crate) mod transactions;

mod csv_store;
#[cfg(test)]
mod memory;

pub(crate) use csv_store::CsvStore;
#[cfg(test)]
pub(crate) use memory::MemoryStore;

use thiserror::Error;

use crate::models::{PlannedAmount, Transaction};

/// The number of rows a table held when it was read. Appends carry the
/// version they were based on, so a write racing another writer is
/// rejected instead of silently dropping the other writer's row.
pub(crate) type TableVersion = u64;

#[derive(Debug, Error)]
pub(crate) enum StoreError {
    /// The backing medium can't be reached or read. Callers substitute an
    /// empty, correctly-schemaed table and keep going.
    #[error("ledger store unavailable: {0}")]
    Unavailable(String),
    /// The medium is reachable but refused the write.
    #[error("write not authorized: {0}")]
    Unauthorized(String),
    /// The table changed since it was last read.
    #[error("ledger changed since last read — refresh and resubmit")]
    StaleBase,
}

/// Flat-table persistence for the ledger and the plan. Reads return the
/// whole table plus its version; appends are compare-and-append against
/// that version and atomic from the caller's point of view: either the
/// full updated table is durable, with the new row last and every prior
/// row intact, or nothing changed.
pub(crate) trait LedgerStore {
    fn read_transactions(&self) -> Result<(Vec<Transaction>, TableVersion), StoreError>;

    fn read_plan(&self) -> Result<(Vec<PlannedAmount>, TableVersion), StoreError>;

    fn append_transaction(
        &mut self,
        base: TableVersion,
        txn: &Transaction,
    ) -> Result<(), StoreError>;

    fn append_planned(&mut self, base: TableVersion, row: &PlannedAmount)
        -> Result<(), StoreError>;
}

#[cfg(test)]
mod tests;

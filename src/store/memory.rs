use crate::models::{PlannedAmount, Transaction};

use super::{LedgerStore, StoreError, TableVersion};

/// Vec-backed store for tests. The failure toggles let a test drive the
/// unreachable-medium and refused-write paths without a filesystem.
#[derive(Debug, Default)]
pub(crate) struct MemoryStore {
    pub(crate) transactions: Vec<Transaction>,
    pub(crate) plan: Vec<PlannedAmount>,
    pub(crate) fail_reads: bool,
    pub(crate) deny_writes: bool,
}

impl MemoryStore {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    fn check_read(&self) -> Result<(), StoreError> {
        if self.fail_reads {
            Err(StoreError::Unavailable("memory store offline".into()))
        } else {
            Ok(())
        }
    }

    fn check_write(&self) -> Result<(), StoreError> {
        if self.deny_writes {
            Err(StoreError::Unauthorized("memory store is read-only".into()))
        } else {
            Ok(())
        }
    }
}

impl LedgerStore for MemoryStore {
    fn read_transactions(&self) -> Result<(Vec<Transaction>, TableVersion), StoreError> {
        self.check_read()?;
        Ok((
            self.transactions.clone(),
            self.transactions.len() as TableVersion,
        ))
    }

    fn read_plan(&self) -> Result<(Vec<PlannedAmount>, TableVersion), StoreError> {
        self.check_read()?;
        Ok((self.plan.clone(), self.plan.len() as TableVersion))
    }

    fn append_transaction(
        &mut self,
        base: TableVersion,
        txn: &Transaction,
    ) -> Result<(), StoreError> {
        self.check_read()?;
        self.check_write()?;
        if self.transactions.len() as TableVersion != base {
            return Err(StoreError::StaleBase);
        }
        self.transactions.push(txn.clone());
        Ok(())
    }

    fn append_planned(
        &mut self,
        base: TableVersion,
        row: &PlannedAmount,
    ) -> Result<(), StoreError> {
        self.check_read()?;
        self.check_write()?;
        if self.plan.len() as TableVersion != base {
            return Err(StoreError::StaleBase);
        }
        self.plan.push(row.clone());
        Ok(())
    }
}

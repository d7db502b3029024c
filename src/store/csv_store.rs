use rust_decimal::Decimal;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use crate::ledger::LedgerSchema;
use crate::models::{PlannedAmount, Transaction, TxnKind};

use super::{LedgerStore, StoreError, TableVersion};

const TRANSACTIONS_FILE: &str = "transactions.csv";
const PLAN_FILE: &str = "plan.csv";
const TMP_SUFFIX: &str = "tmp";

/// Two headered CSV tables in one directory. Every append rewrites the
/// whole table through a temp file in the same directory followed by a
/// rename, so readers never observe a half-written file.
pub(crate) struct CsvStore {
    dir: PathBuf,
    schema: LedgerSchema,
}

impl CsvStore {
    pub(crate) fn open(dir: &Path, schema: LedgerSchema) -> Result<Self, StoreError> {
        fs::create_dir_all(dir).map_err(|e| io_err("create data directory", &e))?;
        Ok(Self {
            dir: dir.to_path_buf(),
            schema,
        })
    }

    fn transactions_path(&self) -> PathBuf {
        self.dir.join(TRANSACTIONS_FILE)
    }

    fn plan_path(&self) -> PathBuf {
        self.dir.join(PLAN_FILE)
    }

    fn write_transactions(&self, rows: &[Transaction]) -> Result<(), StoreError> {
        let path = self.transactions_path();
        let tmp = tmp_path(&path);
        {
            let mut wtr = csv::Writer::from_path(&tmp)
                .map_err(|e| csv_err("open transactions table for writing", &e))?;
            let result = (|| -> Result<(), csv::Error> {
                if self.schema.has_kind_column() {
                    wtr.write_record(["Date", "Type", "Merchant", "Category", "Amount"])?;
                    for t in rows {
                        let amount = t.amount.to_string();
                        wtr.write_record([
                            t.date.as_str(),
                            t.kind.as_str(),
                            t.merchant.as_str(),
                            t.category.as_str(),
                            amount.as_str(),
                        ])?;
                    }
                } else {
                    wtr.write_record(["Date", "Merchant", "Category", "Amount"])?;
                    for t in rows {
                        let amount = t.amount.to_string();
                        wtr.write_record([
                            t.date.as_str(),
                            t.merchant.as_str(),
                            t.category.as_str(),
                            amount.as_str(),
                        ])?;
                    }
                }
                wtr.flush().map_err(csv::Error::from)
            })();
            result.map_err(|e| csv_err("write transactions table", &e))?;
        }
        fs::rename(&tmp, &path).map_err(|e| io_err("replace transactions table", &e))
    }

    fn write_plan(&self, rows: &[PlannedAmount]) -> Result<(), StoreError> {
        let path = self.plan_path();
        let tmp = tmp_path(&path);
        {
            let mut wtr = csv::Writer::from_path(&tmp)
                .map_err(|e| csv_err("open plan table for writing", &e))?;
            let result = (|| -> Result<(), csv::Error> {
                wtr.write_record(["Month", "Type", "Category", "Planned_Amount"])?;
                for p in rows {
                    let amount = p.amount.to_string();
                    wtr.write_record([
                        p.month.as_str(),
                        p.kind.as_str(),
                        p.label.as_str(),
                        amount.as_str(),
                    ])?;
                }
                wtr.flush().map_err(csv::Error::from)
            })();
            result.map_err(|e| csv_err("write plan table", &e))?;
        }
        fs::rename(&tmp, &path).map_err(|e| io_err("replace plan table", &e))
    }
}

impl LedgerStore for CsvStore {
    fn read_transactions(&self) -> Result<(Vec<Transaction>, TableVersion), StoreError> {
        let path = self.transactions_path();
        if !path.exists() {
            // First run: an absent table is empty, not broken
            return Ok((Vec::new(), 0));
        }

        let mut rdr = csv::ReaderBuilder::new()
            .flexible(true)
            .from_path(&path)
            .map_err(|e| csv_err("open transactions table", &e))?;

        // Columns are resolved by header name so that both table
        // generations load; the missing Type column of legacy files
        // default-fills to Expense right here, once, at load time.
        let headers = rdr
            .headers()
            .map_err(|e| csv_err("read transactions header", &e))?
            .clone();
        let col = |name: &str| {
            headers
                .iter()
                .position(|h| h.trim().eq_ignore_ascii_case(name))
        };
        let kind_col = col("Type");
        let date_col = col("Date").unwrap_or(0);
        let merchant_col = col("Merchant").unwrap_or(if kind_col.is_some() { 2 } else { 1 });
        let category_col = col("Category").unwrap_or(merchant_col + 1);
        let amount_col = col("Amount").unwrap_or(category_col + 1);

        let mut rows = Vec::new();
        for result in rdr.records() {
            let record = result.map_err(|e| csv_err("read transactions table", &e))?;
            let field = |idx: usize| record.get(idx).unwrap_or("").trim();
            rows.push(Transaction::new(
                field(date_col).to_string(),
                TxnKind::parse(kind_col.map(&field).unwrap_or("")),
                field(merchant_col).to_string(),
                field(category_col).to_string(),
                parse_stored_amount(field(amount_col)),
            ));
        }
        let version = rows.len() as TableVersion;
        Ok((rows, version))
    }

    fn read_plan(&self) -> Result<(Vec<PlannedAmount>, TableVersion), StoreError> {
        let path = self.plan_path();
        if !path.exists() {
            return Ok((Vec::new(), 0));
        }

        let mut rdr = csv::ReaderBuilder::new()
            .flexible(true)
            .from_path(&path)
            .map_err(|e| csv_err("open plan table", &e))?;

        let headers = rdr
            .headers()
            .map_err(|e| csv_err("read plan header", &e))?
            .clone();
        let col = |name: &str| {
            headers
                .iter()
                .position(|h| h.trim().eq_ignore_ascii_case(name))
        };
        let month_col = col("Month").unwrap_or(0);
        let kind_col = col("Type").unwrap_or(1);
        let label_col = col("Category").unwrap_or(2);
        let amount_col = col("Planned_Amount").unwrap_or(3);

        let mut rows = Vec::new();
        for result in rdr.records() {
            let record = result.map_err(|e| csv_err("read plan table", &e))?;
            let field = |idx: usize| record.get(idx).unwrap_or("").trim();
            rows.push(PlannedAmount::new(
                field(month_col).to_string(),
                TxnKind::parse(field(kind_col)),
                field(label_col).to_string(),
                parse_stored_amount(field(amount_col)),
            ));
        }
        let version = rows.len() as TableVersion;
        Ok((rows, version))
    }

    fn append_transaction(
        &mut self,
        base: TableVersion,
        txn: &Transaction,
    ) -> Result<(), StoreError> {
        let (mut rows, version) = self.read_transactions()?;
        if version != base {
            return Err(StoreError::StaleBase);
        }
        rows.push(txn.clone());
        self.write_transactions(&rows)
    }

    fn append_planned(
        &mut self,
        base: TableVersion,
        row: &PlannedAmount,
    ) -> Result<(), StoreError> {
        let (mut rows, version) = self.read_plan()?;
        if version != base {
            return Err(StoreError::StaleBase);
        }
        rows.push(row.clone());
        self.write_plan(&rows)
    }
}

/// Stored amounts are written by us as plain decimals, but hand-edited
/// files show up with "$" and thousands commas; a cell that still doesn't
/// parse reads as zero rather than poisoning the whole table.
fn parse_stored_amount(raw: &str) -> Decimal {
    let cleaned = raw.replace(['$', ','], "");
    Decimal::from_str(cleaned.trim()).unwrap_or_default()
}

fn tmp_path(path: &Path) -> PathBuf {
    let mut tmp = path.to_path_buf();
    let ext = match path.extension().and_then(|ext| ext.to_str()) {
        Some(existing) => format!("{existing}.{TMP_SUFFIX}"),
        None => TMP_SUFFIX.to_string(),
    };
    tmp.set_extension(ext);
    tmp
}

fn io_err(context: &str, e: &io::Error) -> StoreError {
    if e.kind() == io::ErrorKind::PermissionDenied {
        StoreError::Unauthorized(format!("{context}: {e}"))
    } else {
        StoreError::Unavailable(format!("{context}: {e}"))
    }
}

fn csv_err(context: &str, e: &csv::Error) -> StoreError {
    match e.kind() {
        csv::ErrorKind::Io(ioe) => io_err(context, ioe),
        _ => StoreError::Unavailable(format!("{context}: {e}")),
    }
}

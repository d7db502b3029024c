mod ledger;
mod models;
mod run;
mod store;
mod ui;

use anyhow::{Context, Result};
use std::path::PathBuf;

use ledger::LedgerSchema;

fn main() -> Result<()> {
    let mut args: Vec<String> = std::env::args().collect();

    let schema = if take_flag(&mut args, "--legacy") {
        LedgerSchema::Legacy
    } else {
        LedgerSchema::Typed
    };
    let data_dir = match take_flag_value(&mut args, "--dir") {
        Some(dir) => PathBuf::from(dir),
        None => default_data_dir()?,
    };

    let mut store = store::CsvStore::open(&data_dir, schema)
        .with_context(|| format!("Failed to open store in {}", data_dir.display()))?;

    match args.len() {
        1 => run::as_tui(&mut store, schema),
        _ => run::as_cli(&args, &mut store, schema),
    }
}

fn take_flag(args: &mut Vec<String>, name: &str) -> bool {
    match args.iter().position(|a| a == name) {
        Some(pos) => {
            args.remove(pos);
            true
        }
        None => false,
    }
}

fn take_flag_value(args: &mut Vec<String>, name: &str) -> Option<String> {
    let pos = args.iter().position(|a| a == name)?;
    if pos + 1 >= args.len() {
        return None;
    }
    let value = args.remove(pos + 1);
    args.remove(pos);
    Some(value)
}

fn default_data_dir() -> Result<PathBuf> {
    let proj_dirs = directories::ProjectDirs::from("com", "ledgerbook", "Ledgerbook")
        .ok_or_else(|| anyhow::anyhow!("Could not determine data directory"))?;
    Ok(proj_dirs.data_dir().to_path_buf())
}

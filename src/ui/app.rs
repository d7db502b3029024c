use chrono::Local;

use crate::ledger::{
    filter_by_month, filter_plan_by_month, recent_history, summarize, LedgerSchema, MonthSummary,
    PlannedDraft, TransactionDraft, ViewMonth,
};
use crate::models::{PlannedAmount, Transaction, TxnKind, DEFAULT_CATEGORIES};
use crate::store::{LedgerStore, TableVersion};

/// How many rows the dashboard's recent-activity panel shows.
pub(crate) const RECENT_LIMIT: usize = 10;

/// Transaction form fields: date, type, merchant, category, amount.
pub(crate) const TXN_FIELDS: usize = 5;
/// Plan form fields: label, amount.
pub(crate) const PLAN_FIELDS: usize = 2;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Screen {
    Dashboard,
    Transactions,
    Plan,
    NewTransaction,
    NewPlan,
}

impl Screen {
    pub(crate) fn all() -> &'static [Screen] {
        &[
            Self::Dashboard,
            Self::Transactions,
            Self::Plan,
            Self::NewTransaction,
            Self::NewPlan,
        ]
    }

    pub(crate) fn is_form(&self) -> bool {
        matches!(self, Self::NewTransaction | Self::NewPlan)
    }
}

impl std::fmt::Display for Screen {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Dashboard => write!(f, "Dashboard"),
            Self::Transactions => write!(f, "Transactions"),
            Self::Plan => write!(f, "Plan"),
            Self::NewTransaction => write!(f, "New Entry"),
            Self::NewPlan => write!(f, "New Income"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum InputMode {
    Normal,
    Command,
}

impl std::fmt::Display for InputMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Normal => write!(f, "NORMAL"),
            Self::Command => write!(f, "COMMAND"),
        }
    }
}

pub(crate) struct App {
    pub(crate) running: bool,
    pub(crate) screen: Screen,
    pub(crate) input_mode: InputMode,
    pub(crate) command_input: String,
    pub(crate) status_message: String,
    pub(crate) show_help: bool,

    /// The month being viewed. Initialized once at startup, changed only
    /// through `set_month`/`shift_month`.
    pub(crate) view_month: ViewMonth,
    pub(crate) schema: LedgerSchema,

    // Last-read tables and the versions appends must be based on
    pub(crate) transactions: Vec<Transaction>,
    pub(crate) plan: Vec<PlannedAmount>,
    pub(crate) txn_version: TableVersion,
    pub(crate) plan_version: TableVersion,

    // Derived month view (never written back)
    pub(crate) month_txns: Vec<Transaction>,
    pub(crate) month_plan: Vec<PlannedAmount>,
    pub(crate) display_txns: Vec<Transaction>,
    pub(crate) recent: Vec<Transaction>,
    pub(crate) summary: MonthSummary,

    // List cursors
    pub(crate) txn_index: usize,
    pub(crate) txn_scroll: usize,
    pub(crate) plan_index: usize,
    pub(crate) plan_scroll: usize,
    pub(crate) visible_rows: usize,

    // Entry drafts; these survive failed submissions untouched
    pub(crate) txn_form: TransactionDraft,
    pub(crate) txn_field: usize,
    pub(crate) plan_form: PlannedDraft,
    pub(crate) plan_field: usize,
}

impl App {
    pub(crate) fn new(schema: LedgerSchema) -> Self {
        let mut app = Self {
            running: true,
            screen: Screen::Dashboard,
            input_mode: InputMode::Normal,
            command_input: String::new(),
            status_message: String::new(),
            show_help: false,
            view_month: ViewMonth::current(),
            schema,
            transactions: Vec::new(),
            plan: Vec::new(),
            txn_version: 0,
            plan_version: 0,
            month_txns: Vec::new(),
            month_plan: Vec::new(),
            display_txns: Vec::new(),
            recent: Vec::new(),
            summary: MonthSummary::default(),
            txn_index: 0,
            txn_scroll: 0,
            plan_index: 0,
            plan_scroll: 0,
            visible_rows: 20,
            txn_form: TransactionDraft::default(),
            txn_field: 0,
            plan_form: PlannedDraft::default(),
            plan_field: 0,
        };
        app.reset_txn_form();
        app
    }

    pub(crate) fn set_status(&mut self, msg: impl Into<String>) {
        self.status_message = msg.into();
    }

    /// Re-read both tables. A table that can't be read is replaced by an
    /// empty one with a visible warning so the UI stays usable either way.
    pub(crate) fn reload(&mut self, store: &mut dyn LedgerStore) {
        match store.read_transactions() {
            Ok((rows, version)) => {
                self.transactions = rows;
                self.txn_version = version;
            }
            Err(e) => {
                self.transactions.clear();
                self.txn_version = 0;
                self.set_status(format!("{e} — showing an empty ledger"));
            }
        }
        match store.read_plan() {
            Ok((rows, version)) => {
                self.plan = rows;
                self.plan_version = version;
            }
            Err(e) => {
                self.plan.clear();
                self.plan_version = 0;
                self.set_status(format!("{e} — showing an empty plan"));
            }
        }
        self.refresh_views();
    }

    /// Recompute the derived month view from the loaded tables.
    pub(crate) fn refresh_views(&mut self) {
        self.month_txns = filter_by_month(&self.transactions, self.view_month);
        self.month_plan = filter_plan_by_month(&self.plan, self.view_month);
        self.summary = summarize(&self.month_txns, &self.month_plan, self.schema);
        self.display_txns = recent_history(&self.month_txns, self.month_txns.len());
        self.recent = recent_history(&self.month_txns, RECENT_LIMIT);

        if self.txn_index >= self.display_txns.len() {
            self.txn_index = self.display_txns.len().saturating_sub(1);
            self.txn_scroll = self.txn_scroll.min(self.txn_index);
        }
        if self.plan_index >= self.month_plan.len() {
            self.plan_index = self.month_plan.len().saturating_sub(1);
            self.plan_scroll = self.plan_scroll.min(self.plan_index);
        }
    }

    pub(crate) fn set_month(&mut self, month: ViewMonth) {
        self.view_month = month;
        self.txn_index = 0;
        self.txn_scroll = 0;
        self.plan_index = 0;
        self.plan_scroll = 0;
        self.refresh_views();
    }

    pub(crate) fn shift_month(&mut self, delta: i32) {
        self.set_month(self.view_month.shift(delta));
        self.set_status(format!("Month: {}", self.view_month));
    }

    /// Validate the transaction draft and append it. On success the draft
    /// resets and the dashboard shows the result; on any failure the draft
    /// is left exactly as typed.
    pub(crate) fn submit_transaction(&mut self, store: &mut dyn LedgerStore) {
        let txn = match self.txn_form.validate() {
            Ok(t) => t,
            Err(e) => {
                self.set_status(e.to_string());
                return;
            }
        };
        match store.append_transaction(self.txn_version, &txn) {
            Ok(()) => {
                self.reload(store);
                self.reset_txn_form();
                self.screen = Screen::Dashboard;
                self.set_status(format!(
                    "Saved {} {} for {}",
                    txn.kind,
                    super::util::format_amount(txn.amount),
                    txn.merchant
                ));
            }
            Err(e) => {
                // Pick up whatever the table holds now, but keep the draft
                self.reload(store);
                self.set_status(e.to_string());
            }
        }
    }

    /// Validate the plan draft and append it into the viewed month.
    pub(crate) fn submit_planned(&mut self, store: &mut dyn LedgerStore) {
        let row = match self.plan_form.validate(self.view_month) {
            Ok(r) => r,
            Err(e) => {
                self.set_status(e.to_string());
                return;
            }
        };
        match store.append_planned(self.plan_version, &row) {
            Ok(()) => {
                self.reload(store);
                self.reset_plan_form();
                self.screen = Screen::Plan;
                self.set_status(format!(
                    "Planned {} from {} in {}",
                    super::util::format_amount(row.amount),
                    row.label,
                    row.month
                ));
            }
            Err(e) => {
                self.reload(store);
                self.set_status(e.to_string());
            }
        }
    }

    pub(crate) fn reset_txn_form(&mut self) {
        self.txn_form = TransactionDraft {
            date: Local::now().format("%Y-%m-%d").to_string(),
            ..TransactionDraft::default()
        };
        self.txn_field = 0;
    }

    pub(crate) fn reset_plan_form(&mut self) {
        self.plan_form = PlannedDraft::default();
        self.plan_field = 0;
    }

    /// The focused text field of the transaction form, if the focus is on
    /// one (the type field is cycled, not typed).
    pub(crate) fn txn_field_mut(&mut self) -> Option<&mut String> {
        match self.txn_field {
            0 => Some(&mut self.txn_form.date),
            2 => Some(&mut self.txn_form.merchant),
            3 => Some(&mut self.txn_form.category),
            4 => Some(&mut self.txn_form.amount),
            _ => None,
        }
    }

    pub(crate) fn plan_field_mut(&mut self) -> Option<&mut String> {
        match self.plan_field {
            0 => Some(&mut self.plan_form.label),
            1 => Some(&mut self.plan_form.amount),
            _ => None,
        }
    }

    pub(crate) fn cycle_kind(&mut self) {
        self.txn_form.kind = match self.txn_form.kind {
            TxnKind::Expense => TxnKind::Income,
            TxnKind::Income => TxnKind::Expense,
        };
    }

    /// Step the category field through the presets. A free-form name that
    /// isn't a preset starts the cycle from the ends.
    pub(crate) fn cycle_category(&mut self, delta: i32) {
        let presets = DEFAULT_CATEGORIES;
        let pos = presets.iter().position(|c| *c == self.txn_form.category);
        let next = match (pos, delta >= 0) {
            (Some(i), true) => (i + 1) % presets.len(),
            (Some(i), false) => {
                if i == 0 {
                    presets.len() - 1
                } else {
                    i - 1
                }
            }
            (None, true) => 0,
            (None, false) => presets.len() - 1,
        };
        self.txn_form.category = presets[next].to_string();
    }

    pub(crate) fn transaction_page(&self) -> usize {
        self.visible_rows.max(1)
    }

    pub(crate) fn plan_page(&self) -> usize {
        self.visible_rows.max(1)
    }
}

use anyhow::Result;
use crossterm::event::{self, Event, KeyCode, KeyModifiers};
use crossterm::{
    event::{DisableMouseCapture, EnableMouseCapture},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io;

use crate::ledger::LedgerSchema;
use crate::store::LedgerStore;
use crate::ui::app::{App, InputMode, Screen, PLAN_FIELDS, TXN_FIELDS};
use crate::ui::commands;
use crate::ui::util::{scroll_down, scroll_to_bottom, scroll_to_top, scroll_up};

pub(crate) fn as_tui(store: &mut dyn LedgerStore, schema: LedgerSchema) -> Result<()> {
    let mut app = App::new(schema);
    app.reload(store);

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = run_app(&mut terminal, &mut app, store);

    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    if let Err(ref e) = result {
        eprintln!("Error: {e:?}");
    }

    result
}

fn run_app(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
    store: &mut dyn LedgerStore,
) -> Result<()> {
    while app.running {
        terminal.draw(|f| {
            let content_height = f.area().height.saturating_sub(6) as usize;
            app.visible_rows = content_height.max(1);
            crate::ui::render::render(f, app);
        })?;

        if let Event::Key(key) = event::read()? {
            if app.show_help {
                app.show_help = false;
                continue;
            }
            match app.input_mode {
                InputMode::Normal => handle_normal_input(key, app, store)?,
                InputMode::Command => handle_command_input(key, app, store)?,
            }
        }
    }
    Ok(())
}

// ── Input handlers ───────────────────────────────────────────

fn handle_normal_input(
    key: event::KeyEvent,
    app: &mut App,
    store: &mut dyn LedgerStore,
) -> Result<()> {
    if app.screen.is_form() {
        return handle_form_input(key, app, store);
    }

    match key.code {
        KeyCode::Char(':') => {
            app.input_mode = InputMode::Command;
            app.command_input.clear();
        }
        KeyCode::Char('q') | KeyCode::Char('c')
            if key.modifiers.contains(KeyModifiers::CONTROL) =>
        {
            app.running = false;
        }
        KeyCode::Char('d') if key.modifiers.contains(KeyModifiers::CONTROL) => {
            let half_page = app.visible_rows / 2;
            for _ in 0..half_page {
                handle_move_down(app);
            }
        }
        KeyCode::Char('u') if key.modifiers.contains(KeyModifiers::CONTROL) => {
            let half_page = app.visible_rows / 2;
            for _ in 0..half_page {
                handle_move_up(app);
            }
        }
        KeyCode::Char('j') | KeyCode::Down => handle_move_down(app),
        KeyCode::Char('k') | KeyCode::Up => handle_move_up(app),
        KeyCode::Char('1') => switch_screen(app, store, Screen::Dashboard),
        KeyCode::Char('2') => switch_screen(app, store, Screen::Transactions),
        KeyCode::Char('3') => switch_screen(app, store, Screen::Plan),
        KeyCode::Char('4') => switch_screen(app, store, Screen::NewTransaction),
        KeyCode::Char('5') => switch_screen(app, store, Screen::NewPlan),
        KeyCode::Tab => {
            let screens = Screen::all();
            let idx = screens.iter().position(|s| *s == app.screen).unwrap_or(0);
            let next = (idx + 1) % screens.len();
            switch_screen(app, store, screens[next]);
        }
        KeyCode::BackTab => {
            let screens = Screen::all();
            let idx = screens.iter().position(|s| *s == app.screen).unwrap_or(0);
            let prev = if idx == 0 { screens.len() - 1 } else { idx - 1 };
            switch_screen(app, store, screens[prev]);
        }
        KeyCode::Char('H') => {
            commands::handle_command("prev-month", app, store)?;
        }
        KeyCode::Char('L') => {
            commands::handle_command("next-month", app, store)?;
        }
        KeyCode::Char('g') => handle_goto_top(app),
        KeyCode::Char('G') => handle_goto_bottom(app),
        KeyCode::Char('?') => {
            app.show_help = true;
        }
        KeyCode::Esc => {
            app.status_message.clear();
        }
        _ => {}
    }
    Ok(())
}

/// The entry forms: all printable input lands in the focused text field;
/// `+`/`-` cycle the type and category fields instead of typing.
fn handle_form_input(
    key: event::KeyEvent,
    app: &mut App,
    store: &mut dyn LedgerStore,
) -> Result<()> {
    let on_txn_form = app.screen == Screen::NewTransaction;

    match key.code {
        KeyCode::Esc => {
            app.screen = Screen::Dashboard;
            app.set_status("Entry cancelled — draft kept");
        }
        KeyCode::Enter => {
            if on_txn_form {
                app.submit_transaction(store);
            } else {
                app.submit_planned(store);
            }
        }
        KeyCode::Up | KeyCode::BackTab => {
            if on_txn_form {
                app.txn_field = app.txn_field.saturating_sub(1);
            } else {
                app.plan_field = app.plan_field.saturating_sub(1);
            }
        }
        KeyCode::Down | KeyCode::Tab => {
            if on_txn_form {
                app.txn_field = (app.txn_field + 1).min(TXN_FIELDS - 1);
            } else {
                app.plan_field = (app.plan_field + 1).min(PLAN_FIELDS - 1);
            }
        }
        KeyCode::Char('+' | '=' | '-') if on_txn_form && app.txn_field == 1 => {
            app.cycle_kind();
        }
        KeyCode::Char('+' | '=') if on_txn_form && app.txn_field == 3 => {
            app.cycle_category(1);
        }
        KeyCode::Char('-') if on_txn_form && app.txn_field == 3 => {
            app.cycle_category(-1);
        }
        KeyCode::Backspace => {
            let field = if on_txn_form {
                app.txn_field_mut()
            } else {
                app.plan_field_mut()
            };
            if let Some(value) = field {
                value.pop();
            }
        }
        KeyCode::Char(c) => {
            let field = if on_txn_form {
                app.txn_field_mut()
            } else {
                app.plan_field_mut()
            };
            if let Some(value) = field {
                value.push(c);
            }
        }
        _ => {}
    }
    Ok(())
}

fn handle_command_input(
    key: event::KeyEvent,
    app: &mut App,
    store: &mut dyn LedgerStore,
) -> Result<()> {
    match key.code {
        KeyCode::Enter => {
            let input = app.command_input.clone();
            app.input_mode = InputMode::Normal;
            app.command_input.clear();
            commands::handle_command(&input, app, store)?;
        }
        KeyCode::Esc => {
            app.input_mode = InputMode::Normal;
            app.command_input.clear();
        }
        KeyCode::Backspace => {
            app.command_input.pop();
            if app.command_input.is_empty() {
                app.input_mode = InputMode::Normal;
            }
        }
        KeyCode::Char('u') if key.modifiers.contains(KeyModifiers::CONTROL) => {
            app.command_input.clear();
            app.input_mode = InputMode::Normal;
        }
        KeyCode::Char('w') if key.modifiers.contains(KeyModifiers::CONTROL) => {
            let trimmed = app.command_input.trim_end();
            if let Some(pos) = trimmed.rfind(' ') {
                app.command_input.truncate(pos + 1);
            } else {
                app.command_input.clear();
                app.input_mode = InputMode::Normal;
            }
        }
        KeyCode::Char(c) => {
            app.command_input.push(c);
        }
        _ => {}
    }
    Ok(())
}

// ── Navigation helpers ───────────────────────────────────────

fn switch_screen(app: &mut App, store: &mut dyn LedgerStore, screen: Screen) {
    app.screen = screen;
    if !screen.is_form() {
        app.reload(store);
    }
    app.set_status(format!("{screen}"));
}

fn handle_move_down(app: &mut App) {
    match app.screen {
        Screen::Transactions => {
            let page = app.transaction_page();
            scroll_down(
                &mut app.txn_index,
                &mut app.txn_scroll,
                app.display_txns.len(),
                page,
            );
        }
        Screen::Plan => {
            let page = app.plan_page();
            scroll_down(
                &mut app.plan_index,
                &mut app.plan_scroll,
                app.month_plan.len(),
                page,
            );
        }
        _ => {}
    }
}

fn handle_move_up(app: &mut App) {
    match app.screen {
        Screen::Transactions => scroll_up(&mut app.txn_index, &mut app.txn_scroll),
        Screen::Plan => scroll_up(&mut app.plan_index, &mut app.plan_scroll),
        _ => {}
    }
}

fn handle_goto_top(app: &mut App) {
    match app.screen {
        Screen::Transactions => scroll_to_top(&mut app.txn_index, &mut app.txn_scroll),
        Screen::Plan => scroll_to_top(&mut app.plan_index, &mut app.plan_scroll),
        _ => {}
    }
}

fn handle_goto_bottom(app: &mut App) {
    match app.screen {
        Screen::Transactions => {
            let page = app.transaction_page();
            scroll_to_bottom(
                &mut app.txn_index,
                &mut app.txn_scroll,
                app.display_txns.len(),
                page,
            );
        }
        Screen::Plan => {
            let page = app.plan_page();
            scroll_to_bottom(
                &mut app.plan_index,
                &mut app.plan_scroll,
                app.month_plan.len(),
                page,
            );
        }
        _ => {}
    }
}

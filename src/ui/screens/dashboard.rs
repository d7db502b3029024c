use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Cell, Paragraph, Row, Table},
    Frame,
};
use rust_decimal::Decimal;

use crate::ui::app::{App, RECENT_LIMIT};
use crate::ui::theme;
use crate::ui::util::{format_amount, format_directed, truncate};

pub(crate) fn render(f: &mut Frame, area: Rect, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(7), // Summary cards
            Constraint::Min(6),    // Recent activity
        ])
        .split(area);

    render_summary_cards(f, chunks[0], app);
    render_recent_activity(f, chunks[1], app);
}

fn render_summary_cards(f: &mut Frame, area: Rect, app: &App) {
    let cards = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage(34),
            Constraint::Percentage(33),
            Constraint::Percentage(33),
        ])
        .split(area);

    let summary = &app.summary;
    let plan_count = app.month_plan.len();
    let txn_count = app.month_txns.len();

    render_card(
        f,
        cards[0],
        "Planned Income",
        summary.planned_income,
        theme::GREEN,
        Some(format!("{plan_count} plan rows")),
    );
    render_card(
        f,
        cards[1],
        "Spent",
        summary.spent,
        theme::RED,
        Some(format!("{txn_count} txns")),
    );
    render_card(
        f,
        cards[2],
        "Remaining to Assign",
        summary.remaining,
        if summary.remaining < Decimal::ZERO {
            theme::RED
        } else {
            theme::GREEN
        },
        None,
    );
}

fn render_card(
    f: &mut Frame,
    area: Rect,
    title: &str,
    amount: Decimal,
    color: ratatui::style::Color,
    subtitle: Option<String>,
) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(theme::OVERLAY))
        .title(Span::styled(
            format!(" {title} "),
            Style::default()
                .fg(theme::TEXT_DIM)
                .add_modifier(Modifier::BOLD),
        ));

    let sub_text = subtitle.unwrap_or_default();

    let text = Paragraph::new(vec![
        Line::from(""),
        Line::from(Span::styled(
            format_amount(amount),
            Style::default().fg(color).add_modifier(Modifier::BOLD),
        )),
        Line::from(Span::styled(sub_text, theme::dim_style())),
    ])
    .centered()
    .block(block);

    f.render_widget(text, area);
}

fn render_recent_activity(f: &mut Frame, area: Rect, app: &App) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(theme::OVERLAY))
        .title(Span::styled(
            format!(" Recent Activity — {} ", app.view_month),
            Style::default()
                .fg(theme::TEXT_DIM)
                .add_modifier(Modifier::BOLD),
        ));

    if app.recent.is_empty() {
        let msg = Paragraph::new(vec![
            Line::from(""),
            Line::from(Span::styled(
                "No transactions for this month",
                theme::dim_style(),
            )),
            Line::from(""),
            Line::from(Span::styled(
                "Add one with :n, or jump months with H/L",
                theme::dim_style(),
            )),
        ])
        .centered()
        .block(block);
        f.render_widget(msg, area);
        return;
    }

    let header_cells = ["Date", "Type", "Merchant", "Category", "Amount"]
        .iter()
        .map(|h| Cell::from(*h).style(theme::header_style()));
    let header = Row::new(header_cells).height(1);

    let rows: Vec<Row> = app
        .recent
        .iter()
        .take(RECENT_LIMIT)
        .enumerate()
        .map(|(i, txn)| {
            let amount_style = if txn.is_income() {
                theme::income_style()
            } else {
                theme::expense_style()
            };
            let style = if i % 2 == 1 {
                theme::alt_row_style()
            } else {
                theme::normal_style()
            };
            Row::new(vec![
                Cell::from(txn.date.clone()),
                Cell::from(Span::styled(txn.kind.as_str(), amount_style)),
                Cell::from(truncate(&txn.merchant, 30)),
                Cell::from(truncate(&txn.category, 20)),
                Cell::from(Span::styled(
                    format_directed(txn.kind, txn.amount),
                    amount_style,
                )),
            ])
            .style(style)
        })
        .collect();

    let widths = [
        Constraint::Length(12),
        Constraint::Length(9),
        Constraint::Min(20),
        Constraint::Length(20),
        Constraint::Length(14),
    ];

    let table = Table::new(rows, widths).header(header).block(block);
    f.render_widget(table, area);
}

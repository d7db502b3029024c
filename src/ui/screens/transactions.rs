use ratatui::{
    layout::{Constraint, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Cell, Paragraph, Row, Table},
    Frame,
};

use crate::ui::app::App;
use crate::ui::theme;
use crate::ui::util::{format_directed, truncate};

/// The viewed month's ledger, newest entry first.
pub(crate) fn render(f: &mut Frame, area: Rect, app: &App) {
    if app.display_txns.is_empty() {
        let msg = vec![
            Line::from(""),
            Line::from(Span::styled(
                "No transactions for this month",
                theme::dim_style(),
            )),
            Line::from(""),
            Line::from(Span::styled(
                "Open the entry form with :n or quick-add with :add-txn",
                theme::dim_style(),
            )),
        ];
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(theme::OVERLAY))
            .title(Span::styled(
                format!(" Transactions — {} (0) ", app.view_month),
                Style::default()
                    .fg(theme::TEXT_DIM)
                    .add_modifier(Modifier::BOLD),
            ));
        f.render_widget(Paragraph::new(msg).centered().block(block), area);
        return;
    }

    let header_cells = ["Date", "Type", "Merchant", "Category", "Amount"]
        .iter()
        .map(|h| Cell::from(*h).style(theme::header_style()));
    let header = Row::new(header_cells).height(1);

    let rows: Vec<Row> = app
        .display_txns
        .iter()
        .enumerate()
        .skip(app.txn_scroll)
        .take(area.height.saturating_sub(3) as usize)
        .map(|(i, txn)| {
            let amount_style = if txn.is_income() {
                theme::income_style()
            } else {
                theme::expense_style()
            };

            let style = if i == app.txn_index {
                theme::selected_style()
            } else if i % 2 == 1 {
                theme::alt_row_style()
            } else {
                theme::normal_style()
            };

            Row::new(vec![
                Cell::from(txn.date.clone()),
                Cell::from(Span::styled(txn.kind.as_str(), amount_style)),
                Cell::from(truncate(&txn.merchant, 40)),
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

    let table = Table::new(rows, widths).header(header).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(theme::OVERLAY))
            .title(Span::styled(
                format!(
                    " Transactions — {} ({}) ",
                    app.view_month,
                    app.display_txns.len()
                ),
                Style::default()
                    .fg(theme::TEXT_DIM)
                    .add_modifier(Modifier::BOLD),
            )),
    );

    f.render_widget(table, area);
}

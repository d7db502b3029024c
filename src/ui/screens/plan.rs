use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, Paragraph},
    Frame,
};

use crate::ui::app::App;
use crate::ui::theme;
use crate::ui::util::{format_amount, truncate};

/// The viewed month's planned amounts, with the month's planned-income
/// total in the title.
pub(crate) fn render(f: &mut Frame, area: Rect, app: &App) {
    let title = format!(
        " Plan — {} (planned income {}) ",
        app.view_month,
        format_amount(app.summary.planned_income)
    );

    if app.month_plan.is_empty() {
        let msg = Paragraph::new(vec![
            Line::from(""),
            Line::from(Span::styled(
                "Nothing planned for this month",
                theme::dim_style(),
            )),
            Line::from(""),
            Line::from(Span::styled(
                "Use :i to add a planned income line, or :add-plan Salary 3000",
                theme::dim_style(),
            )),
        ])
        .centered()
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(theme::OVERLAY))
                .title(Span::styled(
                    title,
                    Style::default()
                        .fg(theme::TEXT_DIM)
                        .add_modifier(Modifier::BOLD),
                )),
        );
        f.render_widget(msg, area);
        return;
    }

    let items: Vec<ListItem> = app
        .month_plan
        .iter()
        .enumerate()
        .skip(app.plan_scroll)
        .take(area.height.saturating_sub(2) as usize)
        .map(|(i, row)| {
            let style = if i == app.plan_index {
                theme::selected_style()
            } else if i % 2 == 1 {
                theme::alt_row_style()
            } else {
                theme::normal_style()
            };

            let kind_style = if row.kind == crate::models::TxnKind::Income {
                theme::income_style()
            } else {
                theme::expense_style()
            };

            ListItem::new(Line::from(vec![
                Span::styled(format!("{:<28}", truncate(&row.label, 27)), style),
                Span::styled(format!("{:<9}", row.kind.as_str()), kind_style),
                Span::styled(format_amount(row.amount), kind_style),
            ]))
        })
        .collect();

    let list = List::new(items).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(theme::OVERLAY))
            .title(Span::styled(
                title,
                Style::default()
                    .fg(theme::TEXT_DIM)
                    .add_modifier(Modifier::BOLD),
            )),
    );
    f.render_widget(list, area);
}

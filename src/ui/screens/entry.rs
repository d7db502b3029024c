use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use crate::ui::app::{App, Screen};
use crate::ui::theme;

/// Field-by-field entry forms. Up/Down (or Tab) moves the focus, typing
/// edits the focused text field, `+`/`-` cycles the type and category
/// presets, Enter submits, Esc backs out keeping the draft.
pub(crate) fn render(f: &mut Frame, area: Rect, app: &App) {
    match app.screen {
        Screen::NewPlan => render_plan_form(f, area, app),
        _ => render_transaction_form(f, area, app),
    }
}

fn render_transaction_form(f: &mut Frame, area: Rect, app: &App) {
    let form = &app.txn_form;
    let category_display = if form.category.is_empty() {
        "(pick with +/- or type a name)".to_string()
    } else {
        form.category.clone()
    };

    let fields: [(&str, String, bool); 5] = [
        ("Date", form.date.clone(), false),
        ("Type", form.kind.as_str().to_string(), true),
        ("Merchant", form.merchant.clone(), false),
        ("Category", category_display, false),
        ("Amount", form.amount.clone(), false),
    ];

    let mut lines = vec![Line::from("")];
    for (i, (label, value, cycled)) in fields.iter().enumerate() {
        lines.push(field_line(
            label,
            value,
            i == app.txn_field,
            *cycled,
            form.category.is_empty() && i == 3,
        ));
        lines.push(Line::from(""));
    }
    lines.push(Line::from(Span::styled(
        "  Enter save · Esc cancel (draft kept) · Up/Down move · +/- cycle",
        theme::dim_style(),
    )));

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(theme::ACCENT))
        .title(Span::styled(
            format!(" New Transaction — {} ", app.view_month),
            Style::default()
                .fg(theme::TEXT_DIM)
                .add_modifier(Modifier::BOLD),
        ));

    f.render_widget(Paragraph::new(lines).block(block), area);
}

fn render_plan_form(f: &mut Frame, area: Rect, app: &App) {
    let form = &app.plan_form;
    let fields: [(&str, String); 2] = [
        ("Label", form.label.clone()),
        ("Amount", form.amount.clone()),
    ];

    let mut lines = vec![
        Line::from(""),
        Line::from(Span::styled(
            format!("  Planned income for {}", app.view_month),
            theme::dim_style(),
        )),
        Line::from(""),
    ];
    for (i, (label, value)) in fields.iter().enumerate() {
        lines.push(field_line(label, value, i == app.plan_field, false, false));
        lines.push(Line::from(""));
    }
    lines.push(Line::from(Span::styled(
        "  Enter save · Esc cancel (draft kept) · Up/Down move",
        theme::dim_style(),
    )));

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(theme::ACCENT))
        .title(Span::styled(
            " New Planned Income ",
            Style::default()
                .fg(theme::TEXT_DIM)
                .add_modifier(Modifier::BOLD),
        ));

    f.render_widget(Paragraph::new(lines).block(block), area);
}

fn field_line(
    label: &str,
    value: &str,
    focused: bool,
    cycled: bool,
    placeholder: bool,
) -> Line<'static> {
    let marker = if focused { "▸ " } else { "  " };
    let value_style = if placeholder {
        theme::dim_style()
    } else if focused {
        theme::selected_style()
    } else {
        theme::normal_style()
    };
    let hint = if cycled && focused { "  (+/- to change)" } else { "" };

    Line::from(vec![
        Span::styled(
            format!("{marker}{label:>10}: "),
            if focused {
                Style::default()
                    .fg(theme::ACCENT)
                    .add_modifier(Modifier::BOLD)
            } else {
                theme::dim_style()
            },
        ),
        Span::styled(format!(" {value} "), value_style),
        Span::styled(hint.to_string(), theme::dim_style()),
    ])
}

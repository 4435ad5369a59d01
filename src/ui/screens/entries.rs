use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Cell, Paragraph, Row, Table},
    Frame,
};

use crate::models::format_date;
use crate::ui::app::App;
use crate::ui::theme;
use crate::ui::util::{format_amount, format_entry_amount, truncate};

pub(crate) fn render(f: &mut Frame, area: Rect, app: &App) {
    let state = app.list.state();

    if state.loading {
        render_message(f, area, &["Loading entries…"], theme::dim_style());
        return;
    }
    if state.load_failed {
        render_message(
            f,
            area,
            &["Could not load entries", "", "Press r to try again"],
            theme::error_style(),
        );
        return;
    }

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(3), Constraint::Length(4)])
        .split(area);

    if state.entries.is_empty() {
        render_message(
            f,
            chunks[0],
            &["No entries yet", "", "Press a to add your first entry"],
            theme::dim_style(),
        );
    } else {
        render_table(f, chunks[0], app);
    }
    render_totals(f, chunks[1], app);
}

fn render_message(f: &mut Frame, area: Rect, lines: &[&str], style: Style) {
    let mut msg = vec![Line::from("")];
    msg.extend(
        lines
            .iter()
            .map(|l| Line::from(Span::styled(l.to_string(), style))),
    );
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(theme::OVERLAY))
        .title(Span::styled(
            " Entries ",
            Style::default()
                .fg(theme::TEXT_DIM)
                .add_modifier(Modifier::BOLD),
        ));
    f.render_widget(Paragraph::new(msg).centered().block(block), area);
}

fn render_table(f: &mut Frame, area: Rect, app: &App) {
    let entries = app.list.entries();

    let header_cells = ["Date", "Description", "Type", "Status", "Amount"]
        .iter()
        .map(|h| Cell::from(*h).style(theme::header_style()));
    let header = Row::new(header_cells).height(1);

    let rows: Vec<Row> = entries
        .iter()
        .enumerate()
        .skip(app.entry_scroll)
        .take(area.height.saturating_sub(3) as usize)
        .map(|(i, entry)| {
            let amount_style = if entry.is_income() {
                theme::income_style()
            } else {
                theme::expense_style()
            };
            let status = if entry.paid { "✔ paid" } else { "○ pending" };

            let style = if i == app.entry_index {
                theme::selected_style()
            } else if i % 2 == 1 {
                theme::alt_row_style()
            } else {
                theme::normal_style()
            };

            Row::new(vec![
                Cell::from(format!("  {}", format_date(entry.date))),
                Cell::from(truncate(&entry.description, 40)),
                Cell::from(Span::styled(entry.entry_type.as_str(), amount_style)),
                Cell::from(status),
                Cell::from(Span::styled(
                    format_entry_amount(entry, &app.currency_symbol),
                    amount_style,
                )),
            ])
            .style(style)
        })
        .collect();

    let widths = [
        Constraint::Length(14),
        Constraint::Min(20),
        Constraint::Length(9),
        Constraint::Length(11),
        Constraint::Length(16),
    ];

    let table = Table::new(rows, widths).header(header).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(theme::OVERLAY))
            .title(Span::styled(
                format!(" Entries ({}) ", entries.len()),
                Style::default()
                    .fg(theme::TEXT_DIM)
                    .add_modifier(Modifier::BOLD),
            )),
    );

    f.render_widget(table, area);
}

fn render_totals(f: &mut Frame, area: Rect, app: &App) {
    let totals = app.list.totals();
    let symbol = &app.currency_symbol;

    let line = |label: &str, val| {
        Line::from(vec![
            Span::styled(format!("{label:>12}  "), theme::dim_style()),
            Span::styled(
                format!("{:>16}", format_amount(val, symbol)),
                theme::sign_style(val),
            ),
            Span::raw("  "),
        ])
    };

    let text = vec![
        line("Balance", totals.balance),
        line("Projection", totals.projection),
    ];

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(theme::OVERLAY))
        .style(Style::default().bg(theme::SURFACE));
    f.render_widget(
        Paragraph::new(text).alignment(Alignment::Right).block(block),
        area,
    );
}

use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};

use crate::models::{format_date, EntryType};
use crate::ui::app::{App, FormFocus};
use crate::ui::form::FormField;
use crate::ui::theme;

pub(crate) fn render(f: &mut Frame, area: Rect, app: &App) {
    let state = app.form.state();
    let title = if state.is_new() {
        " New entry "
    } else {
        " Edit entry "
    };
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(theme::OVERLAY))
        .title(Span::styled(
            title,
            Style::default()
                .fg(theme::ACCENT)
                .add_modifier(Modifier::BOLD),
        ));

    if state.loading {
        let msg = vec![
            Line::from(""),
            Line::from(Span::styled("Loading…", theme::dim_style())),
        ];
        f.render_widget(Paragraph::new(msg).centered().block(block), area);
        return;
    }
    if state.load_failed {
        let msg = vec![
            Line::from(""),
            Line::from(Span::styled(
                format!("Could not load entry #{}", state.entry_id),
                theme::error_style(),
            )),
            Line::from(""),
            Line::from(Span::styled(
                "Press r to try again, Esc to go back",
                theme::dim_style(),
            )),
        ];
        f.render_widget(Paragraph::new(msg).centered().block(block), area);
        return;
    }

    let mut lines = vec![Line::from("")];
    text_field(&mut lines, app, FormFocus::Description, &state.description);
    text_field(&mut lines, app, FormFocus::Amount, &state.amount);
    choice_field(
        &mut lines,
        app,
        FormFocus::Date,
        format_date(state.date),
        "+/- day, t today",
    );
    choice_field(
        &mut lines,
        app,
        FormFocus::Paid,
        if state.paid { "[x] paid" } else { "[ ] pending" }.to_string(),
        "Space toggles",
    );
    let type_label = EntryType::all()
        .iter()
        .map(|t| {
            if *t == state.entry_type {
                format!("(•) {t}")
            } else {
                format!("( ) {t}")
            }
        })
        .collect::<Vec<_>>()
        .join("   ");
    choice_field(&mut lines, app, FormFocus::Type, type_label, "Space toggles");

    if state.saving {
        lines.push(Line::from(Span::styled("  Saving…", theme::dim_style())));
    }
    if state.deleting {
        lines.push(Line::from(Span::styled("  Deleting…", theme::dim_style())));
    }

    f.render_widget(Paragraph::new(lines).block(block), area);

    if state.show_delete_confirm {
        render_delete_confirm(f, area, &state.description.value);
    }
}

fn label_span(app: &App, focus: FormFocus) -> Span<'static> {
    let marker = if app.focus == focus { "▸ " } else { "  " };
    let style = if app.focus == focus {
        theme::focused_style()
    } else {
        theme::dim_style()
    };
    Span::styled(format!("{marker}{:<12}", focus.label()), style)
}

fn text_field(lines: &mut Vec<Line<'static>>, app: &App, focus: FormFocus, field: &FormField) {
    let cursor = if app.focus == focus { "▏" } else { "" };
    lines.push(Line::from(vec![
        label_span(app, focus),
        Span::styled(format!("{}{cursor}", field.value), theme::normal_style()),
    ]));
    match field.error {
        Some(err) => lines.push(Line::from(Span::styled(
            format!("{:14}{err}", ""),
            theme::error_style(),
        ))),
        None => lines.push(Line::from("")),
    }
}

fn choice_field(
    lines: &mut Vec<Line<'static>>,
    app: &App,
    focus: FormFocus,
    value: String,
    hint: &str,
) {
    let mut spans = vec![label_span(app, focus), Span::styled(value, theme::normal_style())];
    if app.focus == focus {
        spans.push(Span::styled(format!("   {hint}"), theme::dim_style()));
    }
    lines.push(Line::from(spans));
    lines.push(Line::from(""));
}

fn render_delete_confirm(f: &mut Frame, area: Rect, description: &str) {
    let text = vec![
        Line::from(""),
        Line::from(Span::styled(
            format!(" Delete '{description}'?"),
            theme::normal_style(),
        )),
        Line::from(""),
        Line::from(Span::styled(
            " y delete, any other key cancels",
            theme::dim_style(),
        )),
    ];

    let popup_width = 48.min(area.width.saturating_sub(4));
    let popup_height = 6.min(area.height);
    let x = area.x + (area.width.saturating_sub(popup_width)) / 2;
    let y = area.y + (area.height.saturating_sub(popup_height)) / 2;
    let popup_area = Rect::new(x, y, popup_width, popup_height);

    f.render_widget(Clear, popup_area);
    let popup = Paragraph::new(text).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(theme::RED))
            .title(Span::styled(" Confirm ", Style::default().fg(theme::RED)))
            .style(Style::default().bg(theme::HEADER_BG)),
    );
    f.render_widget(popup, popup_area);
}

use anyhow::Result;
use chrono::Local;
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use crossterm::{
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io;

use crate::db::Datasource;
use crate::ui::app::{App, FormFocus, InputMode};
use crate::ui::util::{scroll_down, scroll_to_bottom, scroll_to_top, scroll_up};

pub(crate) fn as_tui(ds: &mut dyn Datasource, currency_symbol: &str) -> Result<()> {
    let mut app = App::new(currency_symbol);
    app.refresh_entries(ds);

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = run_app(&mut terminal, &mut app, ds);

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    if let Err(ref e) = result {
        tracing::error!(error = %e, "tui exited with error");
        eprintln!("Error: {e:?}");
    }

    result
}

fn run_app(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
    ds: &mut dyn Datasource,
) -> Result<()> {
    while app.running {
        terminal.draw(|f| {
            // Title bar, status bar, message bar, table borders and header.
            let content_height = f.area().height.saturating_sub(10) as usize;
            app.visible_rows = content_height.max(1);
            crate::ui::render::render(f, app);
        })?;

        if let Event::Key(key) = event::read()? {
            if key.kind == KeyEventKind::Press {
                handle_key(key, app, ds);
            }
        }
    }
    Ok(())
}

pub(crate) fn handle_key(key: KeyEvent, app: &mut App, ds: &mut dyn Datasource) {
    if app.show_help {
        app.show_help = false;
        return;
    }
    if key.code == KeyCode::Char('q') && key.modifiers.contains(KeyModifiers::CONTROL) {
        app.running = false;
        return;
    }
    match app.input_mode() {
        InputMode::Normal => handle_list_input(key, app, ds),
        InputMode::Editing => handle_form_input(key, app, ds),
        InputMode::Confirm => handle_confirm_input(key, app, ds),
    }
}

// ── Entry list ───────────────────────────────────────────────

fn handle_list_input(key: KeyEvent, app: &mut App, ds: &mut dyn Datasource) {
    let len = app.list.entries().len();
    let page = app.visible_rows.max(1);
    match key.code {
        KeyCode::Char('q') => app.running = false,
        KeyCode::Char('j') | KeyCode::Down => {
            scroll_down(&mut app.entry_index, &mut app.entry_scroll, len, page)
        }
        KeyCode::Char('k') | KeyCode::Up => scroll_up(&mut app.entry_index, &mut app.entry_scroll),
        KeyCode::Char('g') | KeyCode::Home => {
            scroll_to_top(&mut app.entry_index, &mut app.entry_scroll)
        }
        KeyCode::Char('G') | KeyCode::End => {
            scroll_to_bottom(&mut app.entry_index, &mut app.entry_scroll, len, page)
        }
        KeyCode::Char('a') | KeyCode::Char('n') => app.open_new_entry(ds),
        KeyCode::Enter => app.open_selected_entry(ds),
        KeyCode::Char('r') => {
            app.refresh_entries(ds);
            if !app.list.state().load_failed {
                app.set_status(format!("Loaded {} entries", app.list.entries().len()));
            }
        }
        KeyCode::Char('?') => app.show_help = true,
        KeyCode::Esc => app.status_message.clear(),
        _ => {}
    }
}

// ── Entry form ───────────────────────────────────────────────

fn handle_form_input(key: KeyEvent, app: &mut App, ds: &mut dyn Datasource) {
    let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
    let state = app.form.state();

    if state.load_failed {
        match key.code {
            KeyCode::Char('r') => app.form.load(ds),
            KeyCode::Esc => app.close_form(ds),
            _ => {}
        }
        return;
    }

    match key.code {
        KeyCode::Esc => app.close_form(ds),
        KeyCode::Char('s') if ctrl => {
            let saved = app.form.save(ds);
            app.take_form_message();
            if saved {
                app.close_form(ds);
            } else if app.status_message.is_empty() {
                app.set_status("Fix the highlighted fields before saving");
            }
        }
        KeyCode::Char('d') if ctrl => {
            if !app.form.state().is_new() {
                app.form.show_delete_confirm();
            }
        }
        KeyCode::Tab | KeyCode::Down => app.focus = app.focus.next(),
        KeyCode::BackTab | KeyCode::Up => app.focus = app.focus.prev(),
        KeyCode::Enter if app.focus.is_text() => app.focus = app.focus.next(),
        _ => edit_focused_field(key, app),
    }
}

fn edit_focused_field(key: KeyEvent, app: &mut App) {
    let state = app.form.state();
    match app.focus {
        FormFocus::Description | FormFocus::Amount => {
            let current = if app.focus == FormFocus::Description {
                &state.description.value
            } else {
                &state.amount.value
            };
            let mut text = current.clone();
            match key.code {
                KeyCode::Char(c) if !key.modifiers.contains(KeyModifiers::CONTROL) => text.push(c),
                KeyCode::Backspace => {
                    text.pop();
                }
                _ => return,
            }
            if app.focus == FormFocus::Description {
                app.form.on_description_changed(&text);
            } else {
                app.form.on_amount_changed(&text);
            }
        }
        FormFocus::Date => {
            let date = state.date;
            let next = match key.code {
                KeyCode::Char('+') | KeyCode::Char('=') | KeyCode::Right => date.succ_opt(),
                KeyCode::Char('-') | KeyCode::Left => date.pred_opt(),
                KeyCode::Char('t') => Some(Local::now().date_naive()),
                _ => None,
            };
            if let Some(next) = next {
                app.form.on_date_changed(next);
            }
        }
        FormFocus::Paid => {
            if matches!(
                key.code,
                KeyCode::Char(' ') | KeyCode::Enter | KeyCode::Left | KeyCode::Right
            ) {
                let paid = !state.paid;
                app.form.on_paid_changed(paid);
            }
        }
        FormFocus::Type => {
            if matches!(
                key.code,
                KeyCode::Char(' ') | KeyCode::Enter | KeyCode::Left | KeyCode::Right
            ) {
                let entry_type = state.entry_type.toggled();
                app.form.on_type_changed(entry_type);
            }
        }
    }
}

fn handle_confirm_input(key: KeyEvent, app: &mut App, ds: &mut dyn Datasource) {
    match key.code {
        KeyCode::Char('y') | KeyCode::Char('Y') => {
            let removed = app.form.remove(ds);
            app.take_form_message();
            if removed {
                app.close_form(ds);
            }
        }
        _ => {
            app.form.hide_delete_confirm();
            app.set_status("Cancelled");
        }
    }
}

#[cfg(test)]
#[path = "tui_tests.rs"]
mod tests;

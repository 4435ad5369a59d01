use crate::db::Datasource;
use crate::models::Entry;
use crate::ui::form::EntryForm;
use crate::ui::list::EntryList;
use crate::ui::util::clamp_cursor;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Screen {
    Entries,
    Form,
}

impl std::fmt::Display for Screen {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Entries => write!(f, "Entries"),
            Self::Form => write!(f, "Entry"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum InputMode {
    Normal,
    Editing,
    Confirm,
}

impl std::fmt::Display for InputMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Normal => write!(f, "NORMAL"),
            Self::Editing => write!(f, "EDIT"),
            Self::Confirm => write!(f, "CONFIRM"),
        }
    }
}

/// Which form field receives key presses.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum FormFocus {
    Description,
    Amount,
    Date,
    Paid,
    Type,
}

impl FormFocus {
    pub(crate) fn all() -> &'static [FormFocus] {
        &[
            Self::Description,
            Self::Amount,
            Self::Date,
            Self::Paid,
            Self::Type,
        ]
    }

    pub(crate) fn label(&self) -> &'static str {
        match self {
            Self::Description => "Description",
            Self::Amount => "Amount",
            Self::Date => "Date",
            Self::Paid => "Paid",
            Self::Type => "Type",
        }
    }

    pub(crate) fn next(&self) -> Self {
        let all = Self::all();
        let idx = all.iter().position(|f| f == self).unwrap_or(0);
        all[(idx + 1) % all.len()]
    }

    pub(crate) fn prev(&self) -> Self {
        let all = Self::all();
        let idx = all.iter().position(|f| f == self).unwrap_or(0);
        all[(idx + all.len() - 1) % all.len()]
    }

    pub(crate) fn is_text(&self) -> bool {
        matches!(self, Self::Description | Self::Amount)
    }
}

pub(crate) struct App {
    pub(crate) running: bool,
    pub(crate) screen: Screen,
    pub(crate) status_message: String,
    pub(crate) show_help: bool,
    pub(crate) currency_symbol: String,

    // Entry list
    pub(crate) list: EntryList,
    pub(crate) entry_index: usize,
    pub(crate) entry_scroll: usize,

    // Entry form
    pub(crate) form: EntryForm,
    pub(crate) focus: FormFocus,

    // Layout (updated each render frame)
    pub(crate) visible_rows: usize,
}

impl App {
    pub(crate) fn new(currency_symbol: impl Into<String>) -> Self {
        Self {
            running: true,
            screen: Screen::Entries,
            status_message: String::new(),
            show_help: false,
            currency_symbol: currency_symbol.into(),

            list: EntryList::new(),
            entry_index: 0,
            entry_scroll: 0,

            form: EntryForm::new(0),
            focus: FormFocus::Description,

            visible_rows: 20,
        }
    }

    pub(crate) fn input_mode(&self) -> InputMode {
        match self.screen {
            Screen::Entries => InputMode::Normal,
            Screen::Form if self.form.state().show_delete_confirm => InputMode::Confirm,
            Screen::Form => InputMode::Editing,
        }
    }

    pub(crate) fn refresh_entries(&mut self, ds: &dyn Datasource) {
        self.list.load(ds);
        clamp_cursor(
            &mut self.entry_index,
            &mut self.entry_scroll,
            self.list.entries().len(),
        );
    }

    pub(crate) fn selected_entry(&self) -> Option<&Entry> {
        self.list.entries().get(self.entry_index)
    }

    pub(crate) fn open_new_entry(&mut self, ds: &dyn Datasource) {
        self.open_form(0, ds);
    }

    pub(crate) fn open_selected_entry(&mut self, ds: &dyn Datasource) {
        if let Some(id) = self.selected_entry().map(|e| e.id) {
            self.open_form(id, ds);
        }
    }

    fn open_form(&mut self, entry_id: i64, ds: &dyn Datasource) {
        self.form = EntryForm::open(entry_id, ds);
        self.focus = FormFocus::Description;
        self.screen = Screen::Form;
        self.status_message.clear();
    }

    /// Leave the form and reload the list so totals reflect any change.
    pub(crate) fn close_form(&mut self, ds: &dyn Datasource) {
        self.screen = Screen::Entries;
        self.refresh_entries(ds);
    }

    /// Move a pending form message (saved, deleted, failure) to the status bar.
    pub(crate) fn take_form_message(&mut self) {
        if let Some(msg) = self.form.state().message.clone() {
            self.set_status(msg);
            self.form.on_message_shown();
        }
    }

    pub(crate) fn set_status(&mut self, msg: impl Into<String>) {
        self.status_message = msg.into();
    }
}

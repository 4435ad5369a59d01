use chrono::NaiveDate;

/// Display format for entry dates, e.g. `05/09/2024`.
pub const DISPLAY_FORMAT: &str = "%d/%m/%Y";

/// Storage format for entry dates.
pub const STORAGE_FORMAT: &str = "%Y-%m-%d";

pub fn format_date(date: NaiveDate) -> String {
    date.format(DISPLAY_FORMAT).to_string()
}

/// Parse a `dd/mm/yyyy` date. Surrounding whitespace is ignored.
pub fn parse_date(s: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(s.trim(), DISPLAY_FORMAT).ok()
}

pub(crate) fn to_storage(date: NaiveDate) -> String {
    date.format(STORAGE_FORMAT).to_string()
}

pub(crate) fn from_storage(s: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(s, STORAGE_FORMAT).ok()
}

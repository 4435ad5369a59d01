mod date;
mod entry;

pub use date::{format_date, parse_date};
pub(crate) use date::{from_storage, to_storage};
pub use entry::{Entry, EntryType};

use anyhow::{Context, Result};
use serde::Serialize;
use std::io::Write;
use std::path::Path;

use crate::models::{format_date, Entry};

#[derive(Debug, Serialize)]
struct ExportRow<'a> {
    id: i64,
    date: String,
    description: &'a str,
    #[serde(rename = "type")]
    entry_type: &'static str,
    paid: bool,
    amount: String,
}

impl<'a> From<&'a Entry> for ExportRow<'a> {
    fn from(entry: &'a Entry) -> Self {
        Self {
            id: entry.id,
            date: format_date(entry.date),
            description: &entry.description,
            entry_type: entry.entry_type.as_str(),
            paid: entry.paid,
            amount: entry.amount.to_string(),
        }
    }
}

/// Write `entries` as CSV with a header row. Returns the number of rows written.
pub(crate) fn export_csv<W: Write>(entries: &[Entry], out: W) -> Result<usize> {
    let mut writer = csv::Writer::from_writer(out);
    if entries.is_empty() {
        writer.write_record(["id", "date", "description", "type", "paid", "amount"])?;
    }
    for entry in entries {
        writer
            .serialize(ExportRow::from(entry))
            .with_context(|| format!("Failed to write entry #{}", entry.id))?;
    }
    writer.flush()?;
    Ok(entries.len())
}

pub(crate) fn export_csv_to_path(entries: &[Entry], path: &Path) -> Result<usize> {
    let file = std::fs::File::create(path)
        .with_context(|| format!("Failed to create export file: {}", path.display()))?;
    let count = export_csv(entries, file)?;
    tracing::info!(count, path = %path.display(), "entries exported");
    Ok(count)
}

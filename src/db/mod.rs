#[cfg(test)]
mod memory;
mod schema;

use anyhow::{Context, Result};
use rusqlite::types::Type;
use rusqlite::{params, Connection, Row};
use rust_decimal::Decimal;
use std::path::Path;
use std::str::FromStr;

use crate::models::{from_storage, to_storage, Entry, EntryType};

#[cfg(test)]
pub(crate) use memory::MemoryStore;

/// Storage seen by the screens. Every call completes before the caller's
/// state update proceeds.
pub(crate) trait Datasource {
    fn load(&self, id: i64) -> Result<Option<Entry>>;

    /// Insert when `entry.id <= 0`, update otherwise. Returns the entry's id.
    fn save(&mut self, entry: &Entry) -> Result<i64>;

    fn delete(&mut self, entry: &Entry) -> Result<()>;

    /// All entries ordered by date, then id.
    fn list_all(&self) -> Result<Vec<Entry>>;
}

pub(crate) struct Database {
    conn: Connection,
}

const ENTRY_COLUMNS: &str = "id, description, date, amount, entry_type, paid";

impl Database {
    pub(crate) fn open(path: &Path) -> Result<Self> {
        let conn = Connection::open(path)
            .with_context(|| format!("Failed to open database: {}", path.display()))?;
        conn.execute_batch("PRAGMA journal_mode=WAL;")
            .context("Failed to set database pragmas")?;
        let mut db = Self { conn };
        db.migrate().context("Database migration failed")?;
        tracing::debug!(path = %path.display(), "database opened");
        Ok(db)
    }

    #[cfg(test)]
    pub(crate) fn open_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()?;
        let mut db = Self { conn };
        db.migrate()?;
        Ok(db)
    }

    fn migrate(&mut self) -> Result<()> {
        let has_version_table: bool = self.conn.query_row(
            "SELECT EXISTS(SELECT 1 FROM sqlite_master WHERE type='table' AND name='schema_version')",
            [],
            |row| row.get(0),
        )?;

        if !has_version_table {
            self.conn.execute_batch(schema::SCHEMA_V1)?;
            self.conn.execute(
                "INSERT INTO schema_version (version) VALUES (?1)",
                params![schema::CURRENT_VERSION],
            )?;
            return Ok(());
        }

        let current: i32 = self
            .conn
            .query_row("SELECT version FROM schema_version LIMIT 1", [], |row| {
                row.get(0)
            })
            .unwrap_or(0);

        for &(from_version, sql) in schema::MIGRATIONS {
            if current <= from_version {
                tracing::info!(from_version, "applying migration");
                self.conn.execute_batch(sql)?;
            }
        }

        if current < schema::CURRENT_VERSION {
            self.conn.execute(
                "UPDATE schema_version SET version = ?1",
                params![schema::CURRENT_VERSION],
            )?;
        }

        Ok(())
    }

    pub(crate) fn entry_count(&self) -> Result<i64> {
        Ok(self
            .conn
            .query_row("SELECT COUNT(*) FROM entries", [], |row| row.get(0))?)
    }
}

impl Datasource for Database {
    fn load(&self, id: i64) -> Result<Option<Entry>> {
        let result = self.conn.query_row(
            &format!("SELECT {ENTRY_COLUMNS} FROM entries WHERE id = ?1"),
            params![id],
            entry_from_row,
        );
        match result {
            Ok(e) => Ok(Some(e)),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    fn save(&mut self, entry: &Entry) -> Result<i64> {
        if entry.is_new() {
            self.conn.execute(
                "INSERT INTO entries (description, date, amount, entry_type, paid)
                 VALUES (?1, ?2, ?3, ?4, ?5)",
                params![
                    entry.description,
                    to_storage(entry.date),
                    entry.amount.to_string(),
                    entry.entry_type.as_str(),
                    entry.paid,
                ],
            )?;
            let id = self.conn.last_insert_rowid();
            tracing::debug!(id, "entry inserted");
            Ok(id)
        } else {
            let changed = self.conn.execute(
                "UPDATE entries SET description = ?1, date = ?2, amount = ?3, entry_type = ?4, paid = ?5
                 WHERE id = ?6",
                params![
                    entry.description,
                    to_storage(entry.date),
                    entry.amount.to_string(),
                    entry.entry_type.as_str(),
                    entry.paid,
                    entry.id,
                ],
            )?;
            if changed == 0 {
                tracing::warn!(id = entry.id, "update matched no entry");
            }
            Ok(entry.id)
        }
    }

    fn delete(&mut self, entry: &Entry) -> Result<()> {
        self.conn
            .execute("DELETE FROM entries WHERE id = ?1", params![entry.id])?;
        tracing::debug!(id = entry.id, "entry deleted");
        Ok(())
    }

    fn list_all(&self) -> Result<Vec<Entry>> {
        let mut stmt = self.conn.prepare(&format!(
            "SELECT {ENTRY_COLUMNS} FROM entries ORDER BY date, id"
        ))?;
        let rows = stmt.query_map([], entry_from_row)?;
        Ok(rows.collect::<std::result::Result<Vec<_>, _>>()?)
    }
}

fn entry_from_row(row: &Row<'_>) -> rusqlite::Result<Entry> {
    let date_str: String = row.get(2)?;
    let amount_str: String = row.get(3)?;
    let date = from_storage(&date_str).ok_or_else(|| {
        rusqlite::Error::FromSqlConversionFailure(
            2,
            Type::Text,
            format!("invalid date '{date_str}'").into(),
        )
    })?;
    let amount = Decimal::from_str(&amount_str)
        .map_err(|e| rusqlite::Error::FromSqlConversionFailure(3, Type::Text, Box::new(e)))?;
    Ok(Entry {
        id: row.get(0)?,
        description: row.get(1)?,
        date,
        amount,
        entry_type: EntryType::parse(&row.get::<_, String>(4)?),
        paid: row.get(5)?,
    })
}

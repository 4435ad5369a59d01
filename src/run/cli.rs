use anyhow::{Context, Result};
use std::io::{self, Write};
use std::path::PathBuf;

use crate::config::Config;
use crate::db::Datasource;
use crate::export::export_csv_to_path;
use crate::ledger::Totals;
use crate::models::{format_date, parse_date, EntryType};
use crate::ui::form::EntryForm;
use crate::ui::util::{format_amount, format_entry_amount, truncate};

pub(crate) fn as_cli(args: &[String], ds: &mut dyn Datasource, config: &Config) -> Result<()> {
    let stdout = io::stdout();
    let mut out = stdout.lock();
    run_command(&args[1..], ds, &config.currency_symbol, &mut out)
}

pub(crate) fn run_command(
    args: &[String],
    ds: &mut dyn Datasource,
    symbol: &str,
    out: &mut dyn Write,
) -> Result<()> {
    let Some(command) = args.first() else {
        print_usage(out)?;
        return Ok(());
    };
    let rest = &args[1..];
    tracing::debug!(command = %command, "cli command");

    match command.as_str() {
        "list" | "ls" => cli_list(ds, symbol, out),
        "add" => cli_add(rest, ds, out),
        "edit" => cli_edit(rest, ds, out),
        "delete" | "rm" => cli_delete(rest, ds, out),
        "summary" | "s" => cli_summary(ds, symbol, out),
        "export" => cli_export(rest, ds, out),
        "--help" | "-h" | "help" => print_usage(out),
        "--version" | "-V" | "version" => {
            writeln!(out, "cashbook {}", env!("CARGO_PKG_VERSION"))?;
            Ok(())
        }
        other => {
            print_usage(out)?;
            anyhow::bail!("Unknown command: {other}");
        }
    }
}

fn print_usage(out: &mut dyn Write) -> Result<()> {
    let usage = "\
Cashbook: personal income and expense ledger

Usage: cashbook [command]

Commands:
  (none)                          Launch interactive TUI
  list                            List entries with balance and projection
  add <description> <amount>      Add an entry
    --date <dd/mm/yyyy>           Entry date (default: today)
    --income                      Record as income (default: expense)
    --paid                        Mark as already paid
  edit <id>                       Change an existing entry
    --description <text>          New description
    --amount <amount>             New amount
    --date <dd/mm/yyyy>           New date
    --income | --expense          New type
    --paid | --pending            New paid status
  delete <id>                     Delete an entry
  summary                         Print balance, projection and counts
  export [path]                   Export all entries to CSV
  --help, -h                      Show this help
  --version, -V                   Show version";
    writeln!(out, "{usage}")?;
    Ok(())
}

fn flag_value<'a>(args: &'a [String], flag: &str) -> Result<Option<&'a str>> {
    match args.iter().position(|a| a == flag) {
        None => Ok(None),
        Some(i) => match args.get(i + 1) {
            Some(value) => Ok(Some(value.as_str())),
            None => anyhow::bail!("Missing value for {flag}\nRun 'cashbook help' for usage"),
        },
    }
}

fn has_flag(args: &[String], flag: &str) -> bool {
    args.iter().any(|a| a == flag)
}

fn parse_id(args: &[String], usage: &str) -> Result<i64> {
    let raw = args
        .first()
        .ok_or_else(|| anyhow::anyhow!("Usage: {usage}"))?;
    raw.parse::<i64>()
        .ok()
        .filter(|id| *id > 0)
        .ok_or_else(|| anyhow::anyhow!("Invalid entry id: {raw}"))
}

/// Feed flag values through the form's change handlers.
fn apply_edits(form: &mut EntryForm, args: &[String]) -> Result<()> {
    if let Some(description) = flag_value(args, "--description")? {
        form.on_description_changed(description);
    }
    if let Some(amount) = flag_value(args, "--amount")? {
        form.on_amount_changed(amount);
    }
    if let Some(raw) = flag_value(args, "--date")? {
        let date = parse_date(raw)
            .ok_or_else(|| anyhow::anyhow!("Invalid date '{raw}', expected dd/mm/yyyy"))?;
        form.on_date_changed(date);
    }
    if has_flag(args, "--income") {
        form.on_type_changed(EntryType::Income);
    } else if has_flag(args, "--expense") {
        form.on_type_changed(EntryType::Expense);
    }
    if has_flag(args, "--paid") {
        form.on_paid_changed(true);
    } else if has_flag(args, "--pending") {
        form.on_paid_changed(false);
    }
    Ok(())
}

/// Save through the form; on failure report field errors first, then the
/// datasource message.
fn finish_save(form: &mut EntryForm, ds: &mut dyn Datasource) -> Result<i64> {
    if form.save(ds) {
        return Ok(form.state().entry_id);
    }
    let state = form.state();
    let errors: Vec<String> = [&state.description, &state.amount]
        .iter()
        .filter_map(|field| field.error.map(|e| e.to_string()))
        .collect();
    if !errors.is_empty() {
        anyhow::bail!("{}", errors.join("; "));
    }
    let msg = state
        .message
        .clone()
        .unwrap_or_else(|| "Could not save entry".into());
    anyhow::bail!("{msg}")
}

fn cli_list(ds: &mut dyn Datasource, symbol: &str, out: &mut dyn Write) -> Result<()> {
    let entries = ds.list_all()?;
    if entries.is_empty() {
        writeln!(out, "No entries")?;
        return Ok(());
    }

    writeln!(
        out,
        "{:<5} {:<10}  {:<32} {:<8} {:<8} {:>14}",
        "ID", "Date", "Description", "Type", "Status", "Amount"
    )?;
    writeln!(out, "{}", "─".repeat(82))?;
    for entry in &entries {
        writeln!(
            out,
            "{:<5} {:<10}  {:<32} {:<8} {:<8} {:>14}",
            entry.id,
            format_date(entry.date),
            truncate(&entry.description, 32),
            entry.entry_type.as_str(),
            if entry.paid { "paid" } else { "pending" },
            format_entry_amount(entry, symbol),
        )?;
    }

    let totals = Totals::of(&entries);
    writeln!(out, "{}", "─".repeat(82))?;
    writeln!(out, "{:>67} {:>14}", "Balance", format_amount(totals.balance, symbol))?;
    writeln!(
        out,
        "{:>67} {:>14}",
        "Projection",
        format_amount(totals.projection, symbol)
    )?;
    Ok(())
}

fn cli_add(args: &[String], ds: &mut dyn Datasource, out: &mut dyn Write) -> Result<()> {
    if args.len() < 2 {
        anyhow::bail!("Usage: cashbook add <description> <amount> [--date dd/mm/yyyy] [--income] [--paid]");
    }

    let mut form = EntryForm::new(0);
    form.on_description_changed(&args[0]);
    form.on_amount_changed(&args[1]);
    apply_edits(&mut form, &args[2..])?;

    let id = finish_save(&mut form, ds)?;
    writeln!(out, "Added entry #{id}")?;
    Ok(())
}

fn cli_edit(args: &[String], ds: &mut dyn Datasource, out: &mut dyn Write) -> Result<()> {
    let id = parse_id(args, "cashbook edit <id> [--description S] [--amount A] [--date D]")?;
    let mut form = EntryForm::open(id, ds);
    if form.state().load_failed {
        anyhow::bail!("Entry #{id} not found");
    }

    apply_edits(&mut form, &args[1..])?;
    finish_save(&mut form, ds)?;
    writeln!(out, "Updated entry #{id}")?;
    Ok(())
}

fn cli_delete(args: &[String], ds: &mut dyn Datasource, out: &mut dyn Write) -> Result<()> {
    let id = parse_id(args, "cashbook delete <id>")?;
    let mut form = EntryForm::open(id, ds);
    if form.state().load_failed {
        anyhow::bail!("Entry #{id} not found");
    }

    if !form.remove(ds) {
        let msg = form
            .state()
            .message
            .clone()
            .unwrap_or_else(|| "Could not delete entry".into());
        anyhow::bail!("{msg}");
    }
    writeln!(out, "Deleted entry #{id}")?;
    Ok(())
}

fn cli_summary(ds: &mut dyn Datasource, symbol: &str, out: &mut dyn Write) -> Result<()> {
    let entries = ds.list_all()?;
    let totals = Totals::of(&entries);
    let paid = entries.iter().filter(|e| e.paid).count();
    let income = entries.iter().filter(|e| e.is_income()).count();
    let expense = entries.iter().filter(|e| e.is_expense()).count();

    writeln!(out, "Cashbook summary")?;
    writeln!(out, "{}", "─".repeat(40))?;
    writeln!(out, "  Balance:     {}", format_amount(totals.balance, symbol))?;
    writeln!(out, "  Pending:     {}", format_amount(totals.pending(), symbol))?;
    writeln!(out, "  Projection:  {}", format_amount(totals.projection, symbol))?;
    writeln!(
        out,
        "  Entries:     {} ({} paid, {} pending)",
        entries.len(),
        paid,
        entries.len() - paid
    )?;
    writeln!(
        out,
        "  By type:     {} income, {} expense",
        income, expense
    )?;
    Ok(())
}

fn cli_export(args: &[String], ds: &mut dyn Datasource, out: &mut dyn Write) -> Result<()> {
    let output_path = args
        .first()
        .filter(|a| !a.starts_with('-'))
        .map(|a| PathBuf::from(shellexpand(a)))
        .unwrap_or_else(|| {
            let home = std::env::var("HOME").unwrap_or_else(|_| ".".into());
            PathBuf::from(home).join("cashbook-export.csv")
        });

    let entries = ds.list_all().context("Failed to read entries for export")?;
    let count = export_csv_to_path(&entries, &output_path)?;
    if count == 0 {
        writeln!(out, "No entries to export (wrote header to {})", output_path.display())?;
    } else {
        writeln!(out, "Exported {count} entries to {}", output_path.display())?;
    }
    Ok(())
}

pub(crate) fn shellexpand(path: &str) -> String {
    if let Some(rest) = path.strip_prefix("~/") {
        let home = std::env::var("HOME").unwrap_or_else(|_| ".".into());
        format!("{home}/{rest}")
    } else {
        path.to_string()
    }
}

#[cfg(test)]
#[path = "cli_tests.rs"]
mod tests;

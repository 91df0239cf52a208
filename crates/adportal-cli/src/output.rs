//! Rendering of command results as tables or JSON.

use serde::Serialize;
use tabled::settings::Style;
use tabled::{Table, Tabled};

use adportal_core::error::AppError;

/// How command results are written to stdout.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    /// Human-readable table
    #[default]
    Table,
    /// Pretty-printed JSON
    Json,
}

/// Writes rows in the selected format.
pub fn print_list<T: Serialize + Tabled>(rows: &[T], format: OutputFormat) -> Result<(), AppError> {
    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(rows)?),
        OutputFormat::Table if rows.is_empty() => println!("Nothing to show."),
        OutputFormat::Table => println!("{}", Table::new(rows).with(Style::rounded())),
    }
    Ok(())
}

pub fn print_success(msg: &str) {
    println!("✓ {msg}");
}

/// Writes an error and its per-field details to stderr.
pub fn print_error(err: &AppError) {
    eprintln!("✗ {}", err.message);
    for detail in &err.details {
        eprintln!("    {detail}");
    }
}

/// Writes an aligned `label: value` line.
pub fn print_kv(label: &str, value: &str) {
    println!("  {:<16} {value}", format!("{label}:"));
}

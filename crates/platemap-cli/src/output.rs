use console::style;
use serde::Serialize;
use std::fmt::Display;
use tabled::{settings::Style, Table, Tabled};

/// Output format mode
#[derive(Debug, Clone, Copy)]
pub enum OutputFormat {
    Human,
    Json,
}

pub struct OutputWriter {
    format: OutputFormat,
}

impl OutputWriter {
    pub fn new(json: bool) -> Self {
        Self {
            format: if json {
                OutputFormat::Json
            } else {
                OutputFormat::Human
            },
        }
    }

    pub fn is_json(&self) -> bool {
        matches!(self.format, OutputFormat::Json)
    }

    pub fn warning(&self, message: impl Display) {
        match self.format {
            OutputFormat::Human => {
                eprintln!("{} {}", style("⚠").yellow().bold(), message);
            }
            OutputFormat::Json => {
                let output = serde_json::json!({
                    "status": "warning",
                    "message": message.to_string(),
                });
                eprintln!("{}", serde_json::to_string_pretty(&output).unwrap());
            }
        }
    }

    pub fn section(&self, title: impl Display) {
        if let OutputFormat::Human = self.format {
            println!();
            println!("{}", style(title).bold().underlined());
        }
    }

    pub fn kv(&self, key: impl Display, value: impl Display) {
        if let OutputFormat::Human = self.format {
            println!("  {}: {}", style(key).dim(), value);
        }
    }

    /// Render rows as a table, or as a JSON array in JSON mode
    pub fn table<T: Tabled + Serialize>(&self, rows: &[T]) {
        match self.format {
            OutputFormat::Human => {
                if rows.is_empty() {
                    println!("  (no results)");
                } else {
                    let mut table = Table::new(rows);
                    table.with(Style::rounded());
                    println!("{table}");
                }
            }
            OutputFormat::Json => {
                println!("{}", serde_json::to_string_pretty(rows).unwrap());
            }
        }
    }

    /// Emit an arbitrary JSON payload in JSON mode; no-op otherwise
    pub fn json(&self, value: &impl Serialize) {
        if self.is_json() {
            println!("{}", serde_json::to_string_pretty(value).unwrap());
        }
    }
}

//! Table and JSON output formatting for console commands.

use serde::Serialize;
use tabled::{Table, Tabled};

use infradesk_core::types::{Notification, NotificationLevel};

/// Output format selection
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    /// Human-readable table
    #[default]
    Table,
    /// JSON output
    Json,
}

/// Print a list of rows in the selected format
pub fn print_list<T: Serialize + Tabled>(items: &[T], format: OutputFormat) {
    match format {
        OutputFormat::Table => {
            if items.is_empty() {
                println!("No results found.");
            } else {
                println!("{}", Table::new(items));
            }
        }
        OutputFormat::Json => {
            let json = serde_json::to_string_pretty(items).unwrap_or_else(|_| "[]".to_string());
            println!("{json}");
        }
    }
}

/// Print label/value pairs, or a JSON object of them
pub fn print_fields(fields: &[(&str, String)], format: OutputFormat) {
    match format {
        OutputFormat::Table => {
            for (key, value) in fields {
                print_kv(key, value);
            }
        }
        OutputFormat::Json => {
            let object: serde_json::Map<String, serde_json::Value> = fields
                .iter()
                .map(|(k, v)| (k.to_string(), serde_json::Value::from(v.as_str())))
                .collect();
            let json = serde_json::to_string_pretty(&object).unwrap_or_else(|_| "{}".to_string());
            println!("{json}");
        }
    }
}

/// Print a notification with a marker for its level
pub fn print_notification(notification: &Notification) {
    match notification.level {
        NotificationLevel::Success => print_success(&notification.to_string()),
        NotificationLevel::Info => println!("{notification}"),
        NotificationLevel::Warning => print_warning(&notification.to_string()),
        NotificationLevel::Error => print_error(&notification.to_string()),
    }
}

/// Print a success message
pub fn print_success(msg: &str) {
    println!("✓ {msg}");
}

/// Print a warning message
pub fn print_warning(msg: &str) {
    println!("⚠ {msg}");
}

/// Print an error message
pub fn print_error(msg: &str) {
    eprintln!("✗ {msg}");
}

/// Print a key-value pair
pub fn print_kv(key: &str, value: &str) {
    println!("  {:<24} {}", format!("{key}:"), value);
}

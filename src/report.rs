use crate::types::BackupFileRecord;
use chrono::{Local, TimeZone};
use comfy_table::{Cell, Color, Table};
use std::fs;
use std::path::Path;

/// Print what this run keeps and removes locally. Sizes are read from the
/// filesystem at print time; a file that vanished since listing shows "-".
pub fn print_local_plan(backup_dir: &str, records: &[BackupFileRecord], keep: usize) {
    let mut table = Table::new();
    table.load_preset(comfy_table::presets::UTF8_HORIZONTAL_ONLY);
    table.set_header(vec!["Backup", "Created", "Size", "Action"]);

    for (i, record) in records.iter().enumerate() {
        let created = i64::try_from(record.timestamp)
            .ok()
            .filter(|ts| *ts > 0)
            .and_then(|ts| Local.timestamp_opt(ts, 0).single())
            .map(|dt| dt.format("%Y-%m-%d %H:%M").to_string())
            .unwrap_or_else(|| "-".to_string());

        let size = fs::metadata(Path::new(backup_dir).join(&record.name))
            .map(|m| human_bytes::human_bytes(m.len() as f64))
            .unwrap_or_else(|_| "-".to_string());

        let action = if i < keep {
            Cell::new("keep").fg(Color::Green)
        } else {
            Cell::new("remove").fg(Color::Yellow)
        };

        table.add_row(vec![
            Cell::new(&record.name),
            Cell::new(created),
            Cell::new(size),
            action,
        ]);
    }

    println!("{table}");
}

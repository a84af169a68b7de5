use std::path::Path;

/// One backup archive as seen in a listing (local directory or remote
/// storage). The timestamp is derived from the filename prefix and is the
/// only retention key; files without a parseable prefix sort as oldest.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BackupFileRecord {
    pub name: String,
    pub timestamp: u64,
}

impl BackupFileRecord {
    #[must_use]
    pub fn from_name(name: &str) -> Self {
        Self {
            name: name.to_string(),
            timestamp: extract_timestamp(name),
        }
    }
}

/// Fixed per-run settings. Built once in main and passed by reference;
/// nothing here is re-read or validated mid-run.
#[derive(Debug, Clone)]
pub struct RetentionConfig {
    pub backup_dir: String,
    pub remote_dir: String,
    pub local_limit: usize,
    pub remote_limit: usize,
    pub container: String,
}

/// Extract the leading unix timestamp from a backup filename like
/// `1731206788_2024_11_10_17.5.0-ee_gitlab_backup.tar`.
///
/// The digit run must start at position 0 of the base name and be followed
/// by an underscore; anything else (no underscore, non-numeric prefix,
/// digits elsewhere in the name, overflow) yields 0.
#[must_use]
pub fn extract_timestamp(filename: &str) -> u64 {
    let base = Path::new(filename)
        .file_name()
        .and_then(|n| n.to_str())
        .unwrap_or(filename);

    match base.split_once('_') {
        Some((prefix, _)) if !prefix.is_empty() && prefix.bytes().all(|b| b.is_ascii_digit()) => {
            prefix.parse().unwrap_or(0)
        }
        _ => 0,
    }
}

/// Sort newest first. The sort is stable, so callers control the tie-break
/// for equal timestamps through the order they pass records in.
pub fn sort_newest_first(records: &mut [BackupFileRecord]) {
    records.sort_by(|a, b| b.timestamp.cmp(&a.timestamp));
}

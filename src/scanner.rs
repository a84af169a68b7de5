use crate::rotation::RotationError;
use crate::types::{BackupFileRecord, sort_newest_first};
use colored::Colorize;
use std::fs;
use std::path::Path;
use walkdir::WalkDir;

/// Filenames must end with this to count as backup archives; anything else
/// in the directory is ignored outright.
pub const BACKUP_SUFFIX: &str = "_gitlab_backup.tar";

/// List backup archives directly inside `backup_dir`, newest first.
///
/// The entries are name-sorted before the stable timestamp sort, so files
/// with equal timestamps come out in lexicographic order regardless of
/// readdir order.
#[must_use]
pub fn list_local_backups(backup_dir: &str) -> Vec<BackupFileRecord> {
    let mut names: Vec<String> = WalkDir::new(backup_dir)
        .max_depth(1)
        .into_iter()
        .filter_map(std::result::Result::ok)
        .filter(|e| e.file_type().is_file())
        .filter_map(|e| {
            let name = e.file_name().to_string_lossy().to_string();
            name.ends_with(BACKUP_SUFFIX).then_some(name)
        })
        .collect();

    names.sort();

    let mut records: Vec<BackupFileRecord> = names
        .iter()
        .map(|name| BackupFileRecord::from_name(name))
        .collect();
    sort_newest_first(&mut records);
    records
}

/// Delete every record past the retention index. `records` must already be
/// sorted newest first; the newest `keep` files survive.
///
/// A failed delete is not caught here; it propagates to the caller.
pub fn prune_local(
    backup_dir: &str,
    records: &[BackupFileRecord],
    keep: usize,
) -> Result<(), RotationError> {
    if records.len() <= keep {
        return Ok(());
    }

    println!("Removing old local backups (keeping {keep})");
    for record in &records[keep..] {
        println!("Removing {}", record.name.yellow());
        let path = Path::new(backup_dir).join(&record.name);
        fs::remove_file(&path).map_err(|cause| RotationError::RemoveBackup { path, cause })?;
    }

    Ok(())
}

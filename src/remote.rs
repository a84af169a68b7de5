use crate::commands::BackupCommands;
use crate::types::{BackupFileRecord, sort_newest_first};
use colored::Colorize;

/// List backup files in the remote directory, newest first.
///
/// A failed listing degrades to "no remote backups": the run skips remote
/// retention instead of erroring out. Ties keep the remote tool's output
/// order (stable sort, no pre-sort).
#[must_use]
pub fn list_remote_backups(
    commands: &impl BackupCommands,
    remote_dir: &str,
) -> Vec<BackupFileRecord> {
    let output = commands.list_remote(remote_dir);
    if !output.success {
        log::debug!("remote listing failed: {}", output.stderr.trim());
        return Vec::new();
    }

    let mut records: Vec<BackupFileRecord> = output
        .stdout
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(BackupFileRecord::from_name)
        .collect();
    sort_newest_first(&mut records);
    records
}

/// Remove remote files past the retention index. Each remove is
/// best-effort; a failure is not retried or reported beyond a debug line,
/// matching the listing policy above.
pub fn prune_remote(commands: &impl BackupCommands, remote_dir: &str, keep: usize) {
    let remote_files = list_remote_backups(commands, remote_dir);
    if remote_files.len() <= keep {
        return;
    }

    println!("Removing old cloud backups (keeping {keep})");
    for record in &remote_files[keep..] {
        println!("Removing from cloud: {}", record.name.yellow());
        let output = commands.remove_remote(remote_dir, &record.name);
        if !output.success {
            log::debug!("remote remove of {} failed: {}", record.name, output.stderr.trim());
        }
    }
}

use crate::commands::BackupCommands;
use crate::types::{BackupFileRecord, RetentionConfig};
use crate::{remote, report, scanner};
use colored::Colorize;
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum RotationError {
    #[error("failed to remove backup '{path}': {cause}")]
    RemoveBackup { path: PathBuf, cause: io::Error },
}

/// Ask the container to produce a fresh backup archive. Failure is
/// reported on the console and the rotation continues with whatever
/// archives already exist.
fn create_backup(commands: &impl BackupCommands) {
    println!("Creating backup...");
    let output = commands.create_backup();
    if output.success {
        println!("{}", "Backup created successfully".green());
    } else {
        eprintln!("{} {}", "Error creating backup:".red(), output.stderr.trim());
    }
}

fn upload_newest(
    commands: &impl BackupCommands,
    backup_dir: &str,
    record: &BackupFileRecord,
    remote_dir: &str,
) {
    println!("Uploading {} to cloud...", record.name);
    let path = Path::new(backup_dir).join(&record.name);
    let output = commands.upload(&path, remote_dir);
    if output.success {
        println!("{}", "Cloud upload completed successfully".green());
    } else {
        eprintln!("{} {}", "Error uploading to cloud:".red(), output.stderr.trim());
    }
}

/// The five-step rotation pipeline: create, list local, prune local,
/// upload newest, prune remote. With no local archives the run stops after
/// the create step. Only a failed local delete ends the run early; the
/// caller owns the failure boundary and the exit status.
pub fn run(config: &RetentionConfig, commands: &impl BackupCommands) -> Result<(), RotationError> {
    create_backup(commands);

    let backups = scanner::list_local_backups(&config.backup_dir);
    if backups.is_empty() {
        println!("No backups found");
        return Ok(());
    }

    report::print_local_plan(&config.backup_dir, &backups, config.local_limit);
    scanner::prune_local(&config.backup_dir, &backups, config.local_limit)?;
    upload_newest(commands, &config.backup_dir, &backups[0], &config.remote_dir);
    remote::prune_remote(commands, &config.remote_dir, config.remote_limit);

    println!("{}", "Backup process completed successfully".green());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::fake::{Call, FakeCommands};
    use std::fs;
    use tempfile::TempDir;

    fn config_for(dir: &TempDir, local_limit: usize, remote_limit: usize) -> RetentionConfig {
        RetentionConfig {
            backup_dir: dir.path().to_string_lossy().to_string(),
            remote_dir: "/backup/gitlab/".to_string(),
            local_limit,
            remote_limit,
            container: "gitlab-web-1".to_string(),
        }
    }

    fn touch(dir: &TempDir, name: &str) {
        fs::write(dir.path().join(name), b"tar").unwrap();
    }

    #[test]
    fn test_run_with_no_backups_stops_after_create() {
        let dir = TempDir::new().unwrap();
        let commands = FakeCommands::with_remote_files(&["100_daily_gitlab_backup.tar"]);

        run(&config_for(&dir, 5, 3), &commands).unwrap();

        // No prune, no upload, no remote interaction at all
        assert_eq!(commands.calls(), vec![Call::CreateBackup]);
    }

    #[test]
    fn test_run_full_rotation() {
        let dir = TempDir::new().unwrap();
        for ts in [100, 200, 300, 400, 50] {
            touch(&dir, &format!("{ts}_daily_gitlab_backup.tar"));
        }
        let commands = FakeCommands::with_remote_files(&[
            "100_daily_gitlab_backup.tar",
            "300_daily_gitlab_backup.tar",
            "200_daily_gitlab_backup.tar",
            "400_daily_gitlab_backup.tar",
        ]);

        run(&config_for(&dir, 3, 3), &commands).unwrap();

        // Local side: newest three survive
        let left = scanner::list_local_backups(dir.path().to_str().unwrap());
        let left: Vec<u64> = left.iter().map(|r| r.timestamp).collect();
        assert_eq!(left, vec![400, 300, 200]);

        // Command side: create, upload of the newest local file, then
        // remote listing and one remove for the excess entry
        let newest = dir
            .path()
            .join("400_daily_gitlab_backup.tar")
            .to_string_lossy()
            .to_string();
        assert_eq!(
            commands.calls(),
            vec![
                Call::CreateBackup,
                Call::Upload(newest, "/backup/gitlab/".to_string()),
                Call::ListRemote("/backup/gitlab/".to_string()),
                Call::RemoveRemote(
                    "/backup/gitlab/".to_string(),
                    "100_daily_gitlab_backup.tar".to_string()
                ),
            ]
        );
    }

    #[test]
    fn test_run_is_ok_when_nothing_exceeds_limits() {
        let dir = TempDir::new().unwrap();
        touch(&dir, "100_daily_gitlab_backup.tar");
        let commands = FakeCommands::with_remote_files(&["100_daily_gitlab_backup.tar"]);

        run(&config_for(&dir, 5, 3), &commands).unwrap();

        assert_eq!(
            scanner::list_local_backups(dir.path().to_str().unwrap()).len(),
            1
        );
        assert!(
            !commands
                .calls()
                .iter()
                .any(|c| matches!(c, Call::RemoveRemote(..)))
        );
    }
}

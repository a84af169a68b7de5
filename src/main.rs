mod commands;
mod remote;
mod report;
mod rotation;
mod scanner;
mod types;

use chrono::Local;
use clap::Parser;
use colored::Colorize;

use commands::ShellCommands;
use types::RetentionConfig;

/// Rotate GitLab backups: create one inside the container, keep the newest
/// archives locally, mirror the newest to cloud storage and prune both
/// sides to their retention counts.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// Directory the container writes backup archives into
    #[arg(
        long,
        short = 'b',
        default_value = "/var/lib/docker/volumes/gitlab_gitlab-data/_data/backups/"
    )]
    backup_dir: String,

    /// Remote directory backups are mirrored to
    #[arg(long, short = 'r', default_value = "/backup/gitlab/")]
    remote_dir: String,

    /// Number of local backups to keep
    #[arg(long, default_value_t = 5)]
    local_limit: usize,

    /// Number of remote backups to keep
    #[arg(long, default_value_t = 3)]
    remote_limit: usize,

    /// Container the backup job runs in
    #[arg(long, default_value = "gitlab-web-1")]
    container: String,
}

fn main() {
    env_logger::init();
    let args = Args::parse();

    println!(
        "{}",
        format!(
            "=== Backup rotation: {} ===",
            Local::now().format("%Y-%m-%d %H:%M")
        )
        .cyan()
    );

    let config = RetentionConfig {
        backup_dir: args.backup_dir,
        remote_dir: args.remote_dir,
        local_limit: args.local_limit,
        remote_limit: args.remote_limit,
        container: args.container,
    };
    let commands = ShellCommands::new(&config.container);

    // Single failure boundary; the process exits 0 either way.
    if let Err(e) = rotation::run(&config, &commands) {
        eprintln!("{} {e}", "Error during backup process:".red());
    }
}

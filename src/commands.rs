use std::path::Path;
use std::process::Command;

/// Outcome of one external command. A spawn failure (missing binary,
/// permission denied) is folded into `success = false` with the OS error
/// in `stderr`, so call sites apply a single policy per operation.
#[derive(Debug, Clone, Default)]
pub struct CommandOutput {
    pub success: bool,
    pub stdout: String,
    pub stderr: String,
}

/// The four opaque operations the rotation pipeline shells out for.
/// Everything behind this trait is a blocking external process; tests swap
/// in the recording fake below.
pub trait BackupCommands {
    fn create_backup(&self) -> CommandOutput;
    fn list_remote(&self, remote_dir: &str) -> CommandOutput;
    fn upload(&self, file: &Path, remote_dir: &str) -> CommandOutput;
    fn remove_remote(&self, remote_dir: &str, name: &str) -> CommandOutput;
}

/// Real implementation driving docker and the MEGA CLI tools.
pub struct ShellCommands {
    container: String,
}

impl ShellCommands {
    #[must_use]
    pub fn new(container: &str) -> Self {
        Self {
            container: container.to_string(),
        }
    }

    fn run(program: &str, args: &[&str]) -> CommandOutput {
        log::debug!("running: {} {}", program, args.join(" "));

        match Command::new(program).args(args).output() {
            Ok(output) => CommandOutput {
                success: output.status.success(),
                stdout: String::from_utf8_lossy(&output.stdout).to_string(),
                stderr: String::from_utf8_lossy(&output.stderr).to_string(),
            },
            Err(e) => CommandOutput {
                success: false,
                stdout: String::new(),
                stderr: e.to_string(),
            },
        }
    }
}

impl BackupCommands for ShellCommands {
    fn create_backup(&self) -> CommandOutput {
        Self::run(
            "docker",
            &["exec", &self.container, "gitlab-backup", "create"],
        )
    }

    fn list_remote(&self, remote_dir: &str) -> CommandOutput {
        Self::run("mega-ls", &[remote_dir])
    }

    fn upload(&self, file: &Path, remote_dir: &str) -> CommandOutput {
        let file = file.to_string_lossy();
        Self::run("mega-put", &[file.as_ref(), remote_dir])
    }

    fn remove_remote(&self, remote_dir: &str, name: &str) -> CommandOutput {
        let target = format!("{}/{}", remote_dir.trim_end_matches('/'), name);
        Self::run("mega-rm", &[&target])
    }
}

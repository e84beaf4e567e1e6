//! Starting external viewers for media previews

use std::process::{Child, Command, Stdio};

use crate::errors::{AppError, AppResult};

/// Run a handler command line through the platform shell, detached from the
/// terminal. The caller owns the child and kills it when the preview changes.
pub fn spawn_viewer(command: &str) -> AppResult<Child> {
    if command.trim().is_empty() {
        return Err(AppError::Preview("empty viewer command".to_string()));
    }

    #[cfg(unix)]
    let mut cmd = {
        let mut cmd = Command::new("sh");
        cmd.arg("-c").arg(command);
        cmd
    };

    #[cfg(windows)]
    let mut cmd = {
        let mut cmd = Command::new("cmd");
        cmd.arg("/C").arg(command);
        cmd
    };

    log::info!("starting viewer: {}", command);
    cmd.stdin(Stdio::null())
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .spawn()
        .map_err(|source| AppError::Launch { program: command.to_string(), source })
}

use std::process::{Command, Stdio};

use url::Url;

pub fn open_url(url: &Url) -> anyhow::Result<()> {
    tracing::debug!("opening {url}");
    open::that_detached(url.as_str()).map_err(Into::into)
}

/// Spawns `command` through the platform shell without waiting for it to exit.
///
/// The child is reaped on a background thread once it exits.
pub fn execute_in_shell(command: impl AsRef<str>) -> anyhow::Result<()> {
    let command = command.as_ref();
    if command.trim().is_empty() {
        anyhow::bail!("Refusing to run an empty command");
    }

    tracing::debug!("spawning `{command}`");
    let mut child = imp::shell_command(command)
        .stdin(Stdio::null())
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .spawn()?;

    std::thread::Builder::new()
        .name("cardfind-reaper".into())
        .spawn(move || match child.wait() {
            Ok(status) => tracing::debug!("shell command exited with {status}"),
            Err(e) => tracing::warn!("Failed to wait on shell command: {e}"),
        })?;

    Ok(())
}

#[cfg(windows)]
mod imp {
    use super::*;

    pub fn shell_command(command: &str) -> Command {
        let mut cmd = Command::new("cmd.exe");
        cmd.arg("/C").arg(command);
        cmd
    }
}

#[cfg(not(windows))]
mod imp {
    use super::*;

    pub fn shell_command(command: &str) -> Command {
        let mut cmd = Command::new("sh");
        cmd.arg("-c").arg(command);
        cmd
    }
}

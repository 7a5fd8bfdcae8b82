//! Infrastructure implementation of the `CatalinaControl` port.
//!
//! `CatalinaProcess` spawns the control script shipped with the
//! container home installation via [`tokio::process::Command`] and
//! awaits its exit. The child inherits the caller's standard streams so
//! container output lands on the user's terminal.

use std::path::{Path, PathBuf};
use std::process::{ExitStatus, Stdio};

use anyhow::{Context, Result};

use crate::application::ports::{CatalinaControl, ControlAction};
use crate::domain::environment::ProcessEnv;

/// Path of the platform control script inside the home installation.
#[must_use]
pub fn control_script(home: &Path) -> PathBuf {
    let script = if cfg!(windows) { "catalina.bat" } else { "catalina.sh" };
    home.join("bin").join(script)
}

/// Production `CatalinaControl` backed by the real control script.
///
/// No timeout is applied to the awaited child: control script runs are
/// bounded by the script itself, and an aborting user terminates the
/// whole tool process.
pub struct CatalinaProcess;

impl CatalinaControl for CatalinaProcess {
    async fn run(&self, action: ControlAction, env: &ProcessEnv) -> Result<ExitStatus> {
        let script = control_script(env.home());
        let mut command = tokio::process::Command::new(&script);
        command
            .args(action.args())
            .stdin(Stdio::inherit())
            .stdout(Stdio::inherit())
            .stderr(Stdio::inherit())
            .kill_on_drop(true);
        for (name, value) in env.vars() {
            command.env(name, value);
        }

        let mut child = command
            .spawn()
            .with_context(|| format!("failed to spawn {}", script.display()))?;
        child
            .wait()
            .await
            .with_context(|| format!("waiting for {}", script.display()))
    }
}

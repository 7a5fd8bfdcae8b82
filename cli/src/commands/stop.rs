//! `tomcat-dev stop`: stop a running container instance.
//!
//! Stopping never touches the workspace: no directories are reset and
//! no descriptor is generated.

use anyhow::{Context, Result};

use crate::app::AppContext;
use crate::application::services::lifecycle::{self, LifecycleCommand};
use crate::cli::StopArgs;
use crate::infra::catalina::CatalinaProcess;
use crate::infra::config::load_file_config;
use crate::infra::tail::FileTail;
use crate::infra::workspace::DiskWorkspace;

/// Run `tomcat-dev stop`.
///
/// # Errors
///
/// Returns an error if the control script invocation fails, including
/// when no instance was running to stop.
pub async fn run(args: StopArgs, app: &AppContext) -> Result<()> {
    let file = load_file_config(&app.ambient.cwd).context("loading project configuration")?;
    let cfg = args.resolve(file);
    let reporter = app.terminal_reporter();

    lifecycle::run_command(
        LifecycleCommand::Stop,
        &cfg,
        &app.ambient,
        &DiskWorkspace,
        &CatalinaProcess,
        &FileTail,
        &reporter,
    )
    .await?;
    Ok(())
}

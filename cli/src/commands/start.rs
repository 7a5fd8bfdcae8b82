//! `tomcat-dev start`: prepare the workspace and start the container.

use anyhow::{Context, Result};

use crate::app::AppContext;
use crate::application::services::lifecycle::{self, LifecycleCommand};
use crate::cli::ServeArgs;
use crate::domain::environment::resolve_base;
use crate::infra::catalina::CatalinaProcess;
use crate::infra::config::load_file_config;
use crate::infra::tail::FileTail;
use crate::infra::workspace::DiskWorkspace;

/// Run `tomcat-dev start`.
///
/// # Errors
///
/// Returns an error if workspace preparation or the control script
/// invocation fails.
pub async fn run(args: ServeArgs, app: &AppContext) -> Result<()> {
    let file = load_file_config(&app.ambient.cwd).context("loading project configuration")?;
    let cfg = args.resolve(file)?;
    let reporter = app.terminal_reporter();

    lifecycle::run_command(
        LifecycleCommand::Start,
        &cfg,
        &app.ambient,
        &DiskWorkspace,
        &CatalinaProcess,
        &FileTail,
        &reporter,
    )
    .await?;

    let ctx = &app.output;
    ctx.kv("Base", &resolve_base(&cfg, &app.ambient).display().to_string());
    ctx.kv("Stop", "tomcat-dev stop");
    Ok(())
}

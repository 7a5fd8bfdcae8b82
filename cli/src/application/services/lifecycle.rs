//! Application service for container lifecycle orchestration.
//!
//! The state machine behind `start`, `stop`, and `restart`:
//! `Idle → Preparing → Invoking → (Tailing | Done)`. Steps run strictly
//! in sequence; each child process is awaited to completion before the
//! next is spawned, and the overall command is reported back only after
//! the last child has exited. All I/O is routed through injected port
//! traits.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

use crate::application::ports::{
    CatalinaControl, ControlAction, LogFollower, ProgressReporter, Workspace,
};
use crate::domain::config::Config;
use crate::domain::descriptor::render_descriptor;
use crate::domain::environment::{Ambient, ProcessEnv, resolve_base};

/// Filename of the hot-reload agent JAR.
const AGENT_JAR: &str = "jrebel.jar";

/// Lifecycle operations exposed to the command layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LifecycleCommand {
    Start,
    Stop,
    Restart,
}

/// Outcome of a completed lifecycle command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LifecycleOutcome {
    Started,
    Stopped,
    Restarted,
}

/// Run one lifecycle command to completion.
///
/// `start` and `restart` prepare the workspace and regenerate the
/// deployment descriptor before any process is spawned; `stop` skips
/// preparation entirely. On `restart`, a forced stop is issued first and
/// its outcome is discarded ("nothing was running" is expected and
/// benign), but the start step never begins before the forced stop's
/// child has fully exited.
///
/// # Errors
///
/// Returns an error naming the failing step: a missing `CATALINA_HOME`,
/// a workspace preparation failure (aborts before spawn), or a
/// non-forced control invocation that failed to spawn or exited
/// non-zero. The workspace is left as prepared for inspection.
pub async fn run_command(
    cmd: LifecycleCommand,
    cfg: &Config,
    ambient: &Ambient,
    workspace: &impl Workspace,
    control: &impl CatalinaControl,
    follower: &impl LogFollower,
    reporter: &impl ProgressReporter,
) -> Result<LifecycleOutcome> {
    match cmd {
        LifecycleCommand::Start => {
            let env = start_env(cfg, ambient, workspace)?;
            prepare(cfg, ambient, &env, workspace, reporter)?;
            reporter.step("starting Tomcat...");
            invoke(control, ControlAction::Start, &env).await?;
            reporter.success("Tomcat started");
            maybe_tail(cfg, &env, follower, reporter).await;
            Ok(LifecycleOutcome::Started)
        }
        LifecycleCommand::Stop => {
            let env = ProcessEnv::derive(cfg, ambient, None, false)?;
            reporter.step("stopping Tomcat...");
            invoke(control, ControlAction::Stop, &env).await?;
            reporter.success("Tomcat stopped");
            Ok(LifecycleOutcome::Stopped)
        }
        LifecycleCommand::Restart => {
            let env = start_env(cfg, ambient, workspace)?;
            prepare(cfg, ambient, &env, workspace, reporter)?;
            reporter.step("stopping any running instance...");
            // Forced stop: awaited to completion, outcome discarded. It
            // legitimately fails when no instance is running.
            let _ = control.run(ControlAction::ForceStop, &env).await;
            reporter.step("starting Tomcat...");
            invoke(control, ControlAction::Start, &env).await?;
            reporter.success("Tomcat restarted");
            maybe_tail(cfg, &env, follower, reporter).await;
            Ok(LifecycleOutcome::Restarted)
        }
    }
}

/// Derive the environment for a process-starting command, resolving the
/// hot-reload agent when enabled. The `CATALINA_HOME` precondition is
/// checked here, before any filesystem work.
fn start_env(cfg: &Config, ambient: &Ambient, workspace: &impl Workspace) -> Result<ProcessEnv> {
    let home = ambient.catalina_home()?;
    let base = resolve_base(cfg, ambient);
    let agent = reload_agent(cfg, workspace, home, &base);
    Ok(ProcessEnv::derive(cfg, ambient, agent.as_deref(), true)?)
}

/// Resolve the hot-reload agent JAR: a workspace-local copy wins over
/// the one shipped with the home installation.
fn reload_agent(
    cfg: &Config,
    workspace: &impl Workspace,
    home: &Path,
    base: &Path,
) -> Option<PathBuf> {
    if !cfg.jrebel {
        return None;
    }
    let local = base.join(AGENT_JAR);
    Some(if workspace.exists(&local) { local } else { home.join(AGENT_JAR) })
}

/// Reset the workspace and regenerate the deployment descriptor. Any
/// failure here aborts the command before a process is spawned.
fn prepare(
    cfg: &Config,
    ambient: &Ambient,
    env: &ProcessEnv,
    workspace: &impl Workspace,
    reporter: &impl ProgressReporter,
) -> Result<()> {
    reporter.step("preparing workspace...");
    workspace
        .prepare(env.home(), env.base())
        .context("preparing workspace")?;
    let descriptor = render_descriptor(cfg, ambient)?;
    workspace
        .write_descriptor(env.base(), &descriptor)
        .context("writing deployment descriptor")?;
    Ok(())
}

/// Invoke one non-forced control action and turn a failed exit into a
/// command failure naming the step.
async fn invoke(
    control: &impl CatalinaControl,
    action: ControlAction,
    env: &ProcessEnv,
) -> Result<()> {
    let status = control
        .run(action, env)
        .await
        .with_context(|| format!("invoking catalina {}", action.describe()))?;
    anyhow::ensure!(status.success(), "catalina {} exited with {status}", action.describe());
    Ok(())
}

/// Tail the container log when enabled. Best-effort: read errors are
/// reported as warnings and never retract the already-reported success.
async fn maybe_tail(
    cfg: &Config,
    env: &ProcessEnv,
    follower: &impl LogFollower,
    reporter: &impl ProgressReporter,
) {
    if !cfg.tail {
        return;
    }
    let log = env.log_file();
    reporter.step(&format!("tailing {}", log.display()));
    if let Err(err) = follower.follow(&log).await {
        reporter.warn(&format!("log tail ended: {err:#}"));
    }
}

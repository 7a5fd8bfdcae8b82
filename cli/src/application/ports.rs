//! Port trait definitions for the application layer.
//!
//! Ports are the interfaces (contracts) that infrastructure must fulfill.
//! This file imports only from `crate::domain`, never from `crate::infra`,
//! `crate::commands`, or `crate::output`.

use std::path::Path;
use std::process::ExitStatus;

use anyhow::Result;

use crate::domain::environment::ProcessEnv;

// ── Value Types ───────────────────────────────────────────────────────────────

/// One invocation of the container control script.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ControlAction {
    /// `catalina start`: launch the JVM and return once it is forked.
    Start,
    /// `catalina stop`: ask a running instance to shut down.
    Stop,
    /// `catalina stop -force`: shut down, killing via the PID file if
    /// needed. Expected to fail when nothing is running.
    ForceStop,
}

impl ControlAction {
    /// Positional tokens passed to the control script.
    #[must_use]
    pub fn args(self) -> &'static [&'static str] {
        match self {
            Self::Start => &["start"],
            Self::Stop => &["stop"],
            Self::ForceStop => &["stop", "-force"],
        }
    }

    /// Human-readable step name for error messages.
    #[must_use]
    pub fn describe(self) -> &'static str {
        match self {
            Self::Start => "start",
            Self::Stop => "stop",
            Self::ForceStop => "forced stop",
        }
    }
}

// ── Control Port ──────────────────────────────────────────────────────────────

/// Abstracts the container control script so it can be mocked in tests.
///
/// The production implementation spawns the platform control executable
/// with the child's standard streams connected to the caller's terminal.
#[allow(async_fn_in_trait)]
pub trait CatalinaControl {
    /// Invoke the control script with one action and the derived
    /// environment, waiting for the child process to exit.
    ///
    /// A non-zero exit is reported through the returned [`ExitStatus`],
    /// not as an `Err`; whether that fails the overall command is the
    /// orchestrator's decision.
    ///
    /// # Errors
    ///
    /// Returns an error if the process cannot be spawned or awaited.
    async fn run(&self, action: ControlAction, env: &ProcessEnv) -> Result<ExitStatus>;
}

// ── Workspace Port ────────────────────────────────────────────────────────────

/// Abstracts the container runtime directory tree.
pub trait Workspace {
    /// Reset the mutable workspace state under `base`: delete and
    /// recreate the runtime directories, then merge `{home}/conf` into
    /// `{base}/conf` without overwriting existing files.
    ///
    /// # Errors
    ///
    /// Any filesystem error aborts the lifecycle command before a
    /// process is spawned; no partial workspace is valid.
    fn prepare(&self, home: &Path, base: &Path) -> Result<()>;

    /// Write the deployment descriptor under `base`, replacing any
    /// previous version unconditionally.
    ///
    /// # Errors
    ///
    /// Returns an error if the descriptor cannot be written.
    fn write_descriptor(&self, base: &Path, descriptor: &str) -> Result<()>;

    /// Whether `path` exists on disk (hot-reload agent resolution).
    fn exists(&self, path: &Path) -> bool;
}

// ── Log Following Port ────────────────────────────────────────────────────────

/// Abstracts tailing of the container output log.
#[allow(async_fn_in_trait)]
pub trait LogFollower {
    /// Stream newly appended lines from `log` to the caller. The
    /// production implementation only returns on error; it is otherwise
    /// ended by tool process termination.
    ///
    /// # Errors
    ///
    /// Returns an error if the log cannot be opened or read. Callers
    /// treat this as a warning, never as a lifecycle failure.
    async fn follow(&self, log: &Path) -> Result<()>;
}

// ── Progress Reporting Port ───────────────────────────────────────────────────

/// Abstracts progress reporting so services can emit events without
/// depending on the presentation layer. Sync trait, no async needed.
pub trait ProgressReporter {
    /// Emit an in-progress step message.
    fn step(&self, message: &str);
    /// Emit a success message.
    fn success(&self, message: &str);
    /// Emit a warning message.
    fn warn(&self, message: &str);
}

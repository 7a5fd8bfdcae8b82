//! Application context: unified state passed to every command handler.
//!
//! `capture_ambient` is the single designated boundary adapter reading
//! process globals; everything downstream receives the snapshot as an
//! explicit [`Ambient`] value.

use std::path::PathBuf;

use anyhow::{Context, Result};

use crate::domain::environment::Ambient;
use crate::output::{OutputContext, TerminalReporter};

/// Unified application context passed to every command handler.
pub struct AppContext {
    /// Terminal output context (colors, quiet mode).
    pub output: OutputContext,
    /// Snapshot of the ambient process state.
    pub ambient: Ambient,
}

impl AppContext {
    /// Construct an `AppContext` from top-level CLI flags.
    ///
    /// # Errors
    ///
    /// Returns an error if the working directory cannot be determined.
    pub fn new(no_color: bool, quiet: bool) -> Result<Self> {
        Ok(Self {
            output: OutputContext::new(no_color, quiet),
            ambient: capture_ambient()?,
        })
    }

    /// A progress reporter bound to this context's output settings.
    #[must_use]
    pub fn terminal_reporter(&self) -> TerminalReporter<'_> {
        TerminalReporter::new(&self.output)
    }
}

/// Capture the ambient process state once per invocation.
///
/// An empty `CATALINA_HOME` is treated the same as an unset one.
///
/// # Errors
///
/// Returns an error if the working directory cannot be determined.
pub fn capture_ambient() -> Result<Ambient> {
    let catalina_home = std::env::var_os("CATALINA_HOME")
        .map(PathBuf::from)
        .filter(|p| !p.as_os_str().is_empty());
    Ok(Ambient {
        catalina_home,
        cwd: std::env::current_dir().context("cannot determine the working directory")?,
        user_home: dirs::home_dir(),
    })
}

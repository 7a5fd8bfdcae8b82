//! Process environment derivation for container invocations.
//!
//! Pure functions only. The ambient process state is captured once at the
//! application boundary (`crate::app::capture_ambient`) and threaded
//! through as an [`Ambient`] value; nothing in this module reads globals.

use std::path::{Path, PathBuf};

use crate::domain::config::Config;
use crate::domain::error::EnvError;

/// Name of the PID file the control script is told to maintain.
pub const PID_FILE: &str = "pid";

/// Snapshot of the ambient process state relevant to the tool.
#[derive(Debug, Clone)]
pub struct Ambient {
    /// Value of `CATALINA_HOME`, when set and non-empty.
    pub catalina_home: Option<PathBuf>,
    /// Working directory of the invocation.
    pub cwd: PathBuf,
    /// The user's home directory, for `~/` classpath expansion.
    pub user_home: Option<PathBuf>,
}

impl Ambient {
    /// The container home installation.
    ///
    /// # Errors
    ///
    /// Returns [`EnvError::CatalinaHomeNotSet`] when `CATALINA_HOME` is
    /// absent. This is a fatal precondition: callers check it before any
    /// filesystem or process work.
    pub fn catalina_home(&self) -> Result<&Path, EnvError> {
        self.catalina_home.as_deref().ok_or(EnvError::CatalinaHomeNotSet)
    }
}

/// Resolve the configured `catalina_base` against the working directory.
#[must_use]
pub fn resolve_base(cfg: &Config, ambient: &Ambient) -> PathBuf {
    if cfg.catalina_base.is_absolute() {
        cfg.catalina_base.clone()
    } else {
        ambient.cwd.join(&cfg.catalina_base)
    }
}

/// Environment variable overrides for one container invocation.
///
/// Layered on the inherited process environment by the process
/// controller; owned by a single lifecycle command and never shared.
#[derive(Debug, Clone)]
pub struct ProcessEnv {
    home: PathBuf,
    base: PathBuf,
    java_opts: Option<String>,
}

impl ProcessEnv {
    /// Derive the environment for a container invocation.
    ///
    /// `JAVA_OPTS` is composed only when `attach_java_opts` is set, i.e.
    /// for invocations that start the JVM; `agent` is the resolved
    /// hot-reload agent JAR to attach, if any.
    ///
    /// # Errors
    ///
    /// Returns [`EnvError::CatalinaHomeNotSet`] when the container home
    /// installation cannot be located.
    pub fn derive(
        cfg: &Config,
        ambient: &Ambient,
        agent: Option<&Path>,
        attach_java_opts: bool,
    ) -> Result<Self, EnvError> {
        let home = ambient.catalina_home()?.to_path_buf();
        let base = resolve_base(cfg, ambient);
        let java_opts = attach_java_opts.then(|| compose_java_opts(&cfg.java_opts, agent));
        Ok(Self { home, base, java_opts })
    }

    /// The container home installation.
    #[must_use]
    pub fn home(&self) -> &Path {
        &self.home
    }

    /// The absolute runtime base directory.
    #[must_use]
    pub fn base(&self) -> &Path {
        &self.base
    }

    /// Where the control script is told to write the PID file.
    #[must_use]
    pub fn pid_file(&self) -> PathBuf {
        self.base.join(PID_FILE)
    }

    /// The container's primary output log.
    #[must_use]
    pub fn log_file(&self) -> PathBuf {
        self.base.join("logs").join("catalina.out")
    }

    /// Composed `JAVA_OPTS`, present only for process-starting invocations.
    #[must_use]
    pub fn java_opts(&self) -> Option<&str> {
        self.java_opts.as_deref()
    }

    /// Variable overrides to layer on the inherited environment.
    #[must_use]
    pub fn vars(&self) -> Vec<(&'static str, String)> {
        let mut vars = vec![
            ("CATALINA_HOME", self.home.display().to_string()),
            ("CATALINA_BASE", self.base.display().to_string()),
            ("CATALINA_PID", self.pid_file().display().to_string()),
        ];
        if let Some(opts) = &self.java_opts {
            vars.push(("JAVA_OPTS", opts.clone()));
        }
        vars
    }
}

fn compose_java_opts(user: &str, agent: Option<&Path>) -> String {
    match agent {
        Some(path) if user.is_empty() => format!("-javaagent:{}", path.display()),
        Some(path) => format!("{user} -javaagent:{}", path.display()),
        None => user.to_string(),
    }
}

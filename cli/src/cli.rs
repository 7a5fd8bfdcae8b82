//! CLI argument parsing with clap derive

use std::path::PathBuf;

use anyhow::Result;
use clap::{Args, Parser, Subcommand};

use crate::app::AppContext;
use crate::commands;
use crate::domain::config::{CompatLevel, Config, parse_compat};
use crate::infra::config::FileConfig;

/// Development-time lifecycle manager for a local Tomcat instance
#[derive(Parser)]
#[command(
    name = "tomcat-dev",
    version,
    propagate_version = true,
    subcommand_required = true,
    arg_required_else_help = true
)]
pub struct Cli {
    /// Suppress non-error output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Disable colored output (also honors the NO_COLOR variable)
    #[arg(long, global = true)]
    pub no_color: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Prepare the workspace and start Tomcat
    Start(ServeArgs),

    /// Stop a running Tomcat instance
    Stop(StopArgs),

    /// Force-stop any running instance, then start
    Restart(ServeArgs),
}

/// Arguments shared by the process-starting commands.
#[derive(Args, Default)]
pub struct ServeArgs {
    /// Static root of the web application
    #[arg(long, value_name = "PATH")]
    pub doc_base: Option<PathBuf>,

    /// Runtime directory managed by the tool
    #[arg(long, value_name = "PATH")]
    pub catalina_base: Option<PathBuf>,

    /// Tomcat compatibility level (6, 7, 8, or 9)
    #[arg(long, value_name = "LEVEL", value_parser = parse_compat)]
    pub compat: Option<CompatLevel>,

    /// Classpath entry: a directory (trailing /) or a JAR (repeatable)
    #[arg(long = "classpath", value_name = "PATH")]
    pub classpath: Vec<String>,

    /// Extra JVM options passed through JAVA_OPTS
    #[arg(
        long,
        value_name = "OPTS",
        env = "TOMCAT_DEV_JAVA_OPTS",
        allow_hyphen_values = true
    )]
    pub java_opts: Option<String>,

    /// Attach the JRebel hot-reload agent
    #[arg(long)]
    pub jrebel: bool,

    /// Tail logs/catalina.out after a successful start
    #[arg(long)]
    pub tail: bool,
}

impl ServeArgs {
    /// Merge CLI flags over the project file and built-in defaults.
    ///
    /// # Errors
    ///
    /// Returns an error if the file's compatibility level is invalid.
    pub fn resolve(self, file: FileConfig) -> Result<Config> {
        let defaults = Config::default();
        let compat = match (self.compat, file.compat) {
            (Some(level), _) => level,
            (None, Some(raw)) => raw.parse()?,
            (None, None) => defaults.compat,
        };
        let classpath = if self.classpath.is_empty() {
            file.classpath.unwrap_or_default()
        } else {
            self.classpath
        };
        Ok(Config {
            java_opts: self.java_opts.or(file.java_opts).unwrap_or(defaults.java_opts),
            catalina_base: self
                .catalina_base
                .or(file.catalina_base)
                .unwrap_or(defaults.catalina_base),
            doc_base: self.doc_base.or(file.doc_base).unwrap_or(defaults.doc_base),
            compat,
            classpath,
            jrebel: self.jrebel || file.jrebel.unwrap_or(false),
            tail: self.tail || file.tail.unwrap_or(false),
        })
    }
}

/// Arguments for the stop command. Stopping never prepares the
/// workspace, so only the base directory is relevant.
#[derive(Args, Default)]
pub struct StopArgs {
    /// Runtime directory managed by the tool
    #[arg(long, value_name = "PATH")]
    pub catalina_base: Option<PathBuf>,
}

impl StopArgs {
    /// Merge the base directory over the project file and defaults.
    #[must_use]
    pub fn resolve(self, file: FileConfig) -> Config {
        let mut cfg = Config::default();
        if let Some(base) = self.catalina_base.or(file.catalina_base) {
            cfg.catalina_base = base;
        }
        cfg
    }
}

impl Cli {
    /// Execute the CLI command.
    ///
    /// # Errors
    ///
    /// Returns an error if the command fails.
    pub async fn run(self) -> Result<()> {
        let Cli { quiet, no_color, command } = self;
        let app = AppContext::new(no_color, quiet)?;
        match command {
            Command::Start(args) => commands::start::run(args, &app).await,
            Command::Stop(args) => commands::stop::run(args, &app).await,
            Command::Restart(args) => commands::restart::run(args, &app).await,
        }
    }
}

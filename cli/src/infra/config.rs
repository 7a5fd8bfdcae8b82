//! Optional project configuration file.
//!
//! A `tomcat-dev.yaml` in the working directory supplies defaults for
//! the per-command flags; CLI-provided values always win. The file uses
//! one canonical `compat` key; historical spellings of the option are
//! rejected as unknown fields rather than silently accepted.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::Deserialize;

/// Filename looked up in the invoking working directory.
pub const CONFIG_FILE: &str = "tomcat-dev.yaml";

/// Values loadable from the project file. Every field is optional;
/// merging happens in the CLI layer.
#[derive(Debug, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct FileConfig {
    pub java_opts: Option<String>,
    pub catalina_base: Option<PathBuf>,
    pub doc_base: Option<PathBuf>,
    pub compat: Option<String>,
    pub classpath: Option<Vec<String>>,
    pub jrebel: Option<bool>,
    pub tail: Option<bool>,
}

/// Load the project file from `dir`, returning defaults when absent.
///
/// # Errors
///
/// Returns an error if the file exists but cannot be read or parsed.
pub fn load_file_config(dir: &Path) -> Result<FileConfig> {
    let path = dir.join(CONFIG_FILE);
    if !path.exists() {
        return Ok(FileConfig::default());
    }
    let content = std::fs::read_to_string(&path)
        .with_context(|| format!("cannot read {}", path.display()))?;
    serde_yaml::from_str(&content).with_context(|| format!("cannot parse {}", path.display()))
}

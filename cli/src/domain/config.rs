//! Domain types for tool configuration.
//!
//! `Config` is assembled once per invocation from CLI flags merged over
//! the optional project file and built-in defaults, and is never mutated
//! afterwards.

use std::path::PathBuf;
use std::str::FromStr;

use crate::domain::error::ConfigError;

/// Tomcat compatibility level, selecting which descriptor dialect to emit.
///
/// Levels 6 and 7 use the legacy virtual-classloader mapping; 8 and 9 use
/// the resource-set mapping introduced with the Tomcat 8 resources
/// implementation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CompatLevel {
    Tomcat6,
    Tomcat7,
    Tomcat8,
    Tomcat9,
}

impl CompatLevel {
    /// Whether this level predates the Tomcat 8 resources implementation.
    #[must_use]
    pub fn is_legacy(self) -> bool {
        matches!(self, Self::Tomcat6 | Self::Tomcat7)
    }
}

impl FromStr for CompatLevel {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "6" => Ok(Self::Tomcat6),
            "7" => Ok(Self::Tomcat7),
            "8" => Ok(Self::Tomcat8),
            "9" => Ok(Self::Tomcat9),
            other => Err(ConfigError::UnknownCompatLevel(other.to_string())),
        }
    }
}

/// Parse a compatibility level from its major-version string.
///
/// Standalone function so clap can use it as a typed value parser.
///
/// # Errors
///
/// Returns an error for anything other than `6`, `7`, `8`, or `9`.
pub fn parse_compat(s: &str) -> Result<CompatLevel, ConfigError> {
    s.parse()
}

/// Immutable per-invocation configuration.
#[derive(Debug, Clone)]
pub struct Config {
    /// Extra JVM options passed to the container through `JAVA_OPTS`.
    pub java_opts: String,
    /// The disposable runtime directory managed by the tool.
    pub catalina_base: PathBuf,
    /// Static root of the web application.
    pub doc_base: PathBuf,
    /// Descriptor dialect selector.
    pub compat: CompatLevel,
    /// Ordered classpath entries, absolute, home-relative (`~/`), or
    /// relative to the working directory.
    pub classpath: Vec<String>,
    /// Attach the JRebel hot-reload agent on start.
    pub jrebel: bool,
    /// Tail the container log after a successful start.
    pub tail: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            java_opts: String::new(),
            catalina_base: PathBuf::from(".tomcat"),
            doc_base: PathBuf::from("build/webapp"),
            compat: CompatLevel::Tomcat9,
            classpath: Vec::new(),
            jrebel: false,
            tail: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn compat_levels_parse_from_major_version() {
        assert_eq!("6".parse::<CompatLevel>().ok(), Some(CompatLevel::Tomcat6));
        assert_eq!("9".parse::<CompatLevel>().ok(), Some(CompatLevel::Tomcat9));
        assert_eq!(" 8 ".parse::<CompatLevel>().ok(), Some(CompatLevel::Tomcat8));
    }

    #[test]
    fn unknown_compat_level_is_rejected() {
        let err = "5".parse::<CompatLevel>().unwrap_err();
        assert!(err.to_string().contains('5'), "error should name the bad level: {err}");
    }

    #[test]
    fn legacy_set_is_six_and_seven() {
        assert!(CompatLevel::Tomcat6.is_legacy());
        assert!(CompatLevel::Tomcat7.is_legacy());
        assert!(!CompatLevel::Tomcat8.is_legacy());
        assert!(!CompatLevel::Tomcat9.is_legacy());
    }

    #[test]
    fn defaults_match_the_documented_surface() {
        let cfg = Config::default();
        assert_eq!(cfg.catalina_base, PathBuf::from(".tomcat"));
        assert_eq!(cfg.doc_base, PathBuf::from("build/webapp"));
        assert_eq!(cfg.compat, CompatLevel::Tomcat9);
        assert!(cfg.java_opts.is_empty());
        assert!(cfg.classpath.is_empty());
        assert!(!cfg.jrebel);
        assert!(!cfg.tail);
    }
}

//! Typed domain error enums.
//!
//! All error types implement `thiserror::Error` and convert to
//! `anyhow::Error` via the `?` operator.

use thiserror::Error;

// ── Environment errors ────────────────────────────────────────────────────────

/// Errors raised while deriving the container process environment.
#[derive(Debug, Error)]
pub enum EnvError {
    #[error("CATALINA_HOME is not set. Export it to point at a Tomcat installation.")]
    CatalinaHomeNotSet,

    #[error("cannot determine the user home directory for '~/' classpath expansion")]
    UserHomeUnknown,
}

// ── Config errors ─────────────────────────────────────────────────────────────

/// Errors related to configuration value validation.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("unknown compatibility level '{0}'\n\nValid levels: 6, 7, 8, 9")]
    UnknownCompatLevel(String),
}

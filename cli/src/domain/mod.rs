//! Domain layer: pure types and logic.
//!
//! This module has zero imports from `crate::infra`, `crate::commands`,
//! `crate::application`, `tokio`, `std::fs`, or `std::process`. All
//! functions are synchronous and take data in, returning data out.

pub mod config;
pub mod descriptor;
pub mod environment;
pub mod error;

#[allow(unused_imports)]
pub use config::{CompatLevel, Config};
#[allow(unused_imports)]
pub use environment::{Ambient, ProcessEnv};
#[allow(unused_imports)]
pub use error::{ConfigError, EnvError};

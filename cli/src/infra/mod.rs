//! Infrastructure layer: concrete implementations of application port
//! traits.
//!
//! This module contains all I/O-performing code: process execution,
//! workspace filesystem preparation, log tailing, and the project
//! configuration file.
//!
//! Imports from `crate::domain` and `crate::application::ports` are
//! allowed. Imports from `crate::commands` or `crate::output` are
//! forbidden.

pub mod catalina;
pub mod config;
pub mod tail;
pub mod workspace;

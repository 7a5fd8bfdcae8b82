//! Command implementations

pub mod restart;
pub mod start;
pub mod stop;

//! Application services: lifecycle use-cases built on port traits.

pub mod lifecycle;

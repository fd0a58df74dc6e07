//! CLI command implementations

pub mod field;
pub mod run;

//! Command implementations.

pub mod run;
pub mod strategies;
pub mod validate;

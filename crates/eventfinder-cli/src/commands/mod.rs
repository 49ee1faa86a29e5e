//! Command implementations.

pub mod config;
pub mod providers;
pub mod search;

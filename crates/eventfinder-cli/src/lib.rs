//! Command-line front end: configuration, provider wiring, output rendering.
//!
//! This crate provides the `eventfinder` command-line interface.

pub mod cli;
pub mod commands;
pub mod config;
pub mod error;
pub mod pipeline;
pub mod secret;

pub use cli::Cli;
pub use error::{ClientError, ClientResult};
pub use pipeline::{Overrides, build_orchestrator, build_registry};

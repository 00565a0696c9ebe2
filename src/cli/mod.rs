//! CLI module - argument parsing, rendering and command dispatch

pub mod args;
pub mod commands;
pub mod helpers;
pub mod render;
pub mod table;

pub use args::{Cli, Commands, EnvelopeArgs, GlobalOpts, OutputFormat, SelectionArgs};

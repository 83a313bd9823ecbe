//! Command shell over the ledger: parsing, dispatch, confirmation and rendering.

pub mod commands;
pub mod confirmation;
pub mod core;
pub mod formatters;
pub mod output;
pub mod registry;
mod shell;
pub mod shell_context;
pub mod ui;

pub use shell::run_cli;

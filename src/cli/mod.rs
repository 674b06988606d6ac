//! CLI module for the stock-pail binary

pub mod commands;
pub mod error;
pub mod output;

pub use error::CliError;

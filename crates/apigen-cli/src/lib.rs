//! apigen CLI library.
//!
//! Argument definitions, command implementations and output formatters of
//! the `apigen` binary, exposed so they can be tested directly.

pub mod cli;
pub mod commands;
pub mod formatters;
pub mod runner;

//! Command implementations for the apigen CLI.
//!
//! Each command module loads its inputs, performs the operation and formats
//! its result according to the requested output format.

pub mod completions;
pub mod generate;
pub mod profiles;

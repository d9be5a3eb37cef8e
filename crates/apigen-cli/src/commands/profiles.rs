//! Profiles command implementation.
//!
//! Lists the built-in type profiles, or prints the TOML source of one so it
//! can be copied and customized.

use crate::formatters::format_output;
use anyhow::Result;
use apigen_codegen::TypeProfile;
use apigen_core::Error;
use apigen_core::cli::{ExitCode, OutputFormat};
use serde::Serialize;

/// Summary of one built-in profile.
#[derive(Debug, Serialize, PartialEq, Eq)]
pub struct ProfileSummary {
    /// Profile name
    pub name: String,
    /// Target dialect
    pub dialect: String,
    /// Prefix applied to generated type names
    pub type_prefix: String,
}

/// Summarizes every built-in profile.
///
/// # Errors
///
/// Returns [`Error::ProfileError`] if a built-in profile fails to load.
pub fn list() -> apigen_core::Result<Vec<ProfileSummary>> {
    TypeProfile::builtin_names()
        .map(|name| {
            let profile = TypeProfile::builtin(name)?;
            Ok(ProfileSummary {
                name: profile.name,
                dialect: format!("{:?}", profile.dialect).to_lowercase(),
                type_prefix: profile.type_prefix,
            })
        })
        .collect()
}

/// Returns the TOML source of a built-in profile.
///
/// # Errors
///
/// Returns [`Error::ProfileError`] if no built-in profile has that name.
pub fn source(name: &str) -> apigen_core::Result<&'static str> {
    TypeProfile::builtin_source(name).ok_or_else(|| Error::ProfileError {
        profile: name.to_string(),
        message: "unknown built-in profile".to_string(),
    })
}

/// Runs the profiles command.
///
/// # Errors
///
/// Returns an error if `show` names no built-in profile.
pub fn run(show: Option<&str>, output_format: OutputFormat) -> Result<ExitCode> {
    match show {
        Some(name) => print!("{}", source(name)?),
        None => println!("{}", format_output(&list()?, output_format)?),
    }
    Ok(ExitCode::SUCCESS)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_list_covers_builtins() {
        let profiles = list().unwrap();
        let names: Vec<_> = profiles.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, ["objc", "javascript"]);
        assert_eq!(profiles[0].dialect, "objc");
        assert_eq!(profiles[0].type_prefix, "Dbx");
    }

    #[test]
    fn test_source_round_trips_through_loader() {
        let toml = source("javascript").unwrap();
        let profile = TypeProfile::from_toml("copy", toml).unwrap();
        assert_eq!(profile, TypeProfile::builtin("javascript").unwrap());
    }

    #[test]
    fn test_unknown_profile() {
        assert!(source("kotlin").unwrap_err().is_config_error());
    }
}

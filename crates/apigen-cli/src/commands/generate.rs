//! Generate command implementation.
//!
//! This command:
//! 1. Loads the API model, the type profile and the extra-argument rules
//! 2. Generates every artifact in memory
//! 3. Creates the output directory and writes the artifacts
//!
//! Input problems are reported as configuration errors before anything is
//! generated, and a failed generation leaves the output directory untouched.

use crate::cli::GenerateArgs;
use crate::formatters::format_output;
use anyhow::{Context, Result};
use apigen_codegen::{Artifact, CodeGenerator, ExtraArgs, GeneratedCode, GeneratorOptions, TypeProfile};
use apigen_core::cli::{ExitCode, OutputFormat};
use apigen_core::{Api, Error};
use serde::Serialize;
use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Result of a generation run.
#[derive(Debug, Serialize)]
struct GenerationResult {
    /// Profile name
    profile: String,
    /// Output directory
    output_dir: String,
    /// Number of artifacts written
    artifact_count: usize,
    /// Written artifacts
    artifacts: Vec<WrittenArtifact>,
}

#[derive(Debug, Serialize)]
struct WrittenArtifact {
    name: String,
    lines: usize,
}

/// Inputs of a run, loaded and validated.
#[derive(Debug)]
pub struct LoadedInputs {
    /// Decoded API model
    pub api: Api,
    /// Validated profile
    pub profile: TypeProfile,
    /// Generator options, extra-argument rules included
    pub options: GeneratorOptions,
}

/// Loads a profile by built-in name, or from a TOML file when no built-in
/// profile has that name.
///
/// # Errors
///
/// Returns [`Error::ProfileError`] if the profile is unknown, unreadable or
/// invalid.
pub fn load_profile(name_or_path: &str) -> apigen_core::Result<TypeProfile> {
    if TypeProfile::builtin_source(name_or_path).is_some() {
        return TypeProfile::builtin(name_or_path);
    }
    let path = Path::new(name_or_path);
    if !path.is_file() {
        return TypeProfile::builtin(name_or_path);
    }
    let source = fs::read_to_string(path).map_err(|e| Error::ProfileError {
        profile: name_or_path.to_string(),
        message: e.to_string(),
    })?;
    TypeProfile::from_toml(name_or_path, &source)
}

/// Loads the API model JSON.
///
/// # Errors
///
/// Returns [`Error::ModelError`] if the file is unreadable or not a model.
pub fn load_model(path: &Path) -> apigen_core::Result<Api> {
    let json = fs::read_to_string(path).map_err(|e| Error::ModelError {
        message: format!("cannot read {}: {e}", path.display()),
        source: None,
    })?;
    Api::from_json(&json)
}

/// Collects the raw extra-argument entries, file entries first, and
/// validates them.
///
/// # Errors
///
/// Returns [`Error::ConfigError`] naming the first malformed entry, or the
/// rules file when it cannot be read.
pub fn load_extra_args(file: Option<&Path>, flags: &[String]) -> apigen_core::Result<ExtraArgs> {
    let mut entries = Vec::new();
    if let Some(file) = file {
        let document = fs::read_to_string(file).map_err(|e| Error::ConfigError {
            entry: file.display().to_string(),
            message: e.to_string(),
        })?;
        entries.extend(ExtraArgs::entries_from_document(&document)?);
    }
    entries.extend(flags.iter().cloned());
    ExtraArgs::parse(&entries)
}

/// Loads every input named by `args`.
///
/// # Errors
///
/// Returns the first configuration error encountered.
pub fn load_inputs(args: &GenerateArgs) -> apigen_core::Result<LoadedInputs> {
    let profile = load_profile(&args.profile)?;
    let extra_args = load_extra_args(args.extra_args_file.as_deref(), &args.extra_args)?;
    let api = load_model(&args.model)?;
    debug!(
        namespaces = api.namespaces().count(),
        rules = extra_args.len(),
        "loaded inputs"
    );

    Ok(LoadedInputs {
        api,
        profile,
        options: GeneratorOptions {
            routes_filename: args.filename.clone(),
            class_name: args.class_name.clone(),
            extra_args,
            emit_declarations: !args.no_declarations,
            emit_tests: !args.no_tests,
        },
    })
}

fn write_artifact(dir: &Path, artifact: &Artifact) -> Result<PathBuf> {
    let path = dir.join(&artifact.name);
    let file = File::create(&path)
        .with_context(|| format!("failed to create {}", path.display()))?;
    let mut writer = BufWriter::new(file);
    for line in &artifact.lines {
        writeln!(writer, "{line}").with_context(|| format!("failed to write {}", path.display()))?;
    }
    writer
        .flush()
        .with_context(|| format!("failed to flush {}", path.display()))?;
    Ok(path)
}

/// Writes every artifact under `dir`, creating it first.
///
/// # Errors
///
/// Returns an error if the directory or any file cannot be written.
pub fn write_artifacts(dir: &Path, code: &GeneratedCode) -> Result<Vec<PathBuf>> {
    fs::create_dir_all(dir)
        .with_context(|| format!("failed to create output directory {}", dir.display()))?;
    code.artifacts()
        .map(|artifact| {
            let path = write_artifact(dir, artifact)?;
            debug!("Wrote {}", path.display());
            Ok(path)
        })
        .collect()
}

/// Runs the generate command.
///
/// # Errors
///
/// Returns an error if an input is invalid, generation fails, or the
/// artifacts cannot be written. Input and model errors carry an
/// [`apigen_core::Error`] so the binary can map them to exit codes.
pub fn run(args: &GenerateArgs, output_format: OutputFormat) -> Result<ExitCode> {
    let inputs = load_inputs(args)?;
    info!(
        "Generating with profile {} into {}",
        inputs.profile.name,
        args.output.display()
    );

    let generator = CodeGenerator::new(inputs.profile, inputs.options)?;
    let code = generator.generate(&inputs.api)?;
    write_artifacts(&args.output, &code)?;

    let result = GenerationResult {
        profile: generator.profile().name.clone(),
        output_dir: args.output.display().to_string(),
        artifact_count: code.artifact_count(),
        artifacts: code
            .artifacts()
            .map(|artifact| WrittenArtifact {
                name: artifact.name.clone(),
                lines: artifact.line_count(),
            })
            .collect(),
    };
    println!("{}", format_output(&result, output_format)?);

    Ok(ExitCode::SUCCESS)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_load_builtin_profile() {
        let profile = load_profile("javascript").unwrap();
        assert_eq!(profile.name, "javascript");
    }

    #[test]
    fn test_load_profile_from_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("custom.toml");
        let source = TypeProfile::builtin_source("objc")
            .unwrap()
            .replace("type_prefix = \"Dbx\"", "type_prefix = \"Acme\"");
        fs::write(&path, source).unwrap();

        let profile = load_profile(path.to_str().unwrap()).unwrap();
        assert_eq!(profile.type_prefix, "Acme");
    }

    #[test]
    fn test_unknown_profile_is_config_error() {
        let err = load_profile("kotlin").unwrap_err();
        assert!(err.is_config_error());
    }

    #[test]
    fn test_unreadable_model_is_config_error() {
        let err = load_model(Path::new("/nonexistent/api.json")).unwrap_err();
        assert!(matches!(err, Error::ModelError { .. }));
        assert!(err.is_config_error());
    }

    #[test]
    fn test_extra_args_file_then_flags() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("rules.json");
        fs::write(
            &path,
            r#"[{"match": ["auth", "user"], "arg_name": "a", "arg_type": "String"}]"#,
        )
        .unwrap();
        let flags = vec![
            r#"{"match": ["auth", "user"], "arg_name": "b", "arg_type": "String"}"#.to_string(),
            r#"{"match": ["host", "content"], "arg_name": "c", "arg_type": "String"}"#.to_string(),
        ];

        let rules = load_extra_args(Some(&path), &flags).unwrap();
        assert_eq!(rules.len(), 2);
    }

    #[test]
    fn test_malformed_extra_arg_names_entry() {
        let err = load_extra_args(None, &[r#"{"arg_name": "x"}"#.to_string()]).unwrap_err();
        let message = err.to_string();
        assert!(message.contains("No match key"));
        assert!(message.contains(r#"{"arg_name": "x"}"#));
    }

    #[test]
    fn test_write_artifacts_creates_directory() {
        let dir = TempDir::new().unwrap();
        let target = dir.path().join("nested/out");
        let mut code = GeneratedCode::new();
        code.add_artifact(Artifact::new("a.js", vec!["one".to_string(), "two".to_string()]));

        let paths = write_artifacts(&target, &code).unwrap();
        assert_eq!(paths, [target.join("a.js")]);
        assert_eq!(fs::read_to_string(target.join("a.js")).unwrap(), "one\ntwo\n");
    }
}

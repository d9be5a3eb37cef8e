//! Integration tests for the generate workflow: load, generate, write.

use apigen_cli::cli::GenerateArgs;
use apigen_cli::commands::generate;
use apigen_cli::runner::exit_code_for;
use apigen_core::cli::{ExitCode, OutputFormat};
use std::fs;
use std::path::Path;
use tempfile::TempDir;

const FIXTURE: &str = include_str!("../../apigen-codegen/tests/fixtures/files_api.json");

fn args(model: &Path, profile: &str, output: &Path) -> GenerateArgs {
    GenerateArgs {
        model: model.to_path_buf(),
        profile: profile.to_string(),
        output: output.to_path_buf(),
        filename: None,
        class_name: None,
        extra_args: Vec::new(),
        extra_args_file: None,
        no_declarations: false,
        no_tests: false,
    }
}

fn write_fixture(dir: &TempDir) -> std::path::PathBuf {
    let path = dir.path().join("api.json");
    fs::write(&path, FIXTURE).unwrap();
    path
}

#[test]
fn test_generate_objc_writes_every_artifact() {
    let dir = TempDir::new().unwrap();
    let model = write_fixture(&dir);
    let output = dir.path().join("out/objc");

    let code = generate::run(&args(&model, "objc", &output), OutputFormat::Json).unwrap();
    assert_eq!(code, ExitCode::SUCCESS);

    for name in [
        "DbxFilesObjects.h",
        "DbxFilesRoutes.h",
        "DbxUsersObjects.h",
        "DbxSerializationTests.m",
    ] {
        assert!(output.join(name).is_file(), "missing {name}");
    }
    let header = fs::read_to_string(output.join("DbxFilesObjects.h")).unwrap();
    assert!(header.ends_with("NS_ASSUME_NONNULL_END\n"));
}

#[test]
fn test_generate_javascript_with_options() {
    let dir = TempDir::new().unwrap();
    let model = write_fixture(&dir);
    let rules = dir.path().join("rules.json");
    fs::write(
        &rules,
        r#"[{"match": ["auth", "user"], "arg_name": "select_user", "arg_type": "String"}]"#,
    )
    .unwrap();
    let output = dir.path().join("js");

    let mut generate_args = args(&model, "javascript", &output);
    generate_args.filename = Some("base.js".to_string());
    generate_args.class_name = Some("Dropbox".to_string());
    generate_args.extra_args_file = Some(rules);
    generate_args.no_tests = true;

    generate::run(&generate_args, OutputFormat::Text).unwrap();

    let routes = fs::read_to_string(output.join("base.js")).unwrap();
    assert!(routes.contains(" * @function Dropbox#filesListFolder"));
    assert!(routes.contains("arg.select_user"));
    assert!(!output.join("serialization.test.js").exists());
}

#[test]
fn test_generation_is_reproducible_on_disk() {
    let dir = TempDir::new().unwrap();
    let model = write_fixture(&dir);
    let first = dir.path().join("first");
    let second = dir.path().join("second");

    generate::run(&args(&model, "objc", &first), OutputFormat::Json).unwrap();
    generate::run(&args(&model, "objc", &second), OutputFormat::Json).unwrap();

    for entry in fs::read_dir(&first).unwrap() {
        let name = entry.unwrap().file_name();
        assert_eq!(
            fs::read(first.join(&name)).unwrap(),
            fs::read(second.join(&name)).unwrap(),
            "{name:?}"
        );
    }
}

#[test]
fn test_bad_extra_arg_fails_before_writing() {
    let dir = TempDir::new().unwrap();
    let model = write_fixture(&dir);
    let output = dir.path().join("out");

    let mut generate_args = args(&model, "objc", &output);
    generate_args.extra_args = vec![r#"{"arg_name": "x"}"#.to_string()];

    let err = generate::run(&generate_args, OutputFormat::Json).unwrap_err();
    assert_eq!(exit_code_for(&err), ExitCode::INVALID_INPUT);
    assert!(err.to_string().contains("No match key"));
    assert!(!output.exists());
}

#[test]
fn test_model_error_leaves_no_output() {
    let dir = TempDir::new().unwrap();
    let model = dir.path().join("api.json");
    fs::write(
        &model,
        r#"{
          "namespaces": [{
            "name": "users",
            "data_types": [{
              "kind": "struct",
              "name": "Account",
              "fields": [{"name": "email", "type": {"type": "primitive", "kind": "string"}}],
              "examples": {"default": {"value": {}}}
            }],
            "routes": []
          }]
        }"#,
    )
    .unwrap();
    let output = dir.path().join("out");

    let err = generate::run(&args(&model, "javascript", &output), OutputFormat::Json).unwrap_err();
    assert_eq!(exit_code_for(&err), ExitCode::ERROR);
    assert!(err.to_string().contains("email"));
    assert!(!output.exists());
}

#[test]
fn test_unknown_profile_is_invalid_input() {
    let dir = TempDir::new().unwrap();
    let model = write_fixture(&dir);

    let err = generate::run(
        &args(&model, "kotlin", &dir.path().join("out")),
        OutputFormat::Json,
    )
    .unwrap_err();
    assert_eq!(exit_code_for(&err), ExitCode::INVALID_INPUT);
}

#[test]
fn test_malformed_model_is_invalid_input() {
    let dir = TempDir::new().unwrap();
    let model = dir.path().join("api.json");
    fs::write(&model, "{\"namespaces\": 3}").unwrap();

    let err = generate::run(
        &args(&model, "objc", &dir.path().join("out")),
        OutputFormat::Json,
    )
    .unwrap_err();
    assert_eq!(exit_code_for(&err), ExitCode::INVALID_INPUT);
}

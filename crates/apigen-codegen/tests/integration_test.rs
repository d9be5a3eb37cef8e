//! End-to-end generation over the fixture model with both built-in profiles.

use apigen_codegen::{CodeGenerator, ExtraArgs, GeneratedCode, GeneratorOptions, TypeProfile};
use apigen_core::Api;

const FIXTURE: &str = include_str!("fixtures/files_api.json");

fn generate(profile: &str, options: GeneratorOptions) -> GeneratedCode {
    let api = Api::from_json(FIXTURE).unwrap();
    let generator = CodeGenerator::new(TypeProfile::builtin(profile).unwrap(), options).unwrap();
    generator.generate(&api).unwrap()
}

fn contents(code: &GeneratedCode, name: &str) -> String {
    code.artifact(name)
        .unwrap_or_else(|| panic!("missing artifact {name}"))
        .contents()
}

// ============================================================================
// Objective-C
// ============================================================================

#[test]
fn test_objc_artifact_set() {
    let code = generate("objc", GeneratorOptions::default());
    let names: Vec<_> = code.artifacts().map(|a| a.name.as_str()).collect();
    assert_eq!(
        names,
        [
            "DbxFilesObjects.h",
            "DbxFilesRoutes.h",
            "DbxUsersObjects.h",
            "DbxSerializationTests.m",
        ]
    );
}

#[test]
fn test_objc_objects_header() {
    let code = generate("objc", GeneratorOptions::default());
    let header = contents(&code, "DbxFilesObjects.h");

    assert!(header.contains("#import \"DbxUsersObjects.h\""));
    assert!(header.contains("@class DbxFilesWriteMode;"));

    let base = header.find("@interface DbxFilesMetadata : NSObject").unwrap();
    let file = header
        .find("@interface DbxFilesFileMetadata : DbxFilesMetadata")
        .unwrap();
    assert!(base < file, "parent must be declared before its subtype");

    assert!(header.contains("@property (nonatomic, readonly, copy) NSString * _Nonnull name;"));
    assert!(header.contains("@property (nonatomic, readonly, copy) NSString * _Nullable pathLower;"));
    assert!(header.contains("@property (nonatomic, readonly) NSArray<NSString *> * _Nullable tags;"));
    assert!(header.contains("/// Metadata for a file or folder. See path_lower."));
    assert!(header.contains(
        "- (instancetype)initWithName:(NSString * _Nonnull)name pathLower:(NSString * _Nullable)pathLower size:(NSNumber * _Nonnull)size clientModified:(NSDate * _Nonnull)clientModified tags:(NSArray<NSString *> * _Nullable)tags;"
    ));
    assert!(header.contains("typedef NS_ENUM(NSInteger, DbxFilesWriteModeTag) {"));
    assert!(header.contains("    DbxFilesWriteModeUpdate,"));
    assert!(header.contains("- (instancetype)initWithUpdate:(NSString * _Nonnull)update;"));
    assert!(header.contains("@interface DbxFilesMetadataSerializer : NSObject"));
    assert!(header.trim_end().ends_with("NS_ASSUME_NONNULL_END"));
}

#[test]
fn test_objc_routes_header() {
    let code = generate("objc", GeneratorOptions::default());
    let routes = contents(&code, "DbxFilesRoutes.h");

    assert!(routes.contains("@interface DbxFilesRoutes : NSObject"));
    assert!(routes.contains(
        "- (DbxRpcTask *)listFolder:(NSString * _Nonnull)path recursive:(NSNumber * _Nullable)recursive;"
    ));
    assert!(routes.contains("/// Starts returning the contents of a folder at path."));
    assert!(routes.contains("/// @param path (NSString * _Nonnull) The path to the folder."));
    assert!(routes.contains("- (DbxRpcTask *)getTemporaryLink:(NSString * _Nonnull)arg __deprecated;"));
    assert!(routes.contains("/// @deprecated"));
    assert!(routes.contains("- (DbxRpcTask *)getSpaceUsage;"));
}

#[test]
fn test_objc_round_trip_tests() {
    let code = generate("objc", GeneratorOptions::default());
    let tests = contents(&code, "DbxSerializationTests.m");

    assert!(tests.contains("- (void)checkError:(id)originalObj outputObj:(id)outputObj {"));
    assert!(tests.contains("- (void)testSerializeFilesFileMetadataDefault {"));
    assert!(tests.contains("    NSArray<NSString *> *tags = @[@\"work\"];"));
    assert!(tests.contains(
        "    NSDate *clientModified = [DbxNSDateSerializer deserialize:@\"2015-05-12T15:50:38Z\" dateFormat:@\"%Y-%m-%dT%H:%M:%SZ\"];"
    ));
    assert!(tests.contains(
        "    DbxFilesFileMetadata *obj = [[DbxFilesFileMetadata alloc] initWithName:@\"a.txt\" pathLower:nil size:@(12) clientModified:clientModified tags:tags];"
    ));
    assert!(tests.contains(
        "    NSData *serializedData = [DbxTransportClient jsonDataWithDictionary:[DbxFilesFileMetadataSerializer serialize:obj]];"
    ));
    assert!(tests.contains(
        "    DbxFilesFileMetadata *outputObj = [DbxFilesFileMetadataSerializer deserialize:jsonObj];"
    ));
    assert!(tests.contains("    [self checkError:obj outputObj:outputObj];"));
    assert!(tests.trim_end().ends_with("@end"));
}

// ============================================================================
// JavaScript
// ============================================================================

#[test]
fn test_javascript_artifact_set_and_filename() {
    let code = generate(
        "javascript",
        GeneratorOptions {
            routes_filename: Some("base.js".to_string()),
            ..GeneratorOptions::default()
        },
    );
    let names: Vec<_> = code.artifacts().map(|a| a.name.as_str()).collect();
    assert_eq!(names, ["base.js", "serialization.test.js"]);
}

#[test]
fn test_javascript_routes_module() {
    let extra_args = ExtraArgs::parse([
        r#"{"match": ["auth", "user"], "arg_name": "select_user", "arg_type": "String", "arg_docstring": "Team member to act as."}"#,
    ])
    .unwrap();
    let code = generate(
        "javascript",
        GeneratorOptions {
            class_name: Some("Dropbox".to_string()),
            extra_args,
            ..GeneratorOptions::default()
        },
    );
    let routes = contents(&code, "routes.js");

    assert!(routes.starts_with("// Auto-generated by apigen, do not modify.\nvar routes = {};\n"));
    assert!(routes.contains(" * Starts returning the contents of a folder at path."));
    assert!(routes.contains(" * @function Dropbox#filesListFolder"));
    assert!(routes.contains(" * @arg {Files.ListFolderArg} arg - The request parameters."));
    assert!(routes.contains(" * @arg {String} arg.select_user - Team member to act as."));
    assert!(routes.contains(" * @arg {string} arg.path - The path to the folder."));
    assert!(routes.contains(" * @arg {Boolean|null} arg.recursive"));
    assert!(routes.contains(" * @returns {Promise.<Files.ListFolderResult, Error.<void>>}"));
    assert!(routes.contains("routes.filesListFolder = function (arg) {"));
    assert!(routes.contains("  return this.request('files/list_folder', arg, 'api', 'rpc');"));

    let extra = routes.find("arg.select_user").unwrap();
    let field = routes.find("arg.path").unwrap();
    assert!(extra < field, "extra arguments precede argument fields");

    assert!(routes.contains(" * @deprecated"));
    assert!(routes.contains("  return this.request('files/get_temporary_link', arg, 'api', null);"));
    assert!(routes.contains("routes.filesGetSpaceUsage = function () {"));
    assert!(routes.contains("  return this.request('files/get_space_usage', null, null, null);"));
    assert!(routes.trim_end().ends_with("module.exports = routes;"));
}

#[test]
fn test_extra_args_only_document_struct_routes() {
    let extra_args = ExtraArgs::parse([
        r#"{"match": ["host", "api"], "arg_name": "path_root", "arg_type": "String"}"#,
    ])
    .unwrap();
    let code = generate(
        "javascript",
        GeneratorOptions {
            extra_args,
            ..GeneratorOptions::default()
        },
    );
    let routes = contents(&code, "routes.js");
    assert_eq!(routes.matches("arg.path_root").count(), 1);
}

#[test]
fn test_javascript_round_trip_tests() {
    let code = generate("javascript", GeneratorOptions::default());
    let tests = contents(&code, "serialization.test.js");

    assert!(tests.contains("const assert = require('node:assert');"));
    assert!(tests.contains("test('testSerializeUsersAccountDefault', () => {"));
    assert!(tests.contains(
        "  const obj = {account_id: 'dbid:AAH4f99', name: 'Ann', age: 0};"
    ));
    assert!(tests.contains(
        "  const obj = {'.tag': 'folder', name: 'Photos', path_lower: null, id: 'id:a4ayc'};"
    ));
    assert!(tests.contains(
        "  const obj = {path: '/Homework/math/Matrices.txt', mode: {'.tag': 'update', update: 'a1c10ce0dd78'}, owner: null};"
    ));
    assert!(tests.contains("  assert.deepStrictEqual(outputObj, obj);"));
}

// ============================================================================
// Run properties
// ============================================================================

#[test]
fn test_generation_is_deterministic() {
    for profile in ["objc", "javascript"] {
        let first = generate(profile, GeneratorOptions::default());
        let second = generate(profile, GeneratorOptions::default());
        assert_eq!(first, second, "profile {profile}");
    }
}

#[test]
fn test_declarations_only() {
    let code = generate(
        "objc",
        GeneratorOptions {
            emit_tests: false,
            ..GeneratorOptions::default()
        },
    );
    assert!(code.artifact("DbxSerializationTests.m").is_none());
    assert_eq!(code.artifact_count(), 3);
}

//! Round-trip test generation scenarios: one small model per behavior.

use apigen_codegen::{CodeGenerator, GeneratorOptions, TypeProfile};
use apigen_core::{
    AbstractType, Api, Error, Example, ExampleObject, ExampleValue, Field, Namespace,
    PrimitiveKind, Struct, TypeRef,
};

fn tests_only() -> GeneratorOptions {
    GeneratorOptions {
        emit_declarations: false,
        ..GeneratorOptions::default()
    }
}

fn run(profile: &str, api: &Api) -> apigen_core::Result<String> {
    let generator = CodeGenerator::new(TypeProfile::builtin(profile).unwrap(), tests_only())?;
    let code = generator.generate(api)?;
    let artifact = code.artifacts().next().unwrap();
    Ok(artifact.contents())
}

fn single(data_types: Vec<Struct>) -> Api {
    let namespace = data_types
        .into_iter()
        .fold(Namespace::new("files"), Namespace::with_data_type);
    Api::new(vec![namespace], Vec::new())
}

fn uint64() -> AbstractType {
    AbstractType::primitive(PrimitiveKind::UInt64)
}

fn metadata_hierarchy(example: ExampleObject) -> Api {
    single(vec![
        Struct::new("files", "Metadata")
            .with_field(Field::new("name", AbstractType::string()))
            .with_subtype("file", TypeRef::new("files", "FileMetadata"))
            .with_subtype("folder", TypeRef::new("files", "FolderMetadata"))
            .with_example("default", Example::new(example)),
        Struct::new("files", "FileMetadata")
            .with_parent(TypeRef::new("files", "Metadata"))
            .with_field(Field::new("size", uint64())),
        Struct::new("files", "FolderMetadata").with_parent(TypeRef::new("files", "Metadata")),
    ])
}

#[test]
fn test_primitive_only_struct() {
    let api = single(vec![
        Struct::new("files", "Dimensions")
            .with_field(Field::new("width", uint64()))
            .with_field(Field::new("height", uint64()))
            .with_field(Field::new(
                "ratio",
                AbstractType::primitive(PrimitiveKind::Float64),
            ))
            .with_example(
                "hd",
                Example::new(
                    ExampleObject::new()
                        .with("width", 1280_i64)
                        .with("height", 720_i64)
                        .with("ratio", 1.5),
                ),
            ),
    ]);

    let objc = run("objc", &api).unwrap();
    assert!(objc.contains("- (void)testSerializeFilesDimensionsHd {"));
    assert!(objc.contains(
        "    DbxFilesDimensions *obj = [[DbxFilesDimensions alloc] initWithWidth:@(1280) height:@(720) ratio:@(1.5)];"
    ));

    let js = run("javascript", &api).unwrap();
    assert!(js.contains("  const obj = {width: 1280, height: 720, ratio: 1.5};"));
}

#[test]
fn test_omitted_field_takes_default() {
    let api = single(vec![
        Struct::new("files", "Account")
            .with_field(Field::new("name", AbstractType::string()))
            .with_field(
                Field::new("age", AbstractType::primitive(PrimitiveKind::Int32)).with_default(0),
            )
            .with_example(
                "default",
                Example::new(ExampleObject::new().with("name", "Ann")),
            ),
    ]);

    let objc = run("objc", &api).unwrap();
    assert!(objc.contains("[[DbxFilesAccount alloc] initWithName:@\"Ann\" age:@(0)]"));

    let js = run("javascript", &api).unwrap();
    assert!(js.contains("{name: 'Ann', age: 0}"));
}

#[test]
fn test_list_of_structs_is_bound_before_construction() {
    let api = single(vec![
        Struct::new("files", "Entry")
            .with_field(Field::new("name", AbstractType::string())),
        Struct::new("files", "Listing")
            .with_field(Field::new(
                "entries",
                AbstractType::list(AbstractType::user_defined("files", "Entry")),
            ))
            .with_example(
                "default",
                Example::new(ExampleObject::new().with(
                    "entries",
                    vec![
                        ExampleValue::from(ExampleObject::new().with("name", "a")),
                        ExampleValue::from(ExampleObject::new().with("name", "b")),
                    ],
                )),
            ),
    ]);

    let objc = run("objc", &api).unwrap();
    assert!(objc.contains(
        "    NSArray<DbxFilesEntry *> *entries = @[[[DbxFilesEntry alloc] initWithName:@\"a\"], [[DbxFilesEntry alloc] initWithName:@\"b\"]];"
    ));
    assert!(objc.contains(
        "    DbxFilesListing *obj = [[DbxFilesListing alloc] initWithEntries:entries];"
    ));

    let js = run("javascript", &api).unwrap();
    assert!(js.contains("  const obj = {entries: [{name: 'a'}, {name: 'b'}]};"));
}

#[test]
fn test_subtype_tag_selects_concrete_class() {
    let api = metadata_hierarchy(
        ExampleObject::new()
            .with(".tag", "file")
            .with("name", "a.txt")
            .with("size", 3_i64),
    );

    let objc = run("objc", &api).unwrap();
    assert!(objc.contains("- (void)testSerializeFilesMetadataDefault {"));
    assert!(objc.contains(
        "    DbxFilesFileMetadata *obj = [[DbxFilesFileMetadata alloc] initWithName:@\"a.txt\" size:@(3)];"
    ));
    assert!(objc.contains("[DbxFilesFileMetadataSerializer deserialize:jsonObj]"));

    let js = run("javascript", &api).unwrap();
    assert!(js.contains("  const obj = {'.tag': 'file', name: 'a.txt', size: 3};"));
}

#[test]
fn test_missing_subtype_tag_fails() {
    let api = metadata_hierarchy(ExampleObject::new().with("name", "a.txt"));
    let err = run("objc", &api).unwrap_err();
    assert!(
        matches!(&err, Error::MissingSubtypeTag { data_type, example, .. }
            if data_type == "Metadata" && example == "default"),
        "{err}"
    );
}

#[test]
fn test_unknown_subtype_tag_fails() {
    let api = metadata_hierarchy(
        ExampleObject::new()
            .with(".tag", "symlink")
            .with("name", "a.txt"),
    );
    let err = run("javascript", &api).unwrap_err();
    assert!(
        matches!(&err, Error::UnknownSubtypeTag { tag, .. } if tag == "symlink"),
        "{err}"
    );
}

#[test]
fn test_nullable_field_set_to_null() {
    let api = single(vec![
        Struct::new("files", "Entry")
            .with_field(Field::new("name", AbstractType::string()))
            .with_field(Field::new("rev", AbstractType::string().nullable()))
            .with_example(
                "explicit",
                Example::new(
                    ExampleObject::new()
                        .with("name", "a")
                        .with("rev", ExampleValue::Null),
                ),
            )
            .with_example(
                "absent",
                Example::new(ExampleObject::new().with("name", "a")),
            ),
    ]);

    let objc = run("objc", &api).unwrap();
    assert_eq!(
        objc.matches("[[DbxFilesEntry alloc] initWithName:@\"a\" rev:nil]")
            .count(),
        2
    );
    assert!(objc.contains("testSerializeFilesEntryExplicit"));
    assert!(objc.contains("testSerializeFilesEntryAbsent"));

    let js = run("javascript", &api).unwrap();
    assert_eq!(js.matches("{name: 'a', rev: null}").count(), 2);
}

#[test]
fn test_null_for_required_field_fails() {
    let api = single(vec![
        Struct::new("files", "Entry")
            .with_field(Field::new("name", AbstractType::string()))
            .with_example(
                "default",
                Example::new(ExampleObject::new().with("name", ExampleValue::Null)),
            ),
    ]);
    let err = run("objc", &api).unwrap_err();
    assert!(matches!(err, Error::InvalidExampleValue { .. }), "{err}");
}

#[test]
fn test_example_key_order_does_not_matter() {
    let build = |example: ExampleObject| {
        single(vec![
            Struct::new("files", "Arg")
                .with_field(Field::new("path", AbstractType::string()))
                .with_field(Field::new(
                    "recursive",
                    AbstractType::primitive(PrimitiveKind::Boolean),
                ))
                .with_example("default", Example::new(example)),
        ])
    };
    let forward = build(
        ExampleObject::new()
            .with("path", "/a")
            .with("recursive", true),
    );
    let reversed = build(
        ExampleObject::new()
            .with("recursive", true)
            .with("path", "/a"),
    );

    for profile in ["objc", "javascript"] {
        assert_eq!(run(profile, &forward).unwrap(), run(profile, &reversed).unwrap());
    }
    assert!(
        run("objc", &forward)
            .unwrap()
            .contains("[[DbxFilesArg alloc] initWithPath:@\"/a\" recursive:@YES]")
    );
}

#[test]
fn test_binding_names_avoid_test_locals() {
    let api = single(vec![
        Struct::new("files", "Wrapper")
            .with_field(Field::new(
                "obj",
                AbstractType::list(AbstractType::string()),
            ))
            .with_example(
                "default",
                Example::new(
                    ExampleObject::new().with("obj", vec![ExampleValue::from("x")]),
                ),
            ),
    ]);

    let objc = run("objc", &api).unwrap();
    assert!(objc.contains("    NSArray<NSString *> *obj_ = @[@\"x\"];"));
    assert!(objc.contains("initWithObj:obj_]"));
}

#[test]
fn test_struct_without_examples_emits_no_test() {
    let api = single(vec![
        Struct::new("files", "Entry").with_field(Field::new("name", AbstractType::string())),
    ]);

    let objc = run("objc", &api).unwrap();
    assert!(!objc.contains("testSerialize"));
    assert!(objc.contains("#pragma mark - `files` tests"));
}

fn quota_document(allocated: &str, used: &str) -> Api {
    Api::from_json(&format!(
        r#"{{"namespaces": [{{"name": "files", "data_types": [{{
            "kind": "struct",
            "name": "Quota",
            "fields": [
                {{"name": "allocated", "type": {{"type": "primitive", "kind": "uint64"}}}},
                {{"name": "used", "type": {{"type": "primitive", "kind": "int64"}}}}
            ],
            "examples": {{"big": {{"value": {{"allocated": {allocated}, "used": {used}}}}}}}
        }}]}}]}}"#
    ))
    .unwrap()
}

#[test]
fn test_integer_extremes_keep_full_precision() {
    let api = quota_document("18446744073709551615", "-9223372036854775808");

    let objc = run("objc", &api).unwrap();
    assert!(objc.contains(
        "[[DbxFilesQuota alloc] initWithAllocated:@(18446744073709551615) used:@(-9223372036854775808)]"
    ));

    let js = run("javascript", &api).unwrap();
    assert!(js.contains("{allocated: 18446744073709551615, used: -9223372036854775808}"));
}

#[test]
fn test_integral_float_is_accepted_for_integer_fields() {
    let api = quota_document("1024.0", "-3");
    let js = run("javascript", &api).unwrap();
    assert!(js.contains("{allocated: 1024, used: -3}"));
}

#[test]
fn test_out_of_range_integers_fail() {
    for (allocated, used) in [("-1", "0"), ("0", "18446744073709551615"), ("0.5", "0")] {
        let err = run("objc", &quota_document(allocated, used)).unwrap_err();
        assert!(matches!(err, Error::InvalidExampleValue { .. }), "{err}");
    }
}

#[test]
fn test_example_labels_that_format_alike_get_distinct_tests() {
    let api = single(vec![
        Struct::new("files", "Quota")
            .with_field(Field::new("used", uint64()))
            .with_example("foo bar", Example::new(ExampleObject::new().with("used", 1_i64)))
            .with_example("foo_bar", Example::new(ExampleObject::new().with("used", 2_i64)))
            .with_example("fooBar", Example::new(ExampleObject::new().with("used", 3_i64))),
    ]);

    let objc = run("objc", &api).unwrap();
    assert_eq!(objc.matches("- (void)testSerializeFilesQuotaFooBar {").count(), 1);
    assert_eq!(objc.matches("- (void)testSerializeFilesQuotaFooBar_ {").count(), 1);
    assert_eq!(objc.matches("- (void)testSerializeFilesQuotaFooBar__ {").count(), 1);

    let js = run("javascript", &api).unwrap();
    assert!(js.contains("test('testSerializeFilesQuotaFooBar__', () => {"));
}

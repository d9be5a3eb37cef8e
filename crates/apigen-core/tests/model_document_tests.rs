//! Decoding of complete model documents.

use apigen_core::{AbstractType, Api, DataType, ExampleValue, PrimitiveKind, TypeRef};

const DOCUMENT: &str = r#"{
  "route_schema": ["host", "style"],
  "namespaces": [
    {
      "name": "files",
      "doc": "File operations",
      "data_types": [
        {
          "kind": "struct",
          "name": "Metadata",
          "fields": [
            {"name": "name", "type": {"type": "primitive", "kind": "string"}},
            {"name": "path_lower", "type": {"type": "nullable", "inner": {"type": "primitive", "kind": "string"}}}
          ],
          "subtypes": [
            {"tag": "file", "type": {"namespace": "files", "name": "FileMetadata"}}
          ]
        },
        {
          "kind": "struct",
          "name": "FileMetadata",
          "parent": {"namespace": "files", "name": "Metadata"},
          "fields": [
            {"name": "size", "type": {"type": "primitive", "kind": "uint64"}},
            {"name": "tags", "type": {"type": "list", "element": {"type": "primitive", "kind": "string"}}, "default": []}
          ],
          "examples": {
            "default": {"text": "A file", "value": {"name": "a.txt", "size": 12}}
          }
        }
      ],
      "routes": []
    }
  ]
}"#;

#[test]
fn test_document_round_trips_field_order_and_examples() {
    let api = Api::from_json(DOCUMENT).unwrap();
    let file = api
        .lookup_struct(&TypeRef::new("files", "FileMetadata"))
        .unwrap();

    let fields: Vec<_> = api
        .all_fields(file)
        .unwrap()
        .iter()
        .map(|f| f.name.clone())
        .collect();
    assert_eq!(fields, ["name", "path_lower", "size", "tags"]);

    let example = &file.examples["default"];
    assert_eq!(example.text.as_deref(), Some("A file"));
    assert_eq!(example.value.get("size"), Some(&ExampleValue::Integer(12)));
    assert_eq!(file.fields[1].default, Some(ExampleValue::List(Vec::new())));
}

#[test]
fn test_nullable_field_shape() {
    let api = Api::from_json(DOCUMENT).unwrap();
    let DataType::Struct(metadata) = api.lookup(&TypeRef::new("files", "Metadata")).unwrap() else {
        panic!("Metadata should be a struct");
    };
    assert!(metadata.has_enumerated_subtypes());
    assert_eq!(
        metadata.fields[1].data_type,
        AbstractType::primitive(PrimitiveKind::String).nullable()
    );
}

#[test]
fn test_namespace_order_and_schema() {
    let api = Api::from_json(DOCUMENT).unwrap();
    let names: Vec<_> = api.namespaces().map(|ns| ns.name.as_str()).collect();
    assert_eq!(names, ["files"]);
    assert_eq!(api.route_schema(), ["host", "style"]);
    assert_eq!(api.namespace("files").unwrap().structs().count(), 2);
}

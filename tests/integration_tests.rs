use kdl_parse::{
    from_reader, parse, parse_with_options, to_string, BuiltinAnnotation, Document, FieldKind,
    Identifier, KdlString, KdlVersion, Keyword, Number, NumberValue, ParseOptions, Radix,
    TypeAnnotation, ValueKind,
};
use num_bigint::BigInt;

const CARGO_LIKE: &str = r##"
// A package manifest
package {
    name my-pkg
    version "1.2.3"
    authors "Alice <a@example.com>" "Bob"
    /- license MIT
    dependencies {
        serde "1.0" features=derive optional=#false
        tokio "1" features="full" \
            default-features=#false
    }
}

scripts {
    build #"cargo build --release "$@""#
    test """
        cargo test
        cargo clippy
        """
}
"##;

#[test]
fn test_manifest_navigation() {
    let doc = parse(CARGO_LIKE).unwrap();
    assert_eq!(doc.active_nodes().count(), 2);

    let package = doc.get("package").unwrap().children().unwrap();
    assert_eq!(
        package.get("name").unwrap().arguments().next().and_then(|v| v.as_str()).as_deref(),
        Some("my-pkg")
    );
    let authors: Vec<String> = package
        .get("authors")
        .unwrap()
        .arguments()
        .filter_map(|v| v.as_str().map(|s| s.into_owned()))
        .collect();
    assert_eq!(authors, vec!["Alice <a@example.com>", "Bob"]);

    // The slashdashed node is kept but not returned by lookups
    assert!(package.get("license").is_none());
    assert!(package.nodes().iter().any(|n| n.name().value() == "license"));

    let deps = package.get("dependencies").unwrap().children().unwrap();
    let tokio = deps.get("tokio").unwrap();
    assert_eq!(tokio.get("default-features").and_then(|v| v.as_bool()), Some(false));
    assert_eq!(tokio.get("features").and_then(|v| v.as_str()).as_deref(), Some("full"));
}

#[test]
fn test_manifest_strings() {
    let doc = parse(CARGO_LIKE).unwrap();
    let scripts = doc.get("scripts").unwrap().children().unwrap();

    let build = scripts.get("build").unwrap().arguments().next().unwrap();
    assert_eq!(
        build.as_kdl_string().map(KdlString::value).as_deref(),
        Some(r#"cargo build --release "$@""#)
    );

    let test = scripts.get("test").unwrap().arguments().next().unwrap();
    let test = test.as_kdl_string().unwrap();
    assert!(test.is_multiline());
    assert_eq!(
        test.dedented().as_deref(),
        Some("cargo test\ncargo clippy")
    );
}

#[test]
fn test_manifest_roundtrip() {
    let doc = parse(CARGO_LIKE).unwrap();
    let text = to_string(&doc);
    assert_eq!(parse(&text).unwrap(), doc);
    assert!(!text.contains("// A package manifest"));
    assert!(text.contains("/-license MIT"));
}

#[test]
fn test_annotated_property_values() {
    let doc = parse("package name=\"pkg-3\" id=(u32)3 size 0x3_FF 1_000.5e-3 {\n}\n").unwrap();
    let package = &doc.nodes()[0];
    let id = package.get("id").unwrap();
    assert_eq!(id.annotation().and_then(TypeAnnotation::builtin), Some(BuiltinAnnotation::U32));
    assert_eq!(package.arguments().count(), 3);

    // The annotation belongs to the value, not the key
    let err = parse("package (u32)id=3\n").unwrap_err();
    assert_eq!(err.kind(), kdl_parse::ErrorKind::MissingTerminator);
}

#[test]
fn test_number_forms() {
    let doc = parse("n 0x1_F 0x1F 0o777 0b1010 -12 +3 1.5e-3 1_000_000 12345678901234567890123\n")
        .unwrap();
    let numbers: Vec<&Number> = doc.nodes()[0]
        .arguments()
        .filter_map(|v| v.as_number())
        .collect();
    assert_eq!(numbers.len(), 9);
    assert_eq!(numbers[0].value(), numbers[1].value());
    assert_eq!(numbers[0].raw(), "0x1_F");
    assert_eq!(numbers[2].radix(), Radix::Octal);
    assert_eq!(numbers[2].as_i64(), Some(511));
    assert_eq!(numbers[3].as_i64(), Some(10));
    assert_eq!(numbers[4].as_i64(), Some(-12));
    assert_eq!(numbers[5].as_i64(), Some(3));
    assert_eq!(numbers[6].value(), &NumberValue::Float(0.0015));
    assert_eq!(numbers[7].as_i64(), Some(1_000_000));
    assert_eq!(
        numbers[8].value(),
        &NumberValue::Integer("12345678901234567890123".parse::<BigInt>().unwrap())
    );
}

#[test]
fn test_keywords_and_identifier_values() {
    let doc = parse("n #true #false #null #inf #-inf #nan bare-word true\n").unwrap();
    let kinds: Vec<&ValueKind> = doc.nodes()[0].arguments().map(|v| v.kind()).collect();
    assert_eq!(kinds[0], &ValueKind::Keyword(Keyword::True));
    assert_eq!(kinds[2], &ValueKind::Keyword(Keyword::Null));
    assert_eq!(kinds[4], &ValueKind::Keyword(Keyword::NegInf));
    assert_eq!(
        kinds[6],
        &ValueKind::Identifier(Identifier::Bare("bare-word".into()))
    );
    // Without '#' this is an ordinary identifier
    assert_eq!(kinds[7], &ValueKind::Identifier(Identifier::Bare("true".into())));
}

#[test]
fn test_duplicate_properties_are_all_kept() {
    let doc = parse("n a=1 a=2 b=3 a=4\n").unwrap();
    let node = &doc.nodes()[0];
    assert_eq!(node.properties().count(), 4);
    let map = node.property_map();
    assert_eq!(map.keys().collect::<Vec<_>>(), vec!["a", "b"]);
    assert_eq!(map.get("a").and_then(|v| v.as_number()).and_then(Number::as_i64), Some(4));
}

#[test]
fn test_interleaved_fields_keep_order() {
    let doc = parse("n 1 a=2 3 /-b=4 5\n").unwrap();
    let shape: Vec<String> = doc.nodes()[0]
        .fields()
        .iter()
        .map(|f| match f.kind() {
            FieldKind::Property { key, .. } if f.is_slashdashed() => format!("-{}", key.value()),
            FieldKind::Property { key, .. } => key.value().into_owned(),
            FieldKind::Argument(v) => v.to_string(),
        })
        .collect();
    assert_eq!(shape, vec!["1", "a", "3", "-b", "5"]);
}

#[test]
fn test_dialect_tables() {
    let v2 = parse("n (irl)a (iri)b (i128)c\n").unwrap();
    let builtins: Vec<Option<BuiltinAnnotation>> = v2.nodes()[0]
        .arguments()
        .map(|v| v.annotation().and_then(TypeAnnotation::builtin))
        .collect();
    assert_eq!(
        builtins,
        vec![Some(BuiltinAnnotation::Irl), None, Some(BuiltinAnnotation::I128)]
    );

    let v1 = parse("/- kdl-version 1\nn (irl)a (iri)b (i128)c\n").unwrap();
    let builtins: Vec<Option<BuiltinAnnotation>> = v1.nodes()[0]
        .arguments()
        .map(|v| v.annotation().and_then(TypeAnnotation::builtin))
        .collect();
    assert_eq!(builtins, vec![None, Some(BuiltinAnnotation::Iri), None]);
}

#[test]
fn test_quoted_annotation_is_never_builtin() {
    let doc = parse("(\"u8\")n\n").unwrap();
    assert!(matches!(
        doc.nodes()[0].annotation(),
        Some(TypeAnnotation::Identifier(Identifier::String(_)))
    ));
}

#[test]
fn test_default_version_option() {
    let options = ParseOptions::new().with_default_version(KdlVersion::V1);
    let doc = parse_with_options("(iri)n\n", options).unwrap();
    assert_eq!(doc.version(), None);
    assert_eq!(
        doc.nodes()[0].annotation().and_then(TypeAnnotation::builtin),
        Some(BuiltinAnnotation::Iri)
    );

    // A marker overrides the option
    let doc = parse_with_options("/- kdl-version 2\n(iri)n\n", options).unwrap();
    assert_eq!(doc.nodes()[0].annotation().and_then(TypeAnnotation::builtin), None);
}

#[test]
fn test_nested_comments_and_esclines() {
    let doc = parse("a /* one /* two */ still */ 1 \\ // continue\n  2\nb\n").unwrap();
    assert_eq!(doc.nodes().len(), 2);
    assert_eq!(doc.nodes()[0].arguments().count(), 2);
}

#[test]
fn test_crlf_and_unicode_newlines() {
    let doc = parse("a\r\nb\u{2028}c\u{85}d\u{C}e").unwrap();
    let names: Vec<_> = doc.nodes().iter().map(|n| n.name().value().into_owned()).collect();
    assert_eq!(names, vec!["a", "b", "c", "d", "e"]);
}

#[test]
fn test_inner_bom_separates_words() {
    let doc = parse("a\u{FEFF}b\n").unwrap();
    let node = &doc.nodes()[0];
    assert_eq!(node.name().value(), "a");
    let args: Vec<String> = node.arguments().map(|v| v.to_string()).collect();
    assert_eq!(args, vec!["b"]);
    assert!(!doc.has_bom());
}

#[test]
fn test_empty_documents() {
    assert!(parse("").unwrap().is_empty());
    assert!(parse("\n\n  // nothing\n/* here */\n").unwrap().is_empty());
    assert!(parse("\u{FEFF}").unwrap().has_bom());
}

#[test]
fn test_from_reader() {
    let doc = from_reader(std::io::Cursor::new("a 1\nb 2\n".as_bytes())).unwrap();
    assert_eq!(doc.len(), 2);
}

#[test]
fn test_serde_json_dump() {
    let doc = parse("(t)n 1 key=\"v\" { c }\n").unwrap();
    let json = serde_json::to_value(&doc).unwrap();

    assert_eq!(json["bom"], serde_json::json!(false));
    let node = &json["nodes"][0];
    assert_eq!(node["name"], serde_json::json!({ "Bare": "n" }));
    assert_eq!(node["slashdashed"], serde_json::json!(false));
    assert_eq!(node["fields"].as_array().map(Vec::len), Some(2));
    assert_eq!(node["children"][0]["document"]["nodes"][0]["name"]["Bare"], "c");

    let back: Document = serde_json::from_value(json).unwrap();
    assert_eq!(back, doc);
}

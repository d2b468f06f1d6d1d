// tests/cli_tests.rs

use aql_forge::cli::{CliError, CompileOptions, execute_compile};
use aql_forge::error::CompileError;

fn compile_doc(doc: &str) -> Result<serde_json::Value, CliError> {
    let options = CompileOptions {
        input: Some(doc.to_string()),
        ..Default::default()
    };
    let output = execute_compile(&options)?;
    Ok(serde_json::from_str(&output.rendered).unwrap())
}

#[test]
fn test_compile_query_document() {
    let doc = r#"{"clauses": [
        {"for": {"alias": "x", "in": {"var": "users"}}},
        {"filter": {"or": [
            {"compare": {"op": "==", "left": {"field": {"root": "x", "path": ["Foo"]}}, "right": {"lit": "asd"}}},
            {"compare": {"op": ">", "left": {"field": {"root": "x", "path": [{"name": "Bar", "rename": "bar"}]}}, "right": {"lit": 1}}}
        ]}},
        {"sort": [{"by": {"field": {"root": "x", "path": ["Name"]}}, "direction": "desc"}]},
        {"limit": {"count": 10}},
        {"return": {"projection": {"pick": {"alias": "x", "fields": [["Name"], ["Foo"]]}}}}
    ]}"#;

    let json = compile_doc(doc).unwrap();
    assert_eq!(
        json["query"],
        "FOR x IN users FILTER x.Foo == @var0 OR x.bar > @var1 SORT x.Name DESC LIMIT 10 RETURN {Name:x.Name, Foo:x.Foo}"
    );
    assert_eq!(json["bindVars"], serde_json::json!({"var0": "asd", "var1": 1}));
}

#[test]
fn test_compile_mutation_document() {
    let doc = r#"{"clauses": [
        {"for": {"alias": "x", "in": {"var": "users"}}},
        {"update": {"alias": "x", "in": "users", "merge_objects": false, "patch": [
            {"set": {"field": "Foo", "value": {"lit": "asdf"}}},
            {"inc": {"field": "Visits", "base": {"root": "x"}, "delta": {"lit": 1}}}
        ]}}
    ]}"#;

    let json = compile_doc(doc).unwrap();
    assert_eq!(
        json["query"],
        "FOR x IN users UPDATE x WITH { Foo:@var0, Visits:x.Visits+@var1 } IN users OPTIONS {mergeObjects:false}"
    );
}

#[test]
fn test_text_only() {
    let options = CompileOptions {
        input: Some(r#"{"clauses": [{"collect_count": {"into": "n"}}, {"return": {"projection": {"var": "n"}}}]}"#.to_string()),
        text_only: true,
        ..Default::default()
    };
    let output = execute_compile(&options).unwrap();
    assert_eq!(output.rendered, "COLLECT WITH COUNT INTO n RETURN n");
    assert!(output.query.bind_vars().is_empty());
}

#[test]
fn test_empty_composition_document() {
    let err = compile_doc(r#"{"clauses": [{"filter": {"and": []}}]}"#).unwrap_err();
    assert!(matches!(err, CliError::Compile(CompileError::EmptyComposition("AND"))));
}

#[test]
fn test_negative_limit_document() {
    let err = compile_doc(r#"{"clauses": [{"limit": {"count": -3}}]}"#).unwrap_err();
    assert!(matches!(err, CliError::Compile(CompileError::InvalidClause(_))));
}

#[test]
fn test_count_terminal_document() {
    let doc = r#"{"clauses": [{"let": {"alias": "n", "value": {"field": {"root": "x", "path": [], "terminal": "count"}}}}]}"#;
    let err = compile_doc(doc).unwrap_err();
    assert!(matches!(err, CliError::Compile(CompileError::PathResolution(_))));
}

#[test]
fn test_malformed_document() {
    assert!(matches!(compile_doc("{\"clauses\": 5}"), Err(CliError::Json(_))));
}

#[test]
fn test_no_input() {
    let err = execute_compile(&CompileOptions::default()).unwrap_err();
    assert!(matches!(err, CliError::NoInput));
}

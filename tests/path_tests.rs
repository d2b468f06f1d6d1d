// tests/path_tests.rs

use aql_forge::error::CompileError;
use aql_forge::path::{Member, Renames, TerminalOp, resolve, resolve_names};

struct Customer;

impl Renames for Customer {
    fn renamed(member: &str) -> Option<&'static str> {
        match member {
            "Id" => Some("_key"),
            "PostalCode" => Some("zip"),
            _ => None,
        }
    }
}

// ============================================================================
// Composition
// ============================================================================

#[test]
fn test_rename_override_wins() {
    let path = resolve("x", &[Member::new("A"), Member::renamed("B", "ren")], TerminalOp::None).unwrap();
    assert_eq!(path.to_string(), "x.A.ren");
}

#[test]
fn test_segments_keep_order() {
    let path = resolve_names("doc", &["Address", "Street", "Number"], TerminalOp::None).unwrap();
    assert_eq!(path.segments(), &["Address", "Street", "Number"]);
    assert_eq!(path.root(), "doc");
    assert_eq!(path.leaf(), "Number");
    assert_eq!(path.to_string(), "doc.Address.Street.Number");
}

#[test]
fn test_bare_root() {
    let path = resolve("users", &[], TerminalOp::None).unwrap();
    assert_eq!(path.to_string(), "users");
}

#[test]
fn test_rename_metadata() {
    let navigation = [Member::of::<Customer>("Address"), Member::of::<Customer>("PostalCode")];
    let path = resolve("c", &navigation, TerminalOp::None).unwrap();
    assert_eq!(path.to_string(), "c.Address.zip");

    let key = resolve("c", &[Member::of::<Customer>("Id")], TerminalOp::None).unwrap();
    assert_eq!(key.to_string(), "c._key");
}

#[test]
fn test_dynamic_key_is_not_escaped() {
    let path = resolve("x", &[Member::new("Labels"), Member::key("en-US")], TerminalOp::None).unwrap();
    assert_eq!(path.to_string(), "x.Labels.en-US");
}

#[test]
fn test_rebase() {
    let path = resolve_names("x", &["Foo"], TerminalOp::None).unwrap();
    assert_eq!(path.rebase("y").unwrap().to_string(), "y.Foo");
    assert!(path.rebase("").is_err());
}

// ============================================================================
// Terminal operations
// ============================================================================

#[test]
fn test_count_wraps_path() {
    let path = resolve("x", &[Member::new("list")], TerminalOp::Count).unwrap();
    assert_eq!(path.to_string(), "COUNT(x.list)");
}

#[test]
fn test_type_of_appends_suffix() {
    let path = resolve("x", &[Member::new("Payload")], TerminalOp::TypeOf).unwrap();
    assert_eq!(path.to_string(), "x.Payload.$type");
}

#[test]
fn test_type_of_root() {
    let path = resolve("x", &[], TerminalOp::TypeOf).unwrap();
    assert_eq!(path.to_string(), "x.$type");
}

// ============================================================================
// Failures
// ============================================================================

#[test]
fn test_count_of_nothing_fails() {
    let err = resolve("x", &[], TerminalOp::Count).unwrap_err();
    assert!(matches!(err, CompileError::PathResolution(_)));
}

#[test]
fn test_unnamed_step_fails() {
    let err = resolve("x", &[Member::new("A"), Member::new("")], TerminalOp::None).unwrap_err();
    assert!(matches!(err, CompileError::PathResolution(_)));
}

#[test]
fn test_empty_root_fails() {
    let err = resolve("", &[Member::new("A")], TerminalOp::None).unwrap_err();
    assert!(matches!(err, CompileError::PathResolution(_)));
}

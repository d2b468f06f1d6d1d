// tests/update_tests.rs

use aql_forge::ast::{Expr, Patch, PatchBuilder, Update, UpdateKind};
use aql_forge::error::CompileError;
use aql_forge::path::{TerminalOp, resolve_names};
use aql_forge::render::{Counter, Render};
use aql_forge::value::Value;

fn render<T: Render>(node: &T) -> String {
    node.render(Counter::new()).0
}

#[test]
fn test_patch_object() {
    let patch = Patch::new(vec![
        Update::set("Foo", Expr::literal("asdf")).unwrap(),
        Update::set("_id", Expr::literal("1235")).unwrap(),
    ])
    .unwrap();
    assert_eq!(render(&patch), "{ Foo:@var0, _id:@var1 }");
    assert_eq!(patch.bound_values(), vec![Value::from("asdf"), Value::from("1235")]);
}

#[test]
fn test_set_from_field() {
    let update = Update::set("Copy", Expr::field("x", &["Original"]).unwrap()).unwrap();
    assert_eq!(render(&update), "Copy:x.Original");
    assert!(update.bound_values().is_empty());
}

#[test]
fn test_increment() {
    let base = resolve_names("x", &[], TerminalOp::None).unwrap();
    let update = Update::increment("Visits", base, Expr::literal(1)).unwrap();
    assert_eq!(render(&update), "Visits:x.Visits+@var0");
    assert_eq!(update.bound_values(), vec![Value::Integer(1)]);
}

#[test]
fn test_merge_nested_patch() {
    let nested = resolve_names("x", &["Address"], TerminalOp::None).unwrap();
    let patch = Patch::new(vec![
        Update::set("City", Expr::literal("Berlin")).unwrap(),
        Update::increment("Moves", nested.clone(), Expr::literal(1)).unwrap(),
    ])
    .unwrap();
    let update = Update::merge("Address", nested, patch).unwrap();

    assert_eq!(
        render(&update),
        "Address:MERGE(x.Address, { City:@var0, Moves:x.Address.Moves+@var1 })"
    );
    assert_eq!(update.bound_values(), vec![Value::from("Berlin"), Value::Integer(1)]);
}

#[test]
fn test_placeholders_continue_across_entries() {
    let base = resolve_names("x", &["Stats"], TerminalOp::None).unwrap();
    let patch = Patch::new(vec![
        Update::set("Name", Expr::literal("n")).unwrap(),
        Update::merge(
            "Stats",
            base,
            Patch::new(vec![Update::set("Hits", Expr::literal(3)).unwrap()]).unwrap(),
        )
        .unwrap(),
        Update::set("Flag", Expr::literal(false)).unwrap(),
    ])
    .unwrap();
    let (text, next) = patch.render(Counter::new());
    assert_eq!(text, "{ Name:@var0, Stats:MERGE(x.Stats, { Hits:@var1 }), Flag:@var2 }");
    assert_eq!(next.value(), 3);
}

#[test]
fn test_empty_patch_rejected() {
    assert!(matches!(Patch::new(vec![]), Err(CompileError::InvalidClause(_))));
}

#[test]
fn test_builder() {
    let builder = PatchBuilder::new();
    assert!(builder.is_empty());
    assert!(matches!(builder.build(), Err(CompileError::InvalidClause(_))));

    let patch = PatchBuilder::new()
        .set("A", Expr::literal(1))
        .unwrap()
        .set("B", Expr::literal(2))
        .unwrap()
        .build()
        .unwrap();
    assert_eq!(patch.entries().len(), 2);
    assert_eq!(render(&patch), "{ A:@var0, B:@var1 }");
}

#[test]
fn test_unnamed_field_rejected() {
    assert!(matches!(
        Update::set("", Expr::literal(1)),
        Err(CompileError::InvalidClause(_))
    ));
}

#[test]
fn test_merge_into_type_of_rejected() {
    let base = resolve_names("x", &["Address"], TerminalOp::TypeOf).unwrap();
    let patch = Patch::new(vec![Update::set("City", Expr::literal("Berlin")).unwrap()]).unwrap();
    assert!(matches!(
        Update::merge("Address", base, patch),
        Err(CompileError::InvalidClause(_))
    ));
}

#[test]
fn test_increment_on_count_rejected() {
    let base = resolve_names("x", &["Tags"], TerminalOp::Count).unwrap();
    assert!(matches!(
        Update::increment("Visits", base, Expr::literal(1)),
        Err(CompileError::InvalidClause(_))
    ));
}

#[test]
fn test_kind_exposes_entry() {
    let update = Update::set("Foo", Expr::literal(1)).unwrap();
    assert!(matches!(update.kind(), UpdateKind::Set { field, .. } if field == "Foo"));
}

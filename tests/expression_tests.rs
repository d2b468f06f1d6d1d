// tests/expression_tests.rs

use aql_forge::ast::{BinOp, Expr, Filter};
use aql_forge::error::CompileError;
use aql_forge::render::{Counter, Render};
use aql_forge::value::Value;

fn field(root: &str, names: &[&str]) -> Expr {
    Expr::field(root, names).unwrap()
}

fn render<T: Render>(node: &T) -> (String, usize) {
    let (text, next) = node.render(Counter::new());
    (text, next.value())
}

// ============================================================================
// Value nodes
// ============================================================================

#[test]
fn test_field_binds_nothing() {
    let expr = field("x", &["Foo"]);
    assert_eq!(render(&expr), ("x.Foo".to_string(), 0));
    assert!(expr.bound_values().is_empty());
}

#[test]
fn test_literal_mints_placeholder() {
    let expr = Expr::literal("asd");
    assert_eq!(render(&expr), ("@var0".to_string(), 1));
    assert_eq!(expr.bound_values(), vec![Value::from("asd")]);
}

#[test]
fn test_array_binds_as_one_value() {
    let expr = Expr::array(["a", "b", "c"]);
    assert_eq!(render(&expr), ("@var0".to_string(), 1));
    assert_eq!(
        expr.bound_values(),
        vec![Value::Array(vec![Value::from("a"), Value::from("b"), Value::from("c")])]
    );
}

#[test]
fn test_binary_op_threads_counter() {
    let expr = Expr::binary(
        BinOp::Add,
        Expr::binary(BinOp::Multiply, field("x", &["Price"]), Expr::literal(2)),
        Expr::literal(1.5),
    );
    assert_eq!(render(&expr), ("((x.Price * @var0) + @var1)".to_string(), 2));
    assert_eq!(expr.bound_values(), vec![Value::Integer(2), Value::Float(1.5)]);
}

#[test]
fn test_function_call_arguments_in_order() {
    let expr = Expr::call(
        "CONCAT",
        vec![Expr::literal("a"), field("x", &["Name"]), Expr::literal("b")],
    )
    .unwrap();
    assert_eq!(render(&expr), ("CONCAT(@var0, x.Name, @var1)".to_string(), 2));
    assert_eq!(expr.bound_values(), vec![Value::from("a"), Value::from("b")]);
}

#[test]
fn test_call_accessors() {
    let expr = Expr::call("LENGTH", vec![field("x", &["Tags"])]).unwrap();
    match &expr {
        Expr::Call(call) => {
            assert_eq!(call.name(), "LENGTH");
            assert_eq!(call.args(), &[field("x", &["Tags"])]);
        }
        other => panic!("expected a call, got {:?}", other),
    }
}

#[test]
fn test_render_starts_at_given_counter() {
    let expr = Expr::literal(true);
    let (text, next) = expr.render(Counter::new().mint().1.mint().1);
    assert_eq!(text, "@var2");
    assert_eq!(next.value(), 3);
}

#[test]
fn test_render_is_repeatable() {
    let expr = Expr::call("LENGTH", vec![Expr::literal(1), Expr::literal(2)]).unwrap();
    assert_eq!(expr.render(Counter::new()), expr.render(Counter::new()));
}

#[test]
fn test_unnamed_function_rejected() {
    assert!(matches!(Expr::call("", vec![]), Err(CompileError::InvalidClause(_))));
}

// ============================================================================
// Filters
// ============================================================================

#[test]
fn test_compare() {
    let filter = Filter::eq(field("x", &["Foo"]), Expr::literal("asd"));
    assert_eq!(render(&filter), ("x.Foo == @var0".to_string(), 1));
    assert_eq!(filter.bound_values(), vec![Value::from("asd")]);
}

#[test]
fn test_compare_operators() {
    let cases = [
        (Filter::ne(field("x", &["a"]), field("x", &["b"])), "x.a != x.b"),
        (Filter::gt(field("x", &["a"]), field("x", &["b"])), "x.a > x.b"),
        (Filter::ge(field("x", &["a"]), field("x", &["b"])), "x.a >= x.b"),
        (Filter::lt(field("x", &["a"]), field("x", &["b"])), "x.a < x.b"),
        (Filter::le(field("x", &["a"]), field("x", &["b"])), "x.a <= x.b"),
    ];
    for (filter, expected) in cases {
        assert_eq!(render(&filter).0, expected);
    }
}

#[test]
fn test_or_composition() {
    let filter = Filter::or(vec![
        Filter::eq(field("x", &["Foo"]), Expr::literal("asd")),
        Filter::gt(field("x", &["Bar"]), Expr::literal(1)),
    ])
    .unwrap();
    assert_eq!(render(&filter), ("x.Foo == @var0 OR x.Bar > @var1".to_string(), 2));
    assert_eq!(filter.bound_values(), vec![Value::from("asd"), Value::Integer(1)]);
}

#[test]
fn test_nested_junction_is_parenthesized() {
    let inner = Filter::and(vec![
        Filter::gt(field("x", &["b"]), Expr::literal(1)),
        Filter::is_in(field("x", &["c"]), Expr::array([1, 2])),
    ])
    .unwrap();
    let filter = Filter::or(vec![Filter::eq(field("x", &["a"]), Expr::literal(0)), inner]).unwrap();
    assert_eq!(
        render(&filter).0,
        "x.a == @var0 OR (x.b > @var1 AND x.c IN @var2)"
    );
}

#[test]
fn test_membership() {
    let filter = Filter::is_in(field("x", &["Status"]), Expr::array(["open", "new"]));
    assert_eq!(render(&filter).0, "x.Status IN @var0");

    let filter = Filter::not_in(Expr::literal("admin"), field("x", &["Roles"]));
    assert_eq!(render(&filter).0, "@var0 NOT IN x.Roles");
    assert_eq!(filter.bound_values(), vec![Value::from("admin")]);
}

#[test]
fn test_between() {
    let filter = Filter::between(field("x", &["Age"]), Expr::literal(18), Expr::literal(65));
    assert_eq!(render(&filter), ("x.Age >= @var0 AND x.Age <= @var1".to_string(), 2));
    assert_eq!(filter.bound_values(), vec![Value::Integer(18), Value::Integer(65)]);
}

#[test]
fn test_empty_composition_rejected() {
    assert_eq!(Filter::and(vec![]).unwrap_err(), CompileError::EmptyComposition("AND"));
    assert_eq!(Filter::or(vec![]).unwrap_err(), CompileError::EmptyComposition("OR"));
}

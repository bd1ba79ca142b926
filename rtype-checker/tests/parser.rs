use rtype_checker::{
    parse_source, AssignOperator, BinaryOperator, Expr, ExprKind, Literal, Module,
    UnaryOperator,
};

fn parse(input: &str) -> Module {
    parse_source(input)
        .unwrap_or_else(|err| panic!("failed to parse {input:?}: {err}"))
        .1
}

fn single(input: &str) -> Expr {
    let mut module = parse(input);
    assert_eq!(module.expressions.len(), 1, "expected one expression in {input:?}");
    module.expressions.remove(0)
}

#[test]
fn multiplication_binds_tighter_than_addition() {
    let expr = single("x <- 1 + 2 * 3");
    let ExprKind::Assign(assign) = &expr.kind else {
        panic!("expected assignment, got {:?}", expr.kind);
    };
    assert_eq!(assign.operator, AssignOperator::Left);
    let ExprKind::Binary(sum) = &assign.value().kind else {
        panic!("expected binary value");
    };
    assert_eq!(sum.operator, BinaryOperator::Add);
    assert!(matches!(
        &sum.right.kind,
        ExprKind::Binary(product) if product.operator == BinaryOperator::Multiply
    ));
}

#[test]
fn right_arrow_swaps_target_and_value() {
    let expr = single("5 -> x");
    let ExprKind::Assign(assign) = &expr.kind else {
        panic!("expected assignment");
    };
    assert_eq!(assign.operator, AssignOperator::Right);
    assert!(matches!(&assign.target().kind, ExprKind::Identifier(name) if name == "x"));
    assert!(matches!(
        &assign.value().kind,
        ExprKind::Literal(Literal::Integer(text)) if text == "5"
    ));
}

#[test]
fn assignment_chains_are_right_associative() {
    let expr = single("x <- y <- 5");
    let ExprKind::Assign(outer) = &expr.kind else {
        panic!("expected assignment");
    };
    assert!(matches!(&outer.value().kind, ExprKind::Assign(_)));
}

#[test]
fn unary_minus_binds_looser_than_power() {
    let expr = single("-2^2");
    let ExprKind::Unary(unary) = &expr.kind else {
        panic!("expected unary");
    };
    assert_eq!(unary.operator, UnaryOperator::Negate);
    assert!(matches!(
        &unary.operand.kind,
        ExprKind::Binary(power) if power.operator == BinaryOperator::Power
    ));
}

#[test]
fn newlines_end_expressions_only_outside_brackets() {
    assert_eq!(parse("x <- 1\ny <- 2").expressions.len(), 2);
    assert_eq!(parse("x <- (1 +\n 2)").expressions.len(), 1);
    assert_eq!(parse("f(a,\n  b)").expressions.len(), 1);
    assert_eq!(parse("x <-\n  5").expressions.len(), 1);
}

#[test]
fn parses_named_call_arguments() {
    let expr = single("data.frame(a = 1L, b = \"x\")");
    let ExprKind::Call(call) = &expr.kind else {
        panic!("expected call");
    };
    assert_eq!(call.callee_name(), Some("data.frame"));
    let names: Vec<_> = call
        .arguments
        .iter()
        .map(|argument| argument.name.as_deref())
        .collect();
    assert_eq!(names, vec![Some("a"), Some("b")]);
    assert!(call.named("b").is_some());
    assert!(call.positional(0).is_none());
}

#[test]
fn parses_functions_and_lambdas() {
    let expr = single("function(x, y = 2) x + y");
    let ExprKind::Function(function) = &expr.kind else {
        panic!("expected function");
    };
    let names: Vec<_> = function
        .parameters
        .iter()
        .map(|parameter| parameter.name.as_str())
        .collect();
    assert_eq!(names, vec!["x", "y"]);
    assert!(function.parameters[1].default.is_some());

    let lambda = single("\\(z) z * 2");
    assert!(matches!(lambda.kind, ExprKind::Function(_)));
}

#[test]
fn else_on_a_new_line_needs_an_enclosing_block() {
    assert!(parse_source("if (a) b\nelse c").is_err());

    let expr = single("{\n  if (a) b\n  else c\n}");
    let ExprKind::Block(body) = &expr.kind else {
        panic!("expected block");
    };
    assert!(matches!(
        &body[0].kind,
        ExprKind::If(if_expr) if if_expr.alternative.is_some()
    ));
}

#[test]
fn parses_empty_index_slots() {
    let expr = single("x[1, ]");
    let ExprKind::Index(index) = &expr.kind else {
        panic!("expected index");
    };
    assert!(!index.double);
    assert_eq!(index.arguments.len(), 2);
    assert!(index.arguments[1].value.is_none());

    let expr = single("x[[\"a\"]]");
    assert!(matches!(&expr.kind, ExprKind::Index(index) if index.double));
}

#[test]
fn parses_formulas_with_and_without_response() {
    let two_sided = single("y ~ x + z");
    assert!(matches!(
        &two_sided.kind,
        ExprKind::Formula(formula) if formula.left.is_some()
    ));
    let one_sided = single("~ x");
    assert!(matches!(
        &one_sided.kind,
        ExprKind::Formula(formula) if formula.left.is_none()
    ));
}

#[test]
fn namespaced_callees_report_the_function_name() {
    let expr = single("dplyr::filter(df, x > 1)");
    let ExprKind::Call(call) = &expr.kind else {
        panic!("expected call");
    };
    assert_eq!(call.callee_name(), Some("filter"));
}

#[test]
fn records_spans_and_operator_positions() {
    let expr = single("total <- 10");
    assert_eq!((expr.span.line, expr.span.column), (1, 1));
    assert_eq!((expr.span.end_line, expr.span.end_column), (1, 11));
    let ExprKind::Assign(assign) = &expr.kind else {
        panic!("expected assignment");
    };
    assert_eq!((assign.operator_span.line, assign.operator_span.column), (1, 7));
}

#[test]
fn incomplete_assignment_is_a_syntax_error() {
    let error = parse_source("x <- 5\ny <-").expect_err("should fail");
    assert_eq!(error.message, "unexpected end of input");
}

#[test]
fn unbalanced_brackets_are_syntax_errors() {
    assert!(parse_source("f(1").is_err());
    let error = parse_source("x <- )").expect_err("should fail");
    assert_eq!(error.message, "unexpected ')'");
    assert_eq!((error.line, error.column), (1, 6));
}

#[test]
fn semicolons_separate_expressions() {
    assert_eq!(parse("a <- 1; b <- 2;").expressions.len(), 2);
}

#[test]
fn walrus_inside_brackets_is_a_special_operator() {
    let expr = single("dt[, b := 2]");
    let ExprKind::Index(index) = &expr.kind else {
        panic!("expected index, got {:?}", expr.kind);
    };
    assert_eq!(index.arguments.len(), 2);
    assert!(index.arguments[0].value.is_none());
    let value = index.arguments[1].value.as_ref().expect("second argument");
    let ExprKind::Binary(binary) = &value.kind else {
        panic!("expected binary, got {:?}", value.kind);
    };
    assert_eq!(binary.operator, BinaryOperator::Special(":=".to_string()));
    assert!(matches!(&binary.left.kind, ExprKind::Identifier(name) if name == "b"));
}

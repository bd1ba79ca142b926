use rtype_checker::{parse_source, TokenTable};

fn table(input: &str) -> TokenTable {
    let (tokens, module) = parse_source(input).expect("parse");
    TokenTable::build(&tokens, &module)
}

#[test]
fn marks_called_symbols() {
    let table = table("x <- f(1)");
    let callee = table
        .terminals()
        .find(|row| row.text == "f")
        .expect("callee row");
    assert_eq!(callee.token, "SYMBOL_FUNCTION_CALL");

    let target = table
        .terminals()
        .find(|row| row.text == "x")
        .expect("target row");
    assert_eq!(target.token, "SYMBOL");
}

#[test]
fn every_terminal_has_an_expression_parent() {
    let table = table("x <- f(1)\ny = c(a = 2, 3)\n4 -> z");
    for row in table.terminals() {
        let parent = table
            .row(row.parent)
            .unwrap_or_else(|| panic!("missing parent for {row:?}"));
        assert!(!parent.terminal, "parent of {row:?} is a terminal");
        assert_eq!(parent.token, "expr");
    }
}

#[test]
fn assignment_operators_hang_off_top_level_expressions() {
    let table = table("x <- 1\n2 -> y\nz = 3");
    let operators: Vec<_> = table.assignment_operators().collect();
    let names: Vec<_> = operators.iter().map(|row| row.token).collect();
    assert_eq!(names, vec!["LEFT_ASSIGN", "RIGHT_ASSIGN", "EQ_ASSIGN"]);

    for operator in operators {
        let parent = table.row(operator.parent).expect("operator parent");
        assert_eq!(parent.parent, 0);
    }
}

#[test]
fn rows_follow_source_order_outermost_first() {
    let table = table("x <- 1");
    let first = &table.rows()[0];
    assert!(!first.terminal);
    assert_eq!((first.line1, first.col1, first.line2, first.col2), (1, 1, 1, 6));
    assert_eq!(first.parent, 0);

    let children: Vec<_> = table.children(first.id).map(|row| row.token).collect();
    assert!(children.contains(&"LEFT_ASSIGN"), "{children:?}");
}

#[test]
fn display_renders_a_parse_data_table() {
    let rendered = table("y <- mean(x)").to_string();
    let header = rendered.lines().next().expect("header");
    assert!(header.contains("line1"));
    assert!(header.contains("parent"));
    assert!(rendered.contains("SYMBOL_FUNCTION_CALL"));
    assert!(rendered.contains("LEFT_ASSIGN"));
}

use minijs::ast::{BinOpKind, Node};
use minijs::lexer::Lexer;
use minijs::parser::parse;
use pretty_assertions::assert_eq;

fn parse_source(source: &str) -> Vec<Node> {
    parse(Lexer::tokenize(source)).expect("program should parse")
}

fn parse_err(source: &str) -> minijs::SyntaxError {
    parse(Lexer::tokenize(source)).expect_err("program should not parse")
}

fn number(n: f64) -> Box<Node> {
    Box::new(Node::NumberLiteral(n))
}

#[test]
fn multiplication_binds_tighter_than_addition() {
    let program = parse_source("2 + 3 * 4;");
    assert_eq!(
        program,
        vec![Node::BinaryOp {
            op: BinOpKind::Add,
            left: number(2.0),
            right: Box::new(Node::BinaryOp {
                op: BinOpKind::Mul,
                left: number(3.0),
                right: number(4.0),
            }),
        }]
    );
}

#[test]
fn parentheses_override_precedence() {
    let program = parse_source("(2 + 3) * 4;");
    assert_eq!(
        program,
        vec![Node::BinaryOp {
            op: BinOpKind::Mul,
            left: Box::new(Node::BinaryOp {
                op: BinOpKind::Add,
                left: number(2.0),
                right: number(3.0),
            }),
            right: number(4.0),
        }]
    );
}

#[test]
fn additive_is_left_associative() {
    let program = parse_source("10 - 4 - 3;");
    assert_eq!(
        program,
        vec![Node::BinaryOp {
            op: BinOpKind::Sub,
            left: Box::new(Node::BinaryOp {
                op: BinOpKind::Sub,
                left: number(10.0),
                right: number(4.0),
            }),
            right: number(3.0),
        }]
    );
}

#[test]
fn comparison_binds_loosest() {
    let program = parse_source("1 + 2 < 3 * 4;");
    assert_eq!(
        program,
        vec![Node::BinaryOp {
            op: BinOpKind::Lt,
            left: Box::new(Node::BinaryOp {
                op: BinOpKind::Add,
                left: number(1.0),
                right: number(2.0),
            }),
            right: Box::new(Node::BinaryOp {
                op: BinOpKind::Mul,
                left: number(3.0),
                right: number(4.0),
            }),
        }]
    );
}

#[test]
fn chained_comparison_is_rejected() {
    let err = parse_err("1 < 2 < 3;");
    assert!(err.message.contains("';'"), "unexpected message: {err}");
}

#[test]
fn declarations_carry_constness() {
    let program = parse_source("let a = 1; const b = 2; var c = 3;");
    assert_eq!(
        program,
        vec![
            Node::VarDecl {
                name: "a".to_string(),
                init: number(1.0),
                constant: false,
            },
            Node::VarDecl {
                name: "b".to_string(),
                init: number(2.0),
                constant: true,
            },
            Node::VarDecl {
                name: "c".to_string(),
                init: number(3.0),
                constant: false,
            },
        ]
    );
}

#[test]
fn print_desugars_to_a_native_call() {
    let program = parse_source(r#"print "hi";"#);
    assert_eq!(
        program,
        vec![Node::Call {
            callee: "print".to_string(),
            args: vec![Node::StringLiteral("hi".to_string())],
        }]
    );
}

#[test]
fn assignment_statement() {
    let program = parse_source("x = x + 1;");
    assert_eq!(
        program,
        vec![Node::Assign {
            name: "x".to_string(),
            value: Box::new(Node::BinaryOp {
                op: BinOpKind::Add,
                left: Box::new(Node::Identifier("x".to_string())),
                right: number(1.0),
            }),
        }]
    );
}

#[test]
fn bare_call_is_an_expression_statement() {
    let program = parse_source("tick();");
    assert_eq!(
        program,
        vec![Node::Call {
            callee: "tick".to_string(),
            args: vec![],
        }]
    );
}

#[test]
fn if_requires_parenthesized_condition() {
    let err = parse_err("if x { print 1; }");
    assert!(err.message.contains("'('"), "unexpected message: {err}");
}

#[test]
fn if_else_with_blocks() {
    let program = parse_source("if (x > 1) { print 1; } else { print 2; }");
    match &program[0] {
        Node::If {
            cond, else_branch, ..
        } => {
            assert!(matches!(**cond, Node::BinaryOp { op: BinOpKind::Gt, .. }));
            assert!(else_branch.is_some());
        }
        other => panic!("expected if node, got {other:?}"),
    }
}

#[test]
fn while_with_block_body() {
    let program = parse_source("while (x < 3) { x = x + 1; }");
    match &program[0] {
        Node::While { body, .. } => {
            assert!(matches!(**body, Node::Block(ref stmts) if stmts.len() == 1));
        }
        other => panic!("expected while node, got {other:?}"),
    }
}

#[test]
fn function_declaration_with_params() {
    let program = parse_source("function add(a, b) { a + b; }");
    match &program[0] {
        Node::FunctionDecl { name, params, body } => {
            assert_eq!(name, "add");
            assert_eq!(params, &vec!["a".to_string(), "b".to_string()]);
            assert!(matches!(**body, Node::Block(_)));
        }
        other => panic!("expected function node, got {other:?}"),
    }
}

#[test]
fn call_with_arguments() {
    let program = parse_source("add(1, 2 * 3);");
    assert_eq!(
        program,
        vec![Node::Call {
            callee: "add".to_string(),
            args: vec![
                Node::NumberLiteral(1.0),
                Node::BinaryOp {
                    op: BinOpKind::Mul,
                    left: number(2.0),
                    right: number(3.0),
                },
            ],
        }]
    );
}

#[test]
fn array_literal() {
    let program = parse_source(r#"[1, "two", x];"#);
    assert_eq!(
        program,
        vec![Node::ArrayLiteral(vec![
            Node::NumberLiteral(1.0),
            Node::StringLiteral("two".to_string()),
            Node::Identifier("x".to_string()),
        ])]
    );
    assert_eq!(parse_source("[];"), vec![Node::ArrayLiteral(vec![])]);
}

#[test]
fn bare_block_is_a_statement() {
    let program = parse_source("{ let x = 1; }");
    assert!(matches!(&program[0], Node::Block(stmts) if stmts.len() == 1));
}

#[test]
fn missing_semicolon_reports_position() {
    let err = parse_err("let x = 1\nlet y = 2;");
    assert!(err.message.contains("';'"), "unexpected message: {err}");
    assert_eq!(err.span.line, 2);
}

#[test]
fn unclosed_block_reports_end_of_input() {
    let err = parse_err("{ let x = 1;");
    assert!(
        err.message.contains("end of input"),
        "unexpected message: {err}"
    );
}

#[test]
fn literals_round_trip_their_values() {
    // Re-serializing literal nodes reproduces the source values.
    let program = parse_source(r#"42; 3.5; "hi";"#);
    let rendered: Vec<String> = program
        .iter()
        .map(|node| match node {
            Node::NumberLiteral(n) => n.to_string(),
            Node::StringLiteral(s) => s.clone(),
            other => panic!("expected literal, got {other:?}"),
        })
        .collect();
    assert_eq!(rendered, vec!["42", "3.5", "hi"]);
}

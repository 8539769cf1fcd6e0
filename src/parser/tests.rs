//! Unit tests for the parser module.
//!
//! This module contains tests for parsing the language constructs:
//! - Operator precedence and associativity
//! - Variables, numbers, calls and parentheses
//! - Definitions, externs and top-level expressions
//! - Error cases and where the parser stops on failure

use crate::{
    ast::{
        declarations::{Declaration, Function, Prototype},
        expressions::{BinaryExpr, CallExpr, Expr, NumberExpr, VariableExpr},
    },
    errors::errors::{Error, ErrorImpl},
    lexer::tokens::TokenKind,
    Span,
};

use super::{
    parser::{parse, Parser},
    precedence::PrecedenceTable,
};

fn parser_for(source: &str) -> Parser {
    Parser::from_source(
        source.to_string(),
        Some("test.kal".to_string()),
        PrecedenceTable::default(),
    )
}

fn parse_body(source: &str) -> Expr {
    match parser_for(source).parse_declaration() {
        Ok(Declaration::Function(function)) => function.body,
        other => panic!("expected a function, got {:?}", other),
    }
}

fn parse_error(source: &str) -> Error {
    parser_for(source)
        .parse_declaration()
        .expect_err("expected a parse error")
}

fn num(value: f64) -> Expr {
    Expr::Number(NumberExpr {
        value,
        span: Span::null(),
    })
}

fn var(name: &str) -> Expr {
    Expr::Variable(VariableExpr {
        name: name.to_string(),
        span: Span::null(),
    })
}

fn bin(operator: char, left: Expr, right: Expr) -> Expr {
    Expr::Binary(BinaryExpr {
        operator,
        left: Box::new(left),
        right: Box::new(right),
        span: Span::null(),
    })
}

fn call(callee: &str, arguments: Vec<Expr>) -> Expr {
    Expr::Call(CallExpr {
        callee: callee.to_string(),
        arguments,
        span: Span::null(),
    })
}

fn prototype(name: &str, parameters: &[&str]) -> Prototype {
    Prototype {
        name: name.to_string(),
        parameters: parameters.iter().map(|p| p.to_string()).collect(),
        span: Span::null(),
    }
}

#[test]
fn test_parse_multiplication_binds_tighter() {
    assert_eq!(
        parse_body("1 + 2 * 3"),
        bin('+', num(1.0), bin('*', num(2.0), num(3.0)))
    );
    assert_eq!(
        parse_body("1 * 2 + 3"),
        bin('+', bin('*', num(1.0), num(2.0)), num(3.0))
    );
}

#[test]
fn test_parse_left_associativity() {
    assert_eq!(
        parse_body("1 - 2 - 3"),
        bin('-', bin('-', num(1.0), num(2.0)), num(3.0))
    );
    assert_eq!(
        parse_body("a + b - c"),
        bin('-', bin('+', var("a"), var("b")), var("c"))
    );
}

#[test]
fn test_parse_comparison_is_loosest() {
    assert_eq!(
        parse_body("a < b + 1"),
        bin('<', var("a"), bin('+', var("b"), num(1.0)))
    );
}

#[test]
fn test_parse_mixed_precedence_chain() {
    // a + b * c - d  =>  (a + (b * c)) - d
    assert_eq!(
        parse_body("a + b * c - d"),
        bin(
            '-',
            bin('+', var("a"), bin('*', var("b"), var("c"))),
            var("d")
        )
    );
    // a < b * c + d  =>  a < ((b * c) + d)
    assert_eq!(
        parse_body("a < b * c + d"),
        bin(
            '<',
            var("a"),
            bin('+', bin('*', var("b"), var("c")), var("d"))
        )
    );
}

#[test]
fn test_parse_parentheses_override_precedence() {
    assert_eq!(
        parse_body("(1 + 2) * 3"),
        bin('*', bin('+', num(1.0), num(2.0)), num(3.0))
    );
    assert_eq!(parse_body("((x))"), var("x"));
}

#[test]
fn test_parse_calls() {
    assert_eq!(parse_body("f()"), call("f", vec![]));
    assert_eq!(
        parse_body("f(1, x + 2, g(y))"),
        call(
            "f",
            vec![
                num(1.0),
                bin('+', var("x"), num(2.0)),
                call("g", vec![var("y")])
            ]
        )
    );
    assert_eq!(
        parse_body("f(x) * 2"),
        bin('*', call("f", vec![var("x")]), num(2.0))
    );
}

#[test]
fn test_parse_definition() {
    let declaration = parser_for("def add(a b) a + b").parse_declaration().unwrap();

    assert_eq!(
        declaration,
        Declaration::Function(Function {
            prototype: prototype("add", &["a", "b"]),
            body: bin('+', var("a"), var("b")),
        })
    );
}

#[test]
fn test_parse_extern() {
    let declaration = parser_for("extern sin(x)").parse_declaration().unwrap();

    assert_eq!(declaration, Declaration::Extern(prototype("sin", &["x"])));
}

#[test]
fn test_parse_zero_parameter_prototype() {
    let declaration = parser_for("extern rand()").parse_declaration().unwrap();

    assert_eq!(declaration, Declaration::Extern(prototype("rand", &[])));
}

#[test]
fn test_parse_top_level_expression_is_anonymous() {
    match parser_for("4 + 5").parse_declaration().unwrap() {
        Declaration::Function(function) => {
            assert!(function.is_anonymous());
            assert!(function.prototype.parameters.is_empty());
            assert_eq!(function.body, bin('+', num(4.0), num(5.0)));
        }
        other => panic!("expected a function, got {:?}", other),
    }
}

#[test]
fn test_parse_prototype_span() {
    match parser_for("extern foo(a b)").parse_declaration().unwrap() {
        Declaration::Extern(prototype) => {
            assert_eq!(prototype.span.start.0, 7);
            assert_eq!(prototype.span.end.0, 15);
        }
        other => panic!("expected an extern, got {:?}", other),
    }
}

#[test]
fn test_parse_stops_before_unknown_operator() {
    let mut parser = parser_for("a / b");

    let body = match parser.parse_declaration().unwrap() {
        Declaration::Function(function) => function.body,
        other => panic!("expected a function, got {:?}", other),
    };

    assert_eq!(body, var("a"));
    assert_eq!(parser.current_token_kind(), TokenKind::Char('/'));
}

#[test]
fn test_parse_with_installed_operator() {
    let mut table = PrecedenceTable::default();
    table.install('/', 40);
    let mut parser = Parser::from_source("a + b / c".to_string(), None, table);

    match parser.parse_declaration().unwrap() {
        Declaration::Function(function) => assert_eq!(
            function.body,
            bin('+', var("a"), bin('/', var("b"), var("c")))
        ),
        other => panic!("expected a function, got {:?}", other),
    }
}

#[test]
fn test_parse_with_reordered_precedence() {
    let mut table = PrecedenceTable::default();
    table.install('+', 50);
    let mut parser = Parser::from_source("a * b + c".to_string(), None, table);

    match parser.parse_declaration().unwrap() {
        Declaration::Function(function) => assert_eq!(
            function.body,
            bin('*', var("a"), bin('+', var("b"), var("c")))
        ),
        other => panic!("expected a function, got {:?}", other),
    }
}

#[test]
fn test_parse_whole_source() {
    let source = "extern sin(x); def f(x) sin(x) * 2; f(1);;".to_string();
    let declarations = parse(source, None, PrecedenceTable::default()).unwrap();

    assert_eq!(declarations.len(), 3);
    assert!(matches!(declarations[0], Declaration::Extern(_)));
    assert_eq!(declarations[1].get_name(), "f");
    assert_eq!(declarations[2].get_name(), "");
}

#[test]
fn test_parse_empty_program() {
    let declarations = parse(String::new(), None, PrecedenceTable::default()).unwrap();

    assert!(declarations.is_empty());
}

#[test]
fn test_parse_error_unknown_token() {
    let error = parse_error(")");

    assert_eq!(
        error.get_kind(),
        &ErrorImpl::ExpectedExpression {
            token: ")".to_string()
        }
    );
    assert_eq!(error.get_position().0, 0);
}

#[test]
fn test_parse_error_trailing_comma() {
    let error = parse_error("f(1,)");

    assert_eq!(
        error.get_kind(),
        &ErrorImpl::ExpectedExpression {
            token: ")".to_string()
        }
    );
}

#[test]
fn test_parse_error_missing_comma_leaves_token() {
    let mut parser = parser_for("f(1 2)");
    let error = parser.parse_declaration().unwrap_err();

    assert_eq!(
        error.get_kind(),
        &ErrorImpl::ExpectedArgumentSeparator {
            token: "2".to_string()
        }
    );
    assert_eq!(parser.current_token_kind(), TokenKind::Number);
    assert_eq!(parser.current_token().value, "2");
}

#[test]
fn test_parse_error_unclosed_call() {
    let error = parse_error("f(1");

    assert_eq!(
        error.get_kind(),
        &ErrorImpl::ExpectedArgumentSeparator {
            token: "EOF".to_string()
        }
    );
}

#[test]
fn test_parse_error_unclosed_paren() {
    let error = parse_error("(1 + 2");

    assert_eq!(
        error.get_kind(),
        &ErrorImpl::ExpectedCloseParen {
            token: "EOF".to_string()
        }
    );
}

#[test]
fn test_parse_error_missing_right_operand() {
    let error = parse_error("1 +");

    assert!(matches!(
        error.get_kind(),
        ErrorImpl::ExpectedExpression { .. }
    ));
}

#[test]
fn test_parse_error_prototype_name() {
    let error = parse_error("def 1(x) x");

    assert_eq!(
        error.get_kind(),
        &ErrorImpl::ExpectedFunctionName {
            token: "1".to_string()
        }
    );
}

#[test]
fn test_parse_error_prototype_open_paren() {
    let error = parse_error("extern f x");

    assert_eq!(
        error.get_kind(),
        &ErrorImpl::ExpectedPrototypeOpen {
            token: "x".to_string()
        }
    );
}

#[test]
fn test_parse_error_prototype_separator() {
    let error = parse_error("def f(x, y) x");

    assert_eq!(
        error.get_kind(),
        &ErrorImpl::ExpectedPrototypeClose {
            token: ",".to_string()
        }
    );
    assert!(error.is_syntax_error());
}

#[test]
fn test_parse_error_duplicate_parameter() {
    let error = parse_error("def f(x y x) x");

    assert_eq!(
        error.get_kind(),
        &ErrorImpl::DuplicateParameter {
            parameter: "x".to_string()
        }
    );
    assert_eq!(error.get_position().0, 10);
}

#[test]
fn test_parse_error_missing_body() {
    let error = parse_error("def f(x)");

    assert_eq!(
        error.get_kind(),
        &ErrorImpl::ExpectedExpression {
            token: "EOF".to_string()
        }
    );
}

#[test]
fn test_display_fully_parenthesized() {
    assert_eq!(parse_body("a + b * c").to_string(), "(a + (b * c))");
    assert_eq!(parse_body("1 - 2 - 3").to_string(), "((1 - 2) - 3)");
    assert_eq!(
        parse_body("f(1.5, x < 2)").to_string(),
        "f(1.5, (x < 2))"
    );
}

#[test]
fn test_parse_error_number_overflow() {
    let huge = "9".repeat(400);
    let error = parse_error(&format!("1 + {}", huge));

    assert_eq!(
        error.get_kind(),
        &ErrorImpl::NumberParseError { token: huge }
    );
    assert_eq!(error.get_position().0, 4);
    assert!(error.is_syntax_error());
}

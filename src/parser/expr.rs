use crate::{
    ast::expressions::{BinaryExpr, CallExpr, Expr, NumberExpr, VariableExpr},
    errors::errors::{Error, ErrorImpl},
    lexer::tokens::TokenKind,
    Span,
};

use super::parser::Parser;

/// expression ::= primary binoprhs
pub fn parse_expr(parser: &mut Parser) -> Result<Expr, Error> {
    let left = parse_primary_expr(parser)?;

    parse_binop_rhs(parser, 0, left)
}

/// Dispatches on the current token to the matching primary expression.
pub fn parse_primary_expr(parser: &mut Parser) -> Result<Expr, Error> {
    match parser.current_token_kind() {
        TokenKind::Identifier => parse_identifier_expr(parser),
        TokenKind::Number => parse_number_expr(parser),
        TokenKind::Char('(') => parse_paren_expr(parser),
        _ => Err(parser.error_at_current(|token| ErrorImpl::ExpectedExpression { token })),
    }
}

/// Literals that overflow `f64` are rejected rather than becoming infinite.
pub fn parse_number_expr(parser: &mut Parser) -> Result<Expr, Error> {
    let value = parser
        .current_token()
        .value
        .parse::<f64>()
        .ok()
        .filter(|value| value.is_finite())
        .ok_or_else(|| parser.error_at_current(|token| ErrorImpl::NumberParseError { token }))?;

    Ok(Expr::Number(NumberExpr {
        value,
        span: parser.advance().span,
    }))
}

/// parenexpr ::= '(' expression ')'
pub fn parse_paren_expr(parser: &mut Parser) -> Result<Expr, Error> {
    parser.advance();
    let expr = parse_expr(parser)?;

    parser.expect_error(TokenKind::Char(')'), |token| ErrorImpl::ExpectedCloseParen {
        token,
    })?;

    Ok(expr)
}

/// identifierexpr ::= identifier | identifier '(' (expression (',' expression)*)? ')'
pub fn parse_identifier_expr(parser: &mut Parser) -> Result<Expr, Error> {
    let identifier = parser.advance();

    if !parser.current_token().is_char('(') {
        return Ok(Expr::Variable(VariableExpr {
            name: identifier.value,
            span: identifier.span,
        }));
    }

    parser.advance();

    let mut arguments = vec![];

    if !parser.current_token().is_char(')') {
        loop {
            arguments.push(parse_expr(parser)?);

            if parser.current_token().is_char(')') {
                break;
            }

            if !parser.current_token().is_char(',') {
                return Err(parser.error_at_current(|token| {
                    ErrorImpl::ExpectedArgumentSeparator { token }
                }));
            }

            parser.advance();
        }
    }

    let close = parser.advance();

    Ok(Expr::Call(CallExpr {
        callee: identifier.value,
        arguments,
        span: Span {
            start: identifier.span.start,
            end: close.span.end,
        },
    }))
}

/// binoprhs ::= (binop primary)*
///
/// Folds operators of precedence at least `min_precedence` onto `left`.
/// When the operator after the right operand binds tighter, the right
/// operand is climbed first at `precedence + 1`; equal precedence falls
/// through to the next iteration, which makes operators left-associative.
pub fn parse_binop_rhs(
    parser: &mut Parser,
    min_precedence: i32,
    mut left: Expr,
) -> Result<Expr, Error> {
    loop {
        let precedence = parser.get_token_precedence();

        if precedence < min_precedence {
            return Ok(left);
        }

        let TokenKind::Char(operator) = parser.current_token_kind() else {
            return Ok(left);
        };
        parser.advance();

        let mut right = parse_primary_expr(parser)?;

        let next_precedence = parser.get_token_precedence();
        if precedence < next_precedence {
            right = parse_binop_rhs(parser, precedence + 1, right)?;
        }

        left = Expr::Binary(BinaryExpr {
            span: Span {
                start: left.get_span().start.clone(),
                end: right.get_span().end.clone(),
            },
            operator,
            left: Box::new(left),
            right: Box::new(right),
        });
    }
}

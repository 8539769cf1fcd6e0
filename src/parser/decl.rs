use crate::{
    ast::declarations::{Declaration, Function, Prototype},
    errors::errors::{Error, ErrorImpl},
    lexer::tokens::TokenKind,
    Span,
};

use super::{expr::parse_expr, parser::Parser};

/// Parses the top-level item the current token starts.
pub fn parse_declaration(parser: &mut Parser) -> Result<Declaration, Error> {
    let declaration = match parser.current_token_kind() {
        TokenKind::Def => Declaration::Function(parse_definition(parser)?),
        TokenKind::Extern => Declaration::Extern(parse_extern(parser)?),
        _ => Declaration::Function(parse_top_level_expr(parser)?),
    };

    tracing::debug!(name = declaration.get_name(), "parsed declaration");
    Ok(declaration)
}

/// definition ::= 'def' prototype expression
pub fn parse_definition(parser: &mut Parser) -> Result<Function, Error> {
    parser.advance();

    let prototype = parse_prototype(parser)?;
    let body = parse_expr(parser)?;

    Ok(Function { prototype, body })
}

/// external ::= 'extern' prototype
pub fn parse_extern(parser: &mut Parser) -> Result<Prototype, Error> {
    parser.advance();

    parse_prototype(parser)
}

/// prototype ::= identifier '(' identifier* ')'
pub fn parse_prototype(parser: &mut Parser) -> Result<Prototype, Error> {
    let name = parser.expect_error(TokenKind::Identifier, |token| {
        ErrorImpl::ExpectedFunctionName { token }
    })?;

    parser.expect_error(TokenKind::Char('('), |token| {
        ErrorImpl::ExpectedPrototypeOpen { token }
    })?;

    let mut parameters: Vec<String> = vec![];

    while parser.current_token_kind() == TokenKind::Identifier {
        if parameters.contains(&parser.current_token().value) {
            return Err(parser.error_at_current(|parameter| ErrorImpl::DuplicateParameter {
                parameter,
            }));
        }

        parameters.push(parser.advance().value);
    }

    let close = parser.expect_error(TokenKind::Char(')'), |token| {
        ErrorImpl::ExpectedPrototypeClose { token }
    })?;

    Ok(Prototype {
        name: name.value,
        parameters,
        span: Span {
            start: name.span.start,
            end: close.span.end,
        },
    })
}

/// toplevelexpr ::= expression
///
/// The expression becomes the body of a nameless, parameterless function.
pub fn parse_top_level_expr(parser: &mut Parser) -> Result<Function, Error> {
    let body = parse_expr(parser)?;

    Ok(Function {
        prototype: Prototype::anonymous(body.get_span().clone()),
        body,
    })
}

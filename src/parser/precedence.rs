use std::collections::HashMap;

use crate::lexer::tokens::{Token, TokenKind};

/// Binary operators understood out of the box, loosest first.
pub const DEFAULT_PRECEDENCE: [(char, i32); 4] = [('<', 10), ('+', 20), ('-', 20), ('*', 40)];

/// Lookup from a single-character operator to its precedence.
///
/// A higher number binds tighter. Entries at or below zero are treated as
/// absent, so installing `0` switches an operator off.
#[derive(Debug, Clone, PartialEq)]
pub struct PrecedenceTable {
    table: HashMap<char, i32>,
}

impl Default for PrecedenceTable {
    fn default() -> Self {
        let mut table = PrecedenceTable::empty();
        for (operator, precedence) in DEFAULT_PRECEDENCE {
            table.install(operator, precedence);
        }
        table
    }
}

impl PrecedenceTable {
    pub fn empty() -> Self {
        PrecedenceTable {
            table: HashMap::new(),
        }
    }

    /// Adds `operator`, or changes its precedence if already present.
    pub fn install(&mut self, operator: char, precedence: i32) {
        self.table.insert(operator, precedence);
    }

    /// Precedence of `operator`, or -1 when it is not a binary operator.
    pub fn get(&self, operator: char) -> i32 {
        if !operator.is_ascii() {
            return -1;
        }

        match self.table.get(&operator) {
            Some(precedence) if *precedence > 0 => *precedence,
            _ => -1,
        }
    }

    /// Precedence of `token` as a binary operator; -1 for anything that is
    /// not a single-character token with a positive entry.
    pub fn get_token_precedence(&self, token: &Token) -> i32 {
        match token.kind {
            TokenKind::Char(c) => self.get(c),
            _ => -1,
        }
    }

    pub fn contains(&self, operator: char) -> bool {
        self.get(operator) > 0
    }
}

/// Parses an `OP=PREC` override such as `/=40`.
///
/// The operator has to be a single ASCII symbol that the lexer hands out as a
/// character token and that has no other meaning in the grammar.
pub fn parse_precedence_override(value: &str) -> Result<(char, i32), String> {
    let Some((operator, precedence)) = value.split_once('=') else {
        return Err(format!("expected OP=PREC, found `{}`", value));
    };

    let mut chars = operator.chars();
    let (Some(operator), None) = (chars.next(), chars.next()) else {
        return Err(format!("operator must be a single character, found `{}`", operator));
    };

    if !operator.is_ascii_punctuation() || matches!(operator, '(' | ')' | ',' | ';' | '#' | '.') {
        return Err(format!("`{}` cannot be used as a binary operator", operator));
    }

    let precedence = precedence
        .trim()
        .parse::<i32>()
        .map_err(|e| format!("invalid precedence `{}`: {}", precedence, e))?;

    Ok((operator, precedence))
}

#[cfg(test)]
mod tests {
    use super::{parse_precedence_override, PrecedenceTable};
    use crate::{
        lexer::tokens::{Token, TokenKind},
        Span,
    };

    fn token(kind: TokenKind, value: &str) -> Token {
        Token {
            kind,
            value: value.to_string(),
            span: Span::null(),
        }
    }

    #[test]
    fn test_default_table() {
        let table = PrecedenceTable::default();

        assert_eq!(table.get('<'), 10);
        assert_eq!(table.get('+'), 20);
        assert_eq!(table.get('-'), 20);
        assert_eq!(table.get('*'), 40);
        assert_eq!(table.get('/'), -1);
    }

    #[test]
    fn test_non_operator_tokens() {
        let table = PrecedenceTable::default();

        assert_eq!(table.get_token_precedence(&token(TokenKind::Identifier, "x")), -1);
        assert_eq!(table.get_token_precedence(&token(TokenKind::Number, "1")), -1);
        assert_eq!(table.get_token_precedence(&token(TokenKind::EOF, "EOF")), -1);
        assert_eq!(table.get_token_precedence(&token(TokenKind::Char(')'), ")")), -1);
        assert_eq!(table.get_token_precedence(&token(TokenKind::Char('*'), "*")), 40);
    }

    #[test]
    fn test_non_positive_entries_are_absent() {
        let mut table = PrecedenceTable::default();
        table.install('-', 0);
        table.install('%', -5);

        assert_eq!(table.get('-'), -1);
        assert_eq!(table.get('%'), -1);
        assert!(!table.contains('-'));
    }

    #[test]
    fn test_non_ascii_operator_is_ignored() {
        let mut table = PrecedenceTable::empty();
        table.install('×', 40);

        assert_eq!(table.get('×'), -1);
    }

    #[test]
    fn test_parse_precedence_override() {
        assert_eq!(parse_precedence_override("/=40"), Ok(('/', 40)));
        assert_eq!(parse_precedence_override("<=5"), Ok(('<', 5)));
        assert_eq!(parse_precedence_override("-=0"), Ok(('-', 0)));

        assert!(parse_precedence_override("/40").is_err());
        assert!(parse_precedence_override("//=40").is_err());
        assert!(parse_precedence_override("a=40").is_err());
        assert!(parse_precedence_override("(=40").is_err());
        assert!(parse_precedence_override("/=high").is_err());
    }
}

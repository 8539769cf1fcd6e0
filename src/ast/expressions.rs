use std::fmt::Display;

use crate::Span;

/// Expression node.
///
/// A closed set of kinds: the code generator matches on it exhaustively.
/// Equality is structural and ignores source spans.
#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    Number(NumberExpr),
    Variable(VariableExpr),
    Binary(BinaryExpr),
    Call(CallExpr),
}

impl Expr {
    pub fn get_span(&self) -> &Span {
        match self {
            Expr::Number(number) => &number.span,
            Expr::Variable(variable) => &variable.span,
            Expr::Binary(binary) => &binary.span,
            Expr::Call(call) => &call.span,
        }
    }
}

/// Renders the expression fully parenthesized, e.g. `(a + (b * c))`.
///
/// Parsing the rendered text gives back a structurally identical tree.
impl Display for Expr {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Expr::Number(number) => write!(f, "{}", number.value),
            Expr::Variable(variable) => write!(f, "{}", variable.name),
            Expr::Binary(binary) => {
                write!(f, "({} {} {})", binary.left, binary.operator, binary.right)
            }
            Expr::Call(call) => {
                write!(f, "{}(", call.callee)?;
                for (i, argument) in call.arguments.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{}", argument)?;
                }
                write!(f, ")")
            }
        }
    }
}

// LITERALS

/// Number Expression
/// Represents a numeric literal in the AST.
#[derive(Debug, Clone)]
pub struct NumberExpr {
    pub value: f64,
    pub span: Span,
}

impl PartialEq for NumberExpr {
    fn eq(&self, other: &Self) -> bool {
        self.value == other.value
    }
}

/// Variable Expression
/// A reference to a function parameter, resolved during code generation.
#[derive(Debug, Clone)]
pub struct VariableExpr {
    pub name: String,
    pub span: Span,
}

impl PartialEq for VariableExpr {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name
    }
}

// COMPLEX

/// Binary Expression
/// Represents a binary operation between two expressions in the AST.
#[derive(Debug, Clone)]
pub struct BinaryExpr {
    pub operator: char,
    pub left: Box<Expr>,
    pub right: Box<Expr>,
    pub span: Span,
}

impl PartialEq for BinaryExpr {
    fn eq(&self, other: &Self) -> bool {
        self.operator == other.operator && self.left == other.left && self.right == other.right
    }
}

/// Call Expression
/// Represents a call of a named function with its argument expressions.
#[derive(Debug, Clone)]
pub struct CallExpr {
    pub callee: String,
    pub arguments: Vec<Expr>,
    pub span: Span,
}

impl PartialEq for CallExpr {
    fn eq(&self, other: &Self) -> bool {
        self.callee == other.callee && self.arguments == other.arguments
    }
}

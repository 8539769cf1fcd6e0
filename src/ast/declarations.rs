use crate::Span;

use super::expressions::Expr;

/// Prototype
/// A function's signature: its name and parameter names. Every parameter
/// and the return value share the single numeric type.
#[derive(Debug, Clone)]
pub struct Prototype {
    pub name: String,
    pub parameters: Vec<String>,
    pub span: Span,
}

impl Prototype {
    /// The synthetic signature wrapping a top-level expression.
    pub fn anonymous(span: Span) -> Self {
        Prototype {
            name: String::new(),
            parameters: vec![],
            span,
        }
    }

    pub fn is_anonymous(&self) -> bool {
        self.name.is_empty()
    }
}

impl PartialEq for Prototype {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name && self.parameters == other.parameters
    }
}

/// Function
/// A full definition: a prototype plus the expression computing its result.
#[derive(Debug, Clone, PartialEq)]
pub struct Function {
    pub prototype: Prototype,
    pub body: Expr,
}

impl Function {
    pub fn is_anonymous(&self) -> bool {
        self.prototype.is_anonymous()
    }
}

/// A top-level item handed from the parser to the code generator.
#[derive(Debug, Clone, PartialEq)]
pub enum Declaration {
    /// A `def`, or a bare expression wrapped in an anonymous function
    Function(Function),
    /// An `extern` signature
    Extern(Prototype),
}

impl Declaration {
    pub fn get_name(&self) -> &str {
        match self {
            Declaration::Function(function) => &function.prototype.name,
            Declaration::Extern(prototype) => &prototype.name,
        }
    }
}

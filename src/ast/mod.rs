/// AST (Abstract Syntax Tree) module
/// Contains all definitions related to the AST structure
///
/// Submodules:
/// - expressions: The expression sum type and its node kinds
/// - declarations: Prototypes, function definitions and top-level items
pub mod declarations;
pub mod expressions;

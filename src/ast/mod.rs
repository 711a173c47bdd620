/// AST (Abstract Syntax Tree) module
/// Contains all definitions related to the AST structure
///
/// Submodules:
/// - ast: The closed node enums (`Expr`, `Stmt`, `Decl`, `TypeExpr`)
/// - expressions: Definitions for the expression nodes
/// - statements: Definitions for statement and declaration nodes
/// - types: Definitions for type expressions
pub mod ast;
pub mod expressions;
pub mod statements;
pub mod types;

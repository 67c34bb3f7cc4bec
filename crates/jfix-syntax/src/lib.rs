//! Declaration-level Java syntax trees.
//!
//! [`parse_java`] builds a lossless rowan tree and wraps it in a [`SourceTree`], which indexes the
//! nodes behind `Copy` [`NodeId`] handles. The tree models everything down
//! to member signatures: packages, imports, type declarations (nested and local), methods,
//! fields, enum constants and anonymous class bodies. Method bodies and initializers are token
//! runs; only class-instance creations and local type declarations inside them become nodes.

pub mod ast;
mod lexer;
mod parser;
mod syntax_kind;
mod tree;
mod type_syntax;

pub use ast::{
    AstNode, Body, ClassInstanceCreation, CompilationUnit, EnumConstant, ImportDecl, Method,
    Modifiers, Parameter, TypeDecl, TypeDeclKind, TypeParam,
};
pub use jfix_core::{TextRange, TextSize};
pub use lexer::{lex, Lexer, Token};
pub use parser::parse_java;
pub use syntax_kind::{JavaLanguage, SyntaxElement, SyntaxKind, SyntaxNode, SyntaxToken};
pub use tree::{debug_dump, NodeId, SourceTree};
pub use type_syntax::{TypeSegment, TypeSyntax, WildcardBound};

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{message} at {range:?}")]
pub struct ParseError {
    pub message: String,
    pub range: TextRange,
}

//! The ECMAScript 5 lexer and parser used by the jscs style checker.
//!
//! The crate turns source text into a [`SyntaxTree`]: an arena of nodes and
//! the full token stream (comments included) with byte ranges and
//! line/column locations, plus parent links and token-to-enclosing-node
//! links resolved once at construction time. The style engine only ever
//! consumes this surface; no checking logic lives here.
//!
//! Parsing is strict: the first syntax error aborts with a [`ParseError`]
//! carrying a human-readable message and a position. Style rules are never
//! run over a partially parsed file.

mod lexer;
mod node;
mod parser;
mod token;
mod tree;

pub use crate::{
    lexer::Lexer,
    node::{DeclKind, Node, NodeId, NodeKind, NodeType, PropertyKind},
    token::{Loc, Position, Token, TokenId, TokenType},
    tree::SyntaxTree,
};

use std::fmt;

/// A syntax error with a best-effort position.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseError {
    pub message: String,
    /// 1-based.
    pub line: u32,
    /// 0-based.
    pub column: u32,
    /// Byte offset into the source.
    pub index: usize,
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} at line {} column {}", self.message, self.line, self.column)
    }
}

impl std::error::Error for ParseError {}

/// Parse source text into a [`SyntaxTree`].
pub fn parse(source: &str) -> Result<SyntaxTree, ParseError> {
    parser::parse(source)
}

/// Run only the lexer, yielding every token (comments and EOF included).
pub fn tokenize(source: &str) -> Result<Vec<Token>, ParseError> {
    Lexer::new(source).tokenize()
}

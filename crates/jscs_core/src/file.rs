//! The per-file facade every rule receives.
//!
//! `SourceFile` unifies the raw text, the line table, the token stream, and
//! the syntax tree behind one read-only query surface. Token navigation
//! skips comments unless explicitly asked not to; the EOF token is a real
//! token, so walking off either end of the stream yields `None` rather than
//! a crash.

use jscs_syntax::{
    Node, NodeId, NodeType, ParseError, Position, SyntaxTree, Token, TokenId, TokenType,
};

#[derive(Debug, Clone)]
pub struct SourceFile {
    filename: String,
    source: String,
    lines: Vec<String>,
    tree: SyntaxTree,
}

impl SourceFile {
    /// Parse source text into a checkable file.
    pub fn parse(source: impl Into<String>, filename: impl Into<String>) -> Result<Self, ParseError> {
        let source = source.into();
        let tree = jscs_syntax::parse(&source)?;
        Ok(Self {
            filename: filename.into(),
            lines: source.split('\n').map(|l| l.to_string()).collect(),
            source,
            tree,
        })
    }

    pub fn filename(&self) -> &str {
        &self.filename
    }

    pub fn source(&self) -> &str {
        &self.source
    }

    /// Raw line strings without trailing newlines, 1:1 with `loc` lines.
    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    /// A single line by its 1-based number.
    pub fn line(&self, line: u32) -> Option<&str> {
        self.lines.get(line as usize - 1).map(|s| s.as_str())
    }

    pub fn tree(&self) -> &SyntaxTree {
        &self.tree
    }

    pub fn token(&self, id: TokenId) -> &Token {
        self.tree.token(id)
    }

    pub fn node(&self, id: NodeId) -> &Node {
        self.tree.node(id)
    }

    /// The innermost syntax node enclosing a token.
    pub fn enclosing_node(&self, token: TokenId) -> NodeId {
        self.tree.enclosing_node(token)
    }

    // ---- token stream ---------------------------------------------------

    pub fn tokens(&self) -> impl Iterator<Item = (TokenId, &Token)> {
        self.tree.tokens()
    }

    /// Comment tokens in source order.
    pub fn comments(&self) -> impl Iterator<Item = (TokenId, &Token)> {
        self.tree.tokens().filter(|(_, t)| t.is_comment())
    }

    /// The first token of the file; with `include_comments` false a leading
    /// comment is skipped.
    pub fn first_token(&self, include_comments: bool) -> Option<TokenId> {
        self.tokens()
            .find(|(_, t)| !t.is_eof() && (include_comments || !t.is_comment()))
            .map(|(id, _)| id)
    }

    /// The last non-EOF token of the file.
    pub fn last_token(&self, include_comments: bool) -> Option<TokenId> {
        let mut last = None;
        for (id, tok) in self.tokens() {
            if tok.is_eof() {
                break;
            }
            if include_comments || !tok.is_comment() {
                last = Some(id);
            }
        }
        last
    }

    /// The next token in the stream, skipping comments unless asked.
    /// Returns `None` past the EOF token.
    pub fn next_token(&self, id: TokenId, include_comments: bool) -> Option<TokenId> {
        let mut idx = id.index() + 1;
        while idx < self.tree.token_count() {
            let tok = self.tree.token(TokenId(idx as u32));
            if include_comments || !tok.is_comment() {
                return Some(TokenId(idx as u32));
            }
            idx += 1;
        }
        None
    }

    /// The previous token in the stream, skipping comments unless asked.
    /// Returns `None` before the first token.
    pub fn prev_token(&self, id: TokenId, include_comments: bool) -> Option<TokenId> {
        let mut idx = id.index();
        while idx > 0 {
            idx -= 1;
            let tok = self.tree.token(TokenId(idx as u32));
            if include_comments || !tok.is_comment() {
                return Some(TokenId(idx as u32));
            }
        }
        None
    }

    /// The token whose start position equals `position`.
    pub fn token_at(&self, position: Position) -> Option<TokenId> {
        self.tokens()
            .find(|(_, t)| t.loc.start == position)
            .map(|(id, _)| id)
    }

    /// Visit every token of the given types in source order.
    pub fn iterate_tokens_by_type(
        &self,
        types: &[TokenType],
        mut callback: impl FnMut(TokenId, &Token),
    ) {
        for (id, tok) in self.tokens() {
            if types.contains(&tok.ty) {
                callback(id, tok);
            }
        }
    }

    /// Visit every token with the given text in source order.
    pub fn iterate_token_by_value(&self, value: &str, mut callback: impl FnMut(TokenId, &Token)) {
        for (id, tok) in self.tokens() {
            if !tok.is_comment() && tok.value == value {
                callback(id, tok);
            }
        }
    }

    /// Visit every node of the given types in source order. Returning
    /// `false` from the callback skips the node's subtree.
    pub fn iterate_nodes_by_type(
        &self,
        types: &[NodeType],
        mut callback: impl FnMut(NodeId, &Node) -> bool,
    ) {
        self.tree.walk(|id, node| {
            if types.contains(&node.ty()) {
                callback(id, node)
            } else {
                true
            }
        });
    }

    /// The first token of a node, skipping comments.
    pub fn first_token_of(&self, node: NodeId) -> Option<TokenId> {
        let id = self.tree.first_token_of(node)?;
        if self.token(id).is_comment() {
            self.next_token(id, false)
        } else {
            Some(id)
        }
    }

    /// The last token of a node, skipping comments.
    pub fn last_token_of(&self, node: NodeId) -> Option<TokenId> {
        let id = self.tree.last_token_of(node)?;
        if self.token(id).is_comment() {
            self.prev_token(id, false)
        } else {
            Some(id)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn file(src: &str) -> SourceFile {
        SourceFile::parse(src, "test.js").unwrap()
    }

    #[test]
    fn lines_match_loc_lines() {
        let f = file("var a;\nvar b;\n");
        assert_eq!(f.lines(), &["var a;", "var b;", ""]);
        assert_eq!(f.line(2), Some("var b;"));
    }

    #[test]
    fn navigation_skips_comments_by_default() {
        let f = file("a /* note */ = 1;");
        let a = f.first_token(false).unwrap();
        let next = f.next_token(a, false).unwrap();
        assert_eq!(f.token(next).value, "=");
        let with_comments = f.next_token(a, true).unwrap();
        assert_eq!(f.token(with_comments).ty, TokenType::BlockComment);
    }

    #[test]
    fn navigation_is_total_at_the_boundaries() {
        let f = file("// lead\na;\n// trail");
        let first = f.first_token(false).unwrap();
        assert_eq!(f.token(first).value, "a");
        assert_eq!(f.prev_token(first, false), None);
        assert!(f
            .prev_token(first, true)
            .map(|id| f.token(id).is_comment())
            .unwrap_or(false));

        let last = f.last_token(false).unwrap();
        assert_eq!(f.token(last).value, ";");
        let eof = f.next_token(last, false).unwrap();
        assert!(f.token(eof).is_eof());
        assert_eq!(f.next_token(eof, true), None);
    }

    #[test]
    fn node_iteration_can_skip_subtrees() {
        let f = file("function outer() { function inner() { a(); } }");
        let mut seen = Vec::new();
        f.iterate_nodes_by_type(&[NodeType::FunctionDeclaration], |id, node| {
            seen.push(id);
            let _ = node;
            false
        });
        assert_eq!(seen.len(), 1);
    }

    #[test]
    fn empty_file_has_no_tokens_but_parses() {
        let f = file("");
        assert_eq!(f.first_token(true), None);
        assert_eq!(f.last_token(true), None);
    }
}

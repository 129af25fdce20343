//! Classification of parenthesis tokens by their syntactic role.
//!
//! Spacing rules treat `if (`, `function (`, `f(`, and grouping `(`
//! differently; these pure functions answer which of those a given paren
//! token is, by inspecting the neighboring tokens and the enclosing node.

use crate::file::SourceFile;
use jscs_syntax::{NodeId, NodeType, TokenId, TokenType};

/// The syntactic role of an open or close parenthesis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ParenCategory {
    /// The head of a statement: `if (...)`, `while (...)`, `switch (...)`,
    /// `catch (...)`, `for (...)`, `with (...)`.
    Statement,
    /// A function signature's parameter list.
    Function,
    /// A call or `new` argument list.
    CallExpression,
    /// A grouping paren.
    ParenthesizedExpression,
}

const STATEMENT_KEYWORDS: &[&str] = &["if", "while", "switch", "catch", "for", "with"];

fn is_statement_node(ty: NodeType) -> bool {
    matches!(
        ty,
        NodeType::IfStatement
            | NodeType::WhileStatement
            | NodeType::DoWhileStatement
            | NodeType::ForStatement
            | NodeType::ForInStatement
            | NodeType::SwitchStatement
            | NodeType::WithStatement
            | NodeType::CatchClause
    )
}

fn is_call_node(ty: NodeType) -> bool {
    matches!(ty, NodeType::CallExpression | NodeType::NewExpression)
}

fn callee_of(file: &SourceFile, node: NodeId) -> Option<NodeId> {
    match &file.node(node).kind {
        jscs_syntax::NodeKind::CallExpression { callee, .. }
        | jscs_syntax::NodeKind::NewExpression { callee, .. } => Some(*callee),
        _ => None,
    }
}

/// Categorize an opening parenthesis.
///
/// # Panics
/// Panics if `token` is not a `(` punctuator; calling this on anything else
/// is a programming error, not a recoverable condition.
pub fn categorize_open_paren(file: &SourceFile, token: TokenId) -> ParenCategory {
    assert!(
        file.token(token).is_punct("("),
        "categorize_open_paren called on a non-`(` token"
    );

    let prev = match file.prev_token(token, false) {
        // The file starts with `(`: a grouping paren.
        None => return ParenCategory::ParenthesizedExpression,
        Some(prev) => prev,
    };
    let prev_tok = file.token(prev);

    if prev_tok.ty == TokenType::Keyword && STATEMENT_KEYWORDS.contains(&prev_tok.value.as_str()) {
        return ParenCategory::Statement;
    }

    let enclosing = file.enclosing_node(token);
    let node = file.node(enclosing);

    if node.is_function()
        && (prev_tok.ty == TokenType::Identifier || prev_tok.is_keyword("function"))
    {
        return ParenCategory::Function;
    }

    if is_call_node(node.ty()) && !prev_tok.is_punct(",") && !prev_tok.is_punct("(") {
        let prev_in_same_node = file.enclosing_node(prev) == enclosing;
        let ends_callee = callee_of(file, enclosing)
            .and_then(|callee| file.last_token_of(callee))
            .map_or(false, |last| last == prev);
        if prev_in_same_node || ends_callee {
            return ParenCategory::CallExpression;
        }
    }

    ParenCategory::ParenthesizedExpression
}

/// Categorize a closing parenthesis, mirroring [`categorize_open_paren`]
/// with the following token. At end of file there is no next token, so the
/// enclosing node decides alone.
///
/// # Panics
/// Panics if `token` is not a `)` punctuator.
pub fn categorize_close_paren(file: &SourceFile, token: TokenId) -> ParenCategory {
    assert!(
        file.token(token).is_punct(")"),
        "categorize_close_paren called on a non-`)` token"
    );

    let enclosing = file.enclosing_node(token);
    let node = file.node(enclosing);

    let next = file
        .next_token(token, false)
        .filter(|id| !file.token(*id).is_eof());

    if next.is_none() {
        // Classify by the enclosing node directly.
        return if node.is_function() {
            ParenCategory::Function
        } else if is_statement_node(node.ty()) {
            ParenCategory::Statement
        } else if is_call_node(node.ty()) {
            ParenCategory::CallExpression
        } else {
            ParenCategory::ParenthesizedExpression
        };
    }

    if node.is_function() && file.token(next.unwrap()).is_punct("{") {
        return ParenCategory::Function;
    }

    // Statement-head parens may be followed by `{`, or by a nested
    // statement/declaration (`if (a) x = 1;`); scan the enclosing chain for
    // the statement that owns this paren before falling through.
    if is_statement_node(node.ty()) {
        return ParenCategory::Statement;
    }

    if is_call_node(node.ty()) {
        let is_last = file
            .last_token_of(enclosing)
            .map_or(false, |last| last == token);
        if is_last {
            return ParenCategory::CallExpression;
        }
    }

    ParenCategory::ParenthesizedExpression
}

#[cfg(test)]
mod tests {
    use super::*;

    fn file(src: &str) -> SourceFile {
        SourceFile::parse(src, "test.js").unwrap()
    }

    fn open_categories(src: &str) -> Vec<ParenCategory> {
        let f = file(src);
        let mut out = Vec::new();
        f.iterate_token_by_value("(", |id, _| out.push(categorize_open_paren(&f, id)));
        out
    }

    fn close_categories(src: &str) -> Vec<ParenCategory> {
        let f = file(src);
        let mut out = Vec::new();
        f.iterate_token_by_value(")", |id, _| out.push(categorize_close_paren(&f, id)));
        out
    }

    #[test]
    fn statement_and_call_parens() {
        assert_eq!(
            open_categories("if(x)f(y)"),
            vec![ParenCategory::Statement, ParenCategory::CallExpression]
        );
        assert_eq!(
            close_categories("if(x)f(y)"),
            vec![ParenCategory::Statement, ParenCategory::CallExpression]
        );
    }

    #[test]
    fn function_signature_parens() {
        assert_eq!(
            open_categories("function foo(a) { bar(a); }"),
            vec![ParenCategory::Function, ParenCategory::CallExpression]
        );
        assert_eq!(
            open_categories("x = function(a) { return a; };"),
            vec![ParenCategory::Function]
        );
    }

    #[test]
    fn grouping_parens() {
        assert_eq!(
            open_categories("x = (a + b) * c;"),
            vec![ParenCategory::ParenthesizedExpression]
        );
        // Nested grouping inside a call: `f((a))`.
        assert_eq!(
            open_categories("f((a));"),
            vec![
                ParenCategory::CallExpression,
                ParenCategory::ParenthesizedExpression
            ]
        );
        assert_eq!(
            close_categories("f((a));"),
            vec![
                ParenCategory::ParenthesizedExpression,
                ParenCategory::CallExpression
            ]
        );
    }

    #[test]
    fn file_leading_and_trailing_parens() {
        assert_eq!(
            open_categories("(a)"),
            vec![ParenCategory::ParenthesizedExpression]
        );
        // No next token after the last `)`.
        assert_eq!(
            close_categories("f(a)"),
            vec![ParenCategory::CallExpression]
        );
    }

    #[test]
    fn statement_paren_followed_by_nested_statement() {
        let cats = close_categories("if (a) x = 1;");
        assert_eq!(cats, vec![ParenCategory::Statement]);
    }

    #[test]
    #[should_panic(expected = "non-`(` token")]
    fn open_paren_contract_is_asserted() {
        let f = file("a;");
        let tok = f.first_token(false).unwrap();
        categorize_open_paren(&f, tok);
    }

    #[test]
    fn new_expression_parens() {
        assert_eq!(
            open_categories("x = new Foo(a);"),
            vec![ParenCategory::CallExpression]
        );
    }
}

//! A recursive-descent ECMAScript 5 parser.
//!
//! The parser consumes the code tokens of a lexed file (comments stay in the
//! stream but are invisible here) and builds the node arena bottom-up.
//! Unlike error-recovering linters' parsers, this one fails on the first
//! syntax error; the engine converts that failure into a single diagnostic
//! and never runs rules over a broken tree.

use crate::lexer::Lexer;
use crate::node::{DeclKind, Node, NodeId, NodeKind, PropertyKind};
use crate::token::{Loc, Token, TokenType};
use crate::tree::SyntaxTree;
use crate::ParseError;

pub fn parse(source: &str) -> Result<SyntaxTree, ParseError> {
    let tokens = Lexer::new(source).tokenize()?;
    Parser::new(source, tokens).program()
}

struct Parser<'s> {
    src: &'s str,
    tokens: Vec<Token>,
    /// Indices of non-comment tokens (EOF included) into `tokens`.
    code: Vec<usize>,
    pos: usize,
    nodes: Vec<Node>,
}

impl<'s> Parser<'s> {
    fn new(src: &'s str, tokens: Vec<Token>) -> Self {
        let code = tokens
            .iter()
            .enumerate()
            .filter(|(_, t)| !t.is_comment())
            .map(|(i, _)| i)
            .collect();
        Self {
            src,
            tokens,
            code,
            pos: 0,
            nodes: Vec::new(),
        }
    }

    fn cur(&self) -> &Token {
        &self.tokens[self.code[self.pos]]
    }

    fn peek(&self) -> &Token {
        let idx = (self.pos + 1).min(self.code.len() - 1);
        &self.tokens[self.code[idx]]
    }

    fn prev(&self) -> &Token {
        &self.tokens[self.code[self.pos.saturating_sub(1)]]
    }

    fn at_eof(&self) -> bool {
        self.cur().is_eof()
    }

    fn bump(&mut self) {
        if self.pos < self.code.len() - 1 {
            self.pos += 1;
        }
    }

    fn newline_before_cur(&self) -> bool {
        self.pos > 0 && self.cur().loc.start.line > self.prev().loc.end.line
    }

    fn error_at_cur(&self, message: impl Into<String>) -> ParseError {
        let tok = self.cur();
        ParseError {
            message: message.into(),
            line: tok.loc.start.line,
            column: tok.loc.start.column,
            index: tok.range.start,
        }
    }

    fn unexpected(&self) -> ParseError {
        if self.at_eof() {
            self.error_at_cur("Unexpected end of input")
        } else {
            self.error_at_cur(format!("Unexpected token {}", self.cur().value))
        }
    }

    fn expect_punct(&mut self, value: &str) -> Result<(), ParseError> {
        if self.cur().is_punct(value) {
            self.bump();
            Ok(())
        } else {
            Err(self.unexpected())
        }
    }

    fn expect_keyword(&mut self, value: &str) -> Result<(), ParseError> {
        if self.cur().is_keyword(value) {
            self.bump();
            Ok(())
        } else {
            Err(self.unexpected())
        }
    }

    /// Add a node spanning from the token at code index `start` to the last
    /// consumed token.
    fn finish(&mut self, start: usize, kind: NodeKind) -> NodeId {
        let start_tok = &self.tokens[self.code[start]];
        let end_tok = &self.tokens[self.code[self.pos.saturating_sub(1)]];
        let id = NodeId(self.nodes.len() as u32);
        self.nodes.push(Node {
            kind,
            range: start_tok.range.start..end_tok.range.end,
            loc: Loc::new(start_tok.loc.start, end_tok.loc.end),
            parent: None,
        });
        id
    }

    /// Add a node spanning two existing nodes.
    fn finish_span(&mut self, left: NodeId, right: NodeId, kind: NodeKind) -> NodeId {
        let range = self.nodes[left.index()].range.start..self.nodes[right.index()].range.end;
        let loc = Loc::new(
            self.nodes[left.index()].loc.start,
            self.nodes[right.index()].loc.end,
        );
        let id = NodeId(self.nodes.len() as u32);
        self.nodes.push(Node {
            kind,
            range,
            loc,
            parent: None,
        });
        id
    }

    /// Automatic semicolon insertion: an explicit `;`, a closing brace, end
    /// of input, or a preceding line terminator all end a statement.
    fn consume_semicolon(&mut self) -> Result<(), ParseError> {
        if self.cur().is_punct(";") {
            self.bump();
            return Ok(());
        }
        if self.cur().is_punct("}") || self.at_eof() || self.newline_before_cur() {
            return Ok(());
        }
        Err(self.unexpected())
    }

    fn program(mut self) -> Result<SyntaxTree, ParseError> {
        let mut body = Vec::new();
        while !self.at_eof() {
            body.push(self.statement()?);
        }
        let eof_loc = self.cur().loc;
        let id = NodeId(self.nodes.len() as u32);
        self.nodes.push(Node {
            kind: NodeKind::Program { body },
            range: 0..self.src.len(),
            loc: Loc::new(crate::Position::new(1, 0), eof_loc.end),
            parent: None,
        });
        Ok(SyntaxTree::new(self.nodes, self.tokens, id))
    }

    // ---- statements -----------------------------------------------------

    fn statement(&mut self) -> Result<NodeId, ParseError> {
        let tok = self.cur();
        match tok.ty {
            TokenType::Punctuator if tok.value == "{" => self.block(),
            TokenType::Punctuator if tok.value == ";" => {
                let start = self.pos;
                self.bump();
                Ok(self.finish(start, NodeKind::EmptyStatement))
            }
            TokenType::Keyword => match tok.value.as_str() {
                "var" | "let" | "const" => self.variable_statement(),
                "if" => self.if_statement(),
                "for" => self.for_statement(),
                "while" => self.while_statement(),
                "do" => self.do_while_statement(),
                "switch" => self.switch_statement(),
                "try" => self.try_statement(),
                "return" => self.return_statement(),
                "throw" => self.throw_statement(),
                "break" | "continue" => self.break_or_continue(),
                "function" => self.function(true),
                "with" => self.with_statement(),
                "debugger" => {
                    let start = self.pos;
                    self.bump();
                    self.consume_semicolon()?;
                    Ok(self.finish(start, NodeKind::DebuggerStatement))
                }
                _ => self.expression_statement(),
            },
            TokenType::Identifier if self.peek().is_punct(":") => self.labeled_statement(),
            _ => self.expression_statement(),
        }
    }

    fn block(&mut self) -> Result<NodeId, ParseError> {
        let start = self.pos;
        self.expect_punct("{")?;
        let mut body = Vec::new();
        while !self.cur().is_punct("}") {
            if self.at_eof() {
                return Err(self.unexpected());
            }
            body.push(self.statement()?);
        }
        self.bump();
        Ok(self.finish(start, NodeKind::BlockStatement { body }))
    }

    fn variable_statement(&mut self) -> Result<NodeId, ParseError> {
        let id = self.variable_declaration(false)?;
        self.consume_semicolon()?;
        // Widen the declaration over the semicolon it owns.
        let end_tok = &self.tokens[self.code[self.pos.saturating_sub(1)]];
        let node = &mut self.nodes[id.index()];
        node.range.end = end_tok.range.end;
        node.loc.end = end_tok.loc.end;
        Ok(id)
    }

    /// Parses `var a = 1, b` without a trailing semicolon so that for-in
    /// heads can reuse it.
    fn variable_declaration(&mut self, no_in: bool) -> Result<NodeId, ParseError> {
        let start = self.pos;
        let kind = match self.cur().value.as_str() {
            "var" => DeclKind::Var,
            "let" => DeclKind::Let,
            "const" => DeclKind::Const,
            _ => return Err(self.unexpected()),
        };
        self.bump();

        let mut declarations = Vec::new();
        loop {
            let decl_start = self.pos;
            let id = self.identifier()?;
            let init = if self.cur().is_punct("=") {
                self.bump();
                Some(self.assignment_expression(no_in)?)
            } else {
                None
            };
            declarations.push(self.finish(decl_start, NodeKind::VariableDeclarator { id, init }));
            if self.cur().is_punct(",") {
                self.bump();
            } else {
                break;
            }
        }
        Ok(self.finish(
            start,
            NodeKind::VariableDeclaration { kind, declarations },
        ))
    }

    fn if_statement(&mut self) -> Result<NodeId, ParseError> {
        let start = self.pos;
        self.expect_keyword("if")?;
        self.expect_punct("(")?;
        let test = self.expression(false)?;
        self.expect_punct(")")?;
        let consequent = self.statement()?;
        let alternate = if self.cur().is_keyword("else") {
            self.bump();
            Some(self.statement()?)
        } else {
            None
        };
        Ok(self.finish(
            start,
            NodeKind::IfStatement {
                test,
                consequent,
                alternate,
            },
        ))
    }

    fn for_statement(&mut self) -> Result<NodeId, ParseError> {
        let start = self.pos;
        self.expect_keyword("for")?;
        self.expect_punct("(")?;

        let init = if self.cur().is_punct(";") {
            None
        } else if matches!(self.cur().value.as_str(), "var" | "let" | "const")
            && self.cur().ty == TokenType::Keyword
        {
            let decl = self.variable_declaration(true)?;
            if self.cur().is_keyword("in") {
                return self.for_in_tail(start, decl);
            }
            Some(decl)
        } else {
            let expr = self.expression(true)?;
            if self.cur().is_keyword("in") {
                return self.for_in_tail(start, expr);
            }
            Some(expr)
        };
        self.expect_punct(";")?;

        let test = if self.cur().is_punct(";") {
            None
        } else {
            Some(self.expression(false)?)
        };
        self.expect_punct(";")?;

        let update = if self.cur().is_punct(")") {
            None
        } else {
            Some(self.expression(false)?)
        };
        self.expect_punct(")")?;

        let body = self.statement()?;
        Ok(self.finish(
            start,
            NodeKind::ForStatement {
                init,
                test,
                update,
                body,
            },
        ))
    }

    fn for_in_tail(&mut self, start: usize, left: NodeId) -> Result<NodeId, ParseError> {
        self.expect_keyword("in")?;
        let right = self.expression(false)?;
        self.expect_punct(")")?;
        let body = self.statement()?;
        Ok(self.finish(start, NodeKind::ForInStatement { left, right, body }))
    }

    fn while_statement(&mut self) -> Result<NodeId, ParseError> {
        let start = self.pos;
        self.expect_keyword("while")?;
        self.expect_punct("(")?;
        let test = self.expression(false)?;
        self.expect_punct(")")?;
        let body = self.statement()?;
        Ok(self.finish(start, NodeKind::WhileStatement { test, body }))
    }

    fn do_while_statement(&mut self) -> Result<NodeId, ParseError> {
        let start = self.pos;
        self.expect_keyword("do")?;
        let body = self.statement()?;
        self.expect_keyword("while")?;
        self.expect_punct("(")?;
        let test = self.expression(false)?;
        self.expect_punct(")")?;
        if self.cur().is_punct(";") {
            self.bump();
        }
        Ok(self.finish(start, NodeKind::DoWhileStatement { body, test }))
    }

    fn switch_statement(&mut self) -> Result<NodeId, ParseError> {
        let start = self.pos;
        self.expect_keyword("switch")?;
        self.expect_punct("(")?;
        let discriminant = self.expression(false)?;
        self.expect_punct(")")?;
        self.expect_punct("{")?;

        let mut cases = Vec::new();
        let mut seen_default = false;
        while !self.cur().is_punct("}") {
            if self.at_eof() {
                return Err(self.unexpected());
            }
            let case_start = self.pos;
            let test = if self.cur().is_keyword("case") {
                self.bump();
                Some(self.expression(false)?)
            } else if self.cur().is_keyword("default") {
                if seen_default {
                    return Err(self.error_at_cur("More than one default clause in switch statement"));
                }
                seen_default = true;
                self.bump();
                None
            } else {
                return Err(self.unexpected());
            };
            self.expect_punct(":")?;
            let mut consequent = Vec::new();
            while !self.cur().is_punct("}")
                && !self.cur().is_keyword("case")
                && !self.cur().is_keyword("default")
            {
                if self.at_eof() {
                    return Err(self.unexpected());
                }
                consequent.push(self.statement()?);
            }
            cases.push(self.finish(case_start, NodeKind::SwitchCase { test, consequent }));
        }
        self.bump();
        Ok(self.finish(
            start,
            NodeKind::SwitchStatement { discriminant, cases },
        ))
    }

    fn try_statement(&mut self) -> Result<NodeId, ParseError> {
        let start = self.pos;
        self.expect_keyword("try")?;
        let block = self.block()?;
        let handler = if self.cur().is_keyword("catch") {
            let handler_start = self.pos;
            self.bump();
            self.expect_punct("(")?;
            let param = self.identifier()?;
            self.expect_punct(")")?;
            let body = self.block()?;
            Some(self.finish(handler_start, NodeKind::CatchClause { param, body }))
        } else {
            None
        };
        let finalizer = if self.cur().is_keyword("finally") {
            self.bump();
            Some(self.block()?)
        } else {
            None
        };
        if handler.is_none() && finalizer.is_none() {
            return Err(self.error_at_cur("Missing catch or finally after try"));
        }
        Ok(self.finish(
            start,
            NodeKind::TryStatement {
                block,
                handler,
                finalizer,
            },
        ))
    }

    fn return_statement(&mut self) -> Result<NodeId, ParseError> {
        let start = self.pos;
        self.expect_keyword("return")?;
        let argument = if self.cur().is_punct(";")
            || self.cur().is_punct("}")
            || self.at_eof()
            || self.newline_before_cur()
        {
            None
        } else {
            Some(self.expression(false)?)
        };
        self.consume_semicolon()?;
        Ok(self.finish(start, NodeKind::ReturnStatement { argument }))
    }

    fn throw_statement(&mut self) -> Result<NodeId, ParseError> {
        let start = self.pos;
        self.expect_keyword("throw")?;
        if self.newline_before_cur() {
            return Err(self.error_at_cur("Illegal newline after throw"));
        }
        let argument = self.expression(false)?;
        self.consume_semicolon()?;
        Ok(self.finish(start, NodeKind::ThrowStatement { argument }))
    }

    fn break_or_continue(&mut self) -> Result<NodeId, ParseError> {
        let start = self.pos;
        let is_break = self.cur().value == "break";
        self.bump();
        let label = if self.cur().ty == TokenType::Identifier && !self.newline_before_cur() {
            Some(self.identifier()?)
        } else {
            None
        };
        self.consume_semicolon()?;
        let kind = if is_break {
            NodeKind::BreakStatement { label }
        } else {
            NodeKind::ContinueStatement { label }
        };
        Ok(self.finish(start, kind))
    }

    fn with_statement(&mut self) -> Result<NodeId, ParseError> {
        let start = self.pos;
        self.expect_keyword("with")?;
        self.expect_punct("(")?;
        let object = self.expression(false)?;
        self.expect_punct(")")?;
        let body = self.statement()?;
        Ok(self.finish(start, NodeKind::WithStatement { object, body }))
    }

    fn labeled_statement(&mut self) -> Result<NodeId, ParseError> {
        let start = self.pos;
        let label = self.identifier()?;
        self.expect_punct(":")?;
        let body = self.statement()?;
        Ok(self.finish(start, NodeKind::LabeledStatement { label, body }))
    }

    fn expression_statement(&mut self) -> Result<NodeId, ParseError> {
        let start = self.pos;
        let expression = self.expression(false)?;
        self.consume_semicolon()?;
        Ok(self.finish(start, NodeKind::ExpressionStatement { expression }))
    }

    fn function(&mut self, declaration: bool) -> Result<NodeId, ParseError> {
        let start = self.pos;
        self.expect_keyword("function")?;
        let id = if self.cur().ty == TokenType::Identifier {
            Some(self.identifier()?)
        } else if declaration {
            return Err(self.unexpected());
        } else {
            None
        };

        self.expect_punct("(")?;
        let mut params = Vec::new();
        while !self.cur().is_punct(")") {
            params.push(self.identifier()?);
            if self.cur().is_punct(",") {
                self.bump();
            } else {
                break;
            }
        }
        self.expect_punct(")")?;
        let body = self.block()?;

        let kind = if declaration {
            NodeKind::FunctionDeclaration {
                id: id.expect("declaration always has a name"),
                params,
                body,
            }
        } else {
            NodeKind::FunctionExpression { id, params, body }
        };
        Ok(self.finish(start, kind))
    }

    fn identifier(&mut self) -> Result<NodeId, ParseError> {
        if self.cur().ty != TokenType::Identifier {
            return Err(self.unexpected());
        }
        let start = self.pos;
        let name = self.cur().value.clone();
        self.bump();
        Ok(self.finish(start, NodeKind::Identifier { name }))
    }

    // ---- expressions ----------------------------------------------------

    fn expression(&mut self, no_in: bool) -> Result<NodeId, ParseError> {
        let first = self.assignment_expression(no_in)?;
        if !self.cur().is_punct(",") {
            return Ok(first);
        }
        let mut expressions = vec![first];
        while self.cur().is_punct(",") {
            self.bump();
            expressions.push(self.assignment_expression(no_in)?);
        }
        let last = *expressions.last().unwrap();
        Ok(self.finish_span(first, last, NodeKind::SequenceExpression { expressions }))
    }

    fn assignment_expression(&mut self, no_in: bool) -> Result<NodeId, ParseError> {
        let left = self.conditional_expression(no_in)?;
        let op = self.cur().value.clone();
        let is_assign = self.cur().ty == TokenType::Punctuator
            && matches!(
                op.as_str(),
                "=" | "+=" | "-=" | "*=" | "/=" | "%=" | "<<=" | ">>=" | ">>>=" | "&=" | "|=" | "^="
            );
        if !is_assign {
            return Ok(left);
        }
        self.bump();
        let right = self.assignment_expression(no_in)?;
        Ok(self.finish_span(left, right, NodeKind::AssignmentExpression { op, left, right }))
    }

    fn conditional_expression(&mut self, no_in: bool) -> Result<NodeId, ParseError> {
        let test = self.binary_expression(1, no_in)?;
        if !self.cur().is_punct("?") {
            return Ok(test);
        }
        self.bump();
        let consequent = self.assignment_expression(false)?;
        self.expect_punct(":")?;
        let alternate = self.assignment_expression(no_in)?;
        Ok(self.finish_span(
            test,
            alternate,
            NodeKind::ConditionalExpression {
                test,
                consequent,
                alternate,
            },
        ))
    }

    fn binary_op_precedence(&self, no_in: bool) -> Option<u8> {
        let tok = self.cur();
        let prec = match tok.ty {
            TokenType::Punctuator => match tok.value.as_str() {
                "||" => 1,
                "&&" => 2,
                "|" => 3,
                "^" => 4,
                "&" => 5,
                "==" | "!=" | "===" | "!==" => 6,
                "<" | ">" | "<=" | ">=" => 7,
                "<<" | ">>" | ">>>" => 8,
                "+" | "-" => 9,
                "*" | "/" | "%" => 10,
                _ => return None,
            },
            TokenType::Keyword if tok.value == "instanceof" => 7,
            TokenType::Keyword if tok.value == "in" && !no_in => 7,
            _ => return None,
        };
        Some(prec)
    }

    fn binary_expression(&mut self, min_prec: u8, no_in: bool) -> Result<NodeId, ParseError> {
        let mut left = self.unary_expression(no_in)?;
        while let Some(prec) = self.binary_op_precedence(no_in) {
            if prec < min_prec {
                break;
            }
            let op = self.cur().value.clone();
            let logical = op == "&&" || op == "||";
            self.bump();
            let right = self.binary_expression(prec + 1, no_in)?;
            let kind = if logical {
                NodeKind::LogicalExpression { op, left, right }
            } else {
                NodeKind::BinaryExpression { op, left, right }
            };
            left = self.finish_span(left, right, kind);
        }
        Ok(left)
    }

    fn unary_expression(&mut self, no_in: bool) -> Result<NodeId, ParseError> {
        let tok = self.cur();
        let is_unary_kw = tok.ty == TokenType::Keyword
            && matches!(tok.value.as_str(), "delete" | "void" | "typeof");
        let is_unary_punct =
            tok.ty == TokenType::Punctuator && matches!(tok.value.as_str(), "+" | "-" | "~" | "!");
        let is_update =
            tok.ty == TokenType::Punctuator && matches!(tok.value.as_str(), "++" | "--");

        if is_unary_kw || is_unary_punct {
            let start = self.pos;
            let op = tok.value.clone();
            self.bump();
            let argument = self.unary_expression(no_in)?;
            let id = self.finish_span(argument, argument, NodeKind::UnaryExpression { op, argument });
            // Span from the operator token, not the operand.
            let start_tok = &self.tokens[self.code[start]];
            let node = &mut self.nodes[id.index()];
            node.range.start = start_tok.range.start;
            node.loc.start = start_tok.loc.start;
            return Ok(id);
        }
        if is_update {
            let start = self.pos;
            let op = tok.value.clone();
            self.bump();
            let argument = self.unary_expression(no_in)?;
            let id = self.finish_span(
                argument,
                argument,
                NodeKind::UpdateExpression {
                    op,
                    argument,
                    prefix: true,
                },
            );
            let start_tok = &self.tokens[self.code[start]];
            let node = &mut self.nodes[id.index()];
            node.range.start = start_tok.range.start;
            node.loc.start = start_tok.loc.start;
            return Ok(id);
        }

        self.postfix_expression()
    }

    fn postfix_expression(&mut self) -> Result<NodeId, ParseError> {
        let expr = self.left_hand_side_expression()?;
        let tok = self.cur();
        if tok.ty == TokenType::Punctuator
            && matches!(tok.value.as_str(), "++" | "--")
            && !self.newline_before_cur()
        {
            let op = tok.value.clone();
            self.bump();
            let id = self.finish_span(
                expr,
                expr,
                NodeKind::UpdateExpression {
                    op,
                    argument: expr,
                    prefix: false,
                },
            );
            let end_tok = &self.tokens[self.code[self.pos - 1]];
            let node = &mut self.nodes[id.index()];
            node.range.end = end_tok.range.end;
            node.loc.end = end_tok.loc.end;
            return Ok(id);
        }
        Ok(expr)
    }

    fn left_hand_side_expression(&mut self) -> Result<NodeId, ParseError> {
        let mut expr = if self.cur().is_keyword("new") {
            self.new_expression()?
        } else {
            self.primary_expression()?
        };

        loop {
            let tok = self.cur();
            if tok.is_punct(".") {
                self.bump();
                let property = self.identifier_name()?;
                expr = self.finish_span(
                    expr,
                    property,
                    NodeKind::MemberExpression {
                        object: expr,
                        property,
                        computed: false,
                    },
                );
            } else if tok.is_punct("[") {
                self.bump();
                let property = self.expression(false)?;
                self.expect_punct("]")?;
                let id = self.finish_span(
                    expr,
                    property,
                    NodeKind::MemberExpression {
                        object: expr,
                        property,
                        computed: true,
                    },
                );
                self.widen_to_prev(id);
                expr = id;
            } else if tok.is_punct("(") {
                let arguments = self.arguments()?;
                let id = self.finish_span(
                    expr,
                    expr,
                    NodeKind::CallExpression {
                        callee: expr,
                        arguments,
                    },
                );
                self.widen_to_prev(id);
                expr = id;
            } else {
                break;
            }
        }
        Ok(expr)
    }

    /// Extend a node's end over the last consumed token (closing `]`/`)`).
    fn widen_to_prev(&mut self, id: NodeId) {
        let end_tok = &self.tokens[self.code[self.pos.saturating_sub(1)]];
        let node = &mut self.nodes[id.index()];
        if end_tok.range.end > node.range.end {
            node.range.end = end_tok.range.end;
            node.loc.end = end_tok.loc.end;
        }
    }

    fn new_expression(&mut self) -> Result<NodeId, ParseError> {
        let start = self.pos;
        self.expect_keyword("new")?;
        let mut callee = if self.cur().is_keyword("new") {
            self.new_expression()?
        } else {
            self.primary_expression()?
        };
        loop {
            let tok = self.cur();
            if tok.is_punct(".") {
                self.bump();
                let property = self.identifier_name()?;
                callee = self.finish_span(
                    callee,
                    property,
                    NodeKind::MemberExpression {
                        object: callee,
                        property,
                        computed: false,
                    },
                );
            } else if tok.is_punct("[") {
                self.bump();
                let property = self.expression(false)?;
                self.expect_punct("]")?;
                let id = self.finish_span(
                    callee,
                    property,
                    NodeKind::MemberExpression {
                        object: callee,
                        property,
                        computed: true,
                    },
                );
                self.widen_to_prev(id);
                callee = id;
            } else {
                break;
            }
        }
        let arguments = if self.cur().is_punct("(") {
            self.arguments()?
        } else {
            Vec::new()
        };
        Ok(self.finish(start, NodeKind::NewExpression { callee, arguments }))
    }

    fn arguments(&mut self) -> Result<Vec<NodeId>, ParseError> {
        self.expect_punct("(")?;
        let mut args = Vec::new();
        while !self.cur().is_punct(")") {
            args.push(self.assignment_expression(false)?);
            if self.cur().is_punct(",") {
                self.bump();
            } else {
                break;
            }
        }
        self.expect_punct(")")?;
        Ok(args)
    }

    /// A property name after `.`: identifiers and reserved words both work.
    fn identifier_name(&mut self) -> Result<NodeId, ParseError> {
        let tok = self.cur();
        if !matches!(
            tok.ty,
            TokenType::Identifier | TokenType::Keyword | TokenType::Boolean | TokenType::Null
        ) {
            return Err(self.unexpected());
        }
        let start = self.pos;
        let name = tok.value.clone();
        self.bump();
        Ok(self.finish(start, NodeKind::Identifier { name }))
    }

    fn primary_expression(&mut self) -> Result<NodeId, ParseError> {
        let tok = self.cur();
        match tok.ty {
            TokenType::Punctuator => match tok.value.as_str() {
                "(" => {
                    self.bump();
                    let expr = self.expression(false)?;
                    self.expect_punct(")")?;
                    Ok(expr)
                }
                "[" => self.array_literal(),
                "{" => self.object_literal(),
                _ => Err(self.unexpected()),
            },
            TokenType::Keyword => match tok.value.as_str() {
                "this" => {
                    let start = self.pos;
                    self.bump();
                    Ok(self.finish(start, NodeKind::ThisExpression))
                }
                "function" => self.function(false),
                _ => Err(self.unexpected()),
            },
            TokenType::Identifier => self.identifier(),
            TokenType::Numeric
            | TokenType::String
            | TokenType::Boolean
            | TokenType::Null
            | TokenType::RegularExpression => {
                let start = self.pos;
                let raw = self.src[tok.range.clone()].to_string();
                self.bump();
                Ok(self.finish(start, NodeKind::Literal { raw }))
            }
            _ => Err(self.unexpected()),
        }
    }

    fn array_literal(&mut self) -> Result<NodeId, ParseError> {
        let start = self.pos;
        self.expect_punct("[")?;
        let mut elements = Vec::new();
        loop {
            if self.cur().is_punct("]") {
                break;
            }
            if self.cur().is_punct(",") {
                elements.push(None);
                self.bump();
                continue;
            }
            elements.push(Some(self.assignment_expression(false)?));
            if self.cur().is_punct(",") {
                self.bump();
            } else {
                break;
            }
        }
        self.expect_punct("]")?;
        Ok(self.finish(start, NodeKind::ArrayExpression { elements }))
    }

    fn object_literal(&mut self) -> Result<NodeId, ParseError> {
        let start = self.pos;
        self.expect_punct("{")?;
        let mut properties = Vec::new();
        while !self.cur().is_punct("}") {
            properties.push(self.property()?);
            if self.cur().is_punct(",") {
                self.bump();
            } else {
                break;
            }
        }
        self.expect_punct("}")?;
        Ok(self.finish(start, NodeKind::ObjectExpression { properties }))
    }

    fn property(&mut self) -> Result<NodeId, ParseError> {
        let start = self.pos;
        let tok = self.cur();

        // `get name() {...}` / `set name(v) {...}` accessors; a `get`/`set`
        // immediately followed by `:` or `(` is a plain key instead.
        if tok.ty == TokenType::Identifier
            && (tok.value == "get" || tok.value == "set")
            && !matches!(self.peek().value.as_str(), ":" | "," | "}" | "(")
        {
            let kind = if tok.value == "get" {
                PropertyKind::Get
            } else {
                PropertyKind::Set
            };
            self.bump();
            let key = self.property_key()?;
            let fn_start = self.pos;
            self.expect_punct("(")?;
            let mut params = Vec::new();
            while !self.cur().is_punct(")") {
                params.push(self.identifier()?);
                if self.cur().is_punct(",") {
                    self.bump();
                } else {
                    break;
                }
            }
            self.expect_punct(")")?;
            let body = self.block()?;
            let value = self.finish(
                fn_start,
                NodeKind::FunctionExpression {
                    id: None,
                    params,
                    body,
                },
            );
            return Ok(self.finish(start, NodeKind::Property { kind, key, value }));
        }

        let key = self.property_key()?;
        self.expect_punct(":")?;
        let value = self.assignment_expression(false)?;
        Ok(self.finish(
            start,
            NodeKind::Property {
                kind: PropertyKind::Init,
                key,
                value,
            },
        ))
    }

    fn property_key(&mut self) -> Result<NodeId, ParseError> {
        let tok = self.cur();
        match tok.ty {
            TokenType::Identifier | TokenType::Keyword | TokenType::Boolean | TokenType::Null => {
                self.identifier_name()
            }
            TokenType::Numeric | TokenType::String => {
                let start = self.pos;
                let raw = self.src[tok.range.clone()].to_string();
                self.bump();
                Ok(self.finish(start, NodeKind::Literal { raw }))
            }
            _ => Err(self.unexpected()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::node::NodeType;

    fn types_of(src: &str, ty: NodeType) -> usize {
        let tree = parse(src).unwrap();
        tree.nodes_of_type(&[ty]).len()
    }

    #[test]
    fn parses_statements() {
        let src = "var a = 1, b;\nif (a) { b = a; } else b = 0;\nfor (var i = 0; i < 10; i++) a += i;\nwhile (a) { a--; }\ndo { a++; } while (a < 3);\ntry { f(); } catch (e) { g(e); } finally { h(); }\nswitch (a) { case 1: f(); break; default: g(); }\nlabel: for (var k in b) { continue label; }\n";
        let tree = parse(src).unwrap();
        assert_eq!(tree.nodes_of_type(&[NodeType::SwitchCase]).len(), 2);
        assert_eq!(tree.nodes_of_type(&[NodeType::CatchClause]).len(), 1);
        assert_eq!(tree.nodes_of_type(&[NodeType::LabeledStatement]).len(), 1);
        assert_eq!(tree.nodes_of_type(&[NodeType::ForInStatement]).len(), 1);
    }

    #[test]
    fn parses_expressions() {
        let src = "x = a ? b + c * 2 : new Foo(a.b[c], /re/g).run();\ny = [1, , 'two'].length;\nz = { a: 1, 'b': f, get c() { return 1; } };";
        let tree = parse(src).unwrap();
        assert_eq!(tree.nodes_of_type(&[NodeType::NewExpression]).len(), 1);
        assert_eq!(tree.nodes_of_type(&[NodeType::ConditionalExpression]).len(), 1);
        assert_eq!(tree.nodes_of_type(&[NodeType::Property]).len(), 3);
    }

    #[test]
    fn anonymous_function_statement_fails() {
        let err = parse("function () {}").unwrap_err();
        assert_eq!(err.message, "Unexpected token (");
        assert_eq!(err.line, 1);
        assert_eq!(err.column, 9);
    }

    #[test]
    fn asi_inserts_semicolons() {
        assert!(parse("a = 1\nb = 2").is_ok());
        assert!(parse("a = 1 b = 2").is_err());
        // `return` followed by a newline never takes an argument.
        let tree = parse("function f() { return\n1; }").unwrap();
        let ret = tree.nodes_of_type(&[NodeType::ReturnStatement])[0];
        assert!(matches!(
            tree.node(ret).kind,
            NodeKind::ReturnStatement { argument: None }
        ));
    }

    #[test]
    fn parent_links_are_set() {
        let tree = parse("if (a) { b(); }").unwrap();
        let call = tree.nodes_of_type(&[NodeType::CallExpression])[0];
        let mut tys: Vec<NodeType> = tree
            .ancestors(call)
            .map(|id| tree.node(id).ty())
            .collect();
        assert_eq!(tys.remove(0), NodeType::CallExpression);
        assert!(tys.contains(&NodeType::BlockStatement));
        assert_eq!(*tys.last().unwrap(), NodeType::Program);
    }

    #[test]
    fn tokens_link_to_innermost_node() {
        let tree = parse("if (a) { b(); }").unwrap();
        let (open_brace, _) = tree
            .tokens()
            .find(|(_, t)| t.is_punct("{"))
            .unwrap();
        assert_eq!(
            tree.node(tree.enclosing_node(open_brace)).ty(),
            NodeType::BlockStatement
        );
        let (if_kw, _) = tree.tokens().find(|(_, t)| t.is_keyword("if")).unwrap();
        assert_eq!(
            tree.node(tree.enclosing_node(if_kw)).ty(),
            NodeType::IfStatement
        );
    }

    #[test]
    fn object_literals_allow_trailing_commas() {
        assert_eq!(types_of("x = {a: 1, b: 2,};", NodeType::Property), 2);
    }
}

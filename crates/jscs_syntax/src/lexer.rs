//! A hand-written ECMAScript 5 lexer.
//!
//! The lexer produces every token in the file, comments included, each with
//! its byte range and line/column location. Regex literals are disambiguated
//! from division with the previous-significant-token heuristic.

use crate::token::{Loc, Position, Token, TokenType};
use crate::ParseError;

pub(crate) const KEYWORDS: &[&str] = &[
    "break",
    "case",
    "catch",
    "continue",
    "debugger",
    "default",
    "delete",
    "do",
    "else",
    "finally",
    "for",
    "function",
    "if",
    "in",
    "instanceof",
    "new",
    "return",
    "switch",
    "this",
    "throw",
    "try",
    "typeof",
    "var",
    "let",
    "const",
    "void",
    "while",
    "with",
];

// Longest first so that `>>>=` wins over `>>>`, `>>`, and `>`.
const PUNCTUATORS: &[&str] = &[
    ">>>=", "===", "!==", ">>>", "<<=", ">>=", "<=", ">=", "==", "!=", "++", "--", "<<", ">>",
    "&&", "||", "+=", "-=", "*=", "/=", "%=", "&=", "|=", "^=", "{", "}", "(", ")", "[", "]",
    ";", ",", "<", ">", "+", "-", "*", "%", "&", "|", "^", "!", "~", "?", ":", "=", ".", "/",
];

pub struct Lexer<'s> {
    src: &'s str,
    bytes: &'s [u8],
    pos: usize,
    line: u32,
    col: u32,
}

impl<'s> Lexer<'s> {
    pub fn new(src: &'s str) -> Self {
        Self {
            src,
            bytes: src.as_bytes(),
            pos: 0,
            line: 1,
            col: 0,
        }
    }

    /// Lex the whole source, appending a zero-width EOF token at the end.
    pub fn tokenize(mut self) -> Result<Vec<Token>, ParseError> {
        let mut tokens = Vec::new();
        // Last non-comment token, used for regex/division disambiguation.
        let mut last_code: Option<usize> = None;

        loop {
            self.skip_whitespace();
            if self.pos >= self.bytes.len() {
                break;
            }
            let token = self.next_token(last_code.map(|i| &tokens[i]))?;
            if !token.is_comment() {
                last_code = Some(tokens.len());
            }
            tokens.push(token);
        }

        let eof_pos = self.position();
        tokens.push(Token {
            ty: TokenType::Eof,
            value: String::new(),
            range: self.src.len()..self.src.len(),
            loc: Loc::new(eof_pos, eof_pos),
        });
        Ok(tokens)
    }

    fn position(&self) -> Position {
        Position::new(self.line, self.col)
    }

    fn error(&self, message: impl Into<String>) -> ParseError {
        ParseError {
            message: message.into(),
            line: self.line,
            column: self.col,
            index: self.pos,
        }
    }

    fn peek(&self) -> Option<u8> {
        self.bytes.get(self.pos).copied()
    }

    fn peek_at(&self, offset: usize) -> Option<u8> {
        self.bytes.get(self.pos + offset).copied()
    }

    /// Advance over one char, maintaining the line/column counters.
    fn bump(&mut self) {
        let ch = self.src[self.pos..].chars().next().expect("bump at eof");
        self.pos += ch.len_utf8();
        if ch == '\n' {
            self.line += 1;
            self.col = 0;
        } else {
            self.col += 1;
        }
    }

    fn skip_whitespace(&mut self) {
        while let Some(b) = self.peek() {
            match b {
                b' ' | b'\t' | b'\r' | b'\n' | 0x0b | 0x0c => self.bump(),
                _ => break,
            }
        }
    }

    fn next_token(&mut self, last_code: Option<&Token>) -> Result<Token, ParseError> {
        let b = self.peek().unwrap();

        if b == b'/' {
            match self.peek_at(1) {
                Some(b'/') => return self.line_comment(),
                Some(b'*') => return self.block_comment(),
                _ => {
                    if regex_allowed(last_code) {
                        return self.regex();
                    }
                }
            }
        }

        if b == b'"' || b == b'\'' {
            return self.string(b);
        }
        if b.is_ascii_digit() || (b == b'.' && self.peek_at(1).map_or(false, |c| c.is_ascii_digit()))
        {
            return self.number();
        }

        let ch = self.src[self.pos..].chars().next().unwrap();
        if is_ident_start(ch) {
            return Ok(self.ident());
        }

        self.punctuator()
    }

    fn token_from(&self, ty: TokenType, start: usize, start_pos: Position) -> Token {
        let value = match ty {
            TokenType::LineComment => self.src[start + 2..self.pos].to_string(),
            TokenType::BlockComment => self.src[start + 2..self.pos - 2].to_string(),
            _ => self.src[start..self.pos].to_string(),
        };
        Token {
            ty,
            value,
            range: start..self.pos,
            loc: Loc::new(start_pos, self.position()),
        }
    }

    fn line_comment(&mut self) -> Result<Token, ParseError> {
        let start = self.pos;
        let start_pos = self.position();
        self.bump();
        self.bump();
        while let Some(b) = self.peek() {
            if b == b'\n' {
                break;
            }
            self.bump();
        }
        Ok(self.token_from(TokenType::LineComment, start, start_pos))
    }

    fn block_comment(&mut self) -> Result<Token, ParseError> {
        let start = self.pos;
        let start_pos = self.position();
        self.bump();
        self.bump();
        loop {
            match self.peek() {
                Some(b'*') if self.peek_at(1) == Some(b'/') => {
                    self.bump();
                    self.bump();
                    return Ok(self.token_from(TokenType::BlockComment, start, start_pos));
                }
                Some(_) => self.bump(),
                None => return Err(self.error("Unterminated block comment")),
            }
        }
    }

    fn string(&mut self, quote: u8) -> Result<Token, ParseError> {
        let start = self.pos;
        let start_pos = self.position();
        self.bump();
        loop {
            match self.peek() {
                Some(b) if b == quote => {
                    self.bump();
                    return Ok(self.token_from(TokenType::String, start, start_pos));
                }
                Some(b'\\') => {
                    self.bump();
                    if self.peek().is_some() {
                        self.bump();
                    }
                }
                Some(b'\n') | None => return Err(self.error("Unterminated string literal")),
                Some(_) => self.bump(),
            }
        }
    }

    fn number(&mut self) -> Result<Token, ParseError> {
        let start = self.pos;
        let start_pos = self.position();

        if self.peek() == Some(b'0') && matches!(self.peek_at(1), Some(b'x') | Some(b'X')) {
            self.bump();
            self.bump();
            if !self.peek().map_or(false, |b| b.is_ascii_hexdigit()) {
                return Err(self.error("Missing hexadecimal digits after '0x'"));
            }
            while self.peek().map_or(false, |b| b.is_ascii_hexdigit()) {
                self.bump();
            }
            return Ok(self.token_from(TokenType::Numeric, start, start_pos));
        }

        while self.peek().map_or(false, |b| b.is_ascii_digit()) {
            self.bump();
        }
        if self.peek() == Some(b'.') {
            self.bump();
            while self.peek().map_or(false, |b| b.is_ascii_digit()) {
                self.bump();
            }
        }
        if matches!(self.peek(), Some(b'e') | Some(b'E')) {
            self.bump();
            if matches!(self.peek(), Some(b'+') | Some(b'-')) {
                self.bump();
            }
            if !self.peek().map_or(false, |b| b.is_ascii_digit()) {
                return Err(self.error("Missing digits after exponent"));
            }
            while self.peek().map_or(false, |b| b.is_ascii_digit()) {
                self.bump();
            }
        }
        Ok(self.token_from(TokenType::Numeric, start, start_pos))
    }

    fn ident(&mut self) -> Token {
        let start = self.pos;
        let start_pos = self.position();
        while let Some(ch) = self.src[self.pos..].chars().next() {
            if is_ident_continue(ch) {
                self.bump();
            } else {
                break;
            }
        }
        let text = &self.src[start..self.pos];
        let ty = match text {
            "true" | "false" => TokenType::Boolean,
            "null" => TokenType::Null,
            _ if KEYWORDS.contains(&text) => TokenType::Keyword,
            _ => TokenType::Identifier,
        };
        self.token_from(ty, start, start_pos)
    }

    fn punctuator(&mut self) -> Result<Token, ParseError> {
        let rest = &self.src[self.pos..];
        for punct in PUNCTUATORS {
            if rest.starts_with(punct) {
                let start = self.pos;
                let start_pos = self.position();
                for _ in 0..punct.len() {
                    self.bump();
                }
                return Ok(self.token_from(TokenType::Punctuator, start, start_pos));
            }
        }
        let ch = rest.chars().next().unwrap();
        Err(self.error(format!("Unexpected character '{}'", ch)))
    }

    fn regex(&mut self) -> Result<Token, ParseError> {
        let start = self.pos;
        let start_pos = self.position();
        self.bump();
        let mut in_class = false;
        loop {
            match self.peek() {
                Some(b'\\') => {
                    self.bump();
                    if self.peek().is_some() {
                        self.bump();
                    }
                }
                Some(b'[') => {
                    in_class = true;
                    self.bump();
                }
                Some(b']') => {
                    in_class = false;
                    self.bump();
                }
                Some(b'/') if !in_class => {
                    self.bump();
                    break;
                }
                Some(b'\n') | None => return Err(self.error("Unterminated regular expression")),
                Some(_) => self.bump(),
            }
        }
        while let Some(ch) = self.src[self.pos..].chars().next() {
            if ch.is_ascii_alphabetic() {
                self.bump();
            } else {
                break;
            }
        }
        Ok(self.token_from(TokenType::RegularExpression, start, start_pos))
    }
}

fn is_ident_start(ch: char) -> bool {
    ch == '_' || ch == '$' || ch.is_alphabetic()
}

fn is_ident_continue(ch: char) -> bool {
    ch == '_' || ch == '$' || ch.is_alphanumeric()
}

/// Whether a `/` at the current point starts a regex literal rather than a
/// division, judged by the previous significant token. `this`, closing
/// brackets, identifiers, and literals end value positions, so a `/` after
/// them is division.
fn regex_allowed(last: Option<&Token>) -> bool {
    match last {
        None => true,
        Some(tok) => match tok.ty {
            TokenType::Identifier
            | TokenType::Numeric
            | TokenType::String
            | TokenType::Boolean
            | TokenType::Null
            | TokenType::RegularExpression => false,
            TokenType::Keyword => tok.value != "this",
            TokenType::Punctuator => !matches!(tok.value.as_str(), ")" | "]" | "}" | "++" | "--"),
            _ => true,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kinds(src: &str) -> Vec<(TokenType, String)> {
        Lexer::new(src)
            .tokenize()
            .unwrap()
            .into_iter()
            .map(|t| (t.ty, t.value))
            .collect()
    }

    #[test]
    fn lexes_mixed_tokens() {
        let toks = kinds("var x = 10.5; // done");
        assert_eq!(
            toks,
            vec![
                (TokenType::Keyword, "var".to_string()),
                (TokenType::Identifier, "x".to_string()),
                (TokenType::Punctuator, "=".to_string()),
                (TokenType::Numeric, "10.5".to_string()),
                (TokenType::Punctuator, ";".to_string()),
                (TokenType::LineComment, " done".to_string()),
                (TokenType::Eof, String::new()),
            ]
        );
    }

    #[test]
    fn tracks_positions_across_lines() {
        let toks = Lexer::new("a;\n  b;").tokenize().unwrap();
        let b = toks.iter().find(|t| t.value == "b").unwrap();
        assert_eq!(b.loc.start, Position::new(2, 2));
        assert_eq!(b.range, 5..6);
    }

    #[test]
    fn block_comment_value_excludes_delimiters() {
        let toks = kinds("/* inner */");
        assert_eq!(toks[0], (TokenType::BlockComment, " inner ".to_string()));
    }

    #[test]
    fn distinguishes_regex_from_division() {
        let toks = kinds("a = b / c; x = /ab[/]c/g;");
        assert!(toks
            .iter()
            .any(|(ty, v)| *ty == TokenType::RegularExpression && v == "/ab[/]c/g"));
        assert_eq!(
            toks.iter()
                .filter(|(ty, _)| *ty == TokenType::RegularExpression)
                .count(),
            1
        );
    }

    #[test]
    fn longest_punctuator_wins() {
        let toks = kinds("a >>>= b === c");
        assert!(toks.iter().any(|(_, v)| v == ">>>="));
        assert!(toks.iter().any(|(_, v)| v == "==="));
    }

    #[test]
    fn unterminated_string_is_an_error() {
        let err = Lexer::new("var a = 'oops").tokenize().unwrap_err();
        assert!(err.message.contains("Unterminated string"));
        assert_eq!(err.line, 1);
    }
}

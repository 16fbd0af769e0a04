//! The scanner: a single-pass cursor over the source text with at most two
//! characters of lookahead. Tokens are pulled one at a time; the stream ends
//! with a single `$` token or with the first lexical error.

use crate::error::LexicalError;
use crate::scanner::token::{Span, Token, TokenKind, keyword_kind};

/// Sentinel returned by lookahead past the end of input.
const EOF_CHAR: char = '\0';

fn is_ident_start(c: char) -> bool {
    c.is_ascii_alphabetic() || c == '_'
}

fn is_ident_continue(c: char) -> bool {
    is_ident_start(c) || c.is_ascii_digit()
}

/// Cursor-based scanner. `pos` is a byte offset into `source`; `line` and
/// `column` are 1-based and track the position of the next unconsumed
/// character. Not restartable mid-stream: to rescan, build a new `Lexer`.
pub struct Lexer<'src> {
    source: &'src str,
    pos: usize,
    line: usize,
    column: usize,
    done: bool,
}

impl<'src> Lexer<'src> {
    pub fn new(source: &'src str) -> Self {
        Self {
            source,
            pos: 0,
            line: 1,
            column: 1,
            done: false,
        }
    }

    fn peek(&self) -> char {
        self.source[self.pos..].chars().next().unwrap_or(EOF_CHAR)
    }

    fn peek_next(&self) -> char {
        self.source[self.pos..].chars().nth(1).unwrap_or(EOF_CHAR)
    }

    /// Consume one character. `line` increments and `column` resets to 1 on
    /// a newline; every other character advances `column` by one.
    fn advance(&mut self) -> char {
        let ch = self.peek();
        if ch != EOF_CHAR {
            self.pos += ch.len_utf8();
            if ch == '\n' {
                self.line += 1;
                self.column = 1;
            } else {
                self.column += 1;
            }
        }
        ch
    }

    /// Consume the current character only if it equals `expected`.
    fn match_char(&mut self, expected: char) -> bool {
        if self.peek() == expected {
            self.advance();
            return true;
        }
        false
    }

    /// Skip whitespace, `//` line comments and `/* ... */` block comments.
    /// A block comment left open at end of input is an error at the point
    /// where the scan stalled.
    fn skip_whitespace(&mut self) -> Result<(), LexicalError> {
        loop {
            match self.peek() {
                ' ' | '\t' | '\r' | '\n' => {
                    self.advance();
                }
                '/' if self.peek_next() == '/' => {
                    while self.peek() != '\n' && self.peek() != EOF_CHAR {
                        self.advance();
                    }
                }
                '/' if self.peek_next() == '*' => {
                    self.advance();
                    self.advance();
                    loop {
                        if self.peek() == EOF_CHAR {
                            return Err(LexicalError::unterminated_block_comment(
                                self.line,
                                self.column,
                                Span::new(self.pos, 0),
                            ));
                        }
                        // first `*/` closes the comment; no nesting
                        if self.peek() == '*' && self.peek_next() == '/' {
                            self.advance();
                            self.advance();
                            break;
                        }
                        self.advance();
                    }
                }
                _ => break,
            }
        }
        Ok(())
    }

    fn identifier(&mut self) -> Token {
        debug_assert!(
            is_ident_start(self.peek()),
            "identifier scan entered on a non-letter"
        );
        let (start, line, column) = (self.pos, self.line, self.column);
        self.advance();
        while is_ident_continue(self.peek()) {
            self.advance();
        }
        let lexeme = &self.source[start..self.pos];
        let kind = keyword_kind(lexeme).unwrap_or(TokenKind::Identifier);
        Token::new(kind, lexeme, line, column, Span::new(start, self.pos - start))
    }

    /// integer = digit+ ; real = digit+ '.' digit+. The dot is consumed only
    /// when a digit follows it, so `3.` scans as the integer `3` with the dot
    /// left for the next token attempt.
    fn number(&mut self) -> Result<Token, LexicalError> {
        debug_assert!(
            self.peek().is_ascii_digit(),
            "number scan entered on a non-digit"
        );
        let (start, line, column) = (self.pos, self.line, self.column);
        while self.peek().is_ascii_digit() {
            self.advance();
        }
        let mut kind = TokenKind::Integer;
        if self.peek() == '.' && self.peek_next().is_ascii_digit() {
            self.advance();
            if !self.peek().is_ascii_digit() {
                // unreachable while the dot is only consumed with a digit
                // behind it; fail loudly rather than truncate
                return Err(LexicalError::malformed_real(
                    self.line,
                    self.column,
                    Span::new(self.pos, 0),
                ));
            }
            while self.peek().is_ascii_digit() {
                self.advance();
            }
            kind = TokenKind::Real;
        }
        let lexeme = &self.source[start..self.pos];
        Ok(Token::new(
            kind,
            lexeme,
            line,
            column,
            Span::new(start, self.pos - start),
        ))
    }

    /// The lexeme is the content between the quotes. A backslash and the
    /// character after it are stored verbatim (no escape decoding); the only
    /// effect is that `\"` does not close the string.
    fn string(&mut self) -> Result<Token, LexicalError> {
        debug_assert!(self.peek() == '"', "string scan entered off a quote");
        let (quote, line, column) = (self.pos, self.line, self.column);
        self.advance();
        let start = self.pos;
        loop {
            match self.peek() {
                EOF_CHAR => {
                    return Err(LexicalError::unterminated_string(
                        line,
                        column,
                        Span::new(quote, 1),
                    ));
                }
                '\n' => {
                    return Err(LexicalError::newline_in_string(
                        self.line,
                        self.column,
                        Span::new(self.pos, 1),
                    ));
                }
                '"' => {
                    let lexeme = &self.source[start..self.pos];
                    self.advance();
                    return Ok(Token::new(
                        TokenKind::Str,
                        lexeme,
                        line,
                        column,
                        Span::new(quote, self.pos - quote),
                    ));
                }
                '\\' => {
                    self.advance();
                    if self.peek() != EOF_CHAR {
                        self.advance();
                    }
                }
                _ => {
                    self.advance();
                }
            }
        }
    }

    /// Two-character operators win over their one-character prefixes. A
    /// character matching no rule is consumed and reported at its own
    /// position.
    fn operator(&mut self) -> Result<Token, LexicalError> {
        let (start, line, column) = (self.pos, self.line, self.column);
        let ch = self.advance();
        let kind = match ch {
            '=' if self.match_char('=') => TokenKind::EqOp,
            '!' if self.match_char('=') => TokenKind::EqOp,
            '<' if self.match_char('=') => TokenKind::RelOp,
            '>' if self.match_char('=') => TokenKind::RelOp,
            '&' if self.match_char('&') => TokenKind::AndOp,
            '|' if self.match_char('|') => TokenKind::OrOp,
            '+' | '-' => TokenKind::AddOp,
            '*' | '/' => TokenKind::MulOp,
            '<' | '>' => TokenKind::RelOp,
            '!' => TokenKind::NotOp,
            '=' => TokenKind::Assign,
            ';' => TokenKind::Semicolon,
            ',' => TokenKind::Comma,
            '(' => TokenKind::LeftParen,
            ')' => TokenKind::RightParen,
            '{' => TokenKind::LeftBrace,
            '}' => TokenKind::RightBrace,
            other => {
                return Err(LexicalError::unexpected_symbol(
                    other,
                    line,
                    column,
                    Span::new(start, other.len_utf8()),
                ));
            }
        };
        let lexeme = &self.source[start..self.pos];
        Ok(Token::new(
            kind,
            lexeme,
            line,
            column,
            Span::new(start, self.pos - start),
        ))
    }

    /// Produce the next token. At end of input this yields the `$` token;
    /// pulling through the `Iterator` impl stops the stream there.
    pub fn next_token(&mut self) -> Result<Token, LexicalError> {
        self.skip_whitespace()?;
        let ch = self.peek();
        if ch == EOF_CHAR {
            return Ok(Token::new(
                TokenKind::Eof,
                "$",
                self.line,
                self.column,
                Span::new(self.pos, 0),
            ));
        }
        if is_ident_start(ch) {
            return Ok(self.identifier());
        }
        if ch.is_ascii_digit() {
            return self.number();
        }
        if ch == '"' {
            return self.string();
        }
        self.operator()
    }
}

impl Iterator for Lexer<'_> {
    type Item = Result<Token, LexicalError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }
        let item = self.next_token();
        match &item {
            Ok(token) if token.kind == TokenKind::Eof => self.done = true,
            Err(_) => self.done = true,
            Ok(_) => {}
        }
        Some(item)
    }
}

/// Scan the whole source, returning every token (ending with `$`) or the
/// first lexical error.
pub fn scan_all(source: &str) -> Result<Vec<Token>, LexicalError> {
    Lexer::new(source).collect()
}

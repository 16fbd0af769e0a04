use miette::{Diagnostic, NamedSource, SourceSpan};
use thiserror::Error;

use crate::scanner::token::Span;

/// A failure of the scan. Terminal: once one of these is raised, the token
/// stream ends and the scanner must not be reused past the failure point.
#[derive(Error, Debug, Diagnostic)]
pub enum LexicalError {
    #[error("unterminated block comment at line {line}, column {column}")]
    #[diagnostic(code(minilex::unterminated_comment))]
    UnterminatedBlockComment {
        line: usize,
        column: usize,
        #[label("comment still open here")]
        span: SourceSpan,
        #[source_code]
        src: NamedSource<String>,
    },

    #[error("expected digit after decimal point at line {line}, column {column}")]
    #[diagnostic(code(minilex::malformed_real))]
    MalformedReal {
        line: usize,
        column: usize,
        #[label("expected a digit here")]
        span: SourceSpan,
        #[source_code]
        src: NamedSource<String>,
    },

    #[error("unterminated string at line {line}, column {column}")]
    #[diagnostic(code(minilex::unterminated_string))]
    UnterminatedString {
        line: usize,
        column: usize,
        #[label("string starts here")]
        span: SourceSpan,
        #[source_code]
        src: NamedSource<String>,
    },

    #[error("newline inside string at line {line}, column {column}")]
    #[diagnostic(code(minilex::newline_in_string))]
    NewlineInString {
        line: usize,
        column: usize,
        #[label("line break here")]
        span: SourceSpan,
        #[source_code]
        src: NamedSource<String>,
    },

    #[error("unexpected symbol '{symbol}' at line {line}, column {column}")]
    #[diagnostic(code(minilex::unexpected_symbol))]
    UnexpectedSymbol {
        symbol: char,
        line: usize,
        column: usize,
        #[label("here")]
        span: SourceSpan,
        #[source_code]
        src: NamedSource<String>,
    },
}

impl LexicalError {
    pub fn unterminated_block_comment(line: usize, column: usize, span: Span) -> Self {
        Self::UnterminatedBlockComment {
            line,
            column,
            span: span.into(),
            src: NamedSource::new("input", String::new()),
        }
    }

    pub fn malformed_real(line: usize, column: usize, span: Span) -> Self {
        Self::MalformedReal {
            line,
            column,
            span: span.into(),
            src: NamedSource::new("input", String::new()),
        }
    }

    pub fn unterminated_string(line: usize, column: usize, span: Span) -> Self {
        Self::UnterminatedString {
            line,
            column,
            span: span.into(),
            src: NamedSource::new("input", String::new()),
        }
    }

    pub fn newline_in_string(line: usize, column: usize, span: Span) -> Self {
        Self::NewlineInString {
            line,
            column,
            span: span.into(),
            src: NamedSource::new("input", String::new()),
        }
    }

    pub fn unexpected_symbol(symbol: char, line: usize, column: usize, span: Span) -> Self {
        Self::UnexpectedSymbol {
            symbol,
            line,
            column,
            span: span.into(),
            src: NamedSource::new("input", String::new()),
        }
    }

    /// 1-based line of the failure point.
    pub fn line(&self) -> usize {
        match self {
            Self::UnterminatedBlockComment { line, .. }
            | Self::MalformedReal { line, .. }
            | Self::UnterminatedString { line, .. }
            | Self::NewlineInString { line, .. }
            | Self::UnexpectedSymbol { line, .. } => *line,
        }
    }

    /// 1-based column of the failure point.
    pub fn column(&self) -> usize {
        match self {
            Self::UnterminatedBlockComment { column, .. }
            | Self::MalformedReal { column, .. }
            | Self::UnterminatedString { column, .. }
            | Self::NewlineInString { column, .. }
            | Self::UnexpectedSymbol { column, .. } => *column,
        }
    }

    /// Attach source code for fancy miette diagnostics
    pub fn with_source_code(mut self, name: impl AsRef<str>, source: impl Into<String>) -> Self {
        let named = NamedSource::new(name, source.into());
        match &mut self {
            Self::UnterminatedBlockComment { src, .. }
            | Self::MalformedReal { src, .. }
            | Self::UnterminatedString { src, .. }
            | Self::NewlineInString { src, .. }
            | Self::UnexpectedSymbol { src, .. } => *src = named,
        }
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lexical_error_implements_diagnostic() {
        let err = LexicalError::unexpected_symbol('@', 1, 1, Span::new(0, 1));
        let diag: &dyn Diagnostic = &err;
        assert!(diag.code().is_some());
    }

    #[test]
    fn error_with_source() {
        let err = LexicalError::unterminated_string(1, 9, Span::new(8, 1))
            .with_source_code("test.mc", "int x = \"oops");
        assert!(matches!(err, LexicalError::UnterminatedString { .. }));
    }

    #[test]
    fn error_location_accessors() {
        let err = LexicalError::newline_in_string(3, 7, Span::new(20, 1));
        assert_eq!(err.line(), 3);
        assert_eq!(err.column(), 7);
    }

    #[test]
    fn error_messages_carry_location() {
        let err = LexicalError::unterminated_block_comment(2, 5, Span::new(12, 0));
        assert_eq!(
            err.to_string(),
            "unterminated block comment at line 2, column 5"
        );
    }
}

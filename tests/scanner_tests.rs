use minilex::LexicalError;
use minilex::scanner::{self, token::TokenKind};

fn dump(source: &str) -> Vec<String> {
    let tokens = scanner::scan(source).expect("scan should succeed");
    tokens.iter().map(|t| t.to_string()).collect()
}

#[test]
fn fixture_tokens() {
    let source = include_str!("fixtures/tokens.mc");
    let expected = include_str!("fixtures/tokens.expected");
    let expected_lines: Vec<&str> = expected.lines().collect();
    assert_eq!(dump(source), expected_lines);
}

#[test]
fn fixture_strings() {
    let source = include_str!("fixtures/strings.mc");
    let expected = include_str!("fixtures/strings.expected");
    let expected_lines: Vec<&str> = expected.lines().collect();
    assert_eq!(dump(source), expected_lines);
}

#[test]
fn scan_ends_with_a_single_eof() {
    let tokens = scanner::scan("int x; if (x >= 3) { return x; }").expect("valid program");
    assert_eq!(tokens.last().map(|t| t.kind), Some(TokenKind::Eof));
    assert_eq!(
        tokens.iter().filter(|t| t.kind == TokenKind::Eof).count(),
        1
    );
}

#[test]
fn unexpected_symbol_through_the_facade() {
    let err = scanner::scan("@").expect_err("no rule matches '@'");
    assert!(matches!(
        err,
        LexicalError::UnexpectedSymbol { symbol: '@', .. }
    ));
    assert_eq!((err.line(), err.column()), (1, 1));
}

#[test]
fn unterminated_comment_through_the_facade() {
    let err = scanner::scan("int x; /* no close").expect_err("comment never closes");
    assert!(matches!(err, LexicalError::UnterminatedBlockComment { .. }));
    assert_eq!((err.line(), err.column()), (1, 19));
}

#[test]
fn error_renders_with_attached_source() {
    let source = "x = \"truncated";
    let err = scanner::scan(source).expect_err("string never closes");
    let msg = err.to_string();
    assert_eq!(msg, "unterminated string at line 1, column 5");
    // source attachment keeps the message but enables the diagnostic label
    let report = miette::Report::new(err.with_source_code("demo.mc", source));
    assert!(format!("{report}").contains("unterminated string"));
}

#[test]
fn tokens_serialize_to_json() {
    let tokens = scanner::scan("int n = 4;").expect("valid program");
    let json = serde_json::to_value(&tokens).expect("tokens serialize");
    let first = &json[0];
    assert_eq!(first["kind"], "Type");
    assert_eq!(first["lexeme"], "int");
    assert_eq!(first["line"], 1);
    assert_eq!(first["column"], 1);
}

pub mod lexer;
pub mod token;

use crate::error::LexicalError;
use token::Token;

/// Scan source code into a list of tokens ending with the `$` marker.
pub fn scan(source: &str) -> Result<Vec<Token>, LexicalError> {
    lexer::scan_all(source)
}

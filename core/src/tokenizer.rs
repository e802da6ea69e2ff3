use crate::error::{Error, Result};
use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    static ref FILENAME: Regex = Regex::new(r"^\w+\.txt$").expect("valid regex");
    static ref WORD: Regex = Regex::new(r"^\w+(?:[-_]\w+)*$").expect("valid regex");
    static ref PERIOD: Regex = Regex::new(r"^\.$").expect("valid regex");
    static ref TERM: Regex = Regex::new(r"\w+\.txt|\w+(?:[-_]\w+)*").expect("valid regex");
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenKind {
    Filename,
    Word,
    Period,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    pub kind: TokenKind,
    pub value: String,
}

impl Token {
    pub fn new(kind: TokenKind, value: impl Into<String>) -> Self {
        Self { kind, value: value.into() }
    }

    pub fn is_term(&self) -> bool {
        matches!(self.kind, TokenKind::Filename | TokenKind::Word)
    }
}

/// Classify a whole piece of (already lowercased) text.
pub fn classify(piece: &str) -> Option<TokenKind> {
    if FILENAME.is_match(piece) {
        Some(TokenKind::Filename)
    } else if WORD.is_match(piece) {
        Some(TokenKind::Word)
    } else if PERIOD.is_match(piece) {
        Some(TokenKind::Period)
    } else {
        None
    }
}

pub fn is_document_id(s: &str) -> bool {
    classify(s) == Some(TokenKind::Filename)
}

/// Lowercase document text and pull out every filename or word, in order.
/// Everything else separates terms.
pub fn tokenize_document(text: &str) -> Vec<String> {
    let lowered = text.to_lowercase();
    TERM.find_iter(&lowered).map(|m| m.as_str().to_string()).collect()
}

/// Lowercase query text, split on whitespace and classify each piece.
pub fn tokenize_query(text: &str) -> Result<Vec<Token>> {
    text.to_lowercase()
        .split_whitespace()
        .map(|piece| match classify(piece) {
            Some(kind) => Ok(Token::new(kind, piece)),
            None => Err(Error::Syntax(format!("[{piece}] is not supported by any token."))),
        })
        .collect()
}

/// Values of the filename and word tokens; punctuation is dropped.
pub fn query_terms(tokens: &[Token]) -> Vec<String> {
    tokens.iter().filter(|t| t.is_term()).map(|t| t.value.clone()).collect()
}

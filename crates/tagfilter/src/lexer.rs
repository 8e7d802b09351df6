//! Tokenizer for tag-filter text.

use std::iter::Peekable;
use std::str::CharIndices;

use crate::error::TagFilterError;

#[derive(Debug, Clone, PartialEq)]
pub(crate) enum TokenKind {
    LeftParen,
    RightParen,
    And,
    Or,
    /// Entity references and operator names.
    Word(String),
    Str(String),
    Number(f64),
    Bool(bool),
}

#[derive(Debug, Clone, PartialEq)]
pub(crate) struct Token {
    pub kind: TokenKind,
    pub pos: usize,
}

impl TokenKind {
    pub(crate) fn describe(&self) -> String {
        match self {
            TokenKind::LeftParen => "'('".to_string(),
            TokenKind::RightParen => "')'".to_string(),
            TokenKind::And => "AND".to_string(),
            TokenKind::Or => "OR".to_string(),
            TokenKind::Word(w) => format!("'{w}'"),
            TokenKind::Str(s) => format!("string '{s}'"),
            TokenKind::Number(n) => format!("number {n}"),
            TokenKind::Bool(b) => format!("boolean {b}"),
        }
    }
}

fn is_word_start(ch: char) -> bool {
    ch.is_alphabetic() || ch == '_'
}

fn is_word_char(ch: char) -> bool {
    ch.is_alphanumeric() || matches!(ch, '_' | '.' | '-' | '/' | ':' | '@')
}

pub(crate) fn tokenize(input: &str) -> Result<Vec<Token>, TagFilterError> {
    let mut tokens = Vec::new();
    let mut chars = input.char_indices().peekable();

    while let Some(&(pos, ch)) = chars.peek() {
        match ch {
            c if c.is_whitespace() => {
                chars.next();
            }
            '(' => {
                chars.next();
                tokens.push(Token { kind: TokenKind::LeftParen, pos });
            }
            ')' => {
                chars.next();
                tokens.push(Token { kind: TokenKind::RightParen, pos });
            }
            '\'' => {
                chars.next();
                let text = read_string(&mut chars, pos)?;
                tokens.push(Token { kind: TokenKind::Str(text), pos });
            }
            c if c.is_ascii_digit() || (c == '-' && next_is_digit(input, pos)) => {
                let text = read_while(&mut chars, |c| {
                    c.is_ascii_digit() || matches!(c, '.' | '-' | '+' | 'e' | 'E')
                });
                let value = text
                    .parse::<f64>()
                    .ok()
                    .filter(|v| v.is_finite())
                    .ok_or_else(|| TagFilterError::InvalidNumber { pos, text: text.clone() })?;
                tokens.push(Token { kind: TokenKind::Number(value), pos });
            }
            c if is_word_start(c) => {
                let word = read_while(&mut chars, is_word_char);
                let kind = match word.to_ascii_uppercase().as_str() {
                    "AND" => TokenKind::And,
                    "OR" => TokenKind::Or,
                    "TRUE" => TokenKind::Bool(true),
                    "FALSE" => TokenKind::Bool(false),
                    _ => TokenKind::Word(word),
                };
                tokens.push(Token { kind, pos });
            }
            other => return Err(TagFilterError::UnexpectedChar { pos, ch: other }),
        }
    }

    Ok(tokens)
}

fn next_is_digit(input: &str, pos: usize) -> bool {
    input[pos + 1..]
        .chars()
        .next()
        .is_some_and(|c| c.is_ascii_digit())
}

fn read_while(chars: &mut Peekable<CharIndices<'_>>, accept: impl Fn(char) -> bool) -> String {
    let mut out = String::new();
    while let Some(&(_, c)) = chars.peek() {
        if !accept(c) {
            break;
        }
        out.push(c);
        chars.next();
    }
    out
}

/// Read a single-quoted string body; the opening quote is already consumed.
fn read_string(chars: &mut Peekable<CharIndices<'_>>, start: usize) -> Result<String, TagFilterError> {
    let mut out = String::new();
    while let Some((_, c)) = chars.next() {
        match c {
            '\\' => match chars.next() {
                Some((_, escaped)) => out.push(escaped),
                None => break,
            },
            '\'' => return Ok(out),
            other => out.push(other),
        }
    }
    Err(TagFilterError::UnterminatedString { pos: start })
}

// src/lexer/cpu.rs
// Byte scanner. It only isolates lexemes; identifier lexemes are handed to
// `keywords::classify` to decide between a keyword and `Ident`.

use super::keywords::classify;
use crate::token::TokenKind;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Token {
    pub kind: TokenKind,
    pub start: usize,
    pub len: usize,
}

impl Token {
    pub fn lexeme<'a>(&self, src: &'a str) -> &'a str {
        &src[self.start..self.start + self.len]
    }
}

#[inline]
fn is_ident_start(b: u8) -> bool {
    b.is_ascii_alphabetic() || b == b'_'
}
#[inline]
fn is_ident_continue(b: u8) -> bool {
    b.is_ascii_alphanumeric() || b == b'_'
}

fn punct(b: u8) -> Option<TokenKind> {
    use TokenKind::*;
    Some(match b {
        b'(' => LParen,
        b')' => RParen,
        b',' => Comma,
        b';' => Semi,
        b'+' => Plus,
        b'-' => Minus,
        b'*' => Star,
        b'/' => Slash,
        b'<' => Lt,
        b'>' => Gt,
        b'=' => Assign,
        _ => return None,
    })
}

/// Lexes `input` into tokens, ending with a zero-length `Eof`.
/// Whitespace and `//` comments are skipped; unknown bytes become `Invalid`
/// tokens (one per UTF-8 character) instead of aborting the scan.
pub fn lex(input: &str) -> Vec<Token> {
    let bytes = input.as_bytes();
    let n = bytes.len();
    let mut out = Vec::new();
    let mut i = 0usize;

    while i < n {
        let b = bytes[i];
        let start = i;

        if b.is_ascii_whitespace() {
            i += 1;
            continue;
        }
        if b == b'/' && bytes.get(i + 1) == Some(&b'/') {
            while i < n && bytes[i] != b'\n' {
                i += 1;
            }
            continue;
        }

        let kind = if is_ident_start(b) {
            while i < n && is_ident_continue(bytes[i]) {
                i += 1;
            }
            classify(&bytes[start..i])
        } else if b.is_ascii_digit() {
            while i < n && bytes[i].is_ascii_digit() {
                i += 1;
            }
            if i + 1 < n && bytes[i] == b'.' && bytes[i + 1].is_ascii_digit() {
                i += 1;
                while i < n && bytes[i].is_ascii_digit() {
                    i += 1;
                }
            }
            TokenKind::Num
        } else if let Some(k) = punct(b) {
            i += 1;
            k
        } else {
            // keep token boundaries on char boundaries
            i += input[i..].chars().next().map_or(1, char::len_utf8);
            TokenKind::Invalid
        };

        out.push(Token {
            kind,
            start,
            len: i - start,
        });
    }

    out.push(Token {
        kind: TokenKind::Eof,
        start: n,
        len: 0,
    });
    out
}

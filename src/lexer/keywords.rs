// src/lexer/keywords.rs
// Keyword recognition for identifier lexemes. The table is generated from
// grammar/keywords.gperf by `cargo run --bin gen_keyhash` into
// tables/keyhash.rs; build.rs stages it in OUT_DIR and warns when it is older
// than the keyword file.

use crate::{keyhash::StaticTable, token::TokenKind};

include!(concat!(env!("OUT_DIR"), "/keyhash.rs"));

/// Keyword kind for an identifier-shaped lexeme, `TokenKind::Ident` otherwise.
/// Case-sensitive; only byte-exact keyword spellings match.
#[inline]
pub fn classify(candidate: &[u8]) -> TokenKind {
    KEYWORDS.classify(candidate)
}

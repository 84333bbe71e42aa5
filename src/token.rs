// src/token.rs

use serde::{Deserialize, Serialize};

macro_rules! token_kinds {
    ($($(#[$meta:meta])* $name:ident = $value:literal,)*) => {
        /// Token kinds produced by the scanner. Keyword kinds are the ones the
        /// keyword file may name; every other identifier becomes `Ident`.
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[repr(u32)]
        pub enum TokenKind {
            $($(#[$meta])* $name = $value,)*
        }

        impl TokenKind {
            pub const ALL: &'static [TokenKind] = &[$(TokenKind::$name,)*];

            /// Variant name, as written in the keyword file.
            pub const fn name(self) -> &'static str {
                match self {
                    $(TokenKind::$name => stringify!($name),)*
                }
            }

            pub fn from_name(name: &str) -> Option<TokenKind> {
                match name {
                    $(stringify!($name) => Some(TokenKind::$name),)*
                    _ => None,
                }
            }
        }
    };
}

token_kinds! {
    Ident = 1,
    Num = 2,

    // keywords
    Def = 3,
    Extern = 4,
    If = 5,
    Then = 6,
    Else = 7,
    For = 8,
    In = 9,
    While = 10,
    Return = 11,
    Let = 12,
    True = 13,
    False = 14,

    // single-char punctuation
    LParen = 15,
    RParen = 16,
    Comma = 17,
    Semi = 18,
    Plus = 19,
    Minus = 20,
    Star = 21,
    Slash = 22,
    Lt = 23,
    Gt = 24,
    Assign = 25,

    Eof = 26,
    Invalid = 27,
}

/// What `classify` answers for anything that is not a keyword.
pub const SENTINEL: TokenKind = TokenKind::Ident;

impl std::fmt::Display for TokenKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

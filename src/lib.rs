// src/lib.rs
pub mod error;
pub mod keyhash;
pub mod lexer;
pub mod token;

pub use error::{ContractMismatchError, GeneratorFailure, KeyhashError, SpecificationError};
pub use lexer::keywords::classify;
pub use token::{SENTINEL, TokenKind};

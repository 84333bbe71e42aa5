// src/error.rs
use std::{path::PathBuf, process::ExitStatus};

use thiserror::Error;

#[derive(Error, Debug)]
pub enum KeyhashError {
    #[error(transparent)]
    Specification(#[from] SpecificationError),
    #[error(transparent)]
    Generator(#[from] GeneratorFailure),
    #[error(transparent)]
    ContractMismatch(#[from] ContractMismatchError),
    #[error("invalid rewrite pattern: {0}")]
    Pattern(#[from] regex::Error),
    #[error("failed to write {}: {source}", .path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Problems with the keyword file. Always reported before any generator runs.
#[derive(Error, Debug)]
pub enum SpecificationError {
    #[error("failed to read keyword spec {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("line {line}: expected `<keyword>, <TokenKind>`, got {text:?}")]
    Malformed { line: usize, text: String },
    #[error("line {line}: {keyword:?} is not a valid identifier")]
    IllegalKeyword { line: usize, keyword: String },
    #[error("line {line}: unknown token kind `{name}`")]
    UnknownTokenKind { line: usize, name: String },
    #[error("line {line}: keyword {keyword:?} maps to the identifier sentinel `{kind}`")]
    SentinelKind {
        line: usize,
        keyword: String,
        kind: crate::TokenKind,
    },
    #[error("line {line}: duplicate keyword {keyword:?} (first defined on line {first_line})")]
    Duplicate {
        line: usize,
        first_line: usize,
        keyword: String,
    },
    #[error("keyword spec defines no keywords")]
    Empty,
}

#[derive(Error, Debug)]
pub enum GeneratorFailure {
    #[error("could not locate `{program}`: set $GPERF or add it to PATH")]
    NotFound { program: String },
    #[error("failed to run {}: {source}", .program.display())]
    Spawn {
        program: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("{} exited with {status}:\n{stderr}", .program.display())]
    Exit {
        program: PathBuf,
        status: ExitStatus,
        stderr: String,
    },
    #[error("{} produced non-UTF-8 output", .program.display())]
    NonUtf8 { program: PathBuf },
    #[error("built table maps {keyword:?} to {found}, expected {expected}")]
    Verification {
        keyword: String,
        expected: crate::TokenKind,
        found: crate::TokenKind,
    },
}

/// The generator's output no longer has the shape the rewrite rules expect.
#[derive(Error, Debug, PartialEq, Eq)]
#[error("rewrite `{rule}` expected {expected} match(es) of /{pattern}/, found {found}")]
pub struct ContractMismatchError {
    pub rule: &'static str,
    pub pattern: String,
    pub expected: usize,
    pub found: usize,
}

pub type Result<T, E = KeyhashError> = std::result::Result<T, E>;

// src/keyhash/spec.rs
// Keyword file loader. The format is the keyword section of a gperf input file:
//
//   # comment
//   %%
//   if, If
//   "else", TokenKind::Else
//   %%
//
// Lines before the first `%%` are declarations and are skipped. Without any
// `%%` line the whole file is the keyword section.

use std::path::Path;

use hashbrown::HashMap;

use crate::{
    error::SpecificationError,
    token::{SENTINEL, TokenKind},
};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeywordEntry {
    pub text: String,
    pub kind: TokenKind,
    /// 1-based line in the keyword file.
    pub line: usize,
}

/// Validated keyword set, sorted by text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeywordSpec {
    entries: Vec<KeywordEntry>,
}

impl KeywordSpec {
    pub fn load(path: &Path) -> Result<Self, SpecificationError> {
        let bytes = std::fs::read(path).map_err(|source| SpecificationError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let spec = Self::from_bytes(path, &bytes)?;
        log::debug!(
            "loaded {} keywords from {}",
            spec.entries.len(),
            path.display()
        );
        Ok(spec)
    }

    /// Parses keyword file contents already read from `path`. Non-UTF-8 input
    /// is a [`SpecificationError::Read`] with `InvalidData`, as from
    /// `fs::read_to_string`.
    pub fn from_bytes(path: &Path, bytes: &[u8]) -> Result<Self, SpecificationError> {
        let src = std::str::from_utf8(bytes).map_err(|e| SpecificationError::Read {
            path: path.to_path_buf(),
            source: std::io::Error::new(std::io::ErrorKind::InvalidData, e),
        })?;
        Self::parse(src)
    }

    pub fn parse(src: &str) -> Result<Self, SpecificationError> {
        let has_sections = src.lines().any(|l| l.trim() == "%%");
        let mut in_keywords = !has_sections;
        let mut seen: HashMap<String, usize> = HashMap::new();
        let mut entries = Vec::new();

        for (idx, raw_line) in src.lines().enumerate() {
            let line_no = idx + 1;
            let line = raw_line.trim();
            if line == "%%" {
                if in_keywords {
                    break;
                }
                in_keywords = true;
                continue;
            }
            if !in_keywords || line.is_empty() || line.starts_with('#') {
                continue;
            }

            let entry = parse_entry(line, line_no)?;
            if let Some(&first_line) = seen.get(&entry.text) {
                return Err(SpecificationError::Duplicate {
                    line: line_no,
                    first_line,
                    keyword: entry.text,
                });
            }
            seen.insert(entry.text.clone(), line_no);
            entries.push(entry);
        }

        if entries.is_empty() {
            return Err(SpecificationError::Empty);
        }
        entries.sort_by(|a, b| a.text.cmp(&b.text));
        Ok(Self { entries })
    }

    pub fn entries(&self) -> &[KeywordEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn get(&self, text: &str) -> Option<TokenKind> {
        self.entries
            .binary_search_by(|e| e.text.as_str().cmp(text))
            .ok()
            .map(|i| self.entries[i].kind)
    }

    pub fn min_len(&self) -> usize {
        self.entries.iter().map(|e| e.text.len()).min().unwrap_or(0)
    }

    pub fn max_len(&self) -> usize {
        self.entries.iter().map(|e| e.text.len()).max().unwrap_or(0)
    }
}

fn parse_entry(line: &str, line_no: usize) -> Result<KeywordEntry, SpecificationError> {
    let malformed = || SpecificationError::Malformed {
        line: line_no,
        text: line.to_string(),
    };

    let mut fields = line.split(',').map(str::trim);
    let (Some(text), Some(kind), None) = (fields.next(), fields.next(), fields.next()) else {
        return Err(malformed());
    };
    let text = text
        .strip_prefix('"')
        .and_then(|t| t.strip_suffix('"'))
        .unwrap_or(text);
    if kind.is_empty() {
        return Err(malformed());
    }

    if !is_identifier(text) {
        return Err(SpecificationError::IllegalKeyword {
            line: line_no,
            keyword: text.to_string(),
        });
    }

    // `TokenKind::If`, `token::type::If` and `If` all name the same variant.
    let name = kind.rsplit("::").next().unwrap_or(kind).trim();
    let kind = TokenKind::from_name(name).ok_or_else(|| SpecificationError::UnknownTokenKind {
        line: line_no,
        name: kind.to_string(),
    })?;
    if kind == SENTINEL {
        return Err(SpecificationError::SentinelKind {
            line: line_no,
            keyword: text.to_string(),
            kind,
        });
    }

    Ok(KeywordEntry {
        text: text.to_string(),
        kind,
        line: line_no,
    })
}

/// `[A-Za-z_][A-Za-z0-9_]*`, the same shape the scanner isolates.
pub fn is_identifier(text: &str) -> bool {
    let bytes = text.as_bytes();
    match bytes.split_first() {
        Some((&first, rest)) => {
            (first.is_ascii_alphabetic() || first == b'_')
                && rest.iter().all(|&b| b.is_ascii_alphanumeric() || b == b'_')
        }
        None => false,
    }
}

// src/keyhash/table.rs
use serde::{Deserialize, Serialize};

use super::hash::slot_index;
use crate::token::{SENTINEL, TokenKind};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Slot {
    pub text: String,
    pub kind: TokenKind,
}

/// Minimal perfect hash table over a keyword set, as produced by a
/// [`TableBuilder`](super::build::TableBuilder).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HashTable {
    pub seed: u64,
    pub min_len: usize,
    pub max_len: usize,
    /// `(d1, d2)` per bucket.
    pub displacements: Vec<(u32, u32)>,
    /// One slot per keyword.
    pub slots: Vec<Slot>,
}

impl HashTable {
    pub fn lookup(&self, candidate: &[u8]) -> TokenKind {
        if self.slots.is_empty()
            || self.displacements.is_empty()
            || !(self.min_len..=self.max_len).contains(&candidate.len())
        {
            return SENTINEL;
        }
        let slot = &self.slots[slot_index(
            self.seed,
            &self.displacements,
            self.slots.len(),
            candidate,
        )];
        if slot.text.as_bytes() == candidate {
            slot.kind
        } else {
            SENTINEL
        }
    }
}

/// The `'static` form of [`HashTable`] that generated sources instantiate.
#[derive(Debug, Clone, Copy)]
pub struct StaticTable {
    pub seed: u64,
    pub min_len: usize,
    pub max_len: usize,
    pub displacements: &'static [(u32, u32)],
    pub slots: &'static [(&'static str, TokenKind)],
}

impl StaticTable {
    /// Keyword kind of `candidate`, or `TokenKind::Ident`.
    ///
    /// Out-of-range lengths are rejected before hashing. Everything that
    /// reaches a slot is confirmed by an exact byte comparison, so a
    /// non-keyword that shares a slot with a keyword still yields `Ident`.
    #[inline]
    pub fn classify(&self, candidate: &[u8]) -> TokenKind {
        let len = candidate.len();
        if len < self.min_len
            || len > self.max_len
            || self.slots.is_empty()
            || self.displacements.is_empty()
        {
            return SENTINEL;
        }
        let (text, kind) = self.slots[slot_index(
            self.seed,
            self.displacements,
            self.slots.len(),
            candidate,
        )];
        if text.as_bytes() == candidate {
            kind
        } else {
            SENTINEL
        }
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tables_without_buckets_classify_nothing() {
        let owned = HashTable {
            seed: 0,
            min_len: 2,
            max_len: 2,
            displacements: vec![],
            slots: vec![Slot {
                text: "if".into(),
                kind: TokenKind::If,
            }],
        };
        let borrowed = StaticTable {
            seed: 0,
            min_len: 2,
            max_len: 2,
            displacements: &[],
            slots: &[("if", TokenKind::If)],
        };
        assert_eq!(owned.lookup(b"if"), TokenKind::Ident);
        assert_eq!(borrowed.classify(b"if"), TokenKind::Ident);

        let empty = StaticTable {
            slots: &[],
            displacements: &[(0, 0)],
            ..borrowed
        };
        assert_eq!(empty.classify(b"if"), TokenKind::Ident);
        assert!(empty.is_empty());
    }
}

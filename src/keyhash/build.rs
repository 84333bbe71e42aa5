// src/keyhash/build.rs
use std::time::Instant;

use phf_generator::HashState;

use super::{
    spec::KeywordSpec,
    table::{HashTable, Slot},
};
use crate::{error::GeneratorFailure, token::SENTINEL};

/// Strategy that turns a keyword set into a perfect hash table.
pub trait TableBuilder {
    fn build_table(&self, spec: &KeywordSpec) -> Result<HashTable, GeneratorFailure>;
}

/// phf's hash-and-displace generator. `seed` is XORed into every key phf
/// tries, so different seeds give different (equally valid) tables; `0`
/// yields exactly the table `phf_generator::generate_hash` would.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PhfSearch {
    pub seed: u64,
}

impl TableBuilder for PhfSearch {
    fn build_table(&self, spec: &KeywordSpec) -> Result<HashTable, GeneratorFailure> {
        let t0 = Instant::now();
        let entries = spec.entries();
        let words: Vec<&[u8]> = entries.iter().map(|e| e.text.as_bytes()).collect();

        let salt = self.seed;
        let HashState { key, disps, map } =
            phf_generator::generate_hash_with_hash_fn(&words, |word, key| {
                phf_shared::hash(*word, &(*key ^ salt))
            });
        let seed = key ^ salt;

        let table = HashTable {
            seed,
            min_len: spec.min_len(),
            max_len: spec.max_len(),
            displacements: disps,
            slots: map
                .into_iter()
                .map(|i| Slot {
                    text: entries[i].text.clone(),
                    kind: entries[i].kind,
                })
                .collect(),
        };
        log::info!(
            "[keyhash] {} keywords placed in {} buckets, seed {seed:#x}, in {} ms",
            entries.len(),
            table.displacements.len(),
            t0.elapsed().as_millis()
        );

        verify(spec, &table)?;
        Ok(table)
    }
}

/// Every keyword must come back as its own kind before the table is trusted.
pub fn verify(spec: &KeywordSpec, table: &HashTable) -> Result<(), GeneratorFailure> {
    for e in spec.entries() {
        let found = table.lookup(e.text.as_bytes());
        if found != e.kind || found == SENTINEL {
            return Err(GeneratorFailure::Verification {
                keyword: e.text.clone(),
                expected: e.kind,
                found,
            });
        }
    }
    Ok(())
}

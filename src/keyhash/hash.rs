// src/keyhash/hash.rs
// Slot placement shared by the generator and the generated tables. Keys are
// hashed with phf_shared (SipHash-1-3 keyed by the table seed), so a table is
// only valid with the phf_shared version it was generated with: regenerate
// tables/keyhash.rs after bumping it.

use phf_shared::{HashKey, get_index, hash};

const FNV_OFFSET: u64 = 0xcbf2_9ce4_8422_2325;
const FNV_PRIME: u64 = 0x0000_0100_0000_01b3;

/// Slot of `bytes` in a table built with `seed`. `displacements` must be
/// non-empty.
#[inline]
pub fn slot_index(seed: HashKey, displacements: &[(u32, u32)], n_slots: usize, bytes: &[u8]) -> usize {
    get_index(&hash(bytes, &seed), displacements, n_slots) as usize
}

/// Plain FNV-1a over a file's bytes, recorded in artifact headers.
pub fn digest(bytes: &[u8]) -> u64 {
    bytes.iter().fold(FNV_OFFSET, |h, &b| {
        (h ^ u64::from(b)).wrapping_mul(FNV_PRIME)
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn slots_stay_in_range() {
        let displacements = [(3, 1), (0, 7)];
        for word in ["", "a", "while", "extern_function_name"] {
            for n in [1, 2, 12] {
                assert!(slot_index(0x5eed, &displacements, n, word.as_bytes()) < n);
            }
        }
    }

    #[test]
    fn seed_changes_placement() {
        let displacements = [(0, 0)];
        let spread: std::collections::BTreeSet<usize> = (0..64)
            .map(|seed| slot_index(seed, &displacements, 1024, b"if"))
            .collect();
        assert!(spread.len() > 1);
    }

    #[test]
    fn digest_matches_fnv1a() {
        assert_eq!(digest(b""), FNV_OFFSET);
        // FNV-1a 64 test vector
        assert_eq!(digest(b"a"), 0xaf63_dc4c_8601_ec8c);
    }
}

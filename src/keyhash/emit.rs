// src/keyhash/emit.rs
// Renders a HashTable as a data-only Rust source file. The lookup itself is
// the hand-written StaticTable::classify; the generated file only
// instantiates it:
//
//   pub static KEYWORDS: StaticTable = StaticTable { seed, min_len, .. };
//
// The including module must have `StaticTable` and `TokenKind` in scope.

use std::path::Path;

use super::table::HashTable;

/// Line prefix that build.rs looks for when checking staleness.
pub const DIGEST_PREFIX: &str = "// spec-digest: ";

pub struct ArtifactHeader<'a> {
    pub spec_path: &'a Path,
    /// FNV-1a of the keyword file bytes.
    pub spec_digest: u64,
}

pub fn render_rust(table: &HashTable, header: &ArtifactHeader<'_>) -> String {
    let mut out = String::new();
    out.push_str(&format!(
        "// @generated by gen_keyhash from {}. Do not edit by hand.\n",
        header.spec_path.display()
    ));
    out.push_str(&format!("{DIGEST_PREFIX}{:#018x}\n", header.spec_digest));
    out.push_str(&format!(
        "// keywords: {}, buckets: {}\n\n",
        table.slots.len(),
        table.displacements.len()
    ));

    out.push_str("pub static KEYWORDS: StaticTable = StaticTable {\n");
    out.push_str(&format!("    seed: {:#018x},\n", table.seed));
    out.push_str(&format!("    min_len: {},\n", table.min_len));
    out.push_str(&format!("    max_len: {},\n", table.max_len));

    out.push_str("    displacements: &[\n");
    for (d1, d2) in &table.displacements {
        out.push_str(&format!("        ({d1}, {d2}),\n"));
    }
    out.push_str("    ],\n");

    out.push_str("    slots: &[\n");
    for slot in &table.slots {
        out.push_str(&format!(
            "        ({:?}, TokenKind::{}),\n",
            slot.text,
            slot.kind.name()
        ));
    }
    out.push_str("    ],\n");
    out.push_str("};\n");
    out
}

/// Digest recorded in a rendered artifact, if it has one.
pub fn recorded_digest(artifact: &str) -> Option<u64> {
    artifact
        .lines()
        .find_map(|l| l.strip_prefix(DIGEST_PREFIX))
        .and_then(|hex| u64::from_str_radix(hex.trim().trim_start_matches("0x"), 16).ok())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{TokenKind, keyhash::table::Slot};

    #[test]
    fn renders_table() {
        let table = HashTable {
            seed: 0xabc,
            min_len: 2,
            max_len: 4,
            displacements: vec![(0, 1)],
            slots: vec![
                Slot {
                    text: "else".into(),
                    kind: TokenKind::Else,
                },
                Slot {
                    text: "if".into(),
                    kind: TokenKind::If,
                },
            ],
        };
        let header = ArtifactHeader {
            spec_path: Path::new("kw.gperf"),
            spec_digest: 0x1234,
        };
        let text = render_rust(&table, &header);
        let expected = "\
// @generated by gen_keyhash from kw.gperf. Do not edit by hand.
// spec-digest: 0x0000000000001234
// keywords: 2, buckets: 1

pub static KEYWORDS: StaticTable = StaticTable {
    seed: 0x0000000000000abc,
    min_len: 2,
    max_len: 4,
    displacements: &[
        (0, 1),
    ],
    slots: &[
        (\"else\", TokenKind::Else),
        (\"if\", TokenKind::If),
    ],
};
";
        pretty_assertions::assert_eq!(text, expected);
        assert_eq!(recorded_digest(&text), Some(0x1234));
    }
}

// build.rs — stage the committed keyword table for `lexer::keywords` and warn
// when it was generated from a different keyword file.
// Staleness is a warning: gen_keyhash is itself built from this crate.
// tests/keywords.rs turns it into a failure.
//
// A missing tables/keyhash.rs is staged as an empty table (every lexeme is an
// identifier), so `cargo run --bin gen_keyhash` can still build and recreate it.

use anyhow::{Context, Result, anyhow};
use std::{env, fs, path::PathBuf};

const SPEC: &str = "grammar/keywords.gperf";
const TABLE: &str = "tables/keyhash.rs";
const DIGEST_PREFIX: &str = "// spec-digest: ";

const EMPTY_TABLE: &str = "\
// tables/keyhash.rs is missing; run `cargo run --bin gen_keyhash`.
pub static KEYWORDS: StaticTable = StaticTable {
    seed: 0,
    min_len: 1,
    max_len: 0,
    displacements: &[],
    slots: &[],
};
";

fn main() -> Result<()> {
    println!("cargo:rerun-if-changed={SPEC}");
    println!("cargo:rerun-if-changed={TABLE}");

    let out_dir = PathBuf::from(env::var_os("OUT_DIR").context("OUT_DIR not set")?);
    let staged = out_dir.join("keyhash.rs");

    let Ok(table) = fs::read_to_string(TABLE) else {
        println!("cargo:warning={TABLE} is missing; keywords classify as identifiers until `cargo run --bin gen_keyhash` recreates it");
        fs::write(&staged, EMPTY_TABLE).with_context(|| format!("write {}", staged.display()))?;
        return Ok(());
    };
    fs::write(&staged, &table).with_context(|| format!("write {}", staged.display()))?;

    let spec = fs::read(SPEC).with_context(|| format!("read {SPEC}"))?;
    let recorded = table
        .lines()
        .find_map(|l| l.strip_prefix(DIGEST_PREFIX))
        .map(str::trim)
        .ok_or_else(|| anyhow!("{TABLE} has no `{}` header line", DIGEST_PREFIX.trim()))?;
    let actual = format!("{:#018x}", fnv1a(&spec));

    if recorded != actual {
        println!(
            "cargo:warning={TABLE} is stale (built from keyword file {recorded}, {SPEC} is now {actual}); \
             run `cargo run --bin gen_keyhash` and commit the result"
        );
    }
    Ok(())
}

// Must agree with keyhash::hash::digest.
fn fnv1a(bytes: &[u8]) -> u64 {
    bytes.iter().fold(0xcbf2_9ce4_8422_2325u64, |h, &b| {
        (h ^ u64::from(b)).wrapping_mul(0x0000_0100_0000_01b3)
    })
}

// src/bin/gen_keyhash.rs
// Build the keyword classifier table and write it to disk.
// Usage:
//   cargo run --bin gen_keyhash                      # grammar/keywords.gperf -> tables/keyhash.rs
//   cargo run --bin gen_keyhash -- SPEC OUT
//   KEYHASH_BACKEND=gperf cargo run --bin gen_keyhash # C++ header via gperf -> tables/keyhash.hpp
//
// Environment: KEYHASH_SEED, KEYHASH_ITERATIONS, GPERF, GPERF_EXTRA_FLAGS,
// KEYHASH_KIND_TYPE, KEYHASH_SENTINEL, KEYHASH_DUMP_JSON=1, RUST_LOG.

use std::{env, path::PathBuf};

use anyhow::{Context, Result, anyhow};
use keyhash::keyhash::{Backend, GenConfig, io::save_table_json, run};
use tracing_subscriber::EnvFilter;

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_target(false)
        .init();

    if let Err(e) = try_main() {
        eprintln!("error: {e:#}");
        std::process::exit(1);
    }
}

fn try_main() -> Result<()> {
    let mut cfg = GenConfig::from_env().map_err(|e| anyhow!(e))?;
    let mut args = env::args().skip(1);
    if let Some(spec) = args.next() {
        cfg.spec_path = PathBuf::from(spec);
    }
    if let Some(out) = args.next() {
        cfg.out_path = PathBuf::from(out);
    }

    println!(
        "[gen_keyhash] {} -> {} ({:?} backend)",
        cfg.spec_path.display(),
        cfg.out_path.display(),
        cfg.backend
    );
    let artifact = run(&cfg)
        .with_context(|| format!("generating keyword table from {}", cfg.spec_path.display()))?;

    let spec = &artifact.spec;
    println!(
        "[gen_keyhash] {} keywords, lengths {}..={}",
        spec.len(),
        spec.min_len(),
        spec.max_len()
    );
    if let Some(table) = &artifact.table {
        println!(
            "[gen_keyhash] seed = {:#018x}, buckets = {}, slots = {}",
            table.seed,
            table.displacements.len(),
            table.slots.len()
        );
        if env::var_os("KEYHASH_DUMP_JSON").is_some() {
            let json = cfg.out_path.with_extension("json");
            save_table_json(&json, table)
                .with_context(|| format!("failed to write {}", json.display()))?;
            println!("[gen_keyhash] wrote {}", json.display());
        }
    }

    println!("[gen_keyhash] wrote {}", cfg.out_path.display());
    if cfg.backend == Backend::Builtin {
        println!("         tip: commit this file together with the keyword file.");
    }
    Ok(())
}

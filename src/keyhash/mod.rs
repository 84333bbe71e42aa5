// src/keyhash/mod.rs
//! Build-time generation of the keyword classifier.
//!
//! keyword file → [`KeywordSpec`] → table builder → artifact text → file.
//!
//! Two backends produce the artifact:
//! * [`Backend::Builtin`] runs [`PhfSearch`] and renders the resulting
//!   [`HashTable`] as data for [`StaticTable::classify`]. This is what
//!   `tables/keyhash.rs` is generated with.
//! * [`Backend::Gperf`] runs GNU gperf and rewrites its C++ lookup routine
//!   with [`patch::cxx_rules`], for C++ consumers of the same keyword file.
//!
//! Nothing is written unless every step succeeded.

pub mod build;
pub mod emit;
pub mod gperf;
pub mod hash;
pub mod io;
pub mod patch;
pub mod spec;
pub mod table;

use std::{
    env,
    path::{Path, PathBuf},
    str::FromStr,
};

pub use build::{PhfSearch, TableBuilder};
pub use gperf::GperfConfig;
pub use spec::{KeywordEntry, KeywordSpec};
pub use table::{HashTable, Slot, StaticTable};

use crate::error::{KeyhashError, Result, SpecificationError};

pub const DEFAULT_SPEC_PATH: &str = "grammar/keywords.gperf";
pub const DEFAULT_RUST_OUT: &str = "tables/keyhash.rs";
pub const DEFAULT_CXX_OUT: &str = "tables/keyhash.hpp";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Backend {
    #[default]
    Builtin,
    Gperf,
}

impl FromStr for Backend {
    type Err = String;
    fn from_str(s: &str) -> Result<Self, String> {
        match s.trim().to_ascii_lowercase().as_str() {
            "builtin" => Ok(Backend::Builtin),
            "gperf" => Ok(Backend::Gperf),
            other => Err(format!("unknown backend `{other}` (expected builtin|gperf)")),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenConfig {
    pub spec_path: PathBuf,
    pub out_path: PathBuf,
    pub backend: Backend,
    pub search: PhfSearch,
    pub gperf: GperfConfig,
}

impl Default for GenConfig {
    fn default() -> Self {
        Self {
            spec_path: PathBuf::from(DEFAULT_SPEC_PATH),
            out_path: PathBuf::from(DEFAULT_RUST_OUT),
            backend: Backend::Builtin,
            search: PhfSearch::default(),
            gperf: GperfConfig::default(),
        }
    }
}

impl GenConfig {
    /// Defaults overridden by `KEYHASH_*` / `GPERF*` environment variables.
    pub fn from_env() -> std::result::Result<Self, String> {
        let mut cfg = GenConfig::default();
        if let Some(b) = env_str("KEYHASH_BACKEND") {
            cfg.backend = b.parse()?;
            if cfg.backend == Backend::Gperf {
                cfg.out_path = PathBuf::from(DEFAULT_CXX_OUT);
            }
        }
        if let Some(s) = env_str("KEYHASH_SEED") {
            cfg.search.seed = parse_u64(&s).ok_or_else(|| format!("bad KEYHASH_SEED `{s}`"))?;
        }
        if let Some(s) = env_str("KEYHASH_ITERATIONS") {
            cfg.gperf.iterations = s
                .parse::<u32>()
                .map_err(|e| format!("bad KEYHASH_ITERATIONS `{s}`: {e}"))?;
        }
        if let Some(p) = env_str("GPERF") {
            cfg.gperf.program = Some(PathBuf::from(p));
        }
        if let Some(flags) = env_str("GPERF_EXTRA_FLAGS") {
            cfg.gperf.extra_flags = flags.split_whitespace().map(str::to_string).collect();
        }
        if let Some(t) = env_str("KEYHASH_KIND_TYPE") {
            cfg.gperf.kind_type = t;
        }
        if let Some(s) = env_str("KEYHASH_SENTINEL") {
            cfg.gperf.sentinel = s;
        }
        Ok(cfg)
    }
}

fn env_str(name: &str) -> Option<String> {
    env::var(name).ok().filter(|s| !s.trim().is_empty())
}

fn parse_u64(s: &str) -> Option<u64> {
    let s = s.trim();
    match s.strip_prefix("0x").or_else(|| s.strip_prefix("0X")) {
        Some(hex) => u64::from_str_radix(&hex.replace('_', ""), 16).ok(),
        None => s.replace('_', "").parse().ok(),
    }
}

/// Everything a successful generation run produced, before it is written.
#[derive(Debug, Clone)]
pub struct Artifact {
    pub spec: KeywordSpec,
    /// Only set by the builtin backend.
    pub table: Option<HashTable>,
    pub text: String,
}

pub fn generate(cfg: &GenConfig) -> Result<Artifact> {
    let bytes = std::fs::read(&cfg.spec_path).map_err(|source| SpecificationError::Read {
        path: cfg.spec_path.clone(),
        source,
    })?;
    let spec = KeywordSpec::from_bytes(&cfg.spec_path, &bytes)?;
    log::info!(
        "[keyhash] {} keywords from {} (lengths {}..={})",
        spec.len(),
        cfg.spec_path.display(),
        spec.min_len(),
        spec.max_len()
    );

    match cfg.backend {
        Backend::Builtin => {
            let table = cfg.search.build_table(&spec)?;
            let header = emit::ArtifactHeader {
                spec_path: &cfg.spec_path,
                spec_digest: hash::digest(&bytes),
            };
            let text = emit::render_rust(&table, &header);
            Ok(Artifact {
                spec,
                table: Some(table),
                text,
            })
        }
        Backend::Gperf => {
            let rules = patch::cxx_rules(&cfg.gperf)?;
            let raw = gperf::run(&spec, &cfg.gperf)?;
            let text = patch::apply(&rules, &raw)?;
            Ok(Artifact {
                spec,
                table: None,
                text,
            })
        }
    }
}

/// [`generate`], then write the artifact to `cfg.out_path`.
pub fn run(cfg: &GenConfig) -> Result<Artifact> {
    let artifact = generate(cfg)?;
    write(&cfg.out_path, &artifact.text)?;
    Ok(artifact)
}

fn write(path: &Path, text: &str) -> Result<()> {
    io::write_artifact(path, text).map_err(|source| KeyhashError::Write {
        path: path.to_path_buf(),
        source,
    })
}

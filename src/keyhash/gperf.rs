// src/keyhash/gperf.rs
// Runs GNU gperf on the keyword set and returns its raw C++ output.

use std::{
    env,
    io::Write,
    path::{Path, PathBuf},
    process::{Command, Stdio},
    time::Instant,
};

use super::spec::KeywordSpec;
use crate::error::GeneratorFailure;

pub const STRUCT_NAME: &str = "keyword_hash_entry";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GperfConfig {
    /// Explicit program; otherwise `$GPERF`, then `gperf` on PATH.
    pub program: Option<PathBuf>,
    pub iterations: u32,
    pub extra_flags: Vec<String>,
    /// C++ type of the `kind` field, e.g. `token::type`.
    pub kind_type: String,
    /// C++ expression returned for non-keywords.
    pub sentinel: String,
    pub header_include: String,
}

impl Default for GperfConfig {
    fn default() -> Self {
        Self {
            program: None,
            iterations: 100,
            extra_flags: Vec::new(),
            kind_type: "token::type".to_string(),
            sentinel: "token::type::Ident".to_string(),
            header_include: "token.hpp".to_string(),
        }
    }
}

/// gperf input for `spec`: declarations, then one `keyword, kind` per line.
pub fn render_input(spec: &KeywordSpec, cfg: &GperfConfig) -> String {
    let mut out = String::new();
    out.push_str("%{\n");
    out.push_str(&format!("#include \"{}\"\n", cfg.header_include));
    out.push_str("#include <cstring>\n");
    out.push_str("%}\n");
    out.push_str("%language=C++\n");
    out.push_str("%struct-type\n");
    out.push_str("%readonly-tables\n");
    out.push_str("%global-table\n");
    out.push_str("%compare-lengths\n");
    out.push_str("%define class-name perfect_hash\n");
    out.push_str("%define lookup-function-name get_token\n");
    out.push_str(&format!(
        "struct {STRUCT_NAME} {{ const char* name; {} kind; }};\n",
        cfg.kind_type
    ));
    out.push_str("%%\n");
    for e in spec.entries() {
        out.push_str(&format!("{}, {}::{}\n", e.text, cfg.kind_type, e.kind.name()));
    }
    out.push_str("%%\n");
    out
}

pub fn find_gperf(cfg: &GperfConfig) -> Result<PathBuf, GeneratorFailure> {
    if let Some(p) = &cfg.program {
        if p.is_file() {
            return Ok(p.clone());
        }
        return which::which(p).map_err(|_| GeneratorFailure::NotFound {
            program: p.display().to_string(),
        });
    }
    if let Ok(p) = env::var("GPERF") {
        let pb = PathBuf::from(p);
        if pb.is_file() {
            return Ok(pb);
        }
    }
    which::which("gperf").map_err(|_| GeneratorFailure::NotFound {
        program: "gperf".to_string(),
    })
}

/// Runs gperf with the rendered spec on stdin and returns stdout.
/// A nonzero exit discards everything the process wrote.
pub fn run(spec: &KeywordSpec, cfg: &GperfConfig) -> Result<String, GeneratorFailure> {
    let program = find_gperf(cfg)?;
    run_program(&program, &render_input(spec, cfg), cfg)
}

fn run_program(program: &Path, input: &str, cfg: &GperfConfig) -> Result<String, GeneratorFailure> {
    let t0 = Instant::now();
    let spawn_err = |source| GeneratorFailure::Spawn {
        program: program.to_path_buf(),
        source,
    };

    let mut cmd = Command::new(program);
    cmd.arg(format!("--multiple-iterations={}", cfg.iterations))
        .args(&cfg.extra_flags)
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped());
    log::debug!("running {cmd:?}");

    let mut child = cmd.spawn().map_err(spawn_err)?;
    if let Some(mut stdin) = child.stdin.take() {
        // A generator that exits without reading its input closes the pipe;
        // the exit status below is what gets reported then.
        if let Err(e) = stdin.write_all(input.as_bytes()) {
            log::debug!("writing gperf input: {e}");
        }
    }
    let out = child.wait_with_output().map_err(spawn_err)?;

    let stderr = String::from_utf8_lossy(&out.stderr).into_owned();
    if !out.status.success() {
        return Err(GeneratorFailure::Exit {
            program: program.to_path_buf(),
            status: out.status,
            stderr,
        });
    }
    for line in stderr.lines() {
        log::warn!("{}: {line}", program.display());
    }

    let text = String::from_utf8(out.stdout).map_err(|_| GeneratorFailure::NonUtf8 {
        program: program.to_path_buf(),
    })?;
    log::info!(
        "[keyhash] {} produced {} bytes in {} ms",
        program.display(),
        text.len(),
        t0.elapsed().as_millis()
    );
    Ok(text)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn input_lists_every_keyword() {
        let spec = KeywordSpec::parse("while, While\nif, If\n").unwrap();
        let text = render_input(&spec, &GperfConfig::default());
        let keywords: Vec<&str> = text
            .split("%%\n")
            .nth(1)
            .unwrap()
            .lines()
            .collect();
        assert_eq!(keywords, ["if, token::type::If", "while, token::type::While"]);
        assert!(text.contains("struct keyword_hash_entry { const char* name; token::type kind; };"));
    }

    #[test]
    fn missing_program_is_not_found() {
        let cfg = GperfConfig {
            program: Some(PathBuf::from("definitely-not-a-gperf-binary")),
            ..GperfConfig::default()
        };
        assert!(matches!(
            find_gperf(&cfg),
            Err(GeneratorFailure::NotFound { .. })
        ));
    }
}

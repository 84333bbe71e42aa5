// src/keyhash/io.rs
use std::{
    fs,
    io::{BufWriter, Write},
    path::Path,
    time::Instant,
};

use super::table::HashTable;

// -------------------- JSON (de)serialization --------------------

pub fn save_table_json(path: &Path, t: &HashTable) -> std::io::Result<()> {
    let f = fs::File::create(path)?;
    let mut w = BufWriter::new(f);
    serde_json::to_writer_pretty(&mut w, t)?;
    w.write_all(b"\n")?;
    w.flush()
}

pub fn load_table_json_bytes(data: &[u8]) -> Result<HashTable, String> {
    serde_json::from_slice::<HashTable>(data)
        .map_err(|e| format!("Failed to parse keyword table JSON: {e}"))
}

// -------------------- Artifact --------------------

/// Writes `text` to a sibling temp file and renames it over `path`, so a
/// reader never sees a half-written artifact.
pub fn write_artifact(path: &Path, text: &str) -> std::io::Result<()> {
    let instant = Instant::now();
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }

    let mut tmp_name = path.file_name().unwrap_or_default().to_os_string();
    tmp_name.push(".tmp");
    let tmp = path.with_file_name(tmp_name);
    if let Err(e) = write_then_rename(&tmp, path, text) {
        // the temp file may exist from any step that got past File::create
        if fs::symlink_metadata(&tmp).is_ok_and(|m| !m.is_dir()) {
            let _ = fs::remove_file(&tmp);
        }
        return Err(e);
    }

    log::info!(
        "Saved {} ({} bytes) in {} ms",
        path.display(),
        text.len(),
        instant.elapsed().as_millis()
    );
    Ok(())
}

fn write_then_rename(tmp: &Path, path: &Path, text: &str) -> std::io::Result<()> {
    let mut w = BufWriter::new(fs::File::create(tmp)?);
    w.write_all(text.as_bytes())?;
    w.flush()?;
    drop(w);
    fs::rename(tmp, path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        TokenKind,
        keyhash::build::{PhfSearch, TableBuilder},
        keyhash::spec::KeywordSpec,
    };

    #[test]
    fn json_reload_keeps_lookups() {
        let spec = KeywordSpec::parse("let, Let\nin, In\nreturn, Return\n").unwrap();
        let table = PhfSearch::default().build_table(&spec).unwrap();

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("table.json");
        save_table_json(&path, &table).unwrap();
        let back = load_table_json_bytes(&fs::read(&path).unwrap()).unwrap();
        assert_eq!(back, table);
        assert_eq!(back.lookup(b"return"), TokenKind::Return);
    }

    #[test]
    fn bad_json_is_reported() {
        assert!(load_table_json_bytes(b"{\"seed\": 1}").is_err());
    }

    #[test]
    fn artifact_replaces_existing_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("out.rs");
        write_artifact(&path, "old").unwrap();
        write_artifact(&path, "new").unwrap();
        assert_eq!(fs::read_to_string(&path).unwrap(), "new");
        assert!(!dir.path().join("nested").join("out.rs.tmp").exists());
    }

    #[test]
    fn failed_rename_leaves_no_temp_file() {
        let dir = tempfile::tempdir().unwrap();
        // a non-empty directory cannot be replaced by a file
        let path = dir.path().join("out.rs");
        fs::create_dir(&path).unwrap();
        fs::write(path.join("keep"), "x").unwrap();

        assert!(write_artifact(&path, "table").is_err());
        assert!(!dir.path().join("out.rs.tmp").exists());
        assert!(path.join("keep").exists());
    }

    #[cfg(target_os = "linux")]
    #[test]
    fn failed_write_leaves_no_temp_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.rs");
        let tmp = dir.path().join("out.rs.tmp");
        // every write to /dev/full fails with ENOSPC
        std::os::unix::fs::symlink("/dev/full", &tmp).unwrap();

        assert!(write_artifact(&path, "table").is_err());
        assert!(fs::symlink_metadata(&tmp).is_err());
        assert!(!path.exists());
    }
}

//! Provenance manifest written next to the derived tables

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::load::LoadStats;

pub const MANIFEST_FILE: &str = "manifest.json";

/// Hash a file's contents with blake3.
pub fn hash_file(path: &Path) -> std::io::Result<blake3::Hash> {
    let mut hasher = blake3::Hasher::new();
    hasher.update_mmap(path)?;
    Ok(hasher.finalize())
}

/// Records which export produced the derived tables and how.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExportManifest {
    /// Export the tables were derived from.
    pub input_file: PathBuf,
    /// Blake3 hash of the export contents.
    pub input_hash: String,
    pub institution_marker: String,
    pub rows_scanned: usize,
    pub retained: usize,
    pub excluded: usize,
    pub authors: usize,
    pub keywords: usize,
    /// Output filename → blake3 hex hash.
    pub file_hashes: BTreeMap<String, String>,
    pub created_at: chrono::DateTime<chrono::Utc>,
}

impl ExportManifest {
    /// Build a manifest for `outputs` (filenames relative to `dir`).
    pub fn new(
        input_file: &Path,
        marker: &str,
        stats: LoadStats,
        counts: (usize, usize),
        dir: &Path,
        outputs: &[&str],
    ) -> Result<Self> {
        let input_hash = hash_file(input_file)
            .with_context(|| format!("failed to hash {}", input_file.display()))?;

        let mut file_hashes = BTreeMap::new();
        for name in outputs {
            let path = dir.join(name);
            let h = hash_file(&path)
                .with_context(|| format!("failed to hash {}", path.display()))?;
            file_hashes.insert((*name).to_string(), h.to_hex().to_string());
        }

        Ok(Self {
            input_file: input_file.to_path_buf(),
            input_hash: input_hash.to_hex().to_string(),
            institution_marker: marker.to_string(),
            rows_scanned: stats.rows_scanned,
            retained: stats.retained,
            excluded: stats.excluded,
            authors: counts.0,
            keywords: counts.1,
            file_hashes,
            created_at: chrono::Utc::now(),
        })
    }

    /// Whether `marker` differs from the one the tables were prepared with.
    pub fn marker_changed(&self, marker: &str) -> bool {
        self.institution_marker != marker
    }

    /// Whether the tables no longer describe `input_file` filtered by `marker`:
    /// the export contents changed or a different institution is selected.
    pub fn is_stale(&self, input_file: &Path, marker: &str) -> Result<bool> {
        if self.marker_changed(marker) {
            return Ok(true);
        }
        let current = hash_file(input_file)
            .with_context(|| format!("failed to hash {}", input_file.display()))?;
        Ok(current.to_hex().as_str() != self.input_hash)
    }

    /// Output files whose contents differ from the recorded hash, or are gone.
    pub fn modified_outputs(&self, dir: &Path) -> Vec<String> {
        self.file_hashes
            .iter()
            .filter(|(name, expected)| match hash_file(&dir.join(name)) {
                Ok(h) => h.to_hex().as_str() != expected.as_str(),
                Err(_) => true,
            })
            .map(|(name, _)| name.clone())
            .collect()
    }

    /// Write manifest to dir/manifest.json
    pub fn write_to(&self, dir: &Path) -> Result<()> {
        let path = dir.join(MANIFEST_FILE);
        let json = serde_json::to_string_pretty(self).context("failed to serialize manifest")?;
        std::fs::write(&path, json)
            .with_context(|| format!("failed to write {}", path.display()))?;
        Ok(())
    }

    /// Read manifest from dir/manifest.json
    pub fn read_from(dir: &Path) -> Result<Self> {
        let path = dir.join(MANIFEST_FILE);
        let json = std::fs::read_to_string(&path)
            .with_context(|| format!("failed to read {}", path.display()))?;
        serde_json::from_str(&json).with_context(|| format!("failed to parse {}", path.display()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn stats() -> LoadStats {
        LoadStats {
            rows_scanned: 3,
            retained: 2,
            excluded: 1,
        }
    }

    #[test]
    fn hash_file_matches_blake3() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("a.csv");
        std::fs::write(&path, b"file content").unwrap();
        assert_eq!(hash_file(&path).unwrap(), blake3::hash(b"file content"));
    }

    #[test]
    fn write_read_and_staleness() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("export.csv");
        std::fs::write(&input, "Name,Year,NBN\n").unwrap();
        std::fs::write(dir.path().join("authors.csv"), "Name\n").unwrap();

        let m = ExportManifest::new(&input, "nm", stats(), (4, 5), dir.path(), &["authors.csv"])
            .unwrap();
        m.write_to(dir.path()).unwrap();

        let back = ExportManifest::read_from(dir.path()).unwrap();
        assert_eq!(back.input_hash, m.input_hash);
        assert_eq!(back.retained, 2);
        assert_eq!(back.authors, 4);
        assert!(!back.is_stale(&input, "nm").unwrap());
        assert!(back.modified_outputs(dir.path()).is_empty());

        std::fs::write(&input, "Name,Year,NBN\nchanged\n").unwrap();
        assert!(back.is_stale(&input, "nm").unwrap());

        std::fs::remove_file(dir.path().join("authors.csv")).unwrap();
        assert_eq!(back.modified_outputs(dir.path()), vec!["authors.csv"]);
    }

    #[test]
    fn other_marker_makes_tables_stale() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("export.csv");
        std::fs::write(&input, "Name,Year,NBN\n").unwrap();

        let m = ExportManifest::new(&input, "nordiskamuseet", stats(), (0, 0), dir.path(), &[])
            .unwrap();
        assert!(!m.is_stale(&input, "nordiskamuseet").unwrap());
        assert!(m.marker_changed("su"));
        assert!(m.is_stale(&input, "su").unwrap());
    }

    #[test]
    fn read_missing_manifest_fails() {
        let dir = tempfile::tempdir().unwrap();
        assert!(ExportManifest::read_from(dir.path()).is_err());
    }
}

//! Output bundle
//!
//! TIA Portal imports SCL sources and tag tables reliably only when they are
//! UTF-8 with a byte-order mark, so every generated document gets one. The
//! report is for people and is written without.

use std::path::Path;

use anyhow::Context;
use scl_codegen::{Generation, REPORT_FILE_NAME};

use crate::error::CliResult;

/// UTF-8 byte-order mark.
pub const BOM: &[u8] = b"\xEF\xBB\xBF";

/// One file of the bundle, ready to write.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BundleFile {
    pub file_name: &'static str,
    pub bytes: Vec<u8>,
}

/// Outcome of [`write_if_changed`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WriteStatus {
    Written,
    Unchanged,
}

/// The four documents (BOM-prefixed) followed by the report.
pub fn bundle_files(generation: &Generation, report: &str) -> Vec<BundleFile> {
    let mut files: Vec<BundleFile> = generation
        .artifacts
        .iter()
        .map(|a| BundleFile {
            file_name: a.file_name,
            bytes: with_bom(&a.contents),
        })
        .collect();
    files.push(BundleFile {
        file_name: REPORT_FILE_NAME,
        bytes: report.as_bytes().to_vec(),
    });
    files
}

fn with_bom(text: &str) -> Vec<u8> {
    let mut bytes = Vec::with_capacity(BOM.len() + text.len());
    bytes.extend_from_slice(BOM);
    bytes.extend_from_slice(text.as_bytes());
    bytes
}

/// Write `bytes` to `path`, creating parent directories as needed.
/// Leaves the file untouched when its contents are already identical.
pub fn write_if_changed(path: &Path, bytes: &[u8]) -> CliResult<WriteStatus> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("creating directory: {}", parent.display()))?;
    }

    let existing = std::fs::read(path).ok();
    if existing.as_deref() == Some(bytes) {
        return Ok(WriteStatus::Unchanged);
    }

    std::fs::write(path, bytes).with_context(|| format!("writing {}", path.display()))?;
    Ok(WriteStatus::Written)
}

#[cfg(test)]
mod tests {
    use super::*;
    use scl_codegen::{generate, RenderContext};

    fn generation() -> Generation {
        let src = r#"{"deviceTypes": [], "devices": [{"name": "Fan", "id": 0, "type": "fan"}]}"#;
        let ctx = RenderContext::new("P", "1.0.0", "2026-01-01 00:00:00", "graph.json");
        generate(src, &ctx).unwrap()
    }

    #[test]
    fn documents_get_bom_and_report_does_not() {
        let files = bundle_files(&generation(), "report\n");
        let names: Vec<&str> = files.iter().map(|f| f.file_name).collect();
        assert_eq!(
            names,
            vec![
                "DB_Mechs.scl",
                "DB_SimConfig.scl",
                "DB_SimMechs.scl",
                "Mechs.csv",
                "generation_report.txt"
            ]
        );
        for f in &files[..4] {
            assert!(f.bytes.starts_with(BOM), "{}", f.file_name);
            assert!(!f.bytes[3..].starts_with(BOM), "{}", f.file_name);
        }
        assert_eq!(files[4].bytes, b"report\n");
    }

    #[test]
    fn bom_is_the_utf8_encoding_of_feff() {
        assert_eq!(BOM, "\u{feff}".as_bytes());
    }

    #[test]
    fn second_identical_write_is_unchanged() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("DB_Mechs.scl");

        assert_eq!(write_if_changed(&path, b"abc").unwrap(), WriteStatus::Written);
        assert_eq!(write_if_changed(&path, b"abc").unwrap(), WriteStatus::Unchanged);
        assert_eq!(write_if_changed(&path, b"abd").unwrap(), WriteStatus::Written);
        assert_eq!(std::fs::read(&path).unwrap(), b"abd");
    }
}

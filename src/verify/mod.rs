//! Asset integrity verification
//!
//! PM2 asset dumps ship with a hash list file: one `<md5-hex> <relative
//! path>` entry per line, `#` comments and blank lines ignored. This module
//! checks a directory of assets against such a list.

use std::fmt::Write as _;
use std::io::Read;
use std::path::{Path, PathBuf};

use crate::error::{Error, Result};

/// Chunk size for incremental file hashing.
const HASH_CHUNK_SIZE: usize = 8192;

/// One parsed line of a hash list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HashEntry {
    /// Expected MD5 digest, lowercase hex.
    pub expected: String,
    /// Asset path relative to the assets directory.
    pub path: PathBuf,
}

/// Result of checking a single asset.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum VerifyStatus {
    /// Digest matches.
    Pass,
    /// File exists but hashes differently.
    Fail {
        /// The digest actually computed.
        actual: String,
    },
    /// File not found.
    Missing,
}

/// One asset with its verification outcome.
#[derive(Debug, Clone)]
pub struct VerifyOutcome {
    /// Full path that was checked.
    pub path: PathBuf,
    pub status: VerifyStatus,
}

/// Full verification report.
#[derive(Debug, Default)]
pub struct VerifyReport {
    pub outcomes: Vec<VerifyOutcome>,
}

impl VerifyReport {
    pub fn passed(&self) -> usize {
        self.count(|s| matches!(s, VerifyStatus::Pass))
    }

    pub fn failed(&self) -> usize {
        self.count(|s| matches!(s, VerifyStatus::Fail { .. }))
    }

    pub fn missing(&self) -> usize {
        self.count(|s| matches!(s, VerifyStatus::Missing))
    }

    /// True when every listed asset exists and matches.
    pub fn is_clean(&self) -> bool {
        self.passed() == self.outcomes.len()
    }

    fn count(&self, pred: impl Fn(&VerifyStatus) -> bool) -> usize {
        self.outcomes.iter().filter(|o| pred(&o.status)).count()
    }
}

/// Parse hash list text into entries.
///
/// # Errors
/// Returns [`Error::MalformedHashEntry`] for lines that are not exactly
/// `<hex-digest> <path>`.
pub fn parse_hash_list(text: &str) -> Result<Vec<HashEntry>> {
    let mut entries = Vec::new();
    for (i, line) in text.lines().enumerate() {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        let mut fields = line.split_whitespace();
        let (Some(digest), Some(path), None) = (fields.next(), fields.next(), fields.next())
        else {
            return Err(Error::MalformedHashEntry {
                line: i + 1,
                content: line.to_string(),
            });
        };
        if digest.len() != 32 || !digest.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(Error::MalformedHashEntry {
                line: i + 1,
                content: line.to_string(),
            });
        }
        entries.push(HashEntry {
            expected: digest.to_lowercase(),
            path: PathBuf::from(path),
        });
    }
    Ok(entries)
}

/// MD5 digest of a file, read in 8 KiB chunks, as lowercase hex.
pub fn file_md5<P: AsRef<Path>>(path: P) -> Result<String> {
    let mut file = std::fs::File::open(path)?;
    let mut context = md5::Context::new();
    let mut chunk = [0u8; HASH_CHUNK_SIZE];
    loop {
        let read = file.read(&mut chunk)?;
        if read == 0 {
            break;
        }
        context.consume(&chunk[..read]);
    }
    let digest = context.compute();
    let mut hex = String::with_capacity(32);
    let _ = write!(hex, "{digest:x}");
    Ok(hex)
}

/// Verify every entry of a hash list against `assets_dir`.
///
/// Missing and mismatching files are reported per entry, not as errors; only
/// an unreadable list (or an unreadable existing file) aborts.
pub fn verify_assets<P: AsRef<Path>, Q: AsRef<Path>>(
    assets_dir: P,
    list_path: Q,
) -> Result<VerifyReport> {
    let text = std::fs::read_to_string(list_path)?;
    let entries = parse_hash_list(&text)?;

    let mut report = VerifyReport::default();
    for entry in entries {
        let full_path = assets_dir.as_ref().join(&entry.path);
        let status = if full_path.exists() {
            let actual = file_md5(&full_path)?;
            if actual == entry.expected {
                VerifyStatus::Pass
            } else {
                VerifyStatus::Fail { actual }
            }
        } else {
            VerifyStatus::Missing
        };
        report.outcomes.push(VerifyOutcome {
            path: full_path,
            status,
        });
    }

    tracing::debug!(
        "verified {} assets: {} pass, {} fail, {} missing",
        report.outcomes.len(),
        report.passed(),
        report.failed(),
        report.missing()
    );
    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_parse_skips_comments_and_blanks() {
        let text = "# header\n\nd41d8cd98f00b204e9800998ecf8427e pitch.gnd\n";
        let entries = parse_hash_list(text).unwrap();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].path, PathBuf::from("pitch.gnd"));
    }

    #[test]
    fn test_parse_rejects_malformed_lines() {
        assert!(matches!(
            parse_hash_list("justonefield").unwrap_err(),
            Error::MalformedHashEntry { line: 1, .. }
        ));
        assert!(matches!(
            parse_hash_list("nothex!aaaaaaaaaaaaaaaaaaaaaaaaaa file").unwrap_err(),
            Error::MalformedHashEntry { .. }
        ));
    }

    #[test]
    fn test_file_md5_known_digest() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("empty.bin");
        std::fs::write(&path, b"").unwrap();
        assert_eq!(file_md5(&path).unwrap(), "d41d8cd98f00b204e9800998ecf8427e");

        std::fs::write(&path, b"abc").unwrap();
        assert_eq!(file_md5(&path).unwrap(), "900150983cd24fb0d6963f7d28e17f72");
    }

    #[test]
    fn test_verify_reports_all_statuses() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("good.bin"), b"abc").unwrap();
        std::fs::write(dir.path().join("bad.bin"), b"xyz").unwrap();
        let list = dir.path().join("hashes.txt");
        std::fs::write(
            &list,
            "900150983cd24fb0d6963f7d28e17f72 good.bin\n\
             900150983cd24fb0d6963f7d28e17f72 bad.bin\n\
             900150983cd24fb0d6963f7d28e17f72 gone.bin\n",
        )
        .unwrap();

        let report = verify_assets(dir.path(), &list).unwrap();
        assert_eq!(report.passed(), 1);
        assert_eq!(report.failed(), 1);
        assert_eq!(report.missing(), 1);
        assert!(!report.is_clean());
    }
}

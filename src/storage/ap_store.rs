//! Saved access point list.
//!
//! The backing file holds one `SSID//PASSWORD` record per line. Every
//! operation re-reads the whole file and every mutation rewrites it, so there
//! is no cached state to go stale between calls. Lines without the separator
//! are carried through rewrites untouched.

use super::error::{StorageError, StorageResult};
use super::text_file::write_whole;
use crate::text::{decode_text, trim};
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

/// Field separator inside a record line.
pub const SEPARATOR: &str = "//";

/// Saved credentials for one access point, keyed by SSID.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ApRecord {
    pub ssid: String,
    pub password: String,
}

impl ApRecord {
    /// Build a record that is safe to serialize.
    ///
    /// Both fields are trimmed first, since lines are trimmed on reload.
    /// The SSID must then be non-empty, free of `//` and line breaks, and
    /// must not end in `/`; the password may contain `//` (only the first
    /// separator splits a line) but no line breaks.
    pub fn new(ssid: impl Into<String>, password: impl Into<String>) -> StorageResult<Self> {
        let ssid = trim(&ssid.into()).to_string();
        let password = trim(&password.into()).to_string();

        if ssid.is_empty() {
            return Err(StorageError::invalid_record("SSID is empty"));
        }
        if ssid.contains(SEPARATOR) {
            return Err(StorageError::invalid_record(format!(
                "SSID '{ssid}' contains '{SEPARATOR}'"
            )));
        }
        if ssid.ends_with('/') {
            return Err(StorageError::invalid_record(format!(
                "SSID '{ssid}' ends with '/'"
            )));
        }
        if has_line_break(&ssid) {
            return Err(StorageError::invalid_record("SSID contains a line break"));
        }
        if has_line_break(&password) {
            return Err(StorageError::invalid_record("password contains a line break"));
        }

        Ok(Self { ssid, password })
    }

    /// The record's line, without terminator.
    pub fn to_line(&self) -> String {
        format!("{}{}{}", self.ssid, SEPARATOR, self.password)
    }
}

fn has_line_break(s: &str) -> bool {
    s.contains(['\n', '\r'])
}

/// One non-empty line of the store file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApEntry {
    /// A line split at its first `//`.
    Record(ApRecord),
    /// A line with no separator, kept verbatim.
    Raw(String),
}

impl ApEntry {
    /// Parse one line; padding-only lines yield `None`.
    pub fn parse(line: &str) -> Option<Self> {
        let line = trim(line);
        if line.is_empty() {
            return None;
        }
        Some(match line.split_once(SEPARATOR) {
            Some((ssid, password)) => Self::Record(ApRecord {
                ssid: trim(ssid).to_string(),
                password: trim(password).to_string(),
            }),
            None => Self::Raw(line.to_string()),
        })
    }

    pub fn as_record(&self) -> Option<&ApRecord> {
        match self {
            Self::Record(record) => Some(record),
            Self::Raw(_) => None,
        }
    }

    pub fn ssid(&self) -> Option<&str> {
        self.as_record().map(|r| r.ssid.as_str())
    }

    pub fn to_line(&self) -> String {
        match self {
            Self::Record(record) => record.to_line(),
            Self::Raw(line) => line.clone(),
        }
    }
}

/// Parse file contents into entries, skipping blank lines.
pub fn parse_entries(content: &str) -> Vec<ApEntry> {
    content.split('\n').filter_map(ApEntry::parse).collect()
}

/// Serialize entries one per line, each `\n`-terminated.
pub fn serialize_entries(entries: &[ApEntry]) -> String {
    let mut out = String::new();
    for entry in entries {
        out.push_str(&entry.to_line());
        out.push('\n');
    }
    out
}

/// SSIDs joined with `", "` for display and for the remote's known-network hint.
///
/// Passwords are never included.
pub fn join_for_display<'a, I>(records: I) -> String
where
    I: IntoIterator<Item = &'a ApRecord>,
{
    records
        .into_iter()
        .map(|r| r.ssid.as_str())
        .collect::<Vec<_>>()
        .join(", ")
}

/// What [`ApStore::upsert`] did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UpsertOutcome {
    /// The SSID was new and went to the end of the file.
    Inserted,
    /// An existing line for the SSID was replaced where it stood.
    Updated,
}

/// Read-modify-write store over the saved AP file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApStore {
    path: PathBuf,
}

impl ApStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn exists(&self) -> bool {
        self.path.is_file()
    }

    /// Every entry in file order; a missing file is an empty list.
    pub fn load_all(&self) -> StorageResult<Vec<ApEntry>> {
        let bytes = match std::fs::read(&self.path) {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                debug!("No saved AP file at {}", self.path.display());
                return Ok(Vec::new());
            }
            Err(e) => return Err(StorageError::io(&self.path, e)),
        };

        let entries = parse_entries(&decode_text(bytes));
        let raw = entries.iter().filter(|e| e.as_record().is_none()).count();
        if raw > 0 {
            warn!(
                "{} line(s) in {} have no '{}' separator; keeping them as-is",
                raw,
                self.path.display(),
                SEPARATOR
            );
        }
        Ok(entries)
    }

    /// Only the well-formed records, in file order.
    pub fn records(&self) -> StorageResult<Vec<ApRecord>> {
        Ok(self
            .load_all()?
            .into_iter()
            .filter_map(|e| match e {
                ApEntry::Record(record) => Some(record),
                ApEntry::Raw(_) => None,
            })
            .collect())
    }

    /// Insert or replace the record for `ssid`.
    ///
    /// An existing SSID keeps its position; a new one is appended. Later
    /// duplicates of the same SSID (left by hand edits) are dropped so the
    /// file ends with exactly one line per SSID.
    pub fn upsert(&self, ssid: &str, password: &str) -> StorageResult<UpsertOutcome> {
        let record = ApRecord::new(ssid, password)?;
        let entries = self.load_all()?;

        let mut outcome = UpsertOutcome::Inserted;
        let mut updated = Vec::with_capacity(entries.len() + 1);
        for entry in entries {
            if entry.ssid() == Some(record.ssid.as_str()) {
                if outcome == UpsertOutcome::Inserted {
                    updated.push(ApEntry::Record(record.clone()));
                    outcome = UpsertOutcome::Updated;
                }
                continue;
            }
            updated.push(entry);
        }
        if outcome == UpsertOutcome::Inserted {
            updated.push(ApEntry::Record(record.clone()));
        }

        self.write_entries(&updated)?;
        info!(
            "Saved AP '{}' ({:?}) to {}",
            record.ssid,
            outcome,
            self.path.display()
        );
        Ok(outcome)
    }

    /// Replace the whole file with `entries`.
    pub fn write_entries(&self, entries: &[ApEntry]) -> StorageResult<()> {
        write_whole(&self.path, serialize_entries(entries).as_bytes())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use tempfile::TempDir;

    fn rec(ssid: &str, password: &str) -> ApRecord {
        ApRecord::new(ssid, password).unwrap()
    }

    #[test]
    fn test_parse_splits_at_first_separator() {
        assert_eq!(
            ApEntry::parse("Lab//a//b"),
            Some(ApEntry::Record(rec("Lab", "a//b")))
        );
    }

    #[test]
    fn test_parse_trims_and_skips_blank() {
        assert_eq!(ApEntry::parse("  \r"), None);
        assert_eq!(
            ApEntry::parse(" Home//pass1\r"),
            Some(ApEntry::Record(rec("Home", "pass1")))
        );
    }

    #[test]
    fn test_parse_keeps_line_without_separator() {
        assert_eq!(
            ApEntry::parse("legacy-entry"),
            Some(ApEntry::Raw("legacy-entry".to_string()))
        );
    }

    #[test]
    fn test_record_validation() {
        assert!(ApRecord::new("", "pw").is_err());
        assert!(ApRecord::new("a//b", "pw").is_err());
        assert!(ApRecord::new("a\nb", "pw").is_err());
        assert!(ApRecord::new("ssid", "p\nw").is_err());
        assert!(ApRecord::new("ssid", "p//w").is_ok());
        assert!(ApRecord::new("ssid/", "pw").is_err());
        assert!(ApRecord::new("  ", "pw").is_err());
    }

    #[test]
    fn test_record_fields_are_trimmed() {
        assert_eq!(rec(" Home", "pw \r\n"), rec("Home", "pw"));
        assert_eq!(
            ApEntry::parse("Home //  pw"),
            Some(ApEntry::Record(rec("Home", "pw")))
        );
    }

    #[test]
    fn test_join_for_display() {
        assert_eq!(join_for_display(&[] as &[ApRecord]), "");
        assert_eq!(join_for_display(&[rec("X", "1")]), "X");
        assert_eq!(join_for_display(&[rec("X", "1"), rec("Y", "2")]), "X, Y");
    }

    #[test]
    fn test_serialize_terminates_every_line() {
        let entries = vec![
            ApEntry::Record(rec("Home", "pass1")),
            ApEntry::Raw("junk".to_string()),
        ];
        assert_eq!(serialize_entries(&entries), "Home//pass1\njunk\n");
    }

    #[test]
    fn test_upsert_drops_later_duplicates() {
        let dir = TempDir::new().unwrap();
        let store = ApStore::new(dir.path().join("SavedAPs.txt"));
        std::fs::write(store.path(), "A//1\nB//2\nA//3\n").unwrap();

        let outcome = store.upsert("A", "9").unwrap();
        assert_eq!(outcome, UpsertOutcome::Updated);
        assert_eq!(
            std::fs::read_to_string(store.path()).unwrap(),
            "A//9\nB//2\n"
        );
    }

    #[test]
    fn test_upsert_rejects_invalid_without_touching_file() {
        let dir = TempDir::new().unwrap();
        let store = ApStore::new(dir.path().join("SavedAPs.txt"));

        assert!(matches!(
            store.upsert("", "pw"),
            Err(StorageError::InvalidRecord(_))
        ));
        assert!(!store.exists());
    }
}

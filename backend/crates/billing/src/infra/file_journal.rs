//! File-backed Journal Store
//!
//! One JSON array file per user under the storage root. Every append is a
//! full read-modify-write of that file, published with an atomic rename, so
//! a reader sees either the previous journal or the new one and never a
//! partial write.

use std::fmt::Write as _;
use std::fs::{self, File};
use std::io::{self, Write as _};
use std::path::{Path, PathBuf};

use crate::domain::entities::ChargeRecord;
use crate::domain::gate::GateGuard;
use crate::domain::repository::{AppendOutcome, CorruptJournalPolicy, JournalRepository};
use crate::error::{BillingError, BillingResult};

const JOURNAL_EXTENSION: &str = ".json";
const TEMP_SUFFIX: &str = ".tmp";
const QUARANTINE_MARKER: &str = ".corrupt-";

/// Common per-component file name limit (ext4, xfs, apfs, ntfs)
const FILE_NAME_MAX_BYTES: usize = 255;
/// Length of a simple-formatted uuid
const UUID_SIMPLE_LEN: usize = 32;
/// Journal names must leave room for the longest sibling suffix (quarantine)
const JOURNAL_NAME_MAX_BYTES: usize =
    FILE_NAME_MAX_BYTES - QUARANTINE_MARKER.len() - UUID_SIMPLE_LEN;
/// Marks a digest-derived name. Never produced by escaping.
const DIGEST_PREFIX: char = '=';

/// Journal store rooted at a directory on local disk
#[derive(Debug, Clone)]
pub struct FileJournalStore {
    root: PathBuf,
    policy: CorruptJournalPolicy,
}

impl FileJournalStore {
    pub fn new(root: impl Into<PathBuf>, policy: CorruptJournalPolicy) -> Self {
        Self {
            root: root.into(),
            policy,
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Location of the journal for `username`
    pub fn journal_path(&self, username: &str) -> PathBuf {
        self.root.join(journal_file_name(username))
    }

    /// Create the storage root and delete temp files left behind by a crash
    /// between write and rename.
    ///
    /// Must run before requests are served: it does not take any gate.
    pub async fn prepare(&self) -> BillingResult<u64> {
        let root = self.root.clone();
        let removed = tokio::task::spawn_blocking(move || -> io::Result<u64> {
            fs::create_dir_all(&root)?;
            let mut removed = 0;
            for entry in fs::read_dir(&root)? {
                let entry = entry?;
                let name = entry.file_name();
                if name.to_string_lossy().ends_with(TEMP_SUFFIX) {
                    fs::remove_file(entry.path())?;
                    removed += 1;
                }
            }
            Ok(removed)
        })
        .await??;

        tracing::info!(
            root = %self.root.display(),
            temp_files_removed = removed,
            "Journal storage ready"
        );

        Ok(removed)
    }
}

impl JournalRepository for FileJournalStore {
    async fn append(
        &self,
        guard: GateGuard,
        record: ChargeRecord,
    ) -> BillingResult<AppendOutcome> {
        if guard.key() != record.user {
            return Err(BillingError::Internal(format!(
                "gate held for {:?} but record belongs to {:?}",
                guard.key(),
                record.user
            )));
        }

        let path = self.journal_path(&record.user);
        let policy = self.policy;

        // The guard moves into the blocking task: the user stays locked until
        // the write-back is finished, even if this future is dropped.
        let outcome = tokio::task::spawn_blocking(move || {
            let _guard = guard;
            append_blocking(&path, record, policy)
        })
        .await??;

        Ok(outcome)
    }

    async fn read(&self, username: &str) -> BillingResult<Vec<ChargeRecord>> {
        let path = self.journal_path(username);
        match tokio::fs::read(&path).await {
            Ok(bytes) => decode(&bytes).map_err(|reason| BillingError::CorruptJournal {
                user: username.to_string(),
                reason,
            }),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(Vec::new()),
            Err(e) => Err(BillingError::Storage(e)),
        }
    }
}

fn append_blocking(
    path: &Path,
    record: ChargeRecord,
    policy: CorruptJournalPolicy,
) -> BillingResult<AppendOutcome> {
    append_with(path, record, policy, write_atomic)
}

/// Read-modify-write of one journal. `publish` replaces the file at `path`;
/// until it succeeds the journal at `path` is left as it was.
fn append_with<F>(
    path: &Path,
    record: ChargeRecord,
    policy: CorruptJournalPolicy,
    publish: F,
) -> BillingResult<AppendOutcome>
where
    F: FnOnce(&Path, &[ChargeRecord]) -> BillingResult<()>,
{
    let (mut records, recovered) = match load(path)? {
        Ok(records) => (records, false),
        Err(reason) => match policy {
            CorruptJournalPolicy::Reject => {
                return Err(BillingError::CorruptJournal {
                    user: record.user,
                    reason,
                });
            }
            CorruptJournalPolicy::Recover => {
                let quarantined = quarantine(path)?;
                tracing::warn!(
                    user = %record.user,
                    reason = %reason,
                    quarantined = %quarantined.display(),
                    "Journal unreadable; continuing from an empty journal"
                );
                (Vec::new(), true)
            }
        },
    };

    records.push(record);
    publish(path, &records)?;

    Ok(AppendOutcome {
        journal_len: records.len(),
        recovered_from_corruption: recovered,
    })
}

/// Outer error: the file could not be read. Inner error: it was read but
/// does not decode.
fn load(path: &Path) -> io::Result<Result<Vec<ChargeRecord>, String>> {
    match fs::read(path) {
        Ok(bytes) => Ok(decode(&bytes)),
        Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(Ok(Vec::new())),
        Err(e) => Err(e),
    }
}

fn decode(bytes: &[u8]) -> Result<Vec<ChargeRecord>, String> {
    serde_json::from_slice(bytes).map_err(|e| e.to_string())
}

/// Keep a copy of an unreadable journal next to it. The original stays in
/// place until the new journal is renamed over it.
fn quarantine(path: &Path) -> io::Result<PathBuf> {
    let marker = format!("{QUARANTINE_MARKER}{}", uuid::Uuid::new_v4().simple());
    let target = sibling(path, &marker);
    if fs::hard_link(path, &target).is_err() {
        fs::copy(path, &target)?;
    }
    Ok(target)
}

fn write_atomic(path: &Path, records: &[ChargeRecord]) -> BillingResult<()> {
    let payload = serde_json::to_vec_pretty(records)
        .map_err(|e| BillingError::Internal(format!("failed to encode journal: {e}")))?;

    let dir = path
        .parent()
        .ok_or_else(|| BillingError::Internal("journal path has no parent".into()))?;
    fs::create_dir_all(dir)?;

    let suffix = format!(".{}{TEMP_SUFFIX}", uuid::Uuid::new_v4().simple());
    let temp = sibling(path, &suffix);
    let written = (|| -> io::Result<()> {
        let mut file = File::create(&temp)?;
        file.write_all(&payload)?;
        file.sync_all()?;
        fs::rename(&temp, path)?;
        sync_dir(dir)
    })();

    if let Err(e) = written {
        let _ = fs::remove_file(&temp);
        return Err(BillingError::Storage(e));
    }
    Ok(())
}

#[cfg(unix)]
fn sync_dir(dir: &Path) -> io::Result<()> {
    File::open(dir)?.sync_all()
}

#[cfg(not(unix))]
fn sync_dir(_dir: &Path) -> io::Result<()> {
    Ok(())
}

fn sibling(path: &Path, suffix: &str) -> PathBuf {
    let mut name = path.file_name().unwrap_or_default().to_os_string();
    name.push(suffix);
    path.with_file_name(name)
}

/// Deterministic, injective file name for a username.
///
/// Bytes outside `[A-Za-z0-9_-]` are written as `%XX`, so the name can never
/// leave the storage root or collide with another user's journal. When the
/// escaped form would not fit the file name limit together with its temp and
/// quarantine siblings, the name is `=` followed by the hex SHA-256 of the
/// username instead.
pub fn journal_file_name(username: &str) -> String {
    let mut name = String::with_capacity(username.len() + JOURNAL_EXTENSION.len());
    for byte in username.bytes() {
        if byte.is_ascii_alphanumeric() || byte == b'_' || byte == b'-' {
            name.push(byte as char);
        } else {
            let _ = write!(name, "%{byte:02X}");
        }
    }

    if name.len() + JOURNAL_EXTENSION.len() > JOURNAL_NAME_MAX_BYTES {
        name.clear();
        name.push(DIGEST_PREFIX);
        for byte in platform::crypto::sha256(username.as_bytes()) {
            let _ = write!(name, "{byte:02x}");
        }
    }

    name.push_str(JOURNAL_EXTENSION);
    name
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::services::validate_charge;
    use crate::domain::value_objects::ChargeRequest;

    fn record(username: &str) -> ChargeRecord {
        let charge = validate_charge(ChargeRequest {
            username: username.to_string(),
            product_id: "p1".to_string(),
            quantity: 1,
            date: Some("2024-01-01T00:00:00Z".to_string()),
        })
        .unwrap();
        ChargeRecord::charged(&charge)
    }

    fn disk_full(_: &Path, _: &[ChargeRecord]) -> BillingResult<()> {
        Err(BillingError::Storage(io::Error::new(
            io::ErrorKind::StorageFull,
            "no space left on device",
        )))
    }

    #[test]
    fn test_failed_recovery_keeps_corrupt_journal() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(journal_file_name("bob"));
        fs::write(&path, b"{ not a journal").unwrap();

        let policy = CorruptJournalPolicy::Recover;
        let result = append_with(&path, record("bob"), policy, disk_full);
        assert!(matches!(result, Err(BillingError::Storage(_))));

        // The journal is exactly as it was before the append
        assert_eq!(fs::read(&path).unwrap(), b"{ not a journal");
        assert!(load(&path).unwrap().is_err());
    }

    #[test]
    fn test_failed_write_keeps_existing_journal() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(journal_file_name("alice"));
        append_blocking(&path, record("alice"), CorruptJournalPolicy::Recover).unwrap();
        let before = fs::read(&path).unwrap();

        let policy = CorruptJournalPolicy::Recover;
        let result = append_with(&path, record("alice"), policy, disk_full);
        assert!(matches!(result, Err(BillingError::Storage(_))));
        assert_eq!(fs::read(&path).unwrap(), before);
    }

    #[test]
    fn test_quarantine_copies_without_removing() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bob.json");
        fs::write(&path, b"garbage").unwrap();

        let target = quarantine(&path).unwrap();
        assert_eq!(fs::read(&path).unwrap(), b"garbage");
        assert_eq!(fs::read(&target).unwrap(), b"garbage");
    }

    #[test]
    fn test_long_names_fit_with_siblings() {
        let names = [
            ".".repeat(300),
            "日本語".repeat(30),
            "a".repeat(JOURNAL_NAME_MAX_BYTES),
        ];
        for username in &names {
            let name = journal_file_name(username);
            assert!(name.starts_with(DIGEST_PREFIX));
            let quarantine_len = name.len() + QUARANTINE_MARKER.len() + UUID_SIMPLE_LEN;
            let temp_len = name.len() + 1 + UUID_SIMPLE_LEN + TEMP_SUFFIX.len();
            assert!(quarantine_len <= FILE_NAME_MAX_BYTES);
            assert!(temp_len <= FILE_NAME_MAX_BYTES);
        }
        assert_ne!(journal_file_name(&names[0]), journal_file_name(&names[1]));

        // Longest escaped name that is kept readable
        let fits = "a".repeat(JOURNAL_NAME_MAX_BYTES - JOURNAL_EXTENSION.len());
        assert_eq!(journal_file_name(&fits), format!("{fits}.json"));
    }
}

use std::collections::BTreeSet;
use std::fs::File;
use std::io::{BufReader, BufWriter, Write as _};
use std::path::{Path, PathBuf};

use anyhow::Context as _;

use crate::foundation::error::{RetrospectError, RetrospectResult};
use crate::waitlist::email::EmailAddress;

/// Message returned for an address that is already registered.
pub const DUPLICATE_MESSAGE: &str =
    "This email has already been signed up for the Retrospect waitlist.";

/// One stored waitlist entry.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct EmailRecord {
    /// Store-assigned id, increasing in registration order.
    pub id: u64,
    /// Registered address.
    pub email: String,
}

/// Persistence for waitlist addresses. Uniqueness is enforced by the store itself.
pub trait EmailStore {
    /// Register `email`, failing with [`RetrospectError::Duplicate`] if already present.
    fn register(&mut self, email: &EmailAddress) -> RetrospectResult<EmailRecord>;

    /// Return `true` when `email` is registered.
    fn contains(&self, email: &EmailAddress) -> bool;

    /// All records in registration order.
    fn records(&self) -> &[EmailRecord];

    /// Number of registered addresses.
    fn len(&self) -> usize {
        self.records().len()
    }

    /// Return `true` when nothing is registered.
    fn is_empty(&self) -> bool {
        self.records().is_empty()
    }
}

/// In-memory store; addresses compare exactly (case-sensitive), like a unique index.
#[derive(Clone, Debug, Default)]
pub struct MemoryStore {
    records: Vec<EmailRecord>,
    index: BTreeSet<String>,
    next_id: u64,
}

impl MemoryStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Rebuild a store from existing records, rejecting duplicates.
    pub fn from_records(records: Vec<EmailRecord>) -> RetrospectResult<Self> {
        let mut index = BTreeSet::new();
        for r in &records {
            if !index.insert(r.email.clone()) {
                return Err(RetrospectError::validation(format!(
                    "stored waitlist contains '{}' more than once",
                    r.email
                )));
            }
        }
        let next_id = records.iter().map(|r| r.id + 1).max().unwrap_or(0);
        Ok(Self {
            records,
            index,
            next_id,
        })
    }

    fn remove_last(&mut self) {
        if let Some(r) = self.records.pop() {
            self.index.remove(&r.email);
            self.next_id = r.id;
        }
    }
}

impl EmailStore for MemoryStore {
    fn register(&mut self, email: &EmailAddress) -> RetrospectResult<EmailRecord> {
        if !self.index.insert(email.as_str().to_string()) {
            return Err(RetrospectError::duplicate(DUPLICATE_MESSAGE));
        }
        let record = EmailRecord {
            id: self.next_id,
            email: email.as_str().to_string(),
        };
        self.next_id += 1;
        self.records.push(record.clone());
        Ok(record)
    }

    fn contains(&self, email: &EmailAddress) -> bool {
        self.index.contains(email.as_str())
    }

    fn records(&self) -> &[EmailRecord] {
        &self.records
    }
}

/// Store persisted as a pretty-printed JSON array.
///
/// Every successful registration rewrites the file through a sibling temp file and a rename.
#[derive(Clone, Debug)]
pub struct JsonFileStore {
    path: PathBuf,
    inner: MemoryStore,
}

impl JsonFileStore {
    /// Open `path`, starting empty if the file does not exist yet.
    pub fn open(path: impl AsRef<Path>) -> RetrospectResult<Self> {
        let path = path.as_ref().to_path_buf();
        let inner = if path.exists() {
            let f = File::open(&path)
                .with_context(|| format!("open waitlist store '{}'", path.display()))?;
            let records: Vec<EmailRecord> = serde_json::from_reader(BufReader::new(f))
                .map_err(|e| {
                    RetrospectError::serde(format!(
                        "parse waitlist store '{}': {e}",
                        path.display()
                    ))
                })?;
            MemoryStore::from_records(records)?
        } else {
            MemoryStore::new()
        };
        tracing::debug!(path = %path.display(), entries = inner.len(), "waitlist store opened");
        Ok(Self { path, inner })
    }

    /// Backing file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn persist(&self) -> RetrospectResult<()> {
        if let Some(parent) = self.path.parent()
            && !parent.as_os_str().is_empty()
        {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("create store dir '{}'", parent.display()))?;
        }
        let tmp = self.path.with_extension("json.tmp");
        let result = self.write_to(&tmp).and_then(|()| {
            std::fs::rename(&tmp, &self.path).with_context(|| {
                format!(
                    "replace waitlist store '{}' with '{}'",
                    self.path.display(),
                    tmp.display()
                )
            })?;
            Ok(())
        });
        if result.is_err() {
            let _ = std::fs::remove_file(&tmp);
        }
        result
    }

    fn write_to(&self, tmp: &Path) -> RetrospectResult<()> {
        let f = File::create(tmp)
            .with_context(|| format!("create temp store '{}'", tmp.display()))?;
        let mut w = BufWriter::new(f);
        serde_json::to_writer_pretty(&mut w, self.inner.records())
            .map_err(|e| RetrospectError::serde(format!("serialize waitlist: {e}")))?;
        w.write_all(b"\n")
            .and_then(|()| w.flush())
            .with_context(|| format!("write temp store '{}'", tmp.display()))?;
        Ok(())
    }
}

impl EmailStore for JsonFileStore {
    fn register(&mut self, email: &EmailAddress) -> RetrospectResult<EmailRecord> {
        let record = self.inner.register(email)?;
        if let Err(e) = self.persist() {
            self.inner.remove_last();
            return Err(e);
        }
        Ok(record)
    }

    fn contains(&self, email: &EmailAddress) -> bool {
        self.inner.contains(email)
    }

    fn records(&self) -> &[EmailRecord] {
        self.inner.records()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/waitlist/store.rs"]
mod tests;

//! Durable snapshot store
//!
//! Full-document hand-off between execution contexts that share no memory.
//! A snapshot is written whole under a well-known key and read back whole;
//! readers never see a partial document. Across contexts the store is
//! last-writer-wins: the later physical write replaces the earlier one in
//! full.
//!
//! The durable medium is pluggable: [`MemoryMedium`] simulates a shared
//! platform store (with quota and cross-context change listeners) for tests,
//! [`FileMedium`] keeps one JSON file per key and pairs with
//! [`SnapshotWatcher`](crate::watcher::SnapshotWatcher) for change
//! signaling.

use pagecraft_model::PageDocument;
use std::collections::HashMap;
use std::io;
use std::path::PathBuf;
use std::sync::{Arc, Mutex};
use thiserror::Error;

/// Well-known key under which the latest preview document lives.
pub const DOCUMENT_SNAPSHOT_KEY: &str = "pagecraft-preview-document";

/// Failure at the durable medium.
#[derive(Debug, Error)]
pub enum MediumError {
    #[error("storage quota exceeded")]
    QuotaExceeded,

    #[error("storage failure: {0}")]
    Io(#[from] io::Error),
}

#[derive(Debug, Error)]
pub enum SnapshotError {
    /// The durable medium rejected the write.
    #[error("storage quota exceeded")]
    QuotaExceeded,

    /// The document could not be encoded, or a stored snapshot could not
    /// be decoded.
    #[error("snapshot serialization failed: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("storage failure: {0}")]
    Storage(#[from] io::Error),
}

impl From<MediumError> for SnapshotError {
    fn from(e: MediumError) -> Self {
        match e {
            MediumError::QuotaExceeded => SnapshotError::QuotaExceeded,
            MediumError::Io(io) => SnapshotError::Storage(io),
        }
    }
}

/// A durable key/value medium. Writes replace the prior value in full.
pub trait SnapshotMedium: Send + Sync {
    fn put(&self, key: &str, value: &str) -> Result<(), MediumError>;
    fn get(&self, key: &str) -> Result<Option<String>, MediumError>;
}

/// A medium that can tell this context when *another* context wrote a key.
/// The signal names the key but never carries the payload; consumers re-read.
pub trait SignalingMedium: SnapshotMedium {
    fn on_change(&self, callback: Box<dyn Fn(&str) + Send + Sync>);
}

/// Serializes documents in and out of a [`SnapshotMedium`].
pub struct SnapshotStore<M: SnapshotMedium> {
    medium: M,
}

impl<M: SnapshotMedium> SnapshotStore<M> {
    pub fn new(medium: M) -> Self {
        Self { medium }
    }

    /// Persist the full document under `key`, replacing any prior value.
    pub fn write(&self, key: &str, document: &PageDocument) -> Result<(), SnapshotError> {
        let encoded = serde_json::to_string(document)?;
        self.medium.put(key, &encoded)?;
        tracing::debug!(key, bytes = encoded.len(), "snapshot written");
        Ok(())
    }

    /// The last successfully written document, or `Ok(None)` before any
    /// write has occurred. "Not found" is an expected state, never an error.
    pub fn read(&self, key: &str) -> Result<Option<PageDocument>, SnapshotError> {
        match self.medium.get(key)? {
            Some(text) => Ok(Some(serde_json::from_str(&text)?)),
            None => Ok(None),
        }
    }

    pub fn medium(&self) -> &M {
        &self.medium
    }
}

type ChangeListener = (u64, Arc<dyn Fn(&str) + Send + Sync>);

struct MemoryShared {
    entries: Mutex<HashMap<String, String>>,
    listeners: Mutex<Vec<ChangeListener>>,
    next_context: Mutex<u64>,
    quota_bytes: Option<usize>,
}

/// Shared in-memory medium. Each handle represents one execution context;
/// [`attach`](MemoryMedium::attach) opens the same underlying store from
/// another simulated context. As with platform storage events, the writing
/// context is not notified of its own writes.
#[derive(Clone)]
pub struct MemoryMedium {
    shared: Arc<MemoryShared>,
    context: u64,
}

impl MemoryMedium {
    pub fn new() -> Self {
        Self::with_capacity(None)
    }

    /// A medium that rejects writes once total stored bytes would exceed
    /// `quota_bytes`.
    pub fn with_quota(quota_bytes: usize) -> Self {
        Self::with_capacity(Some(quota_bytes))
    }

    fn with_capacity(quota_bytes: Option<usize>) -> Self {
        Self {
            shared: Arc::new(MemoryShared {
                entries: Mutex::new(HashMap::new()),
                listeners: Mutex::new(Vec::new()),
                next_context: Mutex::new(1),
                quota_bytes,
            }),
            context: 0,
        }
    }

    /// Open the same store from a new simulated execution context.
    pub fn attach(&self) -> MemoryMedium {
        let mut next = self.shared.next_context.lock().expect("medium lock");
        let context = *next;
        *next += 1;
        MemoryMedium {
            shared: Arc::clone(&self.shared),
            context,
        }
    }
}

impl Default for MemoryMedium {
    fn default() -> Self {
        Self::new()
    }
}

impl SnapshotMedium for MemoryMedium {
    fn put(&self, key: &str, value: &str) -> Result<(), MediumError> {
        {
            let mut entries = self.shared.entries.lock().expect("medium lock");
            if let Some(quota) = self.shared.quota_bytes {
                let after: usize = entries
                    .iter()
                    .filter(|(k, _)| k.as_str() != key)
                    .map(|(k, v)| k.len() + v.len())
                    .sum::<usize>()
                    + key.len()
                    + value.len();
                if after > quota {
                    return Err(MediumError::QuotaExceeded);
                }
            }
            entries.insert(key.to_string(), value.to_string());
        }

        // Notify every *other* context after the write is visible. The
        // listener list is snapshotted so callbacks may touch the medium.
        let listeners: Vec<ChangeListener> = {
            let listeners = self.shared.listeners.lock().expect("medium lock");
            listeners
                .iter()
                .map(|(ctx, cb)| (*ctx, Arc::clone(cb)))
                .collect()
        };
        for (context, listener) in listeners {
            if context != self.context {
                listener(key);
            }
        }
        Ok(())
    }

    fn get(&self, key: &str) -> Result<Option<String>, MediumError> {
        let entries = self.shared.entries.lock().expect("medium lock");
        Ok(entries.get(key).cloned())
    }
}

impl SignalingMedium for MemoryMedium {
    fn on_change(&self, callback: Box<dyn Fn(&str) + Send + Sync>) {
        let mut listeners = self.shared.listeners.lock().expect("medium lock");
        listeners.push((self.context, Arc::from(callback)));
    }
}

/// File-backed medium: one `<key>.json` file per key under a root
/// directory. Pairs with [`SnapshotWatcher`](crate::watcher::SnapshotWatcher)
/// for cross-process change signaling.
#[derive(Clone)]
pub struct FileMedium {
    root: PathBuf,
}

impl FileMedium {
    pub fn new(root: impl Into<PathBuf>) -> Result<Self, MediumError> {
        let root = root.into();
        std::fs::create_dir_all(&root)?;
        Ok(Self { root })
    }

    pub fn path_for(&self, key: &str) -> PathBuf {
        self.root.join(format!("{}.json", key))
    }
}

impl SnapshotMedium for FileMedium {
    fn put(&self, key: &str, value: &str) -> Result<(), MediumError> {
        std::fs::write(self.path_for(key), value)?;
        Ok(())
    }

    fn get(&self, key: &str) -> Result<Option<String>, MediumError> {
        match std::fs::read_to_string(self.path_for(key)) {
            Ok(text) => Ok(Some(text)),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(MediumError::Io(e)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pagecraft_model::PageElement;
    use serde_json::json;

    fn sample_document() -> PageDocument {
        PageDocument::new(vec![PageElement::section("s1").with_child(
            PageElement::column("c1")
                .with_child(PageElement::widget("w1", "text").with_content(json!("hi"))),
        )])
    }

    #[test]
    fn test_read_before_any_write_is_absent() {
        let store = SnapshotStore::new(MemoryMedium::new());
        assert!(store.read(DOCUMENT_SNAPSHOT_KEY).unwrap().is_none());
    }

    #[test]
    fn test_cross_context_write_then_read() {
        let editor = MemoryMedium::new();
        let preview = editor.attach();

        let doc = sample_document();
        SnapshotStore::new(editor)
            .write(DOCUMENT_SNAPSHOT_KEY, &doc)
            .unwrap();

        let read_back = SnapshotStore::new(preview)
            .read(DOCUMENT_SNAPSHOT_KEY)
            .unwrap()
            .expect("snapshot present");
        assert_eq!(doc, read_back);
    }

    #[test]
    fn test_write_replaces_fully() {
        let store = SnapshotStore::new(MemoryMedium::new());
        store.write("k", &sample_document()).unwrap();

        let replacement = PageDocument::new(vec![PageElement::section("only")]);
        store.write("k", &replacement).unwrap();

        let read = store.read("k").unwrap().unwrap();
        assert_eq!(read, replacement);
        assert!(read.find_by_id("s1").is_none());
    }

    #[test]
    fn test_quota_exceeded_is_reported() {
        let store = SnapshotStore::new(MemoryMedium::with_quota(16));
        let result = store.write("k", &sample_document());
        assert!(matches!(result, Err(SnapshotError::QuotaExceeded)));
        // nothing was stored
        assert!(store.read("k").unwrap().is_none());
    }

    #[test]
    fn test_writer_context_not_signaled_but_others_are() {
        use std::sync::atomic::{AtomicUsize, Ordering};

        let editor = MemoryMedium::new();
        let preview = editor.attach();

        let editor_signals = Arc::new(AtomicUsize::new(0));
        let preview_signals = Arc::new(AtomicUsize::new(0));

        let counter = Arc::clone(&editor_signals);
        editor.on_change(Box::new(move |_| {
            counter.fetch_add(1, Ordering::SeqCst);
        }));
        let counter = Arc::clone(&preview_signals);
        preview.on_change(Box::new(move |_| {
            counter.fetch_add(1, Ordering::SeqCst);
        }));

        SnapshotStore::new(editor)
            .write(DOCUMENT_SNAPSHOT_KEY, &sample_document())
            .unwrap();

        assert_eq!(editor_signals.load(Ordering::SeqCst), 0);
        assert_eq!(preview_signals.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_file_medium_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let medium = FileMedium::new(dir.path()).unwrap();
        let store = SnapshotStore::new(medium);

        assert!(store.read("doc").unwrap().is_none());

        let doc = sample_document();
        store.write("doc", &doc).unwrap();
        assert_eq!(store.read("doc").unwrap().unwrap(), doc);
    }

    #[test]
    fn test_corrupt_snapshot_is_serialization_error() {
        let medium = MemoryMedium::new();
        medium.put("k", "{not a document").unwrap();
        let store = SnapshotStore::new(medium);
        assert!(matches!(
            store.read("k"),
            Err(SnapshotError::Serialization(_))
        ));
    }
}

//! Snapshot change watcher
//!
//! Cross-process change signal for the file-backed medium. The watcher
//! reports *which key* changed, never the payload: a consumer that receives
//! a change re-reads the full snapshot. Signals can be missed (a consumer
//! started after the write sees nothing), which is why consumers always
//! perform an initial read independent of the watcher.

use notify::{Config, Event, EventKind, RecommendedWatcher, RecursiveMode, Watcher as NotifyWatcher};
use std::path::{Path, PathBuf};
use std::sync::mpsc::{channel, Receiver};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum WatcherError {
    #[error("failed to create watcher: {0}")]
    Create(#[from] notify::Error),
}

pub struct SnapshotWatcher {
    _watcher: RecommendedWatcher,
    receiver: Receiver<notify::Result<Event>>,
}

impl SnapshotWatcher {
    /// Watch a snapshot directory (one `<key>.json` file per key).
    pub fn new(root: PathBuf) -> Result<Self, WatcherError> {
        let (tx, rx) = channel();

        let mut watcher = RecommendedWatcher::new(
            move |res| {
                let _ = tx.send(res);
            },
            Config::default(),
        )?;

        watcher.watch(&root, RecursiveMode::NonRecursive)?;
        tracing::debug!(?root, "snapshot watcher started");

        Ok(Self {
            _watcher: watcher,
            receiver: rx,
        })
    }

    /// Block until some key changes; returns the key name. `None` once the
    /// watch channel is closed.
    pub fn next_change(&self) -> Option<String> {
        loop {
            match self.receiver.recv() {
                Ok(Ok(event)) => {
                    if let Some(key) = changed_key(&event) {
                        return Some(key);
                    }
                }
                Ok(Err(error)) => {
                    tracing::warn!(%error, "watch error, ignoring event");
                }
                Err(_) => return None,
            }
        }
    }

    /// Non-blocking variant of [`next_change`](SnapshotWatcher::next_change).
    pub fn try_next_change(&self) -> Option<String> {
        while let Ok(result) = self.receiver.try_recv() {
            if let Ok(event) = result {
                if let Some(key) = changed_key(&event) {
                    return Some(key);
                }
            }
        }
        None
    }
}

/// Extract the snapshot key from a create/modify event on a `.json` file.
fn changed_key(event: &Event) -> Option<String> {
    if !matches!(event.kind, EventKind::Create(_) | EventKind::Modify(_)) {
        return None;
    }
    event.paths.iter().find_map(|path| key_of(path))
}

fn key_of(path: &Path) -> Option<String> {
    if path.extension().and_then(|e| e.to_str()) != Some("json") {
        return None;
    }
    path.file_stem()
        .and_then(|s| s.to_str())
        .map(|s| s.to_string())
}

//! Preview channel
//!
//! One update, two transports. [`PreviewPublisher`] sits in the editor
//! context: after a confirmed mutation it writes the full document snapshot
//! to the durable medium, then publishes the update on its broadcast hub so
//! same-context subscribers re-render immediately. The medium's change
//! signal reaches other contexts; [`attach_consumer`] wires a consumer that
//! re-reads the snapshot on each signal, starting with one unconditional
//! read so a missed signal can only delay state, never lose it.

use pagecraft_model::{PageDocument, RealtimeUpdate, UpdateAction, UpdateSubject};
use std::sync::Arc;

use crate::hub::BroadcastHub;
use crate::snapshot::{SignalingMedium, SnapshotError, SnapshotMedium, SnapshotStore};

/// Editor-side half of the preview channel.
pub struct PreviewPublisher<M: SnapshotMedium> {
    hub: Arc<BroadcastHub>,
    store: SnapshotStore<M>,
    key: String,
}

impl<M: SnapshotMedium> PreviewPublisher<M> {
    pub fn new(hub: Arc<BroadcastHub>, medium: M, key: impl Into<String>) -> Self {
        Self {
            hub,
            store: SnapshotStore::new(medium),
            key: key.into(),
        }
    }

    /// Persist the document and broadcast the update. The snapshot write
    /// happens first: if it fails, nothing is broadcast and the error
    /// surfaces to the caller.
    pub fn publish_document(
        &self,
        document: &PageDocument,
        action: UpdateAction,
    ) -> Result<(), SnapshotError> {
        self.store.write(&self.key, document)?;

        let payload = serde_json::to_value(document)?;
        self.hub
            .publish(&RealtimeUpdate::now(UpdateSubject::Page, action, payload));
        Ok(())
    }

    pub fn hub(&self) -> &BroadcastHub {
        &self.hub
    }
}

/// Consumer-side half, for mediums that push change signals. Performs the
/// initial read immediately (delivering the current document if one
/// exists), then re-reads the full snapshot whenever the medium signals a
/// change to `key`.
pub fn attach_consumer<M>(
    medium: &M,
    key: &str,
    on_document: impl Fn(PageDocument) + Send + Sync + 'static,
) -> Result<(), SnapshotError>
where
    M: SignalingMedium + Clone + 'static,
{
    let store = SnapshotStore::new(medium.clone());

    // Initial read, independent of any signal.
    if let Some(document) = store.read(key)? {
        on_document(document);
    }

    let key = key.to_string();
    medium.on_change(Box::new(move |changed| {
        if changed != key {
            return;
        }
        match store.read(&key) {
            Ok(Some(document)) => on_document(document),
            Ok(None) => {}
            Err(error) => {
                tracing::warn!(key = %key, %error, "snapshot re-read failed");
            }
        }
    }));
    Ok(())
}

//! # Pagecraft Sync
//!
//! Keeps an editor context and one or more preview contexts consistent
//! without shared memory.
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────┐
//! │ editor context                                   │
//! │   mutate tree → validate → PreviewPublisher      │
//! │        │                        │                │
//! │        │            write snapshot (durable)     │
//! │        └── BroadcastHub.publish ──► subscribers  │
//! └──────────────────────│───────────────────────────┘
//!                 change signal (no payload)
//! ┌──────────────────────▼───────────────────────────┐
//! │ preview context                                  │
//! │   initial read + re-read on signal → re-render   │
//! └──────────────────────────────────────────────────┘
//! ```
//!
//! Two transports carry the same update: direct hub subscription inside one
//! context, and a durable snapshot plus a payload-free change signal across
//! contexts. Signals can be missed, so consumers always perform an initial
//! read; correctness never depends on signal delivery. Across contexts the
//! snapshot is last-writer-wins in full, with no merge and no blocking
//! reads.

pub mod hub;
pub mod preview;
pub mod snapshot;
pub mod watcher;

pub use hub::{BroadcastHub, SubscriberError, Subscription, HISTORY_CAPACITY};
pub use preview::{attach_consumer, PreviewPublisher};
pub use snapshot::{
    FileMedium, MediumError, MemoryMedium, SignalingMedium, SnapshotError, SnapshotMedium,
    SnapshotStore, DOCUMENT_SNAPSHOT_KEY,
};
pub use watcher::{SnapshotWatcher, WatcherError};

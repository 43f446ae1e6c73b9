use crate::archive::CompletedItem;
use crate::constants::ImageKind;
use crate::engine::{self, CompressionOptions};
use crate::error::{CompressionError, Result};
use std::collections::BTreeMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, MutexGuard};

/// Opaque identifier assigned at ingestion, stable for the item's lifetime.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ItemId(pub(crate) u64);

impl ItemId {
    pub fn value(&self) -> u64 {
        self.0
    }
}

impl std::fmt::Display for ItemId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Per-item state machine. Transitions only move forward:
/// `Queued → Compressing → {Done | Failed}`. A terminal item re-enters the
/// machine only through an explicit re-run, which starts a fresh attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ItemState {
    Queued,
    Compressing,
    Done {
        output: Vec<u8>,
        compressed_size: u64,
    },
    Failed {
        reason: String,
    },
}

#[derive(Debug)]
struct Item {
    file_name: String,
    kind: ImageKind,
    source: Arc<Vec<u8>>,
    state: ItemState,
    progress: u8,
}

/// Read-only view of one item, without the owned byte buffers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ItemStatus {
    Queued,
    Compressing,
    Done { compressed_size: u64 },
    Failed { reason: String },
}

#[derive(Debug, Clone)]
pub struct ItemSnapshot {
    pub id: ItemId,
    pub file_name: String,
    pub kind: ImageKind,
    pub original_size: u64,
    pub status: ItemStatus,
    pub progress: u8,
}

/// Owns the item collection and drives each item through the engine.
///
/// All item updates go through the id-keyed store under one lock, so progress
/// writes and terminal-state writes never interleave inconsistently and
/// concurrent readers never observe a half-written item. Compression itself
/// runs on a dedicated single-thread pool: items are processed strictly one
/// at a time, bounding peak memory to one image's working set plus the
/// queued raw inputs.
pub struct Batch {
    items: Mutex<BTreeMap<ItemId, Item>>,
    next_id: AtomicU64,
    worker: rayon::ThreadPool,
}

impl Batch {
    pub fn new() -> Self {
        let worker = rayon::ThreadPoolBuilder::new()
            .num_threads(1)
            .build()
            .expect("Failed to build compression worker pool");

        Self {
            items: Mutex::new(BTreeMap::new()),
            next_id: AtomicU64::new(1),
            worker,
        }
    }

    fn lock(&self) -> MutexGuard<'_, BTreeMap<ItemId, Item>> {
        self.items.lock().expect("item store lock poisoned")
    }

    /// Adds one unit of work. Files whose declared media type is outside the
    /// accepted set (`image/jpeg`, `image/jpg`, `image/png`) are silently
    /// filtered: no item is created and no error surfaces to the batch.
    pub fn enqueue(&self, file_name: &str, media_type: &str, source: Vec<u8>) -> Option<ItemId> {
        let kind = ImageKind::from_media_type(media_type)?;
        let id = ItemId(self.next_id.fetch_add(1, Ordering::Relaxed));
        self.lock().insert(
            id,
            Item {
                file_name: file_name.to_string(),
                kind,
                source: Arc::new(source),
                state: ItemState::Queued,
                progress: 0,
            },
        );
        Some(id)
    }

    /// Runs one item through the engine and records its terminal state.
    ///
    /// A queued or terminal item starts a (fresh) attempt with progress reset
    /// and any prior output or failure reason discarded. An item already
    /// compressing is left alone. If the item is removed while its
    /// compression is in flight, the result is dropped on arrival.
    pub fn run_one(&self, id: ItemId, options: &CompressionOptions) -> Result<()> {
        let source = {
            let mut items = self.lock();
            let item = items
                .get_mut(&id)
                .ok_or(CompressionError::ItemNotFound(id.value()))?;
            if item.state == ItemState::Compressing {
                return Ok(());
            }
            item.state = ItemState::Compressing;
            item.progress = 0;
            Arc::clone(&item.source)
        };

        let outcome = self
            .worker
            .install(|| engine::compress(&source, options, |percent| self.report_progress(id, percent)));

        let mut items = self.lock();
        if let Some(item) = items.get_mut(&id) {
            item.state = match outcome {
                Ok(result) => {
                    let compressed_size = result.size();
                    ItemState::Done {
                        output: result.bytes,
                        compressed_size,
                    }
                }
                Err(e) => ItemState::Failed {
                    reason: e.to_string(),
                },
            };
            item.progress = 100;
        }
        Ok(())
    }

    /// Processes every queued item sequentially. Best-effort: one item's
    /// failure is recorded on that item and never halts the rest, and an item
    /// removed mid-batch is skipped.
    pub fn run_all(&self, options: &CompressionOptions) {
        for id in self.queued_ids() {
            let _ = self.run_one(id, options);
        }
    }

    pub fn queued_ids(&self) -> Vec<ItemId> {
        self.lock()
            .iter()
            .filter(|(_, item)| item.state == ItemState::Queued)
            .map(|(id, _)| *id)
            .collect()
    }

    /// Deletes the item regardless of state. An in-flight compression is not
    /// cancelled; its result is discarded when it arrives.
    pub fn remove(&self, id: ItemId) -> bool {
        self.lock().remove(&id).is_some()
    }

    pub fn clear(&self) {
        self.lock().clear();
    }

    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    pub fn progress_of(&self, id: ItemId) -> Option<u8> {
        self.lock().get(&id).map(|item| item.progress)
    }

    /// Consistent view of every item in id (ingestion) order.
    pub fn snapshot(&self) -> Vec<ItemSnapshot> {
        self.lock()
            .iter()
            .map(|(id, item)| ItemSnapshot {
                id: *id,
                file_name: item.file_name.clone(),
                kind: item.kind,
                original_size: item.source.len() as u64,
                status: match &item.state {
                    ItemState::Queued => ItemStatus::Queued,
                    ItemState::Compressing => ItemStatus::Compressing,
                    ItemState::Done {
                        compressed_size, ..
                    } => ItemStatus::Done {
                        compressed_size: *compressed_size,
                    },
                    ItemState::Failed { reason } => ItemStatus::Failed {
                        reason: reason.clone(),
                    },
                },
                progress: item.progress,
            })
            .collect()
    }

    /// Output bytes of every `Done` item in id order, for packaging.
    pub fn completed(&self) -> Vec<CompletedItem> {
        self.lock()
            .iter()
            .filter_map(|(_, item)| match &item.state {
                ItemState::Done { output, .. } => Some(CompletedItem {
                    file_name: item.file_name.clone(),
                    bytes: output.clone(),
                }),
                _ => None,
            })
            .collect()
    }

    fn report_progress(&self, id: ItemId, percent: u8) {
        let mut items = self.lock();
        if let Some(item) = items.get_mut(&id) {
            // Monotonic, and only meaningful while compressing. Writes for a
            // removed item fall through silently.
            if item.state == ItemState::Compressing && percent > item.progress {
                item.progress = percent;
            }
        }
    }
}

impl Default for Batch {
    fn default() -> Self {
        Self::new()
    }
}

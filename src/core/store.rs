use std::sync::Arc;
use tokio::sync::{broadcast, RwLock};
use tracing::debug;
use super::types::{TransferEvent, TransferSnapshot, UploadId, UploadTask};

/// Store shared between UI handlers of one session.
pub type SharedTransferStore = Arc<RwLock<TransferStore>>;

/// Upload queue plus transfer-dialog visibility.
///
/// Tasks keep insertion order and are unique by `id`. Dialog visibility is
/// independent of the queue contents.
pub struct TransferStore {
    uploads: Vec<UploadTask>,
    dialog_visible: bool,
    event_tx: broadcast::Sender<TransferEvent>,
}

impl Default for TransferStore {
    fn default() -> Self {
        Self::new()
    }
}

impl TransferStore {
    pub fn new() -> Self {
        // keep at most 64 pending events
        let (event_tx, _) = broadcast::channel(64);

        Self {
            uploads: Vec::new(),
            dialog_visible: false,
            event_tx,
        }
    }

    pub fn shared() -> SharedTransferStore {
        Arc::new(RwLock::new(Self::new()))
    }

    /// Replace the whole queue. The caller guarantees unique ids.
    pub fn set_uploads(&mut self, uploads: Vec<UploadTask>) {
        debug!(count = uploads.len(), "set uploads");
        self.uploads = uploads;
        self.emit_queue_changed();
    }

    /// Replace the task with the same id in place, or append it.
    pub fn upsert_upload(&mut self, upload: UploadTask) {
        match self.position(&upload.id) {
            Some(index) => {
                self.uploads[index] = upload;
            }
            None => {
                debug!(upload_id = %upload.id, "append upload");
                self.uploads.push(upload);
            }
        }
        self.emit_queue_changed();
    }

    /// Remove the task with the same id. Absent ids are ignored.
    pub fn remove_upload(&mut self, upload: &UploadTask) -> bool {
        let Some(index) = self.position(&upload.id) else {
            return false;
        };
        debug!(upload_id = %upload.id, "remove upload");
        self.uploads.remove(index);
        self.emit_queue_changed();
        true
    }

    pub fn find_upload(&self, id: &UploadId) -> Option<&UploadTask> {
        self.uploads.iter().find(|item| item.id == *id)
    }

    /// Drop every Completed, Failed or Cancelled task.
    pub fn clear_finished(&mut self) -> usize {
        let before = self.uploads.len();
        self.uploads.retain(|item| !item.state.is_finished());
        let removed = before - self.uploads.len();
        if removed > 0 {
            self.emit_queue_changed();
        }
        removed
    }

    pub fn show_dialog(&mut self) {
        self.set_dialog_visible(true);
    }

    pub fn hide_dialog(&mut self) {
        self.set_dialog_visible(false);
    }

    pub fn uploads(&self) -> &[UploadTask] {
        &self.uploads
    }

    pub fn len(&self) -> usize {
        self.uploads.len()
    }

    pub fn is_empty(&self) -> bool {
        self.uploads.is_empty()
    }

    /// Tasks not yet in a terminal state.
    pub fn active_count(&self) -> usize {
        self.uploads.iter().filter(|item| !item.state.is_finished()).count()
    }

    pub fn is_dialog_visible(&self) -> bool {
        self.dialog_visible
    }

    pub fn snapshot(&self) -> TransferSnapshot {
        TransferSnapshot {
            tasks: self.uploads.clone(),
            dialog_visible: self.dialog_visible,
        }
    }

    /// Subscribe to change events.
    ///
    /// A receiver that falls behind gets `Lagged` and should re-read the store.
    pub fn subscribe(&self) -> broadcast::Receiver<TransferEvent> {
        self.event_tx.subscribe()
    }

    fn position(&self, id: &UploadId) -> Option<usize> {
        self.uploads.iter().position(|item| item.id == *id)
    }

    fn set_dialog_visible(&mut self, visible: bool) {
        self.dialog_visible = visible;
        let _ = self.event_tx.send(TransferEvent::DialogVisibility(visible));
    }

    fn emit_queue_changed(&self) {
        let _ = self.event_tx.send(TransferEvent::QueueChanged {
            len: self.uploads.len(),
        });
    }
}

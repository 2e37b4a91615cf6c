use std::fmt;
use std::str::FromStr;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use url::Url;
use uuid::Uuid;
use super::errors::TransferError;

/// Unique id of an upload task
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize, Serialize)]
pub struct UploadId(pub Uuid);

impl UploadId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for UploadId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for UploadId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Upload lifecycle state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
pub enum UploadState {
    /// Waiting in the queue
    Queued,
    /// Bytes are being sent
    Uploading,
    /// Paused by the user
    Paused,
    /// Done
    Completed,
    /// Failed
    Failed,
    /// Cancelled by the user
    Cancelled,
}

impl UploadState {
    pub fn is_finished(&self) -> bool {
        matches!(self, UploadState::Completed | UploadState::Failed | UploadState::Cancelled)
    }
}

/// One upload as the UI sees it. Only `id` matters to the store,
/// everything else is carried as-is.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UploadTask {
    pub id: UploadId,
    pub name: String,
    pub state: UploadState,
    pub bytes_uploaded: u64,
    pub total_bytes: u64,
    pub error: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl UploadTask {
    pub fn new(id: UploadId, name: impl Into<String>, total_bytes: u64) -> Self {
        Self {
            id,
            name: name.into(),
            state: UploadState::Queued,
            bytes_uploaded: 0,
            total_bytes,
            error: None,
            created_at: Utc::now(),
        }
    }

    pub fn with_state(mut self, state: UploadState) -> Self {
        self.state = state;
        self
    }

    pub fn with_progress(mut self, bytes_uploaded: u64) -> Self {
        self.bytes_uploaded = bytes_uploaded;
        self
    }

    pub fn percentage(&self) -> f64 {
        if self.total_bytes == 0 {
            return 0.0;
        }
        self.bytes_uploaded as f64 / self.total_bytes as f64 * 100.0
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum StorageType {
    File,
    Folder,
    Link,
}

impl StorageType {
    pub fn as_str(&self) -> &'static str {
        match self {
            StorageType::File => "FILE",
            StorageType::Folder => "FOLDER",
            StorageType::Link => "LINK",
        }
    }

    pub fn is_file(&self) -> bool {
        *self == StorageType::File
    }
}

impl fmt::Display for StorageType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for StorageType {
    type Err = TransferError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        [StorageType::File, StorageType::Folder, StorageType::Link]
            .into_iter()
            .find(|t| t.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| TransferError::ParamError(format!("Unknown storage type: {}", s)))
    }
}

/// Kind of owner a storage belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum OwnerType {
    User,
    /// Group or shared space of a user
    Space,
    Organization,
    Group,
}

impl OwnerType {
    pub fn as_str(&self) -> &'static str {
        match self {
            OwnerType::User => "USER",
            OwnerType::Space => "SPACE",
            OwnerType::Organization => "ORGANIZATION",
            OwnerType::Group => "GROUP",
        }
    }
}

impl fmt::Display for OwnerType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for OwnerType {
    type Err = TransferError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        [OwnerType::User, OwnerType::Space, OwnerType::Organization, OwnerType::Group]
            .into_iter()
            .find(|t| t.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| TransferError::ParamError(format!("Unknown owner type: {}", s)))
    }
}

/// A downloadable or manageable entry on the disk.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StorageObjectRef {
    pub storage_id: u64,
    pub storage_type: StorageType,
    pub owner_type: OwnerType,
    pub owner_id: u64,
}

impl StorageObjectRef {
    pub fn new(storage_id: u64, storage_type: StorageType, owner_type: OwnerType, owner_id: u64) -> Self {
        Self {
            storage_id,
            storage_type,
            owner_type,
            owner_id,
        }
    }

    pub fn file(storage_id: u64, owner_type: OwnerType, owner_id: u64) -> Self {
        Self::new(storage_id, StorageType::File, owner_type, owner_id)
    }
}

/// Result of a successful download handshake.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DownloadTicket {
    pub token: String,
    pub retrieval_url: Url,
}

/// Copy of the transfer queue state
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TransferSnapshot {
    pub tasks: Vec<UploadTask>,
    pub dialog_visible: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TransferEvent {
    /// Queue contents changed
    QueueChanged {
        len: usize,
    },

    /// Transfer dialog shown or hidden
    DialogVisibility(bool),
}

/// Headline plus detail, rendered by the notification layer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ErrorReport {
    pub headline: String,
    pub detail: String,
}

impl ErrorReport {
    pub fn new(headline: impl Into<String>, error: &TransferError) -> Self {
        Self {
            headline: headline.into(),
            detail: error.detail(),
        }
    }
}

// compile-time check that these types are Send + Sync
const _: () = {
    fn assert_send<T: Send + Sync>() {}
    #[allow(dead_code)]
    fn assert_types() {
        assert_send::<UploadTask>();
        assert_send::<TransferEvent>();
        assert_send::<StorageObjectRef>();
    }
};

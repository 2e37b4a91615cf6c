mod errors;
mod store;
mod traits;
mod types;

pub use errors::{Result, TransferError};
pub use store::{SharedTransferStore, TransferStore};
pub use traits::{Navigator, Notifier, StorageApi, TracingNotifier};
pub use types::{
    DownloadTicket,
    ErrorReport,
    OwnerType,
    StorageObjectRef,
    StorageType,
    TransferEvent,
    TransferSnapshot,
    UploadId,
    UploadState,
    UploadTask,
};

pub mod actions;
pub mod api;
pub mod config;
pub mod core;
pub mod session;

// core types
pub use self::core::{
    DownloadTicket,
    ErrorReport,
    Navigator,
    Notifier,
    OwnerType,
    SharedTransferStore,
    StorageApi,
    StorageObjectRef,
    StorageType,
    TracingNotifier,
    TransferError,
    TransferEvent,
    TransferSnapshot,
    TransferStore,
    UploadId,
    UploadState,
    UploadTask,
    Result,
};

pub use actions::{bind_file_actions, handle_storage_download, request_download};
pub use api::{Credentials, DiskClient};
pub use config::Config;
pub use session::Session;

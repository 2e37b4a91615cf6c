mod download;
mod options;

pub use download::{handle_storage_download, request_download, DOWNLOAD_FAILED};
pub use options::{
    bind_file_actions,
    ActionDescriptor,
    ActionLabel,
    RouteTarget,
    DRIVE_FILE_ATTRS_PAGE,
    DRIVE_FILE_PERMISSION_PAGE,
    LOG_ACTION,
    PERMISSION_ACTION,
};

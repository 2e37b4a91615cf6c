use async_trait::async_trait;
use url::Url;
use super::types::{ErrorReport, OwnerType};
use super::errors::Result;

/// Remote storage API as seen by the action coordinator.
#[async_trait]
pub trait StorageApi: Send + Sync {
    /// Ask the server for a short-lived token scoped to one file.
    async fn issue_file_token(&self, owner_type: OwnerType, owner_id: u64, storage_id: u64) -> Result<String>;

    /// Build the retrieval URL for a token. Pure, no I/O.
    fn retrieval_url(&self, token: &str) -> Result<Url>;
}

/// User-visible notifications (toasts).
pub trait Notifier: Send + Sync {
    fn report_error(&self, report: ErrorReport);
}

/// Browsing-context navigation.
pub trait Navigator: Send + Sync {
    /// Replace the current page with `url`.
    fn open_in_current_context(&self, url: &Url);
}

/// Notifier that writes reports to the log.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingNotifier;

impl Notifier for TracingNotifier {
    fn report_error(&self, report: ErrorReport) {
        tracing::error!(headline = %report.headline, detail = %report.detail, "user notification");
    }
}

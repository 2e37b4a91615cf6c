use tracing::{debug, warn};
use url::Url;
use crate::core::{
    DownloadTicket,
    ErrorReport,
    Navigator,
    Notifier,
    Result,
    StorageApi,
    StorageObjectRef,
};

pub const DOWNLOAD_FAILED: &str = "Download failed";

/// Exchange a file token for a retrieval URL.
///
/// Returns `Ok(None)` without touching the network when the storage is not
/// a file.
pub async fn request_download<A>(api: &A, storage: &StorageObjectRef) -> Result<Option<DownloadTicket>>
where
    A: StorageApi + ?Sized,
{
    if !storage.storage_type.is_file() {
        debug!(storage_id = storage.storage_id, storage_type = %storage.storage_type, "not downloadable, skipped");
        return Ok(None);
    }

    let token = api
        .issue_file_token(storage.owner_type, storage.owner_id, storage.storage_id)
        .await?;
    let retrieval_url = api.retrieval_url(&token)?;
    debug!(storage_id = storage.storage_id, %retrieval_url, "download ticket issued");

    Ok(Some(DownloadTicket { token, retrieval_url }))
}

/// UI entry point of the download handshake.
///
/// On success the URL goes to `on_ready` if given, otherwise the current
/// page is replaced with it. Failures are reported once through `notifier`
/// and never returned.
pub async fn handle_storage_download<A, F>(
    api: &A,
    notifier: &dyn Notifier,
    navigator: &dyn Navigator,
    storage: &StorageObjectRef,
    on_ready: Option<F>,
) where
    A: StorageApi + ?Sized,
    F: FnOnce(Url),
{
    match request_download(api, storage).await {
        Ok(Some(ticket)) => match on_ready {
            Some(callback) => callback(ticket.retrieval_url),
            None => navigator.open_in_current_context(&ticket.retrieval_url),
        },
        Ok(None) => {}
        Err(err) => {
            warn!(storage_id = storage.storage_id, error = %err, "download failed");
            notifier.report_error(ErrorReport::new(DOWNLOAD_FAILED, &err));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;
    use std::sync::atomic::{AtomicU32, Ordering};
    use async_trait::async_trait;
    use crate::core::{OwnerType, StorageType, TransferError};

    /// Mock API for tests
    struct MockApi {
        fail: bool,
        calls: AtomicU32,
    }

    impl MockApi {
        fn new(fail: bool) -> Self {
            Self { fail, calls: AtomicU32::new(0) }
        }
    }

    #[async_trait]
    impl StorageApi for MockApi {
        async fn issue_file_token(&self, _owner_type: OwnerType, _owner_id: u64, storage_id: u64) -> Result<String> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            if self.fail {
                return Err(TransferError::server_error(500, "disk unavailable"));
            }
            Ok(format!("token-{}", storage_id))
        }

        fn retrieval_url(&self, token: &str) -> Result<Url> {
            Ok(Url::parse(&format!("https://example.com/quickfire/{}", token))?)
        }
    }

    #[derive(Default)]
    struct Recorder {
        reports: Mutex<Vec<ErrorReport>>,
        opened: Mutex<Vec<Url>>,
    }

    impl Notifier for Recorder {
        fn report_error(&self, report: ErrorReport) {
            self.reports.lock().unwrap().push(report);
        }
    }

    impl Navigator for Recorder {
        fn open_in_current_context(&self, url: &Url) {
            self.opened.lock().unwrap().push(url.clone());
        }
    }

    #[tokio::test]
    async fn test_request_download_returns_ticket() {
        let api = MockApi::new(false);
        let storage = StorageObjectRef::file(9, OwnerType::User, 1);

        let ticket = request_download(&api, &storage).await.unwrap().unwrap();

        assert_eq!(ticket.token, "token-9");
        assert_eq!(ticket.retrieval_url.as_str(), "https://example.com/quickfire/token-9");
    }

    #[tokio::test]
    async fn test_non_file_skips_network() {
        let api = MockApi::new(false);
        let recorder = Recorder::default();

        for storage_type in [StorageType::Folder, StorageType::Link] {
            let storage = StorageObjectRef::new(3, storage_type, OwnerType::Group, 2);
            assert!(request_download(&api, &storage).await.unwrap().is_none());
            handle_storage_download(&api, &recorder, &recorder, &storage, None::<fn(Url)>).await;
        }

        assert_eq!(api.calls.load(Ordering::SeqCst), 0);
        assert!(recorder.reports.lock().unwrap().is_empty());
        assert!(recorder.opened.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_navigates_without_callback() {
        let api = MockApi::new(false);
        let recorder = Recorder::default();
        let storage = StorageObjectRef::file(9, OwnerType::User, 1);

        handle_storage_download(&api, &recorder, &recorder, &storage, None::<fn(Url)>).await;

        let opened = recorder.opened.lock().unwrap();
        assert_eq!(opened.len(), 1);
        assert_eq!(opened[0], api.retrieval_url("token-9").unwrap());
    }

    #[tokio::test]
    async fn test_callback_replaces_navigation() {
        let api = MockApi::new(false);
        let recorder = Recorder::default();
        let storage = StorageObjectRef::file(9, OwnerType::User, 1);
        let mut received = None;

        handle_storage_download(&api, &recorder, &recorder, &storage, Some(|url: Url| received = Some(url))).await;

        assert_eq!(received, Some(api.retrieval_url("token-9").unwrap()));
        assert!(recorder.opened.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_failure_reports_once() {
        let api = MockApi::new(true);
        let recorder = Recorder::default();
        let storage = StorageObjectRef::file(9, OwnerType::User, 1);
        let mut called = false;

        handle_storage_download(&api, &recorder, &recorder, &storage, Some(|_: Url| called = true)).await;

        assert!(!called);
        assert!(recorder.opened.lock().unwrap().is_empty());
        let reports = recorder.reports.lock().unwrap();
        assert_eq!(reports.len(), 1);
        assert_eq!(reports[0].headline, DOWNLOAD_FAILED);
        assert_eq!(reports[0].detail, "disk unavailable");
    }
}

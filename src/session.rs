use std::sync::Arc;
use tracing::info;
use crate::api::{Credentials, DiskClient};
use crate::config::Config;
use crate::core::{ErrorReport, Notifier, Result, SharedTransferStore, TransferError, TransferStore};

pub use crate::api::LOGIN_EXPIRED;

/// Everything that lives for one signed-in session: the API client, the
/// credential it sends and the transfer queue.
pub struct Session {
    client: DiskClient,
    store: SharedTransferStore,
    notifier: Arc<dyn Notifier>,
}

impl Session {
    pub fn start(config: &Config, notifier: Arc<dyn Notifier>) -> Result<Self> {
        let credentials = Credentials::new(config.token.clone());
        let client = DiskClient::from_config(config, credentials)?
            .with_expiry_notifier(notifier.clone());
        info!(endpoint = %client.endpoint(), "session started");

        Ok(Self {
            client,
            store: TransferStore::shared(),
            notifier,
        })
    }

    pub fn client(&self) -> &DiskClient {
        &self.client
    }

    pub fn store(&self) -> SharedTransferStore {
        self.store.clone()
    }

    pub fn notifier(&self) -> &dyn Notifier {
        self.notifier.as_ref()
    }

    pub async fn is_authenticated(&self) -> bool {
        self.client.credentials().is_authenticated().await
    }

    /// Drop the credential. Later requests go out unauthenticated.
    pub async fn logout(&self) {
        self.client.credentials().clear().await;
        info!("logged out");
    }

    /// React to an error seen by the UI layer. Returns true for an expired
    /// login. The session client already logs out on a 401, so this only
    /// reports and clears when the credential is still present, e.g. for
    /// errors coming from a client built outside the session.
    pub async fn handle_error(&self, err: &TransferError) -> bool {
        if !err.is_session_expired() {
            return false;
        }

        if self.client.credentials().clear().await {
            self.notifier.report_error(ErrorReport::new(LOGIN_EXPIRED, err));
            info!("logged out");
        }
        true
    }

    /// Tear the session down: empty the queue, hide the dialog, forget the
    /// credential.
    pub async fn end(self) {
        {
            let mut store = self.store.write().await;
            store.set_uploads(Vec::new());
            store.hide_dialog();
        }
        self.client.credentials().clear().await;
        info!("session ended");
    }
}

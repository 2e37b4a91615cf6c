use std::fmt;
use std::sync::Arc;
use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION};
use reqwest::{Client, StatusCode};
use tokio::sync::RwLock;
use tracing::{debug, warn};
use url::Url;
use crate::config::Config;
use crate::core::{ErrorReport, Notifier, OwnerType, Result, StorageApi, TransferError};
use super::types::ApiResponse;

pub const LOGIN_EXPIRED: &str = "Login expired";

/// Session credential shared by every client of one session.
#[derive(Debug, Clone, Default)]
pub struct Credentials {
    token: Arc<RwLock<Option<String>>>,
}

impl Credentials {
    pub fn new(token: Option<String>) -> Self {
        Self {
            token: Arc::new(RwLock::new(token)),
        }
    }

    pub async fn token(&self) -> Option<String> {
        self.token.read().await.clone()
    }

    pub async fn set_token(&self, token: impl Into<String>) {
        *self.token.write().await = Some(token.into());
    }

    /// Forget the token. Returns false when there was none.
    pub async fn clear(&self) -> bool {
        self.token.write().await.take().is_some()
    }

    pub async fn is_authenticated(&self) -> bool {
        self.token.read().await.is_some()
    }
}

/// HTTP client for the disk API.
///
/// A 401 from any request clears the shared credential and, when an expiry
/// notifier is set, reports "Login expired" once per dropped credential.
#[derive(Clone)]
pub struct DiskClient {
    client: Client,
    endpoint: Url,
    credentials: Credentials,
    expiry_notifier: Option<Arc<dyn Notifier>>,
}

impl fmt::Debug for DiskClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DiskClient")
            .field("endpoint", &self.endpoint)
            .field("credentials", &self.credentials)
            .finish_non_exhaustive()
    }
}

impl DiskClient {
    pub fn new(endpoint: &str, credentials: Credentials) -> Result<Self> {
        Ok(Self {
            client: Client::new(),
            endpoint: Url::parse(endpoint)?,
            credentials,
            expiry_notifier: None,
        })
    }

    pub fn from_config(config: &Config, credentials: Credentials) -> Result<Self> {
        let mut builder = Client::builder().timeout(config.timeout());
        if let Some(user_agent) = &config.user_agent {
            builder = builder.user_agent(user_agent.as_str());
        }

        Ok(Self {
            client: builder.build()?,
            endpoint: Url::parse(&config.endpoint)?,
            credentials,
            expiry_notifier: None,
        })
    }

    pub fn with_expiry_notifier(mut self, notifier: Arc<dyn Notifier>) -> Self {
        self.expiry_notifier = Some(notifier);
        self
    }

    pub fn credentials(&self) -> &Credentials {
        &self.credentials
    }

    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }

    async fn create_headers(&self) -> Result<HeaderMap> {
        let mut headers = HeaderMap::new();
        if let Some(token) = self.credentials.token().await {
            headers.insert(AUTHORIZATION, HeaderValue::from_str(&token)?);
        }

        Ok(headers)
    }

    /// `{endpoint}/api/v1/{segments..}`, each segment percent-encoded.
    fn api_url(&self, segments: &[&str]) -> Result<Url> {
        let mut url = self.endpoint.clone();
        url.path_segments_mut()
            .map_err(|_| TransferError::ParamError(format!("Invalid endpoint: {}", self.endpoint)))?
            .pop_if_empty()
            .extend(["api", "v1"])
            .extend(segments);

        Ok(url)
    }

    async fn post_for<T>(&self, url: Url) -> Result<T>
    where
        T: for<'de> serde::Deserialize<'de>,
    {
        let headers = self.create_headers().await?;
        let response = self.client.post(url).headers(headers).send().await?;

        let status = response.status();
        let body = response.text().await?;

        if status == StatusCode::UNAUTHORIZED {
            warn!("request rejected, login expired");
            self.expire_login().await;
            return Err(TransferError::SessionExpired);
        }

        if !status.is_success() {
            // error responses may still carry the standard envelope
            let message = serde_json::from_str::<ApiResponse<serde_json::Value>>(&body)
                .map(|envelope| envelope.tip.filter(|tip| !tip.is_empty()).unwrap_or(envelope.message))
                .unwrap_or(body);
            return Err(TransferError::server_error(status.as_u16(), message));
        }

        let envelope: ApiResponse<T> = serde_json::from_str(&body)
            .map_err(|err| TransferError::malformed(err.to_string()))?;

        envelope.into_data()
    }

    async fn expire_login(&self) {
        if !self.credentials.clear().await {
            return;
        }
        if let Some(notifier) = &self.expiry_notifier {
            notifier.report_error(ErrorReport::new(LOGIN_EXPIRED, &TransferError::SessionExpired));
        }
    }
}

#[async_trait]
impl StorageApi for DiskClient {
    async fn issue_file_token(&self, owner_type: OwnerType, owner_id: u64, storage_id: u64) -> Result<String> {
        let owner_type = owner_type.as_str().to_lowercase();
        let owner_id = owner_id.to_string();
        let storage_id = storage_id.to_string();
        let url = self.api_url(&[&owner_type, &owner_id, "disk", "file", &storage_id, "token"])?;

        debug!(%url, "issue file token");
        let token: String = self.post_for(url).await?;
        if token.is_empty() {
            return Err(TransferError::malformed("Empty file token"));
        }

        Ok(token)
    }

    fn retrieval_url(&self, token: &str) -> Result<Url> {
        self.api_url(&["storages", "quickfire", token])
    }
}

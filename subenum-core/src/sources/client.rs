use std::sync::Arc;
use std::time::Duration;

use reqwest::{Client, StatusCode};
use tokio::sync::Semaphore;
use tracing::debug;

use crate::error::{Result, SubenumError};

pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);
pub const DEFAULT_MAX_CONNECTIONS: usize = 20;
pub const DEFAULT_USER_AGENT: &str = "Mozilla/5.0 (compatible; SubEnum/1.0)";

/// Status and body of a completed provider request.
#[derive(Debug, Clone)]
pub struct FetchedResponse {
    pub status: StatusCode,
    pub body: String,
}

/// HTTP client shared by every source during one enumeration.
///
/// Cloning is cheap: the connection pool and the permit semaphore are shared,
/// so the connection ceiling holds across all clones.
#[derive(Debug, Clone)]
pub struct SourceClient {
    http: Client,
    permits: Arc<Semaphore>,
    timeout: Duration,
}

impl SourceClient {
    pub fn new(timeout: Duration, max_connections: usize, user_agent: &str) -> Result<Self> {
        let max_connections = max_connections.max(1);

        let http = Client::builder()
            .timeout(timeout)
            .pool_max_idle_per_host(max_connections)
            .user_agent(user_agent)
            .build()?;

        Ok(Self {
            http,
            permits: Arc::new(Semaphore::new(max_connections)),
            timeout,
        })
    }

    pub fn with_defaults() -> Result<Self> {
        Self::new(DEFAULT_TIMEOUT, DEFAULT_MAX_CONNECTIONS, DEFAULT_USER_AGENT)
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Issue a single GET and read the whole body.
    ///
    /// Any transport fault (connect, DNS, TLS, timeout, body read) comes back as
    /// `SubenumError::HttpError`. Non-success statuses are not errors here; the
    /// caller decides what counts as success for its provider.
    pub async fn get(&self, url: &str) -> Result<FetchedResponse> {
        let _permit = self
            .permits
            .acquire()
            .await
            .map_err(|_| SubenumError::Cancelled)?;

        debug!(url = %url, "Querying source");

        let response = self.http.get(url).send().await?;
        let status = response.status();
        let body = response.text().await?;

        Ok(FetchedResponse { status, body })
    }

    /// Fetch a body, requiring HTTP 200.
    pub async fn get_ok(&self, url: &str, source_name: &str) -> Result<String> {
        let response = self.get(url).await?;

        if response.status != StatusCode::OK {
            return Err(SubenumError::ProviderStatus {
                source_name: source_name.to_string(),
                status: response.status.as_u16(),
            });
        }

        Ok(response.body)
    }
}

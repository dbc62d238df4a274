//! Service Clients
//!
//! Each client implements its domain's contract trait by making the call
//! over HTTP, so the gateway and the order service hold an
//! `Arc<dyn CatalogApi>` and never see the transport.
//!
//! Errors map back onto `ServiceError`:
//!
//! - an error body from the peer becomes the variant it names
//! - a connection failure or an elapsed deadline becomes `Unavailable`
//! - a response that does not decode becomes `Decode`
//!
//! Nothing here retries. Dropping the returned future abandons the call.

mod account;
mod catalog;
mod order;

use std::time::Duration;

use reqwest::Client;
use serde::{de::DeserializeOwned, Serialize};
use tracing::debug;

use core_kernel::{ServiceError, ServiceResult};

use crate::error::ErrorResponse;

pub use account::AccountClient;
pub use catalog::CatalogClient;
pub use order::OrderClient;

/// Where a peer service lives and how long to wait for it
#[derive(Debug, Clone)]
pub struct ClientConfig {
    pub base_url: String,
    pub timeout: Duration,
}

impl ClientConfig {
    /// Accepts `host:port` as well as a full URL
    pub fn new(address: impl Into<String>) -> Self {
        Self {
            base_url: normalize_base_url(&address.into()),
            timeout: Duration::from_secs(10),
        }
    }

    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

fn normalize_base_url(address: &str) -> String {
    let address = address.trim().trim_end_matches('/');
    if address.starts_with("http://") || address.starts_with("https://") {
        address.to_string()
    } else {
        format!("http://{address}")
    }
}

/// Unary JSON call plumbing shared by the typed clients
#[derive(Debug, Clone)]
pub(crate) struct RpcClient {
    http: Client,
    base_url: String,
    service: &'static str,
}

impl RpcClient {
    pub(crate) fn new(service: &'static str, config: &ClientConfig) -> Result<Self, reqwest::Error> {
        let http = Client::builder().timeout(config.timeout).build()?;
        Ok(Self {
            http,
            base_url: config.base_url.clone(),
            service,
        })
    }

    pub(crate) async fn call<Req, Resp>(&self, path: &str, body: &Req) -> ServiceResult<Resp>
    where
        Req: Serialize + ?Sized,
        Resp: DeserializeOwned,
    {
        let url = format!("{}{}", self.base_url, path);
        debug!(service = self.service, %url, "calling");

        let response = self
            .http
            .post(&url)
            .json(body)
            .send()
            .await
            .map_err(|e| ServiceError::unavailable(self.service, e))?;

        let status = response.status();
        if status.is_success() {
            return response
                .json::<Resp>()
                .await
                .map_err(|e| self.read_failure(e));
        }

        let text = response.text().await.map_err(|e| self.read_failure(e))?;
        Err(match serde_json::from_str::<ErrorResponse>(&text) {
            Ok(body) => body.into_service_error(self.service),
            Err(_) if status == reqwest::StatusCode::SERVICE_UNAVAILABLE => {
                ServiceError::unavailable(self.service, text)
            }
            Err(_) => ServiceError::query(format!("{} answered {}: {}", self.service, status, text)),
        })
    }

    fn read_failure(&self, err: reqwest::Error) -> ServiceError {
        if err.is_timeout() {
            ServiceError::unavailable(self.service, err)
        } else {
            ServiceError::decode(err)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bare_address_gets_scheme() {
        assert_eq!(ClientConfig::new("localhost:8081").base_url, "http://localhost:8081");
    }

    #[test]
    fn test_full_url_kept_without_trailing_slash() {
        assert_eq!(
            ClientConfig::new("https://catalog.internal/").base_url,
            "https://catalog.internal"
        );
    }
}

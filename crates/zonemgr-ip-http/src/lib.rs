// # HTTP Public IP Resolver
//
// `PublicIpResolver` implementation over external IP echo services.
//
// ## Behavior
//
// One resolution attempt queries the primary endpoint with a short
// timeout; any network-level failure (timeout, connection error,
// non-2xx, unparseable body) falls through to the fallback endpoint
// once. Both failing is the terminal failure path for IP resolution —
// callers must not retry through further resolvers.

use async_trait::async_trait;
use std::net::IpAddr;
use std::time::Duration;
use tracing::{debug, warn};

use zonemgr_core::error::{Error, Result};
use zonemgr_core::traits::PublicIpResolver;

/// Default primary IP echo endpoint (returns a plain-text address)
pub const DEFAULT_PRIMARY_URL: &str = "https://api.ipify.org";

/// Default fallback IP echo endpoint
pub const DEFAULT_FALLBACK_URL: &str = "https://ifconfig.me/ip";

/// Per-request timeout for echo endpoints
const ECHO_TIMEOUT: Duration = Duration::from_secs(5);

/// Public IP resolver over two HTTP echo endpoints
pub struct HttpIpResolver {
    primary_url: String,
    fallback_url: String,
    client: reqwest::Client,
}

impl HttpIpResolver {
    /// Create a resolver against the default echo services
    pub fn new() -> Self {
        Self::with_endpoints(DEFAULT_PRIMARY_URL, DEFAULT_FALLBACK_URL)
    }

    /// Create a resolver against specific endpoints (tests, self-hosted)
    pub fn with_endpoints(primary: impl Into<String>, fallback: impl Into<String>) -> Self {
        Self {
            primary_url: primary.into(),
            fallback_url: fallback.into(),
            client: reqwest::Client::builder()
                .timeout(ECHO_TIMEOUT)
                .build()
                .unwrap_or_default(),
        }
    }

    async fn fetch_from(&self, url: &str) -> Result<IpAddr> {
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| Error::network(format!("request to {} failed: {}", url, e)))?;

        if !response.status().is_success() {
            return Err(Error::network(format!(
                "{} returned HTTP {}",
                url,
                response.status()
            )));
        }

        let body = response
            .text()
            .await
            .map_err(|e| Error::network(format!("failed to read response from {}: {}", url, e)))?;

        body.trim()
            .parse()
            .map_err(|_| Error::network(format!("{} returned an invalid address: {}", url, body.trim())))
    }
}

impl Default for HttpIpResolver {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl PublicIpResolver for HttpIpResolver {
    async fn resolve(&self) -> Result<IpAddr> {
        let primary_err = match self.fetch_from(&self.primary_url).await {
            Ok(ip) => {
                debug!(ip = %ip, source = %self.primary_url, "resolved public IP");
                return Ok(ip);
            }
            Err(e) => {
                warn!(source = %self.primary_url, error = %e, "primary IP source failed, trying fallback");
                e
            }
        };

        match self.fetch_from(&self.fallback_url).await {
            Ok(ip) => {
                debug!(ip = %ip, source = %self.fallback_url, "resolved public IP via fallback");
                Ok(ip)
            }
            Err(fallback_err) => Err(Error::ip_resolution(format!(
                "primary: {}; fallback: {}",
                primary_err, fallback_err
            ))),
        }
    }
}

// # Public IP Resolver Trait
//
// Defines the interface for discovering the caller's current public IP.
//
// ## Implementation
//
// - HTTP echo endpoints with fallback: `zonemgr-ip-http` crate
//
// Resolvers are single-shot: one resolution attempt per call, with the
// fallback chain (if any) internal to the implementation. Callers that
// want freshness bounds layer `IpCache` on top; callers must treat a
// resolver failure as terminal for the current operation and not retry
// through other resolvers.

use async_trait::async_trait;
use std::net::IpAddr;

use crate::error::Error;

/// Trait for public IP resolution
#[async_trait]
pub trait PublicIpResolver: Send + Sync {
    /// Resolve the caller's current public IP address
    ///
    /// # Returns
    ///
    /// - `Ok(IpAddr)`: The resolved address
    /// - `Err(Error::IpResolution)`: All sources failed; terminal for
    ///   the calling operation
    async fn resolve(&self) -> Result<IpAddr, Error>;
}

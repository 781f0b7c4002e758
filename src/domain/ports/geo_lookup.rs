//! GeoIP Lookup Port
//!
//! Defines the interface for resolving IP addresses to country codes.

use std::net::IpAddr;
use thiserror::Error;

/// Failure reported by a GeoIP lookup provider.
#[derive(Debug, Error)]
pub enum LookupError {
    /// The database holds no record covering this address.
    #[error("address not found in GeoIP database: {0}")]
    AddressNotFound(IpAddr),

    /// The database could not be read or decoded.
    #[error("GeoIP database error: {0}")]
    Database(String),
}

/// Read-only IP to country lookup.
///
/// This is an outbound port that abstracts the GeoIP database.
/// Implementations are opened once at startup and shared across
/// requests, so lookups take `&self` and must be safe to call
/// concurrently.
pub trait GeoLookup: Send + Sync {
    /// Resolve an address to its ISO 3166-1 alpha-2 country code.
    ///
    /// Returns an empty string when the address is known but carries no
    /// country-level data.
    fn country_code(&self, ip: IpAddr) -> Result<String, LookupError>;
}

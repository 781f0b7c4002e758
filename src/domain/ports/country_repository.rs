//! Country Repository Port
//!
//! Defines the interface the application layer uses to resolve raw
//! IP strings to country codes.

use crate::domain::errors::AppError;
use async_trait::async_trait;

/// Repository translating raw IP strings into country codes.
///
/// Implementations validate the IP string, consult the GeoIP provider and
/// classify every failure as an [`AppError`]; callers never see the
/// provider's native error type.
#[async_trait]
pub trait CountryRepository: Send + Sync {
    /// Resolve the country for a raw IP literal.
    ///
    /// Fails with `Validation` when `ip_address` is not a valid IPv4/IPv6
    /// literal and with `Internal` when the provider lookup fails.
    async fn resolve_country(&self, ip_address: &str) -> Result<String, AppError>;

    /// Liveness check against the provider.
    async fn health_check(&self) -> Result<(), AppError>;
}

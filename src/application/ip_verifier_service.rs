//! IP Verifier Service - Main application use case
//!
//! Checks an IP address against a caller-supplied country allow-list.
//! This is the primary interface for the inbound adapter.

use crate::domain::entities::VerifyResult;
use crate::domain::errors::AppError;
use crate::domain::ports::CountryRepository;
use std::sync::Arc;

/// IP verifier service.
///
/// Validates the allow-list, resolves the country through the repository
/// and reports whether that country is allowed.
pub struct IpVerifierService {
    repo: Arc<dyn CountryRepository>,
}

impl IpVerifierService {
    pub fn new(repo: Arc<dyn CountryRepository>) -> Self {
        Self { repo }
    }

    /// Verify whether `ip` geolocates to one of `allowed_countries`.
    ///
    /// The allow-list is checked before any lookup, so an empty list fails
    /// with `Validation` whatever the IP. Repository errors propagate
    /// unchanged. The returned result echoes `ip` byte-for-byte.
    pub async fn verify_ip(
        &self,
        ip: &str,
        allowed_countries: &[String],
    ) -> Result<VerifyResult, AppError> {
        if allowed_countries.is_empty() {
            return Err(AppError::validation("allowed_countries cannot be empty"));
        }

        let country = self.repo.resolve_country(ip).await?;

        Ok(VerifyResult::evaluate(ip, country, allowed_countries))
    }

    pub async fn health_check(&self) -> Result<(), AppError> {
        self.repo.health_check().await
    }
}

//! GeoIP Country Repository
//!
//! Implements CountryRepository on top of a GeoLookup provider.

use crate::domain::errors::AppError;
use crate::domain::ports::{CountryRepository, GeoLookup};
use crate::domain::value_objects::ParsedAddress;
use async_trait::async_trait;
use std::net::{IpAddr, Ipv4Addr};
use std::sync::Arc;

/// Well-known public address used by the health check.
pub const HEALTH_CHECK_SENTINEL: IpAddr = IpAddr::V4(Ipv4Addr::new(8, 8, 8, 8));

/// Country repository backed by a GeoIP lookup provider.
///
/// The provider is optional so that a process whose database failed to
/// open can still report itself as unhealthy instead of refusing to start.
pub struct GeoIpCountryRepository {
    lookup: Option<Arc<dyn GeoLookup>>,
}

impl GeoIpCountryRepository {
    pub fn new(lookup: Arc<dyn GeoLookup>) -> Self {
        Self {
            lookup: Some(lookup),
        }
    }

    /// Repository without a provider; every lookup fails as `Internal`.
    pub fn uninitialized() -> Self {
        Self { lookup: None }
    }

    fn provider(&self) -> Result<&Arc<dyn GeoLookup>, AppError> {
        self.lookup
            .as_ref()
            .ok_or_else(|| AppError::internal("GeoIP database not initialized"))
    }
}

#[async_trait]
impl CountryRepository for GeoIpCountryRepository {
    async fn resolve_country(&self, ip_address: &str) -> Result<String, AppError> {
        let addr = ParsedAddress::parse(ip_address)?;

        let country = self.provider()?.country_code(addr.ip()).map_err(|e| {
            AppError::internal_with_source("failed to resolve country for IP address", e)
        })?;

        tracing::debug!("resolved {} -> {:?}", addr, country);
        Ok(country)
    }

    async fn health_check(&self) -> Result<(), AppError> {
        self.provider()?
            .country_code(HEALTH_CHECK_SENTINEL)
            .map(|_| ())
            .map_err(|e| AppError::internal_with_source("GeoIP health check failed", e))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ports::LookupError;
    use std::collections::HashMap;
    use std::error::Error as _;
    use std::sync::Mutex;

    // ===== Mock Implementations =====

    struct MockGeoLookup {
        countries: HashMap<IpAddr, String>,
        broken: bool,
        calls: Mutex<Vec<IpAddr>>,
    }

    impl MockGeoLookup {
        fn new() -> Self {
            Self {
                countries: HashMap::new(),
                broken: false,
                calls: Mutex::new(Vec::new()),
            }
        }

        fn with_country(mut self, ip: &str, country: &str) -> Self {
            self.countries
                .insert(ip.parse().unwrap(), country.to_string());
            self
        }

        fn broken(mut self) -> Self {
            self.broken = true;
            self
        }
    }

    impl GeoLookup for MockGeoLookup {
        fn country_code(&self, ip: IpAddr) -> Result<String, LookupError> {
            self.calls.lock().unwrap().push(ip);
            if self.broken {
                return Err(LookupError::Database("corrupt search tree".to_string()));
            }
            self.countries
                .get(&ip)
                .cloned()
                .ok_or(LookupError::AddressNotFound(ip))
        }
    }

    fn repo_with(lookup: MockGeoLookup) -> (GeoIpCountryRepository, Arc<MockGeoLookup>) {
        let lookup = Arc::new(lookup);
        (GeoIpCountryRepository::new(lookup.clone()), lookup)
    }

    // ===== resolve_country =====

    #[tokio::test]
    async fn test_resolve_country_ipv4() {
        let (repo, _) = repo_with(MockGeoLookup::new().with_country("8.8.8.8", "US"));
        assert_eq!(repo.resolve_country("8.8.8.8").await.unwrap(), "US");
    }

    #[tokio::test]
    async fn test_resolve_country_ipv6() {
        let (repo, _) =
            repo_with(MockGeoLookup::new().with_country("2001:4860:4860::8888", "US"));
        assert_eq!(
            repo.resolve_country("2001:4860:4860::8888").await.unwrap(),
            "US"
        );
    }

    #[tokio::test]
    async fn test_resolve_country_invalid_ip_skips_provider() {
        let (repo, lookup) = repo_with(MockGeoLookup::new());

        for raw in ["invalid-ip", "192.168.1", "", "not-an-ip"] {
            let err = repo.resolve_country(raw).await.unwrap_err();
            assert!(err.is_validation());
            assert!(err.message().contains("invalid IP address"));
            assert!(err.source().is_none());
        }

        assert!(lookup.calls.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_resolve_country_not_found_is_internal_with_cause() {
        let (repo, _) = repo_with(MockGeoLookup::new());

        let err = repo.resolve_country("10.0.0.1").await.unwrap_err();
        assert!(err.is_internal());
        let cause = err.source().expect("cause should be wrapped");
        assert!(cause.to_string().contains("10.0.0.1"));
        assert!(!err.message().contains("10.0.0.1"));
    }

    #[tokio::test]
    async fn test_resolve_country_database_error_is_internal() {
        let (repo, _) = repo_with(MockGeoLookup::new().broken());

        let err = repo.resolve_country("8.8.8.8").await.unwrap_err();
        assert!(err.is_internal());
        assert!(err.detail().contains("corrupt search tree"));
    }

    #[tokio::test]
    async fn test_resolve_country_passes_empty_country_through() {
        let (repo, _) = repo_with(MockGeoLookup::new().with_country("1.2.3.4", ""));
        assert_eq!(repo.resolve_country("1.2.3.4").await.unwrap(), "");
    }

    #[tokio::test]
    async fn test_resolve_country_uninitialized() {
        let repo = GeoIpCountryRepository::uninitialized();

        let err = repo.resolve_country("8.8.8.8").await.unwrap_err();
        assert!(err.is_internal());

        // Validation still wins over a missing provider.
        let err = repo.resolve_country("bogus").await.unwrap_err();
        assert!(err.is_validation());
    }

    // ===== health_check =====

    #[tokio::test]
    async fn test_health_check_uses_sentinel() {
        let (repo, lookup) = repo_with(MockGeoLookup::new().with_country("8.8.8.8", "US"));

        repo.health_check().await.unwrap();
        assert_eq!(*lookup.calls.lock().unwrap(), vec![HEALTH_CHECK_SENTINEL]);
    }

    #[tokio::test]
    async fn test_health_check_lookup_failure() {
        let (repo, _) = repo_with(MockGeoLookup::new().broken());

        let err = repo.health_check().await.unwrap_err();
        assert!(err.is_internal());
        assert!(err.source().is_some());
    }

    #[tokio::test]
    async fn test_health_check_uninitialized() {
        let repo = GeoIpCountryRepository::uninitialized();

        let err = repo.health_check().await.unwrap_err();
        assert!(err.is_internal());
        assert_eq!(err.message(), "GeoIP database not initialized");
    }
}

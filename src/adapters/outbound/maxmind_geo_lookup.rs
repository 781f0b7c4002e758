//! MaxMind GeoIP Lookup
//!
//! Implements GeoLookup using a MaxMind GeoLite2/GeoIP2 Country database.

use crate::domain::ports::{GeoLookup, LookupError};
use maxminddb::{MaxMindDBError, Reader};
use serde::Deserialize;
use std::net::IpAddr;
use std::path::Path;
use std::sync::Arc;

/// MaxMind GeoIP lookup provider.
///
/// The database is read into memory once and never mutated afterwards,
/// so the reader is shared freely between concurrent requests.
pub struct MaxMindGeoLookup {
    reader: Arc<Reader<Vec<u8>>>,
}

impl MaxMindGeoLookup {
    /// Load a GeoIP database from a file path.
    pub fn from_file(path: impl AsRef<Path>) -> anyhow::Result<Self> {
        let reader = Reader::open_readfile(path)?;
        Ok(Self {
            reader: Arc::new(reader),
        })
    }

    /// Load a GeoIP database from an in-memory buffer.
    pub fn from_bytes(buf: Vec<u8>) -> anyhow::Result<Self> {
        let reader = Reader::from_source(buf)?;
        Ok(Self {
            reader: Arc::new(reader),
        })
    }

    /// Database type from the mmdb metadata (e.g. `GeoLite2-Country`).
    pub fn database_type(&self) -> &str {
        &self.reader.metadata.database_type
    }
}

impl GeoLookup for MaxMindGeoLookup {
    fn country_code(&self, ip: IpAddr) -> Result<String, LookupError> {
        #[derive(Debug, Deserialize)]
        struct Country {
            iso_code: Option<String>,
        }

        #[derive(Debug, Deserialize)]
        struct CountryResp {
            country: Option<Country>,
        }

        let resp: CountryResp = self
            .reader
            .lookup(ip)
            .map_err(|e| lookup_error(ip, e))?;

        Ok(resp
            .country
            .and_then(|c| c.iso_code)
            .unwrap_or_default())
    }
}

fn lookup_error(ip: IpAddr, err: MaxMindDBError) -> LookupError {
    match err {
        MaxMindDBError::AddressNotFoundError(_) => LookupError::AddressNotFound(ip),
        other => LookupError::Database(other.to_string()),
    }
}

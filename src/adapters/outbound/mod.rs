mod geoip_country_repo;
mod maxmind_geo_lookup;

pub use geoip_country_repo::{GeoIpCountryRepository, HEALTH_CHECK_SENTINEL};
pub use maxmind_geo_lookup::MaxMindGeoLookup;

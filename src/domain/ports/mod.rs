mod country_repository;
mod geo_lookup;

pub use country_repository::CountryRepository;
pub use geo_lookup::{GeoLookup, LookupError};

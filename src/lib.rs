//! ip-verifier Library
//!
//! This module exposes the ip-verifier components for use in integration
//! tests and as a library.

#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod infrastructure;

// Re-export commonly used types
pub use application::IpVerifierService;
pub use config::{load_config, Config};
pub use domain::entities::VerifyResult;
pub use domain::errors::{AppError, ErrorKind};
pub use domain::ports::{CountryRepository, GeoLookup, LookupError};
pub use domain::value_objects::ParsedAddress;

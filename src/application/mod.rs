//! Application Layer
//!
//! Use cases orchestrating the domain ports.

mod ip_verifier_service;

pub use ip_verifier_service::IpVerifierService;

//! Value Objects - Immutable domain primitives
//!
//! Value objects are identified by their value rather than identity.
//! They are immutable and can be freely shared.

use crate::domain::errors::AppError;
use std::fmt;
use std::net::IpAddr;

/// A syntactically valid IPv4 or IPv6 address.
///
/// Built from the caller's raw string within a single request. Only plain
/// dotted-decimal or colon-hex literals are accepted: no CIDR suffix, no
/// zone index, no surrounding whitespace.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ParsedAddress(IpAddr);

impl ParsedAddress {
    /// Parse a raw IP literal.
    ///
    /// # Examples
    /// ```
    /// use ip_verifier::domain::value_objects::ParsedAddress;
    ///
    /// assert!(ParsedAddress::parse("8.8.8.8").is_ok());
    /// assert!(ParsedAddress::parse("2001:4860:4860::8888").is_ok());
    /// assert!(ParsedAddress::parse("192.168.1").is_err());
    /// ```
    pub fn parse(raw: &str) -> Result<Self, AppError> {
        raw.parse::<IpAddr>()
            .map(Self)
            .map_err(|_| AppError::validation(format!("invalid IP address: {}", raw)))
    }

    pub fn ip(&self) -> IpAddr {
        self.0
    }
}

impl fmt::Display for ParsedAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

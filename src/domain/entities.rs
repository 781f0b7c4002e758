//! Domain Entities - Core business objects
//!
//! These entities have no external dependencies and contain only
//! business logic.

/// Outcome of checking one IP address against an allow-list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VerifyResult {
    /// The caller's IP string, exactly as received
    pub ip: String,
    /// ISO 3166-1 alpha-2 code reported by the GeoIP provider (may be empty)
    pub country: String,
    /// Whether `country` is an element of the allow-list
    pub allowed: bool,
}

impl VerifyResult {
    /// Build a result, computing `allowed` by exact, case-sensitive
    /// membership of `country` in `allowed_countries`.
    pub fn evaluate(ip: impl Into<String>, country: String, allowed_countries: &[String]) -> Self {
        let allowed = allowed_countries.iter().any(|c| *c == country);
        Self {
            ip: ip.into(),
            country,
            allowed,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn list(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_evaluate_member() {
        let result = VerifyResult::evaluate("8.8.8.8", "US".to_string(), &list(&["US", "CA"]));
        assert_eq!(result.ip, "8.8.8.8");
        assert_eq!(result.country, "US");
        assert!(result.allowed);
    }

    #[test]
    fn test_evaluate_non_member() {
        let result = VerifyResult::evaluate("8.8.8.8", "US".to_string(), &list(&["CN", "RU"]));
        assert!(!result.allowed);
    }

    #[test]
    fn test_evaluate_is_case_sensitive() {
        let result = VerifyResult::evaluate("8.8.8.8", "US".to_string(), &list(&["us"]));
        assert!(!result.allowed);
    }

    #[test]
    fn test_evaluate_no_trimming() {
        let result = VerifyResult::evaluate("8.8.8.8", "US".to_string(), &list(&[" US"]));
        assert!(!result.allowed);
    }

    #[test]
    fn test_evaluate_empty_country_matches_empty_entry() {
        let result = VerifyResult::evaluate("10.0.0.1", String::new(), &list(&["US", ""]));
        assert!(result.allowed);

        let result = VerifyResult::evaluate("10.0.0.1", String::new(), &list(&["US"]));
        assert!(!result.allowed);
    }

    #[test]
    fn test_evaluate_later_duplicate() {
        let result = VerifyResult::evaluate("1.2.3.4", "CN".to_string(), &list(&["US", "CA", "CN", "CN"]));
        assert!(result.allowed);
    }
}

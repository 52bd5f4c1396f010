//! Summary statistics over extracted credentials

use super::frequency::FrequencyTable;
use crate::models::CredentialTriples;

/// Label used in place of an empty password
pub const EMPTY_LABEL: &str = "(empty)";

/// Label used when there is no most-common value
pub const NOT_AVAILABLE: &str = "N/A";

/// Display form of a captured value; empty strings become `"(empty)"`
pub fn display_label(value: &str) -> &str {
    if value.is_empty() {
        EMPTY_LABEL
    } else {
        value
    }
}

/// Aggregates derived from one scan of the static variant
#[derive(Debug, Clone)]
pub struct Statistics {
    pub total_attempts: usize,
    pub usernames: FrequencyTable,
    pub passwords: FrequencyTable,
    pub ips: FrequencyTable,
}

impl Statistics {
    pub fn from_credentials(triples: &CredentialTriples) -> Self {
        Statistics {
            total_attempts: triples.login_attempts(),
            usernames: FrequencyTable::from_values(&triples.usernames),
            passwords: FrequencyTable::from_values(&triples.passwords),
            ips: FrequencyTable::from_values(&triples.ips),
        }
    }

    pub fn unique_usernames(&self) -> usize {
        self.usernames.len()
    }

    pub fn unique_passwords(&self) -> usize {
        self.passwords.len()
    }

    pub fn unique_ips(&self) -> usize {
        self.ips.len()
    }

    /// Most common password, `"N/A"` when none were captured
    pub fn most_common_password(&self) -> &str {
        self.passwords
            .most_common()
            .map(|e| e.value.as_str())
            .unwrap_or(NOT_AVAILABLE)
    }

    /// Most common username, `"N/A"` when none were captured
    pub fn most_common_username(&self) -> &str {
        self.usernames
            .most_common()
            .map(|e| e.value.as_str())
            .unwrap_or(NOT_AVAILABLE)
    }

    /// Distinct attacker addresses in first-seen order
    pub fn attacker_ips(&self) -> Vec<&str> {
        self.ips.first_seen().iter().map(String::as_str).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> CredentialTriples {
        let mut triples = CredentialTriples::new();
        triples.push_credentials("root", "123456");
        triples.push_credentials("admin", "");
        triples.push_credentials("root", "");
        triples.push_ip("203.0.113.7");
        triples.push_ip("198.51.100.2");
        triples.push_ip("203.0.113.7");
        triples
    }

    #[test]
    fn test_statistics() {
        let stats = Statistics::from_credentials(&sample());
        assert_eq!(stats.total_attempts, 3);
        assert_eq!(stats.unique_usernames(), 2);
        assert_eq!(stats.unique_passwords(), 2);
        assert_eq!(stats.unique_ips(), 2);
        assert_eq!(stats.most_common_username(), "root");
        assert_eq!(stats.most_common_password(), "");
        assert_eq!(display_label(stats.most_common_password()), "(empty)");
        assert_eq!(stats.attacker_ips(), vec!["203.0.113.7", "198.51.100.2"]);
    }

    #[test]
    fn test_empty_statistics() {
        let stats = Statistics::from_credentials(&CredentialTriples::new());
        assert_eq!(stats.total_attempts, 0);
        assert_eq!(stats.most_common_password(), "N/A");
        assert_eq!(stats.most_common_username(), "N/A");
        assert!(stats.attacker_ips().is_empty());
    }

    #[test]
    fn test_attacker_ips_keep_first_seen_order() {
        let mut triples = CredentialTriples::new();
        triples.push_ip("10.0.0.1");
        triples.push_ip("10.0.0.2");
        triples.push_ip("10.0.0.2");
        let stats = Statistics::from_credentials(&triples);

        assert_eq!(stats.attacker_ips(), vec!["10.0.0.1", "10.0.0.2"]);
        assert_eq!(stats.ips.most_common().unwrap().value, "10.0.0.2");
    }
}

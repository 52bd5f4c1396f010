use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Source address recorded for events whose line carries no IP.
pub const UNKNOWN_SOURCE: &str = "Unknown";

/// Number of leading characters treated as the line timestamp.
pub const TIMESTAMP_WIDTH: usize = 23;

const TIMESTAMP_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%.f";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EventKind {
    #[serde(rename = "Login Attempt")]
    LoginAttempt,
    #[serde(rename = "Command Execution")]
    CommandExecution,
    #[serde(rename = "New Connection")]
    NewConnection,
}

impl EventKind {
    pub fn label(&self) -> &'static str {
        match self {
            EventKind::LoginAttempt => "Login Attempt",
            EventKind::CommandExecution => "Command Execution",
            EventKind::NewConnection => "New Connection",
        }
    }
}

impl fmt::Display for EventKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// A single classified log line.
///
/// Only the fields belonging to `kind` are populated; the rest stay `None`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Event {
    pub timestamp: String,
    #[serde(rename = "type")]
    pub kind: EventKind,
    pub src_ip: String,
    pub user: Option<String>,
    pub password: Option<String>,
    pub status: Option<String>,
    pub command: Option<String>,
}

impl Event {
    pub fn login_attempt(timestamp: String, user: &str, password: &str, status: &str) -> Self {
        Event {
            timestamp,
            kind: EventKind::LoginAttempt,
            src_ip: UNKNOWN_SOURCE.to_string(),
            user: Some(user.to_string()),
            password: Some(password.to_string()),
            status: Some(status.to_string()),
            command: None,
        }
    }

    pub fn command_execution(timestamp: String, command: &str) -> Self {
        Event {
            timestamp,
            kind: EventKind::CommandExecution,
            src_ip: UNKNOWN_SOURCE.to_string(),
            user: None,
            password: None,
            status: None,
            command: Some(command.to_string()),
        }
    }

    pub fn new_connection(timestamp: String, src_ip: &str) -> Self {
        Event {
            timestamp,
            kind: EventKind::NewConnection,
            src_ip: src_ip.to_string(),
            user: None,
            password: None,
            status: None,
            command: None,
        }
    }

    /// Parse the timestamp prefix as a Cowrie ISO-8601 time.
    ///
    /// Returns `None` for logs that use another prefix format.
    pub fn observed_at(&self) -> Option<NaiveDateTime> {
        NaiveDateTime::parse_from_str(&self.timestamp, TIMESTAMP_FORMAT).ok()
    }
}

/// Take the first `TIMESTAMP_WIDTH` characters of a line.
pub fn timestamp_prefix(line: &str) -> String {
    line.chars().take(TIMESTAMP_WIDTH).collect()
}

/// Flat extraction used by the static analyzer.
///
/// `usernames` and `passwords` always have the same length; `ips` is filled
/// independently from connection lines.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct CredentialTriples {
    pub usernames: Vec<String>,
    pub passwords: Vec<String>,
    pub ips: Vec<String>,
}

impl CredentialTriples {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push_credentials(&mut self, user: &str, password: &str) {
        self.usernames.push(user.to_string());
        self.passwords.push(password.to_string());
    }

    pub fn push_ip(&mut self, ip: &str) {
        self.ips.push(ip.to_string());
    }

    pub fn login_attempts(&self) -> usize {
        self.usernames.len()
    }

    pub fn is_empty(&self) -> bool {
        self.usernames.is_empty() && self.ips.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_timestamp_prefix_is_char_based() {
        let line = "2024-01-15T10:23:45.123456Z [HoneyPotSSHTransport] ok";
        assert_eq!(timestamp_prefix(line), "2024-01-15T10:23:45.123");
        assert_eq!(timestamp_prefix("short"), "short");
        assert_eq!(timestamp_prefix("ééééééééééééééééééééééééé").chars().count(), 23);
    }

    #[test]
    fn test_observed_at() {
        let event = Event::command_execution("2024-01-15T10:23:45.123".to_string(), "id");
        let parsed = event.observed_at().unwrap();
        assert_eq!(parsed.format("%H:%M:%S").to_string(), "10:23:45");

        let event = Event::command_execution("Jan 15 10:23:45 host".to_string(), "id");
        assert!(event.observed_at().is_none());
    }

    #[test]
    fn test_event_serializes_with_labels() {
        let event = Event::new_connection("t".to_string(), "10.0.0.1");
        let json = serde_json::to_value(&event).unwrap();
        assert_eq!(json["type"], "New Connection");
        assert_eq!(json["src_ip"], "10.0.0.1");
        assert!(json["user"].is_null());
    }
}

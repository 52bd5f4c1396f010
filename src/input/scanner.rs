//! Line-oriented scanner for Cowrie text logs
//!
//! Each line is classified independently. Lines that match no pattern are
//! skipped; only a failure to open or read the file is reported.

use crate::models::event::timestamp_prefix;
use crate::models::{CredentialTriples, Event};
use regex::Regex;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::{Path, PathBuf};
use thiserror::Error;

const LOGIN_MARKER: &str = "login attempt";
const CONNECTION_MARKER: &str = "New connection";

/// Errors that can occur while scanning a log file
#[derive(Error, Debug)]
pub enum ScanError {
    #[error("Log file not found: {}", .0.display())]
    NotFound(PathBuf),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid pattern: {0}")]
    Pattern(#[from] regex::Error),
}

/// Compiled patterns for both extraction variants
pub struct LogScanner {
    // static variant
    credential_pair: Regex,
    connection_endpoint: Regex,
    // interactive variant, in priority order
    login: Regex,
    command: Regex,
    connection: Regex,
}

impl LogScanner {
    /// Compile all patterns
    pub fn new() -> Result<Self, ScanError> {
        let scanner = LogScanner {
            credential_pair: Regex::new(r"login attempt \[b'(.*?)'/b'(.*?)'\]")?,
            connection_endpoint: Regex::new(r"(\d+\.\d+\.\d+\.\d+):\d+")?,
            login: Regex::new(r"login attempt \[(.*)/(.*)\] (.*)")?,
            command: Regex::new(r"CMD: (.*)")?,
            connection: Regex::new(r"New connection: ([\d\.]+):")?,
        };
        log::debug!("Log scanner patterns compiled");
        Ok(scanner)
    }

    /// Extract usernames, passwords and connecting IPs from a log file
    pub fn scan_credentials<P: AsRef<Path>>(&self, path: P) -> Result<CredentialTriples, ScanError> {
        let mut triples = CredentialTriples::new();
        let lines = read_lines_lossy(path.as_ref(), |line| {
            self.extract_credentials(line, &mut triples);
        })?;

        log::debug!(
            "Scanned {} line(s): {} login attempt(s), {} connection(s)",
            lines,
            triples.login_attempts(),
            triples.ips.len()
        );
        Ok(triples)
    }

    /// Classify every line of a log file into events
    pub fn scan_events<P: AsRef<Path>>(&self, path: P) -> Result<Vec<Event>, ScanError> {
        let mut events = Vec::new();
        let lines = read_lines_lossy(path.as_ref(), |line| {
            if let Some(event) = self.classify_line(line) {
                events.push(event);
            }
        })?;

        log::debug!("Scanned {} line(s) into {} event(s)", lines, events.len());
        Ok(events)
    }

    /// Apply both static rules to one line.
    ///
    /// The login and connection rules are independent; a line may feed both.
    pub fn extract_credentials(&self, line: &str, triples: &mut CredentialTriples) {
        if line.contains(LOGIN_MARKER) {
            if let Some(cap) = self.credential_pair.captures(line) {
                triples.push_credentials(&cap[1], &cap[2]);
            }
        }

        if line.contains(CONNECTION_MARKER) {
            if let Some(cap) = self.connection_endpoint.captures(line) {
                triples.push_ip(&cap[1]);
            }
        }
    }

    /// Classify one line; first match wins in the order login, command, connection
    pub fn classify_line(&self, line: &str) -> Option<Event> {
        let timestamp = timestamp_prefix(line);

        if let Some(cap) = self.login.captures(line) {
            return Some(Event::login_attempt(timestamp, &cap[1], &cap[2], &cap[3]));
        }

        if let Some(cap) = self.command.captures(line) {
            return Some(Event::command_execution(timestamp, &cap[1]));
        }

        self.connection
            .captures(line)
            .map(|cap| Event::new_connection(timestamp, &cap[1]))
    }
}

/// Feed each line of `path` to `visit`, decoding invalid UTF-8 lossily.
///
/// Line terminators are stripped. Returns the number of lines read.
pub fn read_lines_lossy<F>(path: &Path, mut visit: F) -> Result<usize, ScanError>
where
    F: FnMut(&str),
{
    let file = File::open(path).map_err(|e| match e.kind() {
        std::io::ErrorKind::NotFound => ScanError::NotFound(path.to_path_buf()),
        _ => ScanError::Io(e),
    })?;
    let mut reader = BufReader::new(file);
    let mut buf = Vec::new();
    let mut count = 0usize;

    loop {
        buf.clear();
        let bytes_read = reader.read_until(b'\n', &mut buf)?;
        if bytes_read == 0 {
            break; // EOF
        }
        count += 1;

        let line = String::from_utf8_lossy(&buf);
        visit(line.trim_end_matches(['\n', '\r']));
    }

    Ok(count)
}

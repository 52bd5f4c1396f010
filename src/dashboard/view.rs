//! Aggregates shown on the dashboard page

use crate::analysis::{FrequencyEntry, FrequencyTable};
use crate::models::{Event, EventKind};
use chrono::NaiveDateTime;
use serde::Serialize;

/// One row of the command table
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CommandRow {
    pub timestamp: String,
    pub command: String,
}

/// First and last parseable timestamps in the log
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ObservedWindow {
    pub first: NaiveDateTime,
    pub last: NaiveDateTime,
}

/// Everything the dashboard displays, derived from the event collection
#[derive(Debug, Clone, Serialize)]
pub struct DashboardView {
    pub total_records: usize,
    pub total_connections: usize,
    pub unique_ips: usize,
    pub commands_executed: usize,
    pub login_attempts: usize,
    pub top_usernames: Vec<FrequencyEntry>,
    pub top_passwords: Vec<FrequencyEntry>,
    pub commands: Vec<CommandRow>,
    pub ip_frequency: Vec<FrequencyEntry>,
    pub observed: Option<ObservedWindow>,
}

impl DashboardView {
    pub fn from_events(events: &[Event], top: usize) -> Self {
        let of_kind = |kind: EventKind| events.iter().filter(move |e| e.kind == kind);

        let ip_frequency = FrequencyTable::from_values(
            of_kind(EventKind::NewConnection).map(|e| e.src_ip.as_str()),
        );
        let usernames = FrequencyTable::from_values(
            of_kind(EventKind::LoginAttempt).filter_map(|e| e.user.as_deref()),
        );
        let passwords = FrequencyTable::from_values(
            of_kind(EventKind::LoginAttempt).filter_map(|e| e.password.as_deref()),
        );
        let commands: Vec<CommandRow> = of_kind(EventKind::CommandExecution)
            .filter_map(|e| {
                e.command.as_ref().map(|command| CommandRow {
                    timestamp: e.timestamp.clone(),
                    command: command.clone(),
                })
            })
            .collect();

        DashboardView {
            total_records: events.len(),
            total_connections: ip_frequency.total(),
            unique_ips: ip_frequency.len(),
            commands_executed: commands.len(),
            login_attempts: usernames.total(),
            top_usernames: usernames.top(top).to_vec(),
            top_passwords: passwords.top(top).to_vec(),
            commands,
            ip_frequency: ip_frequency.entries().to_vec(),
            observed: observed_window(events),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.total_records == 0
    }

    pub fn has_logins(&self) -> bool {
        self.login_attempts > 0
    }
}

fn observed_window(events: &[Event]) -> Option<ObservedWindow> {
    let mut times = events.iter().filter_map(Event::observed_at);
    let first = times.next()?;
    let (first, last) = times.fold((first, first), |(lo, hi), t| (lo.min(t), hi.max(t)));
    Some(ObservedWindow { first, last })
}

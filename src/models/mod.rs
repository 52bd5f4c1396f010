pub mod event;

pub use event::{CredentialTriples, Event, EventKind, UNKNOWN_SOURCE};

//! Interactive dashboard served over HTTP
//!
//! Each request re-derives the view from the cached event collection; the
//! log is only re-scanned when its path or modification time changes.

pub mod cache;
pub mod page;
pub mod server;
pub mod view;

pub use cache::{CacheKey, ParseCache};
pub use server::{configure, run, AppState};
pub use view::{CommandRow, DashboardView, ObservedWindow};

//! A terminal dashboard for browsing and editing AI avatar records.
//!
//! Records come from a paged remote user listing and fall back to a fixed
//! local table whenever the remote cannot be used.
pub mod api;
pub mod app;
pub mod config;
pub mod dashboard;
pub mod error;
pub mod input;
pub mod logging;
pub mod widgets;
pub mod worker;

pub use api::{Record, RecordFetcher, RecordSource};
pub use app::App;
pub use config::Settings;

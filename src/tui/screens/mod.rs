//! TUI screens

mod browser;
mod dashboard;
mod recorder;

pub use browser::BrowserScreen;
pub use dashboard::DashboardScreen;
pub use recorder::{RecorderAction, RecorderOutcome, RecorderScreen};

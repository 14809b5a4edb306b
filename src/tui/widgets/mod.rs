//! Reusable TUI widgets

mod help;
mod toast;

pub use help::HelpPopup;
pub use toast::Toasts;

//! Workout recording session
//!
//! The session controller drives one in-progress workout recording: an
//! elapsed clock, rest/exercise countdown timers, per-row set submission to
//! the backend, and progress aggregation over acknowledged sets.

mod clock;
mod controller;
mod countdown;
mod notify;
mod progress;
mod ticker;

pub use clock::SessionClock;
pub use controller::{DraftField, DraftRow, SessionController, SessionPhase};
pub use countdown::{Countdown, CountdownKind, Countdowns, Expiry};
pub use notify::{Notice, NoticeKind, SoundCue, SoundPlayer, TerminalBell};
pub use progress::{completed_count, exercise_progress, overall_progress};
pub use ticker::{TickEvent, TickSource, TickSubscription, Ticker};

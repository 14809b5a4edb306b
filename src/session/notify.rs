//! Notification and sound side channels
//!
//! Toast-style notices are queued by the session controller and drained by
//! the view layer. Sounds go through the `SoundPlayer` seam; a playback
//! failure is logged and swallowed so it never blocks the other expiry
//! effects.

use anyhow::Result;
use std::io::Write;

/// Severity of a notice
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeKind {
    Success,
    Error,
    Info,
}

/// A toast-style message for the view layer
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub kind: NoticeKind,
    pub message: String,
}

impl Notice {
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            kind: NoticeKind::Success,
            message: message.into(),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            kind: NoticeKind::Error,
            message: message.into(),
        }
    }

    pub fn info(message: impl Into<String>) -> Self {
        Self {
            kind: NoticeKind::Info,
            message: message.into(),
        }
    }
}

/// Which sound to play on countdown expiry
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SoundCue {
    RestOver,
    ExerciseOver,
}

/// Audio side channel for countdown expiry
pub trait SoundPlayer: Send {
    fn play(&mut self, cue: SoundCue) -> Result<()>;
}

/// Rings the terminal bell. Good enough for a terminal client; the host
/// terminal decides whether that is audible or visual.
pub struct TerminalBell;

impl SoundPlayer for TerminalBell {
    fn play(&mut self, _cue: SoundCue) -> Result<()> {
        let mut stdout = std::io::stdout();
        stdout.write_all(b"\x07")?;
        stdout.flush()?;
        Ok(())
    }
}

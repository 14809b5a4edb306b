//! Countdown timer state
//!
//! Generic countdown used for both "rest after a set" and "timed exercise"
//! periods. At most one countdown of each kind runs at a time; they are
//! independent of each other. Expiry is reported exactly once, when a tick
//! takes the remaining time to zero; cancellation reports nothing.

/// Which period a countdown tracks.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CountdownKind {
    /// Pause between sets
    Rest,
    /// Timed exercise duration
    Exercise,
}

impl CountdownKind {
    pub fn label(&self) -> &'static str {
        match self {
            Self::Rest => "rest",
            Self::Exercise => "exercise",
        }
    }
}

/// One active countdown.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Countdown {
    pub kind: CountdownKind,
    pub remaining_secs: u64,
    pub total_secs: u64,
    /// Draft row this countdown belongs to
    pub row: usize,
}

/// Reported once when a countdown reaches zero.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Expiry {
    pub kind: CountdownKind,
    pub row: usize,
    pub total_secs: u64,
}

/// Holds the at-most-one active countdown per kind.
#[derive(Debug, Default)]
pub struct Countdowns {
    rest: Option<Countdown>,
    exercise: Option<Countdown>,
}

impl Countdowns {
    pub fn new() -> Self {
        Self::default()
    }

    fn slot(&mut self, kind: CountdownKind) -> &mut Option<Countdown> {
        match kind {
            CountdownKind::Rest => &mut self.rest,
            CountdownKind::Exercise => &mut self.exercise,
        }
    }

    /// Start a countdown, silently cancelling any prior one of the same
    /// kind. The cancelled countdown fires no expiry.
    pub fn start(&mut self, kind: CountdownKind, total_secs: u64, row: usize) {
        *self.slot(kind) = Some(Countdown {
            kind,
            remaining_secs: total_secs,
            total_secs,
            row,
        });
    }

    /// Advance the countdown of `kind` by one second. Returns the expiry
    /// exactly once, on the tick that reaches zero; the countdown is
    /// deactivated before the expiry is reported.
    pub fn tick(&mut self, kind: CountdownKind) -> Option<Expiry> {
        let slot = self.slot(kind);
        let countdown = slot.as_mut()?;

        countdown.remaining_secs = countdown.remaining_secs.saturating_sub(1);
        if countdown.remaining_secs > 0 {
            return None;
        }

        let expired = *countdown;
        *slot = None;
        Some(Expiry {
            kind: expired.kind,
            row: expired.row,
            total_secs: expired.total_secs,
        })
    }

    /// Cancel the countdown of `kind` without firing its expiry. Returns
    /// whether one was active.
    pub fn cancel(&mut self, kind: CountdownKind) -> bool {
        self.slot(kind).take().is_some()
    }

    pub fn active(&self, kind: CountdownKind) -> Option<&Countdown> {
        match kind {
            CountdownKind::Rest => self.rest.as_ref(),
            CountdownKind::Exercise => self.exercise.as_ref(),
        }
    }

    pub fn is_active(&self, kind: CountdownKind) -> bool {
        self.active(kind).is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn counts_down_and_expires_once() {
        let mut countdowns = Countdowns::new();
        countdowns.start(CountdownKind::Rest, 3, 0);

        assert_eq!(countdowns.tick(CountdownKind::Rest), None);
        assert_eq!(countdowns.tick(CountdownKind::Rest), None);

        let expiry = countdowns.tick(CountdownKind::Rest).unwrap();
        assert_eq!(expiry.kind, CountdownKind::Rest);
        assert_eq!(expiry.total_secs, 3);

        // Deactivated; further ticks are no-ops.
        assert_eq!(countdowns.tick(CountdownKind::Rest), None);
        assert!(!countdowns.is_active(CountdownKind::Rest));
    }

    #[test]
    fn cancel_fires_no_expiry() {
        let mut countdowns = Countdowns::new();
        countdowns.start(CountdownKind::Exercise, 20, 2);

        assert!(countdowns.cancel(CountdownKind::Exercise));
        assert_eq!(countdowns.tick(CountdownKind::Exercise), None);
    }

    #[test]
    fn restart_replaces_without_expiry() {
        let mut countdowns = Countdowns::new();
        countdowns.start(CountdownKind::Rest, 2, 0);
        countdowns.tick(CountdownKind::Rest);

        // New rest countdown supersedes the one at 1s remaining.
        countdowns.start(CountdownKind::Rest, 30, 1);

        let active = countdowns.active(CountdownKind::Rest).unwrap();
        assert_eq!(active.remaining_secs, 30);
        assert_eq!(active.row, 1);

        // The superseded countdown's final tick never fires.
        assert_eq!(countdowns.tick(CountdownKind::Rest), None);
        assert_eq!(
            countdowns.active(CountdownKind::Rest).unwrap().remaining_secs,
            29
        );
    }

    #[test]
    fn kinds_are_independent() {
        let mut countdowns = Countdowns::new();
        countdowns.start(CountdownKind::Exercise, 20, 0);
        countdowns.start(CountdownKind::Rest, 30, 0);

        assert_eq!(countdowns.tick(CountdownKind::Rest), None);
        assert_eq!(
            countdowns
                .active(CountdownKind::Exercise)
                .unwrap()
                .remaining_secs,
            20
        );

        countdowns.cancel(CountdownKind::Rest);
        assert!(countdowns.is_active(CountdownKind::Exercise));
    }

    #[test]
    fn one_second_countdown_expires_on_first_tick() {
        let mut countdowns = Countdowns::new();
        countdowns.start(CountdownKind::Exercise, 1, 4);

        let expiry = countdowns.tick(CountdownKind::Exercise).unwrap();
        assert_eq!(expiry.row, 4);
    }
}

//! Session controller for one workout recording
//!
//! Owns the completed-sets list, the draft rows, the countdowns, and the
//! elapsed clock for the lifetime of one recording view. All mutation
//! happens on the caller's task; the spawned work is the one-second tick
//! subscriptions (torn down on `close` and on drop) and in-flight set
//! submissions, whose results come back through a channel drained by
//! `pump`. The event loop itself never waits on a backend call, so
//! countdowns keep ticking while a submission is on the wire.

use std::collections::VecDeque;
use std::sync::Arc;
use tokio::sync::mpsc;
use tracing::{debug, warn};

use crate::api::{CompletedSet, NewSet, SessionBackend, Workout};
use crate::session::clock::SessionClock;
use crate::session::countdown::{Countdown, CountdownKind, Countdowns, Expiry};
use crate::session::notify::{Notice, SoundCue, SoundPlayer};
use crate::session::progress;
use crate::session::ticker::{TickEvent, TickSource, TickSubscription, Ticker};

/// Lifecycle of a recording session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionPhase {
    /// Template loading; nothing ticks yet
    Idle,
    /// Template loaded, clock running, sets being recorded
    Active,
    /// Completion requested; elapsed time sent to the backend
    Completing,
    /// View left; every ticking subscription torn down
    Closed,
}

/// Editable field of a draft row
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DraftField {
    Reps,
    Weight,
    Duration,
    Rest,
    Effort,
}

/// Mutable editing buffer for one exercise prescription. Seeded from the
/// template defaults; copied into a submission payload, never sent directly.
#[derive(Debug, Clone)]
pub struct DraftRow {
    pub exercise: String,
    pub reps: Option<u32>,
    pub weight: Option<f64>,
    pub duration: Option<u64>,
    pub rest: Option<u64>,
    pub effort: Option<u8>,
    in_flight: bool,
}

impl DraftRow {
    /// Whether a submission for this row is outstanding. The view layer
    /// disables the submit control while this is true.
    pub fn in_flight(&self) -> bool {
        self.in_flight
    }

    fn to_payload(&self) -> NewSet {
        NewSet {
            exercise: self.exercise.clone(),
            reps: self.reps,
            weight: self.weight,
            duration: self.duration,
            rest: self.rest,
            pre: self.effort,
        }
    }
}

/// Result of one spawned set submission, delivered back to `pump`.
struct SubmissionOutcome {
    row: usize,
    exercise: String,
    rest: Option<u64>,
    result: anyhow::Result<CompletedSet>,
}

/// Drives one active workout recording.
pub struct SessionController {
    backend: Arc<dyn SessionBackend>,
    sound: Box<dyn SoundPlayer>,
    sound_enabled: bool,

    phase: SessionPhase,
    workout: Option<Workout>,
    record_id: Option<String>,
    drafts: Vec<DraftRow>,
    completed: Vec<CompletedSet>,

    clock: Option<SessionClock>,
    countdowns: Countdowns,

    ticker: Ticker,
    ticks: mpsc::UnboundedReceiver<TickEvent>,
    submit_tx: mpsc::UnboundedSender<SubmissionOutcome>,
    submissions: mpsc::UnboundedReceiver<SubmissionOutcome>,
    clock_sub: Option<TickSubscription>,
    rest_sub: Option<TickSubscription>,
    exercise_sub: Option<TickSubscription>,
    next_epoch: u64,

    notices: VecDeque<Notice>,
}

impl SessionController {
    pub fn new(
        backend: Arc<dyn SessionBackend>,
        sound: Box<dyn SoundPlayer>,
        sound_enabled: bool,
    ) -> Self {
        let (ticker, ticks) = Ticker::new();
        let (submit_tx, submissions) = mpsc::unbounded_channel();
        Self {
            backend,
            sound,
            sound_enabled,
            phase: SessionPhase::Idle,
            workout: None,
            record_id: None,
            drafts: Vec::new(),
            completed: Vec::new(),
            clock: None,
            countdowns: Countdowns::new(),
            ticker,
            ticks,
            submit_tx,
            submissions,
            clock_sub: None,
            rest_sub: None,
            exercise_sub: None,
            next_epoch: 0,
            notices: VecDeque::new(),
        }
    }

    // Lifecycle

    /// Open the session: fetch the template, open a server-side record, seed
    /// draft rows, and start the elapsed clock. On failure the session stays
    /// Idle and may be retried.
    pub async fn open(&mut self, workout_id: &str) -> anyhow::Result<()> {
        if self.phase != SessionPhase::Idle {
            anyhow::bail!("Session already open");
        }

        let workout = self.backend.fetch_workout(workout_id).await?;
        let record = self.backend.open_record(workout_id).await?;

        self.drafts = workout
            .exercises
            .iter()
            .map(|ex| DraftRow {
                exercise: ex.exercise.clone(),
                reps: ex.reps,
                weight: ex.weight,
                duration: ex.duration,
                rest: ex.rest,
                effort: None,
                in_flight: false,
            })
            .collect();

        self.record_id = Some(record.uuid);
        self.workout = Some(workout);
        self.clock = Some(SessionClock::start());
        self.clock_sub = Some(self.subscribe(TickSource::Clock));
        self.phase = SessionPhase::Active;

        debug!(record = ?self.record_id, "session opened");
        Ok(())
    }

    /// Tear down the session: cancel every ticking subscription and both
    /// countdowns. Safe to call from any phase and more than once; also runs
    /// on drop so an abnormal exit cannot leave orphaned timers.
    pub fn close(&mut self) {
        self.clock_sub = None;
        self.rest_sub = None;
        self.exercise_sub = None;
        self.countdowns.cancel(CountdownKind::Rest);
        self.countdowns.cancel(CountdownKind::Exercise);
        self.phase = SessionPhase::Closed;
    }

    /// Request completion: capture the elapsed time and persist it. On
    /// failure the session drops back to Active so completion can be
    /// retried; on success it is closed.
    pub async fn complete(&mut self) -> anyhow::Result<u64> {
        if self.phase != SessionPhase::Active {
            anyhow::bail!("Session is not active");
        }

        let elapsed = self.elapsed_secs();
        self.phase = SessionPhase::Completing;

        let record_id = self
            .record_id
            .clone()
            .ok_or_else(|| anyhow::anyhow!("No open record"))?;

        match self.backend.complete_record(&record_id, elapsed).await {
            Ok(()) => {
                self.push_notice(Notice::success("Workout completed!"));
                self.close();
                Ok(elapsed)
            }
            Err(e) => {
                warn!("Failed to complete workout record: {:#}", e);
                self.push_notice(Notice::error("Failed to complete workout"));
                self.phase = SessionPhase::Active;
                Err(e)
            }
        }
    }

    // Set submission

    /// Submit the draft row at `row` as one executed set. The backend call
    /// runs on a spawned task so the event loop keeps drawing and the
    /// countdowns keep ticking while it is in flight; the row's `in_flight`
    /// flag guards against a second submission until the result lands in
    /// `pump`. On success the acknowledged set is appended (and progress
    /// therefore updated) before the rest countdown starts; on failure the
    /// draft row and completed list are left untouched and a failure notice
    /// is queued.
    pub fn submit_set(&mut self, row: usize) -> anyhow::Result<()> {
        if self.phase != SessionPhase::Active {
            anyhow::bail!("Session is not active");
        }

        let record_id = self
            .record_id
            .clone()
            .ok_or_else(|| anyhow::anyhow!("No open record"))?;

        let draft = match self.drafts.get_mut(row) {
            Some(d) => d,
            None => anyhow::bail!("No exercise at row {}", row),
        };

        if draft.in_flight {
            debug!(row, "submission already in flight, ignoring");
            return Ok(());
        }

        draft.in_flight = true;
        let payload = draft.to_payload();
        let exercise = payload.exercise.clone();
        let rest = payload.rest;

        let backend = Arc::clone(&self.backend);
        let tx = self.submit_tx.clone();
        tokio::spawn(async move {
            let result = backend.log_set(&record_id, payload).await;
            // The controller may already be gone; nothing to deliver to then.
            let _ = tx.send(SubmissionOutcome {
                row,
                exercise,
                rest,
                result,
            });
        });

        Ok(())
    }

    fn handle_submission(&mut self, outcome: SubmissionOutcome) {
        if let Some(d) = self.drafts.get_mut(outcome.row) {
            d.in_flight = false;
        }

        if self.phase == SessionPhase::Closed {
            return;
        }

        match outcome.result {
            Ok(set) => {
                self.completed.push(set);
                self.push_notice(Notice::success(format!(
                    "{} set recorded",
                    outcome.exercise
                )));

                if let Some(rest) = outcome.rest.filter(|&r| r > 0) {
                    self.start_countdown(CountdownKind::Rest, rest, outcome.row);
                }
            }
            Err(e) => {
                warn!(row = outcome.row, "set submission failed: {:#}", e);
                self.push_notice(Notice::error(format!(
                    "Failed to record {} set",
                    outcome.exercise
                )));
            }
        }
    }

    // Countdowns

    /// Start the timed-exercise countdown for `row`, using its draft
    /// duration. Expiry auto-submits the row once.
    pub fn start_exercise(&mut self, row: usize) {
        let duration = self.drafts.get(row).and_then(|d| d.duration);
        match duration.filter(|&d| d > 0) {
            Some(secs) => self.start_countdown(CountdownKind::Exercise, secs, row),
            None => {
                self.push_notice(Notice::info("Exercise has no duration set"));
            }
        }
    }

    /// Skip the current rest period without firing its expiry.
    pub fn skip_rest(&mut self) {
        if self.countdowns.cancel(CountdownKind::Rest) {
            self.rest_sub = None;
        }
    }

    /// Cancel the timed-exercise countdown without firing its expiry.
    pub fn cancel_exercise(&mut self) {
        if self.countdowns.cancel(CountdownKind::Exercise) {
            self.exercise_sub = None;
        }
    }

    fn start_countdown(&mut self, kind: CountdownKind, total_secs: u64, row: usize) {
        self.countdowns.start(kind, total_secs, row);

        // Replacing the subscription resets its one-second phase and bumps
        // the epoch so queued ticks from the superseded timer are ignored.
        let sub = self.subscribe(match kind {
            CountdownKind::Rest => TickSource::Rest,
            CountdownKind::Exercise => TickSource::Exercise,
        });
        match kind {
            CountdownKind::Rest => self.rest_sub = Some(sub),
            CountdownKind::Exercise => self.exercise_sub = Some(sub),
        }
    }

    fn subscribe(&mut self, source: TickSource) -> TickSubscription {
        self.next_epoch += 1;
        self.ticker.subscribe(source, self.next_epoch)
    }

    /// Drain landed submission results and queued ticks, and run due
    /// countdown transitions including expiry side effects. The view layer
    /// calls this once per event-loop iteration.
    pub fn pump(&mut self) {
        while let Ok(outcome) = self.submissions.try_recv() {
            self.handle_submission(outcome);
        }

        let mut expiries: Vec<Expiry> = Vec::new();

        while let Ok(event) = self.ticks.try_recv() {
            let kind = match event.source {
                TickSource::Clock => continue,
                TickSource::Rest => CountdownKind::Rest,
                TickSource::Exercise => CountdownKind::Exercise,
            };

            if !self.tick_is_current(kind, event.epoch) {
                continue;
            }

            if let Some(expiry) = self.countdowns.tick(kind) {
                match kind {
                    CountdownKind::Rest => self.rest_sub = None,
                    CountdownKind::Exercise => self.exercise_sub = None,
                }
                expiries.push(expiry);
            }
        }

        for expiry in expiries {
            self.handle_expiry(expiry);
        }
    }

    fn tick_is_current(&self, kind: CountdownKind, epoch: u64) -> bool {
        let sub = match kind {
            CountdownKind::Rest => self.rest_sub.as_ref(),
            CountdownKind::Exercise => self.exercise_sub.as_ref(),
        };
        sub.map(|s| s.epoch() == epoch).unwrap_or(false)
    }

    fn handle_expiry(&mut self, expiry: Expiry) {
        let cue = match expiry.kind {
            CountdownKind::Rest => SoundCue::RestOver,
            CountdownKind::Exercise => SoundCue::ExerciseOver,
        };

        if self.sound_enabled {
            // A blocked sound must not block the notice or auto-submission.
            if let Err(e) = self.sound.play(cue) {
                warn!("sound playback failed: {:#}", e);
            }
        }

        match expiry.kind {
            CountdownKind::Rest => {
                self.push_notice(Notice::success("Rest over, next set!"));
            }
            CountdownKind::Exercise => {
                self.push_notice(Notice::success("Exercise done"));
                if let Err(e) = self.submit_set(expiry.row) {
                    warn!(row = expiry.row, "auto-submission failed: {:#}", e);
                }
            }
        }
    }

    // Accessors

    pub fn phase(&self) -> SessionPhase {
        self.phase
    }

    pub fn workout(&self) -> Option<&Workout> {
        self.workout.as_ref()
    }

    pub fn record_id(&self) -> Option<&str> {
        self.record_id.as_deref()
    }

    pub fn drafts(&self) -> &[DraftRow] {
        &self.drafts
    }

    pub fn completed_sets(&self) -> &[CompletedSet] {
        &self.completed
    }

    pub fn countdown(&self, kind: CountdownKind) -> Option<&Countdown> {
        self.countdowns.active(kind)
    }

    pub fn elapsed_secs(&self) -> u64 {
        self.clock.map(|c| c.elapsed_secs()).unwrap_or(0)
    }

    /// Completion percentage for the exercise at `row`, clamped to [0, 100].
    pub fn exercise_progress(&self, row: usize) -> u8 {
        match self.workout.as_ref().and_then(|w| w.exercises.get(row)) {
            Some(prescription) => progress::exercise_progress(&self.completed, prescription),
            None => 0,
        }
    }

    /// Overall completion percentage, clamped to [0, 100].
    pub fn overall_progress(&self) -> u8 {
        match self.workout.as_ref() {
            Some(workout) => progress::overall_progress(&self.completed, workout),
            None => 0,
        }
    }

    /// Update one editable field of a draft row.
    pub fn set_draft_field(&mut self, row: usize, field: DraftField, value: Option<f64>) {
        let Some(draft) = self.drafts.get_mut(row) else {
            return;
        };

        match field {
            DraftField::Reps => draft.reps = value.map(|v| v.max(0.0) as u32),
            DraftField::Weight => draft.weight = value.map(|v| v.max(0.0)),
            DraftField::Duration => draft.duration = value.map(|v| v.max(0.0) as u64),
            DraftField::Rest => draft.rest = value.map(|v| v.max(0.0) as u64),
            DraftField::Effort => draft.effort = value.map(|v| v.clamp(1.0, 10.0) as u8),
        }
    }

    fn push_notice(&mut self, notice: Notice) {
        self.notices.push_back(notice);
    }

    /// Drain queued notices for the view layer.
    pub fn take_notices(&mut self) -> Vec<Notice> {
        self.notices.drain(..).collect()
    }
}

impl Drop for SessionController {
    fn drop(&mut self) {
        self.close();
    }
}

//! Recorder screen - one active workout recording session

use anyhow::Result;
use crossterm::event::KeyCode;
use ratatui::{
    prelude::*,
    widgets::{Block, Borders, Cell, Gauge, Paragraph, Row, Table},
};
use std::sync::Arc;

use crate::api::SessionBackend;
use crate::config::Settings;
use crate::session::{
    CountdownKind, DraftField, SessionController, SessionPhase, TerminalBell,
};
use crate::storage::{SessionSummary, StoredSet};
use crate::tui::widgets::Toasts;

const FIELDS: [DraftField; 5] = [
    DraftField::Reps,
    DraftField::Weight,
    DraftField::Duration,
    DraftField::Rest,
    DraftField::Effort,
];

/// What the caller should do after a key press.
pub enum RecorderAction {
    None,
    /// Session completed and acknowledged by the backend.
    Finished(Box<RecorderOutcome>),
}

/// Result of a completed session, ready for the local history cache.
pub struct RecorderOutcome {
    pub session: SessionSummary,
    pub sets: Vec<StoredSet>,
}

/// Recorder screen state
pub struct RecorderScreen {
    controller: SessionController,
    toasts: Toasts,
    selected_row: usize,
    selected_field: usize,
    input: Option<String>,
}

impl RecorderScreen {
    /// Open a recording session for `workout_id`.
    pub async fn open(
        backend: Arc<dyn SessionBackend>,
        settings: &Settings,
        workout_id: &str,
    ) -> Result<Self> {
        let mut controller = SessionController::new(
            backend,
            Box::new(TerminalBell),
            settings.session.sound_enabled,
        );
        controller.open(workout_id).await?;

        Ok(Self {
            controller,
            toasts: Toasts::new(),
            selected_row: 0,
            selected_field: 0,
            input: None,
        })
    }

    /// Drain controller ticks and landed submissions, and refresh toast
    /// state. Called once per event-loop iteration.
    pub fn tick(&mut self) {
        self.controller.pump();
        for notice in self.controller.take_notices() {
            self.toasts.push(notice);
        }
        self.toasts.expire();
    }

    pub async fn handle_key(&mut self, key: KeyCode) -> Result<RecorderAction> {
        // Field editing captures all input until committed or cancelled.
        if self.input.is_some() {
            self.handle_edit_key(key);
            return Ok(RecorderAction::None);
        }

        let rows = self.controller.drafts().len();

        match key {
            KeyCode::Up | KeyCode::Char('k') => {
                if rows > 0 {
                    self.selected_row = self.selected_row.checked_sub(1).unwrap_or(rows - 1);
                }
            }
            KeyCode::Down | KeyCode::Char('j') => {
                if rows > 0 {
                    self.selected_row = (self.selected_row + 1) % rows;
                }
            }
            KeyCode::Left | KeyCode::Char('h') => {
                self.selected_field = self
                    .selected_field
                    .checked_sub(1)
                    .unwrap_or(FIELDS.len() - 1);
            }
            KeyCode::Right | KeyCode::Char('l') | KeyCode::Tab => {
                self.selected_field = (self.selected_field + 1) % FIELDS.len();
            }
            KeyCode::Enter | KeyCode::Char('e') => {
                self.start_edit();
            }
            KeyCode::Char('s') | KeyCode::Char(' ') => {
                self.controller.submit_set(self.selected_row)?;
            }
            KeyCode::Char('t') => {
                self.controller.start_exercise(self.selected_row);
            }
            KeyCode::Char('r') => {
                self.controller.skip_rest();
            }
            KeyCode::Char('x') => {
                self.controller.cancel_exercise();
            }
            KeyCode::Char('f') => {
                return self.finish().await;
            }
            _ => {}
        }

        Ok(RecorderAction::None)
    }

    fn handle_edit_key(&mut self, key: KeyCode) {
        let Some(buffer) = self.input.as_mut() else {
            return;
        };

        match key {
            KeyCode::Char(c) if c.is_ascii_digit() || c == '.' => {
                buffer.push(c);
            }
            KeyCode::Backspace => {
                buffer.pop();
            }
            KeyCode::Enter => {
                let value = buffer.parse::<f64>().ok();
                let field = FIELDS[self.selected_field];
                self.controller
                    .set_draft_field(self.selected_row, field, value);
                self.input = None;
            }
            KeyCode::Esc => {
                self.input = None;
            }
            _ => {}
        }
    }

    fn start_edit(&mut self) {
        let field = FIELDS[self.selected_field];
        let current = self
            .controller
            .drafts()
            .get(self.selected_row)
            .and_then(|d| match field {
                DraftField::Reps => d.reps.map(|v| v.to_string()),
                DraftField::Weight => d.weight.map(|v| v.to_string()),
                DraftField::Duration => d.duration.map(|v| v.to_string()),
                DraftField::Rest => d.rest.map(|v| v.to_string()),
                DraftField::Effort => d.effort.map(|v| v.to_string()),
            })
            .unwrap_or_default();
        self.input = Some(current);
    }

    /// True while an editing buffer is open; Esc then cancels the edit
    /// instead of leaving the screen.
    pub fn editing(&self) -> bool {
        self.input.is_some()
    }

    pub fn cancel_edit(&mut self) {
        self.input = None;
    }

    async fn finish(&mut self) -> Result<RecorderAction> {
        let record_id = self.controller.record_id().unwrap_or_default().to_string();
        let workout_name = self
            .controller
            .workout()
            .map(|w| w.name.clone())
            .unwrap_or_default();

        match self.controller.complete().await {
            Ok(elapsed) => {
                let sets: Vec<StoredSet> = self
                    .controller
                    .completed_sets()
                    .iter()
                    .map(|set| {
                        StoredSet::new(
                            record_id.clone(),
                            set.exercise.clone(),
                            set.reps,
                            set.weight,
                            set.duration,
                            set.datetime,
                        )
                    })
                    .collect();

                let session = SessionSummary::new(
                    record_id,
                    workout_name,
                    elapsed,
                    sets.len() as u32,
                );

                Ok(RecorderAction::Finished(Box::new(RecorderOutcome {
                    session,
                    sets,
                })))
            }
            Err(_) => {
                // Failure notice is already queued; session stays active.
                Ok(RecorderAction::None)
            }
        }
    }

    /// Abandon the session without completing it.
    pub fn abandon(&mut self) {
        self.controller.close();
    }

    pub fn phase(&self) -> SessionPhase {
        self.controller.phase()
    }

    pub fn draw(&mut self, frame: &mut Frame, area: Rect, settings: &Settings) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3), // Header
                Constraint::Length(3), // Overall progress
                Constraint::Min(5),    // Exercise table
                Constraint::Length(3), // Countdowns
                Constraint::Length(3), // Help
            ])
            .split(area);

        self.draw_header(frame, chunks[0], settings);
        self.draw_overall(frame, chunks[1]);
        self.draw_table(frame, chunks[2]);
        self.draw_countdowns(frame, chunks[3], settings);
        self.draw_help(frame, chunks[4]);

        self.toasts.draw(frame, area);
    }

    fn draw_header(&self, frame: &mut Frame, area: Rect, settings: &Settings) {
        let name = self
            .controller
            .workout()
            .map(|w| w.name.as_str())
            .unwrap_or("Workout");

        let mut spans = vec![Span::styled(
            name.to_string(),
            Style::default().fg(Color::Cyan).bold(),
        )];

        if settings.tui.show_elapsed {
            let elapsed = self.controller.elapsed_secs();
            spans.push(Span::raw("   "));
            spans.push(Span::styled(
                format!("{:02}:{:02}", elapsed / 60, elapsed % 60),
                Style::default().fg(Color::Yellow),
            ));
        }

        let header = Paragraph::new(Line::from(spans))
            .alignment(Alignment::Center)
            .block(Block::default().borders(Borders::BOTTOM));
        frame.render_widget(header, area);
    }

    fn draw_overall(&self, frame: &mut Frame, area: Rect) {
        let percent = self.controller.overall_progress();
        let gauge = Gauge::default()
            .block(Block::default().borders(Borders::ALL).title(" Progress "))
            .gauge_style(Style::default().fg(Color::Green))
            .percent(percent as u16);
        frame.render_widget(gauge, area);
    }

    fn draw_table(&mut self, frame: &mut Frame, area: Rect) {
        let header = Row::new(vec![
            "Exercise", "Sets", "Reps", "Weight", "Time", "Rest", "Effort", "%",
        ])
        .style(Style::default().fg(Color::DarkGray));

        let completed = self.controller.completed_sets();
        let rows: Vec<Row> = self
            .controller
            .drafts()
            .iter()
            .enumerate()
            .map(|(i, draft)| {
                let target_sets = self
                    .controller
                    .workout()
                    .and_then(|w| w.exercises.get(i))
                    .map(|ex| ex.sets)
                    .unwrap_or(0);
                let done = crate::session::completed_count(completed, &draft.exercise);

                let mut cells = vec![
                    Cell::from(draft.exercise.clone()),
                    Cell::from(format!("{}/{}", done, target_sets)),
                ];

                for (f, field) in FIELDS.iter().enumerate() {
                    let selected = i == self.selected_row && f == self.selected_field;
                    let text = if selected {
                        match &self.input {
                            Some(buffer) => format!("{}█", buffer),
                            None => field_text(draft, *field),
                        }
                    } else {
                        field_text(draft, *field)
                    };

                    let style = if selected {
                        Style::default().fg(Color::Black).bg(Color::Cyan)
                    } else {
                        Style::default()
                    };
                    cells.push(Cell::from(text).style(style));
                }

                cells.push(Cell::from(format!(
                    "{}%",
                    self.controller.exercise_progress(i)
                )));

                let style = if draft.in_flight() {
                    Style::default().fg(Color::DarkGray)
                } else if i == self.selected_row {
                    Style::default().add_modifier(Modifier::BOLD)
                } else {
                    Style::default()
                };
                Row::new(cells).style(style)
            })
            .collect();

        let table = Table::new(
            rows,
            [
                Constraint::Min(16),
                Constraint::Length(6),
                Constraint::Length(6),
                Constraint::Length(8),
                Constraint::Length(6),
                Constraint::Length(6),
                Constraint::Length(7),
                Constraint::Length(5),
            ],
        )
        .header(header)
        .block(
            Block::default()
                .title(" Exercises ")
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Blue)),
        );

        frame.render_widget(table, area);
    }

    fn draw_countdowns(&self, frame: &mut Frame, area: Rect, settings: &Settings) {
        let halves = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
            .split(area);

        self.draw_countdown(frame, halves[0], CountdownKind::Rest, settings);
        self.draw_countdown(frame, halves[1], CountdownKind::Exercise, settings);
    }

    fn draw_countdown(
        &self,
        frame: &mut Frame,
        area: Rect,
        kind: CountdownKind,
        settings: &Settings,
    ) {
        let title = match kind {
            CountdownKind::Rest => " Rest ",
            CountdownKind::Exercise => " Exercise ",
        };

        match self.controller.countdown(kind) {
            Some(countdown) => {
                let color = if countdown.remaining_secs <= settings.session.countdown_warn_secs {
                    Color::Red
                } else {
                    Color::Yellow
                };
                let ratio = if countdown.total_secs > 0 {
                    countdown.remaining_secs as f64 / countdown.total_secs as f64
                } else {
                    0.0
                };
                let gauge = Gauge::default()
                    .block(Block::default().borders(Borders::ALL).title(title))
                    .gauge_style(Style::default().fg(color))
                    .label(format!("{}s", countdown.remaining_secs))
                    .ratio(ratio.clamp(0.0, 1.0));
                frame.render_widget(gauge, area);
            }
            None => {
                let idle = Paragraph::new("-")
                    .style(Style::default().fg(Color::DarkGray))
                    .alignment(Alignment::Center)
                    .block(Block::default().borders(Borders::ALL).title(title));
                frame.render_widget(idle, area);
            }
        }
    }

    fn draw_help(&self, frame: &mut Frame, area: Rect) {
        let help = Paragraph::new(Line::from(vec![
            Span::styled(" s ", Style::default().fg(Color::Black).bg(Color::Cyan)),
            Span::raw(" Log set  "),
            Span::styled(" e ", Style::default().fg(Color::Black).bg(Color::Cyan)),
            Span::raw(" Edit  "),
            Span::styled(" t ", Style::default().fg(Color::Black).bg(Color::Cyan)),
            Span::raw(" Timer  "),
            Span::styled(" r ", Style::default().fg(Color::Black).bg(Color::Cyan)),
            Span::raw(" Skip rest  "),
            Span::styled(" f ", Style::default().fg(Color::Black).bg(Color::Cyan)),
            Span::raw(" Finish  "),
            Span::styled(" Esc ", Style::default().fg(Color::Black).bg(Color::Cyan)),
            Span::raw(" Abandon"),
        ]))
        .alignment(Alignment::Center);
        frame.render_widget(help, area);
    }
}

fn field_text(draft: &crate::session::DraftRow, field: DraftField) -> String {
    match field {
        DraftField::Reps => draft.reps.map(|v| v.to_string()),
        DraftField::Weight => draft.weight.map(|v| format!("{}", v)),
        DraftField::Duration => draft.duration.map(|v| format!("{}s", v)),
        DraftField::Rest => draft.rest.map(|v| format!("{}s", v)),
        DraftField::Effort => draft.effort.map(|v| v.to_string()),
    }
    .unwrap_or_else(|| "-".to_string())
}

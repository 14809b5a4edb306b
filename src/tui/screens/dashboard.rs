//! Dashboard screen - profile summary and recent session history

use ratatui::{
    prelude::*,
    widgets::{Block, Borders, List, ListItem, Paragraph, Wrap},
};

use crate::api::UserProfile;
use crate::storage::SessionSummary;

/// Dashboard screen state
pub struct DashboardScreen {
    profile: Option<UserProfile>,
    recent: Vec<SessionSummary>,
}

impl Default for DashboardScreen {
    fn default() -> Self {
        Self::new()
    }
}

impl DashboardScreen {
    pub fn new() -> Self {
        Self {
            profile: None,
            recent: Vec::new(),
        }
    }

    pub fn set_profile(&mut self, profile: UserProfile) {
        self.profile = Some(profile);
    }

    pub fn set_recent(&mut self, recent: Vec<SessionSummary>) {
        self.recent = recent;
    }

    pub fn draw(&self, frame: &mut Frame, area: Rect) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3), // Title
                Constraint::Length(6), // Profile
                Constraint::Min(5),    // Recent sessions
                Constraint::Length(3), // Help
            ])
            .split(area);

        // Title
        let title = Paragraph::new("reps")
            .style(Style::default().fg(Color::Cyan).bold())
            .alignment(Alignment::Center)
            .block(Block::default().borders(Borders::BOTTOM));
        frame.render_widget(title, chunks[0]);

        // Profile
        let profile_text = match &self.profile {
            Some(profile) => {
                let mut lines = vec![Line::from(vec![
                    Span::raw("Logged in as "),
                    Span::styled(&profile.username, Style::default().fg(Color::White).bold()),
                ])];
                if let Some(goal) = &profile.fitness_goal {
                    lines.push(Line::from(vec![
                        Span::raw("Goal: "),
                        Span::styled(goal, Style::default().fg(Color::Green)),
                    ]));
                }
                if let Some(level) = &profile.fitness_level {
                    lines.push(Line::from(vec![
                        Span::raw("Level: "),
                        Span::styled(level, Style::default().fg(Color::Yellow)),
                    ]));
                }
                lines
            }
            None => vec![
                Line::from(Span::styled(
                    "Offline",
                    Style::default().fg(Color::DarkGray),
                )),
                Line::from(""),
                Line::from("Profile unavailable; history below is the local cache."),
            ],
        };

        let profile_widget = Paragraph::new(profile_text).wrap(Wrap { trim: true }).block(
            Block::default()
                .title(" Profile ")
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Blue)),
        );
        frame.render_widget(profile_widget, chunks[1]);

        // Recent sessions
        let items: Vec<ListItem> = if self.recent.is_empty() {
            vec![ListItem::new(Span::styled(
                "No recorded sessions yet. Press [w] to pick a workout.",
                Style::default().fg(Color::DarkGray),
            ))]
        } else {
            self.recent
                .iter()
                .map(|session| {
                    let date = session.recorded_at.format("%Y-%m-%d %H:%M").to_string();
                    let duration = format!(
                        "{}:{:02}",
                        session.duration_secs / 60,
                        session.duration_secs % 60
                    );

                    ListItem::new(Line::from(vec![
                        Span::styled(
                            format!("{:<30}", session.workout_name),
                            Style::default().fg(Color::White),
                        ),
                        Span::styled(date, Style::default().fg(Color::DarkGray)),
                        Span::raw(" "),
                        Span::styled(duration, Style::default().fg(Color::Cyan)),
                        Span::raw(" "),
                        Span::styled(
                            format!("{} sets", session.total_sets),
                            Style::default().fg(Color::Green),
                        ),
                    ]))
                })
                .collect()
        };

        let recent_widget = List::new(items).block(
            Block::default()
                .title(" Recent Sessions ")
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::DarkGray)),
        );
        frame.render_widget(recent_widget, chunks[2]);

        // Help bar
        let help = Paragraph::new(Line::from(vec![
            Span::styled(" [w] ", Style::default().fg(Color::Black).bg(Color::Cyan)),
            Span::raw(" Workouts  "),
            Span::styled(" [?] ", Style::default().fg(Color::Black).bg(Color::Cyan)),
            Span::raw(" Help  "),
            Span::styled(" [q] ", Style::default().fg(Color::Black).bg(Color::Cyan)),
            Span::raw(" Quit"),
        ]))
        .alignment(Alignment::Center);
        frame.render_widget(help, chunks[3]);
    }
}

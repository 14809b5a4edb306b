//! Main TUI application state and logic

use anyhow::Result;
use crossterm::event::KeyCode;
use ratatui::prelude::*;
use std::sync::Arc;

use crate::api::ApiClient;
use crate::config::Settings;
use crate::storage::Database;
use crate::tui::screens::{BrowserScreen, DashboardScreen, RecorderAction, RecorderScreen};
use crate::tui::widgets::HelpPopup;

/// Current screen
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppScreen {
    Dashboard,
    Browser,
    Recorder,
}

/// Main application state
pub struct App {
    settings: Settings,
    api: Arc<ApiClient>,
    current_screen: AppScreen,
    previous_screen: Option<AppScreen>,
    show_help: bool,

    // Screen states
    dashboard: DashboardScreen,
    browser: BrowserScreen,
    recorder: Option<RecorderScreen>,
}

impl App {
    /// Create a new app instance
    pub fn new(settings: Settings) -> Result<Self> {
        let api = Arc::new(ApiClient::from_settings(&settings)?);

        let mut dashboard = DashboardScreen::new();
        let db = Database::open(&settings)?;
        dashboard.set_recent(db.list_sessions(settings.tui.recent_count)?);

        Ok(Self {
            settings,
            api,
            current_screen: AppScreen::Dashboard,
            previous_screen: None,
            show_help: false,
            dashboard,
            browser: BrowserScreen::new(Vec::new()),
            recorder: None,
        })
    }

    /// Fetch profile and workouts from the backend. Failures leave the app
    /// in its offline state; local history still works.
    pub async fn load_remote(&mut self) {
        match self.api.get_profile().await {
            Ok(profile) => self.dashboard.set_profile(profile),
            Err(e) => tracing::warn!("profile fetch failed: {:#}", e),
        }

        match self.api.list_workouts().await {
            Ok(list) => self.browser = BrowserScreen::new(list.results),
            Err(e) => tracing::warn!("workout fetch failed: {:#}", e),
        }
    }

    /// Draw the current screen
    pub fn draw(&mut self, frame: &mut Frame) {
        let area = frame.size();

        match self.current_screen {
            AppScreen::Dashboard => {
                self.dashboard.draw(frame, area);
            }
            AppScreen::Browser => {
                self.browser.draw(frame, area);
            }
            AppScreen::Recorder => {
                if let Some(recorder) = self.recorder.as_mut() {
                    recorder.draw(frame, area, &self.settings);
                }
            }
        }

        // Draw help popup if active
        if self.show_help {
            HelpPopup::draw(frame, area, self.current_screen);
        }
    }

    /// Whether key input is currently captured by a text field, in which
    /// case q/Esc must reach the screen instead of navigating back.
    pub fn capturing_input(&self) -> bool {
        match self.current_screen {
            AppScreen::Browser => self.browser.in_search(),
            AppScreen::Recorder => self
                .recorder
                .as_ref()
                .map(|r| r.editing())
                .unwrap_or(false),
            AppScreen::Dashboard => false,
        }
    }

    /// Handle key input
    pub async fn handle_key(&mut self, key: KeyCode) -> Result<()> {
        if self.show_help {
            self.show_help = false;
            return Ok(());
        }

        match self.current_screen {
            AppScreen::Dashboard => {
                self.handle_dashboard_key(key).await?;
            }
            AppScreen::Browser => {
                self.handle_browser_key(key).await?;
            }
            AppScreen::Recorder => {
                self.handle_recorder_key(key).await?;
            }
        }

        Ok(())
    }

    /// Handle dashboard key input
    async fn handle_dashboard_key(&mut self, key: KeyCode) -> Result<()> {
        match key {
            KeyCode::Char('w') | KeyCode::Tab | KeyCode::Enter => {
                self.switch_screen(AppScreen::Browser);
            }
            _ => {}
        }
        Ok(())
    }

    /// Handle browser key input
    async fn handle_browser_key(&mut self, key: KeyCode) -> Result<()> {
        if self.browser.in_search() {
            self.browser.handle_key(key);
            return Ok(());
        }

        match key {
            KeyCode::Up | KeyCode::Char('k') => {
                self.browser.previous();
            }
            KeyCode::Down | KeyCode::Char('j') => {
                self.browser.next();
            }
            KeyCode::Enter => {
                if let Some(workout_id) = self.browser.selected().map(|w| w.uuid.clone()) {
                    self.open_recorder(&workout_id).await?;
                }
            }
            KeyCode::Char('/') => {
                self.browser.start_search();
            }
            KeyCode::Char('d') => {
                self.switch_screen(AppScreen::Dashboard);
            }
            _ => {}
        }
        Ok(())
    }

    /// Handle recorder key input
    async fn handle_recorder_key(&mut self, key: KeyCode) -> Result<()> {
        let Some(recorder) = self.recorder.as_mut() else {
            return Ok(());
        };

        if let RecorderAction::Finished(outcome) = recorder.handle_key(key).await? {
            let db = Database::open(&self.settings)?;
            db.insert_session(&outcome.session)?;
            db.insert_sets(&outcome.sets)?;
            self.dashboard
                .set_recent(db.list_sessions(self.settings.tui.recent_count)?);

            self.recorder = None;
            self.previous_screen = None;
            self.current_screen = AppScreen::Dashboard;
        }

        Ok(())
    }

    /// Open a recording session for the given workout
    async fn open_recorder(&mut self, workout_id: &str) -> Result<()> {
        let recorder =
            RecorderScreen::open(self.api.clone(), &self.settings, workout_id).await?;
        self.recorder = Some(recorder);
        self.switch_screen(AppScreen::Recorder);
        Ok(())
    }

    /// Switch to a different screen
    fn switch_screen(&mut self, screen: AppScreen) {
        self.previous_screen = Some(self.current_screen);
        self.current_screen = screen;
    }

    /// Handle back navigation
    pub fn handle_back(&mut self) {
        if let Some(mut recorder) = self.recorder.take() {
            // Leaving the recorder abandons the session and stops its timers.
            recorder.abandon();
        }

        if let Some(prev) = self.previous_screen.take() {
            self.current_screen = prev;
        } else if self.current_screen != AppScreen::Dashboard {
            self.current_screen = AppScreen::Dashboard;
        }
    }

    /// Check if app should quit
    pub fn should_quit(&self) -> bool {
        self.current_screen == AppScreen::Dashboard && !self.show_help
    }

    /// Toggle help popup
    pub fn toggle_help(&mut self) {
        self.show_help = !self.show_help;
    }

    /// Update app state
    pub fn update(&mut self) {
        if let Some(recorder) = self.recorder.as_mut() {
            recorder.tick();
        }
    }
}

//! TUI module for reps
//!
//! Interactive terminal user interface using ratatui.

mod app;
pub mod screens;
pub mod widgets;

use anyhow::Result;
use crossterm::{
    event::{self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::prelude::*;
use std::io;
use std::sync::Arc;
use std::time::Duration;

use crate::api::ApiClient;
use crate::config::Settings;
pub use app::{App, AppScreen};
pub use screens::RecorderOutcome;
use screens::{RecorderAction, RecorderScreen};

/// Run the TUI application
pub async fn run(settings: &Settings) -> Result<()> {
    let mut app = App::new(settings.clone())?;
    app.load_remote().await;

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // Run main loop
    let result = run_app(&mut terminal, &mut app).await;

    // Restore terminal
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    result
}

/// Main application loop
async fn run_app<B: Backend>(terminal: &mut Terminal<B>, app: &mut App) -> Result<()> {
    loop {
        // Draw UI
        terminal.draw(|f| app.draw(f))?;

        // Handle events with timeout for async updates
        if event::poll(Duration::from_millis(100))? {
            if let Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press {
                    if app.capturing_input() {
                        app.handle_key(key.code).await?;
                    } else {
                        match key.code {
                            KeyCode::Char('q') | KeyCode::Esc => {
                                if app.should_quit() {
                                    return Ok(());
                                }
                                app.handle_back();
                            }
                            KeyCode::Char('?') => {
                                app.toggle_help();
                            }
                            _ => {
                                app.handle_key(key.code).await?;
                            }
                        }
                    }
                }
            }
        }

        // Update app state (countdowns, toasts)
        app.update();
    }
}

/// Run just the recorder screen for one workout, as used by `reps record`.
/// Returns the session outcome if the workout was completed.
pub async fn run_recorder(
    settings: &Settings,
    workout_id: &str,
) -> Result<Option<RecorderOutcome>> {
    // Open the session before touching the terminal so failures print
    // as normal CLI errors.
    let api = Arc::new(ApiClient::from_settings(settings)?);
    let mut screen = RecorderScreen::open(api, settings, workout_id).await?;

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = recorder_loop(&mut terminal, &mut screen, settings).await;

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    result
}

async fn recorder_loop<B: Backend>(
    terminal: &mut Terminal<B>,
    screen: &mut RecorderScreen,
    settings: &Settings,
) -> Result<Option<RecorderOutcome>> {
    loop {
        terminal.draw(|f| screen.draw(f, f.size(), settings))?;

        if event::poll(Duration::from_millis(100))? {
            if let Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press {
                    match key.code {
                        KeyCode::Char('q') | KeyCode::Esc if !screen.editing() => {
                            screen.abandon();
                            return Ok(None);
                        }
                        code => {
                            if let RecorderAction::Finished(outcome) =
                                screen.handle_key(code).await?
                            {
                                return Ok(Some(*outcome));
                            }
                        }
                    }
                }
            }
        }

        screen.tick();
    }
}

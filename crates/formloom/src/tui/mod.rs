//! Terminal User Interface for Formloom
//!
//! An interactive form designer: a palette of field kinds, a canvas where
//! fields are arranged by drag-and-drop, per-field settings and a fillable
//! preview.

pub mod app;
pub mod components;
pub mod event;
pub mod keymap;
pub mod layout;
pub mod nav;
pub mod sanitize;
pub mod ui;

#[cfg(test)]
pub mod test_harness;

#[cfg(test)]
mod preview_tests;

use anyhow::Result;
use clap::Args;
use crossterm::{
    event::{DisableMouseCapture, EnableMouseCapture},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, prelude::*, Terminal};
use std::io::stdout;

use crate::tui::app::App;
use crate::tui::event::{Event, EventHandler};

/// TUI command arguments
#[derive(Debug, Args)]
pub struct TuiArgs {
    /// Name of the form being designed
    #[arg(long)]
    pub form_name: Option<String>,
}

/// Run the TUI
pub async fn run(args: TuiArgs) -> Result<()> {
    // Setup terminal. Mouse capture is needed for pointer drags.
    enable_raw_mode()?;
    let mut stdout = stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // Create app state
    let mut app = App::new(args);

    // Create event handler
    let mut events = EventHandler::new(std::time::Duration::from_millis(250));

    // Main loop
    let result = run_app(&mut terminal, &mut app, &mut events).await;

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

/// Run the application loop
async fn run_app<B: Backend>(
    terminal: &mut Terminal<B>,
    app: &mut App,
    events: &mut EventHandler,
) -> Result<()> {
    while app.running {
        // Draw UI
        terminal.draw(|frame| ui::draw(frame, app))?;

        // Handle events
        match events.next().await {
            Event::Key(key) => app.handle_key(key),
            Event::Mouse(mouse) => app.handle_mouse(mouse),
            Event::Tick => app.tick(),
            Event::Resize(_, _) => {} // Ratatui handles resize
        }
    }

    app.log_schema();
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_app_starts_in_build_mode() {
        let app = App::new(TuiArgs { form_name: None });
        assert!(matches!(app.mode, app::TuiMode::Build));
        assert!(app.running);
        assert!(app.schema.is_empty());
    }

    #[test]
    fn test_form_name_override() {
        let app = App::new(TuiArgs {
            form_name: Some("Signup".into()),
        });
        assert_eq!(app.schema.name, "Signup");
    }
}

//! Test harness for TUI interaction tests
//!
//! Provides a high-level API for:
//! - Setting up deterministic designer scenarios
//! - Sending keystrokes and mouse events to the TUI
//! - Verifying screen output via TestBackend buffer

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers, MouseEvent, MouseEventKind};
use ratatui::{backend::TestBackend, layout::Rect, Terminal};

use super::app::App;
use super::ui;
use super::TuiArgs;

/// Screen buffer snapshot for assertions
pub struct ScreenSnapshot {
    /// Raw buffer content as single string (row-major)
    pub raw: String,
    /// Content split by rows, trailing whitespace trimmed
    pub rows: Vec<String>,
}

impl ScreenSnapshot {
    /// Create snapshot from TestBackend buffer
    pub fn from_backend(backend: &TestBackend) -> Self {
        let buffer = backend.buffer();
        let width = buffer.area.width;
        let height = buffer.area.height;

        let mut raw = String::new();
        for y in 0..height {
            for x in 0..width {
                let cell = &buffer[(x, y)];
                raw.push_str(cell.symbol());
            }
        }

        let rows: Vec<String> = raw
            .chars()
            .collect::<Vec<_>>()
            .chunks(width as usize)
            .map(|chunk| chunk.iter().collect::<String>().trim_end().to_string())
            .collect();

        Self { raw, rows }
    }

    /// Check if screen contains text anywhere
    pub fn contains(&self, text: &str) -> bool {
        self.raw.contains(text)
    }

    /// Assert screen contains text (with helpful error message)
    pub fn assert_contains(&self, text: &str) {
        assert!(
            self.contains(text),
            "Screen does not contain '{}'\n\nScreen content:\n{}",
            text,
            self.format_screen()
        );
    }

    /// Assert screen does NOT contain text
    pub fn assert_not_contains(&self, text: &str) {
        assert!(
            !self.contains(text),
            "Screen unexpectedly contains '{}'\n\nScreen content:\n{}",
            text,
            self.format_screen()
        );
    }

    /// Format screen for display (with row numbers)
    pub fn format_screen(&self) -> String {
        self.rows
            .iter()
            .enumerate()
            .map(|(i, row)| format!("{:02}|{}", i, row))
            .collect::<Vec<_>>()
            .join("\n")
    }
}

/// Test harness for TUI interaction tests
pub struct TuiTestHarness {
    /// The terminal with TestBackend
    terminal: Terminal<TestBackend>,
    /// The application state
    pub app: App,
}

impl TuiTestHarness {
    /// Create a new test harness with the default 80x24 terminal
    pub fn new() -> Self {
        Self::with_size(80, 24)
    }

    /// Create a new test harness with specified terminal size
    pub fn with_size(width: u16, height: u16) -> Self {
        let backend = TestBackend::new(width, height);
        let terminal = Terminal::new(backend).expect("Failed to create test terminal");
        let app = App::new(TuiArgs { form_name: None });

        Self { terminal, app }
    }

    /// Render the current app state and return a screen snapshot.
    ///
    /// Also refreshes the cached palette/canvas areas the mouse handler
    /// hit-tests against, so call this before sending mouse events.
    pub fn render(&mut self) -> ScreenSnapshot {
        self.terminal
            .draw(|frame| ui::draw(frame, &self.app))
            .expect("Failed to draw");

        ScreenSnapshot::from_backend(self.terminal.backend())
    }

    /// Press a single unmodified key
    pub fn press(&mut self, code: KeyCode) {
        self.app
            .handle_key(KeyEvent::new(code, KeyModifiers::NONE));
    }

    /// Press a key with modifiers
    pub fn press_with(&mut self, code: KeyCode, modifiers: KeyModifiers) {
        self.app.handle_key(KeyEvent::new(code, modifiers));
    }

    /// Type a string (sends each character as a key event)
    pub fn type_text(&mut self, text: &str) {
        for c in text.chars() {
            self.press(KeyCode::Char(c));
        }
    }

    /// Send a mouse event at the given screen cell
    pub fn mouse(&mut self, kind: MouseEventKind, column: u16, row: u16) {
        self.app.handle_mouse(MouseEvent {
            kind,
            column,
            row,
            modifiers: KeyModifiers::NONE,
        });
    }

    /// Palette inner area cached by the last render
    pub fn palette_area(&self) -> Rect {
        self.app.layout_palette.get()
    }

    /// Canvas inner area cached by the last render
    pub fn canvas_area(&self) -> Rect {
        self.app.layout_canvas.get()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_snapshot_reports_rows_and_content() {
        let mut harness = TuiTestHarness::new();
        let snapshot = harness.render();

        assert_eq!(snapshot.rows.len(), 24);
        assert!(snapshot.contains("Fields"));
        snapshot.assert_contains("Untitled Form");
        snapshot.assert_not_contains("no such text on screen");
    }

    #[test]
    fn test_render_caches_mouse_areas() {
        let mut harness = TuiTestHarness::new();
        harness.render();

        assert!(harness.palette_area().width > 0);
        assert!(harness.canvas_area().width > 0);
    }
}

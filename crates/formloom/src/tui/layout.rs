//! Shared screen geometry for the designer views.

use ratatui::layout::{Constraint, Direction, Layout, Rect};

/// Width of the palette column in Build mode.
pub const PALETTE_WIDTH: u16 = 26;

/// Top-level vertical split of the screen.
#[derive(Debug, Clone, Copy)]
pub struct ScreenChunks {
    pub header: Rect,
    pub body: Rect,
    pub action_bar: Rect,
}

pub fn screen_chunks(area: Rect) -> ScreenChunks {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(2),
            Constraint::Min(0),
            Constraint::Length(2),
        ])
        .split(area);

    ScreenChunks {
        header: chunks[0],
        body: chunks[1],
        action_bar: chunks[2],
    }
}

/// Build-mode horizontal split: palette column, canvas.
pub fn build_columns(body: Rect) -> (Rect, Rect) {
    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Length(PALETTE_WIDTH), Constraint::Min(0)])
        .split(body);
    (chunks[0], chunks[1])
}

/// Right-hand overlay column for the settings panel.
pub fn settings_panel_area(body: Rect) -> Rect {
    let width = body.width.min(46);
    Rect::new(
        body.x + body.width.saturating_sub(width),
        body.y,
        width,
        body.height,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn screen_chunks_cover_the_area() {
        let area = Rect::new(0, 0, 80, 40);
        let chunks = screen_chunks(area);
        assert_eq!(chunks.header.height, 2);
        assert_eq!(chunks.action_bar.height, 2);
        assert_eq!(
            chunks.header.height + chunks.body.height + chunks.action_bar.height,
            area.height
        );
    }

    #[test]
    fn build_columns_keep_palette_width() {
        let body = Rect::new(0, 2, 80, 36);
        let (palette, canvas) = build_columns(body);
        assert_eq!(palette.width, PALETTE_WIDTH);
        assert_eq!(palette.width + canvas.width, body.width);
    }

    #[test]
    fn settings_panel_hugs_the_right_edge() {
        let body = Rect::new(0, 2, 80, 36);
        let panel = settings_panel_area(body);
        assert_eq!(panel.x + panel.width, body.x + body.width);
        assert!(panel.width <= 46);
    }
}

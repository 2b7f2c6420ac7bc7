use std::borrow::Cow;

use ratatui::{
    prelude::*,
    widgets::{Block, Borders, Paragraph},
};

/// One key hint in the bottom action bar.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ActionHint {
    pub key: Cow<'static, str>,
    pub label: Cow<'static, str>,
    pub enabled: bool,
    pub priority: u8,
}

impl ActionHint {
    pub fn new(
        key: impl Into<Cow<'static, str>>,
        label: impl Into<Cow<'static, str>>,
        priority: u8,
    ) -> Self {
        Self {
            key: key.into(),
            label: label.into(),
            enabled: true,
            priority,
        }
    }

    pub fn disabled(
        key: impl Into<Cow<'static, str>>,
        label: impl Into<Cow<'static, str>>,
        priority: u8,
    ) -> Self {
        Self {
            key: key.into(),
            label: label.into(),
            enabled: false,
            priority,
        }
    }

    /// Rendered width of "[key] label".
    fn width(&self) -> usize {
        self.key.chars().count() + 2 + 1 + self.label.chars().count()
    }
}

const GAP: &str = "  ";
const MORE_INDICATOR: &str = "(? more)";

/// Render the single-row hint bar. When the row is too narrow, the
/// lowest-priority hints are dropped and a marker points at the help
/// overlay for the rest.
pub fn render_action_bar(frame: &mut Frame, area: Rect, hints: &[ActionHint], style: Style) {
    if area.height == 0 || area.width == 0 {
        return;
    }

    let block = Block::default().borders(Borders::TOP);
    let inner = block.inner(area);
    frame.render_widget(block, area);
    if inner.height == 0 || inner.width == 0 {
        return;
    }

    let (kept, dropped) = fit_hints(hints, inner.width as usize);

    let mut spans: Vec<Span> = Vec::new();
    for (i, hint) in kept.iter().enumerate() {
        if i > 0 {
            spans.push(Span::raw(GAP));
        }
        spans.extend(hint_spans(hint, style));
    }
    if dropped {
        if !spans.is_empty() {
            spans.push(Span::raw(GAP));
        }
        spans.push(Span::styled(
            MORE_INDICATOR,
            Style::default().fg(Color::DarkGray),
        ));
    }

    let paragraph = Paragraph::new(Line::from(spans)).alignment(Alignment::Center);
    frame.render_widget(paragraph, inner);
}

/// Render a transient status message in place of the hints.
pub fn render_action_bar_message(frame: &mut Frame, area: Rect, message: &str, style: Style) {
    if area.height == 0 || area.width == 0 {
        return;
    }

    let block = Block::default().borders(Borders::TOP);
    let inner = block.inner(area);
    frame.render_widget(block, area);
    if inner.height == 0 || inner.width == 0 {
        return;
    }

    let paragraph = Paragraph::new(message)
        .style(style)
        .alignment(Alignment::Center)
        .wrap(ratatui::widgets::Wrap { trim: true });
    frame.render_widget(paragraph, inner);
}

/// Key/label rows for the help overlay, keys left-aligned in one column.
pub fn format_help_lines(hints: &[ActionHint]) -> Vec<String> {
    let key_width = hints
        .iter()
        .map(|hint| hint.key.chars().count())
        .max()
        .unwrap_or(0);
    hints
        .iter()
        .map(|hint| {
            let padding = key_width.saturating_sub(hint.key.chars().count());
            format!("  {}{} {}", hint.key, " ".repeat(padding), hint.label)
        })
        .collect()
}

/// Drop hints until the remainder fits the row, lowest priority first,
/// later hints first on ties. Order of the kept hints is preserved.
fn fit_hints(hints: &[ActionHint], width: usize) -> (Vec<&ActionHint>, bool) {
    let mut active: Vec<usize> = (0..hints.len()).collect();
    let mut dropped = false;

    loop {
        if row_width(&active, hints, dropped) <= width || active.is_empty() {
            return (active.iter().map(|&idx| &hints[idx]).collect(), dropped);
        }

        let drop_pos = active
            .iter()
            .enumerate()
            .min_by_key(|(_, idx)| (hints[**idx].priority, std::cmp::Reverse(**idx)))
            .map(|(pos, _)| pos)
            .unwrap_or(0);
        active.remove(drop_pos);
        dropped = true;
    }
}

fn row_width(active: &[usize], hints: &[ActionHint], dropped: bool) -> usize {
    let gap = GAP.chars().count();
    let mut width = 0;
    for (i, &idx) in active.iter().enumerate() {
        if i > 0 {
            width += gap;
        }
        width += hints[idx].width();
    }
    if dropped {
        if width > 0 {
            width += gap;
        }
        width += MORE_INDICATOR.chars().count();
    }
    width
}

fn hint_spans(hint: &ActionHint, base: Style) -> Vec<Span<'static>> {
    let key_style = if hint.enabled {
        base.fg(Color::Cyan).add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(Color::DarkGray)
    };
    let label_style = if hint.enabled {
        base
    } else {
        Style::default().fg(Color::DarkGray)
    };

    vec![
        Span::styled(format!("[{}]", hint.key), key_style),
        Span::raw(" "),
        Span::styled(hint.label.clone(), label_style),
    ]
}

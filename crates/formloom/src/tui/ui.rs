//! UI rendering for the TUI

use ratatui::{
    prelude::*,
    widgets::{Block, Borders, Clear, List, ListItem, ListState, Paragraph, Wrap},
};

use super::app::{App, BuilderFocus, FillValue, TuiMode};
use super::components::action_bar::{
    format_help_lines, render_action_bar, render_action_bar_message,
};
use super::components::modal::render_modal;
use super::layout::{build_columns, screen_chunks, settings_panel_area};
use super::nav;
use super::sanitize;
use formloom_drag::DragState;
use formloom_schema::model::{FieldDefinition, FieldKind};
use formloom_schema::store::is_noop_move;

/// Draw the entire UI
pub fn draw(frame: &mut Frame, app: &App) {
    let area = frame.area();
    let chunks = screen_chunks(area);

    draw_header(frame, app, chunks.header);

    match app.mode {
        TuiMode::Build => draw_build_screen(frame, app, chunks.body),
        TuiMode::Preview => draw_preview_screen(frame, app, chunks.body),
    }

    draw_action_bar(frame, app, chunks.action_bar);

    if app.builder.confirm_clear {
        draw_confirm_clear(frame, app, area);
    }
    if app.mode == TuiMode::Preview && app.preview.submitted {
        draw_submit_summary(frame, app, area);
    }

    // Help overlay sits on top of everything
    if app.show_help {
        draw_help_overlay(frame, app, area);
    }
}

/// Form name on the left, mode tabs on the right
fn draw_header(frame: &mut Frame, app: &App, area: Rect) {
    let block = Block::default().borders(Borders::BOTTOM);
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Min(0), Constraint::Length(20)])
        .split(inner);

    let name = Paragraph::new(format!(" {} ", app.schema.name))
        .style(Style::default().fg(Color::Cyan).bold());
    frame.render_widget(name, columns[0]);

    let mut spans = Vec::new();
    for (idx, item) in nav::NAV_ITEMS.iter().enumerate() {
        if idx > 0 {
            spans.push(Span::raw(" "));
        }
        if nav::nav_index_for_mode(app.mode) == Some(idx) {
            spans.push(Span::styled(
                format!("[{}]", item.label),
                Style::default().fg(Color::Cyan).bold(),
            ));
        } else {
            spans.push(Span::styled(
                format!(" {} ", item.label),
                Style::default().fg(Color::DarkGray),
            ));
        }
    }
    let tabs = Paragraph::new(Line::from(spans)).alignment(Alignment::Right);
    frame.render_widget(tabs, columns[1]);
}

fn draw_build_screen(frame: &mut Frame, app: &App, area: Rect) {
    let (palette_area, canvas_area) = build_columns(area);
    draw_palette(frame, app, palette_area);
    draw_canvas(frame, app, canvas_area);

    if app.settings.is_some() {
        draw_settings_panel(frame, app, area);
    }
}

fn draw_palette(frame: &mut Frame, app: &App, area: Rect) {
    let focused = app.builder.focus == BuilderFocus::Palette && !app.drag.is_dragging();
    let border_style = if focused {
        Style::default().fg(Color::Cyan)
    } else {
        Style::default()
    };

    let block = Block::default()
        .borders(Borders::ALL)
        .title(" Fields ")
        .border_style(border_style);
    let inner = block.inner(area);
    app.layout_palette.set(inner);

    let items: Vec<ListItem> = FieldKind::ALL
        .iter()
        .enumerate()
        .map(|(i, kind)| {
            let line = format!(" {:<18}", kind.label());
            let style = if app.drag.dragged_kind() == Some(*kind) {
                Style::default().add_modifier(Modifier::DIM | Modifier::ITALIC)
            } else if i == app.builder.palette_selected {
                Style::default().bg(Color::DarkGray).fg(Color::White)
            } else {
                Style::default()
            };
            ListItem::new(line).style(style)
        })
        .collect();

    let list = List::new(items).block(block);
    let mut state = ListState::default();
    state.select(Some(app.builder.palette_selected));
    frame.render_stateful_widget(list, area, &mut state);
}

fn draw_canvas(frame: &mut Frame, app: &App, area: Rect) {
    let focused = app.builder.focus == BuilderFocus::Canvas || app.drag.is_dragging();
    let border_style = if focused {
        Style::default().fg(Color::Cyan)
    } else {
        Style::default()
    };

    let block = Block::default()
        .borders(Borders::ALL)
        .title(format!(" Canvas ({}) ", app.schema.len()))
        .border_style(border_style);
    let inner = block.inner(area);
    app.layout_canvas.set(inner);
    frame.render_widget(block, area);

    if app.schema.is_empty() && app.ghost_gap().is_none() {
        let hint = Paragraph::new(
            "\n\n  Drag fields from the left palette\n  to get started.\n\n  Tab switches panes, Enter grabs\n  the selected field kind.",
        )
        .style(Style::default().fg(Color::DarkGray));
        frame.render_widget(hint, inner);
        return;
    }

    // The list is windowed by hand so the ghost row scrolls like a field.
    let scroll = app.canvas_scroll(inner.height as usize);
    let mut rows: Vec<ListItem> = Vec::with_capacity(app.canvas_row_count());
    for row in 0..app.canvas_row_count() {
        match app.field_at_visual_row(row) {
            Some(index) => rows.push(canvas_row(app, index, &app.schema.fields[index])),
            None => rows.push(ghost_row(app)),
        }
    }
    let items: Vec<ListItem> = rows
        .into_iter()
        .skip(scroll)
        .take(inner.height as usize)
        .collect();
    frame.render_widget(List::new(items), inner);
}

fn canvas_row(app: &App, index: usize, field: &FieldDefinition) -> ListItem<'static> {
    let label = if field.required {
        format!("{} *", field.label)
    } else {
        field.label.clone()
    };
    let line = format!(
        " {:<28} {:<10} {:>4}",
        truncate_end(&label, 28),
        field.kind.as_str(),
        field.column_width.as_str(),
    );

    let style = if app.drag.dragged_index() == Some(index) {
        Style::default().add_modifier(Modifier::DIM | Modifier::ITALIC)
    } else if index == app.builder.canvas_selected && !app.drag.is_dragging() {
        Style::default().bg(Color::DarkGray).fg(Color::White)
    } else {
        Style::default()
    };

    ListItem::new(line).style(style)
}

/// The insertion marker row shown at the hover gap during a drag.
fn ghost_row(app: &App) -> ListItem<'static> {
    match app.drag.state() {
        DragState::DraggingNew(kind) => ListItem::new(format!(" + {}", kind.label()))
            .style(Style::default().fg(Color::Green).bold()),
        DragState::DraggingExisting(from) => {
            let gap = app.drag.hover().unwrap_or(from);
            if is_noop_move(from, gap) {
                ListItem::new(" = stays here").style(Style::default().fg(Color::DarkGray))
            } else {
                ListItem::new(" > move here").style(Style::default().fg(Color::Yellow).bold())
            }
        }
        DragState::Idle => ListItem::new(""),
    }
}

fn draw_settings_panel(frame: &mut Frame, app: &App, body: Rect) {
    let Some(panel) = app.settings.as_ref() else {
        return;
    };

    let area = settings_panel_area(body);
    frame.render_widget(Clear, area);

    let block = Block::default()
        .borders(Borders::ALL)
        .title(format!(" {} settings ", panel.field.kind.label()))
        .border_style(Style::default().fg(Color::Cyan));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let rows = panel.rows();
    let focused = panel.row.min(rows.len() - 1);
    let mut lines: Vec<Line> = vec![Line::raw("")];

    for (i, row) in rows.iter().enumerate() {
        let editing_this = i == focused && panel.editing.is_some();
        let value = if editing_this {
            format!("{}_", panel.editing.clone().unwrap_or_default())
        } else {
            panel.value_of(*row)
        };

        let style = if editing_this {
            Style::default().fg(Color::Yellow)
        } else if i == focused {
            Style::default().bg(Color::DarkGray).fg(Color::White)
        } else {
            Style::default()
        };

        let mut parts = value.split('\n');
        let first = parts.next().unwrap_or_default().to_string();
        lines.push(Line::styled(
            format!(" {:<13} {}", row.title(), first),
            style,
        ));
        for continuation in parts {
            lines.push(Line::styled(format!(" {:<13} {}", "", continuation), style));
        }
    }

    frame.render_widget(Paragraph::new(lines), inner);
}

fn draw_preview_screen(frame: &mut Frame, app: &App, area: Rect) {
    let block = Block::default()
        .borders(Borders::ALL)
        .title(format!(" {} ", app.schema.name));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    if app.schema.is_empty() {
        let hint = Paragraph::new("\n\n  Nothing to preview yet.")
            .style(Style::default().fg(Color::DarkGray));
        frame.render_widget(hint, inner);
        return;
    }

    // Three rows per field: label, control, separator.
    let visible_fields = ((inner.height as usize) / 3).max(1);
    let first = app
        .preview
        .selected
        .saturating_sub(visible_fields.saturating_sub(1));

    let mut lines: Vec<Line> = Vec::new();
    for (index, field) in app.schema.fields.iter().enumerate().skip(first) {
        let selected = index == app.preview.selected;
        lines.push(preview_label_line(field, selected));
        lines.push(preview_control_line(app, field, selected));
        lines.push(Line::raw(""));
    }

    frame.render_widget(Paragraph::new(lines), inner);
}

fn preview_label_line(field: &FieldDefinition, selected: bool) -> Line<'static> {
    let required = if field.required { " *" } else { "" };
    let text = format!(
        " {}{} ({}%)",
        field.label,
        required,
        field.column_width.percent()
    );
    let style = if selected {
        Style::default().bg(Color::DarkGray).fg(Color::White)
    } else {
        Style::default().bold()
    };
    Line::styled(text, style)
}

fn preview_control_line(app: &App, field: &FieldDefinition, selected: bool) -> Line<'static> {
    match field.kind {
        FieldKind::Select => {
            let value = app.preview_display_value(field);
            if value.is_empty() {
                let hint = field
                    .placeholder
                    .clone()
                    .unwrap_or_else(|| "Choose...".to_string());
                Line::styled(format!("   < {} >", hint), Style::default().fg(Color::DarkGray))
            } else {
                Line::raw(format!("   < {} >", value))
            }
        }
        FieldKind::Radio => {
            let chosen = match app.preview.values.get(&field.id) {
                Some(FillValue::Choice(value)) => Some(value.clone()),
                _ => None,
            };
            let mut spans = vec![Span::raw("   ")];
            for (i, pair) in field.option_pairs().iter().enumerate() {
                if i > 0 {
                    spans.push(Span::raw("  "));
                }
                let mark = if chosen.as_deref() == Some(pair.value.as_str()) {
                    "(x)"
                } else {
                    "( )"
                };
                spans.push(Span::raw(format!("{} {}", mark, pair.label)));
            }
            Line::from(spans)
        }
        FieldKind::Checkbox => {
            let checks = match app.preview.values.get(&field.id) {
                Some(FillValue::Checks(values)) => values.clone(),
                _ => Vec::new(),
            };
            let mut spans = vec![Span::raw("   ")];
            for (i, pair) in field.option_pairs().iter().enumerate() {
                if i > 0 {
                    spans.push(Span::raw("  "));
                }
                let mark = if checks.contains(&pair.value) {
                    "[x]"
                } else {
                    "[ ]"
                };
                let style = if selected && i == app.preview.option_cursor {
                    Style::default().add_modifier(Modifier::UNDERLINED)
                } else {
                    Style::default()
                };
                spans.push(Span::styled(format!("{} {}", mark, pair.label), style));
            }
            Line::from(spans)
        }
        FieldKind::Acceptance => {
            let accepted = matches!(
                app.preview.values.get(&field.id),
                Some(FillValue::Accepted(true))
            );
            let mark = if accepted { "[x]" } else { "[ ]" };
            let text = field
                .content
                .as_deref()
                .map(sanitize::display_text)
                .unwrap_or_default();
            Line::raw(format!("   {} {}", mark, truncate_end(&text, 60)))
        }
        _ => {
            if selected && app.preview.editing {
                return Line::styled(
                    format!("   [ {}_ ]", app.preview.input),
                    Style::default().fg(Color::Yellow),
                );
            }
            let value = app.preview_display_value(field);
            if value.is_empty() {
                let hint = field.placeholder.clone().unwrap_or_else(|| "...".to_string());
                Line::styled(format!("   [ {} ]", hint), Style::default().fg(Color::DarkGray))
            } else {
                Line::raw(format!("   [ {} ]", value))
            }
        }
    }
}

fn draw_confirm_clear(frame: &mut Frame, app: &App, area: Rect) {
    let layout = render_modal(
        frame,
        area,
        44,
        7,
        1,
        " Clear form ",
        Style::default().fg(Color::Red),
    );

    let body = Paragraph::new(format!(
        "\n  Remove all {} fields from the form?",
        app.schema.len()
    ))
    .wrap(Wrap { trim: false });
    frame.render_widget(body, layout.body);

    let footer = Paragraph::new("[y] Remove all   [n] Keep")
        .style(Style::default().fg(Color::DarkGray))
        .alignment(Alignment::Center);
    frame.render_widget(footer, layout.footer);
}

fn draw_submit_summary(frame: &mut Frame, app: &App, area: Rect) {
    let height = (app.schema.len() as u16 + 7).min(20);
    let layout = render_modal(
        frame,
        area,
        56,
        height,
        1,
        " Submitted ",
        Style::default().fg(Color::Green),
    );

    let mut lines: Vec<Line> = vec![
        Line::styled(
            format!("  {}", app.schema.success_message),
            Style::default().fg(Color::Green).bold(),
        ),
        Line::raw(""),
    ];
    for field in &app.schema.fields {
        let value = app.preview_display_value(field);
        let shown = if value.is_empty() {
            "—".to_string()
        } else {
            truncate_end(&value, 30)
        };
        lines.push(Line::raw(format!(
            "  {:<20} {}",
            truncate_end(&field.label, 20),
            shown
        )));
    }
    frame.render_widget(Paragraph::new(lines), layout.body);

    let footer = Paragraph::new("[Enter] Close")
        .style(Style::default().fg(Color::DarkGray))
        .alignment(Alignment::Center);
    frame.render_widget(footer, layout.footer);
}

fn draw_action_bar(frame: &mut Frame, app: &App, area: Rect) {
    if let Some(status) = &app.global_status {
        let style = if status.is_error {
            Style::default().fg(Color::Red)
        } else {
            Style::default().fg(Color::Green)
        };
        render_action_bar_message(frame, area, &status.message, style);
        return;
    }

    render_action_bar(frame, area, &app.effective_actions(), Style::default());
}

/// Draw the help overlay listing the current view's keys and the globals.
fn draw_help_overlay(frame: &mut Frame, app: &App, area: Rect) {
    let layout = render_modal(
        frame,
        area,
        46,
        22,
        1,
        " Help ",
        Style::default().fg(Color::Cyan),
    );

    let mut lines: Vec<String> = vec![String::new(), "  VIEW".to_string()];
    lines.extend(format_help_lines(&app.effective_actions()));
    lines.push(String::new());
    lines.push("  GLOBAL".to_string());
    lines.extend(format_help_lines(&app.global_actions()));

    let body = Paragraph::new(lines.join("\n")).style(Style::default().fg(Color::White));
    frame.render_widget(body, layout.body);

    let footer = Paragraph::new("Press ? or Esc to close")
        .style(Style::default().fg(Color::DarkGray))
        .alignment(Alignment::Center);
    frame.render_widget(footer, layout.footer);
}

/// Truncate string at the end if too long
fn truncate_end(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else {
        format!("{}...", s.chars().take(max_len - 3).collect::<String>())
    }
}

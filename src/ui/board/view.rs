use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph};
use ratatui::Frame;

use crate::filter;
use crate::task::{Status, Task};

use super::app::AppState;

const COLOR_TEXT: Color = Color::Rgb(234, 236, 239);
const COLOR_MUTED: Color = Color::Rgb(160, 165, 172);
const COLOR_ACCENT: Color = Color::Rgb(122, 170, 255);
const COLOR_WARNING: Color = Color::Rgb(244, 200, 98);
const COLOR_SUCCESS: Color = Color::Rgb(126, 210, 146);

pub fn render(frame: &mut Frame, app: &AppState) {
    let area = frame.size();
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints(
            [
                Constraint::Length(1),
                Constraint::Min(0),
                Constraint::Length(1),
            ]
            .as_ref(),
        )
        .split(area);

    render_header(frame, app, chunks[0]);
    render_columns(frame, app, chunks[1]);
    render_footer(frame, app, chunks[2]);
}

fn render_header(frame: &mut Frame, app: &AppState, area: Rect) {
    let mut spans = vec![
        Span::styled(
            "kb board",
            Style::default().fg(COLOR_TEXT).add_modifier(Modifier::BOLD),
        ),
        Span::styled(
            format!("  {}", app.board.partition().key()),
            Style::default().fg(COLOR_MUTED),
        ),
    ];
    if app.search_active || !app.query.is_empty() {
        let cursor = if app.search_active { "_" } else { "" };
        spans.push(Span::styled(
            format!("  search: {}{}", app.query, cursor),
            Style::default().fg(COLOR_ACCENT),
        ));
    }
    if !app.criteria.show_completed {
        spans.push(Span::styled(
            "  done hidden",
            Style::default().fg(COLOR_WARNING),
        ));
    }
    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}

fn render_columns(frame: &mut Frame, app: &AppState, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints(
            [
                Constraint::Percentage(33),
                Constraint::Percentage(34),
                Constraint::Percentage(33),
            ]
            .as_ref(),
        )
        .split(area);
    for (index, status) in Status::ALL.into_iter().enumerate() {
        render_column(frame, app, chunks[index], status, index);
    }
}

fn render_column(frame: &mut Frame, app: &AppState, area: Rect, status: Status, index: usize) {
    let view = filter::apply(app.board.tasks(), &app.criteria, &app.query);
    let cards = filter::column(&view, status);

    let border = if app.drag.hovered_column() == Some(status) {
        Style::default().fg(COLOR_SUCCESS)
    } else if index == app.column {
        Style::default().fg(COLOR_ACCENT)
    } else {
        Style::default().fg(COLOR_MUTED)
    };
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(border)
        .title(format!(" {} ({}) ", status.label(), cards.len()));

    let mut lines: Vec<Line> = Vec::new();
    for (row, task) in cards.iter().enumerate() {
        lines.push(card_line(app, task, index, row));
    }
    if cards.is_empty() {
        lines.push(Line::from(Span::styled(
            "  (empty)",
            Style::default().fg(COLOR_MUTED),
        )));
    }

    // Keep the selected card visible when the column overflows.
    let visible = area.height.saturating_sub(2) as usize;
    let scroll = if index == app.column && visible > 0 && app.row + 1 > visible {
        (app.row + 1 - visible) as u16
    } else {
        0
    };

    let paragraph = Paragraph::new(lines).block(block).scroll((scroll, 0));
    frame.render_widget(paragraph, area);
}

fn card_line(app: &AppState, task: &Task, index: usize, row: usize) -> Line<'static> {
    let selected = index == app.column && row == app.row;
    let grabbed = app.drag.dragged_task() == Some(task.id);

    let marker = if grabbed { "* " } else { "  " };
    let mut style = Style::default().fg(COLOR_TEXT);
    if grabbed {
        style = style.fg(COLOR_WARNING);
    }
    if selected {
        style = style.add_modifier(Modifier::REVERSED);
    }

    let mut spans = vec![Span::styled(format!("{marker}{}", task.title), style)];
    if !task.tag_list().is_empty() {
        spans.push(Span::styled(
            format!("  [{}]", task.tag_list().join(", ")),
            Style::default().fg(COLOR_ACCENT),
        ));
    }
    if let Some(due) = task.due_date.as_deref() {
        spans.push(Span::styled(
            format!("  due {due}"),
            Style::default().fg(COLOR_WARNING),
        ));
    }
    if !task.assignee_list().is_empty() {
        spans.push(Span::styled(
            format!("  @{}", task.assignee_list().join(",@")),
            Style::default().fg(COLOR_MUTED),
        ));
    }
    Line::from(spans)
}

fn render_footer(frame: &mut Frame, app: &AppState, area: Rect) {
    let (text, color) = if let Some(notice) = app.notice.as_deref() {
        (notice.to_string(), COLOR_SUCCESS)
    } else if app.search_active {
        (
            "type to search, enter keeps the query, esc clears it".to_string(),
            COLOR_MUTED,
        )
    } else if app.drag.is_active() {
        (
            "left/right hover a column, enter drops, esc cancels".to_string(),
            COLOR_MUTED,
        )
    } else {
        (
            "arrows/hjkl select, space grabs, / searches, d toggles done, q quits".to_string(),
            COLOR_MUTED,
        )
    };
    let line = Line::from(Span::styled(text, Style::default().fg(color)));
    frame.render_widget(Paragraph::new(line), area);
}

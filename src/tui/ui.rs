//! UI layout and rendering logic for the TUI.

use ratatui::{
    layout::{Constraint, Direction, Layout, Position, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span, Text},
    widgets::{Block, Borders, Clear, Paragraph, Tabs, Wrap},
    Frame,
};

use super::app::App;
use crate::language::Language;

const SPINNER: [&str; 4] = ["|", "/", "-", "\\"];
const OUTPUT_PLACEHOLDER: &str = "Output will appear here...";

/// Render the main UI
pub fn render_ui(frame: &mut Frame, app: &mut App) {
    let main_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),  // Language selector + run control
            Constraint::Min(5),     // Editor
            Constraint::Length(10), // Output
            Constraint::Length(1),  // Status bar
        ])
        .split(frame.area());

    render_header(frame, app, main_layout[0]);
    render_editor(frame, app, main_layout[1]);
    render_output(frame, app, main_layout[2]);
    render_status_bar(frame, app, main_layout[3]);

    if app.show_help {
        render_help_overlay(frame);
    }

    render_toasts(frame, app);
}

fn render_header(frame: &mut Frame, app: &App, area: Rect) {
    let block = Block::default()
        .borders(Borders::ALL)
        .title("Code Editor")
        .title_style(Style::default().add_modifier(Modifier::BOLD));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Min(20), Constraint::Length(18)])
        .split(inner);

    let titles: Vec<&str> = Language::ALL.iter().map(|l| l.name()).collect();
    let selected = Language::ALL
        .iter()
        .position(|l| *l == app.state.language)
        .unwrap_or(0);
    let tabs = Tabs::new(titles)
        .select(selected)
        .style(Style::default().fg(Color::Gray))
        .highlight_style(
            Style::default()
                .fg(Color::Black)
                .bg(Color::White)
                .add_modifier(Modifier::BOLD),
        );
    frame.render_widget(tabs, columns[0]);

    let (label, style) = if app.state.is_running {
        (
            format!("{} {}", SPINNER[app.tick / 4 % SPINNER.len()], app.run_label()),
            Style::default().fg(Color::Yellow),
        )
    } else if app.state.can_run() {
        (
            format!("▶ {}", app.run_label()),
            Style::default()
                .fg(Color::White)
                .bg(Color::Blue)
                .add_modifier(Modifier::BOLD),
        )
    } else {
        (app.run_label().to_string(), Style::default().fg(Color::DarkGray))
    };
    frame.render_widget(Paragraph::new(label).style(style), columns[1]);
}

fn render_editor(frame: &mut Frame, app: &mut App, area: Rect) {
    let desc = app.state.language.descriptor();
    let block = Block::default()
        .borders(Borders::ALL)
        .title(format!("{} {}", desc.name, desc.version));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    if !app.state.is_editor_ready {
        let spinner = SPINNER[app.tick / 4 % SPINNER.len()];
        let loading = Paragraph::new(format!("{spinner} Loading editor..."))
            .style(Style::default().fg(Color::DarkGray));
        frame.render_widget(loading, inner);
        return;
    }

    let height = inner.height as usize;
    app.editor.ensure_visible(height);
    let top = app.editor.scroll_top();
    let gutter = app.editor.line_count().to_string().len().max(2);

    let lines: Vec<Line> = app
        .editor
        .lines()
        .iter()
        .enumerate()
        .skip(top)
        .take(height)
        .map(|(i, text)| {
            Line::from(vec![
                Span::styled(
                    format!("{:>width$} ", i + 1, width = gutter),
                    Style::default().fg(Color::DarkGray),
                ),
                Span::raw(text.clone()),
            ])
        })
        .collect();
    frame.render_widget(Paragraph::new(Text::from(lines)), inner);

    if !app.show_help && height > 0 {
        let (row, _) = app.editor.cursor();
        let x = inner.x as usize + gutter + 1 + app.editor.cursor_display_col();
        let y = inner.y as usize + row.saturating_sub(top);
        let max_x = (inner.x + inner.width).saturating_sub(1) as usize;
        frame.set_cursor_position(Position::new(x.min(max_x) as u16, y as u16));
    }
}

fn render_output(frame: &mut Frame, app: &App, area: Rect) {
    let (text, style) = if app.state.output_text.is_empty() {
        (OUTPUT_PLACEHOLDER, Style::default().fg(Color::DarkGray))
    } else {
        (app.state.output_text.as_str(), Style::default().fg(Color::White))
    };
    let paragraph = Paragraph::new(text)
        .style(style)
        .block(Block::default().borders(Borders::ALL).title("Output"))
        .wrap(Wrap { trim: false })
        .scroll((app.output_scroll, 0));
    frame.render_widget(paragraph, area);
}

/// Render the status bar
fn render_status_bar(frame: &mut Frame, app: &App, area: Rect) {
    let (row, col) = app.editor.cursor();
    let status_text = format!(
        "{} | Ln {}, Col {} | {}",
        app.status_message,
        row + 1,
        col + 1,
        app.api_url
    );
    let status_paragraph =
        Paragraph::new(status_text).style(Style::default().bg(Color::DarkGray).fg(Color::White));

    frame.render_widget(status_paragraph, area);
}

/// Render help overlay
fn render_help_overlay(frame: &mut Frame) {
    let popup_area = centered_rect(70, 70, frame.area());
    frame.render_widget(Clear, popup_area);

    let help_lines = vec![
        Line::from("Running:"),
        Line::from("  Ctrl+R / F5      - Run code"),
        Line::from("  F2 / Ctrl+L      - Next language (resets the editor)"),
        Line::from("  F3               - Previous language"),
        Line::from(""),
        Line::from("Editing:"),
        Line::from("  Arrows, Home/End - Move cursor"),
        Line::from("  PgUp/PgDn        - Move by page"),
        Line::from("  Tab              - Insert 4 spaces"),
        Line::from("  Shift+↑/↓        - Scroll output"),
        Line::from(""),
        Line::from("General:"),
        Line::from("  Esc              - Dismiss notification"),
        Line::from("  F1               - Toggle this help"),
        Line::from("  Ctrl+Q / Ctrl+C twice - Quit"),
    ];

    let help_paragraph = Paragraph::new(Text::from(help_lines))
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title("Help")
                .title_style(
                    Style::default()
                        .fg(Color::Yellow)
                        .add_modifier(Modifier::BOLD),
                ),
        )
        .wrap(Wrap { trim: true });

    frame.render_widget(help_paragraph, popup_area);
}

/// Stack toasts in the top-right corner, newest on top.
fn render_toasts(frame: &mut Frame, app: &App) {
    let area = frame.area();
    let width = area.width.min(50);
    let mut y = area.y + 1;

    for toast in app.toasts.iter().collect::<Vec<_>>().into_iter().rev() {
        let height = 4;
        if y + height > area.y + area.height {
            break;
        }
        let rect = Rect::new(area.x + area.width - width, y, width, height);
        let color = Color::Red;
        let title = if toast.closable {
            format!("{} (Esc)", toast.title)
        } else {
            toast.title.clone()
        };
        frame.render_widget(Clear, rect);
        let paragraph = Paragraph::new(toast.description.as_str())
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_style(Style::default().fg(color))
                    .title(title)
                    .title_style(Style::default().fg(color).add_modifier(Modifier::BOLD)),
            )
            .wrap(Wrap { trim: true });
        frame.render_widget(paragraph, rect);
        y += height;
    }
}

/// Helper function to create a centered rectangle
fn centered_rect(percent_x: u16, percent_y: u16, r: Rect) -> Rect {
    let popup_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(r);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(popup_layout[1])[1]
}

//! Async event loop for the terminal editor.

use std::io;
use std::time::{Duration, Instant};

use anyhow::{bail, Result};
use crossterm::event::{
    self, DisableBracketedPaste, EnableBracketedPaste, Event, KeyCode, KeyEvent, KeyEventKind,
    KeyModifiers,
};
use crossterm::terminal::{
    disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen,
};
use crossterm::ExecutableCommand;
use ratatui::prelude::*;
use tokio::sync::mpsc;
use tracing::{debug, error, info};

use super::{app::App, events::TuiEvent, ui::render_ui};
use crate::{
    execution::PistonClient,
    notify::Notification,
    printer::format_notification,
    runner,
    session::SessionState,
};

const PAGE: usize = 10;

/// Run the terminal editor until the user quits. `color` styles the setup
/// failure message written to stderr.
pub async fn run_tui(
    client: PistonClient,
    state: SessionState,
    toast_duration: Duration,
    color: bool,
) -> Result<()> {
    if !io::IsTerminal::is_terminal(&io::stdout()) {
        bail!("the editor requires an interactive terminal; use --run for piped output");
    }

    let mut terminal = match setup_terminal() {
        Ok(t) => t,
        Err(e) => {
            error!(error = %e, "terminal setup failed");
            let _ = restore_terminal();
            eprintln!("{}", editor_error_text(color));
            return Err(e);
        }
    };

    let mut app = App::new(state, toast_duration, client.base_url().to_string());
    let (event_tx, event_rx) = mpsc::unbounded_channel::<TuiEvent>();

    let result = run_app(&mut terminal, &mut app, client, event_tx, event_rx).await;

    restore_terminal()?;
    terminal.show_cursor()?;

    result
}

fn editor_error_text(color: bool) -> String {
    format_notification(&Notification::editor_error(), color)
}

fn setup_terminal() -> Result<Terminal<CrosstermBackend<io::Stdout>>> {
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    stdout.execute(EnterAlternateScreen)?;
    stdout.execute(EnableBracketedPaste)?;
    let backend = CrosstermBackend::new(stdout);
    Ok(Terminal::new(backend)?)
}

fn restore_terminal() -> Result<()> {
    let mut stdout = io::stdout();
    let _ = stdout.execute(DisableBracketedPaste);
    stdout.execute(LeaveAlternateScreen)?;
    disable_raw_mode()?;
    Ok(())
}

/// Main application loop
async fn run_app(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
    client: PistonClient,
    event_tx: mpsc::UnboundedSender<TuiEvent>,
    mut event_rx: mpsc::UnboundedReceiver<TuiEvent>,
) -> Result<()> {
    // Spawn input handler
    let input_tx = event_tx.clone();
    tokio::task::spawn_blocking(move || {
        while !input_tx.is_closed() {
            if !event::poll(Duration::from_millis(100)).unwrap_or(false) {
                continue;
            }
            let ev = match event::read() {
                Ok(Event::Key(key)) if key.kind == KeyEventKind::Press => TuiEvent::Key(key),
                Ok(Event::Paste(text)) => TuiEvent::Paste(text),
                Ok(Event::Resize(_, _)) => TuiEvent::Resize,
                _ => continue,
            };
            if input_tx.send(ev).is_err() {
                break;
            }
        }
    });

    // First frame doubles as the editor's mount signal.
    terminal.draw(|frame| render_ui(frame, app))?;
    app.mark_editor_ready();
    info!(language = %app.state.language, "editor ready");

    loop {
        terminal.draw(|frame| render_ui(frame, app))?;

        while let Ok(tui_event) = event_rx.try_recv() {
            match tui_event {
                TuiEvent::Key(key) => {
                    if handle_key_event(app, key, &client, &event_tx) {
                        return Ok(());
                    }
                }
                TuiEvent::Paste(text) => {
                    if app.state.is_editor_ready && app.editor.insert_str(&text) {
                        app.sync_source();
                    }
                }
                TuiEvent::Resize => {}
                TuiEvent::RunCompleted(outcome) => {
                    app.finish_run(outcome, Instant::now());
                }
            }
        }

        app.toasts.prune(Instant::now());
        app.tick = app.tick.wrapping_add(1);

        // Small delay to prevent busy waiting
        tokio::time::sleep(Duration::from_millis(16)).await;
    }
}

fn spawn_run(app: &mut App, client: &PistonClient, event_tx: &mpsc::UnboundedSender<TuiEvent>) {
    let Some(request) = app.request_run() else {
        return;
    };
    let client = client.clone();
    let tx = event_tx.clone();
    tokio::spawn(async move {
        let outcome = runner::execute(&client, request).await;
        if tx.send(TuiEvent::RunCompleted(outcome)).is_err() {
            debug!("editor closed before the run completed; dropping result");
        }
    });
}

/// Handle keyboard events. Returns true when the user asked to quit.
fn handle_key_event(
    app: &mut App,
    key: KeyEvent,
    client: &PistonClient,
    event_tx: &mpsc::UnboundedSender<TuiEvent>,
) -> bool {
    let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
    let shift = key.modifiers.contains(KeyModifiers::SHIFT);

    if app.show_help {
        if matches!(key.code, KeyCode::Esc | KeyCode::F(1) | KeyCode::Char('q')) {
            app.toggle_help();
        }
        return false;
    }

    match key.code {
        KeyCode::Char('c') if ctrl => return app.handle_ctrl_c(Instant::now()),
        KeyCode::Char('q') if ctrl => return true,
        KeyCode::F(1) => app.toggle_help(),
        KeyCode::Esc => {
            app.toasts.dismiss();
        }
        KeyCode::F(5) => spawn_run(app, client, event_tx),
        KeyCode::Char('r') if ctrl => spawn_run(app, client, event_tx),
        KeyCode::F(2) => app.next_language(),
        KeyCode::Char('l') if ctrl => app.next_language(),
        KeyCode::F(3) => app.prev_language(),
        KeyCode::Up if shift => app.scroll_output_up(),
        KeyCode::Down if shift => app.scroll_output_down(),
        _ if app.state.is_editor_ready => {
            if edit_buffer(app, key) {
                app.sync_source();
            }
        }
        _ => {}
    }
    false
}

/// Apply an editing or navigation key to the buffer; true if the text changed.
fn edit_buffer(app: &mut App, key: KeyEvent) -> bool {
    let editor = &mut app.editor;
    match key.code {
        KeyCode::Char(c)
            if !key
                .modifiers
                .intersects(KeyModifiers::CONTROL | KeyModifiers::ALT) =>
        {
            editor.insert_char(c)
        }
        KeyCode::Enter => editor.insert_newline(),
        KeyCode::Tab => editor.insert_tab(),
        KeyCode::Backspace => editor.backspace(),
        KeyCode::Delete => editor.delete(),
        KeyCode::Left => {
            editor.move_left();
            false
        }
        KeyCode::Right => {
            editor.move_right();
            false
        }
        KeyCode::Up => {
            editor.move_up();
            false
        }
        KeyCode::Down => {
            editor.move_down();
            false
        }
        KeyCode::Home => {
            editor.move_home();
            false
        }
        KeyCode::End => {
            editor.move_end();
            false
        }
        KeyCode::PageUp => {
            editor.page_up(PAGE);
            false
        }
        KeyCode::PageDown => {
            editor.page_down(PAGE);
            false
        }
        _ => false,
    }
}

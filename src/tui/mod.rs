//! Terminal user interface for the visitor counter.

mod app;
mod components;

use std::io;
use std::time::Duration;

use crossterm::{
    event::{self, Event, KeyCode, KeyEventKind, KeyModifiers},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{Terminal, backend::CrosstermBackend};
use tokio::sync::mpsc;

use crate::build_info;
use crate::config::WidgetConfig;
use crate::core::RequestAction;

pub use app::{App, FetchResult};
use components::render_counter;

/// Action triggered by a key press.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyAction {
    Request(RequestAction),
    Quit,
}

/// Map a key press to an action.
#[must_use]
pub fn key_action(code: KeyCode, modifiers: KeyModifiers) -> Option<KeyAction> {
    match code {
        KeyCode::Char('c') if modifiers.contains(KeyModifiers::CONTROL) => Some(KeyAction::Quit),
        KeyCode::Char('q') | KeyCode::Esc => Some(KeyAction::Quit),
        KeyCode::Char('r' | 'R') | KeyCode::F(5) => Some(KeyAction::Request(RequestAction::Get)),
        KeyCode::Char('u' | 'U') => Some(KeyAction::Request(RequestAction::Update)),
        _ => None,
    }
}

/// Run the TUI application.
///
/// Issues an initial request as soon as the screen is up.
///
/// # Errors
///
/// Returns an error if the widget cannot be bound, terminal initialization
/// fails, or the event loop encounters an error.
pub async fn run(config: &WidgetConfig) -> anyhow::Result<()> {
    let (mut app, result_rx) = App::new(config)?;

    enable_raw_mode()?;
    let mut terminal = setup_or_restore(
        || {
            let mut stdout = io::stdout();
            execute!(stdout, EnterAlternateScreen)?;
            Ok(Terminal::new(CrosstermBackend::new(stdout))?)
        },
        || {
            let _ = execute!(io::stdout(), LeaveAlternateScreen);
            let _ = disable_raw_mode();
        },
    )?;

    app.request(RequestAction::Get);
    let result = run_app(&mut terminal, &mut app, result_rx).await;

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    result
}

/// Run `setup`, calling `restore` before returning its error.
fn setup_or_restore<T>(
    setup: impl FnOnce() -> anyhow::Result<T>,
    restore: impl FnOnce(),
) -> anyhow::Result<T> {
    setup().inspect_err(|err| {
        tracing::warn!(error = %err, "terminal setup failed, restoring");
        restore();
    })
}

async fn run_app(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
    mut result_rx: mpsc::UnboundedReceiver<FetchResult>,
) -> anyhow::Result<()> {
    let footer = format!(
        "r refresh · u update · q quit · {} · {}",
        app.widget.client().endpoint(),
        build_info::short_version()
    );

    loop {
        let status = app.status();
        let message = app.message();
        terminal.draw(|f| {
            let area = f.area();
            render_counter(f, area, &status, &message, &footer);
        })?;

        tokio::select! {
            () = tokio::time::sleep(Duration::from_millis(10)) => {
                while event::poll(Duration::from_millis(0))? {
                    if let Event::Key(key) = event::read()? {
                        if key.kind == KeyEventKind::Release {
                            continue;
                        }
                        match key_action(key.code, key.modifiers) {
                            Some(KeyAction::Quit) => return Ok(()),
                            Some(KeyAction::Request(action)) => app.request(action),
                            None => {}
                        }
                    }
                }
            }

            Some(result) = result_rx.recv() => {
                app.apply(result);
            }
        }
    }
}

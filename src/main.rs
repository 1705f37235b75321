//! DEVIS - Terminal Quote Builder
//!
//! A terminal application for composing custom workwear packs and
//! requesting quotes. Features include a pack catalog, a drag-and-drop
//! style pack builder, session-scoped quote drafts and a three-step
//! quote request form.

use std::io;

use crossterm::{
    event::{self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::{Backend, CrosstermBackend},
    Terminal,
};
use tracing_subscriber::EnvFilter;

mod application;
mod domain;
mod infrastructure;
mod presentation;

use application::{App, AppMode, DraftStore};
use infrastructure::{FileSessionStore, HttpGateway, QuoteGateway, SimulatedGateway};
use presentation::{render_ui, InputHandler};

/// Entry point for the DEVIS terminal quote builder.
///
/// Sets up logging and the terminal interface, wires the session store
/// and submission gateway, and runs the main event loop until the user
/// quits.
///
/// # Errors
///
/// Returns an error if terminal setup fails or if there are issues with
/// the terminal interface during runtime.
fn main() -> Result<(), Box<dyn std::error::Error>> {
    init_tracing()?;

    let store = FileSessionStore::for_current_session()?;
    let gateway: Box<dyn QuoteGateway> = match HttpGateway::from_env() {
        Some(gateway) => Box::new(gateway),
        None => Box::new(SimulatedGateway::default()),
    };

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let mut app = App::new(DraftStore::new(Box::new(store)));
    let res = run_app(&mut terminal, &mut app, gateway.as_ref());

    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    if let Err(err) = res {
        println!("{err:?}");
    }

    Ok(())
}

/// Logs go to a file: writing to stderr would corrupt the alternate
/// screen. Filtering follows `RUST_LOG`.
fn init_tracing() -> Result<(), Box<dyn std::error::Error>> {
    let path = std::env::temp_dir().join("devis.log");
    let file = std::fs::File::create(path)?;
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::sync::Mutex::new(file))
        .with_ansi(false)
        .init();
    Ok(())
}

/// Main application event loop.
///
/// Handles terminal rendering and keyboard input processing. Continues
/// running until the user presses 'q' on the catalog screen.
fn run_app<B: Backend>(
    terminal: &mut Terminal<B>,
    app: &mut App,
    gateway: &dyn QuoteGateway,
) -> io::Result<()> {
    loop {
        terminal.draw(|f| render_ui(f, app))?;

        if let Event::Key(key) = event::read()? {
            if key.kind == KeyEventKind::Press {
                match key.code {
                    KeyCode::Char('q') if matches!(app.mode, AppMode::Catalog) => return Ok(()),
                    _ => InputHandler::handle_key_event(app, gateway, key.code, key.modifiers),
                }
            }
        }
    }
}

//! TUI module for the interactive movie browser.
//!
//! Uses `ratatui` + `crossterm` for rendering. The event loop is
//! cooperative: it polls input without blocking and yields to the tokio
//! runtime each tick so the category and detail fetch tasks make progress.

/// Carousel pagination state machine.
pub mod carousel;
/// Detail overlay controller.
pub mod overlay;
/// Browser state types.
pub mod state;
mod ui;

use std::io;
use std::sync::Arc;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use crossterm::event::{self, Event, KeyCode, KeyEventKind, KeyModifiers};
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;
use tokio::sync::mpsc;

use self::carousel::SlideDirection;
use self::overlay::DetailLoader;
use self::state::BrowserState;
use marquee_api::tmdb::{CatalogApi, ListCategory, MovieListResponse, TMDB_SITE_URL};

/// Event loop tick interval (also the yield point for fetch tasks).
const TICK_INTERVAL: Duration = Duration::from_millis(33);

/// Runs the movie browser TUI until the user quits.
///
/// # Errors
///
/// Returns an error if terminal setup or event handling fails.
pub async fn run_browser<C>(client: Arc<C>) -> Result<()>
where
    C: CatalogApi + Send + Sync + 'static,
{
    // Kick off the four category fetches before touching the terminal.
    let (tx, rx) = mpsc::unbounded_channel();
    for category in ListCategory::ALL {
        let client = Arc::clone(&client);
        let tx = tx.clone();
        tokio::spawn(async move {
            let result = client.movie_list(category, 1).await;
            let _ = tx.send((category, result));
        });
    }

    let mut state = BrowserState::new();
    let mut loader = DetailLoader::new(client);

    enable_raw_mode().context("failed to enable raw mode")?;
    let mut stdout = io::stdout();
    crossterm::execute!(stdout, EnterAlternateScreen)
        .context("failed to enter alternate screen")?;

    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend).context("failed to create terminal")?;

    let result = run_event_loop(&mut terminal, &mut state, &mut loader, rx).await;

    // Cleanup (always attempt even if event loop failed)
    disable_raw_mode().context("failed to disable raw mode")?;
    crossterm::execute!(io::stdout(), LeaveAlternateScreen)
        .context("failed to leave alternate screen")?;

    result
}

/// Main event loop.
async fn run_event_loop<C>(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    state: &mut BrowserState,
    loader: &mut DetailLoader<C>,
    mut fetches: mpsc::UnboundedReceiver<(ListCategory, Result<MovieListResponse>)>,
) -> Result<()>
where
    C: CatalogApi + Send + Sync + 'static,
{
    loop {
        while let Ok((category, result)) = fetches.try_recv() {
            state.apply_fetch(category, result);
        }
        loader.poll_results();

        let now = Instant::now();
        state.tick(now);

        let detail = state.route.as_deref().and_then(|id| loader.get(id));
        terminal
            .draw(|frame| ui::draw(frame, state, detail, now))
            .context("failed to draw TUI")?;

        while event::poll(Duration::ZERO).context("failed to poll events")? {
            if let Event::Key(key) = event::read().context("failed to read event")?
                && key.kind == KeyEventKind::Press
                && handle_key(state, loader, key.code, key.modifiers)
            {
                return Ok(());
            }
        }

        tokio::time::sleep(TICK_INTERVAL).await;
    }
}

/// Handles one key press. Returns `true` to exit.
fn handle_key<C>(
    state: &mut BrowserState,
    loader: &mut DetailLoader<C>,
    key: KeyCode,
    modifiers: KeyModifiers,
) -> bool
where
    C: CatalogApi + Send + Sync + 'static,
{
    let now = Instant::now();
    match key {
        KeyCode::Char('q') => return true,
        KeyCode::Char('c') if modifiers.contains(KeyModifiers::CONTROL) => return true,
        KeyCode::Esc => {
            // Backdrop dismissal; quit only when no overlay is open. The
            // in-flight detail fetch, if any, is left to finish into the
            // cache.
            if state.route.is_some() {
                state.navigate_back();
            } else {
                return true;
            }
        }
        KeyCode::Up | KeyCode::Char('k') => state.focus_prev(),
        KeyCode::Down | KeyCode::Char('j') => state.focus_next(),
        KeyCode::Left => state.slide(SlideDirection::Backward, now),
        KeyCode::Right => state.slide(SlideDirection::Forward, now),
        KeyCode::Char('h') | KeyCode::BackTab => state.cursor_move(false),
        KeyCode::Char('l') | KeyCode::Tab => state.cursor_move(true),
        KeyCode::Enter => {
            if let Some(route_id) = state.activate(now) {
                loader.request(&route_id);
            }
        }
        KeyCode::Char('o') => open_tmdb_page(state),
        _ => {}
    }
    false
}

/// Opens the TMDB page for the selected movie in the system browser.
fn open_tmdb_page(state: &BrowserState) {
    let Some(route_id) = state.route.as_deref() else {
        return;
    };
    let url = format!("{TMDB_SITE_URL}/movie/{route_id}");
    let _ = open::that(&url);
}

pub mod app;
pub mod input;
pub mod layout;
pub mod theme;
pub mod views;

use crate::config::Config;
use anyhow::{Context, Result};
use crossterm::event::{self, DisableMouseCapture, EnableMouseCapture, Event, KeyEventKind};
use crossterm::terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen};
use ratatui::backend::{Backend, CrosstermBackend};
use ratatui::layout::Rect;
use ratatui::Terminal;
use std::io;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tracing::{error, info};

use crate::filesystem::store::FileKeyValueStore;
use crate::offline::fetch::DirFetcher;
use crate::offline::storage::DirCacheStorage;
use crate::offline::{CacheManager, DEFAULT_MANIFEST};
use crate::vault::generator::SystemRng;
use crate::vault::persistence::Persistence;
use crate::vault::service::VaultService;
use crate::view::snapshot::{AlertQueue, SnapshotRenderer};

use self::app::App;
use self::input::{handle_key, handle_mouse, Flow};
use self::views::render;

const TICK_RATE: Duration = Duration::from_millis(200);

/// Where the draw loop gets terminal input from.
pub trait EventSource {
    /// Wait up to `timeout`; `None` when nothing arrived.
    fn next(&mut self, timeout: Duration) -> io::Result<Option<Event>>;
}

pub struct CrosstermEvents;

impl EventSource for CrosstermEvents {
    fn next(&mut self, timeout: Duration) -> io::Result<Option<Event>> {
        if event::poll(timeout)? {
            Ok(Some(event::read()?))
        } else {
            Ok(None)
        }
    }
}

/// Vault state the draw loop reads and drives.
pub struct Session {
    pub app: App,
    pub service: VaultService,
    pub renderer: SnapshotRenderer,
    pub alerts: AlertQueue,
}

pub async fn launch(config: &Config) -> Result<()> {
    let storage = Arc::new(FileKeyValueStore::new_with_backups(
        config.data_dir.clone(),
        config.backups,
    ));
    let persistence = Persistence::new(storage, config.codec.codec());
    let renderer = SnapshotRenderer::new();
    let alerts = AlertQueue::new();
    let service = VaultService::open(
        persistence,
        Arc::new(SystemRng),
        Box::new(renderer.clone()),
        Box::new(alerts.clone()),
    )
    .context("failed to load vault for TUI")?;
    let mut session = Session { app: App::new(config.generator), service, renderer, alerts };

    // Offline cache registration runs beside the UI; failures are logged only.
    let manager = CacheManager::new(
        config.cache_version.clone(),
        DirCacheStorage::new(config.cache_dir.clone()),
        DirFetcher::new(config.assets_dir.clone()),
    );
    tokio::spawn(async move {
        if let Err(e) = manager.register(DEFAULT_MANIFEST).await {
            error!(error = %e, "offline cache registration failed");
        }
    });

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    crossterm::execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;
    info!(records = session.service.records().len(), "tui started");

    let res = run_blocking(&mut terminal, &mut CrosstermEvents, &mut session);

    // Restore terminal
    disable_raw_mode()?;
    crossterm::execute!(terminal.backend_mut(), LeaveAlternateScreen, DisableMouseCapture)?;
    terminal.show_cursor()?;

    res
}

/// Run the draw loop on the current worker thread, handing its other tasks
/// to the rest of the runtime. Needs the multi-threaded tokio runtime.
pub fn run_blocking<B: Backend, E: EventSource>(
    terminal: &mut Terminal<B>,
    events: &mut E,
    session: &mut Session,
) -> Result<()> {
    tokio::task::block_in_place(|| run_loop(terminal, events, session))
}

/// Draw, wait for one event, react; until a quit key or a terminal error.
pub fn run_loop<B: Backend, E: EventSource>(
    terminal: &mut Terminal<B>,
    events: &mut E,
    session: &mut Session,
) -> Result<()> {
    let Session { app, service, renderer, alerts } = session;
    let mut last_tick = Instant::now();

    loop {
        let table = renderer.current();
        let alert = alerts.front();
        terminal.draw(|f| render(f, &*app, &table, alert.as_deref()))?;

        let timeout = TICK_RATE
            .checked_sub(last_tick.elapsed())
            .unwrap_or(Duration::from_millis(0));

        let step = match events.next(timeout)? {
            Some(Event::Key(k)) if k.kind == KeyEventKind::Press => {
                handle_key(app, service, alerts, k)
            }
            Some(Event::Mouse(m)) => {
                let size = terminal.size()?;
                let screen = Rect::new(0, 0, size.width, size.height);
                handle_mouse(app, service, alerts, screen, m).map(|()| Flow::Continue)
            }
            _ => Ok(Flow::Continue),
        };
        match step {
            Ok(Flow::Quit) => return Ok(()),
            Ok(Flow::Continue) => {}
            Err(e) => {
                error!(error = %e, "action failed");
                app.toast(format!("Error: {e}"));
            }
        }

        if last_tick.elapsed() >= TICK_RATE {
            app.tick();
            last_tick = Instant::now();
        }
    }
}
